//! 개발/데모용 샘플 데이터.
//!
//! 판매자 2명, 회원 3명, 상품 3개와 2025년 3월 주문을 만든다. 판매자 1의 배송 완료
//! 주문 5건은 합계 1,250,000원이라 월 정산 결과를 손으로 검산할 수 있다.

use crate::entities::order_items::OrderItemStatus;
use crate::entities::orders::{DeliveryStatus, OrderStatus, PaymentStatus};
use crate::entities::products::ProductStatus;
use crate::entities::sellers::SellerStatus;
use crate::entities::settlement_periods::{PeriodType, SettlementPeriodStatus};
use crate::entities::users::UserStatus;
use crate::entities::{
    address_entity as addresses, delivery_entity as deliveries, order_entity as orders,
    order_item_entity as order_items, product_entity as products, seller_entity as sellers,
    settlement_period_entity as periods, user_entity as users,
};
use crate::database::SharedPool;
use crate::error::AppResult;
use crate::utils::generate_order_number;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, Set,
    TransactionTrait,
};
use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize)]
pub struct SeedSummary {
    pub skipped: bool,
    pub sellers: usize,
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub periods: usize,
}

struct SampleOrder {
    user: usize,
    product: usize,
    quantity: i32,
    day: u32,
    status: OrderStatus,
    payment: PaymentStatus,
    delivery: DeliveryStatus,
    item_status: OrderItemStatus,
}

#[derive(Clone)]
pub struct SeedService {
    pool: SharedPool,
}

impl SeedService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    /// 판매자가 하나라도 있으면 아무것도 하지 않는다
    pub async fn seed(&self) -> AppResult<SeedSummary> {
        if sellers::Entity::find().count(self.pool.as_ref()).await? > 0 {
            log::info!("Database already has sellers; skipping seed");
            return Ok(SeedSummary {
                skipped: true,
                ..Default::default()
            });
        }

        let txn = self.pool.begin().await?;
        let summary = Self::seed_all(&txn).await?;
        txn.commit().await?;
        log::info!("Seeded sample data: {summary:?}");
        Ok(summary)
    }

    async fn seed_all(txn: &DatabaseTransaction) -> AppResult<SeedSummary> {
        let now = Utc::now();

        let seller_rows = [
            ("그린팜 농산", "김초록", "123-45-67890", "green@farm.example", None),
            ("바다상회", "이파랑", "234-56-78901", "sea@shop.example", Some(300)),
        ];
        let mut seller_ids = Vec::new();
        for (name, rep, biz, email, rate) in seller_rows {
            let seller = sellers::ActiveModel {
                business_name: Set(name.to_string()),
                representative_name: Set(rep.to_string()),
                business_number: Set(biz.to_string()),
                email: Set(email.to_string()),
                phone: Set("02-1234-5678".to_string()),
                status: Set(SellerStatus::Active),
                commission_rate_bp: Set(rate),
                bank_name: Set(Some("국민은행".to_string())),
                bank_account: Set(Some("000-00-0000-000".to_string())),
                account_holder: Set(Some(rep.to_string())),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            seller_ids.push(seller.id);
        }

        let user_rows = [
            ("minji@example.com", "김민지"),
            ("junho@example.com", "박준호"),
            ("seoyeon@example.com", "최서연"),
        ];
        let mut user_ids = Vec::new();
        for (email, name) in user_rows {
            let user = users::ActiveModel {
                email: Set(email.to_string()),
                name: Set(name.to_string()),
                phone: Set(Some("010-0000-0000".to_string())),
                status: Set(UserStatus::Active),
                marketing_agreed: Set(false),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            addresses::ActiveModel {
                user_id: Set(user.id),
                recipient: Set(name.to_string()),
                phone: Set("010-0000-0000".to_string()),
                zip_code: Set("04524".to_string()),
                address1: Set("서울특별시 중구 세종대로 110".to_string()),
                address2: Set(None),
                is_default: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            user_ids.push(user.id);
        }

        // (판매자 인덱스, 이름, 카테고리, 가격)
        let product_rows = [
            (0, "유기농 사과 5kg", "과일", 250_000),
            (0, "제철 배 선물세트", "과일", 120_000),
            (1, "손질 고등어 10팩", "수산", 45_000),
        ];
        let mut product_info = Vec::new();
        for (seller, name, category, price) in product_rows {
            let product = products::ActiveModel {
                seller_id: Set(seller_ids[seller]),
                name: Set(name.to_string()),
                description: Set(format!("{name} 상품입니다.")),
                category: Set(category.to_string()),
                price: Set(price),
                sale_price: Set(None),
                stock: Set(100),
                status: Set(ProductStatus::OnSale),
                thumbnail_url: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            product_info.push((product.id, seller_ids[seller], product.name, product.price));
        }

        let delivered = |user, day| SampleOrder {
            user,
            product: 0,
            quantity: 1,
            day,
            status: OrderStatus::Delivered,
            payment: PaymentStatus::Paid,
            delivery: DeliveryStatus::Delivered,
            item_status: OrderItemStatus::Normal,
        };
        let samples = vec![
            delivered(0, 3),
            delivered(1, 7),
            delivered(2, 12),
            delivered(0, 18),
            delivered(1, 25),
            SampleOrder {
                user: 2,
                product: 1,
                quantity: 1,
                day: 20,
                status: OrderStatus::Cancelled,
                payment: PaymentStatus::Refunded,
                delivery: DeliveryStatus::Cancelled,
                item_status: OrderItemStatus::Cancelled,
            },
            SampleOrder {
                user: 0,
                product: 2,
                quantity: 2,
                day: 15,
                status: OrderStatus::Confirmed,
                payment: PaymentStatus::Paid,
                delivery: DeliveryStatus::Delivered,
                item_status: OrderItemStatus::Normal,
            },
        ];

        for (i, sample) in samples.iter().enumerate() {
            let paid_at = Utc
                .with_ymd_and_hms(2025, 3, sample.day, 10, 0, 0)
                .single()
                .unwrap_or(now)
                + Duration::seconds(i as i64);
            let (product_id, seller_id, product_name, price) = &product_info[sample.product];
            let total = price * i64::from(sample.quantity);

            let order = orders::ActiveModel {
                order_number: Set(generate_order_number(paid_at)),
                user_id: Set(user_ids[sample.user]),
                order_status: Set(sample.status),
                payment_status: Set(sample.payment),
                delivery_status: Set(sample.delivery),
                total_amount: Set(total),
                shipping_address: Set("서울특별시 중구 세종대로 110".to_string()),
                ordered_at: Set(paid_at - Duration::minutes(5)),
                paid_at: Set(Some(paid_at)),
                created_at: Set(paid_at),
                updated_at: Set(paid_at),
                ..Default::default()
            }
            .insert(txn)
            .await?;

            order_items::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(*product_id),
                seller_id: Set(*seller_id),
                product_name: Set(product_name.clone()),
                unit_price: Set(*price),
                quantity: Set(sample.quantity),
                status: Set(sample.item_status),
                created_at: Set(paid_at),
                updated_at: Set(paid_at),
                ..Default::default()
            }
            .insert(txn)
            .await?;

            if sample.delivery == DeliveryStatus::Delivered {
                deliveries::ActiveModel {
                    order_id: Set(order.id),
                    courier: Set("CJ대한통운".to_string()),
                    tracking_number: Set(format!("6890{:08}", order.id)),
                    status: Set(DeliveryStatus::Delivered),
                    shipped_at: Set(Some(paid_at + Duration::days(1))),
                    delivered_at: Set(Some(paid_at + Duration::days(2))),
                    created_at: Set(paid_at),
                    updated_at: Set(paid_at),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
            }
        }

        let march = |day| NaiveDate::from_ymd_opt(2025, 3, day);
        if let (Some(start), Some(end), Some(pay)) = (march(1), march(31), NaiveDate::from_ymd_opt(2025, 4, 10)) {
            periods::ActiveModel {
                period_type: Set(PeriodType::Monthly),
                start_date: Set(start),
                end_date: Set(end),
                settlement_date: Set(pay),
                status: Set(SettlementPeriodStatus::Preparing),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }

        Ok(SeedSummary {
            skipped: false,
            sellers: seller_ids.len(),
            users: user_ids.len(),
            products: product_info.len(),
            orders: samples.len(),
            periods: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_seed_skips_populated_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(2)),
            )])]])
            .into_connection();
        let summary = SeedService::new(db).seed().await.unwrap();
        assert!(summary.skipped);
        assert_eq!(summary.orders, 0);
    }
}
