use crate::domain::{check_consistency, payment_after_item_refund, plan_transition};
use crate::entities::order_items::OrderItemStatus;
use crate::entities::orders::{DeliveryStatus, OrderStatus};
use crate::entities::{
    delivery_entity as deliveries, order_entity as orders, order_item_entity as order_items,
};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 정합성 점검 시 한 번에 읽는 주문 수
const SCAN_BATCH: u64 = 500;

#[derive(Clone)]
pub struct OrderService {
    pool: SharedPool,
}

impl OrderService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &OrderQuery) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = orders::Entity::find();
        if let Some(s) = query.order_status {
            select = select.filter(orders::Column::OrderStatus.eq(s));
        }
        if let Some(s) = query.payment_status {
            select = select.filter(orders::Column::PaymentStatus.eq(s));
        }
        if let Some(s) = query.delivery_status {
            select = select.filter(orders::Column::DeliveryStatus.eq(s));
        }
        if let Some(user_id) = query.user_id {
            select = select.filter(orders::Column::UserId.eq(user_id));
        }
        if let Some(seller_id) = query.seller_id {
            select = select.filter(
                orders::Column::Id.in_subquery(
                    Query::select()
                        .column(order_items::Column::OrderId)
                        .from(order_items::Entity)
                        .and_where(order_items::Column::SellerId.eq(seller_id))
                        .to_owned(),
                ),
            );
        }
        if let Some(keyword) = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(orders::Column::OrderNumber.contains(keyword));
        }
        if let Some(from) = query.ordered_from {
            select = select.filter(orders::Column::OrderedAt.gte(from));
        }
        if let Some(to) = query.ordered_to {
            select = select.filter(orders::Column::OrderedAt.lt(to));
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(orders::Column::OrderedAt)
            .order_by_desc(orders::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;

        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    async fn find<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<orders::Model> {
        orders::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<OrderDetailResponse> {
        let order = Self::find(self.pool.as_ref(), id).await?;
        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(id))
            .order_by_asc(order_items::Column::Id)
            .all(self.pool.as_ref())
            .await?;
        let delivery = deliveries::Entity::find()
            .filter(deliveries::Column::OrderId.eq(id))
            .one(self.pool.as_ref())
            .await?;

        Ok(OrderDetailResponse {
            order: order.into(),
            items: items.into_iter().map(Into::into).collect(),
            delivery: delivery.map(Into::into),
        })
    }

    /// 주문 상태 전이. 결제/배송 상태, 주문상품, 배송 기록을 함께 맞춘다.
    pub async fn update_status(
        &self,
        id: i64,
        request: UpdateOrderStatusRequest,
    ) -> AppResult<OrderDetailResponse> {
        let txn = self.pool.begin().await?;
        let order = Self::find(&txn, id).await?;
        let from = order.order_status;
        let plan = plan_transition(from, request.status)?;
        let now = Utc::now();

        let mut am = order.into_active_model();
        am.order_status = Set(plan.to);
        if let Some(p) = plan.payment {
            am.payment_status = Set(p);
        }
        if let Some(d) = plan.delivery {
            am.delivery_status = Set(d);
        }
        if plan.stamp_paid_at {
            am.paid_at = Set(Some(now));
        }
        am.updated_at = Set(now);
        let order = am.update(&txn).await?;

        if let Some(item_status) = plan.items {
            order_items::Entity::update_many()
                .col_expr(order_items::Column::Status, Expr::value(item_status))
                .col_expr(order_items::Column::UpdatedAt, Expr::value(now))
                .filter(order_items::Column::OrderId.eq(id))
                .filter(order_items::Column::Status.eq(OrderItemStatus::Normal))
                .exec(&txn)
                .await?;
        }

        let existing = deliveries::Entity::find()
            .filter(deliveries::Column::OrderId.eq(id))
            .one(&txn)
            .await?;
        match (existing, &request.courier, &request.tracking_number) {
            (Some(delivery), courier, tracking) => {
                let mut dam = delivery.into_active_model();
                dam.status = Set(order.delivery_status);
                if let Some(c) = courier {
                    dam.courier = Set(require_text("courier", c, 50)?);
                }
                if let Some(t) = tracking {
                    dam.tracking_number = Set(require_text("tracking_number", t, 50)?);
                }
                stamp_delivery_times(&mut dam, order.delivery_status, now);
                dam.updated_at = Set(now);
                dam.update(&txn).await?;
            }
            (None, Some(courier), Some(tracking)) => {
                let mut dam = deliveries::ActiveModel {
                    order_id: Set(id),
                    courier: Set(require_text("courier", courier, 50)?),
                    tracking_number: Set(require_text("tracking_number", tracking, 50)?),
                    status: Set(order.delivery_status),
                    shipped_at: Set(None),
                    delivered_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                stamp_delivery_times(&mut dam, order.delivery_status, now);
                dam.insert(&txn).await?;
            }
            _ => {}
        }

        txn.commit().await?;
        log::info!(
            "Order {id} moved from {} to {}",
            from.as_str(),
            order.order_status.as_str()
        );
        self.get(id).await
    }

    /// 배송 정보 등록/수정. 배송 상태는 주문의 배송 상태를 따른다.
    pub async fn upsert_delivery(
        &self,
        id: i64,
        request: UpsertDeliveryRequest,
    ) -> AppResult<DeliveryResponse> {
        let courier = require_text("courier", &request.courier, 50)?;
        let tracking = require_text("tracking_number", &request.tracking_number, 50)?;
        let order = Self::find(self.pool.as_ref(), id).await?;
        if matches!(
            order.order_status,
            OrderStatus::Pending | OrderStatus::Cancelled
        ) {
            return Err(AppError::InvalidState(format!(
                "Cannot register delivery for {} orders",
                order.order_status.as_str()
            )));
        }
        let now = Utc::now();

        let existing = deliveries::Entity::find()
            .filter(deliveries::Column::OrderId.eq(id))
            .one(self.pool.as_ref())
            .await?;
        let saved = match existing {
            Some(delivery) => {
                let mut dam = delivery.into_active_model();
                dam.courier = Set(courier);
                dam.tracking_number = Set(tracking);
                dam.status = Set(order.delivery_status);
                dam.updated_at = Set(now);
                dam.update(self.pool.as_ref()).await?
            }
            None => {
                deliveries::ActiveModel {
                    order_id: Set(id),
                    courier: Set(courier),
                    tracking_number: Set(tracking),
                    status: Set(order.delivery_status),
                    shipped_at: Set(None),
                    delivered_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(self.pool.as_ref())
                .await?
            }
        };
        Ok(saved.into())
    }

    /// 주문상품 1건 환불
    pub async fn refund_item(&self, order_id: i64, item_id: i64) -> AppResult<OrderDetailResponse> {
        let txn = self.pool.begin().await?;
        let order = Self::find(&txn, order_id).await?;
        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order_id))
            .all(&txn)
            .await?;
        let target = items
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Order item {item_id} not found in order {order_id}"))
            })?;
        let normal_left = items
            .iter()
            .filter(|i| i.id != item_id && i.status == OrderItemStatus::Normal)
            .count();
        let payment = payment_after_item_refund(order.order_status, target.status, normal_left)?;
        let now = Utc::now();

        let mut iam = target.into_active_model();
        iam.status = Set(OrderItemStatus::Refunded);
        iam.updated_at = Set(now);
        iam.update(&txn).await?;

        let mut oam = order.into_active_model();
        oam.payment_status = Set(payment);
        oam.updated_at = Set(now);
        oam.update(&txn).await?;

        txn.commit().await?;
        log::info!("Order item {item_id} of order {order_id} refunded");
        self.get(order_id).await
    }

    /// 결제/배송 상태가 주문 상태와 맞지 않는 주문을 보고한다 (수정하지 않음)
    pub async fn find_inconsistencies(&self) -> AppResult<Vec<OrderInconsistencyResponse>> {
        let mut found = Vec::new();
        let mut last_id = 0i64;
        loop {
            let batch = orders::Entity::find()
                .filter(orders::Column::Id.gt(last_id))
                .order_by_asc(orders::Column::Id)
                .limit(SCAN_BATCH)
                .all(self.pool.as_ref())
                .await?;
            let Some(last) = batch.last() else {
                break;
            };
            last_id = last.id;
            let done = (batch.len() as u64) < SCAN_BATCH;

            for order in batch {
                if let Some(inconsistency) = check_consistency(
                    order.order_status,
                    order.payment_status,
                    order.delivery_status,
                ) {
                    found.push(OrderInconsistencyResponse {
                        order_id: order.id,
                        order_number: order.order_number,
                        inconsistency,
                    });
                }
            }
            if done {
                break;
            }
        }
        Ok(found)
    }
}

fn stamp_delivery_times(
    dam: &mut deliveries::ActiveModel,
    status: DeliveryStatus,
    now: chrono::DateTime<Utc>,
) {
    match status {
        DeliveryStatus::Shipping => dam.shipped_at = Set(Some(now)),
        DeliveryStatus::Delivered => dam.delivered_at = Set(Some(now)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::orders::PaymentStatus;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn order(id: i64, status: OrderStatus, payment: PaymentStatus, delivery: DeliveryStatus) -> orders::Model {
        let now = Utc::now();
        orders::Model {
            id,
            order_number: format!("ORD{id:08}"),
            user_id: 1,
            order_status: status,
            payment_status: payment,
            delivery_status: delivery,
            total_amount: 30_000,
            shipping_address: "서울".to_string(),
            ordered_at: now,
            paid_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn item(id: i64, status: OrderItemStatus) -> order_items::Model {
        let now = Utc::now();
        order_items::Model {
            id,
            order_id: 1,
            product_id: 9,
            seller_id: 3,
            product_name: "텀블러".to_string(),
            unit_price: 15_000,
            quantity: 1,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_invalid_transition_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order(
                1,
                OrderStatus::Shipping,
                PaymentStatus::Paid,
                DeliveryStatus::Shipping,
            )]])
            .into_connection();
        let err = OrderService::new(db)
            .update_status(
                1,
                UpdateOrderStatusRequest {
                    status: OrderStatus::Cancelled,
                    courier: None,
                    tracking_number: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_cancel_updates_payment_delivery_and_items() {
        let before = order(1, OrderStatus::Paid, PaymentStatus::Paid, DeliveryStatus::Pending);
        let after = order(
            1,
            OrderStatus::Cancelled,
            PaymentStatus::Refunded,
            DeliveryStatus::Cancelled,
        );
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![before]])
            .append_query_results([vec![after.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .append_query_results([Vec::<deliveries::Model>::new()])
            // get()
            .append_query_results([vec![after]])
            .append_query_results([vec![
                item(1, OrderItemStatus::Cancelled),
                item(2, OrderItemStatus::Cancelled),
            ]])
            .append_query_results([Vec::<deliveries::Model>::new()])
            .into_connection();

        let detail = OrderService::new(db)
            .update_status(
                1,
                UpdateOrderStatusRequest {
                    status: OrderStatus::Cancelled,
                    courier: None,
                    tracking_number: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(detail.order.payment_status, PaymentStatus::Refunded);
        assert_eq!(detail.order.delivery_status, DeliveryStatus::Cancelled);
        assert!(detail
            .items
            .iter()
            .all(|i| i.status == OrderItemStatus::Cancelled));
    }

    #[tokio::test]
    async fn test_refund_item_only_on_delivered_orders() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order(
                1,
                OrderStatus::Shipping,
                PaymentStatus::Paid,
                DeliveryStatus::Shipping,
            )]])
            .append_query_results([vec![
                item(1, OrderItemStatus::Normal),
                item(2, OrderItemStatus::Normal),
            ]])
            .into_connection();
        let err = OrderService::new(db).refund_item(1, 1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_find_inconsistencies_reports_mismatches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                order(1, OrderStatus::Delivered, PaymentStatus::Paid, DeliveryStatus::Delivered),
                order(2, OrderStatus::Cancelled, PaymentStatus::Paid, DeliveryStatus::Returned),
                order(3, OrderStatus::Shipping, PaymentStatus::Paid, DeliveryStatus::Pending),
            ]])
            .into_connection();
        let found = OrderService::new(db).find_inconsistencies().await.unwrap();
        let ids: Vec<i64> = found.iter().map(|f| f.order_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(found[0].inconsistency.problems.len(), 1);
    }
}
