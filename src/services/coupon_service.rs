use std::collections::{BTreeSet, HashSet};

use crate::domain::{discount_for, issuable_quantity, normalize_coupon_code, validate_coupon_rules};
use crate::entities::{
    coupon_entity as coupons, user_coupon_entity as user_coupons, user_entity as users,
};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{generate_coupon_code, require_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

const GENERATED_CODE_LEN: usize = 10;
const CODE_ATTEMPTS: usize = 5;

#[derive(Clone)]
pub struct CouponService {
    pool: SharedPool,
}

impl CouponService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &CouponQuery) -> AppResult<PaginatedResponse<CouponResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = coupons::Entity::find();
        if let Some(seller_id) = query.seller_id {
            select = select.filter(coupons::Column::SellerId.eq(seller_id));
        }
        if let Some(active) = query.is_active {
            select = select.filter(coupons::Column::IsActive.eq(active));
        }
        if let Some(keyword) = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(coupons::Column::Name.contains(keyword))
                    .add(coupons::Column::Code.contains(keyword.to_ascii_uppercase())),
            );
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(coupons::Column::CreatedAt)
            .order_by_desc(coupons::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<coupons::Model> {
        coupons::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Coupon {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<CouponResponse> {
        Ok(self.find(id).await?.into())
    }

    async fn code_taken(&self, code: &str) -> AppResult<bool> {
        Ok(coupons::Entity::find()
            .filter(coupons::Column::Code.eq(code))
            .count(self.pool.as_ref())
            .await?
            > 0)
    }

    pub async fn create(&self, request: CreateCouponRequest) -> AppResult<CouponResponse> {
        let name = require_text("name", &request.name, 100)?;
        validate_coupon_rules(
            request.discount_type,
            request.discount_value,
            request.min_order_amount,
            request.max_discount_amount,
            request.starts_at,
            request.ends_at,
            request.total_quantity,
        )?;

        let code = match request.code.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(raw) => {
                let code = normalize_coupon_code(raw)?;
                if self.code_taken(&code).await? {
                    return Err(AppError::Conflict(format!("Coupon code {code} already exists")));
                }
                code
            }
            None => {
                let mut generated = None;
                for _ in 0..CODE_ATTEMPTS {
                    let candidate = generate_coupon_code(GENERATED_CODE_LEN);
                    if !self.code_taken(&candidate).await? {
                        generated = Some(candidate);
                        break;
                    }
                }
                generated.ok_or_else(|| {
                    AppError::InternalError("Could not generate a unique coupon code".to_string())
                })?
            }
        };

        let now = Utc::now();
        let coupon = coupons::ActiveModel {
            code: Set(code),
            name: Set(name),
            discount_type: Set(request.discount_type),
            discount_value: Set(request.discount_value),
            min_order_amount: Set(request.min_order_amount),
            max_discount_amount: Set(request.max_discount_amount),
            seller_id: Set(request.seller_id),
            starts_at: Set(request.starts_at),
            ends_at: Set(request.ends_at),
            total_quantity: Set(request.total_quantity),
            issued_count: Set(0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Coupon {} created ({})", coupon.id, coupon.code);
        Ok(coupon.into())
    }

    pub async fn update(&self, id: i64, request: UpdateCouponRequest) -> AppResult<CouponResponse> {
        let coupon = self.find(id).await?;

        let discount_value = request.discount_value.unwrap_or(coupon.discount_value);
        let min_order_amount = request.min_order_amount.unwrap_or(coupon.min_order_amount);
        let max_discount_amount = request.max_discount_amount.or(coupon.max_discount_amount);
        let starts_at = request.starts_at.unwrap_or(coupon.starts_at);
        let ends_at = request.ends_at.unwrap_or(coupon.ends_at);
        let total_quantity = request.total_quantity.or(coupon.total_quantity);
        validate_coupon_rules(
            coupon.discount_type,
            discount_value,
            min_order_amount,
            max_discount_amount,
            starts_at,
            ends_at,
            total_quantity,
        )?;
        if let Some(total) = total_quantity
            && total < coupon.issued_count
        {
            return Err(AppError::ValidationError(format!(
                "total_quantity cannot be below the {} coupons already issued",
                coupon.issued_count
            )));
        }

        let mut am = coupon.into_active_model();
        if let Some(name) = request.name {
            am.name = Set(require_text("name", &name, 100)?);
        }
        am.discount_value = Set(discount_value);
        am.min_order_amount = Set(min_order_amount);
        am.max_discount_amount = Set(max_discount_amount);
        am.starts_at = Set(starts_at);
        am.ends_at = Set(ends_at);
        am.total_quantity = Set(total_quantity);
        if let Some(active) = request.is_active {
            am.is_active = Set(active);
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    /// 사용된 발급분이 있으면 삭제하지 않는다
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let coupon = self.find(id).await?;
        let used = user_coupons::Entity::find()
            .filter(user_coupons::Column::CouponId.eq(id))
            .filter(user_coupons::Column::UsedAt.is_not_null())
            .count(self.pool.as_ref())
            .await?;
        if used > 0 {
            return Err(AppError::Conflict(format!(
                "Coupon {} has been used {used} time(s); deactivate it instead",
                coupon.code
            )));
        }
        coupons::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        log::info!("Coupon {id} deleted");
        Ok(())
    }

    /// 사용자들에게 쿠폰 발급. 중복 발급은 건너뛰고 수량 상한을 넘지 않는다.
    pub async fn issue(&self, id: i64, request: IssueCouponRequest) -> AppResult<IssueCouponResponse> {
        // 요청 순서를 유지하며 중복 ID 제거
        let mut seen = HashSet::new();
        let requested: Vec<i64> = request
            .user_ids
            .into_iter()
            .filter(|uid| seen.insert(*uid))
            .collect();
        if requested.is_empty() {
            return Err(AppError::ValidationError("user_ids must not be empty".to_string()));
        }

        let txn = self.pool.begin().await?;
        let coupon = coupons::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Coupon {id} not found")))?;
        let mut remaining = issuable_quantity(&coupon, Utc::now())?;

        let known: HashSet<i64> = users::Entity::find()
            .select_only()
            .column(users::Column::Id)
            .filter(users::Column::Id.is_in(requested.clone()))
            .into_tuple::<i64>()
            .all(&txn)
            .await?
            .into_iter()
            .collect();
        let unknown: BTreeSet<i64> = requested
            .iter()
            .copied()
            .filter(|uid| !known.contains(uid))
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Unknown user ids: {unknown:?}"
            )));
        }

        let already: HashSet<i64> = user_coupons::Entity::find()
            .select_only()
            .column(user_coupons::Column::UserId)
            .filter(user_coupons::Column::CouponId.eq(id))
            .filter(user_coupons::Column::UserId.is_in(requested.clone()))
            .into_tuple::<i64>()
            .all(&txn)
            .await?
            .into_iter()
            .collect();

        let now = Utc::now();
        let mut result = IssueCouponResponse::default();
        let mut rows = Vec::new();
        for uid in requested {
            if already.contains(&uid) {
                result.duplicate_user_ids.push(uid);
                continue;
            }
            if let Some(left) = remaining.as_mut() {
                if *left == 0 {
                    result.sold_out_user_ids.push(uid);
                    continue;
                }
                *left -= 1;
            }
            rows.push(user_coupons::ActiveModel {
                coupon_id: Set(id),
                user_id: Set(uid),
                issued_at: Set(now),
                used_at: Set(None),
                order_id: Set(None),
                ..Default::default()
            });
            result.issued_user_ids.push(uid);
        }

        let issued_now = result.issued_user_ids.len() as i32;
        if !rows.is_empty() {
            user_coupons::Entity::insert_many(rows).exec(&txn).await?;
        }
        let issued_count = coupon.issued_count + issued_now;
        if issued_now > 0 {
            let mut am = coupon.into_active_model();
            am.issued_count = Set(issued_count);
            am.updated_at = Set(now);
            am.update(&txn).await?;
        }
        txn.commit().await?;

        result.issued_count = issued_count;
        log::info!(
            "Coupon {id}: issued {issued_now}, duplicates {}, sold out {}",
            result.duplicate_user_ids.len(),
            result.sold_out_user_ids.len()
        );
        Ok(result)
    }

    pub async fn list_issued(
        &self,
        id: i64,
        params: &PaginationParams,
    ) -> AppResult<PaginatedResponse<UserCouponResponse>> {
        self.find(id).await?;
        let select = user_coupons::Entity::find().filter(user_coupons::Column::CouponId.eq(id));
        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(user_coupons::Column::IssuedAt)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(self.pool.as_ref())
            .await?;
        Ok(PaginatedResponse::new(
            items.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }

    pub async fn preview_discount(
        &self,
        id: i64,
        order_amount: i64,
    ) -> AppResult<DiscountPreviewResponse> {
        if order_amount < 0 {
            return Err(AppError::ValidationError(
                "order_amount must not be negative".to_string(),
            ));
        }
        let coupon = self.find(id).await?;
        let discount_amount = discount_for(&coupon, order_amount);
        Ok(DiscountPreviewResponse {
            coupon_id: coupon.id,
            order_amount,
            discount_amount,
            payable_amount: order_amount - discount_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::coupons::DiscountType;
    use chrono::{Duration, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn coupon(total_quantity: Option<i32>, issued_count: i32) -> coupons::Model {
        let now = Utc::now();
        coupons::Model {
            id: 1,
            code: "SPRING-20".to_string(),
            name: "봄맞이 20%".to_string(),
            discount_type: DiscountType::Percent,
            discount_value: 20,
            min_order_amount: 10_000,
            max_discount_amount: Some(5_000),
            seller_id: None,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(30),
            total_quantity,
            issued_count,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_percent_over_100() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let starts = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let err = CouponService::new(db)
            .create(CreateCouponRequest {
                code: Some("bad".to_string()),
                name: "잘못된 쿠폰".to_string(),
                discount_type: DiscountType::Percent,
                discount_value: 150,
                min_order_amount: 0,
                max_discount_amount: None,
                seller_id: None,
                starts_at: starts,
                ends_at: starts + Duration::days(7),
                total_quantity: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_issue_skips_duplicates_and_caps_quantity() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![coupon(Some(3), 1)]])
            .append_query_results([vec![
                std::collections::BTreeMap::from([("id", sea_orm::Value::BigInt(Some(10)))]),
                std::collections::BTreeMap::from([("id", sea_orm::Value::BigInt(Some(11)))]),
                std::collections::BTreeMap::from([("id", sea_orm::Value::BigInt(Some(12)))]),
                std::collections::BTreeMap::from([("id", sea_orm::Value::BigInt(Some(13)))]),
            ]])
            .append_query_results([vec![std::collections::BTreeMap::from([(
                "user_id",
                sea_orm::Value::BigInt(Some(10)),
            )])]])
            // insert_many ... RETURNING id
            .append_query_results([vec![std::collections::BTreeMap::from([(
                "id",
                sea_orm::Value::BigInt(Some(501)),
            )])]])
            .append_query_results([vec![coupon(Some(3), 3)]])
            .into_connection();

        let result = CouponService::new(db)
            .issue(
                1,
                IssueCouponRequest {
                    user_ids: vec![10, 11, 11, 12, 13],
                },
            )
            .await
            .unwrap();
        assert_eq!(result.duplicate_user_ids, vec![10]);
        assert_eq!(result.issued_user_ids, vec![11, 12]);
        assert_eq!(result.sold_out_user_ids, vec![13]);
        assert_eq!(result.issued_count, 3);
    }

    #[tokio::test]
    async fn test_issue_rejects_inactive_coupon() {
        let mut inactive = coupon(None, 0);
        inactive.is_active = false;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inactive]])
            .into_connection();
        let err = CouponService::new(db)
            .issue(1, IssueCouponRequest { user_ids: vec![1] })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_preview_discount_caps_percent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![coupon(None, 0)]])
            .into_connection();
        let preview = CouponService::new(db)
            .preview_discount(1, 50_000)
            .await
            .unwrap();
        assert_eq!(preview.discount_amount, 5_000);
        assert_eq!(preview.payable_amount, 45_000);
    }
}
