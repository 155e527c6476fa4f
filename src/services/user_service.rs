use crate::entities::orders::PaymentStatus;
use crate::entities::users::UserStatus;
use crate::entities::{address_entity as addresses, order_entity as orders, user_entity as users};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: SharedPool,
}

#[derive(Debug, FromQueryResult)]
struct PaidTotalRow {
    paid_total: i64,
}

impl UserService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<PaginatedResponse<UserResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = users::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(users::Column::Status.eq(status));
        }
        if let Some(keyword) = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(users::Column::Name.contains(keyword))
                    .add(users::Column::Email.contains(keyword)),
            );
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<users::Model> {
        users::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
    }

    /// 배송지와 주문 통계 포함
    pub async fn get(&self, id: i64) -> AppResult<UserDetailResponse> {
        let user = self.find(id).await?;

        let address_list = addresses::Entity::find()
            .filter(addresses::Column::UserId.eq(id))
            .order_by_desc(addresses::Column::IsDefault)
            .order_by_asc(addresses::Column::Id)
            .all(self.pool.as_ref())
            .await?;

        let order_count = orders::Entity::find()
            .filter(orders::Column::UserId.eq(id))
            .count(self.pool.as_ref())
            .await? as i64;

        let paid_total = orders::Entity::find()
            .select_only()
            .column_as(
                Expr::cust("COALESCE(SUM(total_amount), 0)::BIGINT"),
                "paid_total",
            )
            .filter(orders::Column::UserId.eq(id))
            .filter(
                orders::Column::PaymentStatus
                    .is_in([PaymentStatus::Paid, PaymentStatus::PartiallyRefunded]),
            )
            .into_model::<PaidTotalRow>()
            .one(self.pool.as_ref())
            .await?
            .map(|r| r.paid_total)
            .unwrap_or(0);

        Ok(UserDetailResponse {
            user: user.into(),
            addresses: address_list.into_iter().map(Into::into).collect(),
            order_stats: UserOrderStats {
                order_count,
                paid_total,
            },
        })
    }

    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> AppResult<UserResponse> {
        let user = self.find(id).await?;
        if user.status == UserStatus::Withdrawn {
            return Err(AppError::InvalidState(
                "Withdrawn users cannot be edited".to_string(),
            ));
        }

        let mut am = user.into_active_model();
        if let Some(name) = &request.name {
            am.name = Set(require_text("name", name, 50)?);
        }
        if let Some(phone) = request.phone {
            am.phone = Set(Some(phone.trim().to_string()));
        }
        if let Some(agreed) = request.marketing_agreed {
            am.marketing_agreed = Set(agreed);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn update_status(&self, id: i64, status: UserStatus) -> AppResult<UserResponse> {
        let user = self.find(id).await?;
        if user.status == UserStatus::Withdrawn && status != UserStatus::Withdrawn {
            return Err(AppError::InvalidState(
                "Withdrawn users cannot be reactivated".to_string(),
            ));
        }
        let mut am = user.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    /// 실제 삭제 대신 탈퇴 처리
    pub async fn delete(&self, id: i64) -> AppResult<UserResponse> {
        let user = self.find(id).await?;
        if user.status == UserStatus::Withdrawn {
            return Ok(user.into());
        }
        let mut am = user.into_active_model();
        am.status = Set(UserStatus::Withdrawn);
        am.marketing_agreed = Set(false);
        am.updated_at = Set(Utc::now());
        let user = am.update(self.pool.as_ref()).await?;
        log::info!("User {id} withdrawn");
        Ok(user.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn user(status: UserStatus) -> users::Model {
        let now = Utc::now();
        users::Model {
            id: 11,
            email: "buyer@example.com".to_string(),
            name: "이구매".to_string(),
            phone: None,
            status,
            marketing_agreed: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_includes_addresses_and_stats() {
        let now = Utc::now();
        let address = addresses::Model {
            id: 1,
            user_id: 11,
            recipient: "이구매".to_string(),
            phone: "010-0000-0000".to_string(),
            zip_code: "04524".to_string(),
            address1: "서울 중구 세종대로 110".to_string(),
            address2: None,
            is_default: true,
            created_at: now,
            updated_at: now,
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(UserStatus::Active)]])
            .append_query_results([vec![address]])
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(4)),
            )])]])
            .append_query_results([vec![BTreeMap::from([(
                "paid_total",
                Value::BigInt(Some(125_000)),
            )])]])
            .into_connection();

        let detail = UserService::new(db).get(11).await.unwrap();
        assert_eq!(detail.addresses.len(), 1);
        assert_eq!(detail.order_stats.order_count, 4);
        assert_eq!(detail.order_stats.paid_total, 125_000);
    }

    #[tokio::test]
    async fn test_delete_marks_withdrawn() {
        let mut withdrawn = user(UserStatus::Withdrawn);
        withdrawn.marketing_agreed = false;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(UserStatus::Active)]])
            .append_query_results([vec![withdrawn]])
            .into_connection();

        let resp = UserService::new(db).delete(11).await.unwrap();
        assert_eq!(resp.status, UserStatus::Withdrawn);
        assert!(!resp.marketing_agreed);
    }

    #[tokio::test]
    async fn test_withdrawn_user_cannot_be_reactivated() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![user(UserStatus::Withdrawn)]])
            .into_connection();
        let err = UserService::new(db)
            .update_status(11, UserStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }
}
