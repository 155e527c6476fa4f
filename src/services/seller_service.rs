use crate::entities::sellers::SellerStatus;
use crate::entities::{product_entity as products, seller_entity as sellers};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::{require_text, validate_business_number, validate_email};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct SellerService {
    pool: SharedPool,
}

fn validate_commission(bp: Option<i32>) -> AppResult<()> {
    if let Some(bp) = bp
        && !(0..=10_000).contains(&bp)
    {
        return Err(AppError::ValidationError(
            "commission_rate_bp must be between 0 and 10000".to_string(),
        ));
    }
    Ok(())
}

impl SellerService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &SellerQuery) -> AppResult<PaginatedResponse<SellerResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = sellers::Entity::find();
        if let Some(status) = query.status {
            select = select.filter(sellers::Column::Status.eq(status));
        }
        if let Some(keyword) = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(sellers::Column::BusinessName.contains(keyword))
                    .add(sellers::Column::Email.contains(keyword)),
            );
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(sellers::Column::CreatedAt)
            .order_by_desc(sellers::Column::Id)
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

    pub async fn find(&self, id: i64) -> AppResult<sellers::Model> {
        sellers::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Seller {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<SellerResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(&self, request: CreateSellerRequest) -> AppResult<SellerResponse> {
        let business_name = require_text("business_name", &request.business_name, 100)?;
        let representative_name =
            require_text("representative_name", &request.representative_name, 50)?;
        let business_number = request.business_number.trim().to_string();
        validate_business_number(&business_number)?;
        let email = request.email.trim().to_lowercase();
        validate_email(&email)?;
        validate_commission(request.commission_rate_bp)?;

        let dup = sellers::Entity::find()
            .filter(sellers::Column::BusinessNumber.eq(business_number.as_str()))
            .one(self.pool.as_ref())
            .await?;
        if dup.is_some() {
            return Err(AppError::Conflict(format!(
                "Business number {business_number} is already registered"
            )));
        }

        let now = Utc::now();
        let seller = sellers::ActiveModel {
            business_name: Set(business_name),
            representative_name: Set(representative_name),
            business_number: Set(business_number),
            email: Set(email),
            phone: Set(request.phone.trim().to_string()),
            status: Set(SellerStatus::Pending),
            commission_rate_bp: Set(request.commission_rate_bp),
            bank_name: Set(request.bank_name),
            bank_account: Set(request.bank_account),
            account_holder: Set(request.account_holder),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.pool.as_ref())
        .await?;

        log::info!("Seller {} created", seller.id);
        Ok(seller.into())
    }

    pub async fn update(&self, id: i64, request: UpdateSellerRequest) -> AppResult<SellerResponse> {
        validate_commission(request.commission_rate_bp)?;
        let mut am = self.find(id).await?.into_active_model();

        if let Some(v) = &request.business_name {
            am.business_name = Set(require_text("business_name", v, 100)?);
        }
        if let Some(v) = &request.representative_name {
            am.representative_name = Set(require_text("representative_name", v, 50)?);
        }
        if let Some(v) = &request.email {
            let email = v.trim().to_lowercase();
            validate_email(&email)?;
            am.email = Set(email);
        }
        if let Some(v) = request.phone {
            am.phone = Set(v.trim().to_string());
        }
        if let Some(bp) = request.commission_rate_bp {
            am.commission_rate_bp = Set(Some(bp));
        }
        if let Some(v) = request.bank_name {
            am.bank_name = Set(Some(v));
        }
        if let Some(v) = request.bank_account {
            am.bank_account = Set(Some(v));
        }
        if let Some(v) = request.account_holder {
            am.account_holder = Set(Some(v));
        }
        am.updated_at = Set(Utc::now());

        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn update_status(&self, id: i64, status: SellerStatus) -> AppResult<SellerResponse> {
        let mut am = self.find(id).await?.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    /// 상품이 남아 있으면 삭제할 수 없다
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find(id).await?;
        let product_count = products::Entity::find()
            .filter(products::Column::SellerId.eq(id))
            .count(self.pool.as_ref())
            .await?;
        if product_count > 0 {
            return Err(AppError::Conflict(format!(
                "Seller {id} still has {product_count} products"
            )));
        }
        sellers::Entity::delete_by_id(id).exec(self.pool.as_ref()).await?;
        log::info!("Seller {id} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};
    use std::collections::BTreeMap;

    fn seller(id: i64) -> sellers::Model {
        let now = Utc::now();
        sellers::Model {
            id,
            business_name: "한빛상회".to_string(),
            representative_name: "김대표".to_string(),
            business_number: "123-45-67890".to_string(),
            email: "shop@example.com".to_string(),
            phone: "02-000-0000".to_string(),
            status: SellerStatus::Active,
            commission_rate_bp: None,
            bank_name: None,
            bank_account: None,
            account_holder: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
    }

    fn request(business_number: &str) -> CreateSellerRequest {
        CreateSellerRequest {
            business_name: "한빛상회".to_string(),
            representative_name: "김대표".to_string(),
            business_number: business_number.to_string(),
            email: "Shop@Example.com".to_string(),
            phone: "02-000-0000".to_string(),
            commission_rate_bp: Some(700),
            bank_name: None,
            bank_account: None,
            account_holder: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_business_number() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = SellerService::new(db)
            .create(request("1234567890"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_business_number() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![seller(1)]])
            .into_connection();
        let err = SellerService::new(db)
            .create(request("123-45-67890"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_starts_pending() {
        let mut created = seller(5);
        created.status = SellerStatus::Pending;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<sellers::Model>::new()])
            .append_query_results([vec![created]])
            .into_connection();
        let resp = SellerService::new(db)
            .create(request("123-45-67890"))
            .await
            .unwrap();
        assert_eq!(resp.id, 5);
        assert_eq!(resp.status, SellerStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_refused_while_products_exist() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![seller(3)]])
            .append_query_results([vec![count_row(2)]])
            .into_connection();
        let err = SellerService::new(db).delete(3).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_without_products() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![seller(3)]])
            .append_query_results([vec![count_row(0)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        assert!(SellerService::new(db).delete(3).await.is_ok());
    }
}
