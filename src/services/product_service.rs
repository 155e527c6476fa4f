use crate::entities::products::ProductStatus;
use crate::entities::sellers::SellerStatus;
use crate::entities::{
    product_entity as products, product_image_entity as images, product_option_entity as options,
    product_sku_entity as skus, seller_entity as sellers,
};
use crate::database::SharedPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::require_text;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

#[derive(Clone)]
pub struct ProductService {
    pool: SharedPool,
}

/// 가격/재고 규칙
fn validate_pricing(price: i64, sale_price: Option<i64>, stock: i32) -> AppResult<()> {
    if price < 0 {
        return Err(AppError::ValidationError("price must not be negative".to_string()));
    }
    if let Some(sale) = sale_price
        && !(0..=price).contains(&sale)
    {
        return Err(AppError::ValidationError(
            "sale_price must be between 0 and price".to_string(),
        ));
    }
    if stock < 0 {
        return Err(AppError::ValidationError("stock must not be negative".to_string()));
    }
    Ok(())
}

impl ProductService {
    pub fn new(pool: impl Into<SharedPool>) -> Self {
        Self { pool: pool.into() }
    }

    pub async fn list(&self, query: &ProductQuery) -> AppResult<PaginatedResponse<ProductResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);

        let mut select = products::Entity::find();
        if let Some(seller_id) = query.seller_id {
            select = select.filter(products::Column::SellerId.eq(seller_id));
        }
        if let Some(status) = query.status {
            select = select.filter(products::Column::Status.eq(status));
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            select = select.filter(products::Column::Category.eq(category));
        }
        if let Some(keyword) = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(products::Column::Name.contains(keyword))
                    .add(products::Column::Description.contains(keyword)),
            );
        }

        let total = select.clone().count(self.pool.as_ref()).await? as i64;
        let items = select
            .order_by_desc(products::Column::CreatedAt)
            .order_by_desc(products::Column::Id)
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

    async fn find(&self, id: i64) -> AppResult<products::Model> {
        products::Entity::find_by_id(id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
    }

    pub async fn get(&self, id: i64) -> AppResult<ProductDetailResponse> {
        let product = self.find(id).await?;

        let image_list = images::Entity::find()
            .filter(images::Column::ProductId.eq(id))
            .order_by_asc(images::Column::SortOrder)
            .all(self.pool.as_ref())
            .await?;
        let option_list = options::Entity::find()
            .filter(options::Column::ProductId.eq(id))
            .order_by_asc(options::Column::SortOrder)
            .all(self.pool.as_ref())
            .await?;
        let sku_list = skus::Entity::find()
            .filter(skus::Column::ProductId.eq(id))
            .order_by_asc(skus::Column::Id)
            .all(self.pool.as_ref())
            .await?;

        Ok(ProductDetailResponse {
            product: product.into(),
            images: image_list.into_iter().map(Into::into).collect(),
            options: option_list.into_iter().map(Into::into).collect(),
            skus: sku_list.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(&self, request: CreateProductRequest) -> AppResult<ProductDetailResponse> {
        let name = require_text("name", &request.name, 200)?;
        let category = require_text("category", &request.category, 50)?;
        validate_pricing(request.price, request.sale_price, request.stock)?;
        for option in &request.options {
            require_text("option name", &option.name, 50)?;
            if option.values.is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Option {} has no values",
                    option.name
                )));
            }
        }
        for sku in &request.skus {
            require_text("sku_code", &sku.sku_code, 64)?;
            if sku.stock < 0 {
                return Err(AppError::ValidationError("sku stock must not be negative".to_string()));
            }
        }

        let seller = sellers::Entity::find_by_id(request.seller_id)
            .one(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Seller {} not found", request.seller_id)))?;
        if seller.status != SellerStatus::Active {
            return Err(AppError::InvalidState(format!(
                "Seller {} is not active",
                seller.id
            )));
        }

        let now = Utc::now();
        let txn = self.pool.begin().await?;

        let product = products::ActiveModel {
            seller_id: Set(seller.id),
            name: Set(name),
            description: Set(request.description),
            category: Set(category),
            price: Set(request.price),
            sale_price: Set(request.sale_price),
            stock: Set(request.stock),
            status: Set(request.status.unwrap_or(ProductStatus::Draft)),
            thumbnail_url: Set(request.thumbnail_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut image_list = Vec::with_capacity(request.image_urls.len());
        for (i, url) in request.image_urls.into_iter().enumerate() {
            let image = images::ActiveModel {
                product_id: Set(product.id),
                url: Set(url),
                sort_order: Set(i as i32),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            image_list.push(image);
        }

        let mut option_list = Vec::with_capacity(request.options.len());
        for (i, option) in request.options.into_iter().enumerate() {
            let model = options::ActiveModel {
                product_id: Set(product.id),
                name: Set(option.name.trim().to_string()),
                values: Set(serde_json::to_value(&option.values)?),
                sort_order: Set(i as i32),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            option_list.push(model);
        }

        let mut sku_list = Vec::with_capacity(request.skus.len());
        for sku in request.skus {
            let model = skus::ActiveModel {
                product_id: Set(product.id),
                sku_code: Set(sku.sku_code.trim().to_string()),
                option_values: Set(sku.option_values),
                extra_price: Set(sku.extra_price),
                stock: Set(sku.stock),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            sku_list.push(model);
        }

        txn.commit().await?;
        log::info!("Product {} created for seller {}", product.id, product.seller_id);

        Ok(ProductDetailResponse {
            product: product.into(),
            images: image_list.into_iter().map(Into::into).collect(),
            options: option_list.into_iter().map(Into::into).collect(),
            skus: sku_list.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn update(&self, id: i64, request: UpdateProductRequest) -> AppResult<ProductResponse> {
        let product = self.find(id).await?;

        let price = request.price.unwrap_or(product.price);
        let sale_price = request.sale_price.unwrap_or(product.sale_price);
        let stock = request.stock.unwrap_or(product.stock);
        validate_pricing(price, sale_price, stock)?;

        let mut am = product.into_active_model();
        if let Some(name) = &request.name {
            am.name = Set(require_text("name", name, 200)?);
        }
        if let Some(description) = request.description {
            am.description = Set(description);
        }
        if let Some(category) = &request.category {
            am.category = Set(require_text("category", category, 50)?);
        }
        if let Some(url) = request.thumbnail_url {
            am.thumbnail_url = Set(Some(url));
        }
        am.price = Set(price);
        am.sale_price = Set(sale_price);
        am.stock = Set(stock);
        am.updated_at = Set(Utc::now());

        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn update_status(&self, id: i64, status: ProductStatus) -> AppResult<ProductResponse> {
        let product = self.find(id).await?;
        if status == ProductStatus::OnSale && product.stock == 0 {
            return Err(AppError::InvalidState(
                "Products without stock cannot go on sale".to_string(),
            ));
        }
        let mut am = product.into_active_model();
        am.status = Set(status);
        am.updated_at = Set(Utc::now());
        Ok(am.update(self.pool.as_ref()).await?.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.find(id).await?;
        let txn = self.pool.begin().await?;
        images::Entity::delete_many()
            .filter(images::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        options::Entity::delete_many()
            .filter(options::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        skus::Entity::delete_many()
            .filter(skus::Column::ProductId.eq(id))
            .exec(&txn)
            .await?;
        products::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn product(id: i64, price: i64, sale_price: Option<i64>) -> products::Model {
        let now = Utc::now();
        products::Model {
            id,
            seller_id: 1,
            name: "무선 키보드".to_string(),
            description: String::new(),
            category: "digital".to_string(),
            price,
            sale_price,
            stock: 10,
            status: ProductStatus::OnSale,
            thumbnail_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn seller(status: SellerStatus) -> sellers::Model {
        let now = Utc::now();
        sellers::Model {
            id: 1,
            business_name: "한빛상회".to_string(),
            representative_name: "김대표".to_string(),
            business_number: "123-45-67890".to_string(),
            email: "shop@example.com".to_string(),
            phone: "02-000-0000".to_string(),
            status,
            commission_rate_bp: None,
            bank_name: None,
            bank_account: None,
            account_holder: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn create_request(sale_price: Option<i64>) -> CreateProductRequest {
        CreateProductRequest {
            seller_id: 1,
            name: "무선 키보드".to_string(),
            description: String::new(),
            category: "digital".to_string(),
            price: 50_000,
            sale_price,
            stock: 10,
            status: None,
            thumbnail_url: None,
            image_urls: vec![],
            options: vec![],
            skus: vec![],
        }
    }

    #[test]
    fn test_validate_pricing() {
        assert!(validate_pricing(10_000, Some(10_000), 0).is_ok());
        assert!(validate_pricing(10_000, Some(10_001), 0).is_err());
        assert!(validate_pricing(10_000, None, -1).is_err());
    }

    #[tokio::test]
    async fn test_create_rejects_sale_price_above_price() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = ProductService::new(db)
            .create(create_request(Some(60_000)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_create_requires_active_seller() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![seller(SellerStatus::Suspended)]])
            .into_connection();
        let err = ProductService::new(db)
            .create(create_request(None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_update_checks_sale_price_against_stored_price() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![product(1, 30_000, None)]])
            .into_connection();
        let err = ProductService::new(db)
            .update(
                1,
                UpdateProductRequest {
                    sale_price: Some(Some(35_000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
