use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::products::ProductStatus;
use crate::entities::{
    product_entity, product_image_entity, product_option_entity, product_sku_entity,
    review_entity,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub seller_id: Option<i64>,
    pub status: Option<ProductStatus>,
    pub category: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductOptionInput {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSkuInput {
    pub sku_code: String,
    #[schema(value_type = Object)]
    pub option_values: serde_json::Value,
    #[serde(default)]
    pub extra_price: i64,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub seller_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: i64,
    pub sale_price: Option<i64>,
    pub stock: i32,
    pub status: Option<ProductStatus>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub options: Vec<ProductOptionInput>,
    #[serde(default)]
    pub skus: Vec<ProductSkuInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<i64>,
    /// null 을 보내면 할인가 제거
    #[serde(default, with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub sale_price: Option<Option<i64>>,
    pub stock: Option<i32>,
    pub thumbnail_url: Option<String>,
}

/// 필드 없음(None)과 명시적 null(Some(None)) 구분
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(d).map(Some)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductStatusRequest {
    pub status: ProductStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub seller_id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: i64,
    pub sale_price: Option<i64>,
    pub stock: i32,
    pub status: ProductStatus,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<product_entity::Model> for ProductResponse {
    fn from(m: product_entity::Model) -> Self {
        Self {
            id: m.id,
            seller_id: m.seller_id,
            name: m.name,
            description: m.description,
            category: m.category,
            price: m.price,
            sale_price: m.sale_price,
            stock: m.stock,
            status: m.status,
            thumbnail_url: m.thumbnail_url,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductImageResponse {
    pub id: i64,
    pub url: String,
    pub sort_order: i32,
}

impl From<product_image_entity::Model> for ProductImageResponse {
    fn from(m: product_image_entity::Model) -> Self {
        Self {
            id: m.id,
            url: m.url,
            sort_order: m.sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductOptionResponse {
    pub id: i64,
    pub name: String,
    pub values: Vec<String>,
    pub sort_order: i32,
}

impl From<product_option_entity::Model> for ProductOptionResponse {
    fn from(m: product_option_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            values: serde_json::from_value(m.values).unwrap_or_default(),
            sort_order: m.sort_order,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSkuResponse {
    pub id: i64,
    pub sku_code: String,
    #[schema(value_type = Object)]
    pub option_values: serde_json::Value,
    pub extra_price: i64,
    pub stock: i32,
}

impl From<product_sku_entity::Model> for ProductSkuResponse {
    fn from(m: product_sku_entity::Model) -> Self {
        Self {
            id: m.id,
            sku_code: m.sku_code,
            option_values: m.option_values,
            extra_price: m.extra_price,
            stock: m.stock,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub images: Vec<ProductImageResponse>,
    pub options: Vec<ProductOptionResponse>,
    pub skus: Vec<ProductSkuResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ReviewQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub product_id: Option<i64>,
    pub is_hidden: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateReviewVisibilityRequest {
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub rating: i16,
    pub content: String,
    pub is_hidden: bool,
    pub created_at: DateTime<Utc>,
}

impl From<review_entity::Model> for ReviewResponse {
    fn from(m: review_entity::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            user_id: m.user_id,
            rating: m.rating,
            content: m.content,
            is_hidden: m.is_hidden,
            created_at: m.created_at,
        }
    }
}
