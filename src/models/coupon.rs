use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::coupons::DiscountType;
use crate::entities::{coupon_entity, user_coupon_entity};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CouponQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub seller_id: Option<i64>,
    pub is_active: Option<bool>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCouponRequest {
    /// 비우면 10자리 코드를 생성
    pub code: Option<String>,
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    #[serde(default)]
    pub min_order_amount: i64,
    pub max_discount_amount: Option<i64>,
    pub seller_id: Option<i64>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub total_quantity: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCouponRequest {
    pub name: Option<String>,
    pub discount_value: Option<i64>,
    pub min_order_amount: Option<i64>,
    pub max_discount_amount: Option<i64>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub total_quantity: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponResponse {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub min_order_amount: i64,
    pub max_discount_amount: Option<i64>,
    pub seller_id: Option<i64>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub total_quantity: Option<i32>,
    pub issued_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<coupon_entity::Model> for CouponResponse {
    fn from(m: coupon_entity::Model) -> Self {
        Self {
            id: m.id,
            code: m.code,
            name: m.name,
            discount_type: m.discount_type,
            discount_value: m.discount_value,
            min_order_amount: m.min_order_amount,
            max_discount_amount: m.max_discount_amount,
            seller_id: m.seller_id,
            starts_at: m.starts_at,
            ends_at: m.ends_at,
            total_quantity: m.total_quantity,
            issued_count: m.issued_count,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueCouponRequest {
    pub user_ids: Vec<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct IssueCouponResponse {
    pub issued_user_ids: Vec<i64>,
    /// 이미 발급받은 사용자
    pub duplicate_user_ids: Vec<i64>,
    /// 수량 소진으로 발급하지 못한 사용자
    pub sold_out_user_ids: Vec<i64>,
    pub issued_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserCouponResponse {
    pub id: i64,
    pub coupon_id: i64,
    pub user_id: i64,
    pub issued_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub order_id: Option<i64>,
}

impl From<user_coupon_entity::Model> for UserCouponResponse {
    fn from(m: user_coupon_entity::Model) -> Self {
        Self {
            id: m.id,
            coupon_id: m.coupon_id,
            user_id: m.user_id,
            issued_at: m.issued_at,
            used_at: m.used_at,
            order_id: m.order_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiscountPreviewQuery {
    pub order_amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiscountPreviewResponse {
    pub coupon_id: i64,
    pub order_amount: i64,
    pub discount_amount: i64,
    pub payable_amount: i64,
}
