use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Inconsistency;
use crate::entities::order_items::OrderItemStatus;
use crate::entities::orders::{DeliveryStatus, OrderStatus, PaymentStatus};
use crate::entities::{delivery_entity, order_entity, order_item_entity};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OrderQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub order_status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub delivery_status: Option<DeliveryStatus>,
    pub user_id: Option<i64>,
    pub seller_id: Option<i64>,
    /// 주문번호 부분 일치
    pub keyword: Option<String>,
    pub ordered_from: Option<DateTime<Utc>>,
    pub ordered_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub order_status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub delivery_status: DeliveryStatus,
    pub total_amount: i64,
    pub shipping_address: String,
    pub ordered_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<order_entity::Model> for OrderResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            order_number: m.order_number,
            user_id: m.user_id,
            order_status: m.order_status,
            payment_status: m.payment_status,
            delivery_status: m.delivery_status,
            total_amount: m.total_amount,
            shipping_address: m.shipping_address,
            ordered_at: m.ordered_at,
            paid_at: m.paid_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub seller_id: i64,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub amount: i64,
    pub status: OrderItemStatus,
}

impl From<order_item_entity::Model> for OrderItemResponse {
    fn from(m: order_item_entity::Model) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            seller_id: m.seller_id,
            product_name: m.product_name,
            unit_price: m.unit_price,
            quantity: m.quantity,
            amount: m.unit_price.saturating_mul(i64::from(m.quantity)),
            status: m.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryResponse {
    pub id: i64,
    pub courier: String,
    pub tracking_number: String,
    pub status: DeliveryStatus,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
}

impl From<delivery_entity::Model> for DeliveryResponse {
    fn from(m: delivery_entity::Model) -> Self {
        Self {
            id: m.id,
            courier: m.courier,
            tracking_number: m.tracking_number,
            status: m.status,
            shipped_at: m.shipped_at,
            delivered_at: m.delivered_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderItemResponse>,
    pub delivery: Option<DeliveryResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    /// shipping 전이 시 배송 정보를 함께 등록할 수 있다
    pub courier: Option<String>,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertDeliveryRequest {
    pub courier: String,
    pub tracking_number: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderInconsistencyResponse {
    pub order_id: i64,
    pub order_number: String,
    #[serde(flatten)]
    pub inconsistency: Inconsistency,
}
