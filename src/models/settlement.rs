use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::settlement_items::SettlementItemKind;
use crate::entities::settlement_periods::{PeriodType, SettlementPeriodStatus};
use crate::entities::settlements::SettlementStatus;
use crate::entities::{settlement_entity, settlement_item_entity, settlement_period_entity};

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SettlementQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub period_id: Option<i64>,
    pub seller_id: Option<i64>,
    pub status: Option<SettlementStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettlementResponse {
    pub id: i64,
    pub seller_id: i64,
    pub period_id: i64,
    pub total_order_amount: i64,
    pub total_commission: i64,
    pub total_delivery_fee: i64,
    pub total_refund_amount: i64,
    pub total_cancel_amount: i64,
    pub adjustment_amount: i64,
    pub adjustment_reason: Option<String>,
    pub final_settlement_amount: i64,
    pub status: SettlementStatus,
    pub settled_at: Option<DateTime<Utc>>,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<settlement_entity::Model> for SettlementResponse {
    fn from(m: settlement_entity::Model) -> Self {
        Self {
            id: m.id,
            seller_id: m.seller_id,
            period_id: m.period_id,
            total_order_amount: m.total_order_amount,
            total_commission: m.total_commission,
            total_delivery_fee: m.total_delivery_fee,
            total_refund_amount: m.total_refund_amount,
            total_cancel_amount: m.total_cancel_amount,
            adjustment_amount: m.adjustment_amount,
            adjustment_reason: m.adjustment_reason,
            final_settlement_amount: m.final_settlement_amount,
            status: m.status,
            settled_at: m.settled_at,
            memo: m.memo,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettlementItemResponse {
    pub id: i64,
    pub order_id: i64,
    pub order_item_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub kind: SettlementItemKind,
    pub item_amount: i64,
    pub commission_amount: i64,
    pub delivery_fee: i64,
    pub settlement_amount: i64,
}

impl From<settlement_item_entity::Model> for SettlementItemResponse {
    fn from(m: settlement_item_entity::Model) -> Self {
        Self {
            id: m.id,
            order_id: m.order_id,
            order_item_id: m.order_item_id,
            product_name: m.product_name,
            quantity: m.quantity,
            kind: m.kind,
            item_amount: m.item_amount,
            commission_amount: m.commission_amount,
            delivery_fee: m.delivery_fee,
            settlement_amount: m.settlement_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SettlementDetailResponse {
    #[serde(flatten)]
    pub settlement: SettlementResponse,
    pub items: Vec<SettlementItemResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettlementStatusRequest {
    pub status: SettlementStatus,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdjustSettlementRequest {
    /// 음수면 차감
    pub amount: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PeriodQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub period_type: Option<PeriodType>,
    pub status: Option<SettlementPeriodStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePeriodRequest {
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub settlement_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePeriodStatusRequest {
    pub status: SettlementPeriodStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeriodResponse {
    pub id: i64,
    pub period_type: PeriodType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub settlement_date: NaiveDate,
    pub status: SettlementPeriodStatus,
    pub created_at: DateTime<Utc>,
}

impl From<settlement_period_entity::Model> for PeriodResponse {
    fn from(m: settlement_period_entity::Model) -> Self {
        Self {
            id: m.id,
            period_type: m.period_type,
            start_date: m.start_date,
            end_date: m.end_date,
            settlement_date: m.settlement_date,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CalculatePeriodResponse {
    pub period: PeriodResponse,
    pub settlements: Vec<SettlementResponse>,
    /// 수정 불가 상태라 건너뛴 판매자
    pub skipped_seller_ids: Vec<i64>,
}
