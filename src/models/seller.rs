use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::seller_entity;
use crate::entities::sellers::SellerStatus;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SellerQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<SellerStatus>,
    /// 상호명 또는 이메일 부분 일치
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateSellerRequest {
    pub business_name: String,
    pub representative_name: String,
    /// 000-00-00000
    pub business_number: String,
    pub email: String,
    pub phone: String,
    pub commission_rate_bp: Option<i32>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub account_holder: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateSellerRequest {
    pub business_name: Option<String>,
    pub representative_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub commission_rate_bp: Option<i32>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub account_holder: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSellerStatusRequest {
    pub status: SellerStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerResponse {
    pub id: i64,
    pub business_name: String,
    pub representative_name: String,
    pub business_number: String,
    pub email: String,
    pub phone: String,
    pub status: SellerStatus,
    pub commission_rate_bp: Option<i32>,
    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub account_holder: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<seller_entity::Model> for SellerResponse {
    fn from(m: seller_entity::Model) -> Self {
        Self {
            id: m.id,
            business_name: m.business_name,
            representative_name: m.representative_name,
            business_number: m.business_number,
            email: m.email,
            phone: m.phone,
            status: m.status,
            commission_rate_bp: m.commission_rate_bp,
            bank_name: m.bank_name,
            bank_account: m.bank_account,
            account_holder: m.account_holder,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
