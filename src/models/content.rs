//! 공지, 문의, FAQ, 가이드, 오류 신고, 약관, 배너

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::error_reports::ErrorReportStatus;
use crate::entities::inquiries::InquiryStatus;
use crate::entities::{
    banner_entity, error_report_entity, faq_entity, guide_entity, inquiry_entity, notice_entity,
    term_entity,
};

// ---- 공지 ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct NoticeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub is_published: Option<bool>,
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoticeRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub is_pinned: bool,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoticeRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_pinned: Option<bool>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoticeResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_published: bool,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<notice_entity::Model> for NoticeResponse {
    fn from(m: notice_entity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            is_pinned: m.is_pinned,
            is_published: m.is_published,
            view_count: m.view_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ---- 문의 ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct InquiryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<InquiryStatus>,
    pub category: Option<String>,
    pub seller_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateInquiryRequest {
    pub user_id: Option<i64>,
    pub seller_id: Option<i64>,
    pub product_id: Option<i64>,
    pub category: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerInquiryRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    pub seller_id: Option<i64>,
    pub product_id: Option<i64>,
    pub category: String,
    pub title: String,
    pub content: String,
    pub status: InquiryStatus,
    pub answer: Option<String>,
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<inquiry_entity::Model> for InquiryResponse {
    fn from(m: inquiry_entity::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            seller_id: m.seller_id,
            product_id: m.product_id,
            category: m.category,
            title: m.title,
            content: m.content,
            status: m.status,
            answer: m.answer,
            answered_at: m.answered_at,
            created_at: m.created_at,
        }
    }
}

// ---- FAQ / 가이드 ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CategoryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category: Option<String>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFaqRequest {
    pub category: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub sort_order: i32,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFaqRequest {
    pub category: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqResponse {
    pub id: i64,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<faq_entity::Model> for FaqResponse {
    fn from(m: faq_entity::Model) -> Self {
        Self {
            id: m.id,
            category: m.category,
            question: m.question,
            answer: m.answer,
            sort_order: m.sort_order,
            is_published: m.is_published,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateGuideRequest {
    pub category: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub sort_order: i32,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateGuideRequest {
    pub category: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GuideResponse {
    pub id: i64,
    pub category: String,
    pub title: String,
    pub content: String,
    pub sort_order: i32,
    pub is_published: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<guide_entity::Model> for GuideResponse {
    fn from(m: guide_entity::Model) -> Self {
        Self {
            id: m.id,
            category: m.category,
            title: m.title,
            content: m.content,
            sort_order: m.sort_order,
            is_published: m.is_published,
            updated_at: m.updated_at,
        }
    }
}

// ---- 오류 신고 ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ErrorReportQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<ErrorReportStatus>,
    pub seller_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateErrorReportRequest {
    pub seller_id: Option<i64>,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateErrorReportRequest {
    pub status: Option<ErrorReportStatus>,
    pub reply: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorReportResponse {
    pub id: i64,
    pub seller_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub status: ErrorReportStatus,
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<error_report_entity::Model> for ErrorReportResponse {
    fn from(m: error_report_entity::Model) -> Self {
        Self {
            id: m.id,
            seller_id: m.seller_id,
            title: m.title,
            content: m.content,
            status: m.status,
            reply: m.reply,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ---- 약관 ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TermQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub term_type: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTermRequest {
    pub term_type: String,
    pub version: String,
    pub title: String,
    pub content: String,
    pub effective_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTermRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub effective_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TermResponse {
    pub id: i64,
    pub term_type: String,
    pub version: String,
    pub title: String,
    pub content: String,
    pub effective_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<term_entity::Model> for TermResponse {
    fn from(m: term_entity::Model) -> Self {
        Self {
            id: m.id,
            term_type: m.term_type,
            version: m.version,
            title: m.title,
            content: m.content,
            effective_date: m.effective_date,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}

// ---- 배너 ----

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BannerQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub position: Option<String>,
    /// true 면 현재 노출 중인 배너만
    pub active_only: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateBannerRequest {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: String,
    #[serde(default)]
    pub sort_order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateBannerRequest {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub position: Option<String>,
    pub sort_order: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BannerResponse {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: String,
    pub sort_order: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<banner_entity::Model> for BannerResponse {
    fn from(m: banner_entity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            image_url: m.image_url,
            link_url: m.link_url,
            position: m.position,
            sort_order: m.sort_order,
            starts_at: m.starts_at,
            ends_at: m.ends_at,
            is_active: m.is_active,
            created_at: m.created_at,
        }
    }
}
