use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::Inconsistency;
use crate::entities::admins::AdminRole;
use crate::entities::coupons::DiscountType;
use crate::entities::error_reports::ErrorReportStatus;
use crate::entities::inquiries::InquiryStatus;
use crate::entities::order_items::OrderItemStatus;
use crate::entities::orders::{DeliveryStatus, OrderStatus, PaymentStatus};
use crate::entities::products::ProductStatus;
use crate::entities::sellers::SellerStatus;
use crate::entities::settlement_items::SettlementItemKind;
use crate::entities::settlement_periods::{PeriodType, SettlementPeriodStatus};
use crate::entities::settlements::SettlementStatus;
use crate::entities::users::UserStatus;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::me,
        handlers::seller::list_sellers,
        handlers::seller::get_seller,
        handlers::seller::create_seller,
        handlers::seller::update_seller,
        handlers::seller::update_seller_status,
        handlers::seller::delete_seller,
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::update_user,
        handlers::user::update_user_status,
        handlers::user::delete_user,
        handlers::product::list_products,
        handlers::product::get_product,
        handlers::product::create_product,
        handlers::product::update_product,
        handlers::product::update_product_status,
        handlers::product::delete_product,
        handlers::review::list_reviews,
        handlers::review::update_review_visibility,
        handlers::review::delete_review,
        handlers::order::list_orders,
        handlers::order::list_inconsistencies,
        handlers::order::get_order,
        handlers::order::update_order_status,
        handlers::order::upsert_delivery,
        handlers::order::refund_order_item,
        handlers::settlement::list_settlements,
        handlers::settlement::get_settlement,
        handlers::settlement::update_settlement_status,
        handlers::settlement::adjust_settlement,
        handlers::settlement::recalculate_settlement,
        handlers::settlement::list_periods,
        handlers::settlement::get_period,
        handlers::settlement::create_period,
        handlers::settlement::update_period_status,
        handlers::settlement::calculate_period,
        handlers::coupon::list_coupons,
        handlers::coupon::get_coupon,
        handlers::coupon::create_coupon,
        handlers::coupon::update_coupon,
        handlers::coupon::delete_coupon,
        handlers::coupon::issue_coupon,
        handlers::coupon::list_issued_coupons,
        handlers::coupon::preview_discount,
        handlers::notice::list_notices,
        handlers::notice::get_notice,
        handlers::notice::create_notice,
        handlers::notice::update_notice,
        handlers::notice::delete_notice,
        handlers::inquiry::list_inquiries,
        handlers::inquiry::get_inquiry,
        handlers::inquiry::create_inquiry,
        handlers::inquiry::delete_inquiry,
        handlers::inquiry::answer_inquiry,
        handlers::inquiry::close_inquiry,
        handlers::faq::list_faqs,
        handlers::faq::get_faq,
        handlers::faq::create_faq,
        handlers::faq::update_faq,
        handlers::faq::delete_faq,
        handlers::guide::list_guides,
        handlers::guide::get_guide,
        handlers::guide::create_guide,
        handlers::guide::update_guide,
        handlers::guide::delete_guide,
        handlers::error_report::list_error_reports,
        handlers::error_report::get_error_report,
        handlers::error_report::create_error_report,
        handlers::error_report::update_error_report,
        handlers::error_report::delete_error_report,
        handlers::term::list_terms,
        handlers::term::get_term,
        handlers::term::create_term,
        handlers::term::update_term,
        handlers::term::delete_term,
        handlers::term::activate_term,
        handlers::banner::list_banners,
        handlers::banner::get_banner,
        handlers::banner::create_banner,
        handlers::banner::update_banner,
        handlers::banner::delete_banner,
        handlers::attachment::list_attachments,
        handlers::attachment::get_attachment,
        handlers::attachment::upload_attachment,
        handlers::attachment::delete_attachment,
    ),
    components(
        schemas(
            ApiError,
            DeletedResponse,
            HealthResponse,
            PaginationInfo,
            AdminRole,
            LoginRequest,
            RefreshRequest,
            AuthResponse,
            AdminResponse,
            SellerStatus,
            CreateSellerRequest,
            UpdateSellerRequest,
            UpdateSellerStatusRequest,
            SellerResponse,
            UserStatus,
            UpdateUserRequest,
            UpdateUserStatusRequest,
            UserResponse,
            AddressResponse,
            UserOrderStats,
            UserDetailResponse,
            ProductStatus,
            ProductOptionInput,
            ProductSkuInput,
            CreateProductRequest,
            UpdateProductRequest,
            UpdateProductStatusRequest,
            ProductResponse,
            ProductImageResponse,
            ProductOptionResponse,
            ProductSkuResponse,
            ProductDetailResponse,
            UpdateReviewVisibilityRequest,
            ReviewResponse,
            OrderStatus,
            PaymentStatus,
            DeliveryStatus,
            OrderItemStatus,
            OrderResponse,
            OrderItemResponse,
            DeliveryResponse,
            OrderDetailResponse,
            UpdateOrderStatusRequest,
            UpsertDeliveryRequest,
            Inconsistency,
            OrderInconsistencyResponse,
            SettlementStatus,
            SettlementItemKind,
            PeriodType,
            SettlementPeriodStatus,
            SettlementResponse,
            SettlementItemResponse,
            SettlementDetailResponse,
            UpdateSettlementStatusRequest,
            AdjustSettlementRequest,
            CreatePeriodRequest,
            UpdatePeriodStatusRequest,
            PeriodResponse,
            CalculatePeriodResponse,
            DiscountType,
            CreateCouponRequest,
            UpdateCouponRequest,
            CouponResponse,
            IssueCouponRequest,
            IssueCouponResponse,
            UserCouponResponse,
            DiscountPreviewResponse,
            CreateNoticeRequest,
            UpdateNoticeRequest,
            NoticeResponse,
            InquiryStatus,
            CreateInquiryRequest,
            AnswerInquiryRequest,
            InquiryResponse,
            CreateFaqRequest,
            UpdateFaqRequest,
            FaqResponse,
            CreateGuideRequest,
            UpdateGuideRequest,
            GuideResponse,
            ErrorReportStatus,
            CreateErrorReportRequest,
            UpdateErrorReportRequest,
            ErrorReportResponse,
            CreateTermRequest,
            UpdateTermRequest,
            TermResponse,
            CreateBannerRequest,
            UpdateBannerRequest,
            BannerResponse,
            AttachmentResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "관리자 인증"),
        (name = "sellers", description = "판매자 관리"),
        (name = "users", description = "회원 관리"),
        (name = "products", description = "상품 관리"),
        (name = "reviews", description = "리뷰 관리"),
        (name = "orders", description = "주문/배송 관리"),
        (name = "settlements", description = "정산 관리"),
        (name = "coupons", description = "쿠폰 관리"),
        (name = "notices", description = "공지사항"),
        (name = "inquiries", description = "1:1 문의"),
        (name = "faq", description = "FAQ"),
        (name = "guides", description = "이용 가이드"),
        (name = "error-reports", description = "오류 신고"),
        (name = "terms", description = "약관"),
        (name = "banners", description = "배너"),
        (name = "attachments", description = "첨부 파일"),
    ),
    info(
        title = "Market Admin API",
        version = "0.1.0",
        description = "마켓플레이스 관리자 백엔드 REST API"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_settlement_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/settlements/periods/{id}/calculate"));
        assert!(doc.paths.paths.contains_key("/orders/{id}/items/{item_id}/refund"));
    }
}
