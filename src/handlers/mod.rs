pub mod attachment;
pub mod auth;
pub mod banner;
pub mod coupon;
pub mod error_report;
pub mod faq;
pub mod guide;
pub mod health;
pub mod inquiry;
pub mod notice;
pub mod order;
pub mod product;
pub mod review;
pub mod seller;
pub mod settlement;
pub mod term;
pub mod user;

pub use attachment::attachment_config;
pub use auth::auth_config;
pub use banner::banner_config;
pub use coupon::coupon_config;
pub use error_report::error_report_config;
pub use faq::faq_config;
pub use guide::guide_config;
pub use health::health_config;
pub use inquiry::inquiry_config;
pub use notice::notice_config;
pub use order::order_config;
pub use product::product_config;
pub use review::review_config;
pub use seller::seller_config;
pub use settlement::settlement_config;
pub use term::term_config;
pub use user::user_config;

use actix_web::web;

/// `/api/v1` 아래에 등록되는 라우트 전체
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(auth_config)
        .configure(seller_config)
        .configure(user_config)
        .configure(product_config)
        .configure(review_config)
        .configure(order_config)
        .configure(settlement_config)
        .configure(coupon_config)
        .configure(notice_config)
        .configure(inquiry_config)
        .configure(faq_config)
        .configure(guide_config)
        .configure(error_report_config)
        .configure(term_config)
        .configure(banner_config)
        .configure(attachment_config);
}
