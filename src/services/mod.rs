pub mod attachment_service;
pub mod auth_service;
pub mod banner_service;
pub mod coupon_service;
pub mod error_report_service;
pub mod help_service;
pub mod inquiry_service;
pub mod notice_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;
pub mod seed_service;
pub mod seller_service;
pub mod settlement_service;
pub mod term_service;
pub mod user_service;

pub use attachment_service::*;
pub use auth_service::*;
pub use banner_service::*;
pub use coupon_service::*;
pub use error_report_service::*;
pub use help_service::*;
pub use inquiry_service::*;
pub use notice_service::*;
pub use order_service::*;
pub use product_service::*;
pub use review_service::*;
pub use seed_service::*;
pub use seller_service::*;
pub use settlement_service::*;
pub use term_service::*;
pub use user_service::*;
