pub mod addresses;
pub mod admins;
pub mod attachments;
pub mod banners;
pub mod coupons;
pub mod deliveries;
pub mod error_reports;
pub mod faqs;
pub mod guides;
pub mod inquiries;
pub mod notices;
pub mod order_items;
pub mod orders;
pub mod product_images;
pub mod product_options;
pub mod product_skus;
pub mod products;
pub mod reviews;
pub mod sellers;
pub mod settlement_items;
pub mod settlement_periods;
pub mod settlements;
pub mod terms;
pub mod user_coupons;
pub mod users;

pub use addresses as address_entity;
pub use admins as admin_entity;
pub use attachments as attachment_entity;
pub use banners as banner_entity;
pub use coupons as coupon_entity;
pub use deliveries as delivery_entity;
pub use error_reports as error_report_entity;
pub use faqs as faq_entity;
pub use guides as guide_entity;
pub use inquiries as inquiry_entity;
pub use notices as notice_entity;
pub use order_items as order_item_entity;
pub use orders as order_entity;
pub use product_images as product_image_entity;
pub use product_options as product_option_entity;
pub use product_skus as product_sku_entity;
pub use products as product_entity;
pub use reviews as review_entity;
pub use sellers as seller_entity;
pub use settlement_items as settlement_item_entity;
pub use settlement_periods as settlement_period_entity;
pub use settlements as settlement_entity;
pub use terms as term_entity;
pub use user_coupons as user_coupon_entity;
pub use users as user_entity;
