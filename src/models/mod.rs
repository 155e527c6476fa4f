pub mod attachment;
pub mod auth;
pub mod common;
pub mod content;
pub mod coupon;
pub mod order;
pub mod pagination;
pub mod product;
pub mod seller;
pub mod settlement;
pub mod user;

pub use attachment::*;
pub use auth::*;
pub use common::*;
pub use content::*;
pub use coupon::*;
pub use order::*;
pub use pagination::*;
pub use product::*;
pub use seller::*;
pub use settlement::*;
pub use user::*;
