//! 관리자 콘솔이 쓰는 HTTP 클라이언트

pub mod api;
pub mod endpoints;
pub mod error;

pub use api::*;
pub use endpoints::*;
pub use error::*;
