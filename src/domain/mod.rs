//! 데이터베이스에 의존하지 않는 도메인 규칙.
//!
//! 서비스 계층은 여기 정의된 규칙으로 판단하고 결과만 저장한다.

pub mod coupon;
pub mod order_lifecycle;
pub mod settlement;
pub mod settlement_status;

pub use coupon::*;
pub use order_lifecycle::*;
pub use settlement::*;
pub use settlement_status::*;
