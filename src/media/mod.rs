//! 업로드 이미지 저장과 리사이즈.
//!
//! 원본은 `uploads/…` 키로 저장되고, 업로드 이벤트를 받은 워커가
//! `processed/<size>/<파일명>` 파생 이미지를 만든다.

pub mod processor;
pub mod resize;
pub mod storage;

pub use processor::*;
pub use resize::*;
pub use storage::*;
