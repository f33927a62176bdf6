//! 기본 타입 정의.

pub mod date_range;
pub mod market;
pub mod security;

pub use date_range::*;
pub use market::*;
pub use security::*;
