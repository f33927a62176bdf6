//! 도메인 모델.

pub mod listing;
pub mod price;

pub use listing::*;
pub use price::*;
