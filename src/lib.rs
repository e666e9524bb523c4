pub mod config;
pub mod executor;
pub mod expression;
pub mod value;
