pub mod catalog;
pub mod expression;
