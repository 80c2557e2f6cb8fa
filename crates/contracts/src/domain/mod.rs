pub mod news;
pub mod product;
