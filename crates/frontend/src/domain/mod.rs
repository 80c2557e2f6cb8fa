pub mod news;
pub mod products;
