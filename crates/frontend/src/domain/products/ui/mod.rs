pub mod details;
pub mod list;

pub use details::ProductDetails;
pub use list::ProductList;
