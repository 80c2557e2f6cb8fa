pub mod details;
pub mod list;

pub use details::NewsDetails;
pub use list::NewsList;
