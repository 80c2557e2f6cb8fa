pub mod pagination_controls;
pub mod search_input;
pub mod sort_header;

pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use sort_header::SortHeader;
