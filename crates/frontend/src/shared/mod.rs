pub mod api;
pub mod components;
pub mod data_table;
pub mod form_engine;
pub mod notify;
pub mod theme;
