//! Generic resource form.
//!
//! [`record`] holds the pure dirty-state model over JSON records; [`engine`]
//! is the reactive shell handling fetch, submit, staged files, and
//! validation errors.

pub mod engine;
pub mod record;

pub use engine::{FormConfig, ResourceForm};
pub use record::FormRecord;
