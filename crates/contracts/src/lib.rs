//! Shared DTOs between the admin frontend and the REST backend.
//!
//! Everything here is plain serde data: the API envelope, the uniform error
//! body, Laravel-style paginated responses, auth/user models and the CMS
//! domain aggregates.

pub mod api;
pub mod domain;
pub mod system;
