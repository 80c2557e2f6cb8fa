pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod unauthorized;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use unauthorized::UnauthorizedPage;
