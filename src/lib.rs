pub mod config;
pub mod error;
pub mod inquiry;
pub mod mailer;
pub mod observability;
pub mod routes;
pub mod template;

pub use routes::{router, AppState};
