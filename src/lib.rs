//! In-memory users CRUD service library.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod users;

pub use client::UsersClient;
pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use users::{InMemoryUserStore, User, UserRepository};
