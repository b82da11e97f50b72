//! User records and their storage.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → model.rs (typed User, validate())
//!     → store.rs (UserRepository: list / find / insert / replace / remove)
//!     → snapshot returned to the handler
//! ```
//!
//! # Design Decisions
//! - The store is owned by the service instance (no process-wide global)
//! - Handlers see `Arc<dyn UserRepository>` so tests can use isolated stores
//! - Replace/remove keep non-matching elements in place

pub mod model;
pub mod store;

pub use model::{User, UserValidationError, MAX_NAME_LEN};
pub use store::{InMemoryUserStore, UserRepository};
