//! User accounts: registration, login, listing, reset.

mod repository;
mod service;
mod types;

pub use repository::UserRepository;
pub use service::UserService;
pub use types::{User, UserEntry};
