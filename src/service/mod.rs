//! Service layer module.
//!
//! Contains business logic for generating, importing and managing resources.

pub mod counters;
pub mod hasher;
pub mod id;
pub mod string;

pub use hasher::PasswordHasher;
pub use id::IdService;
pub use string::StringService;
