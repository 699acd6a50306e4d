//! Request handlers.

pub mod health;
pub mod id;
pub mod list;
pub mod password;
pub mod string;
