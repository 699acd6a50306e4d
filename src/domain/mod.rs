//! Domain models for the random worker.
//!
//! This module contains the persisted resource records, their upgrade path,
//! and the API contracts.

pub mod dto;
pub mod resource;
pub mod upgrade;

pub use dto::{
    ApiResponse, CreateIdRequest, CreateStringRequest, HealthResponse, ImportRequest, ListQuery,
    NameQuery, ReadyComponents, ReadyResponse, ResourceSummary,
};
pub use resource::{
    IdRecord, ResourceKind, SENSITIVE_ID, StringParams, StringRecord, validate_name,
};
pub use upgrade::{Upgraded, upgrade_string_record};
