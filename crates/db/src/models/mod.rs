//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and upserts

pub mod alert_event;
pub mod profile;
pub mod push_subscription;
pub mod rule;
