//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct
//! matching the database row, plus the create/update DTOs the handlers
//! and test fixtures use. Status-like columns stay `String` here; the
//! engine parses them into the `depot-core` enums at its boundary.

pub mod asset;
pub mod maintenance;
pub mod notification;
pub mod user;
