//! Domain error vocabulary.

use crate::types::DbId;

/// Failures the domain reports to its callers. The `Display` text is
/// client-safe; the API layer puts it in response bodies verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Lookup of `entity` by `id` found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// The caller did not establish a usable identity.
    #[error("{0}")]
    Unauthorized(String),
}
