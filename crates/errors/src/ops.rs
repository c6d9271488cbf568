//! Operation wiring error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum OpsError {
    #[error("operations context is missing its {component}")]
    MissingComponent { component: String },

    #[error("no draft deployment named {name}")]
    DraftNotFound { name: String },
}

impl UserFacingError for OpsError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::DraftNotFound { .. } => Some("Run `dwiz drafts list` to see the pending drafts."),
            Self::MissingComponent { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::MissingComponent { .. } => "ops.missing_component",
            Self::DraftNotFound { .. } => "ops.draft_not_found",
        })
    }
}
