//! Version selection error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum SelectionError {
    #[error("invalid artifact key: {key}")]
    InvalidKey { key: String },

    #[error("component {component} is not in the catalog")]
    ComponentNotInCatalog { component: String },

    #[error("no artifact {key} for component {component}")]
    UnknownArtifact { component: String, key: String },
}

impl UserFacingError for SelectionError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidKey { .. } => {
                Some("Artifact keys have the form VERSION-RELEASE-CHECKSUM.")
            }
            Self::ComponentNotInCatalog { .. } | Self::UnknownArtifact { .. } => {
                Some("Run `dwiz versions` to list the installable artifacts.")
            }
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidKey { .. } => "selection.invalid_key",
            Self::ComponentNotInCatalog { .. } => "selection.component_not_in_catalog",
            Self::UnknownArtifact { .. } => "selection.unknown_artifact",
        })
    }
}
