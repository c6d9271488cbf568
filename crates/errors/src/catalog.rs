//! Catalog normalization error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown component: {name}")]
    UnknownComponent { name: String },

    #[error("unknown edition: {value}")]
    InvalidEdition { value: String },

    #[error("unknown artifact origin: {value}")]
    InvalidOrigin { value: String },

    #[error("invalid stable line {value}: expected three dot-separated segments")]
    InvalidStableLine { value: String },
}

impl UserFacingError for CatalogError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownComponent { .. } => {
                Some("Use one of: core, proxy, manager, agent, console.")
            }
            Self::InvalidStableLine { .. } => Some("Write the stable line as MAJOR.MINOR.PATCH."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::UnknownComponent { .. } => "catalog.unknown_component",
            Self::InvalidEdition { .. } => "catalog.invalid_edition",
            Self::InvalidOrigin { .. } => "catalog.invalid_origin",
            Self::InvalidStableLine { .. } => "catalog.invalid_stable_line",
        })
    }
}
