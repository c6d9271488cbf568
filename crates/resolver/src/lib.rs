#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Component-version resolution for dwiz
//!
//! Everything here is synchronous and works on in-memory state: default
//! picks, the core/proxy compatibility rule, readiness for a flow, mirror
//! diagnostics classification and size estimates. `WizardSession` ties them
//! together for one wizard run.

pub mod compat;
pub mod completeness;
pub mod diagnostics;
pub mod recommend;
pub mod session;
pub mod size;

pub use compat::{
    find_compatible_proxy, is_proxy_compatible, needs_reresolution, on_core_version_changed,
    CoreChange, ProxyOutcome,
};
pub use completeness::{is_complete, missing_components};
pub use diagnostics::{classify_mirrors, MirrorDiagnostic, MirrorPolicy, MissingReason};
pub use recommend::recommend;
pub use session::{ResolverPolicy, WizardSession};
pub use size::{format_mebibytes, total_estimated_size};
