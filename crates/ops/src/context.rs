//! Operations context for dependency injection

use dwiz_config::Config;
use dwiz_errors::{Error, OpsError};
use dwiz_events::{EventEmitter, EventSender};
use dwiz_net::DeployApi;
use dwiz_resolver::{MirrorPolicy, ResolverPolicy};
use std::sync::Arc;
use std::time::Duration;

/// Operations context providing access to the deployment service and settings
pub struct OpsCtx {
    /// Deployment service client
    pub api: Arc<dyn DeployApi>,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Effective configuration
    pub config: Config,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

impl OpsCtx {
    // No public constructor - use OpsContextBuilder instead

    /// Recommendation policy from the `[resolver]` section
    #[must_use]
    pub fn resolver_policy(&self) -> ResolverPolicy {
        ResolverPolicy::from(&self.config.resolver)
    }

    /// Mirror expectations from the `[mirrors]` section
    #[must_use]
    pub fn mirror_policy(&self) -> MirrorPolicy {
        MirrorPolicy::from(&self.config.mirrors)
    }

    /// Delay between attempts while the service reports busy
    #[must_use]
    pub fn busy_retry_delay(&self) -> Duration {
        self.config.busy_retry_delay()
    }
}

/// Builder for the operations context
pub struct OpsContextBuilder {
    api: Option<Arc<dyn DeployApi>>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            api: None,
            tx: None,
            config: None,
        }
    }

    /// Set the deployment service client
    #[must_use]
    pub fn with_api(mut self, api: impl DeployApi + 'static) -> Self {
        self.api = Some(Arc::new(api));
        self
    }

    /// Set a shared deployment service client
    #[must_use]
    pub fn with_shared_api(mut self, api: Arc<dyn DeployApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// A missing configuration falls back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the API client or the event sender is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let api = self.api.ok_or_else(|| OpsError::MissingComponent {
            component: "api".to_string(),
        })?;

        let tx = self.tx.ok_or_else(|| OpsError::MissingComponent {
            component: "event_sender".to_string(),
        })?;

        Ok(OpsCtx {
            api,
            tx,
            config: self.config.unwrap_or_default(),
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
