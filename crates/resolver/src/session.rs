//! The wizard's version-selection state

use crate::compat::{on_core_version_changed, CoreChange, ProxyOutcome};
use crate::completeness::{is_complete, missing_components};
use crate::diagnostics::MirrorDiagnostic;
use crate::recommend::recommend;
use crate::size::total_estimated_size;
use dwiz_config::ResolverConfig;
use dwiz_errors::{Error, SelectionError};
use dwiz_events::{AppEvent, EventEmitter, EventSender, ResolverEvent};
use dwiz_types::{
    ArtifactKey, Component, ComponentCatalog, Flow, ReleaseArtifact, Selection, StableLine,
};

/// Recommendation knobs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPolicy {
    pub preferred_core_line: Option<StableLine>,
    pub low_version_major: u32,
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self::from(&ResolverConfig::default())
    }
}

impl From<&ResolverConfig> for ResolverPolicy {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            preferred_core_line: config.preferred_core_line.clone(),
            low_version_major: config.low_version_major,
        }
    }
}

/// Catalog, selection and diagnostics of one wizard run
///
/// Owned by the caller and mutated only through its methods. A refetched
/// catalog means a new session.
#[derive(Debug, Clone)]
pub struct WizardSession {
    catalog: ComponentCatalog,
    selection: Selection,
    flow: Flow,
    policy: ResolverPolicy,
    active: Vec<Component>,
    diagnostics: Vec<MirrorDiagnostic>,
    event_sender: Option<EventSender>,
}

impl EventEmitter for WizardSession {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl WizardSession {
    /// Create a session and seed the default selection
    #[must_use]
    pub fn new(catalog: ComponentCatalog, flow: Flow, policy: ResolverPolicy) -> Self {
        Self::with_events(catalog, flow, policy, None)
    }

    /// Create a session that reports its decisions on `event_sender`
    #[must_use]
    pub fn with_events(
        catalog: ComponentCatalog,
        flow: Flow,
        policy: ResolverPolicy,
        event_sender: Option<EventSender>,
    ) -> Self {
        let mut session = Self {
            catalog,
            selection: Selection::new(),
            flow,
            policy,
            active: default_active_components(flow),
            diagnostics: Vec::new(),
            event_sender,
        };
        session.seed();
        session
    }

    fn seed(&mut self) {
        let line = self.policy.preferred_core_line.as_ref();
        for component in Component::ALL {
            if let Some(artifact) = recommend(component, &self.catalog, line) {
                self.emit_recommended(component, &artifact.version, artifact.release.as_deref());
                self.selection.set(component, artifact.clone());
            }
        }

        // Cross-check the recommended proxy against the recommended core
        if let Some(core) = self.selection.clear(Component::Core) {
            let change = on_core_version_changed(&core, &self.catalog, &self.selection);
            self.apply(&core, change);
        }
    }

    fn apply(&mut self, core: &ReleaseArtifact, change: CoreChange) -> ProxyOutcome {
        self.selection = change.selection;
        match &change.outcome {
            ProxyOutcome::Resolved { proxy } => {
                self.emit(AppEvent::Resolver(ResolverEvent::ProxyResolved {
                    core_version: core.version.clone(),
                    proxy_version: proxy.version.clone(),
                    edition: core.edition,
                }));
            }
            ProxyOutcome::NoCompatibleCandidate => {
                self.emit(AppEvent::Resolver(ResolverEvent::NoCompatibleProxy {
                    core_version: core.version.clone(),
                    edition: core.edition,
                    kept: self
                        .selection
                        .get(Component::Proxy)
                        .map(ReleaseArtifact::display_version),
                }));
            }
            ProxyOutcome::Unchanged => {}
        }
        change.outcome
    }

    /// Catalog this session was seeded from
    #[must_use]
    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    /// Current selection
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Select the artifact named by `key` for `component`
    ///
    /// Core changes re-derive the proxy. On error the selection is untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the component has no catalog entry or the key
    /// names no artifact of it.
    pub fn select_version(
        &mut self,
        component: Component,
        key: &ArtifactKey,
    ) -> Result<ProxyOutcome, Error> {
        let artifacts = self
            .catalog
            .artifacts(component)
            .ok_or(SelectionError::ComponentNotInCatalog {
                component: component.to_string(),
            })?;
        let artifact = artifacts
            .iter()
            .find(|artifact| artifact.matches_key(key))
            .cloned()
            .ok_or_else(|| SelectionError::UnknownArtifact {
                component: component.to_string(),
                key: key.to_string(),
            })?;

        self.emit(AppEvent::Resolver(ResolverEvent::SelectionChanged {
            component,
            version: artifact.display_version(),
        }));

        if component == Component::Core {
            let change = on_core_version_changed(&artifact, &self.catalog, &self.selection);
            return Ok(self.apply(&artifact, change));
        }

        self.selection.set(component, artifact);
        Ok(ProxyOutcome::Unchanged)
    }

    /// Required components that block proceeding
    #[must_use]
    pub fn missing_components(&self) -> Vec<Component> {
        missing_components(&self.selection, &self.catalog, self.flow.required_components())
    }

    /// Whether every component the flow requires is selected and installable
    #[must_use]
    pub fn is_ready_to_proceed(&self) -> bool {
        is_complete(&self.selection, &self.catalog, self.flow.required_components())
    }

    /// Readiness check that also reports the verdict on the event channel
    pub fn evaluate_readiness(&self) -> bool {
        let ready = self.is_ready_to_proceed();
        self.emit(AppEvent::Resolver(ResolverEvent::ReadinessEvaluated {
            ready,
            missing: self.missing_components(),
            estimated_size_bytes: self.estimated_size(),
        }));
        ready
    }

    /// Mirror findings recorded by the last diagnostics run
    #[must_use]
    pub fn diagnostics(&self) -> &[MirrorDiagnostic] {
        &self.diagnostics
    }

    pub fn set_diagnostics(&mut self, diagnostics: Vec<MirrorDiagnostic>) {
        self.diagnostics = diagnostics;
    }

    /// Components counted in the size estimate
    #[must_use]
    pub fn active_components(&self) -> &[Component] {
        &self.active
    }

    /// Narrow or widen the components counted in the size estimate
    pub fn set_active_components(&mut self, active: impl IntoIterator<Item = Component>) {
        let mut active: Vec<Component> = active.into_iter().collect();
        active.sort_unstable();
        active.dedup();
        self.active = active;
    }

    /// Installed footprint of the active selection in bytes
    #[must_use]
    pub fn estimated_size(&self) -> u64 {
        total_estimated_size(&self.selection, &self.active)
    }

    /// Whether the selected core predates the configured major version
    ///
    /// Such cores cannot be paired with the optional components.
    #[must_use]
    pub fn is_low_version(&self) -> bool {
        self.selection
            .get(Component::Core)
            .and_then(ReleaseArtifact::major_digit)
            .is_some_and(|major| major < self.policy.low_version_major)
    }
}

fn default_active_components(flow: Flow) -> Vec<Component> {
    match flow {
        Flow::FreshInstall => Component::ALL.to_vec(),
        Flow::UpgradeOnly => flow.required_components().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwiz_types::{ArtifactOrigin, Edition};

    fn artifact(version: &str, release: &str, edition: Edition, size: u64) -> ReleaseArtifact {
        ReleaseArtifact {
            version: version.to_string(),
            release: Some(release.to_string()),
            checksum: format!("md5-{version}-{release}"),
            edition,
            estimated_size_bytes: size,
            origin: ArtifactOrigin::RemoteMirror,
        }
    }

    fn catalog() -> ComponentCatalog {
        let mut catalog = ComponentCatalog::new();
        catalog.insert(
            Component::Core,
            vec![
                artifact("4.2.1.0", "1", Edition::Community, 300),
                artifact("3.1.4", "10", Edition::Community, 250),
            ],
        );
        catalog.insert(
            Component::Proxy,
            vec![
                artifact("4.2.0", "1", Edition::Community, 40),
                artifact("3.1.0", "1", Edition::Community, 30),
            ],
        );
        catalog.insert(Component::Manager, vec![artifact("4.2.0", "1", Edition::Community, 20)]);
        catalog.insert(Component::Agent, vec![artifact("4.2.0", "1", Edition::Community, 5)]);
        catalog
    }

    fn fresh_session() -> WizardSession {
        WizardSession::new(catalog(), Flow::FreshInstall, ResolverPolicy::default())
    }

    fn observed_session() -> (WizardSession, dwiz_events::EventReceiver) {
        let (tx, rx) = dwiz_events::channel();
        let policy = ResolverPolicy::default();
        let session = WizardSession::with_events(catalog(), Flow::FreshInstall, policy, Some(tx));
        (session, rx)
    }

    #[test]
    fn test_seeding() {
        let session = fresh_session();
        let selection = session.selection();
        assert_eq!(selection.get(Component::Core).unwrap().version, "4.2.1.0");
        assert_eq!(selection.get(Component::Proxy).unwrap().version, "4.2.0");
        assert_eq!(selection.get(Component::Agent).unwrap().version, "4.2.0");
        assert!(selection.get(Component::Console).is_none());
        assert!(session.is_ready_to_proceed());
        assert_eq!(session.estimated_size(), 365);
    }

    #[test]
    fn test_seeding_keeps_recommended_proxy_without_match() {
        let mut catalog = catalog();
        catalog.insert(Component::Proxy, vec![artifact("5.0.0", "1", Edition::Community, 40)]);
        let session = WizardSession::new(catalog, Flow::FreshInstall, ResolverPolicy::default());

        assert_eq!(session.selection().get(Component::Proxy).unwrap().version, "5.0.0");
        assert!(session.is_ready_to_proceed());
    }

    #[test]
    fn test_core_change_follows_proxy() {
        let mut session = fresh_session();
        let key = artifact("3.1.4", "10", Edition::Community, 250).key();

        let outcome = session.select_version(Component::Core, &key).unwrap();
        assert!(matches!(outcome, ProxyOutcome::Resolved { .. }));
        assert_eq!(session.selection().get(Component::Proxy).unwrap().version, "3.1.0");
        assert!(session.is_low_version());
    }

    #[test]
    fn test_invalid_selection_leaves_state() {
        let mut session = fresh_session();
        let before = session.selection().clone();

        let missing_key: ArtifactKey = "9.9.9-1-nope".parse().unwrap();
        assert!(session.select_version(Component::Core, &missing_key).is_err());
        assert!(session.select_version(Component::Console, &missing_key).is_err());
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn test_active_components_narrow_size() {
        let mut session = fresh_session();
        session.set_active_components([Component::Core, Component::Proxy, Component::Manager]);
        assert_eq!(session.estimated_size(), 360);

        let upgrade = WizardSession::new(catalog(), Flow::UpgradeOnly, ResolverPolicy::default());
        assert_eq!(upgrade.estimated_size(), 20);
    }

    #[test]
    fn test_events_are_emitted() {
        let (_session, mut rx) = observed_session();

        let mut recommended = 0;
        let mut resolved = 0;
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::Resolver(ResolverEvent::Recommended { .. }) => recommended += 1,
                AppEvent::Resolver(ResolverEvent::ProxyResolved { .. }) => resolved += 1,
                _ => {}
            }
        }
        assert_eq!(recommended, 4);
        assert_eq!(resolved, 1);
    }

    #[test]
    fn test_readiness_event_only_on_evaluate() {
        let (session, mut rx) = observed_session();
        while rx.try_recv().is_ok() {}

        assert!(session.is_ready_to_proceed());
        assert!(rx.try_recv().is_err());

        assert!(session.evaluate_readiness());
        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::Resolver(ResolverEvent::ReadinessEvaluated { ready: true, .. }))
        ));
    }

    #[test]
    fn test_select_by_text_key_with_dashed_checksum() {
        let mut session = fresh_session();
        let text = artifact("3.1.4", "10", Edition::Community, 250).key().to_string();
        assert_eq!(text, "3.1.4-10-md5-3.1.4-10");

        let key: ArtifactKey = text.parse().unwrap();
        session.select_version(Component::Core, &key).unwrap();
        assert_eq!(session.selection().get(Component::Core).unwrap().version, "3.1.4");
    }
}
