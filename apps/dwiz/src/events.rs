//! Event handling and progress display

use crate::logging::log_event_with_tracing;
use console::{Style, Term};
use dwiz_events::{AppEvent, CatalogEvent, GeneralEvent, MirrorEvent, ResolverEvent};

/// Turns domain events into short status lines on stderr
pub struct EventHandler {
    term: Term,
    colors_enabled: bool,
    debug_enabled: bool,
    quiet: bool,
}

impl EventHandler {
    /// Create new event handler
    ///
    /// A `quiet` handler only logs; it never writes status lines.
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            colors_enabled,
            debug_enabled,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        log_event_with_tracing(&event);

        if self.quiet {
            return;
        }

        match event {
            AppEvent::Catalog(CatalogEvent::FetchRetrying { attempt, delay_ms }) => {
                self.show_status(&format!(
                    "Deployment service is busy, retrying in {delay_ms} ms (attempt {attempt})"
                ));
            }
            AppEvent::Catalog(CatalogEvent::Loaded {
                components,
                artifacts,
                ..
            }) => {
                self.show_debug(&format!(
                    "Loaded {artifacts} artifact(s) across {components} component(s)"
                ));
            }
            AppEvent::Resolver(ResolverEvent::NoCompatibleProxy {
                core_version,
                edition,
                kept,
            }) => {
                let kept = kept.map_or_else(|| "none".to_string(), |v| format!("keeping {v}"));
                self.show_warning(&format!(
                    "No {edition} proxy matches core {core_version} ({kept})"
                ));
            }
            AppEvent::Resolver(ResolverEvent::ProxyResolved {
                core_version,
                proxy_version,
                ..
            }) => {
                self.show_debug(&format!("Proxy {proxy_version} follows core {core_version}"));
            }
            AppEvent::Mirror(MirrorEvent::DiagnosticsStarted { missing }) => {
                self.show_status(&format!(
                    "Checking mirrors for missing components: {}",
                    missing.join(", ")
                ));
            }
            AppEvent::Mirror(MirrorEvent::StatusRetrying { attempt, delay_ms }) => {
                self.show_status(&format!(
                    "Mirror service is busy, retrying in {delay_ms} ms (attempt {attempt})"
                ));
            }
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                match context {
                    Some(context) => self.show_warning(&format!("{message}: {context}")),
                    None => self.show_warning(&message),
                }
            }
            AppEvent::General(GeneralEvent::DebugLog { message }) => {
                self.show_debug(&message);
            }
            _ => {}
        }
    }

    fn show_status(&self, message: &str) {
        let _ = self.term.write_line(&self.paint(Style::new().cyan(), message));
    }

    fn show_warning(&self, message: &str) {
        let line = format!("Warning: {message}");
        let _ = self.term.write_line(&self.paint(Style::new().yellow(), &line));
    }

    fn show_debug(&self, message: &str) {
        if self.debug_enabled {
            let _ = self.term.write_line(&self.paint(Style::new().dim(), message));
        }
    }

    fn paint(&self, style: Style, message: &str) -> String {
        if self.colors_enabled {
            style.force_styling(true).apply_to(message).to_string()
        } else {
            message.to_string()
        }
    }
}
