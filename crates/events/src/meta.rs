use std::fmt;

use tracing::Level;
use uuid::Uuid;

/// Per-emission context attached to a log record
#[derive(Clone, Debug)]
pub struct EventMeta {
    /// Distinguishes records of otherwise identical events
    pub event_id: Uuid,
    pub level: Level,
    pub source: EventSource,
}

impl EventMeta {
    #[must_use]
    pub fn new(level: Level, source: EventSource) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            level,
            source,
        }
    }

    #[must_use]
    pub fn tracing_level(&self) -> Level {
        self.level
    }
}

/// Wizard subsystem an event belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventSource(&'static str);

impl EventSource {
    pub const GENERAL: Self = Self("general");
    pub const CATALOG: Self = Self("catalog");
    pub const RESOLVER: Self = Self("resolver");
    pub const MIRROR: Self = Self("mirror");

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_carries_level_and_source() {
        let first = EventMeta::new(Level::WARN, EventSource::MIRROR);
        let second = EventMeta::new(Level::WARN, EventSource::MIRROR);

        assert_eq!(first.tracing_level(), Level::WARN);
        assert_eq!(first.source.as_str(), "mirror");
        assert_ne!(first.event_id, second.event_id);
    }
}
