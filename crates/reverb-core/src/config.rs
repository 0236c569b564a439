//! Observable configuration
//!
//! Settings are plain data and serialize cleanly, so hosts can load them
//! from config files alongside their own.

use serde::{Deserialize, Serialize};

/// Which edge of a burst the coalesced delivery fires on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Edge {
    /// Fire once, after the burst has gone quiet for the full wait window
    #[default]
    Trailing,
    /// Fire on the first call of a burst, then suppress until the window expires
    Leading,
}

impl Edge {
    /// Check if this is the leading edge
    pub fn is_leading(&self) -> bool {
        matches!(self, Edge::Leading)
    }
}

/// Debounce window configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet window in milliseconds
    ///
    /// A zero window still defers trailing delivery to the next timer tick.
    pub wait_ms: u64,
    /// Edge policy for the coalesced delivery
    #[serde(default)]
    pub edge: Edge,
}

impl DebounceConfig {
    /// Trailing-edge window of `wait_ms` milliseconds
    pub fn trailing(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            edge: Edge::Trailing,
        }
    }

    /// Leading-edge window of `wait_ms` milliseconds
    pub fn leading(wait_ms: u64) -> Self {
        Self {
            wait_ms,
            edge: Edge::Leading,
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::trailing(0)
    }
}

/// Construction-time settings for an observable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Synthesize and deliver a fresh event as soon as a reaction registers
    ///
    /// Requires an event factory collaborator at construction.
    #[serde(default)]
    pub first: bool,
    /// Debounce the reaction from the moment it registers
    ///
    /// This is the only way to select a leading-edge window; the handle's
    /// `debounce(wait_ms)` keeps whatever edge is configured here.
    #[serde(default)]
    pub debounce: Option<DebounceConfig>,
}

impl Settings {
    /// Create default settings (no first-event synthesis, no debounce)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable first-event synthesis at reaction registration
    pub fn with_first(mut self) -> Self {
        self.first = true;
        self
    }

    /// Pre-configure a debounce window
    pub fn with_debounce(mut self, config: DebounceConfig) -> Self {
        self.debounce = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_builders() {
        let settings = Settings::new()
            .with_first()
            .with_debounce(DebounceConfig::leading(250));

        assert!(settings.first);
        assert_eq!(settings.debounce.map(|c| c.wait_ms), Some(250));
        assert!(settings.debounce.unwrap().edge.is_leading());
    }

    #[test]
    fn test_settings_from_ron() {
        // Omitted fields fall back to defaults
        let settings: Settings = ron::from_str("(first: true)").unwrap();
        assert!(settings.first);
        assert!(settings.debounce.is_none());

        let settings: Settings =
            ron::from_str("(debounce: Some((wait_ms: 100, edge: Leading)))").unwrap();
        assert!(!settings.first);
        assert_eq!(settings.debounce, Some(DebounceConfig::leading(100)));
    }

    #[test]
    fn test_debounce_config_default_edge() {
        let config: DebounceConfig = ron::from_str("(wait_ms: 50)").unwrap();
        assert_eq!(config.edge, Edge::Trailing);
    }
}
