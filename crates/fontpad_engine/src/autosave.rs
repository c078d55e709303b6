//! Periodic snapshots of the editor state.
//!
//! The editor is saved on every text edit and additionally on a fixed interval,
//! whether or not anything changed since the last save.

use std::time::Duration;

/// Default snapshot interval.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Autosave configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveConfig {
    /// Interval between automatic saves.
    /// If None, state is only saved on edits and applied fonts.
    /// Default: Some(5 seconds)
    pub interval: Option<Duration>,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval: Some(DEFAULT_AUTOSAVE_INTERVAL),
        }
    }
}

impl AutosaveConfig {
    pub fn new(interval: Duration) -> Self {
        Self { interval: Some(interval) }
    }

    /// Set the autosave interval. Use None to disable periodic saves.
    pub fn with_interval(mut self, interval: Option<Duration>) -> Self {
        self.interval = interval;
        self
    }

    /// Check if periodic autosave is enabled (interval is set and non-zero).
    pub fn has_periodic_saves(&self) -> bool {
        self.interval.is_some_and(|interval| !interval.is_zero())
    }

    /// Creates the timer that drives periodic saves.
    ///
    /// The first tick fires one full interval after creation, not immediately.
    pub(crate) fn timer(&self) -> Option<tokio::time::Interval> {
        let interval = self.interval.filter(|interval| !interval.is_zero())?;
        let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        Some(timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autosave_config_default() {
        let config = AutosaveConfig::default();
        assert!(config.has_periodic_saves());
        assert_eq!(config.interval, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_autosave_config_no_periodic() {
        let config = AutosaveConfig::default().with_interval(None);
        assert!(!config.has_periodic_saves());

        let config = AutosaveConfig::new(Duration::ZERO);
        assert!(!config.has_periodic_saves());
    }
}
