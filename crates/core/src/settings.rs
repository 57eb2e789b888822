//! Dashboard policy settings.
//!
//! The grid width, bulk-add confirmation threshold and initial period are
//! product decisions rather than invariants, so they are configurable.

use crate::error::CoreError;
use crate::grid::DEFAULT_GRID_COLS;

/// Above this many widgets, "add all" asks for confirmation first.
pub const DEFAULT_BULK_ADD_CONFIRM_THRESHOLD: usize = 5;

/// Reporting period a fresh session starts with.
pub const DEFAULT_PERIOD: &str = "month";

/// Layout-engine settings shared by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Grid width in columns.
    pub grid_cols: u32,
    pub bulk_add_confirm_threshold: usize,
    pub default_period: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            grid_cols: DEFAULT_GRID_COLS,
            bulk_add_confirm_threshold: DEFAULT_BULK_ADD_CONFIRM_THRESHOLD,
            default_period: DEFAULT_PERIOD.to_string(),
        }
    }
}

impl DashboardSettings {
    /// Load settings from environment variables with defaults.
    ///
    /// | Env Var                        | Default |
    /// |--------------------------------|---------|
    /// | `DASHBOARD_GRID_COLS`          | `4`     |
    /// | `DASHBOARD_BULK_ADD_THRESHOLD` | `5`     |
    /// | `DASHBOARD_DEFAULT_PERIOD`     | `month` |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let defaults = Self::default();

        let grid_cols = match lookup("DASHBOARD_GRID_COLS") {
            Some(raw) => parse_positive(&raw, "DASHBOARD_GRID_COLS")?,
            None => defaults.grid_cols,
        };

        let bulk_add_confirm_threshold = match lookup("DASHBOARD_BULK_ADD_THRESHOLD") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                CoreError::Validation(format!(
                    "DASHBOARD_BULK_ADD_THRESHOLD must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => defaults.bulk_add_confirm_threshold,
        };

        let default_period = lookup("DASHBOARD_DEFAULT_PERIOD")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(defaults.default_period);

        Ok(Self {
            grid_cols,
            bulk_add_confirm_threshold,
            default_period,
        })
    }
}

fn parse_positive(raw: &str, key: &str) -> Result<u32, CoreError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CoreError::Validation(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = DashboardSettings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, DashboardSettings::default());
        assert_eq!(settings.grid_cols, 4);
        assert_eq!(settings.bulk_add_confirm_threshold, 5);
        assert_eq!(settings.default_period, "month");
    }

    #[test]
    fn overrides_are_parsed() {
        let settings = DashboardSettings::from_lookup(|key| match key {
            "DASHBOARD_GRID_COLS" => Some("6".into()),
            "DASHBOARD_BULK_ADD_THRESHOLD" => Some(" 10 ".into()),
            "DASHBOARD_DEFAULT_PERIOD" => Some("week".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(settings.grid_cols, 6);
        assert_eq!(settings.bulk_add_confirm_threshold, 10);
        assert_eq!(settings.default_period, "week");
    }

    #[test]
    fn zero_columns_is_rejected() {
        let result = DashboardSettings::from_lookup(|key| {
            (key == "DASHBOARD_GRID_COLS").then(|| "0".to_string())
        });
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn garbage_threshold_is_rejected() {
        let result = DashboardSettings::from_lookup(|key| {
            (key == "DASHBOARD_BULK_ADD_THRESHOLD").then(|| "many".to_string())
        });
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("many"));
    }
}
