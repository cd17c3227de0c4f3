use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which half of the focus/rest cycle the timer is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Focus,
    Rest,
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerMode::Focus => f.pad("focus"),
            TimerMode::Rest => f.pad("rest"),
        }
    }
}

/// Duration and reward of one focus/rest cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub focus_minutes: u32,
    pub rest_minutes: u32,
    pub points: u32,
    pub label: String,
}

impl SessionConfig {
    /// Build a config, rejecting zero durations or rewards.
    pub fn new(
        focus_minutes: u32,
        rest_minutes: u32,
        points: u32,
        label: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if focus_minutes == 0 {
            return Err(ValidationError::NonPositive { field: "focus_minutes" });
        }
        if rest_minutes == 0 {
            return Err(ValidationError::NonPositive { field: "rest_minutes" });
        }
        if points == 0 {
            return Err(ValidationError::NonPositive { field: "points" });
        }
        Ok(Self {
            focus_minutes,
            rest_minutes,
            points,
            label: label.into(),
        })
    }

    /// Full length of the given mode in seconds.
    ///
    /// Uses saturating arithmetic so oversized configs cannot overflow.
    pub fn duration_secs(&self, mode: TimerMode) -> u64 {
        let minutes = match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::Rest => self.rest_minutes,
        };
        u64::from(minutes).saturating_mul(60)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        preset(DEFAULT_PRESET).unwrap_or_else(|| SessionConfig {
            focus_minutes: 25,
            rest_minutes: 5,
            points: 80,
            label: "Elite Grind".into(),
        })
    }
}

/// Index of the preset selected on first launch (25/5).
pub const DEFAULT_PRESET: usize = 3;

const CATALOG: [(u32, u32, u32, &str); 4] = [
    (10, 2, 20, "Short Burst"),
    (15, 3, 35, "Steady Flow"),
    (20, 4, 55, "Deep Work"),
    (25, 5, 80, "Elite Grind"),
];

/// The fixed, ordered catalog of selectable configs.
pub fn presets() -> Vec<SessionConfig> {
    CATALOG
        .iter()
        .map(|&(focus, rest, points, label)| SessionConfig {
            focus_minutes: focus,
            rest_minutes: rest,
            points,
            label: label.to_string(),
        })
        .collect()
}

pub fn preset(index: usize) -> Option<SessionConfig> {
    presets().into_iter().nth(index)
}

/// Like [`preset`], but reports an out-of-range index as a validation error.
pub fn preset_or_err(index: usize) -> Result<SessionConfig, ValidationError> {
    preset(index).ok_or(ValidationError::UnknownPreset {
        index,
        len: CATALOG.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_by_focus_length() {
        let all = presets();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].focus_minutes < w[1].focus_minutes));
    }

    #[test]
    fn default_is_elite_grind() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.focus_minutes, 25);
        assert_eq!(cfg.rest_minutes, 5);
        assert_eq!(cfg.points, 80);
    }

    #[test]
    fn new_rejects_zero_fields() {
        assert_eq!(
            SessionConfig::new(0, 5, 10, "x"),
            Err(ValidationError::NonPositive { field: "focus_minutes" })
        );
        assert!(SessionConfig::new(1, 0, 10, "x").is_err());
        assert!(SessionConfig::new(1, 1, 0, "x").is_err());
        assert!(SessionConfig::new(1, 1, 1, "x").is_ok());
    }

    #[test]
    fn unknown_preset_is_reported() {
        assert_eq!(
            preset_or_err(9),
            Err(ValidationError::UnknownPreset { index: 9, len: 4 })
        );
    }

    #[test]
    fn duration_secs_per_mode() {
        let cfg = preset(0).unwrap();
        assert_eq!(cfg.duration_secs(TimerMode::Focus), 600);
        assert_eq!(cfg.duration_secs(TimerMode::Rest), 120);
    }
}
