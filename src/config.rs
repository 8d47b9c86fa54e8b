//! Engine configuration: runtime handles plus serializable tunables.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::geometry::Size;
use crate::logging::Logger;
use crate::metrics::EngineMetrics;

/// A single vibration pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HapticCue {
    pub duration_ms: u64,
    pub amplitude: u8,
}

impl HapticCue {
    pub const fn new(duration_ms: u64, amplitude: u8) -> Self {
        Self {
            duration_ms,
            amplitude,
        }
    }
}

/// Tunables a host may persist alongside its other preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Pointer travel (layout units) before a press becomes a drag.
    pub drag_threshold: f32,
    /// Factor applied to horizontal drag offsets, in `0.0..=1.0`.
    pub horizontal_damping: f32,
    pub row_height: f32,
    pub placeholder_height: f32,
    pub row_gap: f32,
    pub column_gap: f32,
    pub handle_size: f32,
    pub viewport: Size,
    pub lift_scale: f32,
    pub lift_alpha: f32,
    pub edit_mode_cue: HapticCue,
    pub drag_start_cue: HapticCue,
    pub move_cue: HapticCue,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            drag_threshold: 8.0,
            horizontal_damping: 0.35,
            row_height: 160.0,
            placeholder_height: 96.0,
            row_gap: 8.0,
            column_gap: 8.0,
            handle_size: 32.0,
            viewport: Size::new(360.0, 720.0),
            lift_scale: 1.05,
            lift_alpha: 0.85,
            edit_mode_cue: HapticCue::new(50, 128),
            drag_start_cue: HapticCue::new(30, 180),
            move_cue: HapticCue::new(20, 255),
        }
    }
}

impl EngineSettings {
    /// Parse settings from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.drag_threshold >= 0.0) {
            return Err(DashError::Config(format!(
                "drag_threshold must be non-negative, got {}",
                self.drag_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.horizontal_damping) {
            return Err(DashError::Config(format!(
                "horizontal_damping must be within 0..=1, got {}",
                self.horizontal_damping
            )));
        }
        let lengths = [
            ("row_height", self.row_height),
            ("placeholder_height", self.placeholder_height),
            ("row_gap", self.row_gap),
            ("column_gap", self.column_gap),
            ("handle_size", self.handle_size),
        ];
        if let Some((name, value)) = lengths.iter().find(|(_, value)| !(*value >= 0.0)) {
            return Err(DashError::Config(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
        Ok(())
    }
}

/// Configuration knobs for [`crate::engine::DashboardEngine`].
#[derive(Clone)]
pub struct EngineConfig {
    pub settings: EngineSettings,
    /// Optional structured logger used by the engine.
    pub logger: Option<Logger>,
    /// Metrics accumulator; `None` disables counting.
    pub metrics: Option<Arc<Mutex<EngineMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings: EngineSettings::default(),
            logger: None,
            metrics: None,
            metrics_target: "dashgrid::engine.metrics".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(EngineMetrics::new())));
        }
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<EngineMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = EngineSettings::from_json(r#"{"drag_threshold": 12.5}"#).unwrap();
        assert_eq!(settings.drag_threshold, 12.5);
        assert_eq!(settings.row_height, EngineSettings::default().row_height);
    }

    #[test]
    fn damping_out_of_range_is_rejected() {
        let err = EngineSettings::from_json(r#"{"horizontal_damping": 1.5}"#).unwrap_err();
        assert!(matches!(err, DashError::Config(_)));
    }

    #[test]
    fn negative_lengths_are_rejected() {
        let err = EngineSettings::from_json(r#"{"row_gap": -1.0}"#).unwrap_err();
        assert!(err.to_string().contains("row_gap"));
    }

    #[test]
    fn malformed_json_is_a_codec_error() {
        let err = EngineSettings::from_json("{").unwrap_err();
        assert!(matches!(err, DashError::Codec(_)));
    }

    #[test]
    fn enable_metrics_is_idempotent() {
        let mut config = EngineConfig::default();
        config.enable_metrics();
        let first = config.metrics_handle().unwrap();
        config.enable_metrics();
        assert!(Arc::ptr_eq(&first, &config.metrics_handle().unwrap()));
    }
}
