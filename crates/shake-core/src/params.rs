//! Shake parameters and the free-text settings form they are parsed from.

use panshake_common::{ShakeDefaults, ShakeError, ShakeResult};
use serde::{Deserialize, Serialize};

/// Validated shake settings. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShakeParameters {
    /// Horizontal phase advance per frame, in degrees.
    pub speed: f64,

    /// Multiplier on the frame index for the vertical phase.
    /// `1.0` with equal amplitudes traces a circle.
    pub sync_factor: f64,

    /// Vertical displacement in pixels; also the vertical zoom-in margin.
    pub amplitude: f64,

    /// Horizontal displacement as a multiple of `amplitude`.
    pub xy_ratio: f64,

    /// Reset keyframe 0 to the full source frame before shaking.
    pub reset_pan_on_first_frame: bool,

    /// Discard existing keyframes and regenerate one per frame.
    pub clear_existing_keyframes: bool,
}

impl ShakeParameters {
    /// Horizontal displacement in pixels.
    pub fn horizontal_amplitude(&self) -> f64 {
        self.amplitude * self.xy_ratio
    }
}

impl Default for ShakeParameters {
    fn default() -> Self {
        Self::from(&ShakeDefaults::default())
    }
}

impl From<&ShakeDefaults> for ShakeParameters {
    fn from(d: &ShakeDefaults) -> Self {
        Self {
            speed: d.speed,
            sync_factor: d.sync_factor,
            amplitude: d.amplitude,
            xy_ratio: d.xy_ratio,
            reset_pan_on_first_frame: d.reset_pan_on_first_frame,
            clear_existing_keyframes: d.clear_existing_keyframes,
        }
    }
}

/// Raw settings as typed by the user.
///
/// Numeric fields stay text until [`SettingsForm::parse`] so a bad entry
/// can be reported without touching anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    pub speed: String,
    pub sync_factor: String,
    pub amplitude: String,
    pub xy_ratio: String,
    pub reset_pan_on_first_frame: bool,
    pub clear_existing_keyframes: bool,
}

impl SettingsForm {
    /// Prefill the form from configured defaults.
    pub fn prefilled(defaults: &ShakeDefaults) -> Self {
        Self {
            speed: defaults.speed.to_string(),
            sync_factor: defaults.sync_factor.to_string(),
            amplitude: defaults.amplitude.to_string(),
            xy_ratio: defaults.xy_ratio.to_string(),
            reset_pan_on_first_frame: defaults.reset_pan_on_first_frame,
            clear_existing_keyframes: defaults.clear_existing_keyframes,
        }
    }

    /// Parse every field, failing on the first one that is not a finite number.
    pub fn parse(&self) -> ShakeResult<ShakeParameters> {
        Ok(ShakeParameters {
            speed: parse_field("shake speed", &self.speed)?,
            sync_factor: parse_field("H/V synchronicity", &self.sync_factor)?,
            amplitude: parse_field("pixels to displace", &self.amplitude)?,
            xy_ratio: parse_field("H/V ratio of displacement", &self.xy_ratio)?,
            reset_pan_on_first_frame: self.reset_pan_on_first_frame,
            clear_existing_keyframes: self.clear_existing_keyframes,
        })
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::prefilled(&ShakeDefaults::default())
    }
}

fn parse_field(field: &str, input: &str) -> ShakeResult<f64> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => {
            tracing::debug!(field, input, "rejected settings field");
            Err(ShakeError::input_validation(field, input))
        }
    }
}
