//! PanShake Shake Core
//!
//! Turns six shake settings into per-frame pan/crop perturbations:
//! - **Params:** Settings form parsing and the immutable parameter value
//! - **Generator:** Scale margin and sinusoidal translation per frame
//! - **Apply:** Clearing, repopulating, and shaking a clip's keyframes
//! - **Preview:** CSS-like transform samples for UI previews
//!
//! Everything except [`apply`] is pure computation over plain values.

pub mod apply;
pub mod generator;
pub mod params;
pub mod preview;

pub use apply::{apply_shake, shake_selected, ShakeReport};
pub use generator::{generate, FrameTransform, ShakeSequence};
pub use params::{SettingsForm, ShakeParameters};
