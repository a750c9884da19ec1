//! Camera shake preview helpers.
//!
//! Generates CSS-like transform samples so UI clients can preview the shake
//! without touching any keyframes.

use panshake_project_model::geometry::MotionBounds;

use crate::generator::ShakeSequence;

/// How the picture moves on one frame of the shake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakePreviewFrame {
    pub frame: u64,
    /// Picture offset as a percentage of the bounds, opposite to the window.
    pub translate_x_percent: f64,
    pub translate_y_percent: f64,
    /// Picture zoom; the inverse of the window's inward scale.
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ShakePreviewFrame {
    /// CSS `transform` value for a full-size `<video>` element.
    pub fn css_transform(&self) -> String {
        let Self {
            translate_x_percent: tx,
            translate_y_percent: ty,
            scale_x: sx,
            scale_y: sy,
            ..
        } = *self;
        format!("translate({tx:.3}%, {ty:.3}%) scale({sx:.4}, {sy:.4})")
    }
}

/// Simulate frame-by-frame transforms for bounds of the given size.
///
/// The transform is what the picture undergoes: shrinking the pan/crop
/// window zooms the picture in, and moving the window right moves the
/// picture left. Translations are a percentage of the bounds' width and
/// height.
pub fn preview_motion(sequence: ShakeSequence, bounds: &MotionBounds) -> Vec<ShakePreviewFrame> {
    let w = bounds.width().abs().max(f64::EPSILON);
    let h = bounds.height().abs().max(f64::EPSILON);

    sequence
        .map(|t| ShakePreviewFrame {
            frame: t.frame,
            translate_x_percent: -t.translation.x / w * 100.0,
            translate_y_percent: -t.translation.y / h * 100.0,
            scale_x: 1.0 / t.scale.x,
            scale_y: 1.0 / t.scale.y,
        })
        .collect()
}

/// Largest horizontal and vertical displacement reached, in pixels.
pub fn ellipse_extent(sequence: ShakeSequence) -> (f64, f64) {
    sequence.fold((0.0f64, 0.0f64), |(mx, my), t| {
        (mx.max(t.translation.x.abs()), my.max(t.translation.y.abs()))
    })
}
