//! The shake generator.
//!
//! Each frame `n` gets a uniform inward scale, constant for a given set of
//! bounds, and a translation driven by two independent sinusoids:
//!
//! ```text
//! dx = sin(n * speed) * amplitude * xy_ratio
//! dy = cos(n * speed * sync_factor) * amplitude
//! ```
//!
//! Angles are in degrees. `sin` against `cos` puts the axes a quarter turn
//! apart, so `sync_factor = 1` traces an ellipse instead of a diagonal line.
//! Nothing is carried between frames; the output for frame `n` depends only
//! on `n` and the parameters.

use panshake_common::{ShakeError, ShakeResult};
use panshake_project_model::geometry::{MotionBounds, Vertex};

use crate::params::ShakeParameters;

/// Per-frame perturbation: scale about the bounds' center, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    /// Zero-based frame (or visited keyframe) index.
    pub frame: u64,

    /// Per-axis scale factor.
    pub scale: Vertex,

    /// Displacement in pixels.
    pub translation: Vertex,
}

impl FrameTransform {
    /// Apply this transform to a set of bounds in place.
    pub fn apply(&self, bounds: &mut MotionBounds) {
        bounds.scale_by(self.scale);
        bounds.move_by(self.translation);
    }
}

/// Scale factors that shrink `bounds` by `amplitude * xy_ratio` on the left
/// and right and by `amplitude` on the top and bottom.
///
/// Zero or negative factors come back unchanged when the bounds are too
/// small for the margin; use [`check_margin`] to detect that.
pub fn compute_scale_margin(bounds: &MotionBounds, amplitude: f64, xy_ratio: f64) -> Vertex {
    let w = bounds.width();
    let h = bounds.height();
    Vertex::new(
        (w - 2.0 * amplitude * xy_ratio) / w,
        (h - 2.0 * amplitude) / h,
    )
}

/// Fails with [`ShakeError::DegenerateGeometry`] unless the margin shrinks
/// the bounds to a non-empty rectangle inside themselves.
///
/// A negative `amplitude` or `xy_ratio` grows the bounds past their edges
/// and is rejected here too.
pub fn check_margin(
    bounds: &MotionBounds,
    params: &ShakeParameters,
    keyframe: usize,
) -> ShakeResult<()> {
    let scale = compute_scale_margin(bounds, params.amplitude, params.xy_ratio);
    let inward = |s: f64| s > 0.0 && s <= 1.0;

    if !(inward(scale.x) && inward(scale.y)) {
        return Err(ShakeError::DegenerateGeometry {
            keyframe,
            width: bounds.width(),
            height: bounds.height(),
            margin_x: params.horizontal_amplitude(),
            margin_y: params.amplitude,
        });
    }
    Ok(())
}

/// Displacement for frame `n`.
pub fn compute_translation(n: u64, params: &ShakeParameters) -> Vertex {
    let n = n as f64;
    Vertex::new(
        (n * params.speed).to_radians().sin() * params.amplitude * params.xy_ratio,
        (n * params.speed * params.sync_factor).to_radians().cos() * params.amplitude,
    )
}

/// Lazily generate one transform per frame in `0..frame_count`.
pub fn generate(
    frame_count: u64,
    params: &ShakeParameters,
    initial_bounds: &MotionBounds,
) -> ShakeSequence {
    ShakeSequence {
        params: *params,
        scale: compute_scale_margin(initial_bounds, params.amplitude, params.xy_ratio),
        next: 0,
        end: frame_count,
    }
}

/// Iterator over the transforms of a clip, in ascending frame order.
///
/// A clone continues independently from the same position. Calling
/// [`generate`] again with the same inputs yields bit-identical output.
#[derive(Debug, Clone)]
pub struct ShakeSequence {
    params: ShakeParameters,
    scale: Vertex,
    next: u64,
    end: u64,
}

impl ShakeSequence {
    /// The scale factor shared by every frame of this sequence.
    pub fn scale(&self) -> Vertex {
        self.scale
    }

    pub fn params(&self) -> &ShakeParameters {
        &self.params
    }
}

impl Iterator for ShakeSequence {
    type Item = FrameTransform;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.next;
        self.next += 1;
        Some(FrameTransform {
            frame,
            scale: self.scale,
            translation: compute_translation(frame, &self.params),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n as u64).min(self.end);
        self.next()
    }
}

impl ExactSizeIterator for ShakeSequence {}

impl std::iter::FusedIterator for ShakeSequence {}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const EPS: f64 = 1e-9;

    fn params(speed: f64, sync_factor: f64, amplitude: f64, xy_ratio: f64) -> ShakeParameters {
        ShakeParameters {
            speed,
            sync_factor,
            amplitude,
            xy_ratio,
            ..ShakeParameters::default()
        }
    }

    #[test]
    fn test_quarter_turn_scenario() {
        let p = params(90.0, 1.0, 4.0, 2.5);
        let expected = [(0.0, 4.0), (10.0, 0.0), (0.0, -4.0), (-10.0, 0.0)];
        let bounds = MotionBounds::full_frame(1920.0, 1080.0);

        let frames: Vec<_> = generate(4, &p, &bounds).collect();
        assert_eq!(frames.len(), 4);
        for (t, (ex, ey)) in frames.iter().zip(expected) {
            assert!((t.translation.x - ex).abs() < EPS, "frame {}", t.frame);
            assert!((t.translation.y - ey).abs() < EPS, "frame {}", t.frame);
        }
    }

    #[test]
    fn test_full_hd_scale_margin() {
        let bounds = MotionBounds::full_frame(1920.0, 1080.0);
        let s = compute_scale_margin(&bounds, 4.0, 2.5);
        assert!((s.x - 1900.0 / 1920.0).abs() < EPS);
        assert!((s.y - 1072.0 / 1080.0).abs() < EPS);
        assert!((s.x - 0.98958).abs() < 1e-5);
        assert!((s.y - 0.99259).abs() < 1e-5);
    }

    #[test]
    fn test_margin_shrinks_by_exact_pixels() {
        let mut bounds = MotionBounds::full_frame(1920.0, 1080.0);
        let s = compute_scale_margin(&bounds, 4.0, 2.5);
        bounds.scale_by(s);
        assert!((bounds.top_left.x - 10.0).abs() < 1e-6);
        assert!((bounds.top_right.x - 1910.0).abs() < 1e-6);
        assert!((bounds.top_left.y - 4.0).abs() < 1e-6);
        assert!((bounds.bottom_left.y - 1076.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_speed_is_static() {
        let p = params(0.0, 1.5, 4.0, 2.5);
        for n in [0, 1, 7, 1000] {
            let t = compute_translation(n, &p);
            assert_eq!(t.x, 0.0);
            assert_eq!(t.y, 4.0);
        }
    }

    #[test]
    fn test_empty_sequence() {
        let bounds = MotionBounds::full_frame(100.0, 100.0);
        let mut seq = generate(0, &ShakeParameters::default(), &bounds);
        assert_eq!(seq.len(), 0);
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_sequence_is_exact_size_and_ordered() {
        let bounds = MotionBounds::full_frame(640.0, 480.0);
        let mut seq = generate(25, &ShakeParameters::default(), &bounds);
        assert_eq!(seq.len(), 25);
        seq.next();
        assert_eq!(seq.len(), 24);
        let frames: Vec<u64> = seq.map(|t| t.frame).collect();
        assert_eq!(frames, (1..25).collect::<Vec<_>>());
    }

    #[test]
    fn test_nth_skips_ahead() {
        let bounds = MotionBounds::full_frame(640.0, 480.0);
        let p = ShakeParameters::default();
        let mut seq = generate(10, &p, &bounds);
        let t = seq.nth(6).unwrap();
        assert_eq!(t.frame, 6);
        assert_eq!(t.translation, compute_translation(6, &p));
        assert!(seq.nth(10).is_none());
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_check_margin_rejects_small_bounds() {
        let p = params(12.0, 1.5, 4.0, 2.5);
        let ok = MotionBounds::full_frame(21.0, 9.0);
        assert!(check_margin(&ok, &p, 0).is_ok());

        let too_narrow = MotionBounds::full_frame(20.0, 100.0);
        assert!(matches!(
            check_margin(&too_narrow, &p, 3),
            Err(ShakeError::DegenerateGeometry { keyframe: 3, .. })
        ));

        let too_short = MotionBounds::full_frame(100.0, 8.0);
        assert!(check_margin(&too_short, &p, 0).is_err());
    }

    #[test]
    fn test_check_margin_rejects_outward_margin() {
        let bounds = MotionBounds::full_frame(1920.0, 1080.0);
        assert!(check_margin(&bounds, &params(12.0, 1.5, -4.0, 2.5), 0).is_err());
        assert!(check_margin(&bounds, &params(12.0, 1.5, 4.0, -2.5), 0).is_err());
        assert!(check_margin(&bounds, &params(12.0, 1.5, 0.0, 2.5), 0).is_ok());
    }

    #[test]
    fn test_size_hint_saturates_on_huge_sequences() {
        let bounds = MotionBounds::full_frame(640.0, 480.0);
        let seq = generate(u64::MAX, &ShakeParameters::default(), &bounds);
        let (lower, upper) = seq.size_hint();
        assert_eq!(Some(lower), upper);
        assert_eq!(lower as u64, u64::MAX.min(usize::MAX as u64));
    }

    #[test]
    fn test_transform_apply() {
        let mut bounds = MotionBounds::full_frame(100.0, 100.0);
        let t = FrameTransform {
            frame: 0,
            scale: Vertex::new(0.5, 0.5),
            translation: Vertex::new(5.0, -5.0),
        };
        t.apply(&mut bounds);
        assert_eq!(bounds.top_left, Vertex::new(30.0, 20.0));
        assert_eq!(bounds.bottom_right, Vertex::new(80.0, 70.0));
    }

    proptest! {
        #[test]
        fn prop_translation_matches_closed_form(
            n in 0u64..100_000,
            speed in -720.0f64..720.0,
            sync in -4.0f64..4.0,
            amp in 0.0f64..200.0,
            ratio in 0.0f64..10.0,
        ) {
            let p = params(speed, sync, amp, ratio);
            let t = compute_translation(n, &p);
            let nf = n as f64;
            let dx = amp * ratio * (nf * speed * (std::f64::consts::PI / 180.0)).sin();
            let dy = amp * (nf * speed * sync * (std::f64::consts::PI / 180.0)).cos();
            prop_assert!((t.x - dx).abs() < 1e-6);
            prop_assert!((t.y - dy).abs() < 1e-6);
            prop_assert!(t.x.abs() <= amp * ratio + 1e-9);
            prop_assert!(t.y.abs() <= amp + 1e-9);
        }

        #[test]
        fn prop_generate_is_deterministic(
            frames in 0u64..400,
            speed in 0.0f64..360.0,
            sync in 0.0f64..4.0,
        ) {
            let p = params(speed, sync, 4.0, 2.5);
            let bounds = MotionBounds::full_frame(1920.0, 1080.0);
            let a: Vec<_> = generate(frames, &p, &bounds).collect();
            let b: Vec<_> = generate(frames, &p, &bounds).collect();
            prop_assert_eq!(a.len() as u64, frames);
            for (i, (x, y)) in a.iter().zip(&b).enumerate() {
                prop_assert_eq!(x.frame, i as u64);
                prop_assert_eq!(x.translation.x.to_bits(), y.translation.x.to_bits());
                prop_assert_eq!(x.translation.y.to_bits(), y.translation.y.to_bits());
            }
        }
    }
}
