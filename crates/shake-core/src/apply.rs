//! Applying a shake to a clip's pan/crop keyframes.
//!
//! Work happens on a copy of the clip's motion and is written back only
//! once every keyframe has been processed, so an error leaves the clip
//! exactly as it was.

use panshake_common::{GeometryPolicy, ShakeError, ShakeResult};
use panshake_project_model::project::{Project, VideoEvent};
use panshake_project_model::VideoMotion;

use crate::generator::{check_margin, compute_scale_margin, generate};
use crate::params::ShakeParameters;

/// Summary of a completed shake.
#[derive(Debug, Clone, PartialEq)]
pub struct ShakeReport {
    /// Name of the clip that was shaken.
    pub event: String,

    /// Number of keyframes that received a transform.
    pub keyframes: usize,

    /// Whether keyframes were regenerated one per frame.
    pub regenerated: bool,

    /// Largest translation applied, in pixels.
    pub max_displacement: f64,
}

/// Shake a single clip.
///
/// With `clear_existing_keyframes`, the motion is cleared down to keyframe
/// 0 (optionally reset to the full frame) and repopulated with one keyframe
/// per frame. Otherwise the shake compounds onto the existing keyframes,
/// and the n-th keyframe visited gets the transform for index `n`
/// regardless of its frame position.
pub fn apply_shake(
    event: &mut VideoEvent,
    params: &ShakeParameters,
    policy: GeometryPolicy,
) -> ShakeResult<ShakeReport> {
    let full_frame = event.full_frame_bounds();
    let mut motion: VideoMotion = event.motion.clone();

    if params.clear_existing_keyframes {
        motion.clear(full_frame);
        if params.reset_pan_on_first_frame {
            if let Some(first) = motion.first_mut() {
                first.bounds = full_frame;
            }
        }
        motion.populate(event.length_frames, full_frame);
        tracing::debug!(
            event = %event.name,
            keyframes = motion.len(),
            "regenerated keyframes"
        );
    }

    if policy == GeometryPolicy::Reject {
        for (i, key) in motion.keyframes.iter().enumerate() {
            check_margin(&key.bounds, params, i)?;
        }
    }

    let first_bounds = motion
        .keyframes
        .first()
        .map(|k| k.bounds)
        .unwrap_or(full_frame);
    let sequence = generate(motion.len() as u64, params, &first_bounds);

    let mut max_displacement: f64 = 0.0;
    for (key, mut transform) in motion.keyframes.iter_mut().zip(sequence) {
        if !params.clear_existing_keyframes {
            // Compounded keyframes keep their own zoom, so each gets its own margin.
            transform.scale = compute_scale_margin(&key.bounds, params.amplitude, params.xy_ratio);
        }
        transform.apply(&mut key.bounds);
        if key.bounds.is_degenerate() {
            tracing::warn!(
                event = %event.name,
                keyframe = transform.frame,
                "shake inverted the pan/crop bounds"
            );
        }
        max_displacement = max_displacement.max(transform.translation.length());
    }

    let report = ShakeReport {
        event: event.name.clone(),
        keyframes: motion.len(),
        regenerated: params.clear_existing_keyframes,
        max_displacement,
    };
    event.motion = motion;

    tracing::info!(
        event = %report.event,
        keyframes = report.keyframes,
        regenerated = report.regenerated,
        "applied camera shake"
    );
    Ok(report)
}

/// Shake the selected video event of a project.
///
/// Fails with [`ShakeError::NoSelection`] when no clip on a video track is
/// selected; the project is untouched in that case.
pub fn shake_selected(
    project: &mut Project,
    params: &ShakeParameters,
    policy: GeometryPolicy,
) -> ShakeResult<ShakeReport> {
    let event = project.find_selected_mut().ok_or(ShakeError::NoSelection)?;
    let report = apply_shake(event, params, policy)?;
    project.touch();
    Ok(report)
}
