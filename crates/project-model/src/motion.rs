//! Pan/crop keyframes attached to a video event.

use serde::{Deserialize, Serialize};

use crate::geometry::MotionBounds;

/// A frame-anchored pan/crop rectangle. The host interpolates between
/// neighbouring keyframes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionKeyframe {
    /// Frame offset from the start of the event.
    pub frame: u64,

    /// Pan/crop bounds at this frame.
    pub bounds: MotionBounds,
}

/// The ordered keyframe list of one video event.
///
/// A video motion always has at least one keyframe at frame 0 once it has
/// been cleared or populated; a freshly deserialized list may be empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoMotion {
    #[serde(default)]
    pub keyframes: Vec<MotionKeyframe>,
}

impl VideoMotion {
    /// Motion with a single full-frame keyframe.
    pub fn full_frame(width: u32, height: u32) -> Self {
        Self {
            keyframes: vec![MotionKeyframe {
                frame: 0,
                bounds: MotionBounds::full_frame(width as f64, height as f64),
            }],
        }
    }

    /// Drop every keyframe except a single one at frame 0.
    ///
    /// The survivor keeps the bounds of the earliest keyframe, or `fallback`
    /// if the list was empty.
    pub fn clear(&mut self, fallback: MotionBounds) {
        let bounds = self
            .keyframes
            .iter()
            .min_by_key(|k| k.frame)
            .map(|k| k.bounds)
            .unwrap_or(fallback);
        self.keyframes = vec![MotionKeyframe { frame: 0, bounds }];
    }

    /// Insert a keyframe, replacing any keyframe already at that frame.
    pub fn insert(&mut self, keyframe: MotionKeyframe) {
        match self
            .keyframes
            .binary_search_by_key(&keyframe.frame, |k| k.frame)
        {
            Ok(idx) => self.keyframes[idx] = keyframe,
            Err(idx) => self.keyframes.insert(idx, keyframe),
        }
    }

    /// Add one keyframe per frame in `0..frame_count`, each carrying the
    /// bounds of the keyframe at frame 0.
    pub fn populate(&mut self, frame_count: u64, fallback: MotionBounds) {
        let bounds = self
            .keyframes
            .first()
            .filter(|k| k.frame == 0)
            .map(|k| k.bounds)
            .unwrap_or(fallback);
        for frame in 0..frame_count {
            self.insert(MotionKeyframe { frame, bounds });
        }
    }

    /// The keyframe at frame 0, if present.
    pub fn first_mut(&mut self) -> Option<&mut MotionKeyframe> {
        self.keyframes.first_mut().filter(|k| k.frame == 0)
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}
