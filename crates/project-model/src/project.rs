//! Project document: tracks, video events, and their media.
//!
//! A project is a single JSON file standing in for the editing host's
//! timeline. It carries just enough to locate the selected clip and to
//! read and write its pan/crop keyframes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::geometry::MotionBounds;
use crate::motion::VideoMotion;

/// Top-level project file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Schema version.
    pub version: String,

    /// Human-readable project name.
    pub name: String,

    /// Last modified timestamp (ISO 8601).
    pub modified_at: String,

    /// Timeline tracks, top to bottom.
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

/// A timeline track holding events of one media type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub kind: TrackKind,
    #[serde(default)]
    pub events: Vec<VideoEvent>,
}

/// Native dimensions of the event's active take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStream {
    pub width: u32,
    pub height: u32,
}

/// A placed clip on a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoEvent {
    pub name: String,

    /// Whether the clip is part of the current selection.
    #[serde(default)]
    pub selected: bool,

    /// Duration in frames.
    pub length_frames: u64,

    /// Source media of the active take.
    pub media: MediaStream,

    /// Pan/crop keyframes.
    #[serde(default)]
    pub motion: VideoMotion,
}

impl VideoEvent {
    /// Create an unselected clip with a single full-frame keyframe.
    pub fn new(name: impl Into<String>, length_frames: u64, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            selected: false,
            length_frames,
            media: MediaStream { width, height },
            motion: VideoMotion::full_frame(width, height),
        }
    }

    /// Bounds covering the native frame of the active take.
    pub fn full_frame_bounds(&self) -> MotionBounds {
        MotionBounds::full_frame(self.media.width as f64, self.media.height as f64)
    }
}

/// The complete in-memory representation of a loaded project.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    /// Filesystem path to the project file.
    pub path: PathBuf,

    /// Project contents.
    pub project: Project,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: "1.0".to_string(),
            name: name.into(),
            modified_at: chrono::Utc::now().to_rfc3339(),
            tracks: vec![],
        }
    }

    /// Create a project with one video track holding one selected clip.
    pub fn with_clip(name: impl Into<String>, width: u32, height: u32, frames: u64) -> Self {
        let mut project = Self::new(name);
        let mut clip = VideoEvent::new("clip-1", frames, width, height);
        clip.selected = true;
        project.tracks.push(Track {
            name: "Video 1".to_string(),
            kind: TrackKind::Video,
            events: vec![clip],
        });
        project
    }

    /// The first selected event on a video track, scanning tracks in order.
    pub fn find_selected(&self) -> Option<&VideoEvent> {
        self.tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Video)
            .flat_map(|t| t.events.iter())
            .find(|e| e.selected)
    }

    /// Mutable variant of [`Project::find_selected`].
    pub fn find_selected_mut(&mut self) -> Option<&mut VideoEvent> {
        self.tracks
            .iter_mut()
            .filter(|t| t.kind == TrackKind::Video)
            .flat_map(|t| t.events.iter_mut())
            .find(|e| e.selected)
    }

    /// Stamp the modification time.
    pub fn touch(&mut self) {
        self.modified_at = chrono::Utc::now().to_rfc3339();
    }
}

impl LoadedProject {
    /// Load a project from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref().to_path_buf();

        let json = std::fs::read_to_string(&path).map_err(|e| ProjectError::IoError {
            path: path.clone(),
            source: e,
        })?;

        let project: Project =
            serde_json::from_str(&json).map_err(|e| ProjectError::ParseError {
                path: path.clone(),
                source: e,
            })?;

        let loaded = Self { path, project };
        let issues = loaded.validate();
        if let Some(first) = issues.first() {
            return Err(ProjectError::ValidationError {
                message: first.clone(),
            });
        }
        Ok(loaded)
    }

    /// Save the project to its file.
    pub fn save(&self) -> Result<(), ProjectError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(&self.project).map_err(|e| ProjectError::ParseError {
                path: self.path.clone(),
                source: e,
            })?;
        std::fs::write(&self.path, json).map_err(|e| ProjectError::IoError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }

    /// Create a new project file holding a single selected clip.
    pub fn create(
        path: impl AsRef<Path>,
        name: impl Into<String>,
        width: u32,
        height: u32,
        frames: u64,
    ) -> Result<Self, ProjectError> {
        let loaded = Self {
            path: path.as_ref().to_path_buf(),
            project: Project::with_clip(name, width, height, frames),
        };
        loaded.save()?;
        Ok(loaded)
    }

    /// Check structural consistency of every video event.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = vec![];

        for track in &self.project.tracks {
            for event in &track.events {
                if track.kind == TrackKind::Video
                    && (event.media.width == 0 || event.media.height == 0)
                {
                    errors.push(format!(
                        "{}/{}: media has zero size {}x{}",
                        track.name, event.name, event.media.width, event.media.height
                    ));
                }
                if event
                    .motion
                    .keyframes
                    .windows(2)
                    .any(|w| w[0].frame >= w[1].frame)
                {
                    errors.push(format!(
                        "{}/{}: keyframes are not in ascending frame order",
                        track.name, event.name
                    ));
                }
            }
        }

        errors
    }
}

/// Errors that can occur when working with projects.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid project: {message}")]
    ValidationError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_with_clip() {
        let project = Project::with_clip("Demo", 1920, 1080, 120);
        assert_eq!(project.tracks.len(), 1);
        let clip = project.find_selected().unwrap();
        assert_eq!(clip.length_frames, 120);
        assert_eq!(clip.motion.len(), 1);
        assert_eq!(clip.motion.keyframes[0].bounds.width(), 1920.0);
    }

    #[test]
    fn test_find_selected_skips_audio_tracks() {
        let mut project = Project::new("Mixed");
        let mut audio_clip = VideoEvent::new("music", 10, 0, 0);
        audio_clip.selected = true;
        project.tracks.push(Track {
            name: "Audio 1".to_string(),
            kind: TrackKind::Audio,
            events: vec![audio_clip],
        });
        assert!(project.find_selected().is_none());

        let mut video_clip = VideoEvent::new("shot", 10, 640, 480);
        video_clip.selected = true;
        project.tracks.push(Track {
            name: "Video 1".to_string(),
            kind: TrackKind::Video,
            events: vec![VideoEvent::new("other", 5, 640, 480), video_clip],
        });
        assert_eq!(project.find_selected_mut().unwrap().name, "shot");
    }

    #[test]
    fn test_no_selection() {
        let mut project = Project::with_clip("Demo", 640, 480, 10);
        project.tracks[0].events[0].selected = false;
        assert!(project.find_selected().is_none());
    }

    #[test]
    fn test_loaded_project_create_and_load() {
        let dir = std::env::temp_dir().join("panshake_test_project");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("project.json");

        let created = LoadedProject::create(&path, "Integration Test", 1280, 720, 48).unwrap();
        assert_eq!(created.project.name, "Integration Test");

        let loaded = LoadedProject::load(&path).unwrap();
        assert_eq!(loaded.project.name, "Integration Test");
        assert_eq!(loaded.project.version, "1.0");
        assert_eq!(loaded.project.find_selected().unwrap().media.width, 1280);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_rejects_unordered_keyframes() {
        let dir = std::env::temp_dir().join("panshake_test_unordered");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("project.json");

        let mut loaded = LoadedProject::create(&path, "Bad", 100, 100, 10).unwrap();
        let clip = loaded.project.find_selected_mut().unwrap();
        let first = clip.motion.keyframes[0];
        clip.motion.keyframes.push(first);
        loaded.save().unwrap();

        let err = LoadedProject::load(&path).unwrap_err();
        assert!(matches!(err, ProjectError::ValidationError { .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("panshake_definitely_missing.json");
        let err = LoadedProject::load(&path).unwrap_err();
        assert!(matches!(err, ProjectError::IoError { .. }));
    }
}
