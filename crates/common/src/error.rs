//! Error types shared across PanShake crates.

/// Top-level error type for PanShake operations.
///
/// Every variant is terminal for the invocation that raised it: nothing is
/// retried and no keyframe is partially written.
#[derive(Debug, thiserror::Error)]
pub enum ShakeError {
    #[error("Invalid parameter! {field}: '{input}' is not a valid number")]
    InputValidation { field: String, input: String },

    #[error("No video event selected!")]
    NoSelection,

    #[error(
        "Degenerate geometry at keyframe {keyframe}: bounds {width}x{height} \
         cannot fit a margin of {margin_x}x{margin_y} px per side"
    )]
    DegenerateGeometry {
        keyframe: usize,
        width: f64,
        height: f64,
        margin_x: f64,
        margin_y: f64,
    },

    #[error("Project error: {message}")]
    Project { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ShakeError.
pub type ShakeResult<T> = Result<T, ShakeError>;

impl ShakeError {
    pub fn input_validation(field: impl Into<String>, input: impl Into<String>) -> Self {
        Self::InputValidation {
            field: field.into(),
            input: input.into(),
        }
    }

    pub fn project(msg: impl Into<String>) -> Self {
        Self::Project {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the error was raised before any keyframe could be touched.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::InputValidation { .. } | Self::NoSelection | Self::DegenerateGeometry { .. }
        )
    }
}
