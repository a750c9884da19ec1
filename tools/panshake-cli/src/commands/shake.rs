//! Apply a camera shake to the selected clip of a project.

use std::path::PathBuf;

use panshake_common::{AppConfig, GeometryPolicy};
use panshake_project_model::LoadedProject;
use panshake_shake_core::{shake_selected, SettingsForm};

/// Settings form fields. Numeric values are taken as typed and validated
/// before the project is touched.
#[derive(Debug, clap::Args)]
pub struct SettingsArgs {
    /// Shake speed in degrees per frame (lower is slower)
    #[arg(long)]
    pub speed: Option<String>,

    /// H/V synchronicity (1 moves in a circle)
    #[arg(long)]
    pub sync: Option<String>,

    /// Pixels to displace; also the zoom-in margin
    #[arg(long)]
    pub pixels: Option<String>,

    /// H/V ratio of displacement (above 1 zooms in further)
    #[arg(long)]
    pub ratio: Option<String>,

    /// Reset pan/crop to the full frame before shaking
    #[arg(long)]
    pub reset_pan: bool,

    /// Keep existing keyframes and compound the shake onto them
    #[arg(long)]
    pub keep_frames: bool,
}

impl SettingsArgs {
    /// Fill the form from config defaults, then overlay anything given.
    pub fn into_form(self, config: &AppConfig) -> SettingsForm {
        let mut form = SettingsForm::prefilled(&config.shake);
        if let Some(v) = self.speed {
            form.speed = v;
        }
        if let Some(v) = self.sync {
            form.sync_factor = v;
        }
        if let Some(v) = self.pixels {
            form.amplitude = v;
        }
        if let Some(v) = self.ratio {
            form.xy_ratio = v;
        }
        if self.reset_pan {
            form.reset_pan_on_first_frame = true;
        }
        if self.keep_frames {
            form.clear_existing_keyframes = false;
        }
        form
    }
}

pub fn run(
    path: PathBuf,
    settings: SettingsArgs,
    allow_degenerate: bool,
    dry_run: bool,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let params = settings.into_form(config).parse()?;
    tracing::debug!(?params, "parsed shake settings");

    let mut project =
        LoadedProject::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    let policy = if allow_degenerate {
        GeometryPolicy::Preserve
    } else {
        config.geometry_policy
    };

    let report = shake_selected(&mut project.project, &params, policy)?;

    println!("Shook '{}':", report.event);
    println!("  Keyframes: {}", report.keyframes);
    println!(
        "  Mode: {}",
        if report.regenerated {
            "regenerated one keyframe per frame"
        } else {
            "compounded onto existing keyframes"
        }
    );
    println!("  Max displacement: {:.2}px", report.max_displacement);

    if dry_run {
        println!("\nDry run: project not saved.");
        return Ok(());
    }

    project
        .save()
        .map_err(|e| anyhow::anyhow!("Failed to save project: {e}"))?;
    println!("\nSaved to: {}", project.path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> SettingsArgs {
        SettingsArgs {
            speed: None,
            sync: None,
            pixels: None,
            ratio: None,
            reset_pan: false,
            keep_frames: false,
        }
    }

    #[test]
    fn test_form_uses_config_defaults() {
        let mut config = AppConfig::default();
        config.shake.speed = 30.0;
        let params = empty_args().into_form(&config).parse().unwrap();
        assert_eq!(params.speed, 30.0);
        assert!(params.clear_existing_keyframes);
    }

    #[test]
    fn test_flags_override_config() {
        let args = SettingsArgs {
            pixels: Some("8".to_string()),
            keep_frames: true,
            reset_pan: true,
            ..empty_args()
        };
        let params = args.into_form(&AppConfig::default()).parse().unwrap();
        assert_eq!(params.amplitude, 8.0);
        assert!(!params.clear_existing_keyframes);
        assert!(params.reset_pan_on_first_frame);
    }

    fn scratch_project(name: &str, width: u32, height: u32) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("panshake_cli_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("project.json");
        LoadedProject::create(&path, name, width, height, 24).unwrap();
        path
    }

    #[test]
    fn test_bad_input_leaves_project_file_untouched() {
        let path = scratch_project("bad_input", 1920, 1080);
        let before = std::fs::read(&path).unwrap();

        let args = SettingsArgs {
            speed: Some("twelve".to_string()),
            ..empty_args()
        };
        let err = run(path.clone(), args, false, false, &AppConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter! shake speed: 'twelve' is not a valid number"
        );
        assert_eq!(std::fs::read(&path).unwrap(), before);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_rejected_geometry_leaves_project_file_untouched() {
        let path = scratch_project("tiny_frame", 16, 16);
        let before = std::fs::read(&path).unwrap();

        let err = run(path.clone(), empty_args(), false, false, &AppConfig::default()).unwrap_err();
        assert!(err.to_string().contains("keyframe 0"));
        assert_eq!(std::fs::read(&path).unwrap(), before);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_dry_run_does_not_save() {
        let path = scratch_project("dry_run", 1920, 1080);
        let before = std::fs::read(&path).unwrap();

        run(path.clone(), empty_args(), false, true, &AppConfig::default()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), before);

        run(path.clone(), empty_args(), false, false, &AppConfig::default()).unwrap();
        let saved = LoadedProject::load(&path).unwrap();
        assert_eq!(saved.project.find_selected().unwrap().motion.len(), 24);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
