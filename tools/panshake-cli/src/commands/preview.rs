//! Print the shake transform sequence without touching a project.

use panshake_common::AppConfig;
use panshake_project_model::MotionBounds;
use panshake_shake_core::generate;
use panshake_shake_core::preview::{ellipse_extent, preview_motion};
use serde::Serialize;

use super::shake::SettingsArgs;

#[derive(Serialize)]
struct PreviewRow {
    frame: u64,
    dx: f64,
    dy: f64,
    scale_x: f64,
    scale_y: f64,
    css: String,
}

pub fn run(
    settings: SettingsArgs,
    frames: u64,
    width: u32,
    height: u32,
    json: bool,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let params = settings.into_form(config).parse()?;
    let bounds = MotionBounds::full_frame(width as f64, height as f64);
    let sequence = generate(frames, &params, &bounds);

    let rows: Vec<PreviewRow> = sequence
        .clone()
        .zip(preview_motion(sequence.clone(), &bounds))
        .map(|(t, p)| PreviewRow {
            frame: t.frame,
            dx: t.translation.x,
            dy: t.translation.y,
            scale_x: t.scale.x,
            scale_y: t.scale.y,
            css: p.css_transform(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let scale = sequence.scale();
    let (mx, my) = ellipse_extent(sequence);
    println!("Preview for {width}x{height}, {frames} frames:");
    println!("  Scale: {:.5} x {:.5}", scale.x, scale.y);
    println!("  Extent: ±{mx:.2}px horizontal, ±{my:.2}px vertical");
    println!();
    for row in &rows {
        println!(
            "  {:>6}  dx={:>8.3}  dy={:>8.3}  {}",
            row.frame, row.dx, row.dy, row.css
        );
    }

    Ok(())
}
