//! Show project information.

use std::path::PathBuf;

use panshake_project_model::LoadedProject;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let project =
        LoadedProject::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    let p = &project.project;

    println!("Project: {}", p.name);
    println!("  Version: {}", p.version);
    println!("  Modified: {}", p.modified_at);
    println!();

    println!("Tracks:");
    for track in &p.tracks {
        println!("  {} ({:?}, {} events)", track.name, track.kind, track.events.len());
        for event in &track.events {
            let marker = if event.selected { "*" } else { " " };
            println!(
                "   {marker} {}: {} frames, {}x{}, {} keyframes",
                event.name,
                event.length_frames,
                event.media.width,
                event.media.height,
                event.motion.len()
            );
        }
    }
    println!();

    match p.find_selected() {
        Some(event) => {
            println!("Selected: {}", event.name);
            if let Some(first) = event.motion.keyframes.first() {
                let b = first.bounds;
                println!(
                    "  First keyframe: {:.2}x{:.2} centered at ({:.2}, {:.2})",
                    b.width(),
                    b.height(),
                    b.center().x,
                    b.center().y
                );
            }
        }
        None => println!("Selected: none"),
    }

    Ok(())
}
