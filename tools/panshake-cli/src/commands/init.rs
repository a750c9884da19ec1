//! Initialize a new PanShake project file.

use std::path::PathBuf;

use panshake_project_model::LoadedProject;

pub fn run(path: PathBuf, name: String, width: u32, height: u32, frames: u64) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        anyhow::bail!("Resolution must be non-zero, got {width}x{height}");
    }
    if path.exists() {
        anyhow::bail!("Refusing to overwrite existing file: {}", path.display());
    }

    println!("Creating project '{}' at {}", name, path.display());

    let project = LoadedProject::create(&path, &name, width, height, frames)
        .map_err(|e| anyhow::anyhow!("Failed to create project: {e}"))?;

    println!("Project created successfully:");
    println!("  File: {}", project.path.display());
    println!("  Clip: clip-1 (selected)");
    println!("  Resolution: {}x{}", width, height);
    println!("  Length: {} frames", frames);

    Ok(())
}
