//! Icon generation driver
//!
//! Walks the fixed size list, renders each icon and writes it into the
//! extension's `icons/` directory.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::font::{self, FontError};
use crate::icon;

/// Icon edge lengths required by the extension manifest.
pub const SIZES: [u32; 3] = [16, 48, 128];

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("Failed to create output directory: {0}")]
    CreateDir(io::Error),
    #[error("Could not allocate a {0}x{0} canvas")]
    Render(u32),
    #[error("Failed to save {}: {}", .path.display(), .source)]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// `icons/` one level above this crate, next to the extension manifest.
pub fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("icons")
}

/// Generate the full icon set into `out_dir`.
///
/// The directory is created first, then the font search runs; a missing
/// font aborts before any icon is written. Once a candidate is chosen the
/// run always completes: per-size load problems degrade to the fallback
/// glyph inside the renderer.
pub fn run(out_dir: &Path) -> Result<(), GenerateError> {
    std::fs::create_dir_all(out_dir).map_err(GenerateError::CreateDir)?;

    let font_path = font::find_font()?;
    println!("Using font: {}", font_path.display());

    run_with_font(out_dir, &font_path)
}

/// Render and write every size in `SIZES` using the font at `font_path`,
/// overwriting existing files. `out_dir` must exist.
pub fn run_with_font(out_dir: &Path, font_path: &Path) -> Result<(), GenerateError> {
    for &size in SIZES.iter() {
        let img =
            icon::render_icon(size, icon::GLYPH, font_path).ok_or(GenerateError::Render(size))?;
        let out_path = out_dir.join(format!("icon{}.png", size));
        img.save(&out_path).map_err(|source| GenerateError::Save {
            path: out_path.clone(),
            source,
        })?;
        println!("Generated: {}", out_path.display());
    }

    println!();
    println!("Done! Icons generated successfully.");
    Ok(())
}
