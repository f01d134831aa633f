//! System font discovery
//!
//! The icon glyph is a kanji, so rendering needs a font with CJK coverage.
//! Rather than walking a font database, this scans a fixed list of
//! well-known install locations (macOS, then Linux, then Windows) and takes
//! the first file that exists.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Candidate font files, in search priority order.
const FONT_CANDIDATES: &[&str] = &[
    // macOS
    "/System/Library/Fonts/ヒラギノ角ゴシック W6.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    // Linux
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    // Windows
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("No Japanese font found. Install a CJK font like Noto Sans CJK.")]
    NotFound,
    #[error("Failed to read font file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse font file {}: {}", .path.display(), .reason)]
    Parse { path: PathBuf, reason: String },
}

/// Find a Japanese-capable font on this system.
///
/// Existence check only; whether the file is actually a usable font is
/// decided later when it is parsed. No substitute is picked automatically,
/// the caller chooses how to degrade or abort.
pub fn find_font() -> Result<PathBuf, FontError> {
    first_existing(FONT_CANDIDATES).ok_or(FontError::NotFound)
}

/// First path in `candidates` that exists, in iteration order.
pub fn first_existing<I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    candidates
        .into_iter()
        .map(|c| c.as_ref().to_path_buf())
        .find(|p| p.exists())
}

/// A font file loaded into memory.
#[derive(Debug)]
pub struct FontData {
    path: PathBuf,
    data: Vec<u8>,
}

impl FontData {
    /// Read the font file at `path` into memory.
    pub fn load(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Parse the first face in the file. Collections (`.ttc`) resolve to
    /// face index 0.
    pub fn face(&self) -> Result<ttf_parser::Face<'_>, FontError> {
        ttf_parser::Face::parse(&self.data, 0).map_err(|e| FontError::Parse {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}
