//! Font loading utilities for the report renderer.
//!
//! `genpdf` renders from TTF data, so the crate bundles two families
//! under `assets/fonts`: Roboto for banner and section titles and
//! Roboto Mono for listings, transcripts and their labels.  The search
//! order is the `OS_LAB_REPORT_FONTS_DIR` environment variable, then an
//! `assets/fonts` directory next to the executable, then the
//! manifest-relative `assets/fonts` directory.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled proportional font family.
pub const TEXT_FONT_FAMILY_NAME: &str = "Roboto";

/// Name of the bundled monospace font family.
pub const MONO_FONT_FAMILY_NAME: &str = "RobotoMono";

const FONTS_DIR_ENV: &str = "OS_LAB_REPORT_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
    "RobotoMono-Regular.ttf",
    "RobotoMono-Bold.ttf",
    "RobotoMono-Italic.ttf",
    "RobotoMono-BoldItalic.ttf",
];

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(path) = env::var(FONTS_DIR_ENV) {
        if !path.trim().is_empty() {
            candidates.push(PathBuf::from(path));
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.iter().any(|existing| existing == &candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates
        .iter()
        .any(|existing| existing == &manifest_candidate)
    {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            debug!("Loading bundled fonts from {}", candidate.display());
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    if env::var_os(FONTS_DIR_ENV).is_some() {
        warn!("{} is set but does not point at a usable font directory", FONTS_DIR_ENV);
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate bundled font directory. Checked: {}. See assets/fonts/README.md or set {}.",
            summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_family(directory: &Path, family_name: &str) -> Result<FontFamily<FontData>, Error> {
    fonts::from_files(directory, family_name, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family_name,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

/// Returns the bundled Roboto font family used for banner and titles.
pub fn text_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;
    load_family(&directory, TEXT_FONT_FAMILY_NAME)
}

/// Returns the bundled Roboto Mono font family used for listings and transcripts.
pub fn monospace_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;
    load_family(&directory, MONO_FONT_FAMILY_NAME)
}

/// Indicates whether all bundled font files are present on disk.
pub fn fonts_available() -> bool {
    resolve_font_directory().is_ok()
}
