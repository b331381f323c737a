use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

/// Expands tilde in path to home directory
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(path_str) = path.to_str() else {
        return Ok(path.to_path_buf());
    };

    if path_str == "~" {
        return dirs::home_dir().context("Could not find home directory");
    }
    if let Some(rest) = path_str.strip_prefix("~/") {
        let home = dirs::home_dir().context("Could not find home directory")?;
        return Ok(home.join(rest));
    }
    Ok(path.to_path_buf())
}

/// Turns user input into the root path a snapshot is keyed by.
///
/// Expands `~`, makes the path absolute against the current directory and
/// drops `.` components and trailing separators, so `~/src/` and
/// `/home/me/src` name the same root. Symbolic links are not resolved.
///
/// # Errors
///
/// Returns an error if the input is empty or the current directory or home
/// directory cannot be determined
pub fn normalize_root(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Path cannot be empty");
    }

    let expanded = expand_tilde(Path::new(trimmed))?;
    let absolute = std::path::absolute(&expanded)
        .with_context(|| format!("Failed to resolve path: {}", expanded.display()))?;

    Ok(absolute
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect())
}
