//! Locating and loading Go source files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Expands `inputs` into a sorted, deduplicated list of files. Directories
/// contribute every `.go` file beneath them; files are taken as given.
pub fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = go_files_under(input)?;
            debug!(dir = %input.display(), files = found.len(), "expanded directory");
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("no such file or directory: {}", input.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn go_files_under(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = dir
        .to_str()
        .with_context(|| format!("path is not valid UTF-8: {}", dir.display()))?;
    let pattern = format!("{}/**/*.go", glob::Pattern::escape(root));

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
        let path = entry.context("failed to walk source directory")?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}
