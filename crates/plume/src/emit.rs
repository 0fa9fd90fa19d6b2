//! Serialization of rendered pages and static resources to the output tree.
//!
//! Any filesystem failure here is fatal; an aborted run leaves the output
//! directory in an undefined state and callers should re-run from scratch.
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Termination;
use std::time::Instant;

use crate::errors::EmitError;

/// Metadata returned by [`publish()`](crate::publish) for a single page after
/// a successful build.
#[derive(Debug)]
pub struct PageOutput {
    pub url: String,
    pub file_path: PathBuf,
}

/// Metadata returned by [`publish()`](crate::publish) for a single static
/// file after a successful build.
///
/// A static file is copied to the output directory without any processing.
#[derive(Debug)]
pub struct StaticFileOutput {
    pub file_path: PathBuf,
    pub original_path: PathBuf,
}

/// Metadata returned by [`publish()`](crate::publish) after a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    pub start_time: Instant,
    pub pages: Vec<PageOutput>,
    pub static_files: Vec<StaticFileOutput>,
}

impl BuildOutput {
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            pages: Vec::new(),
            static_files: Vec::new(),
        }
    }

    pub(crate) fn add_page(&mut self, url: String, file_path: PathBuf) {
        self.pages.push(PageOutput { url, file_path });
    }

    pub(crate) fn add_static_file(&mut self, file_path: PathBuf, original_path: PathBuf) {
        self.static_files.push(StaticFileOutput {
            file_path,
            original_path,
        });
    }
}

impl Default for BuildOutput {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Termination for BuildOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}

/// Maps a site-absolute URL path to its file path under the output root:
/// `/` becomes `index.html`, `/posts/x/` becomes `posts/x/index.html`.
pub(crate) fn page_file_path(output_dir: &Path, url: &str) -> PathBuf {
    let trimmed = url.trim_matches('/');
    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}

pub(crate) fn write_page(
    output_dir: &Path,
    url: &str,
    html: &str,
    output: &mut BuildOutput,
) -> Result<PathBuf, EmitError> {
    let file_path = page_file_path(output_dir, url);

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).map_err(|source| EmitError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&file_path, html).map_err(|source| EmitError::WritePage {
        path: file_path.clone(),
        source,
    })?;

    output.add_page(url.to_string(), file_path.clone());

    Ok(file_path)
}

/// Copies the static directory verbatim into the output directory.
pub(crate) fn copy_static(
    source: &Path,
    destination: &Path,
    output: &mut BuildOutput,
) -> Result<(), EmitError> {
    fs::create_dir_all(destination).map_err(|error| EmitError::CreateDir {
        path: destination.to_path_buf(),
        source: error,
    })?;

    let entries = fs::read_dir(source).map_err(|error| EmitError::ReadStatic {
        path: source.to_path_buf(),
        source: error,
    })?;

    for entry in entries {
        let entry = entry.map_err(|error| EmitError::ReadStatic {
            path: source.to_path_buf(),
            source: error,
        })?;
        let file_type = entry.file_type().map_err(|error| EmitError::ReadStatic {
            path: entry.path(),
            source: error,
        })?;

        let target = destination.join(entry.file_name());
        if file_type.is_dir() {
            copy_static(&entry.path(), &target, output)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|error| EmitError::CopyStatic {
                from: entry.path(),
                to: target.clone(),
                source: error,
            })?;

            output.add_static_file(target, entry.path());
        }
    }

    Ok(())
}
