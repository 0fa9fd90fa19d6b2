//! Error types for Plume.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Rust uses the Debug trait to show errors when they're returned from main,
                    // but thiserror uses the Display trait. This redirects Debug to Display, essentially.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// Fatal errors raised while loading and parsing content. The run aborts and
/// the diagnostic names the offending file.
#[derive(Error)]
pub enum ContentError {
    #[error("Failed to read content file: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid front-matter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Invalid date `{value}` in {path}, expected `yyyy-MM-dd HH:mm`")]
    Date { path: PathBuf, value: String },
    #[error("Duplicate page path `{path}`, derived from {file}")]
    DuplicatePath { path: String, file: PathBuf },
    #[error("Invalid content pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error(transparent)]
    Enumeration(#[from] glob::GlobError),
}

/// Failures of the external syntax highlighter. Never fatal: the highlighting
/// modifier logs the error and falls back to unhighlighted output.
#[derive(Error)]
pub enum HighlightError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
    #[error("`{command}` did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
    #[error("I/O error while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors raised while writing the output tree.
#[derive(Error)]
pub enum EmitError {
    #[error("Failed to create output directory: {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write page file: {path}")]
    WritePage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read static directory: {path}")]
    ReadStatic {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy static file {from} to {to}")]
    CopyStatic {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write sitemap: {path}")]
    Sitemap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum PublishError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(ContentError, HighlightError, EmitError);
