//! Configuration surface of the pipeline. All values are fixed at build time
//! and passed to [`publish()`](crate::publish); there are no runtime flags.
use std::path::PathBuf;
use std::time::Duration;

use maud::Markup;

use crate::sitemap::SitemapOptions;

/// Ordering applied to documents by the site model, see
/// [`model::sort_by_date`](crate::model::sort_by_date).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// A hand-authored page that is not backed by a Markdown document, such as an
/// "apps" page. The body is already-rendered markup.
pub struct StaticPage {
    /// Path of the page under the site root, e.g. `apps` for `/apps/`.
    pub path: String,
    pub title: String,
    pub body: Markup,
}

/// Site-level metadata and the set of hand-authored pages.
///
/// Exactly one `SiteConfig` exists per run and it is immutable once the build
/// starts.
pub struct SiteConfig {
    /// Display name of the site, e.g. `hungry.dev`.
    pub name: String,
    /// Base URL used for canonical links and the sitemap, e.g.
    /// `https://hungry.dev`.
    pub base_url: String,
    pub description: String,
    /// BCP 47 language tag emitted on the `<html>` element.
    pub language: String,
    /// Order in which documents are handed to the theme's listing page.
    pub sort_order: SortOrder,
    pub pages: Vec<StaticPage>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_url: String::new(),
            description: String::new(),
            language: "en".to_string(),
            sort_order: SortOrder::Ascending,
            pages: vec![],
        }
    }
}

/// Options for the external syntax highlighter used by
/// [`highlight_modifier`](crate::content::highlight_modifier).
#[derive(Debug, Clone)]
pub struct HighlightOptions {
    /// Path to the highlighter binary. By default `pygmentize`, which assumes
    /// you have it installed and that it is in your `PATH`.
    ///
    /// The binary must accept code on stdin and support
    /// `-l <lang> -f html -O nowrap`.
    pub command: PathBuf,
    /// How long a single highlighting call may run before the process is
    /// killed and the call is treated as a failure.
    pub timeout: Duration,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            command: "pygmentize".into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Plume build options. Should be passed to [`publish()`](crate::publish).
///
/// ## Example
/// ```rs
/// use plume::BuildOptions;
///
/// let options = BuildOptions {
///     output_dir: "public".into(),
///     ..Default::default()
/// };
/// ```
pub struct BuildOptions {
    /// Root directory of the Markdown content. Documents are loaded from
    /// `<content_dir>/<section>/*.md`.
    pub content_dir: PathBuf,

    pub output_dir: PathBuf,
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before building.
    pub clean_output_dir: bool,

    /// Options for sitemap generation. See [`SitemapOptions`] for configuration.
    pub sitemap: SitemapOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            content_dir: "content".into(),
            output_dir: "dist".into(),
            static_dir: "static".into(),
            clean_output_dir: true,
            sitemap: SitemapOptions::default(),
        }
    }
}
