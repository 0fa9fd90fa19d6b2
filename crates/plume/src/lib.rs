//! 🪶 Plume publishes a folder of Markdown posts as a themed static website.
//!
//! The pipeline is a single deterministic pass: load documents, convert
//! Markdown to HTML (with content modifiers such as syntax highlighting),
//! render every page through the site's [`Theme`](theme::Theme), and write
//! the output tree along with static resources and a sitemap.

// Modules the end-user will interact directly or indirectly with
pub mod config;
pub mod content;
pub mod emit;
pub mod errors;
pub mod model;
pub mod sitemap;
pub mod templating;
pub mod theme;

// Internal modules
mod build;
mod logging;

// Exports for end-users
pub use config::{BuildOptions, HighlightOptions, SiteConfig, SortOrder, StaticPage};
pub use emit::{BuildOutput, PageOutput, StaticFileOutput};
pub use errors::PublishError;
pub use sitemap::SitemapOptions;

/// The version of Plume being used.
///
/// Can be used to create a generator tag in the output HTML, see
/// [`templating::generator`].
pub const GENERATOR: &str = concat!("Plume v", env!("CARGO_PKG_VERSION"));

/// 🪶 Plume entrypoint. Runs the whole pipeline and generates the output files.
///
/// ## Example
/// Should be called from the main function of the binary crate.
/// ```rs
/// use plume::{BuildOptions, BuildOutput, PublishError, SiteConfig, publish};
/// use plume::content::Modifiers;
/// # use plume::theme::Theme;
/// # struct MyTheme;
/// # impl Theme for MyTheme { /* ... */ }
///
/// fn main() -> Result<BuildOutput, PublishError> {
///     publish(
///         &SiteConfig::default(),
///         &MyTheme,
///         &Modifiers::new(),
///         &BuildOptions::default(),
///     )
/// }
/// ```
pub fn publish(
    site: &SiteConfig,
    theme: &dyn theme::Theme,
    modifiers: &content::Modifiers,
    options: &BuildOptions,
) -> Result<BuildOutput, PublishError> {
    logging::init_logging();

    build::build(site, theme, modifiers, options)
}
