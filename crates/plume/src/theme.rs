//! The seam between the pipeline and a site's visual theme.
use maud::Markup;

use crate::config::{SiteConfig, StaticPage};
use crate::content::Document;

/// A site theme: a pure mapping from the site and a page context to a full
/// HTML document.
///
/// Implementations must not perform I/O or depend on clocks; rendering the
/// same inputs twice must produce byte-identical markup.
pub trait Theme: Send + Sync {
    /// The listing page at the site root. `documents` is ordered according
    /// to the site's configured sort order; themes are free to re-sort or
    /// group through [`model`](crate::model).
    fn index(&self, site: &SiteConfig, documents: &[&Document]) -> Markup;

    /// A single document page. `body` is the document's converted HTML.
    fn item(&self, site: &SiteConfig, document: &Document, body: &str) -> Markup;

    /// A hand-authored static page.
    fn page(&self, site: &SiteConfig, page: &StaticPage) -> Markup;
}
