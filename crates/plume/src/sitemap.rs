//! Sitemap generation for the published site.
use std::fs;
use std::path::Path;

use crate::errors::EmitError;

/// Options for sitemap generation.
#[derive(Debug, Clone)]
pub struct SitemapOptions {
    /// Whether to generate a sitemap. Default: `true`
    pub enabled: bool,
    /// The filename for the sitemap. Default: `"sitemap.xml"`
    pub filename: String,
}

impl Default for SitemapOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            filename: "sitemap.xml".to_string(),
        }
    }
}

/// Represents a single URL entry in the sitemap.
#[derive(Debug)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
}

impl SitemapEntry {
    fn to_xml(&self) -> String {
        let mut xml = String::from("<url>");
        xml.push_str(&format!("<loc>{}</loc>", escape_xml(&self.loc)));

        if let Some(ref lastmod) = self.lastmod {
            xml.push_str(&format!("<lastmod>{}</lastmod>", lastmod));
        }

        xml.push_str("</url>");
        xml
    }
}

/// Escapes XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Writes a sitemap enumerating every page URL. Entries are sorted by URL so
/// the output is deterministic regardless of generation order.
pub fn generate_sitemap(
    entries: Vec<SitemapEntry>,
    output_dir: &Path,
    options: &SitemapOptions,
) -> Result<(), EmitError> {
    if !options.enabled || entries.is_empty() {
        return Ok(());
    }

    let mut sorted_entries = entries;
    sorted_entries.sort_by(|a, b| a.loc.cmp(&b.loc));

    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">");
    for entry in &sorted_entries {
        xml.push_str(&entry.to_xml());
    }
    xml.push_str("</urlset>\n");

    let path = output_dir.join(&options.filename);
    fs::write(&path, xml).map_err(|source| EmitError::Sitemap {
        path: path.clone(),
        source,
    })?;

    log::info!(
        target: "sitemap",
        "Generated sitemap with {} URLs at {}",
        sorted_entries.len(),
        path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_xml_special_characters() {
        assert_eq!(
            escape_xml("https://example.com/?a=1&b=<2>"),
            "https://example.com/?a=1&amp;b=&lt;2&gt;"
        );
    }

    #[test]
    fn entry_includes_optional_lastmod() {
        let entry = SitemapEntry {
            loc: "https://hungry.dev/posts/hello-world/".to_string(),
            lastmod: Some("2020-01-26".to_string()),
        };

        assert_eq!(
            entry.to_xml(),
            "<url><loc>https://hungry.dev/posts/hello-world/</loc><lastmod>2020-01-26</lastmod></url>"
        );
    }

    #[test]
    fn entries_are_sorted_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            SitemapEntry {
                loc: "https://hungry.dev/b/".to_string(),
                lastmod: None,
            },
            SitemapEntry {
                loc: "https://hungry.dev/a/".to_string(),
                lastmod: None,
            },
        ];

        generate_sitemap(entries, dir.path(), &SitemapOptions::default()).unwrap();

        let xml = std::fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
        let a = xml.find("https://hungry.dev/a/").unwrap();
        let b = xml.find("https://hungry.dev/b/").unwrap();
        assert!(a < b);
    }
}
