//! Content loading: Markdown documents with front-matter metadata.
//!
//! Documents live under `<content_dir>/<section>/*.md`, carry a YAML
//! front-matter block (`title`, `date`, optional `tags`) and are immutable
//! once loaded.
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use glob::glob;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use rustc_hash::FxHashMap;
use serde::Deserialize;

pub mod highlight;
pub mod markdown;

pub use highlight::highlight_modifier;
pub use markdown::{FragmentKind, Modifier, Modifiers, render_markdown};

use crate::errors::ContentError;

/// Post dates are authored as `2020-01-26 17:30`.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Deserialize)]
struct Frontmatter {
    title: String,
    date: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// A single source Markdown file.
///
/// The URL path is derived from the title (lowercase, spaces to hyphens) and
/// must be unique across the whole site.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub date: NaiveDateTime,
    pub tags: Vec<String>,
    /// Name of the parent directory under the content root, e.g. `posts`.
    pub section: String,
    /// Slug of this document under its section, e.g. `hello-world`.
    pub path: String,
    /// Source file the document was loaded from, for diagnostics.
    pub file_path: PathBuf,
    /// The raw Markdown source, front-matter included.
    pub source: String,
}

impl Document {
    /// Site-absolute URL path of this document, e.g. `/posts/hello-world/`.
    pub fn url(&self) -> String {
        format!("/{}/{}/", self.section, self.path)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Loads every document under `<content_dir>/<section>/*.md`.
///
/// Enumeration order is alphabetical per directory, which makes load order
/// deterministic. Any missing or malformed front-matter aborts the load with
/// an error naming the offending file.
pub fn load_documents(content_dir: &Path) -> Result<Vec<Document>, ContentError> {
    let pattern = content_dir.join("*/*.md");
    let mut documents: Vec<Document> = Vec::new();
    let mut seen_paths: FxHashMap<String, PathBuf> = FxHashMap::default();

    for entry in glob(&pattern.to_string_lossy())? {
        let file = entry?;
        let source =
            std::fs::read_to_string(&file).map_err(|source| ContentError::Unreadable {
                path: file.clone(),
                source,
            })?;

        let document = parse_document(&file, source)?;

        if let Some(previous) = seen_paths.insert(document.url(), file.clone()) {
            return Err(ContentError::DuplicatePath {
                path: document.url(),
                file: previous,
            });
        }

        documents.push(document);
    }

    Ok(documents)
}

/// Parses one source file into a [`Document`].
///
/// The front-matter is collected from the Markdown parser's metadata events
/// and deserialized as YAML, so the body never has to be split by hand.
pub(crate) fn parse_document(file: &Path, source: String) -> Result<Document, ContentError> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut frontmatter = String::new();
    let mut in_frontmatter = false;

    for event in Parser::new_ext(&source, options) {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => in_frontmatter = true,
            // Front-matter can only appear at the very top, no need to keep parsing.
            Event::End(TagEnd::MetadataBlock(_)) => break,
            Event::Text(ref text) if in_frontmatter => frontmatter.push_str(text),
            _ => {}
        }
    }

    let parsed: Frontmatter =
        serde_yaml::from_str(&frontmatter).map_err(|source| ContentError::Frontmatter {
            path: file.to_path_buf(),
            source,
        })?;

    let date = NaiveDateTime::parse_from_str(parsed.date.trim(), DATE_FORMAT).map_err(|_| {
        ContentError::Date {
            path: file.to_path_buf(),
            value: parsed.date.clone(),
        }
    })?;

    let section = file
        .parent()
        .and_then(|parent| parent.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let path = slug::slugify(&parsed.title);

    Ok(Document {
        title: parsed.title,
        date,
        tags: parsed.tags,
        section,
        path,
        file_path: file.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_file() -> PathBuf {
        PathBuf::from("content/posts/hello-world.md")
    }

    #[test]
    fn parses_frontmatter_and_derives_path() {
        let source = "---\ntitle: Hello World\ndate: 2020-01-26 17:30\ntags:\n  - post\n---\n\nSome body.\n";
        let document = parse_document(&post_file(), source.to_string()).unwrap();

        assert_eq!(document.title, "Hello World");
        assert_eq!(document.path, "hello-world");
        assert_eq!(document.section, "posts");
        assert_eq!(document.url(), "/posts/hello-world/");
        assert_eq!(document.tags, vec!["post".to_string()]);
        assert_eq!(
            document.date,
            NaiveDateTime::parse_from_str("2020-01-26 17:30", DATE_FORMAT).unwrap()
        );
    }

    #[test]
    fn missing_frontmatter_is_an_error() {
        let source = "Just a body, no front-matter.\n";
        let result = parse_document(&post_file(), source.to_string());

        assert!(matches!(result, Err(ContentError::Frontmatter { .. })));
    }

    #[test]
    fn missing_date_is_an_error() {
        let source = "---\ntitle: Hello World\n---\n\nBody.\n";
        let result = parse_document(&post_file(), source.to_string());

        assert!(matches!(result, Err(ContentError::Frontmatter { .. })));
    }

    #[test]
    fn unparseable_date_is_an_error() {
        let source = "---\ntitle: Hello World\ndate: January 26th\n---\n\nBody.\n";
        let result = parse_document(&post_file(), source.to_string());

        match result {
            Err(ContentError::Date { value, .. }) => assert_eq!(value, "January 26th"),
            other => panic!("expected a date error, got {:?}", other.map(|d| d.title)),
        }
    }

    #[test]
    fn tags_default_to_empty() {
        let source = "---\ntitle: Untagged\ndate: 2019-06-01 08:00\n---\n\nBody.\n";
        let document = parse_document(&post_file(), source.to_string()).unwrap();

        assert!(document.tags.is_empty());
        assert!(!document.has_tag("post"));
    }
}
