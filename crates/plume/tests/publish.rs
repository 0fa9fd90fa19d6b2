use std::fs;
use std::path::Path;
use std::time::Duration;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use plume::{
    BuildOptions, HighlightOptions, SiteConfig, SortOrder, StaticPage, model, publish,
    content::{Document, Modifiers, highlight_modifier},
    theme::Theme,
};
use tempfile::TempDir;

struct TestTheme;

impl Theme for TestTheme {
    fn index(&self, site: &SiteConfig, documents: &[&Document]) -> Markup {
        let newest_first = model::sort_by_date(documents.iter().copied(), SortOrder::Descending);
        let groups = model::group_by_year(newest_first);

        html! {
            (DOCTYPE)
            html lang=(site.language) {
                body {
                    h1 { (site.name) }
                    @for (year, documents) in &groups {
                        section {
                            h2 { (year) }
                            ul {
                                @for document in documents {
                                    li { a href=(document.url()) { (document.title) } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn item(&self, site: &SiteConfig, document: &Document, body: &str) -> Markup {
        html! {
            (DOCTYPE)
            html lang=(site.language) {
                body {
                    h1 { (document.title) }
                    (PreEscaped(body))
                }
            }
        }
    }

    fn page(&self, site: &SiteConfig, page: &StaticPage) -> Markup {
        html! {
            (DOCTYPE)
            html lang=(site.language) {
                body {
                    h1 { (page.title) }
                    (PreEscaped(&page.body.0))
                }
            }
        }
    }
}

fn write_post(posts_dir: &Path, file: &str, title: &str, date: &str, body: &str) {
    fs::write(
        posts_dir.join(file),
        format!("---\ntitle: {title}\ndate: {date}\ntags:\n  - post\n---\n\n{body}\n"),
    )
    .unwrap();
}

/// Three posts across two years, a static page, a stylesheet and a CNAME.
fn site_fixture() -> TempDir {
    let root = tempfile::tempdir().unwrap();

    let posts_dir = root.path().join("content/posts");
    fs::create_dir_all(&posts_dir).unwrap();
    write_post(
        &posts_dir,
        "older-post.md",
        "Older Post",
        "2019-06-01 10:00",
        "The first one.",
    );
    write_post(
        &posts_dir,
        "hello-world.md",
        "Hello World",
        "2020-01-15 09:30",
        "Some body.",
    );
    write_post(
        &posts_dir,
        "newest-post.md",
        "Newest Post",
        "2020-03-10 18:00",
        "The latest one.",
    );

    let static_dir = root.path().join("static");
    fs::create_dir_all(&static_dir).unwrap();
    fs::write(static_dir.join("CNAME"), "hungry.dev\n").unwrap();
    fs::write(static_dir.join("primer.css"), ".markdown-body {}\n").unwrap();

    root
}

fn site_config() -> SiteConfig {
    SiteConfig {
        name: "hungry.dev".to_string(),
        base_url: "https://hungry.dev".to_string(),
        description: "Personal blog.".to_string(),
        language: "en".to_string(),
        sort_order: SortOrder::Ascending,
        pages: vec![StaticPage {
            path: "apps".to_string(),
            title: "Apps".to_string(),
            body: html! { p { "Hand-authored content." } },
        }],
    }
}

fn build_options(root: &Path, output: &Path) -> BuildOptions {
    BuildOptions {
        content_dir: root.join("content"),
        output_dir: output.to_path_buf(),
        static_dir: root.join("static"),
        ..Default::default()
    }
}

#[test]
fn publishes_the_whole_site() {
    let root = site_fixture();
    let output_dir = root.path().join("dist");

    let output = publish(
        &site_config(),
        &TestTheme,
        &Modifiers::new(),
        &build_options(root.path(), &output_dir),
    )
    .unwrap();

    // Index, three posts, one static page.
    assert_eq!(output.pages.len(), 5);

    // Derived paths: lowercase, spaces to hyphens.
    assert!(output_dir.join("posts/hello-world/index.html").exists());
    assert!(output_dir.join("posts/older-post/index.html").exists());
    assert!(output_dir.join("posts/newest-post/index.html").exists());
    assert!(output_dir.join("apps/index.html").exists());

    // Static resources are copied verbatim.
    assert_eq!(
        fs::read_to_string(output_dir.join("CNAME")).unwrap(),
        "hungry.dev\n"
    );
    assert!(output_dir.join("primer.css").exists());

    // The sitemap enumerates every page URL.
    let sitemap = fs::read_to_string(output_dir.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://hungry.dev/</loc>"));
    assert!(sitemap.contains("<loc>https://hungry.dev/posts/hello-world/</loc>"));
    assert!(sitemap.contains("<loc>https://hungry.dev/apps/</loc>"));
    assert!(sitemap.contains("<lastmod>2020-01-15</lastmod>"));
}

#[test]
fn index_groups_posts_by_year_newest_first() {
    let root = site_fixture();
    let output_dir = root.path().join("dist");

    publish(
        &site_config(),
        &TestTheme,
        &Modifiers::new(),
        &build_options(root.path(), &output_dir),
    )
    .unwrap();

    let index = fs::read_to_string(output_dir.join("index.html")).unwrap();

    // Two year buckets, 2020 before 2019.
    let pos_2020 = index.find("<h2>2020</h2>").unwrap();
    let pos_2019 = index.find("<h2>2019</h2>").unwrap();
    assert!(pos_2020 < pos_2019);

    // Within 2020, the newest post comes first.
    let pos_newest = index.find("Newest Post").unwrap();
    let pos_hello = index.find("Hello World").unwrap();
    assert!(pos_newest < pos_hello);

    // Each item links to its derived path.
    assert!(index.contains("<a href=\"/posts/hello-world/\">Hello World</a>"));
}

#[test]
fn highlighter_failure_does_not_abort_the_build() {
    let root = site_fixture();
    let posts_dir = root.path().join("content/posts");
    write_post(
        &posts_dir,
        "with-code.md",
        "With Code",
        "2020-04-01 08:00",
        "```rust\nlet x = 1 < 2;\n```",
    );
    let output_dir = root.path().join("dist");

    let mut modifiers = Modifiers::new();
    modifiers.register(highlight_modifier(HighlightOptions {
        command: "plume-test-missing-highlighter".into(),
        timeout: Duration::from_secs(1),
    }));

    publish(
        &site_config(),
        &TestTheme,
        &modifiers,
        &build_options(root.path(), &output_dir),
    )
    .unwrap();

    let page = fs::read_to_string(output_dir.join("posts/with-code/index.html")).unwrap();
    assert!(page.contains("<pre><code>let x = 1 &lt; 2;</code></pre>"));
}

#[test]
fn republishing_produces_identical_output() {
    let root = site_fixture();
    let first_dir = root.path().join("dist-first");
    let second_dir = root.path().join("dist-second");

    publish(
        &site_config(),
        &TestTheme,
        &Modifiers::new(),
        &build_options(root.path(), &first_dir),
    )
    .unwrap();
    publish(
        &site_config(),
        &TestTheme,
        &Modifiers::new(),
        &build_options(root.path(), &second_dir),
    )
    .unwrap();

    for page in [
        "index.html",
        "posts/hello-world/index.html",
        "apps/index.html",
        "sitemap.xml",
    ] {
        assert_eq!(
            fs::read(first_dir.join(page)).unwrap(),
            fs::read(second_dir.join(page)).unwrap(),
            "{page} differs between runs"
        );
    }
}

#[test]
fn rendering_the_same_context_twice_is_idempotent() {
    let root = site_fixture();
    let documents = plume::content::load_documents(&root.path().join("content")).unwrap();
    let refs: Vec<&Document> = documents.iter().collect();
    let site = site_config();

    let first = TestTheme.index(&site, &refs).into_string();
    let second = TestTheme.index(&site, &refs).into_string();

    assert_eq!(first, second);
}
