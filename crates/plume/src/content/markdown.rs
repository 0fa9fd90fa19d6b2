//! Markdown to HTML conversion with a chain of content modifiers.
//!
//! During conversion, fragments of certain kinds (currently code blocks) are
//! intercepted and offered to registered [`Modifier`]s together with their
//! original Markdown source.
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use rustc_hash::FxHashMap;

/// Classification of an HTML fragment produced during Markdown conversion,
/// used to target modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    CodeBlock,
}

type ModifierFn = Box<dyn Fn(&str, &str) -> String + Send + Sync>;

/// A named transformation applied to rendered fragments of one kind.
///
/// The closure receives the fragment as originally rendered and the exact
/// Markdown source of the fragment (for code blocks, fence lines included)
/// and returns the replacement HTML.
pub struct Modifier {
    pub name: String,
    pub target: FragmentKind,
    apply: ModifierFn,
}

impl Modifier {
    pub fn new(
        name: impl Into<String>,
        target: FragmentKind,
        apply: impl Fn(&str, &str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            target,
            apply: Box::new(apply),
        }
    }

    pub fn apply(&self, html: &str, source: &str) -> String {
        (self.apply)(html, source)
    }
}

/// Registry of [`Modifier`]s, keyed by fragment kind in registration order.
///
/// Modifiers for the same kind are independent: each one receives the
/// fragment as originally rendered, not the previous modifier's output, and
/// the last registered modifier's output replaces the fragment. Chaining has
/// to be composed deliberately inside a single modifier.
#[derive(Default)]
pub struct Modifiers {
    by_kind: FxHashMap<FragmentKind, Vec<Modifier>>,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, modifier: Modifier) {
        self.by_kind.entry(modifier.target).or_default().push(modifier);
    }

    pub fn for_kind(&self, kind: FragmentKind) -> &[Modifier] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Converts a document body to an HTML fragment, skipping the front-matter
/// block and running registered modifiers on intercepted fragments.
pub fn render_markdown(source: &str, modifiers: &Modifiers) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut in_frontmatter = false;
    // Range of the code block currently being collected, covering the whole
    // block in `source`, fences included.
    let mut code_block: Option<std::ops::Range<usize>> = None;
    let mut code_block_content = String::new();
    let mut events = Vec::new();

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        match event {
            Event::Start(Tag::MetadataBlock(_)) => in_frontmatter = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_frontmatter = false,
            Event::Text(ref text) => {
                if in_frontmatter {
                    continue;
                }
                if code_block.is_some() {
                    code_block_content.push_str(text);
                } else {
                    events.push(event);
                }
            }
            Event::Start(Tag::CodeBlock(_)) => {
                code_block = Some(range);
                code_block_content.clear();
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(range) = code_block.take() {
                    let fragment = code_fragment(&code_block_content);
                    let block_source = &source[range];

                    let mut html = fragment.clone();
                    for modifier in modifiers.for_kind(FragmentKind::CodeBlock) {
                        html = modifier.apply(&fragment, block_source);
                    }

                    events.push(Event::Html(html.into()));
                    events.push(Event::Html("\n".into()));
                }
                code_block_content.clear();
            }
            _ => events.push(event),
        }
    }

    let mut html_output = String::new();
    pulldown_cmark::html::push_html(&mut html_output, events.into_iter());
    html_output
}

/// The default rendering of a code block; an empty block renders as
/// `<pre><code></code></pre>`.
fn code_fragment(code: &str) -> String {
    format!("<pre><code>{}</code></pre>", escape_html(code))
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_basic_markdown() {
        let html = render_markdown("# Hello\n\nA *paragraph* with a [link](/posts/).\n", &Modifiers::new());

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<em>paragraph</em>"));
        assert!(html.contains("<a href=\"/posts/\">link</a>"));
    }

    #[test]
    fn skips_frontmatter() {
        let html = render_markdown(
            "---\ntitle: Hello\ndate: 2020-01-26 17:30\n---\n\nBody only.\n",
            &Modifiers::new(),
        );

        assert!(!html.contains("2020-01-26"));
        assert!(html.contains("<p>Body only.</p>"));
    }

    #[test]
    fn code_block_renders_escaped_by_default() {
        let html = render_markdown("```\nlet x = 1 < 2;\n```\n", &Modifiers::new());

        assert!(html.contains("<pre><code>let x = 1 &lt; 2;\n</code></pre>"));
    }

    #[test]
    fn empty_code_block_renders_empty_element() {
        let html = render_markdown("```\n```\n", &Modifiers::new());

        assert!(html.contains("<pre><code></code></pre>"));
    }

    #[test]
    fn modifier_receives_fragment_and_block_source() {
        let mut modifiers = Modifiers::new();
        modifiers.register(Modifier::new(
            "recorder",
            FragmentKind::CodeBlock,
            |html, source| format!("HTML[{html}] SOURCE[{source}]"),
        ));

        let html = render_markdown("```go\nfmt.Println(1)\n```\n", &modifiers);

        assert!(html.contains("HTML[<pre><code>fmt.Println(1)\n</code></pre>]"));
        assert!(html.contains("SOURCE[```go\nfmt.Println(1)\n```"));
    }

    #[test]
    fn modifiers_for_one_kind_are_independent() {
        let mut modifiers = Modifiers::new();
        modifiers.register(Modifier::new("first", FragmentKind::CodeBlock, |_, _| {
            "FIRST".to_string()
        }));
        modifiers.register(Modifier::new(
            "second",
            FragmentKind::CodeBlock,
            |html, _| format!("SECOND[{html}]"),
        ));

        let html = render_markdown("```\nx\n```\n", &modifiers);

        // The second modifier sees the original fragment, not "FIRST",
        // and its output is the one kept.
        assert!(html.contains("SECOND[<pre><code>x\n</code></pre>]"));
        assert!(!html.contains("FIRST"));
    }

    #[test]
    fn inline_code_is_untouched() {
        let html = render_markdown("Call `f(x)` now.\n", &Modifiers::new());

        assert!(html.contains("<code>f(x)</code>"));
    }
}
