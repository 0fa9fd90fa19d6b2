mod pages;
mod theme;

use std::time::Duration;

use plume::{
    BuildOptions, BuildOutput, HighlightOptions, PublishError, SiteConfig, SortOrder,
    content::{Modifiers, highlight_modifier},
    publish,
};

use theme::HungryTheme;

fn main() -> Result<BuildOutput, PublishError> {
    let site = SiteConfig {
        name: "hungry.dev".to_string(),
        base_url: "https://hungry.dev".to_string(),
        description: "Personal blog.".to_string(),
        language: "en".to_string(),
        sort_order: SortOrder::Ascending,
        pages: pages::static_pages(),
    };

    let mut modifiers = Modifiers::new();
    modifiers.register(highlight_modifier(HighlightOptions {
        command: "/usr/local/bin/pygmentize".into(),
        timeout: Duration::from_secs(10),
    }));

    publish(&site, &HungryTheme, &modifiers, &BuildOptions::default())
}
