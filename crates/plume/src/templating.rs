//! Maud helpers shared by themes.
use chrono::NaiveDateTime;
use maud::{Markup, html};

use crate::GENERATOR;
use crate::config::SiteConfig;

/// Can be used to create a generator tag in the output HTML. See
/// [`GENERATOR`](crate::GENERATOR).
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

/// Stylesheet link for the document head.
pub fn stylesheet(href: &str) -> Markup {
    html! {
        link rel="stylesheet" type="text/css" href=(href);
    }
}

/// Formats a publication date for display, e.g. `January 26, 2020`.
///
/// The month names are always English, regardless of the host locale, since
/// post dates are authored and displayed in a single fixed locale.
pub fn format_date(date: &NaiveDateTime) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Builds a share link for a page from its title and site-absolute path,
/// query-encoding both.
pub fn share_url(site: &SiteConfig, title: &str, path: &str) -> String {
    let canonical = format!("{}{}", site.base_url.trim_end_matches('/'), path);
    format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        urlencoding::encode(title),
        urlencoding::encode(&canonical)
    )
}
