use maud::{DOCTYPE, Markup, PreEscaped, html};
use plume::{
    SiteConfig, SortOrder, StaticPage,
    content::Document,
    model,
    templating::{format_date, generator, share_url, stylesheet},
    theme::Theme,
};

pub struct HungryTheme;

impl Theme for HungryTheme {
    fn index(&self, site: &SiteConfig, documents: &[&Document]) -> Markup {
        let newest_first = model::sort_by_date(documents.iter().copied(), SortOrder::Descending);
        let groups = model::group_by_year(newest_first);

        html! {
            (DOCTYPE)
            html lang=(site.language) {
                (head(site, &site.name, &["/primer.css"]))
                body {
                    (header(site))
                    (container(html! {
                        h3 { "Hi, this is my personal blog. I write about development on Apple platforms." }
                        h2 { "Posts" }
                        @for (year, documents) in &groups {
                            h3 { (year) }
                            @for document in documents {
                                p {
                                    a href=(document.url()) { (document.title) }
                                    " "
                                    span class="text-gray" { (format_date(&document.date)) }
                                }
                            }
                        }
                    }))
                    (footer())
                }
            }
        }
    }

    fn item(&self, site: &SiteConfig, document: &Document, body: &str) -> Markup {
        let title = format!("{} | {}", document.title, site.name);

        html! {
            (DOCTYPE)
            html lang=(site.language) {
                (head(site, &title, &["/primer.css", "/highlight.css"]))
                body {
                    (header(site))
                    (container(html! {
                        p class="text-gray" { (format_date(&document.date)) }
                        (PreEscaped(body))
                        p {
                            a href=(share_url(site, &document.title, &document.url())) {
                                "Share this post"
                            }
                        }
                    }))
                    (footer())
                }
            }
        }
    }

    fn page(&self, site: &SiteConfig, page: &StaticPage) -> Markup {
        let title = format!("{} | {}", page.title, site.name);

        html! {
            (DOCTYPE)
            html lang=(site.language) {
                (head(site, &title, &["/primer.css"]))
                body {
                    (header(site))
                    (container(html! { (PreEscaped(&page.body.0)) }))
                    (footer())
                }
            }
        }
    }
}

fn head(site: &SiteConfig, title: &str, stylesheets: &[&str]) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            title { (title) }
            meta name="description" content=(site.description);
            (generator())
            @for href in stylesheets {
                (stylesheet(href))
            }
        }
    }
}

fn container(content: Markup) -> Markup {
    html! {
        div class="container-lg px-3 my-5 markdown-body" {
            (content)
        }
    }
}

fn header(site: &SiteConfig) -> Markup {
    html! {
        header {
            div class="border-bottom border-gray-light" {
                div class="container-lg px-3 my-3 markdown-body" {
                    h3 {
                        a class="text-gray-dark no-underline" href="/" { (site.name) }
                    }
                }
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer {
            div class="container-lg px-3 my-5 markdown-body" {
                p {
                    "Generated using "
                    a href="https://github.com/plume-ssg/plume" { "Plume" }
                }
            }
        }
    }
}
