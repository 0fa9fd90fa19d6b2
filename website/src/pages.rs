use maud::html;
use plume::StaticPage;

pub fn static_pages() -> Vec<StaticPage> {
    vec![StaticPage {
        path: "apps".to_string(),
        title: "Apps".to_string(),
        body: html! {
            h2 { "Apps" }
            p { "Side projects I have shipped to the App Store." }
            ul {
                li {
                    strong { "Plateful" }
                    " — a small meal planner for busy weeks."
                }
                li {
                    strong { "Lapse" }
                    " — an interval timer for climbing sessions."
                }
            }
        },
    }]
}
