//! The single-pass publishing pipeline: load, convert, render, emit.
use std::fs;
use std::time::Instant;

use colored::Colorize;
use log::info;
use rayon::prelude::*;

use crate::{
    config::{BuildOptions, SiteConfig},
    content::{self, Modifiers, render_markdown},
    emit::{self, BuildOutput},
    errors::PublishError,
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    model,
    sitemap::{SitemapEntry, generate_sitemap},
    theme::Theme,
};

pub fn build(
    site: &SiteConfig,
    theme: &dyn Theme,
    modifiers: &Modifiers,
    options: &BuildOptions,
) -> Result<BuildOutput, PublishError> {
    let build_start = Instant::now();
    let mut output = BuildOutput::new(build_start);

    if options.clean_output_dir && options.output_dir.exists() {
        fs::remove_dir_all(&options.output_dir)?;
    }
    fs::create_dir_all(&options.output_dir)?;

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    print_title("loading content");
    let content_start = Instant::now();
    let documents = content::load_documents(&options.content_dir)?;
    info!(target: "content", "{}", format!(
        "Loaded {} documents in {}",
        documents.len(),
        format_elapsed_time(content_start.elapsed(), &FormatElapsedTimeOptions::default())
    ).bold());

    print_title("generating pages");
    let pages_start = Instant::now();
    let page_format_options = FormatElapsedTimeOptions::default();
    let section_format_options = FormatElapsedTimeOptions::section();

    let posts = model::sort_by_date(&documents, site.sort_order);

    // Conversions are independent, so they run in parallel; collect brings
    // the bodies back in document order, keeping the output deterministic.
    let bodies: Vec<String> = posts
        .par_iter()
        .map(|document| render_markdown(&document.source, modifiers))
        .collect();

    let mut sitemap_entries: Vec<SitemapEntry> = Vec::new();

    let index_html = theme.index(site, &posts).into_string();
    let file_path = emit::write_page(&options.output_dir, "/", &index_html, &mut output)?;
    info!(target: "pages", "/ -> {}", file_path.to_string_lossy().dimmed());
    sitemap_entries.push(SitemapEntry {
        loc: page_url(site, "/"),
        lastmod: None,
    });

    for (document, body) in posts.iter().zip(&bodies) {
        let page_start = Instant::now();
        let html = theme.item(site, document, body).into_string();
        let url = document.url();
        let file_path = emit::write_page(&options.output_dir, &url, &html, &mut output)?;

        info!(
            target: "pages",
            "├─ {} {}",
            file_path.to_string_lossy().dimmed(),
            format_elapsed_time(page_start.elapsed(), &page_format_options)
        );

        sitemap_entries.push(SitemapEntry {
            loc: page_url(site, &url),
            lastmod: Some(document.date.format("%Y-%m-%d").to_string()),
        });
    }

    for page in &site.pages {
        let html = theme.page(site, page).into_string();
        let url = format!("/{}/", page.path.trim_matches('/'));
        let file_path = emit::write_page(&options.output_dir, &url, &html, &mut output)?;

        info!(target: "pages", "├─ {}", file_path.to_string_lossy().dimmed());

        sitemap_entries.push(SitemapEntry {
            loc: page_url(site, &url),
            lastmod: None,
        });
    }

    info!(target: "pages", "{}", format!(
        "generated {} pages in {}",
        output.pages.len(),
        format_elapsed_time(pages_start.elapsed(), &section_format_options)
    ).bold());

    if options.static_dir.exists() {
        print_title("copying static files");
        let static_start = Instant::now();

        emit::copy_static(&options.static_dir, &options.output_dir, &mut output)?;

        info!(target: "build", "{}", format!(
            "Static files copied in {}",
            format_elapsed_time(static_start.elapsed(), &FormatElapsedTimeOptions::default())
        ).bold());
    }

    generate_sitemap(sitemap_entries, &options.output_dir, &options.sitemap)?;

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!(
        "Build completed in {}",
        format_elapsed_time(build_start.elapsed(), &section_format_options)
    ).bold());

    Ok(output)
}

fn page_url(site: &SiteConfig, path: &str) -> String {
    format!("{}{}", site.base_url.trim_end_matches('/'), path)
}
