//! Exoplanet overview page HTML parser

use anyhow::{Result, anyhow};
use exo_common::{Heading, PageImage, PageLink, ScrapedContent};
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// Tried in order; the first match becomes the content root
const CONTENT_ROOTS: [&str; 5] = ["main", "article", "div#content", "div#primary", "div.main-content"];

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("selector error for {}: {}", css, e))
}

/// Element text with whitespace runs collapsed to single spaces
fn clean_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `reference` resolved against the page URL, or left as written when
/// either side does not parse
fn resolve(base: Option<&Url>, reference: &str) -> String {
    base.and_then(|base| base.join(reference).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| reference.to_string())
}

/// Parse an overview page into [`ScrapedContent`].
///
/// Headings (h1 to h4), paragraphs, images and links come from the content
/// root only; empty headings and paragraphs are dropped.
pub fn parse_page(html: &str, url: &str) -> Result<ScrapedContent> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(clean_text)
        .filter(|t| !t.is_empty());

    let meta_description = document
        .select(&selector("meta[name=\"description\"]")?)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    let mut root = None;
    for css in CONTENT_ROOTS {
        if let Some(found) = document.select(&selector(css)?).next() {
            root = Some(found);
            break;
        }
    }
    let root = match root {
        Some(root) => root,
        None => document
            .select(&selector("body")?)
            .next()
            .unwrap_or_else(|| document.root_element()),
    };

    let headings = root
        .select(&selector("h1, h2, h3, h4")?)
        .filter_map(|h| {
            let text = clean_text(h);
            (!text.is_empty()).then(|| Heading::Tagged {
                tag: h.value().name().to_string(),
                text,
            })
        })
        .collect();

    let paragraphs = root
        .select(&selector("p")?)
        .map(clean_text)
        .filter(|text| !text.is_empty())
        .collect();

    let base = Url::parse(url).ok();

    let images = root
        .select(&selector("img")?)
        .filter_map(|img| {
            let element = img.value();
            let src = element
                .attr("src")
                .or_else(|| element.attr("data-src"))
                .map(str::trim)
                .filter(|src| !src.is_empty())?;
            Some(PageImage {
                src: resolve(base.as_ref(), src),
                alt: element.attr("alt").unwrap_or_default().to_string(),
            })
        })
        .collect();

    let links = root
        .select(&selector("a[href]")?)
        .filter_map(|a| {
            let href = a.value().attr("href")?.trim();
            Some(PageLink {
                text: clean_text(a),
                href: resolve(base.as_ref(), href),
            })
        })
        .collect();

    Ok(ScrapedContent {
        url: Some(url.to_string()),
        title,
        meta_description,
        headings,
        paragraphs,
        images,
        links,
    })
}
