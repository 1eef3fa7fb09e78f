use log::{debug, error};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{selector, Result};
use crate::record::ExhibitorRecord;
use crate::text::{clean_text, element_text};

/// Turns one page of the listing endpoint into partial records.
pub struct ListParser {
    base: Url,
    item: Selector,
    heading: Selector,
    styled_span: Selector,
    paragraph: Selector,
    sector_img: Selector,
    link: Selector,
    country_style: Regex,
    stand: Regex,
}

impl ListParser {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(ListParser {
            base: Url::parse(base_url)?,
            item: selector("div.item")?,
            heading: selector("h4.heading")?,
            styled_span: selector("span[style]")?,
            paragraph: selector("p")?,
            sector_img: selector("div.eventlogoshow img")?,
            link: selector("a[href]")?,
            country_style: Regex::new(r"font-weight:600")?,
            stand: Regex::new(r"Stand No-")?,
        })
    }

    /// Records in document order. Items that fail to parse are logged and
    /// left out; the rest of the page is still returned.
    pub fn parse(&self, html: &str) -> Vec<ExhibitorRecord> {
        if html.trim().is_empty() {
            return Vec::new();
        }
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for (idx, item) in document.select(&self.item).enumerate() {
            match self.parse_item(item) {
                Ok(record) => records.push(record),
                Err(e) => error!("Failed to process listing item {}: {}", idx + 1, e),
            }
        }
        debug!("Parsed {} items from listing page", records.len());
        records
    }

    fn parse_item(&self, item: ElementRef) -> Result<ExhibitorRecord> {
        let mut record = ExhibitorRecord::default();

        if let Some(h) = item.select(&self.heading).next() {
            record.company = clean_text(&element_text(h));
        }

        if let Some(span) = item.select(&self.styled_span).find(|s| {
            s.value()
                .attr("style")
                .is_some_and(|style| self.country_style.is_match(style))
        }) {
            record.country = clean_text(&element_text(span));
        }

        if let Some(p) = item
            .select(&self.paragraph)
            .map(element_text)
            .find(|t| self.stand.is_match(t))
        {
            record.address = clean_text(&p);
        }

        if let Some(src) = item
            .select(&self.sector_img)
            .next()
            .and_then(|img| img.value().attr("src"))
            .filter(|src| !src.is_empty())
        {
            record.category = clean_text(&sector_label(src));
        }

        let profile = item
            .select(&self.link)
            .find(|a| element_text(*a).to_uppercase().contains("PROFILE"))
            .and_then(|a| a.value().attr("href"));
        if let Some(href) = profile.filter(|h| !h.is_empty()) {
            record.profile_url = self.resolve(href)?;
        }

        Ok(record)
    }

    fn resolve(&self, href: &str) -> Result<String> {
        match Url::parse(href) {
            Ok(_) => Ok(href.to_string()),
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(self.base.join(href)?.to_string()),
            Err(e) => Err(e.into()),
        }
    }
}

/// `.../sectors/Dairy-Products.jpg` becomes `Dairy Products`.
fn sector_label(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    stem.replace('-', " ")
}
