use regex::{Regex, RegexBuilder};
use scraper::{ElementRef, Html, Selector};

use crate::config::SiteConfig;
use crate::error::{selector, Result};
use crate::record::FieldPatch;
use crate::text::{char_len, element_text, single_string, visible_text};

const SOCIAL_NAMES: [&str; 4] = ["linkedin", "twitter", "facebook", "instagram"];
const MAX_PRODUCTS: usize = 15;

/// A products strategy returns `None` when it found nothing, so the next one
/// in `PRODUCT_STRATEGIES` gets a turn.
type ProductStrategy = fn(&Extractor, &Html) -> Option<Vec<String>>;

const PRODUCT_STRATEGIES: [ProductStrategy; 3] = [
    Extractor::products_under_heading,
    Extractor::products_by_class,
    Extractor::products_in_table,
];

struct Selectors {
    link: Selector,
    mailto: Selector,
    section_heading: Selector,
    list_item: Selector,
    classed: Selector,
    table: Selector,
    row: Selector,
    cell: Selector,
}

#[derive(Debug)]
struct WebsiteCandidate<'a> {
    href: &'a str,
    score: u32,
}

/// Pulls website, email, products and social links out of a profile page.
pub struct Extractor {
    sel: Selectors,
    email_regex: Regex,
    website_regex: Regex,
    products_heading: Regex,
    product_class: Regex,
    contact_noise: Regex,
    product_table: Regex,
    own_domains: Vec<String>,
    brand: String,
}

impl Extractor {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let ci = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();

        Ok(Extractor {
            sel: Selectors {
                link: selector("a[href]")?,
                mailto: selector(r#"a[href^="mailto:"]"#)?,
                section_heading: selector("div, section, h2, h3")?,
                list_item: selector("li")?,
                classed: selector("div[class], span[class], p[class], li[class]")?,
                table: selector("table")?,
                row: selector("tr")?,
                cell: selector("td, th")?,
            },
            email_regex: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")?,
            website_regex: Regex::new(r"^https?://([a-zA-Z0-9.-]+\.)+[a-zA-Z]{2,}")?,
            products_heading: ci(r"Products|Brands|Product Categories|Our Products")?,
            product_class: ci(r"product|brand|category|item")?,
            contact_noise: ci(r"^(Tel|Email|Fax|Phone|www|http)")?,
            product_table: ci(r"product|brand")?,
            own_domains: site.own_domains.iter().map(|d| d.to_lowercase()).collect(),
            brand: site.brand.to_lowercase(),
        })
    }

    pub fn extract(&self, html: &str) -> FieldPatch {
        let document = Html::parse_document(html);
        let mut patch = FieldPatch {
            website: self.website(&document).unwrap_or_default(),
            email: self.email(&document).unwrap_or_default(),
            products: self.products(&document).unwrap_or_default(),
            ..Default::default()
        };
        self.fill_social(&document, &mut patch);
        patch
    }

    fn website(&self, document: &Html) -> Option<String> {
        let best = document
            .select(&self.sel.link)
            .filter_map(|a| self.website_candidate(a))
            .fold(None::<WebsiteCandidate>, |best, c| match best {
                Some(b) if b.score >= c.score => Some(b),
                _ => Some(c),
            })?;
        Some(best.href.to_string())
    }

    fn website_candidate<'a>(&self, a: ElementRef<'a>) -> Option<WebsiteCandidate<'a>> {
        let href = a.value().attr("href")?;
        if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
            return None;
        }
        let lower = href.to_lowercase();
        if self.own_domains.iter().any(|d| lower.contains(d.as_str())) {
            return None;
        }
        if SOCIAL_NAMES.iter().any(|s| lower.contains(s)) {
            return None;
        }
        if href.starts_with("mailto:") || !self.website_regex.is_match(href) {
            return None;
        }

        let text = element_text(a).to_lowercase();
        let mut score = 0;
        if text.contains("website") || text.contains("www") || text.contains("visit") {
            score += 3;
        }
        if text.contains("click here") {
            score += 1;
        }
        if char_len(href) < 100 {
            score += 1;
        }
        Some(WebsiteCandidate { href, score })
    }

    fn email(&self, document: &Html) -> Option<String> {
        if let Some(href) = document
            .select(&self.sel.mailto)
            .next()
            .and_then(|a| a.value().attr("href"))
        {
            return Some(href.strip_prefix("mailto:").unwrap_or(href).to_string());
        }

        let text = visible_text(document.root_element());
        let found: Vec<&str> = self.email_regex.find_iter(&text).map(|m| m.as_str()).collect();
        found
            .iter()
            .find(|e| !e.to_lowercase().contains(&self.brand))
            .or_else(|| found.first())
            .map(|e| e.to_string())
    }

    fn products(&self, document: &Html) -> Option<String> {
        let products = PRODUCT_STRATEGIES
            .iter()
            .find_map(|strategy| strategy(self, document).filter(|p| !p.is_empty()))?;
        Some(products.into_iter().take(MAX_PRODUCTS).collect::<Vec<_>>().join(", "))
    }

    /// A "Products"-style heading followed by the block that lists them.
    fn products_under_heading(&self, document: &Html) -> Option<Vec<String>> {
        let heading = document.select(&self.sel.section_heading).find(|el| {
            single_string(*el).is_some_and(|s| self.products_heading.is_match(&s))
        })?;
        let block = next_block_after(document, heading)?;

        if block.value().name() == "ul" {
            let items: Vec<String> = block
                .select(&self.sel.list_item)
                .map(element_text)
                // Blank items are dropped so an empty list falls through to the class strategy.
                .filter(|t| !t.is_empty())
                .collect();
            return Some(items);
        }
        let text = element_text(block);
        (char_len(&text) > 5).then(|| vec![text])
    }

    /// Elements whose class hints at products, skipping contact lines.
    fn products_by_class(&self, document: &Html) -> Option<Vec<String>> {
        let mut products: Vec<String> = Vec::new();
        let tagged = document
            .select(&self.sel.classed)
            .filter(|el| el.value().classes().any(|c| self.product_class.is_match(c)))
            .take(10);
        for el in tagged {
            let text = element_text(el);
            if char_len(&text) > 3 && !products.contains(&text) && !self.contact_noise.is_match(&text) {
                products.push(text);
            }
        }
        Some(products)
    }

    /// First table mentioning products or brands that yields any cell text.
    fn products_in_table(&self, document: &Html) -> Option<Vec<String>> {
        let mut products: Vec<String> = Vec::new();
        for table in document.select(&self.sel.table) {
            let full: String = table.text().collect();
            if !self.product_table.is_match(&full) {
                continue;
            }
            for row in table.select(&self.sel.row).take(5) {
                for cell in row.select(&self.sel.cell) {
                    let text = element_text(cell);
                    if char_len(&text) > 3 && !products.contains(&text) {
                        products.push(text);
                    }
                }
            }
            if !products.is_empty() {
                break;
            }
        }
        Some(products)
    }

    fn fill_social(&self, document: &Html, patch: &mut FieldPatch) {
        for a in document.select(&self.sel.link) {
            let Some(href) = a.value().attr("href") else {
                continue;
            };
            let lower = href.to_lowercase();
            let slot = if lower.contains("linkedin.com") {
                &mut patch.linkedin
            } else if lower.contains("twitter.com") || lower.contains("x.com") {
                &mut patch.twitter
            } else if lower.contains("facebook.com") {
                &mut patch.facebook
            } else if lower.contains("instagram.com") {
                &mut patch.instagram
            } else {
                continue;
            };
            *slot = href.to_string();
        }
    }
}

/// First `ul`/`div`/`table`/`p` after `anchor` in document order.
fn next_block_after<'a>(document: &'a Html, anchor: ElementRef<'a>) -> Option<ElementRef<'a>> {
    document
        .tree
        .root()
        .descendants()
        .skip_while(|node| node.id() != anchor.id())
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| matches!(el.value().name(), "ul" | "div" | "table" | "p"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> Extractor {
        Extractor::new(&SiteConfig::default()).unwrap()
    }

    fn page(body: &str) -> String {
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn website_prefers_higher_score_regardless_of_order() {
        let html = page(
            r#"<a href="https://plain.example.com">Home</a>
               <a href="https://acme.example.com">Visit our Website</a>"#,
        );
        assert_eq!(extractor().extract(&html).website, "https://acme.example.com");
    }

    #[test]
    fn website_tie_goes_to_first_candidate() {
        let html = page(
            r#"<a href="https://first.example.com">Partner</a>
               <a href="https://second.example.com">Sponsor</a>"#,
        );
        assert_eq!(extractor().extract(&html).website, "https://first.example.com");
    }

    #[test]
    fn website_ignores_show_social_mail_and_script_links() {
        let html = page(
            r##"<a href="https://exhibitors.gulfood.com/x">Visit website</a>
               <a href="https://www.linkedin.com/company/acme">www</a>
               <a href="mailto:info@acme.example.com">Visit</a>
               <a href="javascript:void(0)">Visit website</a>
               <a href="#top">www</a>
               <a href="/relative/path">Visit website</a>"##,
        );
        assert_eq!(extractor().extract(&html).website, "");
    }

    #[test]
    fn click_here_beats_earlier_plain_link() {
        let html = page(
            r#"<a href="https://a.example.com">Home</a>
               <a href="https://b.example.com">Click here</a>"#,
        );
        assert_eq!(extractor().extract(&html).website, "https://b.example.com");
    }

    #[test]
    fn long_href_loses_the_length_bonus() {
        let long = format!("https://long.example.com/{}", "a".repeat(120));
        let html = page(&format!(
            r#"<a href="{long}">Catalogue</a><a href="https://short.example.com">Catalogue</a>"#
        ));
        assert_eq!(extractor().extract(&html).website, "https://short.example.com");
    }

    #[test]
    fn email_prefers_mailto_anchor() {
        let html = page(
            r#"<p>Write to sales@acme.example.com</p>
               <a href="mailto:info@acme.example.com">Mail us</a>"#,
        );
        assert_eq!(extractor().extract(&html).email, "info@acme.example.com");
    }

    #[test]
    fn email_from_text_skips_show_addresses() {
        let html = page("<p>help@gulfood.com</p><p>Contact: trade@acme.example.com</p>");
        assert_eq!(extractor().extract(&html).email, "trade@acme.example.com");
    }

    #[test]
    fn email_from_text_ignores_script_and_style() {
        let html = page(
            r#"<script>window.widget = { support: "help@widget-vendor.io" };</script>
               <style>/* design@theme-shop.example */</style>
               <p>Contact: info@acme.example.com</p>"#,
        );
        assert_eq!(extractor().extract(&html).email, "info@acme.example.com");
    }

    #[test]
    fn email_falls_back_to_show_address_when_only_one() {
        let html = page("<p>visitors@gulfood.com</p>");
        assert_eq!(extractor().extract(&html).email, "visitors@gulfood.com");
    }

    #[test]
    fn products_from_list_under_heading() {
        let html = page(
            r#"<h3>Our Products</h3>
               <ul><li>Olive Oil</li><li> Dates </li><li></li></ul>"#,
        );
        assert_eq!(extractor().extract(&html).products, "Olive Oil, Dates");
    }

    #[test]
    fn blank_list_under_heading_falls_through_to_classes() {
        let html = page(
            r#"<h3>Products</h3>
               <ul><li> </li><li></li></ul>
               <span class="product">Olive Oil</span>"#,
        );
        assert_eq!(extractor().extract(&html).products, "Olive Oil");
    }

    #[test]
    fn products_from_paragraph_under_heading_needs_some_length() {
        let short = page("<h2>Brands</h2><p>Acme</p>");
        assert_eq!(extractor().extract(&short).products, "");

        let long = page("<h2>Brands</h2><p>Acme Gold, Acme Lite</p>");
        assert_eq!(extractor().extract(&long).products, "Acme Gold, Acme Lite");
    }

    #[test]
    fn products_by_class_skips_contact_lines_and_duplicates() {
        let html = page(
            r#"<span class="product-tag">Frozen Vegetables</span>
               <span class="product-tag">Frozen Vegetables</span>
               <span class="product-tag">Tel: +971 4 000</span>
               <span class="product-tag">Tea</span>
               <li class="brand">Acme Select</li>"#,
        );
        assert_eq!(
            extractor().extract(&html).products,
            "Frozen Vegetables, Acme Select"
        );
    }

    #[test]
    fn products_from_table_mentioning_brands() {
        let html = page(
            r#"<table><tr><td>Opening hours</td></tr></table>
               <table>
                 <tr><th>Brand</th><th>Origin</th></tr>
                 <tr><td>Acme Gold</td><td>Spain</td></tr>
               </table>"#,
        );
        assert_eq!(
            extractor().extract(&html).products,
            "Brand, Origin, Acme Gold, Spain"
        );
    }

    #[test]
    fn products_capped_at_fifteen() {
        let items: String = (1..=20).map(|i| format!("<li>Item {i:02}</li>")).collect();
        let html = page(&format!("<h3>Products</h3><ul>{items}</ul>"));
        let products = extractor().extract(&html).products;
        assert_eq!(products.split(", ").count(), 15);
        assert!(products.ends_with("Item 15"));
    }

    #[test]
    fn social_links_last_wins_and_never_double_assign() {
        let html = page(
            r#"<a href="https://www.linkedin.com/company/old">in</a>
               <a href="https://www.LinkedIn.com/company/acme">in</a>
               <a href="https://x.com/acme">x</a>
               <a href="https://facebook.com/acme">fb</a>
               <a href="https://instagram.com/acme">ig</a>
               <a href="https://linkedin.com/share?u=facebook.com">share</a>"#,
        );
        let patch = extractor().extract(&html);
        assert_eq!(patch.linkedin, "https://linkedin.com/share?u=facebook.com");
        assert_eq!(patch.twitter, "https://x.com/acme");
        assert_eq!(patch.facebook, "https://facebook.com/acme");
        assert_eq!(patch.instagram, "https://instagram.com/acme");
    }

    #[test]
    fn empty_page_gives_empty_patch() {
        assert_eq!(extractor().extract("<html></html>"), FieldPatch::default());
    }
}
