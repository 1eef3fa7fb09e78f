use scraper::{ElementRef, Node};

/// Drops control characters (except tab, newline, carriage return) and trims.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|&c| c as u32 >= 32 || matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Visible text of an element: every text node trimmed, empty ones skipped,
/// the rest concatenated without separator.
pub fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// All text below `el` except what sits inside `script` or `style`, joined
/// without separator.
pub fn visible_text(el: ElementRef) -> String {
    el.descendants()
        .filter(|node| {
            !node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| matches!(e.name(), "script" | "style"))
            })
        })
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect()
}

/// The text of an element whose only content is a single string, following
/// single-child element chains (`<h3><span>Products</span></h3>`).
pub fn single_string(el: ElementRef) -> Option<String> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    match only.value() {
        Node::Text(t) => Some((**t).to_owned()),
        Node::Element(_) => ElementRef::wrap(only).and_then(single_string),
        _ => None,
    }
}

/// `str::len` counts bytes; thresholds in the parsers count characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn clean_text_strips_control_chars_and_trims() {
        assert_eq!(clean_text("  Acme\u{0}\u{7} Foods\u{1b} "), "Acme Foods");
        assert_eq!(clean_text("a\tb\nc"), "a\tb\nc");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn element_text_joins_trimmed_fragments() {
        let doc = Html::parse_fragment("<p>  VIEW <b> PROFILE </b>\n</p>");
        let p = doc.select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(element_text(p), "VIEWPROFILE");
    }

    #[test]
    fn visible_text_skips_script_and_style() {
        let doc = Html::parse_document(
            "<html><head><style>p { color: red }</style></head>\
             <body><p>Hello</p><script>var x = 1;</script><p> world</p></body></html>",
        );
        assert_eq!(visible_text(doc.root_element()), "Hello world");
    }

    #[test]
    fn single_string_follows_only_child_chain() {
        let doc = Html::parse_fragment(
            "<h3><span>Our Products</span></h3><h2>Products <em>and</em> more</h2>",
        );
        let h3 = doc.select(&Selector::parse("h3").unwrap()).next().unwrap();
        let h2 = doc.select(&Selector::parse("h2").unwrap()).next().unwrap();
        assert_eq!(single_string(h3).as_deref(), Some("Our Products"));
        assert_eq!(single_string(h2), None);
    }
}
