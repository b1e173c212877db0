//! Text helpers shared by the page extractors.

use scraper::{ElementRef, Html};

/// Collapses every run of whitespace to a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Elements whose text content is never rendered as page text.
const NON_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Text nodes under `element`, skipping anything inside [`NON_TEXT_ELEMENTS`].
fn visible_text_nodes<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> + 'a {
    element.descendants().filter_map(|node| {
        let text = node.value().as_text()?;
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| NON_TEXT_ELEMENTS.contains(&e.name()))
        });
        (!hidden).then_some(&**text)
    })
}

/// Visible text of an element, text nodes joined by spaces and collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&visible_text_nodes(element).collect::<Vec<_>>().join(" "))
}

/// Visible text of a whole document with each non-empty text node trimmed and
/// joined by a single space.
pub(crate) fn document_text(html: &str) -> String {
    let document = Html::parse_document(html);
    visible_text_nodes(document.root_element())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  Acme \n\t Store  "), "Acme Store");
        assert_eq!(collapse_whitespace(""), "");
    }

    #[test]
    fn document_text_separates_nodes() {
        let text = document_text("<p>Excellent</p><span>4.5</span> <b> out of 5 </b>");
        assert_eq!(text, "Excellent 4.5 out of 5");
    }

    #[test]
    fn document_text_skips_script_and_style() {
        let text = document_text(
            "<head><script>var year = 2025;</script><style>.a{width:15px}</style></head>\
             <body><noscript>enable js</noscript><p>Excellent 4.5 out of 5</p></body>",
        );
        assert_eq!(text, "Excellent 4.5 out of 5");
    }

    #[test]
    fn element_text_skips_inline_scripts() {
        let document = Html::parse_fragment("<h2>Acme<script>track(30)</script> Store</h2>");
        let selector = scraper::Selector::parse("h2").unwrap();
        let h2 = document.select(&selector).next().unwrap();
        assert_eq!(element_text(h2), "Acme Store");
    }
}
