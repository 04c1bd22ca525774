//! Stylesheet link extraction

use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    // Hardcoded and syntactically valid; a parse failure is a compile-time bug.
    static ref LINK_SELECTOR: Selector = Selector::parse("link[rel][href]")
        .expect("BUG: hardcoded selector 'link[rel][href]' is invalid - this is a compile-time bug");
}

/// Hrefs of every `<link rel="stylesheet">` in document order
///
/// Alternate stylesheets and links whose media only targets print are excluded.
#[must_use]
pub fn extract_stylesheet_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&LINK_SELECTOR)
        .filter(|element| {
            let value = element.value();
            let rel = value.attr("rel").unwrap_or_default().to_ascii_lowercase();
            let tokens: Vec<&str> = rel.split_ascii_whitespace().collect();
            tokens.contains(&"stylesheet")
                && !tokens.contains(&"alternate")
                && !value.attr("media").is_some_and(is_print_only)
        })
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_print_only(media: &str) -> bool {
    let media = media.to_ascii_lowercase();
    let mut queries = media.split(',').map(str::trim).filter(|q| !q.is_empty()).peekable();
    queries.peek().is_some()
        && queries.all(|q| {
            let q = q.strip_prefix("only ").map_or(q, str::trim_start);
            q.starts_with("print")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_only_media_queries() {
        assert!(is_print_only("print"));
        assert!(is_print_only("only print"));
        assert!(is_print_only("ONLY  print and (orientation: landscape)"));
        assert!(is_print_only("print, only print"));
        assert!(!is_print_only("only screen"));
        assert!(!is_print_only("screen, only print"));
        assert!(!is_print_only(""));
    }

    #[test]
    fn extracts_in_document_order() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="css/a.css">
            <link rel="icon" href="favicon.ico">
            <link rel="STYLESHEET" href="https://cdn.test/b.css" media="screen">
            <link rel="stylesheet" href="print.css" media="print">
            <link rel="alternate stylesheet" href="alt.css">
            <link rel="stylesheet" href="both.css" media="screen, print">
        </head><body><link rel="stylesheet" href="../late.css"></body></html>"#;

        assert_eq!(extract_stylesheet_hrefs(html), vec![
            "css/a.css",
            "https://cdn.test/b.css",
            "both.css",
            "../late.css",
        ]);
    }

    #[test]
    fn empty_document_has_no_hrefs() {
        assert!(extract_stylesheet_hrefs("<p>hi</p>").is_empty());
    }
}
