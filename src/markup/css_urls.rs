//! `url()` reference extraction and rewriting

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    // Quoted references keep their quotes; unquoted ones end at the closing paren.
    static ref CSS_URL: Regex = Regex::new(
        r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^\s"')][^)]*?))\s*\)"#
    )
    .expect("BUG: hardcoded url() pattern is invalid");
}

fn reference<'a>(caps: &Captures<'a>) -> Option<(&'a str, Option<char>)> {
    caps.get(1)
        .map(|m| (m.as_str(), Some('"')))
        .or_else(|| caps.get(2).map(|m| (m.as_str(), Some('\''))))
        .or_else(|| caps.get(3).map(|m| (m.as_str(), None)))
}

/// Every `url()` reference in `css`, in source order
#[must_use]
pub fn extract_css_urls(css: &str) -> Vec<String> {
    CSS_URL
        .captures_iter(css)
        .filter_map(|caps| reference(&caps).map(|(url, _)| url.to_string()))
        .collect()
}

/// Replace `url()` references for which `rewrite` returns a new value
///
/// Quoting style of each reference is preserved.
pub fn rewrite_css_urls<F>(css: &str, mut rewrite: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    CSS_URL
        .replace_all(css, |caps: &Captures<'_>| {
            let original = caps[0].to_string();
            let Some((url, quote)) = reference(caps) else {
                return original;
            };
            match rewrite(url) {
                Some(replacement) => match quote {
                    Some(q) => format!("url({q}{replacement}{q})"),
                    None => format!("url({replacement})"),
                },
                None => original,
            }
        })
        .into_owned()
}
