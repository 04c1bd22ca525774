//! CSS injection into the document head

use lazy_static::lazy_static;
use lol_html::html_content::ContentType;
use lol_html::{HtmlRewriter, Settings, element};
use regex::Regex;

use crate::error::{AssetError, AssetResult};

lazy_static! {
    static ref HEAD_TAG: Regex =
        Regex::new(r"(?i)<head[\s>]").expect("BUG: hardcoded head pattern is invalid");
    static ref HTML_TAG: Regex =
        Regex::new(r"(?i)<html[\s>]").expect("BUG: hardcoded html pattern is invalid");
}

/// Append `css` as a `<style>` element at the end of `<head>`
///
/// Documents without a head get one at the start of `<html>`, or at the very start
/// when there is no `<html>` element either. Empty CSS leaves the HTML unchanged.
pub fn inline_css_into_head(html: &str, css: &str) -> AssetResult<String> {
    if css.trim().is_empty() {
        return Ok(html.to_string());
    }

    let style = format!("<style>{}</style>", css.replace("</style", "<\\/style"));

    let handler = if HEAD_TAG.is_match(html) {
        element!("head", move |el| {
            el.append(&style, ContentType::Html);
            Ok(())
        })
    } else if HTML_TAG.is_match(html) {
        element!("html", move |el| {
            el.prepend(&format!("<head>{style}</head>"), ContentType::Html);
            Ok(())
        })
    } else {
        return Ok(format!("{style}{html}"));
    };

    let mut output = Vec::with_capacity(html.len() + css.len() + 16);
    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![handler],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| AssetError::Html(format!("HtmlRewriter error: {e}")))?;
    rewriter
        .end()
        .map_err(|e| AssetError::Html(format!("HtmlRewriter end error: {e}")))?;

    String::from_utf8(output).map_err(|e| AssetError::Html(format!("Invalid UTF-8 in rewritten HTML: {e}")))
}
