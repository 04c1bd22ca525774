//! HTML and CSS text collaborators
//!
//! Read-only extraction uses `scraper` and `regex`; the one HTML rewrite (CSS
//! injection into `<head>`) streams through `lol_html`.

pub mod css_urls;
pub mod inline;
pub mod stylesheet_hrefs;

pub use css_urls::{extract_css_urls, rewrite_css_urls};
pub use inline::inline_css_into_head;
pub use stylesheet_hrefs::extract_stylesheet_hrefs;
