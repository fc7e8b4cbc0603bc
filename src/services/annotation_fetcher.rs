//! Encyclopedia summaries for taxa, with a genus-only fallback.

use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use tracing::{debug, instrument, warn};

use crate::domain::errors::{ApiError, DomainError, DomainResult};
use crate::domain::models::{AnnotationDocument, AnnotationLink, AnnotationQuery};
use crate::domain::ports::AnnotationSource;

/// CSS class put on the wrapper of every rendered annotation.
pub const BODY_CLASS: &str = "body-window";

static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\s[^>]*>").expect("anchor regex is valid"));

static RELATIVE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\shref="\./([^"]*)""#).expect("href regex is valid"));

static OPENER_ATTRS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\s(?:target|rel)="[^"]*""#).expect("attr regex is valid"));

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

pub struct AnnotationFetcher<A: AnnotationSource> {
    source: Arc<A>,
    strategies: Vec<AnnotationQuery>,
}

impl<A: AnnotationSource> AnnotationFetcher<A> {
    pub fn new(source: Arc<A>) -> Self {
        Self {
            source,
            strategies: AnnotationQuery::ORDER.to_vec(),
        }
    }

    /// Fetch and render the summary for `taxon`.
    ///
    /// Strategies run in order and stop at the first success. A strategy
    /// that yields a title already tried is skipped, so a one-word taxon is
    /// queried once. When every strategy fails the last error is returned.
    #[instrument(skip(self))]
    pub async fn fetch_summary(&self, taxon: &str) -> DomainResult<AnnotationDocument> {
        let mut tried: Vec<String> = Vec::with_capacity(self.strategies.len());
        let mut last_error = None;

        for &query in &self.strategies {
            let Some(title) = query.title_for(taxon) else {
                continue;
            };
            if tried.contains(&title) {
                continue;
            }

            debug!(%query, %title, "querying annotation");
            match self.source.fetch_page(&title).await {
                Ok(page) => {
                    let (html, links) = render_fragment(&page, self.source.article_base());
                    return Ok(AnnotationDocument {
                        taxon: taxon.to_string(),
                        title,
                        query,
                        html,
                        links,
                    });
                }
                Err(e) => {
                    warn!(%query, %title, error = %e, "annotation query failed");
                    tried.push(title);
                    last_error = Some(e);
                }
            }
        }

        Err(DomainError::AnnotationFailed {
            taxon: taxon.to_string(),
            source: last_error
                .unwrap_or_else(|| ApiError::NotFound("taxon name is empty".to_string())),
        })
    }
}

/// Reduce a page to its body, wrapped in a `body-window` div, with every
/// `./relative` anchor pointed at the absolute article and opened in a new
/// browsing context.
pub fn render_fragment(page: &str, article_base: &str) -> (String, Vec<AnnotationLink>) {
    let document = Html::parse_document(page);
    let body = document
        .select(&BODY)
        .next()
        .map(|body| body.inner_html())
        .unwrap_or_default();

    let (body, links) = rewrite_relative_anchors(&body, article_base);
    (format!(r#"<div class="{BODY_CLASS}">{body}</div>"#), links)
}

/// Rewrite anchors whose href starts with `./`.
///
/// Any existing `target`/`rel` on a rewritten anchor is replaced; anchors
/// with other hrefs are left untouched.
pub fn rewrite_relative_anchors(html: &str, article_base: &str) -> (String, Vec<AnnotationLink>) {
    let base = article_base.trim_end_matches('/');
    let mut links = Vec::new();

    let rewritten = ANCHOR_TAG.replace_all(html, |tag: &Captures<'_>| {
        let tag = &tag[0];
        let Some(href) = RELATIVE_HREF.captures(tag) else {
            return tag.to_string();
        };

        let path = &href[1];
        let absolute = format!("{base}/{path}");
        links.push(AnnotationLink {
            relative: format!("./{path}"),
            absolute: absolute.clone(),
        });

        let without_opener = OPENER_ATTRS.replace_all(tag, "");
        let with_href = RELATIVE_HREF.replace(&without_opener, |_: &Captures<'_>| {
            format!(r#" href="{absolute}""#)
        });
        let open_tag = with_href.trim_end_matches('>').trim_end_matches('/').trim_end();
        format!(r#"{open_tag} target="_blank" rel="noopener">"#)
    });

    (rewritten.into_owned(), links)
}
