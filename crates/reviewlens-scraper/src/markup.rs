//! Site-specific HTML extraction.
//!
//! Every CSS class name the scraper depends on lives in this module. The
//! fetch chain in [`crate::scrape`] only sees the owned values returned
//! here, so a markup change means editing selectors, not control flow.
//!
//! Several fields are located by "first descendant" chains (`div` → `div` →
//! `a`), mirroring how the site nests its cards.

use std::sync::LazyLock;

use reviewlens_core::RawReview;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Text the category indicator must contain for the results to be usable.
pub const CATEGORY_MARKER: &str = "Mobiles";

/// Review blocks considered per page.
pub const MAX_BLOCKS_PER_PAGE: usize = 10;

const REVIEWS_PATH_MARKER: &str = "/product-reviews/";
const MARKETPLACE_MARKER: &str = "marketplace=FLIPKART";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

static CATEGORY: LazyLock<Selector> = LazyLock::new(|| selector("a.GD4sye.ECYCDD"));
static RESULT_ENTRY: LazyLock<Selector> = LazyLock::new(|| selector("div.cPHDOP.col-12-12"));
static PRODUCT_CARD: LazyLock<Selector> = LazyLock::new(|| selector("div.KzDlHZ"));
static PRODUCT_TITLE: LazyLock<Selector> = LazyLock::new(|| selector("span.VU-ZEz"));
static REVIEWS_NAV: LazyLock<Selector> = LazyLock::new(|| selector("div.col.pPAw9M"));
static REVIEW_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector("div.EKFha-"));
static REVIEWER_NAME: LazyLock<Selector> = LazyLock::new(|| selector("p._2NsDsF.AwS1CA"));
static REVIEW_ROW: LazyLock<Selector> = LazyLock::new(|| selector("div.row"));
static NEXT_PAGE: LazyLock<Selector> = LazyLock::new(|| selector("a._9QVEpD"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static DIV: LazyLock<Selector> = LazyLock::new(|| selector("div"));
static PARA: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// A review block that did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockParseError {
    #[error("review block has no {0}")]
    MissingField(&'static str),
}

/// One result card on the search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// `true` when the card contains a product listing (not an ad or banner).
    pub is_product: bool,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub category_label: Option<String>,
    pub entries: Vec<ResultEntry>,
}

impl SearchResults {
    /// `true` when the category indicator exists and names [`CATEGORY_MARKER`].
    #[must_use]
    pub fn in_required_category(&self) -> bool {
        self.category_label
            .as_deref()
            .is_some_and(|label| label.contains(CATEGORY_MARKER))
    }
}

/// Where the product page's reviews live, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewLink {
    Found(String),
    MissingContainer,
    MissingAnchor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPage {
    pub title: Option<String>,
    pub review_link: ReviewLink,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPage {
    /// At most [`MAX_BLOCKS_PER_PAGE`] blocks, in page order.
    pub blocks: Vec<Result<RawReview, BlockParseError>>,
    pub next_href: Option<String>,
}

#[must_use]
pub fn parse_search_results(html: &str) -> SearchResults {
    let doc = Html::parse_document(html);

    let category_label = doc.select(&CATEGORY).next().map(text_of);
    let entries = doc
        .select(&RESULT_ENTRY)
        .map(|entry| ResultEntry {
            is_product: first_descendant(entry, &PRODUCT_CARD).is_some(),
            href: descend(entry, &[&*DIV, &*DIV, &*DIV, &*ANCHOR])
                .and_then(|a| a.value().attr("href"))
                .map(str::to_owned),
        })
        .collect();

    SearchResults {
        category_label,
        entries,
    }
}

#[must_use]
pub fn parse_product_page(html: &str) -> ProductPage {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&PRODUCT_TITLE)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty());

    let review_link = match doc.select(&REVIEWS_NAV).next() {
        None => ReviewLink::MissingContainer,
        Some(nav) => nav
            .select(&LINK)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(REVIEWS_PATH_MARKER) && href.contains(MARKETPLACE_MARKER))
            .map_or(ReviewLink::MissingAnchor, |href| {
                ReviewLink::Found(href.to_owned())
            }),
    };

    ProductPage { title, review_link }
}

#[must_use]
pub fn parse_review_page(html: &str) -> ReviewPage {
    let doc = Html::parse_document(html);

    let blocks = doc
        .select(&REVIEW_BLOCK)
        .take(MAX_BLOCKS_PER_PAGE)
        .map(parse_review_block)
        .collect();

    // The pager renders "Previous" and "Next" with the same class.
    let next_href = doc
        .select(&NEXT_PAGE)
        .find(|a| text_of(*a).to_ascii_lowercase().contains("next"))
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_owned);

    ReviewPage { blocks, next_href }
}

fn parse_review_block(block: ElementRef<'_>) -> Result<RawReview, BlockParseError> {
    let body = descend(block, &[&*DIV, &*DIV]).ok_or(BlockParseError::MissingField("body"))?;

    let reviewer_name = first_descendant(body, &REVIEWER_NAME)
        .map(text_of)
        .ok_or(BlockParseError::MissingField("reviewer name"))?;
    let rating_text = descend(body, &[&*DIV, &*DIV])
        .map(text_of)
        .ok_or(BlockParseError::MissingField("rating"))?;
    let heading = descend(body, &[&*DIV, &*PARA])
        .map(text_of)
        .ok_or(BlockParseError::MissingField("heading"))?;
    let comment = body
        .select(&REVIEW_ROW)
        .filter(|row| row.id() != body.id())
        .nth(1)
        .and_then(|row| descend(row, &[&*DIV, &*DIV, &*DIV]))
        .map(text_of)
        .ok_or(BlockParseError::MissingField("comment"))?;

    Ok(RawReview {
        reviewer_name,
        rating_text,
        heading,
        comment,
    })
}

/// First element strictly below `scope` matching `selector`, in document order.
fn first_descendant<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).find(|el| el.id() != scope.id())
}

/// Follows a chain of [`first_descendant`] lookups.
fn descend<'a>(scope: ElementRef<'a>, chain: &[&Selector]) -> Option<ElementRef<'a>> {
    chain
        .iter()
        .try_fold(scope, |el, selector| first_descendant(el, selector))
}

/// Element text with runs of whitespace collapsed to single spaces.
fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;
