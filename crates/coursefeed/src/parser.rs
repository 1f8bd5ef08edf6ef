use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};

use crate::types::{CourseRecord, Extraction, PageCount, UnitCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Pagination control has no page entries")]
    EmptyPagination,
    #[error("Failed to parse page number: {0:?}")]
    PageNumber(String),
}

static PAGINATION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.pagination").expect("invalid selector: pagination"));

static PAGINATION_ENTRY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span").expect("invalid selector: pagination entry"));

static LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("invalid selector: link"));

static COURSE_FEED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.course-feed").expect("invalid selector: course feed"));

static COURSE_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("invalid selector: course item"));

static COURSE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("strong").expect("invalid selector: course title"));

static LINE_BREAK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("br").expect("invalid selector: line break"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

/// Reads the total page count from the first listing page of a unit.
///
/// The last `span` of `div.pagination` is expected to link to the final page.
/// When that span carries no link, or there is no pagination control at all,
/// the count falls back to whether a course list exists on the page.
///
/// A pagination control without any `span`, or whose last link text is not a
/// number, is an error.
pub fn parse_page_count(html: &str) -> Result<PageCount, ParseError> {
    let document = Html::parse_document(html);

    if let Some(pagination) = document.select(&PAGINATION).next() {
        let last_entry = pagination
            .select(&PAGINATION_ENTRY)
            .last()
            .ok_or(ParseError::EmptyPagination)?;

        if let Some(link) = last_entry.select(&LINK).next() {
            let text = elem_text(link);
            let last_page = text
                .trim()
                .parse::<u32>()
                .map_err(|_| ParseError::PageNumber(text.trim().to_string()))?;
            return Ok(PageCount::Paginated(last_page));
        }
    }

    if document.select(&COURSE_FEED).next().is_some() {
        Ok(PageCount::Single)
    } else {
        Ok(PageCount::Empty)
    }
}

/// Whether the page carries a pagination control at all.
pub fn has_pagination(html: &str) -> bool {
    Html::parse_document(html)
        .select(&PAGINATION)
        .next()
        .is_some()
}

/// Extracts every titled entry of the first `ul.course-feed` on the page.
///
/// Items without a `strong` title (or with a blank one) are skipped and
/// counted. The description is the text right after the item's first `br`,
/// or empty when there is no `br` or nothing follows it.
pub fn parse_courses(html: &str, unit: &UnitCode) -> Extraction {
    let document = Html::parse_document(html);

    let Some(feed) = document.select(&COURSE_FEED).next() else {
        return Extraction::default();
    };

    let mut extraction = Extraction::default();

    for item in feed.select(&COURSE_ITEM) {
        let title = item
            .select(&COURSE_TITLE)
            .next()
            .map(|e| elem_text(e).trim().to_string())
            .filter(|s| !s.is_empty());

        let Some(title) = title else {
            extraction.skipped += 1;
            continue;
        };

        let description = item
            .select(&LINE_BREAK)
            .next()
            .map(text_after)
            .unwrap_or_default();

        extraction
            .courses
            .push(CourseRecord::new(unit, title, description));
    }

    extraction
}

fn text_after(element: ElementRef) -> String {
    let Some(sibling) = element.next_sibling() else {
        return String::new();
    };

    match sibling.value() {
        Node::Text(text) => text.trim().to_string(),
        Node::Element(_) => ElementRef::wrap(sibling)
            .map(|e| elem_text(e).trim().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
