use crate::parser::{ParseError, has_pagination, parse_courses, parse_page_count};
use crate::types::{CourseRecord, PageCount, UnitCode};

use reqwest::Client;
use std::time::Duration;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Pause after each successfully processed page.
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: crate::BASE_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            delay: Duration::from_secs(1),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
    base_url: String,
    delay: Duration,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        Self::with_config(ScraperConfig::default())
    }

    pub fn with_config(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delay: config.delay,
        })
    }

    pub fn listing_url(&self, unit: &UnitCode, page: u32) -> String {
        format!(
            "{}/academics/{}/courses/{}/",
            self.base_url,
            unit.slug(),
            page
        )
    }

    /// Number of listing pages for `unit`, or 0 when it has none or the
    /// first page could not be fetched or read.
    pub async fn resolve_page_count(&self, unit: &UnitCode) -> u32 {
        match self.fetch_page_count(unit).await {
            Ok(count) => count.total(),
            Err(e) => {
                log::error!("Error getting total pages for {}: {}", unit, e);
                0
            }
        }
    }

    async fn fetch_page_count(&self, unit: &UnitCode) -> Result<PageCount, ScraperError> {
        let url = self.listing_url(unit, 1);
        let html = self.get_html(&url).await?;
        let count = parse_page_count(&html)?;

        if !matches!(count, PageCount::Paginated(_)) {
            if has_pagination(&html) {
                log::warn!(
                    "Could not read pagination for {}, checking if single page exists",
                    url
                );
            } else {
                log::warn!(
                    "Could not find pagination for {}, checking if single page exists",
                    url
                );
            }
        }

        Ok(count)
    }

    pub async fn fetch_courses(
        &self,
        unit: &UnitCode,
        page: u32,
    ) -> Result<Vec<CourseRecord>, ScraperError> {
        let url = self.listing_url(unit, page);
        log::debug!("Fetching {} page {}: {}", unit, page, url);
        let html = self.get_html(&url).await?;
        let extraction = parse_courses(&html, unit);

        if extraction.skipped > 0 {
            log::debug!(
                "Skipped {} course item(s) without a title on {} page {}",
                extraction.skipped,
                unit,
                page
            );
        }

        Ok(extraction.courses)
    }

    /// Collects every course of `unit`, page by page.
    ///
    /// A page that fails to load is logged and left out; the remaining pages
    /// are still processed.
    pub async fn scrape_unit(&self, unit: &UnitCode) -> Vec<CourseRecord> {
        let total_pages = self.resolve_page_count(unit).await;
        log::info!("Found {} pages for {}", total_pages, unit);

        let mut courses = Vec::new();

        for page in 1..=total_pages {
            match self.fetch_courses(unit, page).await {
                Ok(items) => {
                    courses.extend(items);
                    tokio::time::sleep(self.delay).await;
                    log::info!("{}: Processed page {}/{}", unit, page, total_pages);
                }
                Err(e) => log::error!("Error on {} page {}: {}", unit, page, e),
            }
        }

        courses
    }

    async fn get_html(&self, url: &str) -> Result<String, ScraperError> {
        Ok(self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?)
    }
}
