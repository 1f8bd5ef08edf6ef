pub mod batch;
pub mod output;
mod parser;
pub mod scraper;
pub mod types;

pub use batch::run_all;
pub use scraper::{ScraperConfig, ScraperError, WebScraper};

pub(crate) const BASE_URL: &str = "https://www.bu.edu";
