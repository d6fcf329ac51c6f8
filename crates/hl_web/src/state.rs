use hl_scrapers::BbcTopicScraper;

pub struct AppState {
    pub scraper: BbcTopicScraper,
}

impl AppState {
    pub fn new(scraper: BbcTopicScraper) -> Self {
        Self { scraper }
    }
}
