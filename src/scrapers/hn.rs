//! Hacker News listing scraper.
//!
//! Reads the server-rendered listing at
//! [news.ycombinator.com/newest](https://news.ycombinator.com/newest) and
//! follows its "More" link to reach older pages.
//!
//! # Page Structure
//!
//! Each story is a `tr.athing` row carrying the story id, followed by a
//! sibling row whose `.subtext` cell holds the score, submitter and age:
//!
//! ```text
//! <tr class="athing" id="4211">  .titleline > a  (title, href)
//! <tr>                             .subtext .score / .hnuser / .age
//! ...
//! <a class="morelink" href="newest?next=4180&n=31">More</a>
//! ```

use crate::collector::PageSource;
use crate::models::RawRecord;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A live listing, holding the current page as the pagination cursor.
#[derive(Debug)]
pub struct HnListing {
    client: Client,
    current_url: Url,
    /// Body of the current page, once loaded.
    body: Option<String>,
}

impl HnListing {
    /// Create a listing rooted at `listing_url`. Nothing is fetched until
    /// the first [`PageSource::fetch_page`] call.
    ///
    /// # Arguments
    ///
    /// * `listing_url` - Absolute URL of the first listing page
    /// * `timeout` - Per-request timeout
    /// * `user_agent` - `User-Agent` header sent with every request
    pub fn new(listing_url: &str, timeout: Duration, user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let current_url = Url::parse(listing_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            current_url,
            body: None,
        })
    }

    /// URL of the page the cursor currently points at.
    pub fn current_url(&self) -> &Url {
        &self.current_url
    }

    #[instrument(level = "info", skip(self), fields(%url))]
    async fn load(&self, url: &Url) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Loaded listing page");
        Ok(body)
    }
}

impl PageSource for HnListing {
    #[instrument(level = "info", skip(self), fields(url = %self.current_url))]
    async fn fetch_page(&mut self) -> Result<Vec<RawRecord>, Box<dyn Error>> {
        let body = match self.body.take() {
            Some(body) => body,
            None => self.load(&self.current_url).await?,
        };
        let rows = extract_rows(&body, &self.current_url)?;
        self.body = Some(body);

        info!(count = rows.len(), "Extracted listing rows");
        Ok(rows)
    }

    #[instrument(level = "info", skip(self), fields(url = %self.current_url))]
    async fn advance_page(&mut self) -> Result<bool, Box<dyn Error>> {
        let body = match self.body.take() {
            Some(body) => body,
            None => match self.load(&self.current_url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(error = %e, "Could not load current page; treating as last page");
                    return Ok(false);
                }
            },
        };
        let next = find_more_link(&body, &self.current_url)?;
        self.body = Some(body);

        let Some(next_url) = next else {
            info!("No further page");
            return Ok(false);
        };

        match self.load(&next_url).await {
            Ok(next_body) => {
                info!(next = %next_url, "Advanced to next page");
                self.current_url = next_url;
                self.body = Some(next_body);
                Ok(true)
            }
            Err(e) => {
                warn!(next = %next_url, error = %e, "Page transition failed; treating as last page");
                Ok(false)
            }
        }
    }
}

/// Text content of an element with surrounding whitespace removed.
fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract every story row from a listing page, top to bottom.
///
/// Missing parts of a row degrade to empty strings (`"0 points"` for the
/// score) instead of failing. Links are resolved against `page_url`.
pub fn extract_rows(html: &str, page_url: &Url) -> Result<Vec<RawRecord>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let row_selector = Selector::parse("tr.athing")?;
    let title_selector = Selector::parse(".titleline > a")?;
    let subtext_selector = Selector::parse(".subtext")?;
    let age_selector = Selector::parse(".age")?;
    let score_selector = Selector::parse(".score")?;
    let user_selector = Selector::parse(".hnuser")?;

    let mut rows = Vec::new();
    for row in document.select(&row_selector) {
        let id = row.value().attr("id").unwrap_or_default().to_string();

        let title_el = row.select(&title_selector).next();
        let title = title_el.map(inner_text).unwrap_or_default();
        let link = title_el
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| page_url.join(href).ok())
            .map(|u| u.to_string())
            .unwrap_or_default();

        let subtext = row
            .next_siblings()
            .find_map(ElementRef::wrap)
            .and_then(|tr| tr.select(&subtext_selector).next());
        let field = |selector: &Selector| {
            subtext
                .and_then(|sub| sub.select(selector).next())
                .map(inner_text)
                .filter(|text| !text.is_empty())
        };

        rows.push(RawRecord {
            id,
            title,
            link,
            age_text: field(&age_selector).unwrap_or_default(),
            points: field(&score_selector).unwrap_or_else(|| "0 points".to_string()),
            author: field(&user_selector).unwrap_or_default(),
        });
    }

    debug!(count = rows.len(), "Parsed listing rows");
    Ok(rows)
}

/// Resolve the listing's "More" link, if the page has one.
pub fn find_more_link(html: &str, page_url: &Url) -> Result<Option<Url>, Box<dyn Error>> {
    let document = Html::parse_document(html);
    let more_selector = Selector::parse("a.morelink")?;

    Ok(document
        .select(&more_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| page_url.join(href).ok()))
}
