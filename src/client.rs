use std::sync::Arc;
use std::time::Duration;

use log::{error, info};
use reqwest::blocking::Client;
use reqwest::cookie::Jar;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER,
    USER_AGENT,
};
use url::Url;

use crate::config::SiteConfig;
use crate::error::{Result, ScrapeError};

/// Filter keys the listing endpoint expects; always sent empty.
const FILTER_KEYS: [&str; 9] = [
    "keyword_search",
    "cuntryId",
    "InitialKey",
    "start_up_exhibitors",
    "type",
    "new_category",
    "new_sub_category",
    "new_sub_sub_category",
    "event_sector_value",
];

/// Where the scraper gets its HTML from.
///
/// `None` means "nothing usable": the loop treats it as end of data for a
/// listing page and as "skip enrichment" for a profile page.
pub trait PageSource {
    fn fetch_list_page(&self, offset: usize, page_size: usize) -> Option<String>;
    fn fetch_profile_page(&self, url: &str) -> Option<String>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch_list_page(&self, offset: usize, page_size: usize) -> Option<String> {
        (**self).fetch_list_page(offset, page_size)
    }

    fn fetch_profile_page(&self, url: &str) -> Option<String> {
        (**self).fetch_profile_page(url)
    }
}

/// Cookie-keeping HTTP session against the exhibitor directory.
pub struct SessionClient {
    client: Client,
    api_url: String,
}

/// Header set sent with every request of the session.
fn default_headers(site: &SiteConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9,fa;q=0.8"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert(ORIGIN, header_value("origin", &site.base_url)?);
    headers.insert(REFERER, header_value("referer", &site.referer())?);
    headers.insert(USER_AGENT, header_value("user-agent", &site.user_agent)?);
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    Ok(headers)
}

impl SessionClient {
    pub fn new(site: &SiteConfig) -> Result<Self> {
        let headers = default_headers(site)?;

        let base = Url::parse(&site.base_url)?;
        let jar = Jar::default();
        for (name, value) in &site.cookies {
            jar.add_cookie_str(&format!("{name}={value}"), &base);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .cookie_provider(Arc::new(jar))
            .build()?;

        Ok(SessionClient {
            client,
            api_url: site.api_url(),
        })
    }

    fn post_listing(&self, offset: usize, page_size: usize) -> Result<String> {
        let mut form = vec![
            ("limit", page_size.to_string()),
            ("start", offset.to_string()),
        ];
        form.extend(FILTER_KEYS.iter().map(|k| (*k, String::new())));

        let resp = self.client.post(&self.api_url).form(&form).send()?;
        read_body(resp)
    }

    fn get(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;
        read_body(resp)
    }
}

impl PageSource for SessionClient {
    fn fetch_list_page(&self, offset: usize, page_size: usize) -> Option<String> {
        match self.post_listing(offset, page_size) {
            Ok(body) => {
                info!("Fetched listing page (start={}, limit={})", offset, page_size);
                Some(body)
            }
            Err(e) => {
                error!("Failed to fetch listing page at start={}: {}", offset, e);
                None
            }
        }
    }

    fn fetch_profile_page(&self, url: &str) -> Option<String> {
        match self.get(url) {
            Ok(body) => {
                info!("Fetched profile page {}", url);
                Some(body)
            }
            Err(e) => {
                error!("Failed to fetch profile page {}: {}", url, e);
                None
            }
        }
    }
}

fn read_body(resp: reqwest::blocking::Response) -> Result<String> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp.text()?)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ScrapeError::Header(name.to_string()))
}
