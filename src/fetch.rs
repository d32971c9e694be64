// src/fetch.rs

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use tracing::{debug, info, instrument};

use crate::extract::extract_from_html;
use crate::row::Row;

/// Anything that can turn a URL into a page body or raw bytes.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String>;

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher. One request at a time, no retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching text from {}", url);
        self.client
            .get(url)
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .text()
            .with_context(|| format!("Reading text from {}", url))
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);
        let bytes = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {} failed", url))?
            .error_for_status()
            .with_context(|| format!("Non-success status {}", url))?
            .bytes()
            .with_context(|| format!("Reading body from {}", url))?;
        Ok(bytes.to_vec())
    }
}

/// Fetch every URL in order and concatenate the rows of each page's table.
/// Header rows are kept per page; the first failure aborts.
#[instrument(level = "info", skip(fetcher, urls), fields(pages = urls.len()))]
pub fn get_rows<F, S>(fetcher: &F, urls: &[S]) -> Result<Vec<Row>>
where
    F: PageFetcher + ?Sized,
    S: AsRef<str>,
{
    let mut rows = Vec::new();
    for url in urls {
        let url = url.as_ref();
        info!("Scraping {}", url);
        let html = fetcher.fetch(url)?;
        let page_rows =
            extract_from_html(&html).with_context(|| format!("extracting table from {}", url))?;
        debug!(url, rows = page_rows.len(), "page done");
        rows.extend(page_rows);
    }
    Ok(rows)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::normalize::{normalize, ScrapeOptions};
    use crate::row::RowKind;
    use anyhow::anyhow;
    use std::{cell::RefCell, collections::HashMap};

    /// Serves canned pages and records the order of requests.
    #[derive(Default)]
    pub(crate) struct FakeFetcher {
        pub pages: HashMap<String, String>,
        pub seen: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        pub fn with(pages: &[(&str, String)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(u, p)| (u.to_string(), p.clone()))
                    .collect(),
                seen: RefCell::default(),
            }
        }
    }

    impl PageFetcher for FakeFetcher {
        fn fetch(&self, url: &str) -> Result<String> {
            self.seen.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("404 {}", url))
        }

        fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.fetch(url).map(String::into_bytes)
        }
    }

    pub(crate) fn page(names: &[&str]) -> String {
        let mut body = String::from(
            r#"<table class="listofponies"><tr><th>Name</th><th>Kind</th><th>Image</th></tr>"#,
        );
        for n in names {
            body.push_str(&format!(
                r#"<tr><td>{n}</td><td>U</td><td><a href="/img/{n}.png">img</a></td></tr>"#
            ));
        }
        body.push_str("</table>");
        body
    }

    #[test]
    fn two_pages_concatenate_with_both_headers() -> Result<()> {
        let fetcher = FakeFetcher::with(&[
            ("http://a/", page(&["Lyra", "Bon Bon"])),
            ("http://b/", page(&["Unnamed Filly", "Derpy"])),
        ]);
        let rows = get_rows(&fetcher, &["http://a/", "http://b/"])?;
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].kind, RowKind::Header);
        assert_eq!(rows[3].kind, RowKind::Header);
        assert_eq!(rows[1].name(), Some("Lyra"));
        assert_eq!(rows[4].name(), Some("Unnamed Filly"));
        assert_eq!(*fetcher.seen.borrow(), vec!["http://a/", "http://b/"]);

        let kept = normalize(
            rows,
            &ScrapeOptions {
                known_only: true,
                ..Default::default()
            },
        );
        assert_eq!(kept.len(), 5);
        Ok(())
    }

    #[test]
    fn first_failure_stops_the_run() {
        let fetcher = FakeFetcher::with(&[("http://c/", page(&["Lyra"]))]);
        let err = get_rows(&fetcher, &["http://missing/", "http://c/"]).unwrap_err();
        assert!(err.to_string().contains("http://missing/"));
        assert_eq!(fetcher.seen.borrow().len(), 1);
    }

    #[test]
    fn page_without_table_names_the_url() {
        let fetcher = FakeFetcher::with(&[("http://d/", "<html></html>".to_string())]);
        let err = get_rows(&fetcher, &["http://d/"]).unwrap_err();
        assert!(format!("{:#}", err).contains("http://d/"));
    }
}
