// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Getting pages. This is the only place the network is touched.

use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;
use crate::errors::ScrapeError;

/// Something that can get the markup of a page given its url.
pub trait PageFetcher {
    fn fetch(&self,url:&Url) -> Result<String,ScrapeError>;
}

/// Download a url using Reqwest. One request at a time, no retries.
pub struct DownloadWithReqwest {
    client : reqwest::blocking::Client,
}

impl DownloadWithReqwest {
    pub fn new() -> Result<Self,ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .gzip(true)
            .user_agent(concat!("ElectionScraper/",env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e|ScrapeError::transport("(client construction)",e))?;
        Ok(DownloadWithReqwest{client})
    }
}

impl PageFetcher for DownloadWithReqwest {
    fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        tracing::info!("Downloading {} with reqwest",url);
        let response = self.client.get(url.clone()).send()
            .and_then(|r|r.error_for_status())
            .map_err(|e|ScrapeError::transport(url.as_str(),e))?;
        response.text().map_err(|e|ScrapeError::transport(url.as_str(),e))
    }
}

/// Pages held in memory, keyed by url. Remembers what was asked for, in order.
/// Asking for a url that is not present is a transport failure, just like a 404.
#[derive(Default)]
pub struct InMemoryPages {
    pages : HashMap<String,String>,
    requested : RefCell<Vec<String>>,
}

impl InMemoryPages {
    pub fn new() -> Self { Self::default() }

    /// Add a page. The url is normalized by parsing so that it will match a resolved link.
    pub fn insert(&mut self,url:&str,markup:impl Into<String>) -> Result<(),url::ParseError> {
        let url = Url::parse(url)?;
        self.pages.insert(url.to_string(),markup.into());
        Ok(())
    }

    /// The urls fetched so far, in order, including ones that failed.
    pub fn requested(&self) -> Vec<String> { self.requested.borrow().clone() }
}

impl PageFetcher for InMemoryPages {
    fn fetch(&self, url: &Url) -> Result<String, ScrapeError> {
        self.requested.borrow_mut().push(url.to_string());
        self.pages.get(url.as_str()).cloned().ok_or_else(||ScrapeError::transport(url.as_str(),format!("No page stored for {}",url)))
    }
}
