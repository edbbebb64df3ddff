// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! What a results publisher's pages look like.

use std::borrow::Cow;
use scraper::Html;
use url::Url;
use crate::download::PageFetcher;
use crate::errors::{ScrapeError, StructuralIssue};
use crate::municipality::{ElectoralCounters, MunicipalityRecord, PartyName, PartyVotes};

/// Knowledge of the markup of one publisher's results pages.
///
/// There are three kinds of page:
/// * the district list, enumerating every district (LAU1) listing page,
/// * a listing page, enumerating the municipalities (LAU2) in a district,
/// * a detail page, with the counters and party votes for one municipality.
///
/// The parse functions are given an already parsed document and report what is wrong
/// with it; the caller knows which url it came from.
pub trait ResultsPageLayout {
    /// the name of the election, e.g. "Czech Chamber of Deputies 2017"
    fn name(&self) -> Cow<'static, str>;
    /// The page listing all the districts.
    fn district_list_url(&self) -> Url;
    /// Get the urls of all the district listing pages from the district list page.
    fn parse_district_list(&self,html:&Html) -> Result<Vec<Url>,StructuralIssue>;
    /// Get the municipalities, in document order, from a district's listing page.
    fn parse_listing(&self,html:&Html) -> Result<Vec<MunicipalityRecord>,StructuralIssue>;
    /// Get the fixed counters from a detail page.
    fn parse_counters(&self,html:&Html) -> Result<ElectoralCounters,StructuralIssue>;
    /// Get the party names, in the order their votes appear, from a detail page.
    fn parse_party_names(&self,html:&Html) -> Result<Vec<PartyName>,StructuralIssue>;
    /// Get the votes per party from a detail page.
    fn parse_party_votes(&self,html:&Html) -> Result<PartyVotes,StructuralIssue>;

    /// Check that `source` is one of the districts this publisher lists, returning it parsed.
    /// Only the district list page is fetched.
    fn validate_district(&self,fetcher:&dyn PageFetcher,source:&str) -> Result<Url,ScrapeError> {
        let list_url = self.district_list_url();
        let invalid = |known_districts:usize| ScrapeError::InvalidSource { source_url: source.to_string(), known_districts, list_url: list_url.to_string() };
        let url = Url::parse(source.trim()).map_err(|e|ScrapeError::SourceNotAUrl { source_url: source.to_string(), list_url: list_url.to_string(), source: e })?;
        let html = fetch_document(fetcher,&list_url)?;
        let districts = self.parse_district_list(&html).map_err(|issue|ScrapeError::structure(list_url.as_str(),issue))?;
        if districts.contains(&url) {
            tracing::info!("{} is one of {} districts for {}",url,districts.len(),self.name());
            Ok(url)
        } else { Err(invalid(districts.len())) }
    }
}

/// Fetch a page and parse it as HTML.
pub fn fetch_document(fetcher:&dyn PageFetcher,url:&Url) -> Result<Html,ScrapeError> {
    let markup = fetcher.fetch(url)?;
    Ok(Html::parse_document(&markup))
}
