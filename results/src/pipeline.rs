// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Extract all the results for a district into one table.
//!
//! Pages are fetched one at a time, in the order the municipalities are listed,
//! and rows come out in that same order. Any failure aborts the whole extraction.

use std::path::Path;
use scraper::Html;
use url::Url;
use crate::download::PageFetcher;
use crate::errors::{ScrapeError, StructuralIssue};
use crate::layout::{fetch_document, ResultsPageLayout};
use crate::municipality::PartyName;
use crate::result_table::ResultTable;

#[derive(Debug,Clone)]
pub struct ExtractOptions {
    /// A detail page to take the party names from. If None, the first municipality's page is used.
    pub party_names_page : Option<Url>,
    /// Whether each page's party names should be compared to the canonical list, not just their number.
    pub check_party_names : bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions{ party_names_page: None, check_party_names: true }
    }
}

/// The output must be a .csv file.
pub fn check_destination(path:&Path) -> Result<(),ScrapeError> {
    if path.to_string_lossy().ends_with(".csv") { Ok(()) }
    else { Err(ScrapeError::InvalidDestination(path.to_path_buf())) }
}

/// Check the destination, check the source is a known district, extract it and save it.
/// Nothing is fetched if the destination is bad, nothing but the district list is fetched
/// if the source is bad, and nothing is written unless every page was extracted.
pub fn run(layout:&dyn ResultsPageLayout,fetcher:&dyn PageFetcher,source:&str,destination:&Path,options:&ExtractOptions) -> Result<ResultTable,ScrapeError> {
    check_destination(destination)?;
    let district = layout.validate_district(fetcher,source)?;
    let table = extract_district(layout,fetcher,&district,options)?;
    table.save_csv(destination)?;
    Ok(table)
}

/// Get the canonical party list from a detail page.
fn canonical_party_names(layout:&dyn ResultsPageLayout,html:&Html,url:&Url) -> Result<Vec<PartyName>,ScrapeError> {
    let names = layout.parse_party_names(html).map_err(|issue|ScrapeError::structure(url.as_str(),issue))?;
    if names.is_empty() { return Err(ScrapeError::structure(url.as_str(),StructuralIssue::NoParties)); }
    tracing::info!(count = names.len(), "Parties taken from {}",url);
    Ok(names)
}

/// Each page is assumed to list the same parties in the same order. Make sure.
fn check_same_parties(canonical:&[PartyName],found:&[PartyName]) -> Result<(),StructuralIssue> {
    if canonical.len()!=found.len() { return Err(StructuralIssue::PartyCountMismatch { expected: canonical.len(), found: found.len() }); }
    match canonical.iter().zip(found).position(|(a,b)|a!=b) {
        Some(index) => Err(StructuralIssue::PartyNameMismatch { index, expected: canonical[index].clone(), found: found[index].clone() }),
        None => Ok(()),
    }
}

/// Find the municipalities in a district, and extract the counters and party votes for each.
pub fn extract_district(layout:&dyn ResultsPageLayout,fetcher:&dyn PageFetcher,district:&Url,options:&ExtractOptions) -> Result<ResultTable,ScrapeError> {
    let listing = fetch_document(fetcher,district)?;
    let municipalities = layout.parse_listing(&listing).map_err(|issue|ScrapeError::structure(district.as_str(),issue))?;
    let Some(first) = municipalities.first() else { return Err(ScrapeError::structure(district.as_str(),StructuralIssue::NoMunicipalities)) };
    tracing::info!(count = municipalities.len(), "Found municipalities in {}",district);
    // the first detail page is kept if it was needed for the party names, so it is not downloaded twice.
    let mut first_page : Option<Html> = None;
    let parties = match &options.party_names_page {
        Some(url) => canonical_party_names(layout,&fetch_document(fetcher,url)?,url)?,
        None => {
            let html = fetch_document(fetcher,&first.detail_url)?;
            let names = canonical_party_names(layout,&html,&first.detail_url)?;
            first_page = Some(html);
            names
        }
    };
    let mut counters = Vec::with_capacity(municipalities.len());
    let mut votes = Vec::with_capacity(municipalities.len());
    for municipality in &municipalities {
        let url = &municipality.detail_url;
        let html = match first_page.take() {
            Some(html) => html,
            None => fetch_document(fetcher,url)?,
        };
        let structure = |issue:StructuralIssue| ScrapeError::structure(url.as_str(),issue);
        let municipality_counters = layout.parse_counters(&html).map_err(structure)?;
        let municipality_votes = layout.parse_party_votes(&html).map_err(structure)?;
        if municipality_votes.len()!=parties.len() {
            return Err(structure(StructuralIssue::PartyCountMismatch { expected: parties.len(), found: municipality_votes.len() }));
        }
        if options.check_party_names {
            let names = layout.parse_party_names(&html).map_err(structure)?;
            check_same_parties(&parties,&names).map_err(structure)?;
        }
        tracing::debug!(code = %municipality.code, valid = municipality_counters.valid_votes, party_total = municipality_votes.total(), "{}",municipality.name);
        counters.push(municipality_counters);
        votes.push(municipality_votes);
    }
    ResultTable::assemble(parties,municipalities,counters,votes)
}
