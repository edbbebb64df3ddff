// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Parse the pages on volby.cz.
//!
//! The district list is a page like <https://volby.cz/pls/ps2017nss/ps3?xjazyk=CZ> with
//! links to listing pages like <https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101>.
//! Each listing page row looks like
//! ```html
//! <tr>
//!   <td class="cislo" headers="t1sa1 t1sb1"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=529303&amp;xvyber=2101">529303</a></td>
//!   <td class="overflow_name" headers="t1sa1 t1sb2">Benešov</td>
//!   <td class="center" headers="t1sa2"><a href="ps311?xjazyk=CZ&amp;xkraj=2&amp;xobec=529303&amp;xvyber=2101">X</a></td>
//! </tr>
//! ```
//! and the detail page it links to has a summary table of counters, each labelled by a `headers`
//! attribute (`sa2` registered voters, `sa3` issued envelopes, `sa6` valid votes), followed by
//! two tables of parties, left and right, with rows like
//! ```html
//! <tr>
//!   <td class="cislo" headers="t1sa1 t1sb1">1</td>
//!   <td class="overflow_name" headers="t1sa1 t1sb2">Občanská demokratická strana</td>
//!   <td class="cislo" headers="t1sa2 t1sb3">2&nbsp;577</td>
//!   <td class="cislo" headers="t1sa2 t1sb4">12,76</td>
//! </tr>
//! ```
//! (`t2…` in the right hand table).
//!
//! Warning - brittle! This all depends on volby.cz not changing its markup.

use std::borrow::Cow;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;
use results::errors::StructuralIssue;
use results::layout::ResultsPageLayout;
use results::municipality::{ElectoralCounters, MunicipalityCode, MunicipalityRecord, PartyName, PartyVotes};
use results::parse_util::{parse_count, resolve_link, text_content};

/// Where to find one of the counters on a detail page. The cell labelled with `header`
/// in its `headers` attribute is used; if no cell is so labelled, the cell at `position`
/// (starting from 0) amongst the numeric cells of the summary table.
#[derive(Debug,Clone,Copy)]
pub struct CounterCell {
    /// human readable name, for error messages
    pub field : &'static str,
    pub header : &'static str,
    pub position : usize,
}

#[derive(Debug,Clone,Copy)]
pub struct CounterCells {
    pub registered_voters : CounterCell,
    pub issued_envelopes : CounterCell,
    pub valid_votes : CounterCell,
}

/// The only place that knows where the counters are. The first three numeric cells are
/// the number of polling stations, those that have reported, and the percentage reported.
pub const COUNTER_CELLS : CounterCells = CounterCells {
    registered_voters: CounterCell { field: "registered voters", header: "sa2", position: 3 },
    issued_envelopes: CounterCell { field: "issued envelopes", header: "sa3", position: 4 },
    valid_votes: CounterCell { field: "valid votes", header: "sa6", position: 7 },
};

/// Labels of the cells containing the number of votes for a party, left and right table.
pub const PARTY_VOTE_HEADERS : [&str;2] = ["t1sb3","t2sb3"];

/// Links on the district list page to district listing pages contain this.
pub const DISTRICT_LINK_MARKER : &str = "ps32";

/// The district list page, relative to the base url.
pub const DISTRICT_LIST_PAGE : &str = "ps3?xjazyk=CZ";

const NUMERIC_CLASS : &str = "cislo";
const NAME_CLASS : &str = "overflow_name";

static SELECT_TABLE : Lazy<Selector> = Lazy::new(||Selector::parse("table").unwrap());
static SELECT_ROW : Lazy<Selector> = Lazy::new(||Selector::parse("tr").unwrap());
static SELECT_NUMERIC_CELL : Lazy<Selector> = Lazy::new(||Selector::parse("td.cislo").unwrap());
static SELECT_LABELLED_CELL : Lazy<Selector> = Lazy::new(||Selector::parse("td[headers]").unwrap());
static SELECT_ANCHOR : Lazy<Selector> = Lazy::new(||Selector::parse("a[href]").unwrap());

/// The layout of a Chamber of Deputies election on volby.cz. Different years differ only in base url.
#[derive(Debug,Clone)]
pub struct VolbyCzLayout {
    name : Cow<'static,str>,
    base : Url,
    district_list : Url,
}

impl VolbyCzLayout {
    /// `base` is the directory containing the pages, e.g. `https://volby.cz/pls/ps2017nss/`.
    pub fn new(name:impl Into<Cow<'static,str>>,base:&str) -> Result<Self,url::ParseError> {
        let base = Url::parse(base)?;
        let district_list = base.join(DISTRICT_LIST_PAGE)?;
        Ok(VolbyCzLayout{ name: name.into(), base, district_list })
    }

    pub fn base_url(&self) -> &Url { &self.base }
}

/// Whether the `headers` attribute of a cell contains a given token.
fn has_header(cell:&ElementRef<'_>,header:&str) -> bool {
    cell.value().attr("headers").map(|h|h.split_whitespace().any(|t|t==header)).unwrap_or(false)
}

fn has_class(cell:&ElementRef<'_>,class:&str) -> bool {
    cell.value().classes().any(|c|c==class)
}

/// The td elements directly in a row (not in some table nested inside it).
fn cells_of_row<'a>(row:ElementRef<'a>) -> impl Iterator<Item=ElementRef<'a>> {
    row.children().filter_map(ElementRef::wrap).filter(|e|e.value().name()=="td")
}

/// A row in one of the party tables.
struct PartyRow<'a> {
    name : Option<ElementRef<'a>>,
    votes : ElementRef<'a>,
}

/// The rows of the left then the right party tables, in document order. Rows without a
/// party vote cell (headings) are skipped.
fn party_rows(html:&Html) -> Result<Vec<PartyRow<'_>>,StructuralIssue> {
    let mut res = vec![];
    for row in html.select(&SELECT_ROW) {
        let Some(votes) = cells_of_row(row).find(|e|PARTY_VOTE_HEADERS.iter().any(|h|has_header(e,h))) else { continue };
        let name = cells_of_row(row).find(|e|has_class(e,NAME_CLASS));
        res.push(PartyRow{name,votes});
    }
    if res.is_empty() { Err(StructuralIssue::MissingElement("party results table")) } else { Ok(res) }
}

/// The numeric cells of the summary table, which is the first table with numeric cells.
fn summary_cells(html:&Html) -> Vec<ElementRef<'_>> {
    html.select(&SELECT_TABLE)
        .map(|table|table.select(&SELECT_NUMERIC_CELL).collect::<Vec<_>>())
        .find(|cells|!cells.is_empty())
        .unwrap_or_default()
}

fn find_counter(html:&Html,summary:&[ElementRef<'_>],cell:&CounterCell) -> Result<usize,StructuralIssue> {
    let labelled = html.select(&SELECT_LABELLED_CELL).find(|e|has_header(e,cell.header));
    let element = labelled.or_else(||summary.get(cell.position).copied()).ok_or(StructuralIssue::MissingElement(cell.field))?;
    parse_count(cell.field,&text_content(&element))
}

impl ResultsPageLayout for VolbyCzLayout {
    fn name(&self) -> Cow<'static, str> { self.name.clone() }

    fn district_list_url(&self) -> Url { self.district_list.clone() }

    fn parse_district_list(&self, html: &Html) -> Result<Vec<Url>, StructuralIssue> {
        let mut res = vec![];
        for a in html.select(&SELECT_ANCHOR) {
            if let Some(href) = a.value().attr("href") {
                if href.contains(DISTRICT_LINK_MARKER) { res.push(resolve_link(&self.base,href)?); }
            }
        }
        if res.is_empty() { Err(StructuralIssue::MissingElement("district link")) } else { Ok(res) }
    }

    fn parse_listing(&self, html: &Html) -> Result<Vec<MunicipalityRecord>, StructuralIssue> {
        let mut res = vec![];
        for row in html.select(&SELECT_ROW) {
            let Some(code_cell) = cells_of_row(row).find(|e|has_class(e,NUMERIC_CLASS)) else { continue }; // heading or summary row
            let code_text = text_content(&code_cell);
            let code : MunicipalityCode = code_text.parse().map_err(|_|StructuralIssue::NotANumber { field: "municipality code", text: code_text.clone() })?;
            let name_cell = cells_of_row(row).find(|e|has_class(e,NAME_CLASS)).ok_or(StructuralIssue::MissingElement("municipality name"))?;
            let href = code_cell.select(&SELECT_ANCHOR).next().and_then(|a|a.value().attr("href")).ok_or(StructuralIssue::MissingLink { code })?;
            res.push(MunicipalityRecord{
                code,
                name: text_content(&name_cell),
                detail_url: resolve_link(&self.base,href)?,
            });
        }
        Ok(res)
    }

    fn parse_counters(&self, html: &Html) -> Result<ElectoralCounters, StructuralIssue> {
        let summary = summary_cells(html);
        Ok(ElectoralCounters{
            registered_voters: find_counter(html,&summary,&COUNTER_CELLS.registered_voters)?,
            issued_envelopes: find_counter(html,&summary,&COUNTER_CELLS.issued_envelopes)?,
            valid_votes: find_counter(html,&summary,&COUNTER_CELLS.valid_votes)?,
        })
    }

    fn parse_party_names(&self, html: &Html) -> Result<Vec<PartyName>, StructuralIssue> {
        party_rows(html)?.iter().map(|row|row.name.as_ref().map(text_content).ok_or(StructuralIssue::MissingElement("party name"))).collect()
    }

    fn parse_party_votes(&self, html: &Html) -> Result<PartyVotes, StructuralIssue> {
        let votes = party_rows(html)?.iter().map(|row|parse_count("party votes",&text_content(&row.votes))).collect::<Result<Vec<_>,_>>()?;
        Ok(PartyVotes(votes))
    }
}
