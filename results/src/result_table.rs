// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! The flat table of results, one row per municipality, and writing it as CSV.

use std::io::Write;
use std::path::Path;
use crate::errors::{ScrapeError, StructuralIssue};
use crate::municipality::{ElectoralCounters, MunicipalityRecord, PartyName, PartyVotes};

/// The headings of the columns that precede the party columns.
pub const FIXED_COLUMNS : [&str;5] = ["Code","Name","Voters","Envelopes","Valid"];

/// Everything known about one municipality.
#[derive(Debug,Clone,PartialEq)]
pub struct ResultRow {
    pub municipality : MunicipalityRecord,
    pub counters : ElectoralCounters,
    pub votes : PartyVotes,
}

impl ResultRow {
    /// The cells of this row, in column order.
    pub fn to_record(&self) -> Vec<String> {
        let mut res = Vec::with_capacity(FIXED_COLUMNS.len()+self.votes.len());
        res.push(self.municipality.code.to_string());
        res.push(self.municipality.name.clone());
        res.push(self.counters.registered_voters.to_string());
        res.push(self.counters.issued_envelopes.to_string());
        res.push(self.counters.valid_votes.to_string());
        res.extend(self.votes.0.iter().map(|v|v.to_string()));
        res
    }
}

/// The whole district. Every row has exactly one vote count per party.
#[derive(Debug,Clone,PartialEq)]
pub struct ResultTable {
    parties : Vec<PartyName>,
    rows : Vec<ResultRow>,
}

impl ResultTable {
    /// Join parallel lists of municipalities, their counters and their party votes into rows,
    /// keeping the given order. Fails rather than produce a row of the wrong width.
    pub fn assemble(parties:Vec<PartyName>,municipalities:Vec<MunicipalityRecord>,counters:Vec<ElectoralCounters>,votes:Vec<PartyVotes>) -> Result<ResultTable,ScrapeError> {
        let num_municipalities = municipalities.len();
        for found in [counters.len(),votes.len()] {
            if found!=num_municipalities {
                // the first municipality without results, if any.
                let url = municipalities.get(found).map(|m|m.detail_url.to_string()).unwrap_or_default();
                return Err(ScrapeError::structure(&url,StructuralIssue::RowCountMismatch { municipalities: num_municipalities, found }));
            }
        }
        let mut table = ResultTable::new(parties);
        for ((municipality,counters),votes) in municipalities.into_iter().zip(counters).zip(votes) {
            table.push(ResultRow{municipality,counters,votes})?;
        }
        Ok(table)
    }

    /// An empty table with the given party columns.
    pub fn new(parties:Vec<PartyName>) -> Self { ResultTable{ parties, rows: vec![] } }

    /// Add a row to the end, checking it has a vote count for every party.
    pub fn push(&mut self,row:ResultRow) -> Result<(),ScrapeError> {
        if row.votes.len()!=self.parties.len() {
            return Err(ScrapeError::structure(row.municipality.detail_url.as_str(),StructuralIssue::PartyCountMismatch { expected: self.parties.len(), found: row.votes.len() }));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn parties(&self) -> &[PartyName] { &self.parties }
    pub fn rows(&self) -> &[ResultRow] { &self.rows }
    pub fn num_columns(&self) -> usize { FIXED_COLUMNS.len()+self.parties.len() }

    pub fn header(&self) -> Vec<String> {
        FIXED_COLUMNS.iter().map(|s|s.to_string()).chain(self.parties.iter().cloned()).collect()
    }

    /// Write as CSV, header first. Fields are quoted only when needed.
    pub fn write_csv<W:Write>(&self,out:W) -> Result<(),csv::Error> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(self.header())?;
        for row in &self.rows {
            writer.write_record(row.to_record())?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write as a CSV file. The whole file is encoded before anything is written to disk.
    pub fn save_csv(&self,path:&Path) -> Result<(),ScrapeError> {
        let export_error = |source:csv::Error| ScrapeError::Export { path: path.to_path_buf(), source };
        let mut encoded = vec![];
        self.write_csv(&mut encoded).map_err(export_error)?;
        std::fs::write(path,encoded).map_err(|e|export_error(e.into()))?;
        tracing::info!("Wrote {} rows of {} columns to {}",self.rows.len(),self.num_columns(),path.display());
        Ok(())
    }
}
