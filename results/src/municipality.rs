// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Information about the municipalities in a district, and what was counted in each.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// The official numeric code of a municipality (LAU2), e.g. 529303 for Benešov.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MunicipalityCode(pub u32);
// type alias really, don't want long display
impl fmt::Display for MunicipalityCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for MunicipalityCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

impl FromStr for MunicipalityCode {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MunicipalityCode(s.trim().parse()?))
    }
}

/// A municipality as listed on a district's listing page.
#[derive(Debug,Clone,PartialEq)]
pub struct MunicipalityRecord {
    pub code : MunicipalityCode,
    pub name : String,
    /// where the detailed results for this municipality are published.
    pub detail_url : Url,
}

/// The fixed counters published for every municipality.
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default)]
pub struct ElectoralCounters {
    /// Number of people on the electoral roll.
    pub registered_voters : usize,
    /// Number of envelopes (ballot papers) handed out.
    pub issued_envelopes : usize,
    /// Number of valid votes, which should be the sum of the party votes.
    pub valid_votes : usize,
}

/// The name of a party as shown in the results tables. Used as a column heading.
pub type PartyName = String;

/// Votes for each party in one municipality, in the same order as the canonical party list.
#[derive(Debug,Clone,PartialEq,Eq,Default)]
pub struct PartyVotes(pub Vec<usize>);

impl PartyVotes {
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    /// Sum of the votes. Saturates rather than overflows on absurd input.
    pub fn total(&self) -> usize { self.0.iter().fold(0usize,|a,v|a.saturating_add(*v)) }
}
