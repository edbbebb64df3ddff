// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Things that can go wrong. Any of them aborts the whole run; there is no partial output.

use std::path::PathBuf;
use thiserror::Error;
use crate::municipality::MunicipalityCode;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("{source_url} is not one of the {known_districts} district pages listed at {list_url}")]
    InvalidSource{ source_url : String, known_districts : usize, list_url : String },
    #[error("{source_url} is not a url. Expecting a district page from {list_url}")]
    SourceNotAUrl{ source_url : String, list_url : String, #[source] source : url::ParseError },
    #[error("Destination {0:?} must have the extension .csv")]
    InvalidDestination(PathBuf),
    #[error("Could not download {url}")]
    TransportFailure{ url : String, #[source] source : Box<dyn std::error::Error + Send + Sync> },
    #[error("Page {url} does not have the expected structure : {issue}")]
    StructuralMismatch{ url : String, #[source] issue : StructuralIssue },
    #[error("Could not write {path:?}")]
    Export{ path : PathBuf, #[source] source : csv::Error },
}

impl ScrapeError {
    pub fn transport<E:Into<Box<dyn std::error::Error + Send + Sync>>>(url:&str,error:E) -> Self {
        ScrapeError::TransportFailure{ url: url.to_string(), source: error.into() }
    }
    pub fn structure(url:&str,issue:StructuralIssue) -> Self {
        ScrapeError::StructuralMismatch { url: url.to_string(), issue }
    }
}

/// Ways a page can differ from the layout we expect.
#[derive(Error, Debug, PartialEq)]
pub enum StructuralIssue {
    #[error("No {0} found")]
    MissingElement(&'static str),
    #[error("Municipality {code} has no link to its results")]
    MissingLink{ code : MunicipalityCode },
    #[error("Link {href} can not be resolved")]
    BadLink{ href : String },
    #[error("The {field} {text:?} is not a number")]
    NotANumber{ field : &'static str, text : String },
    #[error("Found {found} party vote counts, expecting {expected}")]
    PartyCountMismatch{ expected : usize, found : usize },
    #[error("Party #{index} is {found:?}, expecting {expected:?}")]
    PartyNameMismatch{ index : usize, expected : String, found : String },
    #[error("No municipalities listed")]
    NoMunicipalities,
    #[error("No parties listed")]
    NoParties,
    #[error("Have results for {found} municipalities, expecting {municipalities}")]
    RowCountMismatch{ municipalities : usize, found : usize },
}
