// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Some utility routines that make parsing results pages easier.

use scraper::ElementRef;
use url::Url;
use crate::errors::StructuralIssue;

/// Get all the text in an element as a string, trimmed.
pub fn text_content(e:&ElementRef<'_>) -> String {
    e.text().collect::<Vec<_>>().join("").trim().to_string()
}

/// Parse a count like `1 234` where the thousands separator is some form of whitespace,
/// typically a non breaking space. `field` is used for the error message.
///
/// ```
/// use results::parse_util::parse_count;
/// assert_eq!(parse_count("valid votes","1\u{a0}234"),Ok(1234));
/// assert_eq!(parse_count("valid votes"," 17 "),Ok(17));
/// assert!(parse_count("valid votes","-").is_err());
/// ```
pub fn parse_count(field:&'static str,text:&str) -> Result<usize,StructuralIssue> {
    let digits : String = text.chars().filter(|c|!c.is_whitespace()).collect();
    digits.parse::<usize>().map_err(|_|StructuralIssue::NotANumber { field, text: text.to_string() })
}

/// Resolve a possibly relative link found in a page.
pub fn resolve_link(base:&Url,href:&str) -> Result<Url,StructuralIssue> {
    base.join(href.trim()).map_err(|_|StructuralIssue::BadLink { href: href.to_string() })
}
