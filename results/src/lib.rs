// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Generic machinery for turning published per-municipality election results pages
//! into one flat table. Nothing in here knows about a particular publisher's markup;
//! that lives behind the [layout::ResultsPageLayout] trait in a publisher specific crate.

pub mod municipality;
pub mod errors;
pub mod download;
pub mod parse_util;
pub mod layout;
pub mod result_table;
pub mod pipeline;
