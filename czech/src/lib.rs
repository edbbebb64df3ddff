// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! Results of Czech Chamber of Deputies elections as published on https://volby.cz

use crate::parse_volby::VolbyCzLayout;

pub mod parse_volby;

pub const PS2017_BASE_URL : &str = "https://volby.cz/pls/ps2017nss/";
pub const PS2021_BASE_URL : &str = "https://volby.cz/pls/ps2021/";

pub fn get_volby_layout_ps2017() -> Result<VolbyCzLayout,url::ParseError> {
    VolbyCzLayout::new("Czech Chamber of Deputies 2017",PS2017_BASE_URL)
}
pub fn get_volby_layout_ps2021() -> Result<VolbyCzLayout,url::ParseError> {
    VolbyCzLayout::new("Czech Chamber of Deputies 2021",PS2021_BASE_URL)
}
