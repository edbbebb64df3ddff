// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.


use std::fmt::{Display, Formatter};
use std::str::FromStr;
use czech::parse_volby::VolbyCzLayout;
use czech::{get_volby_layout_ps2017, get_volby_layout_ps2021};

/// The elections whose results pages can be extracted.
#[derive(Copy,Clone,Debug,PartialEq,Eq)]
pub enum ResultsSource {
    PS2017,
    PS2021,
}

impl FromStr for ResultsSource {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PS2017" => Ok(ResultsSource::PS2017),
            "PS2021" => Ok(ResultsSource::PS2021),
            _ => Err("No such election supported. Currently accepted PS2017, PS2021")
        }
    }
}

impl Display for ResultsSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResultsSource::PS2017 => "PS2017",
            ResultsSource::PS2021 => "PS2021",
        };
        f.write_str(s)
    }
}

impl ResultsSource {
    /// The page layout for this election, optionally with the pages served from somewhere else.
    pub fn layout(&self,base_override:Option<&str>) -> Result<VolbyCzLayout,url::ParseError> {
        match (self,base_override) {
            (ResultsSource::PS2017,None) => get_volby_layout_ps2017(),
            (ResultsSource::PS2021,None) => get_volby_layout_ps2021(),
            (_,Some(base)) => VolbyCzLayout::new(format!("{} from {}",self,base),base),
        }
    }
}
