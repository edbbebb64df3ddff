// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.


//! Extract the results for every municipality in a district into a .csv file.

use std::path::PathBuf;
use clap::Parser;
use url::Url;
use results::download::DownloadWithReqwest;
use results::pipeline::{run, ExtractOptions};
use main_app::results_source::ResultsSource;

#[derive(Parser)]
#[command(version, author = "Andrew Conway", name="election_scraper")]
/// Extract the results of every municipality in an electoral district from volby.cz
/// into a .csv file, one row per municipality and one column per party.
struct Opts {
    /// The url of the district's listing page, e.g.
    /// "https://volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101".
    /// If it is not one of the districts listed for the election, nothing is extracted.
    source : String,

    /// The .csv file to write the results to.
    destination : PathBuf,

    /// The election the source is from.
    /// Currently accepted PS2017, PS2021
    #[arg(long,default_value_t=ResultsSource::PS2017)]
    election : ResultsSource,

    /// An alternative base url to get the election's pages from, e.g. a mirror.
    #[arg(long)]
    base_url : Option<String>,

    /// A municipality results page to take the party names from.
    /// If not specified, the first municipality in the district is used.
    #[arg(long)]
    party_page : Option<Url>,

    /// Only check that each municipality has the same number of parties, not the same names.
    #[arg(long)]
    skip_party_name_check : bool,

    /// Log each municipality as it is extracted.
    #[arg(long)]
    verbose : bool,
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    main_app::init_logging(opt.verbose).map_err(|e|anyhow::anyhow!(e))?;
    let layout = opt.election.layout(opt.base_url.as_deref())?;
    let fetcher = DownloadWithReqwest::new()?;
    let options = ExtractOptions{ party_names_page: opt.party_page.clone(), check_party_names: !opt.skip_party_name_check };
    let table = run(&layout,&fetcher,&opt.source,&opt.destination,&options)?;
    tracing::info!(municipalities = table.rows().len(), parties = table.parties().len(), "Finished {} for {}",opt.destination.display(),opt.election);
    Ok(())
}
