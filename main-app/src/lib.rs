// Copyright 2024 Andrew Conway.
// This file is part of ElectionScraper.
// ElectionScraper is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ElectionScraper is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ElectionScraper.  If not, see <https://www.gnu.org/licenses/>.

//! This crate ties the results publishers to a command line.
//! It also contains the main binary.

use tracing_subscriber::EnvFilter;

pub mod results_source;

/// Send log messages to stderr, so stdout stays clean. `RUST_LOG` overrides the default level,
/// which is `info`, or `debug` if verbose. Fails if logging was already set up.
pub fn init_logging(verbose:bool) -> Result<(),Box<dyn std::error::Error + Send + Sync>> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_|EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).try_init()?;
    tracing::debug!(verbose, "Logging to stderr");
    Ok(())
}
