// Copyright 2023-2024 Anky.
// This file is part of anky-deploy.

// anky-deploy is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// Anky is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with anky-deploy.  If not, see <http://www.gnu.org/licenses/>.

use crate::{error::Error, Result};
use serde::{Deserialize, Serialize};

pub const NETWORK_ENV: &str = "NETWORK";
pub const DEFAULT_NETWORK: &str = "local";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

#[derive(Clone, Debug, Deserialize, Serialize, Default)]
pub struct Config {
  pub chain_id: u64,
  pub eth_url: String,
  /// Fixed gas price in wei; the node's suggestion is used when unset.
  pub gas_price: Option<u64>,
  /// Confirmations to wait for after a creation transaction.
  pub confirmations: Option<usize>,
  pub artifacts_dir: Option<String>,
  pub explorer: Option<ExplorerConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ExplorerConfig {
  pub api_url: String,
  pub browser_url: String,
  /// Name of the env var holding the explorer API key.
  pub api_key_env: String,
}

impl Config {
  pub fn artifacts(&self) -> &str {
    self
      .artifacts_dir
      .as_deref()
      .unwrap_or(DEFAULT_ARTIFACTS_DIR)
  }
}

// utils for binaries
pub fn active_network() -> String {
  std::env::var(NETWORK_ENV).unwrap_or_else(|_| DEFAULT_NETWORK.to_string())
}

// utils for binaries
pub fn load_config(network: &str) -> Result<Config> {
  let fp = format!("config/config.{}.json", network);
  let mut settings = config::Config::default();
  settings
    .merge(config::File::with_name(fp.as_str()))
    .map_err(|e| Error::Config(format!("could not read {}: {}", fp, e)))?;
  settings
    .try_into::<Config>()
    .map_err(|e| Error::Config(format!("invalid network config {}: {}", fp, e)))
}
