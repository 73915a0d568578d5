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

//! Source verification against BaseScan's Etherscan-compatible API.
//! The compiler input is replayed verbatim from the artifact's
//! build-info file, so what the explorer compiles is exactly what was
//! deployed.

use crate::artifact::{self, Artifact};
use crate::config::{Config, ExplorerConfig};
use crate::deployer::Deployed;
use crate::error::Error;
use crate::Result;
use serde::Deserialize;
use std::time::Duration;

pub const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const STATUS_POLL_LIMIT: usize = 20;

// Both verifysourcecode and checkverifystatus answer in this envelope.
// status "1" is success, anything else carries the reason in result.
#[derive(Debug, Deserialize)]
struct ApiResponse {
  status: String,
  message: String,
  result: String,
}

pub struct VerifyClient {
  http: reqwest::Client,
  api_url: String,
  api_key: String,
}

impl VerifyClient {
  pub fn new(explorer: &ExplorerConfig) -> Result<Self> {
    let api_key = std::env::var(&explorer.api_key_env).map_err(|_| {
      Error::Config(format!(
        "{} must be set for verification",
        explorer.api_key_env
      ))
    })?;
    Ok(Self {
      http: reqwest::Client::new(),
      api_url: explorer.api_url.clone(),
      api_key,
    })
  }

  /// Submit the standard-JSON verification request and poll the
  /// returned guid until the explorer reaches a terminal answer.
  pub async fn verify(
    &self,
    artifacts_dir: &str,
    artifact: &Artifact,
    address: &str,
    ctor_args_hex: &str,
  ) -> Result<()> {
    let build_info = artifact::load_build_info(artifacts_dir, &artifact.contract_name)?;
    let source = serde_json::to_string(&build_info.input)
      .map_err(|e| Error::Verification(format!("could not serialize compiler input: {}", e)))?;
    let contract_path = format!("{}:{}", artifact.source_name, artifact.contract_name);
    let compiler = format!("v{}", build_info.solc_long_version);

    let form = [
      ("apikey", self.api_key.as_str()),
      ("module", "contract"),
      ("action", "verifysourcecode"),
      ("contractaddress", address),
      ("sourceCode", source.as_str()),
      ("codeformat", "solidity-standard-json-input"),
      ("contractname", contract_path.as_str()),
      ("compilerversion", compiler.as_str()),
      // sic, the API spells it this way
      ("constructorArguements", ctor_args_hex),
    ];
    let resp = self.post(&form).await?;

    if resp.status != "1" {
      if already_verified(&resp.result) {
        log::info!("{} already verified", artifact.contract_name);
        return Ok(());
      }
      return Err(Error::Verification(format!(
        "{} submission rejected: {} {}",
        artifact.contract_name, resp.message, resp.result
      )));
    }
    self.poll_status(&resp.result, &artifact.contract_name).await
  }

  async fn poll_status(&self, guid: &str, name: &str) -> Result<()> {
    for _ in 0..STATUS_POLL_LIMIT {
      tokio::time::sleep(STATUS_POLL_INTERVAL).await;
      let form = [
        ("apikey", self.api_key.as_str()),
        ("module", "contract"),
        ("action", "checkverifystatus"),
        ("guid", guid),
      ];
      let resp = self.post(&form).await?;
      let lowered = resp.result.to_lowercase();
      if lowered.contains("pending") || lowered.contains("queue") {
        log::debug!("{} verification pending", name);
        continue;
      }
      if resp.status == "1" || already_verified(&resp.result) {
        log::info!("{} verified: {}", name, resp.result);
        return Ok(());
      }
      return Err(Error::Verification(format!(
        "{} not verified: {}",
        name, resp.result
      )));
    }
    Err(Error::Verification(format!(
      "{} verification still pending after {} polls",
      name, STATUS_POLL_LIMIT
    )))
  }

  async fn post(&self, form: &[(&str, &str)]) -> Result<ApiResponse> {
    self
      .http
      .post(&self.api_url)
      .form(form)
      .send()
      .await
      .map_err(|e| Error::Verification(format!("explorer unreachable: {}", e)))?
      .json::<ApiResponse>()
      .await
      .map_err(|e| Error::Verification(format!("bad explorer response: {}", e)))
  }
}

fn already_verified(result: &str) -> bool {
  result.to_lowercase().contains("already verified")
}

/// Best-effort wrapper for the drivers: a deployed and recorded
/// contract stays deployed and recorded whatever the explorer says, so
/// verification failures only warn. Networks without an explorer (and
/// runs without the API key in the environment) skip quietly.
pub async fn verify_deployed(conf: &Config, artifact: &Artifact, deployed: &Deployed) {
  let explorer = match conf.explorer.as_ref() {
    Some(explorer) => explorer,
    None => {
      log::info!("no explorer for this network, skipping verification of {}", deployed.name);
      return;
    }
  };
  let client = match VerifyClient::new(explorer) {
    Ok(client) => client,
    Err(e) => {
      log::info!("skipping verification of {}: {}", deployed.name, e);
      return;
    }
  };
  match client
    .verify(
      conf.artifacts(),
      artifact,
      &deployed.address_string(),
      &deployed.ctor_args_hex,
    )
    .await
  {
    Ok(()) => println!(
      "{} verified at {}/address/{}",
      deployed.name,
      explorer.browser_url,
      deployed.address_string()
    ),
    Err(e) => log::warn!("could not verify {}: {}", deployed.name, e),
  }
}
