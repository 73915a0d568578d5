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
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Ledger file kept next to the deployment scripts. Downstream services
/// read this file, so the on-disk shape is part of the contract.
pub const DEFAULT_LEDGER_PATH: &str = "deploymentData.json";

/// What we keep for one deployed contract instance.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
  pub address: String,
  pub deployer: String,
  pub deployment_hash: String,
}

/// Contract name -> record. A BTreeMap so reruns serialize identically
/// no matter the order contracts were recorded in.
pub type DeploymentLedger = BTreeMap<String, DeploymentRecord>;

/// Persistence seam for the ledger. One record operation is a full
/// load-merge-save cycle; a second record for the same contract name
/// replaces the first wholesale.
pub trait LedgerStore {
  fn load(&self) -> Result<DeploymentLedger>;
  fn save(&self, ledger: &DeploymentLedger) -> Result<()>;

  fn record(&self, name: &str, address: &str, deployer: &str, deployment_hash: &str) -> Result<()> {
    let fields = [
      ("contract name", name),
      ("address", address),
      ("deployer", deployer),
      ("deployment hash", deployment_hash),
    ];
    for (label, value) in fields.iter() {
      if value.is_empty() {
        return Err(Error::Config(format!(
          "deployment record rejected: empty {}",
          label
        )));
      }
    }
    let mut ledger = self.load()?;
    ledger.insert(
      name.to_string(),
      DeploymentRecord {
        address: address.to_string(),
        deployer: deployer.to_string(),
        deployment_hash: deployment_hash.to_string(),
      },
    );
    self.save(&ledger)
  }
}

/// The production store: a single pretty-printed JSON document.
pub struct JsonFileStore {
  path: PathBuf,
}

impl JsonFileStore {
  pub fn new<P: Into<PathBuf>>(path: P) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl Default for JsonFileStore {
  fn default() -> Self {
    Self::new(DEFAULT_LEDGER_PATH)
  }
}

impl LedgerStore for JsonFileStore {
  // A missing or empty file is a fresh ledger. A file that exists but
  // does not parse is not: rewriting it would discard deployment
  // history, so that aborts the run instead.
  fn load(&self) -> Result<DeploymentLedger> {
    let raw = match std::fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(DeploymentLedger::new()),
      Err(e) => {
        return Err(Error::Config(format!(
          "could not read ledger {}: {}",
          self.path.display(),
          e
        )))
      }
    };
    if raw.trim().is_empty() {
      return Ok(DeploymentLedger::new());
    }
    serde_json::from_str(&raw).map_err(|e| {
      Error::Config(format!(
        "malformed ledger {}: {}",
        self.path.display(),
        e
      ))
    })
  }

  fn save(&self, ledger: &DeploymentLedger) -> Result<()> {
    let pretty = serde_json::to_string_pretty(ledger)
      .map_err(|e| Error::Config(format!("could not serialize ledger: {}", e)))?;
    std::fs::write(&self.path, pretty).map_err(|e| {
      Error::Config(format!(
        "could not write ledger {}: {}",
        self.path.display(),
        e
      ))
    })?;
    log::debug!("ledger written to {}", self.path.display());
    Ok(())
  }
}

/// In-memory store, no filesystem contact.
#[derive(Default)]
pub struct MemoryStore {
  inner: Mutex<DeploymentLedger>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl LedgerStore for MemoryStore {
  fn load(&self) -> Result<DeploymentLedger> {
    let inner = self
      .inner
      .lock()
      .map_err(|_| Error::Config("ledger store mutex poisoned".to_string()))?;
    Ok(inner.clone())
  }

  fn save(&self, ledger: &DeploymentLedger) -> Result<()> {
    let mut inner = self
      .inner
      .lock()
      .map_err(|_| Error::Config("ledger store mutex poisoned".to_string()))?;
    *inner = ledger.clone();
    Ok(())
  }
}
