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

use crate::{error::Error, ledger::DeploymentLedger, Result};
use std::path::PathBuf;

// The sibling checkouts that consume the deployed addresses.
pub const SERVER_ENV_PATH: &str = "../server/.env";
pub const FRONTEND_ENV_PATH: &str = "../anky.lat/.env";

/// One `KEY=address` line: which ledger entry fills which env var.
#[derive(Clone, Debug)]
pub struct EnvLine {
  pub key: String,
  pub contract: String,
}

/// A destination env file and the lines it is built from.
#[derive(Clone, Debug)]
pub struct EnvTarget {
  pub path: PathBuf,
  pub lines: Vec<EnvLine>,
}

impl EnvTarget {
  pub fn new<P: Into<PathBuf>>(path: P, lines: &[(&str, &str)]) -> Self {
    Self {
      path: path.into(),
      lines: lines
        .iter()
        .map(|(key, contract)| EnvLine {
          key: (*key).to_string(),
          contract: (*contract).to_string(),
        })
        .collect(),
    }
  }

  /// Ledger keys this target cannot render without.
  pub fn required_keys(&self) -> Vec<&str> {
    self.lines.iter().map(|l| l.contract.as_str()).collect()
  }

  /// Substitute addresses into the target's lines. Any contract missing
  /// from the ledger fails the whole render; a file with a blank
  /// address in it is worse than no file.
  pub fn render(&self, ledger: &DeploymentLedger) -> Result<String> {
    let mut out = String::new();
    for line in &self.lines {
      let record = ledger.get(&line.contract).ok_or_else(|| {
        Error::Template(format!(
          "no ledger entry {} for {} in {}",
          line.contract,
          line.key,
          self.path.display()
        ))
      })?;
      out.push_str(&format!("{}={}\n", line.key, record.address));
    }
    Ok(out)
  }
}

/// Render every target, then write every target. Rendering all of them
/// up front means a missing ledger key leaves every destination
/// untouched rather than half the files regenerated. An unwritable
/// destination path is reported as a configuration error, not a
/// template error: the render itself was sound.
pub fn propagate(ledger: &DeploymentLedger, targets: &[EnvTarget]) -> Result<()> {
  let mut rendered = Vec::with_capacity(targets.len());
  for target in targets {
    rendered.push((&target.path, target.render(ledger)?));
  }
  for (path, text) in rendered {
    std::fs::write(path, text)
      .map_err(|e| Error::Config(format!("could not write {}: {}", path.display(), e)))?;
    log::info!("wrote {}", path.display());
  }
  Ok(())
}

/// The backend and frontend env files, with the exact variable names
/// those services read.
pub fn default_targets() -> Vec<EnvTarget> {
  vec![
    EnvTarget::new(
      SERVER_ENV_PATH,
      &[
        ("ANKY_AIRDROP_SMART_CONTRACT", "AnkyAirdrop"),
        ("ANKY_AIRDROP_CONTRACT_ADDRESS", "AnkyAirdrop"),
        ("REGISTRY_CONTRACT_ADDRESS", "ERC6551Registry"),
        ("ACCOUNT_CONTRACT_ADDRESS", "ERC6551Account"),
        ("ANKY_TEMPLATES_CONTRACT", "AnkyTemplates"),
        ("ANKY_NOTEBOOKS_CONTRACT", "AnkyNotebooks"),
        ("ANKY_JOURNALS_CONTRACT", "AnkyJournals"),
        ("ANKY_EULOGIAS_CONTRACT", "AnkyEulogias"),
      ],
    ),
    EnvTarget::new(
      FRONTEND_ENV_PATH,
      &[
        ("NEXT_PUBLIC_ANKY_AIRDROP_SMART_CONTRACT", "AnkyAirdrop"),
        ("NEXT_PUBLIC_NOTEBOOKS_CONTRACT", "AnkyNotebooks"),
        ("NEXT_PUBLIC_TEMPLATES_CONTRACT_ADDRESS", "AnkyTemplates"),
        ("NEXT_PUBLIC_EULOGIAS_CONTRACT_ADDRESS", "AnkyEulogias"),
        ("NEXT_PUBLIC_JOURNALS_CONTRACT_ADDRESS", "AnkyJournals"),
      ],
    ),
  ]
}
