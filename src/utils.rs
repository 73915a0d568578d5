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

use crate::error::Error;
use crate::ledger::{DeploymentLedger, DEFAULT_LEDGER_PATH};
use crate::Result;
use ethers::types::Address;
use std::str::FromStr;

pub fn parse_address(raw: &str) -> Result<Address> {
  Address::from_str(raw.trim())
    .map_err(|e| Error::Config(format!("invalid address {}: {}", raw, e)))
}

/// Look up a contract a driver depends on. The hint tells the operator
/// which earlier step records it.
pub fn require_recorded(ledger: &DeploymentLedger, name: &str, hint: &str) -> Result<Address> {
  let record = ledger.get(name).ok_or_else(|| {
    Error::Config(format!(
      "{} is not in {} yet ({})",
      name, DEFAULT_LEDGER_PATH, hint
    ))
  })?;
  parse_address(&record.address)
}
