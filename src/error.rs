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

/// Failure classes for a deployment run.
///
/// `Config` covers everything caught before touching the chain: bad env
/// vars, unreadable network config, a malformed ledger file, missing
/// artifacts. `Network` is an RPC or transaction failure. `Verification`
/// is an explorer API failure and is downgraded to a warning by the
/// drivers once the contract itself is deployed and recorded.
/// `Template` means an output file referenced a contract the ledger does
/// not hold; nothing is written in that case.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("configuration error: {0}")]
  Config(String),
  #[error("network error: {0}")]
  Network(String),
  #[error("verification error: {0}")]
  Verification(String),
  #[error("template error: {0}")]
  Template(String),
}

impl Error {
  /// Every failure maps to the same non-zero process exit status.
  pub fn exit_code(&self) -> i32 {
    1
  }
}
