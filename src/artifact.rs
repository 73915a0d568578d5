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

//! Readers for the solc output the contracts repo checks in under
//! `artifacts/`: one JSON per contract with its ABI and creation
//! bytecode, a `.dbg.json` sidecar pointing at the build-info file the
//! explorer verification payload is rebuilt from.

use crate::{error::Error, Result};
use ethers::abi::Abi;
use ethers::types::Bytes;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
  pub contract_name: String,
  pub source_name: String,
  pub abi: Abi,
  pub bytecode: Bytes,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
  build_info: String,
}

/// Compiler run that produced an artifact. `input` is the full
/// standard-JSON compiler input, passed through verbatim to the
/// explorer when verifying.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
  pub solc_long_version: String,
  pub input: serde_json::Value,
}

// One directory per source file, one JSON per contract.
pub fn artifact_path(artifacts_dir: &str, name: &str) -> PathBuf {
  Path::new(artifacts_dir)
    .join("contracts")
    .join(format!("{}.sol", name))
    .join(format!("{}.json", name))
}

pub fn load_artifact(artifacts_dir: &str, name: &str) -> Result<Artifact> {
  let path = artifact_path(artifacts_dir, name);
  let raw = std::fs::read_to_string(&path).map_err(|e| {
    Error::Config(format!(
      "could not read artifact {}: {}",
      path.display(),
      e
    ))
  })?;
  serde_json::from_str(&raw)
    .map_err(|e| Error::Config(format!("invalid artifact {}: {}", path.display(), e)))
}

pub fn load_build_info(artifacts_dir: &str, name: &str) -> Result<BuildInfo> {
  let dbg_path = artifact_path(artifacts_dir, name).with_extension("dbg.json");
  let raw = std::fs::read_to_string(&dbg_path).map_err(|e| {
    Error::Config(format!(
      "could not read artifact sidecar {}: {}",
      dbg_path.display(),
      e
    ))
  })?;
  let dbg: DebugFile = serde_json::from_str(&raw)
    .map_err(|e| Error::Config(format!("invalid sidecar {}: {}", dbg_path.display(), e)))?;

  // buildInfo is relative to the sidecar's directory
  let dir = dbg_path
    .parent()
    .ok_or_else(|| Error::Config(format!("no parent dir for {}", dbg_path.display())))?;
  let info_path = dir.join(&dbg.build_info);
  let raw = std::fs::read_to_string(&info_path).map_err(|e| {
    Error::Config(format!(
      "could not read build info {}: {}",
      info_path.display(),
      e
    ))
  })?;
  serde_json::from_str(&raw)
    .map_err(|e| Error::Config(format!("invalid build info {}: {}", info_path.display(), e)))
}
