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

use anky_deploy::artifact::{artifact_path, load_artifact, load_build_info};
use anky_deploy::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

// A stripped-down hardhat compiler output: one constructor arg, a few
// bytes of creation code.
const AIRDROP_ARTIFACT: &str = r#"{
  "contractName": "AnkyAirdrop",
  "sourceName": "contracts/AnkyAirdrop.sol",
  "abi": [
    {
      "inputs": [
        { "internalType": "address", "name": "registry", "type": "address" }
      ],
      "stateMutability": "nonpayable",
      "type": "constructor"
    }
  ],
  "bytecode": "0x608060405234801561001057600080fd5b50"
}"#;

fn temp_artifacts_dir() -> PathBuf {
  let dir = std::env::temp_dir().join(format!("anky-artifacts-{}", rand::random::<u64>()));
  fs::create_dir_all(dir.join("contracts/AnkyAirdrop.sol")).expect("create layout");
  dir
}

#[test]
fn hardhat_layout_is_one_dir_per_source() {
  assert_eq!(
    artifact_path("artifacts", "AnkyAirdrop"),
    Path::new("artifacts/contracts/AnkyAirdrop.sol/AnkyAirdrop.json")
  );
}

#[test]
fn artifact_parses_to_abi_and_bytecode() {
  let dir = temp_artifacts_dir();
  fs::write(
    dir.join("contracts/AnkyAirdrop.sol/AnkyAirdrop.json"),
    AIRDROP_ARTIFACT,
  )
  .expect("write artifact");

  let artifacts = dir.to_str().expect("utf8 temp path");
  let art = load_artifact(artifacts, "AnkyAirdrop").expect("load artifact");
  assert_eq!(art.contract_name, "AnkyAirdrop");
  assert_eq!(art.source_name, "contracts/AnkyAirdrop.sol");
  let ctor = art.abi.constructor().expect("constructor");
  assert_eq!(ctor.inputs.len(), 1);
  assert!(!art.bytecode.is_empty());
  let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_artifact_is_a_config_error_naming_the_path() {
  let dir = temp_artifacts_dir();
  let artifacts = dir.to_str().expect("utf8 temp path");

  let err = load_artifact(artifacts, "AnkyAirdrop").expect_err("nothing written yet");
  match err {
    Error::Config(msg) => assert!(msg.contains("AnkyAirdrop.json"), "path missing from: {}", msg),
    other => panic!("expected a config error, got {:?}", other),
  }
  let _ = fs::remove_dir_all(&dir);
}

#[test]
fn malformed_artifact_is_a_config_error() {
  let dir = temp_artifacts_dir();
  fs::write(dir.join("contracts/AnkyAirdrop.sol/AnkyAirdrop.json"), "not json")
    .expect("write garbage");

  let artifacts = dir.to_str().expect("utf8 temp path");
  let err = load_artifact(artifacts, "AnkyAirdrop").expect_err("garbage should not parse");
  assert!(matches!(err, Error::Config(_)));
  let _ = fs::remove_dir_all(&dir);
}

#[test]
fn build_info_is_resolved_through_the_sidecar() {
  let dir = temp_artifacts_dir();
  fs::create_dir_all(dir.join("build-info")).expect("create build-info dir");
  fs::write(
    dir.join("contracts/AnkyAirdrop.sol/AnkyAirdrop.dbg.json"),
    r#"{ "_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/abc123.json" }"#,
  )
  .expect("write sidecar");
  fs::write(
    dir.join("build-info/abc123.json"),
    r#"{
      "solcLongVersion": "0.8.19+commit.7dd6d404",
      "input": { "language": "Solidity", "sources": {}, "settings": {} }
    }"#,
  )
  .expect("write build info");

  let artifacts = dir.to_str().expect("utf8 temp path");
  let info = load_build_info(artifacts, "AnkyAirdrop").expect("load build info");
  assert_eq!(info.solc_long_version, "0.8.19+commit.7dd6d404");
  assert_eq!(info.input["language"], "Solidity");
  let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_sidecar_is_a_config_error() {
  let dir = temp_artifacts_dir();
  let artifacts = dir.to_str().expect("utf8 temp path");
  let err = load_build_info(artifacts, "AnkyAirdrop").expect_err("no sidecar written");
  assert!(matches!(err, Error::Config(_)));
  let _ = fs::remove_dir_all(&dir);
}
