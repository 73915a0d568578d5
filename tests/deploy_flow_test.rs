//! End-to-end deployment flow against a local dev node.
//!
//! Ignored by default because it needs a node at http://127.0.0.1:8545
//! (hardhat node or anvil) with the usual funded dev accounts. Run with:
//!
//!   cargo test --test deploy_flow_test -- --ignored

use anky_deploy::config;
use anky_deploy::deployer::{self, PRIVATE_KEY_ENV};
use anky_deploy::artifact::Artifact;
use anky_deploy::ledger::{JsonFileStore, LedgerStore};
use dotenv::dotenv;
use ethers::abi::Abi;
use ethers::types::Bytes;
use std::fs;
use std::str::FromStr;

// First dev account of hardhat node / anvil.
const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

// Creation code that is a single STOP: runs, deploys an empty contract.
fn stub_artifact() -> Artifact {
  Artifact {
    contract_name: "Stub".to_string(),
    source_name: "contracts/Stub.sol".to_string(),
    abi: Abi::default(),
    bytecode: Bytes::from_str("0x00").expect("stub bytecode"),
  }
}

#[tokio::test]
#[ignore]
async fn deploy_and_record_against_dev_node() {
  dotenv().ok();
  if std::env::var(PRIVATE_KEY_ENV).is_err() {
    std::env::set_var(PRIVATE_KEY_ENV, DEV_KEY);
  }

  let conf = config::load_config("local").expect("local config");
  let client = deployer::init_client(&conf, true)
    .await
    .expect("client against dev node");

  let art = stub_artifact();
  let deployed = deployer::deploy_contract(&client, &conf, &art, vec![])
    .await
    .expect("stub deployment");
  assert_eq!(deployed.name, "Stub");
  assert!(deployed.address_string().starts_with("0x"));
  assert!(deployed.tx_hash_string().starts_with("0x"));
  assert!(deployed.ctor_args_hex.is_empty());

  let path = std::env::temp_dir().join(format!("anky-flow-{}.json", rand::random::<u64>()));
  let store = JsonFileStore::new(&path);
  deployer::record_deployment(&store, &deployed).expect("record");

  let ledger = store.load().expect("load back");
  let rec = ledger.get("Stub").expect("recorded entry");
  assert_eq!(rec.address, deployed.address_string());
  assert_eq!(rec.deployer, deployed.deployer_string());
  assert_eq!(rec.deployment_hash, deployed.tx_hash_string());
  let _ = fs::remove_file(&path);
}

#[tokio::test]
#[ignore]
async fn redeploy_overwrites_the_ledger_entry() {
  dotenv().ok();
  if std::env::var(PRIVATE_KEY_ENV).is_err() {
    std::env::set_var(PRIVATE_KEY_ENV, DEV_KEY);
  }

  let conf = config::load_config("local").expect("local config");
  let client = deployer::init_client(&conf, true)
    .await
    .expect("client against dev node");

  let path = std::env::temp_dir().join(format!("anky-flow-{}.json", rand::random::<u64>()));
  let store = JsonFileStore::new(&path);

  let art = stub_artifact();
  let first = deployer::deploy_contract(&client, &conf, &art, vec![])
    .await
    .expect("first deployment");
  deployer::record_deployment(&store, &first).expect("record first");
  let second = deployer::deploy_contract(&client, &conf, &art, vec![])
    .await
    .expect("second deployment");
  deployer::record_deployment(&store, &second).expect("record second");

  assert_ne!(first.address, second.address);
  let ledger = store.load().expect("load back");
  assert_eq!(ledger.len(), 1);
  assert_eq!(
    ledger.get("Stub").expect("entry").address,
    second.address_string()
  );
  let _ = fs::remove_file(&path);
}
