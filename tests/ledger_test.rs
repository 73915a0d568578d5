use anky_deploy::error::Error;
use anky_deploy::ledger::{DeploymentLedger, JsonFileStore, LedgerStore, MemoryStore};
use anky_deploy::utils::require_recorded;
use std::fs;
use std::path::PathBuf;

fn temp_ledger() -> PathBuf {
  std::env::temp_dir().join(format!("anky-ledger-{}.json", rand::random::<u64>()))
}

#[test]
fn last_writer_wins() {
  let path = temp_ledger();
  let store = JsonFileStore::new(&path);
  store
    .record("Registry", "0xAAA", "0xBBB", "0xHASH1")
    .expect("first record");
  store
    .record("Registry", "0xCCC", "0xBBB", "0xHASH2")
    .expect("second record");

  let ledger = store.load().expect("load");
  assert_eq!(ledger.len(), 1);
  let rec = ledger.get("Registry").expect("entry");
  assert_eq!(rec.address, "0xCCC");
  assert_eq!(rec.deployment_hash, "0xHASH2");
  let _ = fs::remove_file(&path);
}

#[test]
fn records_n_distinct_contracts() {
  let path = temp_ledger();
  let store = JsonFileStore::new(&path);
  let entries = [
    ("ERC6551Registry", "0x01", "0xDEAD", "0xaaa"),
    ("ERC6551Account", "0x02", "0xDEAD", "0xbbb"),
    ("AnkyAirdrop", "0x03", "0xDEAD", "0xccc"),
  ];
  for (name, addr, deployer, hash) in entries.iter() {
    store.record(name, addr, deployer, hash).expect("record");
  }

  let ledger = store.load().expect("load");
  assert_eq!(ledger.len(), entries.len());
  for (name, addr, deployer, hash) in entries.iter() {
    let rec = ledger.get(*name).expect("entry");
    assert_eq!(rec.address, *addr);
    assert_eq!(rec.deployer, *deployer);
    assert_eq!(rec.deployment_hash, *hash);
  }
  let _ = fs::remove_file(&path);
}

#[test]
fn on_disk_format_matches_downstream_readers() {
  let path = temp_ledger();
  let store = JsonFileStore::new(&path);
  store
    .record("Registry", "0xAAA", "0xBBB", "0xHASH1")
    .expect("record");

  let raw = fs::read_to_string(&path).expect("read back");
  let expected = r#"{
  "Registry": {
    "address": "0xAAA",
    "deployer": "0xBBB",
    "deploymentHash": "0xHASH1"
  }
}"#;
  assert_eq!(raw, expected);
  let _ = fs::remove_file(&path);
}

#[test]
fn missing_and_empty_files_load_as_empty() {
  let path = temp_ledger();
  let store = JsonFileStore::new(&path);
  assert!(store.load().expect("missing file").is_empty());

  fs::write(&path, "{}").expect("write empty object");
  assert!(store.load().expect("empty object").is_empty());

  fs::write(&path, "  \n").expect("write blank");
  assert!(store.load().expect("blank file").is_empty());
  let _ = fs::remove_file(&path);
}

#[test]
fn malformed_ledger_aborts_without_rewrite() {
  let path = temp_ledger();
  fs::write(&path, "{not json").expect("write garbage");
  let store = JsonFileStore::new(&path);

  let err = store.load().expect_err("malformed load should fail");
  assert!(matches!(err, Error::Config(_)));
  assert_eq!(err.exit_code(), 1);

  let err = store
    .record("Registry", "0xAAA", "0xBBB", "0xHASH1")
    .expect_err("record against malformed should fail");
  assert!(matches!(err, Error::Config(_)));
  // the broken file is evidence, not something to overwrite
  assert_eq!(fs::read_to_string(&path).expect("read back"), "{not json");
  let _ = fs::remove_file(&path);
}

#[test]
fn record_rejects_empty_fields() {
  let store = MemoryStore::new();
  assert!(matches!(
    store.record("", "0xA", "0xB", "0xH"),
    Err(Error::Config(_))
  ));
  assert!(matches!(
    store.record("Registry", "", "0xB", "0xH"),
    Err(Error::Config(_))
  ));
  assert!(matches!(
    store.record("Registry", "0xA", "", "0xH"),
    Err(Error::Config(_))
  ));
  assert!(matches!(
    store.record("Registry", "0xA", "0xB", ""),
    Err(Error::Config(_))
  ));
  assert!(store.load().expect("load").is_empty());
}

#[test]
fn serialization_is_order_independent() {
  let path_a = temp_ledger();
  let path_b = temp_ledger();
  let a = JsonFileStore::new(&path_a);
  let b = JsonFileStore::new(&path_b);

  a.record("AnkyAirdrop", "0x1", "0xD", "0xH1").expect("record");
  a.record("ERC6551Registry", "0x2", "0xD", "0xH2")
    .expect("record");
  b.record("ERC6551Registry", "0x2", "0xD", "0xH2")
    .expect("record");
  b.record("AnkyAirdrop", "0x1", "0xD", "0xH1").expect("record");

  assert_eq!(
    fs::read_to_string(&path_a).expect("read a"),
    fs::read_to_string(&path_b).expect("read b")
  );
  let _ = fs::remove_file(&path_a);
  let _ = fs::remove_file(&path_b);
}

#[test]
fn require_recorded_points_at_the_missing_step() {
  let ledger = DeploymentLedger::new();
  let err = require_recorded(&ledger, "AnkyAirdrop", "run 2_airdrop first")
    .expect_err("empty ledger has no airdrop");
  match err {
    Error::Config(msg) => {
      assert!(msg.contains("AnkyAirdrop"), "name missing from: {}", msg);
      assert!(msg.contains("run 2_airdrop first"), "hint missing from: {}", msg);
    }
    other => panic!("expected a config error, got {:?}", other),
  }

  let store = MemoryStore::new();
  store
    .record(
      "AnkyAirdrop",
      "0x52908400098527886E0F7030069857D2E4169EE7",
      "0xBBB",
      "0xH1",
    )
    .expect("record");
  let ledger = store.load().expect("load");
  let addr = require_recorded(&ledger, "AnkyAirdrop", "run 2_airdrop first")
    .expect("recorded entry resolves");
  assert_eq!(
    format!("{:?}", addr).to_lowercase(),
    "0x52908400098527886e0f7030069857d2e4169ee7"
  );
}

#[test]
fn memory_store_records_and_overwrites() {
  let store = MemoryStore::new();
  store
    .record("Registry", "0xAAA", "0xBBB", "0xH1")
    .expect("record");
  store
    .record("Notebooks", "0xDDD", "0xBBB", "0xH2")
    .expect("record");
  store
    .record("Registry", "0xCCC", "0xBBB", "0xH3")
    .expect("record");

  let ledger = store.load().expect("load");
  assert_eq!(ledger.len(), 2);
  assert_eq!(ledger.get("Registry").expect("registry").address, "0xCCC");
  assert_eq!(
    ledger.get("Notebooks").expect("notebooks").address,
    "0xDDD"
  );
}
