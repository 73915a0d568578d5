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

use crate::artifact::Artifact;
use crate::config::Config;
use crate::error::Error;
use crate::ledger::LedgerStore;
use crate::Result;
use ethers::abi::Token;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, TransactionRequest, H256};
use ethers::utils::to_checksum;
use std::convert::TryFrom;
use std::str::FromStr;
use std::sync::Arc;

pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const DEFAULT_CONFIRMATIONS: usize = 1;

pub type EthClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Provider plus signing key from the environment. With `check_balance`
/// the deployer account must hold funds, since every driver that asks
/// for it is about to pay gas.
pub async fn init_client(conf: &Config, check_balance: bool) -> Result<Arc<EthClient>> {
  let raw_key = std::env::var(PRIVATE_KEY_ENV)
    .map_err(|_| Error::Config(format!("{} must be set", PRIVATE_KEY_ENV)))?;
  let wallet = LocalWallet::from_str(raw_key.trim())
    .map_err(|e| Error::Config(format!("could not parse {}: {}", PRIVATE_KEY_ENV, e)))?
    .with_chain_id(conf.chain_id);
  let provider = Provider::<Http>::try_from(conf.eth_url.as_str())
    .map_err(|e| Error::Config(format!("invalid eth url {}: {}", conf.eth_url, e)))?;

  let me = wallet.address();
  if check_balance {
    let balance = provider
      .get_balance(me, None)
      .await
      .map_err(|e| Error::Network(format!("could not fetch balance of {:?}: {}", me, e)))?;
    log::info!("deployer {} balance {}", to_checksum(&me, None), balance);
    if balance.is_zero() {
      return Err(Error::Network(format!(
        "deployer {} has no funds for gas on {}",
        to_checksum(&me, None),
        conf.eth_url
      )));
    }
  }
  Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}

/// Outcome of one creation transaction, in the shape the ledger wants.
#[derive(Clone, Debug)]
pub struct Deployed {
  pub name: String,
  pub address: Address,
  pub deployer: Address,
  pub tx_hash: H256,
  /// ABI-encoded constructor args, hex without 0x, for verification.
  pub ctor_args_hex: String,
}

impl Deployed {
  pub fn address_string(&self) -> String {
    to_checksum(&self.address, None)
  }

  pub fn deployer_string(&self) -> String {
    to_checksum(&self.deployer, None)
  }

  pub fn tx_hash_string(&self) -> String {
    format!("{:#x}", self.tx_hash)
  }
}

/// Publish one contract: encode the constructor call against the
/// artifact's ABI, submit the creation transaction, wait for it to be
/// mined and check it did not revert.
pub async fn deploy_contract(
  client: &Arc<EthClient>,
  conf: &Config,
  artifact: &Artifact,
  args: Vec<Token>,
) -> Result<Deployed> {
  let bytecode = artifact.bytecode.to_vec();
  let (data, ctor_args_hex) = match artifact.abi.constructor() {
    Some(ctor) => {
      let full = ctor.encode_input(bytecode, &args).map_err(|e| {
        Error::Config(format!(
          "could not encode constructor args for {}: {}",
          artifact.contract_name, e
        ))
      })?;
      let args_only = ctor.encode_input(Vec::new(), &args).map_err(|e| {
        Error::Config(format!(
          "could not encode constructor args for {}: {}",
          artifact.contract_name, e
        ))
      })?;
      (full, hex::encode(args_only))
    }
    None => {
      if !args.is_empty() {
        return Err(Error::Config(format!(
          "{} takes no constructor args",
          artifact.contract_name
        )));
      }
      (bytecode, String::new())
    }
  };

  let mut tx = TransactionRequest::new().data(data);
  if let Some(gas_price) = conf.gas_price {
    tx = tx.gas_price(gas_price);
  }

  let pending = client.send_transaction(tx, None).await.map_err(|e| {
    Error::Network(format!(
      "could not submit {} deployment: {}",
      artifact.contract_name, e
    ))
  })?;
  let confirmations = conf.confirmations.unwrap_or(DEFAULT_CONFIRMATIONS);
  let receipt = pending
    .confirmations(confirmations)
    .await
    .map_err(|e| {
      Error::Network(format!(
        "no receipt for {} deployment: {}",
        artifact.contract_name, e
      ))
    })?
    .ok_or_else(|| {
      Error::Network(format!(
        "{} deployment dropped from the mempool",
        artifact.contract_name
      ))
    })?;

  if let Some(status) = receipt.status {
    if status.is_zero() {
      return Err(Error::Network(format!(
        "{} deployment reverted in tx {:#x}",
        artifact.contract_name, receipt.transaction_hash
      )));
    }
  }
  let address = receipt.contract_address.ok_or_else(|| {
    Error::Network(format!(
      "no contract address in receipt for {}",
      artifact.contract_name
    ))
  })?;

  Ok(Deployed {
    name: artifact.contract_name.clone(),
    address,
    deployer: client.address(),
    tx_hash: receipt.transaction_hash,
    ctor_args_hex,
  })
}

/// Push a deployment into the ledger under its contract name.
pub fn record_deployment<S: LedgerStore>(store: &S, deployed: &Deployed) -> Result<()> {
  store.record(
    &deployed.name,
    &deployed.address_string(),
    &deployed.deployer_string(),
    &deployed.tx_hash_string(),
  )
}
