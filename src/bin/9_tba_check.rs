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

// Smoke check for the deployed airdrop: make sure the deployer's Anky
// resolves to a token-bound account, creating one if needed.

use anky_deploy::airdrop::AirdropClient;
use anky_deploy::ledger::{JsonFileStore, LedgerStore};
use anky_deploy::{config, deployer, utils, Result};
use dotenv::dotenv;
use ethers::types::Address;

#[tokio::main]
async fn main() {
  dotenv().ok();
  env_logger::init();
  if let Err(e) = run().await {
    eprintln!("{}", e);
    std::process::exit(e.exit_code());
  }
}

async fn run() -> Result<()> {
  let net = config::active_network();
  let conf = config::load_config(&net)?;
  println!("Checking token-bound accounts on {}...", net);

  let store = JsonFileStore::default();
  let ledger = store.load()?;
  let airdrop_address = utils::require_recorded(&ledger, "AnkyAirdrop", "run 2_airdrop first")?;

  let client = deployer::init_client(&conf, true).await?;
  let me = client.address();
  let airdrop = AirdropClient::new(client.clone(), airdrop_address)?;

  let balance = airdrop.balance_of(me).await?;
  println!("deployer {:?} holds {} Anky", me, balance);
  if balance.is_zero() {
    println!("no Anky minted for the deployer yet, nothing to check");
    return Ok(());
  }

  let mut tba = airdrop.get_my_anky_address().await?;
  if tba == Address::zero() {
    println!("Creating TBA...");
    airdrop.create_tba_for_users_anky(me).await?;
    tba = airdrop.get_my_anky_address().await?;
  }

  let first = airdrop.get_tba(0).await?;
  println!("TBA of token 0: {:?}", first);
  println!("TBA {:?} to Anky of {:?}", tba, me);
  Ok(())
}
