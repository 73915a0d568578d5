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

use anky_deploy::ledger::{JsonFileStore, LedgerStore};
use anky_deploy::{artifact, config, deployer, utils, verify, Result};
use dotenv::dotenv;
use ethers::abi::Token;

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
  println!("Starting the AnkyDementor deployment on {}...", net);

  let store = JsonFileStore::default();
  let ledger = store.load()?;
  let airdrop = utils::require_recorded(&ledger, "AnkyAirdrop", "run 2_airdrop first")?;

  let client = deployer::init_client(&conf, true).await?;

  println!("Now the AnkyDementor will be deployed");
  let art = artifact::load_artifact(conf.artifacts(), "AnkyDementor")?;
  let dementor =
    deployer::deploy_contract(&client, &conf, &art, vec![Token::Address(airdrop)]).await?;
  println!("AnkyDementor deployed at: {}", dementor.address_string());
  deployer::record_deployment(&store, &dementor)?;

  verify::verify_deployed(&conf, &art, &dementor).await;

  println!("AnkyDementor deployed!");
  Ok(())
}
