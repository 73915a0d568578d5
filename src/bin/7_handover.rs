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

// Hand the writing modules over to the airdrop contract, which mints
// on users' behalf. Safe to rerun: contracts already owned by the
// airdrop are skipped.

use anky_deploy::error::Error;
use anky_deploy::ledger::{JsonFileStore, LedgerStore};
use anky_deploy::ownable::OwnableClient;
use anky_deploy::{config, deployer, utils, Result};
use dotenv::dotenv;

const HANDOVER_CONTRACTS: [&str; 4] = [
  "AnkyNotebooks",
  "AnkyJournals",
  "AnkyEulogias",
  "AnkyDementor",
];

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
  println!("Handing module ownership to the airdrop on {}...", net);

  let store = JsonFileStore::default();
  let ledger = store.load()?;
  let airdrop = utils::require_recorded(&ledger, "AnkyAirdrop", "run 2_airdrop first")?;

  let client = deployer::init_client(&conf, true).await?;

  for name in HANDOVER_CONTRACTS.iter() {
    let address = utils::require_recorded(&ledger, name, "deploy it before the handover")?;
    let module = OwnableClient::new(client.clone(), address)?;

    let owner = module.owner().await?;
    if owner == airdrop {
      println!("airdrop already owns {}", name);
      continue;
    }

    println!("transferring {} ownership to the airdrop", name);
    module.transfer_ownership(airdrop).await?;

    let owner = module.owner().await?;
    if owner != airdrop {
      return Err(Error::Network(format!(
        "{} owner is {:?} after the transfer, expected the airdrop",
        name, owner
      )));
    }
    println!("airdrop now owns {}", name);
  }

  println!("=> all modules owned by the airdrop!");
  Ok(())
}
