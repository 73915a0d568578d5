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

use anky_deploy::ledger::JsonFileStore;
use anky_deploy::{artifact, config, deployer, verify, Result};
use dotenv::dotenv;

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
  println!("Starting the registry deployment on {}...", net);
  let client = deployer::init_client(&conf, true).await?;
  let store = JsonFileStore::default();

  println!("Now the ERC6551Registry will be deployed");
  let registry_art = artifact::load_artifact(conf.artifacts(), "ERC6551Registry")?;
  let registry = deployer::deploy_contract(&client, &conf, &registry_art, vec![]).await?;
  println!("ERC6551Registry deployed at: {}", registry.address_string());
  deployer::record_deployment(&store, &registry)?;

  println!("Now the ERC6551Account will be deployed");
  let account_art = artifact::load_artifact(conf.artifacts(), "ERC6551Account")?;
  let account = deployer::deploy_contract(&client, &conf, &account_art, vec![]).await?;
  println!("ERC6551Account deployed at: {}", account.address_string());
  deployer::record_deployment(&store, &account)?;

  verify::verify_deployed(&conf, &registry_art, &registry).await;
  verify::verify_deployed(&conf, &account_art, &account).await;

  println!("Registry and account implementation deployed!");
  Ok(())
}
