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

// Regenerate the backend and frontend .env files from the ledger.
// Run this once after a release's deployment steps have all finished.

use anky_deploy::envfile;
use anky_deploy::ledger::{JsonFileStore, LedgerStore};
use anky_deploy::Result;
use dotenv::dotenv;

fn main() {
  dotenv().ok();
  env_logger::init();
  if let Err(e) = run() {
    eprintln!("{}", e);
    std::process::exit(e.exit_code());
  }
}

fn run() -> Result<()> {
  let store = JsonFileStore::default();
  let ledger = store.load()?;
  let targets = envfile::default_targets();
  envfile::propagate(&ledger, &targets)?;
  for target in &targets {
    println!("rendered {}", target.path.display());
  }
  println!("Updated .env files");
  Ok(())
}
