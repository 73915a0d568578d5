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

use crate::deployer::EthClient;
use crate::error::Error;
use crate::Result;
use ethers::abi::parse_abi;
use ethers::contract::Contract;
use ethers::types::Address;
use std::sync::Arc;

/// Minimal client for the OpenZeppelin Ownable surface the module
/// contracts expose.
pub struct OwnableClient {
  contract: Contract<EthClient>,
}

impl OwnableClient {
  pub fn new(client: Arc<EthClient>, address: Address) -> Result<Self> {
    let abi = parse_abi(&[
      "function owner() view returns (address)",
      "function transferOwnership(address newOwner)",
    ])
    .map_err(|e| Error::Config(format!("bad ownable abi: {}", e)))?;
    Ok(Self {
      contract: Contract::new(address, abi, client),
    })
  }

  pub fn address(&self) -> Address {
    self.contract.address()
  }

  pub async fn owner(&self) -> Result<Address> {
    self
      .contract
      .method::<_, Address>("owner", ())
      .map_err(|e| Error::Config(format!("could not encode owner(): {}", e)))?
      .call()
      .await
      .map_err(|e| Error::Network(format!("owner() call failed: {}", e)))
  }

  pub async fn transfer_ownership(&self, new_owner: Address) -> Result<()> {
    let call = self
      .contract
      .method::<_, ()>("transferOwnership", new_owner)
      .map_err(|e| Error::Config(format!("could not encode transferOwnership: {}", e)))?;
    let pending = call
      .send()
      .await
      .map_err(|e| Error::Network(format!("transferOwnership failed: {}", e)))?;
    pending
      .await
      .map_err(|e| Error::Network(format!("transferOwnership not confirmed: {}", e)))?
      .ok_or_else(|| Error::Network("transferOwnership dropped from the mempool".to_string()))?;
    Ok(())
  }
}
