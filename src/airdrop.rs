use crate::deployer::EthClient;
use crate::error::Error;
use crate::Result;
use ethers::abi::parse_abi;
use ethers::contract::Contract;
use ethers::types::{Address, U256};
use std::sync::Arc;

/// Client for the AnkyAirdrop calls the post-deploy checks need: the
/// ERC-721 balance plus the token-bound-account helpers.
pub struct AirdropClient {
  contract: Contract<EthClient>,
}

impl AirdropClient {
  pub fn new(client: Arc<EthClient>, address: Address) -> Result<Self> {
    let abi = parse_abi(&[
      "function balanceOf(address owner) view returns (uint256)",
      "function createTBAforUsersAnky(address userWallet)",
      "function getTBA(uint256 tokenId) view returns (address)",
      "function getMyAnkyAddress() view returns (address)",
    ])
    .map_err(|e| Error::Config(format!("bad airdrop abi: {}", e)))?;
    Ok(Self {
      contract: Contract::new(address, abi, client),
    })
  }

  pub fn address(&self) -> Address {
    self.contract.address()
  }

  pub async fn balance_of(&self, owner: Address) -> Result<U256> {
    self
      .contract
      .method::<_, U256>("balanceOf", owner)
      .map_err(|e| Error::Config(format!("could not encode balanceOf: {}", e)))?
      .call()
      .await
      .map_err(|e| Error::Network(format!("balanceOf call failed: {}", e)))
  }

  pub async fn create_tba_for_users_anky(&self, user: Address) -> Result<()> {
    let call = self
      .contract
      .method::<_, ()>("createTBAforUsersAnky", user)
      .map_err(|e| Error::Config(format!("could not encode createTBAforUsersAnky: {}", e)))?;
    let pending = call
      .send()
      .await
      .map_err(|e| Error::Network(format!("createTBAforUsersAnky failed: {}", e)))?;
    pending
      .await
      .map_err(|e| Error::Network(format!("createTBAforUsersAnky not confirmed: {}", e)))?
      .ok_or_else(|| {
        Error::Network("createTBAforUsersAnky dropped from the mempool".to_string())
      })?;
    Ok(())
  }

  pub async fn get_tba(&self, token_id: u64) -> Result<Address> {
    self
      .contract
      .method::<_, Address>("getTBA", U256::from(token_id))
      .map_err(|e| Error::Config(format!("could not encode getTBA: {}", e)))?
      .call()
      .await
      .map_err(|e| Error::Network(format!("getTBA call failed: {}", e)))
  }

  /// Resolves the token-bound account of the caller's Anky, so this one
  /// is answered from the deployer key's point of view.
  pub async fn get_my_anky_address(&self) -> Result<Address> {
    self
      .contract
      .method::<_, Address>("getMyAnkyAddress", ())
      .map_err(|e| Error::Config(format!("could not encode getMyAnkyAddress: {}", e)))?
      .call()
      .await
      .map_err(|e| Error::Network(format!("getMyAnkyAddress call failed: {}", e)))
  }
}
