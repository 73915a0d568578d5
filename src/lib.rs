pub mod airdrop;
pub mod artifact;
pub mod config;
pub mod deployer;
pub mod envfile;
pub mod error;
pub mod ledger;
pub mod ownable;
pub mod utils;
pub mod verify;

pub type Result<T> = std::result::Result<T, error::Error>;
