// Copyright 2021-2022 Semantic Network Ltd.
// This file is part of sentiment-deploy.

// sentiment-deploy is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// sentiment-deploy is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with sentiment-deploy.  If not, see <http://www.gnu.org/licenses/>.

use ethcontract::H256;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("invalid deployment parameters: {0}")]
  Validation(#[from] ValidationError),
  #[error("submission error: {0}")]
  Submission(String),
  /// The node refused the creation because the constructor reverts when
  /// estimated. Nothing was mined.
  #[error("deployment reverts on estimation: {}", .0.as_deref().unwrap_or("no reason given"))]
  EstimationRevert(Option<String>),
  #[error("ConfirmationTimeout: {0}")]
  ConfirmationTimeout(String),
  #[error("deployment {tx_hash:?} reverted: {}", .reason.as_deref().unwrap_or("no reason given"))]
  Revert {
    tx_hash: H256,
    reason: Option<String>,
  },
  #[error("deployment cancelled")]
  Cancelled,
  #[error("web3 error: {0}")]
  Web3Error(#[from] ethcontract::web3::Error),
  #[error("execution error: {0}")]
  ExecutionError(#[from] ethcontract::errors::ExecutionError),
  #[error("artifact error: {0}")]
  ArtifactError(#[from] ethcontract_common::errors::ArtifactError),
  #[error("link error: {0}")]
  LinkError(#[from] ethcontract_common::errors::LinkError),
  #[error("abi error: {0}")]
  AbiError(#[from] ethcontract::web3::ethabi::Error),
  #[error("hex error: {0}")]
  HexError(#[from] hex::FromHexError),
  #[error("config error: {0}")]
  ConfigError(#[from] config::ConfigError),
  #[error("error: {0}")]
  Other(String),
}

/// A deployment parameter that fails its local constraint. Raised before
/// anything is sent to the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("coordinator address {0:?} is not a 20-byte hex value")]
  InvalidAddress(String),
  #[error("coordinator address is the zero address")]
  ZeroAddress,
  #[error("key hash {0:?} is not a 32-byte hex value")]
  InvalidKeyHash(String),
  #[error("callback gas limit must be positive")]
  ZeroCallbackGasLimit,
  #[error("callback gas limit {limit} exceeds the maximum of {max}")]
  CallbackGasLimitTooHigh { limit: u64, max: u64 },
  #[error("{0} confirmations exceed the uint16 range")]
  TooManyConfirmations(u64),
  #[error("number of words must be positive")]
  ZeroNumWords,
  #[error("{0} words exceed the uint32 range")]
  TooManyWords(u64),
}

impl From<&str> for Error {
  fn from(err: &str) -> Self {
    Error::Other(err.to_string())
  }
}
impl From<String> for Error {
  fn from(err: String) -> Self {
    Error::Other(err)
  }
}
