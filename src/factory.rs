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

use crate::{params::ConstructorArgs, Result};
use async_trait::async_trait;
use ethcontract::{H160, H256};

/// A contract creation that has been sent but not yet observed on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingContract {
  pub tx_hash: H256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentReceipt {
  pub block_number: u64,
  pub contract_address: Option<H160>,
  pub success: bool,
  pub revert_reason: Option<String>,
}

/// The capability the deployment runner needs from the chain: send the
/// creation transaction and observe its progress. How the contract was
/// compiled or the account unlocked is up to the implementation.
#[async_trait]
pub trait ContractFactory: Send + Sync {
  /// Sends the contract creation. Called at most once per deployment.
  async fn deploy(&self, args: &ConstructorArgs) -> Result<PendingContract>;

  /// `None` while the transaction is still pending.
  async fn receipt(&self, tx_hash: H256) -> Result<Option<DeploymentReceipt>>;

  async fn block_number(&self) -> Result<u64>;
}
