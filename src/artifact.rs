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

//! Contract creation from a compiled Hardhat/Truffle artifact, signed by the
//! configured account and sent over web3.

use crate::{
  error::Error,
  factory::{ContractFactory, DeploymentReceipt, PendingContract},
  params::ConstructorArgs,
  revert, Result,
};
use async_trait::async_trait;
use ethcontract::{
  errors::ExecutionError,
  transaction::{ResolveCondition, TransactionBuilder, TransactionResult},
  transport::DynTransport,
  web3::{
    self,
    types::{BlockId, BlockNumber, Bytes, CallRequest, TransactionId},
  },
  Account, Web3, H256, U256,
};
use ethcontract_common::{artifact::truffle::TruffleLoader, Contract};
use std::path::Path;

#[derive(Clone)]
pub struct ArtifactFactory {
  web3: Web3<DynTransport>,
  account: Account,
  contract: Contract,
  gas: Option<U256>,
}

impl ArtifactFactory {
  pub fn new(web3: &Web3<DynTransport>, account: Account, contract: Contract) -> Self {
    Self {
      web3: web3.clone(),
      account,
      contract,
      gas: None,
    }
  }

  pub fn load(
    web3: &Web3<DynTransport>,
    account: Account,
    artifact: impl AsRef<Path>,
  ) -> Result<Self> {
    let contract = TruffleLoader::new().load_contract_from_file(artifact)?;
    Ok(Self::new(web3, account, contract))
  }

  /// Fixed gas for the creation transaction instead of node estimation.
  pub fn with_gas(mut self, gas: Option<u64>) -> Self {
    self.gas = gas.map(U256::from);
    self
  }

  pub fn name(&self) -> &str {
    &self.contract.name
  }

  fn creation_data(&self, args: &ConstructorArgs) -> Result<Vec<u8>> {
    if self.contract.bytecode.is_empty() {
      return Err(Error::Other(format!(
        "artifact {} has no bytecode",
        self.contract.name
      )));
    }
    let code = self.contract.bytecode.to_bytes()?;
    let constructor = self.contract.interface.abi.constructor().ok_or_else(|| {
      Error::Other(format!(
        "artifact {} has no constructor to take the deployment parameters",
        self.contract.name
      ))
    })?;
    Ok(constructor.encode_input(code.0, &args.to_tokens())?)
  }

  async fn revert_reason(&self, tx_hash: H256, block_number: u64) -> Option<String> {
    let tx = self
      .web3
      .eth()
      .transaction(TransactionId::Hash(tx_hash))
      .await
      .ok()??;
    let call = CallRequest {
      from: tx.from,
      gas: Some(tx.gas),
      value: Some(tx.value),
      data: Some(tx.input),
      ..Default::default()
    };
    // replay on the parent state; the inclusion block already holds the failure
    let parent = BlockId::Number(BlockNumber::Number(block_number.saturating_sub(1).into()));
    match self.web3.eth().call(call, Some(parent)).await {
      Ok(_) => None,
      Err(err) => reason_from_web3(err),
    }
  }
}

fn reason_from_web3(err: web3::Error) -> Option<String> {
  if let web3::Error::Rpc(rpc) = &err {
    let reason = rpc
      .data
      .as_ref()
      .and_then(|data| data.as_str())
      .and_then(|data| hex::decode(data.trim_start_matches("0x")).ok())
      .and_then(|data| revert::decode_revert_reason(&data));
    if reason.is_some() {
      return reason;
    }
  }
  match ExecutionError::from(err) {
    ExecutionError::Revert(reason) => reason,
    _ => None,
  }
}

#[async_trait]
impl ContractFactory for ArtifactFactory {
  async fn deploy(&self, args: &ConstructorArgs) -> Result<PendingContract> {
    let data = self.creation_data(args)?;
    let mut tx = TransactionBuilder::new(self.web3.clone())
      .from(self.account.clone())
      .data(Bytes(data))
      .resolve(ResolveCondition::Pending);
    if let Some(gas) = self.gas {
      tx = tx.gas(gas);
    }
    let tx_hash = match tx.send().await? {
      TransactionResult::Hash(h) => h,
      TransactionResult::Receipt(r) => r.transaction_hash,
    };
    Ok(PendingContract { tx_hash })
  }

  async fn receipt(&self, tx_hash: H256) -> Result<Option<DeploymentReceipt>> {
    let receipt = match self.web3.eth().transaction_receipt(tx_hash).await? {
      Some(receipt) => receipt,
      None => return Ok(None),
    };
    let block_number = match receipt.block_number {
      Some(bn) => bn.as_u64(),
      None => return Ok(None),
    };
    // pre-byzantium receipts carry no status
    let success = receipt.status.map(|s| s.as_u64() == 1).unwrap_or(true);
    let revert_reason = if success {
      None
    } else {
      self.revert_reason(tx_hash, block_number).await
    };
    Ok(Some(DeploymentReceipt {
      block_number,
      contract_address: receipt.contract_address,
      success,
      revert_reason,
    }))
  }

  async fn block_number(&self) -> Result<u64> {
    let h = self.web3.eth().block_number().await?;
    Ok(h.as_u64())
  }
}
