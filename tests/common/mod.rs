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

#![allow(dead_code)]
use async_trait::async_trait;
use ethcontract::{errors::ExecutionError, H160, H256};
use sentiment_deploy::{
  error::Error,
  factory::{ContractFactory, DeploymentReceipt, PendingContract},
  params::{ConstructorArgs, DeploymentParameters},
  Result,
};
use std::sync::Mutex;

pub const MINED_BLOCK: u64 = 100;

pub fn goerli_params() -> DeploymentParameters {
  DeploymentParameters {
    subscription_id: 385,
    coordinator_address: "0x2Ca8E0C643bDe4C2E08ab1fA0da3401AdAD7734D".to_string(),
    key_hash: "0x79d3d8832d904592c0bf9818b621522c988bb8b0c05cdc3b15aea1b6e8db0c15".to_string(),
    callback_gas_limit: 2_500_000,
    num_confirmations: 3,
    num_words: 4,
  }
}

#[derive(Clone, Debug)]
pub enum Outcome {
  Confirm,
  Revert(Option<String>),
  Reject(String),
  RevertOnEstimate(Option<String>),
  MissingAddress,
  NeverMined,
}

#[derive(Default)]
struct State {
  submitted: Vec<ConstructorArgs>,
  receipt_polls: usize,
  block_polls: usize,
  head: u64,
}

/// Scripted chain: the creation is mined in `MINED_BLOCK` after
/// `pending_polls` receipt lookups, and every block number lookup advances the
/// head by `step`.
pub struct StubFactory {
  outcome: Outcome,
  pending_polls: usize,
  step: u64,
  failing_receipt_polls: Vec<usize>,
  failing_block_polls: Vec<usize>,
  state: Mutex<State>,
}

impl StubFactory {
  pub fn new(outcome: Outcome) -> Self {
    Self {
      outcome,
      pending_polls: 0,
      step: 1,
      failing_receipt_polls: Vec::new(),
      failing_block_polls: Vec::new(),
      state: Mutex::new(State {
        head: MINED_BLOCK,
        ..Default::default()
      }),
    }
  }

  /// The head is already `confirmations` blocks past inclusion and stays
  /// there.
  pub fn confirmed(confirmations: u64) -> Self {
    let stub = Self::new(Outcome::Confirm);
    stub.state.lock().unwrap().head = MINED_BLOCK + confirmations;
    Self { step: 0, ..stub }
  }

  pub fn pending_for(mut self, polls: usize) -> Self {
    self.pending_polls = polls;
    self
  }

  /// The given (1-based) receipt lookups fail like a dropped connection.
  pub fn failing_receipts(mut self, polls: &[usize]) -> Self {
    self.failing_receipt_polls = polls.to_vec();
    self
  }

  /// The given (1-based) block number lookups fail like a dropped connection.
  pub fn failing_blocks(mut self, polls: &[usize]) -> Self {
    self.failing_block_polls = polls.to_vec();
    self
  }

  pub fn submitted(&self) -> Vec<ConstructorArgs> {
    self.state.lock().unwrap().submitted.clone()
  }

  pub fn receipt_polls(&self) -> usize {
    self.state.lock().unwrap().receipt_polls
  }

  pub fn block_polls(&self) -> usize {
    self.state.lock().unwrap().block_polls
  }

  pub fn address_of(n: u64) -> H160 {
    H160::from_low_u64_be(0xc0de_0000 + n)
  }
}

#[async_trait]
impl ContractFactory for StubFactory {
  async fn deploy(&self, args: &ConstructorArgs) -> Result<PendingContract> {
    let mut state = self.state.lock().unwrap();
    state.submitted.push(*args);
    match &self.outcome {
      Outcome::Reject(reason) => return Err(Error::Other(reason.clone())),
      Outcome::RevertOnEstimate(reason) => {
        return Err(Error::ExecutionError(ExecutionError::Revert(
          reason.clone(),
        )))
      }
      _ => {}
    }
    Ok(PendingContract {
      tx_hash: H256::from_low_u64_be(state.submitted.len() as u64),
    })
  }

  async fn receipt(&self, tx_hash: H256) -> Result<Option<DeploymentReceipt>> {
    let mut state = self.state.lock().unwrap();
    state.receipt_polls += 1;
    if self.failing_receipt_polls.contains(&state.receipt_polls) {
      return Err(Error::Other("connection reset by peer".to_string()));
    }
    let failed = self
      .failing_receipt_polls
      .iter()
      .filter(|poll| **poll < state.receipt_polls)
      .count();
    let lookups = state.receipt_polls - failed;
    if lookups <= self.pending_polls {
      return Ok(None);
    }
    let address = Self::address_of(tx_hash.to_low_u64_be());
    let receipt = match &self.outcome {
      Outcome::NeverMined | Outcome::Reject(_) | Outcome::RevertOnEstimate(_) => {
        return Ok(None)
      }
      Outcome::Confirm => DeploymentReceipt {
        block_number: MINED_BLOCK,
        contract_address: Some(address),
        success: true,
        revert_reason: None,
      },
      Outcome::Revert(reason) => DeploymentReceipt {
        block_number: MINED_BLOCK,
        contract_address: None,
        success: false,
        revert_reason: reason.clone(),
      },
      Outcome::MissingAddress => DeploymentReceipt {
        block_number: MINED_BLOCK,
        contract_address: None,
        success: true,
        revert_reason: None,
      },
    };
    Ok(Some(receipt))
  }

  async fn block_number(&self) -> Result<u64> {
    let mut state = self.state.lock().unwrap();
    state.block_polls += 1;
    if self.failing_block_polls.contains(&state.block_polls) {
      return Err(Error::Other("connection reset by peer".to_string()));
    }
    let head = state.head;
    state.head += self.step;
    Ok(head)
  }
}
