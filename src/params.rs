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

//! Constructor parameters of the VRF consumer contract and their local
//! validation.

use crate::{error::ValidationError, utils};
use ethcontract::{web3::ethabi::Token, H160, H256, U256};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Upper bound most coordinators enforce on the callback gas limit.
pub const DEFAULT_MAX_CALLBACK_GAS_LIMIT: u64 = 2_500_000;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DeploymentParameters {
  pub subscription_id: u64,
  pub coordinator_address: String,
  pub key_hash: String,
  pub callback_gas_limit: u64,
  pub num_confirmations: u64,
  pub num_words: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidationLimits {
  pub max_callback_gas_limit: u64,
}

impl Default for ValidationLimits {
  fn default() -> Self {
    Self {
      max_callback_gas_limit: DEFAULT_MAX_CALLBACK_GAS_LIMIT,
    }
  }
}

impl ValidationLimits {
  /// Network maximum for the callback gas limit. Values beyond `uint32` are
  /// clamped since the constructor could not accept them anyway.
  pub fn with_max_callback_gas_limit(max: u64) -> Self {
    Self {
      max_callback_gas_limit: max.min(u64::from(u32::MAX)),
    }
  }
}

/// Validated constructor arguments, typed the way the contract takes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstructorArgs {
  pub subscription_id: u64,
  pub coordinator: H160,
  pub key_hash: H256,
  pub callback_gas_limit: u32,
  pub num_confirmations: u16,
  pub num_words: u32,
}

impl DeploymentParameters {
  /// Checks every field and converts the set into constructor arguments.
  /// Purely local: no network access.
  pub fn validate(
    &self,
    limits: &ValidationLimits,
  ) -> std::result::Result<ConstructorArgs, ValidationError> {
    let coordinator = utils::parse_address(&self.coordinator_address)
      .ok_or_else(|| ValidationError::InvalidAddress(self.coordinator_address.clone()))?;
    if coordinator == utils::zero_address() {
      return Err(ValidationError::ZeroAddress);
    }
    let key_hash = utils::parse_h256(&self.key_hash)
      .ok_or_else(|| ValidationError::InvalidKeyHash(self.key_hash.clone()))?;

    if self.callback_gas_limit == 0 {
      return Err(ValidationError::ZeroCallbackGasLimit);
    }
    let max = limits.max_callback_gas_limit.min(u64::from(u32::MAX));
    if self.callback_gas_limit > max {
      return Err(ValidationError::CallbackGasLimitTooHigh {
        limit: self.callback_gas_limit,
        max,
      });
    }
    let num_confirmations = u16::try_from(self.num_confirmations)
      .map_err(|_| ValidationError::TooManyConfirmations(self.num_confirmations))?;

    if self.num_words == 0 {
      return Err(ValidationError::ZeroNumWords);
    }
    let num_words =
      u32::try_from(self.num_words).map_err(|_| ValidationError::TooManyWords(self.num_words))?;

    Ok(ConstructorArgs {
      subscription_id: self.subscription_id,
      coordinator,
      key_hash,
      // bounded by `max` above
      callback_gas_limit: self.callback_gas_limit as u32,
      num_confirmations,
      num_words,
    })
  }
}

impl ConstructorArgs {
  /// ABI tokens in constructor order:
  /// `(uint64 subscriptionId, address coordinator, bytes32 keyHash,
  ///   uint32 callbackGasLimit, uint16 numConfirmations, uint32 numWords)`.
  pub fn to_tokens(&self) -> Vec<Token> {
    vec![
      Token::Uint(U256::from(self.subscription_id)),
      Token::Address(self.coordinator),
      Token::FixedBytes(self.key_hash.as_bytes().to_vec()),
      Token::Uint(U256::from(self.callback_gas_limit)),
      Token::Uint(U256::from(self.num_confirmations)),
      Token::Uint(U256::from(self.num_words)),
    ]
  }
}
