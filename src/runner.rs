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

use crate::{
  error::Error,
  factory::{ContractFactory, DeploymentReceipt},
  params::{DeploymentParameters, ValidationLimits},
  Result,
};
use ethcontract::{errors::ExecutionError, H160, H256};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
pub struct DeployOptions {
  pub limits: ValidationLimits,
  pub poll_interval: Duration,
  /// Bounds the whole wait, from submission to the last confirmation.
  pub confirmation_timeout: Duration,
  pub cancel: CancellationToken,
}

impl Default for DeployOptions {
  fn default() -> Self {
    Self {
      limits: ValidationLimits::default(),
      poll_interval: DEFAULT_POLL_INTERVAL,
      confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
      cancel: CancellationToken::new(),
    }
  }
}

/// A contract creation that was mined and buried under the requested number
/// of blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
  pub address: H160,
  pub tx_hash: H256,
  pub block_number: u64,
  pub confirmations: u64,
}

/// Validates `params`, sends one contract creation through `factory` and
/// waits until it has `num_confirmations` blocks on top of it.
///
/// Nothing is retried. A second call with the same parameters deploys a
/// second contract.
pub async fn deploy<F>(
  params: &DeploymentParameters,
  factory: &F,
  options: &DeployOptions,
) -> Result<Deployment>
where
  F: ContractFactory + ?Sized,
{
  let args = params.validate(&options.limits)?;
  if options.cancel.is_cancelled() {
    return Err(Error::Cancelled);
  }

  log::info!(
    "deploying with subscription {} coordinator {:?} ({} confirmations)",
    args.subscription_id,
    args.coordinator,
    args.num_confirmations
  );
  let pending = factory.deploy(&args).await.map_err(into_submission)?;
  log::info!("deployment submitted in {:?}", pending.tx_hash);

  let wait = wait_for_confirmations(
    factory,
    pending.tx_hash,
    u64::from(args.num_confirmations),
    options.poll_interval,
  );
  let deployment = tokio::select! {
    biased;
    _ = options.cancel.cancelled() => Err(Error::Cancelled),
    waited = tokio::time::timeout(options.confirmation_timeout, wait) => match waited {
      Ok(result) => result,
      Err(_) => Err(Error::ConfirmationTimeout(format!(
        "{:?} not confirmed within {:?}",
        pending.tx_hash, options.confirmation_timeout
      ))),
    },
  }?;

  log::info!(
    "contract {:?} deployed in block {} ({} confirmations)",
    deployment.address,
    deployment.block_number,
    deployment.confirmations
  );
  Ok(deployment)
}

fn into_submission(err: Error) -> Error {
  match err {
    Error::Submission(_) | Error::EstimationRevert(_) => err,
    Error::ExecutionError(ExecutionError::Revert(reason)) => Error::EstimationRevert(reason),
    other => Error::Submission(other.to_string()),
  }
}

async fn wait_for_confirmations<F>(
  factory: &F,
  tx_hash: H256,
  confirmations: u64,
  poll_interval: Duration,
) -> Result<Deployment>
where
  F: ContractFactory + ?Sized,
{
  let receipt = wait_for_receipt(factory, tx_hash, poll_interval).await?;
  if !receipt.success {
    log::warn!("deployment {:?} reverted in block {}", tx_hash, receipt.block_number);
    return Err(Error::Revert {
      tx_hash,
      reason: receipt.revert_reason,
    });
  }
  let address = receipt.contract_address.ok_or_else(|| {
    Error::Submission(format!("receipt of {:?} has no contract address", tx_hash))
  })?;

  loop {
    let current = match factory.block_number().await {
      Ok(current) => current,
      Err(err) => {
        // the creation is already out; only the timeout or a cancel ends the wait
        log::warn!("{:?}: block number lookup failed: {}", tx_hash, err);
        tokio::time::sleep(poll_interval).await;
        continue;
      }
    };
    let observed = current.saturating_sub(receipt.block_number);
    if observed >= confirmations {
      return Ok(Deployment {
        address,
        tx_hash,
        block_number: receipt.block_number,
        confirmations: observed,
      });
    }
    log::debug!("{:?}: {}/{} confirmations", tx_hash, observed, confirmations);
    tokio::time::sleep(poll_interval).await;
  }
}

async fn wait_for_receipt<F>(
  factory: &F,
  tx_hash: H256,
  poll_interval: Duration,
) -> Result<DeploymentReceipt>
where
  F: ContractFactory + ?Sized,
{
  loop {
    match factory.receipt(tx_hash).await {
      Ok(Some(receipt)) => return Ok(receipt),
      Ok(None) => log::debug!("{:?} still pending", tx_hash),
      Err(err) => log::warn!("{:?}: receipt lookup failed: {}", tx_hash, err),
    }
    tokio::time::sleep(poll_interval).await;
  }
}
