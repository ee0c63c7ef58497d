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
  params::{DeploymentParameters, ValidationLimits},
  runner::{DeployOptions, DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_POLL_INTERVAL},
  Result,
};
use ethcontract::{transport::DynTransport, Account, Http, PrivateKey, Web3};
use serde::{Deserialize, Serialize};
use std::{str::FromStr, time::Duration};
use tokio_util::sync::CancellationToken;

const ENV_PREFIX: &str = "DEPLOY";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
  pub chain_id: u64,
  pub eth_url: String,
  pub private_key: String,
  /// Path of the compiled contract JSON.
  pub artifact: String,
  #[serde(default)]
  pub gas: Option<u64>,
  #[serde(default = "default_check_balance")]
  pub check_balance: bool,
  #[serde(default)]
  pub max_callback_gas_limit: Option<u64>,
  #[serde(default)]
  pub poll_interval_ms: Option<u64>,
  #[serde(default)]
  pub confirmation_timeout_secs: Option<u64>,
  pub deployment: DeploymentParameters,
}

fn default_check_balance() -> bool {
  true
}

impl Config {
  pub fn limits(&self) -> ValidationLimits {
    match self.max_callback_gas_limit {
      Some(max) => ValidationLimits::with_max_callback_gas_limit(max),
      None => ValidationLimits::default(),
    }
  }

  pub fn deploy_options(&self, cancel: CancellationToken) -> DeployOptions {
    DeployOptions {
      limits: self.limits(),
      poll_interval: self
        .poll_interval_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL),
      confirmation_timeout: self
        .confirmation_timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT),
      cancel,
    }
  }
}

/// Reads `config/config.<network>.json`, then applies `DEPLOY_*` environment
/// overrides (`DEPLOY_DEPLOYMENT__NUM_WORDS=2` sets `deployment.num_words`).
pub fn load_config(network: &str) -> Result<Config> {
  let fp = format!("config/config.{}.json", network);
  let mut settings = config::Config::default();
  settings.merge(config::File::with_name(fp.as_str()))?;
  settings.merge(config::Environment::with_prefix(ENV_PREFIX).separator("__"))?;
  Ok(settings.try_into::<Config>()?)
}

pub fn parse_config(json: &str) -> Result<Config> {
  let mut settings = config::Config::default();
  settings.merge(config::File::from_str(json, config::FileFormat::Json))?;
  Ok(settings.try_into::<Config>()?)
}

pub async fn init_web3(
  net: &str,
  check_balance: bool,
) -> Result<(Web3<DynTransport>, Account, Config)> {
  let conf = load_config(net)?;
  log::info!("network {} at {} (chain {})", net, conf.eth_url, conf.chain_id);
  let priv_key = PrivateKey::from_str(conf.private_key.as_str())
    .map_err(|e| Error::Other(format!("couldnt parse private key: {}", e)))?;
  let web3 = Web3::new(DynTransport::new(Http::new(conf.eth_url.as_str())?));
  let my_account = Account::Offline(priv_key, Some(conf.chain_id));

  if check_balance && conf.check_balance {
    let my_address = my_account.address();
    let balance = web3.eth().balance(my_address, None).await?;
    log::info!("deployer {:?} holds {} wei", my_address, balance);
    if balance.is_zero() {
      return Err(Error::Other(format!(
        "no ETH balance for {:?} to pay deployment gas",
        my_address
      )));
    }
  }
  Ok((web3, my_account, conf))
}
