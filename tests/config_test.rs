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

use sentiment_deploy::{config, params::ValidationLimits};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const GOERLI: &str = include_str!("../config/config.goerli.json");

#[test]
fn sample_config_parses() {
  let conf = config::parse_config(GOERLI).expect("couldnt parse config");
  assert_eq!(conf.chain_id, 5);
  assert!(conf.check_balance);
  assert_eq!(conf.gas, None);
  assert_eq!(conf.deployment.subscription_id, 385);
  assert_eq!(conf.deployment.num_words, 4);
  assert!(conf.deployment.validate(&conf.limits()).is_ok());

  let options = conf.deploy_options(CancellationToken::new());
  assert_eq!(options.poll_interval, Duration::from_millis(4000));
  assert_eq!(options.confirmation_timeout, Duration::from_secs(600));
  assert_eq!(options.limits, ValidationLimits::with_max_callback_gas_limit(2_500_000));
}

#[test]
fn optional_settings_fall_back_to_defaults() {
  let mut json: serde_json::Value = serde_json::from_str(GOERLI).unwrap();
  let obj = json.as_object_mut().unwrap();
  for key in &[
    "max_callback_gas_limit",
    "poll_interval_ms",
    "confirmation_timeout_secs",
  ] {
    obj.remove(*key);
  }
  obj.insert("check_balance".to_string(), serde_json::Value::Bool(false));

  let conf = config::parse_config(&json.to_string()).expect("couldnt parse config");
  assert!(!conf.check_balance);
  let options = conf.deploy_options(CancellationToken::new());
  assert_eq!(options.poll_interval, Duration::from_secs(1));
  assert_eq!(options.confirmation_timeout, Duration::from_secs(300));
  assert_eq!(options.limits, ValidationLimits::default());
}

#[test]
fn missing_deployment_section_is_an_error() {
  let mut json: serde_json::Value = serde_json::from_str(GOERLI).unwrap();
  json.as_object_mut().unwrap().remove("deployment");
  assert!(config::parse_config(&json.to_string()).is_err());
}
