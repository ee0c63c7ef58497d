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

//! Deploys the VRF consumer contract described by `config/config.$NETWORK.json`
//! and prints its address.

use dotenv::dotenv;
use env_logger::Env;
use sentiment_deploy::{artifact::ArtifactFactory, config, runner, utils, Result};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
  dotenv().ok();
  env_logger::init_from_env(
    Env::default().default_filter_or("warn,sentiment_deploy=info,deploy=info"),
  );

  if let Err(err) = run().await {
    log::error!("deployment failed: {}", err);
    std::process::exit(1);
  }
}

async fn run() -> Result<()> {
  let net = std::env::var("NETWORK").map_err(|_| "NETWORK REQUIRED")?;
  let (web3, my_account, conf) = config::init_web3(net.as_str(), true).await?;

  let factory = ArtifactFactory::load(&web3, my_account, &conf.artifact)?.with_gas(conf.gas);
  log::info!("loaded artifact {} from {}", factory.name(), conf.artifact);

  let cancel = CancellationToken::new();
  let on_interrupt = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      log::warn!("interrupted, abandoning the confirmation wait");
      on_interrupt.cancel();
    }
  });

  let deployment =
    runner::deploy(&conf.deployment, &factory, &conf.deploy_options(cancel)).await?;

  println!(
    "Contract deployed to: {}",
    utils::to_checksum_address(&deployment.address)
  );
  println!("transaction {:?}", deployment.tx_hash);
  Ok(())
}
