/*
   Copyright 2019 Supercomputing Systems AG

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

	   http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.

*/

//! Operator tool around the payout progress record.

use clap::{Parser, Subcommand};
use log::*;
use staking_payout_client::{
	rpc::JsonrpseeClient, scan_range, scan_reward_eras, EraIndex, GetActiveEra, PayoutConfig,
	ProgressStore, Result, StakingStorage,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "payout-all")]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Json config file.
	#[arg(short, long, default_value = "payout.json")]
	config: PathBuf,

	/// Node websocket url, overrides the config file.
	#[arg(short, long, global = true)]
	endpoint: Option<String>,

	/// SS58 address of the validator stash, overrides the config file.
	#[arg(short, long, global = true)]
	validator: Option<String>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print the persisted progress record.
	Status,
	/// List the closed eras the validator can still claim. Submits nothing.
	Scan,
	/// Record eras claimed outside of a regular run, e.g. after their progress could not be
	/// saved.
	MarkClaimed {
		#[arg(required = true)]
		eras: Vec<EraIndex>,
	},
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();

	let mut config = PayoutConfig::from_file(&cli.config)?;
	if let Some(endpoint) = cli.endpoint {
		config.endpoint = endpoint;
	}
	if let Some(validator) = cli.validator {
		config.validator = validator;
	}
	let store = config.progress_store();

	match cli.command {
		Command::Status => {
			let progress = store.load()?;
			println!("[+] Latest claimed era: {:?}", progress.latest_claimed_era());
			println!("[+] Claimed history: {:?}", progress.claimed_history());
		},
		Command::Scan => {
			let validator = config.validator_account()?;
			let progress = store.load()?;
			info!("Interacting with node on {}", config.endpoint);
			let client = JsonrpseeClient::new(&config.endpoint).await?;
			let staking = StakingStorage::new(client);

			let active_era = staking.get_active_era().await?;
			let range = scan_range(&progress, &active_era);
			println!("[+] Active era is {}, scanning eras {range:?}", active_era.index);
			let eras = scan_reward_eras(&staking, range, &validator).await?;
			println!("[+] Claimable eras: {eras:?}");
		},
		Command::MarkClaimed { mut eras } => {
			eras.sort_unstable();
			eras.dedup();
			let mut progress = store.load()?;
			progress.record_claimed(&eras)?;
			store.save(&progress)?;
			println!("[+] Latest claimed era is now {:?}", progress.latest_claimed_era());
		},
	}
	Ok(())
}
