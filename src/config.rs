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

use crate::{
	error::{Error, Result},
	primitives::AccountId,
	progress::JsonFileStore,
};
use serde::{Deserialize, Serialize};
use sp_core::crypto::Ss58Codec;
use std::{
	fs,
	path::{Path, PathBuf},
};

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9944";
pub const DEFAULT_PROGRESS_PATH: &str = "status/rewarded_eras.json";

/// Settings of a payout run, read from a json file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutConfig {
	#[serde(default = "default_endpoint")]
	pub endpoint: String,
	/// SS58 address of the validator stash.
	pub validator: String,
	#[serde(default = "default_progress_path")]
	pub progress_path: PathBuf,
	#[serde(default)]
	pub progress_mirror_path: Option<PathBuf>,
}

fn default_endpoint() -> String {
	DEFAULT_ENDPOINT.to_owned()
}

fn default_progress_path() -> PathBuf {
	PathBuf::from(DEFAULT_PROGRESS_PATH)
}

impl PayoutConfig {
	/// Config with default settings for the given validator.
	pub fn new(validator: impl Into<String>) -> Self {
		Self {
			endpoint: default_endpoint(),
			validator: validator.into(),
			progress_path: default_progress_path(),
			progress_mirror_path: None,
		}
	}

	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let json = fs::read_to_string(path)?;
		Ok(serde_json::from_str(&json)?)
	}

	/// The validator stash, decoded from its SS58 address.
	pub fn validator_account(&self) -> Result<AccountId> {
		AccountId::from_ss58check(&self.validator)
			.map_err(|e| Error::InvalidValidator(format!("{}: {e:?}", self.validator)))
	}

	pub fn progress_store(&self) -> JsonFileStore {
		let store = JsonFileStore::new(&self.progress_path);
		match &self.progress_mirror_path {
			Some(mirror) => store.with_mirror(mirror),
			None => store,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

	#[test]
	fn minimal_config_uses_defaults() {
		let json = format!(r#"{{"validator": "{ALICE}"}}"#);
		let config: PayoutConfig = serde_json::from_str(&json).unwrap();

		assert_eq!(config, PayoutConfig::new(ALICE));
		assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
		assert_eq!(config.progress_store().mirror(), None);
	}

	#[test]
	fn full_config_is_read_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("payout.json");
		fs::write(
			&path,
			format!(
				r#"{{
					"endpoint": "wss://rpc.example.org:443",
					"validator": "{ALICE}",
					"progressPath": "src/status/rewarded_eras.json",
					"progressMirrorPath": "build/status/rewarded_eras.json"
				}}"#
			),
		)
		.unwrap();

		let config = PayoutConfig::from_file(&path).unwrap();

		assert_eq!(config.endpoint, "wss://rpc.example.org:443");
		let store = config.progress_store();
		assert_eq!(store.path(), Path::new("src/status/rewarded_eras.json"));
		assert_eq!(store.mirror(), Some(Path::new("build/status/rewarded_eras.json")));
	}

	#[test]
	fn missing_validator_fails() {
		assert!(serde_json::from_str::<PayoutConfig>(r#"{"endpoint": "ws://x"}"#).is_err());
	}

	#[test]
	fn validator_address_is_decoded() {
		let account = PayoutConfig::new(ALICE).validator_account().unwrap();
		let public: [u8; 32] =
			hex::decode("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d")
				.unwrap()
				.try_into()
				.unwrap();
		assert_eq!(account, AccountId::new(public));
	}

	#[test]
	fn malformed_validator_address_is_rejected() {
		let result = PayoutConfig::new("not-an-address").validator_account();
		assert!(matches!(result, Err(Error::InvalidValidator(_))));
	}
}
