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

//! Reads `pallet-staking` storage through `state_getStorage`.

use super::{GetActiveEra, GetRewardPoints};
use crate::{
	error::{Error, Result},
	primitives::{ActiveEraInfo, EraIndex, EraRewardPoints},
	rpc::Request,
	rpc_params, storage_key, storage_map_key_twox64_concat,
};
use codec::Decode;
use log::*;
use sp_storage::StorageKey;

const MODULE: &str = "Staking";
const ACTIVE_ERA: &str = "ActiveEra";
const ERAS_REWARD_POINTS: &str = "ErasRewardPoints";

/// Staking storage of the node behind `Client`, always read at the best block.
#[derive(Debug, Clone)]
pub struct StakingStorage<Client> {
	client: Client,
}

impl<Client> StakingStorage<Client> {
	pub fn new(client: Client) -> Self {
		Self { client }
	}

	pub fn client(&self) -> &Client {
		&self.client
	}
}

#[maybe_async::maybe_async]
impl<Client: Request> StakingStorage<Client> {
	async fn get_storage_by_key<V: Decode>(&self, key: StorageKey) -> Result<Option<V>> {
		let hex_key = format!("0x{}", hex::encode(&key.0));
		trace!("storage key is: {hex_key}");
		let value: Option<String> =
			self.client.request("state_getStorage", rpc_params![hex_key]).await?;
		match value {
			Some(hex_value) => {
				let bytes = hex::decode(hex_value.trim_start_matches("0x"))?;
				Ok(Some(Decode::decode(&mut bytes.as_slice())?))
			},
			None => Ok(None),
		}
	}
}

#[maybe_async::maybe_async(?Send)]
impl<Client: Request> GetActiveEra for StakingStorage<Client> {
	async fn get_active_era(&self) -> Result<ActiveEraInfo> {
		let key = storage_key(MODULE, ACTIVE_ERA);
		self.get_storage_by_key(key).await?.ok_or(Error::ActiveEraNotFound)
	}
}

#[maybe_async::maybe_async(?Send)]
impl<Client: Request> GetRewardPoints for StakingStorage<Client> {
	async fn get_reward_points(&self, era: EraIndex) -> Result<Option<EraRewardPoints>> {
		let key = storage_map_key_twox64_concat(MODULE, ERAS_REWARD_POINTS, &era);
		self.get_storage_by_key(key).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{primitives::AccountId, rpc::mocks::RpcClientMock};
	use codec::Encode;
	use std::collections::BTreeMap;

	fn hex_value<V: Encode>(value: &V) -> Option<String> {
		Some(format!("0x{}", hex::encode(value.encode())))
	}

	fn hex_key(key: StorageKey) -> String {
		format!("0x{}", hex::encode(key.0))
	}

	#[maybe_async::test(feature = "sync-api", async(not(feature = "sync-api"), tokio::test))]
	async fn active_era_is_decoded() {
		let client = RpcClientMock::new();
		let active_era = ActiveEraInfo { index: 8, start: Some(1_700_000_000_000) };
		client.update_entry(
			"state_getStorage",
			rpc_params![hex_key(storage_key(MODULE, ACTIVE_ERA))],
			hex_value(&active_era),
		);
		let storage = StakingStorage::new(client);

		let era = storage.get_active_era().await.unwrap();

		assert_eq!(era, active_era);
	}

	#[maybe_async::test(feature = "sync-api", async(not(feature = "sync-api"), tokio::test))]
	async fn missing_active_era_is_an_error() {
		let client = RpcClientMock::new();
		client.update_entry(
			"state_getStorage",
			rpc_params![hex_key(storage_key(MODULE, ACTIVE_ERA))],
			Option::<String>::None,
		);
		let storage = StakingStorage::new(client);

		let result = storage.get_active_era().await;

		assert!(matches!(result, Err(Error::ActiveEraNotFound)));
	}

	#[maybe_async::test(feature = "sync-api", async(not(feature = "sync-api"), tokio::test))]
	async fn reward_points_are_read_per_era() {
		let validator = AccountId::new([7u8; 32]);
		let points =
			EraRewardPoints { total: 100, individual: BTreeMap::from([(validator.clone(), 10)]) };
		let client = RpcClientMock::new();
		client.update_entry(
			"state_getStorage",
			rpc_params![hex_key(storage_map_key_twox64_concat(MODULE, ERAS_REWARD_POINTS, &7u32))],
			hex_value(&points),
		);
		client.update_entry(
			"state_getStorage",
			rpc_params![hex_key(storage_map_key_twox64_concat(MODULE, ERAS_REWARD_POINTS, &6u32))],
			Option::<String>::None,
		);
		let storage = StakingStorage::new(client);

		let rewarded = storage.get_reward_points(7).await.unwrap();
		let unrewarded = storage.get_reward_points(6).await.unwrap();

		assert_eq!(rewarded, Some(points));
		assert_eq!(unrewarded, None);
	}

	#[maybe_async::test(feature = "sync-api", async(not(feature = "sync-api"), tokio::test))]
	async fn undecodable_storage_value_is_an_error() {
		let client = RpcClientMock::new();
		client.update_entry(
			"state_getStorage",
			rpc_params![hex_key(storage_map_key_twox64_concat(MODULE, ERAS_REWARD_POINTS, &1u32))],
			Some("0x01"),
		);
		let storage = StakingStorage::new(client);

		let result = storage.get_reward_points(1).await;

		assert!(matches!(result, Err(Error::Codec(_))));
	}

	#[maybe_async::test(feature = "sync-api", async(not(feature = "sync-api"), tokio::test))]
	async fn rpc_failure_is_propagated() {
		let storage = StakingStorage::new(RpcClientMock::new());

		let result = storage.get_reward_points(3).await;

		assert!(matches!(result, Err(Error::RpcClient(_))));
	}
}
