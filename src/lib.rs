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

//! Finds the staking eras a validator has not been paid out for yet, claims all of them
//! with a single atomic `batch_all` extrinsic and remembers how far it got, so the next
//! run picks up right after the last settled claim.

use codec::Encode;
use sp_crypto_hashing::{twox_128, twox_64};
use sp_storage::StorageKey;

pub use batch::*;
pub use config::PayoutConfig;
pub use coordinator::*;
pub use error::{Error, Result};
pub use ledger::*;
pub use primitives::*;
pub use progress::*;
pub use scanner::*;

pub mod batch;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod primitives;
pub mod progress;
pub mod rpc;
pub mod scanner;

/// Returns the concatenated 128 bit hash of the given module and specific storage key
/// as a full Substrate StorageKey.
pub fn storage_key(module: &str, storage_key_name: &str) -> StorageKey {
	let mut key = twox_128(module.as_bytes()).to_vec();
	key.extend(twox_128(storage_key_name.as_bytes()));
	StorageKey(key)
}

/// Storage key of a single map entry whose hasher is `Twox64Concat`.
pub fn storage_map_key_twox64_concat<K: Encode>(
	module: &str,
	storage_key_name: &str,
	map_key: &K,
) -> StorageKey {
	let StorageKey(mut key) = storage_key(module, storage_key_name);
	let encoded = map_key.encode();
	key.extend(twox_64(&encoded));
	key.extend(encoded);
	StorageKey(key)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn storage_key_is_concatenation_of_prefix_hashes() {
		let key = storage_key("Staking", "ActiveEra");
		assert_eq!(key.0.len(), 32);
		assert_eq!(&key.0[..16], &twox_128(b"Staking"));
		assert_eq!(&key.0[16..], &twox_128(b"ActiveEra"));
	}

	#[test]
	fn twox64_concat_map_key_ends_with_plain_encoded_key() {
		let era: u32 = 7;
		let key = storage_map_key_twox64_concat("Staking", "ErasRewardPoints", &era);
		assert_eq!(key.0.len(), 32 + 8 + 4);
		assert_eq!(&key.0[32..40], &twox_64(&era.encode()));
		assert_eq!(&key.0[40..], &7u32.to_le_bytes());
	}
}
