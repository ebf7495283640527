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

//! One `payout_stakers` claim per era, wrapped into a single `Utility.batch_all`.
//! https://polkadot.js.org/docs/substrate/extrinsics#staking
//! https://polkadot.js.org/docs/substrate/extrinsics/#utility

use crate::{
	error::{Error, Result},
	primitives::{AccountId, EraIndex},
};
use codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Pallet index followed by the call index within that pallet.
pub type CallIndex = [u8; 2];

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Encode, Decode, Debug)]
pub struct PayoutStakers<AccountId> {
	pub validator_stash: AccountId,
	pub era: u32,
}

#[derive(Clone, Eq, PartialEq, Encode, Decode, Debug)]
pub struct Batch<Call> {
	pub calls: Vec<Call>,
}

pub type PayoutStakersCall<AccountId> = (CallIndex, PayoutStakers<AccountId>);
pub type BatchAllCall<Call> = (CallIndex, Batch<Call>);

/// Call indices of `Staking.payout_stakers` and `Utility.batch_all` in the target runtime.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallIndices {
	pub payout_stakers: CallIndex,
	pub batch_all: CallIndex,
}

/// The claims of a single payout run, in ascending era order.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ClaimBatch {
	claims: Vec<PayoutStakers<AccountId>>,
}

impl ClaimBatch {
	/// One claim per era, keeping the order of `eras`.
	pub fn build(validator: AccountId, eras: &[EraIndex]) -> Result<Self> {
		if eras.is_empty() {
			return Err(Error::EmptyBatch)
		}
		let claims = eras
			.iter()
			.map(|era| PayoutStakers { validator_stash: validator.clone(), era: *era })
			.collect();
		Ok(Self { claims })
	}

	pub fn claims(&self) -> &[PayoutStakers<AccountId>] {
		&self.claims
	}

	pub fn eras(&self) -> Vec<EraIndex> {
		self.claims.iter().map(|claim| claim.era).collect()
	}

	/// The `batch_all` call, ready to be wrapped into an extrinsic by a signer.
	pub fn compose(&self, indices: &CallIndices) -> BatchAllCall<PayoutStakersCall<AccountId>> {
		let calls = self
			.claims
			.iter()
			.map(|claim| (indices.payout_stakers, claim.clone()))
			.collect();
		(indices.batch_all, Batch { calls })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn validator() -> AccountId {
		AccountId::new([9u8; 32])
	}

	#[test]
	fn build_keeps_era_order() {
		let batch = ClaimBatch::build(validator(), &[3, 4, 6]).unwrap();

		assert_eq!(batch.eras(), vec![3, 4, 6]);
		assert!(batch.claims().iter().all(|claim| claim.validator_stash == validator()));
	}

	#[test]
	fn build_without_eras_fails() {
		assert!(matches!(ClaimBatch::build(validator(), &[]), Err(Error::EmptyBatch)));
	}

	#[test]
	fn composed_batch_all_encodes_like_the_runtime_call() {
		let indices = CallIndices { payout_stakers: [7, 18], batch_all: [26, 2] };
		let batch = ClaimBatch::build(validator(), &[7]).unwrap();

		let encoded = batch.compose(&indices).encode();

		let mut expected = vec![26u8, 2];
		// Compact encoded vector length of one.
		expected.push(4);
		expected.extend([7u8, 18]);
		expected.extend([9u8; 32]);
		expected.extend(7u32.to_le_bytes());
		assert_eq!(encoded, expected);
	}
}
