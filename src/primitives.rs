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

//! On-chain types of `pallet-staking` the payout flow reads.

use codec::{Decode, Encode};
use std::collections::BTreeMap;

pub use sp_core::{crypto::AccountId32 as AccountId, H256 as Hash};

/// Counter for the number of eras that have passed.
pub type EraIndex = u32;

/// Reward points are an aggregation of the contributions of a validator in an era.
pub type RewardPoint = u32;

/// Information regarding the active era (era in used in session).
// Same layout as `pallet_staking::ActiveEraInfo`.
#[derive(Clone, Copy, Eq, PartialEq, Encode, Decode, Debug)]
pub struct ActiveEraInfo {
	/// Index of era.
	pub index: EraIndex,
	/// Moment of start expressed as millisecond from `$UNIX_EPOCH`.
	///
	/// Start can be none if start hasn't been set for the era yet,
	/// Start is set on the first on_finalize of the era to guarantee usage of `Time`.
	pub start: Option<u64>,
}

/// Reward points of an era. Used to split era total payout between validators.
// Same layout as `pallet_staking::EraRewardPoints`.
#[derive(Clone, Eq, PartialEq, Encode, Decode, Debug, Default)]
pub struct EraRewardPoints {
	/// Total number of points. Equals the sum of reward points for each validator.
	pub total: RewardPoint,
	/// The reward points earned by a given validator.
	pub individual: BTreeMap<AccountId, RewardPoint>,
}

impl EraRewardPoints {
	/// Points `validator` earned in this era. `None` if it did not take part, or if nobody
	/// was rewarded at all.
	pub fn points_of(&self, validator: &AccountId) -> Option<RewardPoint> {
		if self.total == 0 {
			return None
		}
		self.individual.get(validator).copied()
	}
}
