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

//! Everything the payout flow needs from the chain: reading staking storage and getting a
//! claim batch included.

pub use storage::StakingStorage;
pub use submission::*;

pub mod storage;
pub mod submission;

#[cfg(test)]
pub mod mocks;

use crate::{
	error::Result,
	primitives::{ActiveEraInfo, EraIndex, EraRewardPoints},
};

#[maybe_async::maybe_async(?Send)]
pub trait GetActiveEra {
	/// The currently open era. It can not be claimed yet.
	async fn get_active_era(&self) -> Result<ActiveEraInfo>;
}

#[maybe_async::maybe_async(?Send)]
pub trait GetRewardPoints {
	/// Reward points recorded for `era`, `None` if the chain holds no record for it.
	async fn get_reward_points(&self, era: EraIndex) -> Result<Option<EraRewardPoints>>;
}
