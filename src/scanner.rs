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

//! Finds the closed eras in which a validator earned reward points.

use crate::{
	error::{Error, Result},
	ledger::GetRewardPoints,
	primitives::{AccountId, ActiveEraInfo, EraIndex},
	progress::ProgressState,
};
use core::ops::Range;
use log::*;

/// Eras still to be looked at: everything after the latest claimed era, up to but excluding
/// the active era.
pub fn scan_range(progress: &ProgressState, active_era: &ActiveEraInfo) -> Range<EraIndex> {
	progress.next_unclaimed_era()..active_era.index
}

/// Returns, in ascending order, every era of `range` in which `validator` earned reward
/// points. Eras without any reward record are skipped.
///
/// A failed read aborts the whole scan: a silently skipped era would never be claimed.
#[maybe_async::maybe_async]
pub async fn scan_reward_eras<Ledger: GetRewardPoints>(
	ledger: &Ledger,
	range: Range<EraIndex>,
	validator: &AccountId,
) -> Result<Vec<EraIndex>> {
	let mut reward_eras = Vec::new();
	for era in range {
		let reward_points = ledger
			.get_reward_points(era)
			.await
			.map_err(|e| Error::ScanFetch { era, source: Box::new(e) })?;
		let Some(reward_points) = reward_points else {
			trace!("No reward points recorded for era {era}");
			continue
		};
		if let Some(points) = reward_points.points_of(validator) {
			info!(
				"Found era points that can be rewarded! Validator Stash: {validator}, \
				 Era Index: {era}, Era Point: {points}"
			);
			reward_eras.push(era);
		}
	}
	Ok(reward_eras)
}
