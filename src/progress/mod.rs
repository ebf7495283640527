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

//! Durable record of which eras have already been claimed.

pub use file_store::JsonFileStore;

pub mod file_store;

use crate::{
	error::{Error, Result},
	primitives::EraIndex,
};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Eras claimed so far. `claimed_history` is strictly increasing and
/// `latest_claimed_era` is always its last element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
	#[serde(rename = "latestRewardedEra", alias = "latestClaimedEra", default)]
	latest_claimed_era: Option<EraIndex>,
	#[serde(rename = "rewardedHistory", alias = "claimedHistory", default)]
	claimed_history: Vec<EraIndex>,
}

impl ProgressState {
	/// State of a validator that never claimed anything.
	pub fn new() -> Self {
		Self::default()
	}

	/// Rebuild a state from its history, checking the ordering invariant.
	pub fn from_history(claimed_history: Vec<EraIndex>) -> Result<Self> {
		let state = Self { latest_claimed_era: claimed_history.last().copied(), claimed_history };
		state.validate()?;
		Ok(state)
	}

	pub fn latest_claimed_era(&self) -> Option<EraIndex> {
		self.latest_claimed_era
	}

	pub fn claimed_history(&self) -> &[EraIndex] {
		&self.claimed_history
	}

	/// First era that may still be unclaimed.
	pub fn next_unclaimed_era(&self) -> EraIndex {
		match self.latest_claimed_era {
			Some(era) => era.saturating_add(1),
			None => 0,
		}
	}

	/// Append freshly claimed eras. They must be ascending and above everything recorded.
	pub fn record_claimed(&mut self, eras: &[EraIndex]) -> Result<()> {
		let mut latest = self.latest_claimed_era;
		for era in eras {
			if latest.is_some_and(|latest| *era <= latest) {
				return Err(Error::InconsistentProgress(format!(
					"era {era} is not above the latest claimed era {latest:?}"
				)))
			}
			latest = Some(*era);
		}
		self.claimed_history.extend_from_slice(eras);
		self.latest_claimed_era = latest;
		Ok(())
	}

	/// Check the ordering invariant. Records written by older tooling used `0` instead of
	/// "none" for a validator without history; those are normalized here.
	pub fn validate(&self) -> Result<()> {
		if let Some(pair) = self.claimed_history.windows(2).find(|pair| pair[0] >= pair[1]) {
			return Err(Error::InconsistentProgress(format!(
				"claimed history is not strictly increasing at {pair:?}"
			)))
		}
		if self.latest_claimed_era != self.claimed_history.last().copied() {
			return Err(Error::InconsistentProgress(format!(
				"latest claimed era {:?} does not match the end of the history {:?}",
				self.latest_claimed_era,
				self.claimed_history.last()
			)))
		}
		Ok(())
	}

	fn normalize_legacy(mut self) -> Self {
		if self.claimed_history.is_empty() && self.latest_claimed_era == Some(0) {
			self.latest_claimed_era = None;
		}
		self
	}
}

/// Load / save capability for [`ProgressState`].
pub trait ProgressStore {
	/// The persisted state, or the initial state if nothing was saved yet.
	fn load(&self) -> Result<ProgressState>;

	fn save(&self, state: &ProgressState) -> Result<()>;
}

/// Keeps the progress in memory only. Mainly useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
	state: Mutex<Option<ProgressState>>,
}

impl InMemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_state(state: ProgressState) -> Self {
		Self { state: Mutex::new(Some(state)) }
	}
}

impl ProgressStore for InMemoryStore {
	fn load(&self) -> Result<ProgressState> {
		let state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		Ok(state.clone().unwrap_or_default())
	}

	fn save(&self, state: &ProgressState) -> Result<()> {
		state.validate()?;
		let mut stored = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
		*stored = Some(state.clone());
		Ok(())
	}
}
