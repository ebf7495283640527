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

use super::{GetActiveEra, GetRewardPoints, SubmissionOutcome, SubmitBatch};
use crate::{
	batch::ClaimBatch,
	error::{Error, Result},
	primitives::{ActiveEraInfo, EraIndex, EraRewardPoints},
	rpc::Error as RpcClientError,
};
use std::{
	collections::{BTreeMap, BTreeSet, VecDeque},
	sync::Mutex,
};

/// In-memory chain: reward points per era, an active era and scripted submission outcomes.
/// Submissions without a scripted outcome settle.
#[derive(Debug, Default)]
pub struct LedgerMock {
	pub active_era: EraIndex,
	pub reward_points: BTreeMap<EraIndex, EraRewardPoints>,
	pub failing_eras: BTreeSet<EraIndex>,
	pub outcomes: Mutex<VecDeque<SubmissionOutcome>>,
	pub submitted: Mutex<Vec<ClaimBatch>>,
	reads: Mutex<Vec<EraIndex>>,
}

impl LedgerMock {
	pub fn new(active_era: EraIndex) -> Self {
		Self { active_era, ..Default::default() }
	}

	pub fn with_points(mut self, era: EraIndex, points: EraRewardPoints) -> Self {
		self.reward_points.insert(era, points);
		self
	}

	pub fn with_failing_era(mut self, era: EraIndex) -> Self {
		self.failing_eras.insert(era);
		self
	}

	pub fn with_outcome(self, outcome: SubmissionOutcome) -> Self {
		self.outcomes.lock().unwrap().push_back(outcome);
		self
	}

	/// Eras whose reward points were requested, in request order.
	pub fn reads(&self) -> Vec<EraIndex> {
		self.reads.lock().unwrap().clone()
	}

	pub fn submitted(&self) -> Vec<ClaimBatch> {
		self.submitted.lock().unwrap().clone()
	}
}

#[maybe_async::maybe_async(?Send)]
impl GetActiveEra for LedgerMock {
	async fn get_active_era(&self) -> Result<ActiveEraInfo> {
		Ok(ActiveEraInfo { index: self.active_era, start: Some(0) })
	}
}

#[maybe_async::maybe_async(?Send)]
impl GetRewardPoints for LedgerMock {
	async fn get_reward_points(&self, era: EraIndex) -> Result<Option<EraRewardPoints>> {
		self.reads.lock().unwrap().push(era);
		if self.failing_eras.contains(&era) {
			return Err(Error::RpcClient(RpcClientError::NoResponse("state_getStorage".into())))
		}
		Ok(self.reward_points.get(&era).cloned())
	}
}

#[maybe_async::maybe_async(?Send)]
impl SubmitBatch for LedgerMock {
	async fn submit_batch(&self, batch: &ClaimBatch) -> SubmissionOutcome {
		self.submitted.lock().unwrap().push(batch.clone());
		self.outcomes.lock().unwrap().pop_front().unwrap_or(SubmissionOutcome::Settled)
	}
}
