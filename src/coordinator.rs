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

//! One payout run: compute the unclaimed range, scan it, claim everything found in one
//! batch and record the progress once the batch settled.

use crate::{
	batch::ClaimBatch,
	error::{Error, Result},
	ledger::{GetActiveEra, GetRewardPoints, SubmissionOutcome, SubmitBatch},
	primitives::{AccountId, EraIndex},
	progress::{ProgressState, ProgressStore},
	scanner::{scan_range, scan_reward_eras},
};
use log::*;

/// `pallet-staking` error returned when an era was already paid out.
const ALREADY_CLAIMED: &str = "AlreadyClaimed";

/// Stages of a payout run, in the order they are passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
	Idle,
	RangeComputed,
	Scanned,
	NothingToClaim,
	BatchBuilt,
	Submitted,
	Settled,
	AlreadyClaimed,
	Failed,
}

/// How a run ended, if it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
	/// There was no closed and unclaimed era with reward points for the validator.
	NothingToClaim,
	/// The batch settled and the progress was saved.
	Settled { eras: Vec<EraIndex>, progress: ProgressState },
	/// The chain reports the eras as paid out already, while the local progress does not know
	/// about it. Nothing was saved. As `batch_all` is all or nothing, every following run
	/// submits the same failing batch and newer eras stay unclaimed until the progress record
	/// is reconciled, e.g. with `payout-all mark-claimed`.
	AlreadyClaimed { eras: Vec<EraIndex>, detail: String },
}

pub struct PayoutCoordinator<Ledger, Submitter, Store> {
	ledger: Ledger,
	submitter: Submitter,
	store: Store,
	validator: AccountId,
	stage: RunStage,
}

impl<Ledger, Submitter, Store> PayoutCoordinator<Ledger, Submitter, Store> {
	pub fn new(ledger: Ledger, submitter: Submitter, store: Store, validator: AccountId) -> Self {
		Self { ledger, submitter, store, validator, stage: RunStage::Idle }
	}

	pub fn ledger(&self) -> &Ledger {
		&self.ledger
	}

	pub fn submitter(&self) -> &Submitter {
		&self.submitter
	}

	pub fn store(&self) -> &Store {
		&self.store
	}

	pub fn validator(&self) -> &AccountId {
		&self.validator
	}

	/// The last stage the latest run reached.
	pub fn stage(&self) -> RunStage {
		self.stage
	}

	fn enter(&mut self, stage: RunStage) {
		debug!("payout run: {:?} -> {:?}", self.stage, stage);
		self.stage = stage;
	}
}

#[maybe_async::maybe_async]
impl<Ledger, Submitter, Store> PayoutCoordinator<Ledger, Submitter, Store>
where
	Ledger: GetActiveEra + GetRewardPoints,
	Submitter: SubmitBatch,
	Store: ProgressStore,
{
	/// Run the payout flow once. Progress is only written after the batch settled; every
	/// failure leaves it untouched so the next run retries the same eras.
	pub async fn run(&mut self) -> Result<RunOutcome> {
		self.stage = RunStage::Idle;
		let result = self.run_stages().await;
		if result.is_err() {
			self.enter(RunStage::Failed);
		}
		result
	}

	async fn run_stages(&mut self) -> Result<RunOutcome> {
		let active_era = self.ledger.get_active_era().await?;
		let progress = self.store.load()?;
		let range = scan_range(&progress, &active_era);
		self.enter(RunStage::RangeComputed);
		if range.is_empty() {
			info!("No era to receive rewards, active era is {}", active_era.index);
			self.enter(RunStage::NothingToClaim);
			return Ok(RunOutcome::NothingToClaim)
		}

		debug!("scanning eras {range:?} for validator {}", self.validator);
		let eras = scan_reward_eras(&self.ledger, range, &self.validator).await?;
		self.enter(RunStage::Scanned);
		if eras.is_empty() {
			info!("No era to receive rewards");
			self.enter(RunStage::NothingToClaim);
			return Ok(RunOutcome::NothingToClaim)
		}

		let batch = ClaimBatch::build(self.validator.clone(), &eras)?;
		self.enter(RunStage::BatchBuilt);
		let outcome = self.submitter.submit_batch(&batch).await;
		self.enter(RunStage::Submitted);

		match outcome {
			SubmissionOutcome::Settled => {
				let progress = self.persist(progress, &eras)?;
				self.enter(RunStage::Settled);
				Ok(RunOutcome::Settled { eras, progress })
			},
			SubmissionOutcome::Interrupted(detail) | SubmissionOutcome::ExtrinsicFailed(detail)
				if detail.contains(ALREADY_CLAIMED) =>
			{
				warn!(
					"Eras {eras:?} are already claimed on chain but not in the local progress \
					 record ({detail}). Reconcile the progress record manually."
				);
				self.enter(RunStage::AlreadyClaimed);
				Ok(RunOutcome::AlreadyClaimed { eras, detail })
			},
			SubmissionOutcome::Interrupted(detail) | SubmissionOutcome::ExtrinsicFailed(detail) => {
				error!("Invalid Transaction! {detail}");
				Err(Error::SubmissionRejected(detail))
			},
			SubmissionOutcome::TransportError(detail) => {
				error!("Could not determine the outcome of the claim batch: {detail}");
				Err(Error::Transport(detail))
			},
		}
	}

	fn persist(&self, progress: ProgressState, eras: &[EraIndex]) -> Result<ProgressState> {
		let mut next = progress;
		let saved = next.record_claimed(eras).and_then(|_| self.store.save(&next));
		if let Err(e) = saved {
			error!(
				"Eras {eras:?} were claimed, but the progress record could not be saved: {e}. \
				 The next run will try to claim them again."
			);
			return Err(Error::Persistence { eras: eras.to_vec(), source: Box::new(e) })
		}
		Ok(next)
	}
}
