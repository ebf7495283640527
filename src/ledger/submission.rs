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

//! Getting a claim batch included and deciding whether it was applied.

use crate::{batch::ClaimBatch, error::Result, primitives::Hash};
use log::*;

/// Final state of a claim batch submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
	/// The batch was included and every claim in it was applied.
	Settled,
	/// The batch was aborted, either by the runtime or before it reached the node.
	Interrupted(String),
	/// The batch was included, but its dispatch failed.
	ExtrinsicFailed(String),
	/// It could not be determined what happened to the batch.
	TransportError(String),
}

#[maybe_async::maybe_async(?Send)]
pub trait SubmitBatch {
	/// Submit the batch and wait until the chain reached a final state for it.
	async fn submit_batch(&self, batch: &ClaimBatch) -> SubmissionOutcome;
}

/// Simplified TransactionStatus to allow the user to choose until when to watch
/// an extrinsic.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum XtStatus {
	Ready,
	Broadcast,
	InBlock,
	Finalized,
}

/// Possible transaction status events, as reported by `author_submitAndWatchExtrinsic`.
// Same variants as `sc_transaction_pool_api::TransactionStatus`.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionStatus<Hash, BlockHash> {
	/// Transaction is part of the future queue.
	Future,
	/// Transaction is part of the ready queue.
	Ready,
	/// The transaction has been broadcast to the given peers.
	Broadcast(Vec<String>),
	/// Transaction has been included in block with given hash.
	InBlock(BlockHash),
	/// The block this transaction was included in has been retracted.
	Retracted(BlockHash),
	/// Maximum number of finality watchers has been reached,
	/// old watchers are being removed.
	FinalityTimeout(BlockHash),
	/// Transaction has been finalized by a finality-gadget, e.g GRANDPA
	Finalized(BlockHash),
	/// Transaction has been replaced in the pool, by another transaction
	/// that provides the same tags. (e.g. same (sender, nonce)).
	Usurped(Hash),
	/// Transaction has been dropped from the pool because of the limit.
	Dropped,
	/// Transaction is no longer valid in the current state.
	Invalid,
}

impl<Hash, BlockHash> TransactionStatus<Hash, BlockHash> {
	/// The transaction ended up in a block and the watcher may stop here.
	pub fn is_included(&self) -> bool {
		matches!(self, TransactionStatus::InBlock(_) | TransactionStatus::Finalized(_))
	}

	/// The pool refused or evicted the transaction, so it was never applied.
	pub fn is_rejected(&self) -> bool {
		matches!(
			self,
			TransactionStatus::Usurped(_) | TransactionStatus::Dropped | TransactionStatus::Invalid
		)
	}
}

/// An event emitted while applying the extrinsic, already decoded by the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicEvent {
	pub pallet: String,
	pub variant: String,
	/// Human readable event data, e.g. the dispatch error.
	pub data: String,
}

impl ExtrinsicEvent {
	pub fn new(pallet: &str, variant: &str, data: &str) -> Self {
		Self { pallet: pallet.to_owned(), variant: variant.to_owned(), data: data.to_owned() }
	}

	fn is(&self, pallet: &str, variant: &str) -> bool {
		self.pallet == pallet && self.variant == variant
	}
}

impl core::fmt::Display for ExtrinsicEvent {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}.{}:: {}", self.pallet, self.variant, self.data)
	}
}

/// Report of a watched extrinsic.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrinsicReport<Hash> {
	// Hash of the extrinsic.
	pub extrinsic_hash: Hash,
	// Block hash of the block the extrinsic was included in.
	// Only available if watched until at least `InBlock`.
	pub block_hash: Option<Hash>,
	// Last known Transaction Status.
	pub status: TransactionStatus<Hash, Hash>,
	// Events assosciated to the extrinsic.
	// Only available if explicitly stated, because
	// extra node queries are necessary to fetch the events.
	pub events: Option<Vec<ExtrinsicEvent>>,
}

impl<Hash> ExtrinsicReport<Hash> {
	pub fn new(
		extrinsic_hash: Hash,
		block_hash: Option<Hash>,
		status: TransactionStatus<Hash, Hash>,
		events: Option<Vec<ExtrinsicEvent>>,
	) -> Self {
		Self { extrinsic_hash, block_hash, status, events }
	}
}

/// Turns a claim batch into a signed, encoded extrinsic. Key handling lives outside this crate.
pub trait SignBatch {
	fn sign_batch(&self, batch: &ClaimBatch) -> Result<Vec<u8>>;
}

#[maybe_async::maybe_async(?Send)]
pub trait WatchExtrinsic {
	/// Submit an extrinsic and watch it until the desired status is reached, including the
	/// events it emitted.
	async fn submit_and_watch_extrinsic_until(
		&self,
		encoded_extrinsic: Vec<u8>,
		watch_until: XtStatus,
	) -> Result<ExtrinsicReport<Hash>>;
}

/// [`SubmitBatch`] on top of an external signer and extrinsic watcher.
pub struct WatchedSubmitter<Signer, Watcher> {
	signer: Signer,
	watcher: Watcher,
	watch_until: XtStatus,
}

impl<Signer, Watcher> WatchedSubmitter<Signer, Watcher> {
	/// Watches until the batch is finalized.
	pub fn new(signer: Signer, watcher: Watcher) -> Self {
		Self { signer, watcher, watch_until: XtStatus::Finalized }
	}

	/// Only `InBlock` and `Finalized` are accepted; anything earlier is not a settlement.
	pub fn watch_until(mut self, watch_until: XtStatus) -> Self {
		if watch_until == XtStatus::InBlock {
			self.watch_until = XtStatus::InBlock;
		} else {
			self.watch_until = XtStatus::Finalized;
		}
		self
	}
}

#[maybe_async::maybe_async(?Send)]
impl<Signer, Watcher> SubmitBatch for WatchedSubmitter<Signer, Watcher>
where
	Signer: SignBatch,
	Watcher: WatchExtrinsic,
{
	async fn submit_batch(&self, batch: &ClaimBatch) -> SubmissionOutcome {
		let encoded_extrinsic = match self.signer.sign_batch(batch) {
			Ok(xt) => xt,
			Err(e) => return SubmissionOutcome::Interrupted(format!("Could not sign batch: {e}")),
		};
		debug!("submitting claim batch for eras {:?}", batch.eras());
		match self
			.watcher
			.submit_and_watch_extrinsic_until(encoded_extrinsic, self.watch_until)
			.await
		{
			Ok(report) => outcome_from_report(&report),
			Err(e) => SubmissionOutcome::TransportError(e.to_string()),
		}
	}
}

/// Decide whether the watched batch was applied.
pub fn outcome_from_report(report: &ExtrinsicReport<Hash>) -> SubmissionOutcome {
	if report.status.is_rejected() {
		return SubmissionOutcome::Interrupted(format!(
			"Transaction {:?} was not included: {:?}",
			report.extrinsic_hash, report.status
		))
	}
	if !report.status.is_included() {
		return SubmissionOutcome::TransportError(format!(
			"Watch process stopped at unexpected status {:?}",
			report.status
		))
	}
	if let Some(block_hash) = report.block_hash {
		info!("Transaction included at blockHash {block_hash:?}");
	}
	let Some(events) = &report.events else {
		return SubmissionOutcome::TransportError(
			"Transaction was included, but its events are unknown".to_owned(),
		)
	};
	for event in events {
		debug!("\t{event}");
	}
	if let Some(event) = events.iter().find(|ev| ev.is("Utility", "BatchInterrupted")) {
		return SubmissionOutcome::Interrupted(event.to_string())
	}
	if let Some(event) = events.iter().find(|ev| ev.is("System", "ExtrinsicFailed")) {
		return SubmissionOutcome::ExtrinsicFailed(event.to_string())
	}
	SubmissionOutcome::Settled
}
