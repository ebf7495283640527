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

use crate::{primitives::EraIndex, rpc::Error as RpcClientError};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Rpc Client Error.
	#[error("Rpc client error: {0}")]
	RpcClient(#[from] RpcClientError),
	/// Encode / Decode Error.
	#[error("Codec error: {0}")]
	Codec(#[from] codec::Error),
	/// A storage value returned by the node was not valid hex.
	#[error("Invalid hex in storage value: {0}")]
	Hex(#[from] hex::FromHexError),
	#[error("Io error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serde json error: {0}")]
	Serde(#[from] serde_json::Error),
	/// `Staking.ActiveEra` is not set on the node.
	#[error("No active era found on chain")]
	ActiveEraNotFound,
	/// The configured validator stash is not a valid SS58 address.
	#[error("Invalid validator address: {0}")]
	InvalidValidator(String),
	/// Reading the reward points of a single era failed. The whole scan is aborted.
	#[error("Could not fetch reward points of era {era}: {source}")]
	ScanFetch {
		era: EraIndex,
		#[source]
		source: Box<Error>,
	},
	/// A claim batch needs at least one era.
	#[error("Refusing to build a claim batch without eras")]
	EmptyBatch,
	/// The persisted progress record violates its ordering invariant.
	#[error("Inconsistent progress record: {0}")]
	InconsistentProgress(String),
	/// The node explicitly refused or aborted the claim batch.
	#[error("Claim batch rejected: {0}")]
	SubmissionRejected(String),
	/// It is unknown whether the claim batch was applied.
	#[error("Claim batch outcome unknown: {0}")]
	Transport(String),
	/// The claim batch settled on chain, but the progress record could not be written.
	/// Local progress now lags behind the chain and needs manual reconciliation.
	#[error("Eras {eras:?} were claimed on chain but progress could not be saved: {source}")]
	Persistence {
		eras: Vec<EraIndex>,
		#[source]
		source: Box<Error>,
	},
}
