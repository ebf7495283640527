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

#[cfg(all(feature = "jsonrpsee-client", not(feature = "sync-api")))]
pub use jsonrpsee_client::JsonrpseeClient;
#[cfg(all(feature = "jsonrpsee-client", not(feature = "sync-api")))]
pub mod jsonrpsee_client;

pub use error::{Error, Result};

pub mod error;
#[cfg(test)]
pub mod mocks;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Positional json-rpc parameters.
pub type RpcParams = Vec<Value>;

/// Builds [`RpcParams`] from a list of serializable expressions.
#[macro_export]
macro_rules! rpc_params {
	($($param:expr),* $(,)?) => {
		vec![$(serde_json::json!($param)),*]
	};
}

/// Trait to be implemented by the client for sending rpc requests to the substrate node.
#[maybe_async::maybe_async(?Send)]
pub trait Request {
	/// Sends a RPC request to the substrate node and returns the deserialized answer.
	async fn request<R: DeserializeOwned>(&self, method: &str, params: RpcParams) -> Result<R>;
}
