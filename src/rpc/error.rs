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

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Serde json error: {0}")]
	Serde(serde_json::error::Error),
	#[error("No response for rpc method {0}")]
	NoResponse(String),
	#[error(transparent)]
	Client(#[from] Box<dyn core::error::Error + Send + Sync + 'static>),
}

impl From<serde_json::error::Error> for Error {
	fn from(error: serde_json::error::Error) -> Self {
		Self::Serde(error)
	}
}

#[cfg(all(feature = "jsonrpsee-client", not(feature = "sync-api")))]
impl From<jsonrpsee::core::client::Error> for Error {
	fn from(error: jsonrpsee::core::client::Error) -> Self {
		Self::Client(Box::new(error))
	}
}
