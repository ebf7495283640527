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

use crate::rpc::{Error, Request, Result, RpcParams};
use serde::{de::DeserializeOwned, Serialize};
use std::{collections::HashMap, sync::RwLock};

type RequestKey = String;
type SerializedValue = String;

/// Answers requests from a fixed table, keyed by method name and parameters.
#[derive(Debug, Default)]
pub struct RpcClientMock {
	pub state: RwLock<HashMap<RequestKey, SerializedValue>>,
}

impl RpcClientMock {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn update_entry<V: Serialize>(&self, method: &str, params: RpcParams, value: V) {
		let mut lock = self.state.write().unwrap();
		lock.insert(request_key(method, &params), serde_json::to_string(&value).unwrap());
	}
}

fn request_key(method: &str, params: &RpcParams) -> RequestKey {
	format!("{method}{}", serde_json::Value::Array(params.clone()))
}

#[maybe_async::maybe_async(?Send)]
impl Request for RpcClientMock {
	async fn request<R: DeserializeOwned>(&self, method: &str, params: RpcParams) -> Result<R> {
		let lock = self.state.read().unwrap();
		let response = lock
			.get(&request_key(method, &params))
			.ok_or_else(|| Error::NoResponse(method.to_owned()))?;
		let deserialized_value: R = serde_json::from_str(response)?;
		Ok(deserialized_value)
	}
}
