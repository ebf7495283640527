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
use jsonrpsee::{
	client_transport::ws::{Url, WsTransportClientBuilder},
	core::{
		client::{Client, ClientBuilder, ClientT},
		params::ArrayParams,
	},
};
use log::*;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Clone)]
pub struct JsonrpseeClient {
	inner: Arc<Client>,
}

impl JsonrpseeClient {
	/// Create a new client with the given url string.
	/// Example url input: "ws://127.0.0.1:9944"
	pub async fn new(url: &str) -> Result<Self> {
		debug!("connecting to {url}");
		let uri: Url = url.parse().map_err(|e| Error::Client(Box::new(e)))?;
		let (tx, rx) = WsTransportClientBuilder::default()
			.build(uri)
			.await
			.map_err(|e| Error::Client(Box::new(e)))?;
		let client = ClientBuilder::default().build_with_tokio(tx, rx);
		Ok(Self { inner: Arc::new(client) })
	}
}

#[maybe_async::async_impl(?Send)]
impl Request for JsonrpseeClient {
	async fn request<R: DeserializeOwned>(&self, method: &str, params: RpcParams) -> Result<R> {
		let mut array_params = ArrayParams::new();
		for param in params {
			array_params.insert(param)?;
		}
		let response: R = self.inner.request(method, array_params).await?;
		Ok(response)
	}
}
