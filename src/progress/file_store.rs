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

use super::{ProgressState, ProgressStore};
use crate::error::Result;
use log::*;
use std::{
	fs, io,
	path::{Path, PathBuf},
};

/// Progress kept as a pretty printed json file. An optional mirror path receives an
/// identical copy on every save, e.g. a copy shipped next to a deployed build.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
	mirror: Option<PathBuf>,
}

impl JsonFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into(), mirror: None }
	}

	pub fn with_mirror(mut self, mirror: impl Into<PathBuf>) -> Self {
		self.mirror = Some(mirror.into());
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn mirror(&self) -> Option<&Path> {
		self.mirror.as_deref()
	}
}

impl ProgressStore for JsonFileStore {
	fn load(&self) -> Result<ProgressState> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				info!("No progress record at {}, starting from scratch", self.path.display());
				return Ok(ProgressState::new())
			},
			Err(e) => return Err(e.into()),
		};
		let state: ProgressState = serde_json::from_slice(&bytes)?;
		let state = state.normalize_legacy();
		state.validate()?;
		debug!("Loaded progress {:?} from {}", state, self.path.display());
		Ok(state)
	}

	fn save(&self, state: &ProgressState) -> Result<()> {
		state.validate()?;
		let json = serde_json::to_string_pretty(state)?;
		match &self.mirror {
			Some(mirror) => write_both(&self.path, mirror, json.as_bytes())?,
			None => {
				let tmp = write_tmp(&self.path, json.as_bytes())?;
				fs::rename(&tmp, &self.path)?;
			},
		}
		info!("Saved progress, latest claimed era {:?}", state.latest_claimed_era());
		Ok(())
	}
}

/// Both copies are written to temp files first and only moved into place once both writes
/// succeeded. If the mirror can not be moved into place, the previous primary is restored.
fn write_both(primary: &Path, mirror: &Path, bytes: &[u8]) -> io::Result<()> {
	let primary_tmp = write_tmp(primary, bytes)?;
	let mirror_tmp = match write_tmp(mirror, bytes) {
		Ok(tmp) => tmp,
		Err(e) => {
			discard(&primary_tmp);
			return Err(e)
		},
	};
	let previous = match fs::read(primary) {
		Ok(previous) => Some(previous),
		Err(e) if e.kind() == io::ErrorKind::NotFound => None,
		Err(e) => {
			discard(&primary_tmp);
			discard(&mirror_tmp);
			return Err(e)
		},
	};
	if let Err(e) = fs::rename(&primary_tmp, primary) {
		discard(&primary_tmp);
		discard(&mirror_tmp);
		return Err(e)
	}
	if let Err(e) = fs::rename(&mirror_tmp, mirror) {
		discard(&mirror_tmp);
		let restored = match previous {
			Some(previous) =>
				write_tmp(primary, &previous).and_then(|tmp| fs::rename(&tmp, primary)),
			None => fs::remove_file(primary),
		};
		if let Err(restore_error) = restored {
			error!(
				"Could not restore {} after a failed mirror write: {restore_error}",
				primary.display()
			);
		}
		return Err(e)
	}
	Ok(())
}

fn write_tmp(path: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}
	let tmp = path.with_extension("tmp");
	fs::write(&tmp, bytes)?;
	Ok(tmp)
}

fn discard(tmp: &Path) {
	if let Err(e) = fs::remove_file(tmp) {
		warn!("Could not remove {}: {e}", tmp.display());
	}
}
