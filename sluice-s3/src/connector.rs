// Copyright 2025 OPPO.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::browser::StorageBrowser;
use crate::client;
use crate::conf::S3Conf;
use crate::store::{ObjectStore, S3ObjectStore};
use log::debug;
use sluice_common::error::ConnectorError;
use sluice_common::state::BrowseResult;
use sluice_common::ConnectorResult;
use std::sync::Arc;

/// S3 connector surface exposed to the host platform: parse is on
/// [`crate::S3Path`], browse and test live here. The client is owned
/// by this instance and dropped with it.
#[derive(Clone)]
pub struct S3Connector {
    store: S3ObjectStore,
    conf: Arc<S3Conf>,
}

impl S3Connector {
    pub async fn new(conf: S3Conf) -> Self {
        let client = client::create_client(&conf).await;
        S3Connector {
            store: S3ObjectStore::new(client),
            conf: Arc::new(conf),
        }
    }

    pub fn conf(&self) -> &S3Conf {
        &self.conf
    }

    /// Enumerate one level of the hierarchy under `path`, capped at
    /// `limit` entities.
    pub async fn browse(&self, path: &str, limit: usize) -> ConnectorResult<BrowseResult> {
        debug!("Browse path={:?}, limit={}", path, limit);
        StorageBrowser::new(&self.store).browse(path, limit).await
    }

    /// Validate that the configured credentials can reach the service.
    /// Missing credentials fail before any network round trip; a
    /// rejected round trip surfaces as a credential error.
    pub async fn test(&self) -> ConnectorResult<()> {
        self.conf.validate()?;

        match self.store.list_buckets().await {
            Ok(_) => Ok(()),
            Err(ConnectorError::Browse { context, .. }) => {
                Err(ConnectorError::credentials_rejected(context))
            }
            Err(e) => Err(e),
        }
    }
}
