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

use thiserror::Error;

// Uniformly defined connector error taxonomy. Parse failures never
// reach the network; browse failures keep the transport error as the
// source so callers can render the full chain.
#[derive(Debug, Error)]
pub enum ConnectorError {
    // The supplied location string is malformed.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    // The bucket named in the path does not exist on the service.
    #[error("Bucket '{bucket}' does not exist")]
    BucketNotFound { bucket: String },

    // A listing request failed; the underlying transport error is
    // preserved unchanged.
    #[error("{context}")]
    Browse {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // Required credentials were not configured. Detected before any
    // network round trip.
    #[error("Credentials are missing: {reason}")]
    CredentialsAbsent { reason: String },

    // The service rejected the configured credentials.
    #[error("Credentials were rejected: {reason}")]
    CredentialsRejected { reason: String },

    #[error("{0}")]
    Unsupported(String),
}

impl ConnectorError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConnectorError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn bucket_not_found(bucket: impl Into<String>) -> Self {
        ConnectorError::BucketNotFound {
            bucket: bucket.into(),
        }
    }

    pub fn browse(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConnectorError::Browse {
            context: context.into(),
            source: Box::new(source),
        }
    }

    pub fn credentials_absent(reason: impl Into<String>) -> Self {
        ConnectorError::CredentialsAbsent {
            reason: reason.into(),
        }
    }

    pub fn credentials_rejected(reason: impl Into<String>) -> Self {
        ConnectorError::CredentialsRejected {
            reason: reason.into(),
        }
    }

    // Whether the error means "nothing exists at this location" rather
    // than a transport or auth failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConnectorError::BucketNotFound { .. })
    }
}
