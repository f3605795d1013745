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

//! The listing seam between the browse engine and the storage service.
//! Keeps the engine independent of the concrete transport so it can be
//! driven against an in-memory store in tests.

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use aws_sdk_s3::Client;
use aws_smithy_types::error::display::DisplayErrorContext;
use sluice_common::error::ConnectorError;
use sluice_common::ConnectorResult;
use std::future::Future;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size: i64,
    pub last_modified_millis: i64,
}

/// One delimiter-grouped listing request. `token` carries the
/// continuation marker from the previous page, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsSpec {
    pub bucket: String,
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    pub token: Option<String>,
}

/// One page of listing output. Common prefixes stand in for
/// directories; `is_truncated` with a `next_token` means more pages
/// exist.
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    pub common_prefixes: Vec<String>,
    pub objects: Vec<ObjectSummary>,
    pub next_token: Option<String>,
    pub is_truncated: bool,
}

pub trait ObjectStore {
    fn list_buckets(&self) -> impl Future<Output = ConnectorResult<Vec<BucketInfo>>>;

    fn list_objects(
        &self,
        spec: ListObjectsSpec,
    ) -> impl Future<Output = ConnectorResult<ObjectPage>>;
}

/// `ObjectStore` over the AWS SDK client.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        S3ObjectStore { client }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn list_buckets(&self) -> ConnectorResult<Vec<BucketInfo>> {
        let resp = self.client.list_buckets().send().await.map_err(|e| {
            let context = format!("Failed to list buckets: {}", DisplayErrorContext(&e));
            ConnectorError::browse(context, e)
        })?;

        let buckets = resp
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(|name| BucketInfo { name: name.to_string() }))
            .collect();
        Ok(buckets)
    }

    async fn list_objects(&self, spec: ListObjectsSpec) -> ConnectorResult<ObjectPage> {
        let mut req = self.client.list_objects_v2().bucket(&spec.bucket);
        if let Some(prefix) = &spec.prefix {
            req = req.prefix(prefix);
        }
        if let Some(delimiter) = &spec.delimiter {
            req = req.delimiter(delimiter);
        }
        if let Some(token) = &spec.token {
            req = req.continuation_token(token);
        }

        let resp = match req.send().await {
            Ok(v) => v,
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), ListObjectsV2Error::NoSuchBucket(_)) =>
            {
                return Err(ConnectorError::bucket_not_found(&spec.bucket));
            }
            Err(e) => {
                let context = format!(
                    "Failed to list objects under '{}': {}",
                    spec.bucket,
                    DisplayErrorContext(&e)
                );
                return Err(ConnectorError::browse(context, e));
            }
        };

        let common_prefixes = resp
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(str::to_string))
            .collect();

        let objects = resp
            .contents()
            .iter()
            .map(|obj| ObjectSummary {
                key: obj.key().unwrap_or("").to_string(),
                size: obj.size().unwrap_or(0),
                last_modified_millis: obj
                    .last_modified()
                    .map(|x| x.to_millis().unwrap_or(0))
                    .unwrap_or(0),
            })
            .collect();

        Ok(ObjectPage {
            common_prefixes,
            objects,
            next_token: resp.next_continuation_token().map(str::to_string),
            is_truncated: resp.is_truncated().unwrap_or(false),
        })
    }
}
