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

//! Incremental enumeration of a bucket/object hierarchy. The service
//! has no real directories, so one level of hierarchy is faked with a
//! delimiter-grouped listing: common prefixes come back as directory
//! entries and object summaries as files.

use crate::format;
use crate::store::{ListObjectsSpec, ObjectStore, ObjectSummary};
use crate::{S3Path, DELIMITER, ROOT_DIR};
use log::debug;
use sluice_common::state::{
    BrowseEntity, BrowseResult, FILE_TYPE_KEY, LAST_MODIFIED_KEY, SIZE_KEY,
};
use sluice_common::ConnectorResult;
use std::collections::BTreeMap;

/// Stateless browse engine over an [`ObjectStore`]. Each call is an
/// independent, sequential chain of listing requests; page N+1 cannot
/// be issued before page N returns its continuation marker.
pub struct StorageBrowser<'a, S> {
    store: &'a S,
}

impl<'a, S: ObjectStore> StorageBrowser<'a, S> {
    pub fn new(store: &'a S) -> Self {
        StorageBrowser { store }
    }

    /// Enumerate one level under `path`, at most `limit` entities.
    /// The root path lists buckets; anything else is parsed and
    /// validated before the first network call.
    pub async fn browse(&self, path: &str, limit: usize) -> ConnectorResult<BrowseResult> {
        if is_root(path) {
            return self.browse_buckets(limit).await;
        }

        let path = S3Path::parse(path)?;
        self.browse_objects(&path, limit).await
    }

    async fn browse_buckets(&self, limit: usize) -> ConnectorResult<BrowseResult> {
        let buckets = self.store.list_buckets().await?;
        let entities = buckets
            .into_iter()
            .take(limit)
            .map(|b| BrowseEntity::bucket(b.name))
            .collect();
        Ok(BrowseResult::new(entities))
    }

    async fn browse_objects(&self, path: &S3Path, limit: usize) -> ConnectorResult<BrowseResult> {
        if limit == 0 {
            return Ok(BrowseResult::empty());
        }

        let mut entities: Vec<BrowseEntity> = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let spec = ListObjectsSpec {
                bucket: path.bucket().to_string(),
                prefix: dir_prefix(path.key()),
                delimiter: Some(DELIMITER.to_string()),
                token: token.take(),
            };
            let page = self.store.list_objects(spec).await?;

            for prefix in &page.common_prefixes {
                // a bare delimiter is the implicit root, not a real entry
                if prefix == DELIMITER {
                    continue;
                }
                if entities.len() >= limit {
                    break;
                }
                entities.push(directory_entity(path.bucket(), prefix));
            }

            for obj in &page.objects {
                if entities.len() >= limit {
                    break;
                }
                entities.push(file_entity(path.bucket(), obj));
            }

            token = page.next_token;
            if entities.len() >= limit || !page.is_truncated || token.is_none() {
                break;
            }
        }

        // An exhausted listing with nothing in it can still mean the
        // key addresses one object directly, so retry flat: same key,
        // no forced trailing delimiter, no grouping. An empty answer
        // here is a valid "nothing found", not an error.
        if entities.is_empty() {
            debug!(
                "Empty listing for {}, retrying as a single object",
                path.full_path()
            );
            return self.browse_single_object(path).await;
        }

        Ok(BrowseResult::new(entities))
    }

    async fn browse_single_object(&self, path: &S3Path) -> ConnectorResult<BrowseResult> {
        let key = path.key();
        let spec = ListObjectsSpec {
            bucket: path.bucket().to_string(),
            prefix: (!key.is_empty()).then(|| key.to_string()),
            delimiter: None,
            token: None,
        };

        let page = self.store.list_objects(spec).await?;
        match page.objects.first() {
            Some(obj) => Ok(BrowseResult::new(vec![file_entity(path.bucket(), obj)])),
            None => Ok(BrowseResult::empty()),
        }
    }
}

fn is_root(path: &str) -> bool {
    path.is_empty() || path == ROOT_DIR
}

// Listing one level below a key requires the prefix to end with the
// delimiter, otherwise the key itself would match as its own prefix.
fn dir_prefix(key: &str) -> Option<String> {
    if key.is_empty() {
        None
    } else if key.ends_with(DELIMITER) {
        Some(key.to_string())
    } else {
        Some(format!("{}{}", key, DELIMITER))
    }
}

fn basename(key: &str) -> &str {
    key.trim_end_matches(DELIMITER)
        .rsplit(DELIMITER)
        .next()
        .unwrap_or("")
}

fn directory_entity(bucket: &str, prefix: &str) -> BrowseEntity {
    BrowseEntity::directory(basename(prefix), format!("{}/{}", bucket, prefix))
}

fn file_entity(bucket: &str, obj: &ObjectSummary) -> BrowseEntity {
    // a key ending in the delimiter is a pure folder marker; it keeps
    // the file type but renders without a display name
    let name = if obj.key.ends_with(DELIMITER) {
        ""
    } else {
        basename(&obj.key)
    };

    let file_type = format::detect_file_type(&obj.key);
    let mut properties = BTreeMap::new();
    properties.insert(SIZE_KEY.to_string(), obj.size.to_string());
    properties.insert(
        LAST_MODIFIED_KEY.to_string(),
        obj.last_modified_millis.to_string(),
    );
    properties.insert(FILE_TYPE_KEY.to_string(), file_type.to_string());

    BrowseEntity::file(
        name,
        format!("{}/{}", bucket, obj.key),
        format::is_sampleable(file_type),
        properties,
    )
}

#[cfg(test)]
mod tests {
    use crate::browser::{basename, dir_prefix, is_root};

    #[test]
    fn root_detection() {
        assert!(is_root(""));
        assert!(is_root("/"));
        assert!(!is_root("/my-bucket"));
    }

    #[test]
    fn prefix_for_listing() {
        assert_eq!(dir_prefix(""), None);
        assert_eq!(dir_prefix("a/b"), Some("a/b/".to_string()));
        assert_eq!(dir_prefix("a/b/"), Some("a/b/".to_string()));
    }

    #[test]
    fn basename_of_prefix() {
        assert_eq!(basename("test0/"), "test0");
        assert_eq!(basename("a/b/c"), "c");
        assert_eq!(basename("file0.txt"), "file0.txt");
    }
}
