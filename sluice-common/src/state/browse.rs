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

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Display metadata keys attached to file entities.
pub const SIZE_KEY: &str = "Size";
pub const LAST_MODIFIED_KEY: &str = "Last Modified";
pub const FILE_TYPE_KEY: &str = "File Type";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseEntityKind {
    Bucket,
    Directory,
    File,
}

impl BrowseEntityKind {
    // Buckets and directories can be entered; files are leaves.
    pub fn can_browse(&self) -> bool {
        !matches!(self, BrowseEntityKind::File)
    }
}

/// One row in a browse listing. `path` is a `bucket/key` address that
/// can be fed back into path parsing to descend the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseEntity {
    pub name: String,
    pub path: String,
    pub kind: BrowseEntityKind,
    pub can_sample: bool,
    // Populated only for file entities.
    pub properties: BTreeMap<String, String>,
}

impl BrowseEntity {
    pub fn bucket(name: impl Into<String>) -> Self {
        let name = name.into();
        BrowseEntity {
            path: name.clone(),
            name,
            kind: BrowseEntityKind::Bucket,
            can_sample: true,
            properties: BTreeMap::new(),
        }
    }

    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        BrowseEntity {
            name: name.into(),
            path: path.into(),
            kind: BrowseEntityKind::Directory,
            can_sample: true,
            properties: BTreeMap::new(),
        }
    }

    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        can_sample: bool,
        properties: BTreeMap<String, String>,
    ) -> Self {
        BrowseEntity {
            name: name.into(),
            path: path.into(),
            kind: BrowseEntityKind::File,
            can_sample,
            properties,
        }
    }

    pub fn can_browse(&self) -> bool {
        self.kind.can_browse()
    }
}

/// The materialized output of one browse call. `total_count` reports
/// how many entities were actually enumerated and is always bounded by
/// the caller's limit. Entities keep listing order; they are never
/// re-sorted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseResult {
    pub total_count: usize,
    pub entities: Vec<BrowseEntity>,
}

impl BrowseResult {
    pub fn new(entities: Vec<BrowseEntity>) -> Self {
        BrowseResult {
            total_count: entities.len(),
            entities,
        }
    }

    pub fn empty() -> Self {
        BrowseResult::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
