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

use crate::{DELIMITER, ROOT_DIR, SCHEME};
use once_cell::sync::Lazy;
use regex::Regex;
use sluice_common::error::ConnectorError;
use sluice_common::ConnectorResult;
use std::fmt::{Display, Formatter};

static BUCKET_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9.-]+$").unwrap());

const MIN_BUCKET_LEN: usize = 3;
const MAX_BUCKET_LEN: usize = 63;

/// A location on S3. Contains the bucket and the object key, an empty
/// key means the path addresses the bucket itself. The canonical form
/// is `s3n://bucket/key`; `bucket/key` and `/bucket/key` parse to the
/// same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct S3Path {
    full_path: String,
    bucket: String,
    key: String,
}

impl S3Path {
    /// Parse a user-supplied location string. No network access; the
    /// bucket segment is validated against the S3 naming rules before
    /// any listing call can happen.
    pub fn parse<T: AsRef<str>>(s: T) -> ConnectorResult<Self> {
        let raw = s.as_ref();
        if raw.is_empty() {
            return Err(ConnectorError::invalid_path(
                raw,
                format!("path cannot be empty, expected {}<bucket>/<key>", SCHEME),
            ));
        }

        // One leading root delimiter or the recognized scheme is
        // stripped; anything else is treated as the bare bucket/key
        // form and falls through to bucket validation.
        let rest = if let Some(v) = raw.strip_prefix(ROOT_DIR) {
            v
        } else if let Some(v) = raw.strip_prefix(SCHEME) {
            v
        } else {
            raw
        };

        let (bucket, key) = match rest.find(DELIMITER) {
            Some(idx) if idx > 0 => (&rest[..idx], &rest[idx + 1..]),
            _ => (rest, ""),
        };

        if bucket.len() < MIN_BUCKET_LEN || bucket.len() > MAX_BUCKET_LEN {
            return Err(ConnectorError::invalid_path(
                raw,
                format!(
                    "bucket name length must be between {} and {} characters",
                    MIN_BUCKET_LEN, MAX_BUCKET_LEN
                ),
            ));
        }

        if !BUCKET_NAME.is_match(bucket) {
            return Err(ConnectorError::invalid_path(
                raw,
                "bucket name may only contain lowercase alphanumeric characters, '-' and '.'",
            ));
        }

        Ok(S3Path {
            full_path: format!("{}{}/{}", SCHEME, bucket, key),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object key. Empty when the path denotes the bucket itself.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_bucket(&self) -> bool {
        self.key.is_empty()
    }
}

impl Display for S3Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_path)
    }
}

#[cfg(test)]
mod tests {
    use crate::S3Path;
    use sluice_common::error::ConnectorError;

    fn assert_invalid(s: &str) {
        match S3Path::parse(s) {
            Err(ConnectorError::InvalidPath { .. }) => (),
            other => panic!("expected InvalidPath for {:?}, got {:?}", s, other),
        }
    }

    #[test]
    fn parse_equivalent_spellings() {
        for s in ["s3n://my-bucket/part1", "my-bucket/part1", "/my-bucket/part1"] {
            let path = S3Path::parse(s).unwrap();
            assert_eq!(path.full_path(), "s3n://my-bucket/part1");
            assert_eq!(path.bucket(), "my-bucket");
            assert_eq!(path.key(), "part1");
        }

        for s in ["s3n://my-bucket/part1/part2", "my-bucket/part1/part2"] {
            let path = S3Path::parse(s).unwrap();
            assert_eq!(path.full_path(), "s3n://my-bucket/part1/part2");
            assert_eq!(path.key(), "part1/part2");
        }

        // keys may contain characters buckets may not
        let path = S3Path::parse("s3n://my-bucket/hello world 1/hello world 2").unwrap();
        assert_eq!(path.full_path(), "s3n://my-bucket/hello world 1/hello world 2");
    }

    #[test]
    fn parse_is_idempotent() {
        for s in ["s3n://ba0/n0", "ba0/n0", "/ba0", "my-bucket/a/b/c.txt", "ba0/"] {
            let first = S3Path::parse(s).unwrap();
            let second = S3Path::parse(first.full_path()).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.full_path(), second.full_path());
        }
    }

    #[test]
    fn bucket_paths_have_empty_key() {
        for s in ["s3n://ba0/", "s3n://ba0", "/ba0", "/ba0/", "ba0"] {
            let path = S3Path::parse(s).unwrap();
            assert_eq!(path.bucket(), "ba0");
            assert!(path.is_bucket());
            assert_eq!(path.full_path(), "s3n://ba0/");
        }

        let path = S3Path::parse("s3n://ba0/n0").unwrap();
        assert!(!path.is_bucket());
    }

    #[test]
    fn bucket_length_bounds() {
        let min = "a".repeat(3);
        let max = "a".repeat(63);
        assert_eq!(S3Path::parse(&min).unwrap().bucket(), min);
        assert_eq!(S3Path::parse(&max).unwrap().bucket(), max);

        assert_invalid("s3n://sh");
        assert_invalid(&"a".repeat(2));
        assert_invalid(&"a".repeat(64));
        assert_invalid(&format!("s3n://{}", "a".repeat(100)));
    }

    #[test]
    fn bucket_character_class() {
        assert!(S3Path::parse("s3n://my.bucket-0/x").is_ok());

        assert_invalid("s3n://My_Bucket/");
        assert_invalid("s3n://test space in bucket name/");
        assert_invalid("s3n://UPPER/");
    }

    #[test]
    fn malformed_schemes_rejected() {
        assert_invalid("");
        // one slash short of a scheme, parses as a bucket named "s3n:"
        assert_invalid("s3n:/abc/");
        // empty bucket segment after the scheme
        assert_invalid("s3n:///abc/");
        assert_invalid("file://abc/");
    }
}
