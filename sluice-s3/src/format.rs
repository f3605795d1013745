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

//! File format detection by extension. Drives the `can_sample` flag on
//! file entities: only formats the sampler understands are offered for
//! sampling.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const OCTET_STREAM: &str = "application/octet-stream";

// Formats the pipeline engine can parse natively. Extensions outside
// this map fall back to a generic mime lookup.
static FILE_TYPES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("avro", "application/avro"),
        ("parquet", "application/parquet"),
        ("orc", "application/orc"),
        ("csv", "text/csv"),
        ("tsv", "text/tab-separated-values"),
        ("txt", "text/plain"),
        ("log", "text/plain"),
        ("json", "application/json"),
        ("xml", "application/xml"),
    ])
});

/// Detect the content type of an object from its key. Pure lookup, no
/// I/O; unknown extensions resolve to `application/octet-stream`.
pub fn detect_file_type(name: &str) -> &'static str {
    if let Some((_, ext)) = name.rsplit_once('.') {
        if let Some(v) = FILE_TYPES.get(ext.to_ascii_lowercase().as_str()) {
            return v;
        }
    }
    mime_guess::from_path(name).first_raw().unwrap_or(OCTET_STREAM)
}

/// Whether the sampler can produce rows from a file of this type.
pub fn is_sampleable(file_type: &str) -> bool {
    file_type.starts_with("text/")
        || matches!(
            file_type,
            "application/avro" | "application/parquet" | "application/orc" | "application/json"
        )
}

#[cfg(test)]
mod tests {
    use crate::format;

    #[test]
    fn detect_known_extensions() {
        assert_eq!(format::detect_file_type("a/b/example.csv"), "text/csv");
        assert_eq!(format::detect_file_type("example.TXT"), "text/plain");
        assert_eq!(format::detect_file_type("dir/part-0000.parquet"), "application/parquet");
        assert_eq!(format::detect_file_type("events.avro"), "application/avro");
    }

    #[test]
    fn detect_falls_back() {
        // html is not in the native map but mime_guess knows it
        assert_eq!(format::detect_file_type("index.html"), "text/html");
        // no extension at all
        assert_eq!(format::detect_file_type("README"), format::OCTET_STREAM);
        // a folder marker key has no extension either
        assert_eq!(format::detect_file_type("test0/"), format::OCTET_STREAM);
    }

    #[test]
    fn sampleable_formats() {
        assert!(format::is_sampleable("text/plain"));
        assert!(format::is_sampleable("text/csv"));
        assert!(format::is_sampleable("application/json"));
        assert!(format::is_sampleable("application/parquet"));
        assert!(!format::is_sampleable(format::OCTET_STREAM));
        assert!(!format::is_sampleable("image/png"));
    }
}
