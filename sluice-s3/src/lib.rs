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

pub mod browser;
pub mod client;
pub mod conf;
pub mod connector;
pub mod format;

mod path;
pub use self::path::S3Path;

pub mod store;

/// The canonical scheme every accepted path is normalized to.
pub const SCHEME: &str = "s3n://";

/// Object keys have no real directory structure; this delimiter is
/// what groups them into common prefixes.
pub const DELIMITER: &str = "/";

pub const ROOT_DIR: &str = "/";
