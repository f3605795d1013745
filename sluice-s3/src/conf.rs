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

use sluice_common::error::ConnectorError;
use sluice_common::ConnectorResult;
use std::collections::HashMap;
use std::time::Duration;

/// How the connector authenticates against the service. With
/// `IamRole` the credential chain of the runtime environment is used
/// and no key material is required in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    #[default]
    AccessCredentials,
    IamRole,
}

impl AuthMethod {
    fn parse(s: &str) -> ConnectorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "access_credentials" | "access credentials" => Ok(AuthMethod::AccessCredentials),
            "iam" | "iam_role" => Ok(AuthMethod::IamRole),
            other => Err(ConnectorError::Unsupported(format!(
                "Unknown authentication method: {}",
                other
            ))),
        }
    }
}

struct ConfMap(HashMap<String, String>);

impl ConfMap {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).filter(|v| !v.is_empty()).cloned()
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(v) => v.trim().eq_ignore_ascii_case("true"),
            None => default,
        }
    }

    fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.get(key)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(default)
    }
}

/// Connector configuration. Built once from a flat string map supplied
/// by the host platform, then owned by the connector; there is no
/// global client or config state.
#[derive(Debug, Clone)]
pub struct S3Conf {
    pub auth_method: AuthMethod,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,

    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub force_path_style: bool,

    pub retry_times: u32,
    pub conn_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for S3Conf {
    fn default() -> Self {
        S3Conf {
            auth_method: AuthMethod::default(),
            access_key: None,
            secret_key: None,
            session_token: None,
            region: None,
            endpoint: None,
            force_path_style: false,
            retry_times: 3,
            conn_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(5),
        }
    }
}

impl S3Conf {
    pub const AUTH_METHOD: &'static str = "s3.auth.method";
    pub const ACCESS_KEY: &'static str = "s3.credentials.access";
    pub const SECRET_KEY: &'static str = "s3.credentials.secret";
    pub const SESSION_TOKEN: &'static str = "s3.credentials.token";
    pub const REGION: &'static str = "s3.region_name";
    pub const ENDPOINT: &'static str = "s3.endpoint_url";
    pub const FORCE_PATH_STYLE: &'static str = "s3.force.path.style";
    pub const RETRY_TIMES: &'static str = "s3.retry_times";
    pub const CONN_TIMEOUT: &'static str = "s3.conn_timeout";
    pub const READ_TIMEOUT: &'static str = "s3.read_timeout";

    pub fn with_map(properties: HashMap<String, String>) -> ConnectorResult<Self> {
        let map = ConfMap(properties);
        let defaults = S3Conf::default();

        let auth_method = match map.get(Self::AUTH_METHOD) {
            Some(v) => AuthMethod::parse(&v)?,
            None => AuthMethod::default(),
        };

        let endpoint = map.get(Self::ENDPOINT);
        if let Some(url) = &endpoint {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConnectorError::Unsupported(format!(
                    "{} must start with http:// or https://",
                    Self::ENDPOINT
                )));
            }
        }

        Ok(S3Conf {
            auth_method,
            access_key: map.get(Self::ACCESS_KEY),
            secret_key: map.get(Self::SECRET_KEY),
            session_token: map.get(Self::SESSION_TOKEN),
            region: map.get(Self::REGION),
            endpoint,
            force_path_style: map.get_bool(Self::FORCE_PATH_STYLE, defaults.force_path_style),
            retry_times: map.get_u64(Self::RETRY_TIMES, defaults.retry_times as u64) as u32,
            conn_timeout: Duration::from_secs(
                map.get_u64(Self::CONN_TIMEOUT, defaults.conn_timeout.as_secs()),
            ),
            read_timeout: Duration::from_secs(
                map.get_u64(Self::READ_TIMEOUT, defaults.read_timeout.as_secs()),
            ),
        })
    }

    /// Credential sanity check, performed without any network call.
    /// IAM mode needs no key material here; access-credentials mode
    /// requires both halves of the key pair.
    pub fn validate(&self) -> ConnectorResult<()> {
        if self.auth_method != AuthMethod::AccessCredentials {
            return Ok(());
        }

        match (&self.access_key, &self.secret_key) {
            (Some(_), Some(_)) => Ok(()),
            (None, None) => Err(ConnectorError::credentials_absent(format!(
                "{} and {} must be set when the authentication method is access credentials",
                Self::ACCESS_KEY,
                Self::SECRET_KEY
            ))),
            (Some(_), None) => Err(ConnectorError::credentials_absent(format!(
                "{} is set but {} is missing",
                Self::ACCESS_KEY,
                Self::SECRET_KEY
            ))),
            (None, Some(_)) => Err(ConnectorError::credentials_absent(format!(
                "{} is set but {} is missing",
                Self::SECRET_KEY,
                Self::ACCESS_KEY
            ))),
        }
    }
}
