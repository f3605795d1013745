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

use crate::conf::{AuthMethod, S3Conf};
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_types::SdkConfig;
use log::debug;

/// Build an owned S3 client for the given configuration. The client is
/// constructed explicitly per connector instance; nothing is cached
/// globally.
pub async fn create_client(conf: &S3Conf) -> Client {
    let sdk_conf = match conf.auth_method {
        AuthMethod::AccessCredentials => static_sdk_config(conf),
        // Key material comes from the runtime credential chain
        // (instance profile, environment, shared config).
        AuthMethod::IamRole => ambient_sdk_config(conf).await,
    };

    let retry_conf = RetryConfig::standard().with_max_attempts(conf.retry_times);
    let timeout_conf = TimeoutConfig::builder()
        .connect_timeout(conf.conn_timeout)
        .read_timeout(conf.read_timeout)
        .build();

    let s3_conf = aws_sdk_s3::config::Builder::from(&sdk_conf)
        .retry_config(retry_conf)
        .timeout_config(timeout_conf)
        .force_path_style(conf.force_path_style)
        .build();

    debug!(
        "Created S3 client, region={:?}, endpoint={:?}, path_style={}",
        conf.region, conf.endpoint, conf.force_path_style
    );

    Client::from_conf(s3_conf)
}

fn static_sdk_config(conf: &S3Conf) -> SdkConfig {
    let mut builder = SdkConfig::builder().behavior_version(BehaviorVersion::latest());

    if let Some(region) = &conf.region {
        builder = builder.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &conf.endpoint {
        builder = builder.endpoint_url(endpoint);
    }
    if let (Some(access), Some(secret)) = (&conf.access_key, &conf.secret_key) {
        let credentials =
            Credentials::new(access, secret, conf.session_token.clone(), None, "Static");
        builder = builder.credentials_provider(SharedCredentialsProvider::new(credentials));
    }

    builder.build()
}

async fn ambient_sdk_config(conf: &S3Conf) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if let Some(region) = &conf.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(endpoint) = &conf.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
