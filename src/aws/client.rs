//! Tagging API client
//!
//! [`TaggingApi`] is the seam the collector talks to: one call, one page.
//! [`TaggingClient`] implements it on top of the Resource Groups Tagging
//! API, keeping one SDK client per region.

use super::error::{classify_sdk_error, AwsError};
use async_trait::async_trait;
use aws_config::{timeout::TimeoutConfig, BehaviorVersion, Region};
use aws_sdk_resourcegroupstagging::{config::Builder as TaggingConfigBuilder, Client};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Page size requested from `GetResources`
pub const RESOURCES_PER_PAGE: i32 = 50;

/// Per-request timeout applied to every SDK client
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Input for a single `GetResources` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub resources_per_page: i32,
    pub pagination_token: Option<String>,
}

impl PageRequest {
    /// Request for the first page of a region
    pub fn first() -> Self {
        Self {
            resources_per_page: RESOURCES_PER_PAGE,
            pagination_token: None,
        }
    }

    /// Request for the page following `token`
    pub fn after(token: impl Into<String>) -> Self {
        Self {
            resources_per_page: RESOURCES_PER_PAGE,
            pagination_token: Some(token.into()),
        }
    }
}

/// One page of tagged resources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Full ARNs, in the order the API returned them
    pub resource_arns: Vec<String>,
    /// Empty when there are no more pages
    pub pagination_token: String,
}

impl Page {
    pub fn is_last(&self) -> bool {
        self.pagination_token.is_empty()
    }
}

/// Paginated access to tagged resources in a region
#[async_trait]
pub trait TaggingApi: Send + Sync {
    /// Fetch one page of tagged resources from `region`
    async fn get_resources(&self, region: &str, request: &PageRequest) -> Result<Page, AwsError>;
}

/// Session options applied when loading AWS configuration
#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    /// Named profile from the shared config/credentials files
    pub profile: Option<String>,
    /// Endpoint override, e.g. a LocalStack URL
    pub endpoint_url: Option<String>,
}

enum ConfigSource {
    /// Standard provider chain (env, shared config, IMDS...)
    Environment(SessionSettings),
    /// Pre-built service config; only the region is filled in per client
    Fixed(TaggingConfigBuilder),
}

/// Resource Groups Tagging API client with a per-region client cache
pub struct TaggingClient {
    source: ConfigSource,
    client_cache: Mutex<HashMap<String, Arc<Client>>>,
}

impl TaggingClient {
    /// Create a client that loads credentials from the environment
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            source: ConfigSource::Environment(settings),
            client_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Create a client from an explicit service config builder
    pub fn from_config_builder(builder: TaggingConfigBuilder) -> Self {
        Self {
            source: ConfigSource::Fixed(builder),
            client_cache: Mutex::new(HashMap::new()),
        }
    }

    async fn get_or_init_client(&self, region: &str) -> Arc<Client> {
        let mut cache = self.client_cache.lock().await;

        if let Some(client) = cache.get(region) {
            return client.clone();
        }

        let config = match &self.source {
            ConfigSource::Environment(settings) => {
                let mut loader = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(region.to_owned()))
                    .timeout_config(
                        TimeoutConfig::builder()
                            .connect_timeout(REQUEST_TIMEOUT)
                            .read_timeout(REQUEST_TIMEOUT)
                            .operation_attempt_timeout(REQUEST_TIMEOUT)
                            .build(),
                    );
                if let Some(profile) = &settings.profile {
                    loader = loader.profile_name(profile);
                }
                if let Some(endpoint_url) = &settings.endpoint_url {
                    loader = loader.endpoint_url(endpoint_url);
                }
                let sdk_config = loader.load().await;
                TaggingConfigBuilder::from(&sdk_config).build()
            }
            ConfigSource::Fixed(builder) => builder
                .clone()
                .region(Region::new(region.to_owned()))
                .build(),
        };

        tracing::debug!("Initialized tagging client for {}", region);

        let client = Arc::new(Client::from_conf(config));
        cache.insert(region.to_string(), client.clone());
        client
    }
}

#[async_trait]
impl TaggingApi for TaggingClient {
    async fn get_resources(&self, region: &str, request: &PageRequest) -> Result<Page, AwsError> {
        let client = self.get_or_init_client(region).await;

        tracing::debug!(
            region = region,
            token = request.pagination_token.as_deref().unwrap_or(""),
            "GetResources"
        );

        let output = client
            .get_resources()
            .resources_per_page(request.resources_per_page)
            .set_pagination_token(request.pagination_token.clone())
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        let mut resource_arns = Vec::new();
        for mapping in output.resource_tag_mapping_list() {
            match mapping.resource_arn() {
                Some(arn) => resource_arns.push(arn.to_string()),
                None => tracing::debug!("Skipping tag mapping without an ARN in {}", region),
            }
        }

        Ok(Page {
            resource_arns,
            pagination_token: output.pagination_token().unwrap_or_default().to_string(),
        })
    }
}
