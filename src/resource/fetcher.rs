//! Region Collector
//!
//! Drives `GetResources` pagination for one region, retrying transient
//! failures with exponential backoff, and classifies every returned ARN.

use super::classify::{convert_arn, SingleResource};
use crate::aws::arn::ArnError;
use crate::aws::client::{Page, PageRequest, TaggingApi};
use crate::aws::error::{format_aws_error, AwsError};
use backon::{ExponentialBuilder, Retryable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Backoff bounds for a single page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: usize,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            min_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

/// Terminal failure while collecting a region
#[derive(Debug, Error)]
pub enum CollectError {
    /// A retryable error persisted past the retry bound
    #[error("{region}: giving up after {attempts} attempts: {source}")]
    RetriesExhausted {
        region: String,
        attempts: usize,
        #[source]
        source: AwsError,
    },

    /// The API rejected the request with a non-retryable error
    #[error("{region}: request rejected: {source}")]
    Rejected {
        region: String,
        #[source]
        source: AwsError,
    },

    /// A returned ARN could not be decomposed or classified
    ///
    /// Fails the whole region: resources from earlier pages are discarded, so
    /// a skipped region shows up as missing rather than silently short.
    #[error("{region}: {source}")]
    MalformedArn {
        region: String,
        #[source]
        source: ArnError,
    },
}

impl CollectError {
    pub fn region(&self) -> &str {
        match self {
            CollectError::RetriesExhausted { region, .. }
            | CollectError::Rejected { region, .. }
            | CollectError::MalformedArn { region, .. } => region,
        }
    }

    /// Short, user-facing reason
    pub fn summary(&self) -> String {
        match self {
            CollectError::RetriesExhausted {
                attempts, source, ..
            } => format!("{} (after {} attempts)", format_aws_error(source), attempts),
            CollectError::Rejected { source, .. } => format_aws_error(source),
            CollectError::MalformedArn { source, .. } => source.to_string(),
        }
    }
}

/// Collect every tagged resource in `region`, in page order
pub async fn collect_region<A>(
    api: &A,
    region: &str,
    retry: &RetryPolicy,
) -> Result<Vec<SingleResource>, CollectError>
where
    A: TaggingApi + ?Sized,
{
    let mut resources = Vec::new();
    let mut request = PageRequest::first();
    let mut pages = 0usize;

    loop {
        let page = fetch_page(api, region, &request, retry).await?;
        pages += 1;

        debug!(
            region = region,
            page = pages,
            items = page.resource_arns.len(),
            "Fetched page"
        );

        for arn in &page.resource_arns {
            let resource = convert_arn(arn, region).map_err(|source| CollectError::MalformedArn {
                region: region.to_string(),
                source,
            })?;
            resources.push(resource);
        }

        if page.is_last() {
            break;
        }
        request = PageRequest::after(page.pagination_token);
    }

    info!(
        region = region,
        pages = pages,
        resources = resources.len(),
        "Region collected"
    );

    Ok(resources)
}

/// Fetch one page, retrying retryable errors within the policy bounds
async fn fetch_page<A>(
    api: &A,
    region: &str,
    request: &PageRequest,
    retry: &RetryPolicy,
) -> Result<Page, CollectError>
where
    A: TaggingApi + ?Sized,
{
    let attempts = AtomicUsize::new(0);
    let counter = &attempts;

    let result = (|| async move {
        counter.fetch_add(1, Ordering::Relaxed);
        api.get_resources(region, request).await
    })
    .retry(retry.backoff())
    .when(|e: &AwsError| e.is_retryable())
    .notify(|e, dur| {
        warn!(
            region = region,
            delay = ?dur,
            error = %e,
            "GetResources failed, retrying..."
        );
    })
    .await;

    result.map_err(|source| {
        let region = region.to_string();
        if source.is_retryable() {
            CollectError::RetriesExhausted {
                region,
                attempts: attempts.load(Ordering::Relaxed),
                source,
            }
        } else {
            CollectError::Rejected { region, source }
        }
    })
}
