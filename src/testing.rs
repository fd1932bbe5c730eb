//! Shared test fixtures.
//!
//! [`ScriptedApi`] replays canned pages and errors per region and records
//! every request it receives.

use crate::aws::client::{Page, PageRequest, TaggingApi};
use crate::aws::error::AwsError;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// In-memory `TaggingApi` driven by a per-region script
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<HashMap<String, VecDeque<Result<Page, AwsError>>>>,
    calls: Mutex<Vec<(String, PageRequest)>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page for `region`
    pub fn push_page(&self, region: &str, arns: &[&str], token: &str) -> &Self {
        self.push(region, Ok(page(arns, token)))
    }

    /// Queue a failed fetch for `region`
    pub fn push_error(&self, region: &str, error: AwsError) -> &Self {
        self.push(region, Err(error))
    }

    fn push(&self, region: &str, result: Result<Page, AwsError>) -> &Self {
        self.script
            .lock()
            .unwrap()
            .entry(region.to_string())
            .or_default()
            .push_back(result);
        self
    }

    /// Every request received so far, in order
    pub fn calls(&self) -> Vec<(String, PageRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, region: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| r == region)
            .count()
    }
}

#[async_trait]
impl TaggingApi for ScriptedApi {
    async fn get_resources(&self, region: &str, request: &PageRequest) -> Result<Page, AwsError> {
        self.calls
            .lock()
            .unwrap()
            .push((region.to_string(), request.clone()));

        self.script
            .lock()
            .unwrap()
            .get_mut(region)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(AwsError::Sdk {
                    code: Some("ScriptExhausted".to_string()),
                    message: format!("no scripted response left for {region}"),
                })
            })
    }
}

/// Build a page from borrowed ARNs
pub fn page(arns: &[&str], token: &str) -> Page {
    Page {
        resource_arns: arns.iter().map(|a| a.to_string()).collect(),
        pagination_token: token.to_string(),
    }
}
