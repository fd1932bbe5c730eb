//! Inventory Aggregator
//!
//! Runs the region collector over an ordered region list, one region at a
//! time, and concatenates the results.

use super::classify::SingleResource;
use super::fetcher::{collect_region, CollectError, RetryPolicy};
use crate::aws::client::TaggingApi;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// What to do when a region fails terminally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionErrorPolicy {
    /// Log, remember the failure, move on to the next region
    #[default]
    Skip,
    /// Stop the whole run with the region's error
    Abort,
}

/// A region left out of the inventory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionFailure {
    pub region: String,
    pub reason: String,
}

/// Aggregated result of one run
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Region order first, then page order within each region
    pub resources: Vec<SingleResource>,
    pub failed_regions: Vec<RegionFailure>,
}

impl Inventory {
    pub fn is_complete(&self) -> bool {
        self.failed_regions.is_empty()
    }
}

/// Collect tagged resources from every region in `regions`, in order
pub async fn collect_inventory<A>(
    api: &A,
    regions: &[String],
    retry: &RetryPolicy,
    on_error: RegionErrorPolicy,
) -> Result<Inventory, CollectError>
where
    A: TaggingApi + ?Sized,
{
    let mut inventory = Inventory::default();

    for region in regions {
        match collect_region(api, region, retry).await {
            Ok(mut resources) => inventory.resources.append(&mut resources),
            Err(e) => match on_error {
                RegionErrorPolicy::Abort => return Err(e),
                RegionErrorPolicy::Skip => {
                    error!("Skipping region {}: {}", region, e);
                    inventory.failed_regions.push(RegionFailure {
                        region: region.clone(),
                        reason: e.summary(),
                    });
                }
            },
        }
    }

    info!(
        "Collected {} resources from {} regions ({} skipped)",
        inventory.resources.len(),
        regions.len() - inventory.failed_regions.len(),
        inventory.failed_regions.len()
    );

    Ok(inventory)
}
