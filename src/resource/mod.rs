//! Resource collection layer
//!
//! Turns raw tagging API pages into an ordered inventory of normalized
//! resource records.
//!
//! # Architecture
//!
//! - [`classify`] - Maps a short ARN to a [`SingleResource`] by service family
//! - [`fetcher`] - Paginates one region with bounded retry
//! - [`inventory`] - Sweeps a list of regions and aggregates the results
//!
//! # Example
//!
//! ```ignore
//! use tagsweep::aws::client::{SessionSettings, TaggingClient};
//! use tagsweep::aws::regions::default_regions;
//! use tagsweep::resource::{collect_inventory, RegionErrorPolicy, RetryPolicy};
//!
//! async fn sweep() -> anyhow::Result<()> {
//!     let client = TaggingClient::new(SessionSettings::default());
//!     let inventory = collect_inventory(
//!         &client,
//!         &default_regions(),
//!         &RetryPolicy::default(),
//!         RegionErrorPolicy::Skip,
//!     )
//!     .await?;
//!     println!("{} resources", inventory.resources.len());
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod fetcher;
pub mod inventory;

pub use classify::{classify, convert_arn, ServiceFamily, SingleResource};
pub use fetcher::{collect_region, CollectError, RetryPolicy};
pub use inventory::{collect_inventory, Inventory, RegionErrorPolicy, RegionFailure};
