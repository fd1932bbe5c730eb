//! AWS interaction module
//!
//! This module holds everything that knows about AWS itself: ARN syntax,
//! the Resource Groups Tagging API client, error classification and the
//! built-in region list.
//!
//! # Module Structure
//!
//! - [`arn`] - ARN decomposition into service and short ARN
//! - [`client`] - `TaggingApi` seam and the SDK-backed `TaggingClient`
//! - [`error`] - Classification of SDK errors into retryable/terminal
//! - [`regions`] - Default region list
//!
//! # Example
//!
//! ```ignore
//! use tagsweep::aws::client::{PageRequest, SessionSettings, TaggingApi, TaggingClient};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = TaggingClient::new(SessionSettings::default());
//!     let page = client.get_resources("us-east-1", &PageRequest::first()).await?;
//!     println!("{} resources", page.resource_arns.len());
//!     Ok(())
//! }
//! ```

pub mod arn;
pub mod client;
pub mod error;
pub mod regions;
