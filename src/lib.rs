//! tagsweep - inventory of tagged AWS resources
//!
//! Sweeps a list of regions through the Resource Groups Tagging API,
//! classifies every returned ARN and renders the result as a table.

pub mod aws;
pub mod config;
pub mod report;
pub mod resource;

#[cfg(test)]
mod testing;
