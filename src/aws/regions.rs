//! Built-in region list

/// Regions swept when neither the CLI nor the config file names any
pub const TRACEABLE_REGIONS: [&str; 17] = [
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "ca-central-1",
    "eu-central-1",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-south-1",
    "sa-east-1",
];

/// Default region list as owned strings
pub fn default_regions() -> Vec<String> {
    TRACEABLE_REGIONS.iter().map(|r| r.to_string()).collect()
}

/// Loose sanity check on a region name (`xx-xxxx-N`)
pub fn is_valid_region(region: &str) -> bool {
    let parts: Vec<&str> = region.split('-').collect();
    if parts.len() < 3 {
        return false;
    }
    let Some(last) = parts.last() else {
        return false;
    };
    parts.iter().all(|p| {
        !p.is_empty()
            && p
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    }) && last.chars().all(|c| c.is_ascii_digit())
}
