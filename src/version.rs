//! Version-tag normalization and constraint matching.

use semver::{Version, VersionReq};

use crate::error::{DiscoveryError, Result};
use crate::service::ServiceInstance;

/// Normalize a registry version tag to dotted form (`1-0-0` becomes `1.0.0`).
pub fn normalize_tag(tag: &str) -> String {
    tag.replace('-', ".")
}

/// Parse a version constraint into a semantic-version range.
///
/// Accepts both comma-separated comparator lists (`>=1.0.0, <2.0.0`) and the
/// space-separated form (`>=1.0.0 <2.0.0`).
pub fn parse_constraint(raw: &str) -> Result<VersionReq> {
    match VersionReq::parse(raw) {
        Ok(req) => Ok(req),
        Err(err) => {
            let comma_joined = raw.split_whitespace().collect::<Vec<_>>().join(", ");
            VersionReq::parse(&comma_joined).map_err(|_| DiscoveryError::InvalidVersion(err))
        }
    }
}

/// Parsed version of an instance's first tag, when it has one that parses.
fn instance_version(instance: &ServiceInstance) -> Option<Version> {
    let tag = instance.version_tag()?;
    Version::parse(&normalize_tag(tag)).ok()
}

/// Narrow `instances` to the members running the maximum version that
/// satisfies `constraint`.
///
/// Instances whose first tag is missing or unparseable never match. Ties on
/// the winning version are kept: several instances may run the same top
/// version, and the caller chooses among them.
pub fn narrow_to_best(
    instances: Vec<ServiceInstance>,
    constraint: &VersionReq,
) -> Result<Vec<ServiceInstance>> {
    let matching: Vec<(Version, ServiceInstance)> = instances
        .into_iter()
        .filter_map(|instance| {
            let version = instance_version(&instance)?;
            constraint.matches(&version).then_some((version, instance))
        })
        .collect();

    let best = matching
        .iter()
        .map(|(version, _)| version)
        .max()
        .cloned()
        .ok_or(DiscoveryError::NoVersionMatch)?;

    Ok(matching
        .into_iter()
        .filter(|(version, _)| *version == best)
        .map(|(_, instance)| instance)
        .collect())
}
