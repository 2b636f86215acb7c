//! Outdated check using npm range semantics

use node_semver::{Range, Version};

/// Decide whether `latest` falls outside `requested_range`.
///
/// Returns `None` when either side does not parse: `latest` must be a
/// concrete version and the range a valid npm range expression. Tags like
/// `latest`, `file:` paths and git URLs are therefore unknown, not outdated.
/// An empty range means any version, as in npm.
pub fn is_outdated(latest: &str, requested_range: &str) -> Option<bool> {
    let version = Version::parse(latest).ok()?;
    let requested_range = match requested_range.trim() {
        "" => "*",
        range => range,
    };
    let range = Range::parse(requested_range).ok()?;
    Some(!range.satisfies(&version))
}
