// src/version.rs

//! Semantic version handling for recipe versions and release tags
//!
//! Release tags are rarely bare semver: `v1.4.0` and `v2.1` are both common.
//! [`parse_version`] accepts those shapes and normalizes them into a
//! [`semver::Version`], while still rejecting tags that are not versions at
//! all (`latest`, `nightly`, date stamps with zero-padded components).

use semver::{BuildMetadata, Version};
use std::cmp::Ordering;

/// Parse a version string leniently
///
/// Accepted on top of strict semver:
/// - a leading `v` or `V` (`v1.2.3`)
/// - missing minor/patch components, which default to zero (`1.2` is `1.2.0`)
///
/// Pre-release and build suffixes are kept as-is.
pub fn parse_version(input: &str) -> Result<Version, semver::Error> {
    let trimmed = input.trim();
    let unprefixed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let suffix_start = unprefixed.find(['-', '+']).unwrap_or(unprefixed.len());
    let (core, suffix) = unprefixed.split_at(suffix_start);

    let components = core.split('.').count();
    if (1..3).contains(&components) && core.split('.').all(is_numeric_component) {
        let padding = ".0".repeat(3 - components);
        return Version::parse(&format!("{core}{padding}{suffix}"));
    }

    Version::parse(unprefixed)
}

fn is_numeric_component(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
}

/// Compare by semver precedence, ignoring build metadata
///
/// `semver::Version`'s `Ord` breaks ties on build metadata, which precedence
/// rules say must not affect ordering.
pub fn cmp_precedence(a: &Version, b: &Version) -> Ordering {
    let strip = |v: &Version| {
        let mut v = v.clone();
        v.build = BuildMetadata::EMPTY;
        v
    };
    strip(a).cmp(&strip(b))
}

/// Render `version` the way `like` is written
///
/// Recipes that track tags such as `v1.4.0` keep the prefix, so URLs built
/// from the recipe version still name a real tag.
pub fn format_like(version: &Version, like: &str) -> String {
    match like.trim().chars().next() {
        Some(prefix @ ('v' | 'V')) => format!("{prefix}{version}"),
        _ => version.to_string(),
    }
}

/// True when `candidate` is strictly newer than `current`
pub fn is_newer(candidate: &Version, current: &Version) -> bool {
    cmp_precedence(candidate, current) == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        parse_version(s).unwrap()
    }

    #[test]
    fn test_parse_strict_semver() {
        assert_eq!(v("1.2.3"), Version::new(1, 2, 3));
        assert_eq!(v("1.2.3-rc.1").pre.as_str(), "rc.1");
        assert_eq!(v("1.2.3+build.5").build.as_str(), "build.5");
    }

    #[test]
    fn test_parse_prefixed_tags() {
        assert_eq!(v("v1.2.3"), Version::new(1, 2, 3));
        assert_eq!(v("V0.9.0"), Version::new(0, 9, 0));
        assert_eq!(v(" v2.0.0 "), Version::new(2, 0, 0));
    }

    #[test]
    fn test_parse_short_versions() {
        assert_eq!(v("1.2"), Version::new(1, 2, 0));
        assert_eq!(v("v3"), Version::new(3, 0, 0));
        assert_eq!(v("1.2-beta.1").pre.as_str(), "beta.1");
        assert_eq!(v("1.2-beta.1").to_string(), "1.2.0-beta.1");
    }

    #[test]
    fn test_parse_rejects_non_versions() {
        for tag in ["latest", "", "v", "nightly-2021", "2021.10.05", "1..2", "1.2.3.4", "a.b.c"] {
            assert!(parse_version(tag).is_err(), "{tag:?} should not parse");
        }
    }

    #[test]
    fn test_normalized_display_drops_prefix() {
        assert_eq!(v("v1.4.0").to_string(), "1.4.0");
    }

    #[test]
    fn test_format_like_keeps_prefix() {
        assert_eq!(format_like(&v("1.2.0"), "v1.0.0"), "v1.2.0");
        assert_eq!(format_like(&v("v1.2.0"), "V1.0"), "V1.2.0");
        assert_eq!(format_like(&v("v1.2.0"), "1.0.0"), "1.2.0");
        assert_eq!(format_like(&v("2.0.0-rc.1"), "v1.0.0"), "v2.0.0-rc.1");
    }

    #[test]
    fn test_is_newer_precedence() {
        assert!(is_newer(&v("1.2.0"), &v("1.0.0")));
        assert!(is_newer(&v("2.0.0"), &v("1.99.99")));
        assert!(is_newer(&v("1.0.1"), &v("1.0.0")));
        assert!(is_newer(&v("1.0.0"), &v("1.0.0-rc.1")));
        assert!(is_newer(&v("1.0.0-rc.2"), &v("1.0.0-rc.1")));

        assert!(!is_newer(&v("1.0.0"), &v("1.0.0")));
        assert!(!is_newer(&v("0.9.0"), &v("1.0.0")));
        assert!(!is_newer(&v("1.0.0-rc.1"), &v("1.0.0")));
    }

    #[test]
    fn test_build_metadata_ignored() {
        assert!(!is_newer(&v("1.0.0+build.2"), &v("1.0.0+build.1")));
        assert!(!is_newer(&v("1.0.0+build.1"), &v("1.0.0")));
        assert_eq!(cmp_precedence(&v("1.0.0+a"), &v("1.0.0+b")), Ordering::Equal);
    }
}
