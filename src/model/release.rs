//! Release records

use super::enums::{ChecksumKind, SizeKind, UrgencyKind};
use super::TranslatedString;
use indexmap::IndexMap;

/// A released version of a component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Release {
    /// Version string of this release
    pub version: String,
    /// Release time in seconds since the epoch, 0 when unknown
    pub timestamp: i64,
    /// How urgently this release should be installed
    pub urgency: UrgencyKind,
    /// Download locations for the release artifact
    pub locations: Vec<String>,
    /// At most one checksum value per kind; later values overwrite earlier
    pub checksums: IndexMap<ChecksumKind, String>,
    /// Artifact sizes per kind, always positive
    pub sizes: IndexMap<SizeKind, u64>,
    /// Release notes markup per locale
    pub description: TranslatedString,
}

impl Release {
    /// Create a new release
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the checksum for a kind, replacing any earlier value
    pub fn set_checksum(&mut self, kind: ChecksumKind, value: impl Into<String>) {
        self.checksums.insert(kind, value.into());
    }

    /// Get the checksum for a kind
    pub fn checksum(&self, kind: ChecksumKind) -> Option<&str> {
        self.checksums.get(&kind).map(|s| s.as_str())
    }

    /// Set the size for a kind
    pub fn set_size(&mut self, kind: SizeKind, size: u64) {
        self.sizes.insert(kind, size);
    }

    /// Add a download location
    pub fn add_location(&mut self, url: impl Into<String>) {
        self.locations.push(url.into());
    }

    /// Set the release notes for a locale
    pub fn set_description(&mut self, markup: impl Into<String>, locale: impl Into<String>) {
        self.description.insert(locale.into(), markup.into());
    }
}
