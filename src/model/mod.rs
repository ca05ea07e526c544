//! Domain model for software component metadata
//!
//! The records in this module are what the codec decodes XML into and
//! encodes XML from. They carry no XML knowledge of their own; validity
//! rules live on the records, the wire mapping lives in the codec modules.

pub mod component;
pub mod enums;
pub mod release;
pub mod screenshot;

pub use component::{Component, Icon, Language, ProvidedItem};
pub use enums::{
    BundleKind, ChecksumKind, ComponentKind, ImageKind, ProvidedKind, ScreenshotKind, SizeKind,
    UrgencyKind, UrlKind,
};
pub use release::Release;
pub use screenshot::{Image, Screenshot};

use indexmap::IndexMap;

/// A text value keyed by locale tag.
///
/// The key `"C"` holds the untranslated default-language value. Insertion
/// order is preserved so encoding walks values in the order they were
/// decoded or set.
pub type TranslatedString = IndexMap<String, String>;
