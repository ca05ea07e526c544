//! The software component record
//!
//! [`Component`] is the central record of the domain model. Its `Display`
//! implementation produces the human-readable dump attached to
//! invalid-component errors.

use super::enums::{BundleKind, ComponentKind, ProvidedKind, UrlKind};
use super::release::Release;
use super::screenshot::Screenshot;
use super::TranslatedString;
use indexmap::IndexMap;
use std::fmt;

/// An icon of a component.
///
/// Each kind carries exactly the one reference that makes sense for it: a
/// symbolic name for stock icons, a filename for cached/local icons, a URL
/// for remote icons.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    /// An icon from the stock icon theme, referenced by symbolic name
    Stock {
        /// Symbolic icon name
        name: String,
    },
    /// An icon shipped in the distribution icon cache
    Cached {
        /// Filename inside the icon cache
        filename: String,
    },
    /// An icon at an absolute local path
    Local {
        /// Path to the icon file
        filename: String,
    },
    /// An icon fetched over the network
    Remote {
        /// Full URL of the icon
        url: String,
    },
}

impl Icon {
    /// String form of the icon kind
    pub fn kind_str(&self) -> &'static str {
        match self {
            Icon::Stock { .. } => "stock",
            Icon::Cached { .. } => "cached",
            Icon::Local { .. } => "local",
            Icon::Remote { .. } => "remote",
        }
    }

    /// The name, filename or URL carried by this icon
    pub fn value(&self) -> &str {
        match self {
            Icon::Stock { name } => name,
            Icon::Cached { filename } | Icon::Local { filename } => filename,
            Icon::Remote { url } => url,
        }
    }
}

/// An item a component provides to the system
#[derive(Debug, Clone, PartialEq)]
pub struct ProvidedItem {
    /// What sort of item this is
    pub kind: ProvidedKind,
    /// The item identifier (soname, binary name, D-Bus name, ...)
    pub item: String,
}

impl ProvidedItem {
    /// Create a new provided item
    pub fn new(kind: ProvidedKind, item: impl Into<String>) -> Self {
        Self {
            kind,
            item: item.into(),
        }
    }
}

/// Translation status of one locale
#[derive(Debug, Clone, PartialEq)]
pub struct Language {
    /// Locale tag
    pub locale: String,
    /// Translation completion percentage, 0 when unstated
    pub percentage: u32,
}

/// A software component record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Component {
    /// Kind of the component
    pub kind: ComponentKind,
    /// Unique component id
    pub id: String,
    /// Collection origin this component was read from
    pub origin: Option<String>,
    /// Merge priority, defaulted from the collection
    pub priority: i32,
    /// Name of the source package this component is built from
    pub source_pkgname: Option<String>,
    /// Names of the packages providing this component
    pub pkgnames: Vec<String>,
    /// Display name per locale
    pub name: TranslatedString,
    /// One-line summary per locale
    pub summary: TranslatedString,
    /// Developer or project name per locale
    pub developer_name: TranslatedString,
    /// Long description markup per locale
    pub description: TranslatedString,
    /// SPDX license expression of the project
    pub project_license: Option<String>,
    /// Umbrella project this component belongs to
    pub project_group: Option<String>,
    /// Desktops this component is compulsory for
    pub compulsory_for_desktops: Vec<String>,
    /// Category names
    pub categories: Vec<String>,
    /// Search keywords
    pub keywords: Vec<String>,
    /// One URL per URL kind
    pub urls: IndexMap<UrlKind, String>,
    /// Component icons
    pub icons: Vec<Icon>,
    /// Items this component provides to the system
    pub provided: Vec<ProvidedItem>,
    /// Screenshots
    pub screenshots: Vec<Screenshot>,
    /// Releases, newest first by convention of the source document
    pub releases: Vec<Release>,
    /// Translation status per locale
    pub languages: Vec<Language>,
    /// One bundle identifier per bundling system
    pub bundles: IndexMap<BundleKind, String>,
    /// Ids of components this component extends
    pub extends: Vec<String>,
}

impl Component {
    /// Create a new empty component
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name for a locale
    pub fn set_name(&mut self, value: impl Into<String>, locale: impl Into<String>) {
        self.name.insert(locale.into(), value.into());
    }

    /// Set the summary for a locale
    pub fn set_summary(&mut self, value: impl Into<String>, locale: impl Into<String>) {
        self.summary.insert(locale.into(), value.into());
    }

    /// Set the developer name for a locale
    pub fn set_developer_name(&mut self, value: impl Into<String>, locale: impl Into<String>) {
        self.developer_name.insert(locale.into(), value.into());
    }

    /// Set the description markup for a locale
    pub fn set_description(&mut self, markup: impl Into<String>, locale: impl Into<String>) {
        self.description.insert(locale.into(), markup.into());
    }

    /// Add a provided item
    pub fn add_provided_item(&mut self, kind: ProvidedKind, item: impl Into<String>) {
        self.provided.push(ProvidedItem::new(kind, item));
    }

    /// Set the URL for a kind, replacing any earlier value
    pub fn add_url(&mut self, kind: UrlKind, url: impl Into<String>) {
        self.urls.insert(kind, url.into());
    }

    /// Set the bundle id for a bundling system
    pub fn add_bundle_id(&mut self, kind: BundleKind, id: impl Into<String>) {
        self.bundles.insert(kind, id.into());
    }

    /// Add a language entry
    pub fn add_language(&mut self, locale: impl Into<String>, percentage: u32) {
        self.languages.push(Language {
            locale: locale.into(),
            percentage,
        });
    }

    /// Add the id of a component this one extends
    pub fn add_extends(&mut self, id: impl Into<String>) {
        self.extends.push(id.into());
    }

    /// Validity predicate applied after decoding.
    ///
    /// A component must at least carry a non-empty id to be usable.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Component::{}]", self.kind.as_str())?;
        writeln!(f, "  id: {}", self.id)?;
        if let Some(origin) = &self.origin {
            writeln!(f, "  origin: {}", origin)?;
        }
        for (locale, name) in &self.name {
            writeln!(f, "  name[{}]: {}", locale, name)?;
        }
        for (locale, summary) in &self.summary {
            writeln!(f, "  summary[{}]: {}", locale, summary)?;
        }
        if !self.pkgnames.is_empty() {
            writeln!(f, "  pkgnames: {}", self.pkgnames.join(", "))?;
        }
        writeln!(f, "  priority: {}", self.priority)?;
        write!(
            f,
            "  icons: {}, screenshots: {}, releases: {}, provided: {}",
            self.icons.len(),
            self.screenshots.len(),
            self.releases.len(),
            self.provided.len()
        )
    }
}
