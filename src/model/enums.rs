//! Kind enumerations and their string dispatch tables
//!
//! Every enum here maps to and from the exact strings used on the wire.
//! Lookups are case-sensitive; unrecognized strings resolve to the
//! Unknown/None sentinel of the respective enum.

/// Kind of a software component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentKind {
    /// Kind could not be determined
    Unknown,
    /// A generic component without a more specific kind
    #[default]
    Generic,
    /// A desktop application
    DesktopApp,
    /// A font
    Font,
    /// A codec
    Codec,
    /// An input method
    InputMethod,
    /// An extension of another component
    Addon,
    /// Device firmware
    Firmware,
}

impl ComponentKind {
    /// Resolve a kind from its string form
    pub fn from_str(s: &str) -> Self {
        match s {
            "generic" => ComponentKind::Generic,
            "desktop" => ComponentKind::DesktopApp,
            "font" => ComponentKind::Font,
            "codec" => ComponentKind::Codec,
            "inputmethod" => ComponentKind::InputMethod,
            "addon" => ComponentKind::Addon,
            "firmware" => ComponentKind::Firmware,
            _ => ComponentKind::Unknown,
        }
    }

    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Unknown => "unknown",
            ComponentKind::Generic => "generic",
            ComponentKind::DesktopApp => "desktop",
            ComponentKind::Font => "font",
            ComponentKind::Codec => "codec",
            ComponentKind::InputMethod => "inputmethod",
            ComponentKind::Addon => "addon",
            ComponentKind::Firmware => "firmware",
        }
    }
}

/// Kind of a screenshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenshotKind {
    /// An ordinary screenshot
    #[default]
    Normal,
    /// The primary screenshot shown by software centers
    Default,
}

/// Kind of a screenshot image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageKind {
    /// The image in its source size
    #[default]
    Source,
    /// A scaled-down thumbnail
    Thumbnail,
}

impl ImageKind {
    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Source => "source",
            ImageKind::Thumbnail => "thumbnail",
        }
    }
}

/// Urgency of a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrgencyKind {
    /// Urgency not specified
    #[default]
    Unknown,
    /// Low urgency
    Low,
    /// Medium urgency
    Medium,
    /// High urgency
    High,
    /// Critical, should be installed immediately
    Critical,
}

impl UrgencyKind {
    /// Resolve an urgency from its string form
    pub fn from_str(s: &str) -> Self {
        match s {
            "low" => UrgencyKind::Low,
            "medium" => UrgencyKind::Medium,
            "high" => UrgencyKind::High,
            "critical" => UrgencyKind::Critical,
            _ => UrgencyKind::Unknown,
        }
    }

    /// String form of the urgency
    pub fn as_str(&self) -> &'static str {
        match self {
            UrgencyKind::Unknown => "unknown",
            UrgencyKind::Low => "low",
            UrgencyKind::Medium => "medium",
            UrgencyKind::High => "high",
            UrgencyKind::Critical => "critical",
        }
    }
}

/// Kind of a release checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecksumKind {
    /// SHA-1 digest
    Sha1,
    /// SHA-256 digest
    Sha256,
}

impl ChecksumKind {
    /// Resolve a checksum kind from its `type` attribute value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sha1" => Some(ChecksumKind::Sha1),
            "sha256" => Some(ChecksumKind::Sha256),
            _ => None,
        }
    }

    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Sha256 => "sha256",
        }
    }
}

/// Kind of a release size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeKind {
    /// Size of the download
    Download,
    /// Size when installed
    Installed,
}

impl SizeKind {
    /// Resolve a size kind from its `type` attribute value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "download" => Some(SizeKind::Download),
            "installed" => Some(SizeKind::Installed),
            _ => None,
        }
    }

    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeKind::Download => "download",
            SizeKind::Installed => "installed",
        }
    }
}

/// Kind of an item a component provides to the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvidedKind {
    /// A shared library
    Library,
    /// An executable in the default search path
    Binary,
    /// A font
    Font,
    /// A modalias glob for a handled device
    Modalias,
    /// Firmware loaded at runtime
    FirmwareRuntime,
    /// Firmware flashed onto a device
    FirmwareFlashed,
    /// A Python 2 module
    Python2,
    /// A Python 3 module
    Python3,
    /// A name on the D-Bus system bus
    DbusSystem,
    /// A name on the D-Bus session bus
    DbusUser,
    /// A handled MIME type
    Mimetype,
}

impl ProvidedKind {
    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvidedKind::Library => "library",
            ProvidedKind::Binary => "binary",
            ProvidedKind::Font => "font",
            ProvidedKind::Modalias => "modalias",
            ProvidedKind::FirmwareRuntime => "firmware-runtime",
            ProvidedKind::FirmwareFlashed => "firmware-flashed",
            ProvidedKind::Python2 => "python2",
            ProvidedKind::Python3 => "python3",
            ProvidedKind::DbusSystem => "dbus-system",
            ProvidedKind::DbusUser => "dbus-user",
            ProvidedKind::Mimetype => "mimetype",
        }
    }
}

/// Kind of a web URL attached to a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    /// Upstream homepage
    Homepage,
    /// Bug tracker
    Bugtracker,
    /// Frequently asked questions
    Faq,
    /// End-user documentation
    Help,
    /// Donation page
    Donation,
}

impl UrlKind {
    /// Resolve a URL kind from its `type` attribute value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "homepage" => Some(UrlKind::Homepage),
            "bugtracker" => Some(UrlKind::Bugtracker),
            "faq" => Some(UrlKind::Faq),
            "help" => Some(UrlKind::Help),
            "donation" => Some(UrlKind::Donation),
            _ => None,
        }
    }

    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            UrlKind::Homepage => "homepage",
            UrlKind::Bugtracker => "bugtracker",
            UrlKind::Faq => "faq",
            UrlKind::Help => "help",
            UrlKind::Donation => "donation",
        }
    }
}

/// Kind of a bundling system a component ships through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleKind {
    /// A Limba bundle
    Limba,
    /// A Flatpak bundle
    Flatpak,
}

impl BundleKind {
    /// Resolve a bundle kind from its `type` attribute value
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "limba" => Some(BundleKind::Limba),
            "flatpak" => Some(BundleKind::Flatpak),
            _ => None,
        }
    }

    /// String form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleKind::Limba => "limba",
            BundleKind::Flatpak => "flatpak",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_table() {
        assert_eq!(ComponentKind::from_str("desktop"), ComponentKind::DesktopApp);
        assert_eq!(ComponentKind::from_str("generic"), ComponentKind::Generic);
        assert_eq!(ComponentKind::from_str("bogus"), ComponentKind::Unknown);
        assert_eq!(ComponentKind::DesktopApp.as_str(), "desktop");
    }

    #[test]
    fn test_checksum_kind_table() {
        assert_eq!(ChecksumKind::from_str("sha256"), Some(ChecksumKind::Sha256));
        assert_eq!(ChecksumKind::from_str("md5"), None);
    }

    #[test]
    fn test_size_kind_table() {
        assert_eq!(SizeKind::from_str("download"), Some(SizeKind::Download));
        assert_eq!(SizeKind::from_str(""), None);
    }

    #[test]
    fn test_urgency_unknown_fallback() {
        assert_eq!(UrgencyKind::from_str("urgent!!"), UrgencyKind::Unknown);
        assert_eq!(UrgencyKind::from_str("critical"), UrgencyKind::Critical);
    }

    #[test]
    fn test_url_kind_table() {
        assert_eq!(UrlKind::from_str("homepage"), Some(UrlKind::Homepage));
        assert_eq!(UrlKind::from_str("blog"), None);
    }

    #[test]
    fn test_bundle_kind_table() {
        assert_eq!(BundleKind::from_str("limba"), Some(BundleKind::Limba));
        assert_eq!(BundleKind::from_str("snap"), None);
    }
}
