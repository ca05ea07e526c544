//! Parser configuration and per-call context
//!
//! [`CodecConfig`] is the caller-facing configuration value. The document
//! driver turns it into a [`ParserContext`] for each parse or serialize
//! call; the context is immutable for the duration of that call and is
//! passed by shared reference to every decoder and encoder. Collection
//! documents derive a child context from their root attributes instead of
//! mutating anything.

use crate::tree::Element;

/// The metadata dialect a document is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Single `<component>` documents authored by upstream projects
    Upstream,
    /// `<components>` collection documents generated by distribution tooling
    Distro,
}

impl Dialect {
    /// Whether `<description>` elements carry their own `lang` attribute.
    ///
    /// In the distro dialect the whole description element is localized;
    /// in the upstream dialect each child paragraph or list item is.
    pub fn localizes_description_element(self) -> bool {
        self == Dialect::Distro
    }

    /// Whether screenshot images without explicit dimensions are discarded
    pub fn requires_image_dimensions(self) -> bool {
        self == Dialect::Distro
    }

    /// The attribute a release timestamp is encoded as
    pub fn release_timestamp_attr(self) -> &'static str {
        match self {
            Dialect::Upstream => "date",
            Dialect::Distro => "timestamp",
        }
    }
}

/// Configuration for the metadata codec
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Locale to extract, "C" for untranslated, "ALL" for every locale
    locale: String,
    /// Origin identifier stamped onto decoded components
    origin: Option<String>,
    /// Base URL prepended to relative media references
    media_baseurl: Option<String>,
    /// Priority used when a component does not set its own
    priority: i32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            locale: "C".to_string(),
            origin: None,
            media_baseurl: None,
            priority: 0,
        }
    }
}

impl CodecConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Set the collection origin
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Set the media base URL
    pub fn with_media_baseurl(mut self, url: impl Into<String>) -> Self {
        self.media_baseurl = Some(url.into());
        self
    }

    /// Set the default component priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Get the active locale
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

/// Immutable per-call state shared by all decoders and encoders
#[derive(Debug, Clone)]
pub struct ParserContext {
    /// Active locale, or the sentinel "ALL"
    pub locale: String,
    /// Substring of the active locale before the first `_`
    locale_short: String,
    /// Dialect of the document being processed
    pub dialect: Dialect,
    /// Collection origin, stamped onto every decoded component
    pub origin: Option<String>,
    /// Base URL for relative media references
    pub media_baseurl: Option<String>,
    /// Default priority for decoded components
    pub priority: i32,
}

impl ParserContext {
    /// Create a context for one parse or serialize call
    pub fn new(dialect: Dialect, config: &CodecConfig) -> Self {
        let locale_short = config
            .locale
            .split('_')
            .next()
            .unwrap_or(config.locale.as_str())
            .to_string();
        Self {
            locale: config.locale.clone(),
            locale_short,
            dialect,
            origin: config.origin.clone(),
            media_baseurl: config.media_baseurl.clone(),
            priority: config.priority,
        }
    }

    /// Derive the context for a `<components>` collection from its root
    /// attributes: origin and media_baseurl replace the configured values,
    /// priority only when the attribute is present.
    pub fn for_collection(&self, root: &Element) -> Self {
        let mut ctx = self.clone();
        ctx.origin = root.attribute("origin").map(str::to_string);
        ctx.media_baseurl = root.attribute("media_baseurl").map(str::to_string);
        if let Some(prio) = root.attribute("priority") {
            if let Ok(prio) = prio.parse::<i32>() {
                ctx.priority = prio;
            }
        }
        ctx
    }

    /// Resolve the locale key an element's content should be filed under.
    ///
    /// Returns `None` when the element is tagged for a locale the caller
    /// did not ask for; such elements must be skipped entirely. An element
    /// without a `lang` attribute resolves to `"C"`. A tag matching the
    /// short form of the active locale is re-keyed to the full locale.
    pub fn locale_for(&self, node: &Element) -> Option<String> {
        let lang = match node.attribute("lang") {
            None => return Some("C".to_string()),
            Some(lang) => lang,
        };

        if self.locale == "ALL" {
            // read every language, keyed by its own tag
            return Some(lang.to_string());
        }
        if lang == self.locale {
            return Some(lang.to_string());
        }
        if lang == self.locale_short {
            return Some(self.locale.clone());
        }

        None
    }

    /// Prefix a media reference with the configured base URL, if any
    pub fn rewrite_media_url(&self, url: &str) -> String {
        match &self.media_baseurl {
            Some(base) => join_url(base, url),
            None => url.to_string(),
        }
    }
}

/// Join a base URL and a path segment with exactly one slash between them
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_for_locale(locale: &str) -> ParserContext {
        let config = CodecConfig::new().with_locale(locale);
        ParserContext::new(Dialect::Upstream, &config)
    }

    fn node_with_lang(lang: Option<&str>) -> Element {
        let mut elem = Element::new("name");
        if let Some(lang) = lang {
            elem.set_attribute("lang", lang);
        }
        elem
    }

    #[test]
    fn test_untagged_node_resolves_to_c() {
        let ctx = context_for_locale("de_DE");
        assert_eq!(ctx.locale_for(&node_with_lang(None)).as_deref(), Some("C"));
    }

    #[test]
    fn test_exact_locale_match() {
        let ctx = context_for_locale("de_DE");
        assert_eq!(
            ctx.locale_for(&node_with_lang(Some("de_DE"))).as_deref(),
            Some("de_DE")
        );
    }

    #[test]
    fn test_short_form_rekeyed_to_full_locale() {
        let ctx = context_for_locale("de_DE");
        assert_eq!(
            ctx.locale_for(&node_with_lang(Some("de"))).as_deref(),
            Some("de_DE")
        );
    }

    #[test]
    fn test_foreign_locale_skipped() {
        let ctx = context_for_locale("de_DE");
        assert_eq!(ctx.locale_for(&node_with_lang(Some("fr"))), None);
    }

    #[test]
    fn test_all_locale_accepts_everything() {
        let ctx = context_for_locale("ALL");
        assert_eq!(
            ctx.locale_for(&node_with_lang(Some("fr"))).as_deref(),
            Some("fr")
        );
        assert_eq!(ctx.locale_for(&node_with_lang(None)).as_deref(), Some("C"));
    }

    #[test]
    fn test_media_url_rewrite() {
        let config = CodecConfig::new().with_media_baseurl("https://media.example.org/pool/");
        let ctx = ParserContext::new(Dialect::Distro, &config);
        assert_eq!(
            ctx.rewrite_media_url("org/example/shot.png"),
            "https://media.example.org/pool/org/example/shot.png"
        );

        let plain = context_for_locale("C");
        assert_eq!(plain.rewrite_media_url("a/b.png"), "a/b.png");
    }

    #[test]
    fn test_collection_context_overrides() {
        let config = CodecConfig::new().with_origin("configured").with_priority(3);
        let ctx = ParserContext::new(Dialect::Distro, &config);

        let mut root = Element::new("components");
        root.set_attribute("origin", "debian-sid-main");
        root.set_attribute("priority", "-1");
        let derived = ctx.for_collection(&root);

        assert_eq!(derived.origin.as_deref(), Some("debian-sid-main"));
        assert_eq!(derived.priority, -1);
        // media_baseurl absent on the root replaces the configured value
        assert_eq!(derived.media_baseurl, None);
        // the original context is untouched
        assert_eq!(ctx.origin.as_deref(), Some("configured"));
    }

    #[test]
    fn test_dialect_policy() {
        assert!(Dialect::Distro.localizes_description_element());
        assert!(!Dialect::Upstream.localizes_description_element());
        assert!(Dialect::Distro.requires_image_dimensions());
        assert_eq!(Dialect::Upstream.release_timestamp_attr(), "date");
        assert_eq!(Dialect::Distro.release_timestamp_attr(), "timestamp");
    }
}
