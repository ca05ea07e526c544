//! Decoding XML elements into domain records
//!
//! One decoding routine per entity kind, plus the component decoder that
//! dispatches child elements by name. All decoders take the element and the
//! per-call [`ParserContext`]; none of them mutate shared state. Elements
//! with unrecognized kind strings are dropped silently, per the format's
//! forward-compatibility rules.

use crate::context::{Dialect, ParserContext};
use crate::dates::parse_iso8601;
use crate::description;
use crate::error::{Error, Result};
use crate::model::{
    BundleKind, ChecksumKind, Component, ComponentKind, Icon, Image, ImageKind, ProvidedKind,
    Release, Screenshot, ScreenshotKind, SizeKind, UrgencyKind, UrlKind,
};
use crate::tree::Element;
use log::debug;

/// Collect the trimmed text of all children with the given name
fn children_values(node: &Element, child_name: &str) -> Vec<String> {
    node.children
        .iter()
        .filter(|child| child.name == child_name)
        .map(|child| child.text_content())
        .filter(|content| !content.is_empty())
        .collect()
}

/// Read the component kind from a node's `type` attribute.
///
/// An absent attribute and the explicit "generic" string both map to the
/// generic kind; anything unrecognized maps to Unknown.
fn set_component_kind(node: &Element, cpt: &mut Component) {
    match node.attribute("type") {
        None | Some("generic") => cpt.kind = ComponentKind::Generic,
        Some(kind_str) => {
            cpt.kind = ComponentKind::from_str(kind_str);
            if cpt.kind == ComponentKind::Unknown {
                debug!("component of unknown type found: {}", kind_str);
            }
        }
    }
}

/// Decode an `<image>` element. In the distro dialect images without both
/// dimensions are discarded; the media base URL is applied either way.
fn decode_image(node: &Element, ctx: &ParserContext) -> Option<Image> {
    let content = node.text_content();
    if content.is_empty() {
        return None;
    }

    let width: u32 = node
        .attribute("width")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    let height: u32 = node
        .attribute("height")
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    if ctx.dialect.requires_image_dimensions() && (width == 0 || height == 0) {
        return None;
    }

    let kind = if node.attribute("type") == Some("thumbnail") {
        ImageKind::Thumbnail
    } else {
        ImageKind::Source
    };

    Some(Image {
        url: ctx.rewrite_media_url(&content),
        kind,
        width,
        height,
    })
}

/// Decode one `<screenshot>` element with its captions and images
fn decode_screenshot(node: &Element, ctx: &ParserContext) -> Screenshot {
    let mut sshot = Screenshot::new();
    if node.attribute("type") == Some("default") {
        sshot.kind = ScreenshotKind::Default;
    }

    for child in &node.children {
        match child.name.as_str() {
            "image" => {
                if let Some(image) = decode_image(child, ctx) {
                    sshot.add_image(image);
                }
            }
            "caption" => {
                let content = child.text_content();
                if content.is_empty() {
                    continue;
                }
                if let Some(locale) = ctx.locale_for(child) {
                    sshot.set_caption(content, locale);
                }
            }
            _ => {}
        }
    }

    sshot
}

/// Decode a `<screenshots>` container, dropping screenshots without images
fn parse_screenshots(node: &Element, ctx: &ParserContext, cpt: &mut Component) {
    for child in node.find_children("screenshot") {
        let sshot = decode_screenshot(child, ctx);
        if sshot.is_valid() {
            cpt.screenshots.push(sshot);
        }
    }
}

/// Decode one `<release>` element
fn decode_release(node: &Element, ctx: &ParserContext, component_id: &str) -> Release {
    let mut release = Release::new();
    release.version = node
        .attribute("version")
        .map(str::to_string)
        .unwrap_or_default();

    // the date attribute is evaluated first, so a raw timestamp wins
    if let Some(date) = node.attribute("date") {
        match parse_iso8601(date) {
            Some(timestamp) => release.timestamp = timestamp,
            None => debug!("invalid ISO-8601 date in releases of {}", component_id),
        }
    }
    if let Some(raw) = node.attribute("timestamp") {
        if let Ok(timestamp) = raw.parse::<i64>() {
            release.timestamp = timestamp;
        }
    }
    if let Some(urgency) = node.attribute("urgency") {
        release.urgency = UrgencyKind::from_str(urgency);
    }

    for child in &node.children {
        match child.name.as_str() {
            "location" => {
                let content = child.text_content();
                if !content.is_empty() {
                    release.add_location(content);
                }
            }
            "checksum" => {
                let kind = child.attribute("type").and_then(ChecksumKind::from_str);
                if let Some(kind) = kind {
                    release.set_checksum(kind, child.text_content());
                }
            }
            "size" => {
                let kind = child.attribute("type").and_then(SizeKind::from_str);
                if let Some(kind) = kind {
                    if let Ok(size) = child.text_content().parse::<u64>() {
                        if size > 0 {
                            release.set_size(kind, size);
                        }
                    }
                }
            }
            "description" => {
                if ctx.dialect.localizes_description_element() {
                    if let Some((locale, markup)) =
                        description::parse_distro_description(child, ctx)
                    {
                        release.set_description(markup, locale);
                    }
                } else {
                    for (locale, markup) in description::parse_upstream_description(child, ctx) {
                        release.set_description(markup, locale);
                    }
                }
            }
            _ => {}
        }
    }

    release
}

/// Decode a `<releases>` container
fn parse_releases(node: &Element, ctx: &ParserContext, cpt: &mut Component) {
    let component_id = cpt.id.clone();
    for child in node.find_children("release") {
        cpt.releases.push(decode_release(child, ctx, &component_id));
    }
}

/// Decode a `<provides>` container.
///
/// Firmware and D-Bus entries need a recognized `type` attribute or they
/// are dropped without a trace.
fn parse_provides(node: &Element, cpt: &mut Component) {
    for child in &node.children {
        let content = child.text_content();
        if content.is_empty() {
            continue;
        }

        match child.name.as_str() {
            "library" => cpt.add_provided_item(ProvidedKind::Library, content),
            "binary" => cpt.add_provided_item(ProvidedKind::Binary, content),
            "font" => cpt.add_provided_item(ProvidedKind::Font, content),
            "modalias" => cpt.add_provided_item(ProvidedKind::Modalias, content),
            "python2" => cpt.add_provided_item(ProvidedKind::Python2, content),
            "python3" => cpt.add_provided_item(ProvidedKind::Python3, content),
            "firmware" => match child.attribute("type") {
                Some("runtime") => cpt.add_provided_item(ProvidedKind::FirmwareRuntime, content),
                Some("flashed") => cpt.add_provided_item(ProvidedKind::FirmwareFlashed, content),
                _ => {}
            },
            "dbus" => match child.attribute("type") {
                Some("system") => cpt.add_provided_item(ProvidedKind::DbusSystem, content),
                Some("user") | Some("session") => {
                    cpt.add_provided_item(ProvidedKind::DbusUser, content)
                }
                _ => {}
            },
            _ => {}
        }
    }
}

/// Decode a `<languages>` container
fn parse_languages(node: &Element, cpt: &mut Component) {
    for child in node.find_children("lang") {
        let locale = child.text_content();
        if locale.is_empty() {
            continue;
        }
        let percentage: u32 = child
            .attribute("percentage")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        cpt.add_language(locale, percentage);
    }
}

/// Decode an `<icon>` element; unknown or absent kinds yield no icon
fn decode_icon(node: &Element, content: &str, ctx: &ParserContext) -> Option<Icon> {
    if content.is_empty() {
        return None;
    }

    match node.attribute("type") {
        Some("stock") => Some(Icon::Stock {
            name: content.to_string(),
        }),
        Some("cached") => Some(Icon::Cached {
            filename: content.to_string(),
        }),
        Some("local") => Some(Icon::Local {
            filename: content.to_string(),
        }),
        Some("remote") => Some(Icon::Remote {
            url: ctx.rewrite_media_url(content),
        }),
        _ => None,
    }
}

/// Decode a `<bundle>` element.
///
/// Any recognized bundle type is coerced to the Limba kind; this matches
/// the behavior of existing consumers and is asserted by the round-trip
/// tests, so do not change it without migrating them.
fn decode_bundle(node: &Element, content: &str) -> Option<(BundleKind, String)> {
    if content.is_empty() {
        return None;
    }
    node.attribute("type")
        .and_then(BundleKind::from_str)
        .map(|_| (BundleKind::Limba, content.to_string()))
}

/// Decode one `<component>` element into a [`Component`].
///
/// Child elements are dispatched by name; multi-valued tags accumulate,
/// single-valued tags overwrite on repetition. Unless `allow_invalid` is
/// set, the finished record must pass [`Component::is_valid`] or an
/// [`Error::InvalidComponent`] carrying a full dump is returned.
pub fn parse_component_node(
    node: &Element,
    ctx: &ParserContext,
    allow_invalid: bool,
) -> Result<Component> {
    let mut cpt = Component::new();
    let mut pkgnames: Vec<String> = Vec::new();
    let mut compulsory_for_desktops: Vec<String> = Vec::new();

    set_component_kind(node, &mut cpt);
    cpt.priority = ctx.priority;

    for child in &node.children {
        let content = child.text_content();
        let lang = ctx.locale_for(child);

        match child.name.as_str() {
            "id" => {
                cpt.id = content;
                if ctx.dialect == Dialect::Upstream && cpt.kind == ComponentKind::Generic {
                    // legacy documents carry the type on the id element
                    set_component_kind(child, &mut cpt);
                }
            }
            "pkgname" => {
                if !content.is_empty() {
                    pkgnames.push(content);
                }
            }
            "source_pkgname" => {
                if !content.is_empty() {
                    cpt.source_pkgname = Some(content);
                }
            }
            "name" => {
                if let Some(lang) = lang {
                    if !content.is_empty() {
                        cpt.set_name(content, lang);
                    }
                }
            }
            "summary" => {
                if let Some(lang) = lang {
                    if !content.is_empty() {
                        cpt.set_summary(content, lang);
                    }
                }
            }
            "developer_name" => {
                if let Some(lang) = lang {
                    if !content.is_empty() {
                        cpt.set_developer_name(content, lang);
                    }
                }
            }
            "description" => {
                if ctx.dialect.localizes_description_element() {
                    if let Some((locale, markup)) = description::parse_distro_description(child, ctx)
                    {
                        cpt.set_description(markup, locale);
                    }
                } else {
                    for (locale, markup) in description::parse_upstream_description(child, ctx) {
                        cpt.set_description(markup, locale);
                    }
                }
            }
            "icon" => {
                if let Some(icon) = decode_icon(child, &content, ctx) {
                    cpt.icons.push(icon);
                }
            }
            "url" => {
                if !content.is_empty() {
                    let kind = child.attribute("type").and_then(UrlKind::from_str);
                    if let Some(kind) = kind {
                        cpt.add_url(kind, content);
                    }
                }
            }
            "categories" => cpt.categories = children_values(child, "category"),
            "keywords" => cpt.keywords = children_values(child, "keyword"),
            "mimetypes" => {
                // historic top-level tag; mimetypes are provided items
                for mimetype in children_values(child, "mimetype") {
                    cpt.add_provided_item(ProvidedKind::Mimetype, mimetype);
                }
            }
            "provides" => parse_provides(child, &mut cpt),
            "screenshots" => parse_screenshots(child, ctx, &mut cpt),
            "releases" => parse_releases(child, ctx, &mut cpt),
            "languages" => parse_languages(child, &mut cpt),
            "project_license" => {
                if !content.is_empty() {
                    cpt.project_license = Some(content);
                }
            }
            "project_group" => {
                if !content.is_empty() {
                    cpt.project_group = Some(content);
                }
            }
            "compulsory_for_desktop" => {
                if !content.is_empty() {
                    compulsory_for_desktops.push(content);
                }
            }
            "extends" => {
                if !content.is_empty() {
                    cpt.add_extends(content);
                }
            }
            "bundle" => {
                if let Some((kind, id)) = decode_bundle(child, &content) {
                    cpt.add_bundle_id(kind, id);
                }
            }
            _ => {}
        }
    }

    cpt.origin = ctx.origin.clone();
    cpt.pkgnames = pkgnames;
    cpt.compulsory_for_desktops = compulsory_for_desktops;

    if allow_invalid || cpt.is_valid() {
        Ok(cpt)
    } else {
        Err(Error::InvalidComponent(cpt.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CodecConfig;
    use crate::tree;

    fn context(dialect: Dialect, locale: &str) -> ParserContext {
        ParserContext::new(dialect, &CodecConfig::new().with_locale(locale))
    }

    fn element(xml: &str) -> Element {
        tree::parse_document(xml).unwrap().unwrap()
    }

    #[test]
    fn test_image_dimensions_enforced_in_distro_mode() {
        let node = element("<image>https://example.org/s.png</image>");

        assert!(decode_image(&node, &context(Dialect::Distro, "C")).is_none());
        let img = decode_image(&node, &context(Dialect::Upstream, "C")).unwrap();
        assert_eq!(img.width, 0);
        assert_eq!(img.height, 0);
    }

    #[test]
    fn test_image_media_baseurl_applied() {
        let config = CodecConfig::new().with_media_baseurl("https://media.example.org");
        let ctx = ParserContext::new(Dialect::Upstream, &config);
        let node = element("<image>pool/s.png</image>");

        let img = decode_image(&node, &ctx).unwrap();
        assert_eq!(img.url, "https://media.example.org/pool/s.png");
    }

    #[test]
    fn test_timestamp_attribute_wins_over_date() {
        let node = element(
            r#"<release version="1.0" date="2020-01-01T00:00:00" timestamp="1600000000"/>"#,
        );
        let release = decode_release(&node, &context(Dialect::Upstream, "C"), "x");
        assert_eq!(release.timestamp, 1600000000);
    }

    #[test]
    fn test_bad_date_is_ignored() {
        let node = element(r#"<release version="1.0" date="not-a-date"/>"#);
        let release = decode_release(&node, &context(Dialect::Upstream, "C"), "x");
        assert_eq!(release.timestamp, 0);
    }

    #[test]
    fn test_checksum_second_value_wins() {
        let node = element(
            r#"<release version="1.0">
                <checksum type="sha256">aaaa</checksum>
                <checksum type="sha256">bbbb</checksum>
            </release>"#,
        );
        let release = decode_release(&node, &context(Dialect::Upstream, "C"), "x");
        assert_eq!(release.checksum(ChecksumKind::Sha256), Some("bbbb"));
    }

    #[test]
    fn test_unknown_checksum_kind_dropped() {
        let node = element(
            r#"<release version="1.0"><checksum type="crc32">x</checksum></release>"#,
        );
        let release = decode_release(&node, &context(Dialect::Upstream, "C"), "x");
        assert!(release.checksums.is_empty());
    }

    #[test]
    fn test_size_requires_positive_integer() {
        let node = element(
            r#"<release version="1.0">
                <size type="download">0</size>
                <size type="installed">4096</size>
                <size type="weird">12</size>
            </release>"#,
        );
        let release = decode_release(&node, &context(Dialect::Upstream, "C"), "x");
        assert_eq!(release.sizes.get(&SizeKind::Installed), Some(&4096));
        assert!(!release.sizes.contains_key(&SizeKind::Download));
        assert_eq!(release.sizes.len(), 1);
    }

    #[test]
    fn test_firmware_requires_type_attribute() {
        let mut cpt = Component::new();
        let node = element(
            r#"<provides>
                <firmware type="runtime">first.bin</firmware>
                <firmware>second.bin</firmware>
                <firmware type="other">third.bin</firmware>
            </provides>"#,
        );
        parse_provides(&node, &mut cpt);

        assert_eq!(cpt.provided.len(), 1);
        assert_eq!(cpt.provided[0].kind, ProvidedKind::FirmwareRuntime);
        assert_eq!(cpt.provided[0].item, "first.bin");
    }

    #[test]
    fn test_dbus_session_maps_to_user() {
        let mut cpt = Component::new();
        let node = element(
            r#"<provides><dbus type="session">org.example.Daemon</dbus></provides>"#,
        );
        parse_provides(&node, &mut cpt);
        assert_eq!(cpt.provided[0].kind, ProvidedKind::DbusUser);
    }

    #[test]
    fn test_bundle_kind_coerced_to_limba() {
        let node = element(r#"<bundle type="flatpak">org.example.App</bundle>"#);
        let (kind, id) = decode_bundle(&node, "org.example.App").unwrap();
        assert_eq!(kind, BundleKind::Limba);
        assert_eq!(id, "org.example.App");

        let unknown = element(r#"<bundle type="snap">x</bundle>"#);
        assert!(decode_bundle(&unknown, "x").is_none());
    }

    #[test]
    fn test_icon_kinds() {
        let ctx = context(Dialect::Upstream, "C");
        let stock = element(r#"<icon type="stock">multimedia-player</icon>"#);
        assert_eq!(
            decode_icon(&stock, "multimedia-player", &ctx),
            Some(Icon::Stock {
                name: "multimedia-player".to_string()
            })
        );

        let unknown = element(r#"<icon type="svg">foo.svg</icon>"#);
        assert!(decode_icon(&unknown, "foo.svg", &ctx).is_none());
        let untyped = element(r#"<icon>foo.png</icon>"#);
        assert!(decode_icon(&untyped, "foo.png", &ctx).is_none());
    }

    #[test]
    fn test_remote_icon_media_baseurl() {
        let config = CodecConfig::new().with_media_baseurl("https://media.example.org");
        let ctx = ParserContext::new(Dialect::Distro, &config);
        let node = element(r#"<icon type="remote">icons/64/app.png</icon>"#);

        assert_eq!(
            decode_icon(&node, "icons/64/app.png", &ctx),
            Some(Icon::Remote {
                url: "https://media.example.org/icons/64/app.png".to_string()
            })
        );
    }

    #[test]
    fn test_component_basic_fields() {
        let ctx = context(Dialect::Upstream, "C");
        let node = element(
            r#"<component type="desktop">
                <id>org.example.Player.desktop</id>
                <name>Player</name>
                <summary>Plays things</summary>
                <pkgname>player</pkgname>
                <pkgname>player-data</pkgname>
                <project_license>GPL-3.0+</project_license>
                <compulsory_for_desktop>GNOME</compulsory_for_desktop>
                <extends>org.example.Shell</extends>
            </component>"#,
        );
        let cpt = parse_component_node(&node, &ctx, false).unwrap();

        assert_eq!(cpt.kind, ComponentKind::DesktopApp);
        assert_eq!(cpt.id, "org.example.Player.desktop");
        assert_eq!(cpt.name.get("C").map(|s| s.as_str()), Some("Player"));
        assert_eq!(cpt.pkgnames, vec!["player", "player-data"]);
        assert_eq!(cpt.project_license.as_deref(), Some("GPL-3.0+"));
        assert_eq!(cpt.compulsory_for_desktops, vec!["GNOME"]);
        assert_eq!(cpt.extends, vec!["org.example.Shell"]);
    }

    #[test]
    fn test_legacy_type_on_id_element() {
        let ctx = context(Dialect::Upstream, "C");
        let node = element(
            r#"<component><id type="desktop">org.example.Old.desktop</id></component>"#,
        );
        let cpt = parse_component_node(&node, &ctx, true).unwrap();
        assert_eq!(cpt.kind, ComponentKind::DesktopApp);

        // the fallback only applies to upstream documents
        let distro_ctx = context(Dialect::Distro, "C");
        let cpt = parse_component_node(&node, &distro_ctx, true).unwrap();
        assert_eq!(cpt.kind, ComponentKind::Generic);
    }

    #[test]
    fn test_invalid_component_rejected_with_dump() {
        let ctx = context(Dialect::Upstream, "C");
        let node = element(r#"<component><name>No id here</name></component>"#);

        let err = parse_component_node(&node, &ctx, false).unwrap_err();
        match err {
            Error::InvalidComponent(dump) => assert!(dump.contains("No id here")),
            other => panic!("expected InvalidComponent, got {:?}", other),
        }

        assert!(parse_component_node(&node, &ctx, true).is_ok());
    }

    #[test]
    fn test_mimetypes_become_provided_items() {
        let ctx = context(Dialect::Upstream, "C");
        let node = element(
            r#"<component>
                <id>org.example.X</id>
                <mimetypes><mimetype>audio/ogg</mimetype><mimetype>audio/flac</mimetype></mimetypes>
            </component>"#,
        );
        let cpt = parse_component_node(&node, &ctx, false).unwrap();
        assert_eq!(cpt.provided.len(), 2);
        assert!(cpt
            .provided
            .iter()
            .all(|p| p.kind == ProvidedKind::Mimetype));
    }

    #[test]
    fn test_languages_decoded() {
        let mut cpt = Component::new();
        let node = element(
            r#"<languages>
                <lang percentage="96">de</lang>
                <lang>fr</lang>
            </languages>"#,
        );
        parse_languages(&node, &mut cpt);

        assert_eq!(cpt.languages.len(), 2);
        assert_eq!(cpt.languages[0].locale, "de");
        assert_eq!(cpt.languages[0].percentage, 96);
        assert_eq!(cpt.languages[1].percentage, 0);
    }

    #[test]
    fn test_screenshots_without_images_dropped() {
        let ctx = context(Dialect::Upstream, "C");
        let mut cpt = Component::new();
        let node = element(
            r#"<screenshots>
                <screenshot type="default"><image>https://example.org/a.png</image></screenshot>
                <screenshot><caption>Empty one</caption></screenshot>
            </screenshots>"#,
        );
        parse_screenshots(&node, &ctx, &mut cpt);

        assert_eq!(cpt.screenshots.len(), 1);
        assert_eq!(cpt.screenshots[0].kind, ScreenshotKind::Default);
    }
}
