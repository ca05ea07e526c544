//! Encoding domain records into XML elements
//!
//! Mirror images of the decoders in [`crate::decode`]. Every encoder
//! follows the omit-empty policy: attributes and elements are left out
//! entirely when the underlying value is empty, zero or unknown, never
//! emitted as empty placeholders.

use crate::context::{Dialect, ParserContext};
use crate::dates::format_iso8601;
use crate::description::DescriptionWriter;
use crate::model::{
    Component, ComponentKind, Image, ProvidedKind, Release, Screenshot, ScreenshotKind,
    TranslatedString, UrgencyKind,
};
use crate::tree::Element;

/// Add a text child, skipping empty values
fn add_text_child(parent: &mut Element, name: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    parent.add_child(Element::with_text(name, value));
}

/// Add a wrapped (or unwrapped) list of text children, skipping empty lists
fn add_node_list(parent: &mut Element, wrapper: Option<&str>, child_name: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    let node = match wrapper {
        Some(wrapper) => parent.add_child_mut(Element::new(wrapper)),
        None => parent,
    };
    for value in values {
        node.add_child(Element::with_text(child_name, value));
    }
}

/// Emit one child per locale, with xml:lang on everything but "C"
fn lang_table_to_nodes(parent: &mut Element, name: &str, table: &TranslatedString) {
    for (locale, value) in table {
        if value.is_empty() {
            continue;
        }
        let mut node = Element::with_text(name, value);
        if locale != "C" {
            node.set_attribute("xml:lang", locale);
        }
        parent.add_child(node);
    }
}

/// Emit all locales of a description through the transcoder
fn description_to_nodes(parent: &mut Element, table: &TranslatedString, ctx: &ParserContext) {
    let mut writer = DescriptionWriter::new();
    for (locale, markup) in table {
        writer.add(parent, markup, locale, ctx);
    }
}

/// Encode one screenshot image
fn image_to_node(image: &Image) -> Element {
    let mut node = Element::with_text("image", &image.url);
    node.set_attribute("type", image.kind.as_str());
    if image.width > 0 && image.height > 0 {
        node.set_attribute("width", image.width.to_string());
        node.set_attribute("height", image.height.to_string());
    }
    node
}

/// Encode one screenshot with captions and images
fn screenshot_to_node(sshot: &Screenshot) -> Element {
    let mut node = Element::new("screenshot");
    if sshot.kind == ScreenshotKind::Default {
        node.set_attribute("type", "default");
    }
    lang_table_to_nodes(&mut node, "caption", &sshot.caption);
    for image in &sshot.images {
        node.add_child(image_to_node(image));
    }
    node
}

/// Encode one release
fn release_to_node(release: &Release, ctx: &ParserContext) -> Element {
    let mut node = Element::new("release");
    if !release.version.is_empty() {
        node.set_attribute("version", &release.version);
    }

    if release.timestamp > 0 {
        match ctx.dialect {
            Dialect::Distro => {
                node.set_attribute(
                    ctx.dialect.release_timestamp_attr(),
                    release.timestamp.to_string(),
                );
            }
            Dialect::Upstream => {
                if let Some(date) = format_iso8601(release.timestamp) {
                    node.set_attribute(ctx.dialect.release_timestamp_attr(), date);
                }
            }
        }
    }

    if release.urgency != UrgencyKind::Unknown {
        node.set_attribute("urgency", release.urgency.as_str());
    }

    for location in &release.locations {
        add_text_child(&mut node, "location", location);
    }
    for (kind, value) in &release.checksums {
        if value.is_empty() {
            continue;
        }
        let checksum = node.add_child_mut(Element::with_text("checksum", value));
        checksum.set_attribute("type", kind.as_str());
    }
    for (kind, size) in &release.sizes {
        if *size == 0 {
            continue;
        }
        let size_node = node.add_child_mut(Element::with_text("size", size.to_string()));
        size_node.set_attribute("type", kind.as_str());
    }

    description_to_nodes(&mut node, &release.description, ctx);

    node
}

/// Map a provided kind to its element name and optional type attribute
fn provided_element(kind: ProvidedKind) -> Option<(&'static str, Option<&'static str>)> {
    match kind {
        ProvidedKind::Library => Some(("library", None)),
        ProvidedKind::Binary => Some(("binary", None)),
        ProvidedKind::Font => Some(("font", None)),
        ProvidedKind::Modalias => Some(("modalias", None)),
        ProvidedKind::Python2 => Some(("python2", None)),
        ProvidedKind::Python3 => Some(("python3", None)),
        ProvidedKind::FirmwareRuntime => Some(("firmware", Some("runtime"))),
        ProvidedKind::FirmwareFlashed => Some(("firmware", Some("flashed"))),
        ProvidedKind::DbusSystem => Some(("dbus", Some("system"))),
        ProvidedKind::DbusUser => Some(("dbus", Some("user"))),
        // mimetypes live in their own historic top-level tag
        ProvidedKind::Mimetype => None,
    }
}

/// Encode the provided items, split into `<provides>` and `<mimetypes>`
fn provided_to_nodes(parent: &mut Element, cpt: &Component) {
    let others: Vec<_> = cpt
        .provided
        .iter()
        .filter(|p| p.kind != ProvidedKind::Mimetype)
        .collect();
    if !others.is_empty() {
        let provides = parent.add_child_mut(Element::new("provides"));
        for item in others {
            if let Some((name, type_attr)) = provided_element(item.kind) {
                let node = provides.add_child_mut(Element::with_text(name, &item.item));
                if let Some(type_attr) = type_attr {
                    node.set_attribute("type", type_attr);
                }
            }
        }
    }

    let mimetypes: Vec<String> = cpt
        .provided
        .iter()
        .filter(|p| p.kind == ProvidedKind::Mimetype)
        .map(|p| p.item.clone())
        .collect();
    add_node_list(parent, Some("mimetypes"), "mimetype", &mimetypes);
}

/// Encode the translation status list
fn languages_to_nodes(parent: &mut Element, cpt: &Component) {
    if cpt.languages.is_empty() {
        return;
    }
    let languages = parent.add_child_mut(Element::new("languages"));
    for language in &cpt.languages {
        let node = languages.add_child_mut(Element::with_text("lang", &language.locale));
        if language.percentage > 0 {
            node.set_attribute("percentage", language.percentage.to_string());
        }
    }
}

/// Serialize a component to a `<component>` element
pub fn component_to_node(cpt: &Component, ctx: &ParserContext) -> Element {
    let mut cnode = Element::new("component");
    if cpt.kind != ComponentKind::Generic && cpt.kind != ComponentKind::Unknown {
        cnode.set_attribute("type", cpt.kind.as_str());
    }

    add_text_child(&mut cnode, "id", &cpt.id);

    lang_table_to_nodes(&mut cnode, "name", &cpt.name);
    lang_table_to_nodes(&mut cnode, "summary", &cpt.summary);
    lang_table_to_nodes(&mut cnode, "developer_name", &cpt.developer_name);
    description_to_nodes(&mut cnode, &cpt.description, ctx);

    if let Some(license) = &cpt.project_license {
        add_text_child(&mut cnode, "project_license", license);
    }
    if let Some(group) = &cpt.project_group {
        add_text_child(&mut cnode, "project_group", group);
    }

    add_node_list(&mut cnode, None, "pkgname", &cpt.pkgnames);
    if let Some(source_pkgname) = &cpt.source_pkgname {
        add_text_child(&mut cnode, "source_pkgname", source_pkgname);
    }
    add_node_list(&mut cnode, None, "extends", &cpt.extends);
    add_node_list(
        &mut cnode,
        None,
        "compulsory_for_desktop",
        &cpt.compulsory_for_desktops,
    );
    add_node_list(&mut cnode, Some("keywords"), "keyword", &cpt.keywords);
    add_node_list(&mut cnode, Some("categories"), "category", &cpt.categories);

    for (kind, value) in &cpt.urls {
        if value.is_empty() {
            continue;
        }
        let node = cnode.add_child_mut(Element::with_text("url", value));
        node.set_attribute("type", kind.as_str());
    }

    for icon in &cpt.icons {
        if icon.value().is_empty() {
            continue;
        }
        let node = cnode.add_child_mut(Element::with_text("icon", icon.value()));
        node.set_attribute("type", icon.kind_str());
    }

    for (kind, value) in &cpt.bundles {
        if value.is_empty() {
            continue;
        }
        let node = cnode.add_child_mut(Element::with_text("bundle", value));
        node.set_attribute("type", kind.as_str());
    }

    provided_to_nodes(&mut cnode, cpt);
    languages_to_nodes(&mut cnode, cpt);

    if !cpt.releases.is_empty() {
        let releases = cnode.add_child_mut(Element::new("releases"));
        let release_nodes: Vec<Element> = cpt
            .releases
            .iter()
            .map(|release| release_to_node(release, ctx))
            .collect();
        for node in release_nodes {
            releases.add_child(node);
        }
    }

    if !cpt.screenshots.is_empty() {
        let screenshots = cnode.add_child_mut(Element::new("screenshots"));
        for sshot in &cpt.screenshots {
            screenshots.add_child(screenshot_to_node(sshot));
        }
    }

    cnode
}
