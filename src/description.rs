//! Description transcoding
//!
//! Long descriptions are restricted rich text (`<p>`, `<ul>`, `<ol>` and
//! their list items). This module converts that subtree to and from the
//! locale-keyed markup strings stored on the domain records, honoring the
//! dialect-dependent localization placement: upstream documents localize
//! each child of a single `<description>` element, distro documents carry
//! one `<description>` element per locale.

use crate::context::{Dialect, ParserContext};
use crate::model::TranslatedString;
use crate::tree::{self, Element};

/// Decode an upstream `<description>` element into per-locale markup.
///
/// Children are grouped by resolved locale; each group's elements are kept
/// as verbatim markup joined by newlines. Children tagged for a foreign
/// locale are skipped.
pub fn parse_upstream_description(node: &Element, ctx: &ParserContext) -> TranslatedString {
    let mut desc = TranslatedString::new();

    for child in &node.children {
        let locale = match ctx.locale_for(child) {
            Some(locale) => locale,
            None => continue,
        };

        let fragment = strip_lang_attributes(child).to_markup();
        let entry = desc.entry(locale).or_default();
        if !entry.is_empty() {
            entry.push('\n');
        }
        entry.push_str(&fragment);
    }

    desc
}

/// Decode a distro `<description>` element.
///
/// The element carries one `lang` attribute (or none, meaning "C"); its
/// full child markup is captured verbatim for that single locale. Returns
/// `None` when the element is tagged for a foreign locale.
pub fn parse_distro_description(node: &Element, ctx: &ParserContext) -> Option<(String, String)> {
    let locale = ctx.locale_for(node)?;
    Some((locale, dump_children(node)))
}

/// Serialize an element's children back to markup text, one per line
fn dump_children(node: &Element) -> String {
    node.children
        .iter()
        .map(|child| child.to_markup())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clone an element with all `lang` attributes removed, recursively
fn strip_lang_attributes(node: &Element) -> Element {
    let mut copy = node.clone();
    copy.attributes.shift_remove("lang");
    copy.children = copy
        .children
        .iter()
        .map(strip_lang_attributes)
        .collect();
    copy
}

/// Writes description markup into an XML tree, dialect-aware.
///
/// In upstream mode a single `<description>` element is created on first
/// use and reused for every locale, with `xml:lang` stamped on each
/// top-level child (and propagated onto list items, never onto the list
/// container). In distro mode every locale gets its own `<description>`
/// element carrying the `xml:lang` attribute itself.
#[derive(Debug, Default)]
pub struct DescriptionWriter {
    desc_index: Option<usize>,
}

impl DescriptionWriter {
    /// Create a writer for one component or release
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one locale's markup under `parent`.
    ///
    /// Returns false when the markup is empty or does not parse as a
    /// well-formed fragment; that locale is skipped without error.
    pub fn add(
        &mut self,
        parent: &mut Element,
        markup: &str,
        locale: &str,
        ctx: &ParserContext,
    ) -> bool {
        if markup.trim().is_empty() {
            return false;
        }

        // Re-parse the stored markup wrapped in a synthetic root
        let wrapped = format!("<root>{}</root>", markup);
        let fragment = match tree::parse_document(&wrapped) {
            Ok(Some(root)) => root,
            _ => return false,
        };

        let localized = locale != "C";
        let desc_node = match ctx.dialect {
            Dialect::Upstream => {
                if self.desc_index.is_none() {
                    parent.add_child(Element::new("description"));
                    self.desc_index = Some(parent.children.len() - 1);
                }
                match self.desc_index {
                    Some(index) => &mut parent.children[index],
                    None => return false,
                }
            }
            Dialect::Distro => {
                // distro documents may carry multiple description elements
                let mut node = Element::new("description");
                if localized {
                    node.set_attribute("xml:lang", locale);
                }
                parent.add_child_mut(node)
            }
        };

        let stamp_children = ctx.dialect == Dialect::Upstream && localized;
        for child in fragment.children {
            if child.name == "ul" || child.name == "ol" {
                let mut container = Element::new(child.name.clone());
                for mut item in child.children {
                    if stamp_children {
                        item.set_attribute("xml:lang", locale);
                    }
                    container.add_child(item);
                }
                desc_node.add_child(container);
            } else {
                let mut child = child;
                if stamp_children {
                    child.set_attribute("xml:lang", locale);
                }
                desc_node.add_child(child);
            }
        }

        true
    }
}
