//! XML tree handling
//!
//! This module provides the minimal DOM the codec operates on: named
//! elements with an ordered attribute map, text content and child elements.
//! Parsing and writing are both backed by quick-xml.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;

/// XML element in the document tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Element name (prefix stripped)
    pub name: String,
    /// Element attributes in document order
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create a new element with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a new element with text content
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut elem = Self::new(name);
        elem.text = Some(text.into());
        elem
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Set an attribute value
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Add a child element and return a mutable reference to it
    pub fn add_child_mut(&mut self, child: Element) -> &mut Element {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// Append text content, concatenating with any existing text
    pub fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }

    /// Get the concatenated text of this element and all its descendants,
    /// with surrounding whitespace trimmed
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Find child elements by name
    pub fn find_children(&self, name: &str) -> Vec<&Element> {
        self.children.iter().filter(|e| e.name == name).collect()
    }

    /// Serialize this element (without an XML declaration) to markup text
    pub fn to_markup(&self) -> String {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        if write_element(&mut writer, self).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned()
    }

    /// Serialize this element as a full document with an XML declaration
    pub fn to_document_string(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(|e| Error::MalformedXml(e.to_string()))?;
        write_element(&mut writer, self).map_err(|e| Error::MalformedXml(e.to_string()))?;
        let mut out = String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned();
        out.push('\n');
        Ok(out)
    }
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, elem: &Element) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(elem.name.as_str());
    for (key, value) in &elem.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if elem.text.is_none() && elem.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &elem.text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in &elem.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(elem.name.as_str())))?;
    Ok(())
}

/// Parse an XML document, returning its root element.
///
/// Returns `Ok(None)` when the input contains no root element at all;
/// malformed XML is a [`Error::MalformedXml`].
pub fn parse_document(xml: &str) -> Result<Option<Element>> {
    let mut reader = Reader::from_str(xml);

    let mut root: Option<Element> = None;
    let mut element_stack: Vec<Element> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let element = parse_start(&e)?;
                element_stack.push(element);
            }
            Ok(Event::End(_)) => {
                if let Some(current) = element_stack.pop() {
                    if let Some(parent) = element_stack.last_mut() {
                        parent.add_child(current);
                    } else if root.is_none() {
                        root = Some(current);
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                let element = parse_start(&e)?;
                if let Some(parent) = element_stack.last_mut() {
                    parent.add_child(element);
                } else if root.is_none() {
                    root = Some(element);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(current) = element_stack.last_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| Error::MalformedXml(format!("bad text content: {}", e)))?;
                    if !text.trim().is_empty() {
                        current.append_text(&text);
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(current) = element_stack.last_mut() {
                    current.append_text(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedXml(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {} // Ignore comments, processing instructions, declarations
        }
        buf.clear();
    }

    if !element_stack.is_empty() {
        return Err(Error::MalformedXml("unclosed element".to_string()));
    }

    Ok(root)
}

/// Build an element from a start tag event
fn parse_start(start: &BytesStart) -> Result<Element> {
    let name_bytes = start.name();
    let name = std::str::from_utf8(name_bytes.as_ref())
        .map_err(|e| Error::MalformedXml(format!("invalid element name: {}", e)))?;

    // Drop any namespace prefix; this format only uses plain names
    let local = match name.split_once(':') {
        Some((_prefix, local)) => local,
        None => name,
    };
    let mut element = Element::new(local);

    for attr_result in start.attributes() {
        let attr =
            attr_result.map_err(|e| Error::MalformedXml(format!("bad attribute: {}", e)))?;

        let attr_name = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| Error::MalformedXml(format!("invalid attribute name: {}", e)))?;

        // Skip namespace declarations entirely
        if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
            continue;
        }

        let attr_value = attr
            .unescape_value()
            .map_err(|e| Error::MalformedXml(format!("bad attribute value: {}", e)))?
            .to_string();

        // Store qualified attributes under their local name, so that
        // xml:lang written by the encoders reads back as plain "lang"
        let attr_local = match attr_name.split_once(':') {
            Some((_prefix, local)) => local,
            None => attr_name,
        };
        element.attributes.insert(attr_local.to_string(), attr_value);
    }

    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_xml() {
        let xml = r#"<root><child>text</child></root>"#;
        let root = parse_document(xml).unwrap().unwrap();

        assert_eq!(root.name, "root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "child");
        assert_eq!(root.children[0].text.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_with_attributes() {
        let xml = r#"<root attr1="value1" attr2="value2"><child/></root>"#;
        let root = parse_document(xml).unwrap().unwrap();

        assert_eq!(root.attribute("attr1"), Some("value1"));
        assert_eq!(root.attribute("attr2"), Some("value2"));
    }

    #[test]
    fn test_parse_strips_xml_lang_prefix() {
        let xml = r#"<name xml:lang="de">Name</name>"#;
        let root = parse_document(xml).unwrap().unwrap();
        assert_eq!(root.attribute("lang"), Some("de"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_document("").unwrap().is_none());
        assert!(parse_document("  \n ").unwrap().is_none());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_document("<a><b></a>").is_err());
    }

    #[test]
    fn test_text_content_flattens_descendants() {
        let xml = r#"<p>alpha <em>beta</em></p>"#;
        let root = parse_document(xml).unwrap().unwrap();
        assert_eq!(root.text_content(), "alpha beta");
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<root><a/><b/><a/></root>"#;
        let root = parse_document(xml).unwrap().unwrap();
        assert_eq!(root.find_children("a").len(), 2);
    }

    #[test]
    fn test_markup_round_trip() {
        let xml = r#"<ul><li>one</li><li>two</li></ul>"#;
        let root = parse_document(xml).unwrap().unwrap();
        assert_eq!(root.to_markup(), xml);
    }

    #[test]
    fn test_markup_escapes_text() {
        let elem = Element::with_text("p", "a < b & c");
        assert_eq!(elem.to_markup(), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_document_string_has_declaration() {
        let elem = Element::new("component");
        let doc = elem.to_document_string().unwrap();
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(doc.contains("<component/>"));
    }
}
