//! Top-level parse and serialize entry points
//!
//! [`XmlMetadata`] owns a [`CodecConfig`] and exposes the four document
//! operations: parse a single upstream component, parse a distro
//! collection, and the two matching serializers. Every call builds its own
//! [`ParserContext`], so one `XmlMetadata` value can be reused freely.

use crate::context::{CodecConfig, Dialect, ParserContext};
use crate::decode::parse_component_node;
use crate::encode::component_to_node;
use crate::error::{Error, Result};
use crate::model::Component;
use crate::tree::{self, Element};
use crate::COLLECTION_VERSION;
use log::debug;

/// Codec for component metadata XML in both dialects
#[derive(Debug, Clone, Default)]
pub struct XmlMetadata {
    config: CodecConfig,
}

impl XmlMetadata {
    /// Create a codec with the given configuration
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse a single upstream `<component>` document.
    ///
    /// Legacy `<application>` roots are accepted. A document without a root
    /// element yields `Ok(None)` ("no components"); a `<components>` root
    /// is a dialect mismatch. With `allow_invalid` unset, a component
    /// failing the validity check is an error.
    pub fn parse_component(&self, xml: &str, allow_invalid: bool) -> Result<Option<Component>> {
        let root = match tree::parse_document(xml)? {
            Some(root) => root,
            None => return Ok(None),
        };
        let ctx = ParserContext::new(Dialect::Upstream, &self.config);

        match root.name.as_str() {
            "components" => Err(Error::UnexpectedFormatKind(
                "tried to parse a collection document as upstream metadata".to_string(),
            )),
            "component" => parse_component_node(&root, &ctx, allow_invalid).map(Some),
            "application" => {
                debug!("parsing legacy metadata document");
                parse_component_node(&root, &ctx, allow_invalid).map(Some)
            }
            other => Err(Error::InvalidDocument(format!(
                "root element <{}> is not component metadata",
                other
            ))),
        }
    }

    /// Parse a distro `<components>` collection document.
    ///
    /// The collection root's origin, media_baseurl and priority attributes
    /// apply to every contained component. The first invalid component
    /// aborts the whole parse. A lone `<component>` root is accepted as a
    /// single-element collection with validity checking relaxed, a common
    /// output of metadata generators.
    pub fn parse_collection(&self, xml: &str) -> Result<Vec<Component>> {
        let root = tree::parse_document(xml)?.ok_or(Error::EmptyDocument)?;
        let ctx = ParserContext::new(Dialect::Distro, &self.config);

        match root.name.as_str() {
            "components" => {
                let ctx = ctx.for_collection(&root);
                let mut components = Vec::new();
                for child in root.find_children("component") {
                    components.push(parse_component_node(child, &ctx, false)?);
                }
                Ok(components)
            }
            "component" => {
                let cpt = parse_component_node(&root, &ctx, true)?;
                Ok(vec![cpt])
            }
            other => Err(Error::InvalidDocument(format!(
                "root element <{}> is not component metadata",
                other
            ))),
        }
    }

    /// Serialize one component to an upstream `<component>` document
    pub fn serialize_component(&self, cpt: &Component) -> Result<String> {
        let ctx = ParserContext::new(Dialect::Upstream, &self.config);
        component_to_node(cpt, &ctx).to_document_string()
    }

    /// Serialize components to a distro `<components>` collection document.
    ///
    /// An empty input slice yields `None` rather than an empty document.
    pub fn serialize_collection(&self, cpts: &[Component]) -> Result<Option<String>> {
        if cpts.is_empty() {
            return Ok(None);
        }

        let ctx = ParserContext::new(Dialect::Distro, &self.config);
        let mut root = Element::new("components");
        root.set_attribute("version", COLLECTION_VERSION);
        if let Some(origin) = &ctx.origin {
            root.set_attribute("origin", origin);
        }

        for cpt in cpts {
            root.add_child(component_to_node(cpt, &ctx));
        }

        root.to_document_string().map(Some)
    }
}
