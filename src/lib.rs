//! # swcatalog
//!
//! A bidirectional XML codec for software component catalog metadata.
//!
//! Two related but incompatible dialects are supported: the *upstream*
//! dialect, a single `<component>` document shipped by a software project,
//! and the *distro* dialect, a `<components>` collection document produced
//! by distribution tooling which additionally carries an origin, a media
//! base URL and a default priority.
//!
//! ## Example
//!
//! ```rust
//! use swcatalog::{CodecConfig, XmlMetadata};
//!
//! let codec = XmlMetadata::new(CodecConfig::new().with_locale("de_DE"));
//! let xml = r#"<component type="desktop">
//!     <id>org.example.Player.desktop</id>
//!     <name>Player</name>
//!     <name xml:lang="de">Abspieler</name>
//! </component>"#;
//!
//! let cpt = codec.parse_component(xml, false).unwrap().unwrap();
//! assert_eq!(cpt.id, "org.example.Player.desktop");
//! assert_eq!(cpt.name.get("de_DE").map(|s| s.as_str()), Some("Abspieler"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::should_implement_trait)] // kind enums use infallible from_str tables

pub mod context;
pub mod dates;
pub mod decode;
pub mod description;
pub mod encode;
pub mod error;
pub mod metadata;
pub mod model;
pub mod tree;

// Re-exports for convenience
pub use context::{CodecConfig, Dialect, ParserContext};
pub use error::{Error, Result};
pub use metadata::XmlMetadata;
pub use model::{Component, Icon, Image, Language, ProvidedItem, Release, Screenshot};

/// Version of the swcatalog library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format version written on `<components>` collection roots
pub const COLLECTION_VERSION: &str = "0.8";
