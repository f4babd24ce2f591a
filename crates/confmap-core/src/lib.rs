//! # confmap core
//!
//! Flattens nested, typed configuration objects into dotted `key=value`
//! properties, renders them deterministically and fingerprints the result
//! so that configuration drift can be detected.
//!
//! ## Building Blocks
//!
//! - [`Key`]: a property path that is relative, absolute or the root of its
//!   namespace
//! - [`Mapping`]: the builder that resolves keys against a prefix and merges
//!   nested contributions
//! - [`Mappable`]: implemented by anything that can describe itself as a
//!   [`Mapping`] (derivable with the `derive` feature)
//! - [`ConfigValue`]: the conversion of a single value to text
//! - [`fingerprint()`]: MD5 over the canonical serialized text
//!
//! ## Example
//!
//! ```
//! use confmap_core::{Mappable, Mapping};
//!
//! struct Database {
//!     host: String,
//!     port: Option<u16>,
//! }
//!
//! impl Mappable for Database {
//!     fn as_configuration(&self) -> Mapping {
//!         let mut config = Mapping::new();
//!         config.put("host", &self.host).put("port", self.port);
//!         config
//!     }
//! }
//!
//! let db = Database { host: "localhost".into(), port: Some(5432) };
//!
//! let mut config = Mapping::prefixed("app");
//! config
//!     .put_mappable("db", &db)
//!     .put_absolute("log.level", "info");
//!
//! assert_eq!(
//!     config.serialize(),
//!     "app.db.host=localhost\napp.db.port=5432\nlog.level=info"
//! );
//! assert_eq!(config.fingerprint().len(), 32);
//! ```

extern crate self as confmap_core;

pub mod document;
pub mod error;
pub mod fingerprint;
pub mod key;
pub mod mappable;
pub mod mapping;
pub mod value;

pub use document::Document;
pub use error::{MappingError, MappingResult};
pub use fingerprint::{fingerprint, is_fingerprint};
pub use key::Key;
pub use mappable::Mappable;
pub use mapping::Mapping;
pub use value::ConfigValue;

#[cfg(feature = "derive")]
pub use confmap_macros::Mappable;
