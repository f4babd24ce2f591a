//! Flattening of untyped JSON-like documents.
//!
//! Any [`serde_json::Value`] is [`Mappable`]:
//!
//! - `null` contributes nothing
//! - scalars become a root value
//! - objects namespace each field under its name
//! - arrays of scalars become one comma-joined root value
//! - other arrays are expanded like [`Mapping::put_list`], items named by
//!   index unless a [`Document`] sets an item prefix
//!
//! ```
//! use confmap_core::{Mapping, Mappable};
//! use serde_json::json;
//!
//! let doc = json!({
//!     "db": { "host": "localhost", "port": 5432 },
//!     "topics": ["a", "b"],
//! });
//!
//! let mut config = Mapping::prefixed("app");
//! config.merge_mappable(&doc);
//! assert_eq!(
//!     config.serialize(),
//!     "app.db.host=localhost\napp.db.port=5432\napp.topics=a,b"
//! );
//! ```

use serde_json::Value;

use crate::value::is_scalar;
use crate::{Mappable, Mapping};

/// A document view with a configurable list item prefix.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    value: &'a Value,
    item_prefix: &'a str,
}

impl<'a> Document<'a> {
    /// Wraps a document. List items are named by their index.
    pub fn new(value: &'a Value) -> Self {
        Self {
            value,
            item_prefix: "",
        }
    }

    /// Sets the prefix of synthesized list item names.
    pub fn item_prefix(mut self, item_prefix: &'a str) -> Self {
        self.item_prefix = item_prefix;
        self
    }

    fn child(&self, value: &'a Value) -> Self {
        Self { value, ..*self }
    }
}

impl Mappable for Document<'_> {
    fn as_configuration(&self) -> Mapping {
        let mut config = Mapping::new();
        match self.value {
            Value::Null => {}
            Value::Object(fields) => {
                for (name, value) in fields {
                    config.put_mappable(name, &self.child(value));
                }
            }
            Value::Array(items) if items.is_empty() => {}
            Value::Array(items) if items.iter().all(is_scalar) => {
                config.put_root(self.value);
            }
            Value::Array(items) => {
                let children = items.iter().map(|item| self.child(item));
                config.put_list("", children, self.item_prefix);
            }
            scalar => {
                config.put_root(scalar);
            }
        }
        config
    }
}

impl Mappable for Value {
    fn as_configuration(&self) -> Mapping {
        Document::new(self).as_configuration()
    }
}
