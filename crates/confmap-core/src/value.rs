//! Conversion of property values to text.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

/// A value that can be stored in a [`Mapping`](crate::Mapping).
///
/// Every value is reduced to text. Returning `None` marks the value as
/// absent, which turns the corresponding put into a no-op.
pub trait ConfigValue {
    /// Renders the value, or `None` when there is nothing to store.
    fn to_config_value(&self) -> Option<String>;
}

macro_rules! display_config_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ConfigValue for $ty {
                fn to_config_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_config_value!(
    str, String, char, bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64,
);

impl ConfigValue for Cow<'_, str> {
    fn to_config_value(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Durations are written as whole seconds.
impl ConfigValue for Duration {
    fn to_config_value(&self) -> Option<String> {
        Some(self.as_secs().to_string())
    }
}

impl<T: ConfigValue> ConfigValue for Option<T> {
    fn to_config_value(&self) -> Option<String> {
        self.as_ref().and_then(ConfigValue::to_config_value)
    }
}

impl<T: ConfigValue + ?Sized> ConfigValue for &T {
    fn to_config_value(&self) -> Option<String> {
        (**self).to_config_value()
    }
}

impl<T: ConfigValue + ?Sized> ConfigValue for Box<T> {
    fn to_config_value(&self) -> Option<String> {
        (**self).to_config_value()
    }
}

impl<T: ConfigValue + ?Sized> ConfigValue for Rc<T> {
    fn to_config_value(&self) -> Option<String> {
        (**self).to_config_value()
    }
}

impl<T: ConfigValue + ?Sized> ConfigValue for Arc<T> {
    fn to_config_value(&self) -> Option<String> {
        (**self).to_config_value()
    }
}

/// JSON scalars are written as their plain text; `null` is absent.
///
/// Arrays of scalars are comma-joined, anything else falls back to compact
/// JSON.
impl ConfigValue for Value {
    fn to_config_value(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(items) if items.iter().all(is_scalar) => Some(
                items
                    .iter()
                    .filter_map(ConfigValue::to_config_value)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => Some(other.to_string()),
        }
    }
}

pub(crate) fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primitives_render_as_text() {
        assert_eq!(42u16.to_config_value().as_deref(), Some("42"));
        assert_eq!(true.to_config_value().as_deref(), Some("true"));
        assert_eq!("x".to_config_value().as_deref(), Some("x"));
        assert_eq!(
            Duration::from_millis(90_500).to_config_value().as_deref(),
            Some("90")
        );
    }

    #[test]
    fn none_is_absent() {
        assert_eq!(None::<&str>.to_config_value(), None);
        assert_eq!(Some(Some(3)).to_config_value().as_deref(), Some("3"));
    }

    #[test]
    fn json_values() {
        assert_eq!(json!(null).to_config_value(), None);
        assert_eq!(json!("s").to_config_value().as_deref(), Some("s"));
        assert_eq!(json!(1.5).to_config_value().as_deref(), Some("1.5"));
        assert_eq!(
            json!(["a", 1, null, true]).to_config_value().as_deref(),
            Some("a,1,true")
        );
        assert_eq!(
            json!({"k": 1}).to_config_value().as_deref(),
            Some(r#"{"k":1}"#)
        );
    }
}
