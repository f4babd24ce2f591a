//! The [`Mappable`] capability.

use std::rc::Rc;
use std::sync::Arc;

use crate::Mapping;

/// An object that can describe itself as a configuration fragment.
///
/// Implementations expose their own, unprefixed properties. The parent
/// decides where they land by merging the result under a namespace.
///
/// `as_configuration` must be a pure projection of the current state:
/// calling it twice on an unchanged value yields equal mappings.
///
/// # Example
///
/// ```
/// use confmap_core::{Mappable, Mapping};
///
/// struct Pool {
///     size: u32,
///     idle_timeout: Option<u64>,
/// }
///
/// impl Mappable for Pool {
///     fn as_configuration(&self) -> Mapping {
///         let mut config = Mapping::new();
///         config
///             .put("size", self.size)
///             .put("idle.timeout", self.idle_timeout);
///         config
///     }
/// }
///
/// let mut config = Mapping::prefixed("db");
/// config.put_mappable("pool", &Pool { size: 4, idle_timeout: None });
/// assert_eq!(config.serialize(), "db.pool.size=4");
/// ```
pub trait Mappable {
    /// Projects this object to a configuration mapping.
    fn as_configuration(&self) -> Mapping;
}

impl Mappable for Mapping {
    fn as_configuration(&self) -> Mapping {
        self.clone()
    }
}

/// An absent object contributes nothing.
impl<T: Mappable> Mappable for Option<T> {
    fn as_configuration(&self) -> Mapping {
        self.as_ref()
            .map(Mappable::as_configuration)
            .unwrap_or_default()
    }
}

impl<T: Mappable + ?Sized> Mappable for &T {
    fn as_configuration(&self) -> Mapping {
        (**self).as_configuration()
    }
}

impl<T: Mappable + ?Sized> Mappable for Box<T> {
    fn as_configuration(&self) -> Mapping {
        (**self).as_configuration()
    }
}

impl<T: Mappable + ?Sized> Mappable for Rc<T> {
    fn as_configuration(&self) -> Mapping {
        (**self).as_configuration()
    }
}

impl<T: Mappable + ?Sized> Mappable for Arc<T> {
    fn as_configuration(&self) -> Mapping {
        (**self).as_configuration()
    }
}
