use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::reflect::{Reflect, Type};

/// Copies a value of one concrete type into a slot of the same type.
pub(crate) type Cloner = fn(&dyn Any, &mut dyn Any) -> bool;

/// Structure types that are never decomposed field by field.
///
/// A timestamp is a struct on the inside, but merging its internals field
/// by field makes no sense, so it is copied as a whole, like a scalar.
/// Only identical types convert into each other.
///
/// Built in:
/// - `chrono::DateTime<Utc | FixedOffset | Local>`
/// - `chrono::NaiveDateTime`, `NaiveDate`, `NaiveTime`
/// - `std::time::SystemTime`
#[derive(Clone)]
pub struct OpaqueTypes {
    cloners: HashMap<TypeId, Cloner>,
}

impl OpaqueTypes {
    /// Register `T` as opaque.
    pub fn insert<T: Reflect + Clone>(&mut self) {
        self.cloners.insert(TypeId::of::<T>(), clone_into::<T>);
    }

    pub fn contains(&self, ty: &Type) -> bool {
        self.cloners.contains_key(&ty.id())
    }

    pub fn len(&self) -> usize {
        self.cloners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cloners.is_empty()
    }

    pub(crate) fn cloner(&self, ty: &Type) -> Option<Cloner> {
        self.cloners.get(&ty.id()).copied()
    }
}

impl Default for OpaqueTypes {
    fn default() -> Self {
        let mut types = Self {
            cloners: HashMap::new(),
        };
        types.insert::<DateTime<Utc>>();
        types.insert::<DateTime<FixedOffset>>();
        types.insert::<DateTime<Local>>();
        types.insert::<NaiveDateTime>();
        types.insert::<NaiveDate>();
        types.insert::<NaiveTime>();
        types.insert::<SystemTime>();
        types
    }
}

impl std::fmt::Debug for OpaqueTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpaqueTypes")
            .field("len", &self.cloners.len())
            .finish()
    }
}

fn clone_into<T: Clone + 'static>(src: &dyn Any, dst: &mut dyn Any) -> bool {
    match (src.downcast_ref::<T>(), dst.downcast_mut::<T>()) {
        (Some(src), Some(dst)) => {
            dst.clone_from(src);
            true
        }
        _ => false,
    }
}
