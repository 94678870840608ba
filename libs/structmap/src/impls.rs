//! `Reflect` for the types the library knows without a derive.

use std::any::Any;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::reflect::{Kind, PtrSlot, Reflect, Scalar, ScalarSlot, SeqSlot, Type, Value, ValueMut};

macro_rules! reflect_numeric {
    (@read F32, $v:expr) => { Scalar::Float($v as f64) };
    (@read F64, $v:expr) => { Scalar::Float($v) };
    (@read $other:ident, $v:expr) => { Scalar::Int($v as i128) };
    ($($t:ty => $kind:ident),* $(,)?) => {$(
        impl Reflect for $t {
            fn type_of() -> Type {
                Type::scalar::<$t>(Kind::$kind)
            }

            fn ty(&self) -> Type {
                <$t as Reflect>::type_of()
            }

            fn value(&self) -> Value<'_> {
                Value::Scalar(reflect_numeric!(@read $kind, *self))
            }

            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Scalar(self)
            }
        }

        impl ScalarSlot for $t {
            fn store(&mut self, value: Scalar<'_>) -> bool {
                match value {
                    Scalar::Int(v) => *self = v as $t,
                    Scalar::Float(v) => *self = v as $t,
                    Scalar::Bool(_) | Scalar::Str(_) => return false,
                }
                true
            }
        }
    )*};
}

reflect_numeric! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

impl Reflect for bool {
    fn type_of() -> Type {
        Type::scalar::<bool>(Kind::Bool)
    }

    fn ty(&self) -> Type {
        <bool as Reflect>::type_of()
    }

    fn value(&self) -> Value<'_> {
        Value::Scalar(Scalar::Bool(*self))
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Scalar(self)
    }
}

impl ScalarSlot for bool {
    fn store(&mut self, value: Scalar<'_>) -> bool {
        match value {
            Scalar::Bool(v) => {
                *self = v;
                true
            }
            _ => false,
        }
    }
}

impl Reflect for String {
    fn type_of() -> Type {
        Type::scalar::<String>(Kind::Str)
    }

    fn ty(&self) -> Type {
        <String as Reflect>::type_of()
    }

    fn value(&self) -> Value<'_> {
        Value::Scalar(Scalar::Str(self))
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Scalar(self)
    }
}

impl ScalarSlot for String {
    fn store(&mut self, value: Scalar<'_>) -> bool {
        match value {
            Scalar::Str(v) => {
                self.clear();
                self.push_str(v);
                true
            }
            _ => false,
        }
    }
}

impl<T: Reflect + Clone> Reflect for Vec<T> {
    fn type_of() -> Type {
        Type::sequence::<Vec<T>, T>()
    }

    fn ty(&self) -> Type {
        <Vec<T> as Reflect>::type_of()
    }

    fn value(&self) -> Value<'_> {
        Value::Seq(self)
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Seq(self)
    }
}

impl<T: Reflect + Clone> SeqSlot for Vec<T> {
    fn store(&mut self, items: &dyn Any) -> bool {
        match items.downcast_ref::<Vec<T>>() {
            Some(items) => {
                self.clone_from(items);
                true
            }
            None => false,
        }
    }
}

impl<T: Reflect + Default> Reflect for Option<T> {
    fn type_of() -> Type {
        Type::pointer::<Option<T>, T>()
    }

    fn ty(&self) -> Type {
        <Option<T> as Reflect>::type_of()
    }

    fn value(&self) -> Value<'_> {
        Value::Ptr(self.as_ref().map(|v| v as &dyn Reflect))
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Ptr(self)
    }
}

impl<T: Reflect + Default> PtrSlot for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }

    fn pointee(&self) -> Type {
        T::type_of()
    }

    fn get_or_default(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }
}

// A box is a pointer that is never absent.
impl<T: Reflect> Reflect for Box<T> {
    fn type_of() -> Type {
        Type::pointer::<Box<T>, T>()
    }

    fn ty(&self) -> Type {
        <Box<T> as Reflect>::type_of()
    }

    fn value(&self) -> Value<'_> {
        Value::Ptr(Some(&**self))
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Ptr(self)
    }
}

impl<T: Reflect> PtrSlot for Box<T> {
    fn is_present(&self) -> bool {
        true
    }

    fn pointee(&self) -> Type {
        T::type_of()
    }

    fn get_or_default(&mut self) -> &mut dyn Reflect {
        &mut **self
    }
}

macro_rules! reflect_opaque {
    ($($t:ty),* $(,)?) => {$(
        impl Reflect for $t {
            fn type_of() -> Type {
                Type::structure::<$t>()
            }

            fn ty(&self) -> Type {
                <$t as Reflect>::type_of()
            }

            fn value(&self) -> Value<'_> {
                Value::Opaque
            }

            fn value_mut(&mut self) -> ValueMut<'_> {
                ValueMut::Opaque
            }
        }
    )*};
}

reflect_opaque! {
    DateTime<Utc>,
    DateTime<FixedOffset>,
    DateTime<Local>,
    NaiveDateTime,
    NaiveDate,
    NaiveTime,
    SystemTime,
}
