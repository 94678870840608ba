use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Underlying kind of a type, independent of its declared name.
///
/// Numeric kinds are width-specific: `i32` and `i64` are different kinds.
/// A newtype alias has the kind of the type it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    /// Variable-length sequence (`Vec<T>`).
    Seq,
    /// Optional / pointer slot (`Option<T>`, `Box<T>`).
    Ptr,
    /// Aggregate of named fields.
    Struct,
}

impl Kind {
    pub fn is_numeric(self) -> bool {
        self.is_integer() || matches!(self, Kind::F32 | Kind::F64)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Kind::I8
                | Kind::I16
                | Kind::I32
                | Kind::I64
                | Kind::Isize
                | Kind::U8
                | Kind::U16
                | Kind::U32
                | Kind::U64
                | Kind::Usize
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Str => "str",
            Kind::Seq => "seq",
            Kind::Ptr => "ptr",
            Kind::Struct => "struct",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime type descriptor.
///
/// Identity is the Rust `TypeId`: two descriptors are equal iff they
/// describe the same Rust type. Aliases get their own identity but share
/// the kind and element type of what they wrap.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    name: &'static str,
    kind: Kind,
    /// Pointee for `Ptr`, element for `Seq`. Resolved lazily so recursive
    /// types (`struct Node { next: Option<Box<Node>> }`) stay finite.
    elem: Option<fn() -> Type>,
}

impl Type {
    /// Descriptor of `T`.
    pub fn of<T: Reflect>() -> Type {
        T::type_of()
    }

    pub fn scalar<T: 'static>(kind: Kind) -> Type {
        Self::new::<T>(kind, None)
    }

    pub fn structure<T: 'static>() -> Type {
        Self::new::<T>(Kind::Struct, None)
    }

    pub fn sequence<T: 'static, E: Reflect>() -> Type {
        Self::new::<T>(Kind::Seq, Some(E::type_of))
    }

    pub fn pointer<T: 'static, E: Reflect>() -> Type {
        Self::new::<T>(Kind::Ptr, Some(E::type_of))
    }

    /// Named alias `T` over the representation `U`.
    pub fn alias<T: 'static, U: Reflect>() -> Type {
        let target = U::type_of();
        Type {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            kind: target.kind,
            elem: target.elem,
        }
    }

    fn new<T: 'static>(kind: Kind, elem: Option<fn() -> Type>) -> Type {
        Type {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            kind,
            elem,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Element type of a sequence or pointee of a pointer.
    pub fn elem(&self) -> Option<Type> {
        self.elem.map(|f| f())
    }

    /// Type behind every pointer level: `Option<Box<T>>` gives `T`.
    pub fn deref(&self) -> Type {
        let mut ty = *self;
        while let Some(pointee) = ty.pointee() {
            ty = pointee;
        }
        ty
    }

    /// Pointee type, only for `Ptr` kinds.
    pub fn pointee(&self) -> Option<Type> {
        match self.kind {
            Kind::Ptr => self.elem(),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

/// Scalar payload read from a source value.
///
/// Integers travel as `i128` so every primitive width fits without loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(&'a str),
}

/// Read view of a value.
pub enum Value<'a> {
    Scalar(Scalar<'a>),
    /// The backing `Vec<T>`, downcast by the destination slot.
    Seq(&'a dyn Any),
    /// `None` when the optional slot is absent.
    Ptr(Option<&'a dyn Reflect>),
    Struct(&'a dyn Struct),
    /// Composite value that is only ever copied as a whole.
    Opaque,
}

/// Write view of a value.
pub enum ValueMut<'a> {
    Scalar(&'a mut dyn ScalarSlot),
    Seq(&'a mut dyn SeqSlot),
    Ptr(&'a mut dyn PtrSlot),
    Struct(&'a mut dyn Struct),
    Opaque,
}

/// Upcast helper so `dyn Reflect` can reach `dyn Any`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Runtime introspection of a value.
///
/// Implemented by the library for primitives, `String`, `Vec<T>`,
/// `Option<T>`, `Box<T>` and the built-in timestamp types. User structs
/// and newtype aliases get it from `#[derive(Reflect)]`.
pub trait Reflect: AsAny {
    /// Static descriptor of the implementing type.
    fn type_of() -> Type
    where
        Self: Sized;

    /// Descriptor of the concrete type behind `self`.
    fn ty(&self) -> Type;

    fn value(&self) -> Value<'_>;

    fn value_mut(&mut self) -> ValueMut<'_>;
}

/// Named field of a structure.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub name: &'static str,
    pub value: &'a dyn Reflect,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, value: &'a dyn Reflect) -> Self {
        Self { name, value }
    }

    /// An optional slot currently holding nothing.
    pub fn is_absent(&self) -> bool {
        matches!(self.value.value(), Value::Ptr(None))
    }
}

/// Aggregate of named fields.
pub trait Struct {
    /// Fields in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;

    /// Writable field with exactly this name.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;
}

/// Destination slot for a scalar.
pub trait ScalarSlot {
    /// Store `value` cast to the slot's type. Returns `false` if the
    /// scalar family does not fit (text into a number, etc).
    fn store(&mut self, value: Scalar<'_>) -> bool;
}

/// Destination slot for a sequence.
pub trait SeqSlot {
    /// Replace the contents with a clone of `items` when it is a `Vec`
    /// of the same element type.
    fn store(&mut self, items: &dyn Any) -> bool;
}

/// Destination slot for an optional value.
pub trait PtrSlot {
    fn is_present(&self) -> bool;

    /// Type of the value behind the pointer.
    fn pointee(&self) -> Type;

    /// Current pointee, materialized with `Default` when absent.
    fn get_or_default(&mut self) -> &mut dyn Reflect;
}

/// Follow `Ptr` values until a non-pointer is reached.
///
/// Returns `None` if an absent pointer is hit on the way.
pub fn deref_all<'a>(mut value: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
    loop {
        match value.value() {
            Value::Ptr(Some(inner)) => value = inner,
            Value::Ptr(None) => return None,
            _ => return Some(value),
        }
    }
}
