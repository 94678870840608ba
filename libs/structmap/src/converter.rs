use crate::config::ConvertOptions;
use crate::error::ConvertError;
use crate::opaque::OpaqueTypes;
use crate::reflect::{Kind, Reflect, Type, Value, ValueMut, deref_all};
use crate::report::{Report, SkipReason};

/// Structural value mapper.
///
/// Copies every field of the source into the same-named field of the
/// destination when their kinds agree, looking through `Option`/`Box`
/// on both sides and recursing into nested structures.
///
/// Conversion is best-effort: anything that does not fit is skipped and
/// the destination keeps its previous value. Absent source values never
/// overwrite present destination values.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
    opaque: OpaqueTypes,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            opaque: OpaqueTypes::default(),
        }
    }

    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::default()
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn opaque_types(&self) -> &OpaqueTypes {
        &self.opaque
    }

    /// Overlay `src` onto `dst`.
    pub fn convert(&self, src: &dyn Reflect, dst: &mut dyn Reflect) {
        self.convert_with_report(src, dst);
    }

    /// Overlay `src` onto `dst` and describe every skipped field.
    pub fn convert_with_report(&self, src: &dyn Reflect, dst: &mut dyn Reflect) -> Report {
        tracing::debug!(source = src.ty().name(), target = dst.ty().name(), "converting");
        let mut walk = Walk {
            converter: self,
            path: Vec::new(),
            depth: 0,
            report: Report::default(),
        };
        walk.root(src, dst);
        walk.report
    }

    /// Like [`convert`](Self::convert), but fail when anything other than
    /// an absent source value was skipped.
    ///
    /// The destination is still overlaid with whatever did convert.
    pub fn convert_strict(&self, src: &dyn Reflect, dst: &mut dyn Reflect) -> Result<(), ConvertError> {
        self.convert_with_report(src, dst).into_result()
    }

    fn is_structure(&self, ty: &Type) -> bool {
        ty.kind() == Kind::Struct && !self.opaque.contains(ty)
    }

    fn kinds_match(&self, src: Kind, dst: Kind) -> bool {
        src == dst || (self.options.coerce_numeric_fields && src.is_numeric() && dst.is_numeric())
    }

    /// Whether a value of `src` can be assigned into a slot of `dst`.
    fn convertible(&self, src: &Type, dst: &Type) -> bool {
        match (src.kind(), dst.kind()) {
            (s, d) if s.is_numeric() && d.is_numeric() => true,
            (Kind::Bool, Kind::Bool) | (Kind::Str, Kind::Str) => true,
            (Kind::Seq, Kind::Seq) => src.elem() == dst.elem(),
            (Kind::Struct, Kind::Struct) => src == dst && self.opaque.contains(src),
            _ => false,
        }
    }
}

/// Builder for [`Converter`].
#[derive(Debug, Default)]
pub struct ConverterBuilder {
    options: ConvertOptions,
    opaque: OpaqueTypes,
}

impl ConverterBuilder {
    pub fn options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    pub fn coerce_numeric_fields(mut self, yes: bool) -> Self {
        self.options.coerce_numeric_fields = yes;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }

    /// Treat `T` as an opaque value: copied whole, never merged field by field.
    pub fn opaque<T: Reflect + Clone>(mut self) -> Self {
        self.opaque.insert::<T>();
        self
    }

    pub fn build(self) -> Converter {
        Converter {
            options: self.options,
            opaque: self.opaque,
        }
    }
}

/// State of one `convert` call.
struct Walk<'c> {
    converter: &'c Converter,
    path: Vec<&'static str>,
    depth: usize,
    report: Report,
}

impl Walk<'_> {
    fn root(&mut self, src: &dyn Reflect, dst: &mut dyn Reflect) {
        match deref_all(src) {
            Some(src) => self.root_target(src, dst),
            None => self.skip(SkipReason::Absent),
        }
    }

    fn root_target(&mut self, src: &dyn Reflect, dst: &mut dyn Reflect) {
        let src_ty = src.ty();
        let target = dst.ty().deref();

        if self.converter.is_structure(&target) {
            if self.converter.is_structure(&src_ty) {
                self.write(src, dst, Self::structure);
            } else {
                self.skip(SkipReason::KindMismatch {
                    source: src_ty.kind(),
                    target: target.kind(),
                });
            }
        } else if self.converter.convertible(&src_ty, &target) {
            self.write(src, dst, Self::assign);
        } else {
            self.skip(inconvertible(&src_ty, &target));
        }
    }

    fn structure(&mut self, src: &dyn Reflect, dst: &mut dyn Reflect) {
        let (src_ty, dst_ty) = (src.ty(), dst.ty());
        let (Value::Struct(source), ValueMut::Struct(target)) = (src.value(), dst.value_mut()) else {
            self.skip(SkipReason::KindMismatch {
                source: src_ty.kind(),
                target: dst_ty.kind(),
            });
            return;
        };

        self.depth += 1;
        if let Some(max) = self.converter.options.max_depth {
            if self.depth > max {
                panic!("structure nesting at `{}` exceeds max_depth {max}", self.path());
            }
        }

        for field in source.fields() {
            self.path.push(field.name);
            if field.is_absent() {
                self.skip(SkipReason::Absent);
            } else if let Some(slot) = target.field_mut(field.name) {
                self.field(field.value, slot);
            } else {
                self.skip(SkipReason::Unmatched);
            }
            self.path.pop();
        }

        self.depth -= 1;
    }

    fn field(&mut self, src: &dyn Reflect, dst: &mut dyn Reflect) {
        let Some(src) = deref_all(src) else {
            self.skip(SkipReason::Absent);
            return;
        };
        let src_ty = src.ty();
        let target = dst.ty().deref();

        if !self.converter.kinds_match(src_ty.kind(), target.kind()) {
            self.skip(SkipReason::KindMismatch {
                source: src_ty.kind(),
                target: target.kind(),
            });
            return;
        }

        if self.converter.is_structure(&src_ty) && self.converter.is_structure(&target) {
            self.write(src, dst, Self::structure);
            return;
        }

        if !self.converter.convertible(&src_ty, &target) {
            self.skip(inconvertible(&src_ty, &target));
            return;
        }
        self.write(src, dst, Self::assign);
    }

    /// Run `op` on `dst` behind any pointers, materializing absent ones.
    fn write(
        &mut self,
        src: &dyn Reflect,
        dst: &mut dyn Reflect,
        op: fn(&mut Self, &dyn Reflect, &mut dyn Reflect),
    ) {
        if let ValueMut::Ptr(slot) = dst.value_mut() {
            self.write(src, slot.get_or_default(), op);
            return;
        }
        op(self, src, dst);
    }

    fn assign(&mut self, src: &dyn Reflect, dst: &mut dyn Reflect) {
        let src_ty = src.ty();
        let dst_ty = dst.ty();

        let stored = match self.converter.opaque.cloner(&src_ty) {
            Some(clone) => clone(src.as_any(), dst.as_any_mut()),
            None => match (src.value(), dst.value_mut()) {
                (Value::Scalar(value), ValueMut::Scalar(slot)) => slot.store(value),
                (Value::Seq(items), ValueMut::Seq(slot)) => slot.store(items),
                _ => false,
            },
        };

        if !stored {
            self.skip(inconvertible(&src_ty, &dst_ty));
        }
    }

    fn path(&self) -> String {
        let mut path = String::from("$");
        for segment in &self.path {
            path.push('.');
            path.push_str(segment);
        }
        path
    }

    fn skip(&mut self, reason: SkipReason) {
        let path = self.path();
        tracing::trace!(path = %path, reason = %reason, "field skipped");
        self.report.push(path, reason);
    }
}

fn inconvertible(src: &Type, dst: &Type) -> SkipReason {
    SkipReason::Inconvertible {
        source: src.name(),
        target: dst.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_are_convertible() {
        let conv = Converter::default();
        assert!(conv.convertible(&Type::of::<i32>(), &Type::of::<i64>()));
        assert!(conv.convertible(&Type::of::<f32>(), &Type::of::<u8>()));
        assert!(!conv.convertible(&Type::of::<String>(), &Type::of::<i64>()));
        assert!(!conv.convertible(&Type::of::<bool>(), &Type::of::<u8>()));
    }

    #[test]
    fn sequences_need_identical_elements() {
        let conv = Converter::default();
        assert!(conv.convertible(&Type::of::<Vec<String>>(), &Type::of::<Vec<String>>()));
        assert!(!conv.convertible(&Type::of::<Vec<u32>>(), &Type::of::<Vec<u64>>()));
    }

    #[test]
    fn field_kinds_are_exact_unless_coercing() {
        assert!(!Converter::default().kinds_match(Kind::I32, Kind::I64));
        let coercing = Converter::builder().coerce_numeric_fields(true).build();
        assert!(coercing.kinds_match(Kind::I32, Kind::I64));
        assert!(!coercing.kinds_match(Kind::Str, Kind::I64));
    }

    #[test]
    fn root_scalars_coerce() {
        let mut dst = 0i64;
        Converter::default().convert(&100i32, &mut dst);
        assert_eq!(dst, 100);

        let report = Converter::default().convert_with_report(&"100".to_string(), &mut dst);
        assert_eq!(dst, 100);
        assert!(matches!(report.get("$"), Some(SkipReason::Inconvertible { .. })));
    }

    #[test]
    fn absent_root_pointer_is_promoted_when_convertible() {
        let mut dst: Option<i64> = None;
        Converter::default().convert(&Some(Box::new(9u8)), &mut dst);
        assert_eq!(dst, Some(9));

        let mut untouched: Option<bool> = None;
        Converter::default().convert(&9u8, &mut untouched);
        assert_eq!(untouched, None);
    }

    #[test]
    fn absent_root_source_converts_nothing() {
        let mut dst = 3i64;
        let report = Converter::default().convert_with_report(&None::<i64>, &mut dst);
        assert_eq!(dst, 3);
        assert_eq!(report.get("$"), Some(&SkipReason::Absent));
    }
}
