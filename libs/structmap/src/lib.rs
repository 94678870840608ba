//! Structural value mapper.
//!
//! Copies data between differently shaped types wherever they share a field
//! name: API models with optional fields into entity models with plain
//! fields, newtype ids into bare strings, `i32` into `i64`, and back.
//!
//! ```
//! use structmap::Reflect;
//!
//! #[derive(Reflect, Default)]
//! struct Template {
//!     id: Option<i64>,
//!     name: Option<String>,
//!     owner_type: Option<String>,
//! }
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct TemplateEntity {
//!     id: i64,
//!     name: String,
//!     owner_type: Option<i64>,
//! }
//!
//! let src = Template { id: Some(22), name: None, owner_type: Some("user".into()) };
//! let mut dst = TemplateEntity { id: 0, name: "kept".into(), owner_type: None };
//! structmap::convert(&src, &mut dst);
//!
//! // `name` is absent in the source and `owner_type` does not fit: both untouched.
//! assert_eq!(dst, TemplateEntity { id: 22, name: "kept".into(), owner_type: None });
//! ```
//!
//! The destination must be a mutable reference; anything else is rejected
//! at compile time:
//!
//! ```compile_fail
//! let src = 1i64;
//! let dst = 0i64;
//! structmap::convert(&src, dst);
//! ```
//!
//! Rules, in short:
//! - fields correlate by exact name, regardless of declared type;
//! - `Option`/`Box` are looked through on both sides; absent destination
//!   options are filled with `Default` when something is written into them;
//! - an absent source option never overwrites the destination;
//! - nested structures merge recursively, timestamps and other
//!   [opaque](opaque::OpaqueTypes) types are copied whole;
//! - anything that does not fit is skipped silently.
//!   [`Converter::convert_with_report`] tells what was skipped and
//!   [`Converter::convert_strict`] turns skips into an error.

extern crate self as structmap;

pub mod config;
pub mod converter;
pub mod error;
mod impls;
pub mod opaque;
pub mod reflect;
pub mod report;

use std::sync::LazyLock;

pub use config::ConvertOptions;
pub use converter::{Converter, ConverterBuilder};
pub use error::ConvertError;
pub use opaque::OpaqueTypes;
pub use reflect::{Field, Kind, Reflect, Scalar, Struct, Type, Value, ValueMut};
pub use report::{Report, SkipReason, Skipped};
pub use structmap_derive::Reflect;

static DEFAULT: LazyLock<Converter> = LazyLock::new(Converter::default);

/// Overlay `src` onto `dst` with the default [`Converter`].
pub fn convert(src: &dyn Reflect, dst: &mut dyn Reflect) {
    DEFAULT.convert(src, dst);
}
