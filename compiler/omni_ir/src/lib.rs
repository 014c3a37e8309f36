//! Core data types shared by every OmniProps crate.
//!
//! - [`Span`] and [`LineOffsetTable`]: source locations
//! - [`Kind`] and [`Value`]: the typed value model
//! - [`Object`] and [`ObjectRef`]: opaque handles to constructed objects
//! - [`ast`]: statements and expressions produced by the parser

pub mod ast;
mod kind;
mod line_table;
mod map;
mod object;
mod span;
mod value;

pub use kind::Kind;
pub use line_table::LineOffsetTable;
pub use map::PropertyMap;
pub use object::{eq_as, AsAny, Object, ObjectRef, RunError, Runnable, Source};
pub use span::Span;
pub use value::{ArrayValue, Value};
