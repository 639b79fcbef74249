//! Query-string to typed filter binding

mod binder;
mod spec;

pub use binder::{BindError, FilterObject, FilterValue, QueryParams, bind};
pub use spec::{FieldKind, FieldSpec, FilterSpec, FilterSpecError};
