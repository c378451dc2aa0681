//! Translation layer.
//!
//! Owns route templates and the pure translator that reshapes documents between
//! the broker and REST domains. Nothing in this layer performs I/O or holds
//! state, so it is freely shared by every publish worker and the subscribe
//! dispatcher.

pub(crate) mod template;
pub(crate) mod translator;

pub use template::{
    ShapeKind, Template, TemplateSpec, DEFAULT_READINGS_FIELD, DEFAULT_VALUE_FIELD,
    VALUE_PLACEHOLDER,
};
pub use translator::{translate, Source};
