//! HTML document wrapping and publication output for pubmd.

mod builder;
mod style;
mod template;

pub use builder::{
    BuildConfig, BuildError, BuildReport, PublicationBuilder, RenderedVariant, Variant,
    WrittenOutput,
};
pub use template::{WrapOptions, wrap};
