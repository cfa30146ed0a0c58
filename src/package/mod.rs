//! Package output: naming, manifest, layout, and writing.
mod manifest;
mod naming;
mod paths;
mod write;

pub use naming::{package_name, source_stem};
pub use write::{write_package, WrittenPackage};
