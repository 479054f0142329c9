//! # Pagecraft Style Precompiler
//!
//! Turns a component's `style` map into a deterministic presentation class
//! string, and decorates whole trees with it before export or preview.
//!
//! ```rust,ignore
//! use pagecraft_compiler_css::{compile_style, StylePrecompiler};
//!
//! let classes = compile_style(&component.style); // "flex p-[16px]"
//!
//! let mut compiler = StylePrecompiler::new();
//! let decorated = compiler.precompile(&components);
//! ```

mod minify;
mod precompiler;
mod utilities;

pub use minify::{minify_css_value, normalize_property};
pub use precompiler::{compile_style, style_hash, StylePrecompiler};
pub use utilities::utility_class;
