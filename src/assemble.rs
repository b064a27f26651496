//! Page document assembly.
//!
//! Turns one route of the application into a complete static HTML document:
//! 1. Template selection (per-page override or project default)
//! 2. Context rendering (tera)
//! 3. Runtime bootstrap script injection (routerBase / publicPath globals)
//! 4. Bundle reference injection (CSS and JS tags)
//! 5. Extension hooks and optional minification
//!
//! Assembly is synchronous and stateless; the only I/O is reading the
//! selected template file.

mod assembler;
mod inject;
mod paths;
mod script;
mod template;

pub use assembler::{AssembleError, Assembler, PageRequest};
pub use template::TemplatePaths;
