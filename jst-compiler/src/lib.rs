//! # jst-compiler
//!
//! Template-to-source compilation for JST builds.
//!
//! - [`TemplateCompiler`] — capability turning template text into function
//!   source; [`LodashCompiler`] reproduces lodash 2.4 `_.template` output.
//! - [`FragmentParser`] — capability finding named template regions in one
//!   document; [`ScriptTagParser`] handles `<script type="text/template">`.
//! - [`compile_template`] — the adapter the build calls, applying prettify.
//!
//! ## Usage
//!
//! ```rust
//! use jst_compiler::{compile_template, LodashCompiler};
//! use jst_core::TemplateSettings;
//!
//! let source = compile_template(
//!     &LodashCompiler,
//!     "<p><%- name %></p>",
//!     &TemplateSettings::default(),
//!     false,
//! )
//! .expect("valid template");
//! assert!(source.starts_with("function(obj) {"));
//! ```

pub mod adapter;
pub mod engine;
pub mod error;
pub mod fragments;
pub mod syntax;

pub use adapter::compile_template;
pub use engine::{LodashCompiler, TemplateCompiler};
pub use error::CompileError;
pub use fragments::{extract, FragmentParser, Region, ScriptTagParser, TemplateFragment};
