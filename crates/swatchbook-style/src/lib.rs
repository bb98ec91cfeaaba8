//! # Swatchbook Style - Utility-Class Resolution
//!
//! `swatchbook-style` turns a component library's utility-class styling (a
//! space-separated micro-DSL of short tokens: `px-2`, `hover:bg-brand`,
//! `w-[32rem]`) into a structured, typed [`StyleDescriptor`].
//!
//! This crate is the styling foundation for the `swatchbook` registry and
//! variant-sheet tooling, but can be used independently by anything that
//! needs to read the class DSL.
//!
//! ## Core Concepts
//!
//! - [`resolve`]: utility-class string → [`StyleDescriptor`], deterministic
//!   and total — unknown tokens are dropped, never errors
//! - [`StyleDescriptor`]: the structured IR; every field optional, absence
//!   means "not specified"
//! - [`SemanticPalette`]: the semantic color table (`brand`, `danger`, …)
//!   loaded once per process from a YAML theme file
//! - [`StateName`]: recognized state prefixes (`hover:`, `disabled:`, …)
//!
//! ## Quick Start
//!
//! ```rust
//! use swatchbook_style::resolve;
//!
//! let descriptor = resolve("h-9 px-4 rounded-md bg-brand hover:bg-brand/90");
//! assert_eq!(descriptor.height, Some(36.0));
//! assert_eq!(descriptor.padding_x, Some(16.0));
//! assert_eq!(descriptor.fill_variable, Some(Some("brand".into())));
//! ```
//!
//! ## Theme Files
//!
//! Semantic colors and the font-size scale come from a YAML theme file,
//! memoized process-wide after first use:
//!
//! ```rust
//! use swatchbook_style::SemanticPalette;
//!
//! let palette = SemanticPalette::from_yaml(r##"
//! colors:
//!   brand:
//!     light: "#2563eb"
//!     dark: "#3b82f6"
//! fontSizes:
//!   xs: 11
//! "##).unwrap();
//! assert!(palette.contains("brand"));
//! ```

mod descriptor;
pub mod palette;
mod resolver;
pub mod scales;

pub use descriptor::{BorderStyle, StateName, StyleDescriptor};
pub use palette::{ColorToken, Rgba, SemanticPalette, ThemeError};
pub use resolver::{resolve, resolve_with, split_states};
