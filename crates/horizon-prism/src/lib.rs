//! Custom-function expression engine for CSS property values.
//!
//! Property values can carry a small set of custom functions that resolve
//! at preprocessing time:
//!
//! - **`math(...)`** and bare parenthesised expressions: safe arithmetic
//!   over `+ - * /` with standard precedence
//! - **`percent(...)`** / **`pc(...)`**: ratios as percentage strings,
//!   computed in fixed-point decimal
//! - **`hsl-adjust` / `h-adjust` / `s-adjust` / `l-adjust`**: bounded
//!   hue/saturation/lightness shifts on hex, `rgb()`, `rgba()`, and
//!   keyword colors
//! - **`data-uri(...)`**: local assets inlined as base64 data URIs
//!
//! Calls nest arbitrarily and resolve innermost first, using string
//! offsets alone. One bad call never fails a value: every error path
//! degrades to a conservative textual fallback.
//!
//! # Example
//!
//! ```
//! use horizon_prism::prelude::*;
//!
//! let rewriter = Rewriter::new(Options::default());
//! assert_eq!(rewriter.rewrite("width: percent(1, 4)"), "width: 25%");
//! assert_eq!(rewriter.rewrite("margin: (2+3)px auto"), "margin: 5px auto");
//! ```

pub mod functions;
pub mod options;
pub mod rewrite;
pub mod split;
pub mod tokens;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::functions::{Context, FunctionRegistry, HandlerFn};
    pub use crate::options::Options;
    pub use crate::rewrite::Rewriter;
    pub use crate::tokens::TokenStore;
}
