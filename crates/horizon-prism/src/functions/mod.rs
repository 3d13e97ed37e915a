//! Custom function registry and dispatch.
//!
//! The registry pairs every recognized function name with its handler and
//! compiles the single pattern the scanner matches call sites with. It is
//! an explicit static table: nothing is discovered at runtime, and a
//! registry is injected into each [`Rewriter`] rather than living in
//! process-global state.
//!
//! [`Rewriter`]: crate::rewrite::Rewriter

pub mod color_adjust;
pub mod data_uri;
pub mod math;
pub mod percent;

use std::collections::HashMap;

use regex::Regex;

use crate::options::Options;
use crate::tokens::TokenStore;

/// Shared state a handler can reach during evaluation.
#[derive(Debug)]
pub struct Context<'a> {
    pub options: &'a Options,
    pub tokens: &'a TokenStore,
}

/// A custom function handler.
///
/// Receives the trimmed text between the call's parentheses and returns
/// the replacement text. Handlers never fail; malformed input degrades to
/// a neutral result (`"0"`, `"0%"`, or the input passed through).
pub type HandlerFn = fn(&str, &Context) -> String;

/// The set of recognized custom functions.
///
/// Immutable once built. Name matching in the scanner is case-insensitive,
/// but dispatch lookup is exact: a case-mangled call like `PERCENT(1,4)`
/// matches the pattern, misses the table, and erases to nothing.
#[derive(Debug)]
pub struct FunctionRegistry {
    names: Vec<&'static str>,
    handlers: HashMap<&'static str, HandlerFn>,
    pattern: Regex,
}

impl FunctionRegistry {
    /// Build the standard function set.
    ///
    /// `-` is the minus form of the implicit math call and shares the math
    /// handler; `pc` is shorthand for `percent`.
    pub fn standard() -> Self {
        Self::from_table(&[
            ("-", math::handler as HandlerFn),
            ("math", math::handler),
            ("percent", percent::handler),
            ("pc", percent::handler),
            ("data-uri", data_uri::handler),
            ("hsl-adjust", color_adjust::hsl_adjust),
            ("h-adjust", color_adjust::h_adjust),
            ("s-adjust", color_adjust::s_adjust),
            ("l-adjust", color_adjust::l_adjust),
        ])
    }

    fn from_table(table: &[(&'static str, HandlerFn)]) -> Self {
        let names: Vec<&'static str> = table.iter().map(|(name, _)| *name).collect();
        let handlers: HashMap<&'static str, HandlerFn> = table.iter().copied().collect();

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        // One non-identifier character (or string start), an optional
        // function name, then the opening paren. The optional name group
        // is what makes a bare paren an implicit math call.
        let source = format!(r"(?i)(^|[^a-z0-9_-])({alternation})?\(");
        let pattern = Regex::new(&source).expect("function pattern is valid");

        Self {
            names,
            handlers,
            pattern,
        }
    }

    /// The compiled call-site pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Look up a handler by exact name.
    pub fn handler(&self, name: &str) -> Option<HandlerFn> {
        self.handlers.get(name).copied()
    }

    /// Whether `name` is a recognized function.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, in match order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}
