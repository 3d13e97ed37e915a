//! Call scanning and rewriting.
//!
//! [`Rewriter::rewrite`] is the engine's entry point: it finds every
//! custom-function call in a property value, evaluates them innermost
//! first, and splices the results back into the string. Evaluation order
//! falls out of the offsets alone; there is no syntax tree.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::functions::{Context, FunctionRegistry};
use crate::options::Options;
use crate::tokens::TokenStore;

/// One call-site match against the normalized value string.
struct CallSite {
    start: usize,
    lead_len: usize,
    raw_name: Option<String>,
}

/// Rewrites custom-function calls inside CSS property values.
///
/// Holds the function registry, the path options handlers resolve assets
/// against, and the token store for de-referencing string literals.
/// `rewrite` takes `&self`, so one rewriter can serve a whole stylesheet
/// pass.
pub struct Rewriter {
    registry: FunctionRegistry,
    options: Options,
    tokens: TokenStore,
}

impl Rewriter {
    /// Create a rewriter with the standard function set.
    pub fn new(options: Options) -> Self {
        Self::with_registry(FunctionRegistry::standard(), options)
    }

    /// Create a rewriter with a custom registry.
    pub fn with_registry(registry: FunctionRegistry, options: Options) -> Self {
        Self {
            registry,
            options,
            tokens: TokenStore::new(),
        }
    }

    /// The token store handlers de-reference string literals through.
    ///
    /// Clone the handle into whatever stage tokenizes string literals
    /// before values reach `rewrite`.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// The registry this rewriter dispatches against.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Resolve every custom-function call in `value`.
    ///
    /// Never fails: unknown names erase to nothing, unbalanced calls are
    /// left in place, and handler-level problems degrade to neutral
    /// output. Values without any recognized call come back unchanged.
    pub fn rewrite(&self, value: &str) -> String {
        // Fast paths: nothing bracketed, or nothing that looks like a call.
        if !value.contains('(') {
            return value.to_string();
        }
        if !self.registry.pattern().is_match(value) {
            return value.to_string();
        }

        // The pattern needs one character between an opening paren and a
        // nested call for back-to-back matches to land; pad every tight
        // paren with a space and undo it at the end.
        let padded = spacing_pattern().replace_all(value, "( $1");
        let had_padding = matches!(padded, Cow::Owned(_));
        let mut text = padded.into_owned();

        let sites: Vec<CallSite> = self
            .registry
            .pattern()
            .captures_iter(&text)
            .map(|caps| {
                let overall = caps.get(0).unwrap();
                CallSite {
                    start: overall.start(),
                    lead_len: caps.get(1).map_or(0, |lead| lead.len()),
                    raw_name: caps.get(2).map(|name| name.as_str().to_string()),
                }
            })
            .collect();

        let context = Context {
            options: &self.options,
            tokens: &self.tokens,
        };

        // Rightmost first: the offsets were captured once against the
        // padded string, and a splice must never move text that sits left
        // of a still-pending match. Inner calls always start later than
        // the call enclosing them, so this is also innermost first.
        for site in sites.iter().rev() {
            let Some(relative_open) = text[site.start..].find('(') else {
                continue;
            };
            let open = site.start + relative_open;

            let Some(close) = matching_close_paren(&text, open) else {
                debug!(offset = site.start, "unbalanced call skipped");
                continue;
            };

            let raw_name = site.raw_name.as_deref().unwrap_or("");
            let minus_form = raw_name == "-";
            let name = if raw_name.is_empty() || minus_form {
                "math"
            } else {
                raw_name
            };

            let content = text[open + 1..close].trim();
            let result = match self.registry.handler(name) {
                Some(handler) => handler(content, &context),
                None => {
                    // Case-mangled or unregistered name: erase the call.
                    debug!(name, "unknown function erased");
                    String::new()
                }
            };

            // The minus form consumed a literal '-' as its name; put it
            // back in front of the result.
            let splice_start = site.start + site.lead_len;
            let replacement = if minus_form {
                format!("-{result}")
            } else {
                result
            };
            text.replace_range(splice_start..close + 1, &replacement);
        }

        if had_padding {
            text = text.replace("( ", "(");
        }
        text
    }
}

/// Balance scan: walk from `open`, counting paren depth, and return the
/// position where it returns to zero.
fn matching_close_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0u32;
    for (index, &byte) in text.as_bytes().iter().enumerate().skip(open) {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn spacing_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([^\s])").expect("valid pattern"))
}
