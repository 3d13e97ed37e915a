//! Asset inlining as base64 data URIs.

use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::functions::Context;

/// Extensions eligible for inlining, with their MIME types.
const MIME_TYPES: &[(&str, &str)] = &[
    ("woff", "font/woff;charset=utf-8"),
    ("ttf", "font/truetype;charset=utf-8"),
    ("svg", "image/svg+xml"),
    ("svgz", "image/svg+xml"),
    ("gif", "image/gif"),
    ("jpeg", "image/jpg"),
    ("jpg", "image/jpg"),
    ("png", "image/png"),
];

/// Data URIs longer than this trip the legacy browser size warning.
const SIZE_WARN_LIMIT: usize = 32000;

/// The `data-uri()` handler.
///
/// Resolves the referenced file against the configured paths and embeds
/// its contents as a base64 data URI. Remote URLs, missing files,
/// unreadable files, and unlisted extensions all pass through as a plain
/// `url(...)` reference instead.
pub fn handler(input: &str, context: &Context) -> String {
    // The argument is usually a string token minted earlier in the
    // pipeline; resolve it back to its literal text first.
    let input = if context.tokens.is_token(input) {
        context.tokens.resolve(input)
    } else {
        input.to_string()
    };

    let fallback = format!("url({input})");

    // No inlining across network boundaries
    if input.starts_with("http://") || input.starts_with("https://") {
        return fallback;
    }

    let file = resolve_path(&input, context);
    if !file.exists() {
        debug!(path = %file.display(), "asset not found, reference passed through");
        return fallback;
    }

    let Some(mime) = mime_for(&file) else {
        debug!(path = %file.display(), "extension not eligible for inlining");
        return fallback;
    };

    match inline_file(&file, mime) {
        Ok(uri) => format!("url({uri})"),
        Err(error) => {
            debug!(%error, "asset read failed, reference passed through");
            fallback
        }
    }
}

/// Absolute references resolve under the document root, relative ones
/// under the base directory.
fn resolve_path(input: &str, context: &Context) -> PathBuf {
    if let Some(rooted) = input.strip_prefix('/') {
        context.options.doc_root.join(rooted)
    } else {
        context.options.base_dir.join(input)
    }
}

fn mime_for(file: &Path) -> Option<&'static str> {
    // The suffix after the last dot decides the type, dotfiles included.
    let name = file.file_name()?.to_str()?;
    let (_, suffix) = name.rsplit_once('.')?;
    MIME_TYPES
        .iter()
        .find(|(candidate, _)| *candidate == suffix)
        .map(|(_, mime)| *mime)
}

fn inline_file(file: &Path, mime: &str) -> Result<String> {
    let bytes = fs::read(file).map_err(|source| Error::io(file, source))?;
    let uri = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
    if uri.len() > SIZE_WARN_LIMIT {
        warn!(
            path = %file.display(),
            size = uri.len(),
            "data URI exceeds the legacy browser ceiling"
        );
    }
    Ok(uri)
}
