//! Caller tags.
//!
//! A tag names the call site that produced a line: `"<ident>:<line>"`. The
//! source file and line are captured where the call is written, either by
//! the crate's macros (`file!()` + `line!()`) or by `#[track_caller]`
//! methods on [`crate::Logger`] (`Location::caller()`). Nothing inspects the
//! stack at run time. Both paths render the file as the same module-style
//! identifier, e.g. `crates/app-core/src/db/pool.rs` becomes
//! `app_core::db::pool`.
//!
//! With left justification enabled every tag is right-aligned to the widest
//! tag seen so far, so messages line up in one column. The width only grows.

use std::panic::Location;

/// Identity of the code that issued a log call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Sentinel used when no caller identity is available.
    pub const UNKNOWN: CallSite = CallSite { file: "unknown", line: 0 };

    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Call site of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    #[inline]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(loc: &'static Location<'static>) -> Self {
        Self { file: loc.file(), line: loc.line() }
    }

    /// Module-style identifier of the source file.
    pub fn ident(&self) -> String {
        module_ident(self.file)
    }

    /// Unpadded tag. The line number is left-aligned in three columns so
    /// messages from nearby lines of one caller start at the same offset.
    pub fn raw_tag(&self) -> String {
        format!("{}:{:<3}", self.ident(), self.line)
    }
}

/// Turn a source path into a `crate::module` identifier.
///
/// The directory above the last `src` names the crate (`-` becomes `_`);
/// `lib`, `main` and `mod` file stems name their parent module. Files under
/// `tests`, `benches` or `examples` are their own crate. Anything else keeps
/// its file stem, and strings that are not paths pass through unchanged.
pub fn module_ident(file: &str) -> String {
    let normalized = file.replace('\\', "/");
    let trimmed = normalized.strip_suffix(".rs").unwrap_or(&normalized);
    let parts: Vec<&str> = trimmed.split('/').filter(|p| !p.is_empty() && *p != ".").collect();

    let mut ident: Vec<String> = Vec::new();
    if let Some(src) = parts.iter().rposition(|p| *p == "src") {
        if src > 0 {
            ident.push(parts[src - 1].replace('-', "_"));
        }
        ident.extend(parts[src + 1..].iter().map(|p| p.to_string()));
    } else if let Some(root) = parts.iter().rposition(|p| matches!(*p, "tests" | "benches" | "examples")) {
        ident.extend(parts[root + 1..].iter().map(|p| p.to_string()));
    } else if let Some(last) = parts.last() {
        ident.push(last.to_string());
    }

    if ident.len() > 1 && matches!(ident.last().map(String::as_str), Some("lib" | "main" | "mod")) {
        ident.pop();
    }
    if ident.is_empty() {
        return parts.last().map_or_else(|| file.to_string(), |p| p.to_string());
    }
    ident.join("::")
}

/// Process-wide tag column width.
#[derive(Debug, Default)]
pub struct TagColumn {
    width: usize,
}

impl TagColumn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widest tag seen so far.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Widen the column to fit `raw` and return it right-aligned to the
    /// column, or `raw` unchanged when `left_justify` is off.
    pub fn justify(&mut self, raw: &str, left_justify: bool) -> String {
        if !left_justify {
            return raw.to_string();
        }
        let len = raw.chars().count();
        self.width = self.width.max(len);
        format!("{raw:>width$}", width = self.width)
    }

    /// Tag for `site`, or for [`CallSite::UNKNOWN`] when absent.
    pub fn derive(&mut self, site: Option<&CallSite>, left_justify: bool) -> String {
        let site = site.unwrap_or(&CallSite::UNKNOWN);
        self.justify(&site.raw_tag(), left_justify)
    }
}
