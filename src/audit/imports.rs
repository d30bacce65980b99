//! Pattern-based import extraction.
//!
//! No parser is involved: four independent regex classes are matched over the raw
//! source text and their hits unioned. This is best effort. Anything the patterns
//! cannot see (computed specifiers, `require` of variables) is surfaced separately by
//! [`has_dynamic_usage`] so callers can refuse to act on it.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // import x from "a"; import { a, b } from 'b'; import * as ns from "c"; import type { T } from "d"
    static ref STATIC_IMPORT: Regex =
        Regex::new(r#"\bimport\s+(?:type\s+)?[\w*\s{},$]*?\s*from\s*["']([^"'\n]+)["']"#).unwrap();
    // import "./globals.css";
    static ref SIDE_EFFECT_IMPORT: Regex =
        Regex::new(r#"\bimport\s*["']([^"'\n]+)["']"#).unwrap();
    // export { a } from "x"; export * from "y"; export * as ns from "z"
    static ref RE_EXPORT: Regex = Regex::new(
        r#"\bexport\s+(?:type\s+)?(?:\*(?:\s+as\s+[\w$]+)?|\{[^}]*\})\s*from\s*["']([^"'\n]+)["']"#
    ).unwrap();
    // import("./x"), import('./x'), import(`./x`) without interpolation
    static ref DYNAMIC_LITERAL_IMPORT: Regex = Regex::new(
        r#"\bimport\s*\(\s*(?:"([^"\n]+)"|'([^'\n]+)'|`([^`$\n]+)`)\s*[,)]"#
    ).unwrap();
    // dynamic(() => import("./Map")), lazy(async () => import('./Chart'))
    static ref LAZY_WRAPPER_IMPORT: Regex = Regex::new(
        r#"\b(?:dynamic|lazy)\s*\(\s*(?:async\s*)?\(\s*\)\s*=>\s*(?:\{\s*return\s+)?import\s*\(\s*["'`]([^"'`$\n]+)["'`]"#
    ).unwrap();

    // import( followed by anything that does not open a plain string literal.
    // Backtick templates are included on purpose, even without interpolation.
    static ref DYNAMIC_NON_LITERAL: Regex = Regex::new(r#"\bimport\s*\(\s*[^'"\s)]"#).unwrap();
    static ref REQUIRE_NON_LITERAL: Regex = Regex::new(r#"\brequire\s*\(\s*[^'"\s)]"#).unwrap();
}

/// Extracts every import specifier the patterns can see.
///
/// Duplicates are kept; the graph builder stores edges as a set.
pub fn extract_imports(content: &str) -> Vec<String> {
    let mut imports = Vec::new();

    for pattern in [&*STATIC_IMPORT, &*SIDE_EFFECT_IMPORT, &*RE_EXPORT, &*LAZY_WRAPPER_IMPORT] {
        for caps in pattern.captures_iter(content) {
            if let Some(m) = caps.get(1) {
                imports.push(m.as_str().trim().to_string());
            }
        }
    }

    for caps in DYNAMIC_LITERAL_IMPORT.captures_iter(content) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)) {
            imports.push(m.as_str().trim().to_string());
        }
    }

    imports
}

/// True when the file contains an `import(...)` or `require(...)` call whose first
/// argument is not a plain string literal.
///
/// Heuristic and biased towards over-flagging: a match in a comment still counts.
pub fn has_dynamic_usage(content: &str) -> bool {
    DYNAMIC_NON_LITERAL.is_match(content) || REQUIRE_NON_LITERAL.is_match(content)
}
