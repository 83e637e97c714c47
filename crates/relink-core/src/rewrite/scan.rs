//! Import site scanner.
//!
//! Finds the string-literal specifiers of static imports, re-exports with
//! a source clause, and dynamic `import()` calls without fully parsing the
//! source. Comments and unrelated string literals are skipped; a dynamic
//! import whose argument is not a string literal is never reported, so it
//! passes through the rewrite untouched.

use std::ops::Range;

/// Kind of import site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// Static import declaration (including side-effect imports).
    Import,
    /// Re-export declaration with a source clause.
    ExportFrom,
    /// `import(...)` call with a string-literal argument.
    DynamicImport,
}

/// One string-literal import location found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    /// Kind of site.
    pub kind: ImportKind,
    /// Specifier exactly as written (quotes excluded).
    pub specifier: String,
    /// Byte range of the literal's contents within the source.
    pub span: Range<usize>,
    /// Line number (1-indexed).
    pub line: u32,
}

/// Scan source text for import sites, in source order.
///
/// Every occurrence is reported, duplicates included: each one is a
/// separate rewrite location.
#[must_use]
pub fn scan_imports(source: &str) -> Vec<ImportSite> {
    let bytes = source.as_bytes();
    let mut sites = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = skip_line_comment(bytes, i);
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = skip_block_comment(bytes, i);
        } else if b == b'"' || b == b'\'' || b == b'`' {
            i = skip_string(bytes, i);
        } else if keyword_at(bytes, i, b"import") {
            let j = skip_whitespace(bytes, i + 6);
            if bytes.get(j) == Some(&b'(') {
                let arg = skip_whitespace(bytes, j + 1);
                if let Some(literal) = string_literal_at(bytes, arg) {
                    if is_substituting_template(bytes, arg, literal) {
                        // `${}` makes this an expression, not a literal.
                        i = literal.end + 1;
                    } else {
                        sites.push(site(source, ImportKind::DynamicImport, literal));
                        i = literal.end + 1;
                    }
                } else {
                    // Arbitrary expression argument: cannot be a module
                    // reference, scan on from inside the call.
                    i = j + 1;
                }
            } else if bytes.get(j) == Some(&b'.') {
                // import.meta
                i += 6;
            } else if let Some(literal) = scan_clause(bytes, j, true) {
                sites.push(site(source, ImportKind::Import, literal));
                i = literal.end + 1;
            } else {
                i += 6;
            }
        } else if keyword_at(bytes, i, b"export") {
            if let Some(literal) = scan_clause(bytes, i + 6, false) {
                sites.push(site(source, ImportKind::ExportFrom, literal));
                i = literal.end + 1;
            } else {
                i += 6;
            }
        } else {
            i += 1;
        }
    }

    sites
}

/// Byte range of a string literal's contents (quotes excluded).
#[derive(Debug, Clone, Copy)]
struct Literal {
    start: usize,
    end: usize,
}

fn site(source: &str, kind: ImportKind, literal: Literal) -> ImportSite {
    let span = literal.start..literal.end;
    let newlines = source.as_bytes()[..literal.start]
        .iter()
        .filter(|&&b| b == b'\n')
        .count();
    let line = u32::try_from(newlines + 1).unwrap_or(u32::MAX);
    ImportSite {
        kind,
        specifier: source[span.clone()].to_string(),
        span,
        line,
    }
}

/// Scan an import/export clause for its source string literal.
///
/// A literal counts when it follows a `from` keyword, or (for imports
/// only) when nothing but whitespace separates it from the keyword — a
/// side-effect import. Scanning stops at `;` or end of input; a clause
/// without a source (plain export declaration) yields `None` without
/// consuming anything.
fn scan_clause(bytes: &[u8], start: usize, allow_direct: bool) -> Option<Literal> {
    let mut i = start;
    let mut after_from = false;
    let mut seen_code = false;

    while i < bytes.len() && i - start < 2000 {
        let b = bytes[i];

        if b == b';' {
            return None;
        }
        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            i = skip_line_comment(bytes, i);
            continue;
        }
        if b == b'/' && bytes.get(i + 1) == Some(&b'*') {
            i = skip_block_comment(bytes, i);
            continue;
        }
        if b == b'"' || b == b'\'' || b == b'`' {
            if after_from || (allow_direct && !seen_code) {
                let literal = string_literal_at(bytes, i)?;
                if is_substituting_template(bytes, i, literal) {
                    return None;
                }
                return Some(literal);
            }
            // Some other literal (an aliased name, a default value);
            // skip it whole so its contents are never misread as code.
            i = skip_string(bytes, i);
            seen_code = true;
            continue;
        }
        if keyword_at(bytes, i, b"from") {
            after_from = true;
            i += 4;
            continue;
        }
        if !b.is_ascii_whitespace() {
            seen_code = true;
        }
        i += 1;
    }
    None
}

fn is_substituting_template(bytes: &[u8], at: usize, literal: Literal) -> bool {
    bytes[at] == b'`'
        && bytes[literal.start..literal.end]
            .windows(2)
            .any(|pair| pair == b"${")
}

fn string_literal_at(bytes: &[u8], at: usize) -> Option<Literal> {
    let quote = *bytes.get(at)?;
    if quote != b'"' && quote != b'\'' && quote != b'`' {
        return None;
    }
    let start = at + 1;
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == quote {
            return Some(Literal { start, end: i });
        }
        i += 1;
    }
    None
}

fn keyword_at(bytes: &[u8], at: usize, keyword: &[u8]) -> bool {
    if at + keyword.len() > bytes.len() || &bytes[at..at + keyword.len()] != keyword {
        return false;
    }
    if at > 0 && is_identifier_byte(bytes[at - 1]) {
        return false;
    }
    match bytes.get(at + keyword.len()) {
        Some(&next) => !is_identifier_byte(next),
        None => true,
    }
}

fn is_identifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn skip_line_comment(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

fn skip_block_comment(bytes: &[u8], mut i: usize) -> usize {
    i += 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

/// Skip past a string literal, returning the index after its closing
/// quote. Template literals are skipped wholesale.
fn skip_string(bytes: &[u8], at: usize) -> usize {
    match string_literal_at(bytes, at) {
        Some(literal) => literal.end + 1,
        None => bytes.len(),
    }
}
