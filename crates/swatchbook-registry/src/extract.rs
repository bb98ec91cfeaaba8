//! Static metadata extraction from component source text.
//!
//! Components declare their styling metadata in conventionally named
//! exported constants:
//!
//! ```text
//! export const buttonVariants = {
//!   base: "inline-flex items-center",
//!   size: {
//!     sm: { classes: "h-8 px-3", description: "Compact" },
//!     base: { classes: "h-9 px-4" },
//!   },
//! }
//! export const buttonDefaultVariants = { size: "base" }
//! export const buttonStyling = { iconGap: 8 }
//! ```
//!
//! Extraction is pure text work: a brace-balance scanner carves out the
//! object-literal bodies, and a small best-effort reader turns them into
//! values. The surrounding source is never parsed or type-checked as code,
//! so files with unrelated syntax errors elsewhere still extract.

use std::collections::BTreeMap;

use swatchbook_style::split_states;

/// One variant value: its raw class string, optional documentation, and
/// the state-scoped class fragments decomposed out of the raw string.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantValue {
    pub classes: String,
    pub description: Option<String>,
    pub state_classes: BTreeMap<String, String>,
}

/// Everything the extractor pulls out of one component source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedVariants {
    /// Dimension name → value name → variant value.
    pub variants: BTreeMap<String, BTreeMap<String, VariantValue>>,
    /// Dimension name → default value name.
    pub defaults: BTreeMap<String, String>,
    /// Base style string applied to every variant.
    pub base: Option<String>,
    /// Free-form styling metadata, if declared.
    pub styling: Option<serde_json::Value>,
}

/// Extracts variant metadata from component source text.
///
/// Returns `None` unless both the variants table and the defaults table
/// are found — a component without them is skipped entirely, never given
/// a partial registry entry. The styling block is always optional.
pub fn extract(source: &str) -> Option<ExtractedVariants> {
    let variants_src = find_const_object(source, "Variants", Some("DefaultVariants"))?;
    let defaults_src = find_const_object(source, "DefaultVariants", None)?;

    let variants_val = read_object_literal(variants_src)?;
    let defaults_val = read_object_literal(defaults_src)?;

    let mut variants = BTreeMap::new();
    let mut base = None;
    for (key, value) in &variants_val {
        match value {
            serde_json::Value::String(classes) if key == "base" => {
                base = Some(classes.clone());
            }
            serde_json::Value::Object(values) => {
                let mut dimension = BTreeMap::new();
                for (value_name, entry) in values {
                    let (classes, description) = match entry {
                        serde_json::Value::String(classes) => (classes.clone(), None),
                        serde_json::Value::Object(fields) => {
                            let Some(classes) =
                                fields.get("classes").and_then(|c| c.as_str())
                            else {
                                continue;
                            };
                            let description = fields
                                .get("description")
                                .and_then(|d| d.as_str())
                                .map(str::to_string);
                            (classes.to_string(), description)
                        }
                        _ => continue,
                    };
                    let state_classes = split_states(&classes)
                        .1
                        .into_iter()
                        .map(|(state, fragment)| (state.as_str().to_string(), fragment))
                        .collect();
                    dimension.insert(
                        value_name.clone(),
                        VariantValue {
                            classes,
                            description,
                            state_classes,
                        },
                    );
                }
                variants.insert(key.clone(), dimension);
            }
            _ => {}
        }
    }

    let defaults = defaults_val
        .iter()
        .filter_map(|(key, value)| Some((key.clone(), value.as_str()?.to_string())))
        .collect();

    let styling = find_const_object(source, "Styling", None)
        .and_then(read_object_literal)
        .map(serde_json::Value::Object);

    Some(ExtractedVariants {
        variants,
        defaults,
        base,
        styling,
    })
}

/// Finds the object literal assigned to a `const` whose identifier ends in
/// `suffix`, skipping identifiers that end in `exclude` (so `Variants`
/// lookups don't land on `DefaultVariants`).
fn find_const_object<'a>(
    source: &'a str,
    suffix: &str,
    exclude: Option<&str>,
) -> Option<&'a str> {
    let mut search_from = 0;
    while let Some(found) = source[search_from..].find("const ") {
        let ident_start = search_from + found + "const ".len();
        search_from = ident_start;

        let ident_len = source[ident_start..]
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '$')
            .unwrap_or(source.len() - ident_start);
        let ident = &source[ident_start..ident_start + ident_len];
        if !ident.ends_with(suffix) {
            continue;
        }
        if let Some(excluded) = exclude {
            if ident.ends_with(excluded) {
                continue;
            }
        }

        // Skip an optional type annotation up to the assignment.
        let rest = &source[ident_start + ident_len..];
        let eq = match rest.find('=') {
            Some(i) if !rest[..i].contains(';') => i,
            _ => continue,
        };
        let after_eq = rest[eq + 1..].trim_start();
        if !after_eq.starts_with('{') {
            continue;
        }
        let open = source.len() - after_eq.len();
        if let Some(body) = carve_braced(source, open) {
            return Some(body);
        }
    }
    None
}

/// Carves out a balanced `{…}` slice starting at `open` (which must index
/// a `{`), tracking depth while skipping string literals and comments.
///
/// Returns `None` if the braces never balance.
fn carve_braced(source: &str, open: usize) -> Option<&str> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&source[open..=i]);
                }
            }
            quote @ (b'"' | b'\'' | b'`') => {
                i = skip_string(bytes, i, quote)?;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Advances past a string literal opened at `start`; returns the index of
/// the closing quote.
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == quote {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Reads a carved object-literal body into a JSON object.
///
/// This is a best-effort DSL reader, not a JavaScript parser: bare and
/// quoted keys, single/double/backtick strings, numbers, booleans, nulls,
/// nested objects and arrays, trailing commas. Anything else fails the
/// read, which callers treat as "not found".
fn read_object_literal(body: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let mut reader = Reader {
        source: body,
        pos: 0,
    };
    let map = reader.parse_object()?;
    reader.skip_trivia();
    reader.at_end().then_some(map)
}

struct Reader<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn skip_trivia(&mut self) {
        loop {
            while self.peek().is_some_and(|c| c.is_whitespace()) {
                self.bump();
            }
            if self.source[self.pos..].starts_with("//") {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.bump();
                }
            } else if self.source[self.pos..].starts_with("/*") {
                self.pos += 2;
                match self.source[self.pos..].find("*/") {
                    Some(end) => self.pos += end + 2,
                    None => self.pos = self.source.len(),
                }
            } else {
                return;
            }
        }
    }

    fn parse_object(&mut self) -> Option<serde_json::Map<String, serde_json::Value>> {
        self.skip_trivia();
        if self.bump()? != '{' {
            return None;
        }
        let mut map = serde_json::Map::new();
        loop {
            self.skip_trivia();
            match self.peek()? {
                '}' => {
                    self.bump();
                    return Some(map);
                }
                ',' => {
                    self.bump();
                }
                _ => {
                    let key = self.parse_key()?;
                    self.skip_trivia();
                    if self.bump()? != ':' {
                        return None;
                    }
                    let value = self.parse_value()?;
                    map.insert(key, value);
                }
            }
        }
    }

    fn parse_key(&mut self) -> Option<String> {
        match self.peek()? {
            '"' | '\'' | '`' => self.parse_string(),
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let start = self.pos;
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                {
                    self.bump();
                }
                Some(self.source[start..self.pos].to_string())
            }
            _ => None,
        }
    }

    fn parse_value(&mut self) -> Option<serde_json::Value> {
        self.skip_trivia();
        match self.peek()? {
            '{' => Some(serde_json::Value::Object(self.parse_object()?)),
            '[' => self.parse_array(),
            '"' | '\'' | '`' => Some(serde_json::Value::String(self.parse_string()?)),
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => self.parse_number(),
            c if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                let word = self.parse_key()?;
                Some(match word.as_str() {
                    "true" => serde_json::Value::Bool(true),
                    "false" => serde_json::Value::Bool(false),
                    "null" | "undefined" => serde_json::Value::Null,
                    // Bare words read as strings: defaults tables often
                    // name values unquoted.
                    _ => serde_json::Value::String(word),
                })
            }
            _ => None,
        }
    }

    fn parse_array(&mut self) -> Option<serde_json::Value> {
        if self.bump()? != '[' {
            return None;
        }
        let mut items = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek()? {
                ']' => {
                    self.bump();
                    return Some(serde_json::Value::Array(items));
                }
                ',' => {
                    self.bump();
                }
                _ => items.push(self.parse_value()?),
            }
        }
    }

    fn parse_string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            let c = self.bump()?;
            if c == quote {
                return Some(out);
            }
            if c == '\\' {
                let escaped = self.bump()?;
                out.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
            } else {
                out.push(c);
            }
        }
    }

    fn parse_number(&mut self) -> Option<serde_json::Value> {
        let start = self.pos;
        while self.peek().is_some_and(|c| {
            c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E')
        }) {
            self.bump();
        }
        let value: f64 = self.source[start..self.pos].parse().ok()?;
        let number = if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            serde_json::Number::from(value as i64)
        } else {
            serde_json::Number::from_f64(value)?
        };
        Some(serde_json::Value::Number(number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON_SOURCE: &str = r#"
        import { cx } from "../lib/cx"

        // Sizing and visual variants.
        export const buttonVariants = {
          base: "inline-flex items-center gap-2 rounded-md font-medium",
          size: {
            sm: { classes: "h-8 px-3 text-xs", description: "Compact" },
            base: { classes: "h-9 px-4 text-sm" },
            lg: { classes: "h-10 px-6 text-base", description: "Spacious" },
          },
          variant: {
            default: {
              classes: "bg-primary text-primary-foreground hover:bg-primary/90",
            },
            "secondary-destructive": {
              classes: "bg-secondary text-danger hover:bg-danger hover:text-white",
            },
          },
        }

        export const buttonDefaultVariants = {
          size: "base",
          variant: "default",
        }

        export const buttonStyling = {
          iconGap: 8,
          focusRing: { width: 2, offset: 2 },
          category: "form",
        }

        export function Button() { /* … */ }
    "#;

    #[test]
    fn test_extract_full_component() {
        let extracted = extract(BUTTON_SOURCE).unwrap();

        assert_eq!(
            extracted.base.as_deref(),
            Some("inline-flex items-center gap-2 rounded-md font-medium")
        );
        assert_eq!(extracted.variants.len(), 2);

        let size = &extracted.variants["size"];
        assert_eq!(
            size.keys().collect::<Vec<_>>(),
            vec!["base", "lg", "sm"]
        );
        assert_eq!(size["sm"].classes, "h-8 px-3 text-xs");
        assert_eq!(size["sm"].description.as_deref(), Some("Compact"));
        assert_eq!(size["base"].description, None);

        assert_eq!(extracted.defaults["size"], "base");
        assert_eq!(extracted.defaults["variant"], "default");
    }

    #[test]
    fn test_extract_hyphenated_quoted_keys() {
        let extracted = extract(BUTTON_SOURCE).unwrap();
        let variant = &extracted.variants["variant"];
        assert!(variant.contains_key("secondary-destructive"));
    }

    #[test]
    fn test_extract_decomposes_state_classes() {
        let extracted = extract(BUTTON_SOURCE).unwrap();
        let destructive = &extracted.variants["variant"]["secondary-destructive"];
        assert_eq!(
            destructive.state_classes["hover"],
            "bg-danger text-white"
        );
        // The raw string keeps the state-prefixed tokens.
        assert!(destructive.classes.contains("hover:bg-danger"));
    }

    #[test]
    fn test_extract_styling_metadata() {
        let extracted = extract(BUTTON_SOURCE).unwrap();
        let styling = extracted.styling.unwrap();
        assert_eq!(styling["iconGap"], serde_json::json!(8));
        assert_eq!(styling["focusRing"]["width"], serde_json::json!(2));
        assert_eq!(styling["category"], serde_json::json!("form"));
    }

    #[test]
    fn test_extract_requires_both_tables() {
        let only_variants = r#"
            export const cardVariants = { pad: { tight: "p-2" } }
        "#;
        assert_eq!(extract(only_variants), None);

        let only_defaults = r#"
            export const cardDefaultVariants = { pad: "tight" }
        "#;
        assert_eq!(extract(only_defaults), None);
    }

    #[test]
    fn test_extract_styling_is_optional() {
        let source = r#"
            const xVariants = { tone: { calm: "bg-muted" } }
            const xDefaultVariants = { tone: "calm" }
        "#;
        let extracted = extract(source).unwrap();
        assert_eq!(extracted.styling, None);
        assert_eq!(extracted.variants["tone"]["calm"].classes, "bg-muted");
    }

    #[test]
    fn test_extract_tolerates_broken_code_elsewhere() {
        let source = r#"
            function broken( { this is not valid anything "
            const yVariants = { tone: { calm: "bg-muted" } }
            const yDefaultVariants = { tone: "calm" }
        "#;
        // The broken function above opens a brace and a string it never
        // closes; the scanner must still find the later constants.
        let extracted = extract(source).unwrap();
        assert_eq!(extracted.defaults["tone"], "calm");
    }

    #[test]
    fn test_variants_suffix_does_not_match_defaults_const() {
        // A file with only a DefaultVariants const has no variants table.
        let source = r#"
            const zDefaultVariants = { tone: "calm" }
        "#;
        assert_eq!(find_const_object(source, "Variants", Some("DefaultVariants")), None);
    }

    #[test]
    fn test_carve_braced_skips_strings_and_comments() {
        let source = r#"{ a: "closing } inside string", // comment with }
            b: { c: 'another }' }, /* } */ d: 1 }"#;
        let carved = carve_braced(source, 0).unwrap();
        assert!(carved.ends_with("d: 1 }"));
        assert_eq!(carved.len(), source.len());
    }

    #[test]
    fn test_carve_braced_unbalanced_returns_none() {
        assert_eq!(carve_braced("{ a: { b: 1 }", 0), None);
    }

    #[test]
    fn test_reader_accepts_type_annotations() {
        let source = r#"
            const chipVariants: Record<string, unknown> = { tone: { calm: "bg-muted" } }
            const chipDefaultVariants = { tone: "calm" }
        "#;
        let extracted = extract(source).unwrap();
        assert!(extracted.variants.contains_key("tone"));
    }

    #[test]
    fn test_reader_handles_arrays_and_bare_words() {
        let source = r#"
            const tagVariants = { tone: { calm: "bg-muted" } }
            const tagDefaultVariants = { tone: calm }
            const tagStyling = { order: [1, 2, 3], flag: true, nothing: null }
        "#;
        let extracted = extract(source).unwrap();
        assert_eq!(extracted.defaults["tone"], "calm");
        let styling = extracted.styling.unwrap();
        assert_eq!(styling["order"], serde_json::json!([1, 2, 3]));
        assert_eq!(styling["flag"], serde_json::json!(true));
        assert_eq!(styling["nothing"], serde_json::Value::Null);
    }

    #[test]
    fn test_reader_rejects_garbage() {
        let source = r#"
            const badVariants = { tone: ??? }
            const badDefaultVariants = { tone: "calm" }
        "#;
        assert_eq!(extract(source), None);
    }
}
