//! Evaluation of Python string literal tokens.
//!
//! Converts the source text of a single string token (prefix, quotes and all)
//! into the string value it denotes. Bytes and formatted strings have no plain
//! string value and evaluate to `None`.

/// Evaluate one string token such as `r'''a\b'''` or `"x\ty"`.
///
/// Returns `None` for bytes (`b`), formatted (`f`) and template (`t`)
/// literals, and for text that is not a complete string token.
pub fn evaluate(token: &str) -> Option<String> {
    let quote_at = token.find(['\'', '"'])?;
    let (prefix, rest) = token.split_at(quote_at);

    let mut raw = false;
    for c in prefix.chars() {
        match c.to_ascii_lowercase() {
            'r' => raw = true,
            'u' => {}
            _ => return None,
        }
    }

    let quote = if rest.starts_with("\"\"\"") {
        "\"\"\""
    } else if rest.starts_with("'''") {
        "'''"
    } else {
        &rest[..1]
    };
    if rest.len() < quote.len() * 2 || !rest.ends_with(quote) {
        return None;
    }
    let body = &rest[quote.len()..rest.len() - quote.len()];
    let body = body.replace("\r\n", "\n");

    if raw {
        Some(body)
    } else {
        Some(unescape(&body))
    }
}

/// Decode backslash escapes. Unknown escapes are kept as written.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\x07'),
            'b' => out.push('\x08'),
            'f' => out.push('\x0c'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\x0b'),
            '0'..='7' => {
                let mut value = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                match char::from_u32(value) {
                    Some(decoded) => out.push(decoded),
                    None => out.push(char::REPLACEMENT_CHARACTER),
                }
            }
            'x' => push_hex(&mut out, &mut chars, 'x', 2),
            'u' => push_hex(&mut out, &mut chars, 'u', 4),
            'U' => push_hex(&mut out, &mut chars, 'U', 8),
            'N' => push_named(&mut out, &mut chars),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

/// Decode a fixed-width hex escape, or keep it verbatim if malformed.
fn push_hex(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    marker: char,
    width: usize,
) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }

    let decoded = if digits.len() == width {
        u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
    } else {
        None
    };
    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

/// Decode a `\N{NAME}` escape by Unicode character name, or keep it
/// verbatim if the braces or the name are not valid.
fn push_named(out: &mut String, chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    if chars.peek() != Some(&'{') {
        out.push_str("\\N");
        return;
    }
    chars.next();

    let mut name = String::new();
    let mut closed = false;
    for c in chars.by_ref() {
        if c == '}' {
            closed = true;
            break;
        }
        name.push(c);
    }

    // Names match case-insensitively
    let decoded = if closed {
        unicode_names2::character(&name.to_ascii_uppercase())
    } else {
        None
    };
    match decoded {
        Some(c) => out.push(c),
        None => {
            out.push_str("\\N{");
            out.push_str(&name);
            if closed {
                out.push('}');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_quotes() {
        assert_eq!(evaluate("'hi'").as_deref(), Some("hi"));
        assert_eq!(evaluate("\"hi\"").as_deref(), Some("hi"));
        assert_eq!(evaluate("''").as_deref(), Some(""));
    }

    #[test]
    fn triple_quotes_keep_newlines() {
        assert_eq!(
            evaluate("\"\"\"Line one.\n\n    Line two.\n    \"\"\"").as_deref(),
            Some("Line one.\n\n    Line two.\n    ")
        );
        assert_eq!(evaluate("'''x'''").as_deref(), Some("x"));
    }

    #[test]
    fn escapes_are_decoded() {
        assert_eq!(evaluate(r#""a\tb\nc""#).as_deref(), Some("a\tb\nc"));
        assert_eq!(evaluate(r#""\x41\101é\U0001F600""#).as_deref(), Some("AAé😀"));
        assert_eq!(evaluate(r#"'it\'s'"#).as_deref(), Some("it's"));
        assert_eq!(evaluate("\"a\\\nb\"").as_deref(), Some("ab"));
    }

    #[test]
    fn unknown_escapes_stay_verbatim() {
        assert_eq!(evaluate(r#""\d+\xZZ""#).as_deref(), Some(r"\d+\xZZ"));
        assert_eq!(
            evaluate(r#""\N{NOT A REAL CHARACTER NAME}""#).as_deref(),
            Some(r"\N{NOT A REAL CHARACTER NAME}")
        );
        assert_eq!(evaluate(r#""\Nope""#).as_deref(), Some(r"\Nope"));
    }

    #[test]
    fn named_escapes_are_decoded() {
        assert_eq!(evaluate(r#""\N{EM DASH}""#).as_deref(), Some("\u{2014}"));
        assert_eq!(
            evaluate(r#""caf\N{latin small letter e with acute}""#).as_deref(),
            Some("café")
        );
        assert_eq!(evaluate(r#"r"\N{EM DASH}""#).as_deref(), Some(r"\N{EM DASH}"));
    }

    #[test]
    fn raw_strings_keep_backslashes() {
        assert_eq!(evaluate(r#"r"\d+\n""#).as_deref(), Some(r"\d+\n"));
        assert_eq!(evaluate(r#"R'''\t'''"#).as_deref(), Some(r"\t"));
        assert_eq!(evaluate(r#"u"\t""#).as_deref(), Some("\t"));
    }

    #[test]
    fn bytes_and_fstrings_have_no_value() {
        assert_eq!(evaluate("b'data'"), None);
        assert_eq!(evaluate("rb'data'"), None);
        assert_eq!(evaluate("f'{x}'"), None);
        assert_eq!(evaluate("F\"{x}\""), None);
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(evaluate("abc"), None);
        assert_eq!(evaluate("'unterminated"), None);
    }
}
