//! Text-level parsers shared by the type grammar.
//!
//! Type information is plain text, so these work on `&str` input. The
//! grammar stays lenient: callers turn a failed parse into a fallback
//! instead of an error.

use super::diagnostics::{Diagnostics, FallbackKind};
use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::{anychar, char, digit1},
    combinator::{map_res, opt},
    error::ParseError,
    sequence::terminated,
};

/// Text up to `delim`, consuming the delimiter
pub fn terminated_by<'a, E: ParseError<&'a str>>(
    delim: char,
) -> impl Parser<&'a str, Output = &'a str, Error = E> {
    terminated(take_till(move |c: char| c == delim), char(delim))
}

/// Unsigned decimal number
pub fn decimal(input: &str) -> IResult<&str, i64> {
    map_res(digit1, |digits: &str| digits.parse::<i64>()).parse(input)
}

/// Takes the next character, if there is one
pub fn next_char(input: &str) -> (&str, Option<char>) {
    let parsed: IResult<&str, Option<char>> = opt(anychar).parse(input);
    parsed.unwrap_or((input, None))
}

/// Consumes `expected` when it comes next
pub fn skip_char(input: &str, expected: char) -> (&str, bool) {
    let parsed: IResult<&str, char> = char(expected).parse(input);
    match parsed {
        Ok((rest, _)) => (rest, true),
        Err(_) => (input, false),
    }
}

/// Skips past the next `delim`, or to the end of the input
pub fn skip_past(input: &str, delim: char) -> &str {
    let parsed: IResult<&str, &str> = terminated_by(delim).parse(input);
    parsed.map_or(&input[input.len()..], |(rest, _)| rest)
}

/// Decodes an integer literal: optional sign, then `0x`/`0X`/`#` hex,
/// leading-`0` octal, or decimal. `None` on syntax error or overflow.
pub fn decode_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        (16, hex)
    } else if let Some(hex) = body.strip_prefix('#') {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };
    if digits.is_empty() || digits.starts_with(['-', '+']) {
        return None;
    }
    // Parse with the sign attached so i64::MIN stays representable
    if negative {
        i64::from_str_radix(&format!("-{digits}"), radix).ok()
    } else {
        i64::from_str_radix(digits, radix).ok()
    }
}

/// Substitutes 0 for a numeral that did not decode and records the fallback
pub fn or_default(
    parsed: Option<i64>,
    text: &str,
    context: &'static str,
    diagnostics: &mut Diagnostics,
) -> i64 {
    parsed.unwrap_or_else(|| {
        diagnostics.record(FallbackKind::Numeral, context, text);
        0
    })
}

/// Decodes `text` as an integer literal, falling back to 0
pub fn int_or_default(text: &str, context: &'static str, diagnostics: &mut Diagnostics) -> i64 {
    or_default(decode_int(text), text, context, diagnostics)
}

/// Reads `text` as a signed decimal number, falling back to 0
pub fn decimal_or_default(text: &str, context: &'static str, diagnostics: &mut Diagnostics) -> i64 {
    or_default(text.parse().ok(), text, context, diagnostics)
}

/// Converts a decoded width to a size; a negative width becomes 0
pub fn size_or_default(value: i64, context: &'static str, diagnostics: &mut Diagnostics) -> usize {
    usize::try_from(value).unwrap_or_else(|_| {
        diagnostics.record(FallbackKind::Numeral, context, value.to_string());
        0
    })
}
