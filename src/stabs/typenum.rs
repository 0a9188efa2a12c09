use super::diagnostics::{Diagnostics, FallbackKind};
use super::parsers::{decimal, decimal_or_default};
use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit0, digit1},
    combinator::opt,
    sequence::{delimited, preceded, separated_pair},
};
use std::fmt;

/// Identity of a type within one STABS stream: `(file, type)`.
///
/// The short form `N` means `(0,N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeNumber {
    pub file: i64,
    pub number: i64,
}

impl TypeNumber {
    pub const fn new(file: i64, number: i64) -> Self {
        Self { file, number }
    }

    /// Reads `N` or `(F,N)` from the start of `input`.
    ///
    /// A malformed pair is read as far as it goes and recorded in
    /// `diagnostics`. Returns `None` without consuming anything unless the
    /// input starts with a digit or `(`.
    pub fn parse<'a>(input: &'a str, diagnostics: &mut Diagnostics) -> (&'a str, Option<TypeNumber>) {
        if let Ok((rest, number)) = type_number(input) {
            return (rest, Some(number));
        }

        let pair: IResult<&str, (&str, Option<&str>, Option<char>)> = (
            preceded(char('('), digit0),
            opt(preceded(char(','), digit0)),
            opt(char(')')),
        )
            .parse(input);
        if let Ok((rest, (file, number, close))) = pair {
            let file = decimal_or_default(file, "type number file", diagnostics);
            let truncated = number.is_none() || close.is_none();
            let number = match number {
                Some(digits) => decimal_or_default(digits, "type number", diagnostics),
                None => 0,
            };
            if truncated {
                diagnostics.record(FallbackKind::Truncated, "type number", rest);
            }
            return (rest, Some(TypeNumber::new(file, number)));
        }

        // digits too long for an i64
        let short: IResult<&str, &str> = digit1(input);
        match short {
            Ok((rest, digits)) => {
                let number = decimal_or_default(digits, "type number", diagnostics);
                (rest, Some(TypeNumber::new(0, number)))
            }
            Err(_) => (input, None),
        }
    }
}

/// Strict `N` | `(F,N)`
pub fn type_number(input: &str) -> IResult<&str, TypeNumber> {
    alt((
        delimited(char('('), separated_pair(decimal, char(','), decimal), char(')'))
            .map(|(file, number)| TypeNumber::new(file, number)),
        decimal.map(|number| TypeNumber::new(0, number)),
    ))
    .parse(input)
}

impl fmt::Display for TypeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.file, self.number)
    }
}
