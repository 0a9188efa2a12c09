use super::diagnostics::FallbackKind;
use super::grammar::TypeParser;
use super::parsers::{int_or_default, skip_char};
use super::types::TypeId;
use nom::{
    IResult, Parser,
    character::complete::{anychar, char},
    combinator::all_consuming,
    number::complete::double,
    sequence::preceded,
};

/// Value of a `name:c=...` symbol
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constant {
    Integer(i64),
    Float(f64),
    Typed { ty: TypeId, value: i64 },
}

/// Parses the text after the `c` descriptor.
///
/// Returns `None` for forms with no integer or real value (strings, sets)
/// and for text not starting with `=`.
pub fn parse_constant(parser: &mut TypeParser<'_>, info: &str) -> Option<Constant> {
    let kind: IResult<&str, char> = preceded(char('='), anychar).parse(info);
    let (value, kind) = kind.ok()?;
    match kind {
        // i<value>, b<0|1>, c<ordinal>
        'i' | 'b' | 'c' => {
            let value = int_or_default(value, "integer constant", parser.diagnostics());
            Some(Constant::Integer(value))
        }
        // r<value>, which may be INF, -INF, QNAN or SNAN
        'r' => Some(Constant::Float(parse_real(parser, value))),
        // e<type>,<value>
        'e' => {
            let (rest, ty) = parser.parse_type("", None, value);
            let value = match skip_char(rest, ',') {
                (value, true) => int_or_default(value, "enum constant", parser.diagnostics()),
                (_, false) => 0,
            };
            Some(Constant::Typed { ty, value })
        }
        _ => None,
    }
}

fn parse_real(parser: &mut TypeParser<'_>, text: &str) -> f64 {
    match text {
        "INF" => f64::INFINITY,
        "-INF" => f64::NEG_INFINITY,
        "QNAN" | "SNAN" => f64::NAN,
        _ => {
            let parsed: IResult<&str, f64> = all_consuming(double).parse(text);
            match parsed {
                Ok((_, value)) => value,
                Err(_) => {
                    parser.diagnostics().record(FallbackKind::Numeral, "real constant", text);
                    0.0
                }
            }
        }
    }
}
