use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{char, satisfy},
    combinator::{opt, recognize, rest},
    multi::many0_count,
    sequence::preceded,
};

/// Name given to a reserved `$` name this reader does not know
pub const UNKNOWN_SYNTHETIC_NAME: &str = "__unknown_synthetic";

/// One logical symbol string split as `name ':' descriptor type-information`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringField<'a> {
    pub name: String,
    pub descriptor: Option<char>,
    pub type_information: &'a str,
}

impl<'a> StringField<'a> {
    /// Splits a symbol string.
    ///
    /// `::` belongs to the name (`ns::klass:t1=...`); the first lone `:`
    /// ends it. The descriptor is the letter following that colon, if any.
    /// A missing colon leaves the whole string as the name.
    pub fn parse(field: &'a str) -> Self {
        let Ok((_, (name, tail))) = symbol_string(field) else {
            return Self {
                name: canonical_name(field),
                descriptor: None,
                type_information: "",
            };
        };
        let (descriptor, type_information) = tail.unwrap_or((None, ""));
        Self {
            name: canonical_name(name),
            descriptor,
            type_information,
        }
    }
}

/// `name [':' [descriptor] type-information]`
fn symbol_string(input: &str) -> IResult<&str, (&str, Option<(Option<char>, &str)>)> {
    (
        recognize(many0_count(alt((is_not(":"), tag("::"))))),
        opt(preceded(
            char(':'),
            (opt(satisfy(|c| c.is_ascii_alphabetic())), rest),
        )),
    )
        .parse(input)
}

/// Rewrites the reserved `$` names compilers emit for synthetic symbols
fn canonical_name(name: &str) -> String {
    let Some(tag) = name.strip_prefix('$') else {
        return name.to_string();
    };
    let canonical = match tag.chars().next() {
        Some('t') => "this",
        Some('v') => "__vtbl_ptr",
        Some('e') => "__eh_throw",
        Some('_') => "__anonymous",
        Some('X') => "__static_init",
        _ => UNKNOWN_SYNTHETIC_NAME,
    };
    canonical.to_string()
}
