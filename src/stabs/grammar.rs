//! Recursive-descent parser for STABS type information.
//!
//! ```text
//! type        := typenumber [ '=' attributes* definition ] | descriptor body
//! typenumber  := N | '(' F ',' N ')'
//! definition  := type | descriptor body
//! ```
//!
//! Every expression that contains `=` binds its result to the leading type
//! number in the [`TypeRegistry`]. Malformed input never fails: the parser
//! stops at the first missing delimiter and returns what it has, recording
//! the fallback in [`Diagnostics`].

use super::diagnostics::{Diagnostics, FallbackKind};
use super::parsers::{
    decimal_or_default, int_or_default, next_char, size_or_default, skip_char, skip_past,
    terminated_by,
};
use super::range::range_base_type;
use super::typenum::TypeNumber;
use super::types::{CrossRefKind, DebugType, EnumField, Field, TypeId, TypeRegistry};
use log::{trace, warn};
use nom::{
    IResult, Parser,
    bytes::complete::take_till,
    character::complete::{anychar, char, digit0, satisfy},
    combinator::{opt, peek},
    sequence::{preceded, terminated},
};

/// Leading part of a type expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypeInformation {
    number: Option<TypeNumber>,
    descriptor: Option<char>,
    is_definition: bool,
}

pub struct TypeParser<'s> {
    registry: &'s mut TypeRegistry,
    diagnostics: &'s mut Diagnostics,
}

impl<'s> TypeParser<'s> {
    pub fn new(registry: &'s mut TypeRegistry, diagnostics: &'s mut Diagnostics) -> Self {
        Self {
            registry,
            diagnostics,
        }
    }

    /// Parses a whole type-information string
    pub fn parse_str(&mut self, name: &str, text: &str) -> TypeId {
        let (_, id) = self.parse_type(name, None, text);
        id
    }

    /// Parses one type expression and returns the text after it.
    ///
    /// `enclosing` is the number being defined by the caller, if any; a bare
    /// reference to it is the self-referential encoding of `void`.
    pub fn parse_type<'a>(
        &mut self,
        name: &str,
        enclosing: Option<TypeNumber>,
        input: &'a str,
    ) -> (&'a str, TypeId) {
        let (input, info) = self.type_information(input);

        let (input, parsed) = match info.descriptor {
            Some('*') => {
                let (input, target) = self.parse_type("", None, input);
                (input, Some(self.registry.alloc(DebugType::Pointer(target))))
            }
            Some('&') => {
                let (input, target) = self.parse_type("", None, input);
                (input, Some(self.registry.alloc(DebugType::Reference(target))))
            }
            Some('f') => {
                let (input, returns) = self.parse_type("", None, input);
                (input, Some(self.registry.alloc(DebugType::Function(returns))))
            }
            // const and volatile qualifiers carry no information we keep
            Some('k' | 'B') => {
                let (input, id) = self.parse_type(name, None, input);
                (input, Some(id))
            }
            Some(c @ ('b' | 'w' | 'R' | 'g' | 'c')) => {
                let (input, id) = self.parse_builtin(name, c, input);
                (input, Some(id))
            }
            Some('a' | 'A') => self.parse_array(name, input),
            Some('e') => {
                let (input, id) = self.parse_enum(name, info.number, input);
                (input, Some(id))
            }
            Some('r') => self.parse_range(name, info.number, input),
            Some('s') => {
                let (input, id) = self.parse_struct(name, info.number, false, input);
                (input, Some(id))
            }
            Some('u') => {
                let (input, id) = self.parse_struct(name, info.number, true, input);
                (input, Some(id))
            }
            // forward references are never bound to the number
            Some('x') => return self.parse_cross_reference(name, input),
            Some(other) => {
                warn!("unsupported type descriptor {:?} for {:?}, using an unknown type", other, name);
                (input, None)
            }
            None if info.is_definition => {
                let (input, id) = self.parse_type(name, info.number, input);
                (input, Some(id))
            }
            None => {
                let id = match info.number {
                    Some(number) if enclosing == Some(number) => Some(self.registry.void()),
                    Some(number) => self.registry.lookup(number),
                    None => None,
                };
                (input, id)
            }
        };

        let id = self.or_unknown(parsed, name, "type expression");
        if let (true, Some(number)) = (info.is_definition, info.number) {
            trace!("define {} as {:?}", number, self.registry.get(id));
            self.registry.bind(number, id);
        }
        (input, id)
    }

    /// Substitutes an unknown type for one that could not be built
    pub fn or_unknown(&mut self, parsed: Option<TypeId>, name: &str, context: &'static str) -> TypeId {
        parsed.unwrap_or_else(|| {
            self.diagnostics.record(FallbackKind::UnknownType, context, name);
            self.registry.alloc(DebugType::Unknown(name.to_string()))
        })
    }

    pub fn diagnostics(&mut self) -> &mut Diagnostics {
        &mut *self.diagnostics
    }

    fn truncated(&mut self, context: &'static str, rest: &str) {
        self.diagnostics.record(FallbackKind::Truncated, context, rest);
    }

    fn type_information<'a>(&mut self, input: &'a str) -> (&'a str, TypeInformation) {
        let (input, number) = TypeNumber::parse(input, self.diagnostics);
        let Some(number) = number else {
            let (input, descriptor) = next_char(input);
            let info = TypeInformation {
                number: None,
                descriptor,
                is_definition: false,
            };
            return (input, info);
        };
        let (input, is_definition) = skip_char(input, '=');
        if !is_definition {
            let info = TypeInformation {
                number: Some(number),
                descriptor: None,
                is_definition: false,
            };
            return (input, info);
        }
        let input = skip_type_attributes(input);
        // a nested number is re-read by the recursive call
        let (input, descriptor) = if input.starts_with(|c: char| c.is_ascii_digit() || c == '(') {
            (input, None)
        } else {
            next_char(input)
        };
        let info = TypeInformation {
            number: Some(number),
            descriptor,
            is_definition: true,
        };
        (input, info)
    }

    fn parse_builtin<'a>(&mut self, name: &str, descriptor: char, input: &'a str) -> (&'a str, TypeId) {
        let (input, (size, signed)) = match descriptor {
            // b<signedness>[c]<width>;<offset>;<nbits>;
            'b' => {
                let parsed: IResult<&str, (char, Option<char>, &str, &str, &str, Option<char>)> = (
                    anychar,
                    opt(char('c')),
                    terminated_by(';'),
                    terminated_by(';'),
                    take_till(|c: char| c == ';'),
                    opt(char(';')),
                )
                    .parse(input);
                match parsed {
                    Ok((rest, (signedness, _, _, _, nbits, _))) => {
                        let nbits = int_or_default(nbits, "builtin bits", self.diagnostics);
                        (rest, (nbits / 8, signedness != 'u'))
                    }
                    Err(_) => {
                        self.truncated("builtin", input);
                        (input, (0, true))
                    }
                }
            }
            'w' => (input, (8, true)),
            // R<fp-type>;<bytes>;
            'R' => {
                let parsed: IResult<&str, (&str, &str, Option<char>)> =
                    (terminated_by(';'), take_till(|c: char| c == ';'), opt(char(';'))).parse(input);
                match parsed {
                    Ok((rest, (_, bytes, _))) => {
                        let bytes = int_or_default(bytes, "builtin float bytes", self.diagnostics);
                        (rest, (bytes, true))
                    }
                    Err(_) => {
                        self.truncated("builtin float", input);
                        (input, (0, true))
                    }
                }
            }
            // c<type>;<nbits> and g<type>;<nbits>
            _ => {
                let (input, _) = self.parse_type(name, None, input);
                let parsed: IResult<&str, &str> =
                    preceded(opt(char(';')), take_till(|c: char| c == ';' || c == ',')).parse(input);
                let (input, nbits) = parsed.unwrap_or((input, ""));
                let nbits = int_or_default(nbits, "builtin bits", self.diagnostics);
                (input, (nbits / 8, true))
            }
        };
        let id = self.registry.alloc(DebugType::Base {
            name: name.to_string(),
            size: size_or_default(size, "builtin size", self.diagnostics),
            signed,
        });
        (input, id)
    }

    /// `ar<index type>;<lower>;<upper>;<element type>`
    fn parse_array<'a>(&mut self, name: &str, input: &'a str) -> (&'a str, Option<TypeId>) {
        let (input, ranged) = skip_char(input, 'r');
        if !ranged {
            self.truncated("array index", input);
            let element = self.registry.alloc(DebugType::Unknown(name.to_string()));
            let array = self.registry.alloc(DebugType::Array { element, length: 0 });
            return (input, Some(array));
        }
        let (input, _) = self.parse_type("", None, input);
        let bounds: IResult<&str, (char, &str, &str)> =
            (char(';'), terminated_by(';'), terminated_by(';')).parse(input);
        let Ok((input, (_, lower, upper))) = bounds else {
            self.truncated("array bounds", input);
            return (input, None);
        };
        let lower = decimal_or_default(lower, "array lower bound", self.diagnostics);
        let upper = decimal_or_default(upper, "array upper bound", self.diagnostics);
        let (input, element) = self.parse_type("", None, input);
        let length = upper.wrapping_sub(lower).wrapping_add(1);
        (input, Some(self.registry.alloc(DebugType::Array { element, length })))
    }

    /// `e<name>:<value>,...;`
    ///
    /// Bound before the enumerators are read, like a struct.
    fn parse_enum<'a>(
        &mut self,
        name: &str,
        defining: Option<TypeNumber>,
        input: &'a str,
    ) -> (&'a str, TypeId) {
        let id = self.registry.alloc(DebugType::Enum {
            name: name.to_string(),
            fields: Vec::new(),
        });
        if let Some(number) = defining {
            self.registry.bind(number, id);
        }

        let mut input = input;
        loop {
            let (rest, closed) = skip_char(input, ';');
            if closed {
                input = rest;
                break;
            }
            if input.is_empty() {
                self.truncated("enum", input);
                break;
            }
            let enumerator: IResult<&str, (&str, &str)> = (
                terminated(take_till(|c: char| c == ':' || c == ';'), char(':')),
                terminated(take_till(|c: char| c == ',' || c == ';'), char(',')),
            )
                .parse(input);
            let Ok((rest, (enumerator, value))) = enumerator else {
                warn!("dropping enumerators of {:?} after {:?}", name, input);
                self.truncated("enumerator", input);
                input = skip_past(input, ';');
                break;
            };
            if !enumerator.is_empty() {
                let value = int_or_default(value, "enumerator value", self.diagnostics);
                let field = EnumField {
                    name: enumerator.to_string(),
                    value,
                };
                self.registry.push_enumerator(id, field);
            }
            input = rest;
        }
        (input, id)
    }

    /// `r<index type>;<lower>;<upper>;`
    fn parse_range<'a>(
        &mut self,
        name: &str,
        defining: Option<TypeNumber>,
        input: &'a str,
    ) -> (&'a str, Option<TypeId>) {
        let (input, index) = TypeNumber::parse(input, self.diagnostics);
        let index = index.unwrap_or_default();
        let bounds: IResult<&str, (char, &str, &str)> =
            (char(';'), terminated_by(';'), terminated_by(';')).parse(input);
        let Ok((input, (_, lower, upper))) = bounds else {
            self.truncated("range bounds", input);
            return (input, None);
        };
        let self_referential = defining == Some(index);
        let ty = range_base_type(name, lower, upper, self_referential);
        (input, ty.map(|ty| self.registry.alloc(ty)))
    }

    /// `s<size><name>:<type>,<bit offset>,<bit size>;...;`
    ///
    /// The struct is bound before its members are read so a member may
    /// point back at it.
    fn parse_struct<'a>(
        &mut self,
        name: &str,
        defining: Option<TypeNumber>,
        is_union: bool,
        input: &'a str,
    ) -> (&'a str, TypeId) {
        let digits: IResult<&str, &str> = digit0(input);
        let (input, digits) = digits.unwrap_or((input, ""));
        let size = decimal_or_default(digits, "struct size", self.diagnostics);
        let id = self.registry.alloc(DebugType::Struct {
            name: name.to_string(),
            size: size_or_default(size, "struct size", self.diagnostics),
            is_union,
            fields: Vec::new(),
        });
        if let Some(number) = defining {
            self.registry.bind(number, id);
        }

        let mut input = input;
        loop {
            let (rest, closed) = skip_char(input, ';');
            if closed {
                input = rest;
                break;
            }
            if input.is_empty() {
                self.truncated("struct", input);
                break;
            }
            match self.struct_member(input) {
                Ok((rest, field)) => {
                    self.registry.push_field(id, field);
                    input = rest;
                }
                Err(_) => {
                    warn!("dropping members of {:?} after {:?}", name, input);
                    self.truncated("struct member", input);
                    break;
                }
            }
        }
        (input, id)
    }

    /// `<name>:<type>,<bit offset>,<bit size>;`
    fn struct_member<'a>(&mut self, input: &'a str) -> IResult<&'a str, Field> {
        let (input, name) = terminated(take_till(|c: char| c == ':' || c == ';'), char(':')).parse(input)?;
        let (input, ty) = self.parse_type("", None, input);
        let (input, (_, offset, bits)) = (
            char(','),
            terminated(take_till(|c: char| c == ',' || c == ';'), char(',')),
            terminated_by(';'),
        )
            .parse(input)?;
        let field = Field {
            name: name.to_string(),
            ty,
            bit_offset: int_or_default(offset, "struct member offset", self.diagnostics),
            bit_size: int_or_default(bits, "struct member size", self.diagnostics),
        };
        Ok((input, field))
    }

    /// `x<s|u|e><tag>:`
    fn parse_cross_reference<'a>(&mut self, name: &str, input: &'a str) -> (&'a str, TypeId) {
        let parsed: IResult<&str, (char, &str, Option<char>)> =
            (anychar, take_till(|c: char| c == ':'), opt(char(':'))).parse(input);
        let Ok((input, (tag, tag_name, _))) = parsed else {
            self.truncated("cross reference", input);
            return (input, self.or_unknown(None, name, "cross reference"));
        };
        let kind = CrossRefKind::from_tag(tag);
        let tag = match kind {
            CrossRefKind::Struct => format!("struct {tag_name}"),
            CrossRefKind::Union => format!("union {tag_name}"),
            CrossRefKind::Enum => format!("enum {tag_name}"),
            CrossRefKind::Other(c) => format!("{c}{tag_name}"),
        };
        let id = self.registry.alloc(DebugType::CrossReference {
            name: name.to_string(),
            kind,
            tag,
        });
        (input, id)
    }
}

/// Skips gcc type attributes such as `@s64;` that may follow `=`.
///
/// `@` followed by a type number is a member-pointer type and is left alone.
fn skip_type_attributes(mut input: &str) -> &str {
    loop {
        let attribute: IResult<&str, &str> = preceded(
            (char('@'), peek(satisfy(|c| !(c.is_ascii_digit() || c == '(' || c == '-')))),
            terminated_by(';'),
        )
        .parse(input);
        match attribute {
            Ok((rest, _)) => input = rest,
            Err(_) => return input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Session {
        registry: TypeRegistry,
        diagnostics: Diagnostics,
    }

    impl Session {
        fn new() -> Self {
            Self {
                registry: TypeRegistry::new(),
                diagnostics: Diagnostics::new(),
            }
        }

        fn parse(&mut self, name: &str, text: &str) -> TypeId {
            TypeParser::new(&mut self.registry, &mut self.diagnostics).parse_str(name, text)
        }

        fn render(&self, id: TypeId) -> String {
            self.registry.resolve(id).to_string()
        }
    }

    fn base_shape(ty: &DebugType) -> Option<(usize, bool)> {
        match ty {
            DebugType::Base { size, signed, .. } => Some((*size, *signed)),
            _ => None,
        }
    }

    #[test]
    fn int_definition_is_bound() {
        let mut s = Session::new();
        let id = s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        assert_eq!(s.registry.lookup(TypeNumber::new(0, 1)), Some(id));
        assert_eq!(base_shape(s.registry.get(id)), Some((4, true)));
        assert!(s.diagnostics.is_empty());
    }

    #[test]
    fn char_uses_self_reference() {
        let mut s = Session::new();
        let char_id = s.parse("char", "(0,2)=r(0,2);0;127;");
        assert_eq!(base_shape(s.registry.get(char_id)), Some((1, true)));
        let uchar = s.parse("unsigned char", "(0,11)=r(0,11);0;255;");
        assert_eq!(base_shape(s.registry.get(uchar)), Some((1, false)));
        // same bounds through another index type are not a char
        let other = s.parse("odd", "(0,12)=r(0,1);0;255;");
        assert!(s.registry.resolve(other).is_unknown());
    }

    #[test]
    fn range_without_definition() {
        let mut s = Session::new();
        let id = s.parse("", "r(0,0);-32768;32767;");
        assert_eq!(base_shape(s.registry.get(id)), Some((2, true)));
        let id = s.parse("", "r(0,0);0;1;");
        assert!(s.registry.resolve(id).is_unknown());
        assert_eq!(s.diagnostics.count(FallbackKind::UnknownType), 1);
    }

    #[test]
    fn void_refers_to_itself() {
        let mut s = Session::new();
        let id = s.parse("void", "(0,20)=(0,20)");
        assert_eq!(id, s.registry.void());
        assert_eq!(s.registry.lookup(TypeNumber::new(0, 20)), Some(s.registry.void()));
    }

    #[test]
    fn pointer_and_function() {
        let mut s = Session::new();
        s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        s.parse("char", "(0,2)=r(0,2);0;127;");
        let ptr = s.parse("", "(0,3)=*(0,2)");
        assert_eq!(s.render(ptr), "char *");
        let function = s.parse("", "(0,4)=f(0,1)");
        assert_eq!(s.render(function), "int ()");
        let reference = s.parse("", "(0,5)=&(0,1)");
        assert_eq!(s.render(reference), "int &");
        assert_eq!(s.parse("", "(0,3)"), ptr);
    }

    #[test]
    fn unresolved_reference_is_unknown() {
        let mut s = Session::new();
        let id = s.parse("mystery", "(4,2)");
        assert!(s.registry.resolve(id).is_unknown());
        assert_eq!(s.render(id), "mystery");
        assert_eq!(s.diagnostics.count(FallbackKind::UnknownType), 1);
    }

    #[test]
    fn array_of_ints() {
        let mut s = Session::new();
        s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        let id = s.parse("", "(1,1)=ar(0,1);0;9;(0,1)");
        assert_eq!(s.render(id), "int [10]");
        match s.registry.get(id) {
            DebugType::Array { length, .. } => assert_eq!(*length, 10),
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn array_bounds_are_decimal() {
        let mut s = Session::new();
        s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        let id = s.parse("", "ar(0,1);0;010;(0,1)");
        assert_eq!(s.render(id), "int [11]");
        let id = s.parse("", "ar(0,1);0;09;(0,1)");
        assert_eq!(s.render(id), "int [10]");
        assert_eq!(s.diagnostics.count(FallbackKind::Numeral), 0);
    }

    #[test]
    fn array_with_inline_index_type() {
        let mut s = Session::new();
        s.parse("char", "(0,2)=r(0,2);0;127;");
        let id = s.parse("", "(1,2)=ar(1,3)=r(1,3);0;-1;;0;15;(0,2)");
        assert_eq!(s.render(id), "char [16]");
    }

    #[test]
    fn array_without_range_is_empty() {
        let mut s = Session::new();
        let id = s.parse("odd", "(1,1)=a(0,1);0;9;(0,1)");
        match s.registry.get(id) {
            DebugType::Array { element, length } => {
                assert_eq!(*length, 0);
                assert!(s.registry.resolve(*element).is_unknown());
            }
            other => panic!("expected array, got {other:?}"),
        }
        assert_eq!(s.diagnostics.count(FallbackKind::Truncated), 1);
    }

    #[test]
    fn truncated_array_is_unknown() {
        let mut s = Session::new();
        let id = s.parse("broken", "(1,1)=ar(0,1);0");
        assert!(s.registry.resolve(id).is_unknown());
        assert!(s.diagnostics.count(FallbackKind::Truncated) >= 1);
    }

    #[test]
    fn enum_fields_in_order() {
        let mut s = Session::new();
        let id = s.parse("numbers", "ezero:0,one:1,two:2,;");
        let names: Vec<(&str, i64)> = s
            .registry
            .resolve(id)
            .enumerators()
            .iter()
            .map(|f| (f.name.as_str(), f.value))
            .collect();
        assert_eq!(names, vec![("zero", 0), ("one", 1), ("two", 2)]);
        assert_eq!(s.render(id), "enum numbers");
    }

    #[test]
    fn enum_value_fallback() {
        let mut s = Session::new();
        let id = s.parse("e", "(1,4)=ea:-1,b:oops,;");
        let values: Vec<i64> = s.registry.resolve(id).enumerators().iter().map(|f| f.value).collect();
        assert_eq!(values, vec![-1, 0]);
        assert_eq!(s.diagnostics.count(FallbackKind::Numeral), 1);
    }

    #[test]
    fn enum_is_bound_before_its_enumerators() {
        let mut s = Session::new();
        let id = s.parse("flags", "(1,4)=eA:1,B:2,;");
        assert_eq!(s.registry.lookup(TypeNumber::new(1, 4)), Some(id));
        assert_eq!(s.registry.resolve(id).enumerators().len(), 2);
        // dropping the tail keeps the enumerators read so far
        let id = s.parse("cut", "(1,5)=eA:1,B");
        assert_eq!(s.registry.resolve(id).enumerators().len(), 1);
        assert_eq!(s.registry.lookup(TypeNumber::new(1, 5)), Some(id));
        assert_eq!(s.diagnostics.count(FallbackKind::Truncated), 1);
    }

    #[test]
    fn self_referential_struct() {
        let mut s = Session::new();
        s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        let id = s.parse(
            "node",
            "(1,5)=s12i:(0,1),0,32;j:(0,1),32,32;next:(1,6)=*(1,5),64,32;;",
        );
        assert_eq!(s.registry.lookup(TypeNumber::new(1, 5)), Some(id));
        let node = s.registry.resolve(id);
        let fields = node.fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[2].name, "next");
        assert_eq!((fields[2].bit_offset, fields[2].bit_size), (64, 32));
        let pointee = node.resolve(fields[2].ty).target().map(|t| t.id());
        assert_eq!(pointee, Some(id));
        assert_eq!(node.resolve(fields[2].ty).to_string(), "struct node *");
        assert!(s.diagnostics.is_empty());
    }

    #[test]
    fn struct_keeps_members_before_a_missing_delimiter() {
        let mut s = Session::new();
        s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        let id = s.parse("pair", "(1,7)=s8a:(0,1),0,32;b:(0,1),32");
        let node = s.registry.resolve(id);
        assert_eq!(node.fields().len(), 1);
        assert_eq!(node.fields()[0].name, "a");
        assert_eq!(s.diagnostics.count(FallbackKind::Truncated), 1);
    }

    #[test]
    fn union_inside_struct_member() {
        let mut s = Session::new();
        s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        let id = s.parse("outer", "(1,8)=s8u:(1,9)=u4x:(0,1),0,32;;,0,32;k:(0,1),32,32;;");
        let outer = s.registry.resolve(id);
        assert_eq!(outer.fields().len(), 2);
        assert_eq!(outer.resolve(outer.fields()[0].ty).to_string(), "union <anonymous>");
        assert_eq!(outer.fields()[1].name, "k");
    }

    #[test]
    fn cross_reference_is_not_bound() {
        let mut s = Session::new();
        let id = s.parse("", "(1,3)=xsfoo:");
        assert_eq!(s.render(id), "struct foo");
        assert!(matches!(
            s.registry.get(id),
            DebugType::CrossReference { kind: CrossRefKind::Struct, .. }
        ));
        assert_eq!(s.registry.lookup(TypeNumber::new(1, 3)), None);
    }

    #[test]
    fn cross_reference_in_member() {
        let mut s = Session::new();
        let id = s.parse("holder", "(1,10)=s4p:(1,11)=*(1,12)=xeflavour:,0,32;;");
        let holder = s.registry.resolve(id);
        assert_eq!(holder.fields().len(), 1);
        assert_eq!(holder.resolve(holder.fields()[0].ty).to_string(), "enum flavour *");
    }

    #[test]
    fn builtins() {
        let mut s = Session::new();
        let id = s.parse("unsigned", "(0,1)=buc4;0;32;");
        assert_eq!(base_shape(s.registry.get(id)), Some((4, false)));
        let id = s.parse("short", "(0,2)=bs2;0;16;");
        assert_eq!(base_shape(s.registry.get(id)), Some((2, true)));
        let id = s.parse("double", "(0,3)=R2;8;");
        assert_eq!(base_shape(s.registry.get(id)), Some((8, true)));
        let id = s.parse("wchar", "(0,4)=w");
        assert_eq!(base_shape(s.registry.get(id)), Some((8, true)));
        let id = s.parse("complex", "(0,5)=g(0,3);128");
        assert_eq!(base_shape(s.registry.get(id)), Some((16, true)));
    }

    #[test]
    fn negative_builtin_width_is_a_fallback() {
        let mut s = Session::new();
        let id = s.parse("odd", "(0,7)=bs4;0;-8;");
        assert_eq!(base_shape(s.registry.get(id)), Some((0, true)));
        assert_eq!(s.diagnostics.count(FallbackKind::Numeral), 1);
    }

    #[test]
    fn type_attributes_are_skipped() {
        let mut s = Session::new();
        let id = s.parse("long int", "(0,3)=@s64;r(0,3);01000000000000000000000;0777777777777777777777;");
        assert_eq!(base_shape(s.registry.get(id)), Some((8, true)));
    }

    #[test]
    fn qualifiers_resolve_to_the_qualified_type() {
        let mut s = Session::new();
        let int = s.parse("int", "(0,1)=r(0,1);-2147483648;2147483647;");
        let id = s.parse("", "(0,6)=k(0,1)");
        assert_eq!(id, int);
    }

    #[test]
    fn unsupported_descriptor_is_unknown() {
        let mut s = Session::new();
        let id = s.parse("method", "(0,9)=#(0,1),(0,1);");
        assert!(s.registry.resolve(id).is_unknown());
        assert_eq!(s.registry.lookup(TypeNumber::new(0, 9)), Some(id));
    }

    #[test]
    fn later_definition_replaces_placeholder() {
        let mut s = Session::new();
        let early = s.parse("", "(1,1)");
        assert!(s.registry.resolve(early).is_unknown());
        let real = s.parse("int", "(1,1)=r(1,1);-2147483648;2147483647;");
        assert_eq!(s.registry.lookup(TypeNumber::new(1, 1)), Some(real));
    }
}
