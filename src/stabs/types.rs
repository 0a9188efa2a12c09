//! Debug types and the per-session type registry.
//!
//! Types live in an arena owned by [`TypeRegistry`] and refer to each other
//! through [`TypeId`] handles. A struct or enum is allocated and bound to its
//! [`TypeNumber`] before its members are parsed, so a member that points
//! back at the struct resolves to the same handle instead of recursing.
//! Consumers see types through the read-only [`TypeRef`] view.

use super::typenum::TypeNumber;
use std::collections::HashMap;
use std::fmt;

/// Handle of a type in a [`TypeRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tag of a forward-declared aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossRefKind {
    Struct,
    Union,
    Enum,
    Other(char),
}

impl CrossRefKind {
    pub fn from_tag(tag: char) -> Self {
        match tag {
            's' => CrossRefKind::Struct,
            'u' => CrossRefKind::Union,
            'e' => CrossRefKind::Enum,
            other => CrossRefKind::Other(other),
        }
    }
}

/// Member of a struct or union
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    pub bit_offset: i64,
    pub bit_size: i64,
}

/// Enumerator of an enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumField {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DebugType {
    Base {
        name: String,
        size: usize,
        signed: bool,
    },
    Pointer(TypeId),
    Reference(TypeId),
    Array {
        element: TypeId,
        length: i64,
    },
    Struct {
        name: String,
        size: usize,
        is_union: bool,
        fields: Vec<Field>,
    },
    Enum {
        name: String,
        fields: Vec<EnumField>,
    },
    Function(TypeId),
    CrossReference {
        name: String,
        kind: CrossRefKind,
        tag: String,
    },
    Unknown(String),
}

/// Arena of decoded types plus the `TypeNumber` bindings of one stream.
///
/// Bindings are never removed; rebinding a number replaces the earlier
/// entry. The registry spans every compilation unit of the stream.
#[derive(Debug)]
pub struct TypeRegistry {
    arena: Vec<DebugType>,
    numbers: HashMap<TypeNumber, TypeId>,
    void: TypeId,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            arena: Vec::new(),
            numbers: HashMap::new(),
            void: TypeId(0),
        };
        registry.void = registry.alloc(DebugType::Base {
            name: "void".to_string(),
            size: 0,
            signed: false,
        });
        registry
    }

    pub fn alloc(&mut self, ty: DebugType) -> TypeId {
        let id = TypeId(self.arena.len() as u32);
        self.arena.push(ty);
        id
    }

    /// The shared `void` type
    pub fn void(&self) -> TypeId {
        self.void
    }

    /// Ids are only minted by this registry, so indexing cannot miss
    pub fn get(&self, id: TypeId) -> &DebugType {
        &self.arena[id.index()]
    }

    pub fn bind(&mut self, number: TypeNumber, id: TypeId) {
        self.numbers.insert(number, id);
    }

    pub fn lookup(&self, number: TypeNumber) -> Option<TypeId> {
        self.numbers.get(&number).copied()
    }

    /// Appends a member to a struct still being parsed
    pub fn push_field(&mut self, id: TypeId, field: Field) {
        if let DebugType::Struct { fields, .. } = &mut self.arena[id.index()] {
            fields.push(field);
        }
    }

    /// Appends an enumerator to an enum still being parsed
    pub fn push_enumerator(&mut self, id: TypeId, enumerator: EnumField) {
        if let DebugType::Enum { fields, .. } = &mut self.arena[id.index()] {
            fields.push(enumerator);
        }
    }

    pub fn resolve(&self, id: TypeId) -> TypeRef<'_> {
        TypeRef { registry: self, id }
    }

    /// Looks up a bound number and returns a view of its type
    pub fn by_number(&self, number: TypeNumber) -> Option<TypeRef<'_>> {
        self.lookup(number).map(|id| self.resolve(id))
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

/// Read-only view of one type and its registry
#[derive(Clone, Copy)]
pub struct TypeRef<'a> {
    registry: &'a TypeRegistry,
    id: TypeId,
}

impl<'a> TypeRef<'a> {
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn kind(&self) -> &'a DebugType {
        self.registry.get(self.id)
    }

    pub fn resolve(&self, id: TypeId) -> TypeRef<'a> {
        self.registry.resolve(id)
    }

    pub fn name(&self) -> Option<&'a str> {
        match self.kind() {
            DebugType::Base { name, .. }
            | DebugType::Struct { name, .. }
            | DebugType::Enum { name, .. }
            | DebugType::CrossReference { name, .. }
            | DebugType::Unknown(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Pointee, referent, element or return type
    pub fn target(&self) -> Option<TypeRef<'a>> {
        match *self.kind() {
            DebugType::Pointer(id)
            | DebugType::Reference(id)
            | DebugType::Function(id)
            | DebugType::Array { element: id, .. } => Some(self.resolve(id)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &'a [Field] {
        match self.kind() {
            DebugType::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn enumerators(&self) -> &'a [EnumField] {
        match self.kind() {
            DebugType::Enum { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.kind(), DebugType::Unknown(_))
    }
}

impl fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

fn or_anonymous(name: &str) -> &str {
    if name.is_empty() { "<anonymous>" } else { name }
}

/// C-like rendering; aggregates print by name only
impl fmt::Display for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            DebugType::Base { name, size, signed } => {
                if name.is_empty() {
                    let sign = if *signed { "signed" } else { "unsigned" };
                    write!(f, "<{size}-byte {sign}>")
                } else {
                    f.write_str(name)
                }
            }
            DebugType::Pointer(id) => write!(f, "{} *", self.resolve(*id)),
            DebugType::Reference(id) => write!(f, "{} &", self.resolve(*id)),
            DebugType::Array { element, length } => {
                write!(f, "{} [{}]", self.resolve(*element), length)
            }
            DebugType::Struct { name, is_union, .. } => {
                let keyword = if *is_union { "union" } else { "struct" };
                write!(f, "{} {}", keyword, or_anonymous(name))
            }
            DebugType::Enum { name, .. } => write!(f, "enum {}", or_anonymous(name)),
            DebugType::Function(id) => write!(f, "{} ()", self.resolve(*id)),
            DebugType::CrossReference { tag, .. } => f.write_str(tag),
            DebugType::Unknown(name) => {
                if name.is_empty() {
                    f.write_str("<unknown>")
                } else {
                    f.write_str(name)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(registry: &mut TypeRegistry) -> TypeId {
        registry.alloc(DebugType::Base {
            name: "int".to_string(),
            size: 4,
            signed: true,
        })
    }

    #[test]
    fn void_is_preallocated() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve(registry.void()).to_string(), "void");
    }

    #[test]
    fn rebinding_replaces_the_earlier_entry() {
        let mut registry = TypeRegistry::new();
        let number = TypeNumber::new(1, 2);
        let placeholder = registry.alloc(DebugType::Unknown("node".to_string()));
        registry.bind(number, placeholder);
        let real = int(&mut registry);
        registry.bind(number, real);
        assert_eq!(registry.lookup(number), Some(real));
    }

    #[test]
    fn struct_members_are_appended_in_place() {
        let mut registry = TypeRegistry::new();
        let node = registry.alloc(DebugType::Struct {
            name: "node".to_string(),
            size: 8,
            is_union: false,
            fields: Vec::new(),
        });
        let next = registry.alloc(DebugType::Pointer(node));
        registry.push_field(
            node,
            Field {
                name: "next".to_string(),
                ty: next,
                bit_offset: 0,
                bit_size: 32,
            },
        );
        let view = registry.resolve(node);
        assert_eq!(view.fields().len(), 1);
        let pointee = view.resolve(view.fields()[0].ty).target().map(|t| t.id());
        assert_eq!(pointee, Some(node));
        assert_eq!(registry.resolve(next).to_string(), "struct node *");
    }

    #[test]
    fn display_of_composites() {
        let mut registry = TypeRegistry::new();
        let int = int(&mut registry);
        let array = registry.alloc(DebugType::Array { element: int, length: 10 });
        let function = registry.alloc(DebugType::Function(int));
        let xref = registry.alloc(DebugType::CrossReference {
            name: String::new(),
            kind: CrossRefKind::Union,
            tag: "union u".to_string(),
        });
        assert_eq!(registry.resolve(array).to_string(), "int [10]");
        assert_eq!(registry.resolve(function).to_string(), "int ()");
        assert_eq!(registry.resolve(xref).to_string(), "union u");
    }

    #[test]
    fn names_of_named_kinds_only() {
        let mut registry = TypeRegistry::new();
        let int = int(&mut registry);
        let pointer = registry.alloc(DebugType::Pointer(int));
        let colour = registry.alloc(DebugType::Enum {
            name: "colour".to_string(),
            fields: Vec::new(),
        });
        registry.push_enumerator(
            colour,
            EnumField {
                name: "red".to_string(),
                value: 0,
            },
        );
        assert_eq!(registry.resolve(int).name(), Some("int"));
        assert_eq!(registry.resolve(pointer).name(), None);
        assert_eq!(registry.resolve(colour).name(), Some("colour"));
        assert_eq!(registry.resolve(colour).enumerators().len(), 1);
    }
}
