use std::fmt::Display;

/// Type
///
/// The closed set of types the checker reasons about. Arrays are not a type
/// of their own: indexing an array yields its element type, so "array-ness"
/// lives on the declaration (see `DeclKind::Array`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Type {
    Int,
    Float,
    /// Result of relations and logical connectives. Never declarable.
    Bool,
    /// Only valid as the literal argument of `print`.
    StringLit,
    /// Not yet determined, e.g. the return type of a function whose `return`
    /// has not been visited yet.
    #[default]
    Unknown,
}

impl Type {
    pub fn is_known(&self) -> bool {
        *self != Type::Unknown
    }

    /// The arithmetic types: operands of `+ - * /`, signs and ordering
    /// comparisons. Also the only types a program can declare.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::StringLit => "string",
            Type::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
