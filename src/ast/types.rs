use std::fmt::Display;

/// Concrete base of a type. `Array` carries its element type in the
/// surrounding [`Type`], not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    None,
    Any,
    Bool,
    Int,
    Float,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
    Array,
    Function,
    UserDefined(String),
}

/// Coarse operator-compatibility class of a type, distinct from the type
/// itself. Computed once at construction, never re-derived ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Number,
    String,
    Bool,
    Array,
    Struct,
    None,
}

fn kind_of(base: &BaseType) -> Kind {
    match base {
        BaseType::Bool => Kind::Bool,
        BaseType::Int
        | BaseType::Float
        | BaseType::I8
        | BaseType::I16
        | BaseType::I32
        | BaseType::I64
        | BaseType::U8
        | BaseType::U16
        | BaseType::U32
        | BaseType::U64
        | BaseType::F32
        | BaseType::F64 => Kind::Number,
        BaseType::Char | BaseType::String => Kind::String,
        BaseType::Array => Kind::Array,
        BaseType::UserDefined(_) => Kind::Struct,
        BaseType::None | BaseType::Any | BaseType::Function => Kind::None,
    }
}

/// A language type. Arrays carry an optional element type plus an `empty`
/// flag meaning "no element type known yet", which lets `[]` unify with
/// any array type on first use.
#[derive(Debug, Clone)]
pub struct Type {
    pub base: BaseType,
    pub kind: Kind,
    pub sub_type: Option<Box<Type>>,
    pub empty: bool,
}

impl Type {
    pub fn new(base: BaseType) -> Self {
        let kind = kind_of(&base);
        Type {
            base,
            kind,
            sub_type: None,
            empty: false,
        }
    }

    pub fn none() -> Self {
        Type::new(BaseType::None)
    }

    pub fn any() -> Self {
        Type::new(BaseType::Any)
    }

    pub fn int() -> Self {
        Type::new(BaseType::Int)
    }

    pub fn bool() -> Self {
        Type::new(BaseType::Bool)
    }

    pub fn array(sub_type: Type) -> Self {
        Type {
            base: BaseType::Array,
            kind: Kind::Array,
            sub_type: Some(Box::new(sub_type)),
            empty: false,
        }
    }

    /// An array literal with no elements: the element type is unknown
    /// until unification against a concrete array type.
    pub fn empty_array() -> Self {
        Type {
            base: BaseType::Array,
            kind: Kind::Array,
            sub_type: None,
            empty: true,
        }
    }

    pub fn is_array(&self) -> bool {
        self.base == BaseType::Array
    }

    /// Integer types accepted as array indices, shift amounts, and
    /// modulo divisors. Generic `int` literals qualify.
    pub fn is_unsigned_like(&self) -> bool {
        matches!(
            self.base,
            BaseType::Int | BaseType::U8 | BaseType::U16 | BaseType::U32 | BaseType::U64
        )
    }

    /// The element type of an array; `Any` while the element type is
    /// still unknown.
    pub fn element_type(&self) -> Type {
        match &self.sub_type {
            Some(sub_type) => (**sub_type).clone(),
            None => Type::any(),
        }
    }

    /// Resolves two types to one, applying the array rules: an `empty`
    /// array takes the other side's shape, an array against a scalar
    /// requires the scalar to match the element type (append), and two
    /// arrays unify element-wise. Returns `None` on a genuine mismatch.
    pub fn unify(&self, other: &Type) -> Option<Type> {
        match (self.is_array(), other.is_array()) {
            (true, true) => {
                if self.empty {
                    return Some(other.clone());
                }
                if other.empty {
                    return Some(self.clone());
                }
                let sub = self.element_type().unify(&other.element_type())?;
                Some(Type::array(sub))
            }
            (true, false) => {
                if self.empty {
                    return Some(Type::array(other.clone()));
                }
                if self.element_type() == *other {
                    Some(self.clone())
                } else {
                    None
                }
            }
            (false, true) => other.unify(self),
            (false, false) => {
                if self == other {
                    Some(self.clone())
                } else {
                    None
                }
            }
        }
    }
}

/// Equality follows the unification rules rather than structural identity:
/// `Any` equals everything, arrays compare by element-type unification
/// (an `empty` array equals any array), and everything else compares by
/// canonical string form.
impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        if self.base == BaseType::Any || other.base == BaseType::Any {
            return true;
        }
        match (self.is_array(), other.is_array()) {
            (true, true) => {
                if self.empty || other.empty {
                    return true;
                }
                self.element_type() == other.element_type()
            }
            (false, false) => self.to_string() == other.to_string(),
            _ => false,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.base {
            BaseType::None => write!(f, "none"),
            BaseType::Any => write!(f, "any"),
            BaseType::Bool => write!(f, "bool"),
            BaseType::Int => write!(f, "int"),
            BaseType::Float => write!(f, "float"),
            BaseType::I8 => write!(f, "i8"),
            BaseType::I16 => write!(f, "i16"),
            BaseType::I32 => write!(f, "i32"),
            BaseType::I64 => write!(f, "i64"),
            BaseType::U8 => write!(f, "u8"),
            BaseType::U16 => write!(f, "u16"),
            BaseType::U32 => write!(f, "u32"),
            BaseType::U64 => write!(f, "u64"),
            BaseType::F32 => write!(f, "f32"),
            BaseType::F64 => write!(f, "f64"),
            BaseType::Char => write!(f, "char"),
            BaseType::String => write!(f, "string"),
            BaseType::Function => write!(f, "func"),
            BaseType::UserDefined(name) => write!(f, "{}", name),
            BaseType::Array => match &self.sub_type {
                Some(sub_type) => write!(f, "[]{}", sub_type),
                None => write!(f, "[]"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_derivation() {
        assert_eq!(Type::int().kind, Kind::Number);
        assert_eq!(Type::new(BaseType::F32).kind, Kind::Number);
        assert_eq!(Type::new(BaseType::String).kind, Kind::String);
        assert_eq!(Type::new(BaseType::Char).kind, Kind::String);
        assert_eq!(Type::bool().kind, Kind::Bool);
        assert_eq!(Type::array(Type::int()).kind, Kind::Array);
        assert_eq!(Type::new(BaseType::UserDefined(String::from("vec"))).kind, Kind::Struct);
        assert_eq!(Type::none().kind, Kind::None);
    }

    #[test]
    fn test_display_canonical_forms() {
        assert_eq!(Type::int().to_string(), "int");
        assert_eq!(Type::array(Type::int()).to_string(), "[]int");
        assert_eq!(Type::array(Type::array(Type::new(BaseType::U8))).to_string(), "[][]u8");
        assert_eq!(Type::empty_array().to_string(), "[]");
    }

    #[test]
    fn test_any_equals_everything() {
        assert_eq!(Type::any(), Type::int());
        assert_eq!(Type::array(Type::int()), Type::any());
        assert_eq!(Type::any(), Type::none());
    }

    #[test]
    fn test_scalar_equality_is_canonical() {
        assert_eq!(Type::int(), Type::int());
        assert_ne!(Type::int(), Type::new(BaseType::I32));
        assert_ne!(Type::int(), Type::new(BaseType::Float));
        assert_ne!(Type::int(), Type::array(Type::int()));
    }

    #[test]
    fn test_empty_array_equals_any_array() {
        assert_eq!(Type::empty_array(), Type::array(Type::int()));
        assert_eq!(Type::array(Type::new(BaseType::String)), Type::empty_array());
        assert_ne!(Type::empty_array(), Type::int());
    }

    #[test]
    fn test_unify_empty_is_identity() {
        let concrete = Type::array(Type::int());
        let left = Type::empty_array().unify(&concrete).unwrap();
        let right = concrete.unify(&Type::empty_array()).unwrap();

        assert_eq!(left.to_string(), "[]int");
        assert_eq!(right.to_string(), "[]int");
    }

    #[test]
    fn test_unify_array_with_element() {
        let array = Type::array(Type::int());
        let unified = array.unify(&Type::int()).unwrap();
        assert_eq!(unified.to_string(), "[]int");

        assert!(array.unify(&Type::new(BaseType::String)).is_none());
    }

    #[test]
    fn test_unify_nested_arrays() {
        let left = Type::array(Type::empty_array());
        let right = Type::array(Type::array(Type::int()));
        let unified = left.unify(&right).unwrap();

        assert_eq!(unified.to_string(), "[][]int");
    }

    #[test]
    fn test_unify_scalar_mismatch() {
        assert!(Type::int().unify(&Type::new(BaseType::String)).is_none());
        assert!(Type::int().unify(&Type::int()).is_some());
    }
}
