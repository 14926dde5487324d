// Intermediate type model handed from resolution to rendering. Every shape
// decision is made before a `Type` reaches the renderer.

/// Type references shared by the resolver and renderer.
pub mod refs {
    pub const STRING: &str = "String";
    pub const INTEGER: &str = "Integer";
    pub const BOOLEAN: &str = "T::Boolean";
    pub const UNTYPED: &str = "T.untyped";
    pub const STRUCT: &str = "T::Struct";
}

/// One emitted declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    /// Identifier as written in the document (or synthesized for nested objects).
    pub schema_name: String,
    pub type_name: String,
    pub file_name: String,
    pub comment: String,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Object {
        base_class: &'static str,
        /// Sorted by `name`.
        properties: Vec<Property>,
        /// Value type of an open map, if the object allows extra keys.
        additional_properties: Option<String>,
    },
    Alias {
        /// `None` together with `is_array` means "array of untyped".
        alias: Option<String>,
        is_array: bool,
        additional_properties: Option<String>,
    },
    Enum(Vec<EnumValue>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    /// Wire name; differs from `name` when normalization changed it.
    pub schema_name: String,
    /// Element type when `is_array` is set.
    pub type_: String,
    pub required: bool,
    pub is_array: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: String,
}

impl Type {
    pub fn is_object(&self) -> bool {
        matches!(self.shape, Shape::Object { .. })
    }

    pub fn is_enum(&self) -> bool {
        matches!(&self.shape, Shape::Enum(values) if !values.is_empty())
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.shape, Shape::Alias { .. })
    }

    pub fn properties(&self) -> &[Property] {
        match &self.shape {
            Shape::Object { properties, .. } => properties,
            _ => &[],
        }
    }

    pub fn enum_values(&self) -> &[EnumValue] {
        match &self.shape {
            Shape::Enum(values) => values,
            _ => &[],
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match &self.shape {
            Shape::Alias { alias, .. } => alias.as_deref(),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.shape, Shape::Alias { is_array: true, .. })
    }

    pub fn additional_properties(&self) -> Option<&str> {
        match &self.shape {
            Shape::Object { additional_properties, .. }
            | Shape::Alias { additional_properties, .. } => additional_properties.as_deref(),
            Shape::Enum(_) => None,
        }
    }
}

impl Property {
    /// True when the wire name must be spelled out next to the member.
    pub fn renamed(&self) -> bool {
        self.name != self.schema_name
    }
}
