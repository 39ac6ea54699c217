use crate::kind::TypeDesc;

/// A single field in a record schema.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub name: String,
    /// Written as a type name in config files (`"int"`, `"List[str]"`).
    #[serde(rename = "type")]
    pub ty: TypeDesc,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeDesc>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Ordered field name → type descriptor mapping of a record type.
///
/// Field position in `fields` is the position of its value in a `Record`.
/// Derived once per record type and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// True when `self` leads `other`: same field names in the same order,
    /// `other` may carry extra trailing fields.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.len() <= other.len()
            && self.fields.iter().zip(&other.fields).all(|(a, b)| a.name == b.name)
    }
}

impl FromIterator<Field> for Schema {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
