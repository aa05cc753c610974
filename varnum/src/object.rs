use std::any::Any;

/// Discriminant shared by every object kind of the serialization framework.
///
/// The discriminant is the only runtime type information an object carries.
/// Codec registries dispatch on it, and binary headers store it as a single
/// byte (see [`crate::bin`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ObjectKind {
    Null = 0,
    Boolean = 1,
    Number = 2,
    String = 3,
    Data = 4,
    Date = 5,
    Array = 6,
    Dictionary = 7,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Null => "null",
            ObjectKind::Boolean => "boolean",
            ObjectKind::Number => "number",
            ObjectKind::String => "string",
            ObjectKind::Data => "data",
            ObjectKind::Date => "date",
            ObjectKind::Array => "array",
            ObjectKind::Dictionary => "dictionary",
        }
    }
}

impl TryFrom<u8> for ObjectKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ObjectKind::Null),
            1 => Ok(ObjectKind::Boolean),
            2 => Ok(ObjectKind::Number),
            3 => Ok(ObjectKind::String),
            4 => Ok(ObjectKind::Data),
            5 => Ok(ObjectKind::Date),
            6 => Ok(ObjectKind::Array),
            7 => Ok(ObjectKind::Dictionary),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle contract every object kind fills in.
///
/// Objects are handed around as `Box<dyn Object>`. The holder of the box owns
/// the object exclusively: [`Object::duplicate`] never shares storage, and
/// [`Object::release`] consumes the handle so it cannot be used afterwards.
pub trait Object: std::fmt::Debug + Any {
    /// Type discriminant of the object.
    fn kind(&self) -> ObjectKind;

    /// Creates an independent copy of the object.
    fn duplicate(&self) -> Box<dyn Object>;

    /// Resets the object to the empty value of its own kind.
    fn reset(&mut self);

    /// Releases the object storage.
    fn release(self: Box<Self>) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
