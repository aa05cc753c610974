mod binary;
mod coerce;
mod text;

use std::{any::Any, fmt, str::FromStr};

use snafu::{OptionExt, ResultExt, Snafu};
use tracing::{error, trace};

use crate::{
    object::{Object, ObjectKind},
    registry::CodecRegistry,
};

#[derive(Debug, Snafu)]
pub struct Error(error::Error);
type Result<T> = std::result::Result<T, Error>;

/// Element name of the textual form.
pub const ELEMENT: &str = "number";

/// Representation stored inside a [`Number`].
///
/// The set is closed: unsigned and signed integers of 8, 16, 32 and 64 bits,
/// plus single and double precision floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl NumberType {
    pub const ALL: [NumberType; 10] = [
        NumberType::U8,
        NumberType::I8,
        NumberType::U16,
        NumberType::I16,
        NumberType::U32,
        NumberType::I32,
        NumberType::U64,
        NumberType::I64,
        NumberType::F32,
        NumberType::F64,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberType::U8 => "u8",
            NumberType::I8 => "i8",
            NumberType::U16 => "u16",
            NumberType::I16 => "i16",
            NumberType::U32 => "u32",
            NumberType::I32 => "i32",
            NumberType::U64 => "u64",
            NumberType::I64 => "i64",
            NumberType::F32 => "f32",
            NumberType::F64 => "f64",
        }
    }
}

impl fmt::Display for NumberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NumberType {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self> {
        Ok(NumberType::ALL
            .into_iter()
            .find(|number_type| number_type.as_str().eq_ignore_ascii_case(source))
            .with_context(|| error::UnknownType { name: source })?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Value {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
}

/// Numeric variant object.
///
/// Holds exactly one value in one of the ten [`NumberType`] representations.
/// The representation is fixed at construction; [`Number::reset`] only
/// zeroes the value. Every accessor works whatever the stored
/// representation is:
///
/// - integer targets extend the stored value to 64 bits (sign-extending signed
///   sources) and truncate to the target width in two's complement;
/// - floating point sources truncate toward zero when read as integers;
/// - floating point targets are converted straight from the stored value.
///
/// # Examples
/// ```
/// use varnum::Number;
///
/// let number = Number::from_i16(-2);
/// assert_eq!(number.as_u8(), 0xfe);
/// assert_eq!(number.as_i64(), -2);
/// assert_eq!(number.as_f64(), -2.0);
/// ```
#[derive(Debug, PartialEq)]
pub struct Number {
    value: Value,
}

impl Number {
    pub fn from_u8(value: u8) -> Self {
        Self {
            value: Value::U8(value),
        }
    }

    pub fn from_i8(value: i8) -> Self {
        Self {
            value: Value::I8(value),
        }
    }

    pub fn from_u16(value: u16) -> Self {
        Self {
            value: Value::U16(value),
        }
    }

    pub fn from_i16(value: i16) -> Self {
        Self {
            value: Value::I16(value),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self {
            value: Value::U32(value),
        }
    }

    pub fn from_i32(value: i32) -> Self {
        Self {
            value: Value::I32(value),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self {
            value: Value::U64(value),
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            value: Value::I64(value),
        }
    }

    pub fn from_f32(value: f32) -> Self {
        Self {
            value: Value::F32(value),
        }
    }

    pub fn from_f64(value: f64) -> Self {
        Self {
            value: Value::F64(value),
        }
    }

    /// Parses `text` as a value of the given representation.
    ///
    /// Unlike the textual codec, no representation is inferred: the text must
    /// be a valid literal of `number_type`.
    pub fn parse_as(number_type: NumberType, text: &str) -> Result<Self> {
        let text = text.trim();
        let number = match number_type {
            NumberType::U8 => text.parse().map(Self::from_u8).ok(),
            NumberType::I8 => text.parse().map(Self::from_i8).ok(),
            NumberType::U16 => text.parse().map(Self::from_u16).ok(),
            NumberType::I16 => text.parse().map(Self::from_i16).ok(),
            NumberType::U32 => text.parse().map(Self::from_u32).ok(),
            NumberType::I32 => text.parse().map(Self::from_i32).ok(),
            NumberType::U64 => text.parse().map(Self::from_u64).ok(),
            NumberType::I64 => text.parse().map(Self::from_i64).ok(),
            NumberType::F32 => text.parse().map(Self::from_f32).ok(),
            NumberType::F64 => text.parse().map(Self::from_f64).ok(),
        };

        Ok(number.with_context(|| error::Malformed { text })?)
    }

    pub fn number_type(&self) -> NumberType {
        match self.value {
            Value::U8(_) => NumberType::U8,
            Value::I8(_) => NumberType::I8,
            Value::U16(_) => NumberType::U16,
            Value::I16(_) => NumberType::I16,
            Value::U32(_) => NumberType::U32,
            Value::I32(_) => NumberType::I32,
            Value::U64(_) => NumberType::U64,
            Value::I64(_) => NumberType::I64,
            Value::F32(_) => NumberType::F32,
            Value::F64(_) => NumberType::F64,
        }
    }

    pub fn as_u8(&self) -> u8 {
        self.as_u64() as u8
    }

    pub fn as_i8(&self) -> i8 {
        self.as_i64() as i8
    }

    pub fn as_u16(&self) -> u16 {
        self.as_u64() as u16
    }

    pub fn as_i16(&self) -> i16 {
        self.as_i64() as i16
    }

    pub fn as_u32(&self) -> u32 {
        self.as_u64() as u32
    }

    pub fn as_i32(&self) -> i32 {
        self.as_i64() as i32
    }

    /// Canonical unsigned extraction every narrower unsigned accessor goes through.
    pub fn as_u64(&self) -> u64 {
        coerce::to_u64(self.value)
    }

    /// Canonical signed extraction every narrower signed accessor goes through.
    pub fn as_i64(&self) -> i64 {
        coerce::to_i64(self.value)
    }

    pub fn as_f32(&self) -> f32 {
        coerce::to_f32(self.value)
    }

    pub fn as_f64(&self) -> f64 {
        coerce::to_f64(self.value)
    }

    /// Reads the value as any of the ten primitive representations.
    pub fn get<T: Primitive>(&self) -> T {
        T::extract(self)
    }

    /// Creates an independent number with the same representation and value.
    pub fn duplicate(&self) -> Self {
        match self.value {
            Value::U8(value) => Self::from_u8(value),
            Value::I8(value) => Self::from_i8(value),
            Value::U16(value) => Self::from_u16(value),
            Value::I16(value) => Self::from_i16(value),
            Value::U32(value) => Self::from_u32(value),
            Value::I32(value) => Self::from_i32(value),
            Value::U64(value) => Self::from_u64(value),
            Value::I64(value) => Self::from_i64(value),
            Value::F32(value) => Self::from_f32(value),
            Value::F64(value) => Self::from_f64(value),
        }
    }

    /// Sets the value to zero of the stored representation.
    pub fn reset(&mut self) {
        self.value = match self.value {
            Value::U8(_) => Value::U8(0),
            Value::I8(_) => Value::I8(0),
            Value::U16(_) => Value::U16(0),
            Value::I16(_) => Value::I16(0),
            Value::U32(_) => Value::U32(0),
            Value::I32(_) => Value::I32(0),
            Value::U64(_) => Value::U64(0),
            Value::I64(_) => Value::I64(0),
            Value::F32(_) => Value::F32(0.0),
            Value::F64(_) => Value::F64(0.0),
        };
    }

    /// Views a framework object as a number.
    ///
    /// # Errors
    /// Returns an invalid handle error when the object kind is not
    /// [`ObjectKind::Number`]. Callers that want the zero value instead can
    /// use `Number::value_of::<T>(object).unwrap_or_default()`.
    pub fn cast(object: &dyn Object) -> Result<&Number> {
        let kind = object.kind();

        match object.as_any().downcast_ref::<Number>() {
            Some(number) if kind == ObjectKind::Number => Ok(number),
            _ => {
                error!(%kind, "object is not a number");
                Err(error::Error::InvalidHandle { got: kind }.into())
            }
        }
    }

    pub fn cast_mut(object: &mut dyn Object) -> Result<&mut Number> {
        let kind = object.kind();

        match object.as_any_mut().downcast_mut::<Number>() {
            Some(number) if kind == ObjectKind::Number => Ok(number),
            _ => {
                error!(%kind, "object is not a number");
                Err(error::Error::InvalidHandle { got: kind }.into())
            }
        }
    }

    /// Reads a framework object as the primitive `T`.
    pub fn value_of<T: Primitive>(object: &dyn Object) -> Result<T> {
        Ok(Self::cast(object)?.get())
    }

    /// Installs the textual and binary readers.
    ///
    /// The element `number` is bound to the textual reader and the
    /// [`ObjectKind::Number`] kind to the binary reader. The first rejected
    /// binding is returned; bindings installed before it are kept.
    pub fn init_reader(registry: &mut dyn CodecRegistry) -> Result<()> {
        registry
            .set_xml_reader(ELEMENT, text::read)
            .context(error::Register)?;
        registry
            .set_bin_reader(ObjectKind::Number, binary::read)
            .context(error::Register)?;

        Ok(())
    }

    /// Installs the textual and binary writers for [`ObjectKind::Number`].
    pub fn init_writer(registry: &mut dyn CodecRegistry) -> Result<()> {
        registry
            .set_xml_writer(ObjectKind::Number, text::write)
            .context(error::Register)?;
        registry
            .set_bin_writer(ObjectKind::Number, binary::write)
            .context(error::Register)?;

        Ok(())
    }
}

impl Clone for Number {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl Object for Number {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Number
    }

    fn duplicate(&self) -> Box<dyn Object> {
        Box::new(Number::duplicate(self))
    }

    fn reset(&mut self) {
        Number::reset(self)
    }

    fn release(self: Box<Self>) {
        trace!(number_type = %self.number_type(), "releasing number");
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Text form of the stored value.
///
/// Integers print as plain decimals. Floats use the shortest representation
/// that reads back to the same value, and always contain a `.` for finite
/// values.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::U8(value) => write!(f, "{value}"),
            Value::I8(value) => write!(f, "{value}"),
            Value::U16(value) => write!(f, "{value}"),
            Value::I16(value) => write!(f, "{value}"),
            Value::U32(value) => write!(f, "{value}"),
            Value::I32(value) => write!(f, "{value}"),
            Value::U64(value) => write!(f, "{value}"),
            Value::I64(value) => write!(f, "{value}"),
            Value::F32(value) => write_float(f, value.to_string()),
            Value::F64(value) => write_float(f, value.to_string()),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, text: String) -> fmt::Result {
    if text.bytes().all(|c| c.is_ascii_digit() || c == b'-') {
        write!(f, "{text}.0")
    } else {
        write!(f, "{text}")
    }
}

/// Primitive types a [`Number`] can store and be read as.
pub trait Primitive: Copy + Default + sealed::Sealed {
    const TYPE: NumberType;

    fn extract(number: &Number) -> Self;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! primitive {
    ($($ty:ty => $variant:ident, $from:ident, $get:ident;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const TYPE: NumberType = NumberType::$variant;

                fn extract(number: &Number) -> Self {
                    number.$get()
                }
            }

            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Self::$from(value)
                }
            }
        )*
    };
}

primitive! {
    u8 => U8, from_u8, as_u8;
    i8 => I8, from_i8, as_i8;
    u16 => U16, from_u16, as_u16;
    i16 => I16, from_i16, as_i16;
    u32 => U32, from_u32, as_u32;
    i32 => I32, from_i32, as_i32;
    u64 => U64, from_u64, as_u64;
    i64 => I64, from_i64, as_i64;
    f32 => F32, from_f32, as_f32;
    f64 => F64, from_f64, as_f64;
}

mod error {
    use snafu::Snafu;

    use crate::object::ObjectKind;

    #[derive(Debug, Snafu)]
    #[snafu(visibility(pub(super)), context(suffix(false)))]
    pub(super) enum Error {
        #[snafu(display("Unknown number type {name:?}"))]
        UnknownType { name: String },

        #[snafu(display("Expected a number object, got {got}"))]
        InvalidHandle { got: ObjectKind },

        #[snafu(display("Number element has no text"))]
        MissingText,

        #[snafu(display("Malformed number {text:?}"))]
        Malformed { text: String },

        #[snafu(display("Stream ended inside a number element"))]
        UnexpectedEnd,

        #[snafu(display("Binary number reader is not implemented"))]
        NotImplemented,

        #[snafu(display("Failed to read number element"))]
        Xml { source: crate::xml::Error },

        #[snafu(display("Failed to write number element"))]
        Write { source: std::io::Error },

        #[snafu(display("Failed to write number header"))]
        Header { source: crate::bin::Error },

        #[snafu(display("Failed to register number codec"))]
        Register { source: crate::registry::Error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BinReaderFn, BinWriterFn, Registry, XmlReaderFn, XmlWriterFn};

    #[test]
    fn test_constructor_accessor_identity() {
        let u8_number = Number::from_u8(u8::MAX);
        assert_eq!(u8_number.number_type(), NumberType::U8);
        assert_eq!(u8_number.as_u8(), u8::MAX);

        let i8_number = Number::from_i8(i8::MIN);
        assert_eq!(i8_number.number_type(), NumberType::I8);
        assert_eq!(i8_number.as_i8(), i8::MIN);

        let u16_number = Number::from_u16(0xbeef);
        assert_eq!(u16_number.number_type(), NumberType::U16);
        assert_eq!(u16_number.as_u16(), 0xbeef);

        let i16_number = Number::from_i16(-12345);
        assert_eq!(i16_number.number_type(), NumberType::I16);
        assert_eq!(i16_number.as_i16(), -12345);

        let u32_number = Number::from_u32(u32::MAX);
        assert_eq!(u32_number.number_type(), NumberType::U32);
        assert_eq!(u32_number.as_u32(), u32::MAX);

        let i32_number = Number::from_i32(i32::MIN);
        assert_eq!(i32_number.number_type(), NumberType::I32);
        assert_eq!(i32_number.as_i32(), i32::MIN);

        let u64_number = Number::from_u64(u64::MAX);
        assert_eq!(u64_number.number_type(), NumberType::U64);
        assert_eq!(u64_number.as_u64(), u64::MAX);

        let i64_number = Number::from_i64(i64::MIN);
        assert_eq!(i64_number.number_type(), NumberType::I64);
        assert_eq!(i64_number.as_i64(), i64::MIN);

        let f32_number = Number::from_f32(-1.25e-3);
        assert_eq!(f32_number.number_type(), NumberType::F32);
        assert_eq!(f32_number.as_f32(), -1.25e-3);

        let f64_number = Number::from_f64(6.02214076e23);
        assert_eq!(f64_number.number_type(), NumberType::F64);
        assert_eq!(f64_number.as_f64(), 6.02214076e23);
    }

    #[test]
    fn test_generic_access() {
        let number = Number::from(-1i32);
        assert_eq!(number.number_type(), <i32 as Primitive>::TYPE);

        assert_eq!(number.get::<u8>(), u8::MAX);
        assert_eq!(number.get::<i8>(), -1);
        assert_eq!(number.get::<u16>(), u16::MAX);
        assert_eq!(number.get::<i16>(), -1);
        assert_eq!(number.get::<u32>(), u32::MAX);
        assert_eq!(number.get::<i32>(), -1);
        assert_eq!(number.get::<u64>(), u64::MAX);
        assert_eq!(number.get::<i64>(), -1);
        assert_eq!(number.get::<f32>(), -1.0);
        assert_eq!(number.get::<f64>(), -1.0);
    }

    #[test]
    fn test_duplicate_is_independent() {
        let numbers = [
            Number::from_u8(7),
            Number::from_i8(-7),
            Number::from_u16(700),
            Number::from_i16(-700),
            Number::from_u32(70_000),
            Number::from_i32(-70_000),
            Number::from_u64(7_000_000_000),
            Number::from_i64(-7_000_000_000),
            Number::from_f32(7.5),
            Number::from_f64(-7.25),
        ];

        for original in &numbers {
            let mut copy = original.duplicate();
            assert_eq!(copy.number_type(), original.number_type());
            assert_eq!(&copy, original);
            assert_eq!(copy.as_u64(), original.as_u64());
            assert_eq!(copy.as_i64(), original.as_i64());
            assert_eq!(copy.as_f64(), original.as_f64());

            copy.reset();
            assert_eq!(copy.as_f64(), 0.0);
            assert_ne!(original.as_f64(), 0.0, "{original:?} changed by reset of its copy");
        }
    }

    #[test]
    fn test_reset_keeps_representation() {
        for number_type in NumberType::ALL {
            let mut number = Number::parse_as(number_type, "42").unwrap();
            assert_eq!(number.as_u64(), 42);

            number.reset();
            assert_eq!(number.number_type(), number_type);
            assert_eq!(number.as_u64(), 0);
            assert_eq!(number.as_i64(), 0);
            assert_eq!(number.as_f64(), 0.0);
        }
    }

    #[test]
    fn test_object_lifecycle() {
        let mut object: Box<dyn Object> = Box::new(Number::from_i16(-300));
        assert_eq!(object.kind(), ObjectKind::Number);

        let copy = object.duplicate();
        object.reset();

        assert_eq!(Number::value_of::<i16>(object.as_ref()).unwrap(), 0);
        assert_eq!(Number::value_of::<i16>(copy.as_ref()).unwrap(), -300);
        assert_eq!(
            Number::cast(copy.as_ref()).unwrap().number_type(),
            NumberType::I16
        );

        Number::cast_mut(object.as_mut()).unwrap().reset();
        object.release();
        copy.release();
    }

    #[derive(Debug)]
    struct Text;

    impl Object for Text {
        fn kind(&self) -> ObjectKind {
            ObjectKind::String
        }

        fn duplicate(&self) -> Box<dyn Object> {
            Box::new(Text)
        }

        fn reset(&mut self) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_invalid_handle() {
        let mut object = Text;

        let err = Number::cast(&object).unwrap_err();
        assert!(matches!(
            err.0,
            error::Error::InvalidHandle {
                got: ObjectKind::String
            }
        ));
        assert!(Number::cast_mut(&mut object).is_err());

        fn zero_of<T: Primitive + PartialEq + fmt::Debug>(object: &dyn Object) {
            let result = Number::value_of::<T>(object);
            assert!(result.is_err(), "{:?} read from a foreign object", T::TYPE);
            assert_eq!(result.unwrap_or_default(), T::default(), "{:?}", T::TYPE);
        }

        zero_of::<u8>(&object);
        zero_of::<i8>(&object);
        zero_of::<u16>(&object);
        zero_of::<i16>(&object);
        zero_of::<u32>(&object);
        zero_of::<i32>(&object);
        zero_of::<u64>(&object);
        zero_of::<i64>(&object);
        zero_of::<f32>(&object);
        zero_of::<f64>(&object);
    }

    #[test]
    fn test_number_type_from_str() {
        assert_eq!("u8".parse::<NumberType>().unwrap(), NumberType::U8);
        assert_eq!("I64".parse::<NumberType>().unwrap(), NumberType::I64);
        assert_eq!("f32".parse::<NumberType>().unwrap(), NumberType::F32);
        assert!("u128".parse::<NumberType>().is_err());
        assert!("".parse::<NumberType>().is_err());
    }

    #[test]
    fn test_parse_as() {
        struct TestCase {
            name: &'static str,
            number_type: NumberType,
            input: &'static str,
            expected: Option<Number>,
        }

        let test_cases = [
            TestCase {
                name: "u8 upper bound",
                number_type: NumberType::U8,
                input: "255",
                expected: Some(Number::from_u8(255)),
            },
            TestCase {
                name: "u8 overflow",
                number_type: NumberType::U8,
                input: "256",
                expected: None,
            },
            TestCase {
                name: "negative unsigned",
                number_type: NumberType::U32,
                input: "-1",
                expected: None,
            },
            TestCase {
                name: "i16 with whitespace",
                number_type: NumberType::I16,
                input: " -32768\n",
                expected: Some(Number::from_i16(i16::MIN)),
            },
            TestCase {
                name: "float",
                number_type: NumberType::F32,
                input: "0.5",
                expected: Some(Number::from_f32(0.5)),
            },
            TestCase {
                name: "garbage",
                number_type: NumberType::F64,
                input: "1.2.3",
                expected: None,
            },
        ];

        for case in test_cases {
            let result = Number::parse_as(case.number_type, case.input).ok();
            assert_eq!(
                result, case.expected,
                "Test '{}' failed: expected: {:?}, got: {:?}",
                case.name, case.expected, result
            );
        }
    }

    #[test]
    fn test_display() {
        struct TestCase {
            number: Number,
            expected: &'static str,
        }

        let test_cases = [
            TestCase {
                number: Number::from_u8(200),
                expected: "200",
            },
            TestCase {
                number: Number::from_i8(-100),
                expected: "-100",
            },
            TestCase {
                number: Number::from_u64(u64::MAX),
                expected: "18446744073709551615",
            },
            TestCase {
                number: Number::from_i64(i64::MIN),
                expected: "-9223372036854775808",
            },
            TestCase {
                number: Number::from_f32(0.1),
                expected: "0.1",
            },
            TestCase {
                number: Number::from_f64(0.1),
                expected: "0.1",
            },
            TestCase {
                number: Number::from_f32(1.0 / 3.0),
                expected: "0.33333334",
            },
            TestCase {
                number: Number::from_f64(1.0 / 3.0),
                expected: "0.3333333333333333",
            },
            TestCase {
                number: Number::from_f64(-3.0),
                expected: "-3.0",
            },
            TestCase {
                number: Number::from_f64(1e21),
                expected: "1000000000000000000000.0",
            },
        ];

        for case in &test_cases {
            assert_eq!(case.number.to_string(), case.expected, "{:?}", case.number);
        }
    }

    /// Forwards to a real registry and records every accepted binding.
    #[derive(Default)]
    struct Recording {
        inner: Registry,
        accepted: Vec<String>,
    }

    impl Recording {
        fn record(
            &mut self,
            slot: String,
            result: std::result::Result<(), crate::registry::Error>,
        ) -> std::result::Result<(), crate::registry::Error> {
            result?;
            self.accepted.push(slot);
            Ok(())
        }
    }

    impl CodecRegistry for Recording {
        fn set_xml_reader(
            &mut self,
            element: &str,
            reader: XmlReaderFn,
        ) -> std::result::Result<(), crate::registry::Error> {
            let result = self.inner.set_xml_reader(element, reader);
            self.record(format!("xml reader {element}"), result)
        }

        fn set_xml_writer(
            &mut self,
            kind: ObjectKind,
            writer: XmlWriterFn,
        ) -> std::result::Result<(), crate::registry::Error> {
            let result = self.inner.set_xml_writer(kind, writer);
            self.record(format!("xml writer {kind}"), result)
        }

        fn set_bin_reader(
            &mut self,
            kind: ObjectKind,
            reader: BinReaderFn,
        ) -> std::result::Result<(), crate::registry::Error> {
            let result = self.inner.set_bin_reader(kind, reader);
            self.record(format!("bin reader {kind}"), result)
        }

        fn set_bin_writer(
            &mut self,
            kind: ObjectKind,
            writer: BinWriterFn,
        ) -> std::result::Result<(), crate::registry::Error> {
            let result = self.inner.set_bin_writer(kind, writer);
            self.record(format!("bin writer {kind}"), result)
        }
    }

    fn foreign_bin_reader(
        _: &mut dyn std::io::Read,
        _: ObjectKind,
        _: u64,
    ) -> crate::Result<Box<dyn Object>> {
        Ok(Box::new(Text))
    }

    fn foreign_xml_writer(
        _: &dyn Object,
        _: &mut dyn std::io::Write,
        _: usize,
    ) -> crate::Result<()> {
        Ok(())
    }

    #[test]
    fn test_registration_installs_all_slots() {
        let mut registry = Recording::default();

        Number::init_reader(&mut registry).unwrap();
        Number::init_writer(&mut registry).unwrap();

        assert_eq!(
            registry.accepted,
            [
                "xml reader number",
                "bin reader number",
                "xml writer number",
                "bin writer number"
            ]
        );
    }

    #[test]
    fn test_registration_propagates_rejection() {
        let mut registry = Recording::default();
        registry
            .inner
            .set_bin_reader(ObjectKind::Number, foreign_bin_reader)
            .unwrap();

        let err = Number::init_reader(&mut registry).unwrap_err();
        assert!(matches!(err.0, error::Error::Register { .. }));
        // The binding installed before the rejection stays in place.
        assert_eq!(registry.accepted, ["xml reader number"]);
        assert!(registry.inner.xml_reader("number").is_some());

        let mut registry = Recording::default();
        registry
            .inner
            .set_xml_writer(ObjectKind::Number, foreign_xml_writer)
            .unwrap();

        assert!(Number::init_writer(&mut registry).is_err());
        assert!(registry.accepted.is_empty());
        assert!(registry.inner.bin_writer(ObjectKind::Number).is_none());
    }

    #[test]
    fn test_registration_is_idempotent() {
        let mut registry = Registry::new();

        Number::init_reader(&mut registry).unwrap();
        Number::init_writer(&mut registry).unwrap();
        Number::init_reader(&mut registry).unwrap();
        Number::init_writer(&mut registry).unwrap();

        assert!(registry.xml_reader("number").is_some());
        assert!(registry.xml_reader("NUMBER").is_some());
        assert!(registry.xml_writer(ObjectKind::Number).is_some());
        assert!(registry.bin_reader(ObjectKind::Number).is_some());
        assert!(registry.bin_writer(ObjectKind::Number).is_some());
    }
}
