//! Scalar parameter kinds and the path-segment converter.
//!
//! # Responsibilities
//! - Enumerate the closed set of parameter kinds a routed method may declare
//! - Convert a raw path segment into a tagged [`Value`] of a given kind
//! - Bridge Rust types to kinds through the [`Param`] trait
//!
//! # Design Decisions
//! - Integers are base-10 only, range checked per width
//! - Floats overflowing their width are rejected, explicit `inf`/`nan` are not
//! - No locale handling: `1,5` is never a float

use std::fmt;
use std::num::IntErrorKind;

use crate::routing::error::ConvertError;

/// Kind of a declared method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    String,
    /// A type the converter cannot produce, named for diagnostics.
    ///
    /// None of the built-in [`Param`] impls report this kind; a parameter
    /// type without a `Param` impl fails the method bound at compile time.
    /// Dispatch only meets it through a user impl that opts in, and then
    /// [`convert`] answers every request with `UnsupportedKind`.
    Unsupported(&'static str),
}

impl Kind {
    /// Human readable name, as it appears in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::String => "string",
            Kind::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Kind::Unsupported(_))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A converted argument, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    String(String),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::String(_) => Kind::String,
        }
    }
}

/// Convert a path segment into a value of the requested kind.
pub fn convert(token: &str, kind: Kind) -> Result<Value, ConvertError> {
    let value = match kind {
        Kind::I8 => Value::I8(parse_int(token, kind)?),
        Kind::I16 => Value::I16(parse_int(token, kind)?),
        Kind::I32 => Value::I32(parse_int(token, kind)?),
        Kind::I64 => Value::I64(parse_int(token, kind)?),
        Kind::Isize => Value::Isize(parse_int(token, kind)?),
        Kind::U8 => Value::U8(parse_int(token, kind)?),
        Kind::U16 => Value::U16(parse_int(token, kind)?),
        Kind::U32 => Value::U32(parse_int(token, kind)?),
        Kind::U64 => Value::U64(parse_int(token, kind)?),
        Kind::Usize => Value::Usize(parse_int(token, kind)?),
        Kind::F32 => {
            let parsed = parse_float(token, kind)?;
            let narrowed = parsed as f32;
            if narrowed.is_infinite() && parsed.is_finite() {
                return Err(out_of_range(token, kind));
            }
            Value::F32(narrowed)
        }
        Kind::F64 => Value::F64(parse_float(token, kind)?),
        Kind::String => Value::String(token.to_string()),
        Kind::Unsupported(_) => return Err(ConvertError::UnsupportedKind(kind)),
    };
    Ok(value)
}

fn parse_int<T>(token: &str, kind: Kind) -> Result<T, ConvertError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    token.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(token, kind),
        _ => invalid(token, kind),
    })
}

fn parse_float(token: &str, kind: Kind) -> Result<f64, ConvertError> {
    let parsed: f64 = token.parse().map_err(|_| invalid(token, kind))?;
    // Rust saturates overflowing literals to infinity.
    if parsed.is_infinite() && !is_infinity_literal(token) {
        return Err(out_of_range(token, kind));
    }
    Ok(parsed)
}

fn is_infinity_literal(token: &str) -> bool {
    let unsigned = token.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn invalid(token: &str, kind: Kind) -> ConvertError {
    ConvertError::Invalid {
        token: token.to_string(),
        kind,
    }
}

fn out_of_range(token: &str, kind: Kind) -> ConvertError {
    ConvertError::OutOfRange {
        token: token.to_string(),
        kind,
    }
}

/// A type that can be bound from a path segment.
pub trait Param: Sized + Send + 'static {
    const KIND: Kind;

    fn from_value(value: Value) -> Result<Self, ConvertError>;
}

macro_rules! impl_param {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Param for $ty {
                const KIND: Kind = Kind::$variant;

                fn from_value(value: Value) -> Result<Self, ConvertError> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ConvertError::KindMismatch {
                            expected: Kind::$variant,
                            found: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_param! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => String,
}
