//! Conversions from the stored representation.
//!
//! `as` casts do all the work: integer to integer casts sign-extend signed
//! sources and truncate in two's complement, float to integer casts truncate
//! toward zero (saturating outside the target range, NaN becomes zero).

use super::Value;

pub(super) fn to_u64(value: Value) -> u64 {
    match value {
        Value::U8(value) => value as u64,
        Value::I8(value) => value as u64,
        Value::U16(value) => value as u64,
        Value::I16(value) => value as u64,
        Value::U32(value) => value as u64,
        Value::I32(value) => value as u64,
        Value::U64(value) => value,
        Value::I64(value) => value as u64,
        Value::F32(value) => value as u64,
        Value::F64(value) => value as u64,
    }
}

pub(super) fn to_i64(value: Value) -> i64 {
    match value {
        Value::U8(value) => value as i64,
        Value::I8(value) => value as i64,
        Value::U16(value) => value as i64,
        Value::I16(value) => value as i64,
        Value::U32(value) => value as i64,
        Value::I32(value) => value as i64,
        Value::U64(value) => value as i64,
        Value::I64(value) => value,
        Value::F32(value) => value as i64,
        Value::F64(value) => value as i64,
    }
}

pub(super) fn to_f32(value: Value) -> f32 {
    match value {
        Value::U8(value) => value as f32,
        Value::I8(value) => value as f32,
        Value::U16(value) => value as f32,
        Value::I16(value) => value as f32,
        Value::U32(value) => value as f32,
        Value::I32(value) => value as f32,
        Value::U64(value) => value as f32,
        Value::I64(value) => value as f32,
        Value::F32(value) => value,
        Value::F64(value) => value as f32,
    }
}

pub(super) fn to_f64(value: Value) -> f64 {
    match value {
        Value::U8(value) => value as f64,
        Value::I8(value) => value as f64,
        Value::U16(value) => value as f64,
        Value::I16(value) => value as f64,
        Value::U32(value) => value as f64,
        Value::I32(value) => value as f64,
        Value::U64(value) => value as f64,
        Value::I64(value) => value as f64,
        Value::F32(value) => value as f64,
        Value::F64(value) => value,
    }
}
