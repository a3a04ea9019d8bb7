use crate::downcast::key_capacity;
use crate::error::CastOverflow;
use crate::profile::{count_distinct, is_whole, whole_to_int};
use anyhow::{anyhow, bail, ensure};
use arrow::array::{Array, ArrayRef, AsArray, Float32Array, PrimitiveArray};
use arrow::datatypes::*;
use std::sync::Arc;


macro_rules! with_integer_type {
    ($data_type:expr, $t:ident => $body:expr) => {
        match $data_type {
            DataType::Int8 => { type $t = Int8Type; $body },
            DataType::Int16 => { type $t = Int16Type; $body },
            DataType::Int32 => { type $t = Int32Type; $body },
            DataType::Int64 => { type $t = Int64Type; $body },
            DataType::UInt8 => { type $t = UInt8Type; $body },
            DataType::UInt16 => { type $t = UInt16Type; $body },
            DataType::UInt32 => { type $t = UInt32Type; $body },
            DataType::UInt64 => { type $t = UInt64Type; $body },
            ty => bail!("{} is not an integer type", ty)
        }
    };
}


macro_rules! invalid_cast {
    ($from:expr, $to:expr) => {
        bail!("invalid cast from {} to {}", $from, $to)
    };
}


fn overflow(target: &DataType, reason: String) -> anyhow::Error {
    anyhow!(CastOverflow {
        target: target.clone(),
        reason
    })
}


/// Casts between integer types, failing on any value
/// which is not representable by the target type.
pub fn cast_integer(src: &dyn Array, target_type: &DataType) -> anyhow::Result<ArrayRef> {
    with_integer_type!(src.data_type(), S => {
        let src = src.as_primitive::<S>();
        with_integer_type!(target_type, T => {
            cast_integer_impl::<S, T>(src).map(|a| Arc::new(a) as ArrayRef)
        })
    })
}


fn cast_integer_impl<S, T>(src: &PrimitiveArray<S>) -> anyhow::Result<PrimitiveArray<T>>
where
    S: ArrowPrimitiveType,
    T: ArrowPrimitiveType,
    S::Native: Into<i128>,
    T::Native: TryFrom<i128>
{
    src.try_unary::<_, T, anyhow::Error>(|v| {
        let v: i128 = v.into();
        <T::Native as TryFrom<i128>>::try_from(v).map_err(|_| {
            overflow(&T::DATA_TYPE, format!("value {} is out of range", v))
        })
    })
}


/// Narrows doubles to floats, failing on any value which doesn't survive the round trip.
pub fn cast_f64_to_f32(src: &dyn Array) -> anyhow::Result<ArrayRef> {
    let Some(src) = src.as_primitive_opt::<Float64Type>() else {
        invalid_cast!(src.data_type(), DataType::Float32)
    };
    let dst: Float32Array = src.try_unary::<_, Float32Type, anyhow::Error>(|v| {
        let narrowed = v as f32;
        if v.is_nan() || narrowed as f64 == v {
            Ok(narrowed)
        } else {
            Err(overflow(&DataType::Float32, format!("value {} is not exactly representable", v)))
        }
    })?;
    Ok(Arc::new(dst))
}


/// Converts a float array to integers, turning nulls and NaNs into nulls.
///
/// Fails when a present value is not a whole number or doesn't fit into the target type.
pub fn cast_float_to_nullable_integer(
    src: &dyn Array,
    target_type: &DataType
) -> anyhow::Result<ArrayRef>
{
    match src.data_type() {
        DataType::Float32 => {
            let src = src.as_primitive::<Float32Type>();
            with_integer_type!(target_type, T => {
                float_to_integer::<_, T>(src).map(|a| Arc::new(a) as ArrayRef)
            })
        },
        DataType::Float64 => {
            let src = src.as_primitive::<Float64Type>();
            with_integer_type!(target_type, T => {
                float_to_integer::<_, T>(src).map(|a| Arc::new(a) as ArrayRef)
            })
        },
        ty => invalid_cast!(ty, target_type)
    }
}


fn float_to_integer<F, T>(src: &PrimitiveArray<F>) -> anyhow::Result<PrimitiveArray<T>>
where
    F: ArrowPrimitiveType,
    T: ArrowPrimitiveType,
    F::Native: Into<f64>,
    T::Native: TryFrom<i128>
{
    let mut values = Vec::with_capacity(src.len());

    for item in src.iter() {
        let v: f64 = match item {
            Some(v) => v.into(),
            None => {
                values.push(None);
                continue
            }
        };
        if v.is_nan() {
            values.push(None);
            continue
        }
        if !is_whole(v) {
            return Err(overflow(&T::DATA_TYPE, format!("{} is not a whole number", v)))
        }
        let value = whole_to_int(v)
            .and_then(|i| <T::Native as TryFrom<i128>>::try_from(i).ok())
            .ok_or_else(|| {
                overflow(&T::DATA_TYPE, format!("value {} is out of range", v))
            })?;
        values.push(Some(value))
    }

    Ok(values.into_iter().collect())
}


/// Dictionary encodes a text array.
///
/// Fails when the array has more distinct values than the key type can address.
pub fn encode_dictionary(src: &dyn Array, target_type: &DataType) -> anyhow::Result<ArrayRef> {
    let DataType::Dictionary(key_type, value_type) = target_type else {
        invalid_cast!(src.data_type(), target_type)
    };
    if !matches!(src.data_type(), DataType::Utf8 | DataType::LargeUtf8) {
        invalid_cast!(src.data_type(), target_type)
    }
    ensure!(
        value_type.as_ref() == src.data_type(),
        "dictionary value type {} doesn't match array type {}",
        value_type,
        src.data_type()
    );
    let capacity = match key_capacity(key_type) {
        Some(capacity) => capacity,
        None => bail!("{} is not a supported dictionary key type", key_type)
    };

    let (_, distinct_values) = count_distinct(src);
    if distinct_values as u64 > capacity {
        return Err(overflow(
            target_type,
            format!("{} distinct values exceed the key capacity of {}", distinct_values, capacity)
        ))
    }

    let dst = arrow::compute::cast(src, target_type)?;
    Ok(dst)
}
