use arrow::datatypes::DataType;


/// Narrowest integer type able to hold every value of `[min, max]`.
///
/// Unsigned types are preferred whenever `min` is not negative.
/// Returns `None` when the range is empty or doesn't fit into 64 bits.
pub fn minimal_int_type(min: i128, max: i128) -> Option<DataType> {
    if min > max {
        return None
    }
    if min >= 0 {
        if u8::try_from(max).is_ok() {
            return Some(DataType::UInt8)
        }
        if u16::try_from(max).is_ok() {
            return Some(DataType::UInt16)
        }
        if u32::try_from(max).is_ok() {
            return Some(DataType::UInt32)
        }
        if u64::try_from(max).is_ok() {
            return Some(DataType::UInt64)
        }
        return None
    }
    if i8::try_from(min).is_ok() && i8::try_from(max).is_ok() {
        return Some(DataType::Int8)
    }
    if i16::try_from(min).is_ok() && i16::try_from(max).is_ok() {
        return Some(DataType::Int16)
    }
    if i32::try_from(min).is_ok() && i32::try_from(max).is_ok() {
        return Some(DataType::Int32)
    }
    if i64::try_from(min).is_ok() && i64::try_from(max).is_ok() {
        return Some(DataType::Int64)
    }
    None
}


/// Dictionary key type for a column with `num_values` distinct non-null values.
pub fn minimal_key_type(num_values: usize) -> DataType {
    let max_key = num_values.saturating_sub(1) as i128;
    if i8::try_from(max_key).is_ok() {
        return DataType::Int8
    }
    if i16::try_from(max_key).is_ok() {
        return DataType::Int16
    }
    if i32::try_from(max_key).is_ok() {
        return DataType::Int32
    }
    DataType::Int64
}


/// Number of distinct dictionary values addressable by the given key type
pub fn key_capacity(key_type: &DataType) -> Option<u64> {
    match key_type {
        DataType::Int8 => Some(i8::MAX as u64 + 1),
        DataType::Int16 => Some(i16::MAX as u64 + 1),
        DataType::Int32 => Some(i32::MAX as u64 + 1),
        DataType::Int64 => Some(i64::MAX as u64 + 1),
        _ => None
    }
}


pub fn is_integer(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 |
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64
    )
}
