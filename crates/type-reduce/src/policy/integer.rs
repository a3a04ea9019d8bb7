use crate::downcast::minimal_int_type;
use crate::profile::{ColumnProfile, ColumnStats};
use arrow::datatypes::DataType;


/// Narrowest integer type holding the observed value range.
///
/// Returns `None` when that type is not smaller than the current one.
pub fn decide(profile: &ColumnProfile) -> Option<DataType> {
    let ColumnStats::Integer { range } = &profile.stats else {
        return None
    };
    let target = match range {
        Some((min, max)) => minimal_int_type(*min, *max)?,
        None => DataType::UInt8
    };
    is_narrower(&target, &profile.data_type).then_some(target)
}


pub(crate) fn is_narrower(target: &DataType, current: &DataType) -> bool {
    match (target.primitive_width(), current.primitive_width()) {
        (Some(target), Some(current)) => target < current,
        _ => false
    }
}
