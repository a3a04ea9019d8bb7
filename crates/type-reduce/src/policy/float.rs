use crate::options::ReduceOptions;
use crate::profile::{ColumnProfile, ColumnStats};
use arrow::datatypes::DataType;


/// `Float64 -> Float32`, only for listed columns whose values survive the round trip.
///
/// Narrower floats (`Float16`) are never considered.
pub fn decide(profile: &ColumnProfile, options: &ReduceOptions) -> Option<DataType> {
    if profile.data_type != DataType::Float64 || !options.is_float_col(&profile.name) {
        return None
    }
    let ColumnStats::Float(stats) = &profile.stats else {
        return None
    };
    (stats.f32_exact == Some(true)).then_some(DataType::Float32)
}
