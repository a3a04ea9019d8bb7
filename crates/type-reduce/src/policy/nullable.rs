use crate::downcast::minimal_int_type;
use crate::options::ReduceOptions;
use crate::profile::{ColumnProfile, ColumnStats};
use arrow::datatypes::DataType;


/// Nullable integer type for a float column with missing values and
/// otherwise whole numbers.
pub fn decide(profile: &ColumnProfile, options: &ReduceOptions) -> Option<DataType> {
    if !options.nullables {
        return None
    }
    let ColumnStats::Float(stats) = &profile.stats else {
        return None
    };
    if stats.missing == 0 || stats.has_fraction {
        return None
    }
    match stats.whole_range {
        Some((min, max)) => minimal_int_type(min, max),
        None if stats.missing == profile.num_rows => Some(DataType::UInt8),
        // whole numbers beyond 64-bit range
        None => None
    }
}
