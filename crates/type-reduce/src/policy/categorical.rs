use crate::downcast::minimal_key_type;
use crate::options::ReduceOptions;
use crate::profile::{ColumnProfile, ColumnStats};
use arrow::datatypes::DataType;


/// Dictionary encoding for text columns with a low share of distinct values.
///
/// A column converts when `distinct / rows <= max_unique_pct`.
/// Zero-row columns are never converted.
pub fn decide(profile: &ColumnProfile, options: &ReduceOptions) -> Option<DataType> {
    let ColumnStats::Text { distinct_values, .. } = &profile.stats else {
        return None
    };
    let fraction_unique = profile.fraction_unique()?;
    if fraction_unique > options.max_unique_pct {
        return None
    }
    Some(DataType::Dictionary(
        Box::new(minimal_key_type(*distinct_values)),
        Box::new(profile.data_type.clone())
    ))
}
