use crate::router::{route, Bucket};
use arrow::array::{Array, AsArray, GenericStringArray, OffsetSizeTrait, PrimitiveArray};
use arrow::datatypes::*;
use std::collections::HashSet;


/// Statistics of a single column, everything the policies need to decide
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub data_type: DataType,
    pub num_rows: usize,
    pub stats: ColumnStats
}


#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    Integer {
        /// `None` when all values are null
        range: Option<(i128, i128)>
    },
    Float(FloatStats),
    Text {
        /// Distinct values, a null counts as one more value
        distinct: usize,
        /// Distinct non-null values
        distinct_values: usize
    },
    Skip
}


#[derive(Debug, Clone, PartialEq)]
pub struct FloatStats {
    /// Nulls and NaNs
    pub missing: usize,
    /// Some non-missing value is not a finite whole number
    pub has_fraction: bool,
    /// Extremes of non-missing values when they are all whole numbers
    /// representable by a 64-bit integer
    pub whole_range: Option<(i128, i128)>,
    /// Every non-missing value survives the `f64 -> f32 -> f64` round trip.
    /// Computed only for `Float64` columns eligible for float downcast.
    pub f32_exact: Option<bool>
}


impl ColumnProfile {
    pub fn new(name: &str, array: &dyn Array, check_f32: bool) -> Self {
        let stats = match route(array.data_type()) {
            Bucket::Integer => ColumnStats::Integer {
                range: integer_range(array)
            },
            Bucket::Float => ColumnStats::Float(
                match array.data_type() {
                    DataType::Float32 => float_stats(array.as_primitive::<Float32Type>(), false),
                    _ => float_stats(array.as_primitive::<Float64Type>(), check_f32)
                }
            ),
            Bucket::Text => {
                let (distinct, distinct_values) = count_distinct(array);
                ColumnStats::Text {
                    distinct,
                    distinct_values
                }
            },
            Bucket::Skip => ColumnStats::Skip
        };
        Self {
            name: name.to_string(),
            data_type: array.data_type().clone(),
            num_rows: array.len(),
            stats
        }
    }

    pub fn bucket(&self) -> Bucket {
        route(&self.data_type)
    }

    /// `distinct / rows` for text columns
    pub fn fraction_unique(&self) -> Option<f64> {
        match &self.stats {
            ColumnStats::Text { distinct, .. } if self.num_rows > 0 => {
                Some(*distinct as f64 / self.num_rows as f64)
            },
            _ => None
        }
    }
}


fn integer_range(array: &dyn Array) -> Option<(i128, i128)> {
    macro_rules! range {
        ($t:ty) => {{
            let values = array.as_primitive::<$t>();
            let min = arrow::compute::min(values)?;
            let max = arrow::compute::max(values)?;
            Some((i128::from(min), i128::from(max)))
        }};
    }
    match array.data_type() {
        DataType::Int8 => range!(Int8Type),
        DataType::Int16 => range!(Int16Type),
        DataType::Int32 => range!(Int32Type),
        DataType::Int64 => range!(Int64Type),
        DataType::UInt8 => range!(UInt8Type),
        DataType::UInt16 => range!(UInt16Type),
        DataType::UInt32 => range!(UInt32Type),
        DataType::UInt64 => range!(UInt64Type),
        ty => panic!("{} is not an integer type", ty)
    }
}


fn float_stats<F>(array: &PrimitiveArray<F>, check_f32: bool) -> FloatStats
where
    F: ArrowPrimitiveType,
    F::Native: Into<f64>
{
    let mut missing = array.null_count();
    let mut has_fraction = false;
    let mut f32_exact = true;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in array.iter().flatten() {
        let v: f64 = v.into();
        if v.is_nan() {
            missing += 1;
            continue
        }
        if check_f32 && (v as f32) as f64 != v {
            f32_exact = false
        }
        if !is_whole(v) {
            has_fraction = true;
            continue
        }
        min = min.min(v);
        max = max.max(v);
    }

    let whole_range = if has_fraction || min > max {
        None
    } else {
        whole_to_int(min).zip(whole_to_int(max))
    };

    FloatStats {
        missing,
        has_fraction,
        whole_range,
        f32_exact: check_f32.then_some(f32_exact)
    }
}


/// Number of distinct entries of a text array, with and without the null entry
pub(crate) fn count_distinct(array: &dyn Array) -> (usize, usize) {
    match array.data_type() {
        DataType::LargeUtf8 => count_distinct_strings(array.as_string::<i64>()),
        DataType::Utf8 => count_distinct_strings(array.as_string::<i32>()),
        ty => panic!("{} is not a text type", ty)
    }
}


fn count_distinct_strings<O: OffsetSizeTrait>(array: &GenericStringArray<O>) -> (usize, usize) {
    let distinct = array.iter().collect::<HashSet<Option<&str>>>().len();
    let distinct_values = distinct - (array.null_count() > 0) as usize;
    (distinct, distinct_values)
}


#[inline]
pub(crate) fn is_whole(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0
}


/// Exact integer value of a whole `f64` if it lies within `[i64::MIN, u64::MAX]`
#[inline]
pub(crate) fn whole_to_int(v: f64) -> Option<i128> {
    const LOWER: f64 = -9_223_372_036_854_775_808.0;
    const UPPER: f64 = 18_446_744_073_709_551_616.0;
    (v >= LOWER && v < UPPER).then(|| v as i128)
}
