pub mod categorical;
pub mod float;
pub mod integer;
pub mod nullable;


use crate::cast::{cast_f64_to_f32, cast_float_to_nullable_integer, cast_integer, encode_dictionary};
use crate::options::ReduceOptions;
use crate::profile::ColumnProfile;
use crate::router::Bucket;
use arrow::array::ArrayRef;
use arrow::datatypes::DataType;
use std::fmt::{Display, Formatter};


/// Terminal state of a column after fit
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Conversion {
    Unchanged,
    IntegerDowncast,
    FloatDowncast,
    Categorical,
    NullableInteger
}


impl Display for Conversion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Conversion::Unchanged => "unchanged",
            Conversion::IntegerDowncast => "integer downcast",
            Conversion::FloatDowncast => "float downcast",
            Conversion::Categorical => "categorical",
            Conversion::NullableInteger => "nullable integer"
        };
        f.write_str(name)
    }
}


/// Picks the conversion and target type of a profiled column.
///
/// Float columns try the nullable integer conversion before the float downcast.
pub fn decide(profile: &ColumnProfile, options: &ReduceOptions) -> (Conversion, DataType) {
    let decision = match profile.bucket() {
        Bucket::Integer => {
            integer::decide(profile).map(|ty| (Conversion::IntegerDowncast, ty))
        },
        Bucket::Float => {
            nullable::decide(profile, options)
                .map(|ty| (Conversion::NullableInteger, ty))
                .or_else(|| {
                    float::decide(profile, options).map(|ty| (Conversion::FloatDowncast, ty))
                })
        },
        Bucket::Text => {
            categorical::decide(profile, options).map(|ty| (Conversion::Categorical, ty))
        },
        Bucket::Skip => None
    };
    decision.unwrap_or_else(|| (Conversion::Unchanged, profile.data_type.clone()))
}


pub fn apply(
    conversion: Conversion,
    array: &ArrayRef,
    target_type: &DataType
) -> anyhow::Result<ArrayRef>
{
    match conversion {
        Conversion::Unchanged => Ok(array.clone()),
        Conversion::IntegerDowncast => cast_integer(array.as_ref(), target_type),
        Conversion::FloatDowncast => cast_f64_to_f32(array.as_ref()),
        Conversion::Categorical => encode_dictionary(array.as_ref(), target_type),
        Conversion::NullableInteger => cast_float_to_nullable_integer(array.as_ref(), target_type)
    }
}
