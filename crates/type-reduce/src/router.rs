use crate::downcast::is_integer;
use arrow::datatypes::DataType;


/// Treatment a column receives based on its storage type
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Bucket {
    Integer,
    Float,
    Text,
    Skip
}


pub fn route(data_type: &DataType) -> Bucket {
    match data_type {
        ty if is_integer(ty) => Bucket::Integer,
        DataType::Float32 | DataType::Float64 => Bucket::Float,
        DataType::Utf8 | DataType::LargeUtf8 => Bucket::Text,
        _ => Bucket::Skip
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;


    #[test]
    fn routing() {
        assert_eq!(route(&DataType::Int64), Bucket::Integer);
        assert_eq!(route(&DataType::UInt16), Bucket::Integer);
        assert_eq!(route(&DataType::Float64), Bucket::Float);
        assert_eq!(route(&DataType::Float32), Bucket::Float);
        assert_eq!(route(&DataType::Utf8), Bucket::Text);
        assert_eq!(route(&DataType::LargeUtf8), Bucket::Text);
        assert_eq!(route(&DataType::Boolean), Bucket::Skip);
        assert_eq!(route(&DataType::Float16), Bucket::Skip);
        assert_eq!(route(&DataType::Timestamp(TimeUnit::Second, None)), Bucket::Skip);
        assert_eq!(
            route(&DataType::Dictionary(Box::new(DataType::Int8), Box::new(DataType::Utf8))),
            Bucket::Skip
        );
    }
}
