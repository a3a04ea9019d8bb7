use arrow::array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{Field, Schema};
use proptest::collection::SizeRange;
use proptest::prelude::*;
use proptest::string::string_regex;
use std::sync::Arc;


/// Integers of a random magnitude, so that every target width gets hit
pub fn int64(len: impl Into<SizeRange>) -> impl Strategy<Value = ArrayRef> {
    (0u32..64, prop::collection::vec(prop::option::of(any::<i64>()), len)).prop_map(|(shift, values)| {
        let array: Int64Array = values.into_iter().map(|v| v.map(|v| v >> shift)).collect();
        Arc::new(array) as ArrayRef
    })
}


/// Either only f32-representable values or a mix with arbitrary doubles
pub fn float64(len: impl Into<SizeRange>) -> impl Strategy<Value = ArrayRef> {
    let len = len.into();
    prop_oneof![
        prop::collection::vec(any::<f32>().prop_map(f64::from), len.clone()),
        prop::collection::vec(
            prop_oneof![any::<f32>().prop_map(f64::from), any::<f64>()],
            len
        )
    ].prop_map(|values| {
        Arc::new(Float64Array::from(values)) as ArrayRef
    })
}


/// Whole numbers stored as floats, with at least one null
pub fn whole_float64_with_nulls(len: impl Into<SizeRange>) -> impl Strategy<Value = ArrayRef> {
    prop::collection::vec(prop::option::of(any::<i32>()), len).prop_map(|mut values| {
        values.push(None);
        let array: Float64Array = values.into_iter().map(|v| v.map(f64::from)).collect();
        Arc::new(array) as ArrayRef
    })
}


/// Short strings over a tiny alphabet, so repetitions are common
pub fn low_cardinality_string(len: impl Into<SizeRange>) -> impl Strategy<Value = ArrayRef> {
    prop::collection::vec(prop::option::of(string_regex("[a-e]{0,2}").unwrap()), len).prop_map(|values| {
        Arc::new(StringArray::from(values)) as ArrayRef
    })
}


pub fn single_column(name: &str, array: ArrayRef) -> RecordBatch {
    let schema = Schema::new(vec![
        Field::new(name, array.data_type().clone(), true)
    ]);
    RecordBatch::try_new(Arc::new(schema), vec![array]).unwrap()
}


/// A table with a column of every kind sharing the same row count
pub fn mixed_table(len: usize) -> impl Strategy<Value = RecordBatch> {
    (int64(len), float64(len), whole_float64_with_nulls(len - 1), low_cardinality_string(len)).prop_map(
        |(i, f, n, s)| {
            let schema = Schema::new(vec![
                Field::new("i", i.data_type().clone(), true),
                Field::new("f", f.data_type().clone(), true),
                Field::new("n", n.data_type().clone(), true),
                Field::new("s", s.data_type().clone(), true)
            ]);
            RecordBatch::try_new(Arc::new(schema), vec![i, f, n, s]).unwrap()
        }
    )
}
