use crate::error::ValidationError;
use anyhow::ensure;
use arrow::array::ArrayRef;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use arrow::datatypes::{Field, Schema};
use std::collections::HashSet;
use std::sync::Arc;


/// Builds a table from named columns.
///
/// All columns must have the same length and distinct names.
pub fn table_from_columns<I, S>(columns: I) -> anyhow::Result<RecordBatch>
where
    I: IntoIterator<Item = (S, ArrayRef)>,
    S: Into<String>
{
    let mut fields = Vec::new();
    let mut arrays = Vec::new();
    let mut num_rows = None;

    for (name, array) in columns {
        let name = name.into();
        let expected = *num_rows.get_or_insert(array.len());
        ensure!(
            array.len() == expected,
            ValidationError::RowCountMismatch {
                column: name,
                expected,
                actual: array.len()
            }
        );
        fields.push(Field::new(name, array.data_type().clone(), true));
        arrays.push(array);
    }

    let batch = RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        arrays,
        &RecordBatchOptions::new().with_row_count(Some(num_rows.unwrap_or(0)))
    )?;

    validate_table(&batch)?;
    Ok(batch)
}


/// Checks the invariants which arrow doesn't enforce itself.
pub fn validate_table(table: &RecordBatch) -> anyhow::Result<()> {
    let schema = table.schema_ref();
    let mut names = HashSet::with_capacity(schema.fields().len());
    for field in schema.fields() {
        ensure!(
            names.insert(field.name().as_str()),
            ValidationError::DuplicateColumn(field.name().clone())
        );
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Int32Array, StringArray};


    #[test]
    fn builds_table() -> anyhow::Result<()> {
        let table = table_from_columns([
            ("a", Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef),
            ("b", Arc::new(StringArray::from(vec!["x", "y"])) as ArrayRef)
        ])?;
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_columns(), 2);
        assert_eq!(table.schema().field(1).name(), "b");
        Ok(())
    }

    #[test]
    fn empty_table() -> anyhow::Result<()> {
        let table = table_from_columns(Vec::<(String, ArrayRef)>::new())?;
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.num_columns(), 0);
        Ok(())
    }

    #[test]
    fn row_count_mismatch() {
        let err = table_from_columns([
            ("a", Arc::new(Int32Array::from(vec![1, 2])) as ArrayRef),
            ("b", Arc::new(Int32Array::from(vec![1])) as ArrayRef)
        ]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::RowCountMismatch {
                column: "b".to_string(),
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn duplicate_names() {
        let err = table_from_columns([
            ("a", Arc::new(Int32Array::from(vec![1])) as ArrayRef),
            ("a", Arc::new(Int32Array::from(vec![2])) as ArrayRef)
        ]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::DuplicateColumn("a".to_string()))
        );
    }
}
