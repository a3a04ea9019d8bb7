use crate::error::{ConfigurationError, ValidationError};
use crate::options::ReduceOptions;
use crate::policy::{self, Conversion};
use crate::profile::ColumnProfile;
use crate::schema_patch::SchemaPatch;
use crate::summary::ReductionSummary;
use crate::table::validate_table;
use anyhow::{bail, ensure, Context};
use arrow::array::Array;
use arrow::datatypes::DataType;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use tracing::{debug, info};


#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDecision {
    pub name: String,
    pub source_type: DataType,
    pub target_type: DataType,
    pub conversion: Conversion
}


/// Per-column target types computed by [`fit`].
///
/// Immutable once built. Applying it never profiles the data again,
/// columns are cast to the planned types.
#[derive(Debug, Clone, PartialEq)]
pub struct ReductionPlan {
    columns: Vec<ColumnDecision>,
    by_name: HashMap<String, usize>
}


/// Profiles every column of the table and decides its target type.
pub fn fit(table: &RecordBatch, options: &ReduceOptions) -> anyhow::Result<ReductionPlan> {
    options.validate()?;
    validate_table(table)?;

    let schema = table.schema_ref();

    let mut float_cols: Vec<_> = options.float_cols.iter().collect();
    float_cols.sort();
    for name in float_cols {
        ensure!(
            schema.index_of(name).is_ok(),
            ConfigurationError {
                option: "float_cols",
                message: format!("column '{}' is not present in the table", name)
            }
        );
    }

    let columns = schema.fields().iter().zip(table.columns()).map(|(field, array)| {
        let name = field.name();
        let profile = ColumnProfile::new(name, array.as_ref(), options.is_float_col(name));
        let (conversion, target_type) = policy::decide(&profile, options);
        debug!(
            column = name.as_str(),
            from = %profile.data_type,
            to = %target_type,
            %conversion,
            "column profiled"
        );
        ColumnDecision {
            name: name.clone(),
            source_type: profile.data_type,
            target_type,
            conversion
        }
    }).collect();

    Ok(ReductionPlan::new(columns))
}


impl ReductionPlan {
    pub(crate) fn new(columns: Vec<ColumnDecision>) -> Self {
        let by_name = columns.iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self {
            columns,
            by_name
        }
    }

    pub fn columns(&self) -> &[ColumnDecision] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDecision> {
        self.by_name.get(name).map(|i| &self.columns[*i])
    }

    pub fn target_type(&self, name: &str) -> Option<&DataType> {
        self.column(name).map(|c| &c.target_type)
    }

    pub fn apply(&self, table: &RecordBatch) -> anyhow::Result<RecordBatch> {
        self.apply_with_summary(table).map(|(table, _)| table)
    }

    /// Casts the table to the planned types.
    ///
    /// A column already having its target type is passed through,
    /// so applying the plan to its own output changes nothing.
    pub fn apply_with_summary(
        &self,
        table: &RecordBatch
    ) -> anyhow::Result<(RecordBatch, ReductionSummary)>
    {
        let steps = self.validate(table)?;

        let mut patch = SchemaPatch::new(table.schema());
        let mut columns = Vec::with_capacity(table.num_columns());
        let mut summary = ReductionSummary::default();

        for (i, (array, (conversion, decision))) in table.columns().iter().zip(steps).enumerate() {
            let converted = policy::apply(conversion, array, &decision.target_type)
                .with_context(|| format!("failed to convert column '{}'", decision.name))?;

            let memory_before = array.get_array_memory_size();
            let memory_after = converted.get_array_memory_size();
            summary.record(conversion, memory_before, memory_after);

            if conversion != Conversion::Unchanged {
                let field = table.schema_ref().field(i);
                let nullable = field.is_nullable() || conversion == Conversion::NullableInteger;
                patch.set_field_type(i, converted.data_type().clone(), nullable);
                debug!(
                    column = decision.name.as_str(),
                    %conversion,
                    to = %decision.target_type,
                    memory_before,
                    memory_after,
                    "column converted"
                );
            }

            columns.push(converted);
        }

        let result = RecordBatch::try_new_with_options(
            patch.finish(),
            columns,
            &RecordBatchOptions::new().with_row_count(Some(table.num_rows()))
        )?;

        info!(
            memory_before = summary.memory_before,
            memory_after = summary.memory_after,
            converted = summary.num_converted(),
            "{}",
            summary
        );

        Ok((result, summary))
    }

    /// Matches table columns against the plan before anything gets converted
    fn validate<'a>(
        &'a self,
        table: &RecordBatch
    ) -> anyhow::Result<Vec<(Conversion, &'a ColumnDecision)>>
    {
        validate_table(table)?;

        let schema = table.schema_ref();

        for decision in self.columns.iter() {
            ensure!(
                schema.index_of(&decision.name).is_ok(),
                ValidationError::MissingColumn(decision.name.clone())
            );
        }

        schema.fields().iter().zip(table.columns()).map(|(field, array)| {
            let Some(decision) = self.column(field.name()) else {
                bail!(ValidationError::UnexpectedColumn(field.name().clone()))
            };
            let data_type = array.data_type();
            let conversion = if data_type == &decision.target_type {
                Conversion::Unchanged
            } else if data_type == &decision.source_type {
                decision.conversion
            } else {
                bail!(ValidationError::ColumnMismatch {
                    column: decision.name.clone(),
                    fitted: decision.source_type.clone(),
                    planned: decision.target_type.clone(),
                    found: data_type.clone()
                })
            };
            Ok((conversion, decision))
        }).collect()
    }
}


impl Display for ReductionPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for c in self.columns.iter() {
            if c.conversion == Conversion::Unchanged {
                writeln!(f, "{}: {} (unchanged)", c.name, c.source_type)?;
            } else {
                writeln!(f, "{}: {} -> {} ({})", c.name, c.source_type, c.target_type, c.conversion)?;
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::table_from_columns;
    use arrow::array::{ArrayRef, Int64Array, StringArray};
    use std::sync::Arc;


    #[test]
    fn lookup_matches_fitted_columns() -> anyhow::Result<()> {
        let table = table_from_columns([
            ("a", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
            ("b", Arc::new(StringArray::from(vec!["x", "y"])) as ArrayRef)
        ])?;
        let plan = fit(&table, &ReduceOptions::default())?;

        for (i, decision) in plan.columns().iter().enumerate() {
            assert_eq!(decision.name, table.schema_ref().field(i).name().as_str());
            assert_eq!(plan.column(&decision.name), Some(decision));
        }
        assert_eq!(plan.target_type("a"), Some(&DataType::UInt8));
        assert_eq!(plan.column("b").map(|c| c.conversion), Some(Conversion::Unchanged));
        assert!(plan.column("c").is_none());
        Ok(())
    }
}
