use crate::error::ValidationError;
use crate::options::ReduceOptions;
use crate::plan::{fit, ReductionPlan};
use crate::summary::ReductionSummary;
use arrow::record_batch::RecordBatch;


/// Stateful fit/transform contract.
///
/// `fit` captures everything `transform` needs,
/// so a fitted transformer can be applied to new tables of the same shape.
pub trait Transformer {
    fn fit(&mut self, table: &RecordBatch) -> anyhow::Result<()>;

    fn transform(&self, table: &RecordBatch) -> anyhow::Result<RecordBatch>;

    fn fit_transform(&mut self, table: &RecordBatch) -> anyhow::Result<RecordBatch> {
        self.fit(table)?;
        self.transform(table)
    }
}


#[derive(Default)]
pub struct TypeReducer {
    options: ReduceOptions,
    plan: Option<ReductionPlan>
}


impl TypeReducer {
    pub fn new(options: ReduceOptions) -> anyhow::Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            plan: None
        })
    }

    pub fn options(&self) -> &ReduceOptions {
        &self.options
    }

    pub fn plan(&self) -> Option<&ReductionPlan> {
        self.plan.as_ref()
    }

    pub fn transform_with_summary(
        &self,
        table: &RecordBatch
    ) -> anyhow::Result<(RecordBatch, ReductionSummary)>
    {
        let plan = self.plan.as_ref().ok_or(ValidationError::NotFitted)?;
        plan.apply_with_summary(table)
    }
}


impl Transformer for TypeReducer {
    /// Replaces the current plan only when fitting succeeds
    fn fit(&mut self, table: &RecordBatch) -> anyhow::Result<()> {
        let plan = fit(table, &self.options)?;
        self.plan = Some(plan);
        Ok(())
    }

    fn transform(&self, table: &RecordBatch) -> anyhow::Result<RecordBatch> {
        self.transform_with_summary(table).map(|(table, _)| table)
    }
}
