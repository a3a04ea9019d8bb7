use crate::error::ConfigurationError;
use anyhow::{Context, ensure};
use serde::Deserialize;
use std::collections::HashSet;


pub const DEFAULT_MAX_UNIQUE_PCT: f64 = 0.5;


#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReduceOptions {
    /// Text columns whose `distinct / rows` ratio does not exceed
    /// this value are converted to dictionary encoding.
    pub max_unique_pct: f64,
    /// Convert float columns with missing whole numbers to nullable integers
    pub nullables: bool,
    /// `Float64` columns allowed to be narrowed to `Float32`
    pub float_cols: HashSet<String>
}


impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            max_unique_pct: DEFAULT_MAX_UNIQUE_PCT,
            nullables: true,
            float_cols: HashSet::new()
        }
    }
}


impl ReduceOptions {
    pub fn read(file: &str) -> anyhow::Result<Self> {
        let options: Self = serde_json::from_reader(
            std::io::BufReader::new(
                std::fs::File::open(file).with_context(|| format!("failed to open {}", file))?
            )
        )?;
        options.validate().context("invalid config")?;
        Ok(options)
    }

    pub fn with_max_unique_pct(mut self, value: f64) -> Self {
        self.max_unique_pct = value;
        self
    }

    pub fn with_nullables(mut self, yes: bool) -> Self {
        self.nullables = yes;
        self
    }

    pub fn with_float_cols<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        self.float_cols.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn is_float_col(&self, name: &str) -> bool {
        self.float_cols.contains(name)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            (0.0..=1.0).contains(&self.max_unique_pct),
            ConfigurationError {
                option: "max_unique_pct",
                message: format!("{} is not in range [0, 1]", self.max_unique_pct)
            }
        );
        Ok(())
    }
}
