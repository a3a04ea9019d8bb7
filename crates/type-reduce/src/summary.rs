use crate::policy::Conversion;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};


/// Memory usage and per-conversion column counts of a single transform call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionSummary {
    pub memory_before: usize,
    pub memory_after: usize,
    columns: BTreeMap<Conversion, usize>
}


impl ReductionSummary {
    pub fn record(&mut self, conversion: Conversion, memory_before: usize, memory_after: usize) {
        self.memory_before += memory_before;
        self.memory_after += memory_after;
        *self.columns.entry(conversion).or_default() += 1;
    }

    /// Number of columns which went through the given conversion
    pub fn count(&self, conversion: Conversion) -> usize {
        self.columns.get(&conversion).copied().unwrap_or(0)
    }

    pub fn num_converted(&self) -> usize {
        self.columns.iter()
            .filter(|(c, _)| **c != Conversion::Unchanged)
            .map(|(_, n)| *n)
            .sum()
    }

    pub fn reduction_pct(&self) -> f64 {
        if self.memory_before == 0 {
            return 0.0
        }
        100.0 * (self.memory_before as f64 - self.memory_after as f64) / self.memory_before as f64
    }
}


impl Display for ReductionSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f, "memory usage {} -> {} ({:.1}% reduction)",
            HumanBytes(self.memory_before),
            HumanBytes(self.memory_after),
            self.reduction_pct()
        )?;
        for conversion in [
            Conversion::IntegerDowncast,
            Conversion::FloatDowncast,
            Conversion::Categorical,
            Conversion::NullableInteger,
            Conversion::Unchanged
        ] {
            write!(f, ", {}: {}", conversion, self.count(conversion))?;
        }
        Ok(())
    }
}


struct HumanBytes(usize);


impl Display for HumanBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
        let mut value = self.0 as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit + 1 < UNITS.len() {
            value /= 1024.0;
            unit += 1;
        }
        if unit == 0 {
            write!(f, "{} B", self.0)
        } else {
            write!(f, "{:.2} {}", value, UNITS[unit])
        }
    }
}
