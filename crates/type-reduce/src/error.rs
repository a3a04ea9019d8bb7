use arrow::datatypes::DataType;
use std::fmt::{Display, Formatter};


/// Input table (or the fit/transform call sequence) is not acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    RowCountMismatch {
        column: String,
        expected: usize,
        actual: usize
    },
    DuplicateColumn(String),
    NotFitted,
    MissingColumn(String),
    UnexpectedColumn(String),
    ColumnMismatch {
        column: String,
        fitted: DataType,
        planned: DataType,
        found: DataType
    }
}


impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::RowCountMismatch { column, expected, actual } => write!(
                f, "column '{}' has {} rows, but {} were expected",
                column,
                actual,
                expected
            ),
            ValidationError::DuplicateColumn(name) => {
                write!(f, "column '{}' is present more than once", name)
            },
            ValidationError::NotFitted => {
                write!(f, "transform was called before fit")
            },
            ValidationError::MissingColumn(name) => {
                write!(f, "column '{}' was fitted, but is not present in the table", name)
            },
            ValidationError::UnexpectedColumn(name) => {
                write!(f, "column '{}' was not present at fit time", name)
            },
            ValidationError::ColumnMismatch { column, fitted, planned, found } => write!(
                f, "column '{}' has type {}, but {} or {} was expected",
                column,
                found,
                fitted,
                planned
            )
        }
    }
}


impl std::error::Error for ValidationError {}


#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationError {
    pub option: &'static str,
    pub message: String
}


impl Display for ConfigurationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid option `{}`: {}", self.option, self.message)
    }
}


impl std::error::Error for ConfigurationError {}


/// A value of a transformed table can't be represented by the planned type.
#[derive(Debug, Clone, PartialEq)]
pub struct CastOverflow {
    pub target: DataType,
    pub reason: String
}


impl Display for CastOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "can't cast to {}: {}", self.target, self.reason)
    }
}


impl std::error::Error for CastOverflow {}
