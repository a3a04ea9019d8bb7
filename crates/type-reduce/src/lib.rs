mod cast;
mod downcast;
mod error;
mod options;
mod plan;
mod profile;
mod reducer;
mod router;
mod schema_patch;
mod summary;
mod table;
pub mod policy;


pub use downcast::{minimal_int_type, minimal_key_type};
pub use error::*;
pub use options::*;
pub use plan::*;
pub use policy::Conversion;
pub use profile::{ColumnProfile, ColumnStats, FloatStats};
pub use reducer::*;
pub use router::{route, Bucket};
pub use summary::ReductionSummary;
pub use table::{table_from_columns, validate_table};
