use clap::Parser;
use std::path::PathBuf;


#[derive(Parser, Debug)]
#[command(version, about = "Shrinks column types of a parquet file", long_about = None)]
pub struct Cli {
    /// Parquet file to read
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the reduced parquet file
    #[arg(long)]
    pub output: PathBuf,

    /// JSON file with reduce options, flags below take precedence over it
    #[arg(long)]
    pub config: Option<String>,

    /// Maximum `distinct / rows` ratio of a text column converted to dictionary encoding
    #[arg(long)]
    pub max_unique_pct: Option<f64>,

    /// Don't convert float columns with missing whole numbers to nullable integers
    #[arg(long)]
    pub no_nullables: bool,

    /// Float64 column allowed to be narrowed to Float32 (can be specified multiple times)
    #[arg(long = "float-col")]
    pub float_col: Vec<String>,

    /// Number of rows per batch when reading the input file
    #[arg(long, default_value = "65536")]
    pub batch_size: usize
}
