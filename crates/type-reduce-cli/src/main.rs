mod cli;

use anyhow::{ensure, Context};
use arrow::array::RecordBatch;
use arrow::record_batch::RecordBatchReader;
use clap::Parser;
use cli::Cli;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use sqd_type_reduce::{ReduceOptions, ReductionSummary, Transformer, TypeReducer};
use std::fs::File;
use std::path::Path;


fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    init_tracing();

    let options = build_options(&args)?;
    let (plan, summary) = reduce_file(&args.input, &args.output, options, args.batch_size)?;

    print!("{}", plan);
    println!("{}", summary);

    Ok(())
}


fn build_options(args: &Cli) -> anyhow::Result<ReduceOptions> {
    let mut options = match args.config.as_ref() {
        Some(file) => ReduceOptions::read(file)?,
        None => ReduceOptions::default()
    };
    if let Some(pct) = args.max_unique_pct {
        options = options.with_max_unique_pct(pct);
    }
    if args.no_nullables {
        options = options.with_nullables(false);
    }
    options = options.with_float_cols(args.float_col.iter().cloned());
    options.validate().context("invalid options")?;
    Ok(options)
}


fn reduce_file(
    input: &Path,
    output: &Path,
    options: ReduceOptions,
    batch_size: usize
) -> anyhow::Result<(String, ReductionSummary)>
{
    ensure!(batch_size > 0, "batch size must be greater than 0");

    let table = read_parquet(input, batch_size)
        .with_context(|| format!("failed to read {}", input.display()))?;

    tracing::info!(
        rows = table.num_rows(),
        columns = table.num_columns(),
        "loaded {}",
        input.display()
    );

    let mut reducer = TypeReducer::new(options)?;
    reducer.fit(&table)?;
    let (reduced, summary) = reducer.transform_with_summary(&table)?;

    write_parquet(output, &reduced)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let plan = reducer.plan().map(|p| p.to_string()).unwrap_or_default();
    Ok((plan, summary))
}


fn read_parquet(file: &Path, batch_size: usize) -> anyhow::Result<RecordBatch> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(file)?)?
        .with_batch_size(batch_size)
        .build()?;

    let schema = reader.schema();
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    let table = arrow::compute::concat_batches(&schema, &batches)?;
    Ok(table)
}


fn write_parquet(file: &Path, table: &RecordBatch) -> anyhow::Result<()> {
    let mut writer = ArrowWriter::try_new(File::create(file)?, table.schema(), None)?;
    writer.write(table)?;
    writer.close()?;
    Ok(())
}


fn init_tracing() {
    use std::io::IsTerminal;

    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).unwrap_or("info".to_string()),
    );

    if std::io::stderr().is_terminal() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
            .init();
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::DataType;
    use sqd_type_reduce::{table_from_columns, Conversion};
    use std::io::Write;
    use std::sync::Arc;


    fn sample_table() -> anyhow::Result<RecordBatch> {
        let ids: Int64Array = (0..1000i64).collect();
        let prices: Float64Array = (0..1000).map(|i| i as f64 * 0.5).collect();
        let kinds: StringArray = (0..1000).map(|i| Some(["buy", "sell"][i % 2])).collect();
        table_from_columns([
            ("id", Arc::new(ids) as ArrayRef),
            ("price", Arc::new(prices) as ArrayRef),
            ("kind", Arc::new(kinds) as ArrayRef)
        ])
    }

    fn cli_args(input: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut argv = vec![
            "sqd-type-reduce".to_string(),
            "--input".to_string(),
            input.display().to_string(),
            "--output".to_string(),
            output.display().to_string()
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Cli::parse_from(argv)
    }

    #[test]
    fn parquet_round_trip() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("input.parquet");
        let output = dir.path().join("output.parquet");
        write_parquet(&input, &sample_table()?)?;

        let args = cli_args(&input, &output, &["--float-col", "price", "--batch-size", "300"]);
        let options = build_options(&args)?;
        let (plan, summary) = reduce_file(&args.input, &args.output, options, args.batch_size)?;

        assert!(plan.contains("id: Int64 -> UInt16 (integer downcast)"));
        assert_eq!(summary.count(Conversion::FloatDowncast), 1);
        assert_eq!(summary.count(Conversion::Categorical), 1);

        let reduced = read_parquet(&output, 1024)?;
        assert_eq!(reduced.num_rows(), 1000);
        assert_eq!(reduced.schema().field(0).data_type(), &DataType::UInt16);
        assert_eq!(reduced.schema().field(1).data_type(), &DataType::Float32);
        assert!(matches!(reduced.schema().field(2).data_type(), DataType::Dictionary(_, _)));
        Ok(())
    }

    #[test]
    fn config_file_and_flags() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = dir.path().join("options.json");
        let mut file = File::create(&config)?;
        write!(file, r#"{{"max_unique_pct": 0.1, "float_cols": ["price"]}}"#)?;

        let config = config.display().to_string();
        let args = cli_args(
            Path::new("in.parquet"),
            Path::new("out.parquet"),
            &["--config", &config, "--no-nullables", "--float-col", "size"]
        );
        let options = build_options(&args)?;
        assert_eq!(options.max_unique_pct, 0.1);
        assert!(!options.nullables);
        assert!(options.is_float_col("price"));
        assert!(options.is_float_col("size"));

        let args = cli_args(
            Path::new("in.parquet"),
            Path::new("out.parquet"),
            &["--config", &config, "--max-unique-pct", "2"]
        );
        assert!(build_options(&args).is_err());
        Ok(())
    }

    #[test]
    fn zero_batch_size() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("input.parquet");
        write_parquet(&input, &sample_table()?)?;
        let res = reduce_file(&input, &dir.path().join("out.parquet"), ReduceOptions::default(), 0);
        assert!(res.is_err());
        Ok(())
    }
}
