//! Process command - convert a single statement PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use roopal_core::{InvoiceRecord, PdfExtractor};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input statement (PDF)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Omit the rider's real name from the output
    #[arg(short, long)]
    anonymise: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of exported rows
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    info!("Processing file: {}", args.input.display());

    let source = PdfExtractor::new().with_min_text_length(config.pdf.min_text_length);
    let anonymise = args.anonymise || config.export.anonymise;
    let record = super::parser(&config).parse_file(&args.input, &source, anonymise)?;

    let output = format_record(&record, args.format, &config)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_record(
    record: &InvoiceRecord,
    format: OutputFormat,
    config: &roopal_core::RoopalConfig,
) -> anyhow::Result<String> {
    let (exporter, writer) = super::exporter(config)?;

    let output = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&exporter.rows(record))?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => exporter.to_csv(std::slice::from_ref(record), &writer)?,
        OutputFormat::Text => format_record_text(record),
    };

    Ok(output)
}

pub fn format_record_text(record: &InvoiceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", record.id()));

    match record.rider() {
        Some(rider) if record.is_anonymised() => {
            output.push_str(&format!("Rider: {}\n", rider.pseudonym()));
        }
        Some(rider) => {
            output.push_str(&format!("Rider: {} ({})\n", rider.name(), rider.pseudonym()));
        }
        None => output.push_str("Rider: unknown\n"),
    }

    let period = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.to_string()).unwrap_or_else(|| "?".to_string())
    };
    output.push_str(&format!(
        "Period: {} - {}\n",
        period(record.date_from()),
        period(record.date_to())
    ));
    output.push('\n');

    output.push_str(&format!("Shifts: {}\n", record.shifts().len()));
    for shift in record.shifts() {
        output.push_str(&format!(
            "  {} - {}  {:>3} drops  {:>8}\n",
            shift.time_in().format("%Y-%m-%d %H:%M"),
            shift.time_out().format("%H:%M"),
            shift.drops(),
            shift.amount()
        ));
    }

    output.push_str(&format!("Adjustments: {}\n", record.adjustments().len()));
    for adjustment in record.adjustments() {
        output.push_str(&format!(
            "  {:<40} {:>8}\n",
            adjustment.label().trim(),
            adjustment.amount()
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total: {}\n", record.total_pay()));

    output
}
