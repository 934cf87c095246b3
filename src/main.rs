use anyhow::{Context, Result};
use clap::{arg, command, Parser};
use seller_report::application::app::{App, Application, ReportConfig};
use seller_report::application::strategies::{BonusKind, RevenueKind, StrategyConfig};
use seller_report::infrastructure::loader;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Ranks sellers by profit and computes their bonuses from a JSON sales dataset"
)]
struct ReportProgram {
    /// JSON dataset, `-` or nothing reads stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Revenue strategy for line items
    #[arg(long, value_enum, default_value_t = RevenueKind::Discounted)]
    revenue: RevenueKind,

    /// Bonus strategy for ranked sellers
    #[arg(long, value_enum, default_value_t = BonusKind::Profit)]
    bonus: BonusKind,

    /// Shorthand for `--bonus profit-clamped`
    #[arg(long)]
    clamp_negative_profit: bool,

    /// Include skipped references next to the report
    #[arg(long)]
    with_diagnostics: bool,

    /// Pretty print JSON output
    #[arg(short, long)]
    pretty: bool,
}

impl ReportProgram {
    fn config(&self) -> ReportConfig {
        let bonus = if self.clamp_negative_profit {
            BonusKind::ProfitClamped
        } else {
            self.bonus
        };
        ReportConfig {
            strategies: StrategyConfig {
                revenue: self.revenue,
                bonus,
            },
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr, the report owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ReportProgram::parse();

    let data = loader::load_sales_data(args.input.as_deref())
        .context("Could not load sales data")?;

    let app = App::new(&args.config());
    let outcome = app.report(data.as_ref())?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Could not create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match (args.with_diagnostics, args.pretty) {
        (true, true) => serde_json::to_writer_pretty(&mut writer, &outcome)?,
        (true, false) => serde_json::to_writer(&mut writer, &outcome)?,
        (false, true) => serde_json::to_writer_pretty(&mut writer, &outcome.entries)?,
        (false, false) => serde_json::to_writer(&mut writer, &outcome.entries)?,
    }
    writeln!(writer)?;
    writer.flush()?;

    tracing::info!("Report written for {} sellers", outcome.entries.len());
    Ok(())
}
