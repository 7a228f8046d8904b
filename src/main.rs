//! Bossfeed CLI - convert a boss HP observation CSV into grouped timeline JSON.
//!
//! ```bash
//! bossfeed                           # data/boss_hp_master.csv → public/bosses.json
//! bossfeed scrape.csv -o out.json    # explicit paths
//! bossfeed --link-column boss_link   # renamed link column
//! bossfeed --drop-bad-links -v       # drop rows with bad links, show reasons
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use bossfeed::{convert_file, ConvertOptions, ConvertReport};

#[derive(Parser)]
#[command(name = "bossfeed")]
#[command(about = "Convert a boss HP observation CSV into grouped timeline JSON", long_about = None)]
struct Cli {
    /// Input CSV file
    #[arg(default_value = "data/boss_hp_master.csv")]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "public/bosses.json")]
    output: PathBuf,

    /// Name of the column holding the boss link
    #[arg(long, default_value = "link")]
    link_column: String,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Drop rows whose link has no trailing digits instead of aborting
    #[arg(long)]
    drop_bad_links: bool,

    /// Show per-row rejection reasons
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = ConvertOptions {
        input: cli.input,
        output: cli.output,
        link_column: cli.link_column,
        delimiter: cli.delimiter,
        drop_bad_links: cli.drop_bad_links,
    };

    eprintln!("📄 Reading: {}", options.input.display());

    match convert_file(&options) {
        Ok(report) => {
            print_report(&report, &options, cli.verbose);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &ConvertReport, options: &ConvertOptions, verbose: bool) {
    eprintln!("   Encoding: {}", report.csv_info.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(report.csv_info.delimiter));
    eprintln!("   Rows: {}", report.csv_info.row_count);
    eprintln!("   Columns: {}", report.csv_info.headers.join(", "));

    if !report.rejected.is_empty() {
        eprintln!("   ⚠️  Rejected {} row(s)", report.rejected.len());
        if verbose {
            for rejected in report.rejected.iter().take(10) {
                eprintln!("      • row {}: {}", rejected.row, rejected.reason);
            }
            if report.rejected.len() > 10 {
                eprintln!("      • ... +{}", report.rejected.len() - 10);
            }
        }
    }

    println!("✔ Wrote {}", options.output.display());
    println!("✔ Boss records: {}", report.records.len());
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
