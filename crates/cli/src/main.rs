use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fmedia_organizer_core::{
    organize, sequence_scans, OrganizeOptions, OrganizeReport, ScanOptions,
};

#[derive(Debug, Parser)]
#[command(name = "fmedia-organizer-cli")]
#[command(about = "撮影日時をもとに写真と動画を一括リネームしてコピーします")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Organize(OrganizeArgs),
    Scans(ScanArgs),
}

#[derive(Debug, Args)]
struct OrganizeArgs {
    source: String,
    destination: String,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct ScanArgs {
    source: String,
    destination: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Organize(args) => cmd_organize(args),
        Commands::Scans(args) => cmd_scans(args),
    }
}

fn cmd_organize(args: OrganizeArgs) -> Result<()> {
    let options = OrganizeOptions {
        source: args.source.into(),
        destination: args.destination.into(),
        ..OrganizeOptions::default()
    };

    let report = organize(&options)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Table => {
            print_table(&report);
        }
    }

    Ok(())
}

fn cmd_scans(args: ScanArgs) -> Result<()> {
    let options = ScanOptions {
        source: args.source.into(),
        destination: args.destination.into(),
        ..ScanOptions::default()
    };

    let report = sequence_scans(&options)?;
    println!("連番コピー完了: {}件 (失敗 {}件)", report.copied, report.failed);
    Ok(())
}

fn print_table(report: &OrganizeReport) {
    println!("元ファイル -> 新ファイル (source)");
    for record in &report.records {
        println!(
            "{} -> {} ({:?})",
            record.source_path.display(),
            record.destination_path.display(),
            record.name_source
        );
    }

    println!(
        "\n集計: scanned={} copied={} capture_time={} file_modified={} original_name={} unrecognized={} failed={}",
        report.stats.scanned_files,
        report.stats.copied,
        report.stats.by_capture_time,
        report.stats.by_file_modified,
        report.stats.by_original_name,
        report.stats.unrecognized,
        report.stats.failed
    );
}
