use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use winactivities_core::core::{is_logical_volume, parse_database, parse_volume};
use winactivities_core::structs::options::ActivitiesOptions;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// The activities database or a logical volume (logical volume: \\.\C:)
    #[clap(short, long, value_parser)]
    source: String,

    /// Directory for staged extractions if the source is a logical volume
    #[clap(short, long, value_parser)]
    temp_dir: Option<String>,

    /// Only display activity records with a change tag above this value
    #[clap(long, default_value_t = 0)]
    sequence: i64,

    /// Output template format (ex: "{StartTime} {AppActivityId}")
    #[clap(short, long, value_parser)]
    output_template: Option<String>,

    /// Dump the entire database, not just the Activity table
    #[clap(long)]
    dump_db: bool,

    /// Remove staged extractions when the run completes
    #[clap(long)]
    cleanup: bool,

    /// Log level
    #[clap(long, default_value = "error", value_parser = ["error", "warn", "info", "debug"])]
    debug: String,
}

fn main() {
    let args = Args::parse();

    let level = match args.debug.as_str() {
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        _ => LevelFilter::Error,
    };
    // Diagnostics go to stderr, decoded records own stdout
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let options = ActivitiesOptions {
        sequence: args.sequence,
        dump_db: args.dump_db,
        template: args.output_template,
        temp_dir: args.temp_dir,
        cleanup: args.cleanup,
    };

    let status = if is_logical_volume(&args.source) {
        parse_volume(&args.source, &options)
    } else {
        parse_database(&args.source, &options)
    };

    match status {
        Ok(_) => info!("[winactivities] Finished parsing {}", args.source),
        Err(err) => {
            eprintln!("[winactivities] Failed to parse {}: {err:?}", args.source);
            std::process::exit(1);
        }
    }
}
