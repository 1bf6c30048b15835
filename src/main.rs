use chrono::NaiveDate;
use clap::Parser;
use log::info;
use std::io::Read;
use std::path::PathBuf;

use placemark::config::Config;
use placemark::geo::format_coords;
use placemark::place::{
    collect_locations, markers, JsonFileSource, LocationSet, SourceBlock, SourceMeta,
};

/// Placemark: merge GPS location lines into map markers
///
/// Each input file is one block of lines in the form
/// `<lat>[N|S], <lon>[E|W][, description]`. Points closer than the
/// threshold are merged into one location carrying every label.
///
/// Examples:
///   placemark trip.txt --title "Prague weekend"
///   cat places.txt | placemark --format markers
///   placemark --source posts.json --threshold 500
///   placemark --serve --port 8080
#[derive(Parser)]
#[command(name = "placemark", version, about, long_about = None)]
struct Cli {
    /// Text files with one location per line. Reads stdin when omitted.
    files: Vec<PathBuf>,

    /// JSON file with an array of {text, title, id, url, date} blocks.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Main title prefixed to every description.
    #[arg(long)]
    title: Option<String>,

    /// Link attached to every label.
    #[arg(long)]
    url: Option<String>,

    /// Date shown after the title (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Merge distance in meters (default 300).
    #[arg(long)]
    threshold: Option<f64>,

    /// Config file (default: ~/.config/placemark/config.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: "json" (locations), "markers" ([lon, lat, html] tuples) or "text".
    #[arg(long, default_value = "json", value_parser = parse_format)]
    format: OutputFormat,

    /// Start the HTTP API instead of processing input.
    #[arg(long)]
    serve: bool,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Markers,
    Text,
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "json" => Ok(OutputFormat::Json),
        "markers" => Ok(OutputFormat::Markers),
        "text" => Ok(OutputFormat::Text),
        _ => Err(format!("Unknown format '{}'. Use 'json', 'markers' or 'text'.", s)),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(t) = cli.threshold {
        config.threshold_m = t;
    }
    if let Some(ref host) = cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    config.validate()?;

    // ── Serve ───────────────────────────────────────────────────

    if cli.serve {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(placemark::server::start(config))?;
        return Ok(());
    }

    // ── Collect ─────────────────────────────────────────────────

    let mut set = config.location_set();

    if let Some(ref path) = cli.source {
        collect_locations(&JsonFileSource::new(path), &mut set)?;
    }

    let blocks = read_blocks(&cli)?;
    collect_locations(&blocks, &mut set)?;

    info!("{} unique locations (threshold {} m)", set.len(), set.threshold());

    // ── Output ──────────────────────────────────────────────────

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(set.locations())?),
        OutputFormat::Markers => println!("{}", serde_json::to_string_pretty(&markers(&set))?),
        OutputFormat::Text => print!("{}", render_text(&set)),
    }
    Ok(())
}

fn read_blocks(cli: &Cli) -> Result<Vec<SourceBlock>, Box<dyn std::error::Error>> {
    let meta = SourceMeta {
        title: cli.title.clone(),
        id: None,
        url: cli.url.clone(),
        date: cli.date,
    };

    if cli.files.is_empty() {
        // --source alone means no stdin block.
        if cli.source.is_some() {
            return Ok(Vec::new());
        }
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(vec![SourceBlock::new(text, meta)]);
    }

    let mut blocks = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        blocks.push(SourceBlock::new(
            text,
            SourceMeta {
                id: Some(path.display().to_string()),
                ..meta.clone()
            },
        ));
    }
    Ok(blocks)
}

fn render_text(set: &LocationSet) -> String {
    let mut out = String::new();
    for (i, loc) in set.iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, format_coords(loc.lat, loc.lon)));
        for label in &loc.labels {
            match label.url {
                Some(ref url) => out.push_str(&format!("       {} <{}>\n", label.text, url)),
                None => out.push_str(&format!("       {}\n", label.text)),
            }
        }
    }
    out
}
