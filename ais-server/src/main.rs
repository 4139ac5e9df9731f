//! ais: CLI + web server for AIS decoding.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use comfy_table::{Cell, Table};
use tokio::io::{AsyncBufRead, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use ais_core::config::{self, Config};
use ais_core::navigation::SpeedOverGround;
use ais_core::{mmsi, ship_type_name, AisMessage, StaticDataPart};

mod feed;
mod pipeline;
mod web;

use pipeline::{Counts, Event};

#[derive(Parser)]
#[command(name = "ais", version, about = "AIS AIVDM/AIVDO decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode NMEA sentences and print every message
    Decode {
        /// File of NMEA sentences, or "-" for stdin
        #[arg(default_value = "-")]
        file: PathBuf,

        /// Print one JSON object per line instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decode NMEA sentences and print a per-vessel table
    Summary {
        /// File of NMEA sentences, or "-" for stdin
        #[arg(default_value = "-")]
        file: PathBuf,
    },

    /// Read a live TCP feed and serve position snapshots over HTTP
    Serve {
        /// Feed address (host:port); overrides feed.address
        #[arg(long, env = "AIS_FEED")]
        feed: Option<String>,

        /// Bind host; overrides dashboard.host
        #[arg(long)]
        host: Option<String>,

        /// Bind port; overrides dashboard.port
        #[arg(long)]
        port: Option<u16>,

        /// Seconds per snapshot window; overrides dashboard.snapshot_interval_secs
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Show the effective configuration
    Config {
        /// Write the default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::load_config();

    match cli.command {
        Commands::Decode { file, json } => cmd_decode(file, json, &config).await,
        Commands::Summary { file } => cmd_summary(file, &config).await,
        Commands::Serve {
            feed,
            host,
            port,
            interval,
        } => cmd_serve(config, feed, host, port, interval).await,
        Commands::Config { init } => cmd_config(&config, init),
    }
}

async fn open_input(file: &Path) -> Box<dyn AsyncBufRead + Unpin + Send> {
    if file.to_str() == Some("-") {
        return Box::new(BufReader::new(tokio::io::stdin()));
    }
    match tokio::fs::File::open(file).await {
        Ok(f) => Box::new(BufReader::new(f)),
        Err(e) => {
            error!("Error opening {}: {e}", file.display());
            std::process::exit(1);
        }
    }
}

async fn cmd_decode(file: PathBuf, json: bool, config: &Config) {
    let reader = open_input(&file).await;
    let mut counts = Counts::default();

    let result = pipeline::process(reader, config.router.channel_capacity, |event| {
        counts.record(&event);
        match event {
            Event::Decoded(msg) if json => match serde_json::to_string(&msg) {
                Ok(line) => println!("{line}"),
                Err(e) => warn!(error = %e, "failed to serialize message"),
            },
            Event::Decoded(msg) => println!("{msg}"),
            Event::Undecodable { message, error } => {
                if !json {
                    println!("=== Message Type {} ===", message.msg_type);
                    println!(" Unsupported type\n");
                }
                info!(msg_type = message.msg_type, %error, "message not decoded");
            }
            Event::Failed(failed) => {
                warn!(issue = %failed.issue, sentence = %failed.sentence, "rejected sentence");
            }
        }
    })
    .await;

    finish(result, &counts);
}

fn finish(result: std::io::Result<u64>, counts: &Counts) {
    match result {
        Ok(lines) => info!(
            lines,
            messages = counts.messages,
            decoded = counts.decoded,
            failed = counts.failed,
            "input exhausted"
        ),
        Err(e) => {
            error!("Error reading input: {e}");
            std::process::exit(1);
        }
    }
}

/// Accumulated vessel state from decoded messages.
struct VesselState {
    mmsi: u32,
    name: Option<String>,
    callsign: Option<String>,
    ship_type: Option<u8>,
    lat: Option<f64>,
    lon: Option<f64>,
    speed: Option<f32>,
    course: Option<f32>,
    messages: u32,
}

impl VesselState {
    fn new(mmsi: u32) -> Self {
        VesselState {
            mmsi,
            name: None,
            callsign: None,
            ship_type: None,
            lat: None,
            lon: None,
            speed: None,
            course: None,
            messages: 0,
        }
    }

    fn update(&mut self, msg: &AisMessage) {
        self.messages += 1;
        let position = match msg {
            AisMessage::ClassAPosition(m) => Some(&m.position),
            AisMessage::ClassBPosition(m) => Some(&m.position),
            AisMessage::BaseStation(m) => {
                self.set_position(m.lon, m.lat);
                None
            }
            AisMessage::StaticVoyage(m) => {
                self.name = non_empty(&m.vessel_name);
                self.callsign = non_empty(&m.callsign);
                self.ship_type = Some(m.ship_type);
                None
            }
            AisMessage::StaticData(m) => {
                match &m.part {
                    StaticDataPart::A { vessel_name } => self.name = non_empty(vessel_name),
                    StaticDataPart::B {
                        ship_type,
                        call_sign,
                        ..
                    } => {
                        self.callsign = non_empty(call_sign);
                        self.ship_type = Some(*ship_type);
                    }
                }
                None
            }
            AisMessage::BinaryBroadcast(_) => None,
        };

        if let Some(p) = position {
            self.set_position(p.lon, p.lat);
            self.speed = match SpeedOverGround::classify(p.speed) {
                SpeedOverGround::Knots(knots) => Some(knots),
                _ => None,
            };
            self.course = (p.course < 360.0).then_some(p.course);
        }
    }

    fn set_position(&mut self, lon: f64, lat: f64) {
        if lon.abs() <= 180.0 && lat.abs() <= 90.0 {
            self.lon = Some(lon);
            self.lat = Some(lat);
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

async fn cmd_summary(file: PathBuf, config: &Config) {
    let reader = open_input(&file).await;
    let mut counts = Counts::default();
    let mut vessels: HashMap<u32, VesselState> = HashMap::new();

    let result = pipeline::process(reader, config.router.channel_capacity, |event| {
        counts.record(&event);
        if let Event::Decoded(msg) = &event {
            vessels
                .entry(msg.mmsi())
                .or_insert_with(|| VesselState::new(msg.mmsi()))
                .update(msg);
        }
    })
    .await;

    finish(result, &counts);
    print_summary(&vessels, &counts);
}

fn print_summary(vessels: &HashMap<u32, VesselState>, counts: &Counts) {
    println!();
    println!(
        "Messages: {} complete, {} decoded, {} rejected sentences, {} vessels",
        counts.messages,
        counts.decoded,
        counts.failed,
        vessels.len()
    );
    println!();

    if vessels.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "MMSI", "Name", "Callsign", "Type", "Lat", "Lon", "Speed (kn)", "Course", "Owner",
        "Msgs",
    ]);

    let mut sorted: Vec<_> = vessels.values().collect();
    sorted.sort_by_key(|v| (std::cmp::Reverse(v.messages), v.mmsi));

    for v in sorted {
        table.add_row(vec![
            Cell::new(format!("{:09}", v.mmsi)),
            Cell::new(v.name.as_deref().unwrap_or("-")),
            Cell::new(v.callsign.as_deref().unwrap_or("-")),
            Cell::new(v.ship_type.and_then(ship_type_name).unwrap_or("-")),
            Cell::new(v.lat.map(|l| format!("{l:.4}")).unwrap_or("-".into())),
            Cell::new(v.lon.map(|l| format!("{l:.4}")).unwrap_or("-".into())),
            Cell::new(v.speed.map(|s| format!("{s:.1}")).unwrap_or("-".into())),
            Cell::new(v.course.map(|c| format!("{c:.1}")).unwrap_or("-".into())),
            Cell::new(mmsi::describe(v.mmsi)),
            Cell::new(v.messages),
        ]);
    }

    println!("{table}");
}

async fn cmd_serve(
    config: Config,
    feed: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    interval: Option<u64>,
) {
    let Some(addr) = feed.or(config.feed.address) else {
        error!(
            "No feed address: pass --feed or set feed.address in {}",
            config::config_file().display()
        );
        std::process::exit(1);
    };
    let host = host.unwrap_or(config.dashboard.host);
    let port = port.unwrap_or(config.dashboard.port);
    let interval = Duration::from_secs(
        interval
            .unwrap_or(config.dashboard.snapshot_interval_secs)
            .max(1),
    );

    let state = Arc::new(web::AppState::new());
    feed::spawn_feed(
        addr,
        Arc::clone(&state),
        config.router.channel_capacity,
        interval,
    );

    if let Err(e) = web::serve(state, &host, port).await {
        error!("Server error on {host}:{port}: {e}");
        std::process::exit(1);
    }
}

fn cmd_config(config: &Config, init: bool) {
    let path = config::config_file();
    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            match config::save_config(config) {
                Ok(path) => println!("Wrote {}", path.display()),
                Err(e) => {
                    error!("Error writing {}: {e}", path.display());
                    std::process::exit(1);
                }
            }
        }
    }

    match config::to_yaml(config) {
        Ok(text) => print!("{text}"),
        Err(e) => {
            error!("Error rendering config: {e}");
            std::process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
