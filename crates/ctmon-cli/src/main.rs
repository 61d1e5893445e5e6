//! ctmon CLI: data entry, history and export for cycle-time monitoring.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing_subscriber::EnvFilter;

use ctmon::store::RETENTION_DAYS;
use ctmon::{
    catalog, Candidate, DerivedMetrics, FileSlot, MonitorConfig, RawInputs, RecordStore,
    SessionClock, SystemClock,
};

#[derive(Parser)]
#[command(
    name = "ctmon",
    about = "⛏️  ctmon: mine-site cycle-time productivity monitor",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// The six raw measurement fields. Left empty, a field simply does not
/// contribute and the affected metrics come out as 0.00.
#[derive(Args)]
struct InputArgs {
    /// Cycletime loader (detik)
    #[arg(long, default_value = "")]
    cycletime_loader: String,
    /// Waktu kerja loader (menit)
    #[arg(long, default_value = "")]
    waktu_kerja: String,
    /// Jumlah passing (kali)
    #[arg(long, default_value = "")]
    jumlah_passing: String,
    /// Cycletime hauler (menit)
    #[arg(long, default_value = "")]
    cycletime_hauler: String,
    /// Konversi jarak (km)
    #[arg(long, default_value = "")]
    konversi_jarak: String,
    /// Jumlah HD (unit)
    #[arg(long, default_value = "")]
    jumlah_hd: String,
}

impl InputArgs {
    fn to_inputs(&self) -> RawInputs {
        RawInputs {
            cycletime_loader: self.cycletime_loader.as_str().into(),
            waktu_kerja_loader: self.waktu_kerja.as_str().into(),
            jumlah_passing: self.jumlah_passing.as_str().into(),
            cycletime_hauler: self.cycletime_hauler.as_str().into(),
            konversi_jarak: self.konversi_jarak.as_str().into(),
            jumlah_hd: self.jumlah_hd.as_str().into(),
        }
    }
}

#[derive(Args)]
struct StoreArgs {
    /// Path to the optional YAML config file
    #[arg(long, default_value = "ctmon.yaml")]
    config: PathBuf,
    /// Data directory override (defaults to the configured one)
    #[arg(long)]
    dir: Option<PathBuf>,
}

impl StoreArgs {
    fn resolve(&self) -> Result<MonitorConfig> {
        let mut config = MonitorConfig::load(&self.config)?;
        if let Some(dir) = &self.dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the productivity metrics from raw measurements
    Compute {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Save a timestamped record to the local history
    Save {
        #[command(flatten)]
        inputs: InputArgs,
        /// Lokasi pit
        #[arg(long)]
        pit: String,
        /// Unit loader
        #[arg(long)]
        unit: String,
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Show the retained history (last 7 days)
    List {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Export the history to monitoring_ct_data.csv
    Export {
        #[command(flatten)]
        store: StoreArgs,
        /// Output file (default: the configured export directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Show known pit locations and their loader units
    Pits,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute { inputs } => cmd_compute(inputs),
        Commands::Save {
            inputs,
            pit,
            unit,
            store,
        } => cmd_save(inputs, pit, unit, store),
        Commands::List { store } => cmd_list(store),
        Commands::Export { store, output } => cmd_export(store, output),
        Commands::Pits => cmd_pits(),
    }
}

// ─── Command implementations ──────────────────────────────────────────────────

fn cmd_compute(inputs: InputArgs) -> Result<()> {
    let metrics = DerivedMetrics::compute(&inputs.to_inputs());
    print_metrics(&metrics);
    Ok(())
}

fn cmd_save(inputs: InputArgs, pit: String, unit: String, store_args: StoreArgs) -> Result<()> {
    let config = store_args.resolve()?;
    let clock = SystemClock;
    let mut store = RecordStore::new(FileSlot::new(&config.data_dir));
    store.load(&clock);

    let mut session = SessionClock::start(Arc::new(clock))?;
    println!("🕒 {}", session.display());

    let candidate = Candidate {
        inputs: inputs.to_inputs(),
        pit_location: pit,
        unit_loader: unit,
    };
    let record = store.commit(candidate, &clock)?;
    session.close();

    if !catalog::is_cataloged(&record.pit_location, &record.unit_loader) {
        println!(
            "note: {} is not a cataloged loader for {}",
            record.unit_loader, record.pit_location
        );
    }

    println!("✓ Record saved ({} in history)", store.len());
    println!("  Waktu dan Tanggal: {}", record.date_time);
    println!("  Lokasi Pit:        {}", record.pit_location);
    println!("  Unit Loader:       {}", record.unit_loader);
    print_metrics(&DerivedMetrics {
        loading_time: record.loading_time,
        productivity_loader: record.productivity_loader,
        productivity_hauler: record.productivity_hauler,
        match_factor: record.match_factor,
    });
    Ok(())
}

fn cmd_list(store_args: StoreArgs) -> Result<()> {
    let config = store_args.resolve()?;
    let mut store = RecordStore::new(FileSlot::new(&config.data_dir));
    store.load(&SystemClock);

    if store.is_empty() {
        println!("No records in the last {} days.", RETENTION_DAYS);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header([
        "Waktu dan Tanggal",
        "Lokasi Pit",
        "Unit Loader",
        "Loading Time",
        "Prod. Loader",
        "Prod. Hauler",
        "Match Factor",
    ]);
    for record in store.records() {
        table.add_row([
            record.date_time.as_str(),
            record.pit_location.as_str(),
            record.unit_loader.as_str(),
            &format!("{:.2}", record.loading_time),
            &format!("{:.2}", record.productivity_loader),
            &format!("{:.2}", record.productivity_hauler),
            &format!("{:.2}", record.match_factor),
        ]);
    }

    println!("{table}");
    println!(
        "{} record(s) retained (window: {} days)",
        store.len(),
        RETENTION_DAYS
    );
    Ok(())
}

fn cmd_export(store_args: StoreArgs, output: Option<PathBuf>) -> Result<()> {
    let config = store_args.resolve()?;
    let mut store = RecordStore::new(FileSlot::new(&config.data_dir));
    store.load(&SystemClock);

    let bytes = store.export()?;
    let path = output.unwrap_or_else(|| config.export_path());
    std::fs::write(&path, &bytes)?;
    println!("Exported {} record(s) to {}", store.len(), path.display());
    Ok(())
}

fn cmd_pits() -> Result<()> {
    for pit in catalog::pit_locations() {
        let units = catalog::loader_units(pit);
        if units.is_empty() {
            println!("{pit}: (no units assigned)");
        } else {
            println!("{pit}: {}", units.join(", "));
        }
    }
    Ok(())
}

fn print_metrics(metrics: &DerivedMetrics) {
    println!("  Loading Time:      {:.2} menit", metrics.loading_time);
    println!(
        "  Prod. Loader:      {:.2} bcm/jam",
        metrics.productivity_loader
    );
    println!(
        "  Prod. Hauler:      {:.2} bcm/jam/km",
        metrics.productivity_hauler
    );
    println!("  Match Factor:      {:.2}", metrics.match_factor);
}
