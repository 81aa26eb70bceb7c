//! hub: drone-fleet dispatch demo.
//!
//! Runs the reference fleet (five drones based at Praça Raul Soares, Belo
//! Horizonte) against seed orders from a CSV file plus a synthetic order
//! stream, then prints the fleet table and the metrics.
//!
//! ```text
//! cargo run -p hub -- --config demos/hub/config.json --orders demos/hub/data/orders.csv
//! cargo run -p hub -- --mode live --ticks 120 --period-ms 50
//! ```

mod demand;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use df_core::FleetConfig;
use df_dispatch::AllocationPolicy;
use df_output::{CsvWriter, OutputWriter, SimOutputObserver};
use df_queue::load_requests_csv;
use df_sim::{FleetService, FleetSnapshot, Sim, SimBuilder, SimObserver, SimulationClock};

use demand::DemandGenerator;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Step the simulation as fast as possible.
    Batch,
    /// Drive it from a background clock thread, one tick per period.
    Live,
}

#[derive(Parser)]
#[command(name = "hub", about = "Drone-fleet dispatch simulator demo")]
struct Cli {
    /// JSON `FleetConfig`; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Orders queued before the first tick.
    #[arg(long)]
    orders: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Mode::Batch)]
    mode: Mode,

    /// Ticks to run; overrides `total_ticks` from the config.
    #[arg(long)]
    ticks: Option<u64>,

    /// Chance of a synthetic order arriving each tick.
    #[arg(long, default_value_t = 0.05)]
    order_rate: f64,

    /// Live mode tick period.
    #[arg(long, default_value_t = 1000)]
    period_ms: u64,

    #[arg(long, default_value = "output/hub")]
    output: PathBuf,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(ticks) = cli.ticks {
        config.total_ticks = ticks;
    }

    let mut builder = SimBuilder::from_config(config.clone());
    if let Some(path) = &cli.orders {
        let drafts = load_requests_csv(path, config.vehicle_capacity)
            .with_context(|| format!("loading orders from {}", path.display()))?;
        println!("Loaded {} orders from {}", drafts.len(), path.display());
        builder = builder.requests(drafts);
    }
    let sim = builder.build()?;

    let writer = CsvWriter::new(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;
    let observer = SimOutputObserver::new(writer, &config);
    let demand = DemandGenerator::new(config.seed, config.home, cli.order_rate, config.vehicle_capacity);

    println!(
        "=== hub: {} vehicles, {} ticks, {} mode, policy {} ===",
        sim.fleet().len(),
        config.total_ticks,
        if cli.mode == Mode::Batch { "batch" } else { "live" },
        sim.policy_name(),
    );

    let t0 = Instant::now();
    let snapshot = match cli.mode {
        Mode::Batch => run_batch(sim, observer, demand),
        Mode::Live => run_live(sim, observer, demand, Duration::from_millis(cli.period_ms))?,
    };
    println!("Finished in {:.3} s; CSV output in {}", t0.elapsed().as_secs_f64(), cli.output.display());
    println!();

    print_snapshot(&snapshot);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FleetConfig> {
    let Some(path) = path else {
        return Ok(FleetConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: FleetConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

// ── Run modes ─────────────────────────────────────────────────────────────────

fn run_batch<P, W>(
    mut sim:      Sim<P>,
    mut observer: SimOutputObserver<W>,
    mut demand:   DemandGenerator,
) -> FleetSnapshot
where
    P: AllocationPolicy,
    W: OutputWriter,
{
    let end = sim.config().end_tick();
    while sim.current_tick() < end {
        if let Some(order) = demand.next_order() {
            if let Err(e) = sim.submit(order) {
                tracing::warn!(error = %e, "synthetic order dropped");
            }
        }
        sim.step(&mut observer);
    }
    observer.on_sim_end(sim.current_tick());
    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }
    sim.snapshot()
}

fn run_live<P, W>(
    sim:        Sim<P>,
    observer:   SimOutputObserver<W>,
    mut demand: DemandGenerator,
    period:     Duration,
) -> Result<FleetSnapshot>
where
    P: AllocationPolicy,
    W: OutputWriter + Send + 'static,
{
    let end = sim.config().end_tick();
    let report_every = sim.config().snapshot_interval_ticks.max(1);
    let service = FleetService::new(sim);
    let clock = SimulationClock::spawn(service.clone(), period, observer)?;

    let mut last_seen = service.current_tick();
    while last_seen < end {
        std::thread::sleep(period);
        let now = service.current_tick();
        if now == last_seen {
            continue;
        }
        for _ in last_seen.0..now.0 {
            if let Some(order) = demand.next_order() {
                if let Err(e) = service.submit(order) {
                    tracing::warn!(error = %e, "synthetic order dropped");
                }
            }
        }
        if now.0 / report_every != last_seen.0 / report_every {
            let m = service.metrics();
            println!(
                "{now}: {} delivered, {} waiting, efficiency {}%, {} vehicles airborne",
                m.total_deliveries,
                m.waiting_requests,
                m.efficiency_percent,
                service.active_routes().len(),
            );
        }
        last_seen = now;
    }

    clock.stop();
    Ok(service.snapshot())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_snapshot(snap: &FleetSnapshot) {
    println!(
        "{:<9} {:<11} {:>8} {:>9} {:<20} {:>7}",
        "Vehicle", "Phase", "Battery", "Free kg", "Location", "ETA"
    );
    println!("{}", "-".repeat(69));
    for v in &snap.vehicles {
        println!(
            "{:<9} {:<11} {:>7}% {:>9.2} {:<20} {:>7}",
            v.call_sign,
            v.phase.to_string(),
            v.battery_percent,
            v.remaining_capacity,
            v.route_label,
            v.eta.to_string(),
        );
    }
    println!();

    let m = &snap.metrics;
    println!("Deliveries      : {}", m.total_deliveries);
    println!("Round trips     : {}", m.total_round_trips);
    println!("Efficiency      : {}%", m.efficiency_percent);
    println!("Mean delivery   : {}", m.mean_delivery_label);
    println!("Busiest vehicle : {}", m.busiest_vehicle.as_deref().unwrap_or("—"));
    println!("Pending         : {} ({} waiting)", m.pending_requests, m.waiting_requests);

    if !snap.history.is_empty() {
        println!();
        println!("Latest deliveries:");
        for record in snap.history.iter().take(5) {
            println!(
                "  {:<28} {:>5.1} kg  {:<7} by {}",
                record.request.address,
                record.request.weight,
                record.request.priority.to_string(),
                record.call_sign,
            );
        }
    }

    match serde_json::to_string(&snap.metrics) {
        Ok(json) => tracing::debug!(metrics = %json, "final metrics"),
        Err(e) => tracing::warn!(error = %e, "metrics not serializable"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use df_core::{AllocationStrategy, FleetConfig};

    use super::load_config;

    #[test]
    fn shipped_config_loads_over_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.json");
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.total_ticks, 900);
        assert_eq!(cfg.snapshot_interval_ticks, 30);
        assert_eq!(cfg.allocation, AllocationStrategy::HeadOfQueue);
        assert_eq!(cfg.vehicle_capacity, FleetConfig::default().vehicle_capacity);
        assert_eq!(cfg.call_signs.len(), 5);
    }

    #[test]
    fn zero_arrival_radius_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "arrival_radius_m": 0.0, "allocation": "skip_ahead" }"#).unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("arrival_radius_m"));
    }
}
