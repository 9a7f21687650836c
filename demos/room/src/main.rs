//! room — an indoor scenario driving the raybridge core end to end.
//!
//! One static access point and a handful of random-walk users in a
//! 6 m × 4 m × 3 m room.  Users bounce off the walls; every tick the access
//! point queries its channel to each user.  A free-space evaluator stands in
//! for the ray tracer, with optional artificial latency so the look-ahead
//! mode has something to hide.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rb_channel::{ChannelEvaluator, ChannelRequest, Evaluation, EvaluatorError, SchedulerMode};
use rb_coherence::SPEED_OF_LIGHT;
use rb_core::{MILLISECOND, NodeId, SimTime, Vec3};
use rb_mobility::DistributionSpec;
use rb_output::{BridgeOutputObserver, CsvWriter};
use rb_registry::NodeDescriptor;
use rb_sim::{BoxStepper, Bridge, BridgeConfig, NoopObserver, RunPlan, SimInit};

// ── Constants ─────────────────────────────────────────────────────────────────

const ROOM:         [f64; 3] = [6.0, 4.0, 3.0];
const ACCESS_POINT: NodeId   = NodeId(0);
const USER_SPEED:   f64      = 1.0; // m/s, walking pace

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    P2p,
    P2mp,
    LookAhead,
}

impl From<Mode> for SchedulerMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::P2p       => SchedulerMode::PointToPoint,
            Mode::P2mp      => SchedulerMode::PointToMultipoint,
            Mode::LookAhead => SchedulerMode::LookAhead,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Indoor random-walk scenario for the channel-freshness scheduler")]
struct Args {
    /// JSON init document; overrides the built-in scenario and the
    /// settings flags below.
    #[arg(long)]
    init: Option<PathBuf>,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = Mode::P2p)]
    mode: Mode,

    /// Carrier frequency in MHz.
    #[arg(long, default_value_t = 5_210.0)]
    frequency_mhz: f64,

    /// Number of random-walk users.
    #[arg(long, default_value_t = 3)]
    users: u32,

    #[arg(long, default_value_t = 2_000)]
    duration_ms: u64,

    #[arg(long, default_value_t = 50)]
    step_ms: u64,

    /// Artificial evaluator latency per call, milliseconds.
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Write CSV diagnostics into this directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

/// What the free-space evaluator reports for one link.
#[derive(Clone, Debug)]
struct LinkReport {
    /// Free-space path loss, dB.
    wb_loss_db: f64,
    /// Propagation delay of the direct path, ns.
    delay_ns:   f64,
}

/// Friis free-space model on the line-of-sight distance.
struct FreeSpaceEvaluator {
    carrier_frequency_hz: f64,
    latency:              Duration,
}

impl ChannelEvaluator for FreeSpaceEvaluator {
    type Description = LinkReport;

    fn evaluate(&self, req: &ChannelRequest) -> Result<Evaluation<LinkReport>, EvaluatorError> {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
        let d = (req.rx_state.position - req.tx_state.position).norm();
        if d == 0.0 {
            return Err(EvaluatorError::new(format!("{} and {} are co-located", req.tx, req.rx)));
        }
        let wb_loss_db = 20.0 * d.log10() + 20.0 * self.carrier_frequency_hz.log10() - 147.55;
        Ok(Evaluation::new(LinkReport { wb_loss_db, delay_ns: d / SPEED_OF_LIGHT * 1e9 }))
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

fn built_in_scenario(args: &Args) -> SimInit {
    let spread = std::f64::consts::PI / 10.0;
    let mut nodes = vec![NodeDescriptor::Static { id: ACCESS_POINT, position: Vec3::new(3.0, 2.0, 2.0) }];
    nodes.extend((1..=args.users).map(|i| NodeDescriptor::RandomWalk {
        id:         NodeId(i),
        position:   Vec3::new(0.5 + 0.5 * f64::from(i), 1.0, 1.5),
        mode:       "wall".into(),
        mode_value: 0.0,
        speed:      DistributionSpec::constant(USER_SPEED),
        direction:  DistributionSpec::uniform(-spread, spread),
    }));
    SimInit {
        config: BridgeConfig {
            seed:                  args.seed,
            carrier_frequency_hz:  args.frequency_mhz * 1e6,
            mode:                  args.mode.into(),
            min_coherence_time_ms: None,
            collect_history:       true,
        },
        nodes,
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let init = match &args.init {
        Some(path) => SimInit::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => built_in_scenario(&args),
    };
    info!(
        nodes = init.nodes.len(),
        mode = %init.config.mode,
        seed = init.config.seed,
        "room scenario"
    );

    let evaluator = Arc::new(FreeSpaceEvaluator {
        carrier_frequency_hz: init.config.carrier_frequency_hz,
        latency:              Duration::from_millis(args.latency_ms),
    });
    let mut bridge = Bridge::from_init(&init, evaluator).context("bridge init failed")?;

    let pairs = init
        .nodes
        .iter()
        .map(NodeDescriptor::id)
        .filter(|id| *id != ACCESS_POINT)
        .map(|id| (ACCESS_POINT, id))
        .collect();
    let plan = RunPlan {
        start: SimTime::ZERO,
        end:   SimTime::from_millis(args.duration_ms),
        step:  args.step_ms.max(1) * MILLISECOND,
        pairs,
    };
    let mut stepper = BoxStepper::room(ROOM[0], ROOM[1], ROOM[2]);

    let started = Instant::now();
    match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir).with_context(|| format!("creating {}", dir.display()))?;
            let mut obs = BridgeOutputObserver::new(writer);
            bridge.run(&plan, &mut stepper, &mut obs)?;
            if let Some(e) = obs.take_error() {
                warn!(error = %e, "diagnostic output incomplete");
            } else {
                info!(dir = %dir.display(), "wrote diagnostics");
            }
        }
        None => {
            bridge.run(&plan, &mut stepper, &mut NoopObserver)?;
        }
    }
    let elapsed = started.elapsed();

    let last_tick = plan.ticks().last().unwrap_or(plan.start);
    for (tx, rx) in &plan.pairs {
        let reply = bridge.query_channel(*tx, *rx, last_tick)?;
        info!(
            tx = %tx,
            rx = %rx,
            wb_loss_db = reply.description.wb_loss_db,
            delay_ns = reply.description.delay_ns,
            window = %reply.window,
            "final link state"
        );
    }

    let stats = bridge.teardown();
    println!(
        "{} queries in {:.1?}: {} hits ({:.1} %), {} recomputations, {} evaluator calls, {} speculative hits",
        stats.queries,
        elapsed,
        stats.hits,
        stats.hit_rate() * 100.0,
        stats.recomputations,
        stats.evaluator_calls,
        stats.speculative_hits,
    );
    Ok(())
}
