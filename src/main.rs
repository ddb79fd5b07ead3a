use clap::{Parser, ValueEnum};
use evolver::constants::{
    FIXED_TIMESTEP, INITIAL_CREATURE_COUNT, MAX_CREATURES, REPORT_INTERVAL_TICKS,
};
use evolver::{CapPolicy, Population, SimulationConfig, TickReport};
use log::info;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CapPolicyArg {
    RejectNew,
    EvictOldest,
}

impl From<CapPolicyArg> for CapPolicy {
    fn from(arg: CapPolicyArg) -> Self {
        match arg {
            CapPolicyArg::RejectNew => CapPolicy::RejectNew,
            CapPolicyArg::EvictOldest => CapPolicy::EvictOldest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "evolver")]
#[command(about = "Run the Evolver creature population without a window")]
struct Args {
    /// Creatures seeded at start
    #[arg(short, long, default_value_t = INITIAL_CREATURE_COUNT)]
    creatures: usize,

    /// Ticks to run; 0 runs until the population dies out
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Population cap
    #[arg(long, default_value_t = MAX_CREATURES)]
    max_creatures: usize,

    /// What happens to newcomers at the cap
    #[arg(long, value_enum, default_value_t = CapPolicyArg::RejectNew)]
    cap_policy: CapPolicyArg,

    /// Ticks between status lines
    #[arg(long, default_value_t = REPORT_INTERVAL_TICKS)]
    report_every: u64,

    /// Pace ticks at the fixed timestep instead of running flat out
    #[arg(long)]
    realtime: bool,
}

#[derive(Default)]
struct Totals {
    births: usize,
    deaths: usize,
    rejected: usize,
    evicted: usize,
}

impl Totals {
    fn add(&mut self, report: &TickReport) {
        self.births += report.spawned;
        self.deaths += report.removed;
        self.rejected += report.rejected;
        self.evicted += report.evicted;
    }
}

fn report_status(population: &Population) {
    let diets = population.diet_counts();
    let behaviors = population.behavior_counts();
    info!(
        "Tick {} - {} creatures (H: {}, C: {}, S: {}) - walking: {}, dying: {}",
        population.tick_count(),
        population.len(),
        diets.herbivore,
        diets.carnivorous,
        diets.sun,
        behaviors.walking,
        behaviors.dying,
    );
}

fn finished(population: &Population, ticks: u64) -> bool {
    population.is_empty() || (ticks > 0 && population.tick_count() >= ticks)
}

// --- Main Function ---
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = SimulationConfig::new()
        .with_initial_count(args.creatures)
        .with_max_creatures(args.max_creatures, args.cap_policy.into());
    let mut population = Population::from_entropy(config)?;
    let seeded = population.seed(args.creatures)?;
    info!("Seeded {} creatures", seeded);

    let report_every = args.report_every.max(1);
    let mut totals = Totals::default();
    let started = Instant::now();

    if args.realtime {
        let mut last_update_time = Instant::now();
        let mut time_accumulator = 0.0;
        while !finished(&population, args.ticks) {
            let now = Instant::now();
            time_accumulator += now.duration_since(last_update_time).as_secs_f64();
            last_update_time = now;
            while time_accumulator >= FIXED_TIMESTEP && !finished(&population, args.ticks) {
                totals.add(&population.tick()?);
                if population.tick_count() % report_every == 0 {
                    report_status(&population);
                }
                time_accumulator -= FIXED_TIMESTEP;
            }
            std::thread::sleep(Duration::from_secs_f64(FIXED_TIMESTEP / 4.0));
        }
    } else {
        while !finished(&population, args.ticks) {
            totals.add(&population.tick()?);
            if population.tick_count() % report_every == 0 {
                report_status(&population);
            }
        }
    }

    report_status(&population);
    println!(
        "Ran {} ticks in {:.2?}: {} births, {} deaths, {} rejected, {} evicted, {} alive{}",
        population.tick_count(),
        started.elapsed(),
        totals.births,
        totals.deaths,
        totals.rejected,
        totals.evicted,
        population.len(),
        if population.is_empty() { " [EXTINCT]" } else { "" }
    );
    Ok(())
}
