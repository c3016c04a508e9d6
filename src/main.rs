/*!
 * listbench - Main Entry Point
 *
 * Runs one sharded sorted-list benchmark and prints a single summary line:
 *
 * ```text
 * listbench --threads 8 --iterations 1000 --lists 4 --sync m --yield id
 * list-id-m,8,1000,4,24000,<total ns>,<avg ns>,<wait ns>
 * ```
 *
 * On failure prints one diagnostic line to stderr and exits with a status
 * that tells configuration, thread, corruption, drain and fault failures apart.
 */

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use std::process;
use tracing::{debug, warn};

use listbench::{
    init_tracing, install_fault_trap, BenchConfig, BenchError, ExitStatus, Harness, SyncDiscipline,
    YieldPoints,
};

#[cfg(all(feature = "jemalloc", not(target_env = "msvc")))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

/// Sharded sorted-list stress test
#[derive(Parser, Debug)]
#[command(name = "listbench", version)]
#[command(about = "Stress a sharded sorted list under none / mutex / spinlock")]
struct Cli {
    /// Worker thread count
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Elements inserted, queried and deleted by each thread
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Number of sharded lists
    #[arg(long, default_value_t = 1)]
    lists: usize,

    /// Sync discipline: none, m (mutex) or s (spinlock)
    #[arg(long, default_value = "none")]
    sync: String,

    /// Yield points: any of i (insert), d (delete), l (lookup)
    #[arg(long = "yield", default_value = "none")]
    yields: String,

    /// Key generator seed
    #[arg(long)]
    seed: Option<u64>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,
}

impl Cli {
    fn into_config(self) -> Result<(BenchConfig, Format), BenchError> {
        let sync: SyncDiscipline = self.sync.parse()?;
        let yields = YieldPoints::parse(&self.yields)?;

        let mut config = BenchConfig::new(self.threads, self.iterations)
            .with_lists(self.lists)
            .with_sync(sync)
            .with_yields(yields);
        config.seed = self.seed;
        Ok((config, self.format))
    }
}

fn run(cli: Cli) -> Result<(), BenchError> {
    let (config, format) = cli.into_config()?;
    let summary = Harness::new(config)?.run()?;

    match format {
        Format::Csv => println!("{}", summary.csv_line()),
        Format::Json => match summary.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                warn!(error = %e, "JSON encoding failed, falling back to CSV");
                println!("{}", summary.csv_line());
            }
        },
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            eprintln!("{}", rendered.lines().next().unwrap_or("Invalid argument"));
            process::exit(ExitStatus::Config.code());
        }
    };

    init_tracing();

    if let Err(e) = install_fault_trap() {
        warn!(error = %e, "Could not install fault trap");
    }

    let status = match run(cli) {
        Ok(()) => ExitStatus::Success,
        Err(err) => {
            debug!(error = ?err, "run failed");
            eprintln!("{err}");
            err.exit_status()
        }
    };
    process::exit(status.code());
}
