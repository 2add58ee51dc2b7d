//! Configuration for the crosslink application.
//!
//! Parses command-line arguments into a resolved [`Config`].
//!
//! The tool works with zero arguments: it reads `inlet.in` and writes
//! `outlet.out` in the current directory.

use std::path::PathBuf;

use clap::Parser;

/// Default input path
pub const DEFAULT_INPUT: &str = "inlet.in";

/// Default output path
pub const DEFAULT_OUTPUT: &str = "outlet.out";

#[derive(Debug, Parser)]
#[command(
    name = "crosslink",
    version,
    about = "Load a cross-linked record list, encode it to binary, and reload it"
)]
pub struct Cli {
    /// Input record file, one `payload;index` per line
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output binary file
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Wrap the output in a versioned, checksummed frame
    #[arg(long)]
    pub framed: bool,

    /// Generate COUNT sample records into the input file before loading
    #[arg(long, value_name = "COUNT")]
    pub sample: Option<usize>,

    /// Seed for sample generation (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print the run summary
    #[arg(long)]
    pub no_metrics: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Complete configuration for a run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input record file
    pub input_file: PathBuf,

    /// Output binary file
    pub output_file: PathBuf,

    // === Encoding ===
    /// Whether the output is framed
    pub framed: bool,

    // === Sample generation ===
    /// Records to generate into `input_file` (None = use existing file)
    pub sample_records: Option<usize>,

    /// Seed for sample generation
    pub seed: u64,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print the metrics summary
    pub print_metrics: bool,

    /// Debug logging
    pub verbose: bool,
}

impl Config {
    /// Resolve defaults from parsed arguments.
    ///
    /// Without `--seed`, the seed is derived from the current time and
    /// printed with the config so a sample run can be reproduced.
    pub fn from_cli(cli: Cli) -> Self {
        let seed = cli.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Config {
            input_file: cli.input,
            output_file: cli.output,
            framed: cli.framed,
            sample_records: cli.sample,
            seed,
            print_config: cli.print_config,
            print_metrics: !cli.no_metrics,
            verbose: cli.verbose,
        }
    }

    /// Parse configuration from an argument list (program name first).
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from_cli)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Input file:  {}", self.input_file.display());
        println!("Output file: {}", self.output_file.display());
        println!("Framed:      {}", self.framed);
        match self.sample_records {
            Some(count) => println!("Sample:      {} records (seed {})", count, self.seed),
            None => println!("Sample:      (use input file)"),
        }
        println!();
    }
}
