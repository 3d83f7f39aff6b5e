use clap::{Parser, ValueEnum};
use mixem::logging::{init_logging, DEFAULT_LEVEL};
use mixem::{
    ConvergenceCriterion, DegeneracyPolicy, EmConfig, EmError, GaussianMixtureEm, SampleSet,
    TraceWriter,
};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CriterionArg {
    Signed,
    Absolute,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DegeneracyArg {
    Fail,
    Propagate,
}

/// Estimate the means of a three-component Gaussian mixture with EM.
///
/// Input: a sample count N followed by N real numbers, whitespace separated.
#[derive(Debug, Parser)]
#[command(name = "mixem", version)]
struct Cli {
    /// Read samples from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Convergence threshold on the change in means
    #[arg(long, default_value_t = 0.001)]
    epsilon: f64,

    /// Maximum number of EM rounds
    #[arg(long, default_value_t = 10_000, conflicts_with = "unbounded")]
    max_iter: usize,

    /// Iterate until convergence with no round cap
    #[arg(long)]
    unbounded: bool,

    /// How the change in means is measured
    #[arg(long, value_enum, default_value_t = CriterionArg::Signed)]
    criterion: CriterionArg,

    /// What to do when a responsibility or component total is zero
    #[arg(long, value_enum, default_value_t = DegeneracyArg::Fail)]
    on_degenerate: DegeneracyArg,

    /// Shared component variance
    #[arg(long, default_value_t = 1.0)]
    variance: f64,

    /// Shared mixing weight
    #[arg(long, default_value_t = 1.0 / 3.0)]
    mixing_weight: f64,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = DEFAULT_LEVEL)]
    log_level: String,
}

impl Cli {
    fn config(&self) -> EmConfig {
        let config = EmConfig::new()
            .epsilon(self.epsilon)
            .variance(self.variance)
            .mixing_weight(self.mixing_weight)
            .criterion(match self.criterion {
                CriterionArg::Signed => ConvergenceCriterion::Signed,
                CriterionArg::Absolute => ConvergenceCriterion::Absolute,
            })
            .degeneracy(match self.on_degenerate {
                DegeneracyArg::Fail => DegeneracyPolicy::Fail,
                DegeneracyArg::Propagate => DegeneracyPolicy::Propagate,
            });

        if self.unbounded {
            config.unbounded()
        } else {
            config.max_iter(self.max_iter)
        }
    }
}

fn load_samples(input: Option<&PathBuf>) -> Result<SampleSet, EmError> {
    match input {
        Some(path) => SampleSet::from_reader(BufReader::new(File::open(path)?)),
        None => SampleSet::from_reader(io::stdin().lock()),
    }
}

fn run(cli: &Cli) -> Result<(), EmError> {
    let samples = load_samples(cli.input.as_ref())?;
    info!(n_samples = samples.len(), "loaded samples");

    let em = GaussianMixtureEm::with_config(cli.config());
    let mut iterations = em.iterations(&samples);
    let mut writer = TraceWriter::new(BufWriter::new(io::stdout().lock()));

    for record in iterations.by_ref() {
        writer.write_record(&record?)?;
    }
    writer.flush()?;

    info!(termination = ?iterations.termination(), "done");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_build_default_config() {
        let cli = Cli::parse_from(["mixem"]);
        assert_eq!(cli.config(), EmConfig::default());
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::parse_from([
            "mixem",
            "--unbounded",
            "--criterion",
            "absolute",
            "--on-degenerate",
            "propagate",
            "--epsilon",
            "0.5",
        ]);
        let config = cli.config();
        assert_eq!(config.get_max_iter(), None);
        assert_eq!(config.get_criterion(), ConvergenceCriterion::Absolute);
        assert_eq!(config.get_degeneracy(), DegeneracyPolicy::Propagate);
        assert_eq!(config.get_epsilon(), 0.5);
    }
}
