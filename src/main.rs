use clap::Parser;
use colored::Colorize;

use houseboosts::{HousingData, Pipeline, PipelineConfig};

use std::path::PathBuf;
use std::process;


/// Predict house prices with a blended ridge/lasso/elastic-net/GBM ensemble.
#[derive(Parser, Debug)]
#[command(name = "houseboosts", version, about)]
struct Cli {
    /// Training CSV file (with the target column).
    #[arg(long)]
    train: PathBuf,

    /// Test CSV file.
    #[arg(long)]
    test: PathBuf,

    /// Write the predicted prices to this CSV file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration overriding the defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print only the final report.
    #[arg(short, long)]
    quiet: bool,

    /// Fit the ensemble members in parallel.
    #[arg(long)]
    parallel: bool,
}


/// The configuration file (or the defaults) with the command-line overrides.
fn resolve_config(cli: &Cli) -> houseboosts::Result<PipelineConfig> {
    let config = match cli.config.as_ref() {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    let (verbose, parallel) = (config.verbose, config.parallel);
    Ok(config.verbose(verbose && !cli.quiet).parallel(parallel || cli.parallel))
}


fn run(cli: Cli) -> houseboosts::Result<()> {
    let config = resolve_config(&cli)?;

    let data = HousingData::load(&cli.train, &cli.test, &config)?;
    let report = Pipeline::new(config).run(data)?;

    println!("\n{report}");
    if let Some(path) = cli.output.as_ref() {
        report.submission.to_csv(path)?;
        println!(
            "{} {} predictions to {}",
            "Wrote".green().bold(),
            report.submission.len(),
            path.display(),
        );
    }
    Ok(())
}


fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {e}", "error:".red().bold());
        process::exit(1);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "houseboosts", "--train", "a.csv", "--test", "b.csv",
            "--quiet", "--parallel",
        ]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert!(!config.verbose);
        assert!(config.parallel);

        let cli = Cli::try_parse_from([
            "houseboosts", "--train", "a.csv", "--test", "b.csv",
        ]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert!(config.verbose);
        assert!(!config.parallel);
        assert!(cli.output.is_none());
    }


    #[test]
    fn test_train_and_test_are_required() {
        let result = Cli::try_parse_from(["houseboosts", "--train", "a.csv"]);
        assert!(result.is_err());
    }
}
