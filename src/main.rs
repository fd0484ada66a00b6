use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use apriori::{cli::Cli, mine_file, output::save_patterns, MinerConfig};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not install logger: {}", e);
    }

    // nothing is mined or written until the arguments check out
    let (cli, config) = match Cli::parse_args(std::env::args_os()).and_then(|cli| {
        let config = cli.validate()?;
        Ok((cli, config))
    }) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let start = Instant::now();
    match run(&cli, &config) {
        Ok(num_patterns) => {
            println!("|FPs| = {}", num_patterns);
            println!("Total Runtime: {} seconds", start.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &MinerConfig) -> Result<usize> {
    let result = mine_file(&cli.input, config)
        .with_context(|| format!("mining {}", cli.input.display()))?;
    save_patterns(&cli.output, &result.patterns)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    Ok(result.len())
}
