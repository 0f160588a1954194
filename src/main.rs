use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;

use slideshow_ilp::config::Config;

#[derive(Parser)]
#[command(name = "slideshow")]
#[command(about = "Builds a slideshow from a photo catalog", long_about = None)]
struct Cli {
    /// Photo catalog to read
    input: PathBuf,
}

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = Config::from_env().and_then(|config| {
        let count = slideshow_ilp::run(&cli.input, &config)?;
        Ok((count, config.output))
    });

    match result {
        Ok((count, output)) => {
            println!("Slideshow generated: {} slides written to {}", count, output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
