use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::solver_factory::{create_solver, SolverType};
use crate::error::{Result, SlideshowError};
use crate::slideshow::order::{OrderStrategy, SlideOrderer, DEFAULT_MAX_ROUNDS};

const DEFAULT_OUTPUT: &str = "slideshow.sol";
const DEFAULT_TIME_LIMIT_SECS: u64 = 60;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output: PathBuf,
    pub strategy: OrderStrategy,
    pub solver: SolverType,
    /// `None` when `SLIDESHOW_TIME_LIMIT_SECS` is 0
    pub time_limit: Option<Duration>,
    pub max_rounds: usize,
    pub model_dump: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: PathBuf::from(DEFAULT_OUTPUT),
            strategy: OrderStrategy::Exact,
            solver: SolverType::Glpk,
            time_limit: Some(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS)),
            max_rounds: DEFAULT_MAX_ROUNDS,
            model_dump: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let output = env::var("SLIDESHOW_OUTPUT")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output);

        let strategy = match env::var("SLIDESHOW_STRATEGY") {
            Ok(s) => OrderStrategy::from_str(&s)
                .ok_or_else(|| SlideshowError::Config(format!("unknown strategy '{}'", s)))?,
            Err(_) => defaults.strategy,
        };

        let solver = match env::var("SLIDESHOW_SOLVER") {
            Ok(s) => SolverType::from_str(&s)
                .ok_or_else(|| SlideshowError::Config(format!("unknown or disabled solver '{}'", s)))?,
            Err(_) => defaults.solver,
        };

        let time_limit = env::var("SLIDESHOW_TIME_LIMIT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(|secs| (secs > 0).then(|| Duration::from_secs(secs)))
            .unwrap_or(defaults.time_limit);

        let max_rounds = env::var("SLIDESHOW_MAX_ROUNDS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(defaults.max_rounds);

        let model_dump = env::var("SLIDESHOW_MODEL_DUMP")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            output,
            strategy,
            solver,
            time_limit,
            max_rounds,
            model_dump,
        })
    }

    pub fn orderer(&self) -> SlideOrderer {
        SlideOrderer::new(create_solver(self.solver))
            .with_strategy(self.strategy)
            .with_time_limit(self.time_limit)
            .with_max_rounds(self.max_rounds)
            .with_model_dump(self.model_dump.clone())
    }
}
