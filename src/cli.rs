//! Command-line flags for the console binary
//!
//! Flags override the environment (see [`GameConfig::from_env`]):
//!
//! ```text
//! candy-crush [--size N] [--seed S] [--deal random|no-crushes] [--event-log PATH]
//! ```

use anyhow::{anyhow, Result};

use crate::core::DealPolicy;
use crate::engine::GameConfig;
use crate::types::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

pub const USAGE: &str =
    "usage: candy-crush [--size N] [--seed S] [--deal random|no-crushes] [--event-log PATH]";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub size: Option<usize>,
    pub seed: Option<u32>,
    pub deal: Option<DealPolicy>,
    pub event_log: Option<String>,
    pub help: bool,
}

impl CliArgs {
    /// Overlay the flags onto `config`
    pub fn apply(&self, mut config: GameConfig) -> GameConfig {
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(deal) = self.deal {
            config.deal_policy = deal;
        }
        if let Some(path) = &self.event_log {
            config.event_log = Some(path.clone());
        }
        config
    }
}

/// Parse flags (without the program name)
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--size" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --size"))?;
                let size = v
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid --size value: {}", v))?;
                if size < MIN_BOARD_SIZE || size > MAX_BOARD_SIZE {
                    return Err(anyhow!(
                        "--size must be between {} and {}, got {}",
                        MIN_BOARD_SIZE,
                        MAX_BOARD_SIZE,
                        size
                    ));
                }
                out.size = Some(size);
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                out.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--deal" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --deal"))?;
                out.deal =
                    Some(DealPolicy::from_str(v).ok_or_else(|| anyhow!("invalid --deal value: {}", v))?);
            }
            "--event-log" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --event-log"))?;
                out.event_log = Some(v.clone());
            }
            "-h" | "--help" => {
                out.help = true;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(out)
}
