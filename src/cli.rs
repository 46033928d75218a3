// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::core::PointerPosition;
use crate::time_of_day::{classify_hour, TimeCategory};

#[derive(Parser, Debug, Clone)]
#[command(name = "seascape")]
#[command(about = "Animated seascape with a pointer-following cat", long_about = None)]
pub struct Cli {
    /// Disable UI elements and console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Run the animation without a window
    #[arg(long)]
    pub headless: bool,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 600)]
    pub ticks: usize,

    /// Hour of day (0-23) used instead of the wall clock
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24))]
    pub hour: Option<u32>,

    /// Force a palette, overriding --hour
    #[arg(long = "time-of-day", value_enum)]
    pub time_of_day: Option<TimeCategory>,

    /// Fixed pointer for headless runs, as "x,y" in [-1, 1]
    #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
    pub pointer: Option<PointerPosition>,

    /// Seed for wave and cloud randomisation
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON animation tuning file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--time-of-day`, then `--hour`, then the local clock
    pub fn time_category(&self) -> TimeCategory {
        match (self.time_of_day, self.hour) {
            (Some(category), _) => category,
            (None, Some(hour)) => classify_hour(hour),
            (None, None) => TimeCategory::now(),
        }
    }
}

/// Parse "x,y" into a pointer position
pub fn parse_pointer(s: &str) -> Result<PointerPosition, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {:?}", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| format!("invalid coordinate {:?}: {}", v, e))
    };
    Ok(PointerPosition::new(parse(x)?, parse(y)?))
}
