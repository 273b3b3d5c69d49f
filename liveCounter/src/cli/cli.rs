use clap::Parser;

#[derive(Parser)]
#[command(author, version, about = "Live counter of CO₂ saved by reduced domestic flights", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long, default_value_t = 0, help = "Number of ticks to run (0 runs until interrupted)")]
    ticks: u64,

    #[arg(long, help = "Start the clock at this RFC 3339 instant instead of the wall clock")]
    at: Option<String>,

    #[arg(short, long, help = "Projection offset: now, 1week, 2weeks, 1month, 2months, 3months, 6months, 1year")]
    offset: Option<String>,

    #[arg(short, long, default_value = "cars", help = "Highlighted equivalent: cars, homes, trees, smartphones, led, energy")]
    equivalent: String,

    #[arg(short, long, default_value = "hour", help = "Timeframe for the rate-based equivalent line")]
    timeframe: String,

    #[arg(short, long, help = "JSON file with configuration overrides")]
    config: Option<String>,

    #[arg(long, help = "Export the period breakdown and equivalents as CSV into this directory")]
    csv_dir: Option<String>,

    #[arg(long, default_value_t = false, help = "Print one snapshot as JSON and exit")]
    json: bool,

    #[arg(long, help = "Share the current total: generic, twitter, facebook, copy-link")]
    share: Option<String>,

    #[arg(long, help = "Page URL used in share links")]
    page_url: Option<String>,

    #[arg(long, default_value_t = false)]
    no_animation: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    /// `None` when the counter should run until interrupted.
    pub fn ticks(&self) -> Option<u64> {
        if self.ticks == 0 { None } else { Some(self.ticks) }
    }

    pub fn at(&self) -> Option<&str> {
        self.at.as_deref()
    }

    pub fn offset(&self) -> Option<&str> {
        self.offset.as_deref()
    }

    pub fn equivalent(&self) -> &str {
        &self.equivalent
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn csv_dir(&self) -> Option<&str> {
        self.csv_dir.as_deref()
    }

    pub fn json(&self) -> bool {
        self.json
    }

    pub fn share(&self) -> Option<&str> {
        self.share.as_deref()
    }

    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }

    pub fn no_animation(&self) -> bool {
        self.no_animation
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}
