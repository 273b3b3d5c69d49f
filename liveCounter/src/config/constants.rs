// Time Constants
pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;
pub const HOURS_PER_DAY: f64 = 24.0;
pub const REFERENCE_UTC_OFFSET_SECONDS: i32 = -5 * 3600; // Eastern Standard Time

// Counter start: 6am ET Friday, November 7, 2025
pub const COUNTER_START_TIME: &str = "2025-11-07T06:00:00-05:00";

// Reduction schedule boundaries (midnight ET)
pub const SCHEDULE_NOV_7: &str = "2025-11-07T00:00:00-05:00";
pub const SCHEDULE_NOV_11: &str = "2025-11-11T00:00:00-05:00";
pub const SCHEDULE_NOV_13: &str = "2025-11-13T00:00:00-05:00";
pub const SCHEDULE_NOV_14: &str = "2025-11-14T00:00:00-05:00";

// Reduction fractions per phase
pub const INITIAL_REDUCTION: f64 = 0.04;     // Nov 7-10
pub const MODERATE_REDUCTION: f64 = 0.06;    // Nov 11-12
pub const HIGH_REDUCTION: f64 = 0.08;        // Nov 13
pub const MAXIMUM_REDUCTION: f64 = 0.10;     // Nov 14 onwards
pub const MAX_REDUCTION_FRACTION: f64 = 0.10; // FAA scaling cap

// Phase labels
pub const PHASE_BEFORE_REDUCTIONS: &str = "Before reductions";
pub const PHASE_INITIAL: &str = "Initial phase";
pub const PHASE_MODERATE: &str = "Moderate reduction";
pub const PHASE_HIGH: &str = "High reduction";
pub const PHASE_MAXIMUM: &str = "Maximum reduction";

// Emissions Constants
pub const HOURLY_BASELINE_EMISSIONS: f64 = 28_542.0; // tons CO2 per hour (US domestic flights)
pub const AFFECTED_AIRPORTS: u32 = 40;
pub const INITIAL_CANCELLATIONS: u32 = 815;
pub const CANCELLATIONS_PER_HOUR: f64 = 50.0;

// Equivalence factors (units per ton CO2, EPA approximations)
pub const CARS_PER_TON: f64 = 0.00022;       // cars not driven for one year
pub const SOLAR_HOMES_PER_TON: f64 = 0.11;   // homes powered by solar for one month
pub const TREES_PER_TON: f64 = 16.5;         // trees that don't need to be planted
pub const SMARTPHONES_PER_TON: f64 = 1230.0; // smartphones charged for one year
pub const LED_HOMES_PER_TON: f64 = 1.8;      // homes switching all bulbs to LED
pub const ENERGY_HOMES_PER_TON: f64 = 0.00012; // homes' annual electricity use

// Timeframe multipliers (seconds per unit)
pub const SECONDS_PER_SECOND: f64 = 1.0;
pub const SECONDS_PER_TIMEFRAME_MINUTE: f64 = 60.0;
pub const SECONDS_PER_TIMEFRAME_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_WEEK: f64 = 604_800.0;
pub const SECONDS_PER_MONTH: f64 = 2_628_000.0;
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

// Number formatting thresholds
pub const MILLION: f64 = 1_000_000.0;
pub const THOUSAND: f64 = 1_000.0;

// Scheduling Constants (milliseconds)
pub const TICK_INTERVAL_MS: u64 = 1000;
pub const FRAME_INTERVAL_MS: u64 = 16;
pub const ANIMATION_DURATION_MS: u64 = 1000;

// Sharing
pub const DEFAULT_PAGE_URL: &str = "https://co2saved.org/";
pub const DEFAULT_EVENT_LABEL: &str = "the government shutdown";
pub const SHARE_TITLE: &str = "CO2 Saved Because of the Government Shutdown";
pub const SHARE_HEADLINE_SUFFIX: &str = "TONS OF CO₂ SAVED BECAUSE OF THE GOVERNMENT SHUTDOWN";
pub const TWITTER_INTENT_URL: &str = "https://twitter.com/intent/tweet";
pub const FACEBOOK_SHARER_URL: &str = "https://www.facebook.com/sharer/sharer.php";
pub const NOTICE_COPIED: &str = "Copied to clipboard!";
pub const NOTICE_LINK_COPIED: &str = "Link Copied!";
pub const NOTICE_COPY_FAILED: &str = "Could not copy to clipboard";
