// Main module declarations for the live CO2 savings counter

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod tracker_config;
}

// Model definitions
pub mod models {
    pub mod reduction_period;
    pub mod equivalent;
    pub mod time_offset;
}

// Core estimation, conversion and tick loop
pub mod core {
    pub mod estimator;
    pub mod converter;
    pub mod animation;
    pub mod live_counter;
}

// Display formatting and reporting
pub mod analysis {
    pub mod formatting;
    pub mod reporting;
    pub mod snapshot;
}

// Social sharing
pub mod share {
    pub mod share_actions;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
    pub mod traits;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used types
pub use crate::core::estimator::SavingsEstimator;
pub use crate::core::converter::EquivalenceConverter;
pub use crate::core::live_counter::LiveCounter;
pub use crate::config::tracker_config::TrackerConfig;
