use std::fmt::Write;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use super::formatting::{format_tons, format_timestamp};
use super::snapshot::DashboardSnapshot;
use crate::config::const_funcs::Timestamp;
use crate::core::estimator::SavingsEstimator;
use crate::models::equivalent::EquivalentKind;
use crate::utils::logging::{self, OperationCategory};
use crate::utils::traits::DisplaySink;

pub fn format_dashboard(snapshot: &DashboardSnapshot) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_dashboard(&mut out, snapshot);
    out
}

fn write_dashboard(out: &mut String, s: &DashboardSnapshot) -> std::fmt::Result {
    writeln!(out, "\nCO₂ Saved Because of the Government Shutdown")?;
    writeln!(out, "----------------------------------------")?;
    writeln!(out, "Total Saved: {} tons CO₂", s.savings_total)?;
    writeln!(out, "Rate: {} tons CO₂/second", s.rate_per_second)?;
    writeln!(out, "Airports Affected: {}", s.affected_airports)?;
    writeln!(out, "Flight Cancellations: {}", s.cancellations)?;
    writeln!(out, "{}", s.elapsed_time)?;

    writeln!(out, "Current Estimation:")?;
    writeln!(out, "  Current Time: {}", s.estimation.current_time)?;
    writeln!(out, "  Current Reduction: {}", s.estimation.current_reduction)?;
    writeln!(out, "  Hourly Savings: {}", s.estimation.hourly_savings)?;
    writeln!(out, "  Rate per Second: {}", s.estimation.rate_per_second)?;
    writeln!(out, "  Time Elapsed: {}", s.estimation.time_elapsed)?;
    writeln!(out, "  Total Saved: {}", s.estimation.total_saved)?;

    writeln!(out, "Formula:")?;
    for line in &s.formula_lines {
        writeln!(out, "  {}", line)?;
    }
    writeln!(out, "Estimation Steps:")?;
    for (i, step) in s.estimation_steps.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, step)?;
    }

    writeln!(out, "Equivalents:")?;
    for (kind, value) in &s.equivalents {
        let marker = if *kind == s.selected_equivalent { '*' } else { ' ' };
        writeln!(out, " {} {} {} {}", marker, value.icon, value.formatted, value.unit)?;
    }
    writeln!(out, "  {}", s.time_scaled.text)?;

    writeln!(out, "Progressive Estimation Breakdown ({}):", s.future.offset)?;
    for period in &s.future.breakdown {
        writeln!(out, "  {} ({}): {} tons", period.description, period.duration, format_tons(period.savings))?;
    }
    writeln!(out, "  Total Estimated Savings: {} tons CO₂", s.future.total_saved)?;
    writeln!(out, "  Time Since Start: {}", s.future.elapsed)?;
    writeln!(out, "  Estimated by {}", s.future.estimated_by)?;
    writeln!(out, "Share: {}", s.share_text)?;
    writeln!(out, "----------------------------------------")
}

pub fn format_schedule(estimator: &SavingsEstimator, now: &Timestamp) -> String {
    let mut out = String::from("\nReduction Schedule:\n----------------------------------------\n");
    let periods = estimator.schedule().periods();
    let last_index = periods.len() - 1;
    for (index, period) in periods.iter().enumerate() {
        let active = period.contains(now) || (index == last_index && *now >= period.start);
        let end = match period.end {
            Some(end) if index != last_index => format_timestamp(&end),
            _ => "onwards".to_string(),
        };
        out.push_str(&format!(
            "{} {} -> {}: {} ({})\n",
            if active { '>' } else { ' ' },
            format_timestamp(&period.start),
            end,
            period.description,
            period.phase,
        ));
    }
    out
}

/// Terminal rendering of the live counter: a spinner line for the ticking
/// values and a full report block on the first tick.
pub struct TerminalDisplay {
    bar: ProgressBar,
    headline: String,
    reported: bool,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar, headline: String::new(), reported: false }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalDisplay {
    fn render_snapshot(&mut self, snapshot: &DashboardSnapshot) {
        let _timing = logging::start_timing("render_snapshot", OperationCategory::Rendering);

        if !self.reported {
            self.bar.println(format_dashboard(snapshot));
            self.reported = true;
        }
        self.headline = format!(
            "{} tons CO₂ saved | {} t/s | {}",
            snapshot.savings_total, snapshot.rate_per_second, snapshot.elapsed_time
        );
        self.bar.set_message(self.headline.clone());
    }

    fn render_frame(&mut self, frame: &[(EquivalentKind, String)]) {
        let line: Vec<String> = frame.iter().map(|(kind, text)| format!("{} {}", kind, text)).collect();
        self.bar.set_message(format!("{} | {}", self.headline, line.join(" ")));
    }

    fn show_notice(&mut self, notice: &str) {
        self.bar.println(notice);
    }

    fn finish(&mut self) {
        self.bar.finish_with_message(self.headline.clone());
    }
}
