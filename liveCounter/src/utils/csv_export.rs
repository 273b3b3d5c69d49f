use std::error::Error;
use std::path::{Path, PathBuf};
use serde::Serialize;
use tracing::info;

use crate::analysis::formatting::format_decimal;
use crate::config::const_funcs::Timestamp;
use crate::core::converter::Equivalents;
use crate::core::estimator::PeriodSavings;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Serialize)]
struct PeriodRow<'a> {
    #[serde(rename = "Period")]
    description: &'a str,
    #[serde(rename = "Hours")]
    hours: String,
    #[serde(rename = "Duration")]
    duration: &'a str,
    #[serde(rename = "Savings (tons CO2)")]
    savings: String,
}

#[derive(Debug, Serialize)]
struct EquivalentRow<'a> {
    #[serde(rename = "Equivalent")]
    key: &'a str,
    #[serde(rename = "Value")]
    value: i64,
    #[serde(rename = "Formatted")]
    formatted: &'a str,
    #[serde(rename = "Unit")]
    unit: &'a str,
}

/// Timestamped export file name, e.g. `period_breakdown_20251120_120000.csv`.
fn export_path(output_dir: &Path, stem: &str, generated_at: &Timestamp) -> PathBuf {
    output_dir.join(format!("{}_{}.csv", stem, generated_at.format("%Y%m%d_%H%M%S")))
}

/// Writes one row per reduction period the breakdown covers.
pub fn export_period_breakdown(
    output_dir: impl AsRef<Path>,
    breakdown: &[PeriodSavings],
    generated_at: &Timestamp,
) -> Result<PathBuf, Box<dyn Error>> {
    let _timing = logging::start_timing("export_period_breakdown",
        OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

    std::fs::create_dir_all(output_dir.as_ref())?;
    let path = export_path(output_dir.as_ref(), "period_breakdown", generated_at);
    let mut writer = csv::Writer::from_path(&path)?;

    for period in breakdown {
        writer.serialize(PeriodRow {
            description: &period.description,
            hours: format_decimal(period.hours, 2),
            duration: &period.duration,
            savings: format_decimal(period.savings, 2),
        })?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = breakdown.len(), "exported period breakdown");
    Ok(path)
}

pub fn export_equivalents(
    output_dir: impl AsRef<Path>,
    equivalents: &Equivalents,
    generated_at: &Timestamp,
) -> Result<PathBuf, Box<dyn Error>> {
    let _timing = logging::start_timing("export_equivalents",
        OperationCategory::FileIO { subcategory: FileIOType::CsvExport });

    std::fs::create_dir_all(output_dir.as_ref())?;
    let path = export_path(output_dir.as_ref(), "equivalents", generated_at);
    let mut writer = csv::Writer::from_path(&path)?;

    for (kind, value) in equivalents {
        writer.serialize(EquivalentRow {
            key: kind.key(),
            value: value.value,
            formatted: &value.formatted,
            unit: value.unit,
        })?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = equivalents.len(), "exported equivalents");
    Ok(path)
}
