use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use crate::analysis::formatting::{format_number, format_tons};
use crate::config::const_funcs::Timestamp;
use crate::config::tracker_config::TrackerConfig;
use crate::core::animation::CounterTransition;
use crate::models::equivalent::{EquivalentDefinition, EquivalentKind, EquivalentValue};
use crate::models::time_offset::Timeframe;
use crate::utils::logging::{self, OperationCategory};

pub type Equivalents = BTreeMap<EquivalentKind, EquivalentValue>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedBreakdown {
    pub total_tons: String,
    pub selected_kind: EquivalentKind,
    pub selected: EquivalentValue,
    pub all: Vec<(EquivalentKind, EquivalentValue)>,
}

/// Converts tons of CO2 into relatable equivalents and tracks which one is
/// highlighted and what each counter last displayed.
#[derive(Debug, Clone)]
pub struct EquivalenceConverter {
    definitions: Vec<EquivalentDefinition>,
    selected: EquivalentKind,
    last_displayed: BTreeMap<EquivalentKind, i64>,
    transitions: BTreeMap<EquivalentKind, CounterTransition>,
    animation_duration_ms: u64,
    event_label: String,
}

impl EquivalenceConverter {
    pub fn new(animation_duration_ms: u64, event_label: &str) -> Self {
        let definitions: Vec<EquivalentDefinition> = EquivalentKind::ALL
            .iter()
            .map(|kind| kind.definition())
            .collect();
        let last_displayed = definitions.iter().map(|def| (def.kind, 0)).collect();

        Self {
            definitions,
            selected: EquivalentKind::Cars,
            last_displayed,
            transitions: BTreeMap::new(),
            animation_duration_ms,
            event_label: event_label.to_string(),
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.animation_duration_ms, &config.event_label)
    }

    pub fn compute_equivalents(&self, tons_co2: f64) -> Equivalents {
        let _timing = logging::start_timing("compute_equivalents", OperationCategory::Conversion);

        self.definitions
            .iter()
            .map(|def| {
                let value = (tons_co2 * def.conversion_factor).round() as i64;
                (def.kind, EquivalentValue {
                    value,
                    formatted: format_number(value),
                    unit: def.unit_label,
                    icon: def.icon,
                    color: def.color,
                })
            })
            .collect()
    }

    /// Highlights the equivalent named `key`; unknown keys leave the selection unchanged.
    pub fn select(&mut self, key: &str) {
        match key.parse::<EquivalentKind>() {
            Ok(kind) => self.selected = kind,
            Err(e) => debug!("Ignoring selection: {}", e),
        }
    }

    pub fn selected(&self) -> EquivalentKind {
        self.selected
    }

    /// Projects a per-second rate onto a longer timeframe before converting.
    pub fn time_scaled_equivalents(&self, tons_co2_per_second: f64, timeframe: Timeframe) -> Equivalents {
        self.compute_equivalents(tons_co2_per_second * timeframe.multiplier())
    }

    pub fn detailed_breakdown(&self, tons_co2: f64) -> DetailedBreakdown {
        let equivalents = self.compute_equivalents(tons_co2);
        let selected = equivalents
            .get(&self.selected)
            .cloned()
            .unwrap_or_else(|| self.placeholder_value(self.selected));

        DetailedBreakdown {
            total_tons: format_tons(tons_co2),
            selected_kind: self.selected,
            selected,
            all: equivalents.into_iter().collect(),
        }
    }

    fn placeholder_value(&self, kind: EquivalentKind) -> EquivalentValue {
        let def = kind.definition();
        EquivalentValue {
            value: 0,
            formatted: format_number(0),
            unit: def.unit_label,
            icon: def.icon,
            color: def.color,
        }
    }

    pub fn share_text(&self, tons_co2: f64) -> String {
        let breakdown = self.detailed_breakdown(tons_co2);
        format!(
            "{} tons of CO₂ saved = {} {} because of {}!",
            breakdown.total_tons, breakdown.selected.formatted, breakdown.selected.unit, self.event_label
        )
    }

    pub fn last_displayed(&self, kind: EquivalentKind) -> i64 {
        self.last_displayed.get(&kind).copied().unwrap_or(0)
    }

    /// Starts a transition for every equivalent from its last displayed value
    /// to the value for `tons_co2`. Returns the freshly computed equivalents.
    pub fn begin_transitions(&mut self, tons_co2: f64, now: Timestamp) -> Equivalents {
        let equivalents = self.compute_equivalents(tons_co2);
        for (kind, value) in &equivalents {
            if let Some(previous) = self.transitions.get(kind) {
                if previous.is_complete(&now) {
                    self.last_displayed.insert(*kind, previous.to);
                }
            }
            let from = self.last_displayed(*kind);
            self.transitions.insert(
                *kind,
                CounterTransition::new(from, value.value, now, self.animation_duration_ms),
            );
        }
        equivalents
    }

    /// Advances in-flight transitions to `now`, returning the text each counter
    /// should show. Completed transitions commit their target as the last displayed value.
    pub fn advance_frame(&mut self, now: &Timestamp) -> Vec<(EquivalentKind, String)> {
        let mut frame = Vec::with_capacity(self.transitions.len());
        let mut completed = Vec::new();

        for (kind, transition) in &self.transitions {
            frame.push((*kind, transition.display_at(now)));
            if transition.is_complete(now) {
                completed.push((*kind, transition.to));
            }
        }

        for (kind, target) in completed {
            self.last_displayed.insert(kind, target);
            self.transitions.remove(&kind);
        }

        frame
    }

    pub fn has_active_transitions(&self) -> bool {
        !self.transitions.is_empty()
    }
}
