//! Damage multiplier classification and the fixed color tables behind the
//! resistance chips of the detail view.

use ordered_float::OrderedFloat;
use phf::phf_map;
use schema::{CatalogRecord, Resistance, Severity};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

/// Color used for anything the tables do not know about.
pub const NEUTRAL_COLOR: &str = "#d3d3d3";

const BLACK: &str = "#000000";
const WHITE: &str = "#FFFFFF";

/// Chip colors for one of the canonical type labels.
static TYPE_COLORS: phf::Map<&'static str, &'static str> = phf_map! {
    "Feu" => "#EE8130",
    "Eau" => "#6390F0",
    "Plante" => "#7AC74C",
    "Électrik" => "#F7D02C",
    "Glace" => "#96D9D6",
    "Combat" => "#C22E28",
    "Poison" => "#A33EA1",
    "Sol" => "#E2BF65",
    "Vol" => "#A98FF3",
    "Psy" => "#F95587",
    "Insecte" => "#A6B91A",
    "Roche" => "#B6A136",
    "Spectre" => "#735797",
    "Dragon" => "#6F35FC",
    "Ténèbres" => "#705746",
    "Acier" => "#B7B7CE",
    "Fée" => "#D685AD",
    "Normal" => "#A8A77A",
};

/// Result of classifying a multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub background: &'static str,
    pub text: &'static str,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        self.severity.label()
    }
}

/// One row of the fixed legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendRow {
    pub multiplier: f64,
    pub severity: Severity,
    pub background: &'static str,
}

/// Built once from the severity table, never per render.
static LEGEND: LazyLock<Vec<LegendRow>> = LazyLock::new(|| {
    Severity::iter()
        .map(|severity| LegendRow {
            multiplier: severity.multiplier(),
            severity,
            background: colors_for(severity).0,
        })
        .collect()
});

fn colors_for(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Immunity => (BLACK, WHITE),
        Severity::DoubleResistance => ("#009400", BLACK),
        Severity::Resistance => ("#90EE90", BLACK),
        Severity::Neutral => (NEUTRAL_COLOR, BLACK),
        Severity::Weakness => ("#FF6347", BLACK),
        Severity::DoubleWeakness => ("#9B0000", BLACK),
    }
}

/// Maps a multiplier to its severity bucket.
///
/// Matching is exact equality against 0, 0.25, 0.5, 2 and 4. Every other
/// value, including 1 and NaN, is Neutral.
pub fn severity_of(multiplier: f64) -> Severity {
    Severity::iter()
        .filter(|s| *s != Severity::Neutral)
        .find(|s| s.multiplier() == multiplier)
        .unwrap_or(Severity::Neutral)
}

pub fn classify(multiplier: f64) -> Classification {
    let severity = severity_of(multiplier);
    let (background, text) = colors_for(severity);
    Classification {
        severity,
        background,
        text,
    }
}

/// The six legend rows, in ascending multiplier order.
///
/// Independent of any record: the detail view always shows all six.
pub fn legend() -> &'static [LegendRow] {
    &LEGEND
}

/// Chip background for an opposing type label.
pub fn type_color(label: &str) -> &'static str {
    TYPE_COLORS.get(label).copied().unwrap_or(NEUTRAL_COLOR)
}

/// Everything needed to draw one opposing-type chip pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistanceChip<'a> {
    pub type_label: &'a str,
    pub type_color: &'static str,
    pub multiplier: f64,
    pub classification: Classification,
}

/// Chips for every resistance entry of `record`, in record order.
pub fn resistance_chips(record: &CatalogRecord) -> Vec<ResistanceChip<'_>> {
    record
        .resistances
        .iter()
        .map(|r| ResistanceChip {
            type_label: &r.type_label,
            type_color: type_color(&r.type_label),
            multiplier: r.multiplier,
            classification: classify(r.multiplier),
        })
        .collect()
}

/// Opposing type labels grouped by multiplier, lowest multiplier first.
///
/// Arbitrary multipliers get their own group; labels keep record order within
/// a group.
pub fn group_by_multiplier(resistances: &[Resistance]) -> Vec<(f64, Vec<&str>)> {
    let mut groups: BTreeMap<OrderedFloat<f64>, Vec<&str>> = BTreeMap::new();
    for resistance in resistances {
        groups
            .entry(OrderedFloat(resistance.multiplier))
            .or_default()
            .push(&resistance.type_label);
    }
    groups.into_iter().map(|(m, labels)| (m.0, labels)).collect()
}
