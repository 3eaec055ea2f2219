//! Plain-text rendering of the list and detail views.

use crate::effectiveness::{group_by_multiplier, legend, resistance_chips};
use crate::session::ListView;
use schema::{CatalogRecord, EvolutionLink};
use std::fmt;

pub const NO_TYPES: &str = "No type available";
pub const NO_STATS: &str = "No stats available";
pub const NO_PHYSICAL: &str = "No characteristics available";
pub const NO_ABILITIES: &str = "No abilities available";
pub const NO_RESISTANCES: &str = "No resistances available";
pub const NO_PRE_EVOLUTION: &str = "No pre-evolution";
pub const NO_EVOLUTION: &str = "No evolution";

const SEPARATOR: &str = "--------------------";

/// One card of the list view.
pub struct RecordCard<'a>(pub &'a CatalogRecord);

impl fmt::Display for RecordCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        write!(f, "#{:03} {}", record.id, record.display_name())?;
        if record.types.is_empty() {
            write!(f, " [{}]", NO_TYPES)
        } else {
            let labels: Vec<&str> = record.types.iter().map(|t| t.label.as_str()).collect();
            write!(f, " [{}]", labels.join(" / "))
        }
    }
}

/// The whole detail view for one record, legend included.
pub struct RecordDetail<'a>(pub &'a CatalogRecord);

impl fmt::Display for RecordDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        const LABEL_WIDTH: usize = 12;

        // --- 1. Title and sprites ---
        writeln!(f, "{} (#{})", record.display_name(), record.id)?;
        if let Some(category) = &record.category {
            writeln!(f, "{}", category)?;
        }
        if let Some(generation) = record.generation {
            writeln!(f, "Generation {}", generation)?;
        }
        writeln!(f, "Sprite: {}", record.sprites.normal)?;
        if let Some(shiny) = &record.sprites.shiny {
            writeln!(f, "Shiny:  {}", shiny)?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        // --- 2. Names ---
        writeln!(f, "Names:")?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "French", record.names.primary)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "English", record.names.secondary)?;
        writeln!(f, "{:<LABEL_WIDTH$} : {}", "Japanese", record.names.tertiary)?;
        writeln!(f, "{}", SEPARATOR)?;

        // --- 3. Types ---
        write!(f, "Type(s): ")?;
        if record.types.is_empty() {
            writeln!(f, "{}", NO_TYPES)?;
        } else {
            let labels: Vec<&str> = record.types.iter().map(|t| t.label.as_str()).collect();
            writeln!(f, "{}", labels.join(" / "))?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        // --- 4. Stats ---
        writeln!(f, "Stats:")?;
        match &record.stats {
            Some(stats) => {
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "HP", stats.hp)?;
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Attack", stats.attack)?;
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Defense", stats.defense)?;
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Sp. Atk", stats.special_attack)?;
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Sp. Def", stats.special_defense)?;
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Speed", stats.speed)?;
            }
            None => writeln!(f, "  {}", NO_STATS)?,
        }
        writeln!(f, "{}", SEPARATOR)?;

        // --- 5. Characteristics ---
        writeln!(f, "Characteristics:")?;
        match &record.physical {
            Some(physical) => {
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Weight", physical.weight)?;
                writeln!(f, "{:<LABEL_WIDTH$} : {}", "Height", physical.height)?;
            }
            None => writeln!(f, "  {}", NO_PHYSICAL)?,
        }
        writeln!(f, "{}", SEPARATOR)?;

        // --- 6. Abilities ---
        writeln!(f, "Abilities:")?;
        if record.abilities.is_empty() {
            writeln!(f, "  {}", NO_ABILITIES)?;
        }
        for ability in &record.abilities {
            let hidden = if ability.hidden { " (hidden)" } else { "" };
            writeln!(f, "  {}{}", ability.label, hidden)?;
        }
        writeln!(f, "{}", SEPARATOR)?;

        // --- 7. Resistances ---
        writeln!(f, "Damage taken from attacking types:")?;
        let chips = resistance_chips(record);
        if chips.is_empty() {
            writeln!(f, "  {}", NO_RESISTANCES)?;
        }
        for chip in &chips {
            writeln!(
                f,
                "  {:<10} {} | x{} {} ({} on {})",
                chip.type_label,
                chip.type_color,
                chip.multiplier,
                chip.classification.label(),
                chip.classification.text,
                chip.classification.background,
            )?;
        }
        if !chips.is_empty() {
            writeln!(f, "Summary:")?;
            for (multiplier, labels) in group_by_multiplier(&record.resistances) {
                writeln!(f, "  x{:<5} {}", multiplier, labels.join(", "))?;
            }
        }
        writeln!(f, "{}", SEPARATOR)?;

        // --- 8. Legend ---
        write!(f, "{}", Legend)?;
        writeln!(f, "{}", SEPARATOR)?;

        // --- 9. Evolutions ---
        writeln!(f, "Evolutions:")?;
        write_links(f, &record.evolution.before, NO_PRE_EVOLUTION)?;
        write_links(f, &record.evolution.after, NO_EVOLUTION)
    }
}

fn write_links(f: &mut fmt::Formatter<'_>, links: &[EvolutionLink], empty: &str) -> fmt::Result {
    if links.is_empty() {
        return writeln!(f, "  {}", empty);
    }
    for link in links {
        match &link.condition {
            Some(condition) => writeln!(f, "  {} - #{} ({})", link.label, link.id, condition)?,
            None => writeln!(f, "  {} - #{}", link.label, link.id)?,
        }
    }
    Ok(())
}

/// The fixed six-row effectiveness legend.
pub struct Legend;

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Legend:")?;
        for row in legend() {
            writeln!(f, "  {} {} : {}", row.background, row.multiplier, row.severity)?;
        }
        Ok(())
    }
}

/// Renders the list view, including its loading, error and empty states.
pub fn render_list(view: &ListView<'_>) -> String {
    match view {
        ListView::Loading => "Loading...".to_string(),
        ListView::Failed(message) => format!("Error while fetching data: {}", message),
        ListView::NoData => "No Pokémon available".to_string(),
        ListView::NoMatches => "No Pokémon match the current filters".to_string(),
        ListView::Records(records) => {
            let mut output = format!("{} Pokémon\n", records.len());
            for record in records {
                output.push_str(&format!("  {}\n", RecordCard(record)));
            }
            output
        }
    }
}
