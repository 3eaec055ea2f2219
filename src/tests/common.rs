use crate::client::CatalogSource;
use crate::errors::{BrowserError, BrowserResult};
use schema::{
    Ability, CatalogRecord, Evolution, EvolutionLink, LocalizedNames, Physical, RecordId,
    Resistance, Sprites, Stats, TypeTag,
};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A builder for creating test records with empty optional sections.
///
/// # Example
/// ```
/// let record = RecordBuilder::new(4, "Salamèche")
///     .with_types(&["Feu"])
///     .with_resistance("Eau", 2.0)
///     .build();
/// ```
pub struct RecordBuilder {
    record: CatalogRecord,
}

impl RecordBuilder {
    /// Creates a new builder; the primary (French) name is also used for the
    /// other languages until overridden.
    pub fn new(id: RecordId, name: &str) -> Self {
        Self {
            record: CatalogRecord {
                id,
                names: LocalizedNames {
                    primary: name.to_string(),
                    secondary: name.to_string(),
                    tertiary: name.to_string(),
                },
                generation: None,
                category: None,
                types: Vec::new(),
                stats: None,
                physical: None,
                abilities: Vec::new(),
                resistances: Vec::new(),
                evolution: Evolution::default(),
                sprites: Sprites {
                    normal: format!("https://sprites.test/{}/regular.png", id),
                    shiny: None,
                    gmax: None,
                },
            },
        }
    }

    pub fn with_english(mut self, name: &str) -> Self {
        self.record.names.secondary = name.to_string();
        self
    }

    pub fn with_japanese(mut self, name: &str) -> Self {
        self.record.names.tertiary = name.to_string();
        self
    }

    pub fn with_types(mut self, labels: &[&str]) -> Self {
        self.record.types = labels
            .iter()
            .map(|label| TypeTag {
                label: label.to_string(),
                icon_ref: format!("https://sprites.test/types/{}.png", label),
            })
            .collect();
        self
    }

    /// HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub fn with_stats(mut self, stats: [u16; 6]) -> Self {
        self.record.stats = Some(Stats {
            hp: stats[0],
            attack: stats[1],
            defense: stats[2],
            special_attack: stats[3],
            special_defense: stats[4],
            speed: stats[5],
        });
        self
    }

    pub fn with_physical(mut self, weight: &str, height: &str) -> Self {
        self.record.physical = Some(Physical {
            weight: weight.to_string(),
            height: height.to_string(),
        });
        self
    }

    pub fn with_ability(mut self, label: &str, hidden: bool) -> Self {
        self.record.abilities.push(Ability {
            label: label.to_string(),
            hidden,
        });
        self
    }

    pub fn with_resistance(mut self, type_label: &str, multiplier: f64) -> Self {
        self.record.resistances.push(Resistance {
            type_label: type_label.to_string(),
            multiplier,
        });
        self
    }

    pub fn with_evolution_before(mut self, label: &str, id: RecordId) -> Self {
        self.record.evolution.before.push(link(label, id));
        self
    }

    pub fn with_evolution_after(mut self, label: &str, id: RecordId) -> Self {
        self.record.evolution.after.push(link(label, id));
        self
    }

    pub fn build(self) -> CatalogRecord {
        self.record
    }
}

fn link(label: &str, id: RecordId) -> EvolutionLink {
    EvolutionLink {
        label: label.to_string(),
        id,
        condition: None,
    }
}

/// In-memory `CatalogSource` that counts the requests it serves.
pub struct StaticSource {
    records: BrowserResult<Vec<CatalogRecord>>,
    requests: AtomicUsize,
}

impl StaticSource {
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        Self {
            records: Ok(records),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: BrowserError) -> Self {
        Self {
            records: Err(err),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl CatalogSource for StaticSource {
    async fn fetch_all(&self) -> BrowserResult<Vec<CatalogRecord>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.records.clone()
    }

    async fn fetch_one(&self, id: RecordId) -> BrowserResult<CatalogRecord> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let records = self.records.as_ref().map_err(Clone::clone)?;
        records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(BrowserError::NotFound(id))
    }
}
