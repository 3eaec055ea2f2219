use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry. `0` is the "no entry" placeholder.
pub type RecordId = u32;

/// Sentinel id the remote index uses for its placeholder entry.
pub const PLACEHOLDER_ID: RecordId = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedNames {
    pub primary: String,   // French
    pub secondary: String, // English
    pub tertiary: String,  // Japanese
}

impl LocalizedNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.primary.as_str(),
            self.secondary.as_str(),
            self.tertiary.as_str(),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTag {
    pub label: String,
    pub icon_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Physical {
    pub weight: String,
    pub height: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub label: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resistance {
    pub type_label: String,
    pub multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionLink {
    pub label: String,
    pub id: RecordId,
    pub condition: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evolution {
    pub before: Vec<EvolutionLink>,
    pub after: Vec<EvolutionLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sprites {
    pub normal: String,
    pub shiny: Option<String>,
    pub gmax: Option<GmaxSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmaxSprites {
    #[serde(default)]
    pub regular: Option<String>,
    #[serde(default)]
    pub shiny: Option<String>,
}

/// One entry of the remote index, as the browser sees it.
///
/// Decoding is lenient: any optional section or name component that is
/// absent, `null` or of an unexpected shape degrades to its empty value
/// instead of failing the whole record. Sequences drop only their malformed
/// elements. Only `pokedex_id` and the `name` object are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRecord", into = "WireRecord")]
pub struct CatalogRecord {
    pub id: RecordId,
    pub names: LocalizedNames,
    pub generation: Option<u32>,
    pub category: Option<String>,
    pub types: Vec<TypeTag>,
    pub stats: Option<Stats>,
    pub physical: Option<Physical>,
    pub abilities: Vec<Ability>,
    pub resistances: Vec<Resistance>,
    pub evolution: Evolution,
    pub sprites: Sprites,
}

impl CatalogRecord {
    /// True for the remote index's "no entry" placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_ID
    }

    pub fn has_type(&self, label: &str) -> bool {
        self.types.iter().any(|t| t.label == label)
    }

    pub fn display_name(&self) -> &str {
        &self.names.primary
    }
}

// --- Wire format ---
// Field names follow the Tyradex API. These types never leave this module.

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireRecord {
    pokedex_id: RecordId,
    name: WireNames,
    #[serde(default, deserialize_with = "lenient")]
    generation: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sprites: WireSprites,
    #[serde(default, deserialize_with = "lenient_seq")]
    types: Vec<WireType>,
    #[serde(default, deserialize_with = "lenient_seq")]
    talents: Vec<WireTalent>,
    #[serde(default, deserialize_with = "lenient")]
    stats: Option<WireStats>,
    #[serde(default, deserialize_with = "lenient_seq")]
    resistances: Vec<WireResistance>,
    #[serde(default, deserialize_with = "lenient")]
    evolution: Option<WireEvolution>,
    #[serde(default, deserialize_with = "lenient")]
    height: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    weight: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireNames {
    #[serde(default, deserialize_with = "lenient")]
    fr: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    en: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    jp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireSprites {
    #[serde(default, deserialize_with = "lenient")]
    regular: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    shiny: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    gmax: Option<GmaxSprites>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireType {
    name: String,
    #[serde(default)]
    image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireTalent {
    name: String,
    #[serde(default)]
    tc: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireStats {
    #[serde(default)]
    hp: u16,
    #[serde(default)]
    atk: u16,
    #[serde(default)]
    def: u16,
    #[serde(default)]
    spe_atk: u16,
    #[serde(default)]
    spe_def: u16,
    #[serde(default)]
    vit: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireResistance {
    name: String,
    multiplier: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WireEvolution {
    #[serde(default, deserialize_with = "lenient_seq")]
    pre: Vec<WireEvolutionLink>,
    #[serde(default, deserialize_with = "lenient_seq")]
    next: Vec<WireEvolutionLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireEvolutionLink {
    pokedex_id: RecordId,
    name: String,
    #[serde(default)]
    condition: Option<String>,
}

/// Accepts any JSON value and keeps it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keeps every element of a JSON array that has the expected shape.
///
/// Anything other than an array (including `null`) is an empty sequence.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

impl From<WireEvolutionLink> for EvolutionLink {
    fn from(link: WireEvolutionLink) -> Self {
        EvolutionLink {
            label: link.name,
            id: link.pokedex_id,
            condition: link.condition,
        }
    }
}

impl From<EvolutionLink> for WireEvolutionLink {
    fn from(link: EvolutionLink) -> Self {
        WireEvolutionLink {
            pokedex_id: link.id,
            name: link.label,
            condition: link.condition,
        }
    }
}

impl From<WireRecord> for CatalogRecord {
    fn from(wire: WireRecord) -> Self {
        let evolution = wire.evolution.unwrap_or_default();
        // Weight and height only make sense as a pair.
        let physical = match (wire.weight, wire.height) {
            (Some(weight), Some(height)) if !weight.is_empty() && !height.is_empty() => {
                Some(Physical { weight, height })
            }
            _ => None,
        };

        CatalogRecord {
            id: wire.pokedex_id,
            names: LocalizedNames {
                primary: wire.name.fr.unwrap_or_default(),
                secondary: wire.name.en.unwrap_or_default(),
                tertiary: wire.name.jp.unwrap_or_default(),
            },
            generation: wire.generation,
            category: wire.category,
            types: wire
                .types
                .into_iter()
                .map(|t| TypeTag {
                    label: t.name,
                    icon_ref: t.image,
                })
                .collect(),
            stats: wire.stats.map(|s| Stats {
                hp: s.hp,
                attack: s.atk,
                defense: s.def,
                special_attack: s.spe_atk,
                special_defense: s.spe_def,
                speed: s.vit,
            }),
            physical,
            abilities: wire
                .talents
                .into_iter()
                .map(|t| Ability {
                    label: t.name,
                    hidden: t.tc,
                })
                .collect(),
            resistances: wire
                .resistances
                .into_iter()
                .map(|r| Resistance {
                    type_label: r.name,
                    multiplier: r.multiplier,
                })
                .collect(),
            evolution: Evolution {
                before: evolution
                    .pre
                    .into_iter()
                    .map(EvolutionLink::from)
                    .collect(),
                after: evolution
                    .next
                    .into_iter()
                    .map(EvolutionLink::from)
                    .collect(),
            },
            sprites: Sprites {
                normal: wire.sprites.regular.unwrap_or_default(),
                shiny: wire.sprites.shiny,
                gmax: wire.sprites.gmax,
            },
        }
    }
}

impl From<CatalogRecord> for WireRecord {
    fn from(record: CatalogRecord) -> Self {
        let (weight, height) = match record.physical {
            Some(p) => (Some(p.weight), Some(p.height)),
            None => (None, None),
        };

        WireRecord {
            pokedex_id: record.id,
            name: WireNames {
                fr: Some(record.names.primary),
                en: Some(record.names.secondary),
                jp: Some(record.names.tertiary),
            },
            generation: record.generation,
            category: record.category,
            sprites: WireSprites {
                regular: Some(record.sprites.normal),
                shiny: record.sprites.shiny,
                gmax: record.sprites.gmax,
            },
            types: record
                .types
                .into_iter()
                .map(|t| WireType {
                    name: t.label,
                    image: t.icon_ref,
                })
                .collect(),
            talents: record
                .abilities
                .into_iter()
                .map(|a| WireTalent {
                    name: a.label,
                    tc: a.hidden,
                })
                .collect(),
            stats: record.stats.map(|s| WireStats {
                hp: s.hp,
                atk: s.attack,
                def: s.defense,
                spe_atk: s.special_attack,
                spe_def: s.special_defense,
                vit: s.speed,
            }),
            resistances: record
                .resistances
                .into_iter()
                .map(|r| WireResistance {
                    name: r.type_label,
                    multiplier: r.multiplier,
                })
                .collect(),
            evolution: Some(WireEvolution {
                pre: record
                    .evolution
                    .before
                    .into_iter()
                    .map(WireEvolutionLink::from)
                    .collect(),
                next: record
                    .evolution
                    .after
                    .into_iter()
                    .map(WireEvolutionLink::from)
                    .collect(),
            }),
            height,
            weight,
        }
    }
}
