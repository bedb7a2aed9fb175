//! Investigation catalog: objects, clues, quests and escape routes.
//!
//! Content files name everything with string keys. [`Catalog::from_spec`]
//! validates every cross reference once and hands out dense identifiers, so
//! the engine never deals with dangling keys at play time.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::error::{ErrorSeverity, GameError};

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u16);

        impl $name {
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

catalog_id!(
    /// Index of an investigatable object in its [`Catalog`].
    ObjectId,
    "object"
);
catalog_id!(
    /// Index of a clue in its [`Catalog`].
    ClueId,
    "clue"
);
catalog_id!(
    /// Index of a quest in its [`Catalog`].
    QuestId,
    "quest"
);

/// Which of an object's three descriptions a player gets to read.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DescriptionTier {
    Initial,
    Detailed,
    Expert,
}

impl DescriptionTier {
    /// Tier reached after `count` investigations: 1 → initial, 2 → detailed, 3+ → expert.
    pub fn for_count(count: u8) -> Self {
        match count {
            0 | 1 => DescriptionTier::Initial,
            2 => DescriptionTier::Detailed,
            _ => DescriptionTier::Expert,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptionTiers {
    pub initial: String,
    pub detailed: String,
    pub expert: String,
}

impl DescriptionTiers {
    pub fn get(&self, tier: DescriptionTier) -> &str {
        match tier {
            DescriptionTier::Initial => &self.initial,
            DescriptionTier::Detailed => &self.detailed,
            DescriptionTier::Expert => &self.expert,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RouteDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A way out, granted by completing the quest that carries it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EscapeRoute {
    pub name: String,
    pub description: String,
    pub difficulty: RouteDifficulty,
}

// ============================================================================
// Content-facing specs (string keys)
// ============================================================================

/// Unvalidated catalog as written in content files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatalogSpec {
    pub objects: Vec<ObjectSpec>,
    pub clues: Vec<ClueSpec>,
    pub quests: Vec<QuestSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSpec {
    pub id: String,
    pub name: String,
    /// Clue keys revealed by the 1st, 2nd, ... investigation.
    pub clues: Vec<String>,
    pub descriptions: DescriptionTiers,
    pub max_investigations: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClueSpec {
    pub id: String,
    pub description: String,
    /// Free-form related topics; informational only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connects_to: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reveals_quest: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestSpec {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required_clues: Vec<String>,
    pub reward: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub escape_route: Option<EscapeRoute>,
}

// ============================================================================
// Validated definitions
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectDef {
    pub key: String,
    pub name: String,
    pub clue_sequence: Vec<ClueId>,
    pub descriptions: DescriptionTiers,
    pub max_investigations: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClueDef {
    pub key: String,
    pub description: String,
    pub connects_to: Vec<String>,
    pub reveals_quest: Option<QuestId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestDef {
    pub key: String,
    pub name: String,
    pub description: String,
    pub required_clues: BTreeSet<ClueId>,
    pub reward: String,
    pub escape_route: Option<EscapeRoute>,
}

/// Errors raised while validating a [`CatalogSpec`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("object '{0}' is declared twice")]
    DuplicateObject(String),

    #[error("clue '{0}' is declared twice")]
    DuplicateClue(String),

    #[error("quest '{0}' is declared twice")]
    DuplicateQuest(String),

    #[error("'{owner}' references undeclared clue '{clue}'")]
    UnknownClue { owner: String, clue: String },

    #[error("clue '{clue}' reveals undeclared quest '{quest}'")]
    UnknownQuest { clue: String, quest: String },

    #[error("object '{0}' allows zero investigations")]
    ZeroInvestigations(String),

    #[error("object '{object}' lists {clues} clues but allows only {max} investigations")]
    ClueSequenceTooLong { object: String, clues: usize, max: u8 },

    #[error("quest '{0}' has no required clues")]
    QuestWithoutClues(String),

    #[error("too many {0} entries for one catalog")]
    TooManyEntries(&'static str),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            DuplicateObject(_) => "CATALOG_DUPLICATE_OBJECT",
            DuplicateClue(_) => "CATALOG_DUPLICATE_CLUE",
            DuplicateQuest(_) => "CATALOG_DUPLICATE_QUEST",
            UnknownClue { .. } => "CATALOG_UNKNOWN_CLUE",
            UnknownQuest { .. } => "CATALOG_UNKNOWN_QUEST",
            ZeroInvestigations(_) => "CATALOG_ZERO_INVESTIGATIONS",
            ClueSequenceTooLong { .. } => "CATALOG_CLUE_SEQUENCE_TOO_LONG",
            QuestWithoutClues(_) => "CATALOG_QUEST_WITHOUT_CLUES",
            TooManyEntries(_) => "CATALOG_TOO_MANY_ENTRIES",
        }
    }
}

/// Validated, immutable investigation content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    objects: Vec<ObjectDef>,
    clues: Vec<ClueDef>,
    quests: Vec<QuestDef>,
    object_keys: HashMap<String, ObjectId>,
    clue_keys: HashMap<String, ClueId>,
    quest_keys: HashMap<String, QuestId>,
}

impl Catalog {
    pub fn from_spec(spec: CatalogSpec) -> Result<Self, CatalogError> {
        let clue_keys = index_keys(
            spec.clues.iter().map(|clue| clue.id.as_str()),
            ClueId,
            "clue",
            CatalogError::DuplicateClue,
        )?;
        let quest_keys = index_keys(
            spec.quests.iter().map(|quest| quest.id.as_str()),
            QuestId,
            "quest",
            CatalogError::DuplicateQuest,
        )?;
        let object_keys = index_keys(
            spec.objects.iter().map(|object| object.id.as_str()),
            ObjectId,
            "object",
            CatalogError::DuplicateObject,
        )?;

        let resolve_clue = |owner: &str, clue: &str| {
            clue_keys
                .get(clue)
                .copied()
                .ok_or_else(|| CatalogError::UnknownClue {
                    owner: owner.to_string(),
                    clue: clue.to_string(),
                })
        };

        let mut clues = Vec::with_capacity(spec.clues.len());
        for clue in spec.clues {
            let reveals_quest = match &clue.reveals_quest {
                Some(quest) => Some(quest_keys.get(quest).copied().ok_or_else(|| {
                    CatalogError::UnknownQuest {
                        clue: clue.id.clone(),
                        quest: quest.clone(),
                    }
                })?),
                None => None,
            };
            clues.push(ClueDef {
                key: clue.id,
                description: clue.description,
                connects_to: clue.connects_to,
                reveals_quest,
            });
        }

        let mut quests = Vec::with_capacity(spec.quests.len());
        for quest in spec.quests {
            if quest.required_clues.is_empty() {
                return Err(CatalogError::QuestWithoutClues(quest.id));
            }
            let required_clues = quest
                .required_clues
                .iter()
                .map(|clue| resolve_clue(&quest.id, clue))
                .collect::<Result<BTreeSet<_>, _>>()?;
            quests.push(QuestDef {
                key: quest.id,
                name: quest.name,
                description: quest.description,
                required_clues,
                reward: quest.reward,
                escape_route: quest.escape_route,
            });
        }

        let mut objects = Vec::with_capacity(spec.objects.len());
        for object in spec.objects {
            if object.max_investigations == 0 {
                return Err(CatalogError::ZeroInvestigations(object.id));
            }
            if object.clues.len() > usize::from(object.max_investigations) {
                return Err(CatalogError::ClueSequenceTooLong {
                    object: object.id,
                    clues: object.clues.len(),
                    max: object.max_investigations,
                });
            }
            let clue_sequence = object
                .clues
                .iter()
                .map(|clue| resolve_clue(&object.id, clue))
                .collect::<Result<Vec<_>, _>>()?;
            objects.push(ObjectDef {
                key: object.id,
                name: object.name,
                clue_sequence,
                descriptions: object.descriptions,
                max_investigations: object.max_investigations,
            });
        }

        tracing::debug!(
            "Catalog validated: {} objects, {} clues, {} quests",
            objects.len(),
            clues.len(),
            quests.len()
        );

        Ok(Self {
            objects,
            clues,
            quests,
            object_keys,
            clue_keys,
            quest_keys,
        })
    }

    pub fn object(&self, id: ObjectId) -> Option<&ObjectDef> {
        self.objects.get(id.index())
    }

    pub fn clue(&self, id: ClueId) -> Option<&ClueDef> {
        self.clues.get(id.index())
    }

    pub fn quest(&self, id: QuestId) -> Option<&QuestDef> {
        self.quests.get(id.index())
    }

    pub fn object_id(&self, key: &str) -> Option<ObjectId> {
        self.object_keys.get(key).copied()
    }

    pub fn clue_id(&self, key: &str) -> Option<ClueId> {
        self.clue_keys.get(key).copied()
    }

    pub fn quest_id(&self, key: &str) -> Option<QuestId> {
        self.quest_keys.get(key).copied()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &ObjectDef)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId(index as u16), object))
    }

    pub fn clues(&self) -> impl Iterator<Item = (ClueId, &ClueDef)> + '_ {
        self.clues
            .iter()
            .enumerate()
            .map(|(index, clue)| (ClueId(index as u16), clue))
    }

    /// Quests in declaration order, which is also unlock-evaluation order.
    pub fn quests(&self) -> impl Iterator<Item = (QuestId, &QuestDef)> + '_ {
        self.quests
            .iter()
            .enumerate()
            .map(|(index, quest)| (QuestId(index as u16), quest))
    }
}

fn index_keys<'a, Id: Copy>(
    keys: impl Iterator<Item = &'a str>,
    make_id: fn(u16) -> Id,
    kind: &'static str,
    duplicate: fn(String) -> CatalogError,
) -> Result<HashMap<String, Id>, CatalogError> {
    let mut index = HashMap::new();
    for (position, key) in keys.enumerate() {
        let raw = u16::try_from(position).map_err(|_| CatalogError::TooManyEntries(kind))?;
        if index.insert(key.to_string(), make_id(raw)).is_some() {
            return Err(duplicate(key.to_string()));
        }
    }
    Ok(index)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn tiers(name: &str) -> DescriptionTiers {
        DescriptionTiers {
            initial: format!("{name}: first look"),
            detailed: format!("{name}: closer look"),
            expert: format!("{name}: expert look"),
        }
    }

    pub fn object(id: &str, clues: &[&str], max: u8) -> ObjectSpec {
        ObjectSpec {
            id: id.to_string(),
            name: id.to_string(),
            clues: clues.iter().map(|clue| clue.to_string()).collect(),
            descriptions: tiers(id),
            max_investigations: max,
        }
    }

    pub fn clue(id: &str) -> ClueSpec {
        ClueSpec {
            id: id.to_string(),
            description: format!("clue {id}"),
            connects_to: Vec::new(),
            reveals_quest: None,
        }
    }

    pub fn quest(id: &str, required: &[&str], route: Option<&str>) -> QuestSpec {
        QuestSpec {
            id: id.to_string(),
            name: id.to_string(),
            description: format!("quest {id}"),
            required_clues: required.iter().map(|clue| clue.to_string()).collect(),
            reward: format!("reward for {id}"),
            escape_route: route.map(|name| EscapeRoute {
                name: name.to_string(),
                description: format!("route {name}"),
                difficulty: RouteDifficulty::Medium,
            }),
        }
    }

    /// Four objects, twelve clues, three quests; shaped like the basement scenario.
    pub fn basement_spec() -> CatalogSpec {
        CatalogSpec {
            objects: vec![
                object("barrel", &["barrel_contents", "barrel_age", "barrel_origin"], 3),
                object("chair", &["chair_wear", "chair_position", "chair_material"], 3),
                object("table", &["table_scratches", "table_stains", "table_drawer"], 3),
                object("walls", &["wall_moisture", "wall_cracks", "wall_markings"], 3),
            ],
            clues: [
                "barrel_contents",
                "barrel_age",
                "barrel_origin",
                "chair_wear",
                "chair_position",
                "chair_material",
                "table_scratches",
                "table_stains",
                "table_drawer",
                "wall_moisture",
                "wall_cracks",
                "wall_markings",
            ]
            .into_iter()
            .map(clue)
            .collect(),
            quests: vec![
                quest(
                    "find_water_source",
                    &["barrel_contents", "wall_moisture"],
                    Some("water pipe"),
                ),
                quest(
                    "investigate_recent_activity",
                    &["chair_position", "table_scratches"],
                    None,
                ),
                quest(
                    "find_exit_route",
                    &["table_drawer", "wall_markings"],
                    Some("secret passage"),
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn builds_dense_ids_in_declaration_order() {
        let catalog = Catalog::from_spec(basement_spec()).unwrap();

        assert_eq!(catalog.object_id("barrel"), Some(ObjectId(0)));
        assert_eq!(catalog.object_id("walls"), Some(ObjectId(3)));
        assert_eq!(catalog.clue_id("wall_markings"), Some(ClueId(11)));
        assert_eq!(catalog.quest_id("find_exit_route"), Some(QuestId(2)));
        assert_eq!(catalog.object_id("door"), None);

        let barrel = catalog.object(ObjectId(0)).unwrap();
        assert_eq!(barrel.clue_sequence, [ClueId(0), ClueId(1), ClueId(2)]);
        assert_eq!(catalog.quests().count(), 3);
    }

    #[test]
    fn resolves_revealed_quests() {
        let mut spec = basement_spec();
        spec.clues[0].reveals_quest = Some("find_water_source".into());
        spec.clues[0].connects_to = vec!["water_source".into(), "chemical_traces".into()];

        let catalog = Catalog::from_spec(spec).unwrap();
        let clue = catalog.clue(ClueId(0)).unwrap();
        assert_eq!(clue.reveals_quest, Some(QuestId(0)));
        // Connections are informational and need not be declared clues.
        assert_eq!(clue.connects_to.len(), 2);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let mut spec = basement_spec();
        spec.clues.push(clue("barrel_age"));
        assert_eq!(
            Catalog::from_spec(spec).unwrap_err(),
            CatalogError::DuplicateClue("barrel_age".into())
        );

        let mut spec = basement_spec();
        spec.objects.push(object("chair", &[], 1));
        assert_eq!(
            Catalog::from_spec(spec).unwrap_err(),
            CatalogError::DuplicateObject("chair".into())
        );
    }

    #[test]
    fn rejects_dangling_references() {
        let mut spec = basement_spec();
        spec.quests[1].required_clues.push("ghost".into());
        assert_eq!(
            Catalog::from_spec(spec).unwrap_err(),
            CatalogError::UnknownClue {
                owner: "investigate_recent_activity".into(),
                clue: "ghost".into()
            }
        );

        let mut spec = basement_spec();
        spec.objects[0].clues[1] = "ghost".into();
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::UnknownClue { .. })
        ));

        let mut spec = basement_spec();
        spec.clues[4].reveals_quest = Some("nowhere".into());
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::UnknownQuest { .. })
        ));
    }

    #[test]
    fn rejects_bad_investigation_limits() {
        let mut spec = basement_spec();
        spec.objects.push(object("crate", &[], 0));
        assert_eq!(
            Catalog::from_spec(spec).unwrap_err(),
            CatalogError::ZeroInvestigations("crate".into())
        );

        let mut spec = basement_spec();
        spec.objects.push(object("crate", &["barrel_age", "chair_wear"], 1));
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::ClueSequenceTooLong { clues: 2, max: 1, .. })
        ));

        let mut spec = basement_spec();
        spec.quests.push(quest("idle", &[], None));
        assert_eq!(
            Catalog::from_spec(spec).unwrap_err(),
            CatalogError::QuestWithoutClues("idle".into())
        );
    }

    #[test]
    fn tier_thresholds() {
        assert_eq!(DescriptionTier::for_count(1), DescriptionTier::Initial);
        assert_eq!(DescriptionTier::for_count(2), DescriptionTier::Detailed);
        assert_eq!(DescriptionTier::for_count(3), DescriptionTier::Expert);
        assert_eq!(DescriptionTier::for_count(9), DescriptionTier::Expert);
    }
}
