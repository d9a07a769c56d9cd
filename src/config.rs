//! Level, bonus and tuning configuration
//!
//! The host fetches three JSON documents (`levelConfig.json`, `bonusConfig.json` and the
//! optional `gameConfig.json`) and hands the text to [`GameConfig::from_json`]. Parsing
//! goes through loose `Raw*` mirrors of the wire format which are then converted into
//! validated, immutable domain types. A run can only be started from a `GameConfig`, so
//! a broken document blocks the game before the first tick.

use std::collections::HashSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Everything that can be wrong with the configuration documents
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {document} config: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid level config: 'levels' property is missing or empty.")]
    MissingLevels,
    #[error("Invalid level config: level {level} has no type objectives.")]
    NoObjectives { level: usize },
    #[error("Invalid level config: level {level} objective {objective} has unknown type '{kind}'.")]
    UnknownObjective {
        level: usize,
        objective: usize,
        kind: String,
    },
    #[error("Invalid level config: level {level} objective {objective} needs a target above zero.")]
    MissingTarget { level: usize, objective: usize },
    #[error("Invalid level config: level {level} objective {objective} declares a spawn config but lists none.")]
    MissingSpawnConfig { level: usize, objective: usize },
    #[error("Invalid bonus config: missing or empty \"basic\" property.")]
    MissingBonusTable,
    #[error("Invalid bonus config: tier '{key}' has a zero threshold.")]
    ZeroThreshold { key: String },
    #[error("Invalid bonus config: duplicate tier key '{key}'.")]
    DuplicateTier { key: String },
    #[error("Invalid game config: {0}")]
    InvalidTuning(&'static str),
}

/// Player and pickup bullet/life deltas (absent fields count as zero)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reward {
    pub bullets: i32,
    pub life: i32,
}

/// Stat adjustments applied on top of the base enemy profile
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnemyModifiers {
    pub speed_multiplier: f32,
    pub radius_increment: f32,
    pub health_increment: i32,
}

/// A one-shot burst of specially statted enemies replacing (or joining) ambient spawning
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnOverride {
    /// Type tag carried by every enemy of the burst
    pub name: String,
    pub modifiers: EnemyModifiers,
    /// Destroy every enemy on the board before the burst
    pub kill_all: bool,
    /// Keep ambient spawning running next to the burst
    pub spawn_others: bool,
    /// Burst size, at least 1
    pub count: u32,
}

/// What a level asks the player to do
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveKind {
    /// Kill at least `target` enemies within the level
    KillCount { target: u32 },
    /// Leave no live enemy tagged `target_type`
    ClearTarget { target_type: String },
}

/// One level objective with its completion reward
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub kind: ObjectiveKind,
    pub reward: Reward,
    /// Clear the board when the objective completes
    pub clear_board: bool,
    pub spawn_override: Option<SpawnOverride>,
}

/// A single level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDef {
    /// Number shown to the player
    pub ordinal: u32,
    pub modifiers: EnemyModifiers,
    /// Spawn ring radius as a percentage of the smaller half-extent of the arena
    pub spawn_radius_percent: f32,
    pub objectives: Vec<Objective>,
}

impl LevelDef {
    /// The spawn override in effect for this level (first objective declaring one)
    pub fn spawn_override(&self) -> Option<&SpawnOverride> {
        self.objectives.iter().find_map(|o| o.spawn_override.as_ref())
    }

    /// Whether ambient interval spawning runs during this level
    pub fn ambient_spawning(&self) -> bool {
        self.spawn_override().is_none_or(|o| o.spawn_others)
    }
}

/// Rendering hints for a bonus pickup; never read by the simulation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TierDisplay {
    pub color: String,
    pub text_color: String,
    pub text: String,
}

/// One rung of the bonus ladder
#[derive(Debug, Clone, PartialEq)]
pub struct BonusTier {
    pub key: String,
    pub order: i32,
    /// Kills needed (while this tier is current) to drop its pickup
    pub threshold: u32,
    pub reward: Reward,
    pub display: TierDisplay,
}

/// Gameplay balance numbers (`gameConfig.json`, every field optional)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    pub player_life: u32,
    pub player_bullets: u32,
    pub player_radius: f32,
    /// Player displacement per tick while chasing its target
    pub player_speed: f32,
    pub enemy_base_speed: f32,
    /// Floor for the per-level speed reduction
    pub enemy_min_speed: f32,
    pub enemy_base_radius: f32,
    pub enemy_base_health: i32,
    pub spawn_interval_ms: f64,
    /// Enemies created at run start when the first level spawns ambiently
    pub initial_wave: u32,
    pub pickup_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_life: 3,
            player_bullets: 10,
            player_radius: 20.0,
            player_speed: 5.0,
            enemy_base_speed: 0.35,
            enemy_min_speed: 0.35,
            enemy_base_radius: 15.0,
            enemy_base_health: 1,
            spawn_interval_ms: 200.0,
            initial_wave: 5,
            pickup_radius: 15.0,
        }
    }
}

impl Tuning {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.player_life == 0 {
            return Err(ConfigError::InvalidTuning("playerLife must be at least 1"));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::InvalidTuning("spawnIntervalMs must be positive"));
        }
        if !(self.player_radius > 0.0 && self.enemy_base_radius > 0.0 && self.pickup_radius > 0.0)
        {
            return Err(ConfigError::InvalidTuning("radii must be positive"));
        }
        if self.player_speed < 0.0 || self.enemy_base_speed < 0.0 || self.enemy_min_speed < 0.0 {
            return Err(ConfigError::InvalidTuning("speeds must not be negative"));
        }
        Ok(())
    }
}

/// Validated, immutable configuration for every run
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    levels: Vec<LevelDef>,
    /// Sorted by `order`, ties in document order (ladder order)
    tiers: Vec<BonusTier>,
    tuning: Tuning,
}

impl GameConfig {
    /// Validate already-built domain values
    pub fn new(
        levels: Vec<LevelDef>,
        mut tiers: Vec<BonusTier>,
        tuning: Tuning,
    ) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::MissingLevels);
        }
        for (li, level) in levels.iter().enumerate() {
            if level.objectives.is_empty() {
                return Err(ConfigError::NoObjectives { level: li });
            }
            for (oi, objective) in level.objectives.iter().enumerate() {
                let valid = match &objective.kind {
                    ObjectiveKind::KillCount { target } => *target > 0,
                    ObjectiveKind::ClearTarget { target_type } => !target_type.is_empty(),
                };
                if !valid {
                    return Err(ConfigError::MissingTarget {
                        level: li,
                        objective: oi,
                    });
                }
            }
        }

        if tiers.is_empty() {
            return Err(ConfigError::MissingBonusTable);
        }
        let mut seen = HashSet::new();
        for tier in &tiers {
            if tier.threshold == 0 {
                return Err(ConfigError::ZeroThreshold {
                    key: tier.key.clone(),
                });
            }
            if !seen.insert(tier.key.as_str()) {
                return Err(ConfigError::DuplicateTier {
                    key: tier.key.clone(),
                });
            }
        }
        // Stable: tiers sharing an `order` keep document order
        tiers.sort_by_key(|t| t.order);

        tuning.validate()?;

        Ok(Self {
            levels,
            tiers,
            tuning,
        })
    }

    /// Parse and validate the three configuration documents
    pub fn from_json(
        level_json: &str,
        bonus_json: &str,
        tuning_json: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let level_doc: RawLevelDocument =
            serde_json::from_str(level_json).map_err(|source| ConfigError::Parse {
                document: "level",
                source,
            })?;
        let bonus_doc: RawBonusDocument =
            serde_json::from_str(bonus_json).map_err(|source| ConfigError::Parse {
                document: "bonus",
                source,
            })?;
        let tuning = match tuning_json {
            Some(text) => serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                document: "game",
                source,
            })?,
            None => Tuning::default(),
        };

        let levels = level_doc
            .levels
            .ok_or(ConfigError::MissingLevels)?
            .into_iter()
            .enumerate()
            .map(|(i, raw)| raw.into_level(i))
            .collect::<Result<Vec<_>, _>>()?;

        let tiers = bonus_doc
            .basic
            .ok_or(ConfigError::MissingBonusTable)?
            .0
            .into_iter()
            .map(|(key, raw)| BonusTier {
                key,
                order: raw.order,
                threshold: raw.threshold,
                reward: raw.reward,
                display: raw.display,
            })
            .collect();

        let config = Self::new(levels, tiers, tuning)?;
        log::info!(
            "Loaded config: {} levels, {} bonus tiers",
            config.levels.len(),
            config.tiers.len()
        );
        Ok(config)
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    /// Level by index; `None` past the last level
    pub fn level(&self, index: usize) -> Option<&LevelDef> {
        self.levels.get(index)
    }

    /// Bonus tiers in ladder order
    pub fn tiers(&self) -> &[BonusTier] {
        &self.tiers
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}

// --- Wire format ---

#[derive(Debug, Deserialize)]
struct RawLevelDocument {
    levels: Option<Vec<RawLevel>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLevel {
    level: Option<u32>,
    #[serde(default)]
    speed_multiplier: f32,
    #[serde(default)]
    radius_increment: f32,
    #[serde(default)]
    health_increment: i32,
    spawn_radius_percent: Option<f32>,
    #[serde(default)]
    type_objectives: Vec<RawTypeObjective>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeObjective {
    has_spawn_config: Option<bool>,
    #[serde(default)]
    spawn_config: Vec<RawSpawnConfig>,
    config: RawObjectiveConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObjectiveConfig {
    #[serde(rename = "type")]
    kind: Option<String>,
    value: Option<u32>,
    target_spawn_config: Option<String>,
    #[serde(default)]
    reward: RawObjectiveReward,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawObjectiveReward {
    bullets: i32,
    life: i32,
    kill_all: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpawnConfig {
    name: String,
    #[serde(default)]
    speed_multiplier: f32,
    #[serde(default)]
    radius_increment: f32,
    #[serde(default)]
    health_increment: i32,
    #[serde(default)]
    kill_all: bool,
    spawn_others: Option<bool>,
    count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawBonusDocument {
    basic: Option<TierEntries>,
}

/// Tier table entries in document order, duplicate keys included
#[derive(Debug)]
struct TierEntries(Vec<(String, RawTier)>);

impl<'de> Deserialize<'de> for TierEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TierEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of bonus tiers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TierEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(TierEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct RawTier {
    #[serde(default)]
    order: i32,
    #[serde(default)]
    threshold: u32,
    #[serde(default)]
    reward: Reward,
    #[serde(default)]
    display: TierDisplay,
}

impl RawLevel {
    fn into_level(self, index: usize) -> Result<LevelDef, ConfigError> {
        if self.type_objectives.is_empty() {
            return Err(ConfigError::NoObjectives { level: index });
        }
        let objectives = self
            .type_objectives
            .into_iter()
            .enumerate()
            .map(|(oi, raw)| raw.into_objective(index, oi))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LevelDef {
            ordinal: self.level.unwrap_or(index as u32 + 1),
            modifiers: EnemyModifiers {
                speed_multiplier: self.speed_multiplier,
                radius_increment: self.radius_increment,
                health_increment: self.health_increment,
            },
            spawn_radius_percent: self.spawn_radius_percent.unwrap_or(100.0),
            objectives,
        })
    }
}

impl RawTypeObjective {
    fn into_objective(self, level: usize, objective: usize) -> Result<Objective, ConfigError> {
        let config = self.config;
        let kind = match config.kind.as_deref() {
            Some("clearTarget") => ObjectiveKind::ClearTarget {
                target_type: config
                    .target_spawn_config
                    .ok_or(ConfigError::MissingTarget { level, objective })?,
            },
            Some("killCount") | None => ObjectiveKind::KillCount {
                target: config
                    .value
                    .ok_or(ConfigError::MissingTarget { level, objective })?,
            },
            Some(other) => {
                return Err(ConfigError::UnknownObjective {
                    level,
                    objective,
                    kind: other.to_string(),
                });
            }
        };

        let declares_spawn = self
            .has_spawn_config
            .unwrap_or(!self.spawn_config.is_empty());
        let spawn_override = if declares_spawn {
            let raw = self
                .spawn_config
                .into_iter()
                .next()
                .ok_or(ConfigError::MissingSpawnConfig { level, objective })?;
            Some(SpawnOverride {
                name: raw.name,
                modifiers: EnemyModifiers {
                    speed_multiplier: raw.speed_multiplier,
                    radius_increment: raw.radius_increment,
                    health_increment: raw.health_increment,
                },
                kill_all: raw.kill_all,
                spawn_others: raw.spawn_others.unwrap_or(true),
                // `count: 0` behaves like an absent count
                count: raw.count.filter(|&c| c > 0).unwrap_or(1),
            })
        } else {
            None
        };

        Ok(Objective {
            kind,
            reward: Reward {
                bullets: config.reward.bullets,
                life: config.reward.life,
            },
            clear_board: config.reward.kill_all,
            spawn_override,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &str = r#"{
        "levels": [
            {
                "level": 1,
                "speedMultiplier": 0.0,
                "radiusIncrement": 0,
                "healthIncrement": 0,
                "spawnRadiusPercent": 90,
                "typeObjectives": [
                    { "config": { "type": "killCount", "value": 10, "reward": { "bullets": 5 } } }
                ]
            },
            {
                "level": 2,
                "typeObjectives": [
                    {
                        "hasSpawnConfig": true,
                        "spawnConfig": [
                            { "name": "boss", "healthIncrement": 4, "killAll": true, "spawnOthers": false, "count": 0 }
                        ],
                        "config": { "type": "clearTarget", "targetSpawnConfig": "boss", "reward": { "life": 1, "killAll": true } }
                    }
                ]
            }
        ]
    }"#;

    const BONUS: &str = r#"{
        "basic": {
            "silver": { "order": 1, "threshold": 5, "reward": { "bullets": 10, "life": 1 },
                        "display": { "color": "silver", "textColor": "black", "text": "S" } },
            "bronze": { "order": 0, "threshold": 3, "reward": { "bullets": 5 },
                        "display": { "color": "peru", "textColor": "white", "text": "B" } }
        }
    }"#;

    #[test]
    fn test_parse_full_documents() {
        let config = GameConfig::from_json(LEVELS, BONUS, None).unwrap();
        assert_eq!(config.levels().len(), 2);

        let first = &config.levels()[0];
        assert_eq!(first.ordinal, 1);
        assert_eq!(first.spawn_radius_percent, 90.0);
        assert_eq!(
            first.objectives[0].kind,
            ObjectiveKind::KillCount { target: 10 }
        );
        assert_eq!(first.objectives[0].reward.bullets, 5);
        assert!(first.ambient_spawning());

        let second = &config.levels()[1];
        assert_eq!(second.spawn_radius_percent, 100.0);
        let spawn = second.spawn_override().unwrap();
        assert_eq!(spawn.name, "boss");
        assert_eq!(spawn.count, 1);
        assert!(spawn.kill_all);
        assert!(!second.ambient_spawning());
        assert!(second.objectives[0].clear_board);
        assert_eq!(
            second.objectives[0].kind,
            ObjectiveKind::ClearTarget {
                target_type: "boss".to_string()
            }
        );
    }

    #[test]
    fn test_tiers_sorted_by_order() {
        let config = GameConfig::from_json(LEVELS, BONUS, None).unwrap();
        let keys: Vec<_> = config.tiers().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["bronze", "silver"]);
        assert_eq!(config.tiers()[1].display.text_color, "black");
        assert_eq!(config.tiers()[0].reward.life, 0);
    }

    #[test]
    fn test_missing_levels_rejected() {
        let err = GameConfig::from_json("{}", BONUS, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingLevels));

        let err = GameConfig::from_json(r#"{"levels": []}"#, BONUS, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingLevels));
    }

    #[test]
    fn test_levels_not_an_array_is_parse_error() {
        let err = GameConfig::from_json(r#"{"levels": 3}"#, BONUS, None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { document: "level", .. }));
    }

    #[test]
    fn test_missing_basic_rejected() {
        let err = GameConfig::from_json(LEVELS, r#"{"premium": {}}"#, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBonusTable));
        assert!(err.to_string().contains("\"basic\""));

        let err = GameConfig::from_json(LEVELS, r#"{"basic": {}}"#, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBonusTable));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let bonus = r#"{"basic": {"t": {"order": 0, "threshold": 0}}}"#;
        let err = GameConfig::from_json(LEVELS, bonus, None).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroThreshold { .. }));
    }

    #[test]
    fn test_unknown_objective_rejected() {
        let levels = r#"{"levels": [{"typeObjectives": [{"config": {"type": "escort", "value": 1}}]}]}"#;
        let err = GameConfig::from_json(levels, BONUS, None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownObjective { .. }));
    }

    #[test]
    fn test_level_without_objectives_rejected() {
        let levels = r#"{"levels": [{"level": 1}]}"#;
        let err = GameConfig::from_json(levels, BONUS, None).unwrap_err();
        assert!(matches!(err, ConfigError::NoObjectives { level: 0 }));
    }

    #[test]
    fn test_declared_spawn_config_must_exist() {
        let levels = r#"{"levels": [{"typeObjectives": [
            {"hasSpawnConfig": true, "config": {"value": 2}}
        ]}]}"#;
        let err = GameConfig::from_json(levels, BONUS, None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSpawnConfig { .. }));
    }

    #[test]
    fn test_tuning_defaults_and_overrides() {
        let config =
            GameConfig::from_json(LEVELS, BONUS, Some(r#"{"playerBullets": 25}"#)).unwrap();
        assert_eq!(config.tuning().player_bullets, 25);
        assert_eq!(config.tuning().player_life, 3);
        assert_eq!(config.tuning().spawn_interval_ms, 200.0);

        let err =
            GameConfig::from_json(LEVELS, BONUS, Some(r#"{"spawnIntervalMs": 0}"#)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning(_)));
    }

    #[test]
    fn test_shipped_configs_load() {
        let config = GameConfig::from_json(
            include_str!("../config/levelConfig.json"),
            include_str!("../config/bonusConfig.json"),
            Some(include_str!("../config/gameConfig.json")),
        )
        .unwrap();
        assert_eq!(config.levels().len(), 4);
        assert_eq!(config.tiers().len(), 3);
        assert_eq!(config.tiers()[0].key, "ammo");
        assert!(!config.levels()[2].ambient_spawning());
        assert_eq!(config.tuning(), &Tuning::default());
    }

    #[test]
    fn test_zero_player_life_rejected() {
        let err = GameConfig::from_json(LEVELS, BONUS, Some(r#"{"playerLife": 0}"#)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTuning(_)));
        assert!(err.to_string().contains("playerLife"));
    }

    #[test]
    fn test_equal_order_keeps_document_order() {
        let bonus = r#"{"basic": {
            "zeta": {"order": 0, "threshold": 2},
            "alpha": {"order": 0, "threshold": 2},
            "first": {"order": -1, "threshold": 2}
        }}"#;
        let config = GameConfig::from_json(LEVELS, bonus, None).unwrap();
        let keys: Vec<_> = config.tiers().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["first", "zeta", "alpha"]);
    }

    #[test]
    fn test_duplicate_tier_key_rejected() {
        let bonus = r#"{"basic": {
            "ammo": {"order": 0, "threshold": 2},
            "ammo": {"order": 1, "threshold": 3}
        }}"#;
        let err = GameConfig::from_json(LEVELS, bonus, None).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateTier { key } if key == "ammo"));
    }
}
