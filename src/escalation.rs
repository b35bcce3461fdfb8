//! Level escalation table.
//!
//! Maps a level to the spawn and attack configuration changes applied when
//! that level is reached. Pure data: tables are serde-deserializable so a
//! shell can supply its own difficulty curve; [`EscalationTable::standard`]
//! is the default progression.

use crate::attacks::AttackConfig;
use crate::components::{AttackKind, MobKind};
use crate::spawning::SpawnConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One configuration change applied on a level-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationAction {
    /// Register a new recurring mob spawn
    AddSpawn(SpawnConfig),
    /// Retire the earliest still-active spawn registration
    RemoveOldestSpawn,
    /// Register a new attack
    AddAttack(AttackConfig),
    /// Rescale an existing attack registration in place
    RescaleAttack { kind: AttackKind, scale: f32 },
    /// Change an existing attack registration's damage in place
    RedamageAttack { kind: AttackKind, damage: i32 },
}

/// Level -> escalation actions mapping
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EscalationTable {
    levels: BTreeMap<u32, Vec<EscalationAction>>,
}

impl EscalationTable {
    /// Actions to apply when `level` is reached. Unlisted levels escalate
    /// nothing.
    pub fn for_level(&self, level: u32) -> &[EscalationAction] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Load a table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The default difficulty curve, levels 2 through 7
    pub fn standard() -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(2, vec![
            EscalationAction::AddAttack(AttackConfig::new(AttackKind::Claw, 10, 2.3, Some(1.5))),
            EscalationAction::RemoveOldestSpawn,
            EscalationAction::AddSpawn(SpawnConfig::new(MobKind::Mob2, 1.0, 20, 0.8)),
            EscalationAction::AddSpawn(SpawnConfig::new(MobKind::Mob3, 4.0, 30, 0.7)),
        ]);
        levels.insert(3, vec![
            EscalationAction::AddAttack(AttackConfig::new(AttackKind::Catnip, 10, 2.0, None)),
            EscalationAction::AddSpawn(SpawnConfig::new(MobKind::Mob4, 4.0, 40, 0.7)),
        ]);
        levels.insert(4, vec![
            EscalationAction::RescaleAttack {
                kind: AttackKind::Beam,
                scale: 2.0,
            },
            EscalationAction::AddSpawn(SpawnConfig::new(MobKind::Mob3, 1.0, 30, 0.7)),
        ]);
        levels.insert(5, vec![
            EscalationAction::RescaleAttack {
                kind: AttackKind::Claw,
                scale: 4.0,
            },
            EscalationAction::RemoveOldestSpawn,
            EscalationAction::AddSpawn(SpawnConfig::new(MobKind::Mob4, 1.0, 40, 0.7)),
        ]);
        levels.insert(6, vec![
            EscalationAction::RescaleAttack {
                kind: AttackKind::Catnip,
                scale: 3.0,
            },
            EscalationAction::RedamageAttack {
                kind: AttackKind::Beam,
                damage: 40,
            },
        ]);
        levels.insert(7, vec![
            EscalationAction::RedamageAttack {
                kind: AttackKind::Claw,
                damage: 40,
            },
            EscalationAction::AddSpawn(SpawnConfig::new(MobKind::Lion, 5.0, 200, 1.0)),
        ]);
        Self { levels }
    }
}
