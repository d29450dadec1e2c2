//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use game_core::{
    ActorState, BehaviorProfile, BossSpec, EnemyCatalog, EnemyEntry, EnemyTypeId, EntitiesState,
    EntityId, GridMap, MapDimensions, Position, RangedProfile, SimConfig, TerrainKind,
};
use runtime::{LevelSetup, Session};

pub const GOBLIN: EnemyTypeId = EnemyTypeId(4);
pub const ARCHER: EnemyTypeId = EnemyTypeId(7);
pub const WOLF: EnemyTypeId = EnemyTypeId(14);
pub const LURKER: EnemyTypeId = EnemyTypeId(18);
pub const SKULKER: EnemyTypeId = EnemyTypeId(15);
pub const BRUTE: EnemyTypeId = EnemyTypeId(8);
pub const KING: EnemyTypeId = EnemyTypeId(100);
pub const SHAMAN: EnemyTypeId = EnemyTypeId(101);

pub fn catalog() -> EnemyCatalog {
    EnemyCatalog::new([
        EnemyEntry::new(GOBLIN, "goblin", 12, 4),
        EnemyEntry::new(ARCHER, "archer", 10, 3).with_ranged(RangedProfile::new(5, false)),
        EnemyEntry::new(BRUTE, "orc thrower", 14, 5).with_ranged(RangedProfile::new(5, true)),
        EnemyEntry::new(WOLF, "wolf", 10, 4).with_profile(BehaviorProfile::Pack),
        EnemyEntry::new(LURKER, "lurker", 15, 5).with_profile(BehaviorProfile::Ambush),
        EnemyEntry::new(SKULKER, "skulker", 10, 3).with_profile(BehaviorProfile::Cautious),
        EnemyEntry::new(KING, "goblin king", 100, 10).with_boss(BossSpec {
            minions: vec![(GOBLIN, 1)],
        }),
        EnemyEntry::new(SHAMAN, "goblin shaman", 80, 10)
            .with_ranged(RangedProfile::new(6, false))
            .with_boss(BossSpec {
                minions: vec![(GOBLIN, 1)],
            }),
    ])
    .expect("fixture catalog is valid")
}

/// Walled rectangle with open floor inside.
pub fn room(width: u32, height: u32) -> GridMap {
    let mut map = GridMap::filled(MapDimensions::new(width, height), TerrainKind::Floor);
    for x in 0..width as i32 {
        map.set_tile(Position::new(x, 0), TerrainKind::Wall).unwrap();
        map.set_tile(Position::new(x, height as i32 - 1), TerrainKind::Wall)
            .unwrap();
    }
    for y in 0..height as i32 {
        map.set_tile(Position::new(0, y), TerrainKind::Wall).unwrap();
        map.set_tile(Position::new(width as i32 - 1, y), TerrainKind::Wall)
            .unwrap();
    }
    map
}

/// Incrementally assembled level.
pub struct Fixture {
    pub map: GridMap,
    pub entities: EntitiesState,
    pub catalog: EnemyCatalog,
    pub config: SimConfig,
    pub seed: u64,
}

impl Fixture {
    pub fn new(map: GridMap, player: Position) -> Self {
        Self {
            map,
            entities: EntitiesState::with_player(ActorState::player(player, 100)),
            catalog: catalog(),
            config: SimConfig::default(),
            seed: 42,
        }
    }

    pub fn with_config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    pub fn enemy(&mut self, kind: EnemyTypeId, at: Position) -> EntityId {
        let actor = self
            .catalog
            .instantiate(kind, at, 1, &self.config)
            .expect("fixture enemy type exists");
        self.entities.push(actor)
    }

    /// Adds a prepared actor, e.g. one with status effects already applied.
    pub fn actor(&mut self, actor: ActorState) -> EntityId {
        self.entities.push(actor)
    }

    pub fn spawn_template(&self, kind: EnemyTypeId, at: Position) -> ActorState {
        self.catalog
            .instantiate(kind, at, 1, &self.config)
            .expect("fixture enemy type exists")
    }

    pub fn session(self) -> Session {
        Session::new(
            LevelSetup::new(self.map, self.entities, self.seed),
            self.catalog,
            self.config,
        )
    }
}
