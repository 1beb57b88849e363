use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use glam::Vec2;
use path_defence_core::{Command, EnemyId, EnemyKind, TowerId, TowerKind, TowerTarget};
use path_defence_system_tower_targeting::TowerTargeting;
use path_defence_world::{self as world, query, World};

#[test]
fn deterministic_replay_keeps_first_spawned_enemy_targeted() {
    let script = scripted_commands();
    let script_len = script.len();
    let first = replay(script.clone());
    let second = replay(script);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(first.assignments.len(), script_len);

    let after_first_spawn = &first.assignments[2];
    assert_eq!(after_first_spawn.len(), 1);
    assert_eq!(after_first_spawn[0].enemy, EnemyId::new(0));

    let after_second_spawn = &first.assignments[3];
    assert_eq!(after_second_spawn.len(), 1);
    assert_eq!(
        after_second_spawn[0].enemy,
        EnemyId::new(0),
        "earlier spawn stays first in live order"
    );
}

#[test]
fn enemies_walking_out_of_range_drop_their_target() {
    let mut world = World::new();
    let mut targeting = TowerTargeting::new();
    let mut events = Vec::new();
    let mut targets = Vec::new();

    world::apply(
        &mut world,
        Command::PlaceTower {
            kind: TowerKind::Basic,
            position: Vec2::new(20.0, 320.0),
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnEnemy {
            kind: EnemyKind::Weak,
        },
        &mut events,
    );

    let mut targeted_ticks = 0;
    for _ in 0..120 {
        world::apply(&mut world, Command::AdvanceEnemies, &mut events);
        targeting.handle(
            query::session(&world).state,
            &query::tower_view(&world),
            &query::enemy_view(&world),
            &mut targets,
        );
        if !targets.is_empty() {
            targeted_ticks += 1;
        }
    }

    assert!(targeted_ticks > 0);
    assert!(targets.is_empty(), "enemy should have left the basic range");
    assert_eq!(query::live_enemy_count(&world), 1);
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut world = World::new();
    let mut targeting = TowerTargeting::new();
    let mut current_targets = Vec::new();
    let mut assignments = Vec::new();
    let mut events = Vec::new();

    for command in commands {
        world::apply(&mut world, command, &mut events);
        targeting.handle(
            query::session(&world).state,
            &query::tower_view(&world),
            &query::enemy_view(&world),
            &mut current_targets,
        );
        assignments.push(current_targets.iter().map(TargetRecord::from).collect());
    }

    ReplayOutcome {
        event_count: events.len(),
        assignments,
    }
}

fn scripted_commands() -> Vec<Command> {
    vec![
        Command::PlaceTower {
            kind: TowerKind::Sniper,
            position: Vec2::new(100.0, 250.0),
        },
        Command::AdvanceEnemies,
        Command::SpawnEnemy {
            kind: EnemyKind::Strong,
        },
        Command::SpawnEnemy {
            kind: EnemyKind::Weak,
        },
        Command::AdvanceEnemies,
        Command::AdvanceEnemies,
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    event_count: usize,
    assignments: Vec<Vec<TargetRecord>>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct TargetRecord {
    tower: TowerId,
    enemy: EnemyId,
    enemy_position: (u32, u32),
}

impl From<&TowerTarget> for TargetRecord {
    fn from(target: &TowerTarget) -> Self {
        Self {
            tower: target.tower,
            enemy: target.enemy,
            enemy_position: (
                target.enemy_position.x.to_bits(),
                target.enemy_position.y.to_bits(),
            ),
        }
    }
}
