use glam::Vec2;
use path_defence_core::{
    Command, Event, InputEvent, Money, PointerButton, TowerId, TowerKind, PLAYFIELD,
};
use path_defence_system_builder::{Builder, BuilderContext};

fn context(money: u32, selected: Option<TowerId>) -> BuilderContext {
    BuilderContext {
        money: Money::new(money),
        selected,
        playfield: PLAYFIELD,
    }
}

fn press(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        position: Vec2::new(x, y),
        button: PointerButton::Primary,
    }
}

#[test]
fn strip_press_arms_tower_type() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(75.0, 570.0)],
        context(100, None),
        |_| None,
        &mut commands,
    );

    assert_eq!(builder.armed(), Some(TowerKind::Sniper));
    assert!(commands.is_empty(), "arming must not emit commands");
}

#[test]
fn strip_press_beyond_last_button_is_ignored() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(15.0, 570.0), press(400.0, 570.0), press(2.0, 570.0)],
        context(100, None),
        |_| None,
        &mut commands,
    );

    assert_eq!(
        builder.armed(),
        Some(TowerKind::Basic),
        "invalid slots leave the previous choice armed"
    );
    assert!(commands.is_empty());
}

#[test]
fn armed_press_in_play_area_places_and_disarms() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(15.0, 570.0), press(100.0, 250.0), press(300.0, 250.0)],
        context(100, None),
        |_| None,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceTower {
            kind: TowerKind::Basic,
            position: Vec2::new(100.0, 250.0),
        }],
        "only the first press after arming places a tower",
    );
    assert_eq!(builder.armed(), None);
}

#[test]
fn unaffordable_tower_stays_armed() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(135.0, 580.0), press(100.0, 250.0)],
        context(100, None),
        |_| None,
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(builder.armed(), Some(TowerKind::Cannon));
}

#[test]
fn press_on_tower_selects_instead_of_placing() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(15.0, 570.0), press(100.0, 250.0)],
        context(100, None),
        |_| Some(TowerId::new(3)),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::SelectTower {
            tower: TowerId::new(3),
        }]
    );
    assert_eq!(builder.armed(), Some(TowerKind::Basic));
}

#[test]
fn sell_key_targets_selected_tower() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[
            InputEvent::KeyDown { key: 's' },
            InputEvent::KeyDown { key: 's' },
        ],
        context(0, Some(TowerId::new(1))),
        |_| None,
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::SellTower {
            tower: TowerId::new(1),
        }],
        "a sold tower cannot be sold twice",
    );
}

#[test]
fn selection_made_earlier_in_batch_can_be_sold() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(100.0, 250.0), InputEvent::KeyDown { key: 's' }],
        context(0, None),
        |_| Some(TowerId::new(5)),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![
            Command::SelectTower {
                tower: TowerId::new(5),
            },
            Command::SellTower {
                tower: TowerId::new(5),
            },
        ]
    );
}

#[test]
fn other_buttons_and_keys_are_ignored() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[
            InputEvent::PointerDown {
                position: Vec2::new(15.0, 570.0),
                button: PointerButton::Secondary,
            },
            InputEvent::KeyDown { key: 'x' },
            InputEvent::QuitRequested,
        ],
        context(100, Some(TowerId::new(0))),
        |_| Some(TowerId::new(0)),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(builder.armed(), None);
}

#[test]
fn session_reset_disarms() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[press(15.0, 570.0)],
        context(100, None),
        |_| None,
        &mut commands,
    );
    assert!(builder.armed().is_some());

    builder.handle(
        &[Event::SessionReset],
        &[],
        context(100, None),
        |_| None,
        &mut commands,
    );
    assert_eq!(builder.armed(), None);
}

#[test]
fn spending_is_tracked_across_the_batch() {
    let mut builder = Builder::new();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        &[
            press(15.0, 570.0),
            press(100.0, 250.0),
            press(15.0, 570.0),
            press(300.0, 250.0),
        ],
        context(60, None),
        |_| None,
        &mut commands,
    );

    assert_eq!(commands.len(), 1);
    assert_eq!(builder.armed(), Some(TowerKind::Basic));
}
