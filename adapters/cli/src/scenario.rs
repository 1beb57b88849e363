//! Scripted input loaded from TOML scenario files.

use std::{collections::BTreeMap, fs, path::Path};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use path_defence_core::{InputEvent, PointerButton};
use serde::Deserialize;

const SUPPORTED_SCENARIO_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    version: u32,
    #[serde(default)]
    input: Vec<ScriptedInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptedInput {
    tick: u32,
    event: ScriptedKind,
    x: Option<f32>,
    y: Option<f32>,
    button: Option<PointerButton>,
    key: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScriptedKind {
    Pointer,
    Key,
    Quit,
}

impl ScriptedInput {
    fn into_event(self) -> Result<InputEvent> {
        match self.event {
            ScriptedKind::Pointer => {
                let (Some(x), Some(y)) = (self.x, self.y) else {
                    bail!("pointer input at tick {} needs both x and y", self.tick);
                };
                Ok(InputEvent::PointerDown {
                    position: Vec2::new(x, y),
                    button: self.button.unwrap_or(PointerButton::Primary),
                })
            }
            ScriptedKind::Key => {
                let Some(text) = self.key.as_deref() else {
                    bail!("key input at tick {} is missing a key", self.tick);
                };
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) => Ok(InputEvent::KeyDown { key }),
                    _ => bail!(
                        "key input at tick {} must be a single character, got {text:?}",
                        self.tick
                    ),
                }
            }
            ScriptedKind::Quit => Ok(InputEvent::QuitRequested),
        }
    }
}

/// Input events grouped by the tick they are delivered on.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Scenario {
    inputs: BTreeMap<u32, Vec<InputEvent>>,
}

impl Scenario {
    /// Reads and parses the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Parses scenario TOML contents.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: ScenarioFile =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;
        if file.version != SUPPORTED_SCENARIO_VERSION {
            bail!(
                "unsupported scenario version {}; expected {}",
                file.version,
                SUPPORTED_SCENARIO_VERSION
            );
        }

        let mut inputs: BTreeMap<u32, Vec<InputEvent>> = BTreeMap::new();
        for scripted in file.input {
            let tick = scripted.tick;
            inputs.entry(tick).or_default().push(scripted.into_event()?);
        }
        Ok(Self { inputs })
    }

    /// Input delivered on `tick`, in file order.
    pub(crate) fn inputs_at(&self, tick: u32) -> Vec<InputEvent> {
        self.inputs.get(&tick).cloned().unwrap_or_default()
    }

    /// Total number of scripted events.
    pub(crate) fn len(&self) -> usize {
        self.inputs.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_event_kind() {
        let scenario = Scenario::parse(
            r#"
            version = 1

            [[input]]
            tick = 0
            event = "pointer"
            x = 35.0
            y = 570.0

            [[input]]
            tick = 0
            event = "pointer"
            x = 150.0
            y = 250.0
            button = "secondary"

            [[input]]
            tick = 12
            event = "key"
            key = "s"

            [[input]]
            tick = 30
            event = "quit"
            "#,
        )
        .expect("scenario should parse");

        assert_eq!(scenario.len(), 4);
        assert_eq!(
            scenario.inputs_at(0),
            vec![
                InputEvent::PointerDown {
                    position: Vec2::new(35.0, 570.0),
                    button: PointerButton::Primary,
                },
                InputEvent::PointerDown {
                    position: Vec2::new(150.0, 250.0),
                    button: PointerButton::Secondary,
                },
            ]
        );
        assert_eq!(
            scenario.inputs_at(12),
            vec![InputEvent::KeyDown { key: 's' }]
        );
        assert_eq!(scenario.inputs_at(30), vec![InputEvent::QuitRequested]);
        assert!(scenario.inputs_at(1).is_empty());
    }

    #[test]
    fn empty_scenario_has_no_input() {
        let scenario = Scenario::parse("version = 1").expect("scenario should parse");
        assert_eq!(scenario, Scenario::default());
    }

    #[test]
    fn rejects_unsupported_version() {
        let error = Scenario::parse("version = 2").expect_err("version 2 is unknown");
        assert!(error.to_string().contains("unsupported scenario version"));
    }

    #[test]
    fn rejects_pointer_without_coordinates() {
        let error = Scenario::parse(
            r#"
            version = 1
            [[input]]
            tick = 3
            event = "pointer"
            x = 10.0
            "#,
        )
        .expect_err("pointer needs y");
        assert!(error.to_string().contains("needs both x and y"));
    }

    #[test]
    fn rejects_multi_character_keys() {
        let error = Scenario::parse(
            r#"
            version = 1
            [[input]]
            tick = 3
            event = "key"
            key = "sell"
            "#,
        )
        .expect_err("keys are single characters");
        assert!(error.to_string().contains("single character"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Scenario::parse(
            r#"
            version = 1
            [[input]]
            tick = 3
            event = "quit"
            delay = 4
            "#,
        )
        .is_err());
    }

    #[test]
    fn bundled_scenario_parses() {
        let scenario = Scenario::parse(include_str!("../../../scenarios/basic_defence.toml"))
            .expect("bundled scenario should parse");
        assert_eq!(scenario.len(), 14);
        assert_eq!(scenario.inputs_at(0).len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let error = Scenario::load(Path::new("does/not/exist.toml"))
            .expect_err("missing file must fail");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }
}
