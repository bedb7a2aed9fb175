//! Line-oriented player commands.

use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use game_core::{ItemAction, ItemId, Position};

use crate::config::parse_position;

/// Slot used by `save` and `load` without an argument.
pub const DEFAULT_SLOT: &str = "quicksave";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
enum Verb {
    #[strum(serialize = "move", serialize = "go")]
    Move,
    Pick,
    Examine,
    Investigate,
    Complete,
    Escape,
    Look,
    Map,
    Quests,
    Clues,
    #[strum(serialize = "inventory", serialize = "inv")]
    Inventory,
    Save,
    Load,
    Saves,
    Help,
    #[strum(serialize = "quit", serialize = "exit")]
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Position),
    Interact(ItemId, ItemAction),
    Investigate(String),
    Complete(String),
    Escape,
    Look,
    Map,
    Quests,
    Clues,
    Inventory,
    Save(String),
    Load(String),
    Saves,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let first = words.next().ok_or_else(|| anyhow!("empty command"))?;
        let verb = Verb::from_str(first).map_err(|_| anyhow!("unknown command '{}'", first))?;
        let rest: Vec<&str> = words.collect();

        let command = match verb {
            Verb::Move => Command::Move(
                parse_position(&rest.join(","))
                    .ok_or_else(|| anyhow!("usage: move <x>,<y>"))?,
            ),
            Verb::Pick => Command::Interact(item_arg(&rest)?, ItemAction::Pick),
            Verb::Examine => Command::Interact(item_arg(&rest)?, ItemAction::Examine),
            Verb::Investigate => Command::Investigate(key_arg(verb, &rest)?),
            Verb::Complete => Command::Complete(key_arg(verb, &rest)?),
            Verb::Escape => Command::Escape,
            Verb::Look => Command::Look,
            Verb::Map => Command::Map,
            Verb::Quests => Command::Quests,
            Verb::Clues => Command::Clues,
            Verb::Inventory => Command::Inventory,
            Verb::Save => Command::Save(slot_arg(&rest)),
            Verb::Load => Command::Load(slot_arg(&rest)),
            Verb::Saves => Command::Saves,
            Verb::Help => Command::Help,
            Verb::Quit => Command::Quit,
        };
        Ok(command)
    }
}

fn item_arg(rest: &[&str]) -> Result<ItemId> {
    match rest {
        [id] => {
            let id = id.trim_start_matches('#');
            Ok(ItemId(id.parse().map_err(|_| anyhow!("'{}' is not an item id", id))?))
        }
        _ => bail!("usage: pick|examine <item id>"),
    }
}

fn key_arg(verb: Verb, rest: &[&str]) -> Result<String> {
    match rest {
        [key] => Ok((*key).to_string()),
        _ => bail!("usage: {} <name>", verb),
    }
}

fn slot_arg(rest: &[&str]) -> String {
    rest.first().copied().unwrap_or(DEFAULT_SLOT).to_string()
}

pub const HELP: &str = "\
commands:
  move <x>,<y>          walk to a cell
  pick <id>             pick up an item
  examine <id>          read an item's description
  investigate <object>  investigate an object (barrel, chair, table, walls)
  complete <quest>      complete an unlocked quest
  escape                check whether you can escape
  look                  where you are and what you can see
  map                   draw the explored area
  quests | clues | inventory
  save [slot] | load [slot] | saves
  help | quit";
