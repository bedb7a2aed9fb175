//! The command loop driving one [`GameSession`].

use std::io::{BufRead, Write};

use anyhow::Result;
use game_core::{GameError, GameSession, InteractOutcome, Position, TileKind, TileVisibility};

use crate::command::{Command, HELP};
use crate::store::SnapshotStore;

/// Whether the loop should keep reading commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: GameSession,
    store: SnapshotStore,
}

impl App {
    pub fn new(session: GameSession, store: SnapshotStore) -> Self {
        Self { session, store }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Reads commands line by line until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(out, "You wake up in a dark basement. Type 'help' for commands.")?;
        self.describe_position(out)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => {
                    tracing::info!("Command: {:?}", command);
                    self.execute(command, out)?
                }
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        tracing::info!("Command loop finished");
        Ok(())
    }

    /// Executes one command. Refused game actions are reported to `out`, not returned.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Move(position) => match self.session.move_player_to(position) {
                Ok(()) => self.describe_position(out)?,
                Err(e) => report(out, &e)?,
            },
            Command::Interact(item, action) => match self.session.interact(item, action) {
                Ok(InteractOutcome::Picked(item)) => {
                    writeln!(out, "You pick up the {}.", item.name)?;
                }
                Ok(InteractOutcome::Examined {
                    name, description, ..
                }) => {
                    writeln!(out, "{}: {}", name, description)?;
                }
                Err(e) => report(out, &e)?,
            },
            Command::Investigate(key) => match self.session.investigate_key(&key) {
                Ok(outcome) => {
                    writeln!(
                        out,
                        "[{} {}/{}] {}",
                        outcome.tier,
                        outcome.investigation_count,
                        outcome.max_investigations,
                        outcome.description
                    )?;
                    if let Some(details) = outcome
                        .new_clue
                        .and_then(|clue| self.session.clue_details(clue))
                    {
                        writeln!(out, "New clue: {}", details.description)?;
                    }
                    for quest in outcome.unlocked_quests {
                        if let Some(def) = self.session.catalog().quest(quest) {
                            writeln!(out, "Quest unlocked: {} ({})", def.name, def.key)?;
                        }
                    }
                }
                Err(e) => report(out, &e)?,
            },
            Command::Complete(key) => match self.session.complete_quest_key(&key) {
                Ok(completion) => {
                    writeln!(out, "Quest completed: {}", completion.name)?;
                    writeln!(out, "Reward: {}", completion.reward)?;
                }
                Err(e) => report(out, &e)?,
            },
            Command::Escape => {
                let status = self.session.can_escape();
                writeln!(out, "{}", status.reason)?;
                for route in &status.escape_routes {
                    writeln!(
                        out,
                        "  {} [{}]: {}",
                        route.name, route.difficulty, route.description
                    )?;
                }
            }
            Command::Look => self.describe_position(out)?,
            Command::Map => self.draw_map(out)?,
            Command::Quests => {
                let available = self.session.available_quests();
                if available.is_empty() {
                    writeln!(out, "No quests available.")?;
                }
                for quest in available {
                    if let Some(def) = self.session.catalog().quest(quest) {
                        writeln!(out, "{} ({}): {}", def.name, def.key, def.description)?;
                    }
                }
            }
            Command::Clues => {
                let knowledge = self.session.knowledge();
                if knowledge.discovered_clues.is_empty() {
                    writeln!(out, "You have not found any clues yet.")?;
                }
                for clue in knowledge.discovered_clues {
                    if let Some(details) = self.session.clue_details(clue) {
                        writeln!(out, "- {}", details.description)?;
                    }
                }
            }
            Command::Inventory => {
                let mut empty = true;
                for item in self.session.inventory() {
                    empty = false;
                    writeln!(out, "- {} ({})", item.name, item.id)?;
                }
                if empty {
                    writeln!(out, "You carry nothing.")?;
                }
            }
            Command::Save(slot) => match self.store.save(&slot, &self.session.snapshot()) {
                Ok(()) => writeln!(out, "Saved to '{}'.", slot)?,
                Err(e) => writeln!(out, "Could not save: {}", e)?,
            },
            Command::Load(slot) => match self.store.load(&slot) {
                Ok(Some(snapshot)) => match self.session.restore(&snapshot) {
                    Ok(()) => {
                        writeln!(out, "Loaded '{}'.", slot)?;
                        self.describe_position(out)?;
                    }
                    Err(e) => report(out, &e)?,
                },
                Ok(None) => writeln!(out, "No save named '{}'.", slot)?,
                Err(e) => writeln!(out, "Could not load: {}", e)?,
            },
            Command::Saves => match self.store.list_slots() {
                Ok(slots) if slots.is_empty() => writeln!(out, "No saves yet.")?,
                Ok(slots) => writeln!(out, "{}", slots.join(", "))?,
                Err(e) => writeln!(out, "Could not list saves: {}", e)?,
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn describe_position<W: Write>(&self, out: &mut W) -> Result<()> {
        let player = self.session.player_position();
        writeln!(out, "You stand at {}.", player)?;

        let mut seen: Vec<_> = self
            .session
            .world()
            .items()
            .filter(|item| self.session.is_visible(item.position))
            .collect();
        seen.sort_by_key(|item| item.position.distance_squared(player));
        for item in seen {
            let marker = if item.important { " (!)" } else { "" };
            writeln!(
                out,
                "  {} {} at {}{}",
                item.id, item.name, item.position, marker
            )?;
        }
        Ok(())
    }

    /// Draws the scene's bounding box one character per cell, top row first.
    ///
    /// Hidden cells are blank; explored cells show terrain only; visible cells
    /// also show items and the player.
    fn draw_map<W: Write>(&self, out: &mut W) -> Result<()> {
        let tiles: Vec<Position> = self
            .session
            .world()
            .tiles()
            .map(|tile| tile.position)
            .collect();
        let (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) = (
            tiles.iter().map(|p| p.x).min(),
            tiles.iter().map(|p| p.x).max(),
            tiles.iter().map(|p| p.y).min(),
            tiles.iter().map(|p| p.y).max(),
        ) else {
            return Ok(());
        };

        for y in min_y..=max_y {
            let row: String = (min_x..=max_x)
                .map(|x| self.map_glyph(Position::new(x, y)))
                .collect();
            writeln!(out, "{}", row.trim_end())?;
        }
        Ok(())
    }

    fn map_glyph(&self, position: Position) -> char {
        let visibility = self.session.visibility(position);
        if visibility == TileVisibility::Hidden {
            return ' ';
        }
        if visibility == TileVisibility::Visible {
            if position == self.session.player_position() {
                return '@';
            }
            if self.session.item_at(position).is_some() {
                return '*';
            }
        }
        match self.session.tile_at(position).map(|tile| tile.kind) {
            Some(TileKind::Floor) => '.',
            Some(TileKind::Wall) => '#',
            Some(TileKind::Door) => '+',
            Some(TileKind::Water) => '~',
            Some(TileKind::Stairs) => '>',
            Some(TileKind::Void) | None => ' ',
        }
    }
}

fn report<W: Write, E: GameError>(out: &mut W, error: &E) -> Result<()> {
    tracing::info!(
        "Refused ({}, {}): {}",
        error.error_code(),
        error.severity().as_str(),
        error
    );
    writeln!(out, "{}", error)?;
    Ok(())
}
