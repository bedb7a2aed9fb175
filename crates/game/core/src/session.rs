//! One player's game: world, fog of war and investigation behind a single surface.
//!
//! [`GameSession`] is the only type the application layer needs to hold. It
//! owns its world model, visibility tracker and investigation engine, shares
//! the immutable catalog through an [`Arc`], and exposes pull-only render
//! queries plus the player actions. Nothing here performs I/O.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::investigation::{
    Catalog, ClueDetails, ClueId, EscapeStatus, InvestigationEngine, InvestigationError,
    InvestigationOutcome, ObjectId, PlayerKnowledge, QuestCompletion, QuestId,
};
use crate::iso::{IsoProjection, paint_order};
use crate::state::{InvestigationState, Position, QuestStatus, SessionSnapshot, SnapshotError};
use crate::visibility::{TileVisibility, VisibilityTracker};
use crate::world::{Drawable, DrawableKind, ItemId, RemovedItem, Tile, WorldItem, WorldModel};

/// What the player does with an item.
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
pub enum ItemAction {
    Pick,
    Examine,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractOutcome {
    /// The item left the world; this is its full record.
    Picked(WorldItem),
    Examined {
        item: ItemId,
        name: String,
        description: String,
    },
}

/// Errors surfaced by [`GameSession`] actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("cannot walk onto {position}")]
    NotWalkable { position: Position },

    #[error("item {0} is not in the world")]
    UnknownItem(ItemId),

    #[error("item {0} cannot be picked up")]
    NotPickable(ItemId),

    #[error(transparent)]
    Investigation(#[from] InvestigationError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::NotWalkable { .. } | SessionError::NotPickable(_) => {
                ErrorSeverity::Recoverable
            }
            SessionError::UnknownItem(_) => ErrorSeverity::Validation,
            SessionError::Investigation(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::NotWalkable { .. } => "SESSION_NOT_WALKABLE",
            SessionError::UnknownItem(_) => "SESSION_UNKNOWN_ITEM",
            SessionError::NotPickable(_) => "SESSION_NOT_PICKABLE",
            SessionError::Investigation(err) => err.error_code(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    config: GameConfig,
    projection: IsoProjection,
    world: WorldModel,
    visibility: VisibilityTracker,
    investigation: InvestigationEngine,
    player: Position,
    /// Items picked up by the player, in pick order.
    picked: Vec<RemovedItem>,
}

impl GameSession {
    /// Starts a session with the player on `spawn` and its surroundings revealed.
    pub fn new(
        world: WorldModel,
        catalog: Arc<Catalog>,
        config: GameConfig,
        spawn: Position,
    ) -> Result<Self, SessionError> {
        if !world.is_walkable(spawn) {
            return Err(SessionError::NotWalkable { position: spawn });
        }

        let mut visibility = VisibilityTracker::new(config.visibility_radius);
        visibility.update_player_position(spawn, visibility.radius());

        tracing::debug!(
            "Session started at {} ({} tiles, {} items)",
            spawn,
            world.tile_count(),
            world.item_count()
        );

        Ok(Self {
            projection: config.projection(),
            config,
            world,
            visibility,
            investigation: InvestigationEngine::new(catalog),
            player: spawn,
            picked: Vec::new(),
        })
    }

    // ===== actions =====

    /// Moves the player onto any walkable cell; there is no path or adjacency check.
    pub fn move_player_to(&mut self, position: Position) -> Result<(), SessionError> {
        if !self.world.is_walkable(position) {
            return Err(SessionError::NotWalkable { position });
        }

        self.player = position;
        self.visibility
            .update_player_position(position, self.visibility.radius());
        tracing::debug!("Player moved to {}", position);
        Ok(())
    }

    pub fn interact(
        &mut self,
        item: ItemId,
        action: ItemAction,
    ) -> Result<InteractOutcome, SessionError> {
        let record = self.world.item(item).ok_or(SessionError::UnknownItem(item))?;

        match action {
            ItemAction::Examine => Ok(InteractOutcome::Examined {
                item,
                name: record.name.clone(),
                description: record.description.clone(),
            }),
            ItemAction::Pick => {
                if !record.pickable {
                    return Err(SessionError::NotPickable(item));
                }
                let removed = self
                    .world
                    .take_item(item)
                    .ok_or(SessionError::UnknownItem(item))?;
                let picked = removed.item.clone();
                self.picked.push(removed);
                tracing::debug!("Picked up {} ({})", picked.name, item);
                Ok(InteractOutcome::Picked(picked))
            }
        }
    }

    pub fn investigate(&mut self, object: ObjectId) -> Result<InvestigationOutcome, SessionError> {
        Ok(self.investigation.investigate(object)?)
    }

    pub fn investigate_key(&mut self, key: &str) -> Result<InvestigationOutcome, SessionError> {
        Ok(self.investigation.investigate_key(key)?)
    }

    pub fn complete_quest(&mut self, quest: QuestId) -> Result<QuestCompletion, SessionError> {
        Ok(self.investigation.complete_quest(quest)?)
    }

    pub fn complete_quest_key(&mut self, key: &str) -> Result<QuestCompletion, SessionError> {
        Ok(self.investigation.complete_quest_key(key)?)
    }

    pub fn can_escape(&self) -> EscapeStatus {
        self.investigation.can_escape()
    }

    /// Changes the reveal radius and recomputes the visible set around the player.
    pub fn set_visibility_radius(&mut self, radius: u32) {
        self.visibility.set_radius(radius);
        self.config.visibility_radius = self.visibility.radius();
        self.visibility
            .update_player_position(self.player, self.visibility.radius());
    }

    // ===== render queries =====

    pub fn player_position(&self) -> Position {
        self.player
    }

    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.world.tile_at(position)
    }

    pub fn item_at(&self, position: Position) -> Option<&WorldItem> {
        self.world.item_at(position)
    }

    pub fn item(&self, id: ItemId) -> Option<&WorldItem> {
        self.world.item(id)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visibility.is_visible(position)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.visibility.is_explored(position)
    }

    pub fn visibility(&self, position: Position) -> TileVisibility {
        self.visibility.visibility(position)
    }

    /// Tiles, remaining items and the player, in paint order.
    ///
    /// The player is painted after tiles and items sharing its depth key.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut drawables = self.world.drawables();
        drawables.push(Drawable::new(self.player, DrawableKind::Player));
        paint_order(&mut drawables, |drawable| drawable.depth_key);
        drawables
    }

    pub fn projection(&self) -> IsoProjection {
        self.projection
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldModel {
        &self.world
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.investigation.catalog()
    }

    pub fn investigation_state(&self) -> &InvestigationState {
        self.investigation.state()
    }

    /// Items the player has picked up, in pick order.
    pub fn inventory(&self) -> impl Iterator<Item = &WorldItem> + '_ {
        self.picked.iter().map(|removed| &removed.item)
    }

    pub fn clue_details(&self, clue: ClueId) -> Option<ClueDetails<'_>> {
        self.investigation.clue_details(clue)
    }

    pub fn available_quests(&self) -> Vec<QuestId> {
        self.investigation.available_quests()
    }

    pub fn knowledge(&self) -> PlayerKnowledge {
        self.investigation.knowledge()
    }

    // ===== persistence =====

    /// Captures the full mutable state, keyed by catalog keys and sorted.
    pub fn snapshot(&self) -> SessionSnapshot {
        let catalog = self.investigation.catalog();
        let state = self.investigation.state();

        let mut explored: Vec<_> = self.visibility.explored().iter().copied().collect();
        explored.sort();
        let mut visible: Vec<_> = self.visibility.visible().iter().copied().collect();
        visible.sort();

        let investigation_counts = state
            .investigation_counts()
            .iter()
            .filter_map(|(object, count)| {
                catalog
                    .object(*object)
                    .map(|def| (def.key.clone(), *count))
            })
            .collect();

        let mut discovered_clues: Vec<_> = state
            .discovered_clues()
            .iter()
            .filter_map(|clue| catalog.clue(*clue).map(|def| def.key.clone()))
            .collect();
        discovered_clues.sort();

        let quest_status = state
            .quest_statuses()
            .iter()
            .filter_map(|(quest, status)| {
                catalog.quest(*quest).map(|def| (def.key.clone(), *status))
            })
            .collect();

        let mut removed_items: Vec<_> = self.picked.iter().map(|removed| removed.item.id).collect();
        removed_items.sort();

        SessionSnapshot {
            player_position: self.player,
            explored,
            visible,
            investigation_counts,
            discovered_clues,
            quest_status,
            removed_items,
        }
    }

    /// Replaces the session state with `snapshot`.
    ///
    /// Everything is validated against this session's scene and catalog before
    /// anything changes; on error the session is untouched.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> Result<(), SnapshotError> {
        match self.prepare_restore(snapshot) {
            Ok(restored) => {
                self.apply_restore(snapshot, restored);
                tracing::debug!(
                    "Session restored at {} ({} explored tiles)",
                    self.player,
                    self.visibility.explored().len()
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Rejected snapshot: {}", err);
                Err(err)
            }
        }
    }

    fn prepare_restore(&self, snapshot: &SessionSnapshot) -> Result<Restored, SnapshotError> {
        let catalog = self.investigation.catalog();

        if !self.world.is_walkable(snapshot.player_position) {
            return Err(SnapshotError::PlayerNotWalkable(snapshot.player_position));
        }

        let explored: HashSet<Position> = snapshot.explored.iter().copied().collect();
        if let Some(cell) = snapshot.visible.iter().find(|cell| !explored.contains(cell)) {
            return Err(SnapshotError::VisibleNotExplored(*cell));
        }

        let mut state = InvestigationState::new();

        for (key, count) in &snapshot.investigation_counts {
            let object = catalog
                .object_id(key)
                .ok_or_else(|| SnapshotError::UnknownObject(key.clone()))?;
            let max = catalog
                .object(object)
                .map(|def| def.max_investigations)
                .unwrap_or_default();
            if *count > max {
                return Err(SnapshotError::CountExceedsMax {
                    object: key.clone(),
                    count: *count,
                    max,
                });
            }
            state.set_investigation_count(object, *count);
        }

        // A clue is only reachable through the first `count` steps of some object's sequence.
        let yielded: BTreeSet<ClueId> = catalog
            .objects()
            .flat_map(|(object, def)| {
                let count = usize::from(state.investigation_count(object));
                def.clue_sequence.iter().take(count).copied()
            })
            .collect();
        for key in &snapshot.discovered_clues {
            let clue = catalog
                .clue_id(key)
                .ok_or_else(|| SnapshotError::UnknownClue(key.clone()))?;
            if !yielded.contains(&clue) {
                return Err(SnapshotError::ClueNotYielded(key.clone()));
            }
            state.discover(clue);
        }

        for (key, status) in &snapshot.quest_status {
            let quest = catalog
                .quest_id(key)
                .ok_or_else(|| SnapshotError::UnknownQuest(key.clone()))?;
            let satisfied = catalog.quest(quest).is_some_and(|def| {
                def.required_clues.iter().all(|clue| state.has_clue(*clue))
            });
            if *status != QuestStatus::Locked && !satisfied {
                return Err(SnapshotError::QuestPrerequisitesMissing {
                    quest: key.clone(),
                    status: *status,
                });
            }
            state.set_quest_status(quest, *status);
        }

        let removed: BTreeSet<ItemId> = snapshot.removed_items.iter().copied().collect();
        let picked_ids: BTreeSet<ItemId> = self.picked.iter().map(|item| item.item.id).collect();
        if let Some(unknown) = removed
            .iter()
            .find(|id| !self.world.contains_item(**id) && !picked_ids.contains(id))
        {
            return Err(SnapshotError::UnknownItem(*unknown));
        }

        Ok(Restored { state, removed })
    }

    fn apply_restore(&mut self, snapshot: &SessionSnapshot, restored: Restored) {
        // Put every picked item back, then take out exactly the snapshot's set.
        let mut by_id: BTreeMap<ItemId, RemovedItem> = self
            .picked
            .drain(..)
            .map(|removed| (removed.item.id, removed))
            .collect();
        for id in &restored.removed {
            if let Some(removed) = by_id.remove(id) {
                self.picked.push(removed);
            } else if let Some(removed) = self.world.take_item(*id) {
                self.picked.push(removed);
            }
        }
        for (_, removed) in by_id {
            let id = removed.item.id;
            if let Err(err) = self.world.put_back(removed) {
                tracing::warn!("Could not return item {} to the world: {}", id, err);
            }
        }

        self.player = snapshot.player_position;
        self.visibility = VisibilityTracker::from_parts(
            self.visibility.radius(),
            snapshot.explored.iter().copied(),
            snapshot.visible.iter().copied(),
        );
        self.investigation.replace_state(restored.state);
    }
}

struct Restored {
    state: InvestigationState,
    removed: BTreeSet<ItemId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investigation::fixtures::basement_spec;
    use crate::world::{ItemSpec, SceneData, TileSpec};

    fn scene() -> SceneData {
        let mut tiles = Vec::new();
        for x in 0..5 {
            for y in 0..5 {
                tiles.push(TileSpec::new(x, y, "floor"));
            }
            tiles.push(TileSpec::new(x, -1, if x == 2 { "door" } else { "wall" }));
        }
        let item = |id, name: &str, x, y, pickable| ItemSpec {
            id,
            name: name.to_string(),
            description: format!("A {name}."),
            position_x: x,
            position_y: y,
            is_pickable: pickable,
            is_important: pickable,
            icon: None,
        };
        SceneData {
            tiles,
            items: vec![
                item(1, "barrel", 4, 4, false),
                item(4, "key", 0, 4, true),
                item(5, "coin", 3, 1, true),
            ],
        }
    }

    fn session() -> GameSession {
        GameSession::new(
            WorldModel::from_scene(&scene()).unwrap(),
            Arc::new(Catalog::from_spec(basement_spec()).unwrap()),
            GameConfig::default(),
            Position::ORIGIN,
        )
        .unwrap()
    }

    #[test]
    fn spawn_reveals_surroundings() {
        let session = session();
        assert!(session.is_visible(Position::ORIGIN));
        assert!(session.is_visible(Position::new(0, 3)));
        assert_eq!(
            session.visibility(Position::new(4, 4)),
            TileVisibility::Hidden
        );
    }

    #[test]
    fn spawn_must_be_walkable() {
        let err = GameSession::new(
            WorldModel::from_scene(&scene()).unwrap(),
            Arc::new(Catalog::default()),
            GameConfig::default(),
            Position::new(0, -1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SessionError::NotWalkable {
                position: Position::new(0, -1)
            }
        );
    }

    #[test]
    fn blocked_move_changes_nothing() {
        let mut session = session();
        let before = session.snapshot();

        let err = session.move_player_to(Position::new(9, 9)).unwrap_err();
        assert_eq!(
            err,
            SessionError::NotWalkable {
                position: Position::new(9, 9)
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(session.snapshot(), before);

        assert!(session.move_player_to(Position::new(1, -1)).is_err());
        session.move_player_to(Position::new(2, -1)).unwrap();
        assert_eq!(session.player_position(), Position::new(2, -1));
    }

    #[test]
    fn pick_and_examine() {
        let mut session = session();

        let outcome = session.interact(ItemId(4), ItemAction::Pick).unwrap();
        let InteractOutcome::Picked(key) = outcome else {
            panic!("expected a picked item");
        };
        assert_eq!(key.name, "key");
        assert!(key.important);
        assert!(session.item_at(Position::new(0, 4)).is_none());
        assert_eq!(session.inventory().count(), 1);

        assert_eq!(
            session.interact(ItemId(4), ItemAction::Examine).unwrap_err(),
            SessionError::UnknownItem(ItemId(4))
        );
        assert_eq!(
            session.interact(ItemId(1), ItemAction::Pick).unwrap_err(),
            SessionError::NotPickable(ItemId(1))
        );
        assert!(matches!(
            session.interact(ItemId(1), ItemAction::Examine),
            Ok(InteractOutcome::Examined { .. })
        ));
    }

    #[test]
    fn investigation_errors_pass_through() {
        let mut session = session();
        let err = session.investigate_key("door").unwrap_err();
        assert_eq!(err.error_code(), "INVESTIGATION_UNKNOWN_OBJECT");
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        for _ in 0..3 {
            session.investigate_key("table").unwrap();
        }
        let err = session.investigate_key("table").unwrap_err();
        assert_eq!(err.error_code(), "INVESTIGATION_EXHAUSTED");
    }

    #[test]
    fn player_is_painted_last_at_its_depth() {
        let mut session = session();
        session.move_player_to(Position::new(4, 4)).unwrap();

        let drawables = session.drawables();
        let at_eight: Vec<_> = drawables
            .iter()
            .filter(|drawable| drawable.depth_key == 8)
            .map(|drawable| drawable.kind)
            .collect();
        assert_eq!(
            at_eight,
            [
                DrawableKind::Tile(crate::world::TileKind::Floor),
                DrawableKind::Item(ItemId(1)),
                DrawableKind::Player,
            ]
        );
    }

    #[test]
    fn snapshot_restore_round_trip() {
        let mut session = session();
        session.move_player_to(Position::new(4, 4)).unwrap();
        session.interact(ItemId(5), ItemAction::Pick).unwrap();
        session.investigate_key("barrel").unwrap();
        session.investigate_key("walls").unwrap();
        session.complete_quest_key("find_water_source").unwrap();
        let saved = session.snapshot();

        assert_eq!(saved.removed_items, [ItemId(5)]);
        assert_eq!(saved.discovered_clues, ["barrel_contents", "wall_moisture"]);

        let mut other = self::session();
        other.interact(ItemId(4), ItemAction::Pick).unwrap();
        other.restore(&saved).unwrap();

        assert_eq!(other.snapshot(), saved);
        assert!(other.item_at(Position::new(0, 4)).is_some());
        assert!(other.item_at(Position::new(3, 1)).is_none());
        assert_eq!(other.can_escape().quests_remaining, 1);
    }

    #[test]
    fn invalid_snapshot_leaves_session_untouched() {
        let mut session = session();
        session.investigate_key("chair").unwrap();
        let before = session.snapshot();

        let mut bad = before.clone();
        bad.investigation_counts.insert("barrel".into(), 4);
        assert!(matches!(
            session.restore(&bad),
            Err(SnapshotError::CountExceedsMax { count: 4, max: 3, .. })
        ));

        let mut bad = before.clone();
        bad.quest_status
            .insert("find_exit_route".into(), QuestStatus::Completed);
        assert!(matches!(
            session.restore(&bad),
            Err(SnapshotError::QuestPrerequisitesMissing { .. })
        ));

        let mut bad = before.clone();
        bad.visible.push(Position::new(40, 40));
        assert_eq!(
            session.restore(&bad).unwrap_err(),
            SnapshotError::VisibleNotExplored(Position::new(40, 40))
        );

        let mut bad = before.clone();
        bad.removed_items.push(ItemId(77));
        assert_eq!(
            session.restore(&bad).unwrap_err(),
            SnapshotError::UnknownItem(ItemId(77))
        );

        let mut bad = before.clone();
        bad.discovered_clues.push("ghost".into());
        assert_eq!(
            session.restore(&bad).unwrap_err(),
            SnapshotError::UnknownClue("ghost".into())
        );

        let mut bad = before.clone();
        bad.discovered_clues.push("barrel_origin".into());
        assert_eq!(
            session.restore(&bad).unwrap_err(),
            SnapshotError::ClueNotYielded("barrel_origin".into())
        );

        let mut bad = before.clone();
        bad.player_position = Position::new(0, -1);
        assert!(session.restore(&bad).is_err());

        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn radius_change_recomputes_visibility() {
        let mut session = session();
        session.set_visibility_radius(0);
        assert!(session.is_visible(Position::ORIGIN));
        assert!(!session.is_visible(Position::new(1, 0)));
        assert!(session.is_explored(Position::new(1, 0)));
        assert_eq!(session.config().visibility_radius, 0);
    }

    #[test]
    fn session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<GameSession>();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_survives_json() {
        let mut session = session();
        session.investigate_key("barrel").unwrap();
        session.interact(ItemId(4), ItemAction::Pick).unwrap();
        let saved = session.snapshot();

        let json = serde_json::to_string_pretty(&saved).unwrap();
        let parsed: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, saved);

        let mut fresh = self::session();
        fresh.restore(&parsed).unwrap();
        assert_eq!(fresh.snapshot(), saved);
    }
}
