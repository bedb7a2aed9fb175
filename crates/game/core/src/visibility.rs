//! Fog-of-war bookkeeping.
//!
//! Every cell moves through `Hidden -> Explored -> (Visible | Explored)`.
//! After each player move the visible set is recomputed from scratch as the
//! disc of the configured radius around the player, and folded into the
//! explored set, which never shrinks. Walls do not occlude: visibility is a
//! pure distance test.
//!
//! Drawing the fog is the renderer's job; this module only answers
//! membership queries.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::state::Position;

/// Render-facing classification of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TileVisibility {
    Hidden,
    Explored,
    Visible,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityTracker {
    radius: u32,
    explored: HashSet<Position>,
    visible: HashSet<Position>,
}

impl VisibilityTracker {
    /// Creates a tracker with every cell hidden.
    pub fn new(radius: u32) -> Self {
        Self {
            radius: radius.min(GameConfig::MAX_VISIBILITY_RADIUS),
            explored: HashSet::new(),
            visible: HashSet::new(),
        }
    }

    /// Rebuilds a tracker from persisted sets.
    ///
    /// Visible cells are folded into `explored`, so the containment invariant
    /// holds even for inconsistent input.
    pub fn from_parts(
        radius: u32,
        explored: impl IntoIterator<Item = Position>,
        visible: impl IntoIterator<Item = Position>,
    ) -> Self {
        let mut tracker = Self::new(radius);
        tracker.explored.extend(explored);
        tracker.visible.extend(visible);
        tracker.explored.extend(tracker.visible.iter().copied());
        tracker
    }

    /// Default radius used by [`crate::session::GameSession`] moves.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: u32) {
        self.radius = radius.min(GameConfig::MAX_VISIBILITY_RADIUS);
    }

    /// Replaces the visible set with every cell within `radius` of `player`
    /// and marks all of them explored.
    pub fn update_player_position(&mut self, player: Position, radius: u32) {
        let radius = radius.min(GameConfig::MAX_VISIBILITY_RADIUS);
        let reach = radius as i32;
        let limit = i64::from(radius) * i64::from(radius);

        let mut visible = HashSet::new();
        for dx in -reach..=reach {
            for dy in -reach..=reach {
                if i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy) > limit {
                    continue;
                }
                if let Some(cell) = player.checked_offset(dx, dy) {
                    visible.insert(cell);
                }
            }
        }

        self.explored.extend(visible.iter().copied());
        self.visible = visible;

        tracing::trace!(
            "Visibility updated around {}: {} visible, {} explored",
            player,
            self.visible.len(),
            self.explored.len()
        );
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.explored.contains(&position)
    }

    pub fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    pub fn visibility(&self, position: Position) -> TileVisibility {
        if self.is_visible(position) {
            TileVisibility::Visible
        } else if self.is_explored(position) {
            TileVisibility::Explored
        } else {
            TileVisibility::Hidden
        }
    }

    pub fn explored(&self) -> &HashSet<Position> {
        &self.explored
    }

    pub fn visible(&self) -> &HashSet<Position> {
        &self.visible
    }
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT_VISIBILITY_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let tracker = VisibilityTracker::default();
        assert_eq!(tracker.radius(), 3);
        assert_eq!(tracker.visibility(Position::ORIGIN), TileVisibility::Hidden);
        assert!(tracker.explored().is_empty());
        assert!(tracker.visible().is_empty());
    }

    #[test]
    fn radius_three_disc() {
        let mut tracker = VisibilityTracker::default();
        tracker.update_player_position(Position::ORIGIN, 3);

        // Integer points with dx² + dy² <= 9.
        assert_eq!(tracker.visible().len(), 29);
        assert!(tracker.is_visible(Position::new(3, 0)));
        assert!(tracker.is_visible(Position::new(-2, -2)));
        assert!(!tracker.is_visible(Position::new(3, 1)));
        assert!(!tracker.is_visible(Position::new(-2, 3)));
    }

    #[test]
    fn radius_zero_reveals_only_player_cell() {
        let mut tracker = VisibilityTracker::default();
        tracker.update_player_position(Position::new(4, -4), 0);
        assert_eq!(tracker.visible().len(), 1);
        assert!(tracker.is_visible(Position::new(4, -4)));
    }

    #[test]
    fn moving_keeps_exploration_and_replaces_visibility() {
        let mut tracker = VisibilityTracker::default();
        tracker.update_player_position(Position::ORIGIN, 3);
        let first_explored = tracker.explored().clone();

        tracker.update_player_position(Position::new(10, 0), 3);

        assert!(tracker.explored().is_superset(&first_explored));
        assert!(tracker.explored().is_superset(tracker.visible()));
        assert_eq!(
            tracker.visibility(Position::ORIGIN),
            TileVisibility::Explored
        );
        assert_eq!(
            tracker.visibility(Position::new(10, 3)),
            TileVisibility::Visible
        );
        assert_eq!(
            tracker.visibility(Position::new(5, 0)),
            TileVisibility::Hidden
        );
    }

    #[test]
    fn containment_holds_for_every_step() {
        let mut tracker = VisibilityTracker::new(2);
        let path = [(0, 0), (1, 0), (1, 1), (-3, 4), (-3, 4), (7, -7)];
        let mut previous = tracker.explored().clone();
        for (x, y) in path {
            tracker.update_player_position(Position::new(x, y), tracker.radius());
            assert!(tracker.explored().is_superset(tracker.visible()));
            assert!(tracker.explored().is_superset(&previous));
            previous = tracker.explored().clone();
        }
    }

    #[test]
    fn edge_of_plane_does_not_wrap() {
        let mut tracker = VisibilityTracker::default();
        tracker.update_player_position(Position::new(i32::MAX, 0), 1);
        assert_eq!(tracker.visible().len(), 4);
        assert!(!tracker.is_visible(Position::new(i32::MIN, 0)));
    }

    #[test]
    fn from_parts_enforces_containment() {
        let tracker = VisibilityTracker::from_parts(
            3,
            [Position::new(0, 0)],
            [Position::new(1, 1)],
        );
        assert!(tracker.is_explored(Position::new(1, 1)));
        assert!(tracker.is_visible(Position::new(1, 1)));
        assert_eq!(
            tracker.visibility(Position::new(0, 0)),
            TileVisibility::Explored
        );
    }

    #[test]
    fn radius_is_capped() {
        let tracker = VisibilityTracker::new(u32::MAX);
        assert_eq!(tracker.radius(), GameConfig::MAX_VISIBILITY_RADIUS);
    }
}
