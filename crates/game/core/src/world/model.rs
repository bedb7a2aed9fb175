use std::collections::{BTreeMap, HashMap};

use crate::iso::paint_order;
use crate::state::Position;

use super::{ItemId, SceneData, SceneError, Tile, TileKind, WorldItem};

/// Placement sequence number; doubles as the paint-order tie breaker.
type Slot = u32;

/// Tile and item layout of the current scene.
///
/// Tiles are immutable once placed. Items are owned by the model until the
/// player picks them up, at which point every index entry for them is dropped.
#[derive(Clone, Debug, Default)]
pub struct WorldModel {
    tiles: Vec<Tile>,
    tile_index: HashMap<Position, usize>,
    items: BTreeMap<Slot, WorldItem>,
    item_slots: HashMap<ItemId, Slot>,
    item_positions: HashMap<Position, Slot>,
    next_slot: Slot,
}

/// Something the renderer has to paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawableKind {
    Tile(TileKind),
    Item(ItemId),
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drawable {
    pub position: Position,
    pub depth_key: i64,
    pub kind: DrawableKind,
}

impl Drawable {
    pub fn new(position: Position, kind: DrawableKind) -> Self {
        Self {
            position,
            depth_key: position.depth_key(),
            kind,
        }
    }
}

/// An item removed from the world, remembered with its original slot so it
/// can be put back without disturbing paint order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RemovedItem {
    slot: Slot,
    pub(crate) item: WorldItem,
}

impl WorldModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the model from a scene payload. Tiles and items keep payload order.
    pub fn from_scene(scene: &SceneData) -> Result<Self, SceneError> {
        let mut world = Self::new();

        for spec in &scene.tiles {
            let position = spec.position();
            let kind = spec
                .kind
                .parse::<TileKind>()
                .map_err(|_| SceneError::UnknownTileKind {
                    position,
                    kind: spec.kind.clone(),
                })?;
            world.insert_tile(Tile::new(position, kind))?;
        }

        for spec in &scene.items {
            world.insert_item(WorldItem::from(spec))?;
        }

        tracing::debug!(
            "World model built: {} tiles, {} items",
            world.tile_count(),
            world.item_count()
        );

        Ok(world)
    }

    pub fn insert_tile(&mut self, tile: Tile) -> Result<(), SceneError> {
        if self.tile_index.contains_key(&tile.position) {
            return Err(SceneError::DuplicateTile(tile.position));
        }
        self.tile_index.insert(tile.position, self.tiles.len());
        self.tiles.push(tile);
        Ok(())
    }

    pub fn insert_item(&mut self, item: WorldItem) -> Result<(), SceneError> {
        let slot = self.next_slot;
        self.place_item(slot, item)?;
        self.next_slot += 1;
        Ok(())
    }

    fn place_item(&mut self, slot: Slot, item: WorldItem) -> Result<(), SceneError> {
        if self.item_slots.contains_key(&item.id) {
            return Err(SceneError::DuplicateItem(item.id));
        }
        if let Some(existing) = self.item_at(item.position) {
            return Err(SceneError::CellOccupied {
                item: item.id,
                existing: existing.id,
                position: item.position,
            });
        }

        self.item_slots.insert(item.id, slot);
        self.item_positions.insert(item.position, slot);
        self.items.insert(slot, item);
        Ok(())
    }

    pub fn tile_at(&self, position: Position) -> Option<&Tile> {
        self.tile_index
            .get(&position)
            .and_then(|index| self.tiles.get(*index))
    }

    pub fn item_at(&self, position: Position) -> Option<&WorldItem> {
        self.item_positions
            .get(&position)
            .and_then(|slot| self.items.get(slot))
    }

    pub fn item(&self, id: ItemId) -> Option<&WorldItem> {
        self.item_slots.get(&id).and_then(|slot| self.items.get(slot))
    }

    pub fn contains_item(&self, id: ItemId) -> bool {
        self.item_slots.contains_key(&id)
    }

    /// Removes an item from every index. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: ItemId) -> Option<WorldItem> {
        self.take_item(id).map(|removed| removed.item)
    }

    pub(crate) fn take_item(&mut self, id: ItemId) -> Option<RemovedItem> {
        let slot = self.item_slots.remove(&id)?;
        let item = self.items.remove(&slot)?;
        self.item_positions.remove(&item.position);
        Some(RemovedItem { slot, item })
    }

    pub(crate) fn put_back(&mut self, removed: RemovedItem) -> Result<(), SceneError> {
        self.place_item(removed.slot, removed.item)
    }

    /// A cell is walkable iff it holds a floor, door or stairs tile.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.tile_at(position).is_some_and(Tile::is_walkable)
    }

    /// Tiles in placement order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Items still in the world, in placement order.
    pub fn items(&self) -> impl Iterator<Item = &WorldItem> + '_ {
        self.items.values()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Every tile and remaining item, sorted into paint order.
    ///
    /// Tiles precede items that share their depth key; within each group
    /// placement order is kept.
    pub fn drawables(&self) -> Vec<Drawable> {
        let mut drawables: Vec<Drawable> = self
            .tiles
            .iter()
            .map(|tile| Drawable::new(tile.position, DrawableKind::Tile(tile.kind)))
            .chain(
                self.items
                    .values()
                    .map(|item| Drawable::new(item.position, DrawableKind::Item(item.id))),
            )
            .collect();
        paint_order(&mut drawables, |drawable| drawable.depth_key);
        drawables
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ItemSpec, TileSpec};

    fn room() -> SceneData {
        let mut tiles = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                tiles.push(TileSpec::new(x, y, "floor"));
            }
        }
        tiles.push(TileSpec::new(0, -1, "wall"));
        tiles.push(TileSpec::new(1, -1, "door"));
        tiles.push(TileSpec::new(-1, 0, "void"));
        tiles.push(TileSpec::new(-1, 1, "water"));

        let items = vec![
            ItemSpec {
                id: 7,
                name: "Rusty Key".into(),
                description: "An old key.".into(),
                position_x: 2,
                position_y: 2,
                is_pickable: true,
                is_important: true,
                icon: Some("key.png".into()),
            },
            ItemSpec {
                id: 3,
                name: "Barrel".into(),
                description: "A wooden barrel.".into(),
                position_x: 1,
                position_y: 0,
                is_pickable: false,
                is_important: false,
                icon: None,
            },
        ];

        SceneData { tiles, items }
    }

    #[test]
    fn point_queries() {
        let world = WorldModel::from_scene(&room()).unwrap();

        assert_eq!(world.tile_count(), 13);
        assert_eq!(
            world.tile_at(Position::new(1, -1)).map(|tile| tile.kind),
            Some(TileKind::Door)
        );
        assert!(world.tile_at(Position::new(5, 5)).is_none());
        assert_eq!(
            world.item_at(Position::new(2, 2)).map(|item| item.id),
            Some(ItemId(7))
        );
        assert!(world.item_at(Position::new(0, 0)).is_none());
    }

    #[test]
    fn walkability_by_kind() {
        let world = WorldModel::from_scene(&room()).unwrap();

        assert!(world.is_walkable(Position::new(0, 0)));
        assert!(world.is_walkable(Position::new(1, -1)));
        assert!(!world.is_walkable(Position::new(0, -1)));
        assert!(!world.is_walkable(Position::new(-1, 0)));
        assert!(!world.is_walkable(Position::new(-1, 1)));
        // No tile at all.
        assert!(!world.is_walkable(Position::new(9, 9)));
    }

    #[test]
    fn remove_item_clears_every_index() {
        let mut world = WorldModel::from_scene(&room()).unwrap();

        let removed = world.remove_item(ItemId(7)).unwrap();
        assert_eq!(removed.name, "Rusty Key");
        assert!(world.item_at(Position::new(2, 2)).is_none());
        assert!(world.item(ItemId(7)).is_none());
        assert_eq!(world.item_count(), 1);

        // Unknown and already-removed ids are silent no-ops.
        assert!(world.remove_item(ItemId(7)).is_none());
        assert!(world.remove_item(ItemId(99)).is_none());
        assert_eq!(world.item_count(), 1);
    }

    #[test]
    fn put_back_restores_slot() {
        let mut world = WorldModel::from_scene(&room()).unwrap();
        let before = world.drawables();

        let removed = world.take_item(ItemId(7)).unwrap();
        world.put_back(removed).unwrap();

        assert_eq!(world.drawables(), before);
        assert!(world.item_at(Position::new(2, 2)).is_some());
    }

    #[test]
    fn rejects_bad_payloads() {
        let mut scene = room();
        scene.tiles.push(TileSpec::new(-1, 2, "torch_mount"));
        assert!(matches!(
            WorldModel::from_scene(&scene),
            Err(SceneError::UnknownTileKind { .. })
        ));

        let mut scene = room();
        scene.tiles.push(TileSpec::new(0, 0, "wall"));
        assert_eq!(
            WorldModel::from_scene(&scene).unwrap_err(),
            SceneError::DuplicateTile(Position::new(0, 0))
        );

        let mut scene = room();
        let mut clone = scene.items[0].clone();
        clone.position_x = 0;
        scene.items.push(clone);
        assert_eq!(
            WorldModel::from_scene(&scene).unwrap_err(),
            SceneError::DuplicateItem(ItemId(7))
        );

        let mut scene = room();
        let mut stacked = scene.items[0].clone();
        stacked.id = 8;
        scene.items.push(stacked);
        assert!(matches!(
            WorldModel::from_scene(&scene),
            Err(SceneError::CellOccupied { .. })
        ));
    }

    #[test]
    fn drawables_follow_depth_then_placement() {
        let world = WorldModel::from_scene(&room()).unwrap();
        let drawables = world.drawables();

        assert_eq!(drawables.len(), world.tile_count() + world.item_count());
        assert!(
            drawables
                .windows(2)
                .all(|pair| pair[0].depth_key <= pair[1].depth_key)
        );

        // Depth 1: tiles (0,1) and (1,0) in placement order, then the barrel at (1,0).
        let depth_one: Vec<_> = drawables
            .iter()
            .filter(|drawable| drawable.depth_key == 1)
            .map(|drawable| drawable.kind)
            .collect();
        assert_eq!(
            depth_one,
            [
                DrawableKind::Tile(TileKind::Floor),
                DrawableKind::Tile(TileKind::Floor),
                DrawableKind::Item(ItemId(3)),
            ]
        );
    }
}
