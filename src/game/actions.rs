//! # Action Boundary
//!
//! The contract between input handling and the core: input produces
//! movement deltas, and this layer validates the destination (bounds, tile
//! walkability, blocking entities) before an entity is actually moved.
//! Entities themselves never validate — see [`crate::game::Entity::walk`].

use crate::game::map::GameMap;
use crate::game::EntityId;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// An intent produced by input handling for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Move by `(dx, dy)`
    Move { dx: i32, dy: i32 },
    /// Spend the turn doing nothing
    Wait,
}

/// Applies an action for the given actor, validating it against the map.
///
/// Moves are rejected with [`DelveError::InvalidAction`] when the
/// destination is out of bounds, not walkable, or occupied by a blocking
/// entity; the actor is left where it was. Destinations are never clamped —
/// a rejected move is a signal the caller should see, not paper over.
pub fn apply(map: &mut GameMap, actor: EntityId, action: Action) -> DelveResult<()> {
    let (dx, dy) = match action {
        Action::Wait => return Ok(()),
        Action::Move { dx, dy } => (dx, dy),
    };

    let (x, y) = map
        .entity(actor)
        .ok_or_else(|| DelveError::InvalidAction(format!("no such entity: {actor}")))?
        .position();
    let (dest_x, dest_y) = (x + dx, y + dy);

    if !map.in_bounds(dest_x, dest_y) {
        return Err(DelveError::InvalidAction(format!(
            "destination ({dest_x}, {dest_y}) is out of bounds"
        )));
    }
    if !map.is_walkable(dest_x, dest_y) {
        return Err(DelveError::InvalidAction(format!(
            "destination ({dest_x}, {dest_y}) is not walkable"
        )));
    }
    if let Some((_, blocker)) = map.blocking_entity_at(dest_x, dest_y) {
        return Err(DelveError::InvalidAction(format!(
            "destination ({dest_x}, {dest_y}) is blocked by {}",
            blocker.name
        )));
    }

    map.entity_mut(actor)
        .ok_or_else(|| DelveError::InvalidAction(format!("no such entity: {actor}")))?
        .walk(dx, dy);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::templates;
    use crate::game::tiles::FLOOR;

    fn open_map(width: i32, height: i32) -> GameMap {
        let mut map = GameMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set_tile(x, y, FLOOR).unwrap();
            }
        }
        map
    }

    #[test]
    fn test_valid_move() {
        let mut map = open_map(5, 5);
        let player = templates::player().spawn(&mut map, 2, 2);

        apply(&mut map, player, Action::Move { dx: 1, dy: 0 }).unwrap();
        assert_eq!(map.entity(player).unwrap().position(), (3, 2));
    }

    #[test]
    fn test_move_rejected_out_of_bounds() {
        let mut map = open_map(5, 5);
        let player = templates::player().spawn(&mut map, 0, 0);

        let result = apply(&mut map, player, Action::Move { dx: -1, dy: 0 });
        assert!(matches!(result, Err(DelveError::InvalidAction(_))));
        assert_eq!(map.entity(player).unwrap().position(), (0, 0));
    }

    #[test]
    fn test_move_rejected_into_wall() {
        let mut map = GameMap::new(5, 5);
        map.set_tile(2, 2, FLOOR).unwrap();
        let player = templates::player().spawn(&mut map, 2, 2);

        let result = apply(&mut map, player, Action::Move { dx: 0, dy: 1 });
        assert!(result.is_err());
        assert_eq!(map.entity(player).unwrap().position(), (2, 2));
    }

    #[test]
    fn test_move_rejected_by_blocking_entity() {
        let mut map = open_map(5, 5);
        let player = templates::player().spawn(&mut map, 2, 2);
        templates::orc().spawn(&mut map, 3, 2);

        let result = apply(&mut map, player, Action::Move { dx: 1, dy: 0 });
        assert!(result.is_err());
        assert_eq!(map.entity(player).unwrap().position(), (2, 2));
    }

    #[test]
    fn test_wait_is_a_no_op() {
        let mut map = open_map(5, 5);
        let player = templates::player().spawn(&mut map, 2, 2);

        apply(&mut map, player, Action::Wait).unwrap();
        assert_eq!(map.entity(player).unwrap().position(), (2, 2));
    }
}
