//! Single-step movement check used by character movement and pathing.

use crate::grid::{Cell, Direction};
use crate::map::MapData;
use crate::passability::Passability;

/// Returns true if an entity on `from` may step one cell in `direction`.
///
/// The step needs the destination on the map, the source edge open in
/// `direction` and the destination edge open in the reverse direction.
pub fn can_pass<M, P>(map: &M, passability: &P, from: Cell, direction: Direction) -> bool
where
    M: MapData,
    P: Passability,
{
    let Some(to) = map.geometry().wrap(from.step(direction)) else {
        return false;
    };
    passability.is_passable(map, from, direction)
        && passability.is_passable(map, to, direction.reverse())
}
