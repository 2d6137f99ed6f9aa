//! # Passability
//!
//! [`BaselinePassage`] is the host's passage rule. [`PassabilityOracle`]
//! overrides it for the two configured regions and delegates everything else.
//!
//! ## Baseline rule
//!
//! Candidates are the tile-graphic events on the cell, then layers 3, 2, 1, 0.
//! The first candidate that is not a star tile decides:
//!
//! ```text
//! flag & 0x10 != 0     skip (star tiles never affect passage)
//! flag & bit  == 0     passable
//! flag & bit  == bit   impassable
//! no candidate left    impassable
//! ```

use crate::grid::{Cell, Direction};
use crate::map::MapData;
use crate::region::{RegionClass, RegionClassifier};
use crate::tile::TileFlags;

/// Answers "may an entity cross the edge of `cell` facing `direction`".
pub trait Passability {
    /// Returns true if `cell` can be left or entered through its `direction` edge.
    fn is_passable<M: MapData>(&self, map: &M, cell: Cell, direction: Direction) -> bool;
}

/// The host's unmodified passage check.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselinePassage;

impl BaselinePassage {
    /// Checks `bit` against the candidates on `cell`.
    #[must_use]
    pub fn check_passage<M: MapData>(&self, map: &M, cell: Cell, bit: u16) -> bool {
        let flags = map.tileset_flags();

        let mut verdict = None;
        map.for_each_tile_event(cell, |tile| {
            if verdict.is_none() {
                verdict = passage_verdict(flags.get(tile), bit);
            }
        });
        if let Some(passable) = verdict {
            return passable;
        }

        (0..4)
            .rev()
            .find_map(|layer| passage_verdict(flags.get(map.tile_id(cell, layer)), bit))
            .unwrap_or(false)
    }
}

impl Passability for BaselinePassage {
    fn is_passable<M: MapData>(&self, map: &M, cell: Cell, direction: Direction) -> bool {
        self.check_passage(map, cell, direction.passage_bit())
    }
}

fn passage_verdict(flags: TileFlags, bit: u16) -> Option<bool> {
    if flags.is_higher() {
        None
    } else if flags.bits() & bit == 0 {
        Some(true)
    } else if flags.bits() & bit == bit {
        Some(false)
    } else {
        None
    }
}

/// Region-aware passability.
///
/// - Underpass cells are always passable, whatever the tiles say.
/// - Blocked cells are never passable.
/// - Everything else asks the fallback.
#[derive(Clone, Debug)]
pub struct PassabilityOracle<P = BaselinePassage> {
    classifier: RegionClassifier,
    fallback: P,
}

impl PassabilityOracle<BaselinePassage> {
    /// Creates an oracle over the host's baseline passage rule.
    #[must_use]
    pub fn new(classifier: RegionClassifier) -> Self {
        Self::with_fallback(classifier, BaselinePassage)
    }
}

impl<P: Passability> PassabilityOracle<P> {
    /// Creates an oracle with an explicit fallback for normal cells.
    #[must_use]
    pub fn with_fallback(classifier: RegionClassifier, fallback: P) -> Self {
        Self {
            classifier,
            fallback,
        }
    }

    /// Returns the classifier.
    #[must_use]
    pub fn classifier(&self) -> &RegionClassifier {
        &self.classifier
    }

    /// Returns the fallback used for normal cells.
    #[must_use]
    pub fn fallback(&self) -> &P {
        &self.fallback
    }
}

impl<P: Passability> Passability for PassabilityOracle<P> {
    fn is_passable<M: MapData>(&self, map: &M, cell: Cell, direction: Direction) -> bool {
        match self.classifier.classify(map.region_id(cell)) {
            RegionClass::Underpass => true,
            RegionClass::Blocked => false,
            RegionClass::Normal => self.fallback.is_passable(map, cell, direction),
        }
    }
}
