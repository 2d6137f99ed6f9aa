//! # Frame Loop
//!
//! Orchestrates one map scene:
//! ```text
//! Frame N:
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │ 1. LOGIC TICK                                                       │
//! │    └─ Resolve queued steps through can_pass (PassabilityOracle)     │
//! │                                                                     │
//! │ 2. CLOCK                                                            │
//! │    └─ Advance the animation count                                   │
//! │                                                                     │
//! │ 3. RENDER TICK                                                      │
//! │    ├─ TilemapView::prepare decides whether a pass is due            │
//! │    ├─ The selected backend paints every visible slot                │
//! │    └─ Layer placement for the current scroll origin                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Movement always settles before compositing, so a frame never paints a
//! character on a cell the same frame's logic refused.

use std::collections::VecDeque;

use underpass_core::{can_pass, Cell, Direction, MapData, PassabilityOracle};
use underpass_rendering::{FramePass, PaintStats, TilemapView, Viewport};

use crate::system::{Backend, Presentation, Renderer, UnderpassSystem};

/// Configuration for the frame loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct GameLoopConfig {
    /// Screen and tile geometry.
    pub viewport: Viewport,
    /// Which backend paints.
    pub backend: Backend,
}

/// A character standing on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Character {
    /// Current cell.
    pub position: Cell,
    /// Facing.
    pub direction: Direction,
}

impl Character {
    /// Creates a character facing down.
    #[must_use]
    pub const fn new(position: Cell) -> Self {
        Self {
            position,
            direction: Direction::Down,
        }
    }
}

/// What happened to one queued step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The character moved.
    Moved {
        /// Character index.
        character: usize,
        /// Cell it left.
        from: Cell,
        /// Cell it entered.
        to: Cell,
    },
    /// The step was refused; the character turned in place.
    Blocked {
        /// Character index.
        character: usize,
        /// Cell it stays on.
        at: Cell,
        /// Direction it tried.
        direction: Direction,
    },
    /// No character with that index.
    Unknown {
        /// The index requested.
        character: usize,
    },
}

/// Summary of one frame.
#[derive(Clone, Debug)]
pub struct FrameReport {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Step results in queue order.
    pub moves: Vec<MoveOutcome>,
    /// The repaint pass, if one was due.
    pub pass: Option<FramePass>,
    /// Paint counters of the pass.
    pub paint: Option<PaintStats>,
    /// Layer placement, updated every frame even without a repaint.
    pub presentation: Presentation,
}

impl FrameReport {
    /// Number of steps taken.
    #[must_use]
    pub fn moved(&self) -> usize {
        self.moves
            .iter()
            .filter(|m| matches!(m, MoveOutcome::Moved { .. }))
            .count()
    }

    /// Number of steps refused.
    #[must_use]
    pub fn blocked(&self) -> usize {
        self.moves
            .iter()
            .filter(|m| matches!(m, MoveOutcome::Blocked { .. }))
            .count()
    }
}

/// The frame loop of one map scene.
///
/// Owns the map, the characters, the passability oracle and the renderer.
#[derive(Debug)]
pub struct GameLoop<M> {
    map: M,
    passability: PassabilityOracle,
    view: TilemapView,
    renderer: Renderer,
    characters: Vec<Character>,
    pending: VecDeque<(usize, Direction)>,
    frame_count: u64,
}

impl<M: MapData> GameLoop<M> {
    /// Creates a loop over `map` using the components of `system`.
    #[must_use]
    pub fn new(system: &UnderpassSystem, map: M, config: GameLoopConfig) -> Self {
        Self {
            map,
            passability: system.passability(),
            view: TilemapView::new(config.viewport),
            renderer: system.renderer(config.backend, &config.viewport),
            characters: Vec::new(),
            pending: VecDeque::new(),
            frame_count: 0,
        }
    }

    /// The map.
    #[must_use]
    pub const fn map(&self) -> &M {
        &self.map
    }

    /// Swaps in a new map and drops everything painted from the old one.
    pub fn replace_map(&mut self, map: M) -> M {
        let old = std::mem::replace(&mut self.map, map);
        self.renderer.invalidate();
        self.view.refresh();
        tracing::debug!("map replaced; full repaint queued");
        old
    }

    /// The renderer.
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The tilemap view.
    #[must_use]
    pub const fn view(&self) -> &TilemapView {
        &self.view
    }

    /// Characters on the map.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Places a character and returns its index.
    pub fn spawn(&mut self, position: Cell) -> usize {
        self.characters.push(Character::new(position));
        self.characters.len() - 1
    }

    /// Queues a one-cell step for the next logic tick.
    pub fn queue_move(&mut self, character: usize, direction: Direction) {
        self.pending.push_back((character, direction));
    }

    /// Scrolls the view to pixel origin (`x`, `y`).
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.view.set_origin(x, y);
    }

    /// Runs one frame: logic, clock, then paint.
    pub fn tick(&mut self) -> FrameReport {
        self.frame_count += 1;
        let moves = self.logic_tick();
        self.view.update();
        let (pass, paint) = match self.view.prepare() {
            Some(pass) => (Some(pass), Some(self.render_tick(&pass))),
            None => (None, None),
        };

        FrameReport {
            frame: self.frame_count,
            moves,
            pass,
            paint,
            presentation: self.renderer.presentation(&self.view),
        }
    }

    fn logic_tick(&mut self) -> Vec<MoveOutcome> {
        let mut outcomes = Vec::with_capacity(self.pending.len());
        while let Some((index, direction)) = self.pending.pop_front() {
            let Some(character) = self.characters.get_mut(index) else {
                tracing::warn!(character = index, "step queued for unknown character");
                outcomes.push(MoveOutcome::Unknown { character: index });
                continue;
            };

            character.direction = direction;
            let from = character.position;
            let destination = self.map.geometry().wrap(from.step(direction));
            let outcome = match destination {
                Some(to) if can_pass(&self.map, &self.passability, from, direction) => {
                    character.position = to;
                    MoveOutcome::Moved {
                        character: index,
                        from,
                        to,
                    }
                }
                _ => {
                    tracing::trace!(character = index, x = from.x, y = from.y, ?direction, "step refused");
                    MoveOutcome::Blocked {
                        character: index,
                        at: from,
                        direction,
                    }
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    fn render_tick(&mut self, pass: &FramePass) -> PaintStats {
        match &mut self.renderer {
            Renderer::Raster {
                compositor,
                surface,
            } => compositor.paint_all(&self.map, surface, pass),
            Renderer::SceneGraph(scene) => scene.paint_all(&self.map, pass),
        }
    }
}
