//! # UNDERPASS
//!
//! Ceiling regions that characters can walk under.
//!
//! Two region ids are repurposed on every map:
//!
//! - **underpass**: always walkable, and the whole tile stack is drawn over
//!   characters, so a roof hides whoever walks beneath it
//! - **blocked**: never walkable, drawn over characters like the underpass,
//!   used to fence the corridor in
//!
//! Every other cell behaves exactly as the host tilemap would.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           UNDERPASS                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │                                                                     │
//! │  settings ──► UnderpassSystem ──► Arc<RegionConfig>                 │
//! │                     │                                               │
//! │        ┌────────────┴─────────────┐                                 │
//! │        ▼                          ▼                                 │
//! │  PassabilityOracle        RegionOverrideCompositor                  │
//! │  (underpass_core)         (underpass_rendering)                     │
//! │        │                          │                                 │
//! │        └──────────► GameLoop ◄────┘                                 │
//! │              logic tick, then paint                                 │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `system`: initialization and component construction
//! - `game_loop`: frame orchestration

pub mod game_loop;
pub mod system;

pub use underpass_core as core;
pub use underpass_rendering as rendering;

pub use game_loop::{Character, FrameReport, GameLoop, GameLoopConfig, MoveOutcome};
pub use system::{Backend, Presentation, Renderer, UnderpassSystem};
