//! # UNDERPASS Core
//!
//! Map-side rules for ceiling underpasses:
//! - Region classification (`Normal`, `Underpass`, `Blocked`)
//! - One-shot configuration of the two repurposed region ids
//! - Passability override on top of the baseline passage check
//!
//! ## Rules
//!
//! 1. **Configuration is immutable** - parsed once, shared behind an `Arc`
//! 2. **Runtime checks are total** - every region id and tile value has an answer
//! 3. **Normal cells are untouched** - they always fall through to the baseline
//!
//! ## Example
//!
//! ```rust,ignore
//! use underpass_core::{RegionConfig, RegionClassifier, PassabilityOracle, Passability};
//!
//! let config = RegionConfig::from_toml_str("underpassRegionId = 252")?;
//! let oracle = PassabilityOracle::new(RegionClassifier::new(config.into()));
//! let open = oracle.is_passable(&map, cell, Direction::Up);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod map;
pub mod movement;
pub mod passability;
pub mod region;
pub mod tile;

pub use config::RegionConfig;
pub use error::{ConfigError, ConfigResult};
pub use grid::{Cell, Direction, MapGeometry};
pub use map::{GameMap, MapData, TileEvent};
pub use movement::can_pass;
pub use passability::{BaselinePassage, Passability, PassabilityOracle};
pub use region::{classify, RegionClass, RegionClassifier, RegionId};
pub use tile::{ShadowBits, TileFlags, TileId, TileStack, TilesetFlags};
