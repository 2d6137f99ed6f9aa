//! # Map & Settings Constants
//!
//! Layer indices of the host map data and the recognized setting names.

// =============================================================================
// SETTINGS
// =============================================================================

/// Plugin name reported to the host's parameter registry.
pub const PLUGIN_NAME: &str = "UnderpassCeiling";

/// Version of the underpass rules.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Region id that becomes passable and drawn over characters.
pub const DEFAULT_UNDERPASS_REGION_ID: i32 = 252;

/// Region id that becomes impassable and drawn over characters.
pub const DEFAULT_BLOCKED_REGION_ID: i32 = 253;

/// Setting key for the underpass region id.
pub const UNDERPASS_KEY: &str = "underpassRegionId";

/// Host parameter label for the underpass region id.
pub const UNDERPASS_LABEL: &str = "Underpass Region ID";

/// Setting key for the blocked region id.
pub const BLOCKED_KEY: &str = "blockedRegionId";

/// Host parameter label for the blocked region id.
pub const BLOCKED_LABEL: &str = "Not Passable Region ID";

// =============================================================================
// MAP DATA LAYOUT
// =============================================================================

/// Number of stacked tile layers per cell.
pub const TILE_LAYERS: usize = 4;

/// Layer holding the autotile shadow bits.
pub const SHADOW_LAYER: usize = 4;

/// Layer holding the region id.
pub const REGION_LAYER: usize = 5;

/// Total number of layers stored per cell.
pub const MAP_LAYERS: usize = 6;
