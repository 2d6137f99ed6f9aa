//! # System Initialization
//!
//! Reads the two region ids once and hands out the components that share
//! them. Nothing is constructed if a setting fails to parse.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::path::Path;
use std::sync::Arc;

use underpass_core::constants::{PLUGIN_NAME, PLUGIN_VERSION};
use underpass_core::{ConfigResult, PassabilityOracle, RegionConfig, RegionClassifier};
use underpass_rendering::{
    RasterCompositor, RegionOverrideCompositor, RingBlit, SceneGraphCompositor, TileGroups,
    TilemapView, Viewport,
};

/// Which tilemap backend paints the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Ring-buffer bitmaps with a per-slot change cache.
    #[default]
    Raster,
    /// Retained quad groups rebuilt on every repaint.
    SceneGraph,
}

/// Where the painted layers land on screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Four copies that unwrap the raster ring buffer.
    Ring([RingBlit; 4]),
    /// Screen position of both scene graph groups.
    Offset {
        /// Horizontal offset in pixels.
        x: i32,
        /// Vertical offset in pixels.
        y: i32,
    },
}

/// A backend with the region override installed and its surface attached.
#[derive(Debug, Clone)]
pub enum Renderer {
    /// Cached raster backend painting into its layer surface.
    Raster {
        /// The compositor and its cache.
        compositor: RasterCompositor<RegionOverrideCompositor>,
        /// The two layer surfaces.
        surface: TileGroups,
    },
    /// Uncached scene graph backend.
    SceneGraph(SceneGraphCompositor<RegionOverrideCompositor>),
}

impl Renderer {
    /// The backend kind.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Raster { .. } => Backend::Raster,
            Self::SceneGraph(_) => Backend::SceneGraph,
        }
    }

    /// The quads currently on screen, lower and upper.
    #[must_use]
    pub fn groups(&self) -> &TileGroups {
        match self {
            Self::Raster { surface, .. } => surface,
            Self::SceneGraph(scene) => scene.groups(),
        }
    }

    /// How the layers are placed for the current scroll origin of `view`.
    #[must_use]
    pub fn presentation(&self, view: &TilemapView) -> Presentation {
        let (origin_x, origin_y) = view.origin();
        match self {
            Self::Raster { .. } => {
                Presentation::Ring(view.viewport().ring_blits(origin_x, origin_y))
            }
            Self::SceneGraph(scene) => {
                let (x, y) = scene.group_offset(origin_x, origin_y);
                Presentation::Offset { x, y }
            }
        }
    }

    /// Drops everything cached about the map.
    pub fn invalidate(&mut self) {
        match self {
            Self::Raster {
                compositor,
                surface,
            } => compositor.invalidate(surface),
            Self::SceneGraph(_) => {}
        }
    }
}

/// Shared region configuration plus component factories.
#[derive(Debug, Clone)]
pub struct UnderpassSystem {
    config: Arc<RegionConfig>,
    classifier: RegionClassifier,
}

impl UnderpassSystem {
    /// Initializes from the host's string parameters.
    ///
    /// # Errors
    ///
    /// Returns the configuration error if either id is present but not an
    /// integer.
    pub fn initialize<S: BuildHasher>(params: &HashMap<String, String, S>) -> ConfigResult<Self> {
        RegionConfig::from_parameters(params).map(Self::with_config)
    }

    /// Initializes from a TOML settings document.
    ///
    /// # Errors
    ///
    /// Returns the configuration error for malformed TOML or non-integer ids.
    pub fn from_toml_str(document: &str) -> ConfigResult<Self> {
        RegionConfig::from_toml_str(document).map(Self::with_config)
    }

    /// Initializes from a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns the configuration error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        RegionConfig::load(path).map(Self::with_config)
    }

    /// Builds the system around an already validated configuration.
    #[must_use]
    pub fn with_config(config: RegionConfig) -> Self {
        tracing::info!("{} v{} ready", PLUGIN_NAME, PLUGIN_VERSION);
        let config = Arc::new(config);
        Self {
            classifier: RegionClassifier::new(Arc::clone(&config)),
            config,
        }
    }

    /// The configuration shared by every component.
    #[must_use]
    pub fn config(&self) -> &Arc<RegionConfig> {
        &self.config
    }

    /// A classifier sharing the configuration.
    #[must_use]
    pub fn classifier(&self) -> RegionClassifier {
        self.classifier.clone()
    }

    /// Passability with the region override over the baseline rule.
    #[must_use]
    pub fn passability(&self) -> PassabilityOracle {
        PassabilityOracle::new(self.classifier())
    }

    /// Compositing strategy with the region override over the baseline routing.
    #[must_use]
    pub fn compositor(&self) -> RegionOverrideCompositor {
        RegionOverrideCompositor::new(self.classifier())
    }

    /// A cached raster compositor for `viewport`.
    #[must_use]
    pub fn raster(&self, viewport: &Viewport) -> RasterCompositor<RegionOverrideCompositor> {
        RasterCompositor::new(self.compositor(), viewport)
    }

    /// A scene graph compositor for `viewport`.
    #[must_use]
    pub fn scene_graph(&self, viewport: &Viewport) -> SceneGraphCompositor<RegionOverrideCompositor> {
        SceneGraphCompositor::new(self.compositor(), viewport)
    }

    /// A backend with its surface, ready to paint.
    #[must_use]
    pub fn renderer(&self, backend: Backend, viewport: &Viewport) -> Renderer {
        match backend {
            Backend::Raster => Renderer::Raster {
                compositor: self.raster(viewport),
                surface: TileGroups::new(viewport.tile_width, viewport.tile_height),
            },
            Backend::SceneGraph => Renderer::SceneGraph(self.scene_graph(viewport)),
        }
    }
}

impl Default for UnderpassSystem {
    fn default() -> Self {
        Self::with_config(RegionConfig::default())
    }
}
