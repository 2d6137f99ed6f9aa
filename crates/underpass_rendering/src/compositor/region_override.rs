//! Front routing for underpass and blocked regions.

use underpass_core::{MapData, RegionClassifier};

use super::{push_table_edge, BaselineCompositor, TileCompositor};
use crate::draw_list::CellPlan;
use crate::sink::LayerKind;
use crate::stack_reader::CellSample;

/// Sends the whole tile stack of underpass and blocked cells over characters.
///
/// Lower list: shadow, then the table edge if any.
/// Upper list: layers 0..3 in order.
///
/// Both lists repaint on new animation frames when layer 0 is animated, since
/// the animated tile now lives in the upper list. Normal cells are planned by
/// the fallback, untouched.
#[derive(Clone, Debug)]
pub struct RegionOverrideCompositor<B = BaselineCompositor> {
    classifier: RegionClassifier,
    fallback: B,
}

impl RegionOverrideCompositor<BaselineCompositor> {
    /// Creates an override over the baseline strategy.
    #[must_use]
    pub fn new(classifier: RegionClassifier) -> Self {
        Self::with_fallback(classifier, BaselineCompositor)
    }
}

impl<B: TileCompositor> RegionOverrideCompositor<B> {
    /// Creates an override with an explicit fallback for normal cells.
    #[must_use]
    pub fn with_fallback(classifier: RegionClassifier, fallback: B) -> Self {
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

    /// Returns the fallback strategy.
    #[must_use]
    pub fn fallback(&self) -> &B {
        &self.fallback
    }
}

impl<B: TileCompositor> TileCompositor for RegionOverrideCompositor<B> {
    fn plan<M: MapData>(&self, map: &M, sample: &CellSample, plan: &mut CellPlan) {
        if !self.classifier.classify(sample.region).is_front_routed() {
            self.fallback.plan(map, sample, plan);
            return;
        }

        for tile in sample.stack.layers {
            plan.push_tile(LayerKind::Upper, tile);
        }

        plan.push_shadow(sample.stack.shadow);
        push_table_edge(map.tileset_flags(), sample, &mut plan.lower);

        let animated = sample.base_tile().is_a1();
        plan.lower.animated = animated;
        plan.upper.animated = animated;
    }
}
