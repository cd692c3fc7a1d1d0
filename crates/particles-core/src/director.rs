//! Entry point that turns classification results into published targets.

use crate::gesture::GestureState;
use crate::shapes::ShapeGenerator;
use crate::targets::{SceneTargets, TargetError, TargetField, TargetSlot};
use std::sync::Arc;

/// What [`TargetDirector::apply`] had to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Shape or expansion changed; a new position buffer was generated.
    Regenerated,
    /// Same shape and expansion; only color/gesture were republished.
    Reused,
}

/// Owns the [`ShapeGenerator`] and is the only writer of a [`TargetSlot`].
///
/// Runs off the frame thread: generation allocates and fills a full buffer,
/// then publishes it with one swap.
pub struct TargetDirector {
    slot: Arc<TargetSlot>,
    generator: ShapeGenerator,
    generation: u64,
}

impl TargetDirector {
    pub fn new(slot: Arc<TargetSlot>, generator: ShapeGenerator) -> Self {
        Self {
            slot,
            generator,
            generation: 0,
        }
    }

    pub fn slot(&self) -> &Arc<TargetSlot> {
        &self.slot
    }

    pub fn apply(&mut self, state: &GestureState) -> Result<ApplyOutcome, TargetError> {
        let current = self.slot.snapshot();
        let unchanged = current.generation > 0
            && current.field.shape == state.shape
            && current.field.expansion == state.expansion;

        let (field, outcome) = if unchanged {
            (Arc::clone(&current.field), ApplyOutcome::Reused)
        } else {
            let positions = self.generator.generate_vec(
                state.shape,
                state.expansion,
                self.slot.particle_count(),
            );
            let field = TargetField::new(positions, state.shape, state.expansion);
            (Arc::new(field), ApplyOutcome::Regenerated)
        };

        self.generation = self.generation.max(current.generation) + 1;
        self.slot.publish(SceneTargets {
            field,
            color: state.color,
            gesture: state.gesture,
            generation: self.generation,
        })?;

        log::info!(
            "[targets] gen={} gesture={} shape={} expansion={:.2} color={} ({:?})",
            self.generation,
            state.gesture,
            state.shape,
            state.expansion,
            state.color.to_hex(),
            outcome
        );
        Ok(outcome)
    }
}
