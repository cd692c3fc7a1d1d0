//! Lock-free hand-off of target positions to the frame loop.
//!
//! The classification side builds a complete [`SceneTargets`] off the frame
//! thread and publishes it with a single atomic pointer swap. The frame loop
//! loads whatever is current once per frame; it never waits and never sees a
//! partially written buffer.

use crate::color::Rgb;
use crate::gesture::{Gesture, Shape};
use arc_swap::{ArcSwap, Guard};
use std::sync::Arc;
use thiserror::Error;

/// Target positions for one shape/expansion pair. Immutable once built.
#[derive(Debug)]
pub struct TargetField {
    positions: Vec<f32>,
    pub shape: Shape,
    pub expansion: f32,
}

impl TargetField {
    pub fn new(positions: Vec<f32>, shape: Shape, expansion: f32) -> Self {
        Self {
            positions,
            shape,
            expansion,
        }
    }

    /// All particles at the origin.
    pub fn zeroed(particle_count: usize) -> Self {
        Self::new(vec![0.0; particle_count * 3], Shape::Sphere, 0.0)
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Everything the animator follows: positions, color and the gesture label.
#[derive(Clone, Debug)]
pub struct SceneTargets {
    pub field: Arc<TargetField>,
    pub color: Rgb,
    pub gesture: Gesture,
    /// Bumped on every publish; 0 is the startup placeholder.
    pub generation: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("target buffer holds {got} floats, expected {expected}")]
    LengthMismatch { expected: usize, got: usize },
}

/// Shared slot holding the current [`SceneTargets`].
pub struct TargetSlot {
    particle_count: usize,
    current: ArcSwap<SceneTargets>,
}

impl TargetSlot {
    pub fn new(particle_count: usize) -> Self {
        let initial = SceneTargets {
            field: Arc::new(TargetField::zeroed(particle_count)),
            color: Rgb::WHITE,
            gesture: Gesture::None,
            generation: 0,
        };
        Self {
            particle_count,
            current: ArcSwap::from_pointee(initial),
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Lock-free snapshot of the current targets.
    pub fn load(&self) -> Guard<Arc<SceneTargets>> {
        self.current.load()
    }

    /// Owned snapshot, for holders that outlive a frame.
    pub fn snapshot(&self) -> Arc<SceneTargets> {
        self.current.load_full()
    }

    /// Replace the current targets in one swap.
    pub fn publish(&self, targets: SceneTargets) -> Result<(), TargetError> {
        let expected = self.particle_count * 3;
        let got = targets.field.positions().len();
        if got != expected {
            return Err(TargetError::LengthMismatch { expected, got });
        }
        self.current.store(Arc::new(targets));
        Ok(())
    }
}
