//! Island manager configuration and physics materials.
//!
//! Every struct deserializes from a partial JS object or JSON document: missing
//! fields fall back to their `Default`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::ContainerId;
use crate::manager::MaterialId;

/// Velocity thresholds below which a body is considered at rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SleepThresholds {
    /// Linear speed threshold (default: 1.0)
    pub linear: f32,

    /// Angular speed threshold (default: 0.05)
    pub angular: f32,

    /// Consecutive resting updates before the island sleeps (default: 4)
    pub counter_threshold: u32,
}

impl Default for SleepThresholds {
    fn default() -> Self {
        Self {
            linear: 1.0,
            angular: 0.05,
            counter_threshold: 4,
        }
    }
}

impl SleepThresholds {
    /// Component-wise minimum, the strictest of both.
    pub fn min(self, other: Self) -> Self {
        Self {
            linear: self.linear.min(other.linear),
            angular: self.angular.min(other.angular),
            counter_threshold: self.counter_threshold.min(other.counter_threshold),
        }
    }
}

/// Sleep related properties of a physics material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsMaterial {
    /// Thresholds for bodies using this material.
    pub sleep: SleepThresholds,

    /// Keep every island touching a body of this material awake.
    pub never_sleep: bool,
}

/// Material lookup by id.
#[derive(Debug, Clone, Default)]
pub struct PhysicsMaterials {
    materials: HashMap<MaterialId, PhysicsMaterial>,
}

impl PhysicsMaterials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a material.
    pub fn insert(&mut self, id: MaterialId, material: PhysicsMaterial) -> Option<PhysicsMaterial> {
        self.materials.insert(id, material)
    }

    pub fn remove(&mut self, id: MaterialId) -> Option<PhysicsMaterial> {
        self.materials.remove(&id)
    }

    pub fn get(&self, id: MaterialId) -> Option<&PhysicsMaterial> {
        self.materials.get(&id)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Configuration of an [`IslandManager`](crate::manager::IslandManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IslandManagerConfig {
    /// Islands with at most this many edges are not colored (default: 0)
    pub min_color_edges: u32,

    /// Thresholds for bodies without a material
    pub default_sleep: SleepThresholds,

    /// Compute levels and colors during `update_islands` (default: false)
    pub levels_and_colors: bool,

    /// Containers analyzed when `levels_and_colors` is set
    pub solver_containers: Vec<ContainerId>,
}

impl Default for IslandManagerConfig {
    fn default() -> Self {
        Self {
            min_color_edges: 0,
            default_sleep: SleepThresholds::default(),
            levels_and_colors: false,
            solver_containers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = SleepThresholds::default();
        assert_eq!(thresholds.linear, 1.0);
        assert_eq!(thresholds.angular, 0.05);
        assert_eq!(thresholds.counter_threshold, 4);
    }

    #[test]
    fn test_thresholds_min() {
        let strict = SleepThresholds {
            linear: 0.5,
            angular: 0.1,
            counter_threshold: 10,
        };
        let combined = SleepThresholds::default().min(strict);
        assert_eq!(combined.linear, 0.5);
        assert_eq!(combined.angular, 0.05);
        assert_eq!(combined.counter_threshold, 4);
    }

    #[test]
    fn test_materials() {
        let mut materials = PhysicsMaterials::new();
        assert!(materials.is_empty());

        let ice = PhysicsMaterial {
            never_sleep: true,
            ..Default::default()
        };
        assert!(materials.insert(MaterialId(1), ice).is_none());
        assert_eq!(materials.len(), 1);
        assert!(materials.get(MaterialId(1)).unwrap().never_sleep);
        assert!(materials.get(MaterialId(2)).is_none());
        assert_eq!(materials.remove(MaterialId(1)), Some(ice));
    }
}
