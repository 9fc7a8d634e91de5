// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Simulation and pipeline configuration
//!
//! Configuration structs provide defaults matching the reference setup and
//! builder-style setters. Call `validate` before use, or let the consuming
//! constructor do it.

use crate::collision::{ExactTest, SweepAxis};
use crate::integration::STANDARD_GRAVITY;
use crate::math::Vec2;

/// Configuration for a [`Simulation`](crate::Simulation)
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Gravitational acceleration (default: 9.8 m/s² towards negative y)
    pub gravity: Vec2,
    /// Axis swept by the broad phase (default: X)
    pub sweep_axis: SweepAxis,
    /// Test applied after the bounding-circle rejection
    pub exact_test: ExactTest,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravity: Vec2::new(0.0, -STANDARD_GRAVITY),
            sweep_axis: SweepAxis::X,
            exact_test: ExactTest::default(),
        }
    }
}

impl SimulationConfig {
    /// Set the gravitational acceleration
    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set the broad-phase sweep axis
    pub fn with_sweep_axis(mut self, axis: SweepAxis) -> Self {
        self.sweep_axis = axis;
        self
    }

    /// Set the exact narrow-phase test
    pub fn with_exact_test(mut self, exact_test: ExactTest) -> Self {
        self.exact_test = exact_test;
        self
    }

    /// Check the configuration for unusable values
    pub fn validate(&self) -> Result<(), String> {
        if !self.gravity.is_valid() {
            return Err(format!("Gravity {:?} must be finite", self.gravity));
        }
        Ok(())
    }
}

/// Configuration for a [`FramePipeline`](crate::pipeline::FramePipeline)
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Multiplier from measured wall-clock frame time to simulated time
    pub time_scale: f64,
    /// Name of the simulation thread
    pub thread_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            time_scale: 3.0,
            thread_name: "rigid2d-simulation".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Set the time scale
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Set the simulation thread name
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Check the configuration for unusable values
    pub fn validate(&self) -> Result<(), String> {
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(format!(
                "Time scale {} must be non-negative and finite",
                self.time_scale
            ));
        }
        if self.thread_name.is_empty() {
            return Err("Thread name must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.gravity, Vec2::new(0.0, -9.8));
        assert_eq!(config.sweep_axis, SweepAxis::X);
        assert_eq!(config.exact_test, ExactTest::SeparatingAxis);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_simulation_builders() {
        let config = SimulationConfig::default()
            .with_gravity(Vec2::new(1.0, 0.0))
            .with_sweep_axis(SweepAxis::Y)
            .with_exact_test(ExactTest::AlwaysOverlap);
        assert_eq!(config.gravity, Vec2::new(1.0, 0.0));
        assert_eq!(config.sweep_axis, SweepAxis::Y);
        assert_eq!(config.exact_test, ExactTest::AlwaysOverlap);
    }

    #[test]
    fn test_simulation_rejects_nan_gravity() {
        let config = SimulationConfig::default().with_gravity(Vec2::new(f64::NAN, 0.0));
        assert!(config.validate().unwrap_err().contains("Gravity"));
    }

    #[test]
    fn test_pipeline_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.time_scale, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_validation() {
        assert!(PipelineConfig::default().with_time_scale(-1.0).validate().is_err());
        assert!(PipelineConfig::default().with_time_scale(f64::INFINITY).validate().is_err());
        assert!(PipelineConfig::default().with_thread_name("").validate().is_err());
        assert!(PipelineConfig::default().with_time_scale(0.0).validate().is_ok());
    }
}
