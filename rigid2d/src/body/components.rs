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
//! Scalar body attributes: mass and display colour

use rand::Rng;

/// Mass of a body in kilograms
///
/// Always strictly positive and finite. Immovable bodies are modelled by
/// pinning, not by a zero mass.
///
/// # Examples
///
/// ```
/// use rigid2d::body::Mass;
///
/// let mass = Mass::new(2.0);
/// assert_eq!(mass.inverse(), 0.5);
/// assert!(Mass::try_new(0.0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mass {
    value: f64,
}

impl Mass {
    /// Create a new mass with the given value in kilograms
    ///
    /// # Panics
    ///
    /// Panics if the mass is not positive or not finite. For fallible
    /// construction, use `try_new`.
    pub fn new(value: f64) -> Self {
        assert!(value > 0.0 && value.is_finite(), "Mass must be positive and finite");
        Mass { value }
    }

    /// Try to create a new mass with the given value in kilograms
    ///
    /// Returns `None` if the value is zero, negative, NaN or infinite.
    pub fn try_new(value: f64) -> Option<Self> {
        if value > 0.0 && value.is_finite() {
            Some(Mass { value })
        } else {
            None
        }
    }

    /// Get the mass value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Get the inverse mass (1/m)
    pub fn inverse(&self) -> f64 {
        1.0 / self.value
    }
}

impl Default for Mass {
    fn default() -> Self {
        Mass::new(1.0)
    }
}

/// RGB display colour
///
/// Not used by the simulation itself; carried for the render side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Lowest channel value produced by [`Color::random`]
    pub const RANDOM_CHANNEL_MIN: u8 = 128;

    /// Create a colour from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Random pastel colour, every channel in `128..=255`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Color {
            r: rng.gen_range(Self::RANDOM_CHANNEL_MIN..=u8::MAX),
            g: rng.gen_range(Self::RANDOM_CHANNEL_MIN..=u8::MAX),
            b: rng.gen_range(Self::RANDOM_CHANNEL_MIN..=u8::MAX),
        }
    }
}
