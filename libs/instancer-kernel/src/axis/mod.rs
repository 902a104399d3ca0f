//! Principal axis selection.
//!
//! Axis labels arrive as strings from hosts and preference files; they are
//! parsed once into [`Axis`] and the placers never branch on raw strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vec3::Vec3;

/// One of the three local/world principal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index (`X = 0`, `Y = 1`, `Z = 2`).
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::Axis;
    /// assert_eq!(Axis::Z.index(), 2);
    /// ```
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along this axis.
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    /// Lowercase label (`"x"`, `"y"`, `"z"`).
    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Returns `v` with the component for this axis negated.
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::{Axis, Vec3};
    /// let mirrored = Axis::Y.negate_component(Vec3::new(1.0, 2.0, 3.0));
    /// assert_eq!(mirrored, Vec3::new(1.0, -2.0, 3.0));
    /// ```
    pub fn negate_component(self, v: Vec3) -> Vec3 {
        let mut out = v;
        out[self.index()] = -v[self.index()];
        out
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when an axis label is not one of `x`, `y` or `z`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized axis '{0}' (expected x, y or z)")]
pub struct AxisParseError(pub String);

impl FromStr for Axis {
    type Err = AxisParseError;

    /// Parses a case-insensitive axis label, ignoring surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use instancer_kernel::Axis;
    /// assert_eq!(" Y ".parse::<Axis>().unwrap(), Axis::Y);
    /// assert!("w".parse::<Axis>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(AxisParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests;
