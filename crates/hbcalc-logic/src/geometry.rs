//! Room geometry: mounting height, Room Cavity Index, aspect ratio.
//!
//! The Room Cavity Index (K) computed here is the index used by
//! manufacturer Uf tables. It is not the Room Cavity Ratio; the two are
//! not interchangeable.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Room dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomGeometry {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    /// Height of the working plane above the floor.
    pub working_plane_height: f64,
    /// Drop from the ceiling to the fixture.
    pub suspension_distance: f64,
}

impl RoomGeometry {
    /// Distance from the working plane up to the fixtures. Not checked for sign.
    pub fn mounting_height(&self) -> f64 {
        (self.height - self.working_plane_height) - self.suspension_distance
    }

    pub fn aspect_ratio(&self) -> f64 {
        aspect_ratio(self.length, self.width)
    }

    pub fn floor_area(&self) -> f64 {
        self.length * self.width
    }

    /// K for this room; fails when the fixtures would sit at or below the working plane.
    pub fn room_cavity_index(&self) -> Result<f64, CalcError> {
        room_cavity_index(
            self.length,
            self.width,
            self.height,
            self.working_plane_height,
            self.suspension_distance,
        )
    }
}

/// Room Cavity Index: `K = L·W / (h·(L + W))` with `h` the mounting height.
pub fn room_cavity_index(
    length: f64,
    width: f64,
    height: f64,
    working_plane_height: f64,
    suspension_distance: f64,
) -> Result<f64, CalcError> {
    let mounting_height = (height - working_plane_height) - suspension_distance;
    if mounting_height <= 0.0 {
        return Err(CalcError::InvalidGeometry { mounting_height });
    }
    Ok((length * width) / (mounting_height * (length + width)))
}

/// Length over width. At 1.0 or above, length is the long axis.
pub fn aspect_ratio(length: f64, width: f64) -> f64 {
    length / width
}
