use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest band on the IELTS scale.
pub const MIN_BAND: f64 = 1.0;
/// Highest band on the IELTS scale.
pub const MAX_BAND: f64 = 9.0;

/// Calibration table mapping normalized scores to bands.
///
/// Entries are (inclusive lower bound, band) in descending order; scores
/// below the last bound map to [`MIN_BAND`]. All four dimensions share
/// this single table, so any change here shifts every reported band.
pub const BAND_THRESHOLDS: [(f64, f64); 16] = [
    (0.95, 9.0),
    (0.88, 8.5),
    (0.82, 8.0),
    (0.78, 7.5),
    (0.72, 7.0),
    (0.68, 6.5),
    (0.62, 6.0),
    (0.58, 5.5),
    (0.52, 5.0),
    (0.48, 4.5),
    (0.42, 4.0),
    (0.38, 3.5),
    (0.32, 3.0),
    (0.28, 2.5),
    (0.22, 2.0),
    (0.18, 1.5),
];

/// An IELTS band score, always a whole or half point in 1.0..=9.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Band(f64);

impl Band {
    /// Maps a normalized score in [0, 1] onto the band lattice.
    pub fn from_score(score: f64) -> Band {
        for &(bound, band) in BAND_THRESHOLDS.iter() {
            if score >= bound {
                return Band(band);
            }
        }
        Band(MIN_BAND)
    }

    /// Rounds an arithmetic mean of bands to the nearest half point.
    pub fn from_mean(mean: f64) -> Band {
        Band((mean * 2.0).round() / 2.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whole-band part, used for descriptor lookup (6.5 -> 6).
    pub fn floor(self) -> u8 {
        self.0.floor() as u8
    }
}

impl fmt::Display for Band {
    /// Whole bands print without a decimal (7, not 7.0); half bands as 7.5.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{:.1}", self.0)
        }
    }
}
