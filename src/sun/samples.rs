use crate::Vector;

/// One (altitude, azimuth) frame of the analyzed day, in radians.
///
/// Supplied by the host's sun settings; values are not validated here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunFrame {
    pub altitude: f64,
    pub azimuth: f64,
}

impl SunFrame {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }
}

/// A sun direction at a sampled instant of the analyzed day.
#[derive(Debug, Clone, Copy)]
pub struct SunSample {
    /// Position in the day's sweep; 0 = earliest sampled time.
    pub index: usize,
    pub altitude: f64,
    pub azimuth: f64,
    /// Unit vector pointing toward the sun.
    pub direction: Vector,
}

/// Converts altitude/azimuth (radians) into a direction vector pointing
/// toward the sun.
///
/// Convention: azimuth measured from north (+Y), clockwise; east = +X.
/// The result is a unit vector by the trigonometric identity, but
/// callers normalize defensively before casting rays.
pub fn sun_vector(altitude: f64, azimuth: f64) -> Vector {
    Vector::new(
        altitude.cos() * azimuth.sin(),
        altitude.cos() * azimuth.cos(),
        altitude.sin(),
    )
}

/// Converts a day's frames into time-ordered sun samples.
///
/// Index 0 is the earliest sampled time. An empty input yields an empty
/// sequence; the analysis rejects that upstream as invalid input.
pub fn sample_sun_vectors(frames: &[SunFrame]) -> Vec<SunSample> {
    frames
        .iter()
        .enumerate()
        .map(|(index, frame)| SunSample {
            index,
            altitude: frame.altitude,
            azimuth: frame.azimuth,
            direction: sun_vector(frame.altitude, frame.azimuth),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_unit_norm_across_input_range() {
        // Altitude in [-pi/2, pi/2], azimuth in [0, 2*pi)
        let mut alt = -FRAC_PI_2;
        while alt <= FRAC_PI_2 {
            let mut az = 0.0;
            while az < 2.0 * PI {
                let v = sun_vector(alt, az);
                assert!(
                    (v.length() - 1.0).abs() < 1e-9,
                    "Not a unit vector for alt={alt}, az={az}"
                );
                az += 0.37;
            }
            alt += 0.31;
        }
    }

    #[test]
    fn test_zenith_and_horizon() {
        // Sun at zenith points straight up
        let v = sun_vector(FRAC_PI_2, 0.0);
        assert!((v.dz - 1.0).abs() < 1e-9);
        // Sun on the horizon due north points along +Y
        let v = sun_vector(0.0, 0.0);
        assert!((v.dy - 1.0).abs() < 1e-9);
        assert!(v.dz.abs() < 1e-9);
        // Due east points along +X
        let v = sun_vector(0.0, FRAC_PI_2);
        assert!((v.dx - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_ordering_and_length() {
        let frames: Vec<SunFrame> = (0..11)
            .map(|i| SunFrame::new(0.1 + 0.05 * i as f64, 1.0 + 0.2 * i as f64))
            .collect();
        let samples = sample_sun_vectors(&frames);
        assert_eq!(samples.len(), 11);
        for (i, s) in samples.iter().enumerate() {
            assert_eq!(s.index, i);
            assert_eq!(s.altitude, frames[i].altitude);
            assert_eq!(s.azimuth, frames[i].azimuth);
            assert!((s.direction.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_input_yields_empty_sequence() {
        assert!(sample_sun_vectors(&[]).is_empty());
    }
}
