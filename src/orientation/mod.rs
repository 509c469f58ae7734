// SPDX-License-Identifier: MPL-2.0
//! Orientation classification: a single stable 4-way screen-orientation state
//! fused from whatever signals the platform actually provides.
//!
//! The platform rarely offers one reliable answer. A dedicated orientation
//! status API may exist, a coarse portrait/landscape signal almost always
//! exists, and a raw tilt stream can fill in the primary/secondary half when
//! nothing else does. [`classifier::OrientationClassifier`] reconciles the
//! three; [`platform`] defines the capability seams they arrive through.

pub mod classifier;
pub mod platform;

pub use classifier::{Disposer, OrientationClassifier};

use std::fmt;

/// One of the four screen-orientation quadrants, or `Unknown` before any
/// signal has resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationKind {
    PortraitPrimary,
    PortraitSecondary,
    LandscapePrimary,
    LandscapeSecondary,
    Unknown,
}

/// The binary portrait/landscape alphabet of the coarse change signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarseFamily {
    Portrait,
    Landscape,
}

impl OrientationKind {
    /// Stable wire/display name, matching the conventional orientation-type
    /// strings (`portrait-primary`, `landscape-secondary`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            OrientationKind::PortraitPrimary => "portrait-primary",
            OrientationKind::PortraitSecondary => "portrait-secondary",
            OrientationKind::LandscapePrimary => "landscape-primary",
            OrientationKind::LandscapeSecondary => "landscape-secondary",
            OrientationKind::Unknown => "unknown",
        }
    }

    /// The portrait/landscape family this quadrant belongs to.
    /// `Unknown` belongs to neither.
    pub fn family(self) -> Option<CoarseFamily> {
        match self {
            OrientationKind::PortraitPrimary | OrientationKind::PortraitSecondary => {
                Some(CoarseFamily::Portrait)
            }
            OrientationKind::LandscapePrimary | OrientationKind::LandscapeSecondary => {
                Some(CoarseFamily::Landscape)
            }
            OrientationKind::Unknown => None,
        }
    }
}

impl fmt::Display for OrientationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CoarseFamily {
    /// The `-primary` quadrant of this family, the default guess when no
    /// finer signal is available.
    pub fn primary_quadrant(self) -> OrientationKind {
        match self {
            CoarseFamily::Portrait => OrientationKind::PortraitPrimary,
            CoarseFamily::Landscape => OrientationKind::LandscapePrimary,
        }
    }
}

/// Classifies a quadrant from raw tilt angles.
///
/// `beta` is the front-back tilt and `gamma` the left-right tilt, both in
/// degrees. An absent component yields `Unknown` (the event is unusable).
/// The dominant axis picks the family; the sign of that axis picks the
/// primary (positive) or secondary (zero/negative) quadrant.
pub fn infer_from_tilt(beta: Option<f64>, gamma: Option<f64>) -> OrientationKind {
    let (Some(beta), Some(gamma)) = (beta, gamma) else {
        return OrientationKind::Unknown;
    };
    if beta.abs() >= gamma.abs() {
        if beta > 0.0 {
            OrientationKind::PortraitPrimary
        } else {
            OrientationKind::PortraitSecondary
        }
    } else if gamma > 0.0 {
        OrientationKind::LandscapePrimary
    } else {
        OrientationKind::LandscapeSecondary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilt_forward_is_portrait_primary() {
        assert_eq!(
            infer_from_tilt(Some(45.0), Some(10.0)),
            OrientationKind::PortraitPrimary
        );
    }

    #[test]
    fn tilt_backward_is_portrait_secondary() {
        assert_eq!(
            infer_from_tilt(Some(-45.0), Some(10.0)),
            OrientationKind::PortraitSecondary
        );
    }

    #[test]
    fn tilt_right_is_landscape_primary() {
        assert_eq!(
            infer_from_tilt(Some(10.0), Some(45.0)),
            OrientationKind::LandscapePrimary
        );
    }

    #[test]
    fn tilt_left_is_landscape_secondary() {
        assert_eq!(
            infer_from_tilt(Some(10.0), Some(-45.0)),
            OrientationKind::LandscapeSecondary
        );
    }

    #[test]
    fn missing_component_is_unknown() {
        assert_eq!(infer_from_tilt(None, Some(5.0)), OrientationKind::Unknown);
        assert_eq!(infer_from_tilt(Some(5.0), None), OrientationKind::Unknown);
        assert_eq!(infer_from_tilt(None, None), OrientationKind::Unknown);
    }

    #[test]
    fn equal_magnitudes_prefer_portrait() {
        // |beta| >= |gamma| ties go to the portrait family.
        assert_eq!(
            infer_from_tilt(Some(30.0), Some(30.0)),
            OrientationKind::PortraitPrimary
        );
        assert_eq!(
            infer_from_tilt(Some(-30.0), Some(30.0)),
            OrientationKind::PortraitSecondary
        );
    }

    #[test]
    fn zero_beta_on_portrait_axis_is_secondary() {
        assert_eq!(
            infer_from_tilt(Some(0.0), Some(0.0)),
            OrientationKind::PortraitSecondary
        );
    }

    #[test]
    fn family_groups_quadrants() {
        assert_eq!(
            OrientationKind::PortraitSecondary.family(),
            Some(CoarseFamily::Portrait)
        );
        assert_eq!(
            OrientationKind::LandscapePrimary.family(),
            Some(CoarseFamily::Landscape)
        );
        assert_eq!(OrientationKind::Unknown.family(), None);
    }

    #[test]
    fn display_matches_orientation_type_strings() {
        assert_eq!(
            OrientationKind::LandscapeSecondary.to_string(),
            "landscape-secondary"
        );
        assert_eq!(OrientationKind::Unknown.to_string(), "unknown");
    }
}
