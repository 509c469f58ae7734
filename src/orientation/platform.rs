// SPDX-License-Identifier: MPL-2.0
//! Capability seams between the classifier and the host platform.
//!
//! Platform APIs for orientation are wildly inconsistent: a dedicated status
//! API may be missing, the tilt stream may sit behind a gesture-gated
//! permission prompt, and only the coarse portrait/landscape signal can be
//! relied on everywhere. Instead of duck-typing its way through that at every
//! call site, the classifier receives a [`Capabilities`] bundle resolved once
//! at construction and never re-probes.

use super::{CoarseFamily, OrientationKind};

/// The platform's dedicated orientation status API, where one exists.
///
/// `read` returns `None` both when the API is absent and when it returns
/// something malformed; the classifier treats the two identically and falls
/// back to the coarse signal.
pub trait PrimarySource: Send {
    fn read(&self) -> Option<OrientationKind>;
}

/// The always-available portrait/landscape probe (media-query style).
pub trait CoarseProbe: Send {
    fn read(&self) -> CoarseFamily;
}

/// A gesture-gated sensor permission prompt.
///
/// `request` must be called from within a user-initiated interaction; it
/// blocks on the platform prompt and reports the outcome. Denial is not
/// sticky; the user may be asked again on a later gesture.
pub trait PermissionGate: Send {
    fn request(&mut self) -> bool;
}

/// Whether the tilt stream needs an explicit grant before it can be read.
pub enum PermissionPolicy {
    NotRequired,
    GestureGated(Box<dyn PermissionGate>),
}

/// The platform surface handed to the classifier at construction.
pub struct Capabilities {
    /// Dedicated orientation API, or `None` on platforms without one.
    pub primary: Option<Box<dyn PrimarySource>>,
    /// Coarse portrait/landscape probe; always present.
    pub coarse: Box<dyn CoarseProbe>,
    /// Gate in front of the tilt stream.
    pub permission: PermissionPolicy,
}

impl Capabilities {
    /// Capabilities of the desktop host.
    ///
    /// Desktops expose no orientation status API and no motion permission
    /// prompt; the window's aspect ratio stands in for the coarse
    /// portrait/landscape media query.
    pub fn desktop(window_width: f32, window_height: f32) -> Self {
        Self {
            primary: None,
            coarse: Box::new(AspectRatioProbe {
                width: window_width,
                height: window_height,
            }),
            permission: PermissionPolicy::NotRequired,
        }
    }
}

/// Coarse probe backed by a window's dimensions: taller-than-wide is
/// portrait, everything else is landscape.
pub struct AspectRatioProbe {
    pub width: f32,
    pub height: f32,
}

impl CoarseProbe for AspectRatioProbe {
    fn read(&self) -> CoarseFamily {
        family_for_size(self.width, self.height)
    }
}

/// Maps window dimensions onto the coarse family. Square windows count as
/// portrait, matching how a square viewport answers a portrait media query.
pub fn family_for_size(width: f32, height: f32) -> CoarseFamily {
    if height >= width {
        CoarseFamily::Portrait
    } else {
        CoarseFamily::Landscape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tall_window_reads_portrait() {
        let probe = AspectRatioProbe {
            width: 420.0,
            height: 720.0,
        };
        assert_eq!(probe.read(), CoarseFamily::Portrait);
    }

    #[test]
    fn wide_window_reads_landscape() {
        assert_eq!(family_for_size(1280.0, 720.0), CoarseFamily::Landscape);
    }

    #[test]
    fn square_window_counts_as_portrait() {
        assert_eq!(family_for_size(500.0, 500.0), CoarseFamily::Portrait);
    }

    #[test]
    fn desktop_capabilities_have_no_primary_source() {
        let caps = Capabilities::desktop(420.0, 720.0);
        assert!(caps.primary.is_none());
        assert!(matches!(caps.permission, PermissionPolicy::NotRequired));
    }
}
