// SPDX-License-Identifier: MPL-2.0
//! The orientation classifier: one authoritative quadrant, updated only
//! through reconciliation, broadcast only on genuine change.
//!
//! All signal paths funnel into [`OrientationClassifier::update`]; the host
//! event loop owns dispatch, so there is exactly one conceptual writer and no
//! locking beyond the disposer tombstones.

use super::platform::{Capabilities, PermissionPolicy, PrimarySource};
use super::{infer_from_tilt, CoarseFamily, OrientationKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A registered subscriber. The tombstone lets a [`Disposer`] retire the
/// entry without touching the classifier, so disposal works even from inside
/// a broadcast.
struct Subscriber {
    tombstone: Arc<AtomicBool>,
    callback: Box<dyn FnMut(OrientationKind) + Send>,
}

/// Handle returned by [`OrientationClassifier::subscribe`]. Call
/// [`dispose`](Disposer::dispose) to stop receiving updates; dropping the
/// handle without disposing keeps the subscription alive.
#[must_use = "dropping a Disposer does not cancel the subscription"]
pub struct Disposer {
    tombstone: Arc<AtomicBool>,
}

impl Disposer {
    /// Retires the subscription. The subscriber receives no further
    /// callbacks, including the remainder of a broadcast in progress.
    pub fn dispose(self) {
        self.tombstone.store(true, Ordering::SeqCst);
    }
}

/// Fuses the primary orientation API, the coarse portrait/landscape signal,
/// and the tilt stream into one stable [`OrientationKind`].
///
/// Construction resolves the initial state from the injected
/// [`Capabilities`]; afterwards the host feeds signal events through the
/// `handle_*` methods and observers follow along via [`subscribe`].
///
/// [`subscribe`]: OrientationClassifier::subscribe
pub struct OrientationClassifier {
    current: OrientationKind,
    subscribers: Vec<Subscriber>,
    primary: Option<Box<dyn PrimarySource>>,
    permission: PermissionPolicy,
    /// Most recent non-unknown tilt classification; breaks coarse-signal
    /// ties when the primary API is silent.
    last_tilt: OrientationKind,
    /// Whether the tilt path is attached. Guards against duplicate
    /// attachment and gates every tilt event.
    tilt_active: bool,
    primary_attached: bool,
    coarse_attached: bool,
    torn_down: bool,
}

impl OrientationClassifier {
    /// Builds the classifier and resolves the initial state.
    ///
    /// A definite primary reading wins. Otherwise the coarse probe picks the
    /// `-primary` quadrant of its family, and the tilt fallback is enabled
    /// (or deferred behind the permission gate) to recover the finer half
    /// later. A malformed primary reading counts as no primary API at all.
    pub fn new(capabilities: Capabilities) -> Self {
        let Capabilities {
            primary,
            coarse,
            permission,
        } = capabilities;

        let primary_reading = primary
            .as_ref()
            .and_then(|source| source.read())
            .filter(|kind| *kind != OrientationKind::Unknown);

        let current = match primary_reading {
            Some(kind) => kind,
            None => coarse.read().primary_quadrant(),
        };

        let mut classifier = Self {
            current,
            subscribers: Vec::new(),
            primary_attached: primary.is_some(),
            primary,
            permission,
            last_tilt: OrientationKind::Unknown,
            tilt_active: false,
            coarse_attached: true,
            torn_down: false,
        };

        if primary_reading.is_none() {
            classifier.enable_tilt_fallback();
        }

        classifier
    }

    /// The current classification.
    pub fn current(&self) -> OrientationKind {
        self.current
    }

    /// Whether the tilt path is attached and consuming events.
    pub fn tilt_active(&self) -> bool {
        self.tilt_active
    }

    /// Whether a user gesture is still needed before the tilt path can run.
    pub fn needs_gesture(&self) -> bool {
        !self.torn_down
            && !self.tilt_active
            && matches!(self.permission, PermissionPolicy::GestureGated(_))
    }

    /// Registers `callback` and immediately replays the current state to it,
    /// synchronously. Returns the handle that cancels the subscription.
    pub fn subscribe(
        &mut self,
        mut callback: impl FnMut(OrientationKind) + Send + 'static,
    ) -> Disposer {
        callback(self.current);
        let tombstone = Arc::new(AtomicBool::new(false));
        self.subscribers.push(Subscriber {
            tombstone: Arc::clone(&tombstone),
            callback: Box::new(callback),
        });
        Disposer { tombstone }
    }

    /// The primary orientation API reported a change: re-read it and adopt
    /// any definite quadrant.
    pub fn handle_primary_change(&mut self) {
        if self.torn_down || !self.primary_attached {
            return;
        }
        let reading = self.primary.as_ref().and_then(|source| source.read());
        if let Some(kind) = reading {
            self.update(kind);
        }
    }

    /// The coarse signal reported a portrait/landscape transition.
    ///
    /// The signal cannot distinguish primary from secondary, so the quadrant
    /// within the reported family is guessed: keep the current quadrant if it
    /// already belongs to the family, else reuse the last tilt classification
    /// from that family, else fall back to `-primary`. The guess has no
    /// ground truth without the tilt signal; it deliberately mirrors the
    /// established heuristic rather than trying to outsmart it.
    pub fn handle_coarse_change(&mut self, family: CoarseFamily) {
        if self.torn_down || !self.coarse_attached {
            return;
        }
        if self.current.family() == Some(family) {
            // Already in the reported family: keep the quadrant, notify nobody.
            return;
        }
        let next = if self.last_tilt.family() == Some(family) {
            self.last_tilt
        } else {
            family.primary_quadrant()
        };
        self.update(next);
    }

    /// A raw tilt event arrived. Ignored unless the tilt path is attached;
    /// unusable events (absent component) are dropped. Every usable
    /// classification refreshes the tie-break memory, whether or not it
    /// changes the current state.
    pub fn handle_tilt(&mut self, beta: Option<f64>, gamma: Option<f64>) {
        if self.torn_down || !self.tilt_active {
            return;
        }
        let kind = infer_from_tilt(beta, gamma);
        if kind == OrientationKind::Unknown {
            return;
        }
        self.last_tilt = kind;
        self.update(kind);
    }

    /// Attaches the tilt path when no permission gesture is required.
    /// Platforms that gate the sensor defer to
    /// [`request_permission_on_gesture`](Self::request_permission_on_gesture).
    pub fn enable_tilt_fallback(&mut self) {
        if self.torn_down || self.tilt_active {
            return;
        }
        match self.permission {
            PermissionPolicy::NotRequired => self.tilt_active = true,
            PermissionPolicy::GestureGated(_) => {}
        }
    }

    /// Performs the gesture-gated permission request. Must be called from
    /// within a user-initiated interaction.
    ///
    /// Returns `true` immediately on platforms without the permission
    /// primitive and when the tilt path is already attached. On a grant the
    /// tilt path is attached; on a denial it stays inactive and the caller
    /// may retry on a later gesture. Never fails loudly.
    pub fn request_permission_on_gesture(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        match &mut self.permission {
            PermissionPolicy::NotRequired => true,
            PermissionPolicy::GestureGated(_) if self.tilt_active => true,
            PermissionPolicy::GestureGated(gate) => {
                let granted = gate.request();
                if granted {
                    self.tilt_active = true;
                }
                granted
            }
        }
    }

    /// Detaches every signal path. Idempotent. The current state is retained
    /// so a late [`subscribe`](Self::subscribe) still replays the last-known
    /// orientation; no signal handler will update state after this returns.
    pub fn teardown(&mut self) {
        self.primary_attached = false;
        self.coarse_attached = false;
        self.tilt_active = false;
        self.torn_down = true;
    }

    /// Reconciliation entry point: every state write happens here.
    /// `Unknown` and no-change inputs are dropped; everything else flips the
    /// state and broadcasts exactly once.
    fn update(&mut self, next: OrientationKind) {
        if next == OrientationKind::Unknown || next == self.current {
            return;
        }
        self.current = next;
        self.broadcast();
    }

    fn broadcast(&mut self) {
        // Sweep retired entries first, then deliver. The tombstone is
        // re-checked before each call so a disposal from inside an earlier
        // callback silences the rest of this broadcast too.
        self.subscribers
            .retain(|subscriber| !subscriber.tombstone.load(Ordering::SeqCst));
        let kind = self.current;
        for subscriber in &mut self.subscribers {
            if !subscriber.tombstone.load(Ordering::SeqCst) {
                (subscriber.callback)(kind);
            }
        }
    }
}
