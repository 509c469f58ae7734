// SPDX-License-Identifier: MPL-2.0
//! The four utility tools the deck rotates between.
//!
//! Each tool is a self-contained component in the Message/Event style: the
//! app forwards messages in, the tool reports app-level side effects back as
//! events (prime audio, ring the chime, kick off a fetch). Time-dependent
//! updates take the current instant as a parameter so the state machines can
//! be tested without waiting on a clock.

pub mod alarm;
pub mod stopwatch;
pub mod timer;
pub mod weather;
