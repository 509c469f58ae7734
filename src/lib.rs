// SPDX-License-Identifier: MPL-2.0
//! `iced_deck` is a small orientation-routed utility deck built with the
//! Iced GUI framework.
//!
//! The way the device is held picks the tool: portrait upright is the alarm
//! clock, portrait upside-down the timer, landscape right-side up the
//! stopwatch, and landscape left-side up the weather card. The interesting
//! part lives in [`orientation`], which fuses the platform's inconsistent
//! orientation signals into one stable classification; the rest is a thin
//! Iced shell with internationalization and persisted preferences.

#![doc(html_root_url = "https://docs.rs/iced_deck/0.1.0")]

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod i18n;
pub mod meteo;
pub mod orientation;
pub mod tools;
pub mod ui;
