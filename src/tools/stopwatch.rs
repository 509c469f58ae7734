// SPDX-License-Identifier: MPL-2.0
//! Stopwatch tool: start/pause, laps, reset, centisecond display.
//! Shown while the device is held landscape right-side up.

use crate::i18n::fluent::I18n;
use crate::ui::styles;
use fluent_bundle::{FluentArgs, FluentValue};
use iced::{
    alignment::Horizontal,
    widget::{button, Button, Column, Row, Text},
    Element, Length,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum Message {
    Toggle,
    Lap,
    Reset,
}

#[derive(Debug, Default)]
pub struct State {
    /// Instant the current run started. `None` while paused.
    started_at: Option<Instant>,
    /// Time accumulated across previous runs.
    accumulated: Duration,
    /// Lap times, most recent first.
    laps: Vec<Duration>,
}

impl State {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Total elapsed time as of `now`.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let running = self
            .started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default();
        self.accumulated + running
    }

    pub fn update(&mut self, message: Message, now: Instant) {
        match message {
            Message::Toggle => {
                if let Some(started) = self.started_at.take() {
                    self.accumulated += now.saturating_duration_since(started);
                } else {
                    self.started_at = Some(now);
                }
            }
            Message::Lap => {
                if self.is_running() {
                    let elapsed = self.elapsed(now);
                    self.laps.insert(0, elapsed);
                }
            }
            Message::Reset => {
                self.started_at = None;
                self.accumulated = Duration::ZERO;
                self.laps.clear();
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Element<'a, Message> {
        let display = Text::new(format_centi(self.elapsed(now))).size(48);

        let toggle_label = if self.is_running() {
            i18n.tr("stopwatch-pause")
        } else {
            i18n.tr("stopwatch-start")
        };
        let toggle = Button::new(Text::new(toggle_label))
            .style(button::primary)
            .on_press(Message::Toggle);

        let mut lap = Button::new(Text::new(i18n.tr("stopwatch-lap"))).style(button::primary);
        if self.is_running() {
            lap = lap.on_press(Message::Lap);
        }
        let reset = Button::new(Text::new(i18n.tr("stopwatch-reset")))
            .style(button::secondary)
            .on_press(Message::Reset);

        let mut column = Column::new()
            .spacing(16)
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .push(display)
            .push(Row::new().spacing(10).push(toggle).push(lap).push(reset));

        // Lap list, most recent first; numbering counts down like the list.
        let lap_count = self.laps.len();
        for (index, lap_time) in self.laps.iter().enumerate() {
            let mut args = FluentArgs::new();
            args.set("count", FluentValue::from(lap_count - index));
            let label = i18n.tr_with("stopwatch-lap-label", &args);
            column = column.push(
                Text::new(format!("{label}: {}", format_centi(*lap_time)))
                    .color(styles::muted_text_color()),
            );
        }

        column.into()
    }
}

/// `HH:MM:SS.CC` rendering with centisecond precision.
pub fn format_centi(elapsed: Duration) -> String {
    let total_secs = elapsed.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let centis = elapsed.subsec_millis() / 10;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{centis:02}")
}
