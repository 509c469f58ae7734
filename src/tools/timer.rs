// SPDX-License-Identifier: MPL-2.0
//! Countdown timer tool: preset chips, custom seconds, chime at zero.
//! Shown while the device is held portrait upside-down.
//!
//! The countdown is anchored to a deadline instant rather than decremented
//! per tick, so a delayed tick cannot stretch the timer.

use crate::i18n::fluent::I18n;
use crate::ui::styles;
use iced::{
    alignment::Horizontal,
    widget::{button, text_input, Button, Column, Row, Text},
    Element, Length,
};
use std::time::{Duration, Instant};

const PRESETS: [(&str, u64); 3] = [("1m", 60), ("5m", 300), ("10m", 600)];
const DEFAULT_SECONDS: u64 = 300;

#[derive(Debug, Clone)]
pub enum Message {
    Preset(u64),
    InputChanged(String),
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The user started the timer; the gesture that should prime audio.
    Started,
    /// The countdown reached zero; ring the chime.
    Finished,
}

#[derive(Debug)]
pub struct State {
    /// Raw text of the custom seconds field.
    custom_input: String,
    /// Configured duration, at least one second.
    duration: Duration,
    /// Deadline of the running countdown. `None` while stopped.
    deadline: Option<Instant>,
    /// Whether the last run completed (shows the done notice).
    finished: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            custom_input: DEFAULT_SECONDS.to_string(),
            duration: Duration::from_secs(DEFAULT_SECONDS),
            deadline: None,
            finished: false,
        }
    }
}

impl State {
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn update(&mut self, message: Message, now: Instant) -> Event {
        match message {
            Message::Preset(seconds) => {
                if !self.is_running() {
                    self.duration = Duration::from_secs(seconds.max(1));
                    self.custom_input = seconds.to_string();
                }
                Event::None
            }
            Message::InputChanged(value) => {
                if let Ok(seconds) = value.parse::<u64>() {
                    self.duration = Duration::from_secs(seconds.max(1));
                }
                self.custom_input = value;
                Event::None
            }
            Message::Start => {
                if self.is_running() {
                    return Event::None;
                }
                self.deadline = Some(now + self.duration);
                self.finished = false;
                Event::Started
            }
            Message::Stop => {
                self.deadline = None;
                Event::None
            }
        }
    }

    /// Advances the countdown; reports `Finished` once when it hits zero.
    pub fn tick(&mut self, now: Instant) -> Event {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.finished = true;
                Event::Finished
            }
            _ => Event::None,
        }
    }

    /// Seconds left on the display: the live countdown while running, zero
    /// after completion, the configured duration otherwise.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now).as_secs(),
            None if self.finished => 0,
            None => self.duration.as_secs(),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, now: Instant) -> Element<'a, Message> {
        let display = Text::new(format_hms(self.remaining_secs(now))).size(48);

        let mut chips = Row::new().spacing(10);
        for (label, seconds) in PRESETS {
            let mut chip = Button::new(Text::new(label)).style(button::secondary);
            if !self.is_running() {
                chip = chip.on_press(Message::Preset(seconds));
            }
            chips = chips.push(chip);
        }

        let custom_row = Row::new()
            .spacing(10)
            .push(Text::new(i18n.tr("timer-custom-label")))
            .push(
                text_input("300", &self.custom_input)
                    .on_input(Message::InputChanged)
                    .width(Length::Fixed(100.0)),
            );

        let mut start = Button::new(Text::new(i18n.tr("timer-start"))).style(button::primary);
        if !self.is_running() {
            start = start.on_press(Message::Start);
        }
        let mut stop = Button::new(Text::new(i18n.tr("timer-stop"))).style(button::secondary);
        if self.is_running() {
            stop = stop.on_press(Message::Stop);
        }

        let mut column = Column::new()
            .spacing(16)
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .push(display)
            .push(chips)
            .push(custom_row)
            .push(Row::new().spacing(10).push(start).push(stop));

        if self.finished {
            column =
                column.push(Text::new(i18n.tr("timer-done")).color(styles::accent_text_color()));
        }

        column.into()
    }
}

/// `HH:MM:SS` rendering of a second count.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hms_pads_components() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3661), "01:01:01");
    }

    #[test]
    fn presets_set_duration_while_stopped() {
        let mut state = State::default();
        let now = Instant::now();
        state.update(Message::Preset(60), now);
        assert_eq!(state.remaining_secs(now), 60);
    }

    #[test]
    fn presets_are_ignored_while_running() {
        let mut state = State::default();
        let now = Instant::now();
        assert_eq!(state.update(Message::Start, now), Event::Started);
        state.update(Message::Preset(60), now);
        assert_eq!(state.remaining_secs(now), DEFAULT_SECONDS);
    }

    #[test]
    fn custom_input_clamps_to_one_second() {
        let mut state = State::default();
        let now = Instant::now();
        state.update(Message::InputChanged("0".into()), now);
        assert_eq!(state.remaining_secs(now), 1);
    }

    #[test]
    fn unparsable_input_keeps_previous_duration() {
        let mut state = State::default();
        let now = Instant::now();
        state.update(Message::InputChanged("ten".into()), now);
        assert_eq!(state.remaining_secs(now), DEFAULT_SECONDS);
    }

    #[test]
    fn countdown_finishes_once_and_floors_at_zero() {
        let mut state = State::default();
        let now = Instant::now();
        state.update(Message::InputChanged("1".into()), now);
        state.update(Message::Start, now);
        assert!(state.is_running());

        let later = now + Duration::from_secs(2);
        assert_eq!(state.tick(later), Event::Finished);
        assert!(!state.is_running());
        assert_eq!(state.remaining_secs(later), 0);
        assert_eq!(state.tick(later + Duration::from_secs(1)), Event::None);
    }

    #[test]
    fn stop_halts_without_finishing() {
        let mut state = State::default();
        let now = Instant::now();
        state.update(Message::Start, now);
        state.update(Message::Stop, now);
        assert!(!state.is_running());
        assert!(!state.finished);
        assert_eq!(state.tick(now + Duration::from_secs(600)), Event::None);
    }
}
