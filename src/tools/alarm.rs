// SPDX-License-Identifier: MPL-2.0
//! Alarm clock tool: live clock, arm a HH:MM target for today, chime on
//! trigger. Shown while the device is held portrait upright.

use crate::i18n::fluent::I18n;
use crate::ui::styles;
use chrono::{DateTime, Local, NaiveTime, Timelike};
use iced::{
    alignment::Horizontal,
    widget::{button, text_input, Button, Column, Row, Text},
    Element, Length,
};

/// Messages handled by the alarm tool.
#[derive(Debug, Clone)]
pub enum Message {
    TargetChanged(String),
    Arm,
    Disarm,
}

/// Side effects the app performs on behalf of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The user armed the alarm; the gesture that should prime audio.
    Armed,
    /// The armed minute arrived; ring the chime.
    Fired,
}

#[derive(Debug)]
pub struct State {
    /// The HH:MM text in the input field.
    target_input: String,
    /// Armed target, minute precision. `None` while disarmed.
    armed_target: Option<NaiveTime>,
    /// Whether the last arm attempt failed to parse.
    invalid: bool,
    /// Whether the alarm fired and has not been re-armed or dismissed.
    fired: bool,
}

impl State {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            target_input: now.format("%H:%M").to_string(),
            armed_target: None,
            invalid: false,
            fired: false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed_target.is_some()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::TargetChanged(value) => {
                self.target_input = value;
                self.invalid = false;
                Event::None
            }
            Message::Arm => match NaiveTime::parse_from_str(&self.target_input, "%H:%M") {
                Ok(target) => {
                    self.armed_target = Some(target);
                    self.invalid = false;
                    self.fired = false;
                    Event::Armed
                }
                Err(_) => {
                    self.invalid = true;
                    Event::None
                }
            },
            Message::Disarm => {
                self.armed_target = None;
                self.fired = false;
                Event::None
            }
        }
    }

    /// Advances the clock. Fires at most once per arming, at the armed
    /// minute, and disarms itself in the same step.
    pub fn tick(&mut self, now: DateTime<Local>) -> Event {
        if let Some(target) = self.armed_target {
            if now.hour() == target.hour() && now.minute() == target.minute() {
                self.armed_target = None;
                self.fired = true;
                return Event::Fired;
            }
        }
        Event::None
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, now: DateTime<Local>) -> Element<'a, Message> {
        let clock = Text::new(now.format("%H:%M:%S").to_string()).size(48);

        let target_row = Row::new()
            .spacing(10)
            .push(Text::new(i18n.tr("alarm-target-label")))
            .push(
                text_input("07:30", &self.target_input)
                    .on_input(Message::TargetChanged)
                    .width(Length::Fixed(100.0)),
            );

        let mut arm = Button::new(Text::new(i18n.tr("alarm-arm"))).style(button::primary);
        if !self.is_armed() {
            arm = arm.on_press(Message::Arm);
        }
        let mut disarm = Button::new(Text::new(i18n.tr("alarm-disarm"))).style(button::secondary);
        if self.is_armed() {
            disarm = disarm.on_press(Message::Disarm);
        }

        let mut column = Column::new()
            .spacing(16)
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .push(clock)
            .push(target_row)
            .push(Row::new().spacing(10).push(arm).push(disarm));

        if self.invalid {
            column = column.push(
                Text::new(i18n.tr("alarm-invalid-time")).color(styles::error_text_color()),
            );
        }
        if self.fired {
            column =
                column.push(Text::new(i18n.tr("alarm-ringing")).color(styles::accent_text_color()));
        }

        column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 7, h, m, s).unwrap()
    }

    #[test]
    fn arming_with_valid_time_reports_gesture() {
        let mut state = State::new(at(7, 0, 0));
        state.update(Message::TargetChanged("07:30".into()));
        assert_eq!(state.update(Message::Arm), Event::Armed);
        assert!(state.is_armed());
    }

    #[test]
    fn arming_with_garbage_flags_invalid_input() {
        let mut state = State::new(at(7, 0, 0));
        state.update(Message::TargetChanged("half past".into()));
        assert_eq!(state.update(Message::Arm), Event::None);
        assert!(!state.is_armed());
        assert!(state.invalid);
    }

    #[test]
    fn fires_exactly_once_at_the_armed_minute() {
        let mut state = State::new(at(7, 29, 0));
        state.update(Message::TargetChanged("07:30".into()));
        state.update(Message::Arm);

        assert_eq!(state.tick(at(7, 29, 59)), Event::None);
        assert_eq!(state.tick(at(7, 30, 2)), Event::Fired);
        assert!(!state.is_armed());
        // Later ticks within the same minute do not re-fire.
        assert_eq!(state.tick(at(7, 30, 30)), Event::None);
    }

    #[test]
    fn disarm_cancels_a_pending_alarm() {
        let mut state = State::new(at(7, 0, 0));
        state.update(Message::TargetChanged("07:30".into()));
        state.update(Message::Arm);
        state.update(Message::Disarm);
        assert_eq!(state.tick(at(7, 30, 0)), Event::None);
    }

    #[test]
    fn rearming_clears_the_fired_notice() {
        let mut state = State::new(at(7, 29, 0));
        state.update(Message::TargetChanged("07:30".into()));
        state.update(Message::Arm);
        state.tick(at(7, 30, 0));
        assert!(state.fired);

        state.update(Message::TargetChanged("08:00".into()));
        state.update(Message::Arm);
        assert!(!state.fired);
    }
}
