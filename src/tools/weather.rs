// SPDX-License-Identifier: MPL-2.0
//! Weather tool: current conditions for the configured coordinates.
//! Shown while the device is held landscape left-side up.
//!
//! The tool itself never performs IO; it asks the app for a refresh through
//! [`Event::RefreshRequested`] and receives the outcome as a message.

use crate::config::TemperatureUnit;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::meteo::{self, CurrentWeather};
use crate::ui::styles;
use fluent_bundle::{FluentArgs, FluentValue};
use iced::{
    alignment::Horizontal,
    widget::{button, Button, Column, Text},
    Element, Length,
};

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    Fetched(Result<CurrentWeather, Error>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    None,
    /// The app should start a fetch for the configured coordinates.
    RefreshRequested,
}

/// Where the tool is in its fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Stage {
    #[default]
    Idle,
    Loading,
    Ready(CurrentWeather),
    /// No coordinates configured; nothing to fetch.
    MissingCoordinates,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct State {
    stage: Stage,
}

impl State {
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Whether the tool still needs its first fetch.
    pub fn needs_fetch(&self) -> bool {
        self.stage == Stage::Idle
    }

    pub fn mark_loading(&mut self) {
        self.stage = Stage::Loading;
    }

    pub fn mark_missing_coordinates(&mut self) {
        self.stage = Stage::MissingCoordinates;
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Refresh => Event::RefreshRequested,
            Message::Fetched(Ok(weather)) => {
                self.stage = Stage::Ready(weather);
                Event::None
            }
            Message::Fetched(Err(err)) => {
                self.stage = Stage::Failed(err.to_string());
                Event::None
            }
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, unit: TemperatureUnit) -> Element<'a, Message> {
        let mut column = Column::new()
            .spacing(16)
            .width(Length::Fill)
            .align_x(Horizontal::Center);

        match &self.stage {
            Stage::Idle | Stage::Loading => {
                column = column.push(
                    Text::new(i18n.tr("weather-loading")).color(styles::muted_text_color()),
                );
            }
            Stage::MissingCoordinates => {
                column = column.push(
                    Text::new(i18n.tr("weather-missing-coordinates"))
                        .color(styles::muted_text_color()),
                );
            }
            Stage::Failed(message) => {
                column =
                    column.push(Text::new(message.clone()).color(styles::error_text_color()));
            }
            Stage::Ready(weather) => {
                let temperature = match (weather.temperature_c, unit) {
                    (Some(celsius), TemperatureUnit::Celsius) => format!("{celsius:.1}°C"),
                    (Some(celsius), TemperatureUnit::Fahrenheit) => {
                        format!("{:.1}°F", meteo::to_fahrenheit(celsius))
                    }
                    (None, _) => "—".to_string(),
                };
                column = column.push(Text::new(temperature).size(48));
                column = column.push(
                    Text::new(i18n.tr(meteo::condition_key(weather.weather_code)))
                        .color(styles::muted_text_color()),
                );
                if let Some(wind) = weather.wind_speed {
                    let mut args = FluentArgs::new();
                    args.set("speed", FluentValue::from(format!("{wind:.1}")));
                    column = column.push(
                        Text::new(i18n.tr_with("weather-wind", &args))
                            .color(styles::muted_text_color()),
                    );
                }
            }
        }

        let refresh = Button::new(Text::new(i18n.tr("weather-refresh")))
            .style(button::secondary)
            .on_press(Message::Refresh);
        column = column.push(refresh);
        column = column.push(
            Text::new(i18n.tr("weather-powered-by"))
                .size(12)
                .color(styles::muted_text_color()),
        );

        column.into()
    }
}
