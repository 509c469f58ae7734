//! This module defines the UI components for the application's settings view:
//! display language, temperature unit, and the coordinates the weather tool
//! fetches for. Edits are reported to the app as events; the app owns the
//! config and persists it.

use crate::config::TemperatureUnit;
use crate::i18n::fluent::I18n;
use iced::{
    alignment::Horizontal,
    widget::{button, text_input, Button, Column, Row, Text},
    Element, Length,
};
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone)]
pub enum Message {
    LanguageSelected(LanguageIdentifier),
    UnitSelected(TemperatureUnit),
    LatitudeChanged(String),
    LongitudeChanged(String),
    Back,
}

/// Settings changes the app applies and persists.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    LanguageSelected(LanguageIdentifier),
    UnitSelected(TemperatureUnit),
    LatitudeChanged(Option<f64>),
    LongitudeChanged(Option<f64>),
    Back,
}

/// Editable field state; the authoritative values live in the config.
#[derive(Debug, Default)]
pub struct State {
    latitude_input: String,
    longitude_input: String,
}

impl State {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        Self {
            latitude_input: latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude_input: longitude.map(|v| v.to_string()).unwrap_or_default(),
        }
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::LanguageSelected(locale) => Event::LanguageSelected(locale),
            Message::UnitSelected(unit) => Event::UnitSelected(unit),
            Message::LatitudeChanged(value) => {
                let parsed = parse_coordinate(&value, 90.0);
                self.latitude_input = value;
                Event::LatitudeChanged(parsed)
            }
            Message::LongitudeChanged(value) => {
                let parsed = parse_coordinate(&value, 180.0);
                self.longitude_input = value;
                Event::LongitudeChanged(parsed)
            }
            Message::Back => Event::Back,
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, unit: TemperatureUnit) -> Element<'a, Message> {
        let title = Text::new(i18n.tr("settings-title")).size(30);

        let mut language_selection_column = Column::new()
            .push(Text::new(i18n.tr("select-language-label")))
            .spacing(10);

        for locale in &i18n.available_locales {
            let display_name = locale.to_string(); // Fallback to string representation

            // Check for specific translation for the language name, e.g., "language-name-en-US"
            let translated_name_key = format!("language-name-{}", locale);
            let translated_name = i18n.tr(&translated_name_key);
            let button_text = if translated_name.starts_with("MISSING:") {
                display_name.clone() // Use raw locale if translation missing
            } else {
                format!("{} ({})", translated_name, display_name)
            };

            let is_current_locale = i18n.current_locale() == locale;
            let mut language_button = Button::new(Text::new(button_text))
                .on_press(Message::LanguageSelected(locale.clone()));

            if is_current_locale {
                language_button = language_button.style(button::primary);
            } else {
                language_button = language_button.style(button::secondary);
            }

            language_selection_column = language_selection_column.push(language_button);
        }

        let mut unit_row = Row::new().spacing(10);
        for (key, candidate) in [
            ("unit-celsius", TemperatureUnit::Celsius),
            ("unit-fahrenheit", TemperatureUnit::Fahrenheit),
        ] {
            let mut unit_button = Button::new(Text::new(i18n.tr(key)))
                .on_press(Message::UnitSelected(candidate));
            if unit == candidate {
                unit_button = unit_button.style(button::primary);
            } else {
                unit_button = unit_button.style(button::secondary);
            }
            unit_row = unit_row.push(unit_button);
        }

        let coordinates = Column::new()
            .spacing(10)
            .push(
                Row::new()
                    .spacing(10)
                    .push(Text::new(i18n.tr("settings-latitude-label")))
                    .push(
                        text_input("52.52", &self.latitude_input)
                            .on_input(Message::LatitudeChanged)
                            .width(Length::Fixed(120.0)),
                    ),
            )
            .push(
                Row::new()
                    .spacing(10)
                    .push(Text::new(i18n.tr("settings-longitude-label")))
                    .push(
                        text_input("13.40", &self.longitude_input)
                            .on_input(Message::LongitudeChanged)
                            .width(Length::Fixed(120.0)),
                    ),
            );

        let back = Button::new(Text::new(i18n.tr("settings-back")))
            .style(button::secondary)
            .on_press(Message::Back);

        Column::new()
            .push(title)
            .push(language_selection_column)
            .push(Text::new(i18n.tr("settings-unit-label")))
            .push(unit_row)
            .push(coordinates)
            .push(back)
            .spacing(20)
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .into()
    }
}

/// Parses a decimal-degree field; out-of-range or unparsable input counts
/// as absent.
fn parse_coordinate(value: &str, bound: f64) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.abs() <= bound)
}
