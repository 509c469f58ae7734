// SPDX-License-Identifier: MPL-2.0
use iced_deck::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang").unwrap_or(None),
        latitude: args.opt_value_from_str("--lat").unwrap_or(None),
        longitude: args.opt_value_from_str("--lon").unwrap_or(None),
    };

    app::run(flags)
}
