use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use strum::VariantArray;

/// Themes offered by the theme picker, stored by name in `gui.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, VariantArray, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Dracula,
    Nord,
    TokyoNight,
}

impl From<&Theme> for iced::Theme {
    fn from(theme: &Theme) -> Self {
        match theme {
            Theme::Light => iced::Theme::Light,
            Theme::Dark => iced::Theme::Dark,
            Theme::Dracula => iced::Theme::Dracula,
            Theme::Nord => iced::Theme::Nord,
            Theme::TokyoNight => iced::Theme::TokyoNight,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Dracula => "Dracula",
            Theme::Nord => "Nord",
            Theme::TokyoNight => "Tokyo Night",
        };
        write!(f, "{name}")
    }
}
