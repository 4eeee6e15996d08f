//! Classification of incoming messages

use crate::locale::Texts;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

/// Commands honored in every stage
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Show the main menu
    Start,
    /// Show commands and the main menu
    Help,
    /// Abort the current flow
    Cancel,
    /// Report the current stage
    State,
    /// List currency codes
    Codes,
}

impl Command {
    /// Every command, in menu order
    pub const ALL: [Self; 5] = [Self::Start, Self::Help, Self::Cancel, Self::State, Self::Codes];

    /// Name without the leading slash
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Cancel => "cancel",
            Self::State => "state",
            Self::Codes => "codes",
        }
    }

    #[must_use]
    pub const fn description(self, texts: &Texts) -> &'static str {
        match self {
            Self::Start => texts.cmd_start,
            Self::Help => texts.cmd_help,
            Self::Cancel => texts.cmd_cancel,
            Self::State => texts.cmd_state,
            Self::Codes => texts.cmd_codes,
        }
    }

    /// Command list for `set_my_commands`
    #[must_use]
    pub fn menu(texts: &Texts) -> Vec<BotCommand> {
        Self::ALL
            .iter()
            .map(|cmd| BotCommand::new(cmd.name(), cmd.description(texts)))
            .collect()
    }

    /// Body of the `/help` reply
    #[must_use]
    pub fn help_text(texts: &Texts) -> String {
        let mut text = texts.commands_header.to_string();
        for cmd in Self::ALL {
            text.push_str(&format!("\n/{} - {}", cmd.name(), cmd.description(texts)));
        }
        text
    }
}

/// One incoming message, as seen by the state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// A recognized command
    Command(Command),
    /// Any other text
    Text(String),
    /// Stickers, photos, voice and other messages without text
    NonText,
}

impl Input {
    /// Classify message text; `bot_name` is used to accept `/cmd@bot_name`.
    #[must_use]
    pub fn from_text(text: &str, bot_name: &str) -> Self {
        Command::parse(text, bot_name).map_or_else(|_| Self::Text(text.to_string()), Self::Command)
    }

    /// Classify an optional message text
    #[must_use]
    pub fn from_message_text(text: Option<&str>, bot_name: &str) -> Self {
        text.map_or(Self::NonText, |t| Self::from_text(t, bot_name))
    }
}

/// Menu buttons available while idle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Weather,
    Currency,
    Image,
    Poll,
}

impl MenuAction {
    /// Match a button label, ignoring case and surrounding whitespace
    #[must_use]
    pub fn recognize(text: &str, texts: &Texts) -> Option<Self> {
        let text = text.trim().to_lowercase();
        [
            (texts.menu_weather, Self::Weather),
            (texts.menu_currency, Self::Currency),
            (texts.menu_image, Self::Image),
            (texts.menu_poll, Self::Poll),
        ]
        .into_iter()
        .find(|(label, _)| label.to_lowercase() == text)
        .map(|(_, action)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;

    #[test]
    fn test_commands_are_recognized() {
        assert_eq!(
            Input::from_text("/cancel", "helper_bot"),
            Input::Command(Command::Cancel)
        );
        assert_eq!(
            Input::from_text("/state@helper_bot", "helper_bot"),
            Input::Command(Command::State)
        );
        assert_eq!(
            Input::from_text("/codes", ""),
            Input::Command(Command::Codes)
        );
    }

    #[test]
    fn test_unknown_command_is_text() {
        assert_eq!(
            Input::from_text("/weather", "helper_bot"),
            Input::Text("/weather".to_string())
        );
    }

    #[test]
    fn test_missing_text_is_non_text() {
        assert_eq!(Input::from_message_text(None, "bot"), Input::NonText);
    }

    #[test]
    fn test_menu_labels_ignore_case() {
        let ru = Locale::Ru.texts();
        assert_eq!(MenuAction::recognize("погода", ru), Some(MenuAction::Weather));
        assert_eq!(MenuAction::recognize("СОЗДАТЬ ОПРОС", ru), Some(MenuAction::Poll));
        assert_eq!(MenuAction::recognize("Картинка с котиком ", ru), Some(MenuAction::Image));
        assert_eq!(MenuAction::recognize("курс", ru), None);

        let en = Locale::En.texts();
        assert_eq!(MenuAction::recognize("create poll", en), Some(MenuAction::Poll));
        assert_eq!(MenuAction::recognize("exchange RATES", en), Some(MenuAction::Currency));
    }

    #[test]
    fn test_command_names_parse() {
        for cmd in Command::ALL {
            assert_eq!(Input::from_text(&format!("/{}", cmd.name()), ""), Input::Command(cmd));
        }
    }

    #[test]
    fn test_command_menu_follows_locale() {
        let en = Locale::En.texts();
        let menu = Command::menu(en);
        assert_eq!(menu.len(), Command::ALL.len());
        assert_eq!(menu[2].command, "cancel");
        assert_eq!(menu[2].description, "Cancel the current operation");

        let help = Command::help_text(en);
        assert!(help.starts_with("Supported commands:"));
        assert!(help.contains("/codes - Currency codes"));
        assert!(!help.contains("Коды валют"));

        let ru = Command::help_text(Locale::Ru.texts());
        assert!(ru.contains("/cancel - Отменить текущую операцию"));
    }
}
