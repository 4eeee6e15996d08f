//! Reply keyboards

use crate::dialogue::Keyboard;
use crate::locale::Texts;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};

/// Create the main function menu
///
/// # Examples
///
/// ```
/// use multitool_bot::bot::keyboards::get_main_keyboard;
/// use multitool_bot::locale::Locale;
/// let keyboard = get_main_keyboard(Locale::Ru.texts());
/// assert_eq!(keyboard.keyboard.len(), 2);
/// ```
#[must_use]
pub fn get_main_keyboard(texts: &Texts) -> KeyboardMarkup {
    let keyboard = vec![
        vec![
            KeyboardButton::new(texts.menu_weather),
            KeyboardButton::new(texts.menu_currency),
        ],
        vec![
            KeyboardButton::new(texts.menu_image),
            KeyboardButton::new(texts.menu_poll),
        ],
    ];
    KeyboardMarkup::new(keyboard)
        .input_field_placeholder(texts.menu_placeholder)
        .resize_keyboard()
        .one_time_keyboard()
}

/// Create the anonymous / public choice
#[must_use]
pub fn get_visibility_keyboard(texts: &Texts) -> KeyboardMarkup {
    let keyboard = vec![vec![
        KeyboardButton::new(texts.poll_anonymous),
        KeyboardButton::new(texts.poll_public),
    ]];
    KeyboardMarkup::new(keyboard)
        .resize_keyboard()
        .one_time_keyboard()
}

/// Telegram markup for a reply, `None` keeps the current keyboard
#[must_use]
pub fn reply_markup(keyboard: Keyboard, texts: &Texts) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::Keep => None,
        Keyboard::Menu => Some(get_main_keyboard(texts).into()),
        Keyboard::Visibility => Some(get_visibility_keyboard(texts).into()),
        Keyboard::Remove => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
    }
}
