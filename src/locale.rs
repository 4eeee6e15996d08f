//! User-facing texts
//!
//! Every prompt, label and error message the bot sends lives here, one table
//! per supported language.

use serde::{Deserialize, Serialize};

/// Language of bot replies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Russian
    #[default]
    Ru,
    /// English
    En,
}

impl Locale {
    /// Text table for this language
    #[must_use]
    pub const fn texts(self) -> &'static Texts {
        match self {
            Self::Ru => &RU,
            Self::En => &EN,
        }
    }

    /// Value of the weather API `lang` parameter
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

/// Static table of user-facing strings
#[derive(Debug)]
pub struct Texts {
    /// Main menu question
    pub menu_prompt: &'static str,
    /// Placeholder inside the input field while the menu is shown
    pub menu_placeholder: &'static str,
    /// Menu button: weather flow
    pub menu_weather: &'static str,
    /// Menu button: currency flow
    pub menu_currency: &'static str,
    /// Menu button: random cat picture
    pub menu_image: &'static str,
    /// Menu button: poll flow
    pub menu_poll: &'static str,

    /// Sent before every multi-step prompt
    pub cancel_hint: &'static str,
    /// Reply to `/cancel`
    pub cancelled: &'static str,
    /// Reply to `/state` while idle
    pub no_state: &'static str,

    /// First line of `/help`
    pub commands_header: &'static str,
    pub cmd_start: &'static str,
    pub cmd_help: &'static str,
    pub cmd_cancel: &'static str,
    pub cmd_state: &'static str,
    pub cmd_codes: &'static str,

    pub weather_prompt: &'static str,
    pub weather_not_found: &'static str,
    pub weather_unavailable: &'static str,
    pub weather_temp: &'static str,
    pub weather_feels_like: &'static str,
    pub weather_condition: &'static str,
    pub weather_wind: &'static str,
    pub wind_unit: &'static str,

    pub currency_prompt: &'static str,
    pub currency_bad_format: &'static str,
    pub currency_rejected: &'static str,
    pub currency_unavailable: &'static str,
    pub conversion_from: &'static str,
    pub conversion_result: &'static str,
    pub codes_header: &'static str,

    pub image_failed: &'static str,

    pub poll_visibility_prompt: &'static str,
    pub poll_anonymous: &'static str,
    pub poll_public: &'static str,
    pub poll_visibility_error: &'static str,
    pub poll_topic_prompt: &'static str,
    pub poll_topic_error: &'static str,
    pub poll_options_prompt: &'static str,
    pub poll_options_error: &'static str,
    pub poll_ready: &'static str,
}

static RU: Texts = Texts {
    menu_prompt: "Какой функцией бота вы хотите воспользоваться?",
    menu_placeholder: "Выберите функцию",
    menu_weather: "Погода",
    menu_currency: "Курс валют",
    menu_image: "Картинка с котиком",
    menu_poll: "Создать опрос",

    cancel_hint: "Для отмены операции нажмите на шторку около поля ввода и выберите /cancel",
    cancelled: "Вы отменили операцию",
    no_state: "Без состояния",

    commands_header: "Поддерживаемые команды:",
    cmd_start: "Главное меню",
    cmd_help: "Список команд",
    cmd_cancel: "Отменить текущую операцию",
    cmd_state: "Показать текущее состояние",
    cmd_codes: "Коды валют",

    weather_prompt: "Введите ваш город",
    weather_not_found: "Не удалось найти данные. Возможно, вы неверно указали название города...\nПопробуйте снова",
    weather_unavailable: "Сервис погоды сейчас недоступен...\nПопробуйте снова",
    weather_temp: "Температура",
    weather_feels_like: "Ощущается как",
    weather_condition: "Состояние",
    weather_wind: "Ветер",
    wind_unit: "м/c",

    currency_prompt: "Пожалуйста, введите строку в формате:\n<Из> <Количество> <В>\nНапример: RUB 5000 USD\nСо списком кодов валют вы можете ознакомиться с помощью команды /codes",
    currency_bad_format: "Конвертация не удалась. Возможно, вы указали строку в неверном формате...\nПопробуйте снова",
    currency_rejected: "Конвертация не удалась. Возможно, вы неверно указали коды валют...\nПопробуйте снова",
    currency_unavailable: "Конвертация не удалась. Сервис курсов валют сейчас недоступен...\nПопробуйте снова",
    conversion_from: "Из",
    conversion_result: "вы получите",
    codes_header: "Коды валют:",

    image_failed: "Простите, сервер с котиками отвалился",

    poll_visibility_prompt: "Выберите тип опроса",
    poll_anonymous: "Анонимный",
    poll_public: "Публичный",
    poll_visibility_error: "Неверно указан тип опроса, попробуйте снова",
    poll_topic_prompt: "Выберите заголовок опроса",
    poll_topic_error: "Неправильно указано название опроса, попробуйте снова",
    poll_options_prompt: "Укажите варианты ответа: каждый вариант на новой строке",
    poll_options_error: "Неправильно указаны варианты ответа, попробуйте снова",
    poll_ready: "Готово! Теперь вы можете переслать этот опрос!",
};

static EN: Texts = Texts {
    menu_prompt: "Which bot function would you like to use?",
    menu_placeholder: "Choose a function",
    menu_weather: "Weather",
    menu_currency: "Exchange rates",
    menu_image: "Cat picture",
    menu_poll: "Create poll",

    cancel_hint: "To cancel the operation open the menu next to the input field and choose /cancel",
    cancelled: "Operation cancelled",
    no_state: "No state",

    commands_header: "Supported commands:",
    cmd_start: "Main menu",
    cmd_help: "List of commands",
    cmd_cancel: "Cancel the current operation",
    cmd_state: "Show the current state",
    cmd_codes: "Currency codes",

    weather_prompt: "Enter your city",
    weather_not_found: "Could not find any data. Perhaps the city name is misspelled...\nTry again",
    weather_unavailable: "The weather service is unavailable right now...\nTry again",
    weather_temp: "Temperature",
    weather_feels_like: "Feels like",
    weather_condition: "Conditions",
    weather_wind: "Wind",
    wind_unit: "m/s",

    currency_prompt: "Please enter a line in the format:\n<From> <Amount> <To>\nFor example: RUB 5000 USD\nSee the list of currency codes with /codes",
    currency_bad_format: "Conversion failed. Perhaps the line has the wrong format...\nTry again",
    currency_rejected: "Conversion failed. Perhaps the currency codes are wrong...\nTry again",
    currency_unavailable: "Conversion failed. The exchange rate service is unavailable right now...\nTry again",
    conversion_from: "From",
    conversion_result: "you get",
    codes_header: "Currency codes:",

    image_failed: "Sorry, the cat server is down",

    poll_visibility_prompt: "Choose the poll type",
    poll_anonymous: "Anonymous",
    poll_public: "Public",
    poll_visibility_error: "Unknown poll type, try again",
    poll_topic_prompt: "Enter the poll question",
    poll_topic_error: "The poll question is invalid, try again",
    poll_options_prompt: "Enter the answer options, one per line",
    poll_options_error: "The answer options are invalid, try again",
    poll_ready: "Done! Now you can forward this poll!",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_labels_distinct() {
        for locale in [Locale::Ru, Locale::En] {
            let t = locale.texts();
            let labels = [t.menu_weather, t.menu_currency, t.menu_image, t.menu_poll];
            for (i, a) in labels.iter().enumerate() {
                for b in &labels[i + 1..] {
                    assert_ne!(a.to_lowercase(), b.to_lowercase());
                }
            }
        }
    }

    #[test]
    fn test_locale_codes() {
        assert_eq!(Locale::Ru.code(), "ru");
        assert_eq!(Locale::En.code(), "en");
        assert_eq!(Locale::default(), Locale::Ru);
    }
}
