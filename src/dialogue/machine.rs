//! The conversation transition function
//!
//! [`Machine::step`] takes the current [`State`] and one [`Input`] and returns
//! the next state together with the replies to send. Global commands are
//! checked before any stage handler. Validation failures keep the stage so
//! the user can retry without restarting the flow.

use crate::dialogue::input::{Command, Input, MenuAction};
use crate::dialogue::state::{
    Poll, State, MAX_POLL_OPTIONS, MAX_POLL_OPTION_CHARS, MAX_POLL_QUESTION_CHARS,
};
use crate::locale::{Locale, Texts};
use crate::services::currency::{currency_codes_text, format_conversion, QueryError};
use crate::services::weather::format_forecast;
use crate::services::{CurrencyApi, CurrencyQuery, ImageApi, ServiceError, WeatherApi};
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Reply keyboard to attach to a message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyboard {
    /// Leave whatever the client shows
    Keep,
    /// Main function menu
    Menu,
    /// Anonymous / public choice
    Visibility,
    /// Hide the reply keyboard
    Remove,
}

/// One outgoing message
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Text { text: String, keyboard: Keyboard },
    Poll { poll: Poll, keyboard: Keyboard },
    Photo { image: Bytes, keyboard: Keyboard },
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self::with_keyboard(text, Keyboard::Keep)
    }

    fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self::Text {
            text: text.into(),
            keyboard,
        }
    }

    /// Text body, if this is a text reply
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// A stage's validation rule was not met
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A text message was expected
    #[error("message has no text")]
    NotText,
    #[error("empty city name")]
    EmptyCity,
    #[error("currency query: {0}")]
    Currency(#[from] QueryError),
    #[error("unknown poll visibility: {0}")]
    Visibility(String),
    #[error("empty poll question")]
    EmptyTopic,
    #[error("poll question longer than {} characters", MAX_POLL_QUESTION_CHARS)]
    TopicTooLong,
    #[error("expected 2 to {} options, got {}", MAX_POLL_OPTIONS, .0)]
    OptionCount(usize),
    #[error("poll option longer than {} characters", MAX_POLL_OPTION_CHARS)]
    OptionTooLong,
}

/// Why a step did not advance the flow
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The upstream call timed out or the host was unreachable
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    /// The upstream answered with an error or an unexpected payload
    #[error("upstream rejected: {0}")]
    UpstreamRejected(String),
    /// The user's message failed the stage's validation
    #[error("malformed input: {0}")]
    MalformedUserInput(#[from] InputError),
}

impl From<ServiceError> for FlowError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NetworkUnavailable(e) => Self::NetworkUnavailable(e),
            ServiceError::UpstreamRejected(e) => Self::UpstreamRejected(e),
        }
    }
}

/// Result of one step
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// State to store for the user
    pub next: State,
    /// Messages to send, in order
    pub replies: Vec<Reply>,
    /// Set when the step was rejected and the user was re-prompted
    pub failure: Option<FlowError>,
}

impl Transition {
    fn to(next: State, replies: Vec<Reply>) -> Self {
        Self {
            next,
            replies,
            failure: None,
        }
    }

    fn retry(state: &State, reply: Reply, failure: impl Into<FlowError>) -> Self {
        Self {
            next: state.clone(),
            replies: vec![reply],
            failure: Some(failure.into()),
        }
    }
}

/// Parse the anonymous / public choice, ignoring case
///
/// # Errors
///
/// Returns `InputError::Visibility` for any other text.
pub fn parse_visibility(text: &str, texts: &Texts) -> Result<bool, InputError> {
    let choice = text.trim().to_lowercase();
    if choice == texts.poll_anonymous.to_lowercase() {
        Ok(true)
    } else if choice == texts.poll_public.to_lowercase() {
        Ok(false)
    } else {
        Err(InputError::Visibility(text.to_string()))
    }
}

/// Validate a poll question
///
/// # Errors
///
/// Returns `InputError::EmptyTopic` for blank text and
/// `InputError::TopicTooLong` above the Telegram limit.
pub fn parse_topic(text: &str) -> Result<String, InputError> {
    let topic = text.trim();
    if topic.is_empty() {
        return Err(InputError::EmptyTopic);
    }
    if topic.chars().count() > MAX_POLL_QUESTION_CHARS {
        return Err(InputError::TopicTooLong);
    }
    Ok(topic.to_string())
}

/// Split answer options on newlines, dropping blank lines
///
/// # Errors
///
/// Returns `InputError::OptionCount` unless there are 2 to 10 options and
/// `InputError::OptionTooLong` if one exceeds the Telegram limit.
pub fn parse_poll_options(text: &str) -> Result<Vec<String>, InputError> {
    let options: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if !(2..=MAX_POLL_OPTIONS).contains(&options.len()) {
        return Err(InputError::OptionCount(options.len()));
    }
    if options
        .iter()
        .any(|o| o.chars().count() > MAX_POLL_OPTION_CHARS)
    {
        return Err(InputError::OptionTooLong);
    }
    Ok(options)
}

/// Per-user conversation engine shared by all sessions
pub struct Machine {
    weather: Arc<dyn WeatherApi>,
    currency: Arc<dyn CurrencyApi>,
    images: Arc<dyn ImageApi>,
    locale: Locale,
}

impl Machine {
    #[must_use]
    pub fn new(
        weather: Arc<dyn WeatherApi>,
        currency: Arc<dyn CurrencyApi>,
        images: Arc<dyn ImageApi>,
        locale: Locale,
    ) -> Self {
        Self {
            weather,
            currency,
            images,
            locale,
        }
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    fn texts(&self) -> &'static Texts {
        self.locale.texts()
    }

    /// Apply one input to `state`.
    ///
    /// Suspends only while an upstream API call is in flight.
    pub async fn step(&self, state: &State, input: Input) -> Transition {
        let text = match input {
            Input::Command(cmd) => return self.on_command(state, &cmd),
            Input::Text(text) => Some(text),
            Input::NonText => None,
        };

        match state {
            State::Idle => self.on_idle(text.as_deref()).await,
            State::AwaitingWeatherCity => self.on_city(state, text.as_deref()).await,
            State::AwaitingCurrencyQuery => self.on_currency_query(state, text.as_deref()).await,
            State::AwaitingPollVisibility => self.on_visibility(state, text.as_deref()),
            State::AwaitingPollTopic { is_anonymous } => {
                self.on_topic(state, *is_anonymous, text.as_deref())
            }
            State::AwaitingPollOptions {
                is_anonymous,
                topic,
            } => self.on_options(state, *is_anonymous, topic, text.as_deref()),
        }
    }

    fn on_command(&self, state: &State, cmd: &Command) -> Transition {
        let t = self.texts();
        match cmd {
            Command::Cancel => Transition::to(
                State::Idle,
                vec![
                    Reply::text(t.cancelled),
                    Reply::with_keyboard(t.menu_prompt, Keyboard::Menu),
                ],
            ),
            Command::State => {
                let name = if state.is_idle() {
                    t.no_state
                } else {
                    state.name()
                };
                Transition::to(state.clone(), vec![Reply::text(name)])
            }
            Command::Start => Transition::to(
                State::Idle,
                vec![Reply::with_keyboard(t.menu_prompt, Keyboard::Menu)],
            ),
            Command::Help => Transition::to(
                State::Idle,
                vec![
                    Reply::text(Command::help_text(t)),
                    Reply::with_keyboard(t.menu_prompt, Keyboard::Menu),
                ],
            ),
            Command::Codes => Transition::to(
                state.clone(),
                vec![Reply::text(currency_codes_text(self.locale))],
            ),
        }
    }

    async fn on_idle(&self, text: Option<&str>) -> Transition {
        let t = self.texts();
        let Some(action) = text.and_then(|text| MenuAction::recognize(text, t)) else {
            return Transition::to(State::Idle, Vec::new());
        };

        match action {
            MenuAction::Weather => Transition::to(
                State::AwaitingWeatherCity,
                vec![Reply::text(t.cancel_hint), Reply::text(t.weather_prompt)],
            ),
            MenuAction::Currency => Transition::to(
                State::AwaitingCurrencyQuery,
                vec![Reply::text(t.cancel_hint), Reply::text(t.currency_prompt)],
            ),
            MenuAction::Poll => Transition::to(
                State::AwaitingPollVisibility,
                vec![
                    Reply::text(t.cancel_hint),
                    Reply::with_keyboard(t.poll_visibility_prompt, Keyboard::Visibility),
                ],
            ),
            MenuAction::Image => match self.images.fetch().await {
                Ok(image) => Transition::to(
                    State::Idle,
                    vec![Reply::Photo {
                        image,
                        keyboard: Keyboard::Menu,
                    }],
                ),
                Err(e) => {
                    warn!("Image fetch failed: {e}");
                    Transition {
                        next: State::Idle,
                        replies: vec![Reply::with_keyboard(t.image_failed, Keyboard::Menu)],
                        failure: Some(e.into()),
                    }
                }
            },
        }
    }

    async fn on_city(&self, state: &State, text: Option<&str>) -> Transition {
        let t = self.texts();
        let city = match text.map(str::trim) {
            None => return Transition::retry(state, Reply::text(t.weather_prompt), InputError::NotText),
            Some("") => {
                return Transition::retry(state, Reply::text(t.weather_prompt), InputError::EmptyCity)
            }
            Some(city) => city,
        };

        match self.weather.current(city).await {
            Ok(forecast) => Transition::to(
                State::Idle,
                vec![Reply::with_keyboard(
                    format_forecast(&forecast, t),
                    Keyboard::Menu,
                )],
            ),
            Err(e) => {
                warn!(city = %city, "Weather lookup failed: {e}");
                let reply = match e {
                    ServiceError::NetworkUnavailable(_) => t.weather_unavailable,
                    ServiceError::UpstreamRejected(_) => t.weather_not_found,
                };
                Transition::retry(state, Reply::text(reply), e)
            }
        }
    }

    async fn on_currency_query(&self, state: &State, text: Option<&str>) -> Transition {
        let t = self.texts();
        let Some(text) = text else {
            return Transition::retry(state, Reply::text(t.currency_bad_format), InputError::NotText);
        };
        let query = match CurrencyQuery::parse(text) {
            Ok(query) => query,
            Err(e) => {
                return Transition::retry(state, Reply::text(t.currency_bad_format), InputError::from(e))
            }
        };

        match self.currency.convert(&query).await {
            Ok(conversion) => Transition::to(
                State::Idle,
                vec![Reply::with_keyboard(
                    format_conversion(&query, &conversion, t),
                    Keyboard::Menu,
                )],
            ),
            Err(e) => {
                warn!(from = %query.from, to = %query.to, "Currency conversion failed: {e}");
                let reply = match e {
                    ServiceError::NetworkUnavailable(_) => t.currency_unavailable,
                    ServiceError::UpstreamRejected(_) => t.currency_rejected,
                };
                Transition::retry(state, Reply::text(reply), e)
            }
        }
    }

    fn on_visibility(&self, state: &State, text: Option<&str>) -> Transition {
        let t = self.texts();
        let parsed = text
            .ok_or(InputError::NotText)
            .and_then(|text| parse_visibility(text, t));

        match parsed {
            Ok(is_anonymous) => Transition::to(
                State::AwaitingPollTopic { is_anonymous },
                vec![Reply::with_keyboard(t.poll_topic_prompt, Keyboard::Remove)],
            ),
            Err(e) => Transition::retry(
                state,
                Reply::with_keyboard(t.poll_visibility_error, Keyboard::Visibility),
                e,
            ),
        }
    }

    fn on_topic(&self, state: &State, is_anonymous: bool, text: Option<&str>) -> Transition {
        let t = self.texts();
        match text.ok_or(InputError::NotText).and_then(parse_topic) {
            Ok(topic) => Transition::to(
                State::AwaitingPollOptions {
                    is_anonymous,
                    topic,
                },
                vec![Reply::text(t.poll_options_prompt)],
            ),
            Err(e) => Transition::retry(state, Reply::text(t.poll_topic_error), e),
        }
    }

    fn on_options(
        &self,
        state: &State,
        is_anonymous: bool,
        topic: &str,
        text: Option<&str>,
    ) -> Transition {
        let t = self.texts();
        match text.ok_or(InputError::NotText).and_then(parse_poll_options) {
            Ok(options) => Transition::to(
                State::Idle,
                vec![
                    Reply::text(t.poll_ready),
                    Reply::Poll {
                        poll: Poll {
                            question: topic.to_string(),
                            options,
                            is_anonymous,
                        },
                        keyboard: Keyboard::Menu,
                    },
                ],
            ),
            Err(e) => Transition::retry(state, Reply::text(t.poll_options_error), e),
        }
    }
}
