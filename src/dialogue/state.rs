use serde::{Deserialize, Serialize};

/// Telegram limit on the number of poll options
pub const MAX_POLL_OPTIONS: usize = 10;
/// Telegram limit on the length of one poll option
pub const MAX_POLL_OPTION_CHARS: usize = 100;
/// Telegram limit on the length of a poll question
pub const MAX_POLL_QUESTION_CHARS: usize = 300;

/// What the bot expects next from a user.
///
/// Poll draft data is carried inside the poll variants, so it exists only
/// while a poll is being built and disappears with any reset to `Idle`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum State {
    /// No flow in progress
    #[default]
    Idle,
    /// Next text is a city name
    AwaitingWeatherCity,
    /// Next text is `<from> <amount> <to>`
    AwaitingCurrencyQuery,
    /// Next text picks anonymous or public
    AwaitingPollVisibility,
    /// Next text is the poll question
    AwaitingPollTopic {
        /// Visibility chosen in the previous step
        is_anonymous: bool,
    },
    /// Next text holds the answer options, one per line
    AwaitingPollOptions {
        /// Visibility chosen earlier
        is_anonymous: bool,
        /// Question chosen in the previous step
        topic: String,
    },
}

impl State {
    /// Stage name reported by `/state`
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::AwaitingWeatherCity => "AwaitingWeatherCity",
            Self::AwaitingCurrencyQuery => "AwaitingCurrencyQuery",
            Self::AwaitingPollVisibility => "AwaitingPollVisibility",
            Self::AwaitingPollTopic { .. } => "AwaitingPollTopic",
            Self::AwaitingPollOptions { .. } => "AwaitingPollOptions",
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Partial poll accumulated so far, `None` outside the poll flow
    #[must_use]
    pub fn poll_draft(&self) -> Option<PollDraft> {
        match self {
            Self::AwaitingPollVisibility => Some(PollDraft::default()),
            Self::AwaitingPollTopic { is_anonymous } => Some(PollDraft {
                is_anonymous: Some(*is_anonymous),
                topic: None,
            }),
            Self::AwaitingPollOptions {
                is_anonymous,
                topic,
            } => Some(PollDraft {
                is_anonymous: Some(*is_anonymous),
                topic: Some(topic.clone()),
            }),
            _ => None,
        }
    }
}

/// View of an unfinished poll
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollDraft {
    pub is_anonymous: Option<bool>,
    pub topic: Option<String>,
}

/// A finished poll, emitted in a single reply
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poll {
    /// Poll question
    pub question: String,
    /// Answer options in the order the user typed them
    pub options: Vec<String>,
    /// Whether votes are hidden
    pub is_anonymous: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_only_in_poll_stages() {
        assert_eq!(State::Idle.poll_draft(), None);
        assert_eq!(State::AwaitingWeatherCity.poll_draft(), None);
        assert_eq!(State::AwaitingCurrencyQuery.poll_draft(), None);
        assert_eq!(
            State::AwaitingPollVisibility.poll_draft(),
            Some(PollDraft::default())
        );

        let state = State::AwaitingPollOptions {
            is_anonymous: false,
            topic: "Lunch?".to_string(),
        };
        assert_eq!(
            state.poll_draft(),
            Some(PollDraft {
                is_anonymous: Some(false),
                topic: Some("Lunch?".to_string()),
            })
        );
    }

    #[test]
    fn test_names_are_unique() {
        let states = [
            State::Idle,
            State::AwaitingWeatherCity,
            State::AwaitingCurrencyQuery,
            State::AwaitingPollVisibility,
            State::AwaitingPollTopic { is_anonymous: true },
            State::AwaitingPollOptions {
                is_anonymous: true,
                topic: "t".to_string(),
            },
        ];
        let names: std::collections::HashSet<_> = states.iter().map(State::name).collect();
        assert_eq!(names.len(), states.len());
    }
}
