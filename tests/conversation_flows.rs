mod common;

use common::{machine, machine_with_weather, StubWeather};
use multitool_bot::dialogue::{Command, FlowError, Input, Keyboard, Poll, Reply, State};
use multitool_bot::locale::Locale;
use std::sync::Arc;

fn text(s: &str) -> Input {
    Input::Text(s.to_string())
}

fn polls(replies: &[Reply]) -> Vec<&Poll> {
    replies
        .iter()
        .filter_map(|r| match r {
            Reply::Poll { poll, .. } => Some(poll),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn weather_scenario_in_russian() {
    let weather = Arc::new(StubWeather::default());
    let machine = machine_with_weather(Locale::Ru, weather.clone());

    let prompt = machine.step(&State::Idle, text("Погода")).await;
    assert_eq!(prompt.next, State::AwaitingWeatherCity);
    assert_eq!(prompt.replies.len(), 2);

    let done = machine.step(&prompt.next, text("Paris")).await;
    assert_eq!(done.next, State::Idle);
    assert_eq!(
        done.replies,
        vec![Reply::Text {
            text: "Температура: 21 °C\nОщущается как: 20 °C\nСостояние: ясно\nВетер: 2.5 м/c"
                .to_string(),
            keyboard: Keyboard::Menu,
        }]
    );

    let cities = weather.cities.lock().map(|c| c.clone()).unwrap_or_default();
    assert_eq!(cities, vec!["Paris".to_string()]);
}

#[tokio::test]
async fn poll_scenario_public_lunch() {
    let machine = machine(Locale::En);

    let mut state = State::Idle;
    for message in ["Create poll", "public", "Lunch?"] {
        let step = machine.step(&state, text(message)).await;
        assert!(polls(&step.replies).is_empty());
        state = step.next;
    }
    assert_eq!(
        state,
        State::AwaitingPollOptions {
            is_anonymous: false,
            topic: "Lunch?".to_string()
        }
    );

    let done = machine.step(&state, text("Pizza\nSushi")).await;
    assert_eq!(done.next, State::Idle);
    assert_eq!(
        polls(&done.replies),
        vec![&Poll {
            question: "Lunch?".to_string(),
            options: vec!["Pizza".to_string(), "Sushi".to_string()],
            is_anonymous: false,
        }]
    );
}

#[tokio::test]
async fn anonymous_poll_in_russian() {
    let machine = machine(Locale::Ru);

    let s1 = machine.step(&State::Idle, text("создать опрос")).await;
    let s2 = machine.step(&s1.next, text("АНОНИМНЫЙ")).await;
    assert_eq!(s2.next, State::AwaitingPollTopic { is_anonymous: true });
}

#[tokio::test]
async fn currency_two_tokens_then_retry() {
    let machine = machine(Locale::Ru);

    let start = machine.step(&State::Idle, text("Курс валют")).await;
    assert_eq!(start.next, State::AwaitingCurrencyQuery);

    let bad = machine.step(&start.next, text("RUB USD")).await;
    assert_eq!(bad.next, State::AwaitingCurrencyQuery);
    assert!(matches!(bad.failure, Some(FlowError::MalformedUserInput(_))));

    let good = machine.step(&bad.next, text("RUB 5000 USD")).await;
    assert_eq!(good.next, State::Idle);
    assert_eq!(
        good.replies[0].as_text(),
        Some("Из 5000 RUB вы получите 50 USD")
    );
}

#[tokio::test]
async fn codes_during_currency_flow_keeps_stage() {
    let machine = machine(Locale::Ru);
    let result = machine
        .step(&State::AwaitingCurrencyQuery, Input::Command(Command::Codes))
        .await;
    assert_eq!(result.next, State::AwaitingCurrencyQuery);
    assert!(result.replies[0]
        .as_text()
        .is_some_and(|t| t.contains("RUB") && t.contains("USD")));
}

#[tokio::test]
async fn cancel_in_the_middle_of_a_poll() {
    let machine = machine(Locale::Ru);
    let state = State::AwaitingPollOptions {
        is_anonymous: true,
        topic: "Обед?".to_string(),
    };

    let cancelled = machine.step(&state, Input::from_text("/cancel", "")).await;
    assert_eq!(cancelled.next, State::Idle);
    assert!(cancelled.next.poll_draft().is_none());
    assert!(polls(&cancelled.replies).is_empty());

    let again = machine.step(&cancelled.next, Input::from_text("/cancel", "")).await;
    assert_eq!(again.next, State::Idle);
}

#[tokio::test]
async fn state_report_in_russian() {
    let machine = machine(Locale::Ru);

    let idle = machine.step(&State::Idle, Input::from_text("/state", "")).await;
    assert_eq!(idle.replies[0].as_text(), Some("Без состояния"));

    let busy = machine
        .step(&State::AwaitingWeatherCity, Input::from_text("/state", ""))
        .await;
    assert_eq!(busy.next, State::AwaitingWeatherCity);
    assert_eq!(busy.replies[0].as_text(), Some("AwaitingWeatherCity"));
}

#[tokio::test]
async fn start_resets_and_shows_menu() {
    let machine = machine(Locale::Ru);
    let result = machine
        .step(&State::AwaitingCurrencyQuery, Input::from_text("/start", ""))
        .await;
    assert_eq!(result.next, State::Idle);
    assert_eq!(
        result.replies,
        vec![Reply::Text {
            text: "Какой функцией бота вы хотите воспользоваться?".to_string(),
            keyboard: Keyboard::Menu,
        }]
    );
}

#[tokio::test]
async fn broken_image_server_apologizes() {
    let machine = machine(Locale::Ru);
    let result = machine.step(&State::Idle, text("Картинка с котиком")).await;
    assert_eq!(result.next, State::Idle);
    assert!(matches!(result.failure, Some(FlowError::NetworkUnavailable(_))));
    assert_eq!(
        result.replies[0].as_text(),
        Some("Простите, сервер с котиками отвалился")
    );
}
