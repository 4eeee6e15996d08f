use dotenvy::dotenv;
use multitool_bot::bot;
use multitool_bot::config::{get_http_timeout_secs, Settings};
use multitool_bot::dialogue::{Command, Machine, State};
use multitool_bot::locale::Locale;
use multitool_bot::services::{
    create_http_client, CataasClient, NinjasCurrencyClient, OpenWeatherClient,
};
use multitool_bot::logging::{self, Redactor};
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    dotenv().ok();

    // Masking rules must exist before the first log line
    let redactor = Arc::new(Redactor::new().map_err(|e| {
        eprintln!("Failed to compile redaction patterns: {e}");
        e
    })?);
    logging::init(redactor);

    info!("Starting multitool bot...");

    let settings = init_settings();
    let machine = init_machine(&settings);
    info!("API clients initialized (language: {:?}).", settings.bot_language);

    let bot = Bot::new(settings.telegram_token.clone());
    register_commands(&bot, settings.bot_language).await;

    info!("Bot is running...");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![machine, InMemStorage::<State>::new()])
        .distribution_function(bot::session_distribution)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

fn init_settings() -> Settings {
    match Settings::new() {
        Ok(s) => {
            info!("Configuration loaded successfully.");
            s
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_machine(settings: &Settings) -> Arc<Machine> {
    let http = create_http_client(get_http_timeout_secs());

    let weather = OpenWeatherClient::new(
        http.clone(),
        settings.weather_api_url.clone(),
        settings.weather_token.clone(),
        settings.bot_language,
        settings.weather_units.clone(),
    );
    let currency = NinjasCurrencyClient::new(
        http.clone(),
        settings.currency_api_url.clone(),
        settings.currency_token.clone(),
    );
    let images = CataasClient::new(http, settings.image_api_url.clone());

    Arc::new(Machine::new(
        Arc::new(weather),
        Arc::new(currency),
        Arc::new(images),
        settings.bot_language,
    ))
}

async fn register_commands(bot: &Bot, locale: Locale) {
    if let Err(e) = bot.set_my_commands(Command::menu(locale.texts())).await {
        warn!("Failed to register bot commands: {}", e);
    }
}
