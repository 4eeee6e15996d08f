//! API Ninjas currency conversion client and formatter

use crate::locale::{Locale, Texts};
use crate::services::http_utils::get_json;
use crate::services::{CurrencyApi, ServiceError};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Supported currencies: ISO code, Russian name, English name
pub const CURRENCY_CODES: &[(&str, &str, &str)] = &[
    ("RUB", "Российский рубль", "Russian ruble"),
    ("USD", "Доллар США", "US dollar"),
    ("EUR", "Евро", "Euro"),
    ("GBP", "Фунт стерлингов", "Pound sterling"),
    ("CNY", "Китайский юань", "Chinese yuan"),
    ("JPY", "Японская иена", "Japanese yen"),
    ("CHF", "Швейцарский франк", "Swiss franc"),
    ("KZT", "Казахстанский тенге", "Kazakhstani tenge"),
    ("BYN", "Белорусский рубль", "Belarusian ruble"),
    ("UAH", "Украинская гривна", "Ukrainian hryvnia"),
    ("TRY", "Турецкая лира", "Turkish lira"),
    ("AED", "Дирхам ОАЭ", "UAE dirham"),
    ("INR", "Индийская рупия", "Indian rupee"),
    ("CAD", "Канадский доллар", "Canadian dollar"),
    ("AUD", "Австралийский доллар", "Australian dollar"),
];

/// Why a conversion request line could not be parsed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The line did not contain exactly three tokens
    #[error("expected 3 tokens, got {0}")]
    TokenCount(usize),
    /// The amount is not a positive number
    #[error("invalid amount: {0}")]
    Amount(String),
}

/// A parsed `<from> <amount> <to>` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyQuery {
    /// Currency the user has
    pub from: String,
    /// Amount as typed by the user
    pub amount: String,
    /// Currency the user wants
    pub to: String,
}

impl CurrencyQuery {
    /// Split a line into exactly three whitespace-separated tokens.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::TokenCount` for any other token count and
    /// `QueryError::Amount` when the amount is not a positive finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use multitool_bot::services::CurrencyQuery;
    /// let q = CurrencyQuery::parse("RUB 5000 USD").unwrap();
    /// assert_eq!((q.from.as_str(), q.amount.as_str(), q.to.as_str()), ("RUB", "5000", "USD"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let [from, amount, to] = tokens.as_slice() else {
            return Err(QueryError::TokenCount(tokens.len()));
        };

        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {}
            _ => return Err(QueryError::Amount((*amount).to_string())),
        }

        Ok(Self {
            from: (*from).to_string(),
            amount: (*amount).to_string(),
            to: (*to).to_string(),
        })
    }
}

/// Result of a conversion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversion {
    /// Converted amount in the target currency
    pub new_amount: f64,
}

/// Client for the API Ninjas `convertcurrency` endpoint
pub struct NinjasCurrencyClient {
    http: HttpClient,
    url: String,
    api_key: String,
}

impl NinjasCurrencyClient {
    /// Create a client for `url` authenticated with `api_key`
    #[must_use]
    pub fn new(http: HttpClient, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl CurrencyApi for NinjasCurrencyClient {
    async fn convert(&self, query: &CurrencyQuery) -> Result<Conversion, ServiceError> {
        debug!(from = %query.from, to = %query.to, "Requesting currency conversion");
        let request = self
            .http
            .get(&self.url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("want", query.to.as_str()),
                ("have", query.from.as_str()),
                ("amount", query.amount.as_str()),
            ]);
        get_json(request).await
    }
}

/// "From 5000 RUB you get 63.2 USD"
#[must_use]
pub fn format_conversion(query: &CurrencyQuery, conversion: &Conversion, texts: &Texts) -> String {
    format!(
        "{} {} {} {} {} {}",
        texts.conversion_from,
        query.amount,
        query.from,
        texts.conversion_result,
        conversion.new_amount,
        query.to
    )
}

/// Reply to the `/codes` command
#[must_use]
pub fn currency_codes_text(locale: Locale) -> String {
    let mut text = locale.texts().codes_header.to_string();
    for (code, ru, en) in CURRENCY_CODES {
        let name = match locale {
            Locale::Ru => ru,
            Locale::En => en,
        };
        text.push('\n');
        text.push_str(code);
        text.push_str(" - ");
        text.push_str(name);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::create_http_client;
    use mockito::Matcher;

    #[test]
    fn test_parse_three_tokens() {
        let q = CurrencyQuery::parse("RUB 5000 USD");
        assert_eq!(
            q,
            Ok(CurrencyQuery {
                from: "RUB".to_string(),
                amount: "5000".to_string(),
                to: "USD".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let q = CurrencyQuery::parse("  EUR\t12.5   GBP \n");
        assert!(matches!(q, Ok(ref q) if q.amount == "12.5" && q.to == "GBP"));
    }

    #[test]
    fn test_parse_wrong_token_count() {
        assert_eq!(CurrencyQuery::parse("RUB USD"), Err(QueryError::TokenCount(2)));
        assert_eq!(
            CurrencyQuery::parse("RUB 1 USD EUR"),
            Err(QueryError::TokenCount(4))
        );
        assert_eq!(CurrencyQuery::parse(""), Err(QueryError::TokenCount(0)));
    }

    #[test]
    fn test_parse_bad_amount() {
        assert!(matches!(
            CurrencyQuery::parse("RUB many USD"),
            Err(QueryError::Amount(_))
        ));
        assert!(matches!(
            CurrencyQuery::parse("RUB -5 USD"),
            Err(QueryError::Amount(_))
        ));
    }

    #[test]
    fn test_format_conversion() {
        let q = CurrencyQuery::parse("RUB 5000 USD").unwrap_or_else(|e| panic!("{e}"));
        let text = format_conversion(&q, &Conversion { new_amount: 63.25 }, Locale::Ru.texts());
        assert_eq!(text, "Из 5000 RUB вы получите 63.25 USD");
    }

    #[test]
    fn test_codes_text_lists_every_code() {
        let text = currency_codes_text(Locale::En);
        assert!(text.starts_with("Currency codes:"));
        for (code, _, _) in CURRENCY_CODES {
            assert!(text.contains(code));
        }
    }

    #[tokio::test]
    async fn test_convert_sends_key_and_query() -> Result<(), ServiceError> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/convertcurrency")
            .match_header("x-api-key", "c-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("want".into(), "USD".into()),
                Matcher::UrlEncoded("have".into(), "RUB".into()),
                Matcher::UrlEncoded("amount".into(), "5000".into()),
            ]))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "new_amount": 63.25,
                    "new_currency": "USD",
                    "old_currency": "RUB",
                    "old_amount": 5000.0
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = NinjasCurrencyClient::new(
            create_http_client(5),
            format!("{}/convertcurrency", server.url()),
            "c-key",
        );
        let q = CurrencyQuery::parse("RUB 5000 USD").unwrap_or_else(|e| panic!("{e}"));
        let conversion = client.convert(&q).await?;

        mock.assert_async().await;
        assert!((conversion.new_amount - 63.25).abs() < f64::EPSILON);
        Ok(())
    }

    #[tokio::test]
    async fn test_convert_rejected_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/convertcurrency")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error": "Invalid currency"}"#)
            .create_async()
            .await;

        let client = NinjasCurrencyClient::new(
            create_http_client(5),
            format!("{}/convertcurrency", server.url()),
            "c-key",
        );
        let q = CurrencyQuery::parse("XXX 1 YYY").unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            client.convert(&q).await,
            Err(ServiceError::UpstreamRejected(_))
        ));
    }
}
