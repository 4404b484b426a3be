//! Concurrent fan-out of one message to many recipients.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::client::Bot;
use super::error::{DeliveryErrors, NotifyError, ProviderError, RecipientFailure};
use super::validation::validate;

impl Bot {
    /// Validate a notification and deliver it to every recipient concurrently.
    ///
    /// Each list entry gets its own delivery task, duplicates included.
    /// Returns only after every task has finished. Failures of individual
    /// recipients never stop the others and are reported together in
    /// [`NotifyError::Delivery`].
    pub async fn send_message(
        &self,
        cancel: &CancellationToken,
        text: &str,
        parse_mode: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        let parse_mode = validate(text, parse_mode, recipients)?;

        if cancel.is_cancelled() {
            return Err(NotifyError::Cancelled);
        }

        let text: Arc<str> = Arc::from(text);
        let mut tasks = JoinSet::new();
        let mut task_recipients = HashMap::with_capacity(recipients.len());

        for recipient in recipients {
            let bot = self.clone();
            let cancel = cancel.clone();
            let text = Arc::clone(&text);
            let owned = recipient.clone();

            let handle = tasks.spawn(async move {
                if cancel.is_cancelled() {
                    return Err(RecipientFailure {
                        recipient: owned,
                        error: ProviderError::Cancelled,
                    });
                }
                bot.send_one(&cancel, &owned, &text, parse_mode)
                    .await
                    .map_err(|error| RecipientFailure {
                        recipient: owned,
                        error,
                    })
            });
            task_recipients.insert(handle.id(), recipient.clone());
        }

        let mut failures = Vec::with_capacity(recipients.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(failure)) => {
                    warn!(
                        recipient = %failure.recipient,
                        error = %failure.error,
                        "Failed to deliver message"
                    );
                    failures.push(failure);
                }
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => failures.push(RecipientFailure {
                    recipient: task_recipients.remove(&err.id()).unwrap_or_default(),
                    error: ProviderError::Cancelled,
                }),
            }
        }

        info!(
            recipients = recipients.len(),
            failed = failures.len(),
            "Message dispatch finished"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotifyError::Delivery(DeliveryErrors::new(failures)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::error::ValidationError;
    use crate::telegram::types::MAX_MESSAGE_LEN;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;
    use std::time::Duration;

    fn test_bot(server: &MockServer) -> Bot {
        Bot::builder("fake-token")
            .api_base(server.base_url())
            .build()
            .unwrap()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_validation_errors_make_no_calls() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/botfake-token/sendMessage");
                then.status(200).json_body(json!({"ok": true, "result": {}}));
            })
            .await;
        let bot = test_bot(&server);
        let cancel = CancellationToken::new();

        let cases = [
            ("".to_string(), "", ids(&["1"]), ValidationError::MessageEmpty),
            (
                "a".repeat(MAX_MESSAGE_LEN + 1),
                "",
                ids(&["1"]),
                ValidationError::MessageTooLong {
                    len: MAX_MESSAGE_LEN + 1,
                    max: MAX_MESSAGE_LEN,
                },
            ),
            (
                "hi".to_string(),
                "Markdown2",
                ids(&["1"]),
                ValidationError::ParseModeInvalid("Markdown2".to_string()),
            ),
            ("hi".to_string(), "", Vec::new(), ValidationError::RecipientsEmpty),
        ];

        for (text, mode, recipients, expected) in cases {
            let err = bot
                .send_message(&cancel, &text, mode, &recipients)
                .await
                .unwrap_err();
            assert_eq!(err.validation(), Some(&expected));
        }

        mock.assert_calls_async(0).await;
    }

    #[tokio::test]
    async fn test_delivers_to_every_recipient() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/botfake-token/sendMessage");
                then.status(200).json_body(json!({"ok": true, "result": {}}));
            })
            .await;

        test_bot(&server)
            .send_message(
                &CancellationToken::new(),
                "hello",
                "MarkdownV2",
                &ids(&["1", "2", "3"]),
            )
            .await
            .unwrap();

        mock.assert_calls_async(3).await;
    }

    #[tokio::test]
    async fn test_each_recipient_gets_its_own_chat_id() {
        let server = MockServer::start_async().await;
        let mut mocks = Vec::new();
        for id in ["10", "20"] {
            let mock = server
                .mock_async(move |when, then| {
                    when.method(POST)
                        .path("/botfake-token/sendMessage")
                        .json_body(json!({"chat_id": id, "text": "hello"}));
                    then.status(200).json_body(json!({"ok": true, "result": {}}));
                })
                .await;
            mocks.push(mock);
        }

        test_bot(&server)
            .send_message(&CancellationToken::new(), "hello", "", &ids(&["10", "20"]))
            .await
            .unwrap();

        for mock in mocks {
            mock.assert_calls_async(1).await;
        }
    }

    #[tokio::test]
    async fn test_duplicate_recipients_each_attempted() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/botfake-token/sendMessage");
                then.status(200).json_body(json!({"ok": true, "result": {}}));
            })
            .await;

        test_bot(&server)
            .send_message(&CancellationToken::new(), "hello", "", &ids(&["7", "7"]))
            .await
            .unwrap();

        mock.assert_calls_async(2).await;
    }

    #[tokio::test]
    async fn test_partial_failure_is_aggregated() {
        let server = MockServer::start_async().await;
        let failing = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/botfake-token/sendMessage")
                    .body_includes(r#""chat_id":"2""#);
                then.status(403).json_body(json!({
                    "ok": false,
                    "error_code": 403,
                    "description": "Forbidden: bot was blocked by the user"
                }));
            })
            .await;
        let succeeding = server
            .mock_async(|when, then| {
                when.method(POST).path("/botfake-token/sendMessage");
                then.status(200).json_body(json!({"ok": true, "result": {}}));
            })
            .await;

        let err = test_bot(&server)
            .send_message(&CancellationToken::new(), "hello", "", &ids(&["1", "2", "3"]))
            .await
            .unwrap_err();

        let delivery = err.delivery().expect("delivery errors");
        assert_eq!(delivery.len(), 1);
        assert!(delivery.has_api_error());
        let failure = delivery.iter().next().unwrap();
        assert_eq!(failure.recipient, "2");
        assert!(err.to_string().contains("Forbidden: bot was blocked by the user"));

        failing.assert_calls_async(1).await;
        succeeding.assert_calls_async(2).await;
    }

    #[tokio::test]
    async fn test_cancelled_before_dispatch() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/botfake-token/sendMessage");
                then.status(200).json_body(json!({"ok": true, "result": {}}));
            })
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = test_bot(&server)
            .send_message(&cancel, "hello", "", &ids(&["1", "2"]))
            .await
            .unwrap_err();

        assert!(matches!(err, NotifyError::Cancelled));
        mock.assert_calls_async(0).await;
    }

    #[tokio::test]
    async fn test_cancelled_mid_flight_reports_every_recipient() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/botfake-token/sendMessage");
                then.status(200)
                    .delay(Duration::from_secs(5))
                    .json_body(json!({"ok": true, "result": {}}));
            })
            .await;

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let err = test_bot(&server)
            .send_message(&cancel, "hello", "", &ids(&["1", "2"]))
            .await
            .unwrap_err();

        let delivery = err.delivery().expect("delivery errors");
        assert_eq!(delivery.len(), 2);
        assert!(!delivery.has_api_error());
        assert!(
            delivery
                .iter()
                .all(|f| matches!(f.error, ProviderError::Cancelled))
        );
    }

    #[tokio::test]
    async fn test_network_failures_are_not_api_errors() {
        let bot = Bot::builder("fake-token")
            .api_base("http://127.0.0.1:1")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();

        let err = bot
            .send_message(&CancellationToken::new(), "hello", "", &ids(&["1", "2"]))
            .await
            .unwrap_err();

        let delivery = err.delivery().expect("delivery errors");
        assert_eq!(delivery.len(), 2);
        assert!(!delivery.has_api_error());
    }
}
