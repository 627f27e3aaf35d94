#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use async_trait::async_trait;
use parking_lot::Mutex;
use portfolio_contact::{
    constants::DEFAULT_SPAM_KEYWORDS,
    entities::mail::{DispatchReceipt, OutboundMessage},
    errors::DispatchError,
    repositories::mail_dispatcher::MailDispatcher,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use reqwest::Client;
use serde_json::{json, Value};
use std::{net::TcpListener, sync::Arc, time::Duration};

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn(dispatcher: Option<Arc<dyn MailDispatcher>>) -> Self {
        Self::spawn_with(test_config(), dispatcher).await
    }

    pub async fn spawn_with(config: AppConfig, dispatcher: Option<Arc<dyn MailDispatcher>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let state = web::Data::new(AppState::with_dispatcher(&config, dispatcher));

        let state_clone = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state_clone.clone())
                .wrap(NormalizePath::trim())
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        let app = Self {
            state,
            address,
            client,
            config,
        };

        while app.client.get(app.url("/unknown")).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        app
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_contact(&self, body: &Value) -> reqwest::Response {
        self.post_contact_from(body, None).await
    }

    pub async fn post_contact_from(&self, body: &Value, forwarded_for: Option<&str>) -> reqwest::Response {
        let mut request = self.client.post(self.url("/api/contact")).json(body);
        if let Some(ip) = forwarded_for {
            request = request.header("X-Forwarded-For", ip);
        }
        request.send().await.expect("Failed to post contact form")
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio Contact Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        cors_allowed_origins: vec!["*".to_string()],
        trust_x_forwarded_for: true,
        smtp_host: Some("smtp.example.com".to_string()),
        smtp_port: 587,
        smtp_secure: false,
        smtp_user: Some("mailer@example.com".to_string()),
        smtp_pass: Some("app-password".to_string()),
        smtp_timeout_secs: 10,
        mail_from: None,
        mail_from_name: "Portfolio Contact Form".to_string(),
        contact_email: Some("owner@example.com".to_string()),
        contact_rate_limit: 5,
        api_rate_limit: 100,
        rate_limit_window_secs: 15 * 60,
        spam_keywords: DEFAULT_SPAM_KEYWORDS.iter().map(|k| k.to_string()).collect(),
    }
}

pub fn valid_form() -> Value {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "message": "1234567890"
    })
}

/// Records every message and answers with a fresh id.
#[derive(Default)]
pub struct RecordingDispatcher {
    pub sent: Mutex<Vec<OutboundMessage>>,
    pub fail_acknowledgement: bool,
}

impl RecordingDispatcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_acknowledgement() -> Arc<Self> {
        Arc::new(Self {
            fail_acknowledgement: true,
            ..Self::default()
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().clone()
    }

    /// Waits for the background acknowledgement to land.
    pub async fn wait_for(&self, expected: usize) -> usize {
        for _ in 0..200 {
            if self.sent_count() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent_count()
    }
}

#[async_trait]
impl MailDispatcher for RecordingDispatcher {
    async fn send(&self, message: OutboundMessage) -> Result<DispatchReceipt, DispatchError> {
        let is_acknowledgement = message.reply_to.is_none();
        let id = {
            let mut sent = self.sent.lock();
            sent.push(message);
            sent.len()
        };

        if is_acknowledgement && self.fail_acknowledgement {
            return Err(DispatchError::Connection("relay went away".into()));
        }

        Ok(DispatchReceipt {
            message_id: format!("<test-{}@example.com>", id),
        })
    }

    async fn verify(&self) -> Result<(), DispatchError> {
        Ok(())
    }
}

pub fn as_dispatcher(dispatcher: &Arc<RecordingDispatcher>) -> Option<Arc<dyn MailDispatcher>> {
    Some(Arc::clone(dispatcher) as Arc<dyn MailDispatcher>)
}
