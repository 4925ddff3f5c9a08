use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use nw_core::{Dispatcher, Error, NewPostsByBoard, Result};
use std::time::Duration;
use tracing::info;

use crate::config::MailConfig;
use crate::render::{now_kst, render, RenderedMessage};

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends the run's message over SMTP.
///
/// Built without settings, it reads them from the environment only when a
/// message actually has to go out.
#[derive(Debug, Clone, Default)]
pub struct EmailDispatcher {
    config: Option<MailConfig>,
}

impl EmailDispatcher {
    pub fn from_env() -> Self {
        Self { config: None }
    }

    pub fn with_config(config: MailConfig) -> Self {
        Self {
            config: Some(config),
        }
    }

    fn resolve_config(&self) -> Result<MailConfig> {
        match &self.config {
            Some(config) => Ok(config.clone()),
            None => MailConfig::from_env(),
        }
    }
}

pub fn build_email(config: &MailConfig, message: &RenderedMessage) -> Result<Message> {
    let mut builder = Message::builder()
        .from(config.from.clone())
        .subject(message.subject.clone());
    for to in &config.to {
        builder = builder.to(to.clone());
    }
    builder
        .multipart(MultiPart::alternative_plain_html(
            message.text.clone(),
            message.html.clone(),
        ))
        .map_err(|e| Error::Notify(format!("Failed to build email: {}", e)))
}

pub fn build_transport(config: &MailConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
    let builder = if config.implicit_tls() {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
    }
    .map_err(|e| Error::Notify(format!("SMTP setup failed: {}", e)))?;

    Ok(builder
        .port(config.port)
        .credentials(Credentials::new(config.username.clone(), config.password.clone()))
        .timeout(Some(SMTP_TIMEOUT))
        .build())
}

#[async_trait]
impl Dispatcher for EmailDispatcher {
    fn name(&self) -> &str {
        "email"
    }

    async fn dispatch(&self, posts: &NewPostsByBoard) -> Result<()> {
        let config = self.resolve_config()?;
        let message = render(posts, now_kst());
        let email = build_email(&config, &message)?;
        let transport = build_transport(&config)?;

        transport
            .send(email)
            .await
            .map_err(|e| Error::Notify(format!("SMTP send failed: {}", e)))?;
        info!("📧 Mail sent to {} recipients: {}", config.to.len(), message.subject);
        Ok(())
    }
}
