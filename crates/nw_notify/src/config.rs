use lettre::message::Mailbox;
use nw_core::{Error, Result};
use std::fmt;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
/// Port that selects implicit TLS instead of STARTTLS.
pub const IMPLICIT_TLS_PORT: u16 = 465;

/// SMTP settings, read from `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`,
/// `SMTP_PASS`, `MAIL_TO` and `MAIL_FROM`.
#[derive(Clone, PartialEq)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: Mailbox,
    pub to: Vec<Mailbox>,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &str| optional(key).ok_or_else(|| Error::Config(format!("{} must be set", key)));

        let host = optional("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string());
        let port = match optional("SMTP_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| Error::Config(format!("SMTP_PORT must be a port number, got {}", port)))?,
            None => DEFAULT_SMTP_PORT,
        };
        let username = required("SMTP_USER")?;
        let password = lookup("SMTP_PASS")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Config("SMTP_PASS must be set".to_string()))?;

        let to = required("MAIL_TO")?
            .split(',')
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map(parse_mailbox)
            .collect::<Result<Vec<_>>>()?;
        if to.is_empty() {
            return Err(Error::Config("MAIL_TO has no recipients".to_string()));
        }

        let from = parse_mailbox(&optional("MAIL_FROM").unwrap_or_else(|| username.clone()))?;

        Ok(Self {
            host,
            port,
            username,
            password,
            from,
            to,
        })
    }

    pub fn implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }
}

fn parse_mailbox(addr: &str) -> Result<Mailbox> {
    addr.parse()
        .map_err(|e| Error::Config(format!("Invalid mail address {}: {}", addr, e)))
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from", &self.from.to_string())
            .field("to", &self.to.iter().map(|m| m.to_string()).collect::<Vec<_>>())
            .finish()
    }
}
