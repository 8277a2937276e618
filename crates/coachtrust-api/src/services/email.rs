//! Email service for outgoing mail and admin notifications via SMTP.

use coachtrust_core::config::EmailBackendKind;
use coachtrust_core::{AppError, EmailSettings};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::stub::AsyncStubTransport;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
enum Mailer {
    Smtp(Arc<AsyncSmtpTransport<Tokio1Executor>>),
    /// Keeps messages in memory; used in test mode.
    Memory(AsyncStubTransport),
}

#[derive(Clone)]
pub struct EmailService {
    mailer: Mailer,
    from: String,
    server_email: String,
    subject_prefix: String,
    admins: Vec<String>,
}

impl EmailService {
    /// Build the transport from settings. SMTP transports connect lazily, so
    /// this never touches the network.
    pub fn from_settings(settings: &EmailSettings, admins: &[String]) -> Result<Self, AppError> {
        let mailer = match settings.backend {
            EmailBackendKind::Memory => {
                tracing::debug!("Email service initialized (in-memory)");
                Mailer::Memory(AsyncStubTransport::new_ok())
            }
            EmailBackendKind::Smtp => {
                let credentials = match (&settings.username, &settings.password) {
                    (Some(u), Some(p)) => Some(Credentials::new(u.clone(), p.clone())),
                    _ => None,
                };
                let timeout = Some(Duration::from_secs(settings.timeout_secs));

                let transport = if settings.use_tls {
                    let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                        .map_err(|e| {
                            AppError::Configuration(format!(
                                "Invalid SMTP host {}: {}",
                                settings.host, e
                            ))
                        })?
                        .port(settings.port)
                        .timeout(timeout);
                    let b = match credentials {
                        Some(c) => b.credentials(c),
                        None => b,
                    };
                    info!(
                        host = %settings.host,
                        port = settings.port,
                        "Email service initialized (SMTP with STARTTLS)"
                    );
                    b.build()
                } else {
                    let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
                        .port(settings.port)
                        .timeout(timeout);
                    let b = match credentials {
                        Some(c) => b.credentials(c),
                        None => b,
                    };
                    info!(host = %settings.host, port = settings.port, "Email service initialized (SMTP)");
                    b.build()
                };
                Mailer::Smtp(Arc::new(transport))
            }
        };

        Ok(Self {
            mailer,
            from: settings.default_from.clone(),
            server_email: settings.server_email.clone(),
            subject_prefix: settings.subject_prefix.clone(),
            admins: admins.to_vec(),
        })
    }

    /// Send a plain-text email from the default sender.
    pub async fn send(&self, to: &[String], subject: &str, body_plain: &str) -> Result<(), AppError> {
        self.deliver(&self.from, to, subject, body_plain).await
    }

    /// Notify the configured admins from the server address. No-op without admins.
    pub async fn mail_admins(&self, subject: &str, body_plain: &str) -> Result<(), AppError> {
        if self.admins.is_empty() {
            tracing::debug!("No admins configured, skipping admin notification");
            return Ok(());
        }
        self.deliver(&self.server_email, &self.admins, subject, body_plain)
            .await
    }

    async fn deliver(
        &self,
        from: &str,
        to: &[String],
        subject: &str,
        body_plain: &str,
    ) -> Result<(), AppError> {
        if to.is_empty() {
            return Ok(());
        }
        let to_addrs: Vec<Mailbox> = to.iter().filter_map(|s| s.parse().ok()).collect();
        if to_addrs.is_empty() {
            return Err(AppError::Email("No valid recipient addresses".to_string()));
        }
        let from_addr: Mailbox = from
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid sender address: {}", e)))?;

        let mut builder = Message::builder()
            .from(from_addr)
            .subject(format!("{}{}", self.subject_prefix, subject));
        for mb in &to_addrs {
            builder = builder.to(mb.clone());
        }
        let email = builder
            .header(ContentType::TEXT_PLAIN)
            .body(body_plain.to_string())
            .map_err(|e| AppError::Email(e.to_string()))?;

        match &self.mailer {
            Mailer::Smtp(mailer) => {
                mailer
                    .send(email)
                    .await
                    .map_err(|e| AppError::Email(e.to_string()))?;
            }
            Mailer::Memory(stub) => {
                stub.send(email)
                    .await
                    .map_err(|e| AppError::Email(e.to_string()))?;
            }
        }
        info!(count = to_addrs.len(), "Email sent");
        Ok(())
    }

    /// Messages captured by the in-memory backend, as raw RFC 5322 text.
    pub async fn outbox(&self) -> Vec<String> {
        match &self.mailer {
            Mailer::Memory(stub) => stub
                .messages()
                .await
                .into_iter()
                .map(|(_, message)| message)
                .collect(),
            Mailer::Smtp(_) => Vec::new(),
        }
    }
}
