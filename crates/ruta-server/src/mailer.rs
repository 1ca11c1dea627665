use crate::config::MailConfig;
use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP mailer for account verification mail.
///
/// Sends are single-shot: a failure is reported to the caller once and never
/// retried.
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: lettre::message::Mailbox,
}

impl Mailer {
    pub fn from_config(config: &MailConfig) -> Result<Self> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .with_context(|| format!("Invalid SMTP host: {}", config.smtp_host))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();
        let from = config
            .from
            .parse()
            .with_context(|| format!("Invalid sender mailbox: {}", config.from))?;
        Ok(Self { transport, from })
    }

    #[tracing::instrument(skip(self, verification_url))]
    pub async fn send_verification(&self, to: &str, verification_url: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse().with_context(|| format!("Invalid recipient: {}", to))?)
            .subject("Verify your email")
            .header(ContentType::TEXT_HTML)
            .body(format!(
                "<p>Please verify your email by clicking the following link: \
                 <a href=\"{url}\">{url}</a></p>",
                url = verification_url
            ))
            .context("Failed to build verification mail")?;

        self.transport
            .send(message)
            .await
            .context("Failed to send verification mail")?;
        Ok(())
    }
}

/// Verification link handed out in registration and resend mail
pub fn verification_url(public_base_url: &str, token: &str) -> String {
    format!(
        "{}/api/auth/verify?token={}",
        public_base_url.trim_end_matches('/'),
        token
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_url() {
        let url = verification_url("https://ruta.example.com", "abc123");
        assert_eq!(url, "https://ruta.example.com/api/auth/verify?token=abc123");
    }

    #[test]
    fn test_verification_url_trims_trailing_slash() {
        let url = verification_url("http://localhost:8080/", "abc123");
        assert_eq!(url, "http://localhost:8080/api/auth/verify?token=abc123");
    }

    #[test]
    fn test_mailer_from_config() {
        let mailer = Mailer::from_config(&MailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: "noreply@example.com".to_string(),
            password: "app-password".to_string(),
            from: "Ruta <noreply@example.com>".to_string(),
        });
        assert!(mailer.is_ok());
    }

    #[test]
    fn test_mailer_rejects_bad_sender() {
        let mailer = Mailer::from_config(&MailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: "noreply@example.com".to_string(),
            password: "app-password".to_string(),
            from: "not a mailbox".to_string(),
        });
        assert!(mailer.is_err());
    }
}
