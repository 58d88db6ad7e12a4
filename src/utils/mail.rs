use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::instrument;

use crate::config::MailConfig;
use crate::error::AppError;

/// Best-effort delivery of account emails.
///
/// Without SMTP settings the message is not sent; the reset link is written
/// to the log so a developer can still follow it.
pub struct Mailer {
    config: Option<MailConfig>,
}

impl Mailer {
    pub fn new(config: Option<MailConfig>) -> Self {
        Self { config }
    }

    #[instrument(skip(self, reset_link))]
    pub async fn send_password_reset(&self, to_email: &str, reset_link: &str) -> Result<(), AppError> {
        let Some(config) = &self.config else {
            tracing::info!(
                "No SMTP server configured; password reset link for {}: {}",
                to_email,
                reset_link
            );
            return Ok(());
        };

        let body = format!(
            "Hola,\n\n\
             Recibimos una solicitud para restablecer tu contraseña. \
             Usa este enlace (válido 1 hora):\n\n\
             {}\n\n\
             Si no lo pediste, ignora este correo.\n\n\
             Saludos,\n\
             {}",
            reset_link, config.sender_name
        );

        let from = format!("{} <{}>", config.sender_name, config.username);
        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::InternalServerError(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::BadRequest(format!("Invalid to email: {}", e)))?)
            .subject(format!("Recuperar contraseña - {}", config.sender_name))
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| AppError::InternalServerError(format!("Failed to build email: {}", e)))?;

        let mailer = SmtpTransport::starttls_relay(&config.server)
            .map_err(|e| AppError::InternalServerError(format!("Failed to create SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::InternalServerError(format!("Failed to send email: {}", e)))?;

        tracing::info!("Password reset email sent to {}", to_email);
        Ok(())
    }
}
