//! Email service for transactional mail.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

/// HTML template for the email-verification link.
#[derive(Template)]
#[template(path = "email/verify_link.html")]
struct VerifyLinkHtml<'a> {
    link: &'a str,
}

/// Plain text template for the email-verification link.
#[derive(Template)]
#[template(path = "email/verify_link.txt")]
struct VerifyLinkText<'a> {
    link: &'a str,
}

/// HTML template for the password-reset link.
#[derive(Template)]
#[template(path = "email/password_reset.html")]
struct PasswordResetHtml<'a> {
    link: &'a str,
}

/// Plain text template for the password-reset link.
#[derive(Template)]
#[template(path = "email/password_reset.txt")]
struct PasswordResetText<'a> {
    link: &'a str,
}

/// HTML template for the order confirmation.
#[derive(Template)]
#[template(path = "email/order_confirmation.html")]
struct OrderConfirmationHtml<'a> {
    order_id: &'a str,
    total: &'a str,
    currency: &'a str,
}

/// Plain text template for the order confirmation.
#[derive(Template)]
#[template(path = "email/order_confirmation.txt")]
struct OrderConfirmationText<'a> {
    order_id: &'a str,
    total: &'a str,
    currency: &'a str,
}

/// HTML template for a support response to a contact message.
#[derive(Template)]
#[template(path = "email/contact_response.html")]
struct ContactResponseHtml<'a> {
    subject: &'a str,
    response: &'a str,
}

/// Plain text template for a support response to a contact message.
#[derive(Template)]
#[template(path = "email/contact_response.txt")]
struct ContactResponseText<'a> {
    subject: &'a str,
    response: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if SMTP connection fails.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }

    /// Send the email-verification link after registration.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_verification_link(&self, to: &str, link: &str) -> Result<(), EmailError> {
        let html = VerifyLinkHtml { link }.render()?;
        let text = VerifyLinkText { link }.render()?;

        self.send_multipart_email(to, "Verify your CYNA email address", &text, &html)
            .await
    }

    /// Send a password-reset link.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_password_reset_link(&self, to: &str, link: &str) -> Result<(), EmailError> {
        let html = PasswordResetHtml { link }.render()?;
        let text = PasswordResetText { link }.render()?;

        self.send_multipart_email(to, "Reset your CYNA password", &text, &html)
            .await
    }

    /// Send an order confirmation after successful checkout.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_order_confirmation(
        &self,
        to: &str,
        order_id: &str,
        total: &str,
        currency: &str,
    ) -> Result<(), EmailError> {
        let html = OrderConfirmationHtml {
            order_id,
            total,
            currency,
        }
        .render()?;
        let text = OrderConfirmationText {
            order_id,
            total,
            currency,
        }
        .render()?;

        self.send_multipart_email(to, &format!("CYNA order #{order_id} confirmed"), &text, &html)
            .await
    }

    /// Send a support response to a contact message.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_contact_response(
        &self,
        to: &str,
        subject: &str,
        response: &str,
    ) -> Result<(), EmailError> {
        let html = ContactResponseHtml { subject, response }.render()?;
        let text = ContactResponseText { subject, response }.render()?;

        self.send_multipart_email(to, &format!("Re: {subject}"), &text, &html)
            .await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_link_templates_render() {
        let link = "https://shop.cyna.io/api/auth/verify-email?token=abc123";
        let text = VerifyLinkText { link }.render().unwrap();
        let html = VerifyLinkHtml { link }.render().unwrap();
        assert!(text.contains(link));
        assert!(html.contains(link));
    }

    #[test]
    fn test_contact_response_templates_render() {
        let text = ContactResponseText {
            subject: "Invoice question",
            response: "We re-sent the invoice.",
        }
        .render()
        .unwrap();
        assert!(text.contains("Invoice question"));
        assert!(text.contains("We re-sent the invoice."));
    }

    #[test]
    fn test_html_escaping_in_response() {
        let html = ContactResponseHtml {
            subject: "a < b",
            response: "<script>alert(1)</script>",
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>"));
    }
}
