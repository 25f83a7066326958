use anyhow::Context;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::stub::AsyncStubTransport;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Anything able to deliver an already-built message.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, message: Message) -> Result<(), anyhow::Error>;
}

#[async_trait]
impl MailTransport for AsyncSmtpTransport<Tokio1Executor> {
    async fn deliver(&self, message: Message) -> Result<(), anyhow::Error> {
        self.send(message)
            .await
            .context("The SMTP relay refused the message")?;
        Ok(())
    }
}

#[async_trait]
impl MailTransport for AsyncStubTransport {
    async fn deliver(&self, message: Message) -> Result<(), anyhow::Error> {
        self.send(message)
            .await
            .context("The stub transport refused the message")?;
        Ok(())
    }
}

pub struct EmailClient {
    transport: Box<dyn MailTransport>,
    sender: Mailbox,
    recipients: Vec<Mailbox>,
}

impl std::fmt::Debug for EmailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailClient")
            .field("sender", &self.sender)
            .field("recipients", &self.recipients)
            .finish_non_exhaustive()
    }
}

impl EmailClient {
    pub fn new(
        transport: impl MailTransport + 'static,
        sender: Mailbox,
        recipients: Vec<Mailbox>,
    ) -> Self {
        Self {
            transport: Box::new(transport),
            sender,
            recipients,
        }
    }

    pub fn sender(&self) -> &Mailbox {
        &self.sender
    }

    /// Sends one plain-text message to every configured recipient.
    pub async fn send_email(&self, subject: &str, text_content: &str) -> Result<(), anyhow::Error> {
        let message = self.build_message(subject, text_content)?;
        self.transport.deliver(message).await
    }

    fn build_message(&self, subject: &str, text_content: &str) -> Result<Message, anyhow::Error> {
        let mut builder = Message::builder().from(self.sender.clone());
        for recipient in &self.recipients {
            builder = builder.to(recipient.clone());
        }
        builder
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(text_content.to_string())
            .context("Failed to build the notification email")
    }
}
