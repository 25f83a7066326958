use crate::email_client::EmailClient;
use anyhow::Context;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::extension::ClientId;
use lettre::{AsyncSmtpTransport, Tokio1Executor};
use secrecy::{ExposeSecret, SecretBox};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use std::time::Duration;

#[derive(serde::Deserialize, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Largest request body accepted by the form route.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_body_bytes: usize,
}

#[derive(serde::Deserialize, Debug)]
pub struct EmailClientSettings {
    pub smtp_host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub smtp_port: u16,
    pub helo_domain: String,
    pub username: String,
    pub password: SecretBox<String>,
    pub sender_email: String,
    pub recipients: Vec<String>,
    #[serde(
        rename = "timeout_milliseconds",
        deserialize_with = "deserialize_duration_from_millis"
    )]
    pub timeout: Duration,
}

fn deserialize_duration_from_millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let millis = u64::deserialize(deserializer)?;
    Ok(Duration::from_millis(millis))
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<Mailbox, anyhow::Error> {
        self.sender_email
            .parse()
            .with_context(|| format!("'{}' is not a valid sender address", self.sender_email))
    }

    pub fn recipients(&self) -> Result<Vec<Mailbox>, anyhow::Error> {
        self.recipients
            .iter()
            .map(|recipient| {
                recipient
                    .parse()
                    .with_context(|| format!("'{}' is not a valid recipient address", recipient))
            })
            .collect()
    }

    /// STARTTLS relay authenticating with PLAIN, as the SendGrid relay expects.
    pub fn smtp_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, anyhow::Error> {
        let credentials = Credentials::new(
            self.username.clone(),
            self.password.expose_secret().clone(),
        );
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_host)
            .with_context(|| format!("Failed to configure the SMTP relay {}", self.smtp_host))?
            .port(self.smtp_port)
            .hello_name(ClientId::Domain(self.helo_domain.clone()))
            .credentials(credentials)
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(self.timeout))
            .build();
        Ok(transport)
    }

    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        if self.recipients.is_empty() {
            anyhow::bail!("At least one notification recipient must be configured");
        }
        Ok(EmailClient::new(
            self.smtp_transport()?,
            self.sender()?,
            self.recipients()?,
        ))
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!("{} is not a valid environment", other)),
        }
    }
}

pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path =
        std::env::current_dir().context("Failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Failed to parse APP_ENVIRONMENT.")?;

    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("email_client.username", std::env::var("SENDGRID_USERNAME").ok())?
        .set_override_option("email_client.password", std::env::var("SENDGRID_PASSWORD").ok())?
        .set_override_option("application.port", std::env::var("PORT").ok())?
        .build()?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize the application settings")
}
