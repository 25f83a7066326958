use crate::domain::{FormParams, FormSubmission};
use crate::email_client::EmailClient;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError, post, web};
use anyhow::Context;

pub const NOTIFICATION_SUBJECT: &str = "Yome form filled out";

#[derive(thiserror::Error)]
pub enum MailDeetsError {
    #[error("The form body could not be decoded")]
    InvalidBody(#[source] serde_urlencoded::de::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for MailDeetsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for MailDeetsError {
    fn status_code(&self) -> StatusCode {
        match self {
            MailDeetsError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            MailDeetsError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::new(self.status_code())
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// The body is decoded as urlencoded whatever the declared content type, so a bare POST
/// is an empty submission rather than a 415.
#[tracing::instrument(
    name = "Forwarding a yome request",
    skip(body, email_client),
    fields(body_bytes = body.len())
)]
#[post("/mail/deets")]
pub async fn mail_deets(
    body: web::Bytes,
    email_client: web::Data<EmailClient>,
) -> Result<HttpResponse, MailDeetsError> {
    let params = FormParams::parse(&body).map_err(MailDeetsError::InvalidBody)?;
    tracing::info!(params = %params, "Received form submission");

    let submission = FormSubmission::from(&params);
    email_client
        .send_email(NOTIFICATION_SUBJECT, &submission.notification_body())
        .await
        .context("Failed to send the yome request notification.")?;

    Ok(HttpResponse::Ok().content_type(ContentType::json()).finish())
}
