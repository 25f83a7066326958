mod health_check;
mod mail;

pub use health_check::*;
pub use mail::{NOTIFICATION_SUBJECT, mail_deets};
