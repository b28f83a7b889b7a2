//! Outbound notifications.
//!
//! Delivery itself lives outside this crate: the HTTP service plugs in a mail
//! client, the CLI logs the message. The core only composes the activation
//! email and hands it to a [`Notifier`].

use thiserror::Error;
use tracing::info;

use crate::{config::Config, models::employee::Employee};

#[derive(Debug, Error)]
#[error("Failed to deliver '{subject}' to '{to}': {reason}")]
pub struct DeliveryError {
    pub to: String,
    pub subject: String,
    pub reason: String,
}

pub trait Notifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

pub const ACTIVATION_SUBJECT: &str = "Activate Your Time Tracker Account";

pub struct ActivationEmail {
    pub to: String,
    pub subject: &'static str,
    pub body: String,
}

impl ActivationEmail {
    pub fn compose(employee: &Employee, config: &Config) -> Self {
        let body = format!(
            "Hi {name},\n\n\
             Please activate your account by clicking the link below:\n\
             {activation}\n\n\
             Once activated, download the tracker here:\n\
             {download}\n",
            name = employee.name,
            activation = config.activation_link(&employee.id),
            download = config.download_link(),
        );

        Self {
            to: employee.email.clone(),
            subject: ACTIVATION_SUBJECT,
            body,
        }
    }

    pub fn send_with(&self, notifier: &dyn Notifier) -> Result<(), DeliveryError> {
        notifier.send(&self.to, self.subject, &self.body)
    }
}

/// Writes messages to the log instead of delivering them.
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

impl Notifier for LogNotifier {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        info!(from = %self.sender, %to, %subject, %body, "notification not delivered, logged instead");
        Ok(())
    }
}
