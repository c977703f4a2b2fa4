use serde::Serialize;
use std::collections::HashMap;

/// A email ready to be dispatched by a `Mailer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecipient {
    /// recipient email address
    pub email: String,

    /// replacements to use on the email html for this recipient, eg:
    ///
    /// ```json
    /// { "email": "john@mail.com", "replacements": { "name": "john" } }
    /// ```
    pub replacements: Option<HashMap<String, String>>,
}

/// Payload of the `sendEmail` RPC of the mailer microservice
#[derive(Default, Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailIn {
    /// identifies the request on the mailer side, eg: when looking for its delivery status
    pub uuid: Option<uuid::Uuid>,

    /// address used to send the email, the mailer default address when `None`
    pub sender: Option<String>,

    pub to: Vec<EmailRecipient>,

    pub subject: String,

    pub body_html: Option<String>,

    /// displayed on clients that do not support html
    pub body_text: Option<String>,

    pub enable_tracking: bool,
}

impl SendEmailIn {
    pub fn from_email(email: Email, sender: &str) -> SendEmailIn {
        SendEmailIn {
            uuid: Some(uuid::Uuid::new_v4()),
            sender: Some(String::from(sender)),
            to: vec![EmailRecipient {
                email: email.to,
                replacements: None,
            }],
            subject: email.subject,
            body_html: email.html,
            body_text: Some(email.text),
            enable_tracking: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_camel_cased() {
        let email = Email {
            to: String::from("john@mail.com"),
            subject: String::from("hello"),
            text: String::from("hi"),
            html: None,
        };

        let json = serde_json::to_value(SendEmailIn::from_email(email, "blog@mail.com")).unwrap();

        assert_eq!(json["sender"], "blog@mail.com");
        assert_eq!(json["to"][0]["email"], "john@mail.com");
        assert_eq!(json["bodyText"], "hi");
        assert!(json["bodyHtml"].is_null());
        assert!(json["uuid"].is_string());
    }
}
