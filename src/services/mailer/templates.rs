//! Contents of the emails sent by the api

use super::dto::Email;
use url::Url;

pub const REGISTRATION_CONFIRMATION_SUBJECT: &str = "Registration confirmation";

/// creates the link a user follows to confirm their registration with `code`,
/// any path of `frontend_url` is kept as a prefix
pub fn confirmation_link(frontend_url: &Url, code: &str) -> Result<Url, url::ParseError> {
    let mut base = frontend_url.clone();

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut link = base.join("auth/confirm-registration")?;
    link.set_query(Some(format!("code={}", code).as_str()));

    Ok(link)
}

pub fn registration_confirmation(to: &str, link: &Url) -> Email {
    Email {
        to: String::from(to),
        subject: String::from(REGISTRATION_CONFIRMATION_SUBJECT),
        text: format!(
            "Welcome! Follow the link to confirm registration and activate your account: {}",
            link
        ),
        html: Some(format!(
            "<p>Welcome! Follow the <a href=\"{}\">verification link</a> to confirm registration and activate your account.</p>",
            link
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_carries_the_code() {
        let frontend = Url::parse("https://localhost:3003").unwrap();

        let link = confirmation_link(&frontend, "abc123").unwrap();

        assert_eq!(
            link.as_str(),
            "https://localhost:3003/auth/confirm-registration?code=abc123"
        );
    }

    #[test]
    fn link_keeps_the_frontend_path() {
        let expected = "https://blog.dev/app/auth/confirm-registration?code=abc123";

        for frontend in ["https://blog.dev/app", "https://blog.dev/app/"] {
            let link = confirmation_link(&Url::parse(frontend).unwrap(), "abc123").unwrap();

            assert_eq!(link.as_str(), expected, "frontend {}", frontend);
        }
    }

    #[test]
    fn email_contains_the_link() {
        let link = Url::parse("https://blog.dev/auth/confirm-registration?code=abc123").unwrap();

        let email = registration_confirmation("john@mail.com", &link);

        assert_eq!(email.subject, "Registration confirmation");
        assert!(email.text.contains(link.as_str()));
        assert!(email.html.unwrap().contains(link.as_str()));
    }
}
