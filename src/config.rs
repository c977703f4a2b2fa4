use serde::Deserialize;
use std::fmt;
use url::Url;
use validator::Validate;

const REDACTED: &str = "***";

fn def_http_port() -> u16 {
    3003
}

fn def_app_development() -> bool {
    false
}

fn def_jwt_secret() -> String {
    String::from("b6d870d5f22658902bdcd4799d47ea72ed8e3d091287313483df2545069aaee1")
}

fn def_admin_login() -> String {
    String::from("admin")
}

fn def_admin_password() -> String {
    String::from("qwerty")
}

fn def_bcrypt_cost() -> u32 {
    10
}

fn def_email_sender() -> String {
    String::from("blog-platform@mail.com")
}

fn def_frontend_url() -> Url {
    Url::parse("https://localhost:3003").expect("[CFG] invalid value for env var FRONTEND_URL")
}

#[derive(Deserialize, Clone, Validate)]
pub struct AppConfig {
    /// if the application is running in `development` mode
    #[serde(default = "def_app_development")]
    pub app_development: bool,

    /// http port the api will listen for requests on
    #[serde(default = "def_http_port")]
    pub http_port: u16,

    /// postgres URL, when absent records are kept in memory and lost on shutdown
    #[serde(default)]
    pub db_url: Option<String>,

    /// rabbitmq uri, when absent emails are only written to the logs
    #[serde(default)]
    pub rmq_uri: Option<String>,

    /// secret used to sign the access tokens
    #[serde(default = "def_jwt_secret")]
    #[validate(length(min = 16))]
    pub jwt_secret: String,

    /// login expected on basic auth protected routes
    #[serde(default = "def_admin_login")]
    #[validate(length(min = 1))]
    pub admin_login: String,

    /// password expected on basic auth protected routes
    #[serde(default = "def_admin_password")]
    #[validate(length(min = 1))]
    pub admin_password: String,

    /// bcrypt work factor for user passwords
    #[serde(default = "def_bcrypt_cost")]
    #[validate(range(min = 4, max = 31))]
    pub bcrypt_cost: u32,

    /// address shown as the sender of outgoing emails
    #[serde(default = "def_email_sender")]
    pub email_sender: String,

    /// base url used to build the links sent by email
    #[serde(default = "def_frontend_url")]
    pub frontend_url: Url,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            app_development: def_app_development(),
            http_port: def_http_port(),
            db_url: None,
            rmq_uri: None,
            jwt_secret: def_jwt_secret(),
            admin_login: def_admin_login(),
            admin_password: def_admin_password(),
            bcrypt_cost: def_bcrypt_cost(),
            email_sender: def_email_sender(),
            frontend_url: def_frontend_url(),
        }
    }
}

/// secrets are redacted so the config can be logged
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("app_development", &self.app_development)
            .field("http_port", &self.http_port)
            .field("db_url", &self.db_url.as_ref().map(|_| REDACTED))
            .field("rmq_uri", &self.rmq_uri.as_ref().map(|_| REDACTED))
            .field("jwt_secret", &REDACTED)
            .field("admin_login", &self.admin_login)
            .field("admin_password", &REDACTED)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("email_sender", &self.email_sender)
            .field("frontend_url", &self.frontend_url.as_str())
            .finish()
    }
}

impl AppConfig {
    /// loads the config from the environment variables
    ///
    /// # PANICS
    /// panics if the environment variables could not be loaded, such as when a string value
    /// cannot be parsed to the desired data type, eg:
    ///
    /// ENV_VAR_THAT_SHOULD_BE_NUMERIC=not_a_number
    ///
    /// or when a loaded value is out of its accepted range
    pub fn from_env() -> AppConfig {
        let config = match envy::from_env::<AppConfig>() {
            Ok(config) => config,
            Err(error) => {
                panic!("[CFG] failed to load application config, {:#?}", error)
            }
        };

        if let Err(error) = config.validate() {
            panic!("[CFG] invalid application config, {}", error)
        }

        config
    }
}
