use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// https urls made of dot separated labels and an optional path, eg: `https://blog.dev/rust`
    pub static ref REGEX_HTTPS_URL: Regex =
        Regex::new(r"^https://([a-zA-Z0-9_-]+\.)+[a-zA-Z0-9_-]+(/[a-zA-Z0-9_-]+)*/?$").unwrap();
    //
    /// ascii letters, digits and `_.-` only
    pub static ref REGEX_EMAIL: Regex =
        Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").unwrap();
    //
    pub static ref REGEX_LOGIN: Regex = Regex::new(r"^[a-zA-Z0-9_-]*$").unwrap();
}
