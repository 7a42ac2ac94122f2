//! Fixed parameter sets of the SSO sign-in widget and the service-ticket
//! scraper.
//!
//! The sign-in page is undocumented HTML/JS. Everything that depends on its
//! layout lives in this module so the login flow in
//! [`crate::http_client`] only deals with requests and statuses.

use crate::{Credentials, GarminConfig};
use regex::Regex;
use secrecy::ExposeSecret;
use std::sync::LazyLock;

/// Matches a quoted absolute URL carrying a `ticket=` parameter. Plain
/// `http` is accepted so a local mock portal can issue tickets.
static TICKET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(https?:[^"]+?ticket=[^"]+)""#).expect("ticket pattern is valid")
});

/// Query string sent with both the sign-in GET and POST.
pub fn signin_params(config: &GarminConfig) -> Vec<(&'static str, String)> {
    let modern = config.modern_url();
    vec![
        ("webhost", config.base_url.clone()),
        ("service", modern.clone()),
        ("source", config.signin_url()),
        ("redirectAfterAccountLoginUrl", modern.clone()),
        ("redirectAfterAccountCreationUrl", modern),
        ("gauthHost", config.sso_url.clone()),
        ("locale", "en_US".into()),
        ("id", "gauth-widget".into()),
        ("cssUrl", config.css_url.clone()),
        ("clientId", "GarminConnect".into()),
        ("rememberMeShown", "true".into()),
        ("rememberMeChecked", "false".into()),
        ("createAccountShown", "true".into()),
        ("openCreateAccount", "false".into()),
        ("usernameShown", "false".into()),
        ("displayNameShown", "false".into()),
        ("consumeServiceTicket", "false".into()),
        ("initialFocus", "true".into()),
        ("embedWidget", "false".into()),
        ("generateExtraServiceTicket", "false".into()),
    ]
}

/// Form body of the sign-in POST.
pub fn login_form(credentials: &Credentials) -> Vec<(&'static str, String)> {
    vec![
        ("username", credentials.username.clone()),
        ("password", credentials.password.expose_secret().to_string()),
        ("embed", "true".into()),
        ("lt", "e1s1".into()),
        ("_eventId", "submit".into()),
        ("displayNameRequired", "false".into()),
    ]
}

/// Pull the service-ticket URL out of the sign-in response body.
///
/// The portal embeds the URL in a JS string literal, so `\/` escapes are
/// removed. `None` means the credentials were rejected or the page changed.
pub fn extract_ticket_url(body: &str) -> Option<String> {
    let captured = TICKET_URL.captures(body)?.get(1)?.as_str();
    Some(captured.replace('\\', ""))
}
