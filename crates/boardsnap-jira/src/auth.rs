//! JIRA authentication

use std::fmt;

pub struct JiraAuth {
    email: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(email: String, api_token: String) -> Self {
        Self { email, api_token }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn to_basic_auth(&self) -> String {
        use base64::Engine;
        let credentials = format!("{}:{}", self.email, self.api_token);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

impl fmt::Debug for JiraAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraAuth")
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
