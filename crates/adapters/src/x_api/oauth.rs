//! OAuth 1.0a request signing (HMAC-SHA1) for X user-context endpoints

use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha1::Sha1;
use time::OffsetDateTime;
use urlencoding::encode;
use uuid::Uuid;

type HmacSha1 = Hmac<Sha1>;

/// Long-lived app and user credentials
pub struct OAuth1Credentials {
    pub consumer_key: SecretString,
    pub consumer_secret: SecretString,
    pub access_token: SecretString,
    pub access_token_secret: SecretString,
}

/// Produces `Authorization` headers for OAuth 1.0a signed requests
pub struct OAuth1Signer {
    credentials: OAuth1Credentials,
}

impl OAuth1Signer {
    pub fn new(credentials: OAuth1Credentials) -> Self {
        Self { credentials }
    }

    /// Sign a request with a fresh nonce and the current time.
    ///
    /// `params` are query or form parameters; JSON bodies are not signed.
    pub fn authorize(&self, method: &str, url: &str, params: &[(&str, &str)]) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        let timestamp = OffsetDateTime::now_utc().unix_timestamp();
        self.authorize_with(method, url, params, &nonce, timestamp)
    }

    pub(crate) fn authorize_with(
        &self,
        method: &str,
        url: &str,
        params: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> String {
        let timestamp = timestamp.to_string();
        let mut oauth_params = vec![
            (
                "oauth_consumer_key",
                self.credentials.consumer_key.expose_secret(),
            ),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_token", self.credentials.access_token.expose_secret()),
            ("oauth_version", "1.0"),
        ];

        let base = signature_base(method, url, oauth_params.iter().chain(params.iter()));
        let signature = self.sign(&base);
        oauth_params.push(("oauth_signature", signature.as_str()));
        oauth_params.sort_by(|a, b| a.0.cmp(b.0));

        let fields = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
            .collect::<Vec<_>>()
            .join(", ");

        format!("OAuth {}", fields)
    }

    fn sign(&self, base: &str) -> String {
        let key = format!(
            "{}&{}",
            encode(self.credentials.consumer_secret.expose_secret()),
            encode(self.credentials.access_token_secret.expose_secret())
        );

        let mut mac =
            HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
        mac.update(base.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }
}

/// Build the signature base string: `METHOD&url&sorted-params`, each part
/// percent-encoded per RFC 3986
fn signature_base<'a>(
    method: &str,
    url: &str,
    params: impl Iterator<Item = &'a (&'a str, &'a str)>,
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .map(|(k, v)| (encode(k).into_owned(), encode(v).into_owned()))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(url),
        encode(&param_string)
    )
}
