use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::email::Body;
use crate::error::Error;
use crate::mime::RawMessage;

/// Provider credentials used to open a transport session.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,

    /// Default sender address, used when a send call does not supply
    /// an explicit one.
    pub sender: Option<String>,
}

impl Credentials {
    /// Builds credentials from a flattened config map (see `config::load_config`).
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, Error> {
        let get = |key: &str| {
            map.get(key)
                .cloned()
                .ok_or_else(|| Error::Configuration(format!("missing config key: {}", key)))
        };

        Ok(Self {
            access_key: get("access_key")?,
            secret_key: get("secret_key")?,
            region: get("region")?,
            sender: map.get("sender").cloned(),
        })
    }
}

/// Acknowledgment returned by the provider once it accepts a message.
/// The identifier is opaque and is not a delivery guarantee.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SendResponse {
    pub message_id: String,
}

/// A live session with the email provider.
pub trait EmailTransport {
    /// Submits a simple (text or HTML) message.
    fn send_simple(
        &self,
        source: &str,
        to: &[String],
        subject: &str,
        body: &Body,
    ) -> Result<SendResponse, Error>;

    /// Submits a pre-serialized MIME document.
    ///
    /// When `destinations` is `None`, the provider is expected to extract
    /// every recipient (To/Cc/Bcc) from the document headers instead.
    fn send_raw(
        &self,
        source: &str,
        destinations: Option<&[String]>,
        raw: &RawMessage,
    ) -> Result<SendResponse, Error>;
}

/// Opens a transport session from credentials.
///
/// A session is requested fresh on every send call; this library never
/// caches or pools them. Rejected credentials surface as `Error::Auth`.
pub trait Connect {
    fn connect(&self, credentials: &Credentials) -> Result<Box<dyn EmailTransport>, Error>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn credentials_from_map() {
        let mut map = HashMap::new();
        map.insert("access_key".to_string(), "AKIA-TEST".to_string());
        map.insert("secret_key".to_string(), "secret".to_string());
        map.insert("region".to_string(), "us-east-1".to_string());

        let creds = Credentials::from_map(&map).unwrap();

        assert_eq!(creds.access_key, "AKIA-TEST");
        assert_eq!(creds.region, "us-east-1");
        assert!(creds.sender.is_none());

        map.insert("sender".to_string(), "noreply@example.com".to_string());

        let creds = Credentials::from_map(&map).unwrap();
        assert_eq!(creds.sender.as_deref(), Some("noreply@example.com"));
    }

    #[test]
    fn credentials_missing_key() {
        let mut map = HashMap::new();
        map.insert("access_key".to_string(), "AKIA-TEST".to_string());

        let err = Credentials::from_map(&map).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn response_from_provider_json() {
        let resp: SendResponse =
            serde_json::from_str(r#"{"message_id": "0100017f-abcdef"}"#).unwrap();
        assert_eq!(resp.message_id, "0100017f-abcdef");
    }
}
