//! Building and dispatching a single email.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::mime::{self, RawMessage};
use crate::transport::{Connect, Credentials, SendResponse};

/// Message body, tagged by content subtype.
///
/// Constructed whole on each set call; the last one set wins. There is no
/// separate "which body is active" flag to go stale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Body {
    Text(String),
    Html(String),
}

impl Body {
    /// All bodies are transmitted as UTF-8.
    pub const CHARSET: &'static str = "UTF-8";

    pub fn content(&self) -> &str {
        match *self {
            Body::Text(ref s) | Body::Html(ref s) => s,
        }
    }
}

/// Email recipients: a single address or a list of them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    /// Normalizes the single-address form into a one-element list.
    pub fn to_vec(&self) -> Vec<String> {
        match *self {
            Recipients::One(ref addr) => vec![addr.clone()],
            Recipients::Many(ref addrs) => addrs.clone(),
        }
    }
}

impl From<&str> for Recipients {
    fn from(addr: &str) -> Self {
        Recipients::One(addr.to_string())
    }
}

impl From<String> for Recipients {
    fn from(addr: String) -> Self {
        Recipients::One(addr)
    }
}

impl From<Vec<String>> for Recipients {
    fn from(addrs: Vec<String>) -> Self {
        Recipients::Many(addrs)
    }
}

/// Builds and dispatches one logical email.
///
/// An instance accumulates addressing and content, then is consumed by
/// `send` or `send_attachment`; it cannot be reused across sends. The
/// transport session is opened fresh on every dispatch.
#[derive(Debug)]
pub struct Email {
    to: Recipients,
    cc: Option<Vec<String>>,
    bcc: Option<Vec<String>>,
    subject: String,
    credentials: Credentials,
    body: Option<Body>,
    attachment: Option<RawMessage>,
}

impl Email {
    pub fn new(to: Recipients, subject: &str, credentials: Credentials) -> Self {
        Self {
            to,
            cc: None,
            bcc: None,
            subject: subject.to_string(),
            credentials,
            body: None,
            attachment: None,
        }
    }

    pub fn cc(mut self, cc: Vec<String>) -> Self {
        self.cc = Some(cc);
        self
    }

    pub fn bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = Some(bcc);
        self
    }

    /// Sets a plaintext body. Overwrites any previously set body.
    pub fn text(&mut self, text: &str) {
        self.body = Some(Body::Text(text.to_string()));
    }

    /// Sets an HTML body. Overwrites any previously set body.
    pub fn html(&mut self, html: &str) {
        self.body = Some(Body::Html(html.to_string()));
    }

    /// Explicit sender wins over the configured default.
    fn resolve_sender(&self, from_addr: Option<&str>) -> Result<String, Error> {
        from_addr
            .map(str::to_string)
            .or_else(|| self.credentials.sender.clone())
            .ok_or_else(|| Error::Configuration("no sender address configured".to_string()))
    }

    fn has_extra_recipients(&self) -> bool {
        let non_empty = |list: &Option<Vec<String>>| list.as_ref().map_or(false, |l| !l.is_empty());
        non_empty(&self.cc) || non_empty(&self.bcc)
    }

    /// Builds and stores the raw multipart document for an attachment send.
    ///
    /// Attachment content comes from `inline_content` when given, else from
    /// `file_path`, else from `filename` treated as a path (kept for callers
    /// that pass a full path as the attachment name). Returns the document
    /// without sending it.
    pub fn build_attachment_message(
        &mut self,
        body_html: &str,
        filename: &str,
        inline_content: Option<&[u8]>,
        from_addr: Option<&str>,
        file_path: Option<&Path>,
    ) -> Result<&RawMessage, Error> {
        let from = self.resolve_sender(from_addr)?;

        let content = match inline_content {
            Some(data) => data.to_vec(),
            None => {
                let path = file_path.unwrap_or_else(|| Path::new(filename));
                fs::read(path)
                    .map_err(|e| Error::Attachment(format!("{}: {}", path.display(), e)))?
            }
        };

        let to = self.to.to_vec();
        let raw = mime::multipart_document(
            &self.subject,
            &from,
            &to,
            self.cc.as_deref(),
            self.bcc.as_deref(),
            body_html,
            filename,
            &content,
        );

        Ok(&*self.attachment.insert(raw))
    }

    /// Sends the configured text or HTML body as a simple message.
    pub fn send(
        self,
        connector: &dyn Connect,
        from_addr: Option<&str>,
    ) -> Result<SendResponse, Error> {
        let to = self.to.to_vec();
        if to.is_empty() {
            return Err(Error::Validation(
                "you must provide at least one recipient".to_string(),
            ));
        }

        let from = self.resolve_sender(from_addr)?;

        let body = match self.body {
            Some(ref body) => body,
            None => {
                return Err(Error::Validation(
                    "you must provide a text or html body".to_string(),
                ))
            }
        };

        let client = connector.connect(&self.credentials)?;
        let resp = client.send_simple(&from, &to, &self.subject, body)?;

        log::info!("Email sent: {}", resp.message_id);

        Ok(resp)
    }

    /// Sends a previously built attachment message as a raw document.
    pub fn send_attachment(
        self,
        connector: &dyn Connect,
        from_addr: Option<&str>,
    ) -> Result<SendResponse, Error> {
        let raw = match self.attachment {
            Some(ref raw) => raw,
            None => {
                return Err(Error::State(
                    "no attachment message has been built".to_string(),
                ))
            }
        };

        let from = self.resolve_sender(from_addr)?;
        let client = connector.connect(&self.credentials)?;

        let to = self.to.to_vec();

        // With Cc or Bcc recipients the explicit list must be omitted
        // entirely, so the provider extracts every destination from the
        // document headers instead. Omitting it otherwise would mean
        // non-delivery, hence the exact branch condition.
        let destinations = if self.has_extra_recipients() {
            None
        } else {
            Some(&to[..])
        };

        let resp = client.send_raw(&from, destinations, raw)?;

        log::info!("Email with attachment sent: {}", resp.message_id);

        Ok(resp)
    }

    /// One-line wrapper: build and send a simple message.
    /// The HTML body is preferred when both are provided.
    pub fn send_mail(
        connector: &dyn Connect,
        credentials: Credentials,
        to: Recipients,
        subject: &str,
        from_addr: Option<&str>,
        text: Option<&str>,
        html: Option<&str>,
    ) -> Result<SendResponse, Error> {
        let mut email = Email::new(to, subject, credentials);

        if let Some(html) = html {
            email.html(html);
        } else if let Some(text) = text {
            email.text(text);
        }

        email.send(connector, from_addr)
    }

    /// One-line wrapper: build and send a message with an attachment.
    pub fn send_with_attachment(
        connector: &dyn Connect,
        credentials: Credentials,
        to: Recipients,
        subject: &str,
        body_html: &str,
        filename: &str,
        from_addr: Option<&str>,
        inline_content: Option<&[u8]>,
        file_path: Option<&Path>,
        cc: Option<Vec<String>>,
        bcc: Option<Vec<String>>,
    ) -> Result<SendResponse, Error> {
        let mut email = Email::new(to, subject, credentials);
        email.cc = cc;
        email.bcc = bcc;

        email.build_attachment_message(body_html, filename, inline_content, from_addr, file_path)?;
        email.send_attachment(connector, from_addr)
    }
}
