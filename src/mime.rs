//! Serialization of raw `multipart/mixed` documents for attachment sends.

use chrono::Utc;
use uuid::Uuid;

const CRLF: &str = "\r\n";

// RFC 2045 maximum encoded line length
const BASE64_LINE_WIDTH: usize = 76;

/// A serialized MIME multipart document: message headers, one HTML body
/// part and one attachment part. Built once per attachment send and not
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct RawMessage {
    data: Vec<u8>,
}

impl RawMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Assembles the full document for one message.
///
/// The To header joins all addresses with ", " so providers deliver to
/// every listed recipient; Cc and Bcc headers are emitted only when set.
pub(crate) fn multipart_document(
    subject: &str,
    from: &str,
    to: &[String],
    cc: Option<&[String]>,
    bcc: Option<&[String]>,
    body_html: &str,
    filename: &str,
    attachment: &[u8],
) -> RawMessage {
    let boundary = format!("------------{}", Uuid::new_v4().to_simple());
    let mut doc = String::new();

    doc.push_str(&format!("Subject: {}{}", subject, CRLF));
    doc.push_str(&format!("From: {}{}", from, CRLF));
    doc.push_str(&format!("To: {}{}", to.join(", "), CRLF));
    if let Some(cc) = cc {
        doc.push_str(&format!("Cc: {}{}", cc.join(", "), CRLF));
    }
    if let Some(bcc) = bcc {
        doc.push_str(&format!("Bcc: {}{}", bcc.join(", "), CRLF));
    }
    doc.push_str(&format!("Date: {}{}", Utc::now().to_rfc2822(), CRLF));
    doc.push_str("MIME-Version: 1.0\r\n");
    doc.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{}\"{}",
        boundary, CRLF
    ));
    doc.push_str(CRLF);

    // The message body, always HTML subtype
    doc.push_str(&format!("--{}{}", boundary, CRLF));
    doc.push_str("Content-Type: text/html; charset=UTF-8\r\n");
    doc.push_str(CRLF);
    doc.push_str(body_html);
    doc.push_str(CRLF);

    // The attachment, base64-encoded regardless of content origin
    doc.push_str(&format!("--{}{}", boundary, CRLF));
    doc.push_str(&format!(
        "Content-Type: application/octet-stream; name=\"{}\"{}",
        filename, CRLF
    ));
    doc.push_str(&format!(
        "Content-Disposition: attachment; filename=\"{}\"{}",
        filename, CRLF
    ));
    doc.push_str("Content-Transfer-Encoding: base64\r\n");
    doc.push_str(CRLF);

    let encoded = base64::encode(attachment);
    let mut rest = encoded.as_str();
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(BASE64_LINE_WIDTH));
        doc.push_str(line);
        doc.push_str(CRLF);
        rest = tail;
    }

    doc.push_str(&format!("--{}--{}", boundary, CRLF));

    RawMessage {
        data: doc.into_bytes(),
    }
}
