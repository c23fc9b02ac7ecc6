//! End-to-end tests for the one-shot helpers, driven entirely through the
//! public API with a recording transport standing in for the provider.

use std::cell::RefCell;
use std::rc::Rc;

use courier::{Body, Connect, Credentials, Email, EmailTransport, Error, RawMessage, SendResponse};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Simple {
        source: String,
        to: Vec<String>,
        subject: String,
        body: Body,
    },
    Raw {
        source: String,
        destinations: Option<Vec<String>>,
        data: Vec<u8>,
    },
}

struct RecordingTransport {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl EmailTransport for RecordingTransport {
    fn send_simple(
        &self,
        source: &str,
        to: &[String],
        subject: &str,
        body: &Body,
    ) -> Result<SendResponse, Error> {
        self.calls.borrow_mut().push(Call::Simple {
            source: source.to_string(),
            to: to.to_vec(),
            subject: subject.to_string(),
            body: body.clone(),
        });

        Ok(SendResponse {
            message_id: "0100017f-test".to_string(),
        })
    }

    fn send_raw(
        &self,
        source: &str,
        destinations: Option<&[String]>,
        raw: &RawMessage,
    ) -> Result<SendResponse, Error> {
        self.calls.borrow_mut().push(Call::Raw {
            source: source.to_string(),
            destinations: destinations.map(|d| d.to_vec()),
            data: raw.as_bytes().to_vec(),
        });

        Ok(SendResponse {
            message_id: "0100017f-test".to_string(),
        })
    }
}

#[derive(Default)]
struct RecordingConnect {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Connect for RecordingConnect {
    fn connect(&self, _credentials: &Credentials) -> Result<Box<dyn EmailTransport>, Error> {
        Ok(Box::new(RecordingTransport {
            calls: Rc::clone(&self.calls),
        }))
    }
}

fn credentials() -> Credentials {
    Credentials {
        access_key: "AKIA-TEST".to_string(),
        secret_key: "secret".to_string(),
        region: "us-east-1".to_string(),
        sender: Some("sender@example.com".to_string()),
    }
}

#[test]
fn one_shot_simple_send() {
    let _ = env_logger::builder().is_test(true).try_init();

    let connector = RecordingConnect::default();

    let resp = Email::send_mail(
        &connector,
        credentials(),
        "u@example.com".into(),
        "hello world",
        None,
        None,
        Some("html message"),
    )
    .unwrap();

    assert_eq!(resp.message_id, "0100017f-test");

    let calls = connector.calls.borrow();
    assert_eq!(
        calls[0],
        Call::Simple {
            source: "sender@example.com".to_string(),
            to: vec!["u@example.com".to_string()],
            subject: "hello world".to_string(),
            body: Body::Html("html message".to_string()),
        }
    );
}

#[test]
fn one_shot_attachment_send() {
    let _ = env_logger::builder().is_test(true).try_init();

    let connector = RecordingConnect::default();

    Email::send_with_attachment(
        &connector,
        credentials(),
        "b@x.com".into(),
        "hello world",
        "<p>hi</p>",
        "note.txt",
        Some("a@x.com"),
        Some(b"data"),
        None,
        None,
        None,
    )
    .unwrap();

    let calls = connector.calls.borrow();
    let (source, destinations, data) = match calls[0] {
        Call::Raw {
            ref source,
            ref destinations,
            ref data,
        } => (source, destinations, data),
        ref other => panic!("unexpected call: {:?}", other),
    };

    assert_eq!(source, "a@x.com");
    assert_eq!(*destinations, Some(vec!["b@x.com".to_string()]));

    // The raw document must parse back into one HTML part and one
    // attachment part carrying the original bytes.
    let parsed = mailparse::parse_mail(data).unwrap();
    assert_eq!(parsed.subparts.len(), 2);
    assert_eq!(parsed.subparts[0].ctype.mimetype, "text/html");
    assert_eq!(parsed.subparts[0].get_body().unwrap().trim_end(), "<p>hi</p>");
    assert_eq!(parsed.subparts[1].ctype.params["name"], "note.txt");
    assert_eq!(parsed.subparts[1].get_body_raw().unwrap(), b"data");
}

#[test]
fn one_shot_attachment_send_with_cc() {
    let _ = env_logger::builder().is_test(true).try_init();

    let connector = RecordingConnect::default();

    Email::send_with_attachment(
        &connector,
        credentials(),
        "b@x.com".into(),
        "hello world",
        "<p>hi</p>",
        "note.txt",
        None,
        Some(b"data"),
        None,
        Some(vec!["d@x.com".to_string()]),
        None,
    )
    .unwrap();

    let calls = connector.calls.borrow();
    match calls[0] {
        Call::Raw {
            ref destinations,
            ref data,
            ..
        } => {
            assert!(destinations.is_none());

            let doc = String::from_utf8(data.clone()).unwrap();
            assert!(doc.contains("Cc: d@x.com\r\n"));
        }
        ref other => panic!("unexpected call: {:?}", other),
    }
}
