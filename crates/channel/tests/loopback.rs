use http::{Method, StatusCode};
use micro_channel::filter::{all_filter, first_message_only, origin_filter};
use micro_channel::handler::make_handler;
use micro_channel::protocol::header::{CONTENT_LENGTH, CONTENT_TYPE};
use micro_channel::protocol::{Entity, HttpError, Request, Response};
use micro_channel::server::ChannelServer;
use micro_channel::transport::local::LocalChannel;
use micro_channel::transport::{Channel, Listener, MessageEvent, ReplyTarget};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc;

const ORIGIN: &str = "https://example.com";

fn echo(request: &Request, response: &mut Response) -> Result<(), HttpError> {
    let body = format!("{} {} {}", request.method()?, request.url()?.path(), request.body_text()?);
    response.set_status(StatusCode::OK, "OK");
    response.set_entity(
        Entity::empty()
            .add_header(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8)
            .add_header(CONTENT_LENGTH, body.len() as u64)
            .set_body_text(body),
    )?;
    Ok(())
}

fn recorder(channel: &LocalChannel) -> Rc<RefCell<Vec<String>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let listener_seen = Rc::clone(&seen);
    let listener: Listener = Rc::new(move |event: &MessageEvent| {
        listener_seen.borrow_mut().push(event.data().to_string());
    });
    channel.add_listener(listener);
    seen
}

#[test]
fn request_posted_to_own_window_is_answered_once() {
    let channel = LocalChannel::new(ORIGIN);
    let mut server = ChannelServer::builder()
        .handler(make_handler(echo))
        .channel(channel.clone())
        .message_filter(first_message_only())
        .target_origin(ORIGIN)
        .build()
        .unwrap();
    server.start().unwrap();
    let seen = recorder(&channel);

    channel.post_message(r#"{"version":"HTTP/1.1","method":"POST","url":"/echo?x=1","body":"hello"}"#.to_string(), "*");

    // the request and its echoed reply, the reply is not answered again
    assert_eq!(channel.run_pending(), 2);
    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[1],
        r#"{"status-code":200,"status-message":"OK","headers":{"Content-Type":"text/plain; charset=utf-8","Content-Length":16},"body":"POST /echo hello"}"#
    );
}

#[test]
fn stopped_server_does_not_answer() {
    let channel = LocalChannel::new(ORIGIN);
    let mut server = ChannelServer::builder()
        .handler(make_handler(echo))
        .channel(channel.clone())
        .message_filter(first_message_only())
        .target_origin("*")
        .build()
        .unwrap();
    server.start().unwrap();
    server.stop().unwrap();

    channel.post_message(r#"{"version":"HTTP/1.1","url":"/"}"#.to_string(), "*");
    assert_eq!(channel.run_pending(), 1);
}

#[test]
fn foreign_origin_is_ignored() {
    let channel = LocalChannel::new(ORIGIN);
    let mut filter = all_filter();
    filter.and(origin_filter(ORIGIN)).and(first_message_only());
    let mut server = ChannelServer::builder()
        .handler(make_handler(echo))
        .channel(channel.clone())
        .message_filter(filter)
        .target_origin("*")
        .build()
        .unwrap();
    server.start().unwrap();

    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();
    channel.post_from(r#"{"version":"HTTP/1.1","url":"/"}"#, "https://evil.com", Rc::new(sender));
    assert_eq!(channel.run_pending(), 1);
    assert!(receiver.try_recv().is_err());
}

#[test]
fn malformed_request_gets_no_reply_and_server_keeps_running() {
    let channel = LocalChannel::new(ORIGIN);
    let mut server = ChannelServer::builder()
        .handler(make_handler(echo))
        .channel(channel.clone())
        .message_filter(|_event: &MessageEvent| true)
        .target_origin("*")
        .build()
        .unwrap();
    server.start().unwrap();

    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();
    let sender = Rc::new(sender);
    channel.post_from("not json", ORIGIN, sender.clone());
    channel.post_from(r#"{"version":"HTTP/1.1","url":"/ok"}"#, ORIGIN, sender);
    assert_eq!(channel.run_pending(), 2);

    let reply = receiver.try_recv().unwrap();
    assert_eq!(
        reply,
        r#"{"status-code":200,"status-message":"OK","headers":{"Content-Type":"text/plain; charset=utf-8","Content-Length":8},"body":"GET /ok "}"#
    );
    assert!(receiver.try_recv().is_err());
    assert!(server.is_running());
}

#[tokio::test(flavor = "current_thread")]
async fn replies_reach_tokio_receiver() {
    let channel = LocalChannel::new(ORIGIN);
    let mut server = ChannelServer::builder()
        .handler(make_handler(|request: &Request, response: &mut Response| -> Result<(), HttpError> {
            assert_eq!(request.method()?, Method::GET);
            response.set_status(StatusCode::NO_CONTENT, "No Content");
            Ok(())
        }))
        .channel(channel.clone())
        .message_filter(first_message_only())
        .target_origin("*")
        .build()
        .unwrap();
    server.start().unwrap();

    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();
    channel.dispatch(&MessageEvent::new(r#"{"version":"HTTP/1.1","url":"/"}"#, ORIGIN, Rc::new(sender)));

    assert_eq!(receiver.recv().await.as_deref(), Some(r#"{"status-code":204,"status-message":"No Content"}"#));
}
