use http::StatusCode;
use micro_channel::filter::first_message_only;
use micro_channel::handler::make_handler;
use micro_channel::protocol::header::{CONTENT_TYPE, USER_AGENT};
use micro_channel::protocol::{Entity, HttpError, Request, Response};
use micro_channel::server::ChannelServer;
use micro_channel::transport::local::LocalChannel;
use micro_channel::transport::{Channel, MessageEvent, ReplyTarget};
use std::rc::Rc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let window = LocalChannel::new("https://example.com");

    let server = ChannelServer::builder()
        .handler(make_handler(hello_world))
        .channel(window.clone())
        .message_filter(first_message_only())
        .target_origin("https://example.com")
        .build();

    let mut server = match server {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "build server error");
            return;
        }
    };

    if let Err(e) = server.start() {
        error!(cause = %e, "start server error");
        return;
    }

    window.add_listener(Rc::new(|event: &MessageEvent| {
        info!(data = event.data(), origin = event.origin(), "window received message");
    }));

    // the page talks to itself, so the reply arrives as a second message
    window.post_message(
        r#"{"version":"HTTP/1.1","method":"GET","url":"/hello","headers":{"user-agent":"demo"}}"#.to_string(),
        "*",
    );
    let delivered = window.run_pending();
    info!(delivered, "event loop idle");

    if let Err(e) = server.stop() {
        error!(cause = %e, "stop server error");
    }
}

fn hello_world(request: &Request, response: &mut Response) -> Result<(), HttpError> {
    let user_agent = request.headers()?.get(&USER_AGENT)?.map(|value| value.to_string()).unwrap_or_default();
    info!(url = %request.url()?, user_agent = %user_agent, "handling request");

    response.set_status(StatusCode::OK, "OK");
    response.set_entity(
        Entity::empty().add_header(CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8).set_body_text(format!("Hello {user_agent}!")),
    )?;
    Ok(())
}
