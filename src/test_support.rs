//! In-process stand-ins for the chat completion API.

use crate::models::prompt::{ChatRequest, Role};
use actix_web::http::{header, StatusCode};
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::json;
use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

pub const TEST_KEY: &str = "sk-test";

/// Response body marker: reply with the user prompt the stub received.
pub const ECHO_USER_PROMPT: &str = "<echo>";

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Starts a completion API stub that checks the bearer credential and the
/// two-message prompt, then answers with `status` and `body`.
pub fn spawn_upstream(status: u16, body: &'static str) -> String {
    let server = HttpServer::new(move || {
        App::new().route(
            COMPLETIONS_PATH,
            web::post().to(move |req: HttpRequest, request: web::Json<ChatRequest>| async move {
                let expected = format!("Bearer {}", TEST_KEY);
                let authorized = req
                    .headers()
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    == Some(expected.as_str());
                if !authorized {
                    return HttpResponse::Unauthorized()
                        .json(json!({ "error": { "message": "Incorrect API key provided" } }));
                }

                let roles: Vec<Role> = request.messages.iter().map(|m| m.role).collect();
                if roles != [Role::System, Role::User] {
                    return HttpResponse::BadRequest()
                        .json(json!({ "error": { "message": "unexpected messages" } }));
                }

                if body == ECHO_USER_PROMPT {
                    return HttpResponse::Ok().json(json!({
                        "choices": [{ "message": { "content": request.messages[1].content } }]
                    }));
                }

                HttpResponse::build(StatusCode::from_u16(status).unwrap())
                    .content_type("application/json")
                    .body(body)
            }),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}{}", addr, COMPLETIONS_PATH)
}

/// Starts a completion API stub that only answers after `delay`.
pub fn spawn_slow_upstream(delay: Duration) -> String {
    let server = HttpServer::new(move || {
        App::new().route(
            COMPLETIONS_PATH,
            web::post().to(move || async move {
                actix_web::rt::time::sleep(delay).await;
                HttpResponse::Ok().json(json!({ "choices": [{ "message": { "content": "late" } }] }))
            }),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}{}", addr, COMPLETIONS_PATH)
}

/// A URL nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, COMPLETIONS_PATH)
}

/// Starts a raw upstream that announces a longer body than it sends and then
/// closes the connection, so the response head arrives but the body cannot
/// be read.
pub fn spawn_truncated_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            if drain_request(&mut stream).is_err() {
                continue;
            }
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\n\
                  Content-Type: application/json\r\n\
                  Content-Length: 512\r\n\
                  \r\n\
                  {\"choices\":[",
            );
            let _ = stream.flush();
            let _ = stream.shutdown(Shutdown::Both);
        }
    });

    format!("http://{}{}", addr, COMPLETIONS_PATH)
}

/// Reads one request (head plus `Content-Length` body) so closing the socket
/// does not reset the connection under unread data.
fn drain_request(stream: &mut TcpStream) -> io::Result<()> {
    let mut received = Vec::new();
    let mut chunk = [0_u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        received.extend_from_slice(&chunk[..n]);
        if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&received[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while received.len() - head_end < content_length {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        received.extend_from_slice(&chunk[..n]);
    }
    Ok(())
}
