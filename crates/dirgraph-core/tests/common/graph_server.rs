//! Minimal HTTP/1.1 server that plays back scripted directory responses.
//!
//! Each path has a queue of responses; the last one repeats once the queue is
//! drained. Unknown paths answer 404 with a `Request_ResourceNotFound` document.
//! Every request line and its headers are recorded for assertions.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
pub struct Scripted {
    pub status: u32,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Scripted {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn error(status: u32, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    /// Path plus query, as sent on the request line.
    pub target: String,
    pub headers: Vec<(String, String)>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Vec<Scripted>>,
    requests: Vec<Recorded>,
}

#[derive(Clone)]
pub struct GraphServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl GraphServer {
    /// Base URL without trailing slash, e.g. "http://127.0.0.1:12345".
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Queue `responses` for requests whose path (query excluded) equals `path`.
    pub fn script(&self, path: &str, responses: Vec<Scripted>) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert(path.to_string(), responses);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// Starts a server in a background thread. The server runs until the process exits.
pub fn start() -> GraphServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(State::default()));
    let shared = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&shared);
            thread::spawn(move || handle(stream, &state));
        }
    });
    GraphServer {
        base: format!("http://127.0.0.1:{}", port),
        state,
    }
}

fn handle(mut stream: std::net::TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let recorded = parse_request(request);
    let path = recorded
        .target
        .split('?')
        .next()
        .unwrap_or("")
        .to_string();

    let response = {
        let mut state = state.lock().unwrap();
        state.requests.push(recorded);
        match state.routes.get_mut(&path) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Scripted::error(
                404,
                r#"{"odata.error":{"code":"Request_ResourceNotFound","message":{"lang":"en","value":"not found"}}}"#,
            ),
        }
    };

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

fn parse_request(request: &str) -> Recorded {
    let mut target = String::new();
    let mut headers = Vec::new();
    for line in request.lines() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if target.is_empty() {
            target = line.split_whitespace().nth(1).unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    Recorded { target, headers }
}
