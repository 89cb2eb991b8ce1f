//! Shared helpers: the `lc` binary runner and a scripted fake backend.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::process::Output;
use std::sync::{Arc, Mutex, OnceLock};

pub use serde_json::json;

/// Path to the `lc` binary, building it on first use when missing.
fn lc_binary() -> &'static PathBuf {
    static BIN: OnceLock<PathBuf> = OnceLock::new();
    BIN.get_or_init(|| {
        let exe = std::env::current_exe().unwrap();
        // target/<profile>/deps/specs-<hash>
        let dir = exe.parent().and_then(|deps| deps.parent()).unwrap().to_path_buf();
        let bin = dir.join(format!("lc{}", std::env::consts::EXE_SUFFIX));
        if !bin.exists() {
            let status = std::process::Command::new(env!("CARGO"))
                .args(["build", "-p", "lc"])
                .status()
                .unwrap();
            assert!(status.success(), "building lc failed");
        }
        bin
    })
}

/// `lc` with a clean environment and colors off.
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::new(lc_binary());
    cmd.env_remove("LC_BASE_URL")
        .env_remove("LC_ENVIRONMENT")
        .env_remove("LC_TIMEOUT_MS")
        .env_remove("COLOR")
        .env("NO_COLOR", "1")
        .env("LC_LOG", "off");
    CliBuilder { cmd }
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Point the CLI at a fake backend.
    pub fn backend(self, backend: &Backend) -> Self {
        self.env("LC_BASE_URL", &backend.url())
    }

    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            run.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            run.output.status.code(),
            run.stdout(),
            run.stderr()
        );
        run
    }

    pub fn fails(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert { output };
        assert!(
            !run.output.status.success(),
            "expected failure\nstdout:\n{}\nstderr:\n{}",
            run.stdout(),
            run.stderr()
        );
        run
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout missing {expected:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(unexpected), "stdout has {unexpected:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr missing {expected:?}:\n{stderr}");
        self
    }

    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout(), expected);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap()
    }
}

/// One request the fake backend received.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    /// Path including the query string
    pub target: String,
    pub body: String,
}

impl Request {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct Route {
    method: &'static str,
    path: &'static str,
    status: u16,
    body: String,
}

/// Scripted HTTP backend on a loopback port.
///
/// Routes match on method and path (query ignored). When several routes
/// match, the first is consumed, so repeated routes replay in order and the
/// last one sticks. Unmatched requests get a 404.
pub struct Backend {
    addr: String,
    routes: Arc<Mutex<VecDeque<Route>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Backend {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let routes = Arc::new(Mutex::new(VecDeque::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let (r, q) = (Arc::clone(&routes), Arc::clone(&requests));
        std::thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                serve(stream, &r, &q);
            }
        });
        Self { addr, routes, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn get(self, path: &'static str, body: serde_json::Value) -> Self {
        self.route("GET", path, 200, body.to_string())
    }

    pub fn post(self, path: &'static str, body: serde_json::Value) -> Self {
        self.route("POST", path, 200, body.to_string())
    }

    pub fn route(self, method: &'static str, path: &'static str, status: u16, body: String) -> Self {
        self.routes.lock().unwrap().push_back(Route { method, path, status, body });
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests().into_iter().filter(|r| r.target.split('?').next() == Some(path)).collect()
    }
}

fn serve(stream: TcpStream, routes: &Mutex<VecDeque<Route>>, requests: &Mutex<Vec<Request>>) {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    if reader.read_line(&mut line).is_err() {
        return;
    }
    let mut parts = line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut length = 0usize;
    loop {
        let mut header = String::new();
        if reader.read_line(&mut header).unwrap_or(0) == 0 || header.trim().is_empty() {
            break;
        }
        if let Some((name, value)) = header.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    let mut body = vec![0u8; length];
    let _ = reader.read_exact(&mut body);
    let body = String::from_utf8_lossy(&body).into_owned();

    let path = target.split('?').next().unwrap_or_default().to_string();
    requests.lock().unwrap().push(Request { method: method.clone(), target, body });

    let (status, payload) = {
        let mut routes = routes.lock().unwrap();
        let matching: Vec<usize> = routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.method == method && r.path == path)
            .map(|(i, _)| i)
            .collect();
        match matching.as_slice() {
            [] => (404, r#"{"error":"not_found","description":"no route"}"#.to_string()),
            [only] => (routes[*only].status, routes[*only].body.clone()),
            [first, ..] => {
                let route = routes.remove(*first).unwrap();
                (route.status, route.body)
            }
        }
    };

    let mut stream = reader.into_inner();
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        if status < 400 { "OK" } else { "Error" },
        payload.len()
    );
    let _ = stream.write_all(response.as_bytes());
}
