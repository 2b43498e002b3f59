#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;
use tokio::net::TcpListener;

// Routes passed to `start_with_stalls` hold the response this long, well past any
// client timeout the tests configure.
pub const STALL: Duration = Duration::from_secs(5);

// Canned-response server on an ephemeral port, served by axum from a
// dedicated runtime thread. Unknown paths get a 404. Every request is
// recorded so tests can assert trial order and request headers.
pub struct FixtureServer {
    addr: SocketAddr,
    state: Arc<Fixture>,
}

#[derive(Clone, Debug)]
pub struct Hit {
    pub path: String,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
enum Canned {
    Body { status: StatusCode, body: Vec<u8> },
    Stall,
}

struct Fixture {
    routes: HashMap<String, Canned>,
    hits: Mutex<Vec<Hit>>,
}

impl FixtureServer {
    pub fn start(routes: &[(&str, u16, &str)]) -> Self {
        Self::start_with_stalls(routes, &[])
    }

    pub fn start_with_stalls(routes: &[(&str, u16, &str)], stalled: &[&str]) -> Self {
        let mut table: HashMap<String, Canned> = routes
            .iter()
            .map(|(path, status, body)| {
                let status = StatusCode::from_u16(*status).expect("valid fixture status");
                let canned = Canned::Body {
                    status,
                    body: body.as_bytes().to_vec(),
                };
                (path.to_string(), canned)
            })
            .collect();
        for path in stalled {
            table.insert(path.to_string(), Canned::Stall);
        }
        let state = Arc::new(Fixture {
            routes: table,
            hits: Mutex::new(Vec::new()),
        });
        let app = Router::new()
            .fallback(answer)
            .with_state(Arc::clone(&state));

        let (addr_tx, addr_rx) = mpsc::channel();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .expect("fixture runtime");
            runtime.block_on(async move {
                let listener = TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind fixture server");
                let addr = listener.local_addr().expect("fixture server addr");
                let _ = addr_tx.send(addr);
                let _ = axum::serve(listener, app).await;
            });
        });
        let addr = addr_rx.recv().expect("fixture server started");
        Self { addr, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<Hit> {
        self.state
            .hits
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .clone()
    }

    pub fn hits(&self) -> Vec<String> {
        self.requests().into_iter().map(|hit| hit.path).collect()
    }
}

async fn answer(State(fixture): State<Arc<Fixture>>, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_string();
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    fixture
        .hits
        .lock()
        .unwrap_or_else(|err| err.into_inner())
        .push(Hit {
            path: path.clone(),
            user_agent,
        });

    match fixture.routes.get(&path).cloned() {
        Some(Canned::Body { status, body }) => (status, body).into_response(),
        Some(Canned::Stall) => {
            tokio::time::sleep(STALL).await;
            (StatusCode::OK, "too late").into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

pub fn nova_fetch_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_nova-fetch"))
}

// Command for the binary with every remote pointed at the fixture server so
// no test can reach the real network.
pub fn nova_fetch_command(server: &FixtureServer) -> Command {
    let mut cmd = Command::new(nova_fetch_binary());
    cmd.env("NOVA_FETCH_LISTING_URL", server.url("/api/engines"))
        .env("NOVA_FETCH_RAW_BASE", server.url("/raw"))
        .env("NOVA_FETCH_WIKI_URL", server.url("/wiki"))
        .env("NOVA_FETCH_MIRRORS", format!("{} {}", server.url("/raw"), server.url("/mirror")))
        .env("NOVA_FETCH_LOG", "off")
        .env_remove("RUST_LOG");
    for proxy in ["HTTP_PROXY", "HTTPS_PROXY", "ALL_PROXY", "http_proxy", "https_proxy", "all_proxy"] {
        cmd.env_remove(proxy);
    }
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    cmd.output()
        .with_context(|| format!("failed to run {:?}", cmd.get_program()))
}

pub fn wiki_page(public: &[&str], private: &[&str]) -> String {
    let rows = |names: &[&str]| -> String {
        names
            .iter()
            .map(|name| {
                format!(
                    r#"<tr><td>{name}</td><td><a href="https://raw.example/plugins/{name}">{name}</a></td></tr>"#
                )
            })
            .collect()
    };
    format!(
        "<html><body>\
         <h1>Unofficial search plugins</h1>\
         <h2>Plugins for Public sites</h2><table><tr><th>Site</th><th>Plugin</th></tr>{}</table>\
         <h2>Plugins for Private sites</h2><table><tr><th>Site</th><th>Plugin</th></tr>{}</table>\
         </body></html>",
        rows(public),
        rows(private)
    )
}
