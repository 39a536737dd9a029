//! warp-based stub of the strategy backend for adapter and CLI tests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use warp::http::{HeaderMap, Method, StatusCode};
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::{Filter, Reply};

/// A canned response for one method and path.
#[derive(Clone)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
}

impl Route {
    pub fn new(method: &'static str, path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            method: Method::from_bytes(method.as_bytes()).expect("valid method"),
            path,
            status: StatusCode::from_u16(status).expect("valid status code"),
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

type Recorded = Arc<Mutex<Vec<RecordedRequest>>>;

pub struct StubServer {
    pub base_url: String,
    requests: Recorded,
}

impl StubServer {
    /// Serve `routes` on the current tokio runtime. Unknown routes get 404.
    pub fn spawn(routes: Vec<Route>) -> Self {
        let requests = Recorded::default();
        let (addr, server) = warp::serve(stub_filter(routes, Arc::clone(&requests)))
            .bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        Self::bound(addr, requests)
    }

    /// Serve `routes` from a runtime on a background thread, for callers
    /// without a runtime of their own (binary tests).
    pub fn start(routes: Vec<Route>) -> Self {
        let requests = Recorded::default();
        let recorded = Arc::clone(&requests);
        let (addr_tx, addr_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            runtime.block_on(async move {
                let (addr, server) =
                    warp::serve(stub_filter(routes, recorded)).bind_ephemeral(([127, 0, 0, 1], 0));
                addr_tx.send(addr).expect("report stub address");
                server.await;
            });
        });

        let addr = addr_rx.recv().expect("stub server bound");
        Self::bound(addr, requests)
    }

    fn bound(addr: SocketAddr, requests: Recorded) -> Self {
        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

fn stub_filter(
    routes: Vec<Route>,
    requests: Recorded,
) -> impl Filter<Extract = (warp::reply::Response,), Error = warp::Rejection> + Clone {
    let routes = Arc::new(routes);
    warp::method()
        .and(warp::path::full())
        .and(warp::header::headers_cloned())
        .and(warp::body::bytes())
        .and(warp::any().map(move || Arc::clone(&routes)))
        .and(warp::any().map(move || Arc::clone(&requests)))
        .and_then(respond)
}

async fn respond(
    method: Method,
    path: FullPath,
    headers: HeaderMap,
    body: Bytes,
    routes: Arc<Vec<Route>>,
    requests: Recorded,
) -> Result<warp::reply::Response, Infallible> {
    requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: path.as_str().to_string(),
        headers,
        body,
    });

    let Some(route) = routes
        .iter()
        .find(|route| route.method == method && route.path == path.as_str())
    else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    if !route.delay.is_zero() {
        tokio::time::sleep(route.delay).await;
    }

    let reply = warp::reply::with_header(route.body.clone(), "content-type", "application/json");
    Ok(warp::reply::with_status(reply, route.status).into_response())
}

pub const WALLETS_BODY: &str = r#"{
    "success": true,
    "wallets": [
        {"id": 1, "address": "0x1111111111111111111111111111111111111111", "chain": "ethereum", "is_active": true, "usd_balance": 2500.0},
        {"id": 2, "address": "0x2222222222222222222222222222222222222222", "chain": "polygon", "is_active": false, "usd_balance": 10.0},
        {"id": 3, "address": "0x3333333333333333333333333333333333333333", "chain": "arbitrum", "is_active": true}
    ]
}"#;

pub const EXECUTE_OK_BODY: &str = r#"{
    "success": true,
    "total_profit": 12.5,
    "wallets": [
        {
            "address": "0x1111111111111111111111111111111111111111",
            "chain": "ethereum",
            "profit": 12.5,
            "strategies": [
                {"strategy": "multi_hop", "success": true, "profit": 12.5, "details": {"path": ["USDC", "WETH", "USDC"]}}
            ]
        }
    ]
}"#;
