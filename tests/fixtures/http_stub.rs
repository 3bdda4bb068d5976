//! Minimal HTTP/1.1 stub server for exercising the blocking clients offline.
//!
//! Every connection gets one response on its own thread and is then closed,
//! so a slow handler never holds up the next request. The handler sees the
//! request target (path + query) and picks the status and JSON body.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&requests);

        let handler = Arc::new(handler);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                let handler = Arc::clone(&handler);
                let seen = Arc::clone(&seen);
                thread::spawn(move || serve(stream, handler.as_ref(), &seen));
            }
        });

        Self { base_url, requests }
    }

    /// Request targets received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

fn serve<F>(mut stream: TcpStream, handler: &F, seen: &Mutex<Vec<String>>)
where
    F: Fn(&str) -> (u16, String),
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let target = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    seen.lock().expect("requests lock").push(target.clone());

    let (status, body) = handler(&target);
    let reason = if status == 200 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// OSRM-style `/route` body for the given (lat, lng) points.
pub fn osrm_route_body(points: &[(f64, f64)]) -> String {
    let coordinates: Vec<[f64; 2]> = points.iter().map(|(lat, lng)| [*lng, *lat]).collect();
    serde_json::json!({
        "code": "Ok",
        "routes": [{
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "distance": 1000.0,
            "duration": 90.0
        }],
        "waypoints": []
    })
    .to_string()
}

/// Parse `lng,lat;lng,lat` out of an OSRM route request target.
pub fn osrm_pair_from_target(target: &str) -> Option<((f64, f64), (f64, f64))> {
    let path = target.split('?').next()?;
    let coords = path.rsplit('/').next()?;
    let mut points = coords.split(';').map(|pair| {
        let mut parts = pair.split(',');
        let lng: f64 = parts.next()?.parse().ok()?;
        let lat: f64 = parts.next()?.parse().ok()?;
        Some((lat, lng))
    });
    Some((points.next()??, points.next()??))
}

/// An address nothing listens on: bind an ephemeral port, then release it.
pub fn closed_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}", addr)
}
