//! Shared test fixtures: sample payloads and a one-shot loopback HTTP server.
#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// Trimmed-down `/v3.1/all` response with the fields the crate requests.
pub const SAMPLE_ALL: &str = r#"
[
  {
    "name": {"common": "Monaco", "official": "Principality of Monaco", "nativeName": {}},
    "population": 39000,
    "area": 2.02,
    "independent": true,
    "unMember": true,
    "flags": {"png": "https://flagcdn.com/w320/mc.png", "svg": "https://flagcdn.com/mc.svg", "alt": "The flag of Monaco"},
    "region": "Europe",
    "ccn3": "492",
    "cca3": "MCO"
  },
  {
    "name": {"common": "France", "official": "French Republic"},
    "population": 67000000,
    "area": 551695,
    "independent": true,
    "unMember": true,
    "flags": {"png": "https://flagcdn.com/w320/fr.png", "alt": "The flag of France"},
    "region": "Europe",
    "ccn3": "250",
    "cca3": "FRA"
  },
  {
    "name": {"common": "French Polynesia", "official": "French Polynesia"},
    "population": 280904,
    "area": 4167,
    "independent": false,
    "unMember": false,
    "flags": {"png": "https://flagcdn.com/w320/pf.png"},
    "region": "Oceania",
    "ccn3": "258",
    "cca3": "PYF"
  },
  {
    "name": {"common": "Brazil", "official": "Federative Republic of Brazil"},
    "population": 212559409,
    "area": 8515767,
    "independent": true,
    "unMember": true,
    "flags": {"png": "https://flagcdn.com/w320/br.png", "alt": "The flag of Brazil"},
    "region": "Americas",
    "ccn3": "076",
    "cca3": "BRA"
  },
  {
    "name": {"common": "Kosovo", "official": "Republic of Kosovo"},
    "population": 1775378,
    "area": 10908,
    "unMember": false,
    "flags": {"png": "https://flagcdn.com/w320/xk.png"},
    "region": "Europe",
    "cca3": "UNK"
  }
]
"#;

/// Requests seen by a [`serve`] instance (request lines, e.g. `GET /all?fields=... HTTP/1.1`).
pub type Seen = Arc<Mutex<Vec<String>>>;

/// Serve `responses` in order, one per connection, then stop.
///
/// Returns the base URL (`http://127.0.0.1:PORT/v3.1`) and the recorded request lines.
pub fn serve(responses: Vec<(u16, String)>) -> (String, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let head = String::from_utf8_lossy(&buf);
            if let Some(line) = head.lines().next() {
                log.lock().unwrap().push(line.to_string());
            }
            let reply = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(reply.as_bytes());
            let _ = stream.flush();
        }
    });

    (format!("http://{}/v3.1", addr), seen)
}
