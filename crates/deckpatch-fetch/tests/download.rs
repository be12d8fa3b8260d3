use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use deckpatch_fetch::{FetchError, FetchOptions, download};
use deckpatch_verify::Sha256Hasher;

/// Serve one canned HTTP/1.1 response on a loopback port.
fn serve_once(status: &'static str, body: &'static [u8]) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(body).unwrap();
        stream.flush().unwrap();
    });

    (format!("http://{addr}/mods/deck.zip"), handle)
}

#[test]
fn test_download_streams_and_hashes() {
    let body: &'static [u8] = b"PK\x03\x04 not really a zip";
    let (url, server) = serve_once("200 OK", body);

    let archive = download(&url, &FetchOptions::default()).unwrap();
    server.join().unwrap();

    assert_eq!(archive.bytes(), body.len() as u64);
    assert_eq!(archive.sha256(), Sha256Hasher::digest_hex(body));
    assert_eq!(archive.path().extension().unwrap(), "zip");
    assert_eq!(std::fs::read(archive.path()).unwrap(), body);

    let path = archive.path().to_path_buf();
    drop(archive);
    assert!(!path.exists());
}

#[test]
fn test_download_non_success_status() {
    let (url, server) = serve_once("404 Not Found", b"missing");

    let err = download(&url, &FetchOptions::default()).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, FetchError::Http { status: 404, .. }));
}

#[test]
fn test_download_checksum_mismatch() {
    let (url, server) = serve_once("200 OK", b"tampered");

    let options = FetchOptions::default().expected_sha256("00".repeat(32));
    let err = download(&url, &options).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, FetchError::Verification(_)));
}

#[test]
fn test_download_rejects_non_http() {
    let err = download("ftp://example.com/deck.zip", &FetchOptions::default()).unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl(_)));
}
