use fontmirror::error::{Error, FetchError};
use fontmirror::resource::{HttpFetcher, ResourceFetcher};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::time::Duration;

/// Serves one canned HTTP response on a localhost listener.
fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, std::thread::JoinHandle<()>) {
  let listener = TcpListener::bind("127.0.0.1:0").expect("bind localhost");
  let addr = listener.local_addr().unwrap();

  let handle = std::thread::spawn(move || {
    if let Ok((mut stream, _)) = listener.accept() {
      let _ = stream.read(&mut [0u8; 1024]);
      let headers = format!(
        "{status_line}\r\nContent-Type: text/css\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
      );
      let _ = stream.write_all(headers.as_bytes());
      let _ = stream.write_all(body);
    }
  });

  (format!("http://{addr}/"), handle)
}

#[test]
fn fetches_response_bodies() {
  let (url, handle) = serve_once("HTTP/1.1 200 OK", b"@font-face { }");
  let fetcher = HttpFetcher::new().with_timeout(Duration::from_secs(5));
  let bytes = fetcher.fetch(&url).expect("fetch succeeds");
  handle.join().unwrap();
  assert_eq!(bytes, b"@font-face { }");
}

#[test]
fn fetch_text_decodes_utf8() {
  let (url, handle) = serve_once("HTTP/1.1 200 OK", "@font-face { /* ünïcode */ }".as_bytes());
  let fetcher = HttpFetcher::new().with_timeout(Duration::from_secs(5));
  let text = fetcher.fetch_text(&url).expect("fetch succeeds");
  handle.join().unwrap();
  assert!(text.contains("ünïcode"));
}

#[test]
fn non_success_status_is_fatal() {
  let (url, handle) = serve_once("HTTP/1.1 404 Not Found", b"not found");
  let fetcher = HttpFetcher::new().with_timeout(Duration::from_secs(5));
  let err = fetcher.fetch(&url).unwrap_err();
  handle.join().unwrap();
  match err {
    Error::Fetch(FetchError::Status { status, url: err_url }) => {
      assert_eq!(status, 404);
      assert_eq!(err_url, url);
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn connection_refused_is_a_transport_error() {
  // Bind then drop to get a port with nothing listening.
  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);

  let fetcher = HttpFetcher::new().with_timeout(Duration::from_secs(5));
  let err = fetcher.fetch(&format!("http://{addr}/")).unwrap_err();
  assert!(matches!(err, Error::Fetch(FetchError::Transport { .. })));
}
