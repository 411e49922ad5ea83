//! Mount-time fetch against the message API

use super::App;
use crate::types::{FetchState, ResponsePayload};
use eframe::egui;
use tracing::{debug, error, info};

/// Issue one GET against the API and parse the body as a payload.
pub(crate) async fn fetch_payload(
    client: &reqwest::Client,
    url: &str,
) -> Result<ResponsePayload, String> {
    let response = client.get(url).send().await.map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<ResponsePayload>()
        .await
        .map_err(|e| e.to_string())
}

impl App {
    /// Kick off the mount-time fetch. Gated by `fetch_started`, so repeated
    /// calls from the update loop never issue a second request.
    pub fn start_fetch(&mut self, ctx: &egui::Context) {
        if self.fetch_started {
            return;
        }
        self.fetch_started = true;

        // Logged before the response can land, so this always shows Loading
        debug!(state = ?*self.fetch_state.lock().unwrap(), url = %self.api_url, "Mounting message view");

        let state = self.fetch_state.clone();
        let url = self.api_url.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let client = reqwest::Client::new();
            let result = fetch_payload(&client, &url).await;
            match result {
                Ok(payload) => {
                    info!(message = ?payload.message, "Message fetched");
                    *state.lock().unwrap() = FetchState::Loaded(payload);
                }
                Err(e) => {
                    error!(error = %e, url = %url, "Message fetch failed");
                    *state.lock().unwrap() = FetchState::Failed(e);
                }
            }
            ctx.request_repaint();
        });
    }

    /// Re-mount the message view: reset to Loading and issue exactly one new
    /// request. A response from a superseded request may still land and is
    /// applied as-is; nothing is cancelled.
    pub fn remount(&mut self, ctx: &egui::Context) {
        info!("Re-mounting message view");
        *self.fetch_state.lock().unwrap() = FetchState::Loading;
        self.fetch_started = false;
        self.start_fetch(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Serve canned HTTP responses on an ephemeral port, counting requests.
    /// Returns the endpoint URL and the request counter.
    fn spawn_server(body: &'static str, max_requests: usize) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();

        std::thread::spawn(move || {
            for _ in 0..max_requests {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                hits_clone.fetch_add(1, Ordering::SeqCst);
                // Drain the request head before responding
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{}/api/data", addr), hits)
    }

    fn test_app(api_url: String) -> App {
        let settings = Settings {
            api_url: Some(api_url),
            ..Default::default()
        };
        App::with_settings(settings, std::env::temp_dir())
    }

    fn wait_until_resolved(app: &App) -> FetchState {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let state = app.fetch_state();
            if !state.is_loading() {
                return state;
            }
            assert!(Instant::now() < deadline, "fetch did not resolve in time");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn shows_loading_before_response_arrives() {
        let app = test_app("http://127.0.0.1:1/api/data".to_string());
        assert_eq!(app.fetch_state().display_text(), "Loading...");
    }

    #[test]
    fn fetch_payload_parses_message() {
        let (url, _) = spawn_server(r#"{"message":"hello"}"#, 1);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = reqwest::Client::new();
        let payload = runtime.block_on(fetch_payload(&client, &url)).unwrap();
        assert_eq!(payload.message.as_deref(), Some("hello"));
    }

    #[test]
    fn fetch_payload_accepts_missing_message_field() {
        let (url, _) = spawn_server("{}", 1);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = reqwest::Client::new();
        let payload = runtime.block_on(fetch_payload(&client, &url)).unwrap();
        assert_eq!(payload.message, None);
    }

    #[test]
    fn fetch_payload_rejects_non_json_body() {
        let (url, _) = spawn_server("<html>oops</html>", 1);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = reqwest::Client::new();
        let result = runtime.block_on(fetch_payload(&client, &url));
        assert!(result.is_err());
    }

    #[test]
    fn fetch_payload_reports_connection_failure() {
        // Bind then drop to get a port nothing is listening on
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = reqwest::Client::new();
        let result = runtime.block_on(fetch_payload(&client, &format!("http://{}/api/data", addr)));
        assert!(result.is_err());
    }

    #[test]
    fn mount_resolves_to_fetched_message() {
        let (url, hits) = spawn_server(r#"{"message":"hello"}"#, 1);
        let mut app = test_app(url);
        let ctx = egui::Context::default();

        app.start_fetch(&ctx);
        let state = wait_until_resolved(&app);

        assert_eq!(state.display_text(), "hello");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeated_frames_issue_exactly_one_request() {
        let (url, hits) = spawn_server(r#"{"message":"hello"}"#, 4);
        let mut app = test_app(url);
        let ctx = egui::Context::default();

        // Simulate several update-loop frames
        for _ in 0..5 {
            app.start_fetch(&ctx);
        }
        wait_until_resolved(&app);
        // Give any stray duplicate request time to show up
        std::thread::sleep(Duration::from_millis(100));

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn remount_resets_to_loading_and_refetches() {
        // Second response is delayed so the reset back to Loading is
        // observable before it resolves
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_clone = hits.clone();
        std::thread::spawn(move || {
            for n in 0..2 {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                hits_clone.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                if n == 1 {
                    std::thread::sleep(Duration::from_millis(300));
                }
                let body = r#"{"message":"hello"}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        let mut app = test_app(format!("http://{}/api/data", addr));
        let ctx = egui::Context::default();

        app.start_fetch(&ctx);
        wait_until_resolved(&app);

        app.remount(&ctx);
        assert_eq!(app.fetch_state().display_text(), "Loading...");

        let state = wait_until_resolved(&app);
        assert_eq!(state.display_text(), "hello");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn http_error_status_resolves_to_failed() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                );
            }
        });

        let mut app = test_app(format!("http://{}/api/data", addr));
        let ctx = egui::Context::default();
        app.start_fetch(&ctx);
        let state = wait_until_resolved(&app);
        assert!(matches!(state, FetchState::Failed(_)));
    }

    #[test]
    fn drop_while_request_pending_does_not_panic() {
        // Server that never responds; the app is dropped with the request
        // still in flight
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                std::thread::sleep(Duration::from_millis(500));
                drop(stream);
            }
        });

        let mut app = test_app(format!("http://{}/api/data", addr));
        let ctx = egui::Context::default();
        app.start_fetch(&ctx);
        std::thread::sleep(Duration::from_millis(50));
        drop(app);
    }
}
