// ═══════════════════════════════════════════════════════════════════
// Provider Tests: HttpNftService against a canned local HTTP server
// ═══════════════════════════════════════════════════════════════════

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use mint_dashboard_core::errors::CoreError;
use mint_dashboard_core::models::mint::{ImageUpload, MintKind};
use mint_dashboard_core::models::settings::ClientSettings;
use mint_dashboard_core::providers::http::HttpNftService;
use mint_dashboard_core::providers::traits::NftService;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers: one-shot HTTP server
// ═══════════════════════════════════════════════════════════════════

const RECORD_JSON: &str = r#"{
    "id": "7f3c2a10-5d4e-4f1b-9a8c-0e2d1b3c4a5f",
    "nft_type": "short",
    "creation_timestamp": "2025-01-15T14:32:05.123456Z",
    "minting_price_btc": 35250.5,
    "minting_price_sol": 121.25,
    "gif_url": "/api/nft/generated_gifs/7f3c2a10.gif",
    "original_image_url": "/api/nft/uploads/cat.png"
}"#;

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn content_length(head: &str) -> Option<usize> {
    head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Accept one connection, answer it with `status` + `body`, and hand back
/// the raw request text.
async fn serve_once(status: &'static str, body: &'static str) -> (ClientSettings, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let head_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find(&buf, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        if let Some(len) = content_length(&head) {
            while buf.len() < head_end + len {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
        } else if head.to_ascii_lowercase().contains("transfer-encoding: chunked") {
            while !buf.ends_with(b"0\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&buf).to_string()
    });

    let settings = ClientSettings::default().with_base_url(format!("http://{addr}"));
    (settings, handle)
}

fn png() -> ImageUpload {
    ImageUpload::new("cat.png", b"\x89PNG fake image bytes".to_vec()).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Endpoints
// ═══════════════════════════════════════════════════════════════════

mod endpoints {
    use super::*;

    #[test]
    fn urls_follow_settings() {
        let svc = HttpNftService::new(&ClientSettings::default());
        assert_eq!(svc.mint_url(), "http://localhost:5000/api/nft/mint");
        assert_eq!(svc.list_url(), "http://localhost:5000/api/nft/all");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let settings = ClientSettings {
            base_url: "https://nft.example.com/".into(),
            api_prefix: "/v1/".into(),
            ..ClientSettings::default()
        };
        let svc = HttpNftService::new(&settings);
        assert_eq!(svc.mint_url(), "https://nft.example.com/v1/nft/mint");
    }

    #[test]
    fn empty_prefix() {
        let settings = ClientSettings {
            api_prefix: String::new(),
            ..ClientSettings::default()
        };
        assert_eq!(
            HttpNftService::new(&settings).list_url(),
            "http://localhost:5000/nft/all"
        );
    }

    #[test]
    fn has_a_name() {
        assert_eq!(HttpNftService::default().name(), "NFT service (HTTP)");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Mint
// ═══════════════════════════════════════════════════════════════════

mod mint {
    use super::*;

    #[tokio::test]
    async fn sends_file_and_kind_as_multipart() {
        let (settings, server) = serve_once("201 Created", RECORD_JSON).await;
        let svc = HttpNftService::new(&settings);

        let record = svc.mint(&png(), MintKind::Short).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /api/nft/mint HTTP/1.1"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains(r#"name="file"; filename="cat.png""#));
        assert!(request.contains("image/png"));
        assert!(request.contains("fake image bytes"));
        assert!(request.contains(r#"name="nft_type""#));
        assert!(request.contains("\r\n\r\nshort\r\n"));

        assert_eq!(record.nft_type, "short");
        assert_eq!(record.minting_price_btc, 35250.5);
        assert_eq!(record.minting_price_sol, 121.25);
        assert_eq!(
            record.original_image_url.as_deref(),
            Some("/api/nft/uploads/cat.png")
        );
    }

    #[tokio::test]
    async fn error_body_is_surfaced_verbatim() {
        let (settings, server) =
            serve_once("400 Bad Request", r#"{"error": "File type not allowed"}"#).await;
        let svc = HttpNftService::new(&settings);

        let err = svc.mint(&png(), MintKind::Long).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(
            err,
            CoreError::Service {
                status: 400,
                message: "File type not allowed".into()
            }
        );
        assert_eq!(err.user_message(), "File type not allowed");
    }

    #[tokio::test]
    async fn error_without_json_body_uses_generic_message() {
        let (settings, server) = serve_once("500 Internal Server Error", "oops").await;
        let svc = HttpNftService::new(&settings);

        let err = svc.mint(&png(), MintKind::Long).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CoreError::Service { status: 500, .. }));
        assert_eq!(err.user_message(), "Network error or server issue");
    }

    #[tokio::test]
    async fn malformed_success_body_is_deserialization_error() {
        let (settings, server) = serve_once("200 OK", r#"{"id": 42}"#).await;
        let svc = HttpNftService::new(&settings);

        let err = svc.mint(&png(), MintKind::Long).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CoreError::Deserialization(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// List
// ═══════════════════════════════════════════════════════════════════

mod list_all {
    use super::*;

    #[tokio::test]
    async fn parses_records_in_service_order() {
        let body = r#"[
            {"id": "a", "nft_type": "long", "creation_timestamp": "2025-01-15T10:00:00Z",
             "minting_price_btc": 35000.0, "minting_price_sol": 120.0, "gif_url": "/g/a.gif"},
            {"id": "b", "nft_type": "short", "creation_timestamp": "2025-01-15T09:00:00Z",
             "minting_price_btc": 34900.0, "minting_price_sol": 119.0, "gif_url": "/g/b.gif",
             "original_image_url": "/u/b.png"}
        ]"#;
        let (settings, server) = serve_once("200 OK", body).await;
        let svc = HttpNftService::new(&settings);

        let records = svc.list_all().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/nft/all HTTP/1.1"));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "a");
        assert_eq!(records[0].original_image_url, None);
        assert_eq!(records[1].nft_type, "short");
    }

    #[tokio::test]
    async fn unknown_kind_is_passed_through_untouched() {
        let body = r#"[{"id": "x", "nft_type": "sideways", "creation_timestamp": "2025-01-15T10:00:00Z",
             "minting_price_btc": 1.0, "minting_price_sol": 2.0, "gif_url": "/g/x.gif"}]"#;
        let (settings, server) = serve_once("200 OK", body).await;
        let svc = HttpNftService::new(&settings);

        let records = svc.list_all().await.unwrap();
        server.await.unwrap();

        assert_eq!(records[0].nft_type, "sideways");
    }

    #[tokio::test]
    async fn empty_list() {
        let (settings, server) = serve_once("200 OK", "[]").await;
        let svc = HttpNftService::new(&settings);
        assert!(svc.list_all().await.unwrap().is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_array_body_is_deserialization_error() {
        let (settings, server) = serve_once("200 OK", r#"{"nfts": []}"#).await;
        let svc = HttpNftService::new(&settings);

        let err = svc.list_all().await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, CoreError::Deserialization(_)));
        assert!(err.is_remote());
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let settings = ClientSettings::default().with_base_url(format!("http://{addr}"));
        let err = HttpNftService::new(&settings).list_all().await.unwrap_err();

        assert!(matches!(err, CoreError::Network(_)));
        assert_eq!(err.user_message(), "Network error or server issue");
    }
}
