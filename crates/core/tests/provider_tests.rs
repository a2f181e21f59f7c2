// ═══════════════════════════════════════════════════════════════════
// Provider Tests — HttpPredictionProvider construction, transport
// failures and the wire contract against a loopback server
// ═══════════════════════════════════════════════════════════════════

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use carvalue_core::errors::CoreError;
use carvalue_core::models::request::{FormField, PredictionRequest};
use carvalue_core::models::result::PredictionResult;
use carvalue_core::models::server::{ComparedCar, ServerHistoryRecord};
use carvalue_core::models::settings::ControllerSettings;
use carvalue_core::providers::http::{HttpPredictionProvider, COMPARE_MIN_MESSAGE};
use carvalue_core::providers::traits::PredictionProvider;

/// Nothing listens on port 1, so connecting fails immediately.
const CLOSED_ORIGIN: &str = "http://127.0.0.1:1";

mod construction {
    use super::*;

    #[test]
    fn urls_from_settings() {
        let provider =
            HttpPredictionProvider::new(&ControllerSettings::with_base_url("https://carvalue.ai"));
        assert_eq!(provider.predict_url(), "https://carvalue.ai/predict");
        assert_eq!(provider.name(), "CarValue HTTP");
    }

    #[test]
    fn custom_paths() {
        let settings = ControllerSettings {
            base_url: "http://localhost:5000/".into(),
            predict_path: "/api/v2/predict".into(),
            ..Default::default()
        };
        let provider = HttpPredictionProvider::new(&settings);
        assert_eq!(provider.predict_url(), "http://localhost:5000/api/v2/predict");
    }

    #[test]
    fn default_is_origin_relative() {
        assert_eq!(HttpPredictionProvider::default().predict_url(), "/predict");
    }
}

mod failures {
    use super::*;

    fn closed_provider() -> HttpPredictionProvider {
        HttpPredictionProvider::new(&ControllerSettings::with_base_url(CLOSED_ORIGIN))
    }

    #[tokio::test]
    async fn predict_transport_failure_is_network_error() {
        let err = closed_provider()
            .predict(&PredictionRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn server_history_transport_failure() {
        assert!(matches!(
            closed_provider().server_history().await,
            Err(CoreError::Network(_))
        ));
    }

    #[tokio::test]
    async fn compare_needs_two_cars_before_any_request() {
        let one = vec![ComparedCar {
            price: "₹ 5.00 Lakh".into(),
            price_value: 500_000.0,
        }];
        let err = closed_provider().compare(&one).await.unwrap_err();
        match err {
            CoreError::InvalidInput(msg) => assert_eq!(msg, COMPARE_MIN_MESSAGE),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}

mod server_records {
    use super::*;

    #[test]
    fn parses_service_history_record() {
        let json = r#"{
            "timestamp": "2024-05-01T12:34:56.123456",
            "year": "2018",
            "kms": "42000",
            "fuel": "Petrol",
            "transmission": "Manual",
            "price": 512345.67,
            "price_formatted": "₹ 5.12 Lakh"
        }"#;
        let record: ServerHistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.year, "2018");
        assert_eq!(record.price_formatted, "₹ 5.12 Lakh");
        assert_eq!(record.timestamp.format("%H:%M").to_string(), "12:34");
    }
}

mod wire {
    use super::*;

    /// Raw text of one HTTP request: head, blank line, body.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut raw = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&raw);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                if raw.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8(raw).unwrap()
    }

    /// Serve exactly one response on a fresh port. The join handle yields
    /// the request the server received.
    fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                concat!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n",
                    "Connection: close\r\n\r\n{}"
                ),
                status,
                content_type,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request
        });
        (origin, handle)
    }

    fn provider_for(origin: &str) -> HttpPredictionProvider {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpPredictionProvider::with_client(client, &ControllerSettings::with_base_url(origin))
    }

    fn sample_request() -> PredictionRequest {
        PredictionRequest::from_fields(|f| match f {
            FormField::Year => "2019".into(),
            FormField::Kms => "45000".into(),
            FormField::Fuel => "Petrol".into(),
            FormField::Transmission => "Manual".into(),
            _ => String::new(),
        })
    }

    fn body_of(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn posts_form_as_json_and_parses_success() {
        let (origin, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"success":true,"price":"₹ 5.25 Lakh","price_value":525000,
                "insights":[{"type":"info","text":"Diesel cars hold value well"}],
                "car_age":12,"depreciation":50}"#,
        );

        let result = provider_for(&origin).predict(&sample_request()).await.unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("POST /predict HTTP/1.1\r\n"), "{request}");
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));
        let body = body_of(&request);
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 10);
        assert!(obj.values().all(serde_json::Value::is_string));
        assert_eq!(obj["year"], "2019");
        assert_eq!(obj["kms"], "45000");
        assert_eq!(obj["body"], "");

        let estimate = result.estimate().expect("success result");
        assert_eq!(estimate.price, "₹ 5.25 Lakh");
        assert_eq!(estimate.price_value, 525_000.0);
        assert_eq!(estimate.insights.len(), 1);
        assert_eq!(estimate.car_age_text(), "12 years");
        assert_eq!(estimate.depreciation_text(), "50%");
    }

    #[tokio::test]
    async fn error_status_with_failure_body_is_a_failure_result() {
        let (origin, server) = serve_once(
            "400 Bad Request",
            "application/json",
            r#"{"success":false,"error":"Missing required field: kms"}"#,
        );

        let result = provider_for(&origin).predict(&sample_request()).await.unwrap();
        server.join().unwrap();

        assert_eq!(
            result,
            PredictionResult::Failure {
                error: "Missing required field: kms".into()
            }
        );
    }

    #[tokio::test]
    async fn non_json_error_page_is_malformed_response() {
        let (origin, server) =
            serve_once("500 Internal Server Error", "text/plain", "Internal Server Error");

        let err = provider_for(&origin)
            .predict(&sample_request())
            .await
            .unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, CoreError::MalformedResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn server_history_is_fetched_with_get() {
        let (origin, server) = serve_once(
            "200 OK",
            "application/json",
            r#"{"success":true,"history":[{"timestamp":"2024-05-01T12:34:56.123456",
                "year":"2018","kms":"42000","fuel":"Petrol","transmission":"Manual",
                "price":512345.67,"price_formatted":"₹ 5.12 Lakh"}]}"#,
        );

        let history = provider_for(&origin).server_history().await.unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /history HTTP/1.1\r\n"), "{request}");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].kms, "42000");
    }
}
