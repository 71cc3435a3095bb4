use crate::actions::{apply_action, AppAction};
use crate::config::health_url;
use crate::error::AuditError;
use crate::json_text;
use crate::state::AppState;
use crate::types::{AuditResult, HealthStatus};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// HTTP side of the audit workflow
#[derive(Debug, Clone, Default)]
pub struct AuditClient {
    http: reqwest::Client,
}

impl AuditClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check `text` and submit its compact encoding; one attempt, no retry
    pub async fn audit_text(&self, url: &str, text: &str) -> Result<AuditResult, AuditError> {
        json_text::check_syntax(text).map_err(AuditError::PayloadParse)?;
        self.submit(url, json_text::compact(text)).await
    }

    /// POST the JSON body and decode the report
    pub async fn submit(&self, url: &str, body: String) -> Result<AuditResult, AuditError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(AuditError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuditError::Service {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(AuditError::Network)?;
        let report: Value = serde_json::from_str(&body).map_err(AuditError::ResponseParse)?;

        Ok(AuditResult::new(report))
    }

    /// GET the service's liveness route next to `endpoint`
    pub async fn probe_health(&self, endpoint: &str) -> HealthStatus {
        let Some(url) = health_url(endpoint) else {
            return HealthStatus::Unreachable;
        };

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => HealthStatus::Ok,
            Ok(response) => HealthStatus::Status(response.status().as_u16()),
            Err(e) => {
                warn!(%url, error = %e, "health probe failed");
                HealthStatus::Unreachable
            }
        }
    }
}

/// Loading state held by one audit attempt
///
/// Settling applies the outcome and the loading reset in a single write.
/// Dropping an unsettled attempt (task torn down mid-request) still resets
/// loading so the submit control comes back.
struct InFlight {
    state: Arc<RwLock<AppState>>,
    settled: bool,
}

impl InFlight {
    fn settle(mut self, outcome: Result<AuditResult, AuditError>) {
        let outcome = match outcome {
            Ok(result) => {
                info!("audit completed");
                Ok(result)
            }
            Err(e) => {
                let message = e.user_message();
                warn!(error = %message, "audit failed");
                Err(message)
            }
        };

        if let Ok(mut s) = self.state.write() {
            apply_action(AppAction::FinishAudit(outcome), &mut s);
        }
        self.settled = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Ok(mut s) = self.state.write() {
            apply_action(AppAction::AbandonAudit, &mut s);
        }
    }
}

/// Snapshot of what one attempt submits
struct AuditJob {
    url: String,
    text: String,
    in_flight: InFlight,
}

impl AuditJob {
    async fn run(self, client: &AuditClient) {
        info!(url = %self.url, "submitting audit payload");
        let outcome = client.audit_text(&self.url, &self.text).await;
        self.in_flight.settle(outcome);
    }
}

/// Clear the previous error, raise loading and capture the inputs
fn begin_audit(state: &Arc<RwLock<AppState>>) -> Option<AuditJob> {
    let mut s = state.write().ok()?;
    apply_action(AppAction::BeginAudit, &mut s);

    Some(AuditJob {
        url: s.endpoint_input.trim().to_string(),
        text: s.editor.content().to_string(),
        in_flight: InFlight {
            state: Arc::clone(state),
            settled: false,
        },
    })
}

/// Run one audit attempt to completion
pub async fn run_audit(state: Arc<RwLock<AppState>>, client: &AuditClient) {
    if let Some(job) = begin_audit(&state) {
        job.run(client).await;
    }
}

/// Start an audit attempt in the background
///
/// Loading is raised before this returns, so a second trigger in the same
/// frame already sees the submit control disabled.
pub fn spawn_audit(state: Arc<RwLock<AppState>>, client: AuditClient) {
    if let Some(job) = begin_audit(&state) {
        tokio::spawn(async move {
            job.run(&client).await;
        });
    }
}

/// Probe service health in the background
pub fn spawn_health_probe(state: Arc<RwLock<AppState>>, client: AuditClient) {
    let endpoint = {
        let Ok(mut s) = state.write() else {
            return;
        };
        apply_action(AppAction::SetHealth(HealthStatus::Checking), &mut s);
        s.endpoint_input.clone()
    };

    tokio::spawn(async move {
        let status = client.probe_health(&endpoint).await;
        if let Ok(mut s) = state.write() {
            apply_action(AppAction::SetHealth(status), &mut s);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::draw::outcome_rows;
    use mockito::Matcher;
    use serde_json::json;

    // Nothing listens on port 1, so connections are refused
    const UNREACHABLE_URL: &str = "http://127.0.0.1:1/audit";

    fn state_with(url: &str, payload: &str) -> Arc<RwLock<AppState>> {
        let mut state = AppState::new(url.to_string());
        state.editor.set_content(payload.to_string());
        Arc::new(RwLock::new(state))
    }

    fn sample_report() -> Value {
        json!({
            "near_miss_detected": true,
            "qa_time_manual_minutes": 28,
            "qa_time_llm_minutes": 4,
            "escape_rate": 0.02,
            "team_workload_reduction_percent": 85,
            "inconsistencies": [
                {"field": "laterality", "values": {"left": 2, "right": 1}, "severity": "high"},
                {"field": "dose_gy", "values": {"50.0": 2, "48.0": 1}, "severity": "high"}
            ]
        })
    }

    #[tokio::test]
    async fn test_run_audit_success_renders_report() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(sample_report().to_string())
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let state = state_with(&url, &crate::types::AuditPayload::sample_json());

        run_audit(Arc::clone(&state), &AuditClient::new()).await;
        mock.assert_async().await;

        let s = state.read().unwrap();
        assert!(!s.audit.loading);
        assert_eq!(s.audit.error, None);
        let result = s.audit.result.as_ref().unwrap();
        assert_eq!(
            outcome_rows(result),
            vec![
                "Near miss terdeteksi: true",
                "Waktu QA manual: 28 menit",
                "Waktu QA dengan LLM: 4 menit",
                "Escape rate: 0.02",
                "Penurunan beban kerja tim: 85%",
            ]
        );
        assert_eq!(result.inconsistencies(), sample_report().get("inconsistencies"));
    }

    #[tokio::test]
    async fn test_request_body_is_reencoded_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit")
            .match_body(Matcher::Exact(
                r#"{"qa_time_manual_minutes":28,"records":[{"document_type":"resep","dose_gy":50}]}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let text = "{\n    \"qa_time_manual_minutes\" :   28,\n\t\"records\": [ {\"document_type\":\"resep\",   \"dose_gy\": 50} ]\n}";
        let state = state_with(&url, text);

        run_audit(Arc::clone(&state), &AuditClient::new()).await;
        mock.assert_async().await;

        let s = state.read().unwrap();
        assert_eq!(s.audit.error, None);
        assert_eq!(s.audit.result, Some(AuditResult::new(json!({}))));
        // Editor text is left as typed
        assert_eq!(s.editor.content(), text);
    }

    #[tokio::test]
    async fn test_request_body_keeps_values_a_typed_decoder_would_alter() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit")
            .match_body(Matcher::Exact(
                r#"{"dose_gy":50.0,"big":1e400,"note":"\ud800","site":"“left”"}"#.to_string(),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let text = "{\"dose_gy\": 50.0, \"big\": 1e400, \"note\": \"\\ud800\", \"site\": \"“left”\"}";
        let state = state_with(&url, text);
        assert!(state.read().unwrap().can_submit());

        run_audit(Arc::clone(&state), &AuditClient::new()).await;
        mock.assert_async().await;
        assert_eq!(state.read().unwrap().audit.error, None);
    }

    #[tokio::test]
    async fn test_run_audit_server_error_clears_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit")
            .with_status(500)
            .with_body("{\"detail\": \"boom\"}")
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let state = state_with(&url, "{\"records\": []}");
        state.write().unwrap().audit.result = Some(AuditResult::new(sample_report()));

        run_audit(Arc::clone(&state), &AuditClient::new()).await;
        mock.assert_async().await;

        let s = state.read().unwrap();
        assert!(!s.audit.loading);
        assert_eq!(s.audit.error.as_deref(), Some("API error 500"));
        assert_eq!(s.audit.result, None);
    }

    #[tokio::test]
    async fn test_run_audit_unreachable_surfaces_transport_message() {
        let state = state_with(UNREACHABLE_URL, "{\"records\": []}");
        state.write().unwrap().audit.result = Some(AuditResult::new(sample_report()));

        run_audit(Arc::clone(&state), &AuditClient::new()).await;

        let expected = AuditClient::new()
            .audit_text(UNREACHABLE_URL, "{\"records\": []}")
            .await
            .unwrap_err();
        assert!(matches!(expected, AuditError::Network(_)));

        let s = state.read().unwrap();
        assert!(!s.audit.loading);
        assert_eq!(s.audit.error, Some(expected.user_message()));
        assert!(!expected.user_message().is_empty());
        assert_eq!(s.audit.result, None);
    }

    #[tokio::test]
    async fn test_run_audit_malformed_url_is_network_error() {
        let state = state_with("not a url", "{}");

        run_audit(Arc::clone(&state), &AuditClient::new()).await;

        let s = state.read().unwrap();
        assert!(!s.audit.loading);
        assert!(s.audit.error.is_some());
        assert_eq!(s.audit.result, None);
    }

    #[tokio::test]
    async fn test_run_audit_invalid_payload_never_sends() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit")
            .expect(0)
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let state = state_with(&url, "{\"records\": [");
        state.write().unwrap().audit.result = Some(AuditResult::new(sample_report()));

        run_audit(Arc::clone(&state), &AuditClient::new()).await;
        mock.assert_async().await;

        let native = json_text::check_syntax("{\"records\": [").unwrap_err();
        let s = state.read().unwrap();
        assert!(!s.audit.loading);
        assert_eq!(s.audit.error, Some(native.to_string()));
        assert_eq!(s.audit.result, None);
    }

    #[tokio::test]
    async fn test_run_audit_non_json_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/audit")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let state = state_with(&url, "{}");

        run_audit(Arc::clone(&state), &AuditClient::new()).await;

        let native = serde_json::from_str::<Value>("<html>gateway</html>").unwrap_err();
        let s = state.read().unwrap();
        assert_eq!(s.audit.error, Some(native.to_string()));
        assert_eq!(s.audit.result, None);
    }

    #[tokio::test]
    async fn test_run_audit_twice_is_idempotent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/audit")
            .with_status(200)
            .with_body(sample_report().to_string())
            .expect(2)
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let state = state_with(&url, &crate::types::AuditPayload::sample_json());
        let client = AuditClient::new();

        run_audit(Arc::clone(&state), &client).await;
        let first = state.read().unwrap().audit.clone();

        run_audit(Arc::clone(&state), &client).await;
        let second = state.read().unwrap().audit.clone();

        mock.assert_async().await;
        assert_eq!(first, second);
        assert!(second.result.is_some());
    }

    #[tokio::test]
    async fn test_success_after_failure_clears_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/audit")
            .with_status(200)
            .with_body(sample_report().to_string())
            .create_async()
            .await;

        let url = format!("{}/audit", server.url());
        let state = state_with(&url, "{}");
        state.write().unwrap().audit.error = Some("API error 502".to_string());

        run_audit(Arc::clone(&state), &AuditClient::new()).await;

        let s = state.read().unwrap();
        assert_eq!(s.audit.error, None);
        assert!(s.audit.result.is_some());
    }

    #[tokio::test]
    async fn test_spawn_audit_raises_loading_immediately() {
        let state = state_with(UNREACHABLE_URL, "{}");

        spawn_audit(Arc::clone(&state), AuditClient::new());
        {
            let s = state.read().unwrap();
            assert!(s.audit.loading);
            assert!(!s.can_submit());
        }

        for _ in 0..100 {
            if !state.read().unwrap().audit.loading {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        assert!(!state.read().unwrap().audit.loading);
        assert!(state.read().unwrap().audit.error.is_some());
    }

    #[test]
    fn test_abandoned_attempt_resets_loading() {
        let state = state_with(UNREACHABLE_URL, "{}");
        state.write().unwrap().audit.result = Some(AuditResult::new(sample_report()));

        let job = begin_audit(&state).unwrap();
        assert!(state.read().unwrap().audit.loading);
        assert_eq!(job.url, UNREACHABLE_URL);
        assert_eq!(job.text, "{}");

        drop(job);
        let s = state.read().unwrap();
        assert!(!s.audit.loading);
        assert!(s.audit.result.is_some());
    }

    #[tokio::test]
    async fn test_probe_health() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(200)
            .with_body("{\"status\": \"ok\"}")
            .create_async()
            .await;

        let client = AuditClient::new();
        let endpoint = format!("{}/audit", server.url());
        assert_eq!(client.probe_health(&endpoint).await, HealthStatus::Ok);
        assert_eq!(
            client.probe_health(UNREACHABLE_URL).await,
            HealthStatus::Unreachable
        );
        assert_eq!(
            client.probe_health("not a url").await,
            HealthStatus::Unreachable
        );
    }

    #[tokio::test]
    async fn test_probe_health_reports_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/health")
            .with_status(503)
            .create_async()
            .await;

        let endpoint = format!("{}/audit", server.url());
        assert_eq!(
            AuditClient::new().probe_health(&endpoint).await,
            HealthStatus::Status(503)
        );
    }
}
