//! AMP API client over its JSON-over-POST HTTP interface.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{ActionResult, AmpError, Instance, ManagementApi, ServerStatus};

/// AMP API client
///
/// Logs in lazily on first use and caches the session id. A session the
/// panel rejects is dropped so the next call logs in again; the failing
/// call itself is not retried.
pub struct AmpClient {
    http_client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    session: Mutex<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(rename = "sessionID", default)]
    session_id: Option<String>,
    #[serde(rename = "resultReason", default)]
    result_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    #[serde(rename = "State")]
    state: i32,
    #[serde(rename = "Uptime", default)]
    uptime: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ControllerResponse {
    #[serde(rename = "AvailableInstances", default)]
    available_instances: Vec<InstanceResponse>,
}

#[derive(Debug, Deserialize)]
struct InstanceResponse {
    #[serde(rename = "InstanceID", alias = "InstanceId")]
    instance_id: String,
    #[serde(rename = "InstanceName")]
    instance_name: String,
    #[serde(rename = "FriendlyName", default)]
    friendly_name: String,
    #[serde(rename = "Running", default)]
    running: bool,
}

#[derive(Debug, Deserialize)]
struct ActionResultResponse {
    #[serde(rename = "Status")]
    status: bool,
    #[serde(rename = "Reason", default)]
    reason: Option<String>,
    #[serde(rename = "Result", default)]
    result: Option<Value>,
}

impl From<InstanceResponse> for Instance {
    fn from(raw: InstanceResponse) -> Self {
        let friendly_name = if raw.friendly_name.trim().is_empty() {
            raw.instance_name.clone()
        } else {
            raw.friendly_name
        };
        Self {
            id: raw.instance_id,
            name: raw.instance_name,
            friendly_name,
            running: raw.running,
        }
    }
}

impl From<ActionResultResponse> for ActionResult {
    fn from(raw: ActionResultResponse) -> Self {
        let result = match raw.result {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text),
            Some(other) => Some(other.to_string()),
        };
        Self {
            status: raw.status,
            result,
            reason: raw.reason.filter(|reason| !reason.trim().is_empty()),
        }
    }
}

impl AmpClient {
    /// Create a new client for the panel at `base_url` (e.g. `http://127.0.0.1:8080`).
    ///
    /// `timeout` bounds every HTTP request, login included.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AmpError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            session: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/API/{}", self.base_url, path)
    }

    async fn session_id(&self) -> Result<String, AmpError> {
        let mut session = self.session.lock().await;
        if let Some(id) = session.as_ref() {
            return Ok(id.clone());
        }

        let id = self.login().await?;
        *session = Some(id.clone());
        Ok(id)
    }

    async fn invalidate_session(&self) {
        *self.session.lock().await = None;
    }

    async fn login(&self) -> Result<String, AmpError> {
        let body = json!({
            "username": self.username,
            "password": self.password,
            "token": "",
            "rememberMe": false,
        });

        let value = self.post("Core/Login", &body).await?;
        let response: LoginResponse = serde_json::from_value(value)
            .map_err(|e| AmpError::InvalidFormat(format!("Core/Login: {}", e)))?;

        if !response.success {
            let reason = response
                .result_reason
                .filter(|reason| !reason.trim().is_empty())
                .unwrap_or_else(|| "invalid credentials".to_string());
            return Err(AmpError::LoginRejected(reason));
        }

        let session_id = response
            .session_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AmpError::InvalidFormat("Core/Login: no sessionID".to_string()))?;

        info!("Logged in to AMP at {}", self.base_url);
        Ok(session_id)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, AmpError> {
        debug!("AMP request: {}", path);

        let response = self
            .http_client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AmpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AmpError::InvalidFormat(format!("{}: {}", path, e)))?;

        if let Some(message) = api_error_message(&value) {
            return Err(AmpError::Api { message });
        }

        Ok(unwrap_result(value))
    }

    /// Authenticated call.
    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Map<String, Value>,
    ) -> Result<T, AmpError> {
        let session_id = self.session_id().await?;
        params.insert("SESSIONID".to_string(), Value::String(session_id));

        let value = match self.post(path, &Value::Object(params)).await {
            Ok(value) => value,
            Err(err) => {
                if is_session_error(&err) {
                    warn!("AMP session rejected, will log in again on next call");
                    self.invalidate_session().await;
                }
                return Err(err);
            }
        };

        serde_json::from_value(value).map_err(|e| AmpError::InvalidFormat(format!("{}: {}", path, e)))
    }
}

/// AMP reports API-level failures as `{"Title": ..., "Message": ...}`.
fn api_error_message(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    let title = object.get("Title")?.as_str()?;
    let message = object.get("Message")?.as_str()?;
    if message.trim().is_empty() {
        Some(title.to_string())
    } else {
        Some(format!("{}: {}", title, message))
    }
}

/// Newer panels wrap payloads as `{"result": ...}`.
fn unwrap_result(value: Value) -> Value {
    match value {
        Value::Object(mut object) if object.len() == 1 && object.contains_key("result") => {
            object.remove("result").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn is_session_error(err: &AmpError) -> bool {
    match err {
        AmpError::Status { status, .. } => matches!(status, 401 | 403),
        AmpError::Api { message } => message.contains("Unauthorized"),
        _ => false,
    }
}

#[async_trait::async_trait]
impl ManagementApi for AmpClient {
    async fn get_status(&self) -> Result<ServerStatus, AmpError> {
        let status: StatusResponse = self.call("Core/GetStatus", Map::new()).await?;
        Ok(ServerStatus {
            state: status.state,
            uptime: status.uptime,
        })
    }

    async fn list_instances(&self) -> Result<Vec<Instance>, AmpError> {
        let controllers: Vec<ControllerResponse> =
            self.call("ADSModule/GetInstances", Map::new()).await?;
        Ok(controllers
            .into_iter()
            .next()
            .map(|controller| {
                controller
                    .available_instances
                    .into_iter()
                    .map(Instance::from)
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn start_instance(&self, name: &str) -> Result<ActionResult, AmpError> {
        let mut params = Map::new();
        params.insert("InstanceName".to_string(), Value::String(name.to_string()));
        let result: ActionResultResponse = self.call("ADSModule/StartInstance", params).await?;
        Ok(result.into())
    }

    async fn stop_instance(&self, name: &str) -> Result<ActionResult, AmpError> {
        let mut params = Map::new();
        params.insert("InstanceName".to_string(), Value::String(name.to_string()));
        let result: ActionResultResponse = self.call("ADSModule/StopInstance", params).await?;
        Ok(result.into())
    }
}
