use super::{ClientError, Operation, render_path};
use crate::models::ApiResponse;
use reqwest::{Client, Url, multipart};
use serde_json::Value;

/// 응답 상태와 본문을 해석한다. 성공이면 `data` 를 그대로 돌려준다.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Value, ClientError> {
    let envelope: Option<ApiResponse<Value>> = serde_json::from_slice(body).ok();

    if (200..300).contains(&status) {
        return match envelope {
            Some(ApiResponse {
                success: true,
                data,
                ..
            }) => Ok(data.unwrap_or(Value::Null)),
            // /health 는 봉투 없이 응답한다
            None => serde_json::from_slice(body).map_err(|e| ClientError::InvalidResponse {
                status,
                message: e.to_string(),
            }),
            Some(ApiResponse { error, .. }) => Err(ClientError::Server {
                status,
                code: error
                    .as_ref()
                    .map(|e| e.code.clone())
                    .unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
                message: error.map(|e| e.message).unwrap_or_default(),
            }),
        };
    }

    let (code, message) = match envelope.and_then(|e| e.error) {
        Some(error) => (error.code, error.message),
        None => (
            format!("HTTP_{status}"),
            String::from_utf8_lossy(body).chars().take(200).collect(),
        ),
    };

    if status == 401 || status == 403 {
        return Err(ClientError::Auth { status, message });
    }
    Err(ClientError::Server {
        status,
        code,
        message,
    })
}

/// 관리자 API 클라이언트. 엔드포인트 하나당 `Operation` 하나.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::Path(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Path(format!("{base_url}: not an http base URL")));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url_for(&self, op: Operation, params: &[(&str, &str)]) -> Result<Url, ClientError> {
        let path = render_path(op.endpoint().template, params)?;
        // 베이스 URL 의 경로 접두사 뒤에 붙인다 (`http://host/admin` + `/api/v1/...`)
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);
        url.set_fragment(None);
        Ok(url)
    }

    pub async fn call(
        &self,
        op: Operation,
        params: &[(&str, &str)],
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        let endpoint = op.endpoint();
        let url = self.url_for(op, params)?;

        let mut request = self.client.request(endpoint.method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        interpret_response(status, &bytes)
    }

    pub async fn upload_attachment(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ClientError> {
        let op = Operation::UploadAttachment;
        let url = self.url_for(op, &[])?;
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ClientError::Request(format!("{content_type}: {e}")))?;
        let form = multipart::Form::new().part("file", part);

        let mut request = self.client.request(op.endpoint().method, url).multipart(form);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        interpret_response(status, &bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_returns_data_unchanged() {
        let payload = json!({"items": [1, 2], "pagination": {"total": 2}});
        let body = serde_json::to_vec(&ApiResponse::success(payload.clone())).unwrap();
        let data = interpret_response(200, &body).unwrap();
        assert_eq!(data, payload);
    }

    #[test]
    fn test_health_body_without_envelope() {
        let data = interpret_response(200, br#"{"status":"ok","service":"market-admin"}"#).unwrap();
        assert_eq!(data["status"], "ok");
    }

    #[test]
    fn test_auth_failures_are_auth_errors() {
        let body = json!({"success": false, "error": {"code": "AUTH_ERROR", "message": "Invalid token"}});
        let err = interpret_response(401, body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err.code(), "AUTH_ERROR");
        assert_eq!(err.status(), Some(401));

        let body = json!({"success": false, "error": {"code": "FORBIDDEN", "message": "Forbidden"}});
        let err = interpret_response(403, body.to_string().as_bytes()).unwrap_err();
        assert_eq!(err.code(), "AUTH_ERROR");
    }

    #[test]
    fn test_server_error_code_is_kept() {
        let body = serde_json::to_vec(&ApiResponse::<()>::error(
            "INVALID_STATE".to_string(),
            "settlement is completed".to_string(),
        ))
        .unwrap();
        let err = interpret_response(409, &body).unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE");
        assert_eq!(err.status(), Some(409));
        assert!(err.to_string().contains("settlement is completed"));
    }

    #[test]
    fn test_non_json_error_body() {
        let err = interpret_response(502, b"Bad Gateway").unwrap_err();
        assert_eq!(err.code(), "HTTP_502");
    }

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(matches!(ApiClient::new("not a url"), Err(ClientError::Path(_))));
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let params = [("id", "a/b")];
        for base in ["http://host/admin", "http://host/admin/"] {
            let url = ApiClient::new(base)
                .unwrap()
                .url_for(Operation::GetSeller, &params)
                .unwrap();
            assert_eq!(url.as_str(), "http://host/admin/api/v1/sellers/a%2Fb");
        }

        let url = ApiClient::new("http://host:8080")
            .unwrap()
            .url_for(Operation::Health, &[])
            .unwrap();
        assert_eq!(url.as_str(), "http://host:8080/health");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(ApiClient::new("mailto:ops@example.com"), Err(ClientError::Path(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        // 1번 포트는 열려 있지 않다
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = client
            .call(Operation::Health, &[], &[], None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NETWORK_ERROR");
    }

    #[tokio::test]
    async fn test_unrendered_template_never_reaches_the_network() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = client
            .call(Operation::GetSeller, &[], &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Path(_)));
    }
}
