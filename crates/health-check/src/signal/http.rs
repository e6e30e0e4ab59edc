//! 시그널 소스가 공유하는 HTTP 클라이언트

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::SourceConfig;
use crate::error::{HealthCheckError, TaskError};

/// JSON GET 결과
#[derive(Debug)]
pub enum Fetched<T> {
    /// 2xx 응답 본문
    Found(T),
    /// 2xx가 아닌 상태 코드
    Missing(StatusCode),
}

/// 요청 타임아웃과 User-Agent가 설정된 `reqwest::Client` 래퍼
///
/// 내부 커넥션 풀을 공유하므로 복제 비용이 낮습니다.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &SourceConfig) -> Result<Self, HealthCheckError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| HealthCheckError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    /// JSON 문서를 가져옵니다.
    ///
    /// # Errors
    ///
    /// 전송 실패는 `TaskError::Transport`, 본문 해석 실패는 `TaskError::Decode`
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        origin: &'static str,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<Fetched<T>, TaskError> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| TaskError::Transport {
            origin,
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(origin, url, status = status.as_u16(), "signal source returned non-success");
            return Ok(Fetched::Missing(status));
        }

        let body = response.json::<T>().await.map_err(|e| TaskError::Decode {
            origin,
            reason: e.to_string(),
        })?;
        Ok(Fetched::Found(body))
    }
}
