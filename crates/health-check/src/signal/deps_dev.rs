//! deps.dev 시그널 소스
//!
//! - `GET /v3/systems/{system}/packages/{name}/versions/{version}`
//! - `GET /v3alpha/systems/{system}/packages/{name}/versions/{version}:dependents`
//! - `GET /v3/projects/{project_id}` (실패 시 GitHub `GET /repos/{owner}/{repo}`)

use serde::Deserialize;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::config::SourceConfig;
use crate::signal::http::{Fetched, HttpClient};
use crate::signal::{SignalFetcher, SignalRequest, SignalResult};

const DEPS_DEV: &str = "deps.dev";
const GITHUB: &str = "github";

const GITHUB_PROJECT_PREFIX: &str = "github.com/";

/// 패키지 버전 경로 (`systems/{system}/packages/{name}/versions/{version}`)
fn version_path(request: &SignalRequest) -> String {
    format!(
        "systems/{}/packages/{}/versions/{}",
        request.ecosystem.as_str(),
        encode(&request.name),
        encode(&request.version)
    )
}

// --- deps.dev API types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionResponse {
    #[serde(default)]
    advisory_keys: Vec<AdvisoryKey>,
    published_at: Option<String>,
    #[serde(default)]
    related_projects: Vec<RelatedProject>,
}

#[derive(Debug, Deserialize)]
struct AdvisoryKey {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedProject {
    project_key: Option<ProjectKey>,
}

#[derive(Debug, Deserialize)]
struct ProjectKey {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DependentsResponse {
    dependent_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    description: Option<String>,
    stars_count: Option<u64>,
    forks_count: Option<u64>,
    scorecard: Option<Scorecard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scorecard {
    overall_score: Option<f64>,
    #[serde(default)]
    checks: Vec<ScorecardCheck>,
}

#[derive(Debug, Deserialize)]
struct ScorecardCheck {
    name: String,
    score: Option<f64>,
}

impl Scorecard {
    fn check_score(&self, name: &str) -> Option<f64> {
        self.checks
            .iter()
            .find(|c| c.name == name)
            .and_then(|c| c.score)
    }
}

#[derive(Debug, Deserialize)]
struct GithubRepoResponse {
    stargazers_count: Option<u64>,
    forks_count: Option<u64>,
}

// --- Fetchers ---

/// 버전 정보 소스 -- 보안 권고, 게시 시각, 첫 번째 관련 프로젝트 ID
///
/// 2xx가 아닌 응답은 모두 `NotFound`입니다.
#[derive(Debug, Clone)]
pub struct DepsDevVersionFetcher {
    http: HttpClient,
    base_url: String,
}

impl DepsDevVersionFetcher {
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base_url: config.deps_dev_url.clone(),
        }
    }
}

impl SignalFetcher for DepsDevVersionFetcher {
    fn name(&self) -> &'static str {
        "deps.dev-version"
    }

    async fn fetch(&self, request: &SignalRequest) -> SignalResult {
        let url = format!("{}/v3/{}", self.base_url, version_path(request));
        match self.http.get_json::<VersionResponse>(DEPS_DEV, &url, None).await {
            Ok(Fetched::Found(body)) => SignalResult {
                advisory_ids: Some(
                    body.advisory_keys
                        .into_iter()
                        .filter_map(|k| k.id)
                        .collect(),
                ),
                published_at: body.published_at.filter(|p| !p.trim().is_empty()),
                project_id: body
                    .related_projects
                    .into_iter()
                    .next()
                    .and_then(|p| p.project_key)
                    .and_then(|k| k.id)
                    .filter(|id| !id.is_empty()),
                ..SignalResult::found()
            },
            Ok(Fetched::Missing(_)) => SignalResult::not_found(),
            Err(e) => SignalResult::unavailable(e),
        }
    }
}

/// 의존 패키지 수 소스 (`dependentCount`)
#[derive(Debug, Clone)]
pub struct DepsDevDependentsFetcher {
    http: HttpClient,
    base_url: String,
}

impl DepsDevDependentsFetcher {
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            base_url: config.deps_dev_url.clone(),
        }
    }
}

impl SignalFetcher for DepsDevDependentsFetcher {
    fn name(&self) -> &'static str {
        "deps.dev-dependents"
    }

    async fn fetch(&self, request: &SignalRequest) -> SignalResult {
        let url = format!(
            "{}/v3alpha/{}:dependents",
            self.base_url,
            version_path(request)
        );
        match self
            .http
            .get_json::<DependentsResponse>(DEPS_DEV, &url, None)
            .await
        {
            Ok(Fetched::Found(body)) => SignalResult {
                dependents: body.dependent_count,
                ..SignalResult::found()
            },
            Ok(Fetched::Missing(_)) => SignalResult::not_found(),
            Err(e) => SignalResult::unavailable(e),
        }
    }
}

/// 프로젝트 소스 -- scorecard, 설명, stars/forks
///
/// deps.dev에 프로젝트가 없고 ID가 `github.com/`으로 시작하면
/// GitHub API에서 stars/forks만 가져옵니다.
#[derive(Debug, Clone)]
pub struct ProjectFetcher {
    http: HttpClient,
    deps_dev_url: String,
    github_api_url: String,
    github_token: Option<String>,
}

impl ProjectFetcher {
    pub fn new(http: HttpClient, config: &SourceConfig) -> Self {
        Self {
            http,
            deps_dev_url: config.deps_dev_url.clone(),
            github_api_url: config.github_api_url.clone(),
            github_token: config.github_token.clone(),
        }
    }

    async fn fetch_github(&self, project_id: &str) -> SignalResult {
        let Some(owner_repo) = project_id.strip_prefix(GITHUB_PROJECT_PREFIX) else {
            return SignalResult::not_found();
        };
        let url = format!("{}/repos/{owner_repo}", self.github_api_url);
        match self
            .http
            .get_json::<GithubRepoResponse>(GITHUB, &url, self.github_token.as_deref())
            .await
        {
            Ok(Fetched::Found(body)) => SignalResult {
                stars: body.stargazers_count,
                forks: body.forks_count,
                ..SignalResult::found()
            },
            Ok(Fetched::Missing(status)) => {
                warn!(project_id, status = status.as_u16(), "github api fallback failed");
                SignalResult::not_found()
            }
            Err(e) => SignalResult::unavailable(e),
        }
    }
}

impl SignalFetcher for ProjectFetcher {
    fn name(&self) -> &'static str {
        "project"
    }

    async fn fetch(&self, request: &SignalRequest) -> SignalResult {
        let Some(project_id) = request.project_id.as_deref() else {
            debug!(package = %request.name, "no project id, skipping project metadata");
            return SignalResult::not_found();
        };

        let url = format!("{}/v3/projects/{}", self.deps_dev_url, encode(project_id));
        match self
            .http
            .get_json::<ProjectResponse>(DEPS_DEV, &url, None)
            .await
        {
            Ok(Fetched::Found(body)) => {
                let scorecard = body.scorecard.as_ref();
                SignalResult {
                    overall_score: scorecard.and_then(|s| s.overall_score),
                    maintenance_score: scorecard.and_then(|s| s.check_score("Maintained")),
                    vulnerability_score: scorecard
                        .and_then(|s| s.check_score("Vulnerabilities")),
                    description: body.description.filter(|d| !d.trim().is_empty()),
                    stars: body.stars_count,
                    forks: body.forks_count,
                    ..SignalResult::found()
                }
            }
            Ok(Fetched::Missing(status)) => {
                debug!(project_id, status = status.as_u16(), "deps.dev project not found");
                self.fetch_github(project_id).await
            }
            Err(e) => SignalResult::unavailable(e),
        }
    }
}
