//! Heisenberg 공통 크레이트
//!
//! SBOM 정규화 계층과 헬스 체크 파이프라인이 공유하는
//! 도메인 타입, 에러 분류, 설정, 메트릭 이름을 정의합니다.

pub mod config;
pub mod error;
pub mod metrics;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{CheckError, ConfigError, HeisenbergError, SbomError};

// 설정
pub use config::HeisenbergConfig;

// 도메인 타입
pub use types::{Ecosystem, PackageRecord};
