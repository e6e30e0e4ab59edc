//! Heisenberg SBOM 정규화
//!
//! 서로 다른 SBOM 문서 형식(CycloneDX JSON/XML, SPDX JSON/XML, 표 형식 CSV)을
//! 하나의 [`PackageRecord`](heisenberg_core::PackageRecord) 목록으로 변환합니다.
//!
//! # Module Structure
//!
//! - [`error`]: Domain error types (`SbomParseError`)
//! - [`config`]: Normalizer configuration (`NormalizerConfig`, builder)
//! - [`dialect`]: Format detection (`SbomDialect`)
//! - [`ecosystem`]: Ecosystem synonym table and purl type extraction
//! - [`parser`]: Per-dialect parsers (`SbomParser` trait)
//! - [`normalizer`]: Main entry point (`SbomNormalizer`)
//! - [`matcher`]: Package name matching over tabular SBOMs (`PackageMatcher`)
//!
//! # Architecture
//!
//! ```text
//! document --> SbomDialect::detect --> SbomParser::extract --> Vec<RawComponent>
//!                                                                    |
//!                                                   EcosystemAliases::normalize
//!                                                                    |
//!                                                          Vec<PackageRecord>
//! ```

pub mod config;
pub mod dialect;
pub mod ecosystem;
pub mod error;
pub mod matcher;
pub mod normalizer;
pub mod parser;

// --- Public API Re-exports ---

// Normalizer (main entry point)
pub use normalizer::{NormalizedDocument, SbomNormalizer};

// Configuration
pub use config::{NormalizerConfig, NormalizerConfigBuilder};

// Error
pub use error::SbomParseError;

// Dialect
pub use dialect::{SbomDialect, detect_dialect};

// Ecosystem
pub use ecosystem::{EcosystemAliases, purl_type};

// Parser
pub use parser::{RawComponent, SbomParser};

// Matcher
pub use matcher::{MatchTable, PackageMatcher};
