#![no_main]

use std::path::Path;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use heisenberg_sbom::{NormalizerConfig, SbomNormalizer};

/// 확장자별로 형식 판별 경로를 고르기 위한 입력
#[derive(Arbitrary, Debug)]
enum FuzzExtension {
    Json,
    Cdx,
    Xml,
    Csv,
    Unknown,
}

#[derive(Arbitrary, Debug)]
struct FuzzDocument {
    extension: FuzzExtension,
    content: String,
}

fuzz_target!(|input: FuzzDocument| {
    let file = match input.extension {
        FuzzExtension::Json => "fuzz.json",
        FuzzExtension::Cdx => "fuzz.cdx",
        FuzzExtension::Xml => "fuzz.xml",
        FuzzExtension::Csv => "fuzz_sbom.csv",
        FuzzExtension::Unknown => "fuzz.txt",
    };

    let Ok(normalizer) = SbomNormalizer::new(NormalizerConfig::default()) else {
        return;
    };

    if let Ok(doc) = normalizer.normalize_str(Path::new(file), &input.content) {
        // 정규화된 레코드는 항상 이름과 버전을 가진다
        for record in &doc.records {
            assert!(!record.name().is_empty());
            assert!(!record.version().is_empty());
        }
    }
});
