#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use heisenberg_sbom::PackageMatcher;

#[derive(Arbitrary, Debug)]
struct FuzzScan {
    targets: String,
    case_sensitive: bool,
    csv: String,
}

fuzz_target!(|input: FuzzScan| {
    let matcher = PackageMatcher::new(
        PackageMatcher::parse_list(&input.targets),
        input.case_sensitive,
    );
    if let Ok(table) = matcher.scan_csv(&input.csv, "fuzz_sbom.csv") {
        // 매칭된 행은 항상 package 열을 포함한다
        assert!(table.rows.iter().all(|row| !row.is_empty()));
    }
});
