//! Integration tests for the resolution pipeline against an in-memory registry.

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use proptest::prelude::*;
use serde_json::{Value, json};

use adam_library::terminology::latest_package_date;
use adam_library::{CodelistPolicy, LibraryError, MetadataResolver, MetadataSource};
use adam_model::{CoreStatus, CtStandard, GuideVersion};

const TERMINOLOGY: &str = "/mdr/products/Terminology";
const GUIDE: &str = "/mdr/adam/adamig-1-3";
const TRT01P: &str = "/mdr/adam/adamig-1-3/datastructures/ADSL/variables/TRT01P";
const ADAMCT_PACKAGE: &str = "/mdr/ct/packages/adamct-2024-03-29";
const SDTMCT_PACKAGE: &str = "/mdr/ct/packages/sdtmct-2024-09-27";

/// Serves canned documents and records every requested path.
#[derive(Default)]
struct FakeRegistry {
    documents: BTreeMap<String, Value>,
    requests: RefCell<Vec<String>>,
}

impl FakeRegistry {
    fn with(mut self, path: &str, document: Value) -> Self {
        self.documents.insert(path.to_string(), document);
        self
    }

    fn without(mut self, path: &str) -> Self {
        self.documents.remove(path);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    fn count(&self, path: &str) -> usize {
        self.requests.borrow().iter().filter(|p| *p == path).count()
    }
}

impl MetadataSource for FakeRegistry {
    fn fetch(&self, path: &str) -> Option<Value> {
        self.requests.borrow_mut().push(path.to_string());
        self.documents.get(path).cloned()
    }
}

fn terminology_listing() -> Value {
    json!({
        "_links": {
            "packages": [
                {"href": "/mdr/ct/packages/adamct-2023-12-15"},
                {"href": "/mdr/ct/packages/adamct-2024-03-29"},
                {"href": "/mdr/ct/packages/adamct-2019-12-20"},
                {"href": "/mdr/ct/packages/sdtmct-2024-09-27"},
                {"href": "/mdr/ct/packages/sdtmct-2024-06-28"},
                {"href": "/mdr/ct/packages/sendct-2025-01-01"}
            ]
        }
    })
}

fn guide() -> Value {
    json!({
        "name": "ADaMIG v1.3",
        "dataStructures": [
            {
                "name": "ADSL",
                "analysisVariableSets": [
                    {"name": "Identifier Variables", "analysisVariables": [
                        {"name": "STUDYID"}, {"name": "USUBJID"}
                    ]},
                    {"name": "Treatment Variables", "analysisVariables": [
                        {"name": "TRT01P"}, {"name": "TRT01A"}
                    ]}
                ]
            },
            {
                "name": "BDS",
                "analysisVariableSets": [
                    {"name": "Parameter Variables", "analysisVariables": [
                        {"name": "PARAMCD"}, {"name": "DTYPE"}
                    ]}
                ]
            }
        ]
    })
}

fn variable_record(links: &[&str]) -> Value {
    let codelist: Vec<Value> = links.iter().map(|href| json!({"href": href})).collect();
    json!({
        "name": "TRT01P",
        "label": "Planned Treatment for Period 01",
        "simpleDatatype": "Char",
        "core": "Cond",
        "description": "Subject-level identifier of the planned treatment.",
        "_links": {"codelist": codelist}
    })
}

fn adamct_package() -> Value {
    json!({
        "codelists": [
            {
                "conceptId": "C81223",
                "submissionValue": "DTYPE",
                "name": "Derivation Type",
                "extensible": "true",
                "terms": [
                    {"conceptId": "C82573", "submissionValue": "LOCF", "preferredTerm": "Last Observation Carried Forward"},
                    {"conceptId": "C82574", "submissionValue": "AVERAGE", "preferredTerm": "Average"},
                    {"conceptId": "C82575", "submissionValue": "WOCF", "preferredTerm": "Worst Observation Carried Forward"}
                ]
            },
            {
                "conceptId": "C99001",
                "submissionValue": "TRTP",
                "name": "Planned Treatment",
                "extensible": "false",
                "terms": []
            }
        ]
    })
}

fn sdtmct_package() -> Value {
    json!({
        "codelists": [
            {
                "conceptId": "C66742",
                "submissionValue": "NY",
                "name": "No Yes Response",
                "extensible": "false",
                "terms": [
                    {"conceptId": "C49488", "submissionValue": "Y", "preferredTerm": "Yes"},
                    {"conceptId": "C49487", "submissionValue": "N", "preferredTerm": "No"},
                    {"conceptId": "C48660", "submissionValue": "NA", "preferredTerm": "Not Applicable"},
                    {"conceptId": "C17998", "submissionValue": "U", "preferredTerm": "Unknown"}
                ]
            }
        ]
    })
}

fn registry(links: &[&str]) -> FakeRegistry {
    FakeRegistry::default()
        .with(TERMINOLOGY, terminology_listing())
        .with(GUIDE, guide())
        .with(TRT01P, variable_record(links))
        .with(ADAMCT_PACKAGE, adamct_package())
        .with(SDTMCT_PACKAGE, sdtmct_package())
}

#[test]
fn test_resolves_trt01p_against_latest_adamct() {
    let registry = registry(&["/mdr/root/ct/adamct/codelists/C81223"]);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("trt01p", "1.3").unwrap();

    let variable = metadata.variable();
    assert_eq!(variable.dataset, "ADSL");
    assert_eq!(variable.name, "TRT01P");
    assert_eq!(variable.core, CoreStatus::Conditional);
    assert_eq!(variable.guide_version.as_str(), "1-3");
    assert_eq!(metadata.codelists().len(), 1);

    let codelist = &metadata.codelists()[0];
    assert_eq!(codelist.standard, CtStandard::Adamct);
    assert_eq!(
        codelist.version_date,
        NaiveDate::from_ymd_opt(2024, 3, 29).unwrap()
    );
    assert!(codelist.extensible);
    let codes: Vec<&str> = codelist.terms().iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["AVERAGE", "LOCF", "WOCF"]);

    assert_eq!(
        registry.requests(),
        vec![GUIDE, TRT01P, TERMINOLOGY, ADAMCT_PACKAGE]
    );
}

#[test]
fn test_unknown_variable_stops_after_structure_tree() {
    let registry = registry(&[]);
    let resolver = MetadataResolver::new(&registry);

    let err = resolver
        .resolve("NOTAVAR", &GuideVersion::default())
        .unwrap_err();

    assert!(matches!(err, LibraryError::VariableNotFound { ref name, .. } if name == "NOTAVAR"));
    assert_eq!(registry.requests(), vec![GUIDE]);
}

#[test]
fn test_duplicate_references_resolve_once() {
    let registry = registry(&[
        "/mdr/root/ct/adamct/codelists/C81223",
        "/mdr/root/ct/adamct/codelists/c81223",
        "/mdr/root/ct/adamct/codelists/C81223",
    ]);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(metadata.variable().codelist_links.len(), 3);
    assert_eq!(metadata.codelists().len(), 1);
    assert_eq!(registry.count(TERMINOLOGY), 1);
    assert_eq!(registry.count(ADAMCT_PACKAGE), 1);
}

#[test]
fn test_version_discovered_once_per_standard() {
    let registry = registry(&[
        "/mdr/root/ct/adamct/codelists/C81223",
        "/mdr/root/ct/sdtmct/codelists/C66742",
        "/mdr/root/ct/adamct/codelists/C99001",
    ]);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    let ids: Vec<&str> = metadata
        .codelists()
        .iter()
        .map(|c| c.concept_id.as_str())
        .collect();
    assert_eq!(ids, vec!["C81223", "C66742", "C99001"]);
    assert_eq!(registry.count(TERMINOLOGY), 2);
    assert_eq!(registry.count(ADAMCT_PACKAGE), 1);
    assert_eq!(registry.count(SDTMCT_PACKAGE), 1);

    let ny = &metadata.codelists()[1];
    let codes: Vec<&str> = ny.terms().iter().map(|t| t.code.as_str()).collect();
    assert_eq!(codes, vec!["N", "NA", "U", "Y"]);
    assert!(!ny.extensible);
}

#[test]
fn test_invalid_link_is_dropped_others_resolve() {
    let registry = registry(&[
        "/mdr/root/ct/adamct/codelists/TRTP",
        "/mdr/root/ct/adamct/codelists/C81223",
        "/codelists/C81223",
    ]);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(metadata.variable().codelist_links.len(), 3);
    assert_eq!(metadata.variable().codelist_references.len(), 1);
    assert_eq!(metadata.codelists().len(), 1);
    assert_eq!(metadata.codelists()[0].concept_id, "C81223");
}

#[test]
fn test_missing_codelist_is_skipped_when_lenient() {
    let registry = registry(&[
        "/mdr/root/ct/adamct/codelists/C00001",
        "/mdr/root/ct/adamct/codelists/C81223",
    ]);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(metadata.codelists().len(), 1);
    assert_eq!(metadata.codelists()[0].concept_id, "C81223");
}

#[test]
fn test_missing_codelist_aborts_when_strict() {
    let registry = registry(&[
        "/mdr/root/ct/adamct/codelists/C81223",
        "/mdr/root/ct/adamct/codelists/C00001",
    ]);
    let resolver = MetadataResolver::new(&registry).with_policy(CodelistPolicy::Strict);

    let err = resolver.resolve_str("TRT01P", "1-3").unwrap_err();

    assert!(matches!(err, LibraryError::CodelistNotFound { ref identifier, .. } if identifier == "C00001"));
}

#[test]
fn test_failed_standard_is_not_retried() {
    let listing = json!({
        "_links": {"packages": [{"href": "/mdr/ct/packages/adamct-2024-03-29"}]}
    });
    let registry = registry(&[
        "/mdr/root/ct/sdtmct/codelists/C66742",
        "/mdr/root/ct/adamct/codelists/C81223",
        "/mdr/root/ct/sdtmct/codelists/C66731",
    ])
    .with(TERMINOLOGY, listing);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(metadata.codelists().len(), 1);
    assert_eq!(metadata.codelists()[0].standard, CtStandard::Adamct);
    // One listing fetch for the failing sdtmct, one for adamct.
    assert_eq!(registry.count(TERMINOLOGY), 2);
    assert_eq!(registry.count(SDTMCT_PACKAGE), 0);
}

#[test]
fn test_failed_standard_aborts_when_strict() {
    let registry = registry(&["/mdr/root/ct/adamct/codelists/C81223"]).without(TERMINOLOGY);
    let resolver = MetadataResolver::new(&registry).with_policy(CodelistPolicy::Strict);

    let err = resolver.resolve_str("TRT01P", "1-3").unwrap_err();

    assert!(matches!(
        err,
        LibraryError::CodelistSkipped {
            standard: CtStandard::Adamct,
            ..
        }
    ));
}

#[test]
fn test_null_fields_in_unrelated_codelist_do_not_hide_package() {
    let mut package = sdtmct_package();
    package["codelists"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "conceptId": "C99999",
            "submissionValue": "BROKEN",
            "name": null,
            "terms": [{"conceptId": "C1", "submissionValue": "X", "preferredTerm": null}]
        }));
    let registry =
        registry(&["/mdr/root/ct/sdtmct/codelists/C66742"]).with(SDTMCT_PACKAGE, package);
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(metadata.codelists().len(), 1);
    assert_eq!(metadata.codelists()[0].concept_id, "C66742");
    assert_eq!(metadata.term_count(), 4);
}

#[test]
fn test_submission_value_fallback() {
    let registry = registry(&["/mdr/root/ct/adamct/codelists/C81223"]).with(
        ADAMCT_PACKAGE,
        json!({
            "codelists": [{
                "conceptId": "C90000",
                "submissionValue": "C81223",
                "name": "Legacy keyed codelist",
                "extensible": false,
                "terms": [{"conceptId": "C1", "submissionValue": "X", "preferredTerm": "Ex"}]
            }]
        }),
    );
    let resolver = MetadataResolver::new(&registry);

    let metadata = resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(metadata.codelists().len(), 1);
    assert_eq!(metadata.codelists()[0].concept_id, "C90000");
}

#[test]
fn test_cache_is_scoped_to_one_run() {
    let registry = registry(&["/mdr/root/ct/adamct/codelists/C81223"]);
    let resolver = MetadataResolver::new(&registry);

    resolver.resolve_str("TRT01P", "1-3").unwrap();
    resolver.resolve_str("TRT01P", "1-3").unwrap();

    assert_eq!(registry.count(TERMINOLOGY), 2);
    assert_eq!(registry.count(ADAMCT_PACKAGE), 2);
}

#[test]
fn test_missing_variable_record_aborts() {
    let registry = registry(&[]).without(TRT01P);
    let resolver = MetadataResolver::new(&registry);

    let err = resolver.resolve_str("TRT01P", "1-3").unwrap_err();

    assert!(matches!(err, LibraryError::RegistryUnavailable { ref path } if path == TRT01P));
}

#[test]
fn test_unusable_structure_tree_aborts() {
    let registry = registry(&[]).with(GUIDE, json!({"name": "ADaMIG v1.3"}));
    let resolver = MetadataResolver::new(&registry);

    let err = resolver.resolve_str("TRT01P", "1-3").unwrap_err();

    assert!(err.is_transport());
    assert_eq!(registry.requests(), vec![GUIDE]);
}

#[test]
fn test_invalid_guide_version() {
    let registry = registry(&[]);
    let resolver = MetadataResolver::new(&registry);

    let err = resolver.resolve_str("TRT01P", "1/3").unwrap_err();

    assert!(matches!(err, LibraryError::Model(_)));
    assert!(registry.requests().is_empty());
}

#[test]
fn test_latest_terminology_version() {
    let registry = registry(&[]);
    let resolver = MetadataResolver::new(&registry);

    let sdtmct = resolver
        .latest_terminology_version(CtStandard::Sdtmct)
        .unwrap();
    assert_eq!(sdtmct.package_id(), "sdtmct-2024-09-27");

    let empty = FakeRegistry::default().with(TERMINOLOGY, json!({"_links": {"packages": []}}));
    let err = MetadataResolver::new(&empty)
        .latest_terminology_version(CtStandard::Adamct)
        .unwrap_err();
    assert!(matches!(
        err,
        LibraryError::NoVersionsFound {
            standard: CtStandard::Adamct
        }
    ));
}

proptest! {
    #[test]
    fn prop_latest_package_date_is_maximum(
        days in proptest::collection::vec(0i64..20_000, 1..30),
        noise in proptest::collection::vec("[a-z]{1,6}", 0..5),
    ) {
        let epoch = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let dates: Vec<NaiveDate> = days
            .iter()
            .map(|d| epoch + chrono::Duration::days(*d))
            .collect();
        let mut hrefs: Vec<String> = dates
            .iter()
            .map(|d| format!("/mdr/ct/packages/adamct-{}", d.format("%Y-%m-%d")))
            .collect();
        hrefs.extend(noise.iter().map(|n| format!("/mdr/ct/packages/adamct-{n}")));
        hrefs.push("/mdr/ct/packages/sdtmct-2999-01-01".to_string());

        let latest = latest_package_date(hrefs.iter().map(String::as_str), CtStandard::Adamct);
        prop_assert_eq!(latest, dates.iter().max().copied());

        let as_text = latest.map(|d| d.format("%Y-%m-%d").to_string());
        let lexical_max = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).max();
        prop_assert_eq!(as_text, lexical_max);
    }
}
