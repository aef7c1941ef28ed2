//! Integration tests for the collection pipeline, from CSV export to
//! document bytes on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use verein_cli::pipeline::{CollectRequest, run_collection};
use verein_model::{DuplicatePolicy, Originator};
use verein_sepa::ContributionScheme;

const HEADER: &str = "Mitgliedsnummer,Titel,Vorname,Nachname,Geburtstag,IstMaennlich,IstAktiv,\
IstBeitragsfrei,Strasse,Hausnummer,PLZ,Ort,Iban,Bic,MandatErstellt,MandatGeaendert,\
KontoinhaberVorname,KontoinhaberNachname,Beitrag";

fn write_export(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("mitglieder.csv");
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    fs::write(&path, content).expect("write export");
    path
}

fn originator() -> Originator {
    Originator {
        creator: "Max Mustermann".to_string(),
        creditor: "SV Musterstadt e.V.".to_string(),
        iban: "DE02100500000024290661".to_string(),
        bic: "BELADEBEXXX".to_string(),
        creditor_id: "DE98ZZZ09999999999".to_string(),
        purpose: "Mitgliedsbeitrag 2017".to_string(),
        message_id: "2017-02-02 Membercontributions".to_string(),
        pmt_inf_id: "2017-02-02 Beitrag".to_string(),
        execution_date: NaiveDate::from_ymd_opt(2017, 3, 1).unwrap(),
    }
}

fn request(input: PathBuf) -> CollectRequest {
    CollectRequest {
        input,
        output: None,
        originator: originator(),
        scheme: ContributionScheme::PerMember {
            default: Decimal::new(1000, 2),
        },
        duplicates: DuplicatePolicy::Reject,
        with_bom: false,
        include_inactive: false,
        include_contribution_free: false,
        dry_run: false,
    }
}

const ROW_ANNA: &str = "1,,Anna,Abel,1990-05-17,0,1,0,Ringstrasse,4,54321,Musterstadt,\
DE02100500000024290661,BELADEBEXXX,2013-01-01,0,,,";
const ROW_BEN: &str = "2,,Ben,Berg,1985-01-02,1,1,0,Hauptweg,7,54321,Musterstadt,\
DE89370400440532013000,BELADEBEXXX,2014-06-15,0,,,";
const ROW_BAD_IBAN: &str = "3,,Cora,Clemens,1970-12-24,0,1,0,Am Bach,1,54321,Musterstadt,\
DE021005000000w24290661,BELADEBEXXX,2015-03-03,0,,,";
const ROW_INACTIVE: &str = "4,,Dora,Dahl,1960-07-07,0,0,0,Feldweg,9,54321,Musterstadt,\
DE12500105175407123456,BELADEBEXXX,2016-02-02,0,,,";

#[test]
fn test_collection_writes_document_next_to_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_export(dir.path(), &[ROW_ANNA, ROW_BEN, ROW_BAD_IBAN]);

    let result = run_collection(&request(input.clone())).expect("run collection");

    assert_eq!(result.members_built, 3);
    assert_eq!(result.transactions, 2);
    assert_eq!(result.control_sum, Decimal::new(2000, 2));
    assert_eq!(result.grouping.skipped.len(), 1);
    assert_eq!(result.grouping.skipped[0].membership_number, 3);

    let output = result.output.expect("output path");
    assert_eq!(output, input.with_extension("xml"));
    let xml = fs::read_to_string(&output).expect("read document");
    assert!(xml.contains("<CtrlSum>20.00</CtrlSum>"));
    assert!(xml.contains("<Nm>Anna Abel</Nm>"));
    assert!(!xml.contains("Clemens"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_export(dir.path(), &[ROW_ANNA]);
    let mut request = request(input.clone());
    request.dry_run = true;

    let result = run_collection(&request).expect("run collection");

    assert_eq!(result.output, None);
    assert!(!input.with_extension("xml").exists());
}

#[test]
fn test_inactive_members_are_filtered_unless_included() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_export(dir.path(), &[ROW_ANNA, ROW_INACTIVE]);

    let filtered = run_collection(&request(input.clone())).expect("run filtered");
    assert_eq!(filtered.filtered_inactive, 1);
    assert_eq!(filtered.transactions, 1);

    let mut inclusive = request(input);
    inclusive.include_inactive = true;
    let included = run_collection(&inclusive).expect("run inclusive");
    assert_eq!(included.filtered_inactive, 0);
    assert_eq!(included.transactions, 2);
}

#[test]
fn test_bad_profile_fails_before_reading_the_table() {
    let mut request = request(PathBuf::from("/nonexistent/mitglieder.csv"));
    request.originator.creditor_id = "DE02100500000024290661".to_string();

    let error = run_collection(&request).unwrap_err();
    assert!(error.to_string().contains("profile is not usable"));
    assert!(error.to_string().contains("creditor_id"));
}

#[test]
fn test_missing_mandatory_column_is_fatal() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("mitglieder.csv");
    fs::write(&path, "Mitgliedsnummer,Vorname\n1,Anna\n").expect("write export");

    let error = run_collection(&request(path)).unwrap_err();
    assert!(error.to_string().contains("mandatory column"));
}

#[test]
fn test_bom_option_prefixes_the_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_export(dir.path(), &[ROW_ANNA]);
    let mut request = request(input);
    request.with_bom = true;

    let result = run_collection(&request).expect("run collection");
    let bytes = fs::read(result.output.expect("output path")).expect("read document");
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
}
