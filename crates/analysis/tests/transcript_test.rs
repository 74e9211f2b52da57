use chrono::{NaiveDate, NaiveDateTime};
use matchday_analysis::{
    validate_format, AttendanceClassifier, ChatParser, Response, WhatsAppParser,
};
use std::io::Write;

const TRANSCRIPT: &str = "\
[12/10/25, 09:00:01] Kaptan: Pazar maçı için yazın arkadaşlar ⚽
[12/10/25, 09:05:10] ~ ali veli: Geliyorum 👍
[12/10/25, 09:07:44] +90 Mehmet: maalesef bu hafta gelemem
[12/10/25, 09:10:00] Zeynep: belki, işten çıkabilirsem
Zeynep joined using this group's invite link
[12/10/25, 09:11:30] Can: selam
[12/10/25, 10:15:00] ~ Ali Veli: ben de varım tabii
[12/10/25, 11:00:00] Emre: not coming, sorry
";

fn fallback() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 12)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid time")
}

#[test]
fn transcript_to_verdicts() {
    let parser = WhatsAppParser::new().expect("parser");
    let records = parser.parse_at(TRANSCRIPT, fallback());
    assert_eq!(records.len(), 7);
    assert!(records.iter().all(|r| r.timestamp < fallback()));

    let verdicts = AttendanceClassifier::new()
        .expect("classifier")
        .classify(&records);

    let summary: Vec<(&str, Response, usize)> = verdicts
        .iter()
        .map(|v| (v.name.as_str(), v.response, v.message_count))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Kaptan", Response::Yes, 1),
            ("Ali Veli", Response::Yes, 2),
            ("Mehmet", Response::No, 1),
            ("Zeynep", Response::Maybe, 1),
            ("Emre", Response::No, 1),
        ]
    );

    let ali = &verdicts[1];
    assert_eq!(ali.message, "ben de varım tabii");
    assert_eq!(
        ali.timestamp,
        NaiveDate::from_ymd_opt(2025, 10, 12)
            .and_then(|d| d.and_hms_opt(10, 15, 0))
            .expect("valid time")
    );
}

#[test]
fn transcript_passes_format_check() {
    let parser = WhatsAppParser::new().expect("parser");
    let check = validate_format(&parser, TRANSCRIPT);
    assert!(check.is_valid(), "{}", check);
}

#[test]
fn parse_file_reads_transcript() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(TRANSCRIPT.as_bytes()).expect("write");

    let parser = WhatsAppParser::new().expect("parser");
    let records = parser.parse_file(file.path()).expect("parse file");
    assert_eq!(records.len(), 7);
    assert_eq!(records[0].sender, "Kaptan");
}

#[test]
fn missing_file_is_an_io_error() {
    let parser = WhatsAppParser::new().expect("parser");
    let err = parser
        .parse_file(std::path::Path::new("/nonexistent/chat.txt"))
        .expect_err("missing file");
    assert!(matches!(err, matchday_analysis::AnalysisError::Io(_)));
}

#[test]
fn verdicts_serialize_for_export() {
    let parser = WhatsAppParser::new().expect("parser");
    let records = parser.parse_at("[12/10/25, 09:05:10] Ali: evet", fallback());
    let verdicts = AttendanceClassifier::new().expect("classifier").classify(&records);

    let json = serde_json::to_value(&verdicts).expect("json");
    assert_eq!(json[0]["name"], "Ali");
    assert_eq!(json[0]["response"], "Yes");
    assert_eq!(json[0]["timestamp"], "2025-10-12 09:05:10");

    let back: Vec<matchday_analysis::AttendanceVerdict> =
        serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, verdicts);
}
