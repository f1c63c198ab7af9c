mod common;

use apodctl::utils::*;
use chrono::NaiveDate;
use common::sample_apod;

#[test]
fn test_is_canonical_date_shape() {
    assert!(is_canonical_date_shape("2024-02-15"));
    // shape only, calendar validity is checked elsewhere
    assert!(is_canonical_date_shape("2024-13-40"));

    assert!(!is_canonical_date_shape("2024-2-15"));
    assert!(!is_canonical_date_shape("2024_02_15"));
    assert!(!is_canonical_date_shape("20240215"));
    assert!(!is_canonical_date_shape("2024-02-150"));
    assert!(!is_canonical_date_shape("２０２４-02-15"));
}

#[test]
fn test_parse_canonical_date() {
    assert_eq!(
        parse_canonical_date("1995-06-16").unwrap(),
        NaiveDate::from_ymd_opt(1995, 6, 16).unwrap()
    );
    assert!(parse_canonical_date("2024-13-40").unwrap_err().is_date_format());
    assert!(parse_canonical_date("2023-02-29").unwrap_err().is_date_format());
    assert!(parse_canonical_date("2024-02-29").is_ok());
}

#[test]
fn test_date_arg_normalize() {
    let structured = DateArg::from(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    assert_eq!(structured.normalize().unwrap(), "2024-03-07");

    assert_eq!(DateArg::from("2024-03-07").normalize().unwrap(), "2024-03-07");
    assert_eq!(
        DateArg::from(String::from("2024-03-07")),
        DateArg::Text("2024-03-07".to_string())
    );
    assert!(DateArg::from("07.03.2024").normalize().unwrap_err().is_date_format());
}

#[test]
fn test_resolve_date_arg() {
    assert_eq!(resolve_date_arg("today"), DateArg::Calendar(today()));
    assert_eq!(resolve_date_arg("TODAY"), DateArg::Calendar(today()));
    assert_eq!(
        resolve_date_arg("2024-03-07"),
        DateArg::Text("2024-03-07".to_string())
    );
}

#[test]
fn test_format_date() {
    let date = NaiveDate::from_ymd_opt(2001, 9, 3).unwrap();
    assert_eq!(format_date(date), "2001-09-03");
}

#[test]
fn test_sort_by_calendar() {
    let mut apods = vec![
        sample_apod("2024-01-03"),
        sample_apod("1999-12-31"),
        sample_apod("2024-01-01"),
    ];
    sort_by_calendar(&mut apods);

    let dates: Vec<&str> = apods.iter().map(|a| a.date()).collect();
    assert_eq!(dates, vec!["1999-12-31", "2024-01-01", "2024-01-03"]);
}
