mod common;

use apodctl::types::{Apod, ApodPayload, ApodTableRow};
use chrono::NaiveDate;
use common::sample_payload;
use serde_json::json;

fn with_urls(url: Option<&str>, hdurl: Option<&str>) -> Apod {
    Apod::try_from(ApodPayload {
        url: url.map(str::to_string),
        hdurl: hdurl.map(str::to_string),
        ..sample_payload("2024-02-15")
    })
    .unwrap()
}

#[test]
fn test_impossible_calendar_date_is_a_date_format_error() {
    let err = Apod::try_from(sample_payload("2024-13-40")).unwrap_err();
    assert!(err.is_date_format());
}

#[test]
fn test_malformed_date_shapes_are_rejected() {
    for date in ["2024-2-15", "15-02-2024", "2024/02/15", "2024-02-15T00:00", ""] {
        let err = Apod::try_from(sample_payload(date)).unwrap_err();
        assert!(err.is_date_format(), "{} should be rejected", date);
    }
}

#[test]
fn test_empty_title_is_a_validation_error() {
    let payload = ApodPayload {
        title: String::new(),
        ..sample_payload("2024-02-15")
    };

    let err = Apod::try_from(payload).unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_date_format());
}

#[test]
fn test_missing_urls_is_a_validation_error() {
    let payload = ApodPayload {
        url: None,
        hdurl: None,
        ..sample_payload("2024-02-15")
    };
    assert!(Apod::try_from(payload).unwrap_err().is_validation());

    // blank strings count as absent
    let payload = ApodPayload {
        url: Some("  ".to_string()),
        hdurl: Some(String::new()),
        ..sample_payload("2024-02-15")
    };
    assert!(Apod::try_from(payload).unwrap_err().is_validation());
}

#[test]
fn test_hdurl_alone_is_enough() {
    let apod = with_urls(None, Some("https://apod.example/hd.png"));
    assert_eq!(apod.url(), None);
    assert_eq!(apod.best_url(), "https://apod.example/hd.png");
}

#[test]
fn test_best_url_prefers_hdurl() {
    let apod = with_urls(
        Some("https://apod.example/sd.jpg"),
        Some("https://apod.example/hd.png"),
    );
    assert_eq!(apod.best_url(), "https://apod.example/hd.png");

    let apod = with_urls(Some("https://apod.example/sd.jpg"), None);
    assert_eq!(apod.best_url(), "https://apod.example/sd.jpg");
}

#[test]
fn test_media_extension_uses_suffix_up_to_four_characters() {
    assert_eq!(with_urls(Some("https://x/a.jpeg"), None).media_extension(), "jpeg");
    assert_eq!(with_urls(Some("https://x/a.png"), None).media_extension(), "png");
    assert_eq!(with_urls(Some("https://x/a.gif"), None).media_extension(), "gif");
    assert_eq!(with_urls(None, Some("https://x/a.tiff")).media_extension(), "tiff");
}

#[test]
fn test_media_extension_counts_characters_not_bytes() {
    // three characters, six bytes
    assert_eq!(with_urls(Some("https://x/a.ééé"), None).media_extension(), "ééé");
    assert_eq!(with_urls(Some("https://x/a.éééé"), None).media_extension(), "éééé");
    assert_eq!(with_urls(Some("https://x/a.ééééé"), None).media_extension(), "jpg");
}

#[test]
fn test_media_extension_falls_back_to_jpg() {
    // suffix after the last dot is "com/embed/xyz?rel=0"
    let video = with_urls(Some("https://www.youtube.com/embed/xyz?rel=0"), None);
    assert_eq!(video.media_extension(), "jpg");

    let no_dot = with_urls(Some("no-extension-here"), None);
    assert_eq!(no_dot.media_extension(), "jpg");
}

#[test]
fn test_is_image() {
    assert!(Apod::try_from(sample_payload("2024-02-15")).unwrap().is_image());

    let video = Apod::try_from(ApodPayload {
        media_type: "video".to_string(),
        ..sample_payload("2024-02-15")
    })
    .unwrap();
    assert!(!video.is_image());
}

#[test]
fn test_calendar_value() {
    let apod = Apod::try_from(sample_payload("2024-02-15")).unwrap();
    assert_eq!(
        apod.calendar_value(),
        NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
    );
}

#[test]
fn test_from_api_payload() {
    let apod = Apod::from_api_payload(json!({
        "date": "2023-05-01",
        "title": "Test",
        "explanation": "...",
        "url": "https://x/a.jpeg",
        "media_type": "image",
        "copyright": "Someone",
        "resources": {"image_set": "apod_image"}
    }))
    .unwrap();

    assert_eq!(apod.date(), "2023-05-01");
    assert_eq!(apod.title(), "Test");
    assert_eq!(apod.copyright(), Some("Someone"));
    assert_eq!(apod.resources(), Some(&json!({"image_set": "apod_image"})));
    assert_eq!(apod.hdurl(), None);
    assert_eq!(apod.media_extension(), "jpeg");
}

#[test]
fn test_from_api_payload_missing_title_is_a_validation_error() {
    let err = Apod::from_api_payload(json!({
        "date": "2023-05-01",
        "url": "https://x/a.jpeg",
        "media_type": "image"
    }))
    .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_serialization_writes_unset_optionals_as_null() {
    let apod = Apod::try_from(sample_payload("2024-02-15")).unwrap();
    let value = serde_json::to_value(&apod).unwrap();

    for key in [
        "hdurl",
        "concepts",
        "thumbnail_url",
        "copyright",
        "resources",
        "service_version",
    ] {
        assert_eq!(value.get(key), Some(&serde_json::Value::Null), "{}", key);
    }
    assert_eq!(value["date"], "2024-02-15");
}

#[test]
fn test_display_and_table_row() {
    let apod = Apod::try_from(sample_payload("2024-02-15")).unwrap();
    assert_eq!(apod.to_string(), "2024-02-15 - image - Sky on 2024-02-15");

    let row = ApodTableRow::from(&apod);
    assert_eq!(row.date, "2024-02-15");
    assert_eq!(row.media_type, "image");
}
