mod common;

use anyhow::Result;
use chrono::Datelike;
use reqwest::StatusCode;
use serde_json::Value;

async fn list(client: &reqwest::Client, server: &common::TestServer, query: &str) -> Result<(StatusCode, Value)> {
    let res = client.get(server.url(&format!("/employees?{}", query))).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

#[tokio::test]
async fn pages_partition_records_by_email() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    // Insert out of order; listing must come back sorted
    for i in [7, 2, 9, 0, 4, 1, 8, 3, 6, 5] {
        let body = common::employee_json(&format!("e{:02}@example.com", i), &[], ("01", "02", "1990"));
        assert_eq!(common::create(&client, &server, &body).await?.status(), StatusCode::OK);
    }

    let (status, first) = list(&client, &server, "page=1&size=5").await?;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = list(&client, &server, "page=2&size=5").await?;
    let (_, third) = list(&client, &server, "page=3&size=5").await?;

    let expected: Vec<String> = (0..10).map(|i| format!("e{:02}@example.com", i)).collect();
    assert_eq!(common::emails(&first), expected[..5].to_vec());
    assert_eq!(common::emails(&second), expected[5..].to_vec());
    assert!(common::emails(&third).is_empty(), "expected empty page: {}", third);

    Ok(())
}

#[tokio::test]
async fn domain_filter_is_an_exact_suffix() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    for email in ["a@other.com", "b@other1.com", "c@OTHER.com", "d@sub.other.com"] {
        let body = common::employee_json(email, &[], ("01", "02", "1990"));
        common::create(&client, &server, &body).await?;
    }

    let (status, payload) = list(&client, &server, "criteria=byEmailDomain&value=other.com&page=1&size=10").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::emails(&payload), vec!["a@other.com", "c@OTHER.com"]);

    Ok(())
}

#[tokio::test]
async fn role_filter_matches_membership() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let records = [
        ("z@example.com", vec!["admin", "dev"]),
        ("y@example.com", vec!["dev"]),
        ("x@example.com", vec!["ops"]),
    ];
    for (email, roles) in &records {
        let body = common::employee_json(email, roles, ("01", "02", "1990"));
        common::create(&client, &server, &body).await?;
    }

    let (status, payload) = list(&client, &server, "criteria=byRole&value=dev&page=1&size=10").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::emails(&payload), vec!["y@example.com", "z@example.com"]);

    Ok(())
}

#[tokio::test]
async fn age_filter_matches_exact_years() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    // January 1st birthdays have always been reached this year
    let year = chrono::Utc::now().year();
    let thirty = (year - 30).to_string();
    let thirty_one = (year - 31).to_string();

    for (email, birth_year) in [
        ("b@example.com", &thirty),
        ("a@example.com", &thirty),
        ("c@example.com", &thirty_one),
    ] {
        let body = common::employee_json(email, &[], ("01", "01", birth_year.as_str()));
        assert_eq!(common::create(&client, &server, &body).await?.status(), StatusCode::OK);
    }

    let (status, payload) = list(&client, &server, "criteria=byAge&value=30&page=1&size=10").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::emails(&payload), vec!["a@example.com", "b@example.com"]);

    let (_, payload) = list(&client, &server, "criteria=byAge&value=30&page=2&size=10").await?;
    assert!(common::emails(&payload).is_empty(), "expected empty page: {}", payload);

    Ok(())
}

#[tokio::test]
async fn unknown_criteria_lists_everyone() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    for email in ["a@example.com", "b@example.org"] {
        let body = common::employee_json(email, &[], ("01", "02", "1990"));
        common::create(&client, &server, &body).await?;
    }

    let (status, payload) = list(&client, &server, "criteria=byShoeSize&value=42&page=1&size=10").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::emails(&payload).len(), 2);

    Ok(())
}

#[tokio::test]
async fn invalid_parameters_are_bad_requests() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let cases = [
        ("size=5", "Invalid page parameter"),
        ("page=0&size=5", "Invalid page parameter"),
        ("page=abc&size=5", "Invalid page parameter"),
        ("page=1", "Invalid size parameter"),
        ("page=1&size=-3", "Invalid size parameter"),
        ("criteria=byEmailDomain&page=1&size=5", "Missing domain value"),
        ("criteria=byRole&value=&page=1&size=5", "Missing role value"),
        ("criteria=byAge&value=old&page=1&size=5", "Invalid age value"),
    ];

    for (query, message) in cases {
        let (status, payload) = list(&client, &server, query).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query: {}", query);
        assert_eq!(payload["error"], message, "query: {}", query);
    }

    Ok(())
}
