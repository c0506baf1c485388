#![cfg(feature = "server")]
use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::env;

use crate::shared::types::{GridHistoryPointDto, GridReadingDto};

/// Hourly demand rows for the whole interconnection, newest first.
const DEFAULT_API_URL: &str = "https://api.eia.gov/v2/electricity/rto/region-data/data/";

/// Window served to the history view.
const HISTORY_HOURS: usize = 24;

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(std::time::Duration::from_secs(2))
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("client")
});

fn base_url() -> String {
    env::var("GRID_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

fn api_key() -> Result<String> {
    env::var("GRID_API_KEY").map_err(|_| anyhow!("GRID_API_KEY not set"))
}

#[derive(Debug, Clone, Deserialize)]
struct Envelope {
    response: Payload,
}

#[derive(Debug, Clone, Deserialize)]
struct Payload {
    #[serde(default)]
    data: Vec<DemandRow>,
}

/// Upstream rows carry more columns (respondent, units, ...); only the
/// period and the value matter here. The value can be null for hours the
/// upstream has not settled yet.
#[derive(Debug, Clone, Deserialize)]
struct DemandRow {
    period: String,
    #[serde(default)]
    value: Option<f64>,
}

async fn fetch_demand_rows(length: usize) -> Result<Vec<DemandRow>> {
    let url = base_url();
    let key = api_key()?;
    eprintln!("[grid] GET {} (length={})", url, length);
    let query = [
        ("api_key", key),
        ("frequency", "hourly".to_string()),
        ("data[0]", "value".to_string()),
        ("sort[0][column]", "period".to_string()),
        ("sort[0][direction]", "desc".to_string()),
        ("length", length.to_string()),
    ];
    let res = match CLIENT.get(&url).query(&query).send().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("[grid] request error on GET {}: {}", url, e);
            if e.is_timeout() {
                eprintln!("[grid] hint: request timed out (client timeout ~10s)");
            }
            if e.is_connect() {
                eprintln!(
                    "[grid] hint: connection failed (DNS/route/refused/TLS). Check GRID_API_URL and network reachability"
                );
            }
            return Err(anyhow!("sending GET {}: {}", url, e));
        }
    };
    if !res.status().is_success() {
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        eprintln!("[grid] request failed: status={} body=\n{}", status, text);
        return Err(anyhow!("GET {} failed with status {}", url, status));
    }
    let bytes = res
        .bytes()
        .await
        .with_context(|| format!("reading body from GET {}", url))?;
    let envelope: Envelope = serde_json::from_slice(&bytes).map_err(|e| {
        let snip = String::from_utf8_lossy(&bytes);
        let snip = snip.chars().take(300).collect::<String>();
        anyhow!(
            "decoding JSON from GET {} failed: {}\nBody snippet: {}",
            url,
            e,
            snip
        )
    })?;
    Ok(envelope.response.data)
}

fn latest_reading(rows: Vec<DemandRow>) -> Result<GridReadingDto> {
    rows.into_iter()
        .find_map(|r| r.value)
        .map(|value| GridReadingDto { value })
        .ok_or_else(|| anyhow!("no demand value in upstream response"))
}

fn history_points(mut rows: Vec<DemandRow>) -> Vec<GridHistoryPointDto> {
    // upstream is newest-first; the view wants ascending
    rows.reverse();
    rows.into_iter()
        .filter_map(|r| {
            r.value.map(|value| GridHistoryPointDto {
                period: r.period,
                value,
            })
        })
        .collect()
}

pub async fn get_current_demand() -> Result<GridReadingDto> {
    // ask for a few rows since the newest hour can still be null
    let rows = fetch_demand_rows(4).await?;
    latest_reading(rows)
}

pub async fn get_demand_history_24h() -> Result<Vec<GridHistoryPointDto>> {
    let rows = fetch_demand_rows(HISTORY_HOURS).await?;
    Ok(history_points(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "response": {
            "total": "3",
            "data": [
                {"period": "2025-06-01T17", "respondent": "US48", "value": null, "value-units": "megawatthours"},
                {"period": "2025-06-01T16", "respondent": "US48", "value": 131240.0, "value-units": "megawatthours"},
                {"period": "2025-06-01T15", "respondent": "US48", "value": 128903.5, "value-units": "megawatthours"}
            ]
        }
    }"#;

    #[test]
    fn decodes_upstream_envelope() {
        let envelope: Envelope = serde_json::from_str(SAMPLE).unwrap();
        let rows = envelope.response.data;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].period, "2025-06-01T17");
        assert_eq!(rows[0].value, None);
        assert_eq!(rows[1].value, Some(131_240.0));
    }

    #[test]
    fn latest_reading_skips_unsettled_hours() {
        let envelope: Envelope = serde_json::from_str(SAMPLE).unwrap();
        let reading = latest_reading(envelope.response.data).unwrap();
        assert_eq!(reading.value, 131_240.0);
    }

    #[test]
    fn latest_reading_errors_when_all_values_null() {
        let rows = vec![DemandRow {
            period: "2025-06-01T17".into(),
            value: None,
        }];
        assert!(latest_reading(rows).is_err());
    }

    #[test]
    fn history_is_ascending_without_null_rows() {
        let envelope: Envelope = serde_json::from_str(SAMPLE).unwrap();
        let points = history_points(envelope.response.data);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].period, "2025-06-01T15");
        assert_eq!(points[1].period, "2025-06-01T16");
        assert_eq!(points[1].value, 131_240.0);
    }
}
