use chrono::{NaiveDate, Utc};
use isahc::{AsyncReadResponseExt, HttpClient, config::Configurable};
use serde_json::Value;
use std::time::Duration as StdDuration;

#[derive(Debug)]
pub enum YahooError {
    Http(isahc::Error),
    Serialization(serde_json::Error),
    InvalidResponse(String),
    NoData,
}

impl From<isahc::Error> for YahooError {
    fn from(error: isahc::Error) -> Self {
        YahooError::Http(error)
    }
}

impl From<serde_json::Error> for YahooError {
    fn from(error: serde_json::Error) -> Self {
        YahooError::Serialization(error)
    }
}

impl std::fmt::Display for YahooError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YahooError::Http(e) => write!(f, "HTTP error: {}", e),
            YahooError::Serialization(e) => write!(f, "Serialization error: {}", e),
            YahooError::InvalidResponse(s) => write!(f, "Invalid response: {}", s),
            YahooError::NoData => write!(f, "No data available"),
        }
    }
}

impl std::error::Error for YahooError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            YahooError::Http(e) => Some(e),
            YahooError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

/// One daily bar as this crate consumes it: session date and close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Yahoo Finance v8 chart API client.
///
/// Each history request is one GET; there is no retry, backoff, or batching.
/// A run is a handful of sequential requests, which Yahoo tolerates without
/// rate limiting.
pub struct YahooClient {
    client: HttpClient,
    base_url: String,
    user_agents: Vec<String>,
    random_agent: bool,
}

impl YahooClient {
    pub fn new(random_agent: bool) -> Result<Self, YahooError> {
        let client = HttpClient::builder()
            .timeout(StdDuration::from_secs(30))
            .build()?;

        let user_agents = vec![
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:120.0) Gecko/20100101 Firefox/120.0".to_string(),
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.3 Safari/605.1.15".to_string(),
        ];

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agents,
            random_agent,
        })
    }

    fn get_user_agent(&self) -> String {
        if self.random_agent {
            use rand::seq::SliceRandom;
            self.user_agents
                .choose(&mut rand::thread_rng())
                .unwrap_or(&self.user_agents[0])
                .clone()
        } else {
            self.user_agents[0].clone()
        }
    }

    /// Daily bars for `symbol` between `start` (inclusive) and `end`
    /// (exclusive; None = through the most recent session).
    pub async fn get_daily_history(
        &self,
        symbol: &str,
        start: &str,
        end: Option<&str>,
        adjusted: bool,
    ) -> Result<Vec<DailyBar>, YahooError> {
        let (period1, period2) = period_bounds(start, end)?;
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=div%2Csplit",
            self.base_url, symbol, period1, period2
        );
        let data = self.make_request(&url).await?;
        parse_chart_response(symbol, &data, adjusted)
    }

    /// Daily bars for a relative span (e.g. "1y"), used by the benchmark
    /// fetch where no explicit dates are configured.
    pub async fn get_range_history(
        &self,
        symbol: &str,
        range: &str,
        adjusted: bool,
    ) -> Result<Vec<DailyBar>, YahooError> {
        let url = format!(
            "{}/v8/finance/chart/{}?range={}&interval=1d&events=div%2Csplit",
            self.base_url, symbol, range
        );
        let data = self.make_request(&url).await?;
        parse_chart_response(symbol, &data, adjusted)
    }

    async fn make_request(&self, url: &str) -> Result<Value, YahooError> {
        let user_agent = self.get_user_agent();

        tracing::debug!("YAHOO_REQUEST: url={}", url);

        let request = isahc::Request::builder()
            .uri(url)
            .method("GET")
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "en-US,en;q=0.9,nb-NO;q=0.8,nb;q=0.7")
            .header("User-Agent", &user_agent)
            .body(())
            .map_err(|e| YahooError::InvalidResponse(format!("Request build error: {}", e)))?;

        let mut response = self.client.send_async(request).await?;
        let status = response.status();

        if !status.is_success() {
            if status == 404 {
                return Err(YahooError::NoData);
            }
            let status_text = status.canonical_reason().unwrap_or("Unknown");
            return Err(YahooError::InvalidResponse(format!(
                "HTTP error ({}) - {}",
                status.as_u16(),
                status_text
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| YahooError::InvalidResponse(format!("Response body error: {}", e)))?;

        tracing::debug!("YAHOO_RESPONSE: {} bytes", text.len());

        Ok(serde_json::from_str::<Value>(&text)?)
    }
}

/// Unix-second bounds for a chart request: `start` at 00:00:00 UTC, `end`
/// at 00:00:00 UTC (the provider treats period2 as exclusive), or now when
/// no end is given.
fn period_bounds(start: &str, end: Option<&str>) -> Result<(i64, i64), YahooError> {
    let start_date = parse_date(start)?;
    let period1 = start_date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
    let period2 = match end {
        Some(end) => parse_date(end)?.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp(),
        None => Utc::now().timestamp(),
    };
    Ok((period1, period2))
}

fn parse_date(s: &str) -> Result<NaiveDate, YahooError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| YahooError::InvalidResponse(format!("Invalid date: {}", s)))
}

/// Extract daily (date, close) bars from a chart API response.
///
/// Null cells in the close array are skipped, so a day the instrument did
/// not trade is simply absent from the output.
fn parse_chart_response(
    symbol: &str,
    data: &Value,
    adjusted: bool,
) -> Result<Vec<DailyBar>, YahooError> {
    let chart = data
        .get("chart")
        .ok_or_else(|| YahooError::InvalidResponse("Missing key: chart".to_string()))?;

    if let Some(error) = chart.get("error") {
        if !error.is_null() {
            let description = error
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or("unknown provider error");
            return Err(YahooError::InvalidResponse(format!(
                "{}: {}",
                symbol, description
            )));
        }
    }

    let result = match chart.get("result").and_then(|r| r.as_array()) {
        Some(results) if !results.is_empty() => &results[0],
        _ => return Err(YahooError::NoData),
    };

    let timestamps = match result.get("timestamp").and_then(|t| t.as_array()) {
        Some(ts) => ts,
        // A valid but bar-less result (e.g. a freshly listed symbol).
        None => return Ok(Vec::new()),
    };

    let indicators = result
        .get("indicators")
        .ok_or_else(|| YahooError::InvalidResponse("Missing key: indicators".to_string()))?;

    let closes = if adjusted {
        indicators
            .pointer("/adjclose/0/adjclose")
            .and_then(|c| c.as_array())
            .ok_or_else(|| YahooError::InvalidResponse("Missing adjusted closes".to_string()))?
    } else {
        indicators
            .pointer("/quote/0/close")
            .and_then(|c| c.as_array())
            .ok_or_else(|| YahooError::InvalidResponse("Missing closes".to_string()))?
    };

    if closes.len() != timestamps.len() {
        return Err(YahooError::InvalidResponse(format!(
            "Inconsistent array lengths for {}: {} timestamps, {} closes",
            symbol,
            timestamps.len(),
            closes.len()
        )));
    }

    let mut bars = Vec::new();
    for (ts, close) in timestamps.iter().zip(closes.iter()) {
        let timestamp = ts.as_i64().ok_or_else(|| {
            YahooError::InvalidResponse(format!("Invalid timestamp: {:?}", ts))
        })?;
        let close = match close.as_f64() {
            Some(c) => c,
            None => continue, // missing session for this instrument
        };
        let date = chrono::DateTime::<Utc>::from_timestamp(timestamp, 0)
            .ok_or_else(|| {
                YahooError::InvalidResponse(format!("Timestamp out of range: {}", timestamp))
            })?
            .date_naive();
        bars.push(DailyBar { date, close });
    }

    bars.sort_by(|a, b| a.date.cmp(&b.date));

    tracing::debug!("YAHOO_PARSE: symbol={}, bars={}", symbol, bars.len());

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // 2024-05-06 .. 2024-05-08, 07:00 UTC (Oslo open).
    const T1: i64 = 1714978800;
    const T2: i64 = 1715065200;
    const T3: i64 = 1715151600;

    fn chart_body(timestamps: Value, closes: Value, adjcloses: Value) -> Value {
        json!({
            "chart": {
                "result": [{
                    "timestamp": timestamps,
                    "indicators": {
                        "quote": [{ "close": closes }],
                        "adjclose": [{ "adjclose": adjcloses }]
                    }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn test_client_creation() {
        let client = YahooClient::new(true);
        assert!(client.is_ok());
    }

    #[test]
    fn test_parse_raw_closes() {
        let body = chart_body(
            json!([T1, T2, T3]),
            json!([100.0, 101.0, 99.0]),
            json!([98.0, 99.0, 97.0]),
        );
        let bars = parse_chart_response("DNB.OL", &body, false).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[2].close, 99.0);
    }

    #[test]
    fn test_parse_adjusted_closes() {
        let body = chart_body(
            json!([T1, T2]),
            json!([100.0, 101.0]),
            json!([98.0, 99.0]),
        );
        let bars = parse_chart_response("DNB.OL", &body, true).unwrap();
        assert_eq!(bars[0].close, 98.0);
        assert_eq!(bars[1].close, 99.0);
    }

    #[test]
    fn test_parse_skips_null_closes() {
        let body = chart_body(
            json!([T1, T2, T3]),
            json!([100.0, null, 99.0]),
            json!([null, null, null]),
        );
        let bars = parse_chart_response("DNB.OL", &body, false).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 100.0);
        assert_eq!(bars[1].close, 99.0);
    }

    #[test]
    fn test_parse_empty_result_is_no_data() {
        let body = json!({ "chart": { "result": [], "error": null } });
        assert!(matches!(
            parse_chart_response("DNB.OL", &body, false),
            Err(YahooError::NoData)
        ));
    }

    #[test]
    fn test_parse_provider_error_is_surfaced() {
        let body = json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        });
        let err = parse_chart_response("NOPE.OL", &body, false).unwrap_err();
        assert!(matches!(err, YahooError::InvalidResponse(_)));
        assert!(err.to_string().contains("delisted"));
    }

    #[test]
    fn test_period_bounds_exclusive_end() {
        let (p1, p2) = period_bounds("2024-01-01", Some("2024-01-03")).unwrap();
        assert_eq!(p1, 1704067200);
        assert_eq!(p2, 1704240000);
    }

    #[test]
    fn test_period_bounds_rejects_bad_date() {
        assert!(period_bounds("01.01.2024", None).is_err());
    }
}
