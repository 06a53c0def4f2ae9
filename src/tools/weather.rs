//! Weather lookup tool
//!
//! Resolves a Chinese city name to its weather.com.cn station code and
//! reads the current observation from the `data/sk` endpoint.

use crate::tools::registry::{Tool, optional_str_arg};
use crate::types::{AppError, Result, ToolOutput};
use crate::utils::toml_config::WeatherToolConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// Station codes for the cities the tool understands
const CITY_CODES: &[(&str, &str)] = &[
    ("北京", "101010100"),
    ("上海", "101020100"),
    ("广州", "101280101"),
    ("深圳", "101280601"),
    ("杭州", "101210101"),
    ("成都", "101270101"),
    ("武汉", "101200101"),
    ("西安", "101110101"),
    ("南京", "101190101"),
    ("重庆", "101040100"),
    ("天津", "101030100"),
    ("苏州", "101190401"),
    ("长沙", "101250101"),
    ("郑州", "101180101"),
    ("济南", "101120101"),
    ("青岛", "101120201"),
    ("沈阳", "101070101"),
    ("哈尔滨", "101050101"),
    ("长春", "101060101"),
    ("福州", "101230101"),
    ("南昌", "101240101"),
    ("合肥", "101220101"),
    ("昆明", "101290101"),
    ("兰州", "101160101"),
];

/// Look up the station code for a city; a trailing `市` is ignored.
pub fn city_code(city: &str) -> Option<&'static str> {
    let city = city.trim();
    let city = city.strip_suffix('市').unwrap_or(city);
    CITY_CODES
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, code)| *code)
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    weatherinfo: Option<Observation>,
}

/// Current conditions as reported by the `data/sk` endpoint.
///
/// Values arrive as strings or numbers depending on the station, so they are
/// kept as raw JSON and rendered on output.
#[derive(Debug, Default, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub temp: Option<Value>,
    #[serde(rename = "WD", default)]
    pub wind_direction: Option<Value>,
    #[serde(rename = "WS", default)]
    pub wind_speed: Option<Value>,
    #[serde(rename = "SD", default)]
    pub humidity: Option<Value>,
    #[serde(default)]
    pub weather: Option<Value>,
    #[serde(default)]
    pub time: Option<Value>,
}

fn field_text(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "未知".to_string(),
    }
}

/// Render an observation as the multi-line report returned to callers
pub fn format_observation(city: &str, obs: &Observation) -> String {
    format!(
        "{} 今日天气:\n- 当前温度: {}°C\n- 风向: {}\n- 风速: {}\n- 湿度: {}\n- 天气状况: {}\n- 更新时间: {}",
        city,
        field_text(&obs.temp),
        field_text(&obs.wind_direction),
        field_text(&obs.wind_speed),
        field_text(&obs.humidity),
        field_text(&obs.weather),
        field_text(&obs.time),
    )
}

/// Current-weather tool for major Chinese cities
pub struct WeatherTool {
    client: reqwest::Client,
    base_url: String,
    default_city: String,
}

impl WeatherTool {
    pub fn new(config: &WeatherToolConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_city: config.default_city.clone(),
        })
    }

    async fn fetch_observation(&self, code: &str) -> Result<Option<Observation>> {
        let url = format!("{}/data/sk/{}.html", self.base_url, code);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let parsed: ObservationResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Upstream(format!("Malformed weather response: {}", e)))?;

        Ok(parsed.weatherinfo)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "获取指定城市的天气信息"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "城市名称，如：长沙、上海"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let city = optional_str_arg(&args, "city")?.unwrap_or(self.default_city.as_str());

        let Some(code) = city_code(city) else {
            return Ok(ToolOutput::error(format!("暂不支持查询 {} 的天气", city)));
        };

        match self.fetch_observation(code).await {
            Ok(Some(obs)) => {
                debug!(city, code, "Fetched weather observation");
                Ok(ToolOutput::text(format_observation(city, &obs)))
            }
            Ok(None) => Ok(ToolOutput::error(format!("无法获取 {} 的天气信息", city))),
            Err(e) => {
                warn!(city, error = %e, "Weather request failed");
                Ok(ToolOutput::error(format!(
                    "天气查询暂时不可用: {}。请稍后重试。",
                    e
                )))
            }
        }
    }
}
