use crate::tools::registry::{Tool, optional_str_arg};
use crate::types::{Result, ToolOutput};
use crate::utils::toml_config::TimeToolConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::{Value, json};

/// Current time in an IANA timezone
pub struct TimeTool {
    default_timezone: String,
}

impl TimeTool {
    pub fn new(config: &TimeToolConfig) -> Self {
        Self {
            default_timezone: config.default_timezone.clone(),
        }
    }
}

/// Format `now` in `timezone`, or `None` if the zone name is unknown.
pub fn format_time(now: DateTime<Utc>, timezone: &str) -> Option<String> {
    let tz: Tz = timezone.parse().ok()?;
    let local = now.with_timezone(&tz);
    Some(format!(
        "当前时间 ({}):\n{}",
        timezone,
        local.format("%Y-%m-%d %H:%M:%S %Z (UTC%:z)")
    ))
}

#[async_trait]
impl Tool for TimeTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "获取当前时间信息"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "timezone": {
                    "type": "string",
                    "description": "时区，如：Asia/Shanghai",
                    "default": self.default_timezone
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let timezone =
            optional_str_arg(&args, "timezone")?.unwrap_or(self.default_timezone.as_str());

        Ok(match format_time(Utc::now(), timezone) {
            Some(text) => ToolOutput::text(text),
            None => ToolOutput::error(format!("未知时区: {}", timezone)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 4, 30, 0).unwrap()
    }

    #[test]
    fn test_format_time_shanghai() {
        assert_eq!(
            format_time(fixed_now(), "Asia/Shanghai").unwrap(),
            "当前时间 (Asia/Shanghai):\n2024-01-15 12:30:00 CST (UTC+08:00)"
        );
    }

    #[test]
    fn test_format_time_negative_offset() {
        let text = format_time(fixed_now(), "America/New_York").unwrap();
        assert!(text.ends_with("2024-01-14 23:30:00 EST (UTC-05:00)"));
    }

    #[test]
    fn test_format_time_unknown_zone() {
        assert!(format_time(fixed_now(), "Nowhere/City").is_none());
    }

    #[tokio::test]
    async fn test_default_timezone_used() {
        let tool = TimeTool::new(&TimeToolConfig::default());
        let output = tool.execute(json!({})).await.unwrap();
        assert!(!output.is_error);
        assert!(output.text.starts_with("当前时间 (Asia/Shanghai):\n"));
    }

    #[tokio::test]
    async fn test_unknown_timezone_is_tool_error() {
        let tool = TimeTool::new(&TimeToolConfig::default());
        let output = tool
            .execute(json!({ "timezone": "Nowhere/City" }))
            .await
            .unwrap();
        assert!(output.is_error);
        assert!(output.text.contains("Nowhere/City"));
    }

    #[test]
    fn test_schema_advertises_default() {
        let tool = TimeTool::new(&TimeToolConfig::default());
        assert_eq!(
            tool.input_schema()["properties"]["timezone"]["default"],
            "Asia/Shanghai"
        );
    }
}
