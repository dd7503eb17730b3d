use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// When a task loop performs its very first run.
///
/// - `Immediate`: run as soon as the loop is activated, then every interval
///   (default behaviour).
/// - `AfterInterval`: wait one full interval before the first run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstRunPolicy {
    Immediate,
    AfterInterval,
}

impl Default for FirstRunPolicy {
    fn default() -> Self {
        FirstRunPolicy::Immediate
    }
}

impl FromStr for FirstRunPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "immediate" => Ok(FirstRunPolicy::Immediate),
            "after_interval" => Ok(FirstRunPolicy::AfterInterval),
            other => Err(format!(
                "invalid first_run: {other} (expected \"immediate\" or \"after_interval\")"
            )),
        }
    }
}

/// Parse a simple duration string like `"3s"`, `"250ms"`, `"1m"`, `"2h"`.
///
/// A bare integer is read as whole seconds, which is what the line-based
/// config format uses.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .unwrap_or(s.len());

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    match unit.as_str() {
        "" | "s" => Ok(Duration::from_secs(value)),
        "ms" => Ok(Duration::from_millis(value)),
        "m" => scaled_secs(value, 60),
        "h" => scaled_secs(value, 60 * 60),
        _ => Err(format!(
            "unsupported duration unit '{}'; expected ms, s, m, or h",
            unit
        )),
    }
}

fn scaled_secs(value: u64, factor: u64) -> Result<Duration, String> {
    value
        .checked_mul(factor)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration too large: {value} x {factor}s"))
}
