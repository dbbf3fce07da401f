use serde_json::{json, Value};

/// Variants are declared quietest first, so the derived order is severity.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            _ => None,
        }
    }
}

/// Builds the JSON line for an event, or `None` when `level` is below `min_level`.
/// Extra fields may not shadow `ts`, `level` or `event`.
pub fn format_event(
    min_level: LogLevel,
    level: LogLevel,
    ts: u64,
    event: &str,
    fields: Value,
) -> Option<String> {
    (level >= min_level).then(|| {
        let mut line = match fields {
            Value::Object(extra) => extra,
            _ => Default::default(),
        };
        let header = json!({ "ts": ts, "level": level.as_str(), "event": event });
        if let Value::Object(header) = header {
            line.extend(header);
        }
        Value::Object(line).to_string()
    })
}

pub fn log_event(min_level: LogLevel, level: LogLevel, event: &str, fields: Value) {
    if let Some(line) = format_event(min_level, level, now_unix_seconds(), event, fields) {
        emit(&line);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(line: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(line: &str) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_seconds() -> u64 {
    (js_sys::Date::now() / 1_000.0).max(0.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_seconds() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}
