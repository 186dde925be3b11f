// ==========================================
// 空气污染风险评估 - 监测读数领域模型
// ==========================================
// Reading: 完整读数（进入分类器前必须全部填充）
// RawReading: 请求体中的原始读数（字段可缺省）
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ==========================================
// 字段默认值
// ==========================================
pub mod defaults {
    pub const PM25: f64 = 25.0;
    pub const PM10: f64 = 50.0;
    pub const NO2: f64 = 30.0;
    pub const SO2: f64 = 10.0;
    pub const CO: f64 = 1.5;
    pub const O3: f64 = 40.0;
    pub const TEMPERATURE: f64 = 28.0;
    pub const HUMIDITY: f64 = 65.0;
}

/// 读数字段名（序列化顺序）
pub const READING_FIELDS: [&str; 8] = [
    "pm25",
    "pm10",
    "no2",
    "so2",
    "co",
    "o3",
    "temperature",
    "humidity",
];

/// 读数校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadingError {
    #[error("could not convert {field} to float: {value}")]
    NonNumeric { field: &'static str, value: String },

    #[error("request body must be a JSON object, got {0}")]
    NotAnObject(String),
}

// ==========================================
// Reading - 完整读数
// ==========================================
// 单位约定: 颗粒物 µg/m³, 气体 ppm/ppb, 温度 °C, 湿度 %
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
    pub o3: f64,
    pub temperature: f64,
    pub humidity: f64,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            pm25: defaults::PM25,
            pm10: defaults::PM10,
            no2: defaults::NO2,
            so2: defaults::SO2,
            co: defaults::CO,
            o3: defaults::O3,
            temperature: defaults::TEMPERATURE,
            humidity: defaults::HUMIDITY,
        }
    }
}

impl Reading {
    /// 按字段名取值，未知字段返回 None
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "pm25" => Some(self.pm25),
            "pm10" => Some(self.pm10),
            "no2" => Some(self.no2),
            "so2" => Some(self.so2),
            "co" => Some(self.co),
            "o3" => Some(self.o3),
            "temperature" => Some(self.temperature),
            "humidity" => Some(self.humidity),
            _ => None,
        }
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut f64> {
        match name {
            "pm25" => Some(&mut self.pm25),
            "pm10" => Some(&mut self.pm10),
            "no2" => Some(&mut self.no2),
            "so2" => Some(&mut self.so2),
            "co" => Some(&mut self.co),
            "o3" => Some(&mut self.o3),
            "temperature" => Some(&mut self.temperature),
            "humidity" => Some(&mut self.humidity),
            _ => None,
        }
    }
}

// ==========================================
// RawReading - 原始请求读数
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawReading {
    fields: Map<String, Value>,
}

impl RawReading {
    /// 从请求体 JSON 构造
    ///
    /// # 规则
    /// - null 视为空对象
    /// - 非对象类型 → ReadingError::NotAnObject
    pub fn from_body(body: Value) -> Result<Self, ReadingError> {
        match body {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ReadingError::NotAnObject(json_type_name(&other).to_string())),
        }
    }

    /// 设置单个字段（测试与调用方构造请求时使用）
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// 解析为完整读数
    ///
    /// 缺失字段取默认值；任一字段无法转换为有限数值则整体失败
    pub fn resolve(&self) -> Result<Reading, ReadingError> {
        let mut reading = Reading::default();
        for field in READING_FIELDS {
            let Some(raw) = self.fields.get(field) else {
                continue;
            };
            let value = coerce_number(field, raw)?;
            if let Some(slot) = reading.slot_mut(field) {
                *slot = value;
            }
        }
        Ok(reading)
    }

    /// 请求中的 location 字段，缺省时使用给定默认值
    pub fn location(&self, default: &str) -> Value {
        self.fields
            .get("location")
            .cloned()
            .unwrap_or_else(|| Value::String(default.to_string()))
    }
}

/// 宽松数值转换: 数字、数字字符串、布尔值
fn coerce_number(field: &'static str, raw: &Value) -> Result<f64, ReadingError> {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(ReadingError::NonNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
