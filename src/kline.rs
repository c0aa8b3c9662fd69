//! K线数据结构
//!
//! - Bar: 单根K线, 管线的只读输入
//! - AnnotatedBar: 附加了指标字段的K线, 管线的输出

use serde::{Deserialize, Serialize};

use crate::indicators::{BollValue, KdjValue, MacdValue, SlotList, WrSlotList};

/// 单根K线数据
///
/// `timestamp` 为毫秒时间戳, 序列内严格递增。
/// 桥接层的数据可能使用 `time` / `vol` 字段名, 反序列化时按别名兼容。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    #[serde(alias = "vol")]
    pub volume: f64,
    #[serde(alias = "time")]
    pub timestamp: i64,
}

impl Bar {
    pub fn new(open: f64, close: f64, high: f64, low: f64, volume: f64, timestamp: i64) -> Self {
        Self {
            open,
            close,
            high,
            low,
            volume,
            timestamp,
        }
    }
}

/// 附加指标字段后的K线
///
/// 指标字段全部为 Option: 未选中的指标保持 `None`, 序列化时整个字段缺省,
/// 渲染层以字段是否存在判断是否绘制该指标。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedBar {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(rename = "maList", skip_serializing_if = "Option::is_none")]
    pub ma_list: Option<SlotList>,
    #[serde(rename = "maVolumeList", skip_serializing_if = "Option::is_none")]
    pub ma_volume_list: Option<SlotList>,
    #[serde(flatten)]
    pub boll: Option<BollValue>,
    #[serde(flatten)]
    pub macd: Option<MacdValue>,
    #[serde(flatten)]
    pub kdj: Option<KdjValue>,
    #[serde(rename = "rsiList", skip_serializing_if = "Option::is_none")]
    pub rsi_list: Option<SlotList>,
    #[serde(rename = "wrList", skip_serializing_if = "Option::is_none")]
    pub wr_list: Option<WrSlotList>,
}

impl AnnotatedBar {
    /// 由原始K线创建, 所有指标字段为空
    pub fn new(bar: Bar) -> Self {
        Self {
            bar,
            ma_list: None,
            ma_volume_list: None,
            boll: None,
            macd: None,
            kdj: None,
            rsi_list: None,
            wr_list: None,
        }
    }
}

impl From<Bar> for AnnotatedBar {
    fn from(bar: Bar) -> Self {
        Self::new(bar)
    }
}

/// 从 JSON 批量导入K线序列
pub fn bars_from_json(json: &str) -> Result<Vec<Bar>, serde_json::Error> {
    serde_json::from_str(json)
}

/// 从 JSON 批量导入 (带字符串字段支持)
///
/// 桥接层传来的行情里数值字段常被编码成字符串, 这里统一转成 f64,
/// 无法解析的值转为 NaN, 缺失的成交量按 0 处理。
pub fn bars_from_json_flexible(json: &str) -> Result<Vec<Bar>, serde_json::Error> {
    #[derive(Deserialize)]
    struct BarIn {
        open: serde_json::Value,
        close: serde_json::Value,
        high: serde_json::Value,
        low: serde_json::Value,
        #[serde(alias = "vol", default)]
        volume: serde_json::Value,
        #[serde(alias = "time")]
        timestamp: i64,
    }

    fn to_f64(v: &serde_json::Value) -> f64 {
        match v {
            serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            serde_json::Value::String(s) => s.parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        }
    }

    let raw: Vec<BarIn> = serde_json::from_str(json)?;
    Ok(raw
        .iter()
        .map(|k| Bar {
            open: to_f64(&k.open),
            close: to_f64(&k.close),
            high: to_f64(&k.high),
            low: to_f64(&k.low),
            volume: if k.volume.is_null() { 0.0 } else { to_f64(&k.volume) },
            timestamp: k.timestamp,
        })
        .collect())
}
