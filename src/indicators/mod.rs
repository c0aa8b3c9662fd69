//! 技术指标模块
//!
//! 每个指标是一个纯函数: 输入已标注的K线序列, 返回附加了本指标字段的新序列。
//! 窗口不足时使用约定的回退值 (详见各指标文件), 不产生错误。

mod ma;
mod boll;
mod rsi;
mod wr;
mod macd;
mod kdj;

pub use ma::{calculate_ma, calculate_volume_ma};
pub use boll::calculate_boll;
pub use rsi::calculate_rsi;
pub use wr::calculate_wr;
pub use macd::calculate_macd;
pub use kdj::calculate_kdj;

use serde::Serialize;

/// MA / 成交量MA / RSI 的固定槽位数
pub const PRICE_SLOT_COUNT: usize = 3;
/// WR 的固定槽位数
pub const WR_SLOT_COUNT: usize = 1;

/// 多周期指标的槽位列表
///
/// 槽位由配置显式指定, 未选中的槽位保持 `None` (序列化为 null),
/// 渲染层据此跳过该条线, 不会画出多余的水平线。
pub type SlotList = [Option<SlotValue>; PRICE_SLOT_COUNT];

/// WR 的槽位列表
pub type WrSlotList = [Option<SlotValue>; WR_SLOT_COUNT];

/// 单个槽位的指标值
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotValue {
    pub period: usize,
    pub value: f64,
}

/// 布林带结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollValue {
    #[serde(rename = "bollMb")]
    pub mb: f64,
    #[serde(rename = "bollUp")]
    pub up: f64,
    #[serde(rename = "bollDn")]
    pub dn: f64,
}

/// MACD 结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdValue {
    #[serde(rename = "macdDif")]
    pub dif: f64,
    #[serde(rename = "macdDea")]
    pub dea: f64,
    #[serde(rename = "macdValue")]
    pub value: f64,
}

/// KDJ 结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KdjValue {
    #[serde(rename = "kdjK")]
    pub k: f64,
    #[serde(rename = "kdjD")]
    pub d: f64,
    #[serde(rename = "kdjJ")]
    pub j: f64,
}
