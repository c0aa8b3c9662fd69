//! 移动平均线 (MA)
//!
//! 对每个选中的 {period, slot}, 取截止当前K线的 period 根收盘价算术平均。
//! 历史不足 (index < period - 1) 时回退为当前收盘价, 而不是空值,
//! 保证暖机阶段曲线贴着价格走而不是缺一段。

use crate::indicators::{SlotList, SlotValue, PRICE_SLOT_COUNT};
use crate::kline::AnnotatedBar;
use crate::target::SlotPeriod;

/// 计算收盘价 MA, 返回新的标注序列
pub fn calculate_ma(series: &[AnnotatedBar], slots: &[SlotPeriod]) -> Vec<AnnotatedBar> {
    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut ma_list: SlotList = [None; PRICE_SLOT_COUNT];

            for config in slots {
                let value = if index + 1 < config.period {
                    // 窗口不足, 回退为当前收盘价
                    item.bar.close
                } else {
                    let start = index + 1 - config.period;
                    let sum: f64 = series[start..=index].iter().map(|b| b.bar.close).sum();
                    sum / config.period as f64
                };
                ma_list[config.slot] = Some(SlotValue {
                    period: config.period,
                    value,
                });
            }

            let mut out = item.clone();
            out.ma_list = Some(ma_list);
            out
        })
        .collect()
}

/// 计算成交量 MA, 返回新的标注序列
///
/// 与收盘价 MA 相同, 只是对成交量取均值; 仅在成交量副图开启时由管线调用。
pub fn calculate_volume_ma(series: &[AnnotatedBar], slots: &[SlotPeriod]) -> Vec<AnnotatedBar> {
    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut ma_volume_list: SlotList = [None; PRICE_SLOT_COUNT];

            for config in slots {
                let value = if index + 1 < config.period {
                    item.bar.volume
                } else {
                    let start = index + 1 - config.period;
                    let sum: f64 = series[start..=index].iter().map(|b| b.bar.volume).sum();
                    sum / config.period as f64
                };
                ma_volume_list[config.slot] = Some(SlotValue {
                    period: config.period,
                    value,
                });
            }

            let mut out = item.clone();
            out.ma_volume_list = Some(ma_volume_list);
            out
        })
        .collect()
}
