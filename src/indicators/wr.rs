//! 威廉指标 (Williams %R)
//!
//! WR = -(highest - close) / (highest - lowest) * 100, 范围 [-100, 0]。
//! 窗口不足或最高价等于最低价时输出 -50。

use crate::indicators::{SlotValue, WrSlotList, WR_SLOT_COUNT};
use crate::kline::AnnotatedBar;
use crate::target::SlotPeriod;

/// 计算 WR, 返回新的标注序列
pub fn calculate_wr(series: &[AnnotatedBar], slots: &[SlotPeriod]) -> Vec<AnnotatedBar> {
    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut wr_list: WrSlotList = [None; WR_SLOT_COUNT];

            for config in slots {
                let value = if index + 1 < config.period {
                    -50.0
                } else {
                    let start = index + 1 - config.period;
                    let mut highest = f64::NEG_INFINITY;
                    let mut lowest = f64::INFINITY;
                    for bar in &series[start..=index] {
                        highest = highest.max(bar.bar.high);
                        lowest = lowest.min(bar.bar.low);
                    }

                    if highest == lowest {
                        // 避免除零
                        -50.0
                    } else {
                        -((highest - item.bar.close) / (highest - lowest)) * 100.0
                    }
                };
                wr_list[config.slot] = Some(SlotValue {
                    period: config.period,
                    value,
                });
            }

            let mut out = item.clone();
            out.wr_list = Some(wr_list);
            out
        })
        .collect()
}
