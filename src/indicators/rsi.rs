//! 相对强弱指数 (RSI)
//!
//! RSI = 100 - 100 / (1 + RS), RS = 平均涨幅 / 平均跌幅
//!
//! 与参考实现保持一致的两个细节:
//! - index < period 时输出中性值 50, 不是空值
//! - 平均跌幅为 0 时 RS 取 100 (得到 RSI ≈ 99.0099), 不是直接取 100

use crate::indicators::{SlotList, SlotValue, PRICE_SLOT_COUNT};
use crate::kline::AnnotatedBar;
use crate::target::SlotPeriod;

/// 计算 RSI, 返回新的标注序列
pub fn calculate_rsi(series: &[AnnotatedBar], slots: &[SlotPeriod]) -> Vec<AnnotatedBar> {
    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut rsi_list: SlotList = [None; PRICE_SLOT_COUNT];

            for config in slots {
                let value = if index < config.period {
                    50.0
                } else {
                    window_rsi(series, index, config.period)
                };
                rsi_list[config.slot] = Some(SlotValue {
                    period: config.period,
                    value,
                });
            }

            let mut out = item.clone();
            out.rsi_list = Some(rsi_list);
            out
        })
        .collect()
}

/// 截止 index 的 period 次涨跌的 RSI
fn window_rsi(series: &[AnnotatedBar], index: usize, period: usize) -> f64 {
    let mut gains = 0.0;
    let mut losses = 0.0;

    for i in (index + 1 - period)..=index {
        let change = series[i].bar.close - series[i - 1].bar.close;
        if change > 0.0 {
            gains += change;
        } else {
            losses += change.abs();
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    let rs = if avg_loss == 0.0 { 100.0 } else { avg_gain / avg_loss };
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kline::Bar;

    fn create_series(closes: &[f64]) -> Vec<AnnotatedBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| AnnotatedBar::new(Bar::new(c, c, c + 1.0, c - 1.0, 1000.0, i as i64 * 1000)))
            .collect()
    }

    #[test]
    fn test_rsi_placeholder_before_period() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let series = create_series(&closes);
        let out = calculate_rsi(&series, &[SlotPeriod::new(6, 0, true)]);

        for item in out.iter().take(6) {
            assert_eq!(item.rsi_list.unwrap()[0].unwrap().value, 50.0);
        }
        assert_ne!(out[6].rsi_list.unwrap()[0].unwrap().value, 50.0);
    }

    #[test]
    fn test_rsi_no_loss_branch() {
        // 持续上涨: avgLoss = 0, RS 取 100, RSI = 100 - 100/101
        let closes: Vec<f64> = (0..12).map(|i| 100.0 + i as f64).collect();
        let series = create_series(&closes);
        let out = calculate_rsi(&series, &[SlotPeriod::new(6, 0, true)]);

        let value = out[11].rsi_list.unwrap()[0].unwrap().value;
        let expected = 100.0 - 100.0 / 101.0;
        assert!((value - expected).abs() < 1e-9);
        // 不是正好 100
        assert!(value < 100.0);
    }

    #[test]
    fn test_rsi_bounded() {
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        let series = create_series(&closes);
        let out = calculate_rsi(&series, &[SlotPeriod::new(6, 0, true)]);

        for item in &out {
            let value = item.rsi_list.unwrap()[0].unwrap().value;
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_all_down() {
        // 持续下跌: avgGain = 0, RS = 0, RSI = 0
        let closes: Vec<f64> = (0..12).map(|i| 200.0 - i as f64).collect();
        let series = create_series(&closes);
        let out = calculate_rsi(&series, &[SlotPeriod::new(6, 0, true)]);

        assert!((out[11].rsi_list.unwrap()[0].unwrap().value).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_multi_slot() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let series = create_series(&closes);
        let out = calculate_rsi(
            &series,
            &[SlotPeriod::new(6, 0, true), SlotPeriod::new(12, 1, true)],
        );

        let rsi_list = out[29].rsi_list.unwrap();
        assert_eq!(rsi_list[0].unwrap().period, 6);
        assert_eq!(rsi_list[1].unwrap().period, 12);
        assert!(rsi_list[2].is_none());
    }
}
