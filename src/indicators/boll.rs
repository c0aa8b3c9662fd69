//! 布林带 (BOLL)
//!
//! mb = N 周期收盘价均值
//! up = mb + p * std, dn = mb - p * std
//! std 为样本标准差 (除以 n - 1), 与参考实现一致。

use crate::indicators::BollValue;
use crate::kline::AnnotatedBar;
use crate::target::BollParams;

/// 计算布林带, 返回新的标注序列
pub fn calculate_boll(series: &[AnnotatedBar], params: BollParams) -> Vec<AnnotatedBar> {
    let n = params.n;

    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut out = item.clone();

            if index + 1 < n {
                // 窗口不足, 三条轨都取当前收盘价
                let close = item.bar.close;
                out.boll = Some(BollValue {
                    mb: close,
                    up: close,
                    dn: close,
                });
                return out;
            }

            let start = index + 1 - n;
            let window = &series[start..=index];

            let sum: f64 = window.iter().map(|b| b.bar.close).sum();
            let ma = sum / n as f64;

            let variance: f64 = window
                .iter()
                .map(|b| (b.bar.close - ma).powi(2))
                .sum::<f64>()
                / (n - 1) as f64;
            let std = variance.sqrt();

            out.boll = Some(BollValue {
                mb: ma,
                up: ma + params.p * std,
                dn: ma - params.p * std,
            });
            out
        })
        .collect()
}
