//! KDJ (随机指标)
//!
//! RSV = (close - lowest) / (highest - lowest) * 100
//! K = (RSV + (m1-1) * K') / m1
//! D = (K + (m1-1) * D') / m1
//! J = m2 * K - 2 * D
//!
//! K/D 状态从序列头顺序递推, 初值 50; 序列开头窗口按 max(0, i-n+1) 收缩,
//! 不使用占位值。D 由更新后的 K 平滑得到, 与参考实现保持一致
//! (一些教科书定义用更新前的 K 或 RSV, 这里按观察到的行为保留)。

use crate::indicators::KdjValue;
use crate::kline::AnnotatedBar;
use crate::target::KdjParams;

/// 计算 KDJ, 返回新的标注序列
pub fn calculate_kdj(series: &[AnnotatedBar], params: KdjParams) -> Vec<AnnotatedBar> {
    let n = params.n;
    let m1 = params.m1 as f64;
    let m2 = params.m2 as f64;

    let mut k = 50.0;
    let mut d = 50.0;

    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut out = item.clone();

            if index == 0 {
                out.kdj = Some(KdjValue {
                    k,
                    d,
                    j: 3.0 * k - 2.0 * d,
                });
                return out;
            }

            let start = (index + 1).saturating_sub(n);
            let mut highest = f64::NEG_INFINITY;
            let mut lowest = f64::INFINITY;
            for bar in &series[start..=index] {
                highest = highest.max(bar.bar.high);
                lowest = lowest.min(bar.bar.low);
            }

            let rsv = if highest == lowest {
                50.0
            } else {
                (item.bar.close - lowest) / (highest - lowest) * 100.0
            };

            k = (rsv + (m1 - 1.0) * k) / m1;
            d = (k + (m1 - 1.0) * d) / m1;
            let j = m2 * k - 2.0 * d;

            out.kdj = Some(KdjValue { k, d, j });
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kline::Bar;

    fn create_series(bars: &[(f64, f64, f64)]) -> Vec<AnnotatedBar> {
        // (close, high, low)
        bars.iter()
            .enumerate()
            .map(|(i, &(c, h, l))| AnnotatedBar::new(Bar::new(c, c, h, l, 1000.0, i as i64 * 1000)))
            .collect()
    }

    fn default_params() -> KdjParams {
        KdjParams { n: 9, m1: 3, m2: 3 }
    }

    #[test]
    fn test_kdj_first_bar() {
        let series = create_series(&[(100.0, 105.0, 95.0), (102.0, 106.0, 96.0)]);
        let out = calculate_kdj(&series, default_params());

        let kdj = out[0].kdj.unwrap();
        assert_eq!(kdj.k, 50.0);
        assert_eq!(kdj.d, 50.0);
        assert_eq!(kdj.j, 50.0);
    }

    #[test]
    fn test_kdj_recurrence() {
        let series = create_series(&[(100.0, 105.0, 95.0), (104.0, 106.0, 96.0)]);
        let out = calculate_kdj(&series, default_params());

        // 窗口 [0,1]: highest = 106, lowest = 95
        let rsv = (104.0 - 95.0) / (106.0 - 95.0) * 100.0;
        let k = (rsv + 2.0 * 50.0) / 3.0;
        // D 用更新后的 K 平滑
        let d = (k + 2.0 * 50.0) / 3.0;
        let j = 3.0 * k - 2.0 * d;

        let kdj = out[1].kdj.unwrap();
        assert!((kdj.k - k).abs() < 1e-12);
        assert!((kdj.d - d).abs() < 1e-12);
        assert!((kdj.j - j).abs() < 1e-12);
    }

    #[test]
    fn test_kdj_flat_window_uses_neutral_rsv() {
        let series = create_series(&[(100.0, 100.0, 100.0); 5]);
        let out = calculate_kdj(&series, default_params());

        // RSV 恒为 50, K/D 始终停在 50
        for item in &out {
            let kdj = item.kdj.unwrap();
            assert_eq!(kdj.k, 50.0);
            assert_eq!(kdj.d, 50.0);
            assert_eq!(kdj.j, 50.0);
        }
    }

    #[test]
    fn test_kdj_window_shrinks_at_start() {
        // n = 9 但只有 3 根K线: 窗口按实际长度收缩, 不报错
        let series = create_series(&[
            (100.0, 110.0, 90.0),
            (105.0, 108.0, 95.0),
            (95.0, 107.0, 92.0),
        ]);
        let out = calculate_kdj(&series, default_params());

        assert_eq!(out.len(), 3);
        assert!(out[2].kdj.is_some());
    }

    #[test]
    fn test_kdj_single_bar() {
        let series = create_series(&[(100.0, 105.0, 95.0)]);
        let out = calculate_kdj(&series, default_params());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kdj.unwrap().k, 50.0);
    }
}
