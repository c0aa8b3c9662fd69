//! MACD (移动平均收敛散度)
//!
//! DIF = EMA(short) - EMA(long)
//! DEA = EMA(DIF, signal)
//! MACD = 2 * (DIF - DEA)
//!
//! EMA 状态从序列头开始顺序递推 (ema 初值取 close[0], dea 初值取 0,
//! index 0 三个输出都为 0), 不能从序列中间重算。

use crate::indicators::MacdValue;
use crate::kline::AnnotatedBar;
use crate::target::MacdParams;

/// 计算 MACD, 返回新的标注序列
pub fn calculate_macd(series: &[AnnotatedBar], params: MacdParams) -> Vec<AnnotatedBar> {
    if series.is_empty() {
        return Vec::new();
    }

    let s = params.short_period as f64;
    let l = params.long_period as f64;
    let m = params.signal_period as f64;

    let mut ema_short = series[0].bar.close;
    let mut ema_long = series[0].bar.close;
    let mut dea = 0.0;

    series
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut out = item.clone();

            if index == 0 {
                out.macd = Some(MacdValue {
                    dif: 0.0,
                    dea: 0.0,
                    value: 0.0,
                });
                return out;
            }

            let close = item.bar.close;
            ema_short = (2.0 * close + (s - 1.0) * ema_short) / (s + 1.0);
            ema_long = (2.0 * close + (l - 1.0) * ema_long) / (l + 1.0);

            let dif = ema_short - ema_long;
            dea = (2.0 * dif + (m - 1.0) * dea) / (m + 1.0);
            let macd = 2.0 * (dif - dea);

            out.macd = Some(MacdValue {
                dif,
                dea,
                value: macd,
            });
            out
        })
        .collect()
}
