//! 指标计算管线
//!
//! 按固定顺序对选中的指标族依次计算, 每一步消费上一步的标注序列并
//! 附加自己的字段。各指标族写入的字段互不重叠, 顺序只影响耗时不影响结果。

use tracing::debug;

use crate::indicators::{
    calculate_boll, calculate_kdj, calculate_ma, calculate_macd, calculate_rsi,
    calculate_volume_ma, calculate_wr,
};
use crate::kline::{AnnotatedBar, Bar};
use crate::target::{MainTarget, SubTarget, TargetError, TargetList};

/// 按配置计算全部选中指标, 返回标注后的序列
///
/// 输出序列与输入等长且顺序一致。配置不合法时整个计算请求失败,
/// 不产生部分结果。
pub fn calculate_targets(
    bars: &[Bar],
    targets: &TargetList,
    show_volume_chart: bool,
) -> Result<Vec<AnnotatedBar>, TargetError> {
    targets.validate()?;

    let mut series: Vec<AnnotatedBar> = bars.iter().copied().map(AnnotatedBar::new).collect();

    let ma_slots = targets.selected_ma();
    if !ma_slots.is_empty() {
        debug!(bars = series.len(), slots = ma_slots.len(), "计算 MA");
        series = calculate_ma(&series, &ma_slots);
    }

    let volume_ma_slots = targets.selected_volume_ma();
    if show_volume_chart && !volume_ma_slots.is_empty() {
        debug!(bars = series.len(), slots = volume_ma_slots.len(), "计算成交量 MA");
        series = calculate_volume_ma(&series, &volume_ma_slots);
    }

    if targets.main == MainTarget::Boll {
        debug!(bars = series.len(), n = targets.boll.n, "计算 BOLL");
        series = calculate_boll(&series, targets.boll);
    }

    if targets.sub == SubTarget::Macd {
        debug!(bars = series.len(), "计算 MACD");
        series = calculate_macd(&series, targets.macd);
    }

    if targets.sub == SubTarget::Kdj {
        debug!(bars = series.len(), "计算 KDJ");
        series = calculate_kdj(&series, targets.kdj);
    }

    let rsi_slots = targets.selected_rsi();
    if !rsi_slots.is_empty() {
        debug!(bars = series.len(), slots = rsi_slots.len(), "计算 RSI");
        series = calculate_rsi(&series, &rsi_slots);
    }

    let wr_slots = targets.selected_wr();
    if !wr_slots.is_empty() {
        debug!(bars = series.len(), slots = wr_slots.len(), "计算 WR");
        series = calculate_wr(&series, &wr_slots);
    }

    Ok(series)
}
