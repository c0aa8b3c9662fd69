//! kchart-core - K线图技术指标计算库
//!
//! 为原生K线图渲染层提供指标数据标注:
//! - 完整的技术指标管线 (MA / 成交量MA / BOLL / MACD / KDJ / RSI / WR)
//! - 槽位式多周期配置, 未选中的槽位在输出中保持缺省
//! - 单次计算请求独立且可重入, 输入序列只读
//! - 面板展示用的 标题/数值 格式化

pub mod kline;
pub mod target;
pub mod indicators;
pub mod pipeline;
pub mod display;

pub use kline::{bars_from_json, bars_from_json_flexible, AnnotatedBar, Bar};
pub use target::{
    BollParams, KdjParams, MacdParams, MainTarget, SlotPeriod, SubTarget, TargetError, TargetList,
};
pub use indicators::{BollValue, KdjValue, MacdValue, SlotValue};
pub use pipeline::calculate_targets;
pub use display::{fix_round, format_time, selected_items, SelectedItem};

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_bars() -> Vec<Bar> {
        (0..60)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.1).sin() * 10.0;
                Bar::new(
                    base,
                    base + 1.0,
                    base + 2.0,
                    base - 2.0,
                    1000.0 + i as f64 * 10.0,
                    i as i64 * 15 * 60_000, // 15分钟间隔
                )
            })
            .collect()
    }

    #[test]
    fn test_end_to_end_annotation() {
        let bars = create_test_bars();
        let targets = TargetList::from_selection(MainTarget::Ma, SubTarget::Macd, true);

        let out = calculate_targets(&bars, &targets, true).unwrap();
        assert_eq!(out.len(), bars.len());

        let last = &out[59];
        assert!(last.ma_list.is_some());
        assert!(last.ma_volume_list.is_some());
        assert!(last.macd.is_some());
        assert!(last.boll.is_none());
    }

    #[test]
    fn test_serialized_shape_for_renderer() {
        let bars = create_test_bars();
        let targets = TargetList::from_selection(MainTarget::Boll, SubTarget::Wr, false);
        let out = calculate_targets(&bars, &targets, false).unwrap();

        let value = serde_json::to_value(&out[59]).unwrap();
        let obj = value.as_object().unwrap();

        // 选中的指标以约定字段名出现
        assert!(obj.contains_key("bollMb"));
        assert!(obj.contains_key("bollUp"));
        assert!(obj.contains_key("bollDn"));
        let wr_list = obj["wrList"].as_array().unwrap();
        assert_eq!(wr_list.len(), 1);
        assert_eq!(wr_list[0]["period"], 14);

        // 未选中的指标族整个缺省, 渲染层据此跳过
        assert!(!obj.contains_key("maList"));
        assert!(!obj.contains_key("macdValue"));
        assert!(!obj.contains_key("kdjK"));
    }

    #[test]
    fn test_untargeted_slot_serializes_as_null() {
        let bars = create_test_bars();
        let mut targets = TargetList::from_selection(MainTarget::Ma, SubTarget::None, false);
        // 只选中槽位 0 和 2
        targets.ma_list[1].selected = false;

        let out = calculate_targets(&bars, &targets, false).unwrap();
        let value = serde_json::to_value(&out[59]).unwrap();
        let ma_list = value["maList"].as_array().unwrap();

        assert_eq!(ma_list.len(), 3);
        assert!(!ma_list[0].is_null());
        assert!(ma_list[1].is_null());
        assert!(!ma_list[2].is_null());
    }

    #[test]
    fn test_json_import_to_annotation() {
        let json = r#"[
            {"open": "100", "close": "101", "high": "103", "low": "99", "vol": "1000", "time": 1700000000000},
            {"open": "101", "close": "102", "high": "104", "low": "100", "vol": "1100", "time": 1700000060000}
        ]"#;
        let bars = bars_from_json_flexible(json).unwrap();
        let targets = TargetList::from_selection(MainTarget::Ma, SubTarget::Kdj, false);

        let out = calculate_targets(&bars, &targets, false).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kdj.unwrap().k, 50.0);
        assert_eq!(out[0].ma_list.unwrap()[0].unwrap().value, 101.0);
    }

    #[test]
    fn test_input_series_untouched() {
        let bars = create_test_bars();
        let snapshot = bars.clone();
        let targets = TargetList::from_selection(MainTarget::Boll, SubTarget::Rsi, true);

        let _ = calculate_targets(&bars, &targets, true).unwrap();
        assert_eq!(bars, snapshot);
    }
}
