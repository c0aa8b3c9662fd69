//! 展示格式化
//!
//! 把标注后的K线整理成渲染层长按面板用的 标题/数值 列表。
//! 只做字符串格式化, 不参与指标计算。

use serde::Serialize;

use crate::kline::AnnotatedBar;
use crate::target::{MainTarget, SubTarget, TargetList};

/// 面板里的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedItem {
    pub title: String,
    pub detail: String,
}

impl SelectedItem {
    fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
        }
    }
}

/// 固定精度格式化
///
/// 非有限值显示 "--"; show_sign 时正数加 "+" 前缀;
/// show_grouping 时整数部分加千分位分隔符。
pub fn fix_round(value: f64, precision: usize, show_sign: bool, show_grouping: bool) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }

    let mut result = format!("{:.*}", precision, value);

    if show_grouping {
        result = group_thousands(&result);
    }

    if show_sign && value > 0.0 {
        result = format!("+{}", result);
    }

    result
}

fn group_thousands(s: &str) -> String {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// 时间格式化 (MM-DD HH:mm, UTC)
pub fn format_time(timestamp_ms: i64) -> String {
    use chrono::{LocalResult, TimeZone, Utc};

    match Utc.timestamp_millis_opt(timestamp_ms) {
        LocalResult::Single(dt) => dt.format("%m-%d %H:%M").to_string(),
        _ => "--".to_string(),
    }
}

/// 生成单根K线的面板条目
///
/// 基础行: 时间/开/高/低/收/涨跌额/涨跌幅/量, 之后按选中的指标族
/// 追加指标行。MA/BOLL 用价格精度, MACD 固定 4 位, KDJ/RSI/WR 固定 2 位。
pub fn selected_items(
    item: &AnnotatedBar,
    targets: &TargetList,
    price_precision: usize,
    volume_precision: usize,
) -> Vec<SelectedItem> {
    let bar = &item.bar;
    let mut list = Vec::new();

    let append_value = bar.close - bar.open;
    let append_percent = append_value / bar.open * 100.0;
    let prefix = if append_value >= 0.0 { "+" } else { "-" };

    list.push(SelectedItem::new("Time", format_time(bar.timestamp)));
    list.push(SelectedItem::new(
        "Open",
        fix_round(bar.open, price_precision, true, false),
    ));
    list.push(SelectedItem::new(
        "High",
        fix_round(bar.high, price_precision, true, false),
    ));
    list.push(SelectedItem::new(
        "Low",
        fix_round(bar.low, price_precision, true, false),
    ));
    list.push(SelectedItem::new(
        "Close",
        fix_round(bar.close, price_precision, true, false),
    ));
    list.push(SelectedItem::new(
        "Change",
        format!(
            "{}{}",
            prefix,
            fix_round(append_value.abs(), price_precision, false, false)
        ),
    ));
    list.push(SelectedItem::new(
        "Change %",
        format!(
            "{}{}%",
            prefix,
            fix_round(append_percent.abs(), 2, false, false)
        ),
    ));
    list.push(SelectedItem::new(
        "Volume",
        fix_round(bar.volume, volume_precision, true, false),
    ));

    if targets.main == MainTarget::Ma {
        if let Some(ma_list) = &item.ma_list {
            for ma in ma_list.iter().flatten() {
                list.push(SelectedItem::new(
                    format!("MA{}", ma.period),
                    fix_round(ma.value, price_precision, true, false),
                ));
            }
        }
    }

    if targets.main == MainTarget::Boll {
        if let Some(boll) = &item.boll {
            list.push(SelectedItem::new(
                "BOLL-MB",
                fix_round(boll.mb, price_precision, true, false),
            ));
            list.push(SelectedItem::new(
                "BOLL-UP",
                fix_round(boll.up, price_precision, true, false),
            ));
            list.push(SelectedItem::new(
                "BOLL-DN",
                fix_round(boll.dn, price_precision, true, false),
            ));
        }
    }

    if targets.sub == SubTarget::Macd {
        if let Some(macd) = &item.macd {
            list.push(SelectedItem::new("MACD", fix_round(macd.value, 4, true, false)));
            list.push(SelectedItem::new("DEA", fix_round(macd.dea, 4, true, false)));
            list.push(SelectedItem::new("DIF", fix_round(macd.dif, 4, true, false)));
        }
    }

    if targets.sub == SubTarget::Kdj {
        if let Some(kdj) = &item.kdj {
            list.push(SelectedItem::new("K", fix_round(kdj.k, 2, true, false)));
            list.push(SelectedItem::new("D", fix_round(kdj.d, 2, true, false)));
            list.push(SelectedItem::new("J", fix_round(kdj.j, 2, true, false)));
        }
    }

    if targets.sub == SubTarget::Rsi {
        if let Some(rsi_list) = &item.rsi_list {
            for rsi in rsi_list.iter().flatten() {
                list.push(SelectedItem::new(
                    format!("RSI{}", rsi.period),
                    fix_round(rsi.value, 2, true, false),
                ));
            }
        }
    }

    if targets.sub == SubTarget::Wr {
        if let Some(wr_list) = &item.wr_list {
            for wr in wr_list.iter().flatten() {
                list.push(SelectedItem::new(
                    format!("WR{}", wr.period),
                    fix_round(wr.value, 2, true, false),
                ));
            }
        }
    }

    list
}
