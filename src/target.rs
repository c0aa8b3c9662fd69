//! 指标选择配置
//!
//! 每次计算请求由UI选择状态构造一份新配置, 管线内只读, 用完即弃。
//! 主图/副图指标用枚举表达, 代替原有的一组 isXXXSelected 判断函数。

use thiserror::Error;

use crate::indicators::{PRICE_SLOT_COUNT, WR_SLOT_COUNT};

/// 主图指标选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainTarget {
    #[default]
    None,
    Ma,
    Boll,
}

/// 副图指标选择
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubTarget {
    #[default]
    None,
    Macd,
    Kdj,
    Rsi,
    Wr,
}

/// 多周期指标的单个槽位配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPeriod {
    /// 计算周期
    pub period: usize,
    /// 结果写入的槽位 (固定长度列表中的下标)
    pub slot: usize,
    /// 是否参与计算
    pub selected: bool,
}

impl SlotPeriod {
    pub fn new(period: usize, slot: usize, selected: bool) -> Self {
        Self {
            period,
            slot,
            selected,
        }
    }
}

/// 布林带参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollParams {
    pub n: usize,
    pub p: f64,
}

/// MACD 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdParams {
    pub short_period: usize,
    pub long_period: usize,
    pub signal_period: usize,
}

/// KDJ 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdjParams {
    pub n: usize,
    pub m1: usize,
    pub m2: usize,
}

/// 指标选择配置
#[derive(Debug, Clone, PartialEq)]
pub struct TargetList {
    pub main: MainTarget,
    pub sub: SubTarget,
    pub ma_list: Vec<SlotPeriod>,
    pub ma_volume_list: Vec<SlotPeriod>,
    pub rsi_list: Vec<SlotPeriod>,
    pub wr_list: Vec<SlotPeriod>,
    pub boll: BollParams,
    pub macd: MacdParams,
    pub kdj: KdjParams,
}

impl TargetList {
    /// 由UI选择状态构造默认参数的配置
    ///
    /// 默认周期: MA 5/10/20, 成交量MA 5/10, RSI 6/12/24, WR 14,
    /// BOLL (20, 2), MACD (12, 26, 9), KDJ (9, 3, 3)。
    pub fn from_selection(main: MainTarget, sub: SubTarget, show_volume_chart: bool) -> Self {
        let ma_selected = main == MainTarget::Ma;
        let rsi_selected = sub == SubTarget::Rsi;
        let wr_selected = sub == SubTarget::Wr;

        Self {
            main,
            sub,
            ma_list: vec![
                SlotPeriod::new(5, 0, ma_selected),
                SlotPeriod::new(10, 1, ma_selected),
                SlotPeriod::new(20, 2, ma_selected),
            ],
            ma_volume_list: vec![
                SlotPeriod::new(5, 0, show_volume_chart),
                SlotPeriod::new(10, 1, show_volume_chart),
            ],
            rsi_list: vec![
                SlotPeriod::new(6, 0, rsi_selected),
                SlotPeriod::new(12, 1, rsi_selected),
                SlotPeriod::new(24, 2, rsi_selected),
            ],
            wr_list: vec![SlotPeriod::new(14, 0, wr_selected)],
            boll: BollParams { n: 20, p: 2.0 },
            macd: MacdParams {
                short_period: 12,
                long_period: 26,
                signal_period: 9,
            },
            kdj: KdjParams { n: 9, m1: 3, m2: 3 },
        }
    }

    /// 选中的 MA 周期
    pub fn selected_ma(&self) -> Vec<SlotPeriod> {
        self.ma_list.iter().copied().filter(|s| s.selected).collect()
    }

    /// 选中的成交量 MA 周期
    pub fn selected_volume_ma(&self) -> Vec<SlotPeriod> {
        self.ma_volume_list
            .iter()
            .copied()
            .filter(|s| s.selected)
            .collect()
    }

    /// 选中的 RSI 周期
    pub fn selected_rsi(&self) -> Vec<SlotPeriod> {
        self.rsi_list.iter().copied().filter(|s| s.selected).collect()
    }

    /// 选中的 WR 周期
    pub fn selected_wr(&self) -> Vec<SlotPeriod> {
        self.wr_list.iter().copied().filter(|s| s.selected).collect()
    }

    /// 校验配置, 不合法时整个计算请求失败
    ///
    /// 只校验参与本次计算的条目: 未选中的槽位和未启用的指标参数不检查。
    pub fn validate(&self) -> Result<(), TargetError> {
        Self::validate_slots("MA", &self.selected_ma(), PRICE_SLOT_COUNT)?;
        Self::validate_slots("VolumeMA", &self.selected_volume_ma(), PRICE_SLOT_COUNT)?;
        Self::validate_slots("RSI", &self.selected_rsi(), PRICE_SLOT_COUNT)?;
        Self::validate_slots("WR", &self.selected_wr(), WR_SLOT_COUNT)?;

        if self.main == MainTarget::Boll && self.boll.n == 0 {
            return Err(TargetError::InvalidPeriod {
                target: "BOLL",
                period: self.boll.n,
            });
        }
        if self.sub == SubTarget::Macd {
            for period in [
                self.macd.short_period,
                self.macd.long_period,
                self.macd.signal_period,
            ] {
                if period == 0 {
                    return Err(TargetError::InvalidPeriod {
                        target: "MACD",
                        period,
                    });
                }
            }
        }
        if self.sub == SubTarget::Kdj {
            for period in [self.kdj.n, self.kdj.m1, self.kdj.m2] {
                if period == 0 {
                    return Err(TargetError::InvalidPeriod {
                        target: "KDJ",
                        period,
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_slots(
        target: &'static str,
        slots: &[SlotPeriod],
        slot_count: usize,
    ) -> Result<(), TargetError> {
        for entry in slots {
            if entry.period == 0 {
                return Err(TargetError::InvalidPeriod {
                    target,
                    period: entry.period,
                });
            }
            if entry.slot >= slot_count {
                return Err(TargetError::SlotOutOfRange {
                    target,
                    slot: entry.slot,
                    slot_count,
                });
            }
        }
        Ok(())
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::from_selection(MainTarget::None, SubTarget::None, false)
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("{target}: invalid period {period}")]
    InvalidPeriod { target: &'static str, period: usize },

    #[error("{target}: slot {slot} out of range (slot count {slot_count})")]
    SlotOutOfRange {
        target: &'static str,
        slot: usize,
        slot_count: usize,
    },
}
