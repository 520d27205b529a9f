//! Match history records and recent-window aggregation
//!
//! The element-summary endpoint reports expected-stat fields as decimal strings
//! (`"expected_goals": "0.35"`) and counters as integers, so every numeric field
//! is decoded leniently: numbers and numeric strings are accepted, a missing
//! field or `null` counts as zero.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, Result};

/// Response body of `element-summary/{id}/`, reduced to what we aggregate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementSummary {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// One match of a player's current-season history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Gameweek the match belongs to
    #[serde(default)]
    pub round: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub minutes: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_goal_involvements: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_goals: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ict_index: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_points: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub transfers_in: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub transfers_out: i64,
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid numeric string: {:?}", s))),
        Some(other) => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| de::Error::custom(format!("number out of range: {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid integer string: {:?}", s))),
        Some(other) => Err(de::Error::custom(format!("expected an integer, got {}", other))),
    }
}

/// Trailing `min(window, len)` entries. Assumes the slice is oldest-first.
pub fn recent_window<T>(entries: &[T], window: usize) -> &[T] {
    &entries[entries.len().saturating_sub(window)..]
}

/// True when every known `round` is no earlier than the one before it
pub fn is_chronological(entries: &[HistoryEntry]) -> bool {
    entries
        .iter()
        .filter_map(|e| e.round)
        .try_fold(0u32, |prev, round| (round >= prev).then_some(round))
        .is_some()
}

/// Five per-match averages over a recent window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    #[serde(rename = "minutes_last")]
    pub minutes: f64,
    #[serde(rename = "xGI_last")]
    pub expected_goal_involvements: f64,
    #[serde(rename = "xG_last")]
    pub expected_goals: f64,
    #[serde(rename = "ict_last")]
    pub ict_index: f64,
    #[serde(rename = "total_points_last")]
    pub total_points: f64,
}

/// Output column names, in table order
pub const FORM_COLUMNS: [&str; 5] = [
    "minutes_last",
    "xGI_last",
    "xG_last",
    "ict_last",
    "total_points_last",
];

impl RecentForm {
    /// Arithmetic mean of each metric; all zeros for an empty window
    pub fn from_window(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let n = entries.len() as f64;
        let mean = |metric: fn(&HistoryEntry) -> f64| entries.iter().map(metric).sum::<f64>() / n;

        Self {
            minutes: mean(|e| e.minutes),
            expected_goal_involvements: mean(|e| e.expected_goal_involvements),
            expected_goals: mean(|e| e.expected_goals),
            ict_index: mean(|e| e.ict_index),
            total_points: mean(|e| e.total_points),
        }
    }
}

/// Transfer sums over a recent window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTotals {
    pub transfers_in: i64,
    pub transfers_out: i64,
    pub total: i64,
}

impl TransferTotals {
    /// Checked sums; counts outside `i64` are an error rather than a wrapped total
    pub fn from_window(entries: &[HistoryEntry]) -> Result<Self> {
        let overflow = |what: &str| FormError::Overflow(format!("{} exceeds i64 range", what));

        let transfers_in = entries
            .iter()
            .try_fold(0i64, |acc, e| acc.checked_add(e.transfers_in))
            .ok_or_else(|| overflow("transfers_in"))?;
        let transfers_out = entries
            .iter()
            .try_fold(0i64, |acc, e| acc.checked_add(e.transfers_out))
            .ok_or_else(|| overflow("transfers_out"))?;
        let total = transfers_in
            .checked_add(transfers_out)
            .ok_or_else(|| overflow("total_transfers"))?;

        Ok(Self {
            transfers_in,
            transfers_out,
            total,
        })
    }
}
