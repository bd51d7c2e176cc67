//! User-facing wording.
//!
//! Everything shown to the worker goes through [`Locale`], including the
//! messages stored in the log. Status values are stored canonically and only
//! labelled here.

use serde::{Deserialize, Serialize};

use crate::model::Status;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    ZhTw,
}

/// Column headers for the remaining-quantity table.
pub struct RemainingHeaders {
    pub code: &'static str,
    pub name: &'static str,
    pub remaining: &'static str,
}

/// Column headers for the history table.
pub struct HistoryHeaders {
    pub time: &'static str,
    pub station: &'static str,
    pub code: &'static str,
    pub quantity: &'static str,
    pub status: &'static str,
    pub message: &'static str,
}

impl Locale {
    pub fn status(self, status: Status) -> &'static str {
        match (self, status) {
            (Self::En, Status::Success) => "success",
            (Self::En, Status::Error) => "error",
            (Self::ZhTw, Status::Success) => "成功",
            (Self::ZhTw, Status::Error) => "錯誤",
        }
    }

    pub fn unknown_item(self) -> String {
        match self {
            Self::En => "item not found or not valid for the current station".to_string(),
            Self::ZhTw => "料號錯誤或不屬於當前站別".to_string(),
        }
    }

    pub fn insufficient(self, max: u32) -> String {
        match self {
            Self::En => format!("insufficient quantity (max {max})"),
            Self::ZhTw => format!("可領數量不足（最多 {max}）"),
        }
    }

    pub fn withdrawn(self, quantity: u32, item_name: &str) -> String {
        match self {
            Self::En => format!("withdrew {quantity} x [{item_name}]"),
            Self::ZhTw => format!("成功領取 {quantity} 個【{item_name}】"),
        }
    }

    pub fn rotated(self, from: &str, to: &str) -> String {
        match self {
            Self::En => format!("all items at station {from} withdrawn, moving to station {to}"),
            Self::ZhTw => format!("{from} 站所有物料已領完，切換到下一站 {to}。"),
        }
    }

    pub fn current_station(self, station: &str) -> String {
        match self {
            Self::En => format!("Station {station}"),
            Self::ZhTw => format!("目前：{station} 站"),
        }
    }

    pub fn bad_quantity(self, input: &str) -> String {
        match self {
            Self::En => format!("quantity must be a positive integer, got '{input}'"),
            Self::ZhTw => format!("數量必須為正整數：'{input}'"),
        }
    }

    pub fn unknown_command(self, input: &str) -> String {
        match self {
            Self::En => format!("unknown command '{input}' (try :remaining, :history, :quit)"),
            Self::ZhTw => format!("未知指令 '{input}'（可用 :remaining、:history、:quit）"),
        }
    }

    pub fn no_history(self) -> &'static str {
        match self {
            Self::En => "No records",
            Self::ZhTw => "尚無紀錄",
        }
    }

    pub fn remaining_headers(self) -> RemainingHeaders {
        match self {
            Self::En => RemainingHeaders {
                code: "Code",
                name: "Name",
                remaining: "Remaining",
            },
            Self::ZhTw => RemainingHeaders {
                code: "料號",
                name: "物料名稱",
                remaining: "剩餘可領數量",
            },
        }
    }

    pub fn history_headers(self) -> HistoryHeaders {
        match self {
            Self::En => HistoryHeaders {
                time: "Time",
                station: "Station",
                code: "Code",
                quantity: "Qty",
                status: "Status",
                message: "Message",
            },
            Self::ZhTw => HistoryHeaders {
                time: "時間",
                station: "站別",
                code: "料號",
                quantity: "數量",
                status: "狀態",
                message: "訊息",
            },
        }
    }
}
