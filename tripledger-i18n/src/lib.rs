#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const FAMILY: &str = "家族";
    pub const BALANCE: &str = "収支";
    pub const FROM: &str = "支払人";
    pub const TO: &str = "受取人";
    pub const AMOUNT: &str = "金額";
    pub const BALANCES_TITLE: &str = "収支一覧";
    pub const TRANSFERS_TITLE: &str = "精算方法";
    pub const ALL_SETTLED: &str = "全員の精算が完了しています。";
    pub const EMPTY_PARTICIPANT_ID: &str = "参加者IDが空です";
    pub const EMPTY_INVOLVED_SET: &str = "対象者がいません";
}

#[cfg(not(feature = "ja"))]
pub mod strings {
    pub const FAMILY: &str = "Family";
    pub const BALANCE: &str = "Balance";
    pub const FROM: &str = "From";
    pub const TO: &str = "To";
    pub const AMOUNT: &str = "Amount";
    pub const BALANCES_TITLE: &str = "Balances";
    pub const TRANSFERS_TITLE: &str = "Transfers";
    pub const ALL_SETTLED: &str = "Everyone is settled up.";
    pub const EMPTY_PARTICIPANT_ID: &str = "participant id is empty";
    pub const EMPTY_INVOLVED_SET: &str = "expense involves nobody";
}

pub use strings::*;

use std::fmt::Display;

#[cfg(feature = "ja")]
pub fn non_positive_amount(amount: impl Display) -> String {
    format!("金額は正の値である必要があります ({amount})")
}

#[cfg(feature = "ja")]
pub fn amount_out_of_range(amount: impl Display) -> String {
    format!("金額 {amount} は1件あたりの上限を超えています")
}

#[cfg(feature = "ja")]
pub fn self_settlement(id: impl Display) -> String {
    format!("'{id}' から自分自身への精算です")
}

#[cfg(feature = "ja")]
pub fn payer_not_involved(id: impl Display) -> String {
    format!("支払人 '{id}' が対象者に含まれていません")
}

#[cfg(feature = "ja")]
pub fn unknown_participant(id: impl Display) -> String {
    format!("'{id}' は登録されていない参加者です")
}

#[cfg(feature = "ja")]
pub fn undefined_family(name: impl Display, line: usize) -> String {
    format!("未定義の家族 '{name}' です (行 {line})")
}

#[cfg(feature = "ja")]
pub fn duplicate_family(name: impl Display, line: usize) -> String {
    format!("家族 '{name}' が二重に宣言されています (行 {line})")
}

#[cfg(feature = "ja")]
pub fn invalid_amount(literal: impl Display, line: usize) -> String {
    format!("金額 '{literal}' を解釈できません (行 {line})")
}

#[cfg(feature = "ja")]
pub fn invalid_timestamp(literal: impl Display, line: usize) -> String {
    format!("日時 '{literal}' を解釈できません (行 {line})")
}

#[cfg(not(feature = "ja"))]
pub fn non_positive_amount(amount: impl Display) -> String {
    format!("amount must be positive (found {amount})")
}

#[cfg(not(feature = "ja"))]
pub fn amount_out_of_range(amount: impl Display) -> String {
    format!("amount {amount} exceeds the per-entry limit")
}

#[cfg(not(feature = "ja"))]
pub fn self_settlement(id: impl Display) -> String {
    format!("settlement from '{id}' to itself")
}

#[cfg(not(feature = "ja"))]
pub fn payer_not_involved(id: impl Display) -> String {
    format!("payer '{id}' is not among the involved participants")
}

#[cfg(not(feature = "ja"))]
pub fn unknown_participant(id: impl Display) -> String {
    format!("'{id}' is not a registered participant")
}

#[cfg(not(feature = "ja"))]
pub fn undefined_family(name: impl Display, line: usize) -> String {
    format!("Undefined family '{name}' at line {line}")
}

#[cfg(not(feature = "ja"))]
pub fn duplicate_family(name: impl Display, line: usize) -> String {
    format!("Family '{name}' is declared twice (line {line})")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_amount(literal: impl Display, line: usize) -> String {
    format!("Invalid amount '{literal}' at line {line}")
}

#[cfg(not(feature = "ja"))]
pub fn invalid_timestamp(literal: impl Display, line: usize) -> String {
    format!("Invalid timestamp '{literal}' at line {line}")
}

/// Where a reported entry lives.
pub enum EntryLocation {
    Line(usize),
    Stored(u64),
}

pub struct SkippedEntryMessage {
    location: EntryLocation,
    detail: String,
}

pub struct FlaggedEntryMessage {
    location: EntryLocation,
    detail: String,
}

pub struct SyntaxErrorMessage {
    line: usize,
    detail: String,
}

pub fn skipped_entry(location: EntryLocation, detail: String) -> SkippedEntryMessage {
    SkippedEntryMessage { location, detail }
}

pub fn flagged_entry(location: EntryLocation, detail: String) -> FlaggedEntryMessage {
    FlaggedEntryMessage { location, detail }
}

pub fn syntax_error(line: usize, detail: String) -> SyntaxErrorMessage {
    SyntaxErrorMessage { line, detail }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for EntryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line(line) => write!(f, "行 {line}"),
            Self::Stored(id) => write!(f, "記録 #{id}"),
        }
    }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SkippedEntryMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} を無視しました: {}", self.location, self.detail)
    }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for FlaggedEntryMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} の確認をお願いします: {}", self.location, self.detail)
    }
}

#[cfg(feature = "ja")]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "構文エラー (行 {}): {}", self.line, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for EntryLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Line(line) => write!(f, "line {line}"),
            Self::Stored(id) => write!(f, "entry #{id}"),
        }
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SkippedEntryMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skipped {}: {}", self.location, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for FlaggedEntryMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Check {}: {}", self.location, self.detail)
    }
}

#[cfg(not(feature = "ja"))]
impl std::fmt::Display for SyntaxErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at line {}: {}", self.line, self.detail)
    }
}
