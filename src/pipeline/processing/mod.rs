// Pipeline processing: normalization, extraction, flagging, scoring and validation

pub mod confidence;
pub mod customer;
pub mod deal;
pub mod interaction;
pub mod normalize;
pub mod patterns;
pub mod quality_gate;
pub mod validation;

/// Month names and common abbreviations, as a regex alternation
pub(crate) const MONTH_NAMES: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";
