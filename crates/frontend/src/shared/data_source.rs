//! Normalization of the "data sources" attached to a price analysis result.
//!
//! The analysis backend returns sources in whatever shape the model produced:
//! a list of objects with English or Chinese keys, a newline separated string,
//! a single object, or nothing at all with the sources buried in the
//! reasoning text (often as a markdown table). Everything is folded into
//! [`DataSourceEntry`] rows for display.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const DEFAULT_NOTE: &str =
    "注：电商平台价格多为\"参考价\"或起批价，需要甄别是否含税、是否国标；中标价最贴近真实市场成交水平。";

const PLACEHOLDER: &str = "—";
const UNKNOWN_SOURCE: &str = "未知来源";

static SEGMENT_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r\t|,，；;]+").unwrap());
static LABEL_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:：]").unwrap());
static LINE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").unwrap());
static SOURCE_LINE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n\r]+").unwrap());
static SEPARATOR_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-\s]+$").unwrap());
static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").unwrap());
static HALF_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"0\.5|半").unwrap());
static FLOAT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap());
static COUNT_UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"条|笔|家|份|项").unwrap());

const RELIABILITY_KEYWORDS: &[(&[&str], f64)] = &[
    (&["极高", "五星", "5星", "★★★★★"], 5.0),
    (&["较高", "★★★★"], 4.0),
    (&["中等", "★★★"], 3.0),
    (&["较低", "★★"], 2.0),
    (&["低", "★"], 1.0),
];

/// Keyword heuristics used when the reasoning text has no table.
struct ReasoningCheck {
    keywords: &'static [&'static str],
    source_type: &'static str,
    platform_examples: &'static str,
    reliability: &'static str,
}

const REASONING_CHECKS: &[ReasoningCheck] = &[
    ReasoningCheck {
        keywords: &["政府采购"],
        source_type: "政府采购平台",
        platform_examples: "中国政府采购网",
        reliability: "★★★★☆",
    },
    ReasoningCheck {
        keywords: &["中标"],
        source_type: "中标公告",
        platform_examples: "公共资源交易中心",
        reliability: "★★★★☆",
    },
    ReasoningCheck {
        keywords: &["1688", "阿里巴巴"],
        source_type: "B2B电商平台",
        platform_examples: "阿里巴巴1688",
        reliability: "★★★☆☆",
    },
    ReasoningCheck {
        keywords: &["厂商", "报价"],
        source_type: "厂家报盘",
        platform_examples: "厂家直供报价",
        reliability: "★★★☆☆",
    },
    ReasoningCheck {
        keywords: &["行业资讯", "期刊"],
        source_type: "行业造价信息",
        platform_examples: "工程造价信息刊物",
        reliability: "★★★★☆",
    },
];

/// One normalized data source row
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DataSourceEntry {
    pub source_type: String,
    pub platform_examples: String,
    pub data_count: String,
    pub timeliness: String,
    pub reliability: String,
    /// 0..=5, `None` when the reliability text carries no rating
    pub reliability_value: Option<f64>,
    pub price_reference: String,
    pub price_range: String,
    pub price_range_min: Option<f64>,
    pub price_range_max: Option<f64>,
    pub sample_description: String,
    pub notes: String,
}

/// Trimmed text form of a JSON scalar; `null` becomes an empty string.
pub fn normalize_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// First field that is set and truthy (`a || b || c`).
fn first_truthy<'a>(entry: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| entry.get(*k))
        .find(|v| is_truthy(v))
}

/// First field that is set and not null (`a ?? b ?? c`).
fn first_present<'a>(entry: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| entry.get(*k))
        .find(|v| !v.is_null())
}

fn text_of(entry: &Map<String, Value>, keys: &[&str]) -> String {
    first_truthy(entry, keys)
        .map(normalize_string)
        .unwrap_or_default()
}

fn or_placeholder(text: String, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// Leading float of a string, like JavaScript's `parseFloat`.
fn parse_float_prefix(text: &str) -> Option<f64> {
    FLOAT_PREFIX
        .find(text)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
}

fn value_as_float(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// "12" → "12条"; texts that already carry a unit are kept.
pub fn format_data_count(value: &Value) -> String {
    let text = normalize_string(value);
    if text.is_empty() {
        return PLACEHOLDER.to_string();
    }
    if COUNT_UNIT.is_match(&text) {
        return text;
    }
    if text.parse::<f64>().is_ok_and(|n| !n.is_nan()) {
        return format!("{}条", text);
    }
    text
}

pub fn format_timeliness(value: &Value) -> String {
    or_placeholder(normalize_string(value), PLACEHOLDER)
}

pub fn format_price_reference(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(price) => format!("参考价 ¥{:.2}", price),
            None => String::new(),
        },
        other => {
            let text = normalize_string(other);
            if text.is_empty() {
                String::new()
            } else if text.starts_with("参考价") {
                text
            } else {
                format!("参考价 {}", text)
            }
        }
    }
}

pub fn format_price_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => PLACEHOLDER.to_string(),
        (None, Some(max)) => format!("≤ ¥{:.2}", max),
        (Some(min), None) => format!("≥ ¥{:.2}", min),
        (Some(min), Some(max)) if min == max => format!("¥{:.2}", min),
        (Some(min), Some(max)) => format!("¥{:.2} ~ ¥{:.2}", min, max),
    }
}

/// Rating on a 0..=5 scale.
///
/// A numeric `fallback_score` wins (clamped). Otherwise the text is read as
/// stars (`★★★★☆`, half star with a "0.5"/"半" hint), as a number (≤5 taken
/// as is, ≤100 scaled down by 20), or through the keyword table.
pub fn parse_reliability_value(text: &str, fallback_score: Option<f64>) -> Option<f64> {
    if let Some(score) = fallback_score.filter(|s| !s.is_nan()) {
        return Some(score.clamp(0.0, 5.0));
    }

    let normalized = text.trim();
    if normalized.is_empty() {
        return None;
    }

    let stars = normalized.matches('★').count();
    if stars > 0 {
        let mut value = stars as f64;
        if normalized.contains('☆') && value < 5.0 && HALF_HINT.is_match(normalized) {
            value += 0.5;
        }
        return Some(value.clamp(0.0, 5.0));
    }

    if let Some(num) = FIRST_NUMBER
        .captures(normalized)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        if num <= 5.0 {
            return Some(num);
        }
        if num <= 100.0 {
            return Some(((num / 20.0) * 10.0).round() / 10.0);
        }
    }

    RELIABILITY_KEYWORDS
        .iter()
        .find(|(keywords, _)| contains_any(normalized, keywords))
        .map(|(_, value)| *value)
}

fn normalize_entry_object(entry: &Map<String, Value>) -> DataSourceEntry {
    let source_type = or_placeholder(
        text_of(
            entry,
            &["source_type", "type", "来源类型", "来源类型/类别", "category", "类别", "name", "source"],
        ),
        UNKNOWN_SOURCE,
    );

    let platform_examples = or_placeholder(
        text_of(
            entry,
            &[
                "platform_examples",
                "platform",
                "examples",
                "example",
                "平台/项目示例",
                "平台示例",
                "平台或项目示例",
                "典型项目",
                "name",
                "source",
            ],
        ),
        PLACEHOLDER,
    );

    let data_count = format_data_count(
        first_present(entry, &["data_count", "数据量", "count", "data_volume", "quantity"])
            .unwrap_or(&Value::Null),
    );

    let timeliness = format_timeliness(
        first_truthy(
            entry,
            &["timeliness", "时效性", "time_range", "effective_date", "period", "更新时间"],
        )
        .unwrap_or(&Value::Null),
    );

    let reliability = or_placeholder(
        text_of(
            entry,
            &["reliability", "reliability_rating", "可靠性评级", "可靠性", "rating", "level"],
        ),
        PLACEHOLDER,
    );
    let reliability_score = entry.get("reliability_score").and_then(|v| v.as_f64());
    let reliability_value = parse_reliability_value(&reliability, reliability_score);

    let min_raw = first_present(entry, &["price_range_min", "价格区间最低", "min_price"]);
    let max_raw = first_present(entry, &["price_range_max", "价格区间最高", "max_price"]);
    let price_range_min = value_as_float(min_raw.filter(|v| is_truthy(v) || v.is_number()));
    let price_range_max = value_as_float(max_raw.filter(|v| is_truthy(v) || v.is_number()));

    DataSourceEntry {
        source_type,
        platform_examples,
        data_count,
        timeliness,
        reliability,
        reliability_value,
        price_reference: format_price_reference(
            first_truthy(entry, &["price", "参考价格"]).unwrap_or(&Value::Null),
        ),
        price_range: format_price_range(price_range_min, price_range_max),
        price_range_min,
        price_range_max,
        sample_description: or_placeholder(
            text_of(entry, &["sample_description", "样本描述", "样本说明"]),
            PLACEHOLDER,
        ),
        notes: or_placeholder(
            text_of(entry, &["notes", "可选补充", "备注", "补充说明"]),
            PLACEHOLDER,
        ),
    }
}

#[derive(Default)]
struct PartialSource {
    source_type: String,
    platform_examples: String,
    data_count: String,
    timeliness: String,
    reliability: String,
}

impl PartialSource {
    /// Fills the first empty slot, in display order after `source_type`.
    fn fill_next(&mut self, value: String) {
        if self.platform_examples.is_empty() {
            self.platform_examples = value;
        } else if self.data_count.is_empty() {
            self.data_count = value;
        } else if self.timeliness.is_empty() {
            self.timeliness = value;
        } else if self.reliability.is_empty() {
            self.reliability = value;
        }
    }

    /// Reads one `label: value` (or bare) segment.
    fn absorb(&mut self, segment: &str) {
        let mut parts = LABEL_SPLIT.split(segment);
        let label = parts.next().unwrap_or_default().trim().to_string();
        let value = parts.next().unwrap_or_default().trim().to_string();

        if value.is_empty() {
            if self.source_type.is_empty() {
                self.source_type = label;
            } else {
                self.fill_next(label);
            }
            return;
        }

        if contains_any(&label, &["来源", "类型"]) && self.source_type.is_empty() {
            self.source_type = value;
        } else if contains_any(&label, &["平台", "示例", "案例", "项目"])
            && self.platform_examples.is_empty()
        {
            self.platform_examples = value;
        } else if contains_any(&label, &["量", "条", "笔", "数量", "案例数"])
            && self.data_count.is_empty()
        {
            self.data_count = value;
        } else if contains_any(&label, &["时效", "时间", "周期", "月份", "更新"])
            && self.timeliness.is_empty()
        {
            self.timeliness = value;
        } else if contains_any(&label, &["可靠", "评级", "评分", "星"])
            && self.reliability.is_empty()
        {
            self.reliability = value;
        } else {
            self.fill_next(value);
        }
    }
}

fn normalize_entry_string(text: &str) -> Option<DataSourceEntry> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let segments: Vec<&str> = SEGMENT_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut target = PartialSource::default();
    for segment in &segments {
        target.absorb(segment);
    }

    let source_type = if !target.source_type.is_empty() {
        target.source_type
    } else {
        segments
            .first()
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string())
    };
    let platform_examples = or_placeholder(target.platform_examples, &source_type);
    let reliability = or_placeholder(target.reliability.trim().to_string(), PLACEHOLDER);
    let reliability_value = parse_reliability_value(&reliability, None);

    Some(DataSourceEntry {
        platform_examples,
        source_type,
        data_count: format_data_count(&Value::String(target.data_count)),
        timeliness: format_timeliness(&Value::String(target.timeliness)),
        reliability,
        reliability_value,
        ..Default::default()
    })
}

/// Rows of the first markdown table whose header mentions 来源 and 数据,
/// keyed by header cell.
fn parse_markdown_table_entries(text: &str) -> Vec<Map<String, Value>> {
    let table_lines: Vec<&str> = LINE_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|l| !l.is_empty() && l.contains('|'))
        .collect();
    if table_lines.len() < 2 {
        return Vec::new();
    }

    let start = table_lines
        .iter()
        .position(|l| l.contains("来源") && l.contains("数据"))
        .unwrap_or(0);
    let headers: Vec<String> = table_lines[start]
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty() && !SEPARATOR_CELL.is_match(c))
        .map(str::to_string)
        .collect();
    if headers.len() < 3 {
        return Vec::new();
    }

    let mut entries = Vec::new();
    for line in &table_lines[start + 1..] {
        let raw: Vec<&str> = line.split('|').map(str::trim).collect();
        let last = raw.len().saturating_sub(1);
        let cells: Vec<&str> = raw
            .iter()
            .enumerate()
            .filter(|(idx, cell)| !((*idx == 0 || *idx == last) && cell.is_empty()))
            .map(|(_, cell)| *cell)
            .collect();

        if cells.len() < headers.len() || cells.iter().all(|c| SEPARATOR_CELL.is_match(c)) {
            continue;
        }

        let entry: Map<String, Value> = headers
            .iter()
            .zip(cells.iter())
            .map(|(h, c)| (h.clone(), Value::String(c.to_string())))
            .collect();
        if !entry.is_empty() {
            entries.push(entry);
        }
    }
    entries
}

fn extract_from_reasoning(reasoning: &str) -> Vec<DataSourceEntry> {
    let text = reasoning.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let table = parse_markdown_table_entries(text);
    if !table.is_empty() {
        return table.iter().map(normalize_entry_object).collect();
    }

    REASONING_CHECKS
        .iter()
        .filter(|check| check.keywords.iter().all(|k| text.contains(k)))
        .map(|check| DataSourceEntry {
            source_type: check.source_type.to_string(),
            platform_examples: check.platform_examples.to_string(),
            data_count: PLACEHOLDER.to_string(),
            timeliness: PLACEHOLDER.to_string(),
            reliability: check.reliability.to_string(),
            reliability_value: parse_reliability_value(check.reliability, None),
            ..Default::default()
        })
        .collect()
}

fn coerce_sources(sources: &Value) -> Vec<Value> {
    match sources {
        Value::Array(items) => items.clone(),
        Value::String(s) => SOURCE_LINE_SPLIT
            .split(s)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| Value::String(l.to_string()))
            .collect(),
        Value::Object(_) => vec![sources.clone()],
        _ => Vec::new(),
    }
}

fn normalize_data_sources(sources: &Value) -> Vec<DataSourceEntry> {
    coerce_sources(sources)
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => normalize_entry_string(s),
            Value::Object(map) => Some(normalize_entry_object(map)),
            _ => None,
        })
        .collect()
}

fn deduplicate_sources(sources: Vec<DataSourceEntry>) -> Vec<DataSourceEntry> {
    let mut seen = HashSet::new();
    sources
        .into_iter()
        .filter(|s| seen.insert((s.source_type.clone(), s.platform_examples.clone())))
        .collect()
}

/// Display rows for the data sources of an analysis result.
pub fn format_analysis_data_sources(analysis: &Value) -> Vec<DataSourceEntry> {
    if !is_truthy(analysis) {
        return Vec::new();
    }

    let normalized = normalize_data_sources(analysis.get("data_sources").unwrap_or(&Value::Null));
    if !normalized.is_empty() {
        return deduplicate_sources(normalized);
    }

    let candidates = [
        analysis.get("analysis_reasoning"),
        analysis.get("ai_explanation"),
        analysis.get("reasoning"),
        analysis.pointer("/raw_response/content"),
        analysis.pointer("/api_response/content"),
    ];
    candidates
        .into_iter()
        .flatten()
        .map(normalize_string)
        .find(|t| !t.is_empty())
        .map(|text| deduplicate_sources(extract_from_reasoning(&text)))
        .unwrap_or_default()
}

/// Note shown under the sources table.
pub fn data_source_note(analysis: &Value) -> String {
    let Some(obj) = analysis.as_object() else {
        return String::new();
    };
    or_placeholder(
        text_of(obj, &["data_source_note", "data_sources_note"]),
        DEFAULT_NOTE,
    )
}

pub fn has_data_sources(analysis: &Value) -> bool {
    !format_analysis_data_sources(analysis).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_data_count() {
        assert_eq!(format_data_count(&json!(null)), "—");
        assert_eq!(format_data_count(&json!("  ")), "—");
        assert_eq!(format_data_count(&json!(12)), "12条");
        assert_eq!(format_data_count(&json!("35")), "35条");
        assert_eq!(format_data_count(&json!("20家")), "20家");
        assert_eq!(format_data_count(&json!("dozens")), "dozens");
    }

    #[test]
    fn test_format_price_reference() {
        assert_eq!(format_price_reference(&json!(null)), "");
        assert_eq!(format_price_reference(&json!(12.5)), "参考价 ¥12.50");
        assert_eq!(format_price_reference(&json!("参考价 ¥30")), "参考价 ¥30");
        assert_eq!(format_price_reference(&json!("¥30/吨")), "参考价 ¥30/吨");
        assert_eq!(format_price_reference(&json!(" ")), "");
    }

    #[test]
    fn test_format_price_range() {
        assert_eq!(format_price_range(None, None), "—");
        assert_eq!(format_price_range(Some(10.0), None), "≥ ¥10.00");
        assert_eq!(format_price_range(None, Some(20.0)), "≤ ¥20.00");
        assert_eq!(format_price_range(Some(15.0), Some(15.0)), "¥15.00");
        assert_eq!(format_price_range(Some(10.0), Some(20.5)), "¥10.00 ~ ¥20.50");
    }

    #[test]
    fn test_parse_reliability_value() {
        assert_eq!(parse_reliability_value("anything", Some(7.0)), Some(5.0));
        assert_eq!(parse_reliability_value("anything", Some(-1.0)), Some(0.0));
        assert_eq!(parse_reliability_value("", None), None);
        assert_eq!(parse_reliability_value("★★★★☆", None), Some(4.0));
        assert_eq!(parse_reliability_value("★★★☆ 半星", None), Some(3.5));
        assert_eq!(parse_reliability_value("4.5分", None), Some(4.5));
        assert_eq!(parse_reliability_value("85", None), Some(4.3));
        assert_eq!(parse_reliability_value("较高", None), Some(4.0));
        assert_eq!(parse_reliability_value("较低", None), Some(2.0));
        assert_eq!(parse_reliability_value("—", None), None);
    }

    #[test]
    fn test_object_entries_with_chinese_keys() {
        let result = json!({
            "data_sources": [{
                "来源类型": "政府信息价",
                "平台示例": "省造价站",
                "数据量": 12,
                "时效性": "2024-03",
                "可靠性评级": "★★★★★",
                "price_range_min": "3800元",
                "price_range_max": 4200
            }]
        });
        let rows = format_analysis_data_sources(&result);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.source_type, "政府信息价");
        assert_eq!(row.platform_examples, "省造价站");
        assert_eq!(row.data_count, "12条");
        assert_eq!(row.timeliness, "2024-03");
        assert_eq!(row.reliability_value, Some(5.0));
        assert_eq!(row.price_range_min, Some(3800.0));
        assert_eq!(row.price_range, "¥3800.00 ~ ¥4200.00");
        assert_eq!(row.notes, "—");
    }

    #[test]
    fn test_string_sources_are_split_and_labelled() {
        let result = json!({
            "data_sources": "来源：中标公告，平台：公共资源交易中心，数量：8，更新时间：近三个月，可靠性：较高\n阿里巴巴1688"
        });
        let rows = format_analysis_data_sources(&result);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_type, "中标公告");
        assert_eq!(rows[0].platform_examples, "公共资源交易中心");
        assert_eq!(rows[0].data_count, "8条");
        assert_eq!(rows[0].timeliness, "近三个月");
        assert_eq!(rows[0].reliability_value, Some(4.0));
        assert_eq!(rows[1].source_type, "阿里巴巴1688");
        assert_eq!(rows[1].platform_examples, "阿里巴巴1688");
        assert_eq!(rows[1].reliability, "—");
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let result = json!({
            "data_sources": [
                {"source_type": "电商", "platform_examples": "京东"},
                {"source_type": "电商", "platform_examples": "京东", "data_count": 3},
                {"source_type": "电商", "platform_examples": "天猫"}
            ]
        });
        let rows = format_analysis_data_sources(&result);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].platform_examples, "天猫");
    }

    #[test]
    fn test_markdown_table_in_reasoning() {
        let reasoning = "分析如下：\n\
            | 来源类型 | 平台/项目示例 | 数据量 | 时效性 | 可靠性评级 |\n\
            | --- | --- | --- | --- | --- |\n\
            | 政府信息价 | 省造价站 | 10 | 2024年 | ★★★★★ |\n\
            | 电商平台 | 京东 | 25笔 | 近一月 | ★★★☆☆ |\n";
        let result = json!({ "data_sources": [], "analysis_reasoning": reasoning });
        let rows = format_analysis_data_sources(&result);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_type, "政府信息价");
        assert_eq!(rows[0].data_count, "10条");
        assert_eq!(rows[1].data_count, "25笔");
        assert_eq!(rows[1].reliability_value, Some(3.0));
    }

    #[test]
    fn test_keyword_fallback_in_reasoning() {
        let result = json!({
            "raw_response": { "content": "参考了政府采购数据与1688阿里巴巴的报价" }
        });
        let rows = format_analysis_data_sources(&result);
        let types: Vec<&str> = rows.iter().map(|r| r.source_type.as_str()).collect();
        assert_eq!(types, vec!["政府采购平台", "B2B电商平台"]);
        assert_eq!(rows[0].reliability_value, Some(4.0));
    }

    #[test]
    fn test_empty_result() {
        assert!(format_analysis_data_sources(&json!(null)).is_empty());
        assert!(!has_data_sources(&json!({"data_sources": null})));
        assert!(has_data_sources(&json!({"data_sources": {"source_type": "厂家"}})));
    }

    #[test]
    fn test_data_source_note() {
        assert_eq!(data_source_note(&json!(null)), "");
        assert_eq!(data_source_note(&json!({})), DEFAULT_NOTE);
        assert_eq!(
            data_source_note(&json!({"data_sources_note": " 仅供参考 "})),
            "仅供参考"
        );
    }
}
