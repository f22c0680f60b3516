//! AI の自由文応答を型に落とす
//!
//! 応答の形は保証されない。最初の `{` から最後の `}` までを切り出し、
//! `]` / `}` 直前の末尾カンマだけを取り除いてから JSON として読む。それ以上の修復はしない。

use crate::domain::category::Category;
use crate::domain::category_map::CategoryMap;
use crate::domain::error::ListError;
use crate::domain::list_item::ListItem;
use common::llm::GenerationOutcome;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

static TRAILING_COMMA: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

fn trailing_comma() -> Result<&'static Regex, ListError> {
    TRAILING_COMMA
        .get_or_init(|| Regex::new(r",\s*([\]}])"))
        .as_ref()
        .map_err(|e| ListError::MalformedAIResponse(format!("trailing comma pattern: {}", e)))
}

/// 生成結果から候補テキストを取り出す
pub fn reply_text(outcome: GenerationOutcome) -> Result<String, ListError> {
    match outcome {
        GenerationOutcome::Text(text) => Ok(text),
        GenerationOutcome::Blocked { reason } => Err(ListError::BlockedByProvider(reason)),
        GenerationOutcome::Empty => Err(ListError::EmptyAIResponse),
    }
}

/// 最初の `{` から最後の `}` までを返す
fn brace_slice(text: &str) -> Result<&str, ListError> {
    let start = text
        .find('{')
        .ok_or_else(|| ListError::MalformedAIResponse("no JSON object in reply".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| ListError::MalformedAIResponse("no JSON object in reply".to_string()))?;
    Ok(&text[start..=end])
}

fn parse_json_span(text: &str, repair: bool) -> Result<Value, ListError> {
    let span = brace_slice(text)?;
    let repaired = if repair {
        trailing_comma()?.replace_all(span, "$1").into_owned()
    } else {
        span.to_string()
    };
    serde_json::from_str(&repaired).map_err(|e| ListError::MalformedAIResponse(e.to_string()))
}

/// 分類応答を完全な CategoryMap にする
///
/// 各カテゴリの配列の文字列要素だけを未チェックのアイテムにする。
/// 配列でない値・欠けたキーは空、空白だけの名前と文字列以外の要素は捨てる。
pub fn parse_categorization(text: &str) -> Result<CategoryMap, ListError> {
    let value = parse_json_span(text, true)?;
    let obj = value.as_object().ok_or(ListError::IncompleteCategorization)?;
    let mut map = CategoryMap::empty();
    for category in Category::ALL {
        let Some(entries) = obj.get(category.as_str()).and_then(Value::as_array) else {
            continue;
        };
        for name in entries.iter().filter_map(Value::as_str) {
            let name = name.trim();
            if !name.is_empty() {
                map.push(category, ListItem::unchecked(name));
            }
        }
    }
    Ok(map)
}

/// カンマ区切りの提案を分割する
pub fn parse_suggestions(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// 献立アイデア
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealIdea {
    pub title: String,
    /// リストにある材料
    pub has: Vec<String>,
    /// リストに無い主な材料
    pub needs: Vec<String>,
    pub instructions: String,
}

/// 献立アイデアの応答を検証して読む（末尾カンマの修復はしない）
pub fn parse_meal_idea(text: &str) -> Result<MealIdea, ListError> {
    let value = parse_json_span(text, false)?;
    let invalid = || ListError::MalformedAIResponse("invalid meal idea format".to_string());
    let title = value["title"].as_str().filter(|s| !s.is_empty()).ok_or_else(invalid)?;
    let instructions = value["instructions"]
        .as_str()
        .filter(|s| !s.is_empty())
        .ok_or_else(invalid)?;
    let strings = |key: &str| -> Result<Vec<String>, ListError> {
        let arr = value[key].as_array().ok_or_else(invalid)?;
        Ok(arr.iter().filter_map(Value::as_str).map(String::from).collect())
    };
    Ok(MealIdea {
        title: title.to_string(),
        has: strings("has")?,
        needs: strings("needs")?,
        instructions: instructions.to_string(),
    })
}
