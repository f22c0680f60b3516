//! AI に送るプロンプトの組み立て（純粋関数）

use crate::domain::category::Category;
use crate::domain::error::ListError;

/// 分類プロンプトを作る
///
/// テキストは改行区切りのアイテム名。trim して空なら何も送らない。
pub fn categorization_prompt(list_text: &str) -> Result<String, ListError> {
    let text = list_text.trim();
    if text.is_empty() {
        return Err(ListError::EmptyInput);
    }
    let keys: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    Ok(format!(
        "Categorize these items into a JSON object with these keys: {}. \
         For any category without items, use an empty array []. The list is:\n---\n{}",
        keys.join(", "),
        text
    ))
}

/// 追加アイテム提案のプロンプト
pub fn suggestion_prompt(items: &[String], ignored: &[String]) -> Result<String, ListError> {
    if items.is_empty() {
        return Err(ListError::EmptyInput);
    }
    let mut prompt = format!(
        "Based on this grocery list: {}, suggest 5 more related items.",
        items.join(", ")
    );
    if !ignored.is_empty() {
        prompt.push_str(&format!(
            " Do not suggest any of these items: {}.",
            ignored.join(", ")
        ));
    }
    prompt.push_str(" Return only a comma-separated list of strings, nothing else.");
    Ok(prompt)
}

/// 献立アイデアのプロンプト
pub fn meal_idea_prompt(items: &[String]) -> Result<String, ListError> {
    if items.is_empty() {
        return Err(ListError::EmptyInput);
    }
    Ok(format!(
        "Given these grocery items: {}, suggest a simple meal. Return a JSON object with four keys: \
         \"title\" (string), \"has\" (an array of strings for ingredients from the list), \
         \"needs\" (an array of 1-3 strings for key ingredients NOT on the list), and \
         \"instructions\" (a string with simple, step-by-step recipe instructions).",
        items.join(", ")
    ))
}
