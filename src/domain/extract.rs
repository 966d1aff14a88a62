use crate::parsers::normalize::normalize;
use crate::utils::error::{DeclError, Result};
use serde_json::{Map, Value};

/// AI 추출 결과 맵에 대한 별칭 인식 접근자. 키는 한글 업무 필드명이 기본이고
/// 영문 별칭이 섞여 들어오므로, 우선순위 순서대로 첫 번째 존재하는 비공란
/// 값을 돌려준다.
#[derive(Debug, Clone, Copy)]
pub struct Extracted<'a> {
    data: &'a Map<String, Value>,
}

impl<'a> Extracted<'a> {
    pub fn from_value(value: &'a Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self { data: map }),
            other => Err(DeclError::InputShapeError {
                field: "$".to_string(),
                reason: format!("expected a JSON object, got {}", type_name(other)),
            }),
        }
    }

    /// First present, non-absent scalar among the aliases. Numbers are
    /// stringified; sentinel strings count as absent.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        for key in keys {
            match self.data.get(*key) {
                Some(Value::String(s)) => {
                    if let Some(v) = normalize(s) {
                        return Some(v);
                    }
                }
                Some(Value::Number(n)) => return Some(n.to_string()),
                _ => {}
            }
        }
        None
    }

    /// First present raw value among the aliases (for shape-dispatching
    /// parsers like origin).
    pub fn raw(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .find_map(|key| self.data.get(*key))
            .filter(|v| !v.is_null())
    }

    /// Resolves an alias to a list of maps. A present non-list value is a
    /// fatal shape error; a missing key is just an empty list.
    pub fn list(&self, keys: &[&str]) -> Result<Vec<Extracted<'a>>> {
        for key in keys {
            match self.data.get(*key) {
                None | Some(Value::Null) => continue,
                Some(Value::Array(items)) => {
                    let mut out = Vec::with_capacity(items.len());
                    for (i, item) in items.iter().enumerate() {
                        match item {
                            Value::Object(map) => out.push(Self { data: map }),
                            other => {
                                return Err(DeclError::InputShapeError {
                                    field: format!("{key}[{i}]"),
                                    reason: format!(
                                        "expected an object entry, got {}",
                                        type_name(other)
                                    ),
                                })
                            }
                        }
                    }
                    return Ok(out);
                }
                Some(other) => {
                    return Err(DeclError::InputShapeError {
                        field: (*key).to_string(),
                        reason: format!("expected a list, got {}", type_name(other)),
                    })
                }
            }
        }
        Ok(Vec::new())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_priority() {
        let input = json!({ "수출자": "미기재", "exporter": "Alpha Co." });
        let data = Extracted::from_value(&input).unwrap();
        assert_eq!(
            data.text(&["수출자", "exporter"]).as_deref(),
            Some("Alpha Co.")
        );
    }

    #[test]
    fn test_numbers_stringified() {
        let input = json!({ "총중량": 1200.5 });
        let data = Extracted::from_value(&input).unwrap();
        assert_eq!(data.text(&["총중량"]).as_deref(), Some("1200.5"));
    }

    #[test]
    fn test_missing_list_is_empty() {
        let input = json!({});
        let data = Extracted::from_value(&input).unwrap();
        assert!(data.list(&["품목별_결과"]).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_where_list_expected_is_fatal() {
        let input = json!({ "품목별_결과": "텔레비전" });
        let data = Extracted::from_value(&input).unwrap();
        let err = data.list(&["품목별_결과"]).unwrap_err();
        assert!(err.to_string().contains("품목별_결과"));
    }

    #[test]
    fn test_non_object_root_is_fatal() {
        assert!(Extracted::from_value(&json!([1, 2])).is_err());
    }
}
