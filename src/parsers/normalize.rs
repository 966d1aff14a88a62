use regex::Regex;
use std::sync::LazyLock;

/// 추출 결과에 섞여 들어오는 "기재 안 됨" 표기들. 비교 전에 공백/구두점을
/// 접어서(fold) "미 기재" 같은 변형도 같은 값으로 취급한다.
const SENTINELS: &[&str] = &[
    "미기재",
    "미상",
    "없음",
    "해당없음",
    "불명",
    "확인불가",
    "unknown",
    "na",
    "null",
    "none",
];

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").unwrap());

fn fold(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '.' | ',' | '/' | '-' | '_'))
        .collect::<String>()
        .to_lowercase()
}

/// Classifies a raw scalar as present or absent. Returns the trimmed value
/// when present; `None` for blanks and sentinel strings ("미기재", "N/A", "-").
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let folded = fold(trimmed);
    if folded.is_empty() || SENTINELS.contains(&folded.as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Strips thousands separators and keeps only the first contiguous numeric
/// token. Absent when nothing numeric remains.
pub fn sanitize_numeric(raw: &str) -> Option<String> {
    let cleaned = raw.replace(',', "");
    NUMERIC_RE
        .find(&cleaned)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_real_values() {
        assert_eq!(normalize("  삼성전자 "), Some("삼성전자".to_string()));
        assert_eq!(normalize("FOB"), Some("FOB".to_string()));
    }

    #[test]
    fn test_normalize_rejects_blanks_and_sentinels() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   "), None);
        assert_eq!(normalize("미기재"), None);
        assert_eq!(normalize("미 기재"), None);
        assert_eq!(normalize("N/A"), None);
        assert_eq!(normalize("na"), None);
        assert_eq!(normalize("-"), None);
        assert_eq!(normalize("해당 없음"), None);
    }

    #[test]
    fn test_sanitize_numeric() {
        assert_eq!(sanitize_numeric("1,234.56"), Some("1234.56".to_string()));
        assert_eq!(sanitize_numeric("USD 500"), Some("500".to_string()));
        assert_eq!(sanitize_numeric("12.5 KG"), Some("12.5".to_string()));
        assert_eq!(sanitize_numeric("없음"), None);
        assert_eq!(sanitize_numeric("-"), None);
    }
}
