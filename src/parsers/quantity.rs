use crate::domain::model::Quantity;
use crate::parsers::normalize::{normalize, sanitize_numeric};

/// Pulls the first numeric run as the value and classifies the trailing text
/// against a small unit vocabulary (UN/ECE codes). Unknown units stay absent;
/// the value is still kept.
pub fn parse_quantity(raw: &str) -> Quantity {
    let Some(s) = normalize(raw) else {
        return Quantity::default();
    };

    let cleaned = s.replace(',', "");
    let Some(value) = sanitize_numeric(&cleaned) else {
        return Quantity::default();
    };

    // 수량 뒤에 붙는 단위 표기만 남긴다
    let tail = cleaned
        .split_once(value.as_str())
        .map(|(_, rest)| rest)
        .unwrap_or("");
    let unit = classify_unit(tail);

    Quantity {
        value: Some(value),
        unit,
    }
}

fn classify_unit(tail: &str) -> Option<String> {
    let folded = tail.trim().trim_matches('.').to_lowercase();
    let code = match folded.as_str() {
        "m" | "meter" | "meters" | "mtr" | "미터" => "MTR",
        "ea" | "pc" | "pcs" | "piece" | "pieces" | "개" | "개수" => "EA",
        "kg" | "kgs" | "kgm" | "kilogram" | "kilograms" | "킬로그램" | "㎏" => "KGM",
        _ => return None,
    };
    Some(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_and_piece_unit() {
        let q = parse_quantity("1,000 EA");
        assert_eq!(q.value.as_deref(), Some("1000"));
        assert_eq!(q.unit.as_deref(), Some("EA"));
    }

    #[test]
    fn test_meter_alias() {
        let q = parse_quantity("250M");
        assert_eq!(q.value.as_deref(), Some("250"));
        assert_eq!(q.unit.as_deref(), Some("MTR"));
    }

    #[test]
    fn test_korean_unit() {
        let q = parse_quantity("30개");
        assert_eq!(q.value.as_deref(), Some("30"));
        assert_eq!(q.unit.as_deref(), Some("EA"));
    }

    #[test]
    fn test_unknown_unit_keeps_value() {
        let q = parse_quantity("12 BOX");
        assert_eq!(q.value.as_deref(), Some("12"));
        assert_eq!(q.unit, None);
    }

    #[test]
    fn test_no_numeric() {
        assert!(parse_quantity("다수").is_empty());
    }
}
