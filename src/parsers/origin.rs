use crate::domain::model::Origin;
use crate::parsers::normalize::normalize;
use serde_json::{Map, Value};

const COUNTRY_KEYS: &[&str] = &["원산지국가", "원산국", "country", "country_code"];
const RULE_KEYS: &[&str] = &["원산지결정기준", "결정기준", "rule", "rule_code"];
const DISPLAY_KEYS: &[&str] = &["원산지표시", "표시여부", "display", "display_code"];
const FTA_KEYS: &[&str] = &["FTA발급", "협정관세발급", "fta_issuance", "fta"];
const AGREEMENT_KEYS: &[&str] = &["협정명", "agreement_name", "agreement"];

/// Origin comes in two shapes: a packed string ("KRABY" + optional agreement
/// name) or a structured map with Korean/English keys. Anything else is
/// treated as absent.
pub fn parse_origin(value: &Value) -> Origin {
    match value {
        Value::String(s) => parse_packed(s),
        Value::Object(map) => parse_structured(map),
        _ => Origin::default(),
    }
}

fn parse_packed(raw: &str) -> Origin {
    let Some(s) = normalize(raw) else {
        return Origin::default();
    };
    let chars: Vec<char> = s.chars().collect();
    if chars.len() < 2 || !chars[0].is_ascii_alphabetic() || !chars[1].is_ascii_alphabetic() {
        return Origin::default();
    }

    let country = Some(chars[0..2].iter().collect::<String>().to_uppercase());
    let rule = chars.get(2).map(|c| c.to_string());
    let display = chars.get(3).map(|c| c.to_string());
    let fta_issuance = chars.get(4).map(|c| c.to_string());
    let agreement_name = if chars.len() > 5 {
        normalize(&chars[5..].iter().collect::<String>())
    } else {
        None
    };

    Origin {
        country,
        rule,
        display,
        fta_issuance,
        agreement_name,
    }
}

fn parse_structured(map: &Map<String, Value>) -> Origin {
    Origin {
        country: resolve(map, COUNTRY_KEYS).map(|c| upper_if_code(&c)),
        rule: resolve(map, RULE_KEYS),
        display: resolve(map, DISPLAY_KEYS),
        fta_issuance: resolve(map, FTA_KEYS),
        agreement_name: resolve(map, AGREEMENT_KEYS),
    }
}

// 한글 키 → 영문 별칭 → 중첩 value/code 순으로 풀어낸다.
fn resolve(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(found) = map.get(*key).and_then(scalar_of) {
            return Some(found);
        }
    }
    None
}

fn scalar_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => normalize(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(inner) => inner
            .get("value")
            .or_else(|| inner.get("code"))
            .and_then(scalar_of),
        _ => None,
    }
}

fn upper_if_code(s: &str) -> String {
    if s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()) {
        s.to_uppercase()
    } else {
        s.to_string()
    }
}
