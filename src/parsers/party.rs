use crate::domain::model::{Party, SupplierInfo};
use crate::parsers::normalize::normalize;
use regex::Regex;
use std::sync::LazyLock;

/// 주소로 판정하는 어휘: 도로/행정구역 표기와 주요 도시·도 이름.
/// 쉼표 토큰이 이 어휘에 걸리는 순간 상호 누적이 끝난다.
const ADDRESS_KEYWORDS: &[&str] = &[
    "street",
    "st.",
    "road",
    "rd.",
    "avenue",
    "blvd",
    "-ro",
    "-gil",
    "-gu",
    "-dong",
    "-si",
    "-do",
    "beon-gil",
    "seoul",
    "busan",
    "incheon",
    "daegu",
    "daejeon",
    "gwangju",
    "ulsan",
    "sejong",
    "gyeonggi",
    "gangwon",
    "chungcheong",
    "jeolla",
    "gyeongsang",
    "jeju",
    "서울",
    "부산",
    "인천",
    "대구",
    "대전",
    "광주",
    "울산",
    "세종",
    "경기",
    "강원",
    "충북",
    "충남",
    "전북",
    "전남",
    "경북",
    "경남",
    "제주",
];

const ADDRESS_SUFFIXES: &[char] = &['로', '길', '동', '구', '시', '군', '읍', '면'];

// 해외거래처부호: 8~20자 영숫자 (숫자 포함)
static PARTNER_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9]{8,20}\b").unwrap());

// 국가부호: 독립된 대문자 2자 (접미사에 붙은 "Ltd.KR" 형태 포함)
static COUNTRY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^A-Za-z])([A-Z]{2})(?:[^A-Za-z]|$)").unwrap());

fn looks_like_address(token: &str) -> bool {
    if token.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }
    let lower = token.to_lowercase();
    if ADDRESS_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return true;
    }
    token
        .chars()
        .last()
        .is_some_and(|c| ADDRESS_SUFFIXES.contains(&c))
}

fn looks_like_postcode(token: &str) -> bool {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    (4..=6).contains(&digits)
}

/// Comma-rule party parser: leading tokens accumulate into the company name
/// until a token looks like an address or postcode, so multi-token legal
/// suffixes ("Co., Ltd.") stay inside the company. A postcode-like
/// second-to-last token yields the postcode (digit run) plus an address
/// residue ("Busan 48058"), and the final token becomes the contact person.
pub fn parse_party(raw: &str) -> Party {
    let tokens: Vec<String> = raw.split(',').filter_map(normalize).collect();
    if tokens.is_empty() {
        return Party::default();
    }

    let boundary = tokens
        .iter()
        .position(|t| looks_like_address(t) || looks_like_postcode(t))
        .unwrap_or(tokens.len());

    let company = if boundary > 0 {
        Some(tokens[..boundary].join(", "))
    } else {
        None
    };

    let rest = &tokens[boundary..];
    let mut address_parts: Vec<String>;
    let mut postcode = None;
    let mut person = None;

    if rest.len() >= 2 && looks_like_postcode(&rest[rest.len() - 2]) {
        let pc_token = &rest[rest.len() - 2];
        postcode = Some(pc_token.chars().filter(|c| c.is_ascii_digit()).collect());
        address_parts = rest[..rest.len() - 2].to_vec();
        // 우편번호에 지역명이 붙은 경우 ("Busan 48058") 잔여 문자열은 주소로
        let residue: String = pc_token.chars().filter(|c| !c.is_ascii_digit()).collect();
        let residue = residue.trim();
        if !residue.is_empty() {
            address_parts.push(residue.to_string());
        }
        person = Some(rest[rest.len() - 1].clone());
    } else {
        address_parts = rest.to_vec();
    }

    let address = if address_parts.is_empty() {
        None
    } else {
        Some(address_parts.join(", "))
    };

    Party {
        company,
        address,
        postcode,
        person,
    }
}

/// 해외공급자 문자열에서 거래처부호와 국가부호를 찾아내고 나머지를 상호로 쓴다.
/// "ABC Trading Co., Ltd.KR KR1234567X" → company/country/code 분리.
pub fn parse_supplier(raw: &str) -> SupplierInfo {
    let Some(text) = normalize(raw) else {
        return SupplierInfo::default();
    };

    let code_match = PARTNER_CODE_RE
        .find_iter(&text)
        .find(|m| m.as_str().chars().any(|c| c.is_ascii_digit()));

    let Some(code_match) = code_match else {
        return SupplierInfo {
            company: normalize(&text),
            country: None,
            code: None,
        };
    };

    let code = code_match.as_str().to_string();
    let prefix = &text[..code_match.start()];
    let suffix = &text[code_match.end()..];

    let mut country = None;
    let group = COUNTRY_CODE_RE
        .captures_iter(prefix)
        .last()
        .and_then(|caps| caps.get(1));
    let company_raw = match group {
        Some(group) => {
            country = Some(group.as_str().to_string());
            format!("{}{}{}", &prefix[..group.start()], &prefix[group.end()..], suffix)
        }
        None => format!("{prefix}{suffix}"),
    };

    SupplierInfo {
        company: normalize(company_raw.trim().trim_end_matches([',', '-', ' '])),
        country,
        code: Some(code),
    }
}
