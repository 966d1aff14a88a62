use crate::domain::model::TransportMode;
use crate::parsers::normalize::normalize;

/// 운송수단 압축 코드("10FC")를 숫자 run(운송형태)과 문자 run(운송용기)으로
/// 분해한다.
pub fn parse_transport_mode(raw: &str) -> TransportMode {
    let Some(s) = normalize(raw) else {
        return TransportMode::default();
    };

    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    let letters: String = s
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_uppercase();

    TransportMode {
        type_code: (!digits.is_empty()).then_some(digits),
        characteristic_code: (!letters.is_empty()).then_some(letters),
    }
}
