use crate::domain::model::Payment;
use crate::parsers::normalize::{normalize, sanitize_numeric};

/// 결제조건 문자열: "인도조건, 통화, 금액…, 결제방법". 금액이 천단위 쉼표로
/// 쪼개져 들어오므로 가운데 토큰들은 구분자 없이 이어붙인 뒤 숫자만 남긴다.
pub fn parse_payment(raw: &str) -> Payment {
    let tokens: Vec<String> = raw.split(',').filter_map(normalize).collect();
    if tokens.is_empty() {
        return Payment::default();
    }

    let incoterm = Some(tokens[0].clone());
    let currency = tokens.get(1).cloned();
    let (amount, method) = if tokens.len() >= 3 {
        let middle = tokens[2..tokens.len() - 1].concat();
        (sanitize_numeric(&middle), Some(tokens[tokens.len() - 1].clone()))
    } else {
        (None, None)
    };

    Payment {
        incoterm,
        currency,
        amount,
        method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_terms_with_split_thousands() {
        let payment = parse_payment("FOB, USD, 1,234.56, T/T");
        assert_eq!(payment.incoterm.as_deref(), Some("FOB"));
        assert_eq!(payment.currency.as_deref(), Some("USD"));
        assert_eq!(payment.amount.as_deref(), Some("1234.56"));
        assert_eq!(payment.method.as_deref(), Some("T/T"));
    }

    #[test]
    fn test_three_tokens_has_no_amount() {
        let payment = parse_payment("CIF, EUR, L/C");
        assert_eq!(payment.incoterm.as_deref(), Some("CIF"));
        assert_eq!(payment.currency.as_deref(), Some("EUR"));
        assert_eq!(payment.amount, None);
        assert_eq!(payment.method.as_deref(), Some("L/C"));
    }

    #[test]
    fn test_incoterm_only() {
        let payment = parse_payment("EXW");
        assert_eq!(payment.incoterm.as_deref(), Some("EXW"));
        assert_eq!(payment.currency, None);
        assert_eq!(payment.method, None);
    }

    #[test]
    fn test_all_sentinels() {
        assert!(parse_payment("미기재, -, 미상").incoterm.is_none());
    }
}
