use super::put_text;
use crate::core::mutate::Mutator;
use crate::domain::extract::Extracted;
use crate::domain::model::Direction;
use crate::parsers::normalize::sanitize_numeric;
use crate::parsers::payment::parse_payment;

const PAYMENT_KEYS: &[&str] = &["결제조건", "인도조건", "결제금액조건", "payment_terms"];
const INVOICE_AMOUNT_KEYS: &[&str] = &["송품장금액", "총신고가격", "invoice_amount"];
const CURRENCY_KEYS: &[&str] = &["통화", "통화단위", "currency"];
const GROSS_WEIGHT_KEYS: &[&str] = &["총중량", "총무게", "gross_weight"];
const PACKAGE_COUNT_KEYS: &[&str] = &["총포장개수", "포장개수", "package_count"];
const PACKAGE_UNIT_KEYS: &[&str] = &["포장단위", "package_unit"];
const NATURE_KEYS: &[&str] = &["거래구분", "거래형태", "transaction_type"];

pub fn apply(m: &mut Mutator, data: &Extracted, direction: Direction) {
    let root = m.root();

    // 신고서 구분
    put_text(m, root, "TypeCode", Some(direction.type_code()));

    let payment = data
        .text(PAYMENT_KEYS)
        .map(|s| parse_payment(&s))
        .unwrap_or_default();

    // 송품장 금액: 전용 필드 우선, 없으면 결제조건에서 끌어온다
    let amount = data
        .text(INVOICE_AMOUNT_KEYS)
        .and_then(|s| sanitize_numeric(&s))
        .or_else(|| payment.amount.clone());
    if let Some(node) = put_text(m, root, "InvoiceAmount", amount.as_deref()) {
        let currency = data.text(CURRENCY_KEYS).or_else(|| payment.currency.clone());
        if let Some(currency) = currency {
            m.set_attr(node, "currencyID", &currency);
        }
    }

    let gross = data
        .text(GROSS_WEIGHT_KEYS)
        .and_then(|s| sanitize_numeric(&s));
    if let Some(node) = put_text(m, root, "TotalGrossMassMeasure", gross.as_deref()) {
        m.set_attr(node, "unitCode", "KGM");
    }

    let packages = data
        .text(PACKAGE_COUNT_KEYS)
        .and_then(|s| sanitize_numeric(&s));
    if let Some(node) = put_text(m, root, "TotalPackageQuantity", packages.as_deref()) {
        let unit = data.text(PACKAGE_UNIT_KEYS).unwrap_or_else(|| "GT".to_string());
        m.set_attr(node, "unitCode", &unit);
    }

    put_text(
        m,
        root,
        "TransactionNatureCode",
        data.text(NATURE_KEYS).as_deref(),
    );

    tracing::debug!("Totals mapped (invoice amount present: {})", amount.is_some());
}
