use super::put_text;
use crate::core::mutate::Mutator;
use crate::core::tree::NodeId;
use crate::domain::extract::Extracted;
use crate::domain::model::{GoodsItem, Origin};
use crate::parsers::normalize::sanitize_numeric;
use crate::parsers::origin::parse_origin;
use crate::parsers::quantity::parse_quantity;
use crate::utils::error::Result;

const ITEMS_KEYS: &[&str] = &["품목별_결과", "품목결과", "items"];
const ORIGIN_KEYS: &[&str] = &["원산지", "원산지정보", "origin"];
const DESCRIPTION_KEYS: &[&str] = &["거래품명", "품명", "trade_item_name"];
const MODEL_KEYS: &[&str] = &["모델규격", "규격", "model_spec"];
const HS_KEYS: &[&str] = &["세번부호", "HS부호", "hs_code"];
const QUANTITY_KEYS: &[&str] = &["수량", "quantity"];
const UNIT_PRICE_KEYS: &[&str] = &["단가", "unit_price"];
const AMOUNT_KEYS: &[&str] = &["금액", "신고가격", "amount"];
const NET_WEIGHT_KEYS: &[&str] = &["순중량", "net_weight"];
const PACKAGE_KEYS: &[&str] = &["포장개수", "포장수량", "packages"];

const ITEM_ELEMENT: &str = "GovernmentAgencyGoodsItem";

pub fn apply(m: &mut Mutator, data: &Extracted) -> Result<()> {
    let entries = data.list(ITEMS_KEYS)?;

    let root = m.root();
    let gs = m.ensure_child(root, "GoodsShipment");
    // 증분 수정이 아니라 전체 재구성: 기존 품목(서식 자리표시자 포함)을 전부
    // 걷어내고 다시 만든다. 반복 실행 멱등성은 여기서 나온다.
    m.remove_children_named(gs, ITEM_ELEMENT);

    if entries.is_empty() {
        return Ok(());
    }

    // 문서 수준 원산지: 품목에 원산지가 없을 때의 대체값
    let header_origin = data
        .raw(ORIGIN_KEYS)
        .map(parse_origin)
        .filter(|o| !o.is_empty());

    let count = m.ensure_child(root, "GoodsItemQuantity");
    m.set_text(count, &entries.len().to_string());

    for (index, entry) in entries.iter().enumerate() {
        let item = build_item(entry, &header_origin);
        let node = m.create_child(gs, ITEM_ELEMENT);
        emit_item(m, node, index + 1, &item);
    }

    tracing::debug!("Mapped {} goods items", entries.len());
    Ok(())
}

fn build_item(entry: &Extracted, header_origin: &Option<Origin>) -> GoodsItem {
    // 란별 품명은 거래품명 우선, 없으면 모델·규격 텍스트
    let description = entry
        .text(DESCRIPTION_KEYS)
        .or_else(|| entry.text(MODEL_KEYS));
    let hs_code = entry.text(HS_KEYS).and_then(|s| format_hs_code(&s));
    let quantity = entry
        .text(QUANTITY_KEYS)
        .map(|s| parse_quantity(&s))
        .unwrap_or_default();
    let origin = entry
        .raw(ORIGIN_KEYS)
        .map(parse_origin)
        .filter(|o| !o.is_empty())
        .or_else(|| header_origin.clone());

    GoodsItem {
        description,
        hs_code,
        quantity,
        unit_price: entry.text(UNIT_PRICE_KEYS).and_then(|s| sanitize_numeric(&s)),
        amount: entry.text(AMOUNT_KEYS).and_then(|s| sanitize_numeric(&s)),
        net_weight: entry.text(NET_WEIGHT_KEYS).and_then(|s| sanitize_numeric(&s)),
        package_count: entry.text(PACKAGE_KEYS).and_then(|s| sanitize_numeric(&s)),
        origin,
    }
}

/// HS 부호: 숫자만 남기고 10자리로 자른다.
fn format_hs_code(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.chars().take(10).collect())
}

fn emit_item(m: &mut Mutator, node: NodeId, sequence: usize, item: &GoodsItem) {
    let seq = m.ensure_child(node, "SequenceNumeric");
    m.set_text(seq, &sequence.to_string());

    let commodity = m.ensure_child(node, "Commodity");
    put_text(m, commodity, "Description", item.description.as_deref());

    if item.hs_code.is_some() {
        let classification = m.ensure_child(commodity, "Classification");
        put_text(m, classification, "ID", item.hs_code.as_deref());
    }

    if !item.quantity.is_empty() || item.net_weight.is_some() {
        let measure = m.ensure_child(commodity, "GoodsMeasure");
        if let Some(node) = put_text(m, measure, "TariffQuantity", item.quantity.value.as_deref())
        {
            if let Some(unit) = &item.quantity.unit {
                m.set_attr(node, "unitCode", unit);
            }
        }
        if let Some(node) = put_text(
            m,
            measure,
            "NetNetWeightMeasure",
            item.net_weight.as_deref(),
        ) {
            m.set_attr(node, "unitCode", "KGM");
        }
    }

    if item.unit_price.is_some() || item.amount.is_some() {
        let line = m.ensure_child(commodity, "InvoiceLine");
        put_text(m, line, "UnitPriceAmount", item.unit_price.as_deref());
        put_text(m, line, "ItemChargeAmount", item.amount.as_deref());
    }

    if let Some(origin) = &item.origin {
        let node = m.ensure_child(node, "Origin");
        put_text(m, node, "CountryCode", origin.country.as_deref());
        put_text(m, node, "RuleCode", origin.rule.as_deref());
        put_text(m, node, "DisplayCode", origin.display.as_deref());
        put_text(m, node, "FtaIssuanceCode", origin.fta_issuance.as_deref());
        put_text(m, node, "AgreementName", origin.agreement_name.as_deref());
    }

    if item.package_count.is_some() {
        let packaging = m.ensure_child(node, "Packaging");
        put_text(m, packaging, "QuantityQuantity", item.package_count.as_deref());
    }
}
