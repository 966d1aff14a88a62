use super::put_text;
use crate::core::mutate::Mutator;
use crate::core::tree::NodeId;
use crate::domain::extract::Extracted;
use crate::parsers::normalize::normalize;
use crate::parsers::transport::parse_transport_mode;

const VESSEL_NAME_KEYS: &[&str] = &["선기명", "선박명", "vessel_name"];
const VESSEL_NATIONALITY_KEYS: &[&str] = &["선기국적", "선박국적", "vessel_nationality"];
const MODE_KEYS: &[&str] = &["운송수단코드", "운송수단", "transport_mode"];
const HOUSE_BL_KEYS: &[&str] = &["하우스BL번호", "HBL번호", "house_bl"];
const MASTER_BL_KEYS: &[&str] = &["마스터BL번호", "MBL번호", "master_bl"];
const DESTINATION_KEYS: &[&str] = &["도착국", "목적국", "destination"];
const EXPORT_COUNTRY_KEYS: &[&str] = &["적출국", "선적국", "export_country"];

// 운송서류 종류부호: 하우스 714, 마스터 704
const HOUSE_BL_TYPE: &str = "714";
const MASTER_BL_TYPE: &str = "704";

pub fn apply(m: &mut Mutator, data: &Extracted) {
    let root = m.root();

    // 선기명/국적
    let vessel_name = data.text(VESSEL_NAME_KEYS);
    let nationality = data.text(VESSEL_NATIONALITY_KEYS);
    if vessel_name.is_some() || nationality.is_some() {
        let btm = m.ensure_child(root, "BorderTransportMeans");
        put_text(m, btm, "Name", vessel_name.as_deref());
        put_text(
            m,
            btm,
            "RegistrationNationalityCode",
            nationality.as_deref(),
        );
    }

    // 운송수단 압축 코드 → 형태/용기 분해
    if let Some(mode) = data.text(MODE_KEYS) {
        let mode = parse_transport_mode(&mode);
        if !mode.is_empty() {
            let consignment = ensure_consignment(m);
            let btm = m.ensure_child(consignment, "BorderTransportMeans");
            put_text(m, btm, "TypeCode", mode.type_code.as_deref());
            put_text(m, btm, "CharacteristicCode", mode.characteristic_code.as_deref());
        }
    }

    // B/L 번호: 같은 종류부호가 이미 있으면 ID만 갱신 (재실행 멱등)
    if let Some(house) = data.text(HOUSE_BL_KEYS) {
        upsert_transport_document(m, &house, HOUSE_BL_TYPE);
    }
    if let Some(master) = data.text(MASTER_BL_KEYS) {
        upsert_transport_document(m, &master, MASTER_BL_TYPE);
    }

    // 도착국/적출국: "국가명, 부호" 자유 서식에서 부호만 남긴다
    if let Some(code) = data.text(DESTINATION_KEYS).and_then(|s| country_code(&s)) {
        let gs = m.ensure_child(root, "GoodsShipment");
        let destination = m.ensure_child(gs, "Destination");
        put_text(m, destination, "CountryCode", Some(&code));
    }
    if let Some(code) = data
        .text(EXPORT_COUNTRY_KEYS)
        .and_then(|s| country_code(&s))
    {
        let gs = m.ensure_child(root, "GoodsShipment");
        let export_country = m.ensure_child(gs, "ExportCountry");
        put_text(m, export_country, "ID", Some(&code));
    }
}

fn ensure_consignment(m: &mut Mutator) -> NodeId {
    let root = m.root();
    let gs = m.ensure_child(root, "GoodsShipment");
    m.ensure_child(gs, "Consignment")
}

fn upsert_transport_document(m: &mut Mutator, bl_number: &str, type_code: &str) {
    let consignment = ensure_consignment(m);

    let existing = m
        .tree()
        .children(consignment)
        .iter()
        .copied()
        .find(|&child| {
            m.tree().name(child) == "TransportContractDocument"
                && m.tree()
                    .find_child(child, "TypeCode")
                    .and_then(|t| m.tree().text(t))
                    .is_some_and(|t| t == type_code)
        });

    let document =
        existing.unwrap_or_else(|| m.create_child(consignment, "TransportContractDocument"));
    let id = m.ensure_child(document, "ID");
    m.set_text(id, bl_number);
    let ty = m.ensure_child(document, "TypeCode");
    m.set_text(ty, type_code);
}

fn country_code(raw: &str) -> Option<String> {
    let tokens: Vec<String> = raw.split(',').filter_map(normalize).collect();
    let last = tokens.last()?;
    if last.len() == 2 && last.chars().all(|c| c.is_ascii_alphabetic()) {
        return Some(last.to_uppercase());
    }
    // "United States (US)" 류: 마지막 토큰 안의 독립된 대문자 2자 조각을 찾는다
    last.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|piece| piece.len() == 2 && piece.chars().all(|c| c.is_ascii_uppercase()))
        .next_back()
        .map(|piece| piece.to_string())
}
