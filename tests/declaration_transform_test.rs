use anyhow::Result;
use kcs_decl_xml::core::tree::XmlTree;
use kcs_decl_xml::{DeclarationEngine, Direction};
use serde_json::json;
use tempfile::TempDir;

fn full_import_input() -> serde_json::Value {
    json!({
        "신고인": "XYZ Forwarding, Seoul",
        "수입자": "한빛무역, 서울특별시 강남구 테헤란로 123, 06234, 박영희",
        "구매자": "A Co., Ltd., 123 Main St, Busan 48058, Kim Chulsoo",
        "해외거래처": "Globex GmbH DE DEX9912345",
        "결제조건": "FOB, USD, 52,300, T/T",
        "총중량": "1,250.5 KG",
        "총포장개수": "35",
        "거래구분": "11",
        "선기명": "HMM ALGECIRAS",
        "선기국적": "KR",
        "운송수단코드": "10FC",
        "하우스BL번호": "HBLKR2024001",
        "마스터BL번호": "MBLKR2024777",
        "도착국": "대한민국, KR",
        "적출국": "미국, US",
        "원산지": "USABY",
        "품목별_결과": [
            {
                "거래품명": "LCD PANEL",
                "세번부호": "8528.72-1000",
                "수량": "1,000 EA",
                "단가": "12.5",
                "금액": "12,500",
                "순중량": "850.5",
                "포장개수": "10"
            },
            {
                "거래품명": "CABLE ASSY",
                "세번부호": "8544.42-9090",
                "원산지": "CNBNN"
            }
        ]
    })
}

/// 전체 수입 신고 입력을 한 번에 돌려 주요 필드가 모두 반영되는지 본다
#[test]
fn test_full_import_declaration() -> Result<()> {
    let engine = DeclarationEngine::new(Direction::Import);
    let xml = String::from_utf8(engine.transform(&full_import_input())?)?;

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("urn:kcs:datamodel:standards:ImportDeclaration:2"));
    assert!(xml.contains("<TypeCode>IM</TypeCode>"));

    // 총괄
    assert!(xml.contains("<InvoiceAmount currencyID=\"USD\">52300</InvoiceAmount>"));
    assert!(xml.contains("<TotalGrossMassMeasure unitCode=\"KGM\">1250.5</TotalGrossMassMeasure>"));
    assert!(xml.contains("<TotalPackageQuantity unitCode=\"GT\">35</TotalPackageQuantity>"));
    assert!(xml.contains("<TransactionNatureCode>11</TransactionNatureCode>"));

    // 당사자
    assert!(xml.contains("<Name>XYZ Forwarding</Name>"));
    assert!(xml.contains("<Name>한빛무역</Name>"));
    assert!(xml.contains("<Name>A Co., Ltd.</Name>"));
    assert!(xml.contains("<PostcodeID>48058</PostcodeID>"));
    assert!(xml.contains("<Name>Kim Chulsoo</Name>"));
    assert!(xml.contains("<Name>Globex GmbH</Name>"));
    assert!(xml.contains("<ID>DEX9912345</ID>"));

    // 운송
    assert!(xml.contains("<Name>HMM ALGECIRAS</Name>"));
    assert!(xml.contains("<RegistrationNationalityCode>KR</RegistrationNationalityCode>"));
    assert!(xml.contains("<ID>HBLKR2024001</ID>"));
    assert!(xml.contains("<TypeCode>714</TypeCode>"));
    assert!(xml.contains("<ID>MBLKR2024777</ID>"));
    assert!(xml.contains("<TypeCode>704</TypeCode>"));
    assert!(xml.contains("<CountryCode>KR</CountryCode>"));
    assert!(xml.contains("<ID>US</ID>"));

    // 품목
    assert!(xml.contains("<GoodsItemQuantity>2</GoodsItemQuantity>"));
    assert!(xml.contains("<SequenceNumeric>1</SequenceNumeric>"));
    assert!(xml.contains("<SequenceNumeric>2</SequenceNumeric>"));
    assert!(xml.contains("<Description>LCD PANEL</Description>"));
    assert!(xml.contains("<ID>8528721000</ID>"));
    assert!(xml.contains("<TariffQuantity unitCode=\"EA\">1000</TariffQuantity>"));
    assert!(xml.contains("<NetNetWeightMeasure unitCode=\"KGM\">850.5</NetNetWeightMeasure>"));
    assert!(xml.contains("<UnitPriceAmount>12.5</UnitPriceAmount>"));
    assert!(xml.contains("<ItemChargeAmount>12500</ItemChargeAmount>"));
    assert!(xml.contains("<QuantityQuantity>10</QuantityQuantity>"));

    // 원산지: 2번 품목은 자체 값, 1번 품목은 문서 수준 대체값
    assert!(xml.contains("<CountryCode>US</CountryCode>"));
    assert!(xml.contains("<CountryCode>CN</CountryCode>"));
    Ok(())
}

/// 같은 입력으로 두 번 변환하면 바이트 단위로 같은 결과가 나와야 한다
#[test]
fn test_transform_idempotent_across_runs() -> Result<()> {
    let engine = DeclarationEngine::new(Direction::Import);
    let input = full_import_input();
    assert_eq!(engine.transform(&input)?, engine.transform(&input)?);
    Ok(())
}

/// 출력 형제 순서는 입력 키 순서가 아니라 서식 순서를 따라야 한다
#[test]
fn test_sibling_order_follows_template() -> Result<()> {
    let engine = DeclarationEngine::new(Direction::Import);
    let xml = String::from_utf8(engine.transform(&json!({
        "판매자상호": "Last Seller",
        "총중량": "500",
        "송품장금액": "100",
        "구매자상호": "First Buyer"
    }))?)?;

    let invoice = xml.find("<InvoiceAmount").unwrap();
    let gross = xml.find("<TotalGrossMassMeasure").unwrap();
    let buyer = xml.find("<Buyer>").unwrap();
    let seller = xml.find("<Seller>").unwrap();
    assert!(invoice < gross);
    assert!(gross < buyer);
    assert!(buyer < seller);
    Ok(())
}

/// 기재하지 않은 필드의 서식 가지는 출력에 남지 않아야 한다
#[test]
fn test_unwritten_branches_are_pruned() -> Result<()> {
    let engine = DeclarationEngine::new(Direction::Import);
    let xml = String::from_utf8(engine.transform(&json!({ "총중량": "500" }))?)?;

    assert!(xml.contains("TotalGrossMassMeasure"));
    assert!(!xml.contains("GoodsShipment"));
    assert!(!xml.contains("Buyer"));
    assert!(!xml.contains("BorderTransportMeans"));
    // 빈 요소가 한 개도 없어야 한다 (루트 구분부호 제외 전부 값 보유)
    assert!(!xml.contains("/>"));
    Ok(())
}

/// 기재불가 표시어만 있는 입력은 구분부호 외에 아무것도 만들지 않는다
#[test]
fn test_sentinel_only_input_yields_minimal_document() -> Result<()> {
    let engine = DeclarationEngine::new(Direction::Export);
    let xml = String::from_utf8(engine.transform(&json!({
        "총중량": "미기재",
        "선기명": "미상",
        "구매자": "해당없음"
    }))?)?;

    assert!(xml.contains("<TypeCode>EX</TypeCode>"));
    assert!(!xml.contains("TotalGrossMassMeasure"));
    assert!(!xml.contains("Buyer"));
    Ok(())
}

/// 신고인이 수출자를 겸하면 수출자 블록에 구분부호 2가 기록된다
#[test]
fn test_agent_doubles_as_exporter() -> Result<()> {
    let engine = DeclarationEngine::new(Direction::Export);
    let xml = String::from_utf8(engine.transform(&json!({
        "신고인": "XYZ Forwarding, Seoul"
    }))?)?;

    assert!(xml.contains("<Agent>"));
    assert!(xml.contains("<Exporter>"));
    assert!(xml.contains("<TypeCode>2</TypeCode>"));
    Ok(())
}

/// 파일로 내려쓴 출력이 다시 파싱 가능한 단일 루트 문서여야 한다
#[test]
fn test_output_file_is_well_formed() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("declaration.xml");

    let engine = DeclarationEngine::new(Direction::Import);
    std::fs::write(&path, engine.transform(&full_import_input())?)?;

    let raw = std::fs::read_to_string(&path)?;
    let tree = XmlTree::parse(&raw)?;
    assert_eq!(tree.name(tree.root()), "Declaration");
    assert_eq!(
        tree.attr(tree.root(), "xmlns"),
        Some("urn:kcs:datamodel:standards:ImportDeclaration:2")
    );
    Ok(())
}

/// 품목 목록 자리에 스칼라가 오면 변환 전체가 실패해야 한다
#[test]
fn test_malformed_items_field_fails() {
    let engine = DeclarationEngine::new(Direction::Import);
    let result = engine.transform(&json!({ "품목별_결과": "스칼라 값" }));
    assert!(result.is_err());
}
