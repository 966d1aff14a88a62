use super::put_text;
use crate::core::mutate::Mutator;
use crate::domain::extract::Extracted;
use crate::domain::model::{Direction, Party};
use crate::parsers::party::{parse_party, parse_supplier};

struct PartyAliases {
    name: &'static [&'static str],
    address: &'static [&'static str],
    postcode: &'static [&'static str],
    person: &'static [&'static str],
    free_text: &'static [&'static str],
}

const BUYER: PartyAliases = PartyAliases {
    name: &["구매자상호", "buyer_name"],
    address: &["구매자주소", "buyer_address"],
    postcode: &["구매자우편번호"],
    person: &["구매자담당자"],
    free_text: &["구매자", "buyer"],
};

const EXPORTER: PartyAliases = PartyAliases {
    name: &["수출자상호", "수출대행자상호", "exporter_name"],
    address: &["수출자주소"],
    postcode: &["수출자우편번호"],
    person: &["수출자담당자"],
    free_text: &["수출자", "수출대행자", "exporter"],
};

const IMPORTER: PartyAliases = PartyAliases {
    name: &["수입자상호", "importer_name"],
    address: &["수입자주소"],
    postcode: &["수입자우편번호"],
    person: &["수입자담당자"],
    free_text: &["수입자", "importer"],
};

const SELLER: PartyAliases = PartyAliases {
    name: &["판매자상호", "seller_name"],
    address: &["판매자주소"],
    postcode: &["판매자우편번호"],
    person: &["판매자담당자"],
    free_text: &["판매자", "seller"],
};

const AGENT_KEYS: &[&str] = &["신고인", "관세사", "신고대리인", "agent"];
const PAYER_NAME_KEYS: &[&str] = &["납세의무자상호", "payer_name"];
const PAYER_FREE_KEYS: &[&str] = &["납세의무자", "payer"];
const SUPPLIER_KEYS: &[&str] = &["해외거래처", "해외공급자", "supplier"];

// 신고인이 수출자 역할을 겸하는 경우의 구분부호
const AGENT_AS_EXPORTER_ROLE: &str = "2";

pub fn apply(m: &mut Mutator, data: &Extracted, direction: Direction) {
    let root = m.root();

    let agent = data
        .text(AGENT_KEYS)
        .map(|s| parse_party(&s))
        .unwrap_or_default();

    // 신고인은 상호만 출력한다
    if let Some(company) = &agent.company {
        let node = m.ensure_child(root, "Agent");
        put_text(m, node, "Name", Some(company));
    }

    let buyer = resolve_party(data, &BUYER);
    emit_party(m, "Buyer", &buyer);

    // 수출자: 명시 필드 → 자유 서식 파싱 → 신고인 대행 (구분부호 기록)
    let mut exporter = resolve_party(data, &EXPORTER);
    let mut exporter_from_agent = false;
    if exporter.is_empty() {
        if let Some(company) = agent.company.clone() {
            exporter.company = Some(company);
            exporter_from_agent = true;
        }
    }
    emit_party(m, "Exporter", &exporter);
    if exporter_from_agent {
        let node = m.ensure_child(root, "Exporter");
        put_text(m, node, "TypeCode", Some(AGENT_AS_EXPORTER_ROLE));
    }

    let importer = resolve_party(data, &IMPORTER);
    emit_party(m, "Importer", &importer);

    let seller = resolve_party(data, &SELLER);
    emit_party(m, "Seller", &seller);

    // 해외거래처: 수입은 판매자, 수출은 구매자 블록에 얹는다
    let supplier = data
        .text(SUPPLIER_KEYS)
        .map(|s| parse_supplier(&s))
        .unwrap_or_default();
    if !supplier.is_empty() {
        let (element, own_company) = match direction {
            Direction::Import => ("Seller", seller.company.as_deref()),
            Direction::Export => ("Buyer", buyer.company.as_deref()),
        };
        let node = m.ensure_child(root, element);
        if own_company.is_none() {
            put_text(m, node, "Name", supplier.company.as_deref());
        }
        put_text(m, node, "ID", supplier.code.as_deref());
        put_text(m, node, "CountryCode", supplier.country.as_deref());
    }

    // 납세의무자: 명시 필드 → 자유 서식 → (수입) 수입자 상호
    let payer_name = data
        .text(PAYER_NAME_KEYS)
        .or_else(|| {
            data.text(PAYER_FREE_KEYS)
                .map(|s| parse_party(&s))
                .and_then(|p| p.company)
        })
        .or_else(|| match direction {
            Direction::Import => importer.company.clone(),
            Direction::Export => None,
        });
    if let Some(name) = payer_name {
        let node = m.ensure_child(root, "Payer");
        put_text(m, node, "Name", Some(&name));
    }

    tracing::debug!(
        "Parties mapped (exporter from agent: {})",
        exporter_from_agent
    );
}

fn resolve_party(data: &Extracted, aliases: &PartyAliases) -> Party {
    let structured = Party {
        company: data.text(aliases.name),
        address: data.text(aliases.address),
        postcode: data.text(aliases.postcode),
        person: data.text(aliases.person),
    };
    if !structured.is_empty() {
        return structured;
    }
    data.text(aliases.free_text)
        .map(|s| parse_party(&s))
        .unwrap_or_default()
}

fn emit_party(m: &mut Mutator, element: &str, party: &Party) {
    if party.is_empty() {
        return;
    }
    let root = m.root();
    let node = m.ensure_child(root, element);
    put_text(m, node, "Name", party.company.as_deref());
    if party.address.is_some() || party.postcode.is_some() {
        let address = m.ensure_child(node, "Address");
        put_text(m, address, "Line", party.address.as_deref());
        put_text(m, address, "PostcodeID", party.postcode.as_deref());
    }
    if party.person.is_some() {
        let contact = m.ensure_child(node, "Contact");
        put_text(m, contact, "Name", party.person.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::template::Template;
    use crate::core::tree::XmlTree;
    use serde_json::json;

    fn run(input: serde_json::Value, direction: Direction) -> XmlTree {
        let mut m = Mutator::new(Template::load(direction).unwrap());
        let data = Extracted::from_value(&input).unwrap();
        apply(&mut m, &data, direction);
        m.prune();
        m.into_tree()
    }

    fn child_text<'a>(tree: &'a XmlTree, path: &[&str]) -> Option<&'a str> {
        let mut node = tree.root();
        for name in path {
            node = tree.find_child(node, name)?;
        }
        tree.text(node)
    }

    #[test]
    fn test_buyer_free_text_parse() {
        let tree = run(
            json!({ "구매자": "A Co., Ltd., 123 Main St, Busan 48058, Kim Chulsoo" }),
            Direction::Import,
        );
        assert_eq!(child_text(&tree, &["Buyer", "Name"]), Some("A Co., Ltd."));
        assert_eq!(
            child_text(&tree, &["Buyer", "Address", "PostcodeID"]),
            Some("48058")
        );
        assert_eq!(
            child_text(&tree, &["Buyer", "Contact", "Name"]),
            Some("Kim Chulsoo")
        );
    }

    #[test]
    fn test_agent_block_carries_name_only() {
        let tree = run(
            json!({ "신고인": "한국관세법인, 서울" }),
            Direction::Import,
        );
        let agent = tree.find_child(tree.root(), "Agent").unwrap();
        let names: Vec<&str> = tree.children(agent).iter().map(|&c| tree.name(c)).collect();
        assert_eq!(names, vec!["Name"]);
        assert_eq!(child_text(&tree, &["Agent", "Name"]), Some("한국관세법인"));
    }

    #[test]
    fn test_structured_fields_win_over_free_text() {
        let tree = run(
            json!({
                "수입자상호": "한빛무역",
                "수입자주소": "서울특별시 강남구",
                "수입자": "무시될 문자열, Seoul"
            }),
            Direction::Import,
        );
        assert_eq!(child_text(&tree, &["Importer", "Name"]), Some("한빛무역"));
        assert_eq!(
            child_text(&tree, &["Importer", "Address", "Line"]),
            Some("서울특별시 강남구")
        );
    }

    #[test]
    fn test_exporter_falls_back_to_agent() {
        let tree = run(
            json!({ "신고인": "XYZ Forwarding, Seoul" }),
            Direction::Export,
        );
        assert_eq!(
            child_text(&tree, &["Exporter", "Name"]),
            Some("XYZ Forwarding")
        );
        assert_eq!(child_text(&tree, &["Exporter", "TypeCode"]), Some("2"));
        assert_eq!(child_text(&tree, &["Agent", "Name"]), Some("XYZ Forwarding"));
    }

    #[test]
    fn test_explicit_exporter_gets_no_role_code() {
        let tree = run(
            json!({ "수출자상호": "대한수출", "신고인": "XYZ Forwarding, Seoul" }),
            Direction::Export,
        );
        assert_eq!(child_text(&tree, &["Exporter", "Name"]), Some("대한수출"));
        assert_eq!(child_text(&tree, &["Exporter", "TypeCode"]), None);
    }

    #[test]
    fn test_supplier_enriches_seller_on_import() {
        let tree = run(
            json!({ "해외거래처": "Globex GmbH DE DEX9912345" }),
            Direction::Import,
        );
        assert_eq!(child_text(&tree, &["Seller", "Name"]), Some("Globex GmbH"));
        assert_eq!(child_text(&tree, &["Seller", "ID"]), Some("DEX9912345"));
        assert_eq!(child_text(&tree, &["Seller", "CountryCode"]), Some("DE"));
    }

    #[test]
    fn test_payer_defaults_to_importer_on_import() {
        let tree = run(json!({ "수입자상호": "한빛무역" }), Direction::Import);
        assert_eq!(child_text(&tree, &["Payer", "Name"]), Some("한빛무역"));
    }

    #[test]
    fn test_payer_not_defaulted_on_export() {
        let tree = run(json!({ "수입자상호": "한빛무역" }), Direction::Export);
        assert_eq!(child_text(&tree, &["Payer", "Name"]), None);
    }
}
