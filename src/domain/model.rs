use serde::{Deserialize, Serialize};

/// 신고 방향: 어느 정부 서식 템플릿을 쓸지 결정하는 유일한 외부 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Import,
    Export,
}

impl Direction {
    pub fn type_code(self) -> &'static str {
        match self {
            Direction::Import => "IM",
            Direction::Export => "EX",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Party {
    pub company: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub person: Option<String>,
}

impl Party {
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.address.is_none()
            && self.postcode.is_none()
            && self.person.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Origin {
    pub country: Option<String>,
    pub rule: Option<String>,
    pub display: Option<String>,
    pub fta_issuance: Option<String>,
    pub agreement_name: Option<String>,
}

impl Origin {
    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.rule.is_none()
            && self.display.is_none()
            && self.fta_issuance.is_none()
            && self.agreement_name.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payment {
    pub incoterm: Option<String>,
    pub currency: Option<String>,
    pub amount: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportMode {
    pub type_code: Option<String>,
    pub characteristic_code: Option<String>,
}

impl TransportMode {
    pub fn is_empty(&self) -> bool {
        self.type_code.is_none() && self.characteristic_code.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Quantity {
    pub value: Option<String>,
    pub unit: Option<String>,
}

impl Quantity {
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplierInfo {
    pub company: Option<String>,
    pub country: Option<String>,
    pub code: Option<String>,
}

impl SupplierInfo {
    pub fn is_empty(&self) -> bool {
        self.company.is_none() && self.country.is_none() && self.code.is_none()
    }
}

/// 품목별_결과 한 건에서 뽑아낸 품목 레코드. 모든 항목이 개별적으로 선택적이다.
#[derive(Debug, Clone, Default)]
pub struct GoodsItem {
    pub description: Option<String>,
    pub hs_code: Option<String>,
    pub quantity: Quantity,
    pub unit_price: Option<String>,
    pub amount: Option<String>,
    pub net_weight: Option<String>,
    pub package_count: Option<String>,
    pub origin: Option<Origin>,
}
