use crate::core::mapping;
use crate::core::mutate::Mutator;
use crate::core::template::Template;
use crate::domain::extract::Extracted;
use crate::domain::model::Direction;
use crate::utils::error::Result;

/// 신고서 변환 엔진: JSON 입력 → 서식 변이 → 가지치기 → XML 직렬화
pub struct DeclarationEngine {
    direction: Direction,
}

impl DeclarationEngine {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn transform(&self, input: &serde_json::Value) -> Result<Vec<u8>> {
        let data = Extracted::from_value(input)?;

        tracing::info!("Loading {:?} declaration template", self.direction);
        let template = Template::load(self.direction)?;
        let mut mutator = Mutator::new(template);

        tracing::info!("Applying mapping rules");
        mapping::apply_all(&mut mutator, &data, self.direction)?;

        tracing::debug!("Pruning unwritten template branches");
        mutator.prune();

        let xml = mutator.into_tree().serialize()?;
        tracing::info!("Serialized declaration XML ({} bytes)", xml.len());
        Ok(xml)
    }
}
