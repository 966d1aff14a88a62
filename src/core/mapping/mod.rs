use crate::core::mutate::Mutator;
use crate::core::tree::NodeId;
use crate::domain::extract::Extracted;
use crate::domain::model::Direction;
use crate::utils::error::Result;

pub mod items;
pub mod parties;
pub mod totals;
pub mod transport;

/// 고정된 규칙 시퀀스. 그룹 간 실행 순서는 결과에 영향이 없고(최종 순서는
/// 변이기의 순서 맵이 결정), 품목 규칙만 입력 형상 오류로 실패할 수 있다.
pub fn apply_all(m: &mut Mutator, data: &Extracted, direction: Direction) -> Result<()> {
    totals::apply(m, data, direction);
    transport::apply(m, data);
    parties::apply(m, data, direction);
    items::apply(m, data)?;
    Ok(())
}

/// ensure + set_text 묶음: 값이 없으면 노드 자체를 만들지 않는다.
pub(crate) fn put_text(
    m: &mut Mutator,
    parent: NodeId,
    name: &str,
    value: Option<&str>,
) -> Option<NodeId> {
    let value = value?;
    let node = m.ensure_child(parent, name);
    m.set_text(node, value).then_some(node)
}
