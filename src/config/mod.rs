use crate::domain::model::Direction;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "kcs-decl-xml")]
#[command(about = "Converts declaration JSON into customs declaration XML")]
pub struct CliConfig {
    /// 입력 JSON 파일 경로
    #[arg(long)]
    pub input: String,

    /// 수입(import) / 수출(export) 신고 구분
    #[arg(long, value_enum)]
    pub direction: Direction,

    /// 출력 XML 파일 경로 (생략하면 표준 출력)
    #[arg(long)]
    pub output: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
