use anyhow::Context;
use clap::Parser;
use kcs_decl_xml::utils::logger;
use kcs_decl_xml::{CliConfig, DeclarationEngine};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting kcs-decl-xml CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config) {
        tracing::error!("❌ Declaration conversion failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&config.input)
        .with_context(|| format!("입력 파일을 읽을 수 없음: {}", config.input))?;
    let input: serde_json::Value =
        serde_json::from_str(&raw).context("입력이 올바른 JSON이 아님")?;

    let engine = DeclarationEngine::new(config.direction);
    let xml = engine.transform(&input)?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, &xml)
                .with_context(|| format!("출력 파일을 쓸 수 없음: {}", path))?;
            tracing::info!("✅ Declaration XML written");
            println!("✅ Declaration XML written");
            println!("📁 Output saved to: {}", path);
        }
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&xml).context("표준 출력 쓰기 실패")?;
        }
    }

    Ok(())
}
