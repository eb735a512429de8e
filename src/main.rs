// ==========================================
// 库存销量整合系统 - 终端主入口
// ==========================================
// 用法: inventory-cover --inventory <FILE> --sales <FILE> [--growth <F>]
// 输出: 结果横幅 + 带高亮的汇总表 + Excel 报告
// ==========================================

use anyhow::Context;
use clap::Parser;
use inventory_cover::config::ConfigManager;
use inventory_cover::i18n::{self, t, t_with_args};
use inventory_cover::presenter::print_table;
use inventory_cover::{logging, GrowthFactor, JoinMode, SummaryApi};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "inventory-cover",
    version,
    about = "库存销量整合: 合并补货建议表与产品表现表，标记库销比风险项"
)]
struct Cli {
    /// 补货建议表（含 FBA 库存/在途），.xlsx/.xls/.csv
    #[arg(long, value_name = "FILE")]
    inventory: PathBuf,

    /// 产品表现表（含 30 天销量），.xlsx/.xls/.csv
    #[arg(long, value_name = "FILE")]
    sales: PathBuf,

    /// 未来 30 天预测增长系数 [0.5, 2.0]
    #[arg(long, value_name = "F")]
    growth: Option<f64>,

    /// 报告导出目录
    #[arg(long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// 以 JSON 输出结果（日志同为 JSON 行，写到 stderr）
    #[arg(long)]
    json: bool,

    /// 保留只出现在销量表中的 SKU
    #[arg(long)]
    outer_join: bool,

    /// 不写出 Excel 报告
    #[arg(long)]
    no_export: bool,

    /// 配置文件（JSON）
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// 界面语言: zh-CN | en
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.json);

    // 配置: 文件 < 命令行
    let manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    let config_source = manager.source().map(|p| p.display().to_string());
    let mut config = manager.into_config();

    if let Some(growth) = cli.growth {
        config.growth_factor = GrowthFactor::new(growth)?;
    }
    if cli.outer_join {
        config.join_mode = JoinMode::Outer;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    config.validate()?;
    i18n::set_locale(&config.locale);

    info!(
        version = inventory_cover::VERSION,
        config = config_source.as_deref().unwrap_or("<default>"),
        growth_factor = config.growth_factor.value(),
        join_mode = %config.join_mode,
        "{}",
        t("cli.title")
    );

    let api = SummaryApi::new(config)?;
    let outcome = api.run_files(&cli.inventory, &cli.sales).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome.banner);
    }

    let Some(report) = outcome.report.as_ref() else {
        return Ok(ExitCode::FAILURE);
    };

    if !cli.json {
        print_table(&report.headers, &report.view);

        let stats = &report.stats;
        let (sales_groups, stock_groups, high_risk_rows, unmatched) = (
            stats.sales_groups.to_string(),
            stats.stock_groups.to_string(),
            stats.high_risk_rows.to_string(),
            stats.unmatched_sales_keys.to_string(),
        );
        println!(
            "{}",
            t_with_args(
                "cli.stats",
                &[
                    ("sales_groups", sales_groups.as_str()),
                    ("stock_groups", stock_groups.as_str()),
                    ("high_risk_rows", high_risk_rows.as_str()),
                    ("unmatched", unmatched.as_str()),
                ],
            )
        );
    }

    if !cli.no_export {
        let path = report.save_export(&cli.output)?;
        let path = path.display().to_string();
        let message = t_with_args("cli.exported", &[("path", path.as_str())]);
        if cli.json {
            info!("{}", message);
        } else {
            println!("{}", message);
        }
    }

    Ok(ExitCode::SUCCESS)
}
