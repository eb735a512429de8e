// ==========================================
// 库存销量整合系统 - 汇总 API
// ==========================================
// 职责: 一次完整的汇总尝试（加载两张报表 → 引擎流水线 → 展示视图 + 导出）
// 红线: 任何失败都转为错误横幅，不返回部分结果
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::PipelineConfig;
use crate::domain::inventory::SummaryRow;
use crate::engine::{PipelineStats, SummaryOrchestrator};
use crate::i18n::{t_in, t_with_args_in};
use crate::importer::{BlockingReportLoader, ReportLoader, Upload};
use crate::presenter::{self, build_styled_view, summary_headers, StyledRow};
use chrono::{DateTime, Utc};
use futures::future::try_join;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument, Span};
use uuid::Uuid;

// ==========================================
// Banner - 结果横幅
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Banner {
    Success(String),
    Error(String),
}

impl Banner {
    pub fn success(locale: &str) -> Self {
        Banner::Success(t_in(locale, "banner.success"))
    }

    /// 根据错误生成横幅（文件无法读取时使用单独的提示）
    pub fn from_error(err: &ApiError, locale: &str) -> Self {
        let reason = err.to_string();
        let key = if err.is_load_failure() {
            "banner.load_failed"
        } else {
            "banner.error"
        };
        Banner::Error(t_with_args_in(locale, key, &[("reason", reason.as_str())]))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Banner::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Banner::Success(msg) | Banner::Error(msg) => msg,
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// ==========================================
// SummaryReport - 成功时的完整结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    /// 列名（按配置语言，终端表格与导出共用）
    pub headers: Vec<String>,
    /// 排序后的汇总行（不带样式，与导出内容一致）
    pub rows: Vec<SummaryRow>,
    /// 带样式的展示视图
    pub view: Vec<StyledRow>,
    pub stats: PipelineStats,
    pub growth_factor: f64,
    pub generated_at: DateTime<Utc>,
    pub export_file_name: String,
    #[serde(skip)]
    pub export_bytes: Vec<u8>,
}

impl SummaryReport {
    /// 将导出文件写入目录
    pub fn save_export(&self, dir: &Path) -> ApiResult<PathBuf> {
        Ok(presenter::save_buffer(
            &self.export_bytes,
            dir,
            &self.export_file_name,
        )?)
    }

    /// 展示视图的 JSON 形式
    pub fn view_json(&self) -> ApiResult<String> {
        Ok(presenter::to_json(&self.view)?)
    }
}

// ==========================================
// SummaryOutcome - 一次运行的结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub run_id: String,
    pub banner: Banner,
    /// 仅成功时存在
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<SummaryReport>,
}

impl SummaryOutcome {
    fn failed(run_id: String, err: &ApiError, locale: &str) -> Self {
        error!(run_id = %run_id, error = %err, load_failure = err.is_load_failure(), "汇总失败");
        Self {
            run_id,
            banner: Banner::from_error(err, locale),
            report: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.banner.is_success()
    }
}

// ==========================================
// SummaryApi - 汇总 API
// ==========================================
pub struct SummaryApi {
    orchestrator: SummaryOrchestrator,
    loader: Arc<dyn ReportLoader>,
}

impl SummaryApi {
    /// 创建汇总 API（配置在此校验）
    pub fn new(config: PipelineConfig) -> ApiResult<Self> {
        Self::with_loader(config, Arc::new(BlockingReportLoader))
    }

    /// 使用指定的报表加载器创建
    pub fn with_loader(config: PipelineConfig, loader: Arc<dyn ReportLoader>) -> ApiResult<Self> {
        Ok(Self {
            orchestrator: SummaryOrchestrator::new(config)?,
            loader,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        self.orchestrator.config()
    }

    /// 运行一次汇总
    ///
    /// # 参数
    /// - inventory: 补货建议表（含 FBA 库存/在途）
    /// - sales: 产品表现表（含 30 天销量）
    ///
    /// # 返回
    /// 总是返回结果横幅；仅成功时携带报告
    #[instrument(
        skip_all,
        fields(
            run_id = tracing::field::Empty,
            inventory = %inventory.file_name,
            sales = %sales.file_name
        )
    )]
    pub async fn run(&self, inventory: Upload, sales: Upload) -> SummaryOutcome {
        let run_id = Uuid::new_v4().to_string();
        Span::current().record("run_id", run_id.as_str());
        let locale = self.config().locale.as_str();

        match self.try_run(inventory, sales).await {
            Ok(report) => {
                info!(
                    rows = report.rows.len(),
                    high_risk_rows = report.stats.high_risk_rows,
                    "汇总完成"
                );
                SummaryOutcome {
                    run_id,
                    banner: Banner::success(locale),
                    report: Some(report),
                }
            }
            Err(e) => SummaryOutcome::failed(run_id, &e, locale),
        }
    }

    /// 从磁盘读取两张报表后运行
    pub async fn run_files(&self, inventory_path: &Path, sales_path: &Path) -> SummaryOutcome {
        let uploads = Upload::from_path(inventory_path)
            .and_then(|inventory| Ok((inventory, Upload::from_path(sales_path)?)));

        match uploads {
            Ok((inventory, sales)) => self.run(inventory, sales).await,
            Err(e) => SummaryOutcome::failed(
                Uuid::new_v4().to_string(),
                &ApiError::from(e),
                &self.config().locale,
            ),
        }
    }

    /// 运行一次汇总，错误原样返回
    pub async fn try_run(&self, inventory: Upload, sales: Upload) -> ApiResult<SummaryReport> {
        // 两张报表互不依赖，并发加载
        let (stock_table, sales_table) =
            try_join(self.loader.load(inventory), self.loader.load(sales)).await?;

        let result = self.orchestrator.run(&stock_table, &sales_table)?;
        let config = self.orchestrator.config();

        let headers = summary_headers(&config.locale);
        let view = build_styled_view(&result.rows, self.orchestrator.highlight());
        let export_bytes = presenter::export_to_buffer(&headers, &result.rows)?;

        Ok(SummaryReport {
            headers,
            rows: result.rows,
            view,
            stats: result.stats,
            growth_factor: config.growth_factor.value(),
            generated_at: Utc::now(),
            export_file_name: config.export_file_name(),
            export_bytes,
        })
    }
}
