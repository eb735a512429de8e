// ==========================================
// 库存销量整合系统 - 展示层
// ==========================================
// 职责: 汇总结果的展示视图、终端表格与 Excel 导出
// ==========================================

pub mod error;
pub mod styled_view;
pub mod table_view;
pub mod xlsx_export;

pub use error::{PresentError, PresentResult};
pub use styled_view::{build_styled_view, summary_headers, to_json, StyledRow};
pub use table_view::{print_table, render_table};
pub use xlsx_export::{build_workbook, export_to_buffer, export_to_dir, save_buffer};
