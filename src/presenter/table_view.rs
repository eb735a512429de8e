// ==========================================
// 库存销量整合系统 - 终端表格渲染
// ==========================================
// 职责: 展示视图 → comfy-table 表格，高风险行红底黄字加粗
// ==========================================

use crate::presenter::styled_view::StyledRow;
use comfy_table::{
    presets::UTF8_FULL, Attribute, Cell, CellAlignment, Color, ContentArrangement, Row as CRow,
    Table,
};

const ALERT_BG: Color = Color::Rgb { r: 0xFF, g: 0x00, b: 0x00 };
const ALERT_FG: Color = Color::Rgb { r: 0xFF, g: 0xFF, b: 0x00 };

fn styled_cell(content: String, alignment: CellAlignment, high_risk: bool) -> Cell {
    let cell = Cell::new(content).set_alignment(alignment);
    if high_risk {
        cell.fg(ALERT_FG).bg(ALERT_BG).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

/// 构建终端表格
///
/// headers 取自 `summary_headers`，与导出文件首行一致
pub fn render_table(headers: &[String], view: &[StyledRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.to_vec());

    for item in view {
        let high_risk = item.style.is_high_risk();
        let row = &item.row;

        let mut crow = CRow::new();
        crow.add_cell(styled_cell(row.country.clone(), CellAlignment::Left, high_risk));
        crow.add_cell(styled_cell(row.product_name.clone(), CellAlignment::Left, high_risk));
        crow.add_cell(styled_cell(row.sku.clone(), CellAlignment::Left, high_risk));
        crow.add_cell(styled_cell(row.fba_stock.to_string(), CellAlignment::Right, high_risk));
        crow.add_cell(styled_cell(row.in_transit_total.to_string(), CellAlignment::Right, high_risk));
        crow.add_cell(styled_cell(row.trailing_30d_sales.to_string(), CellAlignment::Right, high_risk));
        crow.add_cell(styled_cell(row.forecast_30d_sales.to_string(), CellAlignment::Right, high_risk));
        crow.add_cell(styled_cell(item.ratio_display.clone(), CellAlignment::Right, high_risk));

        table.add_row(crow);
    }

    table
}

/// 打印表格到标准输出
pub fn print_table(headers: &[String], view: &[StyledRow]) {
    println!("{}", render_table(headers, view));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::inventory::SummaryRow;
    use crate::domain::types::RowStyle;
    use crate::presenter::styled_view::summary_headers;

    #[test]
    fn test_render_table_contains_values() {
        let row = SummaryRow {
            country: "US".to_string(),
            product_name: "杯子".to_string(),
            sku: "SKU1".to_string(),
            fba_stock: 15,
            in_transit_total: 5,
            trailing_30d_sales: 10,
            forecast_30d_sales: 10,
            stock_sales_ratio: 2.0,
        };
        let view = vec![StyledRow::new(row, RowStyle::Normal)];

        let headers = summary_headers("zh-CN");

        let rendered = render_table(&headers, &view).to_string();
        assert!(rendered.contains("库销比"));
        assert!(rendered.contains("SKU1"));
        assert!(rendered.contains("2.0"));
        assert_eq!(render_table(&headers, &view).row_iter().count(), 1);
    }
}
