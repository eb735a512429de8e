use std::time::Instant;

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 阶段耗时是否以 info 级别输出
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（仅 debug 级别）
/// - `INVENTORY_COVER_PERF=1` 强制开启
fn perf_enabled() -> bool {
    match std::env::var("INVENTORY_COVER_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    }
}

/// 性能统计 Guard：记录 elapsed_ms + 处理行数
///
/// 使用方式：
/// ```ignore
/// let mut perf = inventory_cover::perf::PerfGuard::new("aggregate_sales");
/// // do work...
/// perf.set_rows(rows.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: Option<usize>,
    enabled: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            rows: None,
            enabled: perf_enabled(),
        }
    }

    /// 记录本阶段输出行数
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = Some(rows);
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        let rows = self.rows.unwrap_or(0);

        if self.enabled {
            tracing::info!(target: "perf", op = self.op, elapsed_ms, rows, "done");
        } else {
            tracing::debug!(target: "perf", op = self.op, elapsed_ms, rows, "done");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_true() {
        assert!(is_true(" YES "));
        assert!(is_true("1"));
        assert!(!is_true("0"));
        assert!(!is_true(""));
    }

    #[test]
    fn test_guard_records_rows() {
        let mut guard = PerfGuard::new("unit");
        guard.set_rows(3);
        assert_eq!(guard.rows, Some(3));
    }
}
