use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

const RECENT_TOOL_EXECUTIONS: usize = 10;
pub const MAX_TOOL_HISTORY: usize = 100;

/// Running counters for one tool
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToolCounters {
    pub executions: u64,
    pub total_duration: Duration,
    pub success_count: u64,
    pub failure_count: u64,
}

/// Counters plus derived rates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolStats {
    #[serde(flatten)]
    pub counters: ToolCounters,
    pub average_duration: Duration,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolHistoryEntry {
    pub tool_name: String,
    pub timestamp: DateTime<Utc>,
    pub duration: Duration,
    pub success: bool,
    pub result: String,
}

/// Per-tool execution counters and the most recent runs
#[derive(Debug, Default)]
pub struct ToolMetrics {
    counters: BTreeMap<String, ToolCounters>,
    history: VecDeque<ToolHistoryEntry>,
}

impl ToolMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tool_name: &str, duration: Duration, success: bool, result: &str) {
        let counters = self.counters.entry(tool_name.to_string()).or_default();
        counters.executions += 1;
        counters.total_duration += duration;
        if success {
            counters.success_count += 1;
        } else {
            counters.failure_count += 1;
        }

        self.history.push_back(ToolHistoryEntry {
            tool_name: tool_name.to_string(),
            timestamp: Utc::now(),
            duration,
            success,
            result: result.to_string(),
        });
        if self.history.len() > MAX_TOOL_HISTORY {
            self.history.pop_front();
        }
    }

    pub fn stats(&self, tool_name: &str) -> Option<ToolStats> {
        let counters = self.counters.get(tool_name)?;
        let executions = counters.executions.max(1);
        Some(ToolStats {
            counters: counters.clone(),
            average_duration: counters.total_duration / executions as u32,
            success_rate: counters.success_count as f64 / executions as f64,
        })
    }

    pub fn all_stats(&self) -> BTreeMap<String, ToolStats> {
        self.counters
            .keys()
            .filter_map(|name| self.stats(name).map(|stats| (name.clone(), stats)))
            .collect()
    }

    /// Oldest first, at most `MAX_TOOL_HISTORY` entries
    pub fn history(&self) -> &VecDeque<ToolHistoryEntry> {
        &self.history
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimedToolRun {
    pub tool: String,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub average_response_time: Duration,
    pub total_requests: u64,
    pub error_rate: f64,
    pub tool_executions: usize,
    pub recent_tool_executions: Vec<TimedToolRun>,
}

/// Whole-turn timings and a running error rate
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    total_response_time: Duration,
    tool_runs: VecDeque<TimedToolRun>,
    tool_run_total: usize,
    error_rate: f64,
    total_requests: u64,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_response(&mut self, duration: Duration) {
        self.total_response_time += duration;
        self.total_requests += 1;
    }

    pub fn record_tool_execution(&mut self, tool: &str, duration: Duration) {
        self.tool_run_total += 1;
        self.tool_runs.push_back(TimedToolRun {
            tool: tool.to_string(),
            duration,
            timestamp: Utc::now(),
        });
        if self.tool_runs.len() > RECENT_TOOL_EXECUTIONS {
            self.tool_runs.pop_front();
        }
    }

    /// Fold one failed request into the running rate. Call after
    /// `record_response` for the same request.
    pub fn record_error(&mut self) {
        let total = self.total_requests.max(1) as f64;
        self.error_rate = (self.error_rate * (total - 1.0) + 1.0) / total;
    }

    pub fn average_response_time(&self) -> Duration {
        if self.total_requests == 0 {
            return Duration::ZERO;
        }
        self.total_response_time / self.total_requests as u32
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    pub fn report(&self) -> PerformanceReport {
        PerformanceReport {
            average_response_time: self.average_response_time(),
            total_requests: self.total_requests,
            error_rate: self.error_rate,
            tool_executions: self.tool_run_total,
            recent_tool_executions: self.tool_runs.iter().cloned().collect(),
        }
    }
}
