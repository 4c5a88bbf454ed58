use super::{schema_of, seeded_rng, Tool, ToolReport};
use crate::schemas::Validator;
use crate::services::pacing::SharedPacer;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

/// Parameters for the data analyzer
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DataAnalyzerParams {
    /// What the user asked to analyze
    pub intent: String,
}

/// Descriptive statistics over a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
}

impl Summary {
    /// `None` for an empty dataset
    pub fn of(data: &[u32]) -> Option<Self> {
        Some(Self {
            count: data.len(),
            mean: mean(data)?,
            median: median(data)?,
            std_dev: std_dev(data)?,
            min: *data.iter().min()?,
            max: *data.iter().max()?,
        })
    }

    pub fn is_right_skewed(&self) -> bool {
        self.mean > self.median
    }

    pub fn is_stable(&self) -> bool {
        self.std_dev < self.mean / 3.0
    }
}

pub fn mean(data: &[u32]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sum: f64 = data.iter().map(|&v| f64::from(v)).sum();
    Some(sum / data.len() as f64)
}

pub fn median(data: &[u32]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0
    } else {
        f64::from(sorted[mid])
    })
}

/// Population standard deviation
pub fn std_dev(data: &[u32]) -> Option<f64> {
    let mean = mean(data)?;
    let variance = data
        .iter()
        .map(|&v| (f64::from(v) - mean).powi(2))
        .sum::<f64>()
        / data.len() as f64;
    Some(variance.sqrt())
}

/// 50..=99 values, each in 1..=100
pub fn sample_data(rng: &mut impl Rng) -> Vec<u32> {
    let size = rng.gen_range(50..100);
    (0..size).map(|_| rng.gen_range(1..=100)).collect()
}

pub fn render_analysis(data: &[u32], stats: &Summary) -> String {
    let preview = data
        .iter()
        .take(10)
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let ellipsis = if data.len() > 10 { "..." } else { "" };

    format!(
        "**Data Analysis Results:**\n\n\
         📊 **Dataset:** Sample data ({count} points)\n\
         📈 **Mean:** {mean:.2}\n\
         📊 **Median:** {median}\n\
         📉 **Standard Deviation:** {std_dev:.2}\n\
         🔻 **Minimum:** {min}\n\
         🔺 **Maximum:** {max}\n\n\
         **Sample Data:** {preview}{ellipsis}\n\n\
         **Insights:**\n\
         - The data shows {skew} distribution\n\
         - Range: {range}\n\
         - The data appears to be {stability}\n\n\
         *Note: This is demo analysis with generated data.*",
        count = stats.count,
        mean = stats.mean,
        median = stats.median,
        std_dev = stats.std_dev,
        min = stats.min,
        max = stats.max,
        preview = preview,
        ellipsis = ellipsis,
        skew = if stats.is_right_skewed() {
            "a right-skewed"
        } else {
            "a left-skewed"
        },
        range = stats.max - stats.min,
        stability = if stats.is_stable() {
            "relatively stable"
        } else {
            "quite variable"
        },
    )
}

/// Generates a random dataset and reports its statistics
#[derive(Debug)]
pub struct DataAnalyzerTool {
    pacer: SharedPacer,
    rng: Mutex<StdRng>,
}

impl DataAnalyzerTool {
    pub fn new(pacer: SharedPacer, seed: Option<u64>) -> Self {
        Self {
            pacer,
            rng: Mutex::new(seeded_rng(seed, 41)),
        }
    }
}

impl Tool for DataAnalyzerTool {
    fn name(&self) -> &'static str {
        "data_analyzer"
    }

    fn display_name(&self) -> &'static str {
        "Data Analyzer"
    }

    fn description(&self) -> &'static str {
        "Compute descriptive statistics over a generated sample dataset"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema_of::<DataAnalyzerParams>()
    }

    fn execute(
        &self,
        parameters: serde_json::Value,
    ) -> Pin<
        Box<
            dyn std::future::Future<Output = Result<serde_json::Value, crate::DemoError>>
                + Send
                + '_,
        >,
    > {
        Box::pin(async move {
            let _params: DataAnalyzerParams =
                Validator::SerdeFirst.validate(self.name(), parameters)?;

            self.pacer.pause(Duration::from_millis(1200)).await;

            let data = {
                let mut rng = self.rng.lock().map_err(|_| {
                    crate::DemoError::ToolExecution("analyzer state poisoned".to_string())
                })?;
                sample_data(&mut *rng)
            };

            let report = match Summary::of(&data) {
                Some(stats) => {
                    ToolReport::success("Data analysis completed", render_analysis(&data, &stats))
                }
                None => ToolReport::failure("Data analysis failed: empty dataset"),
            };
            report.into_value()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const FIXED: [u32; 8] = [2, 4, 4, 4, 5, 5, 7, 9];

    #[test]
    fn test_statistics_on_fixed_dataset() {
        assert_eq!(mean(&FIXED), Some(5.0));
        assert_eq!(median(&FIXED), Some(4.5));
        assert_eq!(std_dev(&FIXED), Some(2.0));
        assert_eq!(median(&[3, 1, 2]), Some(2.0));
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(std_dev(&[]), None);
        assert!(Summary::of(&[]).is_none());
    }

    #[test]
    fn test_summary_insights() {
        let stats = Summary::of(&FIXED).unwrap();
        assert_eq!(stats.min, 2);
        assert_eq!(stats.max, 9);
        assert!(stats.is_right_skewed());
        assert!(!stats.is_stable());

        let text = render_analysis(&FIXED, &stats);
        assert!(text.contains("**Mean:** 5.00"));
        assert!(text.contains("**Median:** 4.5"));
        assert!(text.contains("**Standard Deviation:** 2.00"));
        assert!(text.contains("Range: 7"));
        assert!(text.contains("a right-skewed"));
        assert!(!text.contains("..."));
    }

    #[test]
    fn test_sample_data_bounds() {
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..10 {
            let data = sample_data(&mut rng);
            assert!((50..100).contains(&data.len()));
            assert!(data.iter().all(|v| (1..=100).contains(v)));
        }
    }
}
