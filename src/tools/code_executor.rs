use super::{schema_of, seeded_rng, Tool, ToolReport};
use crate::schemas::Validator;
use crate::services::pacing::SharedPacer;
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

const PRIMES_SOURCE: &str = r#"// Generate prime numbers
fn generate_primes(limit: u32) -> Vec<u32> {
    (2..=limit)
        .filter(|n| (2..).take_while(|i| i * i <= *n).all(|i| n % i != 0))
        .collect()
}

let primes = generate_primes(50);
println!("First 15 prime numbers: {:?}", &primes[..15]);"#;

const FIBONACCI_SOURCE: &str = r#"// Generate Fibonacci sequence
fn fibonacci(n: usize) -> Vec<u64> {
    let mut fib = vec![0, 1];
    for i in 2..n {
        fib.push(fib[i - 1] + fib[i - 2]);
    }
    fib
}

println!("Fibonacci sequence (15 numbers): {:?}", fibonacci(15));"#;

const CHART_SOURCE: &str = r#"// Generate sample data visualization
let data: Vec<(u32, u32)> = (1..=10)
    .map(|x| (x, rand::thread_rng().gen_range(1..=100)))
    .collect();

println!("Sample chart data: {:?}", data);
println!("Chart would display: {}", data.iter()
    .map(|(x, y)| format!("({}, {})", x, y))
    .collect::<Vec<_>>()
    .join(", "));"#;

/// Parameters for the code runner
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CodeExecutorParams {
    /// What the user asked for; selects the canned program
    pub intent: String,
}

/// The canned programs the runner knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snippet {
    Primes,
    Fibonacci,
    Chart,
    General,
}

impl Snippet {
    pub fn for_intent(intent: &str) -> Self {
        let intent = intent.to_lowercase();
        if intent.contains("prime") {
            Snippet::Primes
        } else if intent.contains("fibonacci") {
            Snippet::Fibonacci
        } else if intent.contains("chart") || intent.contains("graph") {
            Snippet::Chart
        } else {
            Snippet::General
        }
    }

    pub fn source(&self, intent: &str) -> String {
        match self {
            Snippet::Primes => PRIMES_SOURCE.to_string(),
            Snippet::Fibonacci => FIBONACCI_SOURCE.to_string(),
            Snippet::Chart => CHART_SOURCE.to_string(),
            Snippet::General => format!(
                "// General purpose code example\n\
                 let current_time = chrono::Local::now();\n\
                 let random_number = rand::thread_rng().gen_range(0..1000);\n\
                 \n\
                 println!(\"Current time: {{}}\", current_time);\n\
                 println!(\"Random number: {{}}\", random_number);\n\
                 println!(\"Your request: {{}}\", {:?});",
                intent
            ),
        }
    }

    /// Run the native equivalent of the program and collect its printed lines
    pub fn run(&self, intent: &str, rng: &mut impl Rng) -> Vec<String> {
        match self {
            Snippet::Primes => {
                let primes = primes_up_to(50);
                vec![format!(
                    "First 15 prime numbers: {}",
                    join(primes.iter().take(15))
                )]
            }
            Snippet::Fibonacci => vec![format!(
                "Fibonacci sequence (15 numbers): {}",
                join(fibonacci(15).iter())
            )],
            Snippet::Chart => {
                let points: Vec<(u32, u32)> =
                    (1..=10).map(|x| (x, rng.gen_range(1..=100))).collect();
                let display = points
                    .iter()
                    .map(|(x, y)| format!("({}, {})", x, y))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![
                    format!("Sample chart data: {:?}", points),
                    format!("Chart would display: {}", display),
                ]
            }
            Snippet::General => vec![
                format!(
                    "Current time: {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
                ),
                format!("Random number: {}", rng.gen_range(0..1000)),
                format!("Your request: {}", intent),
            ],
        }
    }
}

fn join<'a, T: std::fmt::Display + 'a>(items: impl Iterator<Item = &'a T>) -> String {
    items.map(|n| n.to_string()).collect::<Vec<_>>().join(",")
}

pub fn primes_up_to(limit: u32) -> Vec<u32> {
    (2..=limit)
        .filter(|&n| (2..).take_while(|i| i * i <= n).all(|i| n % i != 0))
        .collect()
}

pub fn fibonacci(n: usize) -> Vec<u64> {
    let mut fib: Vec<u64> = vec![0, 1];
    for i in 2..n {
        fib.push(fib[i - 1] + fib[i - 2]);
    }
    fib.truncate(n);
    fib
}

/// Picks a canned program for the request and "runs" it
#[derive(Debug)]
pub struct CodeExecutorTool {
    pacer: SharedPacer,
    rng: Mutex<StdRng>,
}

impl CodeExecutorTool {
    pub fn new(pacer: SharedPacer, seed: Option<u64>) -> Self {
        Self {
            pacer,
            rng: Mutex::new(seeded_rng(seed, 23)),
        }
    }
}

impl Tool for CodeExecutorTool {
    fn name(&self) -> &'static str {
        "code_executor"
    }

    fn display_name(&self) -> &'static str {
        "Code Executor"
    }

    fn description(&self) -> &'static str {
        "Generate a small program for the request and show its output"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema_of::<CodeExecutorParams>()
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
            let params: CodeExecutorParams =
                Validator::SerdeFirst.validate(self.name(), parameters)?;

            self.pacer.pause(Duration::from_millis(1000)).await;

            let snippet = Snippet::for_intent(&params.intent);
            let output = {
                let mut rng = self.rng.lock().map_err(|_| {
                    crate::DemoError::ToolExecution("Code execution failed: runner state poisoned".to_string())
                })?;
                snippet.run(&params.intent, &mut *rng)
            };

            ToolReport::success(
                "Code executed successfully",
                format!(
                    "**Generated and Executed Code:**\n\n```rust\n{}\n```\n\n**Output:**\n{}",
                    snippet.source(&params.intent),
                    output.join("\n")
                ),
            )
            .into_value()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::pacing::pacer_for;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_snippet_selection() {
        assert_eq!(Snippet::for_intent("Generate PRIME numbers"), Snippet::Primes);
        assert_eq!(Snippet::for_intent("fibonacci please"), Snippet::Fibonacci);
        assert_eq!(Snippet::for_intent("draw a graph"), Snippet::Chart);
        assert_eq!(Snippet::for_intent("write code"), Snippet::General);
    }

    #[test]
    fn test_primes_and_fibonacci() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Snippet::Primes.run("", &mut rng),
            vec!["First 15 prime numbers: 2,3,5,7,11,13,17,19,23,29,31,37,41,43,47"]
        );
        assert_eq!(
            Snippet::Fibonacci.run("", &mut rng),
            vec!["Fibonacci sequence (15 numbers): 0,1,1,2,3,5,8,13,21,34,55,89,144,233,377"]
        );
        assert_eq!(fibonacci(1), vec![0]);
    }

    #[test]
    fn test_chart_has_ten_points() {
        let mut rng = StdRng::seed_from_u64(9);
        let lines = Snippet::Chart.run("chart", &mut rng);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].matches('(').count(), 10);
    }

    #[tokio::test]
    async fn test_execute_wraps_source_and_output() {
        let tool = CodeExecutorTool::new(pacer_for(false), Some(4));
        let value = tool
            .execute(json!({"intent": "write a program"}))
            .await
            .unwrap();
        let data = ToolReport::from_value(&value).data.unwrap();
        assert!(data.contains("```rust"));
        assert!(data.contains("Your request: write a program"));
    }
}
