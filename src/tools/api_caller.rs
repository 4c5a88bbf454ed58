use super::{schema_of, seeded_rng, Tool, ToolReport};
use crate::schemas::Validator;
use crate::services::pacing::SharedPacer;
use rand::{rngs::StdRng, seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

const CITIES: [&str; 5] = ["New York", "London", "Tokyo", "Sydney", "Paris"];
const CONDITIONS: [&str; 4] = ["Sunny", "Cloudy", "Rainy", "Partly Cloudy"];
const SYMBOLS: [&str; 5] = ["AAPL", "GOOGL", "MSFT", "TSLA", "AMZN"];
const PAIRS: [(&str, &str, f64); 4] = [
    ("USD", "EUR", 0.85),
    ("USD", "GBP", 0.73),
    ("USD", "JPY", 110.25),
    ("EUR", "USD", 1.18),
];

/// Parameters for the API caller
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ApiCallerParams {
    /// What the user asked for; selects the simulated endpoint
    pub intent: String,
}

/// Which fake endpoint a request lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Weather,
    Stock,
    Currency,
    Generic,
}

impl Endpoint {
    pub fn for_intent(intent: &str) -> Self {
        let intent = intent.to_lowercase();
        if intent.contains("weather") {
            Endpoint::Weather
        } else if intent.contains("stock") || intent.contains("price") {
            Endpoint::Stock
        } else if intent.contains("currency") || intent.contains("exchange") {
            Endpoint::Currency
        } else {
            Endpoint::Generic
        }
    }

    pub fn respond(&self, rng: &mut impl Rng) -> ToolReport {
        match self {
            Endpoint::Weather => {
                let city = CITIES.choose(rng).copied().unwrap_or(CITIES[0]);
                let temp: u32 = rng.gen_range(5..35);
                let condition = CONDITIONS.choose(rng).copied().unwrap_or(CONDITIONS[0]);
                ToolReport::success(
                    format!("Weather data retrieved for {}", city),
                    format!(
                        "**Weather Information:**\n\n🌍 **Location:** {}\n🌡️ **Temperature:** {}°C\n☁️ **Conditions:** {}\n\n*Note: This is demo data.*",
                        city, temp, condition
                    ),
                )
            }
            Endpoint::Stock => {
                let symbol = SYMBOLS.choose(rng).copied().unwrap_or(SYMBOLS[0]);
                let price: f64 = rng.gen_range(50.0..1050.0);
                let change: f64 = rng.gen_range(-5.0..5.0);
                let sign = if change > 0.0 { "+" } else { "" };
                ToolReport::success(
                    format!("Stock price retrieved for {}", symbol),
                    format!(
                        "**Stock Information:**\n\n📈 **Symbol:** {}\n💰 **Price:** ${:.2}\n📊 **Change:** {}{:.2}\n\n*Note: This is demo data.*",
                        symbol, price, sign, change
                    ),
                )
            }
            Endpoint::Currency => {
                let (from, to, rate) = PAIRS.choose(rng).copied().unwrap_or(PAIRS[0]);
                ToolReport::success(
                    "Exchange rate retrieved",
                    format!(
                        "**Currency Exchange:**\n\n💱 **Pair:** {}/{}\n📈 **Rate:** {}\n\n*Note: This is demo data.*",
                        from, to, rate
                    ),
                )
            }
            Endpoint::Generic => ToolReport::success(
                "API call completed",
                "**API Response:**\n\nGeneric API endpoint called successfully. In a real implementation, this would connect to actual external APIs.\n\n*Note: This is a demonstration.*",
            ),
        }
    }
}

/// Returns canned weather, stock, currency or generic API payloads
#[derive(Debug)]
pub struct ApiCallerTool {
    pacer: SharedPacer,
    rng: Mutex<StdRng>,
}

impl ApiCallerTool {
    pub fn new(pacer: SharedPacer, seed: Option<u64>) -> Self {
        Self {
            pacer,
            rng: Mutex::new(seeded_rng(seed, 37)),
        }
    }
}

impl Tool for ApiCallerTool {
    fn name(&self) -> &'static str {
        "api_caller"
    }

    fn display_name(&self) -> &'static str {
        "API Caller"
    }

    fn description(&self) -> &'static str {
        "Call an external data API such as weather, stocks or currency (simulated)"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        schema_of::<ApiCallerParams>()
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
            let params: ApiCallerParams =
                Validator::SerdeFirst.validate(self.name(), parameters)?;

            self.pacer.pause(Duration::from_millis(1500)).await;

            let endpoint = Endpoint::for_intent(&params.intent);
            let report = {
                let mut rng = self.rng.lock().map_err(|_| {
                    crate::DemoError::ToolExecution("API caller state poisoned".to_string())
                })?;
                endpoint.respond(&mut *rng)
            };
            report.into_value()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_endpoint_routing() {
        assert_eq!(Endpoint::for_intent("Weather in Paris"), Endpoint::Weather);
        assert_eq!(Endpoint::for_intent("AAPL stock"), Endpoint::Stock);
        assert_eq!(Endpoint::for_intent("price of gold"), Endpoint::Stock);
        assert_eq!(Endpoint::for_intent("exchange rates"), Endpoint::Currency);
        assert_eq!(Endpoint::for_intent("ping the api"), Endpoint::Generic);
    }

    #[test]
    fn test_weather_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let report = Endpoint::Weather.respond(&mut rng);
            let summary = report.summary.unwrap();
            assert!(CITIES.iter().any(|c| summary.ends_with(c)));
            let data = report.data.unwrap();
            let temp: u32 = data
                .split("**Temperature:** ")
                .nth(1)
                .and_then(|rest| rest.split('°').next())
                .and_then(|t| t.parse().ok())
                .unwrap();
            assert!((5..35).contains(&temp));
        }
    }

    #[test]
    fn test_currency_uses_fixed_pairs() {
        let mut rng = StdRng::seed_from_u64(2);
        let data = Endpoint::Currency.respond(&mut rng).data.unwrap();
        assert!(PAIRS
            .iter()
            .any(|(from, to, _)| data.contains(&format!("{}/{}", from, to))));
    }
}
