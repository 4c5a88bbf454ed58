use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

const MAX_TOPICS: usize = 10;
const MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    pub relevance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub kind: String,
    pub mentions: u32,
    pub last_mentioned: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RememberedResult {
    pub tool_name: String,
    pub result: String,
    pub timestamp: DateTime<Utc>,
}

/// What the tracker considers related to a new query
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelevantContext {
    pub topics: Vec<Topic>,
    pub entities: Vec<(String, Entity)>,
    pub previous_results: Vec<RememberedResult>,
}

impl RelevantContext {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.entities.is_empty() && self.previous_results.is_empty()
    }
}

/// Rolling conversation context: recent topics, entity mentions and tool results
#[derive(Debug, Default)]
pub struct ContextTracker {
    topics: VecDeque<Topic>,
    entities: BTreeMap<String, Entity>,
    results: VecDeque<RememberedResult>,
}

impl ContextTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_topic(&mut self, topic: &str) {
        self.topics.push_back(Topic {
            topic: topic.to_string(),
            timestamp: Utc::now(),
            relevance: 1.0,
        });
        if self.topics.len() > MAX_TOPICS {
            self.topics.pop_front();
        }
    }

    pub fn add_entity(&mut self, entity: &str, kind: &str) {
        let mentions = self.entities.get(entity).map_or(0, |e| e.mentions) + 1;
        self.entities.insert(
            entity.to_string(),
            Entity {
                kind: kind.to_string(),
                mentions,
                last_mentioned: Utc::now(),
            },
        );
    }

    pub fn add_result(&mut self, tool_name: &str, result: &str) {
        self.results.push_back(RememberedResult {
            tool_name: tool_name.to_string(),
            result: result.to_string(),
            timestamp: Utc::now(),
        });
        if self.results.len() > MAX_RESULTS {
            self.results.pop_front();
        }
    }

    pub fn topics(&self) -> impl Iterator<Item = &Topic> {
        self.topics.iter()
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn relevant_context(&self, query: &str) -> RelevantContext {
        let query_lower = query.to_lowercase();

        let matching: Vec<&Topic> = self
            .topics
            .iter()
            .filter(|t| is_topic_relevant(&t.topic, query))
            .collect();
        let topics = matching[matching.len().saturating_sub(3)..]
            .iter()
            .map(|t| (*t).clone())
            .collect();

        let entities = self
            .entities
            .iter()
            .filter(|(name, _)| query_lower.contains(&name.to_lowercase()))
            .take(5)
            .map(|(name, entity)| (name.clone(), entity.clone()))
            .collect();

        let previous_results = self
            .results
            .iter()
            .skip(self.results.len().saturating_sub(2))
            .cloned()
            .collect();

        RelevantContext {
            topics,
            entities,
            previous_results,
        }
    }
}

fn is_topic_relevant(topic: &str, query: &str) -> bool {
    let topic = topic.to_lowercase();
    let query = query.to_lowercase();
    topic.split(' ').any(|word| {
        query
            .split(' ')
            .any(|q_word| q_word.contains(word) || word.contains(q_word))
    })
}
