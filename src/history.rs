//! Bounded history of past analyses and the insights derived from it

use crate::triage::{AnalysisResult, SymptomCategory};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};
use uuid::Uuid;

/// Default number of records kept before the oldest is evicted
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Window counted as recent activity
const RECENT_DAYS: i64 = 7;

/// One stored analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub symptoms: String,
    pub analysis: AnalysisResult,
}

impl HealthRecord {
    /// Symptom text cut to `max_chars` characters, with "..." when cut
    pub fn preview(&self, max_chars: usize) -> String {
        if self.symptoms.chars().count() > max_chars {
            let cut: String = self.symptoms.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            self.symptoms.clone()
        }
    }
}

/// Aggregate view over the stored records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthInsights {
    pub total_analyses: usize,
    pub emergency_cases: usize,
    pub common_categories: BTreeMap<SymptomCategory, usize>,
    pub recent_activity: usize,
}

impl HealthInsights {
    /// Category seen most often; ties go to the earlier category
    pub fn top_category(&self) -> Option<SymptomCategory> {
        self.common_categories
            .iter()
            .fold(None, |best: Option<(SymptomCategory, usize)>, (cat, count)| match best {
                Some((_, best_count)) if best_count >= *count => best,
                _ => Some((*cat, *count)),
            })
            .map(|(cat, _)| cat)
    }
}

/// FIFO store of analyses, oldest evicted at capacity
#[derive(Debug, Clone)]
pub struct HealthHistory {
    records: VecDeque<HealthRecord>,
    limit: usize,
}

impl HealthHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// A limit of zero is treated as one.
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            records: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Store an analysis and return the new record's id
    pub fn record(&mut self, symptoms: &str, analysis: AnalysisResult) -> Uuid {
        self.push(HealthRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            symptoms: symptoms.to_string(),
            analysis,
        })
    }

    /// Store a prebuilt record, evicting the oldest when full
    pub fn push(&mut self, record: HealthRecord) -> Uuid {
        let id = record.id;
        if self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
        id
    }

    /// Up to `n` most recent records, oldest first
    pub fn recent(&self, n: usize) -> Vec<&HealthRecord> {
        let skip = self.records.len().saturating_sub(n);
        self.records.iter().skip(skip).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HealthRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Insights relative to the current time
    pub fn insights(&self) -> Option<HealthInsights> {
        self.insights_at(Utc::now())
    }

    /// Insights relative to `now`; `None` when nothing is stored
    pub fn insights_at(&self, now: DateTime<Utc>) -> Option<HealthInsights> {
        if self.records.is_empty() {
            return None;
        }

        let cutoff = now - Duration::days(RECENT_DAYS);
        let mut common_categories = BTreeMap::new();
        for record in &self.records {
            for category in &record.analysis.categories {
                *common_categories.entry(*category).or_insert(0) += 1;
            }
        }

        Some(HealthInsights {
            total_analyses: self.records.len(),
            emergency_cases: self.records.iter().filter(|r| r.analysis.is_emergency).count(),
            common_categories,
            recent_activity: self.records.iter().filter(|r| r.timestamp > cutoff).count(),
        })
    }
}

impl Default for HealthHistory {
    fn default() -> Self {
        Self::new()
    }
}
