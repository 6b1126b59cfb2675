use std::sync::Arc;
use chrono::{DateTime, Utc, Duration};
use dashmap::DashMap;

use crate::errors::NewsProviderError;

/// Information about a failed news fetch for a company
#[derive(Debug, Clone)]
pub struct FailureInfo {
    pub failed_at: DateTime<Utc>,
    pub error_type: FailureType,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailureType {
    RateLimited,    // Provider asked us to back off
    BadResponse,    // Provider answered with an error or unparseable body
    Network,        // Timeout or connection failure
}

impl FailureType {
    fn ttl_minutes(&self) -> i64 {
        match self {
            FailureType::RateLimited => 60,
            FailureType::BadResponse => 15,
            FailureType::Network => 2,
        }
    }
}

impl From<&NewsProviderError> for FailureType {
    fn from(error: &NewsProviderError) -> Self {
        match error {
            NewsProviderError::RateLimited => FailureType::RateLimited,
            NewsProviderError::Network(_) => FailureType::Network,
            NewsProviderError::BadResponse(_) | NewsProviderError::Parse(_) => FailureType::BadResponse,
        }
    }
}

/// Thread-safe cache of companies whose last news fetch failed
/// Skips the provider round-trip while the failure is still fresh
#[derive(Clone, Default)]
pub struct FetchFailureCache {
    cache: Arc<DashMap<String, FailureInfo>>,
}

impl FetchFailureCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
        }
    }

    fn key(company: &str) -> String {
        company.trim().to_lowercase()
    }

    /// Check if a company has a failure that is still within its TTL
    pub fn is_failed(&self, company: &str) -> Option<FailureInfo> {
        let key = Self::key(company);
        if let Some(entry) = self.cache.get(&key) {
            let info = entry.value().clone();
            let expiry = info.failed_at + Duration::minutes(info.ttl_minutes);

            if Utc::now() < expiry {
                return Some(info);
            }

            drop(entry); // Release the read lock
            self.cache.remove(&key);
        }
        None
    }

    pub fn record_failure(&self, company: &str, error_type: FailureType) {
        self.cleanup_expired();
        self.insert(company, error_type, Utc::now());
    }

    fn insert(&self, company: &str, error_type: FailureType, failed_at: DateTime<Utc>) {
        self.cache.insert(
            Self::key(company),
            FailureInfo {
                failed_at,
                error_type,
                ttl_minutes: error_type.ttl_minutes(),
            },
        );
    }

    pub fn clear_failure(&self, company: &str) {
        self.cache.remove(&Self::key(company));
    }

    /// Drop every failure whose TTL has elapsed
    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        self.cache.retain(|_, info| {
            let expiry = info.failed_at + Duration::minutes(info.ttl_minutes);
            now < expiry
        });
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
