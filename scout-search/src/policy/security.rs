//! Heuristic URL security gate.
//!
//! Checks run in a fixed order and the first match wins:
//!
//! 1. blocked top-level domain → `blocked`, score 0.0
//! 2. suspicious query pattern → `suspicious`, score 0.2
//! 3. suspicious path pattern  → `suspicious`, score 0.3
//! 4. otherwise                → `clean`, score 1.0
//!
//! This is an allow/deny heuristic, not a sandbox: no content is fetched.

use regex::Regex;

use crate::config::SecurityPolicy;
use crate::error::ResearchError;
use crate::types::SecurityStatus;

use super::host_matches;

/// Security status plus the score used in final ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecurityVerdict {
    pub status: SecurityStatus,
    pub score: f64,
}

impl SecurityVerdict {
    const BLOCKED: Self = Self {
        status: SecurityStatus::Blocked,
        score: 0.0,
    };
    const SUSPICIOUS_QUERY: Self = Self {
        status: SecurityStatus::Suspicious,
        score: 0.2,
    };
    const SUSPICIOUS_PATH: Self = Self {
        status: SecurityStatus::Suspicious,
        score: 0.3,
    };
    const CLEAN: Self = Self {
        status: SecurityStatus::Clean,
        score: 1.0,
    };
}

/// A [`SecurityPolicy`] with its patterns compiled. Built once per turn.
#[derive(Debug, Clone)]
pub struct SecurityRules {
    blocked_tlds: Vec<String>,
    query_patterns: Vec<Regex>,
    path_patterns: Vec<Regex>,
}

impl SecurityRules {
    /// Compile the policy's pattern lists.
    ///
    /// # Errors
    ///
    /// Returns [`ResearchError::Config`] naming the first pattern that is
    /// not a valid regex.
    pub fn compile(policy: &SecurityPolicy) -> Result<Self, ResearchError> {
        Ok(Self {
            blocked_tlds: policy
                .blocked_tlds
                .iter()
                .map(|t| t.trim_start_matches('.').to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            query_patterns: compile_all("suspicious_query_patterns", &policy.suspicious_query_patterns)?,
            path_patterns: compile_all("suspicious_path_patterns", &policy.suspicious_path_patterns)?,
        })
    }

    /// Classify a URL. `hostname` is the already-extracted host of `url`
    /// (empty when unparseable, in which case the TLD check is skipped).
    pub fn classify(&self, url: &str, hostname: &str) -> SecurityVerdict {
        if !hostname.is_empty() && self.blocked_tlds.iter().any(|tld| host_matches(hostname, tld)) {
            return SecurityVerdict::BLOCKED;
        }
        let lowered = url.to_lowercase();
        if self.query_patterns.iter().any(|re| re.is_match(&lowered)) {
            return SecurityVerdict::SUSPICIOUS_QUERY;
        }
        if self.path_patterns.iter().any(|re| re.is_match(&lowered)) {
            return SecurityVerdict::SUSPICIOUS_PATH;
        }
        SecurityVerdict::CLEAN
    }
}

fn compile_all(field: &str, patterns: &[String]) -> Result<Vec<Regex>, ResearchError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|e| {
                ResearchError::Config(format!("invalid regex in security.{field}: {p:?}: {e}"))
            })
        })
        .collect()
}
