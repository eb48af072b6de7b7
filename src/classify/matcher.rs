use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::Result;

/// Matching seam: the classifier only needs a yes/no per hostname, so the
/// linear scan below can be swapped for an automaton without touching the
/// classification rules.
pub trait HostMatcher {
    fn matches(&self, host: &str) -> bool;
}

pub struct SubstringMatcher {
    patterns: Vec<String>,
}

impl SubstringMatcher {
    pub fn new(patterns: Vec<String>) -> Self {
        Self { patterns }
    }

    /// Loads one pattern per line. Blank lines are dropped: an empty
    /// pattern is a substring of every hostname.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut patterns = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            let pattern = line.trim();
            if !pattern.is_empty() {
                patterns.push(pattern.to_string());
            }
        }
        info!("Loaded {} host patterns from {}", patterns.len(), path.display());
        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl HostMatcher for SubstringMatcher {
    fn matches(&self, host: &str) -> bool {
        self.patterns.iter().any(|pattern| host.contains(pattern))
    }
}
