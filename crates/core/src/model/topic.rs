use std::collections::BTreeSet;
use std::fmt;

use crate::model::Level;

/// Storage key for a topic's question bank.
///
/// Derived from the display name by lowercasing and replacing spaces with `_`,
/// so "Agent Configuration" maps to `agent_configuration`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TopicKey(String);

impl TopicKey {
    #[must_use]
    pub fn from_topic(name: &str) -> Self {
        Self(name.to_lowercase().replace(' ', "_"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the backing resource, e.g. `agent_questions.json`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}_questions.json", self.0)
    }
}

impl fmt::Debug for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicKey({})", self.0)
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static topic → difficulty catalog used to populate selection controls.
///
/// Insertion order of topics is preserved. The catalog is configuration data and
/// is never derived from the question files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicCatalog {
    entries: Vec<(String, BTreeSet<Level>)>,
}

impl TopicCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog shipped with the quiz.
    #[must_use]
    pub fn builtin() -> Self {
        ["Agent", "Agent Configuration", "Handoff", "Tools", "Context"]
            .into_iter()
            .fold(Self::new(), |catalog, topic| {
                catalog.with_topic(topic, Level::ALL)
            })
    }

    /// Adds a topic, or merges levels into an existing one.
    #[must_use]
    pub fn with_topic(
        mut self,
        name: impl Into<String>,
        levels: impl IntoIterator<Item = Level>,
    ) -> Self {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, existing)) => existing.extend(levels),
            None => self.entries.push((name, levels.into_iter().collect())),
        }
        self
    }

    /// Topic names in catalog order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Available levels for a topic, or `None` if the topic is not listed.
    #[must_use]
    pub fn levels(&self, topic: &str) -> Option<&BTreeSet<Level>> {
        self.entries
            .iter()
            .find(|(name, _)| name == topic)
            .map(|(_, levels)| levels)
    }

    #[must_use]
    pub fn contains(&self, topic: &str, level: Level) -> bool {
        self.levels(topic).is_some_and(|levels| levels.contains(&level))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Level>)> {
        self.entries.iter().map(|(name, levels)| (name.as_str(), levels))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_key_lowercases_and_replaces_spaces() {
        let key = TopicKey::from_topic("Agent Configuration");
        assert_eq!(key.as_str(), "agent_configuration");
        assert_eq!(key.file_name(), "agent_configuration_questions.json");
    }

    #[test]
    fn builtin_catalog_keeps_order_and_levels() {
        let catalog = TopicCatalog::builtin();
        let topics: Vec<_> = catalog.topics().collect();
        assert_eq!(
            topics,
            ["Agent", "Agent Configuration", "Handoff", "Tools", "Context"]
        );
        let levels: Vec<_> = catalog.levels("Tools").unwrap().iter().copied().collect();
        assert_eq!(levels, Level::ALL);
        assert!(catalog.contains("Handoff", Level::Hard));
        assert!(!catalog.contains("Unknown Topic", Level::Easy));
    }

    #[test]
    fn with_topic_merges_duplicate_names() {
        let catalog = TopicCatalog::new()
            .with_topic("Agent", [Level::Easy])
            .with_topic("Agent", [Level::Hard]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.levels("Agent").unwrap().len(), 2);
    }
}
