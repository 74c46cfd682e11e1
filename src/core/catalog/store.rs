use std::collections::HashMap;

use super::{Header, Message};
use crate::utils::PathFilter;

/// Order in which messages are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// First-seen order.
    #[default]
    Insertion,
    ById,
    /// By first location (path, then line), then id.
    ByFile,
}

/// An ordered, id-keyed set of messages for one locale, or the locale-less template.
///
/// Ids are unique. Inserting an id that is already present replaces the stored
/// message but keeps its original position, so output stays diff-stable.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// `None` for the template catalog.
    pub locale: Option<String>,
    /// Pod path the catalog is loaded from / saved to, if any.
    pub pod_path: Option<String>,
    pub header: Option<Header>,
    messages: Vec<Message>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(locale: Option<&str>) -> Self {
        Self {
            locale: locale.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn template() -> Self {
        Self::new(None)
    }

    pub fn with_path(mut self, pod_path: impl Into<String>) -> Self {
        self.pod_path = Some(pod_path.into());
        self
    }

    /// Insert a message, replacing any message with the same id in place.
    pub fn insert(&mut self, message: Message) {
        if let Some(&position) = self.index.get(&message.id) {
            self.messages[position] = message;
            return;
        }
        self.index.insert(message.id.clone(), self.messages.len());
        self.messages.push(message);
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.index.get(id).map(|&position| &self.messages[position])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Message> {
        let position = *self.index.get(id)?;
        Some(&mut self.messages[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(|m| m.id.as_str())
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Live messages without a translation, optionally limited to those with a
    /// location matching `paths`.
    pub fn list_untranslated(&self, paths: Option<&PathFilter>) -> Vec<&Message> {
        self.messages
            .iter()
            .filter(|m| m.is_missing())
            .filter(|m| match paths {
                Some(filter) => m.locations.iter().any(|loc| filter.matches(&loc.path)),
                None => true,
            })
            .collect()
    }

    pub fn count_live(&self) -> usize {
        self.messages.iter().filter(|m| !m.obsolete).count()
    }

    pub fn count_translated(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.obsolete && m.is_translated())
            .count()
    }

    pub fn count_fuzzy(&self) -> usize {
        self.messages.iter().filter(|m| !m.obsolete && m.fuzzy).count()
    }

    /// Messages in output order: live messages first, obsolete ones last, each
    /// group ordered by `order`.
    pub fn sorted(&self, order: SortOrder) -> Vec<&Message> {
        let (mut live, mut obsolete): (Vec<&Message>, Vec<&Message>) =
            self.messages.iter().partition(|m| !m.obsolete);
        for group in [&mut live, &mut obsolete] {
            match order {
                SortOrder::Insertion => {}
                SortOrder::ById => group.sort_by(|a, b| a.id.cmp(&b.id)),
                SortOrder::ByFile => {
                    group.sort_by(|a, b| a.locations.cmp(&b.locations).then(a.id.cmp(&b.id)))
                }
            }
        }
        live.extend(obsolete);
        live
    }
}

impl FromIterator<Message> for Catalog {
    fn from_iter<T: IntoIterator<Item = Message>>(iter: T) -> Self {
        let mut catalog = Catalog::template();
        for message in iter {
            catalog.insert(message);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use crate::core::catalog::*;
    use crate::utils::PathFilter;
    use pretty_assertions::assert_eq;

    fn ids(messages: &[&Message]) -> Vec<String> {
        messages.iter().map(|m| m.id.clone()).collect()
    }

    #[test]
    fn test_insert_keeps_first_seen_position() {
        let mut catalog = Catalog::new(Some("fr"));
        catalog.insert(Message::new("b"));
        catalog.insert(Message::new("a"));
        catalog.insert(
            Message::new("b").with_location(Location::with_line("/views/late.html", 9)),
        );

        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            catalog.get("b").unwrap().locations,
            vec![Location::with_line("/views/late.html", 9)]
        );
    }

    #[test]
    fn test_get_mut() {
        let mut catalog: Catalog = [Message::new("Hello")].into_iter().collect();
        catalog.get_mut("Hello").unwrap().translation = Some("Hallo".to_string());
        assert!(catalog.get("Hello").unwrap().is_translated());
        assert!(catalog.get_mut("Missing").is_none());
    }

    #[test]
    fn test_list_untranslated_with_paths() {
        let mut catalog = Catalog::new(Some("de"));
        catalog.insert(
            Message::new("Home").with_location(Location::new("/content/pages/home.yaml", None)),
        );
        catalog.insert(
            Message::new("Hi").with_location(Location::with_line("/views/base.html", 2)),
        );
        catalog.insert(Message::new("Done").with_translation("Fertig"));

        assert_eq!(ids(&catalog.list_untranslated(None)), vec!["Home", "Hi"]);

        let filter = PathFilter::new(&["/views/".to_string()]).unwrap();
        assert_eq!(ids(&catalog.list_untranslated(Some(&filter))), vec!["Hi"]);
    }

    #[test]
    fn test_sorted_puts_obsolete_last() {
        let mut catalog = Catalog::template();
        let mut old = Message::new("a-old");
        old.obsolete = true;
        catalog.insert(old);
        catalog.insert(Message::new("c").with_location(Location::with_line("/b.html", 1)));
        catalog.insert(Message::new("b").with_location(Location::with_line("/a.html", 5)));

        assert_eq!(
            ids(&catalog.sorted(SortOrder::Insertion)),
            vec!["c", "b", "a-old"]
        );
        assert_eq!(ids(&catalog.sorted(SortOrder::ById)), vec!["b", "c", "a-old"]);
        assert_eq!(ids(&catalog.sorted(SortOrder::ByFile)), vec!["b", "c", "a-old"]);
    }

    #[test]
    fn test_counts() {
        let mut catalog = Catalog::new(Some("de"));
        catalog.insert(Message::new("a").with_translation("A"));
        let mut fuzzy = Message::new("b").with_translation("B");
        fuzzy.fuzzy = true;
        catalog.insert(fuzzy);
        catalog.insert(Message::new("c"));
        let mut old = Message::new("d").with_translation("D");
        old.obsolete = true;
        catalog.insert(old);

        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.count_live(), 3);
        assert_eq!(catalog.count_translated(), 2);
        assert_eq!(catalog.count_fuzzy(), 1);
    }
}
