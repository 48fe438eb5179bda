//! Text matching for entity queries.

use crate::entity::{MapEntity, TAG_HOUSENUMBER, TAG_PLACE, TAG_STREET};
use crate::finder::{Query, SearchMode};

/// Pattern that matches every entity of the queried kind.
const WILDCARD: &str = "*";

/// Parsed `street [housenumber][, place]` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressPattern {
    pub street: String,
    pub housenumber: Option<String>,
    pub place: Option<String>,
}

impl AddressPattern {
    pub fn parse(pattern: &str) -> Self {
        let (street_part, place) = match pattern.split_once(',') {
            Some((street, place)) => {
                let place = place.trim();
                (street.trim(), (!place.is_empty()).then(|| place.to_string()))
            }
            None => (pattern.trim(), None),
        };

        let mut street = street_part.to_string();
        let mut housenumber = None;
        if let Some((name, number)) = street_part.rsplit_once(char::is_whitespace) {
            if number.starts_with(|c: char| c.is_ascii_digit()) && !name.trim().is_empty() {
                street = name.trim().to_string();
                housenumber = Some(number.to_string());
            }
        }

        Self {
            street,
            housenumber,
            place,
        }
    }
}

/// Matches entities against the mode, pattern and way filter of a query.
pub struct PatternMatcher<'q> {
    query: &'q Query,
    needle: String,
    tag: Option<(String, String)>,
    address: Option<AddressPattern>,
    fuzzy_threshold: f64,
}

impl<'q> PatternMatcher<'q> {
    pub fn new(query: &'q Query, fuzzy_threshold: f64) -> Self {
        let pattern = query.pattern.trim();
        let address = (query.mode == SearchMode::Address).then(|| AddressPattern::parse(pattern));
        let tag = match (query.mode, pattern.split_once('=')) {
            (SearchMode::Address, _) => None,
            (_, Some((key, value))) if !key.trim().is_empty() => {
                Some((key.trim().to_string(), value.trim().to_lowercase()))
            }
            _ => None,
        };

        Self {
            query,
            needle: pattern.to_lowercase(),
            tag,
            address,
            fuzzy_threshold,
        }
    }

    /// Place part of an address pattern.
    pub fn place(&self) -> Option<&str> {
        self.address.as_ref()?.place.as_deref()
    }

    /// Whether `entity` is a place node named like the address place part.
    pub fn matches_place(&self, entity: &MapEntity) -> bool {
        let Some(place) = self.place() else {
            return false;
        };
        matches!(entity, MapEntity::Node(_))
            && entity.tag(TAG_PLACE).is_some()
            && entity
                .name()
                .is_some_and(|name| self.text_matches(name, &place.to_lowercase()))
    }

    pub fn matches(&self, entity: &MapEntity) -> bool {
        match self.query.mode {
            SearchMode::Entity => self.matches_text_or_tag(entity),
            SearchMode::Node => {
                matches!(entity, MapEntity::Node(_)) && self.matches_text_or_tag(entity)
            }
            SearchMode::Way => match entity {
                MapEntity::Way(way) => {
                    let accepted = self
                        .query
                        .way_filter
                        .as_ref()
                        .map_or(true, |filter| filter.is_accepted(way));
                    accepted && self.matches_text_or_tag(entity)
                }
                MapEntity::Node(_) => false,
            },
            SearchMode::Address => self.matches_address(entity),
        }
    }

    fn matches_text_or_tag(&self, entity: &MapEntity) -> bool {
        if self.needle == WILDCARD {
            return true;
        }
        if let Some((key, value)) = &self.tag {
            return entity
                .tag(key)
                .is_some_and(|actual| value == WILDCARD || actual.to_lowercase() == *value);
        }
        entity
            .name()
            .is_some_and(|name| self.text_matches(name, &self.needle))
    }

    fn matches_address(&self, entity: &MapEntity) -> bool {
        let Some(address) = &self.address else {
            return false;
        };
        let street = address.street.to_lowercase();

        if let Some(actual) = entity.tag(TAG_STREET) {
            if self.text_matches(actual, &street) {
                return match &address.housenumber {
                    Some(number) => entity
                        .tag(TAG_HOUSENUMBER)
                        .is_some_and(|actual| actual.eq_ignore_ascii_case(number)),
                    None => true,
                };
            }
        }

        address.housenumber.is_none()
            && matches!(entity, MapEntity::Way(_))
            && entity
                .name()
                .is_some_and(|name| self.text_matches(name, &street))
    }

    /// Case-insensitive containment, or fuzzy similarity above the threshold.
    fn text_matches(&self, text: &str, needle: &str) -> bool {
        let text = text.to_lowercase();
        text.contains(needle) || strsim::jaro_winkler(&text, needle) >= self.fuzzy_threshold
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::entity::{MapNode, MapWay, Position, TagFilter};

    fn query(mode: SearchMode, pattern: &str) -> Query {
        Query {
            mode,
            pattern: pattern.to_string(),
            position: Position::new(0.0, 0.0),
            way_filter: None,
        }
    }

    fn node(name: &str, tags: &[(&str, &str)]) -> MapEntity {
        MapEntity::Node(MapNode {
            id: 1,
            name: Some(name.to_string()),
            position: Position::new(0.0, 0.0),
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    fn way(name: &str, tags: &[(&str, &str)]) -> MapEntity {
        MapEntity::Way(MapWay {
            id: 2,
            name: Some(name.to_string()),
            nodes: vec![],
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        })
    }

    #[test]
    fn parses_full_address() {
        let parsed = AddressPattern::parse("Main Street 12a, Springfield");
        assert_eq!(parsed.street, "Main Street");
        assert_eq!(parsed.housenumber.as_deref(), Some("12a"));
        assert_eq!(parsed.place.as_deref(), Some("Springfield"));
    }

    #[test]
    fn parses_street_only() {
        let parsed = AddressPattern::parse("Elm Road");
        assert_eq!(parsed.street, "Elm Road");
        assert_eq!(parsed.housenumber, None);
        assert_eq!(parsed.place, None);
    }

    #[test]
    fn name_match_is_case_insensitive_and_fuzzy() {
        let q = query(SearchMode::Entity, "bakery");
        let matcher = PatternMatcher::new(&q, 0.88);
        assert!(matcher.matches(&node("Corner Bakery", &[])));
        assert!(matcher.matches(&node("Bakkery", &[])));
        assert!(!matcher.matches(&node("Butcher", &[])));
    }

    #[test]
    fn tag_pattern_matches_tag_values() {
        let q = query(SearchMode::Entity, "amenity=cafe");
        let matcher = PatternMatcher::new(&q, 0.88);
        assert!(matcher.matches(&node("Anything", &[("amenity", "Cafe")])));
        assert!(!matcher.matches(&node("Anything", &[("amenity", "pub")])));
    }

    #[test]
    fn node_mode_skips_ways() {
        let q = query(SearchMode::Node, "main");
        let matcher = PatternMatcher::new(&q, 0.88);
        assert!(!matcher.matches(&way("Main Street", &[])));
    }

    #[test]
    fn way_mode_applies_filter() {
        let mut q = query(SearchMode::Way, "*");
        q.way_filter = Some(Arc::new(TagFilter::parse("highway").expect("filter")));
        let matcher = PatternMatcher::new(&q, 0.88);
        assert!(matcher.matches(&way("Main Street", &[("highway", "primary")])));
        assert!(!matcher.matches(&way("River", &[("waterway", "river")])));
    }

    #[test]
    fn address_requires_housenumber_when_given() {
        let q = query(SearchMode::Address, "Main Street 5");
        let matcher = PatternMatcher::new(&q, 0.88);
        let five = node("", &[(TAG_STREET, "Main Street"), (TAG_HOUSENUMBER, "5")]);
        let seven = node("", &[(TAG_STREET, "Main Street"), (TAG_HOUSENUMBER, "7")]);
        assert!(matcher.matches(&five));
        assert!(!matcher.matches(&seven));
        assert!(!matcher.matches(&way("Main Street", &[])));
    }

    #[test]
    fn address_without_number_accepts_street_ways() {
        let q = query(SearchMode::Address, "main street");
        let matcher = PatternMatcher::new(&q, 0.88);
        assert!(matcher.matches(&way("Main Street", &[("highway", "residential")])));
    }
}
