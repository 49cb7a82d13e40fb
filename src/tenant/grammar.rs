//! Hostname grammar
//!
//! The one place that decides what a hostname means. Both the edge router
//! and the descriptor resolver call [`classify`], so the two can never
//! disagree about which tenant a request belongs to.
//!
//! Matching works from the end of the hostname: the last two labels must be
//! the platform root and TLD (`near-me`, `us`), and the labels in front of
//! them are handed to an ordered rule table. The first rule that accepts
//! wins:
//!
//! | order | rule            | shape                                  |
//! |-------|-----------------|----------------------------------------|
//! | 1     | special         | `[www.]<special>[.<anything>].near-me.us` |
//! | 2     | category + city | `[<extra>.]<category>.<city>.near-me.us` |
//! | 3     | category        | `<category>.near-me.us`, not reserved  |
//!
//! Anything else is [`HostMatch::Unrecognized`].

use super::tables::TenantTables;

/// Outcome of classifying a hostname
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatch {
    /// Bespoke city-agnostic tenant, e.g. `water-refill.near-me.us`
    Special { category: String },
    /// Category scoped to one city, e.g. `nail-salons.dallas.near-me.us`
    CategoryCity { category: String, city: String },
    /// Category across all cities, e.g. `barbers.near-me.us`
    Category { category: String },
    Unrecognized,
}

/// One row of the rule table: looks at the labels in front of the suffix
struct Rule {
    name: &'static str,
    resolve: fn(&[&str], &TenantTables) -> Option<HostMatch>,
}

/// Evaluated top to bottom, first match wins
const RULES: &[Rule] = &[
    Rule {
        name: "special",
        resolve: match_special,
    },
    Rule {
        name: "category-city",
        resolve: match_category_city,
    },
    Rule {
        name: "category",
        resolve: match_category,
    },
];

/// Classify a raw hostname (a `Host` header value is fine: port, case and a
/// trailing dot are normalized away)
pub fn classify(host: &str, tables: &TenantTables) -> HostMatch {
    classify_with_rule(host, tables).map_or(HostMatch::Unrecognized, |(_, m)| m)
}

/// Like [`classify`], also naming the rule that matched
pub fn classify_with_rule(host: &str, tables: &TenantTables) -> Option<(&'static str, HostMatch)> {
    let host = normalize_host(host);
    let labels = tenant_labels(&host, tables)?;
    RULES
        .iter()
        .find_map(|rule| (rule.resolve)(&labels, tables).map(|m| (rule.name, m)))
}

/// Strip port and trailing dot, lower-case
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.split(':').next().unwrap_or(host);
    host.trim_end_matches('.').to_ascii_lowercase()
}

/// Labels in front of `<root>.<tld>`, or `None` if the suffix is missing,
/// nothing precedes it, or any label is not a valid slug
fn tenant_labels<'a>(host: &'a str, tables: &TenantTables) -> Option<Vec<&'a str>> {
    let labels: Vec<&str> = host.split('.').collect();
    let [prefix @ .., root, tld] = labels.as_slice() else {
        return None;
    };
    if *root != tables.root_label() || *tld != tables.tld() || prefix.is_empty() {
        return None;
    }
    if !prefix.iter().all(|label| is_valid_label(label)) {
        return None;
    }
    Some(prefix.to_vec())
}

/// Non-empty hostname label: ASCII letters, digits, `-` and `_`
///
/// Labels end up in origin paths, so nothing that could alter a URL or a
/// file path gets through.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// First label, or the first after leading reserved labels (`www.`)
fn match_special(labels: &[&str], tables: &TenantTables) -> Option<HostMatch> {
    let first = labels.iter().find(|label| !tables.is_reserved(label))?;
    tables.is_special(first).then(|| HostMatch::Special {
        category: (*first).to_string(),
    })
}

fn match_category_city(labels: &[&str], _tables: &TenantTables) -> Option<HostMatch> {
    let [.., category, city] = labels else {
        return None;
    };
    Some(HostMatch::CategoryCity {
        category: (*category).to_string(),
        city: (*city).to_string(),
    })
}

fn match_category(labels: &[&str], tables: &TenantTables) -> Option<HostMatch> {
    let [category] = labels else {
        return None;
    };
    if tables.is_reserved(category) {
        return None;
    }
    Some(HostMatch::Category {
        category: (*category).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_city(category: &str, city: &str) -> HostMatch {
        HostMatch::CategoryCity {
            category: category.to_string(),
            city: city.to_string(),
        }
    }

    #[test]
    fn test_category_city() {
        let tables = TenantTables::default();
        assert_eq!(
            classify("nail-salons.dallas.near-me.us", &tables),
            category_city("nail-salons", "dallas")
        );
        assert_eq!(
            classify("plumbers.san-francisco.near-me.us", &tables),
            category_city("plumbers", "san-francisco")
        );
    }

    #[test]
    fn test_normalization() {
        let tables = TenantTables::default();
        assert_eq!(
            classify("Nail-Salons.Dallas.Near-Me.US:8443", &tables),
            category_city("nail-salons", "dallas")
        );
        assert_eq!(
            classify("nail-salons.dallas.near-me.us.", &tables),
            category_city("nail-salons", "dallas")
        );
    }

    #[test]
    fn test_extra_leading_labels_match_from_suffix() {
        let tables = TenantTables::default();
        assert_eq!(
            classify("www.nail-salons.dallas.near-me.us", &tables),
            category_city("nail-salons", "dallas")
        );
        assert_eq!(
            classify("a.b.nail-salons.dallas.near-me.us", &tables),
            category_city("nail-salons", "dallas")
        );
    }

    #[test]
    fn test_special_takes_precedence() {
        let tables = TenantTables::default();
        let special = HostMatch::Special {
            category: "water-refill".to_string(),
        };
        assert_eq!(classify("water-refill.near-me.us", &tables), special);
        // Would otherwise be a category+city tenant
        assert_eq!(classify("water-refill.dallas.near-me.us", &tables), special);
        assert_eq!(
            classify("water-refill.a.b.near-me.us", &tables),
            special
        );
        assert_eq!(
            classify_with_rule("water-refill.dallas.near-me.us", &tables).map(|(rule, _)| rule),
            Some("special")
        );
    }

    #[test]
    fn test_reserved_prefix_before_special() {
        let tables = TenantTables::default();
        let special = HostMatch::Special {
            category: "water-refill".to_string(),
        };
        assert_eq!(classify("www.water-refill.near-me.us", &tables), special);
        assert_eq!(classify("www.app.water-refill.dallas.near-me.us", &tables), special);
        // A reserved label in front of an ordinary city stays category+city
        assert_eq!(
            classify("www.nail-salons.near-me.us", &tables),
            category_city("www", "nail-salons")
        );
    }

    #[test]
    fn test_plain_category() {
        let tables = TenantTables::default();
        assert_eq!(
            classify("barbers.near-me.us", &tables),
            HostMatch::Category {
                category: "barbers".to_string()
            }
        );
    }

    #[test]
    fn test_reserved_labels() {
        let tables = TenantTables::default();
        assert_eq!(classify("app.near-me.us", &tables), HostMatch::Unrecognized);
        assert_eq!(classify("www.near-me.us", &tables), HostMatch::Unrecognized);
        // Only the single-label form is reserved
        assert_eq!(
            classify("www.dallas.near-me.us", &tables),
            category_city("www", "dallas")
        );
    }

    #[test]
    fn test_unrecognized() {
        let tables = TenantTables::default();
        for host in [
            "",
            "localhost",
            "localhost:5173",
            "192.168.1.1",
            "[::1]:8080",
            "foo.bar.baz.qux",
            "near-me.us",
            "us",
            "nail-salons.dallas.near-me.com",
            "nail-salons.dallas.nearme.us",
            "nail-salons..near-me.us",
            ".near-me.us",
            "nail salons.dallas.near-me.us",
            "nail-salons.dallas/x.near-me.us",
            "near-me.us.evil.com",
        ] {
            assert_eq!(
                classify(host, &tables),
                HostMatch::Unrecognized,
                "host: {host:?}"
            );
        }
    }

    #[test]
    fn test_custom_suffix() {
        let cfg = crate::config::TenancyConfig {
            root_label: "near-me".to_string(),
            tld: "test".to_string(),
            ..Default::default()
        };
        let tables = TenantTables::from_config(&cfg);
        assert_eq!(
            classify("nail-salons.dallas.near-me.test", &tables),
            category_city("nail-salons", "dallas")
        );
        assert_eq!(
            classify("nail-salons.dallas.near-me.us", &tables),
            HostMatch::Unrecognized
        );
    }
}
