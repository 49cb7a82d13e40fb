//! Page title generation

use super::descriptor::{ALL_CATEGORIES, ALL_CITIES};
use super::tables::TenantTables;

/// Title shown for the all-categories sentinel
const ALL_CATEGORIES_LABEL: &str = "Local Businesses";

/// `san-francisco` → `San Francisco`
pub fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-readable label for a category slug
pub fn category_label(category: &str, tables: &TenantTables) -> String {
    if category == ALL_CATEGORIES {
        return ALL_CATEGORIES_LABEL.to_string();
    }
    tables
        .display_name(category)
        .map_or_else(|| title_case(category), ToString::to_string)
}

/// Page title for a resolved tenant
///
/// City-wide tenants read "`<Category>` Near Me"; city tenants read
/// "`<Category>` in `<City>`", with ", `<State>`" appended when known.
pub fn page_title(category: &str, city: &str, state: &str, tables: &TenantTables) -> String {
    let category = category_label(category, tables);
    if city == ALL_CITIES {
        format!("{category} Near Me")
    } else if state.is_empty() {
        format!("{category} in {city}")
    } else {
        format!("{category} in {city}, {state}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::SubdomainDescriptor;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("san-francisco"), "San Francisco");
        assert_eq!(title_case("dallas"), "Dallas");
        assert_eq!(title_case("winston-salem-"), "Winston Salem");
        assert_eq!(title_case("--a--b"), "A B");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_page_title_templates() {
        let tables = TenantTables::default();
        assert_eq!(
            page_title("nail-salons", "Dallas", "TX", &tables),
            "Nail Salons in Dallas, TX"
        );
        assert_eq!(
            page_title("nail-salons", "Walla Walla", "", &tables),
            "Nail Salons in Walla Walla"
        );
        assert_eq!(
            page_title("barbers", ALL_CITIES, "", &tables),
            "Barbers Near Me"
        );
        assert_eq!(
            page_title("water-refill", ALL_CITIES, "", &tables),
            "Water Refill Stations Near Me"
        );
        assert_eq!(
            page_title(ALL_CATEGORIES, ALL_CITIES, "", &tables),
            "Local Businesses Near Me"
        );
    }

    #[test]
    fn test_title_is_repeatable() {
        let tables = TenantTables::default();
        let d = SubdomainDescriptor::resolve("nail-salons.dallas.near-me.us", &tables);
        let first = d.title(&tables);
        for _ in 0..3 {
            assert_eq!(d.title(&tables), first);
        }
    }

    #[test]
    fn test_title_reflects_hostname() {
        let tables = TenantTables::default();
        let d = SubdomainDescriptor::resolve("nail-salons.dallas.near-me.us", &tables);
        let title = d.title(&tables);
        assert!(title.contains("Nail Salons"), "title: {title}");
        assert!(title.contains("Dallas"), "title: {title}");
    }
}
