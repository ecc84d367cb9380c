//! Property search
//!
//! A pure, order-preserving filter over the catalog. The result keeps the
//! catalog's order and an empty result is not an error.

use crate::model::{Property, SearchParams};

/// Constraints narrowing the catalog for display
///
/// The default value accepts every property.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substring of title, location or description
    pub term: String,
    /// Case-insensitive substring of the location alone
    pub location: String,
    /// Inclusive lower price bound
    pub min_price: f64,
    /// Inclusive upper price bound
    pub max_price: f64,
    /// Zero means no constraint
    pub min_bedrooms: u32,
    /// Zero means no constraint
    pub min_guests: u32,
    pub featured_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            term: String::new(),
            location: String::new(),
            min_price: 0.0,
            max_price: f64::INFINITY,
            min_bedrooms: 0,
            min_guests: 0,
            featured_only: false,
        }
    }
}

impl FilterCriteria {
    /// Criteria matching free text only
    pub fn text(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Returns true when `property` satisfies every constraint
    pub fn matches(&self, property: &Property) -> bool {
        self.matches_folded(
            property,
            &self.term.to_lowercase(),
            &self.location.to_lowercase(),
        )
    }

    fn matches_folded(&self, property: &Property, term: &str, location: &str) -> bool {
        if !term.is_empty() {
            let hit = [&property.title, &property.location, &property.description]
                .iter()
                .any(|field| field.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        if !location.is_empty() && !property.location.to_lowercase().contains(location) {
            return false;
        }

        property.price >= self.min_price
            && property.price <= self.max_price
            && (self.min_bedrooms == 0 || property.bedrooms >= self.min_bedrooms)
            && (self.min_guests == 0 || property.capacity >= self.min_guests)
            && (!self.featured_only || property.featured)
    }
}

impl From<&SearchParams> for FilterCriteria {
    fn from(params: &SearchParams) -> Self {
        let defaults = FilterCriteria::default();
        Self {
            term: params.q.clone().unwrap_or_default(),
            location: params.location.clone().unwrap_or_default(),
            min_price: params.min_price.unwrap_or(defaults.min_price),
            max_price: params.max_price.unwrap_or(defaults.max_price),
            min_bedrooms: params.min_bedrooms.unwrap_or(0),
            min_guests: params.guests.unwrap_or(0),
            featured_only: params.featured.unwrap_or(false),
        }
    }
}

/// Returns the properties matching `criteria`, in catalog order
pub fn filter_properties(properties: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    // Fold the needles once instead of per property
    let term = criteria.term.to_lowercase();
    let location = criteria.location.to_lowercase();

    properties
        .iter()
        .filter(|property| criteria.matches_folded(property, &term, &location))
        .cloned()
        .collect()
}

/// Featured listings for the home page
pub fn featured(properties: &[Property]) -> Vec<Property> {
    filter_properties(
        properties,
        &FilterCriteria {
            featured_only: true,
            ..FilterCriteria::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceUnit;
    use test_case::test_case;

    fn property(id: &str, title: &str, location: &str, price: f64, bedrooms: u32, featured: bool) -> Property {
        Property {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            description: String::new(),
            price,
            price_unit: PriceUnit::Night,
            bedrooms,
            bathrooms: 1,
            capacity: bedrooms * 2,
            featured,
            rating: 0.0,
            reviews: 0,
            images: vec![],
            amenities: vec![],
        }
    }

    fn catalog() -> Vec<Property> {
        vec![
            property("1", "Sea View Villa", "Martil", 200.0, 3, true),
            property("2", "City Apartment", "Tangier", 80.0, 1, false),
        ]
    }

    fn ids(properties: &[Property]) -> Vec<&str> {
        properties.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn default_criteria_keep_everything_in_order() {
        let mut properties = catalog();
        properties.push(property("3", "Riad", "Tetouan", 0.0, 0, false));

        let result = filter_properties(&properties, &FilterCriteria::default());

        assert_eq!(result, properties);
    }

    #[test]
    fn term_matches_title_case_insensitively() {
        let criteria = FilterCriteria {
            max_price: 1000.0,
            ..FilterCriteria::text("villa")
        };

        assert_eq!(ids(&filter_properties(&catalog(), &criteria)), vec!["1"]);
    }

    #[test]
    fn min_price_excludes_cheaper_listings() {
        let criteria = FilterCriteria {
            min_price: 100.0,
            max_price: 1000.0,
            ..FilterCriteria::default()
        };

        assert_eq!(ids(&filter_properties(&catalog(), &criteria)), vec!["1"]);
    }

    #[test_case("tangier", &["2"] ; "location field")]
    #[test_case("APART", &["2"] ; "upper case term")]
    #[test_case("beach", &["1"] ; "description field")]
    #[test_case("", &["1", "2"] ; "empty term")]
    #[test_case("castle", &[] ; "no match")]
    fn term_searches_title_location_and_description(term: &str, expected: &[&str]) {
        let mut properties = catalog();
        properties[0].description = "Steps from the beach".to_string();

        let result = filter_properties(&properties, &FilterCriteria::text(term));

        assert_eq!(ids(&result), expected);
    }

    #[test_case(80.0, 80.0, &["2"] ; "inclusive on both bounds")]
    #[test_case(80.01, 199.99, &[] ; "strictly between")]
    #[test_case(0.0, 200.0, &["1", "2"] ; "whole range")]
    fn price_bounds_are_inclusive(min: f64, max: f64, expected: &[&str]) {
        let criteria = FilterCriteria {
            min_price: min,
            max_price: max,
            ..FilterCriteria::default()
        };

        assert_eq!(ids(&filter_properties(&catalog(), &criteria)), expected);
    }

    #[test_case(0, &["1", "2"] ; "zero is unconstrained")]
    #[test_case(1, &["1", "2"] ; "one bedroom")]
    #[test_case(2, &["1"] ; "two bedrooms")]
    #[test_case(4, &[] ; "too many")]
    fn min_bedrooms(min_bedrooms: u32, expected: &[&str]) {
        let criteria = FilterCriteria {
            min_bedrooms,
            ..FilterCriteria::default()
        };

        assert_eq!(ids(&filter_properties(&catalog(), &criteria)), expected);
    }

    #[test]
    fn featured_only_and_guest_capacity() {
        let featured_only = FilterCriteria {
            featured_only: true,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_properties(&catalog(), &featured_only)), vec!["1"]);
        assert_eq!(ids(&featured(&catalog())), vec!["1"]);

        let guests = FilterCriteria {
            min_guests: 3,
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&filter_properties(&catalog(), &guests)), vec!["1"]);
    }

    #[test]
    fn location_filter_ignores_title() {
        let mut properties = catalog();
        properties.push(property("3", "Martil Loft", "Tetouan", 60.0, 1, false));

        let criteria = FilterCriteria {
            location: "martil".to_string(),
            ..FilterCriteria::default()
        };

        assert_eq!(ids(&filter_properties(&properties, &criteria)), vec!["1"]);
    }

    #[test]
    fn result_is_exactly_the_matching_subset() {
        let properties = vec![
            property("a", "Beach House", "Martil", 150.0, 2, true),
            property("b", "Beach Hut", "Martil", 40.0, 0, false),
            property("c", "Mountain Cabin", "Chefchaouen", 90.0, 2, true),
            property("d", "Beach Villa", "Cabo Negro", 450.0, 5, true),
        ];
        let criteria = FilterCriteria {
            term: "beach".to_string(),
            min_price: 50.0,
            max_price: 500.0,
            min_bedrooms: 2,
            featured_only: true,
            ..FilterCriteria::default()
        };

        let result = filter_properties(&properties, &criteria);

        for p in &properties {
            assert_eq!(result.contains(p), criteria.matches(p), "property {}", p.id);
        }
        assert_eq!(ids(&result), vec!["a", "d"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let criteria = FilterCriteria {
            term: "a".to_string(),
            min_price: 50.0,
            ..FilterCriteria::default()
        };

        let once = filter_properties(&catalog(), &criteria);
        let twice = filter_properties(&once, &criteria);

        assert_eq!(once, twice);
    }

    #[test]
    fn criteria_from_search_params() {
        let params = SearchParams {
            q: Some("villa".to_string()),
            max_price: Some(300.0),
            guests: Some(4),
            featured: Some(true),
            ..SearchParams::default()
        };

        let criteria = FilterCriteria::from(&params);

        assert_eq!(criteria.term, "villa");
        assert_eq!(criteria.min_price, 0.0);
        assert_eq!(criteria.max_price, 300.0);
        assert_eq!(criteria.min_guests, 4);
        assert!(criteria.featured_only);
        assert_eq!(FilterCriteria::from(&SearchParams::default()), FilterCriteria::default());
    }
}
