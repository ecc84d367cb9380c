//! The property catalog
//!
//! An ordered, owned collection of listings. The catalog knows nothing about
//! locking or storage: callers that share it wrap it themselves, and callers
//! that persist it mutate a clone and swap it in once the write succeeded.

use rand::{distr::Alphanumeric, Rng};

use crate::model::{NewProperty, Property, PropertyUpdate};

/// Length of generated identifiers
pub const ID_LEN: usize = 8;

/// Generates a random alphanumeric identifier not rejected by `taken`
pub fn fresh_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .collect();
        if !taken(&id) {
            return id;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from records that already carry identifiers
    ///
    /// Later duplicates of an identifier are dropped so the uniqueness
    /// invariant holds no matter what the source contained.
    pub fn from_properties(properties: Vec<Property>) -> Self {
        let mut catalog = Self::new();
        for property in properties {
            if catalog.get(&property.id).is_none() {
                catalog.properties.push(property);
            } else {
                tracing::warn!(id = %property.id, "dropping duplicate property id");
            }
        }
        catalog
    }

    pub fn all(&self) -> &[Property] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.id == id)
    }

    /// Appends a new listing and returns the stored record
    ///
    /// The identifier is freshly generated; rating and review count start at
    /// zero.
    pub fn add(&mut self, payload: NewProperty) -> Property {
        let id = fresh_id(|candidate| self.get(candidate).is_some());

        let record = Property {
            id,
            title: payload.title,
            location: payload.location,
            description: payload.description,
            price: payload.price,
            price_unit: payload.price_unit,
            bedrooms: payload.bedrooms,
            bathrooms: payload.bathrooms,
            capacity: payload.capacity,
            featured: payload.featured,
            rating: 0.0,
            reviews: 0,
            images: payload.images,
            amenities: payload.amenities,
        };

        self.properties.push(record.clone());
        record
    }

    /// Replaces the fields present in `changes` on the listing `id`
    ///
    /// Returns the updated record, or `None` without touching the catalog
    /// when the identifier does not resolve. Position and identifier are
    /// preserved.
    pub fn update(&mut self, id: &str, changes: PropertyUpdate) -> Option<Property> {
        let property = self.properties.iter_mut().find(|p| p.id == id)?;

        let PropertyUpdate {
            title,
            location,
            description,
            price,
            price_unit,
            bedrooms,
            bathrooms,
            capacity,
            featured,
            rating,
            reviews,
            images,
            amenities,
        } = changes;

        if let Some(v) = title {
            property.title = v;
        }
        if let Some(v) = location {
            property.location = v;
        }
        if let Some(v) = description {
            property.description = v;
        }
        if let Some(v) = price {
            property.price = v;
        }
        if let Some(v) = price_unit {
            property.price_unit = v;
        }
        if let Some(v) = bedrooms {
            property.bedrooms = v;
        }
        if let Some(v) = bathrooms {
            property.bathrooms = v;
        }
        if let Some(v) = capacity {
            property.capacity = v;
        }
        if let Some(v) = featured {
            property.featured = v;
        }
        if let Some(v) = rating {
            property.rating = v;
        }
        if let Some(v) = reviews {
            property.reviews = v;
        }
        if let Some(v) = images {
            property.images = v;
        }
        if let Some(v) = amenities {
            property.amenities = v;
        }

        Some(property.clone())
    }

    /// Removes the listing `id` and returns it, `None` if it was not present
    pub fn delete(&mut self, id: &str) -> Option<Property> {
        let index = self.properties.iter().position(|p| p.id == id)?;
        Some(self.properties.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceUnit;

    fn payload(title: &str) -> NewProperty {
        NewProperty {
            title: title.to_string(),
            location: "Martil".to_string(),
            description: "Near the corniche".to_string(),
            price: 120.0,
            price_unit: PriceUnit::Night,
            bedrooms: 2,
            bathrooms: 1,
            capacity: 4,
            featured: false,
            images: vec!["https://images.example.com/1.jpg".to_string()],
            amenities: vec!["Free WiFi".to_string()],
        }
    }

    #[test]
    fn add_assigns_fresh_id_and_appends() {
        let mut catalog = Catalog::new();
        let first = catalog.add(payload("First"));
        let second = catalog.add(payload("Second"));

        assert_eq!(catalog.len(), 2);
        assert_ne!(first.id, second.id);
        assert_eq!(first.id.len(), ID_LEN);
        assert_eq!(catalog.all()[1], second);
        assert_eq!(second.rating, 0.0);
        assert_eq!(second.reviews, 0);
    }

    #[test]
    fn fresh_id_skips_taken_candidates() {
        let calls = std::cell::Cell::new(0);
        let id = fresh_id(|_| {
            let n = calls.get();
            calls.set(n + 1);
            n < 3
        });

        assert_eq!(calls.get(), 4);
        assert_eq!(id.len(), ID_LEN);
    }

    #[test]
    fn update_replaces_present_fields_only() {
        let mut catalog = Catalog::new();
        catalog.add(payload("First"));
        let target = catalog.add(payload("Second"));
        catalog.add(payload("Third"));

        let updated = catalog
            .update(
                &target.id,
                PropertyUpdate {
                    title: Some("Renamed".to_string()),
                    price: Some(99.5),
                    price_unit: Some(PriceUnit::Week),
                    featured: Some(true),
                    ..PropertyUpdate::default()
                },
            )
            .expect("property exists");

        assert_eq!(updated.id, target.id);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.price, 99.5);
        assert_eq!(updated.price_unit, PriceUnit::Week);
        assert!(updated.featured);
        assert_eq!(updated.location, target.location);
        assert_eq!(updated.images, target.images);
        assert_eq!(catalog.all()[1], updated);
        assert_eq!(catalog.get(&target.id), Some(&updated));
    }

    #[test]
    fn update_unknown_id_leaves_catalog_unchanged() {
        let mut catalog = Catalog::new();
        catalog.add(payload("Only"));
        let before = catalog.clone();

        let result = catalog.update(
            "missing",
            PropertyUpdate {
                title: Some("Ghost".to_string()),
                ..PropertyUpdate::default()
            },
        );

        assert!(result.is_none());
        assert_eq!(catalog, before);
    }

    #[test]
    fn delete_removes_and_is_noop_when_absent() {
        let mut catalog = Catalog::new();
        let first = catalog.add(payload("First"));
        let second = catalog.add(payload("Second"));

        assert_eq!(catalog.delete(&first.id), Some(first.clone()));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(&first.id).is_none());
        assert_eq!(catalog.all()[0], second);

        assert_eq!(catalog.delete(&first.id), None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn from_properties_drops_duplicate_ids() {
        let mut source = Catalog::new();
        let record = source.add(payload("Original"));
        let mut duplicate = record.clone();
        duplicate.title = "Copy".to_string();

        let catalog = Catalog::from_properties(vec![record.clone(), duplicate]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(&record.id).map(|p| p.title.as_str()), Some("Original"));
    }
}
