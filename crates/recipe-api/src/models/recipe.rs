//! The recipe record and its nutrient map.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Nutrient keys shown in the detail view, in display order.
pub const NUTRIENT_KEYS: [&str; 9] = [
    "calories",
    "carbohydrateContent",
    "cholesterolContent",
    "fiberContent",
    "proteinContent",
    "saturatedFatContent",
    "sodiumContent",
    "sugarContent",
    "fatContent",
];

/// A recipe as returned by the API.
///
/// Records are owned by the remote service; this crate only reads them.
///
/// # Examples
///
/// ```
/// use recipe_api_rs::models::Recipe;
///
/// let json = r#"{"id": 7, "title": "Apple Pie", "rating": 4.8,
///                "nutrients": {"calories": "389 kcal", "unsaturatedFatContent": "2 g"}}"#;
/// let recipe: Recipe = serde_json::from_str(json).unwrap();
///
/// assert_eq!(recipe.id, 7);
/// assert_eq!(recipe.cuisine, None);
/// let nutrients = recipe.nutrients.as_ref().unwrap();
/// assert_eq!(nutrients.get("calories").as_deref(), Some("389 kcal"));
/// assert_eq!(nutrients.get("unsaturatedFatContent").as_deref(), Some("2 g"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique positive identifier.
    pub id: u64,

    /// Recipe title.
    pub title: String,

    /// Cuisine the recipe belongs to.
    #[serde(default)]
    pub cuisine: Option<String>,

    /// Average rating, conventionally 0.0 to 5.0.
    #[serde(default)]
    pub rating: Option<f64>,

    /// Preparation time in minutes.
    #[serde(default)]
    pub prep_time: Option<u32>,

    /// Cooking time in minutes.
    #[serde(default)]
    pub cook_time: Option<u32>,

    /// Total time in minutes.
    #[serde(default)]
    pub total_time: Option<u32>,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Nutrition facts keyed by nutrient name.
    #[serde(default)]
    pub nutrients: Option<Nutrients>,

    /// Serving size (e.g. "8 servings").
    #[serde(default)]
    pub serves: Option<String>,
}

/// Nutrient name to value mapping.
///
/// The service sends values as strings ("389 kcal") but does not enforce it,
/// so any JSON value is accepted. Keys outside [`NUTRIENT_KEYS`] are kept
/// and serialized back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nutrients(BTreeMap<String, serde_json::Value>);

impl Nutrients {
    /// Creates an empty nutrient map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `key` as display text.
    ///
    /// Strings are returned as-is, other scalars in their JSON form, and
    /// `null` as `None`.
    pub fn get(&self, key: &str) -> Option<Cow<'_, str>> {
        match self.0.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Inserts or replaces a nutrient value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns every known nutrient key paired with its value (if any), in
    /// display order.
    pub fn known(&self) -> impl Iterator<Item = (&'static str, Option<Cow<'_, str>>)> + '_ {
        NUTRIENT_KEYS.iter().map(move |key| (*key, self.get(key)))
    }

    /// Number of entries, known or not.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<serde_json::Value>> FromIterator<(K, V)> for Nutrients {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_deserialize_full() {
        let json = r#"{
            "id": 1,
            "title": "Sweet Potato Pie",
            "cuisine": "Southern Recipes",
            "rating": 4.8,
            "prep_time": 15,
            "cook_time": 100,
            "total_time": 115,
            "description": "Shared from a Southern recipe",
            "nutrients": {
                "calories": "389 kcal",
                "carbohydrateContent": "48 g",
                "fatContent": "21 g"
            },
            "serves": "8 servings"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.id, 1);
        assert_eq!(recipe.title, "Sweet Potato Pie");
        assert_eq!(recipe.cuisine.as_deref(), Some("Southern Recipes"));
        assert_eq!(recipe.rating, Some(4.8));
        assert_eq!(recipe.prep_time, Some(15));
        assert_eq!(recipe.cook_time, Some(100));
        assert_eq!(recipe.total_time, Some(115));
        assert_eq!(recipe.serves.as_deref(), Some("8 servings"));
        assert_eq!(recipe.nutrients.as_ref().map(Nutrients::len), Some(3));
    }

    #[test]
    fn test_recipe_deserialize_minimal() {
        let recipe: Recipe = serde_json::from_str(r#"{"id": 2, "title": "Toast"}"#).unwrap();
        assert_eq!(recipe.id, 2);
        assert!(recipe.cuisine.is_none());
        assert!(recipe.rating.is_none());
        assert!(recipe.total_time.is_none());
        assert!(recipe.nutrients.is_none());
        assert!(recipe.serves.is_none());
    }

    #[test]
    fn test_recipe_deserialize_explicit_nulls() {
        let json = r#"{"id": 3, "title": "Soup", "cuisine": null, "rating": null,
                       "nutrients": null, "total_time": null}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.cuisine.is_none());
        assert!(recipe.rating.is_none());
        assert!(recipe.nutrients.is_none());
    }

    #[test]
    fn test_nutrients_preserve_unknown_keys() {
        let json = r#"{"calories": "200 kcal", "unsaturatedFatContent": "4 g", "transFatContent": "0 g"}"#;
        let nutrients: Nutrients = serde_json::from_str(json).unwrap();

        assert_eq!(nutrients.len(), 3);
        assert_eq!(nutrients.get("transFatContent").as_deref(), Some("0 g"));

        let back = serde_json::to_value(&nutrients).unwrap();
        assert_eq!(back["unsaturatedFatContent"], "4 g");
        assert_eq!(back["transFatContent"], "0 g");
    }

    #[test]
    fn test_nutrients_non_string_values() {
        let json = r#"{"calories": 389, "fiberContent": null, "sugarContent": 12.5}"#;
        let nutrients: Nutrients = serde_json::from_str(json).unwrap();

        assert_eq!(nutrients.get("calories").as_deref(), Some("389"));
        assert_eq!(nutrients.get("sugarContent").as_deref(), Some("12.5"));
        assert_eq!(nutrients.get("fiberContent"), None);
        assert_eq!(nutrients.get("proteinContent"), None);
    }

    #[test]
    fn test_nutrients_known_in_display_order() {
        let nutrients: Nutrients = [("fatContent", "21 g"), ("calories", "389 kcal")]
            .into_iter()
            .collect();

        let known: Vec<(&str, Option<String>)> = nutrients
            .known()
            .map(|(k, v)| (k, v.map(|v| v.into_owned())))
            .collect();

        assert_eq!(known.len(), NUTRIENT_KEYS.len());
        assert_eq!(known[0], ("calories", Some("389 kcal".to_string())));
        assert_eq!(known[1], ("carbohydrateContent", None));
        assert_eq!(known[8], ("fatContent", Some("21 g".to_string())));
    }

    #[test]
    fn test_nutrients_insert() {
        let mut nutrients = Nutrients::new();
        assert!(nutrients.is_empty());
        nutrients.insert("calories", "100 kcal");
        nutrients.insert("calories", "120 kcal");
        assert_eq!(nutrients.len(), 1);
        assert_eq!(nutrients.get("calories").as_deref(), Some("120 kcal"));
    }
}
