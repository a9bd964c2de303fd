//! Food and recipe records as seen by the search pipeline.
//!
//! Items are read from the document store and from the application's
//! in-memory caches; the pipeline never writes them back. The derived search
//! fields (`name_lowercase`, `search_tokens`) are persisted by the writer side
//! of the application, but [`SearchableItem::ensure_search_fields`] can
//! rebuild them for records that predate those fields.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Namespace prefix applied to recipe identities inside merged result sets.
pub const RECIPE_KEY_PREFIX: &str = "recipe-";

/// Nutrition values, either per 100 units (foods) or aggregated (recipes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nutrition {
	pub calories: f64,
	pub proteins: f64,
	pub carbs: f64,
	pub fats: f64,
	pub fibers: f64,
}

/// A food or recipe that can appear in search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
	pub id: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub name_lowercase: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub search_tokens: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub is_recipe: bool,
	/// Per-100-unit values for foods, flattened the way food documents store them.
	#[serde(flatten)]
	pub per_100: Nutrition,
	/// Measurement unit for foods (`g`, `ml`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unit: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_nutrition: Option<Nutrition>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub total_weight: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub servings: Option<f64>,
}

impl SearchableItem {
	/// Build a food record with derived search fields.
	pub fn food(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self::with_kind(id.into(), name.into(), false)
	}

	/// Build a recipe record with derived search fields.
	pub fn recipe(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self::with_kind(id.into(), name.into(), true)
	}

	fn with_kind(id: String, name: String, is_recipe: bool) -> Self {
		let mut item = Self {
			id,
			name,
			name_lowercase: String::new(),
			search_tokens: Vec::new(),
			is_recipe,
			per_100: Nutrition::default(),
			unit: None,
			total_nutrition: None,
			total_weight: None,
			servings: None,
		};
		item.ensure_search_fields();
		item
	}

	/// Attach per-100-unit nutrition values.
	#[must_use]
	pub fn with_nutrition(mut self, per_100: Nutrition) -> Self {
		self.per_100 = per_100;
		self
	}

	/// Attach aggregated recipe totals.
	#[must_use]
	pub fn with_totals(mut self, totals: Nutrition, total_weight: f64, servings: f64) -> Self {
		self.total_nutrition = Some(totals);
		self.total_weight = Some(total_weight);
		self.servings = Some(servings);
		self
	}

	/// Override the stored search tokens.
	#[must_use]
	pub fn with_tokens<I, S>(mut self, tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.search_tokens = tokens.into_iter().map(Into::into).collect();
		self
	}

	/// Fill in `name_lowercase` and `search_tokens` when they are missing.
	pub fn ensure_search_fields(&mut self) {
		if self.name_lowercase.is_empty() {
			self.name_lowercase = self.name.to_lowercase();
		}
		if self.search_tokens.is_empty() {
			self.search_tokens = tokenize_name(&self.name);
		}
	}

	/// Identity of this record inside a merged result set.
	#[must_use]
	pub fn key(&self) -> ItemKey {
		if self.is_recipe {
			ItemKey::recipe(&self.id)
		} else {
			ItemKey::food(&self.id)
		}
	}

	/// Lowercased display name; falls back to folding `name` on the fly.
	pub(crate) fn folded_name(&self) -> std::borrow::Cow<'_, str> {
		if self.name_lowercase.is_empty() {
			std::borrow::Cow::Owned(self.name.to_lowercase())
		} else {
			std::borrow::Cow::Borrowed(&self.name_lowercase)
		}
	}

	/// Calories per serving for recipes, per 100 units for foods.
	#[must_use]
	pub fn headline_calories(&self) -> f64 {
		match (self.is_recipe, self.total_nutrition, self.servings) {
			(true, Some(totals), Some(servings)) if servings > 0.0 => totals.calories / servings,
			(true, Some(totals), _) => totals.calories,
			_ => self.per_100.calories,
		}
	}
}

/// Namespaced identity of a [`SearchableItem`].
///
/// Foods and recipes share the raw id space, so recipe keys carry the
/// [`RECIPE_KEY_PREFIX`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(String);

impl ItemKey {
	pub fn food(id: &str) -> Self {
		Self(id.to_string())
	}

	pub fn recipe(id: &str) -> Self {
		Self(format!("{RECIPE_KEY_PREFIX}{id}"))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Split the key into its raw id and whether it names a recipe.
	///
	/// Food ids that themselves start with the recipe prefix are ambiguous;
	/// callers that need the exact record should keep the item around
	/// instead of round-tripping through the key.
	#[must_use]
	pub fn parts(&self) -> (&str, bool) {
		match self.0.strip_prefix(RECIPE_KEY_PREFIX) {
			Some(raw) => (raw, true),
			None => (self.0.as_str(), false),
		}
	}
}

impl fmt::Display for ItemKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Split a display name into lowercase search tokens.
///
/// Punctuation is stripped, the remainder is split on whitespace and empty
/// fragments are dropped.
#[must_use]
pub fn tokenize_name(name: &str) -> Vec<String> {
	let cleaned: String = name
		.to_lowercase()
		.chars()
		.map(|ch| if ch.is_alphanumeric() || ch.is_whitespace() { ch } else { ' ' })
		.collect();
	cleaned.split_whitespace().map(str::to_string).collect()
}

/// Normalize raw input into the term the pipeline searches for.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
	raw.trim().to_lowercase()
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Deserialize<'de> + Default,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Space-split fragments of a normalized term.
pub(crate) fn term_tokens(term: &str) -> impl Iterator<Item = &str> {
	term.split(' ').filter(|token| !token.is_empty())
}
