//! Core state container for the meal-log screen.
//!
//! The [`App`] owns the search field, the scrollable viewport it lives in,
//! and the list of items logged so far.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use mealdex_core::{Nutrition, SearchContext, SearchableItem, Searcher};
use ratatui::layout::Rect;
use tracing::info;

use crate::config::{PlacementKind, UiOptions};
use crate::field::{SearchField, setup_search};
use crate::input::QueryInput;
use crate::renderer::DefaultItemRenderer;
use crate::toast::ToastQueue;
use crate::viewport::Viewport;

/// Result of an interactive session.
#[derive(Debug, Clone, Default)]
pub struct MealLogOutcome {
	/// Items logged during the session, in order.
	pub entries: Vec<SearchableItem>,
	/// Text left in the search input.
	pub query: String,
}

impl MealLogOutcome {
	/// Summed nutrition of every logged portion.
	pub fn totals(&self) -> Nutrition {
		totals(&self.entries)
	}
}

/// Rows of the scrollable content, in content coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ContentLayout {
	pub log_rows: u16,
	pub input: Rect,
	pub inline_results: Option<Rect>,
	pub totals_top: u16,
	pub help_top: u16,
	pub height: u16,
}

pub(crate) const TOTALS_ROWS: u16 = 6;

/// Aggregate state of the meal-log screen.
pub struct App<'a> {
	pub(crate) field: SearchField<'a>,
	pub(crate) viewport: Viewport,
	pub(crate) entries: Vec<SearchableItem>,
	pub(crate) selections: Receiver<SearchableItem>,
	pub(crate) context: Option<Arc<SearchContext>>,
	pub(crate) toasts: ToastQueue,
	pub(crate) options: UiOptions,
	pub(crate) layout: ContentLayout,
	pub(crate) screen: Rect,
}

impl<'a> App<'a> {
	/// Construct an [`App`] searching with `searcher`.
	pub fn new(searcher: Arc<dyn Searcher>, toasts: ToastQueue, options: UiOptions) -> Self {
		let (selection_tx, selections) = mpsc::channel();
		let input = QueryInput::new(options.initial_query.clone())
			.with_title(options.labels.input_title.clone())
			.with_placeholder(options.labels.placeholder.clone());
		let container = match options.placement {
			PlacementKind::Floating => None,
			PlacementKind::Inline => Some(Rect::default()),
		};
		let field = setup_search(
			input,
			container,
			searcher,
			move |item| {
				let _ = selection_tx.send(item);
			},
			DefaultItemRenderer,
		)
		.with_debounce(options.debounce, options.min_term_len)
		.with_max_visible_rows(options.max_visible_rows);

		let mut app = Self {
			field,
			viewport: Viewport::new(Rect::default()),
			entries: Vec::new(),
			selections,
			context: None,
			toasts,
			options,
			layout: ContentLayout::default(),
			screen: Rect::default(),
		};
		if !app.options.initial_query.is_empty() {
			app.field.refresh(Instant::now());
		}
		app
	}

	/// Refresh selected items from `context` before logging them.
	#[must_use]
	pub fn with_context(mut self, context: Arc<SearchContext>) -> Self {
		self.context = Some(context);
		self
	}

	pub fn entries(&self) -> &[SearchableItem] {
		&self.entries
	}

	pub fn field(&self) -> &SearchField<'a> {
		&self.field
	}

	pub fn viewport(&self) -> &Viewport {
		&self.viewport
	}

	pub(crate) fn outcome(&self) -> MealLogOutcome {
		MealLogOutcome {
			entries: self.entries.clone(),
			query: self.field.text().to_string(),
		}
	}

	/// Lay the content out for a screen of `screen` and place the field.
	pub fn resize(&mut self, screen: Rect) {
		self.screen = screen;
		let area = Rect {
			x: screen.x.saturating_add(1),
			width: screen.width.saturating_sub(2),
			height: screen.height.saturating_sub(1),
			..screen
		};
		self.layout = self.compute_layout(area.width);
		self.viewport.resize(area);
		self.viewport.set_content_height(self.layout.height);
		self.field.set_anchor(self.layout.input);
		self.field.set_bounds(screen);
		self.place_inline_results();
	}

	/// Move the inline container to where the viewport currently shows it.
	///
	/// A container scrolled fully out of view becomes an empty rect, which
	/// hides the dropdown until it scrolls back.
	pub(crate) fn place_inline_results(&mut self) {
		if let Some(inline) = self.layout.inline_results {
			let container = self.viewport.to_screen(inline).unwrap_or_default();
			self.field.set_results_container(container);
		}
	}

	fn compute_layout(&self, width: u16) -> ContentLayout {
		let log_rows = u16::try_from(self.entries.len().max(1)).unwrap_or(u16::MAX);
		let input_top = 1 + log_rows + 1;
		let input = Rect::new(0, input_top, width, QueryInput::HEIGHT);
		let mut cursor = input.bottom();
		let inline_results = match self.options.placement {
			PlacementKind::Floating => None,
			PlacementKind::Inline => {
				let rows = self.options.max_visible_rows.max(1) + 2;
				let rect = Rect::new(0, cursor, width, rows);
				cursor = rect.bottom();
				Some(rect)
			}
		};
		let totals_top = cursor + 1;
		let help_top = totals_top + TOTALS_ROWS + 1;
		ContentLayout {
			log_rows,
			input,
			inline_results,
			totals_top,
			help_top,
			height: help_top + 1,
		}
	}

	/// Advance the search field and apply finished selections.
	pub fn tick(&mut self, now: Instant) {
		self.place_inline_results();
		self.field.tick(now, &self.viewport);
		while let Ok(item) = self.selections.try_recv() {
			self.log_item(item);
		}
		self.toasts.tick(now);
	}

	fn log_item(&mut self, item: SearchableItem) {
		let item = self
			.context
			.as_ref()
			.and_then(|context| context.fetch_item(&item.key()))
			.unwrap_or(item);
		info!(key = %item.key(), name = %item.name, "item logged");
		self.entries.push(item);
		self.field.clear();
		self.resize(self.screen);
		self.viewport
			.scroll_into_view(self.layout.input.y, self.layout.input.height);
		self.place_inline_results();
	}

	pub(crate) fn undo_last(&mut self) {
		if let Some(item) = self.entries.pop() {
			info!(key = %item.key(), "entry removed");
			self.resize(self.screen);
		}
	}
}

/// Nutrition of one logged portion: 100 units of a food, one serving of a recipe.
pub fn portion(item: &SearchableItem) -> Nutrition {
	match (item.is_recipe, item.total_nutrition) {
		(true, Some(totals)) => {
			let servings = item.servings.filter(|servings| *servings > 0.0).unwrap_or(1.0);
			Nutrition {
				calories: totals.calories / servings,
				proteins: totals.proteins / servings,
				carbs: totals.carbs / servings,
				fats: totals.fats / servings,
				fibers: totals.fibers / servings,
			}
		}
		_ => item.per_100,
	}
}

/// Sum of the portions of every entry.
pub(crate) fn totals(entries: &[SearchableItem]) -> Nutrition {
	entries.iter().map(portion).fold(Nutrition::default(), |acc, next| Nutrition {
		calories: acc.calories + next.calories,
		proteins: acc.proteins + next.proteins,
		carbs: acc.carbs + next.carbs,
		fats: acc.fats + next.fats,
		fibers: acc.fibers + next.fibers,
	})
}
