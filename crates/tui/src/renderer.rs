//! Conversion of one result into a dropdown row.

use mealdex_core::SearchableItem;
use ratatui::text::{Line, Span};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use crate::style::Theme;

/// Turns a [`SearchableItem`] into the line shown for it in the dropdown.
///
/// `width` is the number of columns available to the row.
pub trait ItemRenderer {
	fn render(&self, item: &SearchableItem, width: u16, theme: &Theme) -> Line<'static>;
}

impl<F> ItemRenderer for F
where
	F: Fn(&SearchableItem, u16, &Theme) -> Line<'static>,
{
	fn render(&self, item: &SearchableItem, width: u16, theme: &Theme) -> Line<'static> {
		self(item, width, theme)
	}
}

/// Name on the left; recipe tag and calories right-aligned.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultItemRenderer;

impl ItemRenderer for DefaultItemRenderer {
	fn render(&self, item: &SearchableItem, width: u16, theme: &Theme) -> Line<'static> {
		let width = usize::from(width);
		let calories = format!("{:.0} kcal", item.headline_calories());
		let tag = if item.is_recipe { "recipe " } else { "" };
		let trailer_width = tag.width() + calories.width();

		// Keep a gap of one column between the name and the trailer.
		if trailer_width + 2 > width {
			let (name, _) = item.name.unicode_truncate(width);
			return Line::from(name.to_string());
		}
		let name_room = width - trailer_width - 1;
		let (name, name_width) = item.name.unicode_truncate(name_room);
		let padding = " ".repeat(width - name_width - trailer_width);

		let mut spans = vec![Span::raw(name.to_string()), Span::raw(padding)];
		if !tag.is_empty() {
			spans.push(Span::styled(tag, theme.highlight));
		}
		spans.push(Span::styled(calories, theme.empty_style()));
		Line::from(spans)
	}
}

#[cfg(test)]
mod tests {
	use mealdex_core::Nutrition;

	use super::*;

	fn plain(line: &Line<'_>) -> String {
		line.spans.iter().map(|span| span.content.as_ref()).collect()
	}

	#[test]
	fn default_row_right_aligns_calories() {
		let item = SearchableItem::food("f1", "Mela").with_nutrition(Nutrition {
			calories: 52.0,
			..Nutrition::default()
		});
		let line = DefaultItemRenderer.render(&item, 20, &Theme::default());
		insta::assert_snapshot!(plain(&line), @"Mela         52 kcal");
	}

	#[test]
	fn recipes_are_tagged_and_long_names_truncated() {
		let item = SearchableItem::recipe("r1", "Torta di mele della nonna").with_totals(
			Nutrition {
				calories: 2400.0,
				..Nutrition::default()
			},
			1200.0,
			8.0,
		);
		let line = DefaultItemRenderer.render(&item, 30, &Theme::default());
		let text = plain(&line);
		assert_eq!(text.width(), 30);
		assert!(text.starts_with("Torta di mele"));
		assert!(text.ends_with("recipe 300 kcal"));
	}

	#[test]
	fn closures_render_rows() {
		let renderer = |item: &SearchableItem, _: u16, _: &Theme| Line::from(item.id.clone());
		let line = renderer.render(&SearchableItem::food("f7", "Kiwi"), 10, &Theme::default());
		assert_eq!(plain(&line), "f7");
	}
}
