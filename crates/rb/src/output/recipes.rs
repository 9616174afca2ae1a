//! Recipe list and detail formatting.

use owo_colors::OwoColorize;
use recipe_api_rs::models::{Recipe, NUTRIENT_KEYS};
use recipe_browser_rs::{Browser, NormalizedFilter, Pagination, ViewState};
use serde::Serialize;

use super::helpers::{
    format_minutes, format_rating, format_stars, nutrient_label, or_placeholder,
    pad, truncate_str, PLACEHOLDER,
};

const ROW_WIDTH: usize = 3;
const TITLE_WIDTH: usize = 40;
const CUISINE_WIDTH: usize = 16;
const RATING_WIDTH: usize = 6;
const TIME_WIDTH: usize = 11;

/// JSON output structure for a page of recipes.
#[derive(Serialize)]
pub struct ListOutput<'a> {
    pub recipes: &'a [Recipe],
    pub filters: Vec<NormalizedFilter>,
    pub pagination: PaginationOutput,
}

/// Pagination metadata for JSON output.
#[derive(Serialize)]
pub struct PaginationOutput {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_prev: bool,
    pub has_next: bool,
}

impl From<&Pagination> for PaginationOutput {
    fn from(p: &Pagination) -> Self {
        Self {
            page: p.page(),
            limit: p.limit(),
            total: p.total(),
            total_pages: p.total_pages(),
            has_prev: p.has_prev(),
            has_next: p.has_next(),
        }
    }
}

/// Formats the shown page as JSON.
///
/// Records are emitted as received, so nutrient keys the table does not show
/// are still present.
pub fn format_recipes_json(browser: &Browser) -> Result<String, serde_json::Error> {
    let output = ListOutput {
        recipes: browser.view().rows(),
        filters: browser.descriptor().filters().to_vec(),
        pagination: PaginationOutput::from(browser.pagination()),
    };
    serde_json::to_string_pretty(&output)
}

/// Formats the list area: a loading line, an error, the empty message or the
/// table of rows, followed by the pager.
pub fn format_recipes_table(browser: &Browser, use_colors: bool) -> String {
    let mut output = match browser.state() {
        ViewState::Loading => "Loading…\n".to_string(),
        ViewState::Error(message) => {
            let line = format!("Error: {message}");
            if use_colors {
                format!("{}\n", line.red())
            } else {
                format!("{line}\n")
            }
        }
        ViewState::Empty => "No results found.\n".to_string(),
        ViewState::Rows(rows) => format_rows(rows, use_colors),
    };

    output.push_str(&format_pager(browser.pagination(), use_colors));
    output
}

fn format_rows(rows: &[Recipe], use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!(
        "{:>ROW_WIDTH$}  {:<TITLE_WIDTH$} {:<CUISINE_WIDTH$} {:<RATING_WIDTH$} {:<TIME_WIDTH$} {}",
        "#", "Title", "Cuisine", "Rating", "Total Time", "Serves"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (i, recipe) in rows.iter().enumerate() {
        let title = truncate_str(&recipe.title, TITLE_WIDTH);
        let cuisine = truncate_str(or_placeholder(recipe.cuisine.as_deref()), CUISINE_WIDTH);
        let stars_len = if recipe.rating.is_some() { 5 } else { PLACEHOLDER.len() };
        let stars = pad(
            &format_stars(recipe.rating, use_colors),
            stars_len,
            RATING_WIDTH,
        );
        let time = format_minutes(recipe.total_time);
        let serves = or_placeholder(recipe.serves.as_deref());

        let line = format!(
            "{:>ROW_WIDTH$}  {:<TITLE_WIDTH$} {:<CUISINE_WIDTH$} {} {:<TIME_WIDTH$} {}",
            i + 1,
            title,
            cuisine,
            stars,
            time,
            serves
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Formats the pager line, e.g. "‹ Page 2 / 4 ›  (47 recipes, 15 per page)".
pub fn format_pager(pagination: &Pagination, use_colors: bool) -> String {
    let arrow = |enabled: bool, s: &'static str| if enabled { s } else { " " };
    let line = format!(
        "{} Page {} / {} {}  ({} recipes, {} per page)",
        arrow(pagination.has_prev(), "‹"),
        pagination.page(),
        pagination.total_pages(),
        arrow(pagination.has_next(), "›"),
        pagination.total(),
        pagination.limit()
    );
    if use_colors {
        format!("{}\n", line.dimmed())
    } else {
        format!("{line}\n")
    }
}

/// Formats the filters currently applied, with a marker for unapplied edits.
pub fn format_filter_summary(browser: &Browser, use_colors: bool) -> String {
    let applied: Vec<String> = browser
        .descriptor()
        .filters()
        .iter()
        .map(describe_filter)
        .collect();

    let mut line = if applied.is_empty() {
        "Filters: none".to_string()
    } else {
        format!("Filters: {}", applied.join(", "))
    };
    if browser.has_unapplied_edits() {
        let pending = " (edited, type 'apply')";
        if use_colors {
            line.push_str(&pending.yellow().to_string());
        } else {
            line.push_str(pending);
        }
    }
    line.push('\n');
    line
}

fn describe_filter(filter: &NormalizedFilter) -> String {
    if filter.field().is_comparison() {
        format!("{} {} {}", filter.field().label(), filter.operator(), filter.value())
    } else {
        format!("{} ~ \"{}\"", filter.field().label(), filter.value())
    }
}

/// Formats recipe details as JSON (show command).
pub fn format_recipe_details_json(recipe: &Recipe) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(recipe)
}

/// Formats the detail panel for one recipe.
pub fn format_recipe_details_table(recipe: &Recipe, use_colors: bool) -> String {
    let mut output = String::new();

    if use_colors {
        output.push_str(&format!("{}\n", recipe.title.bold()));
    } else {
        output.push_str(&format!("{}\n", recipe.title));
    }
    output.push_str(&format!(
        "{}\n\n",
        or_placeholder(recipe.cuisine.as_deref())
    ));

    let rating = match recipe.rating {
        Some(r) => format!(
            "{} {}",
            format_rating(Some(r)),
            format_stars(Some(r), use_colors)
        ),
        None => PLACEHOLDER.to_string(),
    };
    push_field(&mut output, "Rating", &rating, use_colors);
    push_field(
        &mut output,
        "Description",
        or_placeholder(recipe.description.as_deref()),
        use_colors,
    );
    push_field(&mut output, "Total Time", &format_time_breakdown(recipe), use_colors);
    push_field(
        &mut output,
        "Serves",
        or_placeholder(recipe.serves.as_deref()),
        use_colors,
    );

    output.push('\n');
    let heading = "Nutrition";
    if use_colors {
        output.push_str(&format!("{}\n", heading.bold()));
    } else {
        output.push_str(&format!("{heading}\n"));
    }
    for key in NUTRIENT_KEYS {
        let value = recipe.nutrients.as_ref().and_then(|n| n.get(key));
        output.push_str(&format!(
            "  {:<16} {}\n",
            nutrient_label(key),
            or_placeholder(value.as_deref())
        ));
    }

    output
}

/// "45 min (Cook: 30 min, Prep: 15 min)"
fn format_time_breakdown(recipe: &Recipe) -> String {
    format!(
        "{} (Cook: {}, Prep: {})",
        format_minutes(recipe.total_time),
        format_minutes(recipe.cook_time),
        format_minutes(recipe.prep_time)
    )
}

fn push_field(output: &mut String, label: &str, value: &str, use_colors: bool) {
    let label = format!("{label}:");
    if use_colors {
        let label = pad(&label.dimmed().to_string(), label.len(), 12);
        output.push_str(&format!("{label} {value}\n"));
    } else {
        output.push_str(&format!("{label:<12} {value}\n"));
    }
}
