//! Category filter bar.

use crate::models::Category;

/// `[General]  Business  Technology …` with the active category bracketed.
pub fn render_category_filters(active: Category) -> String {
    let labels: Vec<String> = Category::ALL
        .iter()
        .map(|c| {
            if *c == active {
                format!("[{}]", c.label())
            } else {
                format!(" {} ", c.label())
            }
        })
        .collect();
    format!("{}\n", labels.join(" "))
}
