//! Previous/next controls.

/// Which pagination controls are usable. Hidden entirely for a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationControls {
    pub current: u32,
    pub total: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    /// `None` when there is at most one page.
    pub fn new(current: u32, total: u32) -> Option<Self> {
        if total <= 1 {
            return None;
        }
        Some(Self {
            current,
            total,
            previous_enabled: current > 1,
            next_enabled: current < total,
        })
    }
}

/// `← prev | Page 2 of 5 | next →`, with unavailable directions shown as
/// blanks.
pub fn render_pagination(current: u32, total: u32) -> String {
    let Some(controls) = PaginationControls::new(current, total) else {
        return String::new();
    };
    let prev = if controls.previous_enabled {
        "← prev"
    } else {
        "      "
    };
    let next = if controls.next_enabled {
        "next →"
    } else {
        "      "
    };
    format!(
        "{prev} | Page {} of {} | {next}\n",
        controls.current, controls.total
    )
}
