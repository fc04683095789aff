//! Maps a modal's CSS-like shape onto terminal cells.

use ratatui::layout::{Constraint, Rect};

use crate::modal::{ModalOption, Width};

/// Terminal cells per CSS pixel unit; `8px` is one cell.
const PX_PER_CELL: u16 = 8;

/// Columns used by each width class.
pub const fn width_columns(width: Width, available: u16) -> u16 {
    let wanted = match width {
        Width::Sm => 44,
        Width::Md => 64,
        Width::Lg => 88,
        Width::Fluid => available.saturating_sub(4),
    };
    if wanted > available { available } else { wanted }
}

/// Parse a length like `8px`, `2` or `0` into cells.
///
/// Pixel values round down to whole cells. Unparseable input yields `None`.
pub fn length_cells(value: &str) -> Option<u16> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse::<u16>().ok().map(|px| px / PX_PER_CELL);
    }
    value.parse::<u16>().ok()
}

/// How the height of a modal is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightRule {
    /// Fit the content.
    Auto,
    Percent(u16),
    Rows(u16),
}

impl HeightRule {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some(percent) = value.strip_suffix('%') {
            return percent
                .trim()
                .parse::<u16>()
                .map_or(Self::Auto, |p| Self::Percent(p.min(100)));
        }
        length_cells(value).map_or(Self::Auto, Self::Rows)
    }

    pub fn resolve(self, content: u16, available: u16) -> u16 {
        let rows = match self {
            Self::Auto => content,
            Self::Percent(p) => {
                let scaled = u32::from(available) * u32::from(p) / 100;
                u16::try_from(scaled).unwrap_or(available)
            }
            Self::Rows(rows) => rows,
        };
        rows.min(available)
    }
}

/// Area a modal occupies inside `area` given its content height.
pub fn modal_area(option: &ModalOption, area: Rect, content_rows: u16) -> Rect {
    let fullscreen = option.fullscreen();
    if fullscreen.is_enabled() {
        let margin = fullscreen.margin().and_then(length_cells).unwrap_or(0);
        return inset(area, margin);
    }

    let width = width_columns(option.width(), area.width);
    let height = HeightRule::parse(option.height()).resolve(content_rows, area.height);
    area.centered(Constraint::Length(width), Constraint::Length(height))
}

/// Shrink `area` by `margin` cells on every side.
pub fn inset(area: Rect, margin: u16) -> Rect {
    let horizontal = margin.min(area.width / 2);
    let vertical = margin.min(area.height / 2);
    Rect {
        x: area.x + horizontal,
        y: area.y + vertical,
        width: area.width - horizontal * 2,
        height: area.height - vertical * 2,
    }
}

/// Area of a drop shadow one cell below and right of `modal`, clipped to `bounds`.
pub fn shadow_area(modal: Rect, bounds: Rect) -> Rect {
    Rect {
        x: modal.x.saturating_add(1),
        y: modal.y.saturating_add(1),
        width: modal.width,
        height: modal.height,
    }
    .intersection(bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_cells() {
        assert_eq!(length_cells("8px"), Some(1));
        assert_eq!(length_cells("20px"), Some(2));
        assert_eq!(length_cells("3"), Some(3));
        assert_eq!(length_cells(" 0 "), Some(0));
        assert_eq!(length_cells("1em"), None);
    }

    #[test]
    fn test_height_rules() {
        assert_eq!(HeightRule::parse("auto"), HeightRule::Auto);
        assert_eq!(HeightRule::parse("100%"), HeightRule::Percent(100));
        assert_eq!(HeightRule::parse("12"), HeightRule::Rows(12));
        assert_eq!(HeightRule::parse("wat%"), HeightRule::Auto);

        assert_eq!(HeightRule::Auto.resolve(7, 30), 7);
        assert_eq!(HeightRule::Percent(50).resolve(7, 30), 15);
        assert_eq!(HeightRule::Rows(50).resolve(7, 30), 30);
    }

    #[test]
    fn test_width_is_clamped() {
        assert_eq!(width_columns(Width::Sm, 100), 44);
        assert_eq!(width_columns(Width::Lg, 60), 60);
        assert_eq!(width_columns(Width::Fluid, 60), 56);
    }

    #[test]
    fn test_inset() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(inset(area, 2), Rect::new(2, 2, 36, 6));
        assert_eq!(inset(area, 50), Rect::new(20, 5, 0, 0));
    }

    #[test]
    fn test_shadow_is_clipped() {
        let bounds = Rect::new(0, 0, 20, 10);
        assert_eq!(shadow_area(Rect::new(15, 5, 5, 5), bounds), Rect::new(16, 6, 4, 4));
    }
}
