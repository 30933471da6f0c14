use crate::geometry::{Point, Rect, Viewport};

/// Assumed menu footprint. The rendered menu is never measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuMetrics {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for MenuMetrics {
    fn default() -> Self {
        Self {
            width: 160.0,
            height: 44.0,
            padding: 8.0,
        }
    }
}

/// Clamps the menu anchor so the whole menu stays `padding` inside the
/// viewport.
pub fn clamp_position(anchor: Point, viewport: Viewport, metrics: MenuMetrics) -> Point {
    let max_x = viewport.width - metrics.padding - metrics.width;
    let max_y = viewport.height - metrics.padding - metrics.height;
    Point::new(
        anchor.x.min(max_x).max(metrics.padding),
        anchor.y.min(max_y).max(metrics.padding),
    )
}

/// Region the menu occupies once clamped.
pub fn menu_rect(anchor: Point, viewport: Viewport, metrics: MenuMetrics) -> Rect {
    let origin = clamp_position(anchor, viewport, metrics);
    Rect::from_origin(origin.x, origin.y, metrics.width, metrics.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1024.0,
        height: 768.0,
    };

    #[test]
    fn test_inside_viewport_is_unchanged() {
        let pos = clamp_position(Point::new(150.0, 110.0), VIEWPORT, MenuMetrics::default());
        assert_eq!(pos, Point::new(150.0, 110.0));
    }

    #[test]
    fn test_right_edge_is_clamped() {
        let pos = clamp_position(
            Point::new(VIEWPORT.width - 5.0, 100.0),
            VIEWPORT,
            MenuMetrics::default(),
        );
        assert_eq!(pos.x, VIEWPORT.width - 8.0 - 160.0);
        assert_eq!(pos.y, 100.0);
    }

    #[test]
    fn test_bottom_edge_is_clamped() {
        let pos = clamp_position(
            Point::new(10.0, VIEWPORT.height - 1.0),
            VIEWPORT,
            MenuMetrics::default(),
        );
        assert_eq!(pos.y, VIEWPORT.height - 8.0 - 44.0);
    }

    #[test]
    fn test_top_left_keeps_padding() {
        let pos = clamp_position(Point::new(0.0, 2.0), VIEWPORT, MenuMetrics::default());
        assert_eq!(pos, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_tiny_viewport_pins_to_padding() {
        let pos = clamp_position(
            Point::new(50.0, 50.0),
            Viewport::new(100.0, 40.0),
            MenuMetrics::default(),
        );
        assert_eq!(pos, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_menu_rect_uses_metrics() {
        let rect = menu_rect(Point::new(150.0, 110.0), VIEWPORT, MenuMetrics::default());
        assert_eq!(rect, Rect::new(150.0, 110.0, 310.0, 154.0));
    }
}
