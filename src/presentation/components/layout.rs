use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// `width` x `height` rectangle centered in `area`, shrunk to fit.
pub fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_inside_area() {
        let rect = popup_rect(Rect::new(0, 0, 40, 10), 20, 4);
        assert_eq!(rect, Rect::new(10, 3, 20, 4));
    }

    #[test]
    fn never_exceeds_area() {
        let area = Rect::new(2, 2, 10, 5);
        let rect = popup_rect(area, 30, 30);
        assert_eq!(rect, area);
    }
}
