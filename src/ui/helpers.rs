use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Centered sub-rectangle taking the given percentages of the area
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn format_size(size: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    let mut value = size as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{size} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }

    let head: String = s.chars().take(max_len.saturating_sub(3) / 2).collect();
    let tail_len = max_len.saturating_sub(3) - head.chars().count();
    let tail: String = s
        .chars()
        .skip(s.chars().count().saturating_sub(tail_len))
        .collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_size_picks_the_right_unit() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1024 * 1024), "1.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0 GB");
    }

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate_string("short.txt", 40), "short.txt");
    }

    #[test]
    fn truncate_keeps_head_and_tail() {
        let truncated = truncate_string("a-very-long-file-name-that-will-not-fit.png", 20);
        assert!(truncated.len() <= 20);
        assert!(truncated.contains("..."));
        assert!(truncated.starts_with("a-very"));
        assert!(truncated.ends_with("png"));
    }

    #[test]
    fn truncate_handles_multibyte_names() {
        let truncated = truncate_string("ファイル名がとても長いのです-アップロード.png", 20);
        assert!(truncated.chars().count() <= 20);
        assert!(truncated.contains("..."));
    }

    #[test]
    fn centered_rect_fits_inside_the_area() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, area);
        assert!(inner.width <= 60);
        assert!(inner.height <= 20);
        assert!(inner.x >= 20);
        assert!(inner.y >= 15);
    }
}
