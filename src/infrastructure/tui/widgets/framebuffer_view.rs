use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color as RatColor, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::domain::primitive::Color;
use crate::infrastructure::render::SoftwareSurface;
use crate::interface_adapter::port::RenderBackend;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "\u{2580}";

/// Convert domain Color to ratatui Color
fn to_ratatui_color(color: Color) -> RatColor {
    RatColor::Rgb(color.r, color.g, color.b)
}

/// Sample the surface into terminal lines, two pixel rows per line.
///
/// `scale` surface pixels map to one terminal column and to each half of a
/// terminal row. Samples outside the surface come out as `Reset`.
pub fn pixels_to_lines(
    surface: &SoftwareSurface,
    scale: u16,
    max_rows: usize,
    max_cols: usize,
) -> Vec<Line<'static>> {
    let scale = u32::from(scale.max(1));
    let sample = |x: u32, y: u32| {
        surface
            .pixel(x * scale, y * scale)
            .map(to_ratatui_color)
            .unwrap_or(RatColor::Reset)
    };

    let cols = (surface.width().div_ceil(scale) as usize).min(max_cols);
    let rows = (surface.height().div_ceil(scale * 2) as usize).min(max_rows);

    (0..rows as u32)
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..cols as u32)
                .map(|col| {
                    let style = Style::default()
                        .fg(sample(col, row * 2))
                        .bg(sample(col, row * 2 + 1));
                    Span::styled(HALF_BLOCK, style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Draw the framebuffer inside a bordered pane with a one-line status bar.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    surface: &SoftwareSurface,
    scale: u16,
    title: &str,
    status: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(RatColor::LightCyan).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(RatColor::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);
    let content_area = chunks[0];
    let status_area = chunks[1];

    let lines = pixels_to_lines(
        surface,
        scale,
        content_area.height as usize,
        content_area.width as usize,
    );
    frame.render_widget(Paragraph::new(lines), content_area);

    let status_line = Line::from(Span::styled(
        format!(" {status} "),
        Style::default().bg(RatColor::DarkGray).fg(RatColor::White),
    ));
    frame.render_widget(Paragraph::new(vec![status_line]), status_area);
}
