//! Foreground widgets drawn over the animated background, and the hit map
//! that turns pointer cells into cursor variants.

use folio_core::{ColorTheme, CursorVariant, TimeFormat};
use folio_runtime::Snapshot;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph},
};

use crate::content::{self, Section};

/// Interactive areas of the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Title,
    Nav(Section),
    Clock,
    Name,
    Role,
    Tagline,
    Link,
    Terminal,
    Body(Section),
}

impl Region {
    /// Cursor variant shown while the pointer is over this region.
    pub fn cursor_variant(self) -> CursorVariant {
        match self {
            Region::Nav(_) | Region::Name | Region::Link => CursorVariant::Hover,
            Region::Role | Region::Terminal => CursorVariant::CodeFocus,
            Region::Body(section) if section.is_code() => CursorVariant::CodeFocus,
            Region::Title | Region::Clock | Region::Tagline | Region::Body(_) => {
                CursorVariant::TextFocus
            }
        }
    }
}

/// Regions registered during the last draw, topmost last.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<(Rect, Region)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn push(&mut self, area: Rect, region: Region) {
        if !area.is_empty() {
            self.regions.push((area, region));
        }
    }

    pub fn region_at(&self, col: u16, row: u16) -> Option<Region> {
        let pos = Position::new(col, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(pos))
            .map(|(_, region)| *region)
    }

    pub fn variant_at(&self, col: u16, row: u16) -> CursorVariant {
        self.region_at(col, row)
            .map(Region::cursor_variant)
            .unwrap_or_default()
    }
}

/// Glyph drawn at the pointer.
pub fn cursor_glyph(variant: CursorVariant) -> &'static str {
    match variant {
        CursorVariant::Default => "•",
        CursorVariant::Hover => "◎",
        CursorVariant::TextFocus => "│",
        CursorVariant::CodeFocus => "◇",
    }
}

/// Dot that lags behind the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Trail {
    pub x: f32,
    pub y: f32,
}

impl Trail {
    /// Time constant of the easing, in milliseconds.
    const LAG_MS: f32 = 250.0;

    /// Move toward `(x, y)` after `dt_ms` of wall time.
    pub fn ease_toward(&mut self, x: f32, y: f32, dt_ms: f32) {
        let t = 1.0 - (-dt_ms.max(0.0) / Self::LAG_MS).exp();
        self.x += (x - self.x) * t;
        self.y += (y - self.y) * t;
    }
}

/// Display preferences and selection for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub section: Section,
    pub time_format: TimeFormat,
    pub color_theme: ColorTheme,
}

/// Draw the header, hero, terminal and section panels over `area`.
pub fn render_foreground(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    view: ViewState,
    hits: &mut HitMap,
) {
    hits.clear();
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Spacing
        Constraint::Length(5), // Hero
        Constraint::Length(1), // Spacing
        Constraint::Fill(1),   // Panels
        Constraint::Length(1), // Footer
        Constraint::Length(1), // Help text
    ])
    .split(area);

    render_header(frame, chunks[0], view, hits);
    render_hero(frame, chunks[2], snapshot, view, hits);

    let panels =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .spacing(1)
            .split(chunks[4]);
    render_terminal(frame, panels[0], snapshot, view, hits);
    render_section(frame, panels[1], view, hits);

    frame.render_widget(
        Line::from(content::FOOTER).dark_gray().centered(),
        chunks[5],
    );
    render_help(frame, chunks[6], view.color_theme.color());
}

fn render_header(frame: &mut Frame, area: Rect, view: ViewState, hits: &mut HitMap) {
    let color = view.color_theme.color();
    let title = Span::from(content::TITLE).bold().fg(color);
    let title_area = Rect {
        width: (title.width() as u16).min(area.width),
        ..area
    };
    frame.render_widget(title, title_area);
    hits.push(title_area, Region::Title);

    // nav entries are laid out right to left from the edge
    let mut x = area.right();
    for (idx, section) in Section::ALL.iter().enumerate().rev() {
        let label = format!("[{}] {}", idx + 1, section.title());
        let width = label.chars().count() as u16;
        if x < area.x + width + 2 {
            break;
        }
        x -= width;
        let style = if *section == view.section {
            Style::new().fg(color).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::new().fg(Color::Gray)
        };
        let entry = Rect::new(x, area.y, width, 1);
        frame.render_widget(Span::styled(label, style), entry);
        hits.push(entry, Region::Nav(*section));
        x -= 2;
    }
}

/// Centre `line` in a one-row `area` and register its extent.
fn centered(frame: &mut Frame, area: Rect, line: Line, region: Region, hits: &mut HitMap) {
    let width = (line.width() as u16).min(area.width);
    let slot = Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    };
    frame.render_widget(line, slot);
    hits.push(slot, region);
}

fn render_hero(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    view: ViewState,
    hits: &mut HitMap,
) {
    let color = view.color_theme.color();
    let rows = Layout::vertical([Constraint::Length(1); 5]).split(area);

    let clock = Line::from(snapshot.clock.display(view.time_format)).dark_gray();
    centered(frame, rows[0], clock, Region::Clock, hits);

    let name = Line::from(content::NAME).bold().fg(color);
    centered(frame, rows[1], name, Region::Name, hits);

    let role = Line::from(vec![
        Span::from("const ").magenta(),
        Span::from("developer").cyan(),
        Span::from(" = ").white(),
        Span::from(format!("\"{}\"", content::ROLE)).yellow(),
        Span::from(";").white(),
    ]);
    centered(frame, rows[2], role, Region::Role, hits);

    let tagline = Line::from(content::TAGLINE).gray();
    centered(frame, rows[3], tagline, Region::Tagline, hits);

    let links = Line::from(content::LINKS.join("  ")).fg(color).underlined();
    centered(frame, rows[4], links, Region::Link, hits);
}

fn render_terminal(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    view: ViewState,
    hits: &mut HitMap,
) {
    let color = view.color_theme.color();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(color))
        .title(" bash ");
    let inner = block.inner(area);

    let mut lines: Vec<Line> = snapshot
        .terminal
        .text
        .split('\n')
        .map(|l| Line::from(l.to_string()).fg(color))
        .collect();
    let blink_on = (snapshot.elapsed.as_millis() / 500) % 2 == 0;
    if snapshot.terminal.typing && blink_on {
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::from("█").fg(color));
        }
    }
    let overflow = lines.len().saturating_sub(inner.height as usize);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines.split_off(overflow)).block(block),
        area,
    );
    hits.push(area, Region::Terminal);
}

fn render_section(frame: &mut Frame, area: Rect, view: ViewState, hits: &mut HitMap) {
    let color = view.color_theme.color();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(Color::DarkGray))
        .title(Line::from(format!(" {} ", view.section.title())).bold().fg(color));

    let lines: Vec<Line> = view
        .section
        .body()
        .iter()
        .map(|text| match text.strip_prefix("# ") {
            Some(heading) => Line::from(heading.to_string()).bold().fg(color),
            None if view.section.is_code() => Line::from(*text).fg(color),
            None => Line::from(*text).gray(),
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
    hits.push(area, Region::Body(view.section));
}

fn render_help(frame: &mut Frame, area: Rect, color: Color) {
    let help = Line::from(vec![
        "q".bold().fg(color),
        " quit  ".dark_gray(),
        "1-4".bold().fg(color),
        " section  ".dark_gray(),
        "t".bold().fg(color),
        " toggle 12/24h  ".dark_gray(),
        "c".bold().fg(color),
        " cycle color  ".dark_gray(),
        "r".bold().fg(color),
        " replay terminal".dark_gray(),
    ])
    .centered();
    frame.render_widget(help, area);
}

/// Draw the pointer glyph and its trailing dot on top of everything.
pub fn render_cursor(
    buf: &mut Buffer,
    pointer: Option<(u16, u16)>,
    trail: Option<(u16, u16)>,
    variant: CursorVariant,
    color: Color,
) {
    let area = buf.area;
    if let Some((col, row)) = trail.filter(|t| Some(*t) != pointer) {
        if area.contains(Position::new(col, row)) {
            buf[(col, row)].set_symbol("·").set_fg(color);
        }
    }
    if let Some((col, row)) = pointer {
        if area.contains(Position::new(col, row)) {
            buf[(col, row)]
                .set_symbol(cursor_glyph(variant))
                .set_fg(color)
                .set_style(Style::new().add_modifier(Modifier::BOLD));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_variants() {
        assert_eq!(Region::Title.cursor_variant(), CursorVariant::TextFocus);
        assert_eq!(
            Region::Nav(Section::Skills).cursor_variant(),
            CursorVariant::Hover
        );
        assert_eq!(Region::Name.cursor_variant(), CursorVariant::Hover);
        assert_eq!(Region::Terminal.cursor_variant(), CursorVariant::CodeFocus);
        assert_eq!(Region::Role.cursor_variant(), CursorVariant::CodeFocus);
        assert_eq!(
            Region::Body(Section::About).cursor_variant(),
            CursorVariant::TextFocus
        );
        assert_eq!(
            Region::Body(Section::Contact).cursor_variant(),
            CursorVariant::CodeFocus
        );
    }

    #[test]
    fn test_hit_map_prefers_topmost() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(0, 0, 20, 10), Region::Body(Section::About));
        hits.push(Rect::new(2, 2, 4, 1), Region::Nav(Section::Projects));

        assert_eq!(hits.region_at(3, 2), Some(Region::Nav(Section::Projects)));
        assert_eq!(hits.region_at(3, 3), Some(Region::Body(Section::About)));
        assert_eq!(hits.region_at(25, 3), None);
        assert_eq!(hits.variant_at(25, 3), CursorVariant::Default);
    }

    #[test]
    fn test_hit_map_ignores_empty_areas() {
        let mut hits = HitMap::default();
        hits.push(Rect::new(5, 5, 0, 1), Region::Title);
        assert_eq!(hits.region_at(5, 5), None);
    }

    #[test]
    fn test_trail_eases_toward_pointer() {
        let mut trail = Trail::default();
        trail.ease_toward(100.0, 50.0, 50.0);
        assert!(trail.x > 0.0 && trail.x < 100.0);
        assert!(trail.y > 0.0 && trail.y < 50.0);

        for _ in 0..200 {
            trail.ease_toward(100.0, 50.0, 50.0);
        }
        assert!((trail.x - 100.0).abs() < 0.01);
        assert!((trail.y - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_trail_ignores_negative_dt() {
        let mut trail = Trail { x: 3.0, y: 4.0 };
        trail.ease_toward(100.0, 100.0, -10.0);
        assert_eq!(trail, Trail { x: 3.0, y: 4.0 });
    }

    #[test]
    fn test_render_cursor_draws_glyph_and_trail() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 5));
        render_cursor(
            &mut buf,
            Some((4, 2)),
            Some((2, 1)),
            CursorVariant::Hover,
            Color::Green,
        );
        assert_eq!(buf[(4, 2)].symbol(), "◎");
        assert_eq!(buf[(2, 1)].symbol(), "·");
    }

    #[test]
    fn test_render_cursor_outside_buffer_is_ignored() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        render_cursor(&mut buf, Some((9, 9)), None, CursorVariant::Default, Color::Green);
        assert_eq!(buf, Buffer::empty(Rect::new(0, 0, 4, 4)));
    }
}
