use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use folio_background::{BackgroundLayer, CellSize, FieldSettings};
use folio_config::Config;
use folio_core::{ColorTheme, TimeFormat, Viewport};
use folio_runtime::{LoopSettings, PresentationLoop, Snapshot, SystemTimeSource};
use ratatui::{DefaultTerminal, Frame, layout::Size};
use tracing::{debug, info, warn};

mod content;
mod logging;
mod view;

use content::Section;
use view::{HitMap, Region, Trail, ViewState};

/// Upper bound on how long input polling may block.
const MAX_POLL: Duration = Duration::from_millis(100);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let log_dir = logging::init()?;
    info!(log_dir = %log_dir.display(), "starting folio");

    let config = Config::load();
    let terminal = ratatui::init();
    let result = with_mouse_capture(&mut std::io::stdout(), || {
        let size = terminal.size()?;
        App::new(config, size).run(terminal)
    });
    ratatui::restore();
    result
}

/// Run `body` with mouse reporting enabled on `out`, disabling it again
/// however `body` ends. The error from `body` wins over a teardown failure.
fn with_mouse_capture<W, T>(
    out: &mut W,
    body: impl FnOnce() -> color_eyre::Result<T>,
) -> color_eyre::Result<T>
where
    W: Write,
{
    crossterm::execute!(out, EnableMouseCapture)?;
    let result = body();
    if let Err(e) = crossterm::execute!(out, DisableMouseCapture) {
        warn!(error = %e, "failed to disable mouse capture");
    }
    result
}

/// Translate the file configuration into presentation loop settings.
fn loop_settings(config: &Config, viewport: Viewport) -> LoopSettings {
    LoopSettings {
        viewport,
        field: FieldSettings {
            particle_count: config.particle_count,
            line_count: config.line_count,
            snippets: config.content.snippets.clone(),
        },
        seed: config.seed,
        tick: config.timing.tick(config.animation_speed),
        clock: config.timing.clock(),
        char_delay: config.timing.char_delay(),
        command_pause: config.timing.command_pause(),
        typewriter_start: config.timing.typewriter_start(),
        commands: config.content.commands.clone(),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    cell: CellSize,
    presentation: PresentationLoop,
    /// Wall-clock instant the loop was mounted.
    started: Instant,
    /// Latest snapshot pushed by the loop, not yet drawn.
    pending: Rc<RefCell<Option<Snapshot>>>,
    snapshot: Snapshot,
    dirty: bool,
    section: Section,
    /// Current time format (12h or 24h).
    time_format: TimeFormat,
    /// Current color theme.
    color_theme: ColorTheme,
    hits: HitMap,
    trail: Trail,
    last_frame: Instant,
}

impl App {
    /// Construct a new instance of [`App`] sized to the terminal.
    pub fn new(config: Config, size: Size) -> Self {
        let cell = CellSize::new(config.cell_width_px, config.cell_height_px);
        let viewport = Viewport::from_cells(
            size.width,
            size.height,
            config.cell_width_px,
            config.cell_height_px,
        );
        let mut presentation = PresentationLoop::mount(
            loop_settings(&config, viewport),
            Box::new(SystemTimeSource),
        );

        let pending = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&pending);
        presentation.subscribe(move |snapshot: &Snapshot| {
            *sink.borrow_mut() = Some(snapshot.clone());
        });

        let snapshot = presentation.snapshot();
        let now = Instant::now();
        Self {
            running: false,
            time_format: config.time_format,
            color_theme: config.color_theme,
            config,
            cell,
            presentation,
            started: now,
            pending,
            snapshot,
            dirty: true,
            section: Section::default(),
            hits: HitMap::default(),
            trail: Trail::default(),
            last_frame: now,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.presentation.advance_to(self.started.elapsed());
            if let Some(snapshot) = self.pending.borrow_mut().take() {
                self.snapshot = snapshot;
                self.dirty = true;
            }
            if self.dirty {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }
            self.handle_crossterm_events()?;
        }
        self.presentation.dispose();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;

        let snapshot = &self.snapshot;
        let background = BackgroundLayer {
            particles: &snapshot.particles,
            lines: &snapshot.lines,
            cell: self.cell,
            elapsed_ms: snapshot.elapsed.as_millis() as u64,
            theme: self.color_theme,
            speed: self.config.animation_speed,
        };
        frame.render_widget(background, area);

        let view = ViewState {
            section: self.section,
            time_format: self.time_format,
            color_theme: self.color_theme,
        };
        view::render_foreground(frame, area, snapshot, view, &mut self.hits);

        let cursor = snapshot.cursor;
        self.trail.ease_toward(cursor.x, cursor.y, dt);
        let pointer = self.cell.cell_of(cursor.x, cursor.y);
        let trail = self.cell.cell_of(self.trail.x, self.trail.y);
        view::render_cursor(
            frame.buffer_mut(),
            pointer,
            trail,
            cursor.variant,
            self.color_theme.color(),
        );
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next scheduled animation step.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .presentation
            .next_due()
            .map(|due| due.saturating_sub(self.started.elapsed()))
            .map_or(MAX_POLL, |wait| wait.min(MAX_POLL));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_time_format(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            (_, KeyCode::Char('r')) => self.presentation.restart_typewriter(),
            (_, KeyCode::Tab) => self.select_section(self.section.next()),
            (_, KeyCode::BackTab) => self.select_section(self.section.prev()),
            (_, KeyCode::Char(c)) => {
                if let Some(section) = Section::from_digit(c) {
                    self.select_section(section);
                }
            }
            _ => {}
        }
    }

    /// Track the pointer and pick the cursor variant under it.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        let (col, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {}
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(Region::Nav(section)) = self.hits.region_at(col, row) {
                    self.select_section(section);
                }
            }
            _ => return,
        }
        let (x, y) = self.cell.center_of(col, row);
        self.presentation.track_pointer(x, y);
        self.presentation
            .set_cursor_variant(self.hits.variant_at(col, row));
    }

    fn on_resize(&mut self, cols: u16, rows: u16) {
        let viewport = Viewport::from_cells(
            cols,
            rows,
            self.config.cell_width_px,
            self.config.cell_height_px,
        );
        self.presentation.resize(viewport.width, viewport.height);
        self.dirty = true;
    }

    fn select_section(&mut self, section: Section) {
        debug!(section = section.title(), "section selected");
        self.section = section;
        self.dirty = true;
    }

    /// Toggle between 12-hour and 24-hour time format.
    fn toggle_time_format(&mut self) {
        self.time_format = self.time_format.toggle();
        self.dirty = true;
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
        self.dirty = true;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
