//! Ratatui-based terminal UI.
//!
//! The TUI shows a month selector on the left and three tabs on the right:
//! the duties summary, the KPI dashboard (supplier chart + metrics), and the
//! media/PDF tab. Every key press is handled by one explicit handler that
//! updates the state synchronously, followed by a redraw.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::app::pipeline::{ReportView, build_report};
use crate::data::{CsvDirectory, DataLoader, DatasetSource};
use crate::domain::{Dataset, REPORT_MONTHS, ReportConfig};
use crate::error::AppError;
use crate::io::{export_pdf, save_document};
use crate::report::{MetricsSummary, Narrative, REPORT_TITLE, default_month};

mod plotters_chart;

use plotters_chart::{SupplierBar, SupplierBarChart};

/// Start the TUI.
pub fn run(config: ReportConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let loader = DataLoader::new(CsvDirectory::new(&config.data_dir));
    let mut app = App::new(config, loader);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Summary,
    Kpis,
    Media,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Summary, Tab::Kpis, Tab::Media];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Summary => "Duties Summary",
            Tab::Kpis => "KPIs Dashboard",
            Tab::Media => "Media & PDF",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Summary => 0,
            Tab::Kpis => 1,
            Tab::Media => 2,
        }
    }

    fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

pub struct App<S = CsvDirectory> {
    config: ReportConfig,
    loader: DataLoader<S>,
    /// Index of the displayed month in [`REPORT_MONTHS`].
    month_cursor: usize,
    /// Month the last failed step tried to load; navigation continues from it.
    failed_month: Option<usize>,
    tab: Tab,
    view: Option<ReportView>,
    error: Option<AppError>,
    status: String,
    last_export: Option<PathBuf>,
}

impl<S: DatasetSource> App<S> {
    /// Build the app and load the default (newest) month.
    ///
    /// A failed initial load is shown in the UI rather than aborting startup,
    /// so the user can still pick another month.
    pub fn new(config: ReportConfig, loader: DataLoader<S>) -> Self {
        let mut app = Self {
            config,
            loader,
            month_cursor: 0,
            failed_month: None,
            tab: Tab::Summary,
            view: None,
            error: None,
            status: String::new(),
            last_export: None,
        };
        let _ = app.select_month(&default_month().label());
        app
    }

    pub fn view(&self) -> Option<&ReportView> {
        self.view.as_ref()
    }

    pub fn displayed_dataset(&self) -> Option<&Dataset> {
        self.view.as_ref().map(|v| v.dataset.as_ref())
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn loader(&self) -> &DataLoader<S> {
        &self.loader
    }

    /// Month selection handler.
    ///
    /// On failure the previously displayed month stays on screen and the error
    /// is shown above it.
    pub fn select_month(&mut self, label: &str) -> Result<(), AppError> {
        match build_report(&mut self.loader, label) {
            Ok(view) => {
                if let Some(idx) = view.month.index() {
                    self.month_cursor = idx;
                }
                self.failed_month = None;
                self.status = format!("{}: {} supplier(s)", view.month, view.dataset.len());
                self.view = Some(view);
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(label, error = %err, "month selection failed");
                self.status = err.to_string();
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Step to the neighbouring month and load it.
    ///
    /// The sidebar highlight only moves when the load succeeds. A month that
    /// fails is marked in the list, and the next step starts from it so later
    /// months stay reachable.
    pub fn step_month(&mut self, delta: isize) {
        let last = REPORT_MONTHS.len() as isize - 1;
        let from = self.failed_month.unwrap_or(self.month_cursor);
        let next = (from as isize + delta).clamp(0, last) as usize;
        if self.select_month(&REPORT_MONTHS[next].label()).is_err() {
            self.failed_month = Some(next);
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    /// Download handler: render the displayed month to PDF and save it.
    pub fn export_pdf(&mut self) -> Result<PathBuf, AppError> {
        let result = match &self.view {
            None => Err(AppError::data_unavailable("No month is loaded; nothing to export.")),
            Some(view) => export_pdf(view.month, &view.dataset)
                .and_then(|doc| save_document(&self.config.out_dir, &doc)),
        };

        match result {
            Ok(path) => {
                self.status = format!("Saved {}", path.display());
                self.last_export = Some(path.clone());
                self.error = None;
                Ok(path)
            }
            Err(err) => {
                tracing::warn!(error = %err, "PDF export failed");
                self.status = err.to_string();
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Dispatch one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.step_month(-1),
            KeyCode::Down => self.step_month(1),
            KeyCode::Left | KeyCode::BackTab => self.prev_tab(),
            KeyCode::Right | KeyCode::Tab => self.next_tab(),
            KeyCode::Char('1') => self.select_tab(Tab::Summary),
            KeyCode::Char('2') => self.select_tab(Tab::Kpis),
            KeyCode::Char('3') => self.select_tab(Tab::Media),
            KeyCode::Char('p') => {
                if self.tab == Tab::Media {
                    let _ = self.export_pdf();
                } else {
                    self.status = "Switch to the Media & PDF tab (3) to download the report.".to_string();
                }
            }
            _ => {}
        }
        false
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("procure", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {REPORT_TITLE}")),
        ]));

        let shown = self
            .view
            .as_ref()
            .map(|v| format!("showing: {} | suppliers: {}", v.month, v.dataset.len()))
            .unwrap_or_else(|| "showing: -".to_string());
        lines.push(Line::from(Span::styled(shown, Style::default().fg(Color::Gray))));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(0)])
            .split(area);

        self.draw_months(frame, columns[0]);

        let mut constraints = vec![Constraint::Length(3)];
        if self.error.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(columns[1]);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL))
            .select(self.tab.index())
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));
        frame.render_widget(tabs, rows[0]);

        let content = if let Some(err) = &self.error {
            draw_error(frame, rows[1], err);
            rows[2]
        } else {
            rows[1]
        };

        let Some(view) = &self.view else {
            let msg = Paragraph::new("No month loaded. Select a month with ↑/↓.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(msg, content);
            return;
        };

        match self.tab {
            Tab::Summary => draw_summary(frame, content, &Narrative::new(view.month, &self.config)),
            Tab::Kpis => draw_kpis(frame, content, view),
            Tab::Media => self.draw_media(frame, content),
        }
    }

    fn draw_months(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = REPORT_MONTHS
            .iter()
            .enumerate()
            .map(|(i, m)| {
                if self.failed_month == Some(i) {
                    ListItem::new(format!("{} ✗", m.label())).style(Style::default().fg(Color::Red))
                } else {
                    ListItem::new(m.label())
                }
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().title("Month").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.month_cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_media(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Video: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.config.video_path.display().to_string()),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                "Press p to download the PDF report.",
                Style::default().fg(Color::Cyan),
            )),
        ];
        if let Some(path) = &self.last_export {
            lines.push(Line::raw(format!("Last download: {}", path.display())));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().title(Tab::Media.title()).borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ month  ←/→ tab  1-3 jump  p download (tab 3)  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_error(frame: &mut ratatui::Frame<'_>, area: Rect, err: &AppError) {
    let p = Paragraph::new(err.to_string())
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("Error").borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_summary(frame: &mut ratatui::Frame<'_>, area: Rect, narrative: &Narrative<'_>) {
    let mut lines = vec![
        Line::from(Span::styled(
            narrative.heading.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for bullet in narrative.bullets {
        lines.push(Line::raw(format!("• {bullet}")));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Image: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "{} ({})",
            narrative.image_path.display(),
            narrative.image_caption
        )),
    ]));

    let p = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(Block::default().title(Tab::Summary.title()).borders(Borders::ALL));
    frame.render_widget(p, area);
}

fn draw_kpis(frame: &mut ratatui::Frame<'_>, area: Rect, view: &ReportView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let block = Block::default()
        .title("Performance (bar colour: OTIF %, red low / green high)")
        .borders(Borders::ALL);
    let inner = block.inner(rows[0]);
    frame.render_widget(block, rows[0]);
    frame.render_widget(Clear, inner);

    let (bars, y_bounds) = chart_bars(&view.dataset);
    let widget = SupplierBarChart {
        bars: &bars,
        y_bounds,
        x_label: "supplier",
        y_label: "savings (USD)",
        fmt_y: fmt_axis_usd,
    };
    frame.render_widget(widget, inner);

    draw_metrics(frame, rows[1], &view.metrics);
}

/// The two metric tiles under the chart.
fn draw_metrics(frame: &mut ratatui::Frame<'_>, area: Rect, metrics: &MetricsSummary) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let tiles = [
        ("Total Savings", metrics.total_savings_display()),
        ("Avg Cycle Time", metrics.avg_cycle_display()),
    ];
    for ((title, value), rect) in tiles.into_iter().zip(cols.iter()) {
        let p = Paragraph::new(Span::styled(value, Style::default().add_modifier(Modifier::BOLD)))
            .block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(p, *rect);
    }
}

/// Build bars and y bounds for the supplier chart.
///
/// Bounds always include zero; an empty dataset yields no bars and `[0, 1]`.
fn chart_bars(dataset: &Dataset) -> (Vec<SupplierBar>, [f64; 2]) {
    let bars: Vec<SupplierBar> = dataset
        .records()
        .iter()
        .map(|r| SupplierBar {
            label: r.supplier.clone(),
            savings: r.savings_usd,
            rgb: otif_rgb(r.otif_pct),
        })
        .collect();

    let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
    for bar in &bars {
        y_min = y_min.min(bar.savings);
        y_max = y_max.max(bar.savings);
    }

    if y_max <= y_min {
        return (bars, [0.0, 1.0]);
    }

    let pad = (y_max - y_min) * 0.05;
    let lower = if y_min < 0.0 { y_min - pad } else { 0.0 };
    (bars, [lower, y_max + pad])
}

/// Red (0% OTIF) to green (100% OTIF); values outside the range are clamped.
fn otif_rgb(otif_pct: f64) -> (u8, u8, u8) {
    let t = if otif_pct.is_finite() { (otif_pct / 100.0).clamp(0.0, 1.0) } else { 0.0 };
    let r = (255.0 * (1.0 - t)).round() as u8;
    let g = (255.0 * t).round() as u8;
    (r, g, 60)
}

fn fmt_axis_usd(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{:.0}k", v / 1000.0)
    } else {
        format!("{v:.0}")
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use ratatui::backend::TestBackend;

    use super::*;
    use crate::domain::{MonthKey, SupplierRecord};
    use crate::error::ErrorKind;
    use crate::report::format_usd;

    /// Serves Dec and Nov; Oct is "missing". With `empty` set, every served
    /// month has no suppliers.
    struct FakeSource {
        reads: Cell<usize>,
        empty: bool,
    }

    impl DatasetSource for FakeSource {
        fn read_month(&self, month: MonthKey) -> Result<Dataset, AppError> {
            self.reads.set(self.reads.get() + 1);
            if month == REPORT_MONTHS[2] {
                return Err(AppError::data_unavailable(format!("Data for {month} is unavailable")));
            }
            if self.empty {
                return Ok(Dataset::new(month, Vec::new()));
            }
            Ok(Dataset::new(
                month,
                vec![SupplierRecord {
                    supplier: "Acme".to_string(),
                    otif_pct: 95.0,
                    savings_usd: 1200.0,
                    cycle_days: 3.0,
                }],
            ))
        }
    }

    fn app_with(empty: bool) -> App<FakeSource> {
        let config = ReportConfig {
            out_dir: std::env::temp_dir(),
            ..ReportConfig::default()
        };
        App::new(config, DataLoader::new(FakeSource { reads: Cell::new(0), empty }))
    }

    fn app() -> App<FakeSource> {
        app_with(false)
    }

    /// Draw the KPI tab for `view` on an 80x20 buffer and return the text plus
    /// the number of non-blank cells inside the chart block.
    fn kpi_cells(view: &ReportView) -> (String, usize) {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw_kpis(f, f.area(), view)).unwrap();
        let buffer = terminal.backend().buffer();
        let txt = buffer.content.iter().map(|c| c.symbol()).collect();
        // The chart block spans rows 0..17; its inner area excludes the border.
        let mut inked = 0;
        for y in 1..16u16 {
            for x in 1..79u16 {
                if buffer.cell((x, y)).is_some_and(|c| !c.symbol().trim().is_empty()) {
                    inked += 1;
                }
            }
        }
        (txt, inked)
    }

    fn screen(app: &App<FakeSource>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn starts_on_newest_month() {
        let app = app();
        assert_eq!(app.view().unwrap().month, REPORT_MONTHS[0]);
        assert!(app.error().is_none());
    }

    #[test]
    fn invalid_month_keeps_displayed_dataset() {
        let mut app = app();
        let before = app.displayed_dataset().cloned();

        let err = app.select_month("Feb 2019").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(app.displayed_dataset().cloned(), before);
        assert_eq!(app.error().map(AppError::kind), Some(ErrorKind::NotFound));
    }

    #[test]
    fn unavailable_month_does_not_block_other_months() {
        let mut app = app();
        app.step_month(2);
        assert_eq!(app.error().map(AppError::kind), Some(ErrorKind::DataUnavailable));
        assert_eq!(app.view().unwrap().month, REPORT_MONTHS[0]);

        app.step_month(-1);
        assert!(app.error().is_none());
        assert_eq!(app.view().unwrap().month, REPORT_MONTHS[1]);
    }

    #[test]
    fn failed_step_keeps_sidebar_on_displayed_month() {
        let mut app = app();
        app.step_month(1);
        app.step_month(1);
        assert_eq!(app.error().map(AppError::kind), Some(ErrorKind::DataUnavailable));
        assert_eq!(app.month_cursor, 1);
        assert_eq!(app.failed_month, Some(2));

        let txt = screen(&app);
        assert!(txt.contains("» Nov 2025"));
        assert!(txt.contains("Oct 2025 ✗"));

        // A later download clears the error panel; the sidebar still matches
        // the body and still marks the failed month.
        app.select_tab(Tab::Media);
        app.export_pdf().unwrap();
        assert!(app.error().is_none());
        let txt = screen(&app);
        assert!(txt.contains("» Nov 2025"));
        assert!(txt.contains("showing: Nov 2025"));
        assert!(txt.contains("Oct 2025 ✗"));

        app.step_month(-1);
        assert_eq!(app.view().unwrap().month, REPORT_MONTHS[1]);
        assert_eq!(app.failed_month, None);
        assert!(!screen(&app).contains("✗"));
    }

    #[test]
    fn revisiting_a_month_uses_the_cache() {
        let mut app = app();
        app.step_month(1);
        app.step_month(-1);
        assert_eq!(app.loader().source().reads.get(), 2);
    }

    #[test]
    fn tabs_cycle_both_ways() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Left));
        assert_eq!(app.tab(), Tab::Media);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.tab(), Tab::Summary);
        app.handle_key(KeyCode::Char('2'));
        assert_eq!(app.tab(), Tab::Kpis);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn download_only_from_media_tab() {
        let mut app = app();
        app.handle_key(KeyCode::Char('p'));
        assert!(app.status().contains("Media & PDF"));
    }

    #[test]
    fn summary_tab_renders_narrative() {
        let app = app();
        let txt = screen(&app);
        assert!(txt.contains("Dec 2025 Activities"));
        assert!(txt.contains("images/process_map.png (Procurement Flow)"));
        assert!(txt.contains("Nov 2025"));
    }

    #[test]
    fn media_tab_renders_video_and_trigger() {
        let mut app = app();
        app.select_tab(Tab::Media);
        let txt = screen(&app);
        assert!(txt.contains("videos/demo.mp4"));
        assert!(txt.contains("Press p to download"));
    }

    #[test]
    fn error_panel_is_rendered() {
        let mut app = app();
        let _ = app.select_month("nope");
        assert!(screen(&app).contains("Unknown report month 'nope'"));
    }

    #[test]
    fn metric_tiles_render() {
        let metrics = MetricsSummary {
            total_savings: 300.0,
            avg_cycle_days: Some(4.0),
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal.draw(|f| draw_metrics(f, f.area(), &metrics)).unwrap();
        let txt: String = terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();
        assert!(txt.contains("Total Savings"));
        assert!(txt.contains("$300.00"));
        assert!(txt.contains("4.0 days"));
    }

    #[test]
    fn empty_dataset_gives_empty_chart() {
        let (bars, bounds) = chart_bars(&Dataset::new(REPORT_MONTHS[0], Vec::new()));
        assert!(bars.is_empty());
        assert_eq!(bounds, [0.0, 1.0]);
    }

    #[test]
    fn kpi_tab_renders_chart_and_metrics() {
        let mut app = app();
        app.select_tab(Tab::Kpis);
        let txt = screen(&app);
        assert!(txt.contains("Performance"));
        assert!(txt.contains("Total Savings"));
        assert!(txt.contains("$1,200.00"));
        assert!(txt.contains("Avg Cycle Time"));
        assert!(txt.contains("3.0 days"));
        assert!(!txt.contains("Chart area too small"));

        let (_, inked) = kpi_cells(app.view().unwrap());
        assert!(inked > 0, "chart area is blank");
    }

    #[test]
    fn empty_month_draws_an_empty_chart() {
        let mut app = app_with(true);
        assert!(app.error().is_none());
        assert!(app.displayed_dataset().unwrap().is_empty());

        app.select_tab(Tab::Kpis);
        let txt = screen(&app);
        assert!(txt.contains("Performance"));
        assert!(txt.contains("$0.00"));
        assert!(txt.contains("N/A"));

        let (chart_txt, inked) = kpi_cells(app.view().unwrap());
        assert!(!chart_txt.contains("Chart area too small"));
        assert!(inked > 0, "empty month should still draw axes");
    }

    #[test]
    fn chart_bounds_include_zero_and_pad() {
        let ds = Dataset::new(
            REPORT_MONTHS[0],
            vec![
                SupplierRecord {
                    supplier: "A".to_string(),
                    otif_pct: 100.0,
                    savings_usd: 100.0,
                    cycle_days: 1.0,
                },
                SupplierRecord {
                    supplier: "B".to_string(),
                    otif_pct: 0.0,
                    savings_usd: 200.0,
                    cycle_days: 1.0,
                },
            ],
        );
        let (bars, bounds) = chart_bars(&ds);
        assert_eq!(bars.len(), 2);
        assert_eq!(bounds, [0.0, 210.0]);
        assert_eq!(bars[0].rgb, (0, 255, 60));
        assert_eq!(bars[1].rgb, (255, 0, 60));
    }

    #[test]
    fn axis_labels() {
        assert_eq!(fmt_axis_usd(12_000.0), "12k");
        assert_eq!(fmt_axis_usd(250.0), "250");
        assert_eq!(format_usd(12_000.0), "$12,000.00");
    }
}
