//! App: component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries terminal events and effect outcomes.
//! - The event loop draws when something changed, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - View messages go to the core view controllers; the effects they return
//!   run in spawned tasks and come back as `AppMessage::Outcome`.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use playshift_core::api::ApiClient;
use playshift_core::effects::{execute, Effect, Outcome};
use playshift_core::session::{Navigator, SessionContext};
use playshift_core::views::{DashboardMsg, PlaylistsMsg, SongsMsg, Views};

use crate::{
    action::{Action, ComponentId},
    app_state::{AppState, BackendStatus},
    component::Component,
    components::{
        confirm_dialog::ConfirmDialog, dashboard::Dashboard, header::Header,
        help_overlay::HelpOverlay, import_form::ImportForm, log_panel::LogPanel,
        playlist_list::PlaylistList, song_detail::SongDetail, song_manager::SongManager,
    },
    navigator::TerminalNavigator,
    shell::{Route, Shell},
    widgets::{hit, status_bar, status_bar::InputMode, toast::ToastManager},
};

/// Lines of the log file kept for the log panel.
const LOG_TAIL: usize = 500;

enum AppMessage {
    Event(Event),
    Outcome(Outcome),
}

#[derive(Debug, Default, Clone, Copy)]
struct PaneAreas {
    header: Rect,
    body: Rect,
    log_panel: Rect,
}

/// Run `$body` with `$c` bound to the component drawn for the current route.
macro_rules! with_body {
    ($app:ident, |$c:ident, $s:ident| $body:expr) => {{
        let $s = &$app.state;
        match $app.shell.route() {
            Route::Dashboard => {
                let $c = &mut $app.dashboard;
                $body
            }
            Route::Import => {
                let $c = &mut $app.import_form;
                $body
            }
            Route::Playlists => {
                let $c = &mut $app.playlist_list;
                $body
            }
            Route::Songs => {
                let $c = &mut $app.song_manager;
                $body
            }
        }
    }};
}

pub struct App {
    state: AppState,
    shell: Shell,
    api: ApiClient,
    navigator: TerminalNavigator,
    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
    toast: ToastManager,
    tick: Duration,
    should_quit: bool,
    pane_areas: PaneAreas,

    // ── Components ───────────────────────────────────────────────────────────
    header: Header,
    dashboard: Dashboard,
    import_form: ImportForm,
    playlist_list: PlaylistList,
    song_manager: SongManager,
    song_detail: SongDetail,
    confirm_dialog: ConfirmDialog,
    log_panel: LogPanel,
    help_overlay: HelpOverlay,
}

impl App {
    pub fn new(
        api: ApiClient,
        session: SessionContext,
        route: Route,
        tick: Duration,
        log_path: PathBuf,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let state = AppState::new(
            Views::new(session),
            route,
            api.base_url().to_string(),
            log_path,
        );
        Self {
            state,
            shell: Shell::new(route),
            api,
            navigator: TerminalNavigator::new(),
            tx,
            rx: Some(rx),
            toast: ToastManager::new(),
            tick,
            should_quit: false,
            pane_areas: PaneAreas::default(),
            header: Header::new(),
            dashboard: Dashboard::new(),
            import_form: ImportForm::new(),
            playlist_list: PlaylistList::new(),
            song_manager: SongManager::new(),
            song_detail: SongDetail::new(),
            confirm_dialog: ConfirmDialog::new(),
            log_panel: LogPanel::new(),
            help_overlay: HelpOverlay::new(),
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow!("event loop already started"))?;

        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = self.tx.clone();
        // Polls with a timeout so the task ends once the loop drops `rx`;
        // runtime shutdown waits for blocking tasks.
        tokio::task::spawn_blocking(move || loop {
            match event::poll(Duration::from_millis(250)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) if event_tx.is_closed() => break,
                Ok(false) => {}
                Err(_) => break,
            }
        });

        // ── First requests ────────────────────────────────────────────────────
        self.run_effects(vec![Effect::HealthCheck]);
        self.enter_route(self.shell.route());

        // ── Periodic timers ───────────────────────────────────────────────────
        // Toast expiry + spinner animation
        let mut toast_tick = tokio::time::interval(self.tick);
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // log file tail refresh: every 2s, only when the log panel is open
        let mut log_refresh = tokio::time::interval(Duration::from_secs(2));
        log_refresh.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    const MAX_DRAIN: usize = 256;
                    let mut redraw = self.handle_message(msg);
                    let mut drained = 0usize;
                    while drained < MAX_DRAIN {
                        let Ok(next) = rx.try_recv() else { break };
                        drained += 1;
                        redraw |= self.handle_message(next);
                    }
                    needs_redraw = redraw;
                }

                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }

                _ = log_refresh.tick() => {
                    if self.log_panel.is_expanded() {
                        self.reload_tui_log();
                        needs_redraw = true;
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        )?;
        terminal.show_cursor()?;
        info!("playshift exiting");

        Ok(())
    }

    /// Returns whether the frame needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a);
                    }
                    self.sync_input_mode();
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    for a in actions {
                        self.dispatch(a);
                    }
                    self.sync_input_mode();
                }
                Event::Paste(text) => {
                    let actions = if self.shell.is_focused(ComponentId::LogPanel) {
                        vec![]
                    } else {
                        with_body!(self, |c, s| c.handle_paste(&text, s))
                    };
                    for a in actions {
                        self.dispatch(a);
                    }
                    self.sync_input_mode();
                }
                Event::Resize(w, h) => self.dispatch(Action::Resize(w, h)),
                _ => return false,
            },
            AppMessage::Outcome(outcome) => {
                self.state.in_flight = self.state.in_flight.saturating_sub(1);
                self.update_spinner();
                self.settle(outcome);
            }
        }
        true
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if let Effect::Redirect(url) = effect {
                debug!("redirect {}", url);
                let result = self.navigator.redirect(&url).map_err(|e| e.to_string());
                if result.is_ok() {
                    self.toast.info("auth link copied, opening browser");
                }
                self.settle(Outcome::Redirected { url, result });
                continue;
            }

            self.state.in_flight += 1;
            self.update_spinner();
            let api = self.api.clone();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let outcome = execute(&api, effect).await;
                let _ = tx.send(AppMessage::Outcome(outcome)).await;
            });
        }
    }

    /// Toast, hand the outcome to its view, then run whatever it asks for next.
    fn settle(&mut self, outcome: Outcome) {
        if let Outcome::Health(result) = &outcome {
            self.state.backend = match result {
                Ok(()) => BackendStatus::Up,
                Err(e) => BackendStatus::Down(e.clone()),
            };
        }

        if let Some(failure) = outcome.failure() {
            if matches!(outcome, Outcome::Health(_)) {
                self.toast.warning(failure);
            } else {
                self.toast.error(failure);
            }
        } else {
            match &outcome {
                Outcome::Created(Ok(p)) => self.toast.success(format!("imported {}", p.name)),
                Outcome::Converted { result: Ok(r), .. } => {
                    self.toast.success(format!("converted {} songs", r.converted_songs))
                }
                Outcome::Synced { result: Ok(()), .. } => self.toast.success("playlist synced"),
                Outcome::Deleted { target, result: Ok(()) } => {
                    self.toast.success(format!("{} deleted", target.kind()))
                }
                _ => {}
            }
        }

        let next = self.state.views.route(outcome);
        self.run_effects(next);
    }

    fn update_spinner(&mut self) {
        match self.state.in_flight {
            0 => self.toast.dismiss_spinner(),
            1 => self.toast.spinner("1 request in flight"),
            n => self.toast.spinner(format!("{} requests in flight", n)),
        }
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Mount the route's view; every mount refetches.
    fn enter_route(&mut self, route: Route) {
        self.state.route = route;
        info!("route {}", route.path());
        let views = &mut self.state.views;
        let effects = match route {
            Route::Dashboard => views.dashboard.update(DashboardMsg::Mount),
            Route::Import => Vec::new(),
            Route::Playlists => views.playlists.update(PlaylistsMsg::Mount),
            Route::Songs => views.songs.update(SongsMsg::Mount),
        };
        self.run_effects(effects);
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Overlays capture all keys while shown
        if self.help_overlay.is_visible() {
            return self.help_overlay.handle_key(key, &self.state);
        }
        if self.state.pending_delete_prompt().is_some() {
            return self.confirm_dialog.handle_key(key, &self.state);
        }
        if self.detail_open() {
            return self.song_detail.handle_key(key, &self.state);
        }

        let normal = self.state.input_mode == InputMode::Normal;
        if normal && key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('L') => return vec![Action::ToggleLogs],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char(']') => return vec![Action::NextRoute],
                KeyCode::Char('[') => return vec![Action::PrevRoute],
                KeyCode::Char(c) => {
                    if let Some(route) = Route::from_hotkey(c) {
                        return vec![Action::Navigate(route)];
                    }
                }
                _ => {}
            }
        }

        if key.code == KeyCode::Tab {
            return vec![Action::CycleFocus];
        }

        if self.shell.is_focused(ComponentId::LogPanel) {
            return self.log_panel.handle_key(key, &self.state);
        }
        with_body!(self, |c, s| c.handle_key(key, s))
    }

    // ── Mouse handling ────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        let is_click = matches!(
            event.kind,
            MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        );
        if !is_click {
            return vec![];
        }
        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas;

        // Overlays first, in z-order
        if self.help_overlay.is_visible() {
            return match event.kind {
                MouseEventKind::Down(_) => vec![Action::ToggleHelp],
                _ => vec![],
            };
        }
        if self.state.pending_delete_prompt().is_some() {
            return self.confirm_dialog.handle_mouse(event, areas.body, &self.state);
        }
        if self.detail_open() {
            return self.song_detail.handle_mouse(event, areas.body, &self.state);
        }

        if hit(areas.header, col, row) {
            return self.header.handle_mouse(event, areas.header, &self.state);
        }
        if hit(areas.body, col, row) {
            let (body_id, mut actions) =
                with_body!(self, |c, s| (c.id(), c.handle_mouse(event, areas.body, s)));
            if !self.shell.is_focused(body_id) {
                actions.insert(0, Action::FocusPane(body_id));
            }
            return actions;
        }
        if hit(areas.log_panel, col, row) {
            let mut actions = self.log_panel.handle_mouse(event, areas.log_panel, &self.state);
            if !self.shell.is_focused(self.log_panel.id()) {
                actions.insert(0, Action::FocusPane(self.log_panel.id()));
            }
            return actions;
        }
        vec![]
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        // Offer the action to every component first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.header.on_action(&action, s));
            out.extend(self.dashboard.on_action(&action, s));
            out.extend(self.import_form.on_action(&action, s));
            out.extend(self.playlist_list.on_action(&action, s));
            out.extend(self.song_manager.on_action(&action, s));
            out.extend(self.song_detail.on_action(&action, s));
            out.extend(self.confirm_dialog.on_action(&action, s));
            out.extend(self.log_panel.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        // depth-limited to one level
        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        if !matches!(action, Action::Noop | Action::Resize(_, _)) {
            debug!("apply_action: {:?}", action);
        }
        match action {
            // ── Navigation ────────────────────────────────────────────────────
            Action::Navigate(route) => {
                if self.shell.navigate(route) {
                    self.enter_route(route);
                }
            }
            Action::NextRoute => self.dispatch(Action::Navigate(self.shell.route().next())),
            Action::PrevRoute => self.dispatch(Action::Navigate(self.shell.route().prev())),
            Action::CycleFocus => self.shell.cycle_focus(),
            Action::FocusPane(ComponentId::LogPanel) => self.shell.focus_log(),
            Action::FocusPane(_) => self.shell.focus_body(),

            // ── View messages ─────────────────────────────────────────────────
            Action::Dashboard(msg) => {
                let effects = self.state.views.dashboard.update(msg);
                self.run_effects(effects);
            }
            Action::Import(msg) => {
                let effects = self.state.views.import.update(msg);
                self.run_effects(effects);
            }
            Action::Playlists(msg) => {
                let effects = self.state.views.playlists.update(msg);
                self.run_effects(effects);
            }
            Action::Songs(msg) => {
                let effects = self.state.views.songs.update(msg);
                self.run_effects(effects);
            }

            // ── UI ────────────────────────────────────────────────────────────
            Action::ToggleLogs => {
                self.shell.toggle_log_panel();
                if self.shell.show_log_panel {
                    self.reload_tui_log();
                }
            }
            Action::ToggleKeys => self.shell.show_keys_bar = !self.shell.show_keys_bar,
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        // Truncate for toast display
                        let display = if text.chars().count() > 40 {
                            format!("{}…", text.chars().take(40).collect::<String>())
                        } else {
                            text.clone()
                        };
                        self.toast.success(format!("copied: {}", display));
                    }
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            // help visibility lives in the overlay; a resize just redraws
            Action::ToggleHelp | Action::Resize(_, _) | Action::Noop => {}
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | body | (log) | (keys bar) ─────────────────
        let status_h = if self.shell.show_keys_bar { 1u16 } else { 0 };
        let log_h = if self.shell.show_log_panel { 10u16 } else { 0 };

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(status_h),
            ])
            .split(area);

        self.pane_areas = PaneAreas {
            header: outer[0],
            body: outer[1],
            log_panel: if self.shell.show_log_panel {
                outer[2]
            } else {
                Rect::default()
            },
        };

        self.header.draw(frame, outer[0], false, &self.state);

        let body_focused = self.shell.is_focused(self.shell.route().component());
        with_body!(self, |c, s| c.draw(frame, outer[1], body_focused, s));

        if self.shell.show_log_panel {
            let log_focused = self.shell.is_focused(ComponentId::LogPanel);
            self.log_panel.draw(frame, outer[2], log_focused, &self.state);
        }

        if self.shell.show_keys_bar {
            status_bar::draw_keys_bar(frame, outer[3], self.state.input_mode, self.shell.route());
        }

        // ── Overlays (on top of the body) ─────────────────────────────────────
        if self.detail_open() {
            self.song_detail.draw(frame, area, true, &self.state);
        }
        self.confirm_dialog.draw(frame, area, true, &self.state);
        self.help_overlay.draw(frame, area, true, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn detail_open(&self) -> bool {
        self.shell.route() == Route::Songs && self.state.views.songs.selected().is_some()
    }

    fn sync_input_mode(&mut self) {
        let editing = !self.shell.is_focused(ComponentId::LogPanel)
            && with_body!(self, |c, _s| c.is_editing());
        self.state.input_mode = if editing {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
    }

    /// Read the last lines of the log file into `state.log_lines`.
    fn reload_tui_log(&mut self) {
        match std::fs::read_to_string(&self.state.log_path) {
            Ok(content) => {
                let lines: Vec<String> = content.lines().map(|l| l.to_string()).collect();
                let start = lines.len().saturating_sub(LOG_TAIL);
                self.state.log_lines = lines[start..].to_vec();
            }
            Err(e) => debug!("log reload failed: {}", e),
        }
    }
}
