use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indextree::NodeId;
use ratatui::widgets::ScrollbarState;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::config::Config;
use crate::dom::Document;
use crate::parser::HEADER_CLASS;
use crate::search::{FilterSummary, SearchFilter, SectionView, section_view, section_views};
use crate::tui::theme::Theme;

const PAGE_SCROLL: u16 = 10;

/// A visible section with its fold state.
#[derive(Debug, Clone)]
pub struct SectionPane {
    pub view: SectionView,
    pub collapsed: bool,
    pub focused: bool,
}

pub struct App {
    pub document: Document,
    pub filename: String,
    pub filter: Option<SearchFilter>,
    pub query: String,
    pub summary: FilterSummary,
    header: Option<NodeId>,
    /// Folded sections; kept across queries, so a section hidden while
    /// folded comes back folded.
    collapsed: HashSet<NodeId>,
    focused: Option<NodeId>,
    pub content_scroll: u16,
    pub content_scroll_state: ScrollbarState,
    pub content_height: u16,
    pub config: Config,
    /// Where dark mode changes are persisted; `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    pub theme: Theme,
    pub status_message: Option<String>, // Shown until the next key press
    should_quit: bool,
}

impl App {
    pub fn new(document: Document, filename: String, config: Config) -> Self {
        let filter = SearchFilter::attach(&document, config.filter_options());
        let header = document.first_with_class(HEADER_CLASS);
        let summary = FilterSummary {
            visible: filter.as_ref().map_or(0, |f| f.sections().len()),
            ..FilterSummary::default()
        };

        Self {
            document,
            filename,
            filter,
            query: String::new(),
            summary,
            header,
            collapsed: HashSet::new(),
            focused: None,
            content_scroll: 0,
            content_scroll_state: ScrollbarState::new(0),
            content_height: 0,
            theme: Theme::for_mode(config.ui.dark_mode),
            config,
            config_path: Config::active_path(),
            status_message: None,
            should_quit: false,
        }
    }

    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn has_search(&self) -> bool {
        self.filter.is_some()
    }

    /// The clear control is offered only while there is something to clear.
    pub fn clear_control_visible(&self) -> bool {
        self.filter
            .as_ref()
            .is_some_and(SearchFilter::clear_control_visible)
    }

    pub fn section_count(&self) -> usize {
        self.filter.as_ref().map_or(0, |f| f.sections().len())
    }

    /// Views of the visible sections, in page order.
    pub fn visible_sections(&self) -> Vec<SectionView> {
        match &self.filter {
            Some(filter) => section_views(&self.document, filter)
                .into_iter()
                .filter(|view| view.visible)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Visible sections with their fold and focus state, in page order.
    pub fn section_panes(&self) -> Vec<SectionPane> {
        let Some(filter) = &self.filter else {
            return Vec::new();
        };
        filter
            .sections()
            .iter()
            .zip(section_views(&self.document, filter))
            .filter(|(_, view)| view.visible)
            .map(|(section, view)| SectionPane {
                view,
                collapsed: self.collapsed.contains(section),
                focused: self.focused == Some(*section),
            })
            .collect()
    }

    pub fn is_collapsed(&self, section: NodeId) -> bool {
        self.collapsed.contains(&section)
    }

    pub fn focused_section(&self) -> Option<NodeId> {
        self.focused
    }

    /// The page header, which the filter never hides.
    pub fn header_view(&self) -> Option<SectionView> {
        let marker_class = self.config.search.marker_class.as_str();
        self.header
            .map(|header| section_view(&self.document, header, marker_class))
            .filter(|view| !view.lines.is_empty())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status_message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('u') => self.clear_query(),
                KeyCode::Char('d') => self.toggle_dark_mode(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.clear_query();
                }
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.apply_query();
                }
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.apply_query();
            }
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_previous(),
            KeyCode::Enter => self.toggle_focused(),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::Up => self.scroll_up(1),
            KeyCode::PageDown => self.scroll_down(PAGE_SCROLL),
            KeyCode::PageUp => self.scroll_up(PAGE_SCROLL),
            KeyCode::Home => self.set_scroll(0),
            KeyCode::End => self.set_scroll(self.content_height.saturating_sub(1)),
            _ => {}
        }
    }

    pub fn clear_query(&mut self) {
        if self.query.is_empty() {
            return;
        }
        self.query.clear();
        self.apply_query();
    }

    fn apply_query(&mut self) {
        if let Some(filter) = self.filter.as_mut() {
            self.summary = filter.set_query(&mut self.document, &self.query);
        }
        if self.focused.is_some_and(|section| self.document.is_hidden(section)) {
            self.focused = None;
        }
        self.set_scroll(0);
    }

    fn visible_section_ids(&self) -> Vec<NodeId> {
        self.filter
            .as_ref()
            .map(|filter| filter.visible_sections(&self.document))
            .unwrap_or_default()
    }

    /// Move focus to the next visible section, wrapping to the first.
    pub fn focus_next(&mut self) {
        let visible = self.visible_section_ids();
        let next = match self.focused.and_then(|f| visible.iter().position(|s| *s == f)) {
            Some(i) => visible.get(i + 1).or(visible.first()),
            None => visible.first(),
        };
        self.focused = next.copied();
    }

    /// Move focus to the previous visible section, wrapping to the last.
    pub fn focus_previous(&mut self) {
        let visible = self.visible_section_ids();
        let previous = match self.focused.and_then(|f| visible.iter().position(|s| *s == f)) {
            Some(0) | None => visible.last(),
            Some(i) => visible.get(i - 1),
        };
        self.focused = previous.copied();
    }

    /// Fold or unfold the focused section.
    pub fn toggle_focused(&mut self) {
        let Some(section) = self.focused else {
            self.status_message = Some("Tab to pick a section to fold".to_string());
            return;
        };
        if !self.collapsed.remove(&section) {
            self.collapsed.insert(section);
        }
        log::debug!(
            "Section {:?} {}",
            self.document.element(section).and_then(|e| e.id.as_deref()),
            if self.collapsed.contains(&section) { "folded" } else { "unfolded" }
        );
    }

    pub fn toggle_dark_mode(&mut self) {
        self.config.ui.dark_mode = !self.config.ui.dark_mode;
        self.theme = Theme::for_mode(self.config.ui.dark_mode);

        let label = if self.config.ui.dark_mode {
            "Dark mode on"
        } else {
            "Dark mode off"
        };

        self.status_message = Some(match &self.config_path {
            Some(path) => match self.config.save_to(path) {
                Ok(()) => format!("✓ {}", label),
                Err(e) => {
                    log::warn!("Could not persist dark mode: {}", e);
                    format!("✗ {} (not saved: {})", label, e)
                }
            },
            None => format!("✓ {}", label),
        });
    }

    /// Record the rendered content height and keep the scroll position inside it.
    pub fn update_content_metrics(&mut self, content_lines: usize) {
        self.content_height = u16::try_from(content_lines).unwrap_or(u16::MAX);
        self.content_scroll = self
            .content_scroll
            .min(self.content_height.saturating_sub(1));
        self.content_scroll_state =
            ScrollbarState::new(content_lines).position(self.content_scroll as usize);
    }

    fn scroll_down(&mut self, amount: u16) {
        let target = self.content_scroll.saturating_add(amount);
        self.set_scroll(target.min(self.content_height.saturating_sub(1)));
    }

    fn scroll_up(&mut self, amount: u16) {
        self.set_scroll(self.content_scroll.saturating_sub(amount));
    }

    fn set_scroll(&mut self, position: u16) {
        self.content_scroll = position;
        self.content_scroll_state = self
            .content_scroll_state
            .position(self.content_scroll as usize);
    }
}
