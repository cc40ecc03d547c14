use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::engine::progress::{self, ProgressStats};
use crate::engine::{priority, sequencer};
use crate::session::learn::LearnSession;
use crate::store::json_store::JsonStore;
use crate::store::schema::{PriorityData, ProgressData};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Learn,
    Progress,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: Catalog,
    /// `None` on the learn screen means every entry is completed.
    pub session: Option<LearnSession>,
    pub completed: Vec<usize>,
    pub priority: Vec<char>,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub should_quit: bool,
    pub priority_input: String,
    pub confirm_clear: bool,
    pub settings_message: Option<String>,
    rng: SmallRng,
}

impl App {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let catalog = Catalog::load();
        let store = match data_dir {
            Some(dir) => JsonStore::with_base_dir(dir).ok(),
            None => JsonStore::new().ok(),
        };

        let (completed, priority) = if let Some(ref s) = store {
            let mut progress = s.load_progress();
            progress.sanitize(catalog.len());
            let priority = s.load_priority();
            (progress.completed, priority.characters)
        } else {
            (Vec::new(), Vec::new())
        };

        Self {
            screen: AppScreen::Menu,
            catalog,
            session: None,
            completed,
            priority,
            menu,
            theme,
            config,
            store,
            should_quit: false,
            priority_input: String::new(),
            confirm_clear: false,
            settings_message: None,
            rng: SmallRng::from_entropy(),
        }
    }

    fn completed_set(&self) -> HashSet<usize> {
        self.completed.iter().copied().collect()
    }

    pub fn stats(&self) -> ProgressStats {
        progress::stats(self.completed.len(), self.catalog.len())
    }

    pub fn learned_characters(&self) -> Vec<char> {
        progress::learned_characters(&self.catalog, &self.completed)
    }

    pub fn start_learning(&mut self) {
        self.screen = AppScreen::Learn;
        self.next_session();
    }

    /// Ask the sequencer for the next entry. Replacing the session also
    /// cancels any advance still pending from the previous one.
    fn next_session(&mut self) {
        let completed = self.completed_set();
        self.session = sequencer::next_entry(&self.catalog, &completed, &self.priority)
            .map(|next| LearnSession::new(next.index));
    }

    pub fn ready(&mut self) {
        if let Some(ref mut session) = self.session {
            session.ready(&self.catalog, &mut self.rng);
        }
    }

    pub fn select_option(&mut self, index: usize) {
        let delay = self.config.feedback_delay();
        if let Some(ref mut session) = self.session {
            session.select(index, Instant::now(), delay);
        }
    }

    pub fn retry(&mut self) {
        if let Some(ref mut session) = self.session {
            session.retry(&self.catalog, &mut self.rng);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Some(ref mut session) = self.session {
            session.tick(now, &self.catalog, &mut self.rng);
        }
    }

    /// Explicit learner action at the example step: append to the
    /// completion record, persist, and move on to the next entry.
    pub fn mark_learned(&mut self) {
        let Some(ref session) = self.session else {
            return;
        };
        if !session.can_mark_learned() {
            return;
        }

        let index = session.entry_index;
        if !self.completed.contains(&index) {
            self.completed.push(index);
        }
        self.save_progress();
        self.next_session();
    }

    fn save_progress(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_progress(&ProgressData {
                completed: self.completed.clone(),
                last_studied: Some(Utc::now()),
                ..ProgressData::default()
            });
        }
    }

    fn save_priority(&self) {
        if let Some(ref store) = self.store {
            let _ = store.save_priority(&PriorityData {
                characters: self.priority.clone(),
                ..PriorityData::default()
            });
        }
    }

    /// Parse and save the priority input. Characters not in the catalog
    /// are reported but never saved; non-kanji tokens are dropped without
    /// comment.
    pub fn apply_priority_input(&mut self) {
        let parsed = priority::parse_priority_input(&self.priority_input);
        let (known, unknown) = priority::partition_known(&self.catalog, &parsed);

        self.priority = known;
        self.save_priority();

        self.settings_message = Some(if !unknown.is_empty() {
            let unknown_list: String = unknown.iter().collect();
            format!(
                "Saved {} kanji. {} not in the catalog: {}",
                self.priority.len(),
                unknown.len(),
                unknown_list
            )
        } else if !self.priority.is_empty() {
            format!("Saved {} kanji to your priority list.", self.priority.len())
        } else {
            "Priority list cleared.".to_string()
        });
    }

    pub fn clear_priority(&mut self) {
        self.priority.clear();
        self.priority_input.clear();
        self.save_priority();
        self.settings_message = Some("Priority list cleared.".to_string());
    }

    /// Two-step destructive reset: request, then confirm.
    pub fn request_clear_progress(&mut self) {
        if !self.completed.is_empty() {
            self.confirm_clear = true;
        }
    }

    pub fn confirm_clear_progress(&mut self) {
        self.completed.clear();
        self.confirm_clear = false;
        self.save_progress();
        self.settings_message = Some("All progress has been cleared.".to_string());
    }

    pub fn cancel_clear_progress(&mut self) {
        self.confirm_clear = false;
    }

    /// Switch to the next bundled theme and remember the choice in the
    /// config. An unknown configured theme snaps to the first bundled one.
    pub fn cycle_theme(&mut self) {
        let themes = Theme::available_themes();
        if let Some(idx) = themes.iter().position(|t| *t == self.config.theme) {
            let next = (idx + 1) % themes.len();
            self.config.theme = themes[next].clone();
        } else if let Some(first) = themes.first() {
            self.config.theme = first.clone();
        }
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
        self.settings_message = Some(format!("Theme set to {}.", self.config.theme));
    }

    pub fn settings_input_char(&mut self, ch: char) {
        self.priority_input.push(ch);
    }

    pub fn settings_backspace(&mut self) {
        self.priority_input.pop();
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        // Dropping the session cancels any pending advance timer.
        self.session = None;
    }

    pub fn go_to_progress(&mut self) {
        self.screen = AppScreen::Progress;
    }

    pub fn go_to_settings(&mut self) {
        self.priority_input = self
            .priority
            .iter()
            .map(|ch| ch.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.confirm_clear = false;
        self.settings_message = None;
        self.screen = AppScreen::Settings;
    }
}
