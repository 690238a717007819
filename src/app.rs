use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::PickerConfig;
use crate::event::Event;
use crate::items::{Item, ItemStore, StoreChange};
use crate::wheel::WheelHandle;

const MAX_TITLE_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Items,
    Picker,
}

impl Screen {
    pub fn title(&self) -> &str {
        match self {
            Screen::Items => "Items List",
            Screen::Picker => "Pick Randomly",
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub store: ItemStore,
    pub selected: usize,
    // New item prompt state
    pub entering_item: bool,
    pub item_buffer: String,
    pub wheel: Option<WheelHandle>,
    pub last_pick: Option<Item>,
    pub debug: bool,
    pub status: Option<String>,
    pub frame: u64,
    config: PickerConfig,
    rng: StdRng,
    events: mpsc::UnboundedSender<Event>,
}

impl App {
    pub fn new(config: PickerConfig, events: mpsc::UnboundedSender<Event>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            should_quit: false,
            screen: Screen::Items,
            store: ItemStore::new(),
            selected: 0,
            entering_item: false,
            item_buffer: String::new(),
            wheel: None,
            last_pick: None,
            debug: false,
            status: None,
            frame: 0,
            config,
            rng,
            events,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.as_ref().is_some_and(WheelHandle::is_spinning)
    }

    pub fn on_tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn on_settled(&mut self, item: Item) {
        // Events still queued from a closed picker must not touch the open one
        let current = self.wheel.as_ref().and_then(WheelHandle::settled_item);
        if self.screen != Screen::Picker || current.as_ref() != Some(&item) {
            return;
        }
        self.status = Some(format!("Picked \"{}\"", item.title));
        self.last_pick = Some(item);
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        // The new item prompt takes all input while open
        if self.entering_item {
            self.handle_item_input(key);
            return;
        }

        match self.screen {
            Screen::Items => self.handle_items_key(key),
            Screen::Picker => self.handle_picker_key(key),
        }
    }

    fn handle_items_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.entering_item = true;
                self.item_buffer.clear();
                self.status = None;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.store.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Enter => self.open_picker(),
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            // Done stays disabled until the wheel settles
            KeyCode::Enter => {
                if !self.is_spinning() {
                    self.close_picker();
                }
            }
            KeyCode::Esc => {
                if let Some(wheel) = self.wheel.as_mut() {
                    wheel.cancel();
                }
                self.close_picker();
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.debug = !self.debug;
            }
            KeyCode::Up if self.debug => self.step_wheel(false),
            KeyCode::Down if self.debug => self.step_wheel(true),
            _ => {}
        }
    }

    fn handle_item_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let change = self.store.add(&self.item_buffer);
                if let StoreChange::Added { index, .. } = change {
                    self.selected = index;
                }
                self.entering_item = false;
                self.item_buffer.clear();
            }
            KeyCode::Backspace => {
                self.item_buffer.pop();
            }
            KeyCode::Esc => {
                self.entering_item = false;
                self.item_buffer.clear();
            }
            KeyCode::Char(c) => {
                if self.item_buffer.chars().count() < MAX_TITLE_LEN && !c.is_control() {
                    self.item_buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn remove_selected(&mut self) {
        if self.store.is_empty() {
            return;
        }
        match self.store.remove(self.selected) {
            Ok(_) => {
                if self.selected >= self.store.len() {
                    self.selected = self.store.len().saturating_sub(1);
                }
            }
            Err(err) => warn!(%err, "remove failed"),
        }
    }

    fn open_picker(&mut self) {
        if !self.store.can_pick() {
            self.status = Some("Add at least two items to pick randomly".to_string());
            return;
        }

        let mut wheel = WheelHandle::with_seed(self.store.snapshot(), self.config.wheel, self.rng.gen());
        let events = self.events.clone();
        wheel.on_settled(move |item| {
            let _ = events.send(Event::Settled(item.clone()));
        });

        match wheel.start() {
            Ok(plan) => {
                info!(items = self.store.len(), ticks = plan.total_ticks, "picker opened");
                self.wheel = Some(wheel);
                self.last_pick = None;
                self.status = None;
                self.screen = Screen::Picker;
            }
            Err(err) => {
                warn!(%err, "could not start the wheel");
                self.status = Some(err.to_string());
            }
        }
    }

    fn close_picker(&mut self) {
        // Dropping the handle tears down any timers it still owns
        self.wheel = None;
        self.debug = false;
        self.screen = Screen::Items;
    }

    fn step_wheel(&mut self, forward: bool) {
        let Some(wheel) = self.wheel.as_mut() else { return };
        let result = if forward {
            wheel.step_forward()
        } else {
            wheel.step_backward()
        };
        if let Err(err) = result {
            self.status = Some(err.to_string());
        }
    }

    fn quit(&mut self) {
        if let Some(wheel) = self.wheel.as_mut() {
            wheel.cancel();
        }
        self.should_quit = true;
    }
}
