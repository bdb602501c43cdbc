use std::collections::HashMap;

use anyhow::{bail, Result};

use crate::event::Event;
use crate::view::View;

pub struct ViewRegistry {
    views: Vec<Box<dyn View>>,
    active_idx: Option<usize>,
    index: HashMap<String, usize>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            views: Vec::new(),
            active_idx: None,
            index: HashMap::new(),
        }
    }

    pub fn register(&mut self, view: Box<dyn View>) -> Result<()> {
        let id = view.id().to_string();
        if self.index.contains_key(&id) {
            bail!("duplicate view id: {}", id);
        }
        let idx = self.views.len();
        self.index.insert(id, idx);
        self.views.push(view);
        if self.active_idx.is_none() {
            self.active_idx = Some(0);
        }
        Ok(())
    }

    /// Activate a view by ID. Returns lifecycle events (deactivated old, activated new).
    pub fn activate(&mut self, id: &str) -> Result<Vec<Event>> {
        match self.index.get(id).copied() {
            Some(i) => {
                let cur = self.active_idx.unwrap_or(i);
                Ok(self.switch_to(cur, i))
            }
            None => bail!("unknown view id: {}", id),
        }
    }

    pub fn active(&self) -> Option<&dyn View> {
        self.active_idx.map(|i| &*self.views[i])
    }

    pub fn active_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.active_idx.map(|i| &mut *self.views[i])
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_idx.map(|i| self.views[i].id())
    }

    pub fn cycle_next(&mut self) -> Vec<Event> {
        if self.views.is_empty() {
            return Vec::new();
        }
        let cur = self.active_idx.unwrap_or(0);
        let next = (cur + 1) % self.views.len();
        self.switch_to(cur, next)
    }

    pub fn cycle_prev(&mut self) -> Vec<Event> {
        if self.views.is_empty() {
            return Vec::new();
        }
        let cur = self.active_idx.unwrap_or(0);
        let next = if cur == 0 { self.views.len() - 1 } else { cur - 1 };
        self.switch_to(cur, next)
    }

    fn switch_to(&mut self, from: usize, to: usize) -> Vec<Event> {
        let mut events = Vec::new();
        if from != to {
            events.push(Event::ViewDeactivated {
                id: self.views[from].id().to_string(),
            });
        }
        self.active_idx = Some(to);
        events.push(Event::ViewActivated {
            id: self.views[to].id().to_string(),
        });
        events
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Tear down and drop every view.
    pub fn clear(&mut self) {
        for v in &mut self.views {
            v.teardown();
        }
        self.views.clear();
        self.index.clear();
        self.active_idx = None;
    }

    /// Broadcast an event to views and collect their follow-up events.
    ///
    /// Timer, Resize and ThemeChanged go to all views; Key, Click and
    /// Hover go to the active view only. Lifecycle events go to the view
    /// they name.
    pub fn broadcast(&mut self, event: &Event) -> Vec<Event> {
        let mut out = Vec::new();
        match event {
            Event::Key(_) | Event::Click { .. } | Event::Hover { .. } => {
                if let Some(v) = self.active_mut() {
                    out.extend(v.handle_event(event));
                }
            }
            Event::ViewActivated { id } | Event::ViewDeactivated { id } => {
                if let Some(idx) = self.index.get(id).copied() {
                    out.extend(self.views[idx].handle_event(event));
                }
            }
            // OpenView, SettingsChanged and Quit are handled by the app loop.
            Event::OpenView { .. } | Event::SettingsChanged | Event::Quit => {}
            _ => {
                for v in &mut self.views {
                    out.extend(v.handle_event(event));
                }
            }
        }
        out
    }
}
