//! The window-manager runtime core.
//!
//! State is three values: a stack of groups (each group a stack of
//! window handles), an ordered list of screen regions, and the gap. The
//! group at TOS is active (new windows land there) and the top
//! `min(groups, regions)` groups are visible, group `i` tiled into
//! region `i`. Everything below that line is hidden.
//!
//! Every mutation ends with a full recomputation (`draw_all`), whether
//! or not the touched group is currently visible, so a hidden group can
//! never carry a stale placement onto the screen later.

use std::sync::Arc;

use log::debug;

use crate::display::{DisplayEvent, DisplayHandle, WindowId};
use crate::layout::{tile, Region};
use crate::stack::Stack;

/// One tiling unit: a stack of window handles.
pub type Group = Stack<WindowId>;

/// Direction for the roll operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollDirection {
    /// Move the TOS to the bottom.
    Top,
    /// Move the bottom to the TOS.
    Bottom,
}

/// Where a managed window lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Top-relative index of the owning group.
    pub group: usize,
    /// Index of the region the group is rendered into, if visible.
    pub region: Option<usize>,
}

/// The shared layout model and the operations that mutate it.
///
/// A single `parking_lot::Mutex` around this value serializes the
/// windowing-event thread and the command-server thread; each holds the
/// lock for one event or one complete command.
pub struct WindowManager {
    groups: Stack<Group>,
    regions: Vec<Region>,
    gap: u32,
    display: Arc<dyn DisplayHandle>,
}

impl WindowManager {
    pub fn new(display: Arc<dyn DisplayHandle>, regions: Vec<Region>, gap: u32) -> Self {
        Self {
            groups: Stack::new(),
            regions,
            gap,
            display,
        }
    }

    /// Number of groups currently rendered on screen.
    pub fn visible_count(&self) -> usize {
        self.groups.len().min(self.regions.len())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Windows of the group `n` positions below TOS, top-down.
    pub fn group_windows(&self, n: usize) -> Option<Vec<WindowId>> {
        self.groups.at(n).map(|g| g.iter().copied().collect())
    }

    /// Locate the group owning `window` and, when that group is
    /// visible, the region it is rendered into.
    pub fn find(&self, window: WindowId) -> Option<Location> {
        let visible = self.visible_count();
        (0..self.groups.len()).find_map(|g| {
            let group = self.groups.at(g)?;
            group.position(|&w| w == window).map(|_| Location {
                group: g,
                region: (g < visible).then_some(g),
            })
        })
    }

    /// Push an empty group onto the collection, making it active.
    pub fn push_group(&mut self) {
        self.groups.push(Group::new());
        self.draw_all();
    }

    /// Destroy the active group, refused unless it is empty.
    pub fn pop_group(&mut self) {
        match self.groups.at(0) {
            Some(group) if group.is_empty() => {
                self.groups.pop();
                self.draw_all();
            }
            _ => debug!("pop refused: active group is missing or not empty"),
        }
    }

    /// Start managing `window` in the active group, creating a group
    /// first if the collection is empty.
    pub fn add_window(&mut self, window: WindowId) {
        if self.groups.is_empty() {
            self.groups.push(Group::new());
        }
        if let Some(active) = self.groups.at_mut(0) {
            active.push(window);
        }
        debug!("managing window {window}");
        self.draw_all();
    }

    /// Stop managing `window`, wherever it lives. Returns whether the
    /// model changed.
    pub fn remove_window(&mut self, window: WindowId) -> bool {
        let Some(loc) = self.find(window) else {
            return false;
        };
        if let Some(group) = self.groups.at_mut(loc.group) {
            if let Some(pos) = group.position(|&w| w == window) {
                group.remove(pos);
            }
        }
        debug!("dropped window {window} from group {}", loc.group);
        self.draw_all();
        true
    }

    /// Ask the active group's TOS window to close. The model is updated
    /// when the destroy notification comes back, not here.
    pub fn close_window(&self) {
        if let Some(&window) = self.groups.at(0).and_then(|g| g.at(0)) {
            self.display.close(window);
        }
    }

    /// Exchange the active group's TOS window with the one `n` below it.
    pub fn swap_window(&mut self, n: usize) {
        if let Some(active) = self.groups.at_mut(0) {
            active.swap(n);
        }
        self.draw_all();
    }

    /// Exchange the active group with the group `n` below it.
    pub fn swap_group(&mut self, n: usize) {
        self.groups.swap(n);
        self.draw_all();
    }

    /// Roll the active group's windows.
    pub fn roll_window(&mut self, dir: RollDirection) {
        if let Some(active) = self.groups.at_mut(0) {
            match dir {
                RollDirection::Top => active.roll_top(),
                RollDirection::Bottom => active.roll_bottom(),
            }
        }
        self.draw_all();
    }

    /// Roll the group collection.
    pub fn roll_group(&mut self, dir: RollDirection) {
        match dir {
            RollDirection::Top => self.groups.roll_top(),
            RollDirection::Bottom => self.groups.roll_bottom(),
        }
        self.draw_all();
    }

    /// Move the active group's TOS window onto the group `n` below it.
    /// A no-op when `n` is out of range or the active group is empty.
    pub fn move_window(&mut self, n: usize) {
        if n == 0 || n >= self.groups.len() {
            return;
        }
        let Some(window) = self.groups.at_mut(0).and_then(|g| g.pop()) else {
            return;
        };
        match self.groups.at_mut(n) {
            Some(dest) => dest.push(window),
            // n is bounds-checked above; put the window back rather
            // than lose it if that ever stops holding
            None => {
                if let Some(active) = self.groups.at_mut(0) {
                    active.push(window);
                }
            }
        }
        self.draw_all();
    }

    /// Replace the gap and reflow everything.
    pub fn set_gap(&mut self, gap: u32) {
        self.gap = gap;
        debug!("gap set to {gap}");
        self.draw_all();
    }

    /// Replace the region set and reflow everything.
    pub fn set_regions(&mut self, regions: Vec<Region>) {
        debug!("region set replaced ({} regions)", regions.len());
        self.regions = regions;
        self.draw_all();
    }

    /// Tile one visible group into its region: window `i` below TOS
    /// takes slot `i`.
    fn place_group(&self, n: usize) {
        let (Some(group), Some(&region)) = (self.groups.at(n), self.regions.get(n)) else {
            return;
        };
        let rects = tile(group.len(), region, self.gap);
        for (&window, &rect) in group.iter().zip(rects.iter()) {
            self.display.map(window);
            self.display.move_resize(window, rect);
        }
    }

    fn hide_group(&self, n: usize) {
        if let Some(group) = self.groups.at(n) {
            for &window in group.iter() {
                self.display.unmap(window);
            }
        }
    }

    /// Raise and focus the active group's TOS window, or fall back to
    /// the root surface when there is none.
    fn refocus(&self) {
        match self.groups.at(0).and_then(|g| g.at(0)) {
            Some(&window) => {
                self.display.raise(window);
                self.display.focus(window);
            }
            None => self.display.focus_root(),
        }
    }

    /// Recompute the whole screen: place every visible group, unmap
    /// every hidden one, then restore focus.
    pub fn draw_all(&self) {
        let visible = self.visible_count();
        for n in 0..self.groups.len() {
            if n < visible {
                self.place_group(n);
            } else {
                self.hide_group(n);
            }
        }
        self.refocus();
    }

    /// Apply one windowing-system event to the model.
    pub fn handle_event(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::MapRequest(window) => match self.find(window) {
                None => self.add_window(window),
                Some(loc) if loc.region.is_some() => {
                    self.display.map(window);
                    self.draw_all();
                }
                Some(_) => debug!("map request for hidden window {window} ignored"),
            },
            DisplayEvent::UnmapNotify(window) => {
                // only honour unmaps of windows that should be on
                // screen; hidden ones were unmapped by draw_all
                if self.find(window).is_some_and(|loc| loc.region.is_some()) {
                    self.remove_window(window);
                }
            }
            DisplayEvent::DestroyNotify(window) => {
                self.remove_window(window);
            }
            DisplayEvent::ConfigureRequest { window, region } => match self.find(window) {
                Some(loc) => {
                    // managed windows don't place themselves; reassert
                    // the computed layout if the group is on screen
                    if loc.region.is_some() {
                        self.draw_all();
                    }
                }
                None => self.display.configure(window, region),
            },
            // key presses and shutdown are resolved by the event loop
            DisplayEvent::KeyPress(_) | DisplayEvent::Shutdown => {}
        }
    }
}
