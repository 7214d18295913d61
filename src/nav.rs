use crate::content::{Category, GalleryImage, ProjectRecord};

pub const FRAGMENT_PREFIX: &str = "#project/";
pub const DEFAULT_GALLERY_INTERVAL_MS: u32 = 5000;
pub const MIN_GALLERY_INTERVAL_MS: u32 = 500;

pub fn fragment_for(id: &str) -> String {
    format!("{FRAGMENT_PREFIX}{id}")
}

pub fn parse_fragment(hash: &str) -> Option<&str> {
    hash.strip_prefix(FRAGMENT_PREFIX).filter(|id| !id.is_empty())
}

// Modular step used by the gallery, the lightbox, and tab cycling.
pub fn wrap_step(index: usize, len: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let next = (index as isize + delta).rem_euclid(len);
    next as usize
}

pub fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}

// Prev/next across the whole project list clamps at the ends instead of
// wrapping; past either end there is no move.
pub fn step_clamped<'a>(ids: &'a [String], current: &str, delta: isize) -> Option<&'a str> {
    let position = ids.iter().position(|id| id == current)?;
    let next = position as isize + delta;
    if next < 0 || next >= ids.len() as isize {
        return None;
    }
    ids.get(next as usize).map(String::as_str)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tab {
    All,
    Category(Category),
}

impl Tab {
    pub const ORDER: [Self; 4] = [
        Self::All,
        Self::Category(Category::Academic),
        Self::Category(Category::Professional),
        Self::Category(Category::Personal),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(category) => category.as_str(),
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Self::All => "cat_all",
            Self::Category(category) => category.label_key(),
        }
    }

    pub fn dom_id(self) -> String {
        format!("projects-tab-{}", self.as_str())
    }

    pub fn panel_dom_id(self) -> String {
        format!("projects-panel-{}", self.as_str())
    }

    pub fn contains(self, record: &ProjectRecord) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => record.category == category,
        }
    }

    pub fn neighbor(self, delta: isize) -> Self {
        let position = Self::ORDER
            .iter()
            .position(|tab| *tab == self)
            .unwrap_or(0);
        Self::ORDER[wrap_step(position, Self::ORDER.len(), delta)]
    }
}

// Fetched order is preserved within each tab.
pub fn projects_for(tab: Tab, records: &[ProjectRecord]) -> Vec<&ProjectRecord> {
    records.iter().filter(|record| tab.contains(record)).collect()
}

/// Tab selection plus the single open accordion entry. `open_id` is the one
/// writer behind the `#project/<id>` fragment; keeping it a scalar is what
/// enforces the single-open invariant.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowseState {
    pub tab: Tab,
    pub open_id: Option<String>,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            tab: Tab::All,
            open_id: None,
        }
    }
}

impl BrowseState {
    pub fn with_tab(&self, tab: Tab) -> Self {
        Self {
            tab,
            open_id: self.open_id.clone(),
        }
    }

    pub fn toggled(&self, id: &str) -> Self {
        let open_id = if self.open_id.as_deref() == Some(id) {
            None
        } else {
            Some(id.to_string())
        };
        Self {
            tab: self.tab,
            open_id,
        }
    }

    pub fn opened(&self, id: &str) -> Self {
        Self {
            tab: self.tab,
            open_id: Some(id.to_string()),
        }
    }

    pub fn closed(&self) -> Self {
        Self {
            tab: self.tab,
            open_id: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GalleryPosition {
    pub index: usize,
    pub len: usize,
}

impl GalleryPosition {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn stepped(&self, delta: isize) -> Self {
        Self {
            index: wrap_step(self.index, self.len, delta),
            len: self.len,
        }
    }

    pub fn jumped(&self, index: usize) -> Self {
        Self {
            index: clamp_index(index, self.len),
            len: self.len,
        }
    }
}

pub fn gallery_interval(requested: Option<u32>) -> u32 {
    match requested {
        Some(ms) if ms >= MIN_GALLERY_INTERVAL_MS => ms,
        _ => DEFAULT_GALLERY_INTERVAL_MS,
    }
}

/// Process-wide overlay state. Closing hides the overlay but keeps the last
/// image list around; the next `open` overwrites it.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct LightboxState {
    pub images: Vec<GalleryImage>,
    pub index: usize,
    pub visible: bool,
}

impl LightboxState {
    pub fn opened(images: Vec<GalleryImage>, index: usize) -> Self {
        let index = clamp_index(index, images.len());
        Self {
            images,
            index,
            visible: true,
        }
    }

    pub fn stepped(&self, delta: isize) -> Self {
        if self.images.len() <= 1 {
            return self.clone();
        }
        Self {
            images: self.images.clone(),
            index: wrap_step(self.index, self.images.len(), delta),
            visible: self.visible,
        }
    }

    pub fn closed(&self) -> Self {
        Self {
            images: self.images.clone(),
            index: self.index,
            visible: false,
        }
    }

    pub fn current(&self) -> Option<&GalleryImage> {
        self.images.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, category: Category) -> ProjectRecord {
        serde_json::from_str(&format!(
            r#"{{"id":"{id}","category":"{}","title_key":"t","summary_key":"s"}}"#,
            category.as_str()
        ))
        .expect("record parses")
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn fragment_round_trips() {
        assert_eq!(fragment_for("p3"), "#project/p3");
        assert_eq!(parse_fragment("#project/p3"), Some("p3"));
        assert_eq!(parse_fragment("#project/"), None);
        assert_eq!(parse_fragment("#about"), None);
        assert_eq!(parse_fragment(""), None);
    }

    #[test]
    fn gallery_wraps_in_both_directions() {
        assert_eq!(wrap_step(0, 3, -1), 2);
        assert_eq!(wrap_step(2, 3, 1), 0);
        assert_eq!(wrap_step(1, 3, 1), 2);
        assert_eq!(wrap_step(0, 0, 1), 0);
    }

    #[test]
    fn project_stepping_clamps_at_the_ends() {
        let ids = ids(&["a", "b", "c"]);
        assert_eq!(step_clamped(&ids, "a", -1), None);
        assert_eq!(step_clamped(&ids, "a", 1), Some("b"));
        assert_eq!(step_clamped(&ids, "c", 1), None);
        assert_eq!(step_clamped(&ids, "ghost", 1), None);
    }

    #[test]
    fn tabs_cycle_circularly() {
        assert_eq!(Tab::All.neighbor(-1), Tab::Category(Category::Personal));
        assert_eq!(
            Tab::Category(Category::Personal).neighbor(1),
            Tab::All
        );
        assert_eq!(Tab::All.neighbor(1), Tab::Category(Category::Academic));
    }

    #[test]
    fn all_tab_keeps_every_project_in_fetched_order() {
        let records = vec![
            record("a", Category::Personal),
            record("b", Category::Academic),
            record("c", Category::Personal),
        ];
        let all: Vec<&str> = projects_for(Tab::All, &records)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(all, ["a", "b", "c"]);
        let personal: Vec<&str> = projects_for(Tab::Category(Category::Personal), &records)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(personal, ["a", "c"]);
    }

    #[test]
    fn at_most_one_entry_open_after_any_toggle_sequence() {
        let mut state = BrowseState::default();
        for action in ["a", "b", "b", "a", "c"] {
            state = state.toggled(action);
            assert!(state.open_id.iter().count() <= 1);
        }
        assert_eq!(state.open_id.as_deref(), Some("c"));
    }

    #[test]
    fn toggling_the_open_entry_closes_it() {
        let state = BrowseState::default().toggled("x");
        assert_eq!(state.open_id.as_deref(), Some("x"));
        let state = state.toggled("x");
        assert_eq!(state.open_id, None);
    }

    #[test]
    fn opening_is_idempotent_and_switches_entries() {
        let state = BrowseState::default().opened("x").opened("x").opened("y");
        assert_eq!(state.open_id.as_deref(), Some("y"));
    }

    #[test]
    fn tab_switch_keeps_open_entry() {
        let state = BrowseState::default()
            .opened("x")
            .with_tab(Tab::Category(Category::Academic));
        assert_eq!(state.open_id.as_deref(), Some("x"));
        assert_eq!(state.tab, Tab::Category(Category::Academic));
    }

    #[test]
    fn gallery_interval_enforces_floor_and_default() {
        assert_eq!(gallery_interval(None), 5000);
        assert_eq!(gallery_interval(Some(200)), 5000);
        assert_eq!(gallery_interval(Some(500)), 500);
        assert_eq!(gallery_interval(Some(8000)), 8000);
    }

    fn image(src: &str) -> GalleryImage {
        GalleryImage {
            src: src.to_string(),
            alt: String::new(),
            caption: String::new(),
        }
    }

    #[test]
    fn lightbox_open_clamps_start_index() {
        let state = LightboxState::opened(vec![image("a"), image("b")], 9);
        assert_eq!(state.index, 1);
        assert!(state.visible);
        let empty = LightboxState::opened(Vec::new(), 3);
        assert_eq!(empty.index, 0);
        assert_eq!(empty.current(), None);
    }

    #[test]
    fn lightbox_navigation_wraps_and_noops_on_short_lists() {
        let state = LightboxState::opened(vec![image("a"), image("b"), image("c")], 0);
        assert_eq!(state.stepped(-1).index, 2);
        assert_eq!(state.stepped(1).index, 1);

        let single = LightboxState::opened(vec![image("a")], 0);
        assert_eq!(single.stepped(1).index, 0);
        let empty = LightboxState::default();
        assert_eq!(empty.stepped(1), empty);
    }

    #[test]
    fn lightbox_close_keeps_state_for_next_open() {
        let state = LightboxState::opened(vec![image("a")], 0).closed();
        assert!(!state.visible);
        assert_eq!(state.images.len(), 1);
    }

    #[test]
    fn gallery_position_steps_and_jumps() {
        let position = GalleryPosition::new(3);
        assert_eq!(position.stepped(-1).index, 2);
        assert_eq!(position.stepped(1).index, 1);
        assert_eq!(position.jumped(2).index, 2);
        assert_eq!(position.jumped(9).index, 2);
    }
}
