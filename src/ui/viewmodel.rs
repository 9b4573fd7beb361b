//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They hold display-ready strings and flags only; every decision
//! about what to show has already been made.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Single-line input bar (search, year prompt), shown under the header.
    pub prompt: Option<PromptInfo>,

    pub body: Body,

    /// Page bar under the table, only for paged catalog results.
    pub page_bar: Option<PageBarInfo>,

    pub status: StatusInfo,

    pub footer: FooterInfo,
}

/// The main area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Table(TableInfo),
    Empty(EmptyState),
    Detail(DetailInfo),
    Picker(PickerInfo),
    Login(LoginInfo),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Active source and filters, e.g. `Genre: Comedy · year 1999`.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInfo {
    pub label: String,
    pub text: String,
    /// Right-aligned hint, e.g. the search kind.
    pub hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub items: Vec<DisplayItem>,
    /// Index of the selected row within `items`.
    pub selected_index: usize,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    /// `movie`, `person` or `studio`.
    pub kind: String,
    pub year: String,
    pub rating: String,
    pub is_favorite: bool,
    pub is_selected: bool,

    /// Character ranges of `title` to highlight for the search query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    pub tagline: Option<String>,
    /// Year, runtime and rating joined for one line.
    pub facts: String,
    pub genres: String,
    pub overview: String,
    pub cast: Vec<String>,
    pub imdb_url: Option<String>,
    pub poster_url: Option<String>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerInfo {
    pub title: String,
    pub query: String,
    pub entries: Vec<PickerEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub label: String,
    pub is_selected: bool,
    /// The entry matches the filter currently in effect.
    pub is_active: bool,
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInfo {
    pub title: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    /// Display value, masked for passwords.
    pub value: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBarInfo {
    pub pages: Vec<u32>,
    pub current: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub user: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
