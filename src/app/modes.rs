//! Input modes and panels.
//!
//! The input mode decides how key presses are interpreted: as commands in
//! [`InputMode::Normal`], or as text for one of the prompts. The panel decides
//! what occupies the main area.
//!
//! ```text
//! Normal ──/──▶ Search(Typing) ──Enter──▶ Search(Navigating) ──Esc──▶ Normal
//!   │ y ──▶ YearPrompt ──Enter/Esc──▶ Normal
//!   │ g ──▶ GenrePicker ──Enter/Esc──▶ Normal
//!   └ l ──▶ Login ──Enter/Esc──▶ Normal
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Keys edit the query; Enter submits it.
    Typing,

    /// The submitted query stays visible while j/k move through the results.
    Navigating,
}

/// Which field of the login form receives text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Email,
    Password,
}

/// State of the login / sign-up form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub sign_up: bool,
    pub field: LoginField,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            sign_up: false,
            field: LoginField::Email,
            name: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl LoginForm {
    /// Moves to the next field, skipping the name outside sign-up.
    pub fn next_field(&mut self) {
        self.field = match (self.field, self.sign_up) {
            (LoginField::Name, _) => LoginField::Email,
            (LoginField::Email, _) => LoginField::Password,
            (LoginField::Password, true) => LoginField::Name,
            (LoginField::Password, false) => LoginField::Email,
        };
    }

    /// Switches between login and sign-up, clearing what was typed.
    pub fn toggle_sign_up(&mut self) {
        *self = Self {
            sign_up: !self.sign_up,
            field: if self.sign_up {
                LoginField::Email
            } else {
                LoginField::Name
            },
            ..Self::default()
        };
    }

    pub fn active_buffer(&mut self) -> &mut String {
        match self.field {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands.
    Normal,

    /// Editing or browsing a search.
    Search(SearchFocus),

    /// Typing a release year. An empty buffer clears the filter.
    YearPrompt(String),

    /// Choosing a genre. `query` fuzzy-filters the list, `index` is the
    /// highlighted entry where 0 means "all genres".
    GenrePicker { query: String, index: usize },

    /// Filling in the login / sign-up form.
    Login(LoginForm),
}

impl InputMode {
    /// `true` when printable keys are text rather than commands.
    #[must_use]
    pub const fn captures_text(&self) -> bool {
        matches!(
            self,
            Self::Search(SearchFocus::Typing)
                | Self::YearPrompt(_)
                | Self::GenrePicker { .. }
                | Self::Login(_)
        )
    }
}

/// What occupies the main area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// The catalog results table.
    #[default]
    Catalog,
    /// The current identity's favorites.
    Favorites,
    /// Details of one movie.
    Detail,
}
