#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Shown,
}

/// Menu visibility plus what it was opened with.
///
/// `x`/`y` are the raw event coordinates; clamping happens at render time.
/// `text` is non-empty while visible and left stale once hidden.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl MenuState {
    pub fn visibility(&self) -> Visibility {
        if self.visible {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }

    /// Shows the menu at `(x, y)`. Empty text never opens it.
    pub fn open(&mut self, x: f64, y: f64, text: String) -> bool {
        if text.is_empty() {
            return false;
        }
        self.visible = true;
        self.x = x;
        self.y = y;
        self.text = text;
        true
    }

    /// Hides the menu, leaving the other fields untouched. Returns whether
    /// anything changed.
    pub fn close(&mut self) -> bool {
        let was_visible = self.visible;
        self.visible = false;
        was_visible
    }
}
