use std::fmt;

pub const DEFAULT_PREMISE: &str =
    "I wake up in a dimly lit tavern with a pounding headache and a mysterious note in my pocket.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Genre {
    #[default]
    Fantasy,
    SciFi,
    Mystery,
    Cyberpunk,
    Horror,
}

impl Genre {
    /// Every selectable genre, in the order the setup form shows them.
    pub const ALL: [Genre; 5] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Cyberpunk,
        Genre::Horror,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Cyberpunk => "Cyberpunk",
            Genre::Horror => "Horror",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the player picked on the setup screen. Never changes after submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    pub genre: Genre,
    pub premise: String,
}

impl SetupConfig {
    /// Returns `None` for a blank premise.
    pub fn new(genre: Genre, premise: &str) -> Option<Self> {
        let premise = premise.trim();
        if premise.is_empty() {
            return None;
        }

        Some(Self {
            genre,
            premise: premise.to_string(),
        })
    }
}
