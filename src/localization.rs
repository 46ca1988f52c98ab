use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Languages shipped by the primary and global clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lang {
    Jp,
    Kr,
    En,
    Th,
    Tw,
}

impl Lang {
    pub const ALL: [Lang; 5] = [Lang::Jp, Lang::Kr, Lang::En, Lang::Th, Lang::Tw];

    /// Column suffix for this language
    pub fn tag(self) -> &'static str {
        match self {
            Lang::Jp => "Jp",
            Lang::Kr => "Kr",
            Lang::En => "En",
            Lang::Th => "Th",
            Lang::Tw => "Tw",
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jp" => Ok(Lang::Jp),
            "kr" => Ok(Lang::Kr),
            "en" => Ok(Lang::En),
            "th" => Ok(Lang::Th),
            "tw" => Ok(Lang::Tw),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// A non-empty set of requested languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    langs: BTreeSet<Lang>,
}

impl Localization {
    /// Resolve requested tokens, dropping unknown ones and falling back to English
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut langs: BTreeSet<Lang> = tokens
            .into_iter()
            .filter_map(|t| t.as_ref().trim().parse().ok())
            .collect();

        if langs.is_empty() {
            langs.insert(Lang::En);
        }

        Self { langs }
    }

    /// Every supported language
    pub fn all() -> Self {
        Self {
            langs: Lang::ALL.into_iter().collect(),
        }
    }

    pub fn langs(&self) -> impl Iterator<Item = Lang> + '_ {
        self.langs.iter().copied()
    }

    /// Append each language tag to each field name, tag-major
    pub fn localize(&self, fields: &[&str]) -> Vec<String> {
        self.langs
            .iter()
            .flat_map(|lang| fields.iter().map(move |f| format!("{}{}", f, lang.tag())))
            .collect()
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::from_tokens(["en"])
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tags: Vec<&str> = self.langs.iter().map(|l| l.tag()).collect();
        write!(f, "{}", tags.join(","))
    }
}
