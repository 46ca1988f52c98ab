//! Grammar for effect phrases embedded in skill descriptions.
//!
//! An effect phrase is
//!
//! ```text
//! effect  := STAT PARTICLE OPEN magnitude CLOSE <any text, shortest> ACTION
//! passive := STAT PARTICLE OPEN magnitude CLOSE
//! magnitude := [+-]? DIGITS ("." DIGITS*)? "%"?
//! ```
//!
//! where STAT and ACTION come from closed vocabularies and OPEN/CLOSE are the
//! client's colour markup. In the JP client this reads
//! `攻撃力を[c][007eff]20%[-][/c]増加`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::lookups::{lookup, Lookup, JP_ACTIONS, JP_STAT_NAMES};

/// One effect phrase as written, before vocabulary mapping
#[derive(Debug, Clone, PartialEq)]
pub struct EffectMatch {
    pub stat: String,
    pub value: String,
    pub action: Option<String>,
}

/// Parses effect phrases out of description text
pub trait DescriptionParser: Send + Sync {
    /// Every stat/magnitude/action phrase, in text order
    fn effects(&self, text: &str) -> Vec<EffectMatch>;

    /// The first stat/magnitude phrase, ignoring what follows
    fn passive(&self, text: &str) -> Option<EffectMatch>;

    /// Canonical stat name for a token as written
    fn stat_name(&self, token: &str) -> Option<&'static str>;

    /// Canonical action name for a token as written
    fn action_name(&self, token: &str) -> Option<&'static str>;
}

impl<T: DescriptionParser + ?Sized> DescriptionParser for &T {
    fn effects(&self, text: &str) -> Vec<EffectMatch> {
        (**self).effects(text)
    }

    fn passive(&self, text: &str) -> Option<EffectMatch> {
        (**self).passive(text)
    }

    fn stat_name(&self, token: &str) -> Option<&'static str> {
        (**self).stat_name(token)
    }

    fn action_name(&self, token: &str) -> Option<&'static str> {
        (**self).action_name(token)
    }
}

/// Regex-backed grammar over fixed vocabularies and markup
pub struct DescriptionGrammar {
    stats: Lookup,
    actions: Lookup,
    effect: Regex,
    passive: Regex,
}

const MAGNITUDE: &str = r"[+-]?(\d+\.?\d*%?)";

impl DescriptionGrammar {
    pub fn new(
        stats: Lookup,
        actions: Lookup,
        particles: &[&str],
        open: &str,
        close: &str,
    ) -> Result<Self, regex::Error> {
        let stat_alt = alternation(stats.iter().map(|(k, _)| *k));
        let action_alt = alternation(actions.iter().map(|(k, _)| *k));
        let particle_alt = alternation(particles.iter().copied());
        let open = regex::escape(open);
        let close = regex::escape(close);

        let phrase = format!(
            "({})(?:{}){}{}{}",
            stat_alt, particle_alt, open, MAGNITUDE, close
        );
        let effect = Regex::new(&format!("(?s){}.*?({})", phrase, action_alt))?;
        let passive = Regex::new(&format!("(?s){}", phrase))?;

        Ok(Self {
            stats,
            actions,
            effect,
            passive,
        })
    }

    /// Grammar of the JP game client's descriptions
    pub fn client() -> &'static DescriptionGrammar {
        static CLIENT: Lazy<DescriptionGrammar> = Lazy::new(|| {
            DescriptionGrammar::new(
                JP_STAT_NAMES,
                JP_ACTIONS,
                &["の", "を", "が"],
                "[c][007eff]",
                "[-][/c]",
            )
            .expect("client description grammar must compile")
        });
        &CLIENT
    }
}

impl DescriptionParser for DescriptionGrammar {
    fn effects(&self, text: &str) -> Vec<EffectMatch> {
        self.effect
            .captures_iter(text)
            .map(|caps| EffectMatch {
                stat: caps[1].to_string(),
                value: caps[2].to_string(),
                action: Some(caps[3].to_string()),
            })
            .collect()
    }

    fn passive(&self, text: &str) -> Option<EffectMatch> {
        self.passive.captures(text).map(|caps| EffectMatch {
            stat: caps[1].to_string(),
            value: caps[2].to_string(),
            action: None,
        })
    }

    fn stat_name(&self, token: &str) -> Option<&'static str> {
        lookup(self.stats, token)
    }

    fn action_name(&self, token: &str) -> Option<&'static str> {
        lookup(self.actions, token)
    }
}

/// Escaped alternation, longest token first so prefixes never shadow longer names
fn alternation<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    let mut tokens: Vec<&str> = tokens.collect();
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    tokens.dedup();
    tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}
