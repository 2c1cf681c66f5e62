//! Task metadata carried by meta blocks
//!
//!     A meta block starts with a bracketed directive list, `[x #1 @work due:2024-5-1]`, and the
//!     directives fill a [MetaConfig]. Every field is optional or empty by default: an absent
//!     field means "not set", there are no sentinel values.
//!
//!     [MetaConfig::to_markup] renders a config back to directive text. Directives come out in a
//!     fixed order (done, pin, hide, priority, track, created, due, admonition, image, tags) so
//!     that two equal configs always render the same way.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetaConfig {
    pub priority: Option<u32>,
    pub track: Option<u32>,
    pub created: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
    pub pin: bool,
    pub done: bool,
    pub hide: bool,
    pub tags: BTreeSet<String>,
    pub image: Option<MetaImage>,
    pub admonition: Option<Admonition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaImage {
    pub path: String,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Admonition {
    Tip,
    Note,
    Warning,
    Important,
}

impl Admonition {
    pub fn keyword(self) -> &'static str {
        match self {
            Admonition::Tip => "tip",
            Admonition::Note => "note",
            Admonition::Warning => "warning",
            Admonition::Important => "important",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "tip" => Some(Admonition::Tip),
            "note" => Some(Admonition::Note),
            "warning" => Some(Admonition::Warning),
            "important" => Some(Admonition::Important),
            _ => None,
        }
    }
}

impl MetaConfig {
    /// Directive words without the surrounding brackets.
    pub fn directives(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.done {
            out.push("x".to_string());
        }
        if self.pin {
            out.push("pin".to_string());
        }
        if self.hide {
            out.push("hide".to_string());
        }
        if let Some(priority) = self.priority {
            out.push(format!("#{priority}"));
        }
        if let Some(track) = self.track {
            out.push(format!("track:{track}"));
        }
        if let Some(created) = self.created {
            out.push(format!("created:{}", created.format("%Y-%m-%d")));
        }
        if let Some(due) = self.due {
            out.push(format!("due:{}", due.format("%Y-%m-%d")));
        }
        if let Some(admonition) = self.admonition {
            out.push(admonition.keyword().to_string());
        }
        if let Some(image) = &self.image {
            let path = escape_path(&image.path);
            match image.width {
                Some(width) => out.push(format!("image {width} {path}")),
                None => out.push(format!("image {path}")),
            }
        }
        out.extend(self.tags.iter().map(|tag| format!("@{tag}")));
        out
    }

    /// `[directive directive ...]`
    pub fn to_markup(&self) -> String {
        format!("[{}]", self.directives().join(" "))
    }

    pub fn is_empty(&self) -> bool {
        *self == MetaConfig::default()
    }
}

impl fmt::Display for MetaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_markup())
    }
}

fn escape_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for ch in path.chars() {
        if matches!(ch, ' ' | '\t' | ']' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
