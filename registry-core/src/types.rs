//! Domain types for the institution registry.
//!
//! One YAML file describes one [`InstitutionEntry`]. Optional fields are
//! `Option<String>` so that absence stays distinguishable from an empty
//! string; use [`present`] when only non-empty values matter.

use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Stable organisational identifier of an institution (a ROR URL in practice).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct InstitutionId(pub String);

impl InstitutionId {
    /// Filesystem-safe slug used to name the institution's page.
    pub fn slug(&self) -> String {
        slugify(&self.0)
    }
}

impl fmt::Display for InstitutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for InstitutionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstitutionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A source-code repository linked to a repository platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LinkedCode {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

/// One hosted repository system (e.g. a DSpace instance) of an institution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryPlatform {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_rest: Option<String>,
    #[serde(default)]
    pub oai_pmh: Option<String>,
    #[serde(default)]
    pub software: Option<String>,
    #[serde(default)]
    pub dspace_version: Option<String>,
    pub status: String,
    #[serde(default)]
    pub contact: Option<String>,
    /// Kept verbatim, e.g. `"2024-01-01"`; never parsed as a date.
    #[serde(default)]
    pub last_verified: Option<String>,
    /// `None` for both an absent key and an explicit `code: null`.
    #[serde(default)]
    pub code: Option<Vec<LinkedCode>>,
}

impl RepositoryPlatform {
    /// Linked code records, empty when absent or null.
    pub fn code(&self) -> &[LinkedCode] {
        self.code.as_deref().unwrap_or_default()
    }
}

/// One registry record: an institution and its repository platforms.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InstitutionEntry {
    pub id: InstitutionId,
    pub institution: String,
    #[serde(default)]
    pub repositories: Vec<RepositoryPlatform>,
}

impl InstitutionEntry {
    /// Linked code records of every platform, paired with the platform, in entry order.
    pub fn linked_code(&self) -> impl Iterator<Item = (&RepositoryPlatform, &LinkedCode)> {
        self.repositories
            .iter()
            .flat_map(|platform| platform.code().iter().map(move |code| (platform, code)))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `Some(value)` only for present, non-empty optional fields.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Lowercase ASCII slug: runs of anything other than letters and digits
/// collapse to one `-`, with no leading or trailing `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        let folded = fold_char(c);
        let mut push = |ch: char| {
            if ch.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(ch.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        };
        match folded {
            Some(s) => s.chars().for_each(&mut push),
            None => push(c),
        }
    }
    slug
}

/// ASCII transliteration for common Latin letters with diacritics.
fn fold_char(c: char) -> Option<&'static str> {
    let s = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' => "A",
        'æ' => "ae",
        'Æ' => "AE",
        'ç' | 'č' | 'ć' => "c",
        'Ç' | 'Č' | 'Ć' => "C",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ę' => "E",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'ñ' | 'ń' => "n",
        'Ñ' | 'Ń' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => "O",
        'œ' => "oe",
        'Œ' => "OE",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'š' | 'ś' => "s",
        'Š' | 'Ś' => "S",
        'ž' | 'ź' | 'ż' => "z",
        'Ž' | 'Ź' | 'Ż' => "Z",
        'ß' => "ss",
        'ł' => "l",
        'Ł' => "L",
        _ => return None,
    };
    Some(s)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
