//! Filename classifier
//!
//! Track filenames follow `<category>[_<subgenre>][_<artist words>...].mp3`.
//! The first token picks a category rule (several spellings map to the same
//! rule), the second token is a subgenre only when the rule lists it, and
//! whatever is left is the artist.
//!
//! The rule table and the title-synthesis quirks are part of the catalog
//! format consumed by the web client and must stay stable.

/// Category id used for filenames no rule recognizes
pub const OTHER_CATEGORY: &str = "other";

/// One entry of the prefix table
#[derive(Debug, Clone, Copy)]
struct Rule {
    /// Lowercased first tokens that select this rule
    prefixes: &'static [&'static str],
    category: &'static str,
    style: &'static str,
    /// Second tokens recognized as subgenre (case-sensitive)
    subgenres: &'static [&'static str],
    /// Whether an empty artist remainder is reported as `""` rather than absent
    empty_artist_is_some: bool,
}

const RULES: &[Rule] = &[
    Rule {
        prefixes: &["norteno", "norteño", "noteno"],
        category: "norteno",
        style: "Norteño",
        subgenres: &["belico", "clasico", "romantico"],
        empty_artist_is_some: true,
    },
    Rule {
        prefixes: &["banda"],
        category: "banda",
        style: "Banda",
        subgenres: &["sinaloense", "epico"],
        empty_artist_is_some: true,
    },
    Rule {
        prefixes: &["tumbado"],
        category: "tumbado",
        style: "Corrido Tumbado",
        subgenres: &["belico", "sentimental"],
        empty_artist_is_some: true,
    },
    Rule {
        prefixes: &["trap"],
        category: "trap",
        style: "Trap Corrido",
        subgenres: &[],
        empty_artist_is_some: true,
    },
    Rule {
        prefixes: &["estilo"],
        category: "norteno",
        style: "Norteño",
        subgenres: &[],
        empty_artist_is_some: true,
    },
    Rule {
        prefixes: &["rap"],
        category: "rap",
        style: "Rap Mexicano",
        subgenres: &["dark", "romantic", "hiph"],
        empty_artist_is_some: false,
    },
];

/// Metadata derived from a single filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub style: String,
    pub artist: Option<String>,
    pub subgenre: Option<String>,
    pub title: String,
}

/// Strip the `.mp3` marker the same way track ids are derived
///
/// Every occurrence is removed, not only a trailing extension.
pub fn track_id(filename: &str) -> String {
    filename.replace(".mp3", "")
}

/// Classify a bare filename (no directory component)
pub fn classify(filename: &str) -> Classification {
    let name = track_id(filename);
    let parts: Vec<&str> = name.split('_').collect();
    let first = parts[0].to_lowercase();

    let Some(rule) = RULES.iter().find(|r| r.prefixes.contains(&first.as_str())) else {
        return Classification {
            category: OTHER_CATEGORY.to_string(),
            style: name.clone(),
            artist: None,
            subgenre: None,
            title: title_case(&name.replace('_', " ")),
        };
    };

    let mut subgenre = None;
    let mut artist = None;

    if parts.len() > 1 {
        if rule.subgenres.contains(&parts[1]) {
            subgenre = Some(parts[1].to_string());
        }
        let artist_start = if subgenre.is_some() { 2 } else { 1 };
        let rest = &parts[artist_start..];
        if !rest.is_empty() || rule.empty_artist_is_some {
            artist = Some(title_case(&rest.join(" ")));
        }
    }

    let title = synthesize_title(&name, subgenre.as_deref(), artist.as_deref());

    Classification {
        category: rule.category.to_string(),
        style: rule.style.to_string(),
        artist,
        subgenre,
        title,
    }
}

/// Build a display title from the recognized pieces
///
/// An empty artist counts as no artist; the cleaned filename stands in for it.
fn synthesize_title(name: &str, subgenre: Option<&str>, artist: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(sub) = subgenre {
        parts.push(title_case(sub));
    }
    match artist.filter(|a| !a.is_empty()) {
        Some(artist) => parts.push(format!("- {}", artist)),
        None => parts.push(title_case(&name.replace('_', " "))),
    }
    parts.join(" ")
}

/// Word-initial capitalization
///
/// A cased character gets its titlecase form when the character before it is
/// not cased, and is lowercased otherwise. Digits and punctuation start a new
/// word, so `2pac` becomes `2Pac` and `o'neil` becomes `O'Neil`.
///
/// Titlecase differs from uppercase for digraphs and ligatures: `ǆ` becomes
/// `ǅ`, `ﬂores` becomes `Flores` and `ßa` becomes `Ssa`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        let cased = is_cased(c);
        if cased && !prev_cased {
            push_titlecase(&mut out, c);
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// Uppercase, lowercase or titlecase letter
fn is_cased(c: char) -> bool {
    c.is_lowercase() || c.is_uppercase() || is_titlecase_letter(c)
}

/// General category Lt
fn is_titlecase_letter(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Append the titlecase mapping of `c`
///
/// Only characters whose titlecase form differs from their uppercase form
/// are listed; everything else falls back to `to_uppercase`.
fn push_titlecase(out: &mut String, c: char) {
    let mapped: &str = match c {
        '\u{01C4}'..='\u{01C6}' => "\u{01C5}",
        '\u{01C7}'..='\u{01C9}' => "\u{01C8}",
        '\u{01CA}'..='\u{01CC}' => "\u{01CB}",
        '\u{01F1}'..='\u{01F3}' => "\u{01F2}",
        'ß' => "Ss",
        '\u{0587}' => "\u{0535}\u{0582}",
        // Mkhedruli letters are their own titlecase
        '\u{10D0}'..='\u{10FA}' | '\u{10FD}'..='\u{10FF}' => {
            out.push(c);
            return;
        }
        // Greek with ypogegrammeni keeps the iota subscript in titlecase
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            if let Some(t) = char::from_u32(c as u32 + 8) {
                out.push(t);
            }
            return;
        }
        '\u{1F88}'..='\u{1F8F}'
        | '\u{1F98}'..='\u{1F9F}'
        | '\u{1FA8}'..='\u{1FAF}'
        | '\u{1FBC}'
        | '\u{1FCC}'
        | '\u{1FFC}' => {
            out.push(c);
            return;
        }
        '\u{1FB3}' => "\u{1FBC}",
        '\u{1FC3}' => "\u{1FCC}",
        '\u{1FF3}' => "\u{1FFC}",
        '\u{1FB2}' => "\u{1FBA}\u{0345}",
        '\u{1FB4}' => "\u{0386}\u{0345}",
        '\u{1FC2}' => "\u{1FCA}\u{0345}",
        '\u{1FC4}' => "\u{0389}\u{0345}",
        '\u{1FF2}' => "\u{1FFA}\u{0345}",
        '\u{1FF4}' => "\u{038F}\u{0345}",
        '\u{1FB7}' => "\u{0391}\u{0342}\u{0345}",
        '\u{1FC7}' => "\u{0397}\u{0342}\u{0345}",
        '\u{1FF7}' => "\u{03A9}\u{0342}\u{0345}",
        '\u{FB00}' => "Ff",
        '\u{FB01}' => "Fi",
        '\u{FB02}' => "Fl",
        '\u{FB03}' => "Ffi",
        '\u{FB04}' => "Ffl",
        '\u{FB05}' | '\u{FB06}' => "St",
        '\u{FB13}' => "\u{0544}\u{0576}",
        '\u{FB14}' => "\u{0544}\u{0565}",
        '\u{FB15}' => "\u{0544}\u{056B}",
        '\u{FB16}' => "\u{054E}\u{0576}",
        '\u{FB17}' => "\u{0544}\u{056D}",
        _ => {
            out.extend(c.to_uppercase());
            return;
        }
    };
    out.push_str(mapped);
}
