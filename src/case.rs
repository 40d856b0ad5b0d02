//! Case transforms applied to matched text by the `u`, `l`, `t` and `c`
//! opcode families.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseTransform {
    Upper,
    Lower,
    Title,
    Capitalize,
}

impl CaseTransform {
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseTransform::Upper => text.to_uppercase(),
            CaseTransform::Lower => text.to_lowercase(),
            CaseTransform::Title => to_title_case(text.chars()),
            CaseTransform::Capitalize => to_capitalized(text.chars()),
        }
    }
}

/// Upper-case the first letter of every word and lower-case the rest. A word
/// starts at any letter that does not directly follow another letter.
pub fn to_title_case(text: impl Iterator<Item = char>) -> String {
    let mut res = String::new();
    text.fold(true, |word_start, c| {
        if !c.is_alphabetic() {
            res.push(c);
            return true;
        }
        if word_start {
            res.extend(c.to_uppercase());
        } else {
            res.extend(c.to_lowercase());
        }
        false
    });
    res
}

/// Upper-case the first character and lower-case everything after it.
pub fn to_capitalized(mut text: impl Iterator<Item = char>) -> String {
    let mut res = String::new();
    if let Some(first) = text.next() {
        res.extend(first.to_uppercase());
    }
    text.for_each(|c| res.extend(c.to_lowercase()));
    res
}
