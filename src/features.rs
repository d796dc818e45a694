//! Feature bundles - agreement features carried by every referent
//!
//! Two bundles agree when person and number are equal and gender is either
//! equal or left unspecified on one side. Animacy is informational only.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Grammatical number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub fn as_str(&self) -> &'static str {
        match self {
            Number::Singular => "sg",
            Number::Plural => "pl",
        }
    }

    pub fn all() -> &'static [Number] {
        &[Number::Singular, Number::Plural]
    }
}

impl FromStr for Number {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sg" | "singular" | "s" => Ok(Number::Singular),
            "pl" | "plural" | "p" => Ok(Number::Plural),
            _ => Err(Error::InvalidFeature(format!("Unknown number: {}", s))),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grammatical gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculine => "masc",
            Gender::Feminine => "fem",
            Gender::Neuter => "neut",
        }
    }

    pub fn all() -> &'static [Gender] {
        &[Gender::Masculine, Gender::Feminine, Gender::Neuter]
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "masc" | "masculine" | "m" => Ok(Gender::Masculine),
            "fem" | "feminine" | "f" => Ok(Gender::Feminine),
            "neut" | "neuter" | "n" => Ok(Gender::Neuter),
            _ => Err(Error::InvalidFeature(format!("Unknown gender: {}", s))),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Animacy class (never compared by [`Features::matches`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animacy {
    Human,
    Animate,
    Inanimate,
}

impl Animacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animacy::Human => "human",
            Animacy::Animate => "animate",
            Animacy::Inanimate => "inanimate",
        }
    }

    pub fn all() -> &'static [Animacy] {
        &[Animacy::Human, Animacy::Animate, Animacy::Inanimate]
    }
}

impl FromStr for Animacy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" | "hum" => Ok(Animacy::Human),
            "animate" | "anim" => Ok(Animacy::Animate),
            "inanimate" | "inanim" => Ok(Animacy::Inanimate),
            _ => Err(Error::InvalidFeature(format!("Unknown animacy: {}", s))),
        }
    }
}

impl std::fmt::Display for Animacy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Agreement features of a referring expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// Grammatical person (1, 2 or 3)
    pub person: u8,
    pub number: Number,
    pub gender: Option<Gender>,
    pub animacy: Option<Animacy>,
}

impl Features {
    pub fn new(person: u8, number: Number) -> Self {
        Self {
            person,
            number,
            gender: None,
            animacy: None,
        }
    }

    /// Third person singular, the common case for nominals
    pub fn third_singular() -> Self {
        Self::new(3, Number::Singular)
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_animacy(mut self, animacy: Animacy) -> Self {
        self.animacy = Some(animacy);
        self
    }

    /// Check agreement with another bundle.
    pub fn matches(&self, other: &Features) -> bool {
        self.person == other.person
            && self.number == other.number
            && match (self.gender, other.gender) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

impl std::fmt::Display for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.person, self.number)?;
        if let Some(gender) = self.gender {
            write!(f, ".{}", gender)?;
        }
        if let Some(animacy) = self.animacy {
            write!(f, ".{}", animacy)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_roundtrip() {
        for number in Number::all() {
            let parsed: Number = number.as_str().parse().unwrap();
            assert_eq!(*number, parsed);
        }
        for gender in Gender::all() {
            let parsed: Gender = gender.as_str().parse().unwrap();
            assert_eq!(*gender, parsed);
        }
        for animacy in Animacy::all() {
            let parsed: Animacy = animacy.as_str().parse().unwrap();
            assert_eq!(*animacy, parsed);
        }
    }

    #[test]
    fn test_feature_aliases() {
        assert_eq!(Number::from_str("singular").unwrap(), Number::Singular);
        assert_eq!(Gender::from_str("M").unwrap(), Gender::Masculine);
        assert!(Gender::from_str("dual").is_err());
    }

    #[test]
    fn test_matching_ignores_unspecified_gender() {
        let he = Features::third_singular().with_gender(Gender::Masculine);
        let it = Features::third_singular();
        let she = Features::third_singular().with_gender(Gender::Feminine);

        assert!(he.matches(&it));
        assert!(it.matches(&he));
        assert!(!he.matches(&she));
    }

    #[test]
    fn test_matching_ignores_animacy() {
        let a = Features::third_singular().with_animacy(Animacy::Human);
        let b = Features::third_singular().with_animacy(Animacy::Inanimate);
        assert!(a.matches(&b));
    }

    #[test]
    fn test_person_and_number_must_agree() {
        let third = Features::third_singular();
        assert!(!third.matches(&Features::new(1, Number::Singular)));
        assert!(!third.matches(&Features::new(3, Number::Plural)));
    }
}
