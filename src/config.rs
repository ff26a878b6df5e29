//! Named conversions and the stage lists that realize them.
//!
//! Every public conversion is a row in [`CATALOG`]: a config and its ordered
//! [`Stage`] list. The pipeline evaluates any row the same way, so adding a
//! conversion means adding a row (and, if needed, a [`DictionaryId`]).

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::dictionary_lib::DictionaryId::*;
use crate::dictionary_lib::DictionaryId;
use crate::pipeline::Stage;

/// Public conversion names.
///
/// ```
/// use opencc_wordseg::OpenccConfig;
///
/// let cfg: OpenccConfig = "S2TW".parse().unwrap();
/// assert_eq!(cfg, OpenccConfig::S2tw);
/// assert_eq!(cfg.as_str(), "s2tw");
/// assert_eq!(cfg.stages().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpenccConfig {
    /// Simplified → Traditional (OpenCC standard)
    S2t,
    /// Traditional → Simplified
    T2s,
    /// Simplified → Traditional (Taiwan)
    S2tw,
    /// Traditional (Taiwan) → Simplified
    Tw2s,
    /// Simplified → Traditional (Hong Kong)
    S2hk,
    /// Traditional (Hong Kong) → Simplified
    Hk2s,
    /// Traditional → Traditional (Taiwan)
    T2tw,
    /// Traditional (Taiwan) → Traditional
    Tw2t,
    /// Traditional → Traditional (Hong Kong)
    T2hk,
    /// Traditional (Hong Kong) → Traditional
    Hk2t,
    /// Traditional / Japanese old forms (Kyūjitai) → Japanese new forms (Shinjitai)
    T2jp,
    /// Japanese new forms (Shinjitai) → old forms (Kyūjitai)
    Jp2t,
}

const ST: Stage = Stage::pair(StPhrases, StCharacters);
const TS: Stage = Stage::pair(TsPhrases, TsCharacters);
const TW: Stage = Stage::pair(TwPhrases, TwVariants);
const TW_REV: Stage = Stage::pair(TwPhrasesRev, TwVariantsRev);
const HK: Stage = Stage::characters(HkVariants);
const HK_REV: Stage = Stage::characters(HkVariantsRev);

/// Config → ordered stage list.
pub static CATALOG: &[(OpenccConfig, &[Stage])] = &[
    (OpenccConfig::S2t, &[ST]),
    (OpenccConfig::T2s, &[TS]),
    (OpenccConfig::S2tw, &[ST, TW]),
    (OpenccConfig::Tw2s, &[TW_REV, TS]),
    (OpenccConfig::S2hk, &[ST, HK]),
    (OpenccConfig::Hk2s, &[HK_REV, TS]),
    (OpenccConfig::T2tw, &[TW]),
    (OpenccConfig::Tw2t, &[Stage::pair(TwVariantsRevPhrases, TwVariantsRev)]),
    (OpenccConfig::T2hk, &[HK]),
    (OpenccConfig::Hk2t, &[Stage::pair(HkVariantsRevPhrases, HkVariantsRev)]),
    (OpenccConfig::T2jp, &[Stage::characters(JpVariants)]),
    (OpenccConfig::Jp2t, &[Stage::pair(JpShinjitaiPhrases, JpKyujitaiCharacters)]),
];

impl OpenccConfig {
    pub const ALL: [OpenccConfig; 12] = [
        OpenccConfig::S2t,
        OpenccConfig::T2s,
        OpenccConfig::S2tw,
        OpenccConfig::Tw2s,
        OpenccConfig::S2hk,
        OpenccConfig::Hk2s,
        OpenccConfig::T2tw,
        OpenccConfig::Tw2t,
        OpenccConfig::T2hk,
        OpenccConfig::Hk2t,
        OpenccConfig::T2jp,
        OpenccConfig::Jp2t,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OpenccConfig::S2t => "s2t",
            OpenccConfig::T2s => "t2s",
            OpenccConfig::S2tw => "s2tw",
            OpenccConfig::Tw2s => "tw2s",
            OpenccConfig::S2hk => "s2hk",
            OpenccConfig::Hk2s => "hk2s",
            OpenccConfig::T2tw => "t2tw",
            OpenccConfig::Tw2t => "tw2t",
            OpenccConfig::T2hk => "t2hk",
            OpenccConfig::Hk2t => "hk2t",
            OpenccConfig::T2jp => "t2jp",
            OpenccConfig::Jp2t => "jp2t",
        }
    }

    /// The stage list for this config.
    pub fn stages(self) -> &'static [Stage] {
        CATALOG
            .iter()
            .find(|(config, _)| *config == self)
            .map(|(_, stages)| *stages)
            .unwrap_or(&[])
    }

    /// Distinct dictionaries the config needs, in first-use order.
    pub fn dictionaries(self) -> Vec<DictionaryId> {
        let mut ids = Vec::new();
        for id in self.stages().iter().flat_map(Stage::dictionaries) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

impl fmt::Display for OpenccConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfigError(pub String);

impl fmt::Display for ParseConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid config: {}", self.0)
    }
}

impl Error for ParseConfigError {}

impl FromStr for OpenccConfig {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        OpenccConfig::ALL
            .into_iter()
            .find(|config| config.as_str() == lower)
            .ok_or_else(|| ParseConfigError(s.to_string()))
    }
}

impl TryFrom<&str> for OpenccConfig {
    type Error = ParseConfigError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_config_has_a_catalog_row() {
        for config in OpenccConfig::ALL {
            assert!(!config.stages().is_empty(), "{} has no stages", config);
        }
        assert_eq!(CATALOG.len(), OpenccConfig::ALL.len());
    }

    #[test]
    fn compound_conversions_mirror_each_other() {
        assert_eq!(OpenccConfig::S2tw.stages(), &[ST, TW]);
        assert_eq!(OpenccConfig::Tw2s.stages(), &[TW_REV, TS]);
        assert_eq!(
            OpenccConfig::S2hk.stages()[1],
            Stage::new(None, Some(HkVariants))
        );
        assert_eq!(
            OpenccConfig::Hk2s.stages()[0],
            Stage::new(None, Some(HkVariantsRev))
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Hk2S".parse::<OpenccConfig>().unwrap(), OpenccConfig::Hk2s);
        assert_eq!(OpenccConfig::try_from(" jp2t ").unwrap(), OpenccConfig::Jp2t);
        assert_eq!(
            "s2twp".parse::<OpenccConfig>(),
            Err(ParseConfigError("s2twp".to_string()))
        );
    }

    #[test]
    fn dictionaries_are_distinct() {
        assert_eq!(
            OpenccConfig::S2tw.dictionaries(),
            vec![StPhrases, StCharacters, TwPhrases, TwVariants]
        );
        assert_eq!(OpenccConfig::T2jp.dictionaries(), vec![JpVariants]);
    }

    #[test]
    fn single_stage_conversions() {
        assert_eq!(
            OpenccConfig::Jp2t.stages(),
            &[Stage::pair(JpShinjitaiPhrases, JpKyujitaiCharacters)]
        );
        assert_eq!(
            OpenccConfig::Tw2t.stages(),
            &[Stage::pair(TwVariantsRevPhrases, TwVariantsRev)]
        );
        assert_eq!(
            OpenccConfig::Hk2t.stages(),
            &[Stage::pair(HkVariantsRevPhrases, HkVariantsRev)]
        );
    }

    #[test]
    fn every_dictionary_is_used_by_some_conversion() {
        for id in DictionaryId::ALL {
            assert!(
                OpenccConfig::ALL
                    .iter()
                    .any(|config| config.dictionaries().contains(&id)),
                "{} is never used",
                id
            );
        }
    }
}
