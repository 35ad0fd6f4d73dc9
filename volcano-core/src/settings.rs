//! Settings snapshot extraction.
//!
//! Every tracked control is read at call time and folded into an immutable
//! [`GameSettings`]. Numeric text follows the browser's unary-plus coercion so
//! the snapshot matches what the engine saw before the glue moved to Rust,
//! with the one difference that anything unparseable becomes `0` instead of
//! `NaN`.

use serde::Serialize;

use crate::constants::{MIN_DAYS_PLAYED, MIN_MAX_LUCK_LEVEL};

/// Numeric inputs on the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Seed,
    MaxLuckLevel,
    DaysPlayed,
}

impl NumericField {
    pub const ALL: [Self; 3] = [Self::Seed, Self::MaxLuckLevel, Self::DaysPlayed];

    /// Stable logical name, shared with the control's element id.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::MaxLuckLevel => "max_luck_lvl",
            Self::DaysPlayed => "days_played",
        }
    }
}

/// Checkbox inputs on the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleField {
    LegacyRng,
    PostUpdate,
    HasCaldera,
    CrackedCoconut,
    SpecialCharm,
}

impl ToggleField {
    pub const ALL: [Self; 5] = [
        Self::LegacyRng,
        Self::PostUpdate,
        Self::HasCaldera,
        Self::CrackedCoconut,
        Self::SpecialCharm,
    ];

    /// Stable logical name, shared with the control's element id.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::LegacyRng => "legacy_rng",
            Self::PostUpdate => "post_1_6_4",
            Self::HasCaldera => "has_caldera",
            Self::CrackedCoconut => "cracked_coconut",
            Self::SpecialCharm => "special_charm",
        }
    }
}

/// Read access to the user-editable settings controls.
///
/// Implementations must not fail: a missing control reads as empty text or
/// an unchecked box.
pub trait SettingsForm {
    /// Raw text currently held by a numeric control.
    fn text(&self, field: NumericField) -> String;

    /// Whether a checkbox control is currently ticked.
    fn checked(&self, field: ToggleField) -> bool;
}

impl<F: SettingsForm + ?Sized> SettingsForm for &F {
    fn text(&self, field: NumericField) -> String {
        (**self).text(field)
    }

    fn checked(&self, field: ToggleField) -> bool {
        (**self).checked(field)
    }
}

/// Immutable snapshot of every simulation input.
///
/// Serialized with the field names the engine's settings object expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSettings {
    pub seed: i32,
    pub legacy_rng: bool,
    #[serde(rename = "post_1_6_4")]
    pub post_update: bool,
    pub has_caldera: bool,
    pub cracked_golden_coconut: bool,
    #[serde(rename = "max_luck_lvl")]
    pub max_luck_level: u32,
    pub days_played: u32,
    pub special_charm: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            legacy_rng: false,
            post_update: false,
            has_caldera: false,
            cracked_golden_coconut: false,
            max_luck_level: MIN_MAX_LUCK_LEVEL,
            days_played: MIN_DAYS_PLAYED,
            special_charm: false,
        }
    }
}

impl GameSettings {
    /// Build a snapshot from the form's current state.
    #[must_use]
    pub fn extract<F: SettingsForm + ?Sized>(form: &F) -> Self {
        let seed = coerce_number(&form.text(NumericField::Seed));
        let luck = coerce_number(&form.text(NumericField::MaxLuckLevel));
        let days = coerce_number(&form.text(NumericField::DaysPlayed));
        Self {
            seed: saturate_i32(seed),
            legacy_rng: form.checked(ToggleField::LegacyRng),
            post_update: form.checked(ToggleField::PostUpdate),
            has_caldera: form.checked(ToggleField::HasCaldera),
            cracked_golden_coconut: form.checked(ToggleField::CrackedCoconut),
            max_luck_level: clamp_floor(luck, MIN_MAX_LUCK_LEVEL),
            days_played: clamp_floor(days, MIN_DAYS_PLAYED),
            special_charm: form.checked(ToggleField::SpecialCharm),
        }
    }
}

/// Coerce control text to an integer the way the browser's unary plus would,
/// truncating toward zero. Failures and non-finite values become `0`.
#[must_use]
pub fn coerce_number(text: &str) -> i64 {
    match parse_js_number(text) {
        // `as` saturates for out-of-range floats
        Some(value) if value.is_finite() => value.trunc() as i64,
        _ => 0,
    }
}

fn parse_js_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    let radix = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| trimmed.strip_prefix(prefix).map(|digits| (digits, radix)));
    if let Some((digits, radix)) = radix {
        return parse_radix_digits(digits, radix);
    }
    // Rust accepts spellings like "inf" and "nan" that the browser rejects
    if trimmed
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Digits after a `0x`/`0o`/`0b` prefix. Signs and separators are rejected;
/// literals too wide for an integer keep growing as a float and saturate later.
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

fn saturate_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn clamp_floor(value: i64, floor: u32) -> u32 {
    u32::try_from(value.max(i64::from(floor))).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MapForm {
        text: HashMap<NumericField, String>,
        checked: HashMap<ToggleField, bool>,
    }

    impl MapForm {
        fn with(mut self, field: NumericField, value: &str) -> Self {
            self.text.insert(field, value.to_string());
            self
        }
    }

    impl SettingsForm for MapForm {
        fn text(&self, field: NumericField) -> String {
            self.text.get(&field).cloned().unwrap_or_default()
        }

        fn checked(&self, field: ToggleField) -> bool {
            self.checked.get(&field).copied().unwrap_or(false)
        }
    }

    fn luck_for(text: &str) -> u32 {
        GameSettings::extract(&MapForm::default().with(NumericField::MaxLuckLevel, text))
            .max_luck_level
    }

    fn days_for(text: &str) -> u32 {
        GameSettings::extract(&MapForm::default().with(NumericField::DaysPlayed, text)).days_played
    }

    fn seed_for(text: &str) -> i32 {
        GameSettings::extract(&MapForm::default().with(NumericField::Seed, text)).seed
    }

    #[test]
    fn luck_level_clamps_at_zero() {
        let got: Vec<u32> = ["-5", "0", "7"].into_iter().map(luck_for).collect();
        assert_eq!(got, vec![0, 0, 7]);
    }

    #[test]
    fn days_played_clamps_at_one() {
        let got: Vec<u32> = ["-1", "0", "3"].into_iter().map(days_for).collect();
        assert_eq!(got, vec![1, 1, 3]);
    }

    #[test]
    fn malformed_text_degrades_to_defaults() {
        for junk in ["", "abc", "12abc", "NaN", "inf", "Infinity", "--3", "1,000"] {
            assert_eq!(seed_for(junk), 0, "seed from {junk:?}");
            assert_eq!(luck_for(junk), 0, "luck from {junk:?}");
            assert_eq!(days_for(junk), 1, "days from {junk:?}");
        }
    }

    #[test]
    fn numeric_text_follows_unary_plus_coercion() {
        assert_eq!(seed_for(" 42 "), 42);
        assert_eq!(seed_for("3.9"), 3);
        assert_eq!(seed_for("-3.9"), -3);
        assert_eq!(seed_for("1e3"), 1000);
        assert_eq!(seed_for("0x10"), 16);
        assert_eq!(seed_for("0b101"), 5);
        assert_eq!(seed_for("0o17"), 15);
        assert_eq!(seed_for("0x+1f"), 0);
        assert_eq!(seed_for("0x-1f"), 0);
        assert_eq!(seed_for("0x"), 0);
        assert_eq!(seed_for("0b102"), 0);
        assert_eq!(seed_for("+17"), 17);
        assert_eq!(seed_for(".5"), 0);
    }

    #[test]
    fn out_of_range_values_saturate() {
        assert_eq!(seed_for("99999999999"), i32::MAX);
        assert_eq!(seed_for("-99999999999"), i32::MIN);
        assert_eq!(days_for("1e20"), u32::MAX);
        assert_eq!(seed_for("0x10000000000000000"), i32::MAX);
        assert_eq!(days_for("0xFFFFFFFFFFFFFFFFFFFF"), u32::MAX);
    }

    #[test]
    fn toggles_come_straight_from_the_form() {
        let mut form = MapForm::default();
        form.checked.insert(ToggleField::PostUpdate, true);
        form.checked.insert(ToggleField::SpecialCharm, true);
        let settings = GameSettings::extract(&form);
        assert!(settings.post_update);
        assert!(settings.special_charm);
        assert!(!settings.legacy_rng);
        assert!(!settings.has_caldera);
        assert!(!settings.cracked_golden_coconut);
    }

    #[test]
    fn serializes_with_engine_field_names() {
        let settings = GameSettings {
            seed: 7,
            post_update: true,
            max_luck_level: 3,
            ..GameSettings::default()
        };
        let value = serde_json::to_value(settings).unwrap();
        assert_eq!(value["post_1_6_4"], true);
        assert_eq!(value["max_luck_lvl"], 3);
        assert_eq!(value["days_played"], 1);
        assert!(value.get("post_update").is_none());
    }
}
