//! Create-time checks for submitted animal fields.
//!
//! Every check runs; the result lists all violations in check order
//! (name, age, breed, type). The only dependency between checks is that
//! `age_is_not_positive` is evaluated only when the age is a number.
//! Updates are not validated.

use crate::animal::AnimalFields;

pub const MIN_NAME_LEN: usize = 4;
pub const MIN_BREED_LEN: usize = 4;
pub const MIN_TYPE_LEN: usize = 3;
pub const MIN_AGE: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    NameTooShort,
    AgeIsNotANumber,
    AgeIsNotPositive,
    BreedTooShort,
    TypeTooShort,
}

impl ViolationCode {
    /// Stable key used by the create form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCode::NameTooShort => "name_too_short",
            ViolationCode::AgeIsNotANumber => "age_is_not_a_number",
            ViolationCode::AgeIsNotPositive => "age_is_not_positive",
            ViolationCode::BreedTooShort => "breed_too_short",
            ViolationCode::TypeTooShort => "type_too_short",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ViolationCode::NameTooShort => "Please ensure that name has more than 3 characters",
            ViolationCode::AgeIsNotANumber => "Please ensure that age is a number",
            ViolationCode::AgeIsNotPositive => "Please ensure that age is positive",
            ViolationCode::BreedTooShort => "Please ensure breed is more than 3 characters",
            ViolationCode::TypeTooShort => "Please ensure that type is more than 3 characters",
        }
    }

    /// Form field the violation belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ViolationCode::NameTooShort => "name",
            ViolationCode::AgeIsNotANumber | ViolationCode::AgeIsNotPositive => "age",
            ViolationCode::BreedTooShort => "breed",
            ViolationCode::TypeTooShort => "type",
        }
    }
}

/// Ordered mapping of violation code to human-readable message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(ViolationCode, &'static str)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation; a code already present is ignored.
    pub fn add(&mut self, code: ViolationCode) {
        if !self.contains(code) {
            self.entries.push((code, code.message()));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, code: ViolationCode) -> bool {
        self.entries.iter().any(|(c, _)| *c == code)
    }

    pub fn message(&self, code: ViolationCode) -> Option<&'static str> {
        self.entries.iter().find(|(c, _)| *c == code).map(|(_, m)| *m)
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    /// Violations attached to one form field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.entries.iter().filter(move |(c, _)| c.field() == field).map(|(_, m)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ViolationCode, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// Validate a create submission, collecting every violation.
pub fn validate_new_animal(fields: &AnimalFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if char_len(&fields.name) < MIN_NAME_LEN {
        errors.add(ViolationCode::NameTooShort);
    }
    if let Some(code) = check_age(&fields.age) {
        errors.add(code);
    }
    if char_len(&fields.breed) < MIN_BREED_LEN {
        errors.add(ViolationCode::BreedTooShort);
    }
    if char_len(&fields.kind) < MIN_TYPE_LEN {
        errors.add(ViolationCode::TypeTooShort);
    }

    errors
}

/// One optional leading `-`, then at least one numeric character and nothing else.
///
/// Any character Unicode classes as numeric passes the shape check, but the
/// value is built from decimal digits only (`3`, `３`, `٣`, ...). Numeric
/// characters without a decimal value (`²`, `½`, `三`) make the age not a
/// number. Decimals such as `2.5` are not numbers here.
pub fn check_age(age: &str) -> Option<ViolationCode> {
    let (negative, digits) = match age.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, age),
    };
    if digits.is_empty() || !digits.chars().all(char::is_numeric) {
        return Some(ViolationCode::AgeIsNotANumber);
    }

    let mut value = 0f64;
    for c in digits.chars() {
        match decimal_value(c) {
            Some(d) => value = value * 10.0 + f64::from(d),
            None => return Some(ViolationCode::AgeIsNotANumber),
        }
    }
    if negative {
        value = -value;
    }
    if value >= MIN_AGE {
        None
    } else {
        Some(ViolationCode::AgeIsNotPositive)
    }
}

// First code point ("zero") of every Unicode decimal-digit run (category Nd).
// Nd digits are always encoded as contiguous 0..=9 runs.
const DECIMAL_ZEROS: &[u32] = &[
    0x0030, 0x0660, 0x06F0, 0x07C0, 0x0966, 0x09E6, 0x0A66, 0x0AE6, 0x0B66, 0x0BE6,
    0x0C66, 0x0CE6, 0x0D66, 0x0DE6, 0x0E50, 0x0ED0, 0x0F20, 0x1040, 0x1090, 0x17E0,
    0x1810, 0x1946, 0x19D0, 0x1A80, 0x1A90, 0x1B50, 0x1BB0, 0x1C40, 0x1C50, 0xA620,
    0xA8D0, 0xA900, 0xA9D0, 0xA9F0, 0xAA50, 0xABF0, 0xFF10, 0x104A0, 0x10D30, 0x11066,
    0x110F0, 0x11136, 0x111D0, 0x112F0, 0x11450, 0x114D0, 0x11650, 0x116C0, 0x11730, 0x118E0,
    0x11950, 0x11C50, 0x11D50, 0x11DA0, 0x11F50, 0x16A60, 0x16AC0, 0x16B50, 0x1D7CE, 0x1D7D8,
    0x1D7E2, 0x1D7EC, 0x1D7F6, 0x1E140, 0x1E2F0, 0x1E4F0, 0x1E950, 0x1FBF0,
];

/// Decimal value of a Unicode decimal digit, `None` for anything else.
fn decimal_value(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let cp = u32::from(c);
    DECIMAL_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .map(|zero| cp - zero)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
