//! Zodiac signs and sign placements.
//!
//! The tropical zodiac splits the ecliptic into twelve 30° signs starting
//! at 0° Aries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

/// Reduce any angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

// (name, russian name, symbol)
const SIGN_NAMES: [(&str, &str, &str); 12] = [
    ("Aries", "Овен", "\u{2648}"),
    ("Taurus", "Телец", "\u{2649}"),
    ("Gemini", "Близнецы", "\u{264a}"),
    ("Cancer", "Рак", "\u{264b}"),
    ("Leo", "Лев", "\u{264c}"),
    ("Virgo", "Дева", "\u{264d}"),
    ("Libra", "Весы", "\u{264e}"),
    ("Scorpio", "Скорпион", "\u{264f}"),
    ("Sagittarius", "Стрелец", "\u{2650}"),
    ("Capricorn", "Козерог", "\u{2651}"),
    ("Aquarius", "Водолей", "\u{2652}"),
    ("Pisces", "Рыбы", "\u{2653}"),
];

/// First day (month, day) of each sign in the conventional calendar table,
/// in calendar order starting from January.
const CALENDAR_BOUNDARIES: [((u32, u32), ZodiacSign); 12] = [
    ((1, 20), ZodiacSign::Aquarius),
    ((2, 19), ZodiacSign::Pisces),
    ((3, 21), ZodiacSign::Aries),
    ((4, 20), ZodiacSign::Taurus),
    ((5, 21), ZodiacSign::Gemini),
    ((6, 21), ZodiacSign::Cancer),
    ((7, 23), ZodiacSign::Leo),
    ((8, 23), ZodiacSign::Virgo),
    ((9, 23), ZodiacSign::Libra),
    ((10, 23), ZodiacSign::Scorpio),
    ((11, 22), ZodiacSign::Sagittarius),
    ((12, 22), ZodiacSign::Capricorn),
];

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn from_index(index: usize) -> ZodiacSign {
        Self::ALL[index % 12]
    }

    /// Sign containing an ecliptic longitude: floor(L / 30).
    pub fn from_longitude(longitude: f64) -> ZodiacSign {
        let idx = (normalize_degrees(longitude) / SIGN_SPAN).floor() as usize;
        Self::from_index(idx)
    }

    /// Sun sign by calendar date, ignoring the year.
    pub fn from_calendar_date(date: NaiveDate) -> ZodiacSign {
        let key = (date.month(), date.day());
        CALENDAR_BOUNDARIES
            .iter()
            .rev()
            .find(|(start, _)| key >= *start)
            .map(|(_, sign)| *sign)
            // Jan 1..19 belongs to the Capricorn that started in December
            .unwrap_or(ZodiacSign::Capricorn)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        SIGN_NAMES[self.index()].0
    }

    pub fn name_ru(self) -> &'static str {
        SIGN_NAMES[self.index()].1
    }

    pub fn symbol(self) -> &'static str {
        SIGN_NAMES[self.index()].2
    }

    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Longitude of 0° of this sign.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ecliptic longitude resolved into sign and degree within the sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// 0 <= x < 30
    pub degree_in_sign: f64,
}

impl Placement {
    pub fn from_longitude(longitude: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        let sign = ZodiacSign::from_longitude(longitude);
        let degree_in_sign = (longitude - sign.start_longitude()).clamp(0.0, SIGN_SPAN - f64::EPSILON * 64.0);
        Self {
            longitude,
            sign,
            degree_in_sign,
        }
    }

    pub fn sign_ru(&self) -> &'static str {
        self.sign.name_ru()
    }
}

/// `Taurus 15.0°`, or with `{:#}` the glyph form `♉ 15.0°`.
impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{} {:.1}°", self.sign.symbol(), self.degree_in_sign)
        } else {
            write!(f, "{} {:.1}°", self.sign, self.degree_in_sign)
        }
    }
}
