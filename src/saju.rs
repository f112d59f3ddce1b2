//! The aggregate calculation: birth input in, complete chart out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chinese::{self, LunarDate, SolarTerm};
use crate::config::EngineConfig;
use crate::cycle::{Element, Polarity};
use crate::date::Date;
use crate::error::SajuError;
use crate::fortunes::{self, LifeStage};
use crate::pillars::{ByPosition, FourPillars, day, hour, month, year};
use crate::solar_time::{TrueSolarTime, WallClock};
use crate::spirits::{self, Spirit};
use crate::ten_gods::{TenGod, TenGods};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

/// A birth moment as recorded: civil date and clock time on the
/// configured reference meridian, and where it happened.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Carried through; no calculation depends on it.
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl BirthInput {
    /// Input with the date only; everything else takes its default.
    pub fn on(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: None,
            minute: None,
            longitude: None,
            latitude: None,
            gender: None,
        }
    }

    pub fn at(self, hour: u32, minute: u32) -> Self {
        Self {
            hour: Some(hour),
            minute: Some(minute),
            ..self
        }
    }

    pub fn located(self, longitude: f64, latitude: f64) -> Self {
        Self {
            longitude: Some(longitude),
            latitude: Some(latitude),
            ..self
        }
    }
}

/// Five-element and yin-yang summary of a chart.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementProfile {
    /// Element of the day master.
    pub main_element: Element,
    /// Element of the month stem.
    pub secondary_element: Element,
    /// Polarity of the day master.
    pub yin_yang: Polarity,
    /// How many of the eight stems and branches belong to each element.
    pub element_counts: ElementCounts,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize)]
pub struct ElementCounts {
    pub wood: u8,
    pub fire: u8,
    pub earth: u8,
    pub metal: u8,
    pub water: u8,
}

impl ElementCounts {
    fn add(&mut self, element: Element) {
        let slot = match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        };
        *slot += 1;
    }

    pub fn get(&self, element: Element) -> u8 {
        [self.wood, self.fire, self.earth, self.metal, self.water][element.index()]
    }
}

impl ElementProfile {
    pub fn of(pillars: &FourPillars) -> Self {
        let mut element_counts = ElementCounts::default();
        for (_, p) in pillars.iter() {
            element_counts.add(p.stem.element());
            element_counts.add(p.branch.element());
        }
        let day_master = pillars.day_master();
        Self {
            main_element: day_master.element(),
            secondary_element: pillars.month.stem.element(),
            yin_yang: day_master.polarity(),
            element_counts,
        }
    }
}

/// The complete chart of one birth moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SajuResult {
    pub four_pillars: FourPillars,
    /// `None` outside the years the lunar calendar is computed for.
    pub lunar_date: Option<LunarDate>,
    pub solar_term: SolarTerm,
    pub true_solar_time: TrueSolarTime,
    pub ten_gods: TenGods,
    pub element_profile: ElementProfile,
    pub twelve_fortunes: ByPosition<LifeStage>,
    pub twelve_spirits: ByPosition<Spirit>,
    pub gender: Option<Gender>,
}

/// Calculator bound to a configuration.
///
/// Holds no state besides the configuration and can be shared between
/// threads.
#[derive(Debug, Clone, Default)]
pub struct Saju {
    config: EngineConfig,
}

impl Saju {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Calculates the chart for `input`.
    ///
    /// Rejects dates not in the Gregorian calendar, hours and minutes out of
    /// range, and coordinates off the globe. Missing hour, minute and
    /// location take the configured defaults.
    ///
    /// ```
    /// use saju::{BirthInput, Saju};
    ///
    /// let saju = Saju::default();
    /// let result = saju.compute(&BirthInput::on(2023, 10, 15).at(12, 0)).unwrap();
    /// assert_eq!("癸卯", result.four_pillars.year.label());
    /// assert_eq!("丙午", result.four_pillars.day.label());
    ///
    /// assert!(saju.compute(&BirthInput::on(2023, 2, 29)).is_err());
    /// ```
    pub fn compute(&self, input: &BirthInput) -> Result<SajuResult, SajuError> {
        let config = &self.config;
        let invalid_date = SajuError::InvalidDate {
            year: input.year,
            month: input.month,
            day: input.day,
        };
        let (Ok(m), Ok(d)) = (i32::try_from(input.month), i32::try_from(input.day)) else {
            return Err(invalid_date);
        };
        let date = Date::from_gregorian(input.year, m, d).ok_or(invalid_date)?;
        let hour = input.hour.unwrap_or(config.default_hour);
        if hour > 23 {
            return Err(SajuError::InvalidHour(hour));
        }
        let minute = input.minute.unwrap_or(0);
        if minute > 59 {
            return Err(SajuError::InvalidMinute(minute));
        }
        let longitude = input
            .longitude
            .unwrap_or(config.default_location.longitude);
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(SajuError::InvalidLongitude(longitude));
        }
        if let Some(latitude) = input.latitude
            && (!latitude.is_finite() || latitude.abs() > 90.0)
        {
            return Err(SajuError::InvalidLatitude(latitude));
        }

        let solar = TrueSolarTime::correct(
            WallClock { date, hour, minute },
            longitude,
            config.reference_meridian,
        );
        debug!(
            %date,
            hour,
            minute,
            longitude,
            corrected_date = %solar.date(),
            corrected_hour = solar.hour(),
            offset_seconds = solar.offset_seconds(),
            "true solar time"
        );

        let year = year::year_pillar(solar.date().year());
        let month = month::month_pillar(&solar, year.stem);
        let day = day::day_pillar(solar.date());
        let hour = hour::hour_pillar(solar.hour(), day.stem);
        let mut four_pillars = FourPillars {
            year,
            month,
            day,
            hour,
        };
        let day_master = four_pillars.day_master();
        debug!(
            year = %year.label(),
            month = %month.label(),
            day = %day.label(),
            hour = %hour.label(),
            "pillars"
        );

        let twelve_fortunes = four_pillars
            .map(|p| fortunes::resolve(&config.fortune_overrides, day_master, p.branch));
        let twelve_spirits = spirits::resolve(
            &four_pillars,
            &config.spirit_exceptions,
            solar.date(),
            solar.hour(),
        );
        for (pos, stage) in twelve_fortunes.iter() {
            let pillar = four_pillars.get_mut(pos);
            pillar.life_stage = Some(*stage);
            pillar.spirit = Some(*twelve_spirits.get(pos));
        }

        let ten_gods = TenGods {
            year: TenGod::of(day_master, year.stem),
            month: TenGod::of(day_master, month.stem),
            hour: TenGod::of(day_master, hour.stem),
        };

        let lunar_date = chinese::lunar_date(solar.date(), config.lunar_utc_offset_minutes);
        if lunar_date.is_none() {
            debug!(date = %solar.date(), "lunar date out of range");
        }

        Ok(SajuResult {
            element_profile: ElementProfile::of(&four_pillars),
            four_pillars,
            lunar_date,
            solar_term: SolarTerm::at(solar.ut().to_tt()),
            true_solar_time: solar,
            ten_gods,
            twelve_fortunes,
            twelve_spirits,
            gender: input.gender,
        })
    }
}

/// Calculates the chart for `input` with the default configuration.
///
/// ```
/// use saju::{BirthInput, compute};
///
/// let result = compute(&BirthInput::on(1986, 5, 26).at(5, 0)).unwrap();
/// assert_eq!("丙寅", result.four_pillars.year.label());
/// ```
pub fn compute(input: &BirthInput) -> Result<SajuResult, SajuError> {
    Saju::default().compute(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::Stem;

    #[test]
    fn defaults_fill_missing_fields() {
        let result = compute(&BirthInput::on(2023, 10, 15)).unwrap();
        let explicit = compute(&BirthInput::on(2023, 10, 15).at(12, 0).located(126.978, 37.5665))
            .unwrap();
        assert_eq!(explicit.four_pillars, result.four_pillars);
        assert_eq!(-1925, result.true_solar_time.offset_seconds());
    }

    #[test]
    fn rejects_invalid_input() {
        let base = BirthInput::on(2023, 10, 15);
        let cases = [
            (BirthInput::on(2023, 13, 1), "invalid date"),
            (BirthInput::on(2023, 4, 31), "invalid date"),
            (BirthInput::on(2023, 0, 1), "invalid date"),
            (BirthInput::on(2023, u32::MAX, 1), "invalid date"),
            (base.at(24, 0), "hour"),
            (base.at(0, 60), "minute"),
            (base.located(181.0, 0.0), "longitude"),
            (base.located(f64::NAN, 0.0), "longitude"),
            (base.located(127.0, -91.0), "latitude"),
        ];
        for (input, what) in cases {
            let err = compute(&input).unwrap_err();
            let matched = match err {
                SajuError::InvalidDate { .. } => what == "invalid date",
                SajuError::InvalidHour(_) => what == "hour",
                SajuError::InvalidMinute(_) => what == "minute",
                SajuError::InvalidLongitude(_) => what == "longitude",
                SajuError::InvalidLatitude(_) => what == "latitude",
            };
            assert!(matched, "{input:?}: {err}");
        }
    }

    #[test]
    fn profile_and_gods() {
        let result = compute(&BirthInput::on(2023, 10, 15).at(12, 0)).unwrap();
        let pillars = &result.four_pillars;
        assert_eq!(Stem::Bing, pillars.day_master());
        assert_eq!(Element::Fire, result.element_profile.main_element);
        assert_eq!(Element::Water, result.element_profile.secondary_element);
        assert_eq!(Polarity::Yang, result.element_profile.yin_yang);
        let counts = result.element_profile.element_counts;
        let total: u8 = Element::ALL.iter().map(|&e| counts.get(e)).sum();
        assert_eq!(8, total);
        // 癸 year and 壬 month against a 丙 day
        assert_eq!(TenGod::DirectOfficer, result.ten_gods.year);
        assert_eq!(TenGod::SevenKillings, result.ten_gods.month);
    }

    #[test]
    fn labels_attached_to_pillars() {
        let result = compute(&BirthInput::on(1986, 5, 26).at(5, 0)).unwrap();
        for (pos, pillar) in result.four_pillars.iter() {
            assert_eq!(Some(*result.twelve_fortunes.get(pos)), pillar.life_stage);
            assert_eq!(Some(*result.twelve_spirits.get(pos)), pillar.spirit);
        }
    }

    #[test]
    fn configured_override_applies() {
        let plain = compute(&BirthInput::on(2023, 10, 15).at(12, 0)).unwrap();
        let day_branch = plain.four_pillars.day.branch;
        let config = EngineConfig {
            fortune_overrides: vec![fortunes::FortuneOverride {
                stem: Stem::Bing,
                branch: day_branch,
                stage: LifeStage::Nurture,
            }],
            ..Default::default()
        };
        let result = Saju::new(config)
            .compute(&BirthInput::on(2023, 10, 15).at(12, 0))
            .unwrap();
        assert_eq!(LifeStage::Peak, plain.twelve_fortunes.day);
        assert_eq!(LifeStage::Nurture, result.twelve_fortunes.day);
    }
}
