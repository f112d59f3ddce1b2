//! The four pillars and their calculators.
//!
//! Each calculator is a closed-form function over the cycle tables; the
//! time-sensitive ones take the corrected moment from
//! [`solar_time`](crate::solar_time).

use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::cycle::{Branch, Sexagenary, Stem};
use crate::fortunes::LifeStage;
use crate::spirits::Spirit;

pub mod day;
pub mod hour;
pub mod month;
pub mod year;

/// A stem over a branch, with the labels derived for its position once
/// known.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
    pub life_stage: Option<LifeStage>,
    pub spirit: Option<Spirit>,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self {
            stem,
            branch,
            life_stage: None,
            spirit: None,
        }
    }

    pub fn from_sexagenary(sg: Sexagenary) -> Self {
        Self::new(sg.stem(), sg.branch())
    }

    /// Stem and branch written together, e.g. 丙午.
    pub fn label(&self) -> String {
        format!("{}{}", self.stem, self.branch)
    }

    pub fn hidden_stems(&self) -> &'static [Stem] {
        self.branch.hidden_stems()
    }

    /// `None` for parity-mismatched pairs, which only the month pillar
    /// could in principle produce.
    pub fn sexagenary(&self) -> Option<Sexagenary> {
        Sexagenary::from_pair(self.stem, self.branch)
    }
}

impl Serialize for Pillar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 4 + self.life_stage.is_some() as usize + self.spirit.is_some() as usize;
        let mut st = serializer.serialize_struct("Pillar", len)?;
        st.serialize_field("stem", &self.stem)?;
        st.serialize_field("branch", &self.branch)?;
        st.serialize_field("label", &self.label())?;
        st.serialize_field("hiddenStems", self.hidden_stems())?;
        if let Some(stage) = self.life_stage {
            st.serialize_field("lifeStage", &stage)?;
        }
        if let Some(spirit) = self.spirit {
            st.serialize_field("spirit", &spirit)?;
        }
        st.end()
    }
}

/// Position of a pillar in the chart.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Year,
    Month,
    Day,
    Hour,
}

impl Position {
    /// In chart order, year first.
    pub const ALL: [Position; 4] = [
        Position::Year,
        Position::Month,
        Position::Day,
        Position::Hour,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        ["year", "month", "day", "hour"][self.index()]
    }
}

/// One value per pillar position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ByPosition<T> {
    #[serde(default)]
    pub year: T,
    #[serde(default)]
    pub month: T,
    #[serde(default)]
    pub day: T,
    #[serde(default)]
    pub hour: T,
}

impl<T> ByPosition<T> {
    pub fn get(&self, pos: Position) -> &T {
        match pos {
            Position::Year => &self.year,
            Position::Month => &self.month,
            Position::Day => &self.day,
            Position::Hour => &self.hour,
        }
    }

    pub fn get_mut(&mut self, pos: Position) -> &mut T {
        match pos {
            Position::Year => &mut self.year,
            Position::Month => &mut self.month,
            Position::Day => &mut self.day,
            Position::Hour => &mut self.hour,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Position) -> T) -> Self {
        Self {
            year: f(Position::Year),
            month: f(Position::Month),
            day: f(Position::Day),
            hour: f(Position::Hour),
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> ByPosition<U> {
        ByPosition::from_fn(|pos| f(self.get(pos)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::ALL.into_iter().map(move |pos| (pos, self.get(pos)))
    }
}

/// Year, month, day and hour pillars of one moment.
pub type FourPillars = ByPosition<Pillar>;

impl FourPillars {
    /// Stem of the day pillar, the reference of every derived label.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pillar_serialization() {
        let mut pillar = Pillar::new(Stem::Bing, Branch::Yin);
        let json = serde_json::to_value(pillar).unwrap();
        assert_eq!(
            serde_json::json!({
                "stem": "丙",
                "branch": "寅",
                "label": "丙寅",
                "hiddenStems": ["甲", "丙", "戊"],
            }),
            json
        );
        pillar.life_stage = Some(LifeStage::Birth);
        pillar.spirit = Some(Spirit::Horse);
        let json = serde_json::to_value(pillar).unwrap();
        assert_eq!("長生", json["lifeStage"]);
        assert_eq!("驛馬殺", json["spirit"]);
    }

    #[test]
    fn positions_in_order() {
        let values = ByPosition::from_fn(|pos| pos.index());
        let collected: Vec<_> = values.iter().map(|(pos, &v)| (pos.name(), v)).collect();
        assert_eq!(
            vec![("year", 0), ("month", 1), ("day", 2), ("hour", 3)],
            collected
        );
        assert_eq!(ByPosition::from_fn(|pos| pos.index() * 2), values.map(|v| v * 2));
    }
}
