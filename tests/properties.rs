//! Whole-chart properties that hold for any valid input.

use std::io::Write;

use saju::cycle::{BRANCHES, STEMS};
use saju::pillars::hour::hour_pillar;
use saju::ten_gods::TenGod;
use saju::{BirthInput, Date, EngineConfig, Saju, compute};

fn sample_dates() -> impl Iterator<Item = Date> {
    let start = Date::from_gregorian(1890, 1, 1).unwrap();
    // steps of 97 days walk through every month and weekday
    (0..350).map(move |i| start + i * 97)
}

fn input_for(date: Date, hour: u32) -> BirthInput {
    let (y, m, d) = date.gregorian();
    BirthInput::on(y, m as u32, d as u32).at(hour, 30)
}

#[test]
fn totality() {
    for date in sample_dates() {
        for hour in [0, 5, 11, 12, 23] {
            let result = compute(&input_for(date, hour)).unwrap();
            for (_, pillar) in result.four_pillars.iter() {
                assert!(pillar.life_stage.is_some() && pillar.spirit.is_some());
                assert!((1..=3).contains(&pillar.hidden_stems().len()));
            }
            assert!(result.four_pillars.year.sexagenary().is_some());
            assert!(result.four_pillars.month.sexagenary().is_some());
            assert!(result.four_pillars.day.sexagenary().is_some());
            assert!(result.four_pillars.hour.sexagenary().is_some());
        }
    }
}

#[test]
fn years_sixty_apart_share_a_pillar() {
    for year in [1900, 1936, 1984, 2000, 2023] {
        let a = compute(&BirthInput::on(year, 7, 1)).unwrap();
        let b = compute(&BirthInput::on(year + 60, 7, 1)).unwrap();
        assert_eq!(a.four_pillars.year.label(), b.four_pillars.year.label());
    }
}

#[test]
fn days_sixty_apart_share_a_pillar() {
    for date in sample_dates().take(60) {
        let a = compute(&input_for(date, 9)).unwrap();
        let b = compute(&input_for(date + 60, 9)).unwrap();
        assert_eq!(a.four_pillars.day.label(), b.four_pillars.day.label());
    }
}

#[test]
fn hours_walk_the_branches_in_order() {
    for day_stem in STEMS {
        let branches: Vec<_> = (0..24).map(|h| hour_pillar(h, day_stem).branch).collect();
        for branch in BRANCHES {
            assert_eq!(2, branches.iter().filter(|&&b| b == branch).count());
        }
        let mut changes = 0;
        for h in 1..24 {
            let (a, b) = (hour_pillar(h - 1, day_stem), hour_pillar(h, day_stem));
            if a.branch != b.branch {
                changes += 1;
                assert_eq!(a.stem.offset(1), b.stem, "{day_stem} hour {h}");
            }
        }
        assert_eq!(12, changes);
    }
}

#[test]
fn late_and_early_rat_hours_differ() {
    // on the 135° meridian clock time is solar time
    let at = |hour, minute| {
        let input = BirthInput::on(2023, 10, 15).at(hour, minute).located(135.0, 35.0);
        compute(&input).unwrap()
    };
    let (early, late) = (at(0, 10), at(23, 50));
    assert_eq!("丙午", early.four_pillars.day.label());
    assert_eq!("丙午", late.four_pillars.day.label());
    assert_eq!("戊子", early.four_pillars.hour.label());
    assert_eq!("庚子", late.four_pillars.hour.label());
    assert_eq!("己亥", at(21, 30).four_pillars.hour.label());
}

#[test]
fn ten_gods_total_over_stem_pairs() {
    for dm in STEMS {
        assert_eq!(TenGod::Companion, TenGod::of(dm, dm));
        for other in STEMS {
            assert!(TenGod::ALL.contains(&TenGod::of(dm, other)));
        }
    }
}

#[test]
fn identical_input_identical_output() {
    let input = BirthInput::on(1992, 8, 17).at(21, 45).located(129.075, 35.18);
    let a = serde_json::to_string(&compute(&input).unwrap()).unwrap();
    let b = serde_json::to_string(&compute(&input).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn json_shape() {
    let mut input = BirthInput::on(2023, 10, 15).at(12, 0);
    input.gender = Some(saju::Gender::Female);
    let json = serde_json::to_value(compute(&input).unwrap()).unwrap();

    for pos in ["year", "month", "day", "hour"] {
        let pillar = &json["fourPillars"][pos];
        for key in ["stem", "branch", "label", "hiddenStems", "lifeStage", "spirit"] {
            assert!(!pillar[key].is_null(), "{pos}.{key}");
        }
        assert!(json["twelveFortunes"][pos].is_string());
        assert!(json["twelveSpirits"][pos].is_string());
    }
    let gods = json["tenGods"].as_object().unwrap();
    assert_eq!(3, gods.len());
    assert!(!gods.contains_key("day"));
    assert_eq!(4, json["twelveFortunes"].as_object().unwrap().len());
    assert_eq!(4, json["twelveSpirits"].as_object().unwrap().len());
    assert_eq!("fire", json["elementProfile"]["mainElement"]);
    assert_eq!("yang", json["elementProfile"]["yinYang"]);
    assert_eq!("丙午", json["fourPillars"]["day"]["label"]);
    assert_eq!("F", json["gender"]);
    assert_eq!(9, json["lunarDate"]["lunarMonth"]);
    assert_eq!(-1925, json["trueSolarTime"]["offsetSeconds"]);
}

#[test]
fn birth_input_from_json() {
    let input: BirthInput =
        serde_json::from_str(r#"{ "year": 1986, "month": 5, "day": 26, "hour": 5, "gender": "M" }"#)
            .unwrap();
    assert_eq!(None, input.minute);
    assert_eq!(Some(saju::Gender::Male), input.gender);
    assert_eq!("丙寅", compute(&input).unwrap().four_pillars.year.label());
}

#[test]
fn config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "defaultLocation": {{ "longitude": 135.0, "latitude": 35.0 }},
            "defaultHour": 0
        }}"#
    )
    .unwrap();
    let config = EngineConfig::from_path(file.path()).unwrap();
    let result = Saju::new(config)
        .compute(&BirthInput::on(2023, 10, 15))
        .unwrap();
    assert_eq!(0, result.true_solar_time.offset_seconds());
    assert_eq!("戊子", result.four_pillars.hour.label());

    let missing = file.path().with_extension("missing");
    assert!(matches!(
        EngineConfig::from_path(&missing),
        Err(saju::ConfigError::Io { .. })
    ));
}

#[test]
fn spirit_exception_from_config() {
    let config = EngineConfig::from_json_str(
        r#"{ "spiritExceptions": [
            { "date": "2023-10-15", "hour": 11, "spirits": { "year": "華蓋殺" } }
        ] }"#,
    )
    .unwrap();
    let input = BirthInput::on(2023, 10, 15).at(12, 0);
    let plain = compute(&input).unwrap();
    let result = Saju::new(config).compute(&input).unwrap();
    assert_eq!(saju::spirits::Spirit::Canopy, result.twelve_spirits.year);
    assert_eq!(plain.twelve_spirits.month, result.twelve_spirits.month);
}
