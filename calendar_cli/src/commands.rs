use std::path::Path;

use anyhow::{Context, Result};
use calendar_core::file_io::{load_definition, load_state, save_state, StateFile, StateLock};
use calendar_core::solar::format_minutes;
use calendar_core::{presets, CalendarDate, CalendarDriver, CalendarState};
use serde::Serialize;
use tracing::info;

use crate::cli::{AdvanceArgs, DateArgs, DayArgs, SunArgs};

const NOON: u32 = 12 * 60;

/// Build a driver from `--calendar` or `--preset`.
pub fn load_driver(calendar: Option<&Path>, preset: &str) -> Result<CalendarDriver> {
    let definition = match calendar {
        Some(path) => load_definition(path).with_context(|| format!("loading {}", path.display()))?,
        None => presets::load(preset)?,
    };
    Ok(CalendarDriver::new(definition))
}

fn print<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

pub fn date(driver: &CalendarDriver, args: DateArgs, json: bool) -> Result<()> {
    let date = driver.date(args.day);
    print(json, &date, || describe(&date))
}

pub fn day(driver: &CalendarDriver, args: DayArgs, json: bool) -> Result<()> {
    let month_index = (args.month - 1) as usize;
    let absolute_day = driver.try_absolute_day(args.year, month_index, args.day_of_month)?;
    let date = driver.date(absolute_day);
    print(json, &date, || format!("{absolute_day}\t{}", describe(&date)))
}

#[derive(Debug, Serialize)]
struct SunReport<'a> {
    absolute_day: i64,
    time_of_day: u32,
    region: Option<&'a str>,
    season: Option<&'a str>,
    sunrise: u32,
    sunset: u32,
    daylight_minutes: u32,
    sun_state: calendar_core::SunState,
    light_level: calendar_core::LightLevel,
}

fn sun_report<'a>(driver: &'a CalendarDriver, day: i64, time: u32, region: Option<&'a str>) -> SunReport<'a> {
    let season = region
        .and_then(|r| driver.regional_season(day, r))
        .or_else(|| driver.season(day));
    let times = driver.solar_times(day, region);
    let state = driver.sun_state_in_region(day, Some(time), region);

    SunReport {
        absolute_day: day,
        time_of_day: time,
        region,
        season: season.and_then(|s| s.name.as_deref()),
        sunrise: times.sunrise,
        sunset: times.sunset,
        daylight_minutes: times.daylight_minutes(),
        sun_state: state,
        light_level: state.light_level(),
    }
}

pub fn sun(driver: &CalendarDriver, args: SunArgs, json: bool) -> Result<()> {
    let report = sun_report(driver, args.day, args.time.unwrap_or(NOON), args.region.as_deref());
    print(json, &report, || {
        format!(
            "{} at {}: {} ({}), sunrise {}, sunset {}, daylight {}{}",
            describe(&driver.date(report.absolute_day)),
            format_minutes(report.time_of_day),
            report.sun_state,
            report.light_level.display_name(),
            format_minutes(report.sunrise),
            format_minutes(report.sunset),
            format_minutes(report.daylight_minutes),
            report.season.map(|s| format!(", {s}")).unwrap_or_default(),
        )
    })
}

pub fn advance(driver: &mut CalendarDriver, args: AdvanceArgs, json: bool) -> Result<()> {
    let _lock = StateLock::acquire(&args.state, args.user)?;

    let current = if args.state.exists() {
        load_state(&args.state)?.state
    } else {
        info!(path = %args.state.display(), "starting new calendar state");
        CalendarState::new(0, 0)
    };

    let next = driver.advance_state(current, args.minutes)?;
    let file = StateFile::new(driver.definition().name.clone(), next);
    save_state(&file, &args.state)?;

    let date = driver.date(next.absolute_day);
    print(json, &file, || format!("{} {}", describe(&date), format_minutes(next.time_of_day)))
}

pub fn presets() -> Result<()> {
    for name in presets::names() {
        let definition = presets::load(&name)?;
        println!("{name}\t{}", definition.name);
    }
    Ok(())
}

fn describe(date: &CalendarDate) -> String {
    if date.is_intercalary {
        format!("{} (festival)", date)
    } else {
        date.to_string()
    }
}
