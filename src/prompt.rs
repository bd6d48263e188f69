use clap::ValueEnum;

use crate::app::App;
use crate::models::{Metric, RegionSelection, TimeScale};
use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Region(RegionSelection),
    Metric(Metric),
    Scale(TimeScale),
    Scrub(usize),
    Regions,
    Help,
    Quit,
}

pub const HELP: &str = "commands: region <code|all>, metric <positive|negative|death>, \
scale <week|month|max>, scrub <index>, regions, help, quit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let arg = words.collect::<Vec<_>>().join(" ");

    match verb.as_str() {
        "region" if !arg.is_empty() => Ok(Command::Region(
            arg.parse().unwrap_or_default(),
        )),
        "metric" => Metric::from_str(&arg, true).map(Command::Metric),
        "scale" => TimeScale::from_str(&arg, true).map(Command::Scale),
        "scrub" => arg
            .parse()
            .map(Command::Scrub)
            .map_err(|_| format!("not an index: {arg:?}")),
        "regions" => Ok(Command::Regions),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(format!("unknown command: {line:?}")),
    }
}

pub fn apply(app: &mut App, command: Command, width: usize) -> String {
    match command {
        Command::Region(region) => {
            app.select_region(region);
            redraw(app, width)
        }
        Command::Metric(metric) => {
            app.select_metric(metric);
            redraw(app, width)
        }
        Command::Scale(scale) => {
            app.select_time_scale(scale);
            redraw(app, width)
        }
        Command::Scrub(index) => match app.scrub(index) {
            Ok(info) => format!("{}\n", render::info_line(&info)),
            Err(err) => format!("{err}\n"),
        },
        Command::Regions => render::build_region_list(&app.region_options()),
        Command::Help => format!("{HELP}\n"),
        Command::Quit => String::new(),
    }
}

pub fn redraw(app: &App, width: usize) -> String {
    render::build_view(&app.shown_region(), app.adapter(), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchOutcome;
    use crate::models::DailyRecord;
    use chrono::NaiveDate;

    fn loaded_app() -> App {
        let record = |state: Option<&str>, day: u32, positive: i64| DailyRecord {
            date: NaiveDate::from_ymd_opt(2020, 8, day).unwrap(),
            state: state.map(str::to_string),
            positive_increase: positive,
            negative_increase: positive * 10,
            death_increase: 1,
        };
        let mut app = App::new();
        app.apply_fetch(FetchOutcome {
            nationwide: Ok(vec![record(None, 2, 2000), record(None, 1, 1000)]),
            per_region: Ok(vec![record(Some("OR"), 1, 5)]),
        });
        app
    }

    #[test]
    fn parses_commands_case_insensitively() {
        assert_eq!(
            parse_command("Region or"),
            Ok(Command::Region(RegionSelection::Region("OR".to_string())))
        );
        assert_eq!(
            parse_command("region all"),
            Ok(Command::Region(RegionSelection::Nationwide))
        );
        assert_eq!(parse_command("metric DEATH"), Ok(Command::Metric(Metric::Death)));
        assert_eq!(parse_command("scale week"), Ok(Command::Scale(TimeScale::Week)));
        assert_eq!(parse_command("scrub 4"), Ok(Command::Scrub(4)));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_command("region").is_err());
        assert!(parse_command("metric recovered").is_err());
        assert!(parse_command("scrub -1").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn commands_redraw_the_view() {
        let mut app = loaded_app();

        let view = apply(&mut app, Command::Metric(Metric::Negative), 60);
        assert!(view.contains("20,000 negative tests on Aug 02, 2020"));

        let view = apply(&mut app, Command::Region("OR".parse().unwrap()), 60);
        assert!(view.starts_with("OR\n"));
        assert!(view.contains("5 positive cases on Aug 01, 2020"));
    }

    #[test]
    fn scrub_out_of_range_prints_the_error() {
        let mut app = loaded_app();
        let text = apply(&mut app, Command::Scrub(9), 60);
        assert_eq!(text, "index 9 out of range for 2 records\n");
    }

    #[test]
    fn regions_lists_nationwide_first() {
        let mut app = loaded_app();
        let text = apply(&mut app, Command::Regions, 60);
        assert_eq!(text, "- All (Nationwide)\n- OR\n");
    }

    #[test]
    fn unloaded_region_is_drawn_as_nationwide() {
        let mut app = loaded_app();
        let view = apply(&mut app, Command::Region("ZZ".parse().unwrap()), 60);
        assert!(view.starts_with("All (Nationwide)\n"));
        assert!(!view.contains("ZZ"));
        assert!(view.contains("2,000 positive cases on Aug 02, 2020"));
    }
}
