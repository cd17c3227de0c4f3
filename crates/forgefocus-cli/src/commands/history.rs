use clap::Subcommand;
use forgefocus_core::{Config, DailyStats, History, SessionRecord};

use super::open_repository;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Every recorded day, most recent first
    List {
        #[arg(long)]
        json: bool,
    },
    /// Sessions of one day in the order they happened
    Day {
        /// Date as YYYY-MM-DD
        date: String,
        #[arg(long)]
        json: bool,
    },
    /// Totals across all days
    Summary {
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let repo = open_repository(&config)?;
    let history = History::new(&repo);

    match action {
        HistoryAction::List { json } => {
            let days = history.days()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else if days.is_empty() {
                println!("No sessions recorded yet");
            } else {
                for day in &days {
                    println!("{}", day_line(day));
                }
            }
        }
        HistoryAction::Day { date, json } => {
            chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{date}': {e}"))?;
            let sessions = history.sessions_for(&date)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else if sessions.is_empty() {
                println!("No sessions on {date}");
            } else {
                for session in &sessions {
                    println!("{}", session_line(session));
                }
            }
        }
        HistoryAction::Summary { json } => {
            let summary = history.summary()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} XP, {} min focus, {} sessions over {} days",
                    summary.total_points,
                    summary.total_focus_minutes,
                    summary.total_sessions,
                    summary.days
                );
            }
        }
    }
    Ok(())
}

fn day_line(day: &DailyStats) -> String {
    format!(
        "{}  {:>5} XP  {:>4} min focus  ({} sessions)",
        day.date,
        day.total_points,
        day.total_focus_minutes,
        day.sessions.len()
    )
}

fn session_line(session: &SessionRecord) -> String {
    let local = |t: chrono::DateTime<chrono::Utc>| {
        t.with_timezone(&chrono::Local).format("%H:%M").to_string()
    };
    format!(
        "{} - {}  {:<5} {:<24} +{} XP  {} min",
        local(session.start_time),
        local(session.end_time),
        session.kind,
        session.task_name,
        session.points,
        session.focus_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_line_shows_totals() {
        let day = DailyStats {
            date: "2024-01-03".into(),
            total_points: 80,
            total_focus_minutes: 25,
            sessions: Vec::new(),
        };
        assert_eq!(
            day_line(&day),
            "2024-01-03     80 XP    25 min focus  (0 sessions)"
        );
    }
}
