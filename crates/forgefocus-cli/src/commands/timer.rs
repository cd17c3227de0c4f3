use clap::Subcommand;
use forgefocus_core::timer::{
    format_mm_ss, preset_or_err, ticker, Notifier, SilentNotifier, TerminalBell,
};
use forgefocus_core::{Config, Event, FocusTimer, History, KvStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::open_repository;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a focus interval in the foreground (Ctrl-C pauses and exits)
    Run {
        /// Task name for the focus interval
        #[arg(long, short)]
        task: String,
        /// Preset index (see `forgefocus presets`)
        #[arg(long, short)]
        preset: Option<usize>,
        /// Continue with the rest interval once focus completes
        #[arg(long)]
        with_rest: bool,
        /// Print events as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check whether a task name is still free today
    Check {
        /// Task name to check
        name: String,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        TimerAction::Run {
            task,
            preset,
            with_rest,
            json,
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_foreground(&config, task, preset, with_rest, json))
        }
        TimerAction::Check { name } => {
            let repo = open_repository(&config)?;
            if repo.is_task_name_unique_today(&name)? {
                println!("'{name}' is available today");
            } else {
                eprintln!("'{name}' was already used today");
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_foreground(
    config: &Config,
    task: String,
    preset: Option<usize>,
    with_rest: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session_config = match preset {
        Some(index) => preset_or_err(index)?,
        None => config.session_config(),
    };
    let notifier: Box<dyn Notifier> = if config.notifications.enabled && config.notifications.bell {
        Box::new(TerminalBell::stderr())
    } else {
        Box::new(SilentNotifier)
    };
    let completed = Arc::new(AtomicBool::new(false));
    let completed_flag = completed.clone();

    let mut timer = FocusTimer::new(open_repository(config)?, session_config)
        .with_notifier(notifier)
        .with_default_task_label(config.timer.default_task_label.clone())
        .on_session_completed(move || completed_flag.store(true, Ordering::SeqCst));

    timer.set_task_name(task)?;
    emit(&timer.start()?, json)?;

    if !drive(&mut timer, json).await? {
        return Ok(());
    }
    if completed.swap(false, Ordering::SeqCst) {
        print_totals(&timer, json)?;
    }

    if with_rest {
        emit(&timer.start()?, json)?;
        drive(&mut timer, json).await?;
    }
    Ok(())
}

/// Tick until the interval ends or Ctrl-C arrives. Returns false if paused.
async fn drive<S: KvStore>(
    timer: &mut FocusTimer<S>,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let outcome = tokio::select! {
        result = ticker::run_interval(timer, Duration::from_secs(1), |t| {
            if !json {
                eprint!("\r{} {}  ", t.mode(), t.format_remaining());
            }
        }) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(result) => {
            if !json {
                eprintln!();
            }
            if let Some(event) = result? {
                emit(&event, json)?;
            }
            Ok(true)
        }
        None => {
            let event = timer.pause()?;
            if !json {
                eprintln!();
            }
            emit(&event, json)?;
            Ok(false)
        }
    }
}

fn emit(event: &Event, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("{}", describe(event));
    }
    Ok(())
}

fn print_totals<S: KvStore>(
    timer: &FocusTimer<S>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = History::new(timer.repository()).summary()?;
    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!(
            "all time: {} XP, {} min focus",
            summary.total_points, summary.total_focus_minutes
        );
    }
    Ok(())
}

pub(crate) fn describe(event: &Event) -> String {
    match event {
        Event::ConfigSelected { label, focus_minutes, rest_minutes, .. } => {
            format!("preset {label}: {focus_minutes}m / {rest_minutes}m")
        }
        Event::TimerStarted { mode, remaining_secs, resumed, .. } => {
            let verb = if *resumed { "resumed" } else { "started" };
            format!("{mode} {verb}, {} left", format_mm_ss(*remaining_secs))
        }
        Event::TimerPaused { mode, remaining_secs, .. } => {
            format!("{mode} paused at {}", format_mm_ss(*remaining_secs))
        }
        Event::TimerReset { mode, remaining_secs, .. } => {
            format!("{mode} reset to {}", format_mm_ss(*remaining_secs))
        }
        Event::FocusCompleted { record, day_total_points, rest_secs, .. } => format!(
            "'{}' complete: +{} XP ({} XP today). Rest {} is ready.",
            record.task_name,
            record.points,
            day_total_points,
            format_mm_ss(*rest_secs)
        ),
        Event::RestCompleted { .. } => "rest is over, time to focus".to_string(),
        Event::StateSnapshot { mode, active, remaining_secs, .. } => format!(
            "{mode} {} ({})",
            format_mm_ss(*remaining_secs),
            if *active { "running" } else { "idle" }
        ),
    }
}
