//! Trash Rush headless driver
//!
//! Runs one session on the game thread with a logging presenter attached.
//! In idle mode the demo auto-sorter plays; otherwise items are left to fall
//! off the belt. Prints the session report as JSON on exit.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam::channel::{RecvTimeoutError, bounded};

use trash_rush::audio::{AudioManager, LogBackend};
use trash_rush::consts::*;
use trash_rush::platform::{AutoSorter, GameThread};
use trash_rush::renderer::{LogPresenter, Presenter, SharedFrame};
use trash_rush::sim::{GameState, Layout};
use trash_rush::{Result, Settings, Tuning};

const USAGE: &str = "usage: trash-rush [--settings <path>] [--tuning <path>] [--seconds <n>] [--seed <n>] [--idle | --no-idle]";

/// Command line options
#[derive(Debug)]
struct Options {
    settings: Option<PathBuf>,
    tuning: Option<PathBuf>,
    seconds: f32,
    seed: Option<u64>,
    idle: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> std::result::Result<Self, String> {
        let mut options = Self {
            settings: None,
            tuning: None,
            seconds: 60.0,
            seed: None,
            idle: true,
        };

        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| format!("{arg} needs a value"));
            match arg.as_str() {
                "--settings" => options.settings = Some(PathBuf::from(value()?)),
                "--tuning" => options.tuning = Some(PathBuf::from(value()?)),
                "--seconds" => {
                    let seconds: f32 = value()?
                        .parse()
                        .map_err(|e| format!("--seconds: {e}"))?;
                    if seconds.is_nan() || seconds <= 0.0 {
                        return Err("--seconds must be positive".into());
                    }
                    options.seconds = seconds;
                }
                "--seed" => {
                    options.seed = Some(value()?.parse().map_err(|e| format!("--seed: {e}"))?);
                }
                "--idle" => options.idle = true,
                "--no-idle" => options.idle = false,
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: Options) -> Result<()> {
    let settings = Settings::load_or_default(options.settings.as_deref());
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!("Trash Rush starting (seed {seed}, idle {})", options.idle);

    let layout = Layout::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT, &tuning);
    let state = GameState::new(tuning, layout, seed);
    let audio = AudioManager::from_settings(&settings, Some(Box::new(LogBackend)));

    let (report_tx, report_rx) = bounded(1);
    let mut game = GameThread::spawn(state, audio, &settings, move |report| {
        // One report per session; a full channel means it was already delivered
        let _ = report_tx.try_send(report);
    })?;

    let frame = SharedFrame::new();
    let presenters: Vec<Box<dyn Presenter>> = vec![
        Box::new(LogPresenter::new()) as Box<dyn Presenter>,
        Box::new(frame.clone()),
    ];
    game.surface().attach(Box::new(presenters));
    game.start_new_game();

    let deadline = Instant::now() + Duration::from_secs_f32(options.seconds);
    let mut bot = AutoSorter::new();
    let report = loop {
        match report_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(report) => break Some(report),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break None,
        }
        if Instant::now() >= deadline {
            log::info!("Time is up");
            break None;
        }
        if !options.idle {
            continue;
        }

        let gesture = frame.latest().and_then(|snapshot| bot.plan(&snapshot));
        for event in gesture.into_iter().flatten() {
            game.send_pointer(event);
        }
    };

    game.return_to_menu();
    let last_frame = frame.latest();
    game.stop()?;

    // Still running at the deadline: report the session so far
    let report = report.or_else(|| last_frame.map(|f| f.stats.report()));
    match report {
        Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        None => log::warn!("No frame was rendered; nothing to report"),
    }
    Ok(())
}
