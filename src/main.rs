//! Terminal host (default binary).
//!
//! Plays one session of the mini-game in the terminal: crossterm for input, a plain
//! text painter for output. Input is queued and replayed before each ~16ms frame tick.
//! After a game over the player may start another round; the best score is kept for the
//! life of the process and printed with the final report on exit.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags},
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use eldritch_tetris::core::{
    definition, EngineConfig, GameEngine, GameObserver, GameOverReport, GameSnapshot,
};
use eldritch_tetris::input::{map_key_event, should_quit, CommandQueue};
use eldritch_tetris::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, FRAME_MS, PREVIEW_SIZE};

/// How long the game-over screen stays up before the session closes
const GAME_OVER_LINGER: Duration = Duration::from_millis(1500);

/// Lets a bare Shift press through as its own key event
const KEYBOARD_FLAGS: KeyboardEnhancementFlags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
    .union(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    .union(KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES);

/// Marks frames dirty and captures the final report
#[derive(Clone, Default)]
struct HostObserver {
    dirty: Rc<Cell<bool>>,
    report: Rc<Cell<Option<GameOverReport>>>,
}

impl GameObserver for HostObserver {
    fn on_state(&mut self, _snapshot: &GameSnapshot) {
        self.dirty.set(true);
    }

    fn on_game_over(&mut self, report: &GameOverReport) {
        self.report.set(Some(*report));
    }
}

/// How a single session ended
enum Outcome {
    GameOver(GameOverReport),
    Quit(GameOverReport),
}

/// Totals across every session played by this process
struct Summary {
    last: Outcome,
    best: u32,
    sessions: u32,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    config.validate()?;

    let mut out = io::stdout();
    let enhanced = enter(&mut out)?;
    let result = run(config, enhanced, &mut out);
    // Always try to restore terminal state.
    let _ = exit(&mut out, enhanced);

    let summary = result?;
    let (label, report) = match summary.last {
        Outcome::GameOver(report) => ("Game over", report),
        Outcome::Quit(report) => ("Closed", report),
    };
    println!(
        "[Host] {}: score {} | lines {} | level {}",
        label, report.score, report.lines, report.level
    );
    println!(
        "[Host] Best score: {} over {} session(s)",
        summary.best, summary.sessions
    );
    Ok(())
}

/// Play sessions back to back until the player quits
fn run(config: EngineConfig, enhanced: bool, out: &mut io::Stdout) -> Result<Summary> {
    let mut best = 0u32;
    let mut sessions = 0u32;

    loop {
        let mut engine = GameEngine::with_config(config)?;
        sessions += 1;
        let outcome = play(&mut engine, best, enhanced, out)?;

        match outcome {
            Outcome::GameOver(report) => {
                best = best.max(report.score);
                if !wait_for_replay(out, &report, best)? {
                    return Ok(Summary {
                        last: Outcome::GameOver(report),
                        best,
                        sessions,
                    });
                }
            }
            Outcome::Quit(report) => {
                best = best.max(report.score);
                return Ok(Summary {
                    last: Outcome::Quit(report),
                    best,
                    sessions,
                });
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let seed = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                config.seed = Some(seed);
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

fn play(
    engine: &mut GameEngine,
    best: u32,
    enhanced: bool,
    out: &mut io::Stdout,
) -> Result<Outcome> {
    let observer = HostObserver::default();
    engine.subscribe(observer.clone());

    let queue = CommandQueue::new();
    let frame = Duration::from_millis(FRAME_MS);
    let epoch = Instant::now();
    let mut last_frame = epoch;

    engine.start();

    loop {
        if observer.dirty.replace(false) {
            draw(out, &engine.snapshot(), best, enhanced)?;
        }

        if let Some(report) = observer.report.get() {
            thread::sleep(GAME_OVER_LINGER);
            return Ok(Outcome::GameOver(report));
        }

        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(Outcome::Quit(GameOverReport {
                            score: engine.score(),
                            lines: engine.lines(),
                            level: engine.level(),
                        }));
                    }
                    if let Some(command) = map_key_event(key) {
                        queue.push(command);
                    }
                }
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            queue.drain_with(|command| engine.apply(command));
            engine.tick(epoch.elapsed().as_millis() as u64);
        }
    }
}

/// Show the final report; true if the player asks for another round
fn wait_for_replay(out: &mut io::Stdout, report: &GameOverReport, best: u32) -> Result<bool> {
    let hud_x = (BOARD_WIDTH as u16) * 2 + 4;
    let lines = [
        format!("Final score: {}", report.score),
        format!("Best: {}", best),
        "R play again  Q quit".to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(hud_x, 17 + i as u16))?;
        out.queue(Print(line))?;
    }
    out.flush()?;

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if should_quit(key) {
                return Ok(false);
            }
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                return Ok(true);
            }
        }
    }
}

/// Set up the terminal; true if keyboard enhancement was enabled
fn enter(out: &mut io::Stdout) -> Result<bool> {
    terminal::enable_raw_mode()?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        out.queue(event::PushKeyboardEnhancementFlags(KEYBOARD_FLAGS))?;
    }
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.flush()?;
    Ok(enhanced)
}

fn exit(out: &mut io::Stdout, enhanced: bool) -> Result<()> {
    if enhanced {
        out.queue(event::PopKeyboardEnhancementFlags)?;
    }
    out.queue(ResetColor)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Bare Shift presses only arrive with keyboard enhancement on
fn hard_drop_keys(enhanced: bool) -> &'static str {
    if enhanced {
        "Shift/Enter"
    } else {
        "Enter"
    }
}

fn piece_color(kind: PieceKind) -> Color {
    let rgb = kind.color();
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn draw_cell(buf: &mut Vec<u8>, cell: Option<PieceKind>) -> Result<()> {
    match cell {
        Some(kind) => {
            buf.queue(SetForegroundColor(piece_color(kind)))?;
            buf.queue(Print("[]"))?;
            buf.queue(ResetColor)?;
        }
        None => {
            buf.queue(Print(" ."))?;
        }
    }
    Ok(())
}

/// Paint the board with the HUD to its right
fn draw(out: &mut io::Stdout, s: &GameSnapshot, best: u32, enhanced: bool) -> Result<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(8 * 1024);
    buf.queue(terminal::Clear(terminal::ClearType::All))?;

    let width = BOARD_WIDTH as usize;
    let height = BOARD_HEIGHT as usize;
    let hud_x = (width * 2 + 4) as u16;

    for row in 0..height {
        buf.queue(cursor::MoveTo(0, row as u16))?;
        buf.queue(Print("|"))?;
        for col in 0..width {
            draw_cell(&mut buf, s.composited(col, row))?;
        }
        buf.queue(Print("|"))?;
    }
    buf.queue(cursor::MoveTo(0, height as u16))?;
    buf.queue(Print(format!("+{}+", "-".repeat(width * 2))))?;

    let title = if s.game_over {
        "GAME OVER"
    } else if s.paused {
        "PAUSED"
    } else {
        "ELDRITCH TETRIS"
    };
    buf.queue(cursor::MoveTo(hud_x, 0))?;
    buf.queue(Print(title))?;

    buf.queue(cursor::MoveTo(hud_x, 2))?;
    buf.queue(Print("Next"))?;
    if let Some(next) = s.next {
        let def = definition(next);
        let matrix = def.matrix(Rotation::North);
        let (ox, oy) = def.preview_origin(PREVIEW_SIZE);
        for row in 0..PREVIEW_SIZE as i8 {
            buf.queue(cursor::MoveTo(hud_x, 3 + row as u16))?;
            for col in 0..PREVIEW_SIZE as i8 {
                let (mc, mr) = (col - ox, row - oy);
                let filled = mc >= 0 && mr >= 0 && matrix.is_filled(mc as usize, mr as usize);
                if filled {
                    draw_cell(&mut buf, Some(next))?;
                } else {
                    buf.queue(Print("  "))?;
                }
            }
        }
    }

    let hud = [
        format!("Score: {}", s.score),
        format!("Lines: {}", s.lines),
        format!("Level: {}", s.level),
        format!("Best:  {}", best.max(s.score)),
        String::new(),
        "<-/-> move  Down soft drop".to_string(),
        "Up/Space rotate  Z ccw".to_string(),
        format!("{} hard drop", hard_drop_keys(enhanced)),
        "P pause  Q quit".to_string(),
    ];
    for (i, line) in hud.iter().enumerate() {
        buf.queue(cursor::MoveTo(hud_x, 8 + i as u16))?;
        buf.queue(Print(line))?;
    }

    out.write_all(&buf)?;
    out.flush()?;
    Ok(())
}
