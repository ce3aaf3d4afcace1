//! Play in the terminal.

use std::io::{self, BufRead, IsTerminal, Write};

use cabin_engine::{EngineConfig, Frame, SaveManager, Session};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};

pub fn run(config: &EngineConfig) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("cannot start runtime: {e}"))?;

    let interpreter = super::build_interpreter(config);
    let mut session = Session::from_config(config, interpreter)
        .map_err(|e| format!("failed to start session: {e}"))?
        .with_saves(SaveManager::new(&config.save_directory));

    let stdin = io::stdin();
    let interactive = stdin.is_terminal() && io::stdout().is_terminal();
    let mut reader = stdin.lock();
    let mut line = String::new();
    let mut frame = session.intro();

    loop {
        draw(&frame, interactive)?;
        if frame.game_over {
            break;
        }

        if frame.wait_for_key {
            if !wait_for_key(interactive, &mut reader, &mut line)? {
                break;
            }
            frame = session.acknowledge();
            continue;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        frame = runtime.block_on(session.handle_input(line.trim()));
    }

    Ok(())
}

fn draw(frame: &Frame, interactive: bool) -> Result<(), String> {
    let mut stdout = io::stdout();
    if frame.clear && interactive {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))
            .map_err(|e| format!("terminal error: {e}"))?;
    } else if frame.clear {
        println!();
    }

    for line in &frame.lines {
        if line.starts_with("Health: ") {
            println!("{}", line.dimmed());
        } else if line.starts_with("Quest ") {
            println!("{}", line.yellow());
        } else {
            println!("{line}");
        }
    }
    if let Some(prompt) = &frame.prompt {
        print!("{prompt}");
    }
    stdout.flush().map_err(|e| e.to_string())
}

/// Block until a key is pressed, or a line is read when not on a terminal.
/// Returns `false` on end of input.
fn wait_for_key(
    interactive: bool,
    reader: &mut impl BufRead,
    line: &mut String,
) -> Result<bool, String> {
    if !interactive {
        line.clear();
        return match reader.read_line(line) {
            Ok(0) => Ok(false),
            Ok(_) => Ok(true),
            Err(e) => Err(e.to_string()),
        };
    }

    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(true),
            Ok(_) => continue,
            Err(e) => break Err(format!("event error: {e}")),
        }
    };
    disable_raw_mode().ok();
    result
}
