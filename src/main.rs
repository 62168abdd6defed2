use name_that_knight::cli::{CliInterface, parse_cli};
use name_that_knight::logging::init_logging;
use name_that_knight::tui::TuiInterface;
use name_that_knight::{GameInterface, KnightFrames, KnightResult, Scoreboard, WordBank, game_loop};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();

    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(scoreboard) => {
            if scoreboard.rounds() > 0 {
                println!(
                    "Knights named: {}, knights lost: {}.",
                    scoreboard.wins(),
                    scoreboard.losses()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &name_that_knight::cli::Cli) -> KnightResult<Scoreboard> {
    let bank = WordBank::resolve(cli.wordbank_path.as_deref())?;
    let frames = KnightFrames::resolve(cli.art_dir.as_deref())?;
    let mut rng = rand::rng();

    let mut interface: Box<dyn GameInterface> = if cli.plain {
        Box::new(CliInterface::new(io::stdin().lock(), io::stdout()))
    } else {
        Box::new(TuiInterface::new()?)
    };

    let scoreboard = game_loop(&bank, &frames, interface.as_mut(), &mut rng)?;
    // Restores the terminal before the summary is printed.
    drop(interface);
    Ok(scoreboard)
}
