use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use minefield::input::{map_game_key, map_prompt_key, GameCommand};
use minefield::minesweeper::logic::force_quit;
use minefield::minesweeper::{
    process_input, Bounds, LevelConfig, MinesweeperGame, MinesweeperInput, MinesweeperResult,
    ScoreTable,
};
use minefield::report::SessionReport;
use minefield::ui::config_prompt::{ConfigPrompt, PromptOutcome};
use minefield::ui::draw;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, Level};

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal minesweeper", long_about = None)]
struct Args {
    /// Board width in cells
    #[arg(short, long)]
    width: Option<usize>,
    /// Board height in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,
    /// Number of bombs
    #[arg(short, long)]
    bombs: Option<usize>,
    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,
    /// Write log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// More log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Print the session report as JSON instead of the bare score
    #[arg(long)]
    json: bool,
}

/// What the event loop is showing on top of the board.
enum Screen {
    Prompt(ConfigPrompt),
    Game,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &args);

    // Cleanup terminal before any error gets printed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let report = outcome?;
    info!(result = ?report.result, score = report.score, "session finished");

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.score);
    }

    Ok(())
}

/// Install a file logger when `--log-file` is given. The terminal belongs to
/// the board while the game runs, so nothing is logged to stderr.
fn init_logging(args: &Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

/// First screen: the board straight away when the command line fully and
/// validly describes a level, otherwise a prompt prefilled from it.
fn initial_screen(args: &Args, bounds: Bounds) -> std::result::Result<LevelConfig, ConfigPrompt> {
    let mut prompt = ConfigPrompt::with_values(bounds, args.width, args.height, args.bombs);

    if let (Some(width), Some(height), Some(bombs)) = (args.width, args.height, args.bombs) {
        match LevelConfig::new(width, height, bombs, &bounds) {
            Ok(config) => return Ok(config),
            Err(err) => {
                info!(%err, "command line configuration rejected");
                prompt.error = Some(err);
            }
        }
    }
    Err(prompt)
}

fn run(terminal: &mut Term, args: &Args) -> Result<SessionReport> {
    let scores = ScoreTable::default();
    let mut rng = match args.seed {
        Some(seed) => {
            info!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let size = terminal.size()?;
    let bounds = Bounds::for_area(size.width, size.height);

    let mut game: Option<MinesweeperGame> = None;
    let mut screen = match initial_screen(args, bounds) {
        Ok(config) => {
            game = Some(MinesweeperGame::new(config, &mut rng));
            Screen::Game
        }
        Err(prompt) => Screen::Prompt(prompt),
    };

    loop {
        let prompt = match &screen {
            Screen::Prompt(prompt) => Some(prompt),
            Screen::Game => None,
        };
        terminal.draw(|frame| draw(frame, game.as_ref(), prompt, &scores))?;

        // Resizes and mouse events only trigger a redraw
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match &mut screen {
            Screen::Prompt(prompt) => match prompt.handle_input(map_prompt_key(key)) {
                PromptOutcome::Pending => {}
                PromptOutcome::Cancelled => {
                    if game.is_none() {
                        info!("configuration cancelled before the first level");
                        break;
                    }
                    screen = Screen::Game;
                }
                PromptOutcome::Quit => {
                    if let Some(active) = game.as_mut() {
                        force_quit(active);
                    }
                    break;
                }
                PromptOutcome::Done(config) => {
                    match game.as_mut() {
                        Some(game) => {
                            process_input(game, MinesweeperInput::NewLevel(config), &mut rng);
                        }
                        None => game = Some(MinesweeperGame::new(config, &mut rng)),
                    }
                    screen = Screen::Game;
                }
            },
            Screen::Game => {
                let Some(active) = game.as_mut() else {
                    break;
                };

                // Any key leaves the game-over banner
                if active.is_over() {
                    break;
                }

                match map_game_key(key) {
                    GameCommand::ForceQuit => {
                        force_quit(active);
                        break;
                    }
                    GameCommand::Play(input) => {
                        process_input(active, input, &mut rng);
                        // Quitting needs no banner
                        if active.game_result == Some(MinesweeperResult::Quit) {
                            break;
                        }
                    }
                    GameCommand::RequestNewLevel if active.show_help => {
                        process_input(active, MinesweeperInput::Other, &mut rng);
                    }
                    GameCommand::RequestNewLevel => {
                        let size = terminal.size()?;
                        screen =
                            Screen::Prompt(ConfigPrompt::new(Bounds::for_area(size.width, size.height)));
                    }
                }
            }
        }
    }

    Ok(match &game {
        Some(game) => SessionReport::from_game(game, &scores),
        None => SessionReport::abandoned(&scores),
    })
}
