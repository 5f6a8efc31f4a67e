mod ui;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{error::Error, io, time::Duration};

use wormtype::{
    achievements::{AchievementSet, AchievementStore, FileAchievementStore},
    config::{Config, ConfigStore, FileConfigStore},
    generator::{TextGenerator, TextOptions, MAX_WORDS, MIN_WORDS},
    leaderboard::{self, FileLeaderboardStore, LeaderboardStore, ScoreRecord},
    runtime::{AppEvent, CrosstermEventSource, Runner},
    session::{SessionOutcome, TypingSession},
    worm::Worm,
};

const TICK_RATE_MS: u64 = 100;
const MAX_NAME_LEN: usize = 20;

/// retro terminal typing trainer with a progress worm and a top-10 leaderboard
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A retro typing trainer: race a worm across the terminal, keep your accuracy \
                  up (low accuracy is penalized), and fight for a spot on the local top-10."
)]
pub struct Cli {
    /// number of words per round (1-1000)
    #[clap(short = 'w', long, value_parser = parse_word_count)]
    number_of_words: Option<usize>,

    /// include words with punctuation in the pool
    #[clap(short = 'p', long)]
    punctuation: bool,

    /// include numbers in the pool (numbers only, unless combined with -p)
    #[clap(short = 'n', long)]
    numbers: bool,

    /// player name for the leaderboard (skips the name screen)
    #[clap(long, value_parser = parse_player_name)]
    name: Option<String>,
}

fn parse_player_name(s: &str) -> Result<String, String> {
    // '|' is the leaderboard field separator
    if s.contains('|') {
        return Err("name must not contain `|`".to_string());
    }
    Ok(s.to_string())
}

fn parse_word_count(s: &str) -> Result<usize, String> {
    let count: usize = s
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    if (MIN_WORDS..=MAX_WORDS).contains(&count) {
        Ok(count)
    } else {
        Err(format!(
            "word count must be between {MIN_WORDS} and {MAX_WORDS}"
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NameSelect,
    NameEntry,
    Typing,
    Results,
    Leaderboard,
}

#[derive(Debug)]
pub struct App {
    pub session: TypingSession,
    pub generator: TextGenerator,
    pub worm: Worm,
    pub screen: Screen,
    pub player_name: String,
    pub name_input: String,
    pub name_choices: Vec<String>,
    pub name_cursor: usize,
    pub records: Vec<ScoreRecord>,
    pub achievements: AchievementSet,
    pub outcome: Option<SessionOutcome>,
    pub unlocked_this_round: bool,
    pub confirm_clear: bool,
}

impl App {
    pub fn new(
        generator: TextGenerator,
        records: Vec<ScoreRecord>,
        achievements: AchievementSet,
        preset_name: Option<String>,
    ) -> Self {
        let target = generator.generate(&mut rand::thread_rng());
        let name_choices = leaderboard::unique_names(&records);

        let (screen, player_name) = match preset_name {
            Some(name) if !name.trim().is_empty() => {
                (Screen::Typing, name.trim().to_uppercase())
            }
            _ if name_choices.is_empty() => (Screen::NameEntry, String::new()),
            _ => (Screen::NameSelect, String::new()),
        };

        Self {
            session: TypingSession::new(&target),
            generator,
            worm: Worm::new(),
            screen,
            player_name,
            name_input: String::new(),
            name_choices,
            name_cursor: 0,
            records,
            achievements,
            outcome: None,
            unlocked_this_round: false,
            confirm_clear: false,
        }
    }

    /// Fresh target, fresh worm, back to the typing screen.
    pub fn new_round(&mut self) {
        let target = self.generator.generate(&mut rand::thread_rng());
        self.session.restart(&target);
        self.worm = Worm::new();
        self.outcome = None;
        self.unlocked_this_round = false;
        self.screen = Screen::Typing;
    }

    fn sync_worm(&mut self) {
        self.worm
            .set_progress(self.session.typed().len(), self.session.target().len());
    }
}

/// Split CLI flags into what this run plays with and what gets persisted.
/// Mode flags apply to the run only: there is no flag to switch a mode back
/// off, so writing `-p`/`-n` into the config would latch them forever.
fn merge_settings(cli: &Cli, mut config: Config) -> (Config, TextOptions) {
    if let Some(count) = cli.number_of_words {
        config.number_of_words = count;
    }
    config.number_of_words = config.number_of_words.clamp(MIN_WORDS, MAX_WORDS);

    let options = TextOptions {
        punctuation: cli.punctuation || config.punctuation,
        numbers: cli.numbers || config.numbers,
    };
    (config, options)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config_store = FileConfigStore::new();
    let (mut config, options) = merge_settings(&cli, config_store.load());
    let generator = TextGenerator::new(config.number_of_words, options);

    let leaderboard_store = FileLeaderboardStore::new();
    let achievement_store = FileAchievementStore::new();

    let records = leaderboard_store.load();
    let mut achievements = AchievementSet::new();
    achievement_store.load(&mut achievements);

    let preset_name = cli.name.clone().or_else(|| config.player_name.clone());
    let mut app = App::new(generator, records, achievements, preset_name);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(
        &mut terminal,
        &mut app,
        &leaderboard_store,
        &achievement_store,
        &config_store,
        &mut config,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    leaderboard_store: &impl LeaderboardStore,
    achievement_store: &impl AchievementStore,
    config_store: &impl ConfigStore,
    config: &mut Config,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Tick => {
                app.worm.on_tick();
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if key.kind != crossterm::event::KeyEventKind::Press {
                    continue;
                }
                let flow = handle_key(
                    app,
                    key,
                    leaderboard_store,
                    achievement_store,
                    config_store,
                    config,
                );
                if flow == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

fn handle_key(
    app: &mut App,
    key: crossterm::event::KeyEvent,
    leaderboard_store: &impl LeaderboardStore,
    achievement_store: &impl AchievementStore,
    config_store: &impl ConfigStore,
    config: &mut Config,
) -> Flow {
    use crossterm::event::{KeyCode, KeyModifiers};

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }
    if key.code == KeyCode::Esc {
        return Flow::Quit;
    }

    match app.screen {
        Screen::NameSelect => match key.code {
            KeyCode::Up => {
                app.name_cursor = app.name_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                // one past the end selects "create new player"
                if app.name_cursor < app.name_choices.len() {
                    app.name_cursor += 1;
                }
            }
            KeyCode::Enter => {
                if app.name_cursor < app.name_choices.len() {
                    app.player_name = app.name_choices[app.name_cursor].clone();
                    remember_name(config_store, config, &app.player_name);
                    app.screen = Screen::Typing;
                } else {
                    app.screen = Screen::NameEntry;
                }
            }
            KeyCode::Char('q') => return Flow::Quit,
            _ => {}
        },
        Screen::NameEntry => match key.code {
            KeyCode::Enter => {
                if !app.name_input.is_empty() {
                    app.player_name = app.name_input.to_uppercase();
                    remember_name(config_store, config, &app.player_name);
                    app.screen = Screen::Typing;
                }
            }
            KeyCode::Backspace => {
                app.name_input.pop();
            }
            KeyCode::Char(c) => {
                // '|' is the leaderboard field separator
                if (c.is_ascii_graphic() || c == ' ') && c != '|' {
                    if app.name_input.len() < MAX_NAME_LEN {
                        app.name_input.push(c);
                    }
                }
            }
            _ => {}
        },
        Screen::Typing => match key.code {
            KeyCode::Enter => app.new_round(),
            KeyCode::Backspace => {
                app.session.backspace();
                app.sync_worm();
            }
            KeyCode::Char(' ') => {
                app.session.space();
                after_input(app, leaderboard_store, achievement_store);
            }
            KeyCode::Char(c) => {
                app.session.write(c);
                after_input(app, leaderboard_store, achievement_store);
            }
            _ => {}
        },
        Screen::Results => match key.code {
            KeyCode::Enter | KeyCode::Char('n') => app.new_round(),
            KeyCode::Char('l') => {
                app.confirm_clear = false;
                app.screen = Screen::Leaderboard;
            }
            KeyCode::Char('w') => {
                if app.achievements.cycle_equipped() {
                    let _ = achievement_store.save(&app.achievements);
                }
            }
            KeyCode::Char('q') => return Flow::Quit,
            _ => {}
        },
        Screen::Leaderboard => {
            if app.confirm_clear {
                if let KeyCode::Char('y') | KeyCode::Char('Y') = key.code {
                    app.records.clear();
                    let _ = leaderboard_store.save(&app.records);
                }
                app.confirm_clear = false;
            } else {
                match key.code {
                    KeyCode::Char('c') => app.confirm_clear = true,
                    _ => app.screen = Screen::Results,
                }
            }
        }
    }

    Flow::Continue
}

/// Round completion boundary: finalize, record, and check achievements.
/// Persistence is best-effort; a failed save never interrupts play.
fn after_input(
    app: &mut App,
    leaderboard_store: &impl LeaderboardStore,
    achievement_store: &impl AchievementStore,
) {
    app.sync_worm();

    if !app.session.is_complete() {
        return;
    }
    let Some(outcome) = app.session.finalize() else {
        return;
    };

    let record = ScoreRecord::new(
        &app.player_name,
        outcome.wpm,
        outcome.accuracy,
        outcome.elapsed_secs,
        app.generator.word_count(),
        app.generator.options().punctuation,
        app.generator.options().numbers,
    );
    leaderboard::add(&mut app.records, record);
    let _ = leaderboard_store.save(&app.records);
    app.name_choices = leaderboard::unique_names(&app.records);

    app.unlocked_this_round = app.achievements.check(outcome.wpm);
    if app.unlocked_this_round {
        let _ = achievement_store.save(&app.achievements);
    }

    app.outcome = Some(outcome);
    app.screen = Screen::Results;
}

fn remember_name(config_store: &impl ConfigStore, config: &mut Config, name: &str) {
    config.player_name = Some(name.to_string());
    let _ = config_store.save(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            number_of_words: None,
            punctuation: false,
            numbers: false,
            name: None,
        }
    }

    #[test]
    fn test_mode_flags_apply_to_the_run_only() {
        let mut cli = cli();
        cli.punctuation = true;
        cli.numbers = true;

        let (config, options) = merge_settings(&cli, Config::default());
        assert!(options.punctuation);
        assert!(options.numbers);
        // a later config save must not latch the modes on
        assert!(!config.punctuation);
        assert!(!config.numbers);
    }

    #[test]
    fn test_config_modes_apply_without_flags() {
        let config = Config {
            punctuation: true,
            ..Config::default()
        };
        let (_, options) = merge_settings(&cli(), config);
        assert!(options.punctuation);
        assert!(!options.numbers);
    }

    #[test]
    fn test_word_count_flag_overrides_and_persists() {
        let mut cli = cli();
        cli.number_of_words = Some(50);

        let (config, _) = merge_settings(&cli, Config::default());
        assert_eq!(config.number_of_words, 50);
    }

    #[test]
    fn test_stale_config_word_count_is_clamped() {
        let config = Config {
            number_of_words: 0,
            ..Config::default()
        };
        let (config, _) = merge_settings(&cli(), config);
        assert_eq!(config.number_of_words, MIN_WORDS);
    }

    #[test]
    fn test_player_name_rejects_the_field_separator() {
        assert!(parse_player_name("alice|60|90|30").is_err());
        assert_eq!(parse_player_name("alice").unwrap(), "alice");
    }

    #[test]
    fn test_name_entry_ignores_the_field_separator() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let dir = tempfile::tempdir().unwrap();
        let leaderboard_store = FileLeaderboardStore::with_path(dir.path().join("lb.txt"));
        let achievement_store = FileAchievementStore::with_path(dir.path().join("ach.txt"));
        let config_store = FileConfigStore::with_path(dir.path().join("cfg.json"));
        let mut config = Config::default();

        let generator = TextGenerator::new(5, TextOptions::default());
        let mut app = App::new(generator, Vec::new(), AchievementSet::new(), None);
        assert_eq!(app.screen, Screen::NameEntry);

        for code in [KeyCode::Char('a'), KeyCode::Char('|'), KeyCode::Char('b')] {
            handle_key(
                &mut app,
                KeyEvent::new(code, KeyModifiers::NONE),
                &leaderboard_store,
                &achievement_store,
                &config_store,
                &mut config,
            );
        }
        assert_eq!(app.name_input, "ab");
    }
}
