use crate::cli::{parse_integer, DialoguerPrompter, LinePrompter, Prompter};
use crate::display::{
    format_single, format_table, group_thousands, BarChart, ChartRenderer, ImageViewer,
    SystemImageViewer, TerminalChart,
};
use crate::error::Result;
use crate::models::StateRecord;
use crate::store::RecordStore;
use clap::{Parser, ValueEnum};
use colored::*;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Number of states shown on the population bar chart.
pub const TOP_STATES_COUNT: usize = 5;

pub const WELCOME_MESSAGE: &str = "Welcome to the State Information Application! Use the menu \
                                   below to navigate through the application.";
pub const FAREWELL_MESSAGE: &str = "Thank you for using this program, have a great day!";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input.";
pub const NEGATIVE_POPULATION_MESSAGE: &str = "Population must be non-negative.";
pub const CANCELLED_MESSAGE: &str = "Operation cancelled.";

pub const MENU_PROMPT: &str = "Please enter your selection:";
pub const STATE_PROMPT: &str = "Please enter the state you want to look up:";
pub const POPULATION_PROMPT: &str = "Please enter the updated population:";

pub const MENU_TEXT: &str = "\nPlease choose from the menu options below:\n\
\n1.\tDisplay all U.S. States in Alphabetical order along with the Capital, \
State Population, and Flower.\
\n2.\tSearch for a specific state and display the appropriate Capital, State \
Population, and an image of the associated State Flower.\
\n3.\tProvide a Bar graph of the top 5 populated States showing their overall \
population.\
\n4.\tUpdate the overall state population for a specific state.\
\n5.\tExit Program.\n";

/// How prompts are drawn.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// Read raw lines from standard input
    #[default]
    Plain,
    /// Themed prompts from `dialoguer`
    Colorful,
}

/// Log line format.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Browse U.S. state capitals, populations and flowers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File with one `name,capital,population,flower,image` record per line
    #[arg(long, env = "STATES_FILE", default_value = "states.txt")]
    pub states_file: PathBuf,

    /// Directory holding the flower pictures
    #[arg(long, env = "FLOWERS_DIR", default_value = "flowers")]
    pub flowers_dir: PathBuf,

    /// Word that abandons a state search or population update
    #[arg(long, env = "STATE_INFO_CANCEL_WORD")]
    pub cancel_word: Option<String>,

    /// Program used to open flower pictures (defaults to the platform opener)
    #[arg(long, env = "STATE_INFO_VIEWER")]
    pub viewer: Option<String>,

    /// Prompt style
    #[arg(long, env = "STATE_INFO_PROMPT_STYLE", value_enum, default_value_t = PromptStyle::Plain)]
    pub prompt_style: PromptStyle,

    /// Write logs to this file instead of standard error
    #[arg(long, env = "STATE_INFO_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log line format
    #[arg(long, env = "STATE_INFO_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayAll,
    Search,
    BarChart,
    UpdatePopulation,
    Exit,
}

impl MenuChoice {
    /// Maps a menu number to its choice.
    pub fn from_number(number: i128) -> Option<Self> {
        match number {
            1 => Some(Self::DisplayAll),
            2 => Some(Self::Search),
            3 => Some(Self::BarChart),
            4 => Some(Self::UpdatePopulation),
            5 => Some(Self::Exit),
            _ => None,
        }
    }

    /// Interprets a line of user input; `None` for anything that is not a menu number.
    pub fn parse(input: &str) -> Option<Self> {
        parse_integer(input).ok().and_then(Self::from_number)
    }
}

/// What the menu loop does after handling a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Running,
    Exiting,
}

/// CLI application
pub struct App {
    store: RecordStore,
    flowers_dir: PathBuf,
    cancel_word: Option<String>,
    prompter: Box<dyn Prompter>,
    viewer: Box<dyn ImageViewer>,
    chart: Box<dyn ChartRenderer>,
}

impl App {
    /// Create a new CLI application from parsed command-line options.
    ///
    /// Loads the states file; the rest of the session works on the in-memory copy.
    pub fn new(cli: &Cli) -> Result<Self> {
        let store = RecordStore::load(&cli.states_file)?;
        if store.is_empty() {
            warn!("{} contains no states", cli.states_file.display());
        }

        let prompter: Box<dyn Prompter> = match cli.prompt_style {
            PromptStyle::Plain => Box::new(LinePrompter::stdio()),
            PromptStyle::Colorful => Box::new(DialoguerPrompter::default()),
        };

        Ok(Self::from_parts(
            store,
            cli.flowers_dir.clone(),
            cli.cancel_word.clone(),
            prompter,
            Box::new(SystemImageViewer::new(cli.viewer.clone())),
            Box::new(TerminalChart::stdout()),
        ))
    }

    /// Assemble an application from already-built collaborators.
    pub fn from_parts(
        store: RecordStore,
        flowers_dir: PathBuf,
        cancel_word: Option<String>,
        prompter: Box<dyn Prompter>,
        viewer: Box<dyn ImageViewer>,
        chart: Box<dyn ChartRenderer>,
    ) -> Self {
        let cancel_word = cancel_word
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty());
        Self {
            store,
            flowers_dir,
            cancel_word,
            prompter,
            viewer,
            chart,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Run the interactive menu until the user chooses to exit.
    ///
    /// # Errors
    ///
    /// Data errors (a missing flower picture, a viewer that cannot start,
    /// broken output) end the session and are returned to the caller, as does
    /// `AppError::InputClosed` when input runs out before the user exits.
    pub fn run(&mut self) -> Result<()> {
        self.prompter.say(&WELCOME_MESSAGE.cyan().bold().to_string())?;

        let mut state = MenuState::Running;
        while state == MenuState::Running {
            state = self.step()?;
        }

        info!("Session finished");
        Ok(())
    }

    /// Show the menu once, read a selection and act on it.
    pub fn step(&mut self) -> Result<MenuState> {
        self.prompter.say(MENU_TEXT)?;
        let line = self.prompter.read_line(MENU_PROMPT)?;

        match MenuChoice::parse(&line) {
            Some(choice) => self.dispatch(choice),
            None => {
                debug!(input = %line, "Rejected menu selection");
                self.invalid_input()?;
                Ok(MenuState::Running)
            },
        }
    }

    /// Execute a single menu selection.
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<MenuState> {
        debug!(?choice, "Dispatching menu selection");
        match choice {
            MenuChoice::DisplayAll => self.display_all()?,
            MenuChoice::Search => self.search_and_display()?,
            MenuChoice::BarChart => self.show_top_states()?,
            MenuChoice::UpdatePopulation => self.update_population()?,
            MenuChoice::Exit => {
                self.prompter.say(&FAREWELL_MESSAGE.green().to_string())?;
                return Ok(MenuState::Exiting);
            },
        }
        Ok(MenuState::Running)
    }

    /// Print every state in alphabetical order.
    fn display_all(&mut self) -> Result<()> {
        let table = format_table(self.store.list_sorted());
        self.prompter.write_text("\n")?;
        self.prompter.write_text(&table)
    }

    /// Look up a state, print it and open its flower picture.
    fn search_and_display(&mut self) -> Result<()> {
        let Some(record) = self.select_state()? else {
            return Ok(());
        };

        self.prompter.write_text(&format_single(&record))?;

        let image = self.flowers_dir.join(&record.flower_image);
        self.viewer.show(&image)
    }

    /// Draw the bar chart of the most populous states.
    fn show_top_states(&mut self) -> Result<()> {
        let chart = BarChart::top_states(self.store.top_populations(TOP_STATES_COUNT));
        self.chart.render(&chart)
    }

    /// Look up a state and replace its population with a value read from the user.
    fn update_population(&mut self) -> Result<()> {
        let Some(record) = self.select_state()? else {
            return Ok(());
        };

        loop {
            let line = self.prompter.read_line(POPULATION_PROMPT)?;
            if self.is_cancel(&line) {
                return self.prompter.say(&CANCELLED_MESSAGE.yellow().to_string());
            }

            let population = match parse_integer(&line) {
                Ok(n) if n < 0 => {
                    self.prompter
                        .say(&NEGATIVE_POPULATION_MESSAGE.red().to_string())?;
                    continue;
                },
                Ok(n) => u64::try_from(n).ok(),
                Err(_) => None,
            };

            match population {
                Some(population) => {
                    self.store.replace_population(&record.name, population)?;
                    return self.prompter.say(&format!(
                        "\nThe population of {} was successfully updated to {}.",
                        record.name,
                        group_thousands(population)
                    ));
                },
                None => self.invalid_input()?,
            }
        }
    }

    /// Prompt for a state name until one matches.
    ///
    /// Returns `None` only when a cancel word is configured and the user enters it.
    fn select_state(&mut self) -> Result<Option<StateRecord>> {
        loop {
            let line = self.prompter.read_line(STATE_PROMPT)?;
            if self.is_cancel(&line) {
                self.prompter
                    .say(&CANCELLED_MESSAGE.yellow().to_string())?;
                return Ok(None);
            }

            if let Some(record) = self.store.find_by_name(line.trim()) {
                debug!(state = %record, "Selected state");
                return Ok(Some(record.clone()));
            }
            self.invalid_input()?;
        }
    }

    fn is_cancel(&self, input: &str) -> bool {
        self.cancel_word
            .as_deref()
            .is_some_and(|word| word.eq_ignore_ascii_case(input.trim()))
    }

    fn invalid_input(&mut self) -> Result<()> {
        self.prompter.say(&INVALID_INPUT_MESSAGE.red().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use rstest::rstest;
    use serial_test::serial;

    #[rstest]
    #[case("1", Some(MenuChoice::DisplayAll))]
    #[case(" 2 ", Some(MenuChoice::Search))]
    #[case("3", Some(MenuChoice::BarChart))]
    #[case("4", Some(MenuChoice::UpdatePopulation))]
    #[case("5", Some(MenuChoice::Exit))]
    #[case("0", None)]
    #[case("6", None)]
    #[case("9", None)]
    #[case("-1", None)]
    #[case("one", None)]
    #[case("", None)]
    fn test_menu_choice_parse(#[case] input: &str, #[case] expected: Option<MenuChoice>) {
        assert_eq!(MenuChoice::parse(input), expected);
    }

    #[test]
    #[serial]
    fn test_cli_defaults() {
        for var in [
            "STATES_FILE",
            "FLOWERS_DIR",
            "STATE_INFO_CANCEL_WORD",
            "STATE_INFO_VIEWER",
            "STATE_INFO_PROMPT_STYLE",
            "STATE_INFO_LOG_FILE",
            "STATE_INFO_LOG_FORMAT",
        ] {
            std::env::remove_var(var);
        }

        let cli = Cli::try_parse_from(["state-info"]).unwrap();
        assert_eq!(cli.states_file, PathBuf::from("states.txt"));
        assert_eq!(cli.flowers_dir, PathBuf::from("flowers"));
        assert_eq!(cli.cancel_word, None);
        assert_eq!(cli.viewer, None);
        assert_eq!(cli.prompt_style, PromptStyle::Plain);
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_cli_reads_environment() {
        std::env::set_var("STATES_FILE", "data/other.txt");
        std::env::set_var("STATE_INFO_CANCEL_WORD", "back");
        let cli = Cli::try_parse_from(["state-info"]);
        std::env::remove_var("STATES_FILE");
        std::env::remove_var("STATE_INFO_CANCEL_WORD");

        let cli = cli.unwrap();
        assert_eq!(cli.states_file, PathBuf::from("data/other.txt"));
        assert_eq!(cli.cancel_word.as_deref(), Some("back"));
    }

    #[test]
    #[serial]
    fn test_cli_flags_override() {
        let cli = Cli::try_parse_from([
            "state-info",
            "--states-file",
            "s.txt",
            "--flowers-dir",
            "pics",
            "--prompt-style",
            "colorful",
            "--log-format",
            "json",
            "--viewer",
            "feh",
        ])
        .unwrap();
        assert_eq!(cli.states_file, PathBuf::from("s.txt"));
        assert_eq!(cli.flowers_dir, PathBuf::from("pics"));
        assert_eq!(cli.prompt_style, PromptStyle::Colorful);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.viewer.as_deref(), Some("feh"));
    }

    #[test]
    #[serial]
    fn test_app_new_fails_on_missing_states_file() {
        let cli = Cli::try_parse_from(["state-info", "--states-file", "no/such/states.txt"])
            .unwrap();
        assert!(matches!(App::new(&cli), Err(AppError::Io(_))));
    }
}
