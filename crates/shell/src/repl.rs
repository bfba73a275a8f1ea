//! Interactive command loop over a [`Filer`] session.
//!
//! Lines are split into words (double quotes group words containing
//! spaces), parsed into a [`Command`] and executed against the session.
//! Errors are reported and the loop carries on; only `exit` or end of input
//! stops it.

use std::io::{self, BufRead, Write};

use filer::{Filer, FilerError, SearchQuery};
use thiserror::Error;
use tracing::debug;

use crate::view;

/// Errors raised while parsing or running a command line.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),

    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error(transparent)]
    Filer(#[from] FilerError),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pwd,
    Home,
    Ls { all: bool },
    Cd(String),
    Up,
    Back,
    Forward,
    Front,
    Rear,
    Escape(String),
    Copy(String),
    Cut(String),
    Paste(Option<String>),
    Clip { clear: bool },
    Cp(String, String),
    Mv(String, String),
    Touch(String),
    Mkdir(String),
    Rm(String),
    Rename(String, String),
    Hide(String),
    Unhide(String),
    Find(String),
    Grep(String, Option<String>),
    Zip(String, Vec<String>),
    Unzip(String, Option<String>),
    Info(String),
    Help,
    Exit,
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (if any) and read the next line.
    Continue(String),
    /// Stop reading.
    Exit,
}

const HELP: &str = "\
navigation:  pwd | home | ls [-a] | cd PATH | up | back | forward | front | rear | escape PATH
clipboard:   copy PATH | cut PATH | paste [DEST] | clip [clear]
files:       cp SRC DEST | mv SRC DEST | touch PATH | mkdir PATH | rm PATH
             rename PATH NAME | hide PATH | unhide PATH | info PATH
archives:    zip ARCHIVE PATH... | unzip ARCHIVE [DEST]
search:      find PATTERN | grep PATTERN [PATH]
other:       help | exit";

/// Split a line into words, honouring double quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, ReplError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(ReplError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse a command line. Blank lines parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ReplError> {
    let words = split_words(line)?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };
    let mut args = Args::new(args);

    let command = match name.as_str() {
        "pwd" => Command::Pwd,
        "home" => Command::Home,
        "ls" => Command::Ls {
            all: args.flag("-a") || args.flag("--all"),
        },
        "cd" => Command::Cd(args.required("cd", "path")?),
        "up" => Command::Up,
        "back" => Command::Back,
        "forward" => Command::Forward,
        "front" => Command::Front,
        "rear" => Command::Rear,
        "escape" => Command::Escape(args.required("escape", "path")?),
        "copy" => Command::Copy(args.required("copy", "path")?),
        "cut" => Command::Cut(args.required("cut", "path")?),
        "paste" => Command::Paste(args.optional()),
        "clip" => Command::Clip {
            clear: args.flag("clear"),
        },
        "cp" => Command::Cp(
            args.required("cp", "source")?,
            args.required("cp", "destination")?,
        ),
        "mv" => Command::Mv(
            args.required("mv", "source")?,
            args.required("mv", "destination")?,
        ),
        "touch" => Command::Touch(args.required("touch", "path")?),
        "mkdir" => Command::Mkdir(args.required("mkdir", "path")?),
        "rm" => Command::Rm(args.required("rm", "path")?),
        "rename" => Command::Rename(
            args.required("rename", "path")?,
            args.required("rename", "new name")?,
        ),
        "hide" => Command::Hide(args.required("hide", "path")?),
        "unhide" => Command::Unhide(args.required("unhide", "path")?),
        "find" => Command::Find(args.required("find", "pattern")?),
        "grep" => Command::Grep(args.required("grep", "pattern")?, args.optional()),
        "zip" => {
            let archive = args.required("zip", "archive")?;
            let paths = args.rest();
            if paths.is_empty() {
                return Err(ReplError::MissingArgument {
                    command: "zip",
                    argument: "path",
                });
            }
            Command::Zip(archive, paths)
        }
        "unzip" => Command::Unzip(args.required("unzip", "archive")?, args.optional()),
        "info" => Command::Info(args.required("info", "path")?),
        "help" | "?" => Command::Help,
        "exit" | "quit" => Command::Exit,
        other => return Err(ReplError::UnknownCommand(other.to_string())),
    };

    if !args.is_done() {
        return Err(ReplError::TooManyArguments(command_name(&command)));
    }
    Ok(Some(command))
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Pwd => "pwd",
        Command::Home => "home",
        Command::Ls { .. } => "ls",
        Command::Cd(_) => "cd",
        Command::Up => "up",
        Command::Back => "back",
        Command::Forward => "forward",
        Command::Front => "front",
        Command::Rear => "rear",
        Command::Escape(_) => "escape",
        Command::Copy(_) => "copy",
        Command::Cut(_) => "cut",
        Command::Paste(_) => "paste",
        Command::Clip { .. } => "clip",
        Command::Cp(..) => "cp",
        Command::Mv(..) => "mv",
        Command::Touch(_) => "touch",
        Command::Mkdir(_) => "mkdir",
        Command::Rm(_) => "rm",
        Command::Rename(..) => "rename",
        Command::Hide(_) => "hide",
        Command::Unhide(_) => "unhide",
        Command::Find(_) => "find",
        Command::Grep(..) => "grep",
        Command::Zip(..) => "zip",
        Command::Unzip(..) => "unzip",
        Command::Info(_) => "info",
        Command::Help => "help",
        Command::Exit => "exit",
    }
}

/// Cursor over the words after the command name.
struct Args<'a> {
    words: &'a [String],
    next: usize,
}

impl<'a> Args<'a> {
    fn new(words: &'a [String]) -> Self {
        Self { words, next: 0 }
    }

    fn optional(&mut self) -> Option<String> {
        let word = self.words.get(self.next).cloned();
        if word.is_some() {
            self.next += 1;
        }
        word
    }

    fn required(&mut self, command: &'static str, argument: &'static str) -> Result<String, ReplError> {
        self.optional()
            .ok_or(ReplError::MissingArgument { command, argument })
    }

    fn flag(&mut self, flag: &str) -> bool {
        if self.words.get(self.next).map(String::as_str) == Some(flag) {
            self.next += 1;
            true
        } else {
            false
        }
    }

    fn rest(&mut self) -> Vec<String> {
        let rest = self.words[self.next..].to_vec();
        self.next = self.words.len();
        rest
    }

    fn is_done(&self) -> bool {
        self.next >= self.words.len()
    }
}

/// Command loop state: a session plus nothing else.
pub struct Repl {
    filer: Filer,
}

impl Repl {
    pub fn new(filer: Filer) -> Self {
        Self { filer }
    }

    pub fn filer(&self) -> &Filer {
        &self.filer
    }

    /// Parse and execute one line.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome, ReplError> {
        match parse_line(line)? {
            Some(command) => self.execute(command),
            None => Ok(Outcome::Continue(String::new())),
        }
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, ReplError> {
        debug!(?command, "Executing command");
        let filer = &mut self.filer;

        let output = match command {
            Command::Pwd => filer.current_location().display().to_string(),
            Command::Home => {
                let lock = filer
                    .lock_boundary()
                    .map(|boundary| format!(" (locked at {})", boundary.display()))
                    .unwrap_or_default();
                format!("{}{}", filer.home_location().display(), lock)
            }
            Command::Ls { all } => {
                let files = if all {
                    filer
                        .get_folder(".")?
                        .contains()
                        .to_vec()
                } else {
                    filer.list()?
                };
                view::render_entries(&files, false)?
            }
            Command::Cd(path) => {
                let file = filer.open(&path)?;
                if file.is_folder() {
                    filer.current_location().display().to_string()
                } else {
                    view::render_info(&file, false)?
                }
            }
            Command::Up => filer.go_up()?.display().to_string(),
            Command::Back => filer.go_backward()?.display().to_string(),
            Command::Forward => filer.go_forward()?.display().to_string(),
            Command::Front => display_or(filer.front_location(), "no forward history"),
            Command::Rear => display_or(filer.rear_location(), "no backward history"),
            Command::Escape(path) => filer
                .open_in_locked_home(&path)?
                .location()
                .display()
                .to_string(),
            Command::Copy(path) => {
                filer.copy(&path)?;
                clip_status(filer)
            }
            Command::Cut(path) => {
                filer.cut(&path)?;
                clip_status(filer)
            }
            Command::Paste(destination) => {
                let destination = destination.unwrap_or_else(|| ".".to_string());
                let pasted = filer.paste(&destination)?;
                format!("pasted {}", pasted.location().display())
            }
            Command::Clip { clear } => {
                if clear {
                    filer.clear_clipboard();
                }
                clip_status(filer)
            }
            Command::Cp(source, destination) => {
                let copied = filer.copy_to(&source, &destination)?;
                format!("copied to {}", copied.location().display())
            }
            Command::Mv(source, destination) => {
                let moved = filer.cut_to(&source, &destination)?;
                format!("moved to {}", moved.location().display())
            }
            Command::Touch(path) => filer.create_new_file(&path)?.location().display().to_string(),
            Command::Mkdir(path) => filer
                .create_new_folder(&path)?
                .location()
                .display()
                .to_string(),
            Command::Rm(path) => {
                filer.delete(&path)?;
                format!("removed {}", path)
            }
            Command::Rename(path, name) => filer.rename(&path, &name)?.location().display().to_string(),
            Command::Hide(path) => filer.hide(&path)?.display().to_string(),
            Command::Unhide(path) => filer.un_hide(&path)?.display().to_string(),
            Command::Find(pattern) => join_paths(filer.search(&pattern)?),
            Command::Grep(pattern, root) => {
                let query = SearchQuery::content(&pattern)?;
                let root = root.unwrap_or_else(|| ".".to_string());
                join_paths(filer.search_in(&root, &query)?)
            }
            Command::Zip(archive, paths) => {
                let zipped = filer.zip(&paths, &archive)?;
                format!("created {}", zipped.location().display())
            }
            Command::Unzip(archive, destination) => {
                let destination = destination.unwrap_or_else(|| ".".to_string());
                let folder = filer.unzip(&archive, &destination)?;
                format!("extracted into {}", folder.location().display())
            }
            Command::Info(path) => view::render_info(&filer.get_file(&path)?, false)?,
            Command::Help => HELP.to_string(),
            Command::Exit => return Ok(Outcome::Exit),
        };

        Ok(Outcome::Continue(output))
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// Command failures are written to `output` as `error: ...` lines and do
    /// not stop the loop.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        write!(output, "{}> ", self.filer.current_location().display())?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute_line(&line) {
                Ok(Outcome::Exit) => return Ok(()),
                Ok(Outcome::Continue(text)) => {
                    if !text.is_empty() {
                        writeln!(output, "{}", text)?;
                    }
                }
                Err(e) => writeln!(output, "error: {}", e)?,
            }
            write!(output, "{}> ", self.filer.current_location().display())?;
            output.flush()?;
        }

        writeln!(output)?;
        Ok(())
    }
}

fn display_or(location: Option<&std::path::Path>, empty: &str) -> String {
    location
        .map(|l| l.display().to_string())
        .unwrap_or_else(|| empty.to_string())
}

fn clip_status(filer: &Filer) -> String {
    match (filer.paste_operation(), filer.clipboard()) {
        (Some(operation), Some(source)) => format!("{} {}", operation, source.display()),
        _ => "clipboard is empty".to_string(),
    }
}

fn join_paths(paths: Vec<std::path::PathBuf>) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_with_quotes() {
        let words = split_words(r#"rename "my file.txt" new.txt"#).unwrap();
        assert_eq!(words, vec!["rename", "my file.txt", "new.txt"]);
    }

    #[test]
    fn test_split_words_empty_quotes() {
        let words = split_words(r#"rename a """#).unwrap();
        assert_eq!(words, vec!["rename", "a", ""]);
    }

    #[test]
    fn test_split_words_unterminated() {
        assert!(matches!(split_words(r#"cd "docs"#), Err(ReplError::UnterminatedQuote)));
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("ls -a").unwrap(), Some(Command::Ls { all: true }));
        assert_eq!(parse_line("ls").unwrap(), Some(Command::Ls { all: false }));
        assert_eq!(parse_line("paste").unwrap(), Some(Command::Paste(None)));
        assert_eq!(
            parse_line("cp a.txt docs").unwrap(),
            Some(Command::Cp("a.txt".into(), "docs".into()))
        );
        assert_eq!(
            parse_line("zip out.zip a b").unwrap(),
            Some(Command::Zip("out.zip".into(), vec!["a".into(), "b".into()]))
        );
        assert_eq!(parse_line("quit").unwrap(), Some(Command::Exit));
        assert_eq!(parse_line("clip clear").unwrap(), Some(Command::Clip { clear: true }));
        assert!(matches!(parse_line("clip now"), Err(ReplError::TooManyArguments("clip"))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_line("frobnicate"), Err(ReplError::UnknownCommand(_))));
        assert!(matches!(
            parse_line("cd"),
            Err(ReplError::MissingArgument { command: "cd", .. })
        ));
        assert!(matches!(
            parse_line("zip out.zip"),
            Err(ReplError::MissingArgument { command: "zip", argument: "path" })
        ));
        assert!(matches!(parse_line("pwd extra"), Err(ReplError::TooManyArguments("pwd"))));
    }
}
