//! Parsing of interactive shell commands.

use rtspio_core::error::CoreError;
use rtspio_core::geometry::ResizeHandle;

pub const HELP: &str = "\
Commands:
  help                          show this help
  list                          list overlays of the current stream
  render                        show overlays in paint order
  editor                        toggle the overlay editor
  menu                          toggle the add-overlay menu
  add text                      add a text overlay
  add image <path>              add an image overlay from a local file
  add url <url>                 add an image overlay from a URL
  select <id>                   select an overlay
  click <id>                    click an overlay (starts text editing)
  type <text>                   replace the text being edited
  enter | escape | blur         commit or discard the text edit
  move <id> <x> <y>             drag an overlay to a position
  resize <id> <handle> <dx> <dy>  drag a resize handle (n e s w ne se sw nw)
  hide <id>                     toggle visibility
  delete <id>                   delete an overlay
  z <id> <n>                    set z-index
  color <#rrggbb>               text colour of the selected overlay
  font <px>                     font size of the selected overlay (12-48)
  stream <id>                   switch stream and load its overlays
  reload                        reload overlays from the backend
  clear                         delete every overlay of the stream
  convert <rtsp_url> [name]     get an RTSP.me embed URL for a camera
  quit                          exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Render,
    ToggleEditor,
    ToggleMenu,
    AddText,
    AddImageFile(String),
    AddImageUrl(String),
    Select(String),
    Click(String),
    Type(String),
    Enter,
    Escape,
    Blur,
    Move { id: String, x: f64, y: f64 },
    Resize { id: String, handle: ResizeHandle, dx: f64, dy: f64 },
    Hide(String),
    Delete(String),
    ZIndex { id: String, z_index: i64 },
    Color(String),
    Font(f64),
    Stream(String),
    Reload,
    Clear,
    Convert { rtsp_url: String, name: Option<String> },
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("'{command}' needs <{arg}>")]
    MissingArgument {
        command: &'static str,
        arg: &'static str,
    },

    #[error("<{arg}> must be a number, got '{value}'")]
    InvalidNumber { arg: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Whitespace-separated arguments of one command line.
struct Args<'a> {
    command: &'static str,
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn next(&mut self, arg: &'static str) -> Result<&'a str, CommandError> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            return Err(CommandError::MissingArgument {
                command: self.command,
                arg,
            });
        }
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.rest = &rest[end..];
        Ok(&rest[..end])
    }

    /// Everything left on the line, untrimmed inside.
    fn remainder(&mut self, arg: &'static str) -> Result<&'a str, CommandError> {
        let rest = self.rest.trim();
        if rest.is_empty() {
            return Err(CommandError::MissingArgument {
                command: self.command,
                arg,
            });
        }
        self.rest = "";
        Ok(rest)
    }

    fn number<T: std::str::FromStr>(&mut self, arg: &'static str) -> Result<T, CommandError> {
        let raw = self.next(arg)?;
        raw.parse().map_err(|_| CommandError::InvalidNumber {
            arg,
            value: raw.to_string(),
        })
    }

    fn id(&mut self) -> Result<String, CommandError> {
        self.next("id").map(str::to_string)
    }
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };
    if word.is_empty() {
        return Err(CommandError::Empty);
    }

    let command: &'static str = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "list" | "ls" => return Ok(Command::List),
        "render" => return Ok(Command::Render),
        "editor" => return Ok(Command::ToggleEditor),
        "menu" => return Ok(Command::ToggleMenu),
        "enter" => return Ok(Command::Enter),
        "escape" | "esc" => return Ok(Command::Escape),
        "blur" => return Ok(Command::Blur),
        "reload" => return Ok(Command::Reload),
        "clear" => return Ok(Command::Clear),
        "quit" | "exit" => return Ok(Command::Quit),
        "add" => "add",
        "select" => "select",
        "click" => "click",
        "type" => "type",
        "move" => "move",
        "resize" => "resize",
        "hide" => "hide",
        "delete" | "rm" => "delete",
        "z" => "z",
        "color" => "color",
        "font" => "font",
        "stream" => "stream",
        "convert" => "convert",
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    let mut args = Args { command, rest };

    let parsed = match command {
        "add" => match args.next("text|image|url")? {
            "text" => Command::AddText,
            "image" => Command::AddImageFile(args.remainder("path")?.to_string()),
            "url" => Command::AddImageUrl(args.remainder("url")?.to_string()),
            other => return Err(CommandError::Unknown(format!("add {other}"))),
        },
        "select" => Command::Select(args.id()?),
        "click" => Command::Click(args.id()?),
        "type" => Command::Type(args.remainder("text")?.to_string()),
        "move" => Command::Move {
            id: args.id()?,
            x: args.number("x")?,
            y: args.number("y")?,
        },
        "resize" => Command::Resize {
            id: args.id()?,
            handle: ResizeHandle::parse(args.next("handle")?)?,
            dx: args.number("dx")?,
            dy: args.number("dy")?,
        },
        "hide" => Command::Hide(args.id()?),
        "delete" => Command::Delete(args.id()?),
        "z" => Command::ZIndex {
            id: args.id()?,
            z_index: args.number("n")?,
        },
        "color" => Command::Color(args.next("#rrggbb")?.to_string()),
        "font" => Command::Font(args.number("px")?),
        "stream" => Command::Stream(args.id()?),
        "convert" => {
            let rtsp_url = args.next("rtsp_url")?.to_string();
            let name = args.remainder("name").ok().map(str::to_string);
            Command::Convert { rtsp_url, name }
        }
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(parsed)
}
