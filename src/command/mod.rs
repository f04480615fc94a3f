//! The command protocol state machine.
//!
//! A command is a sequence of tokens in action/actor/argument order,
//! e.g. `swap` `window` `3`. A fixed table maps each action keyword to
//! its usage string, its actor keywords, and the shape of the argument
//! each actor expects. The dispatcher walks the table one token at a
//! time against an abstract [`Connection`], so the same machine serves
//! the socket server and the key-binding resolver.
//!
//! Grammar failures reply with a descriptive message and abort the
//! command without touching any state. Valid commands produce an
//! [`Invocation`], executed by the caller under the shared lock.

use anyhow::{anyhow, Result};
use thiserror::Error;

use crate::layout::Region;
use crate::wm::{RollDirection, WindowManager};

/// Usage text replied to `--help` and unknown actions.
pub const USAGE: &str = "usage: <action> <actor> [argument]\n\
                         commands:\n\
                         push stack\n\
                         pop <window | stack>\n\
                         swap <window | stack> <0...inf>\n\
                         roll <window | stack> <top | bottom>\n\
                         move window <0...inf>\n\
                         set gap <0...inf>\n\
                         split screen <WxH+X+Y> ...\n\
                         logout wm\n\
                         --help";

/// A fully parsed command, ready to run against the window manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    PushGroup,
    PopWindow,
    PopGroup,
    SwapWindow(usize),
    SwapGroup(usize),
    RollWindow(RollDirection),
    RollGroup(RollDirection),
    MoveWindow(usize),
    SetGap(u32),
    SplitScreen(Vec<Region>),
    Logout,
}

/// What the caller should do after executing an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Shutdown,
}

impl Invocation {
    /// Run the command against the shared state. Structural no-ops
    /// (out-of-range indices, popping a non-empty group) are silently
    /// ignored inside the handlers; this is the policy for both the
    /// socket and key-binding paths.
    pub fn execute(&self, wm: &mut WindowManager) -> Outcome {
        match self {
            Invocation::PushGroup => wm.push_group(),
            Invocation::PopWindow => wm.close_window(),
            Invocation::PopGroup => wm.pop_group(),
            Invocation::SwapWindow(n) => wm.swap_window(*n),
            Invocation::SwapGroup(n) => wm.swap_group(*n),
            Invocation::RollWindow(dir) => wm.roll_window(*dir),
            Invocation::RollGroup(dir) => wm.roll_group(*dir),
            Invocation::MoveWindow(n) => wm.move_window(*n),
            Invocation::SetGap(gap) => wm.set_gap(*gap),
            Invocation::SplitScreen(regions) => wm.set_regions(regions.clone()),
            Invocation::Logout => return Outcome::Shutdown,
        }
        Outcome::Continue
    }
}

/// A grammar-level rejection; `Display` is the exact reply text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid action: `{token}`\nExpected: {usage}")]
    UnknownAction { token: String, usage: &'static str },
    #[error("Invalid actor: `{token}`\nExpected: {usage}")]
    UnknownActor { token: String, usage: &'static str },
    #[error("Invalid argument: `{token}`\nExpected unsigned integer")]
    ExpectedUInt { token: String },
    #[error("Invalid argument: `{token}`\nExpected `top` or `bottom`")]
    ExpectedDirection { token: String },
    #[error("Invalid argument: `{token}`\nExpected split in form `WxH+x+y`")]
    ExpectedRegion { token: String },
    #[error("One or more splits must be specified in form `WxH+x+y`")]
    EmptyRegionList,
}

/// One token-per-call transport for a command exchange.
pub trait Connection {
    /// Read the next token. A closed transport yields empty tokens,
    /// which never match a keyword and terminate a region list.
    fn read_token(&mut self) -> Result<String>;

    /// Send a reply to the client. Success is silent; only `--help`
    /// and grammar errors produce a reply.
    fn reply(&mut self, text: &str) -> Result<()>;
}

/// How the final token of a command is parsed.
enum ArgShape {
    Nullary(fn() -> Invocation),
    UInt(fn(usize) -> Invocation),
    Gap(fn(u32) -> Invocation),
    Direction(fn(RollDirection) -> Invocation),
    Regions(fn(Vec<Region>) -> Invocation),
}

struct ActorSpec {
    actor: &'static str,
    shape: ArgShape,
}

struct CommandSpec {
    action: &'static str,
    usage: &'static str,
    actors: &'static [ActorSpec],
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        action: "push",
        usage: "push stack",
        actors: &[ActorSpec {
            actor: "stack",
            shape: ArgShape::Nullary(|| Invocation::PushGroup),
        }],
    },
    CommandSpec {
        action: "pop",
        usage: "pop <window | stack>",
        actors: &[
            ActorSpec {
                actor: "window",
                shape: ArgShape::Nullary(|| Invocation::PopWindow),
            },
            ActorSpec {
                actor: "stack",
                shape: ArgShape::Nullary(|| Invocation::PopGroup),
            },
        ],
    },
    CommandSpec {
        action: "swap",
        usage: "swap <window | stack> <0...inf>",
        actors: &[
            ActorSpec {
                actor: "window",
                shape: ArgShape::UInt(Invocation::SwapWindow),
            },
            ActorSpec {
                actor: "stack",
                shape: ArgShape::UInt(Invocation::SwapGroup),
            },
        ],
    },
    CommandSpec {
        action: "roll",
        usage: "roll <window | stack> <top | bottom>",
        actors: &[
            ActorSpec {
                actor: "window",
                shape: ArgShape::Direction(Invocation::RollWindow),
            },
            ActorSpec {
                actor: "stack",
                shape: ArgShape::Direction(Invocation::RollGroup),
            },
        ],
    },
    CommandSpec {
        action: "move",
        usage: "move window <0...inf>",
        actors: &[ActorSpec {
            actor: "window",
            shape: ArgShape::UInt(Invocation::MoveWindow),
        }],
    },
    CommandSpec {
        action: "set",
        usage: "set gap <0...inf>",
        actors: &[ActorSpec {
            actor: "gap",
            shape: ArgShape::Gap(Invocation::SetGap),
        }],
    },
    CommandSpec {
        action: "split",
        usage: "split screen <WxH+X+Y> ...",
        actors: &[ActorSpec {
            actor: "screen",
            shape: ArgShape::Regions(Invocation::SplitScreen),
        }],
    },
    CommandSpec {
        action: "logout",
        usage: "logout wm",
        actors: &[ActorSpec {
            actor: "wm",
            shape: ArgShape::Nullary(|| Invocation::Logout),
        }],
    },
];

/// Drive one command exchange over `conn`.
///
/// Returns `Ok(Some(_))` when a valid command was read, `Ok(None)` when
/// a reply (help or error) already settled the exchange, and `Err` only
/// for transport failures.
pub fn dispatch<C: Connection>(conn: &mut C) -> Result<Option<Invocation>> {
    match read_invocation(conn)? {
        Ok(Some(invocation)) => Ok(Some(invocation)),
        Ok(None) => Ok(None),
        Err(err) => {
            conn.reply(&err.to_string())?;
            Ok(None)
        }
    }
}

/// Token-machine proper: `Ok(Ok(None))` means `--help` was served.
fn read_invocation<C: Connection>(
    conn: &mut C,
) -> Result<std::result::Result<Option<Invocation>, CommandError>> {
    let action = conn.read_token()?;
    if action == "--help" {
        conn.reply(USAGE)?;
        return Ok(Ok(None));
    }
    let Some(cmd) = COMMANDS.iter().find(|c| c.action == action) else {
        return Ok(Err(CommandError::UnknownAction {
            token: action,
            usage: USAGE,
        }));
    };

    let actor = conn.read_token()?;
    let Some(spec) = cmd.actors.iter().find(|a| a.actor == actor) else {
        return Ok(Err(CommandError::UnknownActor {
            token: actor,
            usage: cmd.usage,
        }));
    };

    let parsed = match spec.shape {
        ArgShape::Nullary(build) => Ok(build()),
        ArgShape::UInt(build) => {
            let token = conn.read_token()?;
            parse_uint(&token).map(build)
        }
        ArgShape::Gap(build) => {
            let token = conn.read_token()?;
            parse_gap(&token).map(build)
        }
        ArgShape::Direction(build) => {
            let token = conn.read_token()?;
            parse_direction(&token).map(build)
        }
        ArgShape::Regions(build) => read_regions(conn)?.map(build),
    };
    Ok(parsed.map(Some))
}

fn parse_uint(token: &str) -> std::result::Result<usize, CommandError> {
    token.parse().map_err(|_| CommandError::ExpectedUInt {
        token: token.to_string(),
    })
}

fn parse_gap(token: &str) -> std::result::Result<u32, CommandError> {
    token.parse().map_err(|_| CommandError::ExpectedUInt {
        token: token.to_string(),
    })
}

fn parse_direction(token: &str) -> std::result::Result<RollDirection, CommandError> {
    match token {
        "top" => Ok(RollDirection::Top),
        "bottom" => Ok(RollDirection::Bottom),
        _ => Err(CommandError::ExpectedDirection {
            token: token.to_string(),
        }),
    }
}

/// Accumulate `WxH+X+Y` tokens until the empty terminator. The whole
/// list fails if any token fails, and it may not be empty.
fn read_regions<C: Connection>(
    conn: &mut C,
) -> Result<std::result::Result<Vec<Region>, CommandError>> {
    let mut regions = Vec::new();
    loop {
        let token = conn.read_token()?;
        if token.is_empty() {
            break;
        }
        match token.parse::<Region>() {
            Ok(region) => regions.push(region),
            Err(_) => return Ok(Err(CommandError::ExpectedRegion { token })),
        }
    }
    if regions.is_empty() {
        return Ok(Err(CommandError::EmptyRegionList));
    }
    Ok(Ok(regions))
}

/// A `Connection` over a pre-tokenized line; used to resolve key
/// bindings from configuration.
struct LineConnection {
    tokens: std::vec::IntoIter<String>,
    reply: Option<String>,
}

impl Connection for LineConnection {
    fn read_token(&mut self) -> Result<String> {
        Ok(self.tokens.next().unwrap_or_default())
    }

    fn reply(&mut self, text: &str) -> Result<()> {
        self.reply = Some(text.to_string());
        Ok(())
    }
}

/// Parse a whitespace-separated command line, e.g. `"roll window top"`,
/// through the same table as the wire protocol.
pub fn parse_line(line: &str) -> Result<Invocation> {
    let mut conn = LineConnection {
        tokens: line
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
            .into_iter(),
        reply: None,
    };
    match dispatch(&mut conn)? {
        Some(invocation) => Ok(invocation),
        None => {
            let reason = conn.reply.unwrap_or_else(|| "empty command".to_string());
            Err(anyhow!("not a command: `{line}`\n{reason}"))
        }
    }
}
