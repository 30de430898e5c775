use anyhow::{anyhow, Result};
use log::debug;
use std::str::FromStr;

use crate::entity::DraftField;
use crate::presenter::{BoardPresenter, TokenFormPresenter};
use crate::view::TokenBoardView;

/// Console commands understood by the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Show,
    Draft,
    Edit(i64),
    Set(DraftField, String),
    Reset,
    Save,
    Refresh,
    Help,
    Quit,
}

/// Command names and descriptions for the help message
pub fn register_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("show", "show the chart and the token grid"),
        ("draft", "show the save/update form"),
        ("edit <rank>", "load a token from the grid into the form"),
        (
            "set <field> <value>",
            "set name, symbol, address, supply or holders",
        ),
        ("reset", "clear the form"),
        ("save", "create or update the token in the form"),
        ("refresh", "reload the token table now"),
        ("help", "display this help message"),
        ("quit", "exit"),
    ]
}

pub fn help_text() -> String {
    let mut text = String::from("Available commands:\n");
    for (name, description) in register_commands() {
        text.push_str(&format!("  {:<22} {}\n", name, description));
    }
    text
}

impl FromStr for BoardCommand {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };

        match name.to_lowercase().as_str() {
            "show" | "ls" => Ok(BoardCommand::Show),
            "draft" | "form" => Ok(BoardCommand::Draft),
            "edit" => {
                let rank = rest
                    .parse::<i64>()
                    .map_err(|_| anyhow!("Usage: edit <rank>"))?;
                Ok(BoardCommand::Edit(rank))
            }
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(field, value)| (field, value.trim()))
                    .unwrap_or((rest, ""));
                let field = DraftField::parse(field)
                    .ok_or_else(|| anyhow!("Unknown field {:?}", field))?;
                Ok(BoardCommand::Set(field, value.to_string()))
            }
            "reset" => Ok(BoardCommand::Reset),
            "save" | "submit" => Ok(BoardCommand::Save),
            "refresh" => Ok(BoardCommand::Refresh),
            "help" | "?" => Ok(BoardCommand::Help),
            "quit" | "exit" => Ok(BoardCommand::Quit),
            "" => Err(anyhow!("Empty command")),
            other => Err(anyhow!("Unknown command {:?}, type help", other)),
        }
    }
}

/// Run one command. Returns `false` once the user asked to quit.
pub async fn execute(
    command: BoardCommand,
    board: &dyn BoardPresenter,
    form: &dyn TokenFormPresenter,
    view: &dyn TokenBoardView,
) -> Result<bool> {
    debug!("Executing {:?}", command);

    match command {
        BoardCommand::Show => board.show_board().await?,
        BoardCommand::Draft => form.show_draft().await?,
        BoardCommand::Edit(rank) => board.edit_rank(rank).await?,
        BoardCommand::Set(field, value) => form.set_field(field, &value).await?,
        BoardCommand::Reset => form.reset().await?,
        BoardCommand::Save => {
            form.submit().await?;
        }
        BoardCommand::Refresh => board.refresh().await?,
        BoardCommand::Help => view.display_help(help_text()).await?,
        BoardCommand::Quit => return Ok(false),
    }

    Ok(true)
}
