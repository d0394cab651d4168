//! Typed commands of the interactive console

use dashboard_api::{AlbumId, PostId, TodoId, UserId};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Users,
    Login(UserId),
    Logout,
    /// Reload the active user's posts
    Posts,
    /// Load every post on the server
    AllPosts,
    /// Filter the list; empty text clears the filter
    Search(String),
    /// One-based page of the (filtered) list
    Page(usize),
    View(PostId),
    Comments,
    New { title: String, body: String },
    Edit { id: PostId, title: String, body: String },
    Delete(PostId),
    DeleteMany(Vec<PostId>),
    Profile,
    Todos,
    Toggle(TodoId),
    Albums,
    Album(AlbumId),
    Back,
    Theme,
    Dismiss(Option<String>),
    Notifications,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a valid id")]
    InvalidId(String),
}

pub const HELP: &str = "\
users                       list users to log in as
login <id>                  log in as a user and load their posts
logout                      back to the login screen
posts | all-posts           reload this user's posts | load every post
search <text>               filter posts by title and body (no text clears)
page <n>                    show page n of the list
view <id>                   open a post with its comments
comments                    reload comments of the open post
new <title> | <body>        create a post
edit <id> <title> | <body>  update a post
delete <id>                 delete a post
delete-many <id,id,...>     delete several posts at once
profile | todos             open the profile with todos and albums
toggle <id>                 flip a todo's completed flag
albums | album <id>         open the gallery | open an album
back                        go back one level
theme                       toggle light/dark
dismiss [id]                close a notification (oldest if no id)
notifications               list notifications
help | quit";

fn parse_id(text: &str) -> Result<u64, CommandError> {
    text.trim()
        .parse()
        .map_err(|_| CommandError::InvalidId(text.trim().to_string()))
}

/// Split `<title> | <body>`
fn parse_form(text: &str, usage: &'static str) -> Result<(String, String), CommandError> {
    let (title, body) = text.split_once('|').ok_or(CommandError::Usage(usage))?;
    Ok((title.trim().to_string(), body.trim().to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "" => return Err(CommandError::Empty),
            "users" => Command::Users,
            "login" => Command::Login(parse_id(rest).map_err(|_| CommandError::Usage("login <id>"))?),
            "logout" => Command::Logout,
            "posts" => Command::Posts,
            "all-posts" => Command::AllPosts,
            "search" => Command::Search(rest.to_string()),
            "page" => {
                let page: usize = rest.parse().map_err(|_| CommandError::Usage("page <n>"))?;
                if page == 0 {
                    return Err(CommandError::Usage("page <n>, starting at 1"));
                }
                Command::Page(page)
            }
            "view" => Command::View(parse_id(rest)?),
            "comments" => Command::Comments,
            "new" => {
                let (title, body) = parse_form(rest, "new <title> | <body>")?;
                Command::New { title, body }
            }
            "edit" => {
                const USAGE: &str = "edit <id> <title> | <body>";
                let (id, form) = rest.split_once(char::is_whitespace).ok_or(CommandError::Usage(USAGE))?;
                let (title, body) = parse_form(form, USAGE)?;
                Command::Edit {
                    id: parse_id(id)?,
                    title,
                    body,
                }
            }
            "delete" => Command::Delete(parse_id(rest)?),
            "delete-many" => {
                let ids = rest
                    .split(',')
                    .filter(|part| !part.trim().is_empty())
                    .map(parse_id)
                    .collect::<Result<Vec<_>, _>>()?;
                if ids.is_empty() {
                    return Err(CommandError::Usage("delete-many <id,id,...>"));
                }
                Command::DeleteMany(ids)
            }
            "profile" => Command::Profile,
            "todos" => Command::Todos,
            "toggle" => Command::Toggle(parse_id(rest)?),
            "albums" | "gallery" => Command::Albums,
            "album" => Command::Album(parse_id(rest)?),
            "back" => Command::Back,
            "theme" => Command::Theme,
            "dismiss" => Command::Dismiss((!rest.is_empty()).then(|| rest.to_string())),
            "notifications" => Command::Notifications,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_forms() {
        assert_eq!(
            "new  My title |  Some body text ".parse::<Command>().unwrap(),
            Command::New {
                title: "My title".to_string(),
                body: "Some body text".to_string()
            }
        );
        assert_eq!(
            "edit 7 Title | Body | with pipe".parse::<Command>().unwrap(),
            Command::Edit {
                id: 7,
                title: "Title".to_string(),
                body: "Body | with pipe".to_string()
            }
        );
        assert_eq!(
            "new no separator".parse::<Command>(),
            Err(CommandError::Usage("new <title> | <body>"))
        );
    }

    #[test]
    fn parses_ids() {
        assert_eq!("delete-many 1, 2,3".parse::<Command>().unwrap(), Command::DeleteMany(vec![1, 2, 3]));
        assert_eq!("view x".parse::<Command>(), Err(CommandError::InvalidId("x".to_string())));
        assert_eq!("login".parse::<Command>(), Err(CommandError::Usage("login <id>")));
        assert_eq!("page 0".parse::<Command>(), Err(CommandError::Usage("page <n>, starting at 1")));
    }

    #[test]
    fn optional_arguments() {
        assert_eq!("dismiss".parse::<Command>().unwrap(), Command::Dismiss(None));
        assert_eq!(
            "dismiss notification-1".parse::<Command>().unwrap(),
            Command::Dismiss(Some("notification-1".to_string()))
        );
        assert_eq!("search".parse::<Command>().unwrap(), Command::Search(String::new()));
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "frobnicate".parse::<Command>(),
            Err(CommandError::Unknown("frobnicate".to_string()))
        );
    }

    proptest! {
        #[test]
        fn arbitrary_input_never_panics(line in "\\PC{0,40}") {
            let _ = line.parse::<Command>();
        }
    }
}
