//! Interactive loop: read a command, run it against the dashboard, print the
//! resulting screen

use crate::command::{Command, CommandError, HELP};
use crate::render::{render_notifications, render_screen, ListView};
use anyhow::{anyhow, Result};
use dashboard::store::{NavigationAction, View};
use dashboard::{Dashboard, DashboardError, PostSelection};
use std::collections::HashSet;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

/// What the loop does after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Print(String),
    Quit,
}

pub struct Session {
    dashboard: Dashboard,
    list: ListView,
}

impl Session {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            list: ListView::default(),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn screen(&self) -> String {
        render_screen(&self.dashboard.snapshot(), &self.list)
    }

    fn active_user_id(&self) -> Result<u64> {
        self.dashboard
            .store()
            .select(|state| state.auth.active_user.as_ref().map(|u| u.id))
            .ok_or_else(|| DashboardError::NotAuthenticated.into())
    }

    fn view(&self) -> View {
        self.dashboard.store().select(|state| state.navigation.view)
    }

    pub async fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!("[Console] {:?}", command);
        let dispatcher = self.dashboard.dispatcher();

        match command {
            Command::Users => {
                dispatcher.fetch_users().await?;
            }
            Command::Login(user_id) => {
                self.list = ListView::default();
                dispatcher.login(user_id).await?;
            }
            Command::Logout => {
                self.list = ListView::default();
                dispatcher.logout();
            }
            Command::Posts => {
                let user_id = self.active_user_id()?;
                dispatcher.navigate(NavigationAction::OpenPostsList);
                dispatcher.fetch_posts_by_user(user_id).await?;
            }
            Command::AllPosts => {
                self.active_user_id()?;
                dispatcher.navigate(NavigationAction::OpenPostsList);
                dispatcher.fetch_posts().await?;
            }
            Command::Search(query) => {
                self.active_user_id()?;
                self.list.query = query;
                self.list.page = 0;
                dispatcher.navigate(NavigationAction::OpenPostsList);
            }
            Command::Page(page) => {
                self.list.page = page - 1;
            }
            Command::View(post_id) => {
                self.dashboard.open_post(post_id).await?;
            }
            Command::Comments => match self.view() {
                View::PostDetail { post_id } => {
                    dispatcher.fetch_comments(post_id).await?;
                }
                _ => return Err(anyhow!("Open a post first with 'view <id>'")),
            },
            Command::New { title, body } => {
                self.dashboard.submit_new_post(&title, &body).await?;
            }
            Command::Edit { id, title, body } => {
                self.dashboard.submit_post_edit(id, &title, &body).await?;
            }
            Command::Delete(post_id) => {
                self.dashboard.delete_post(post_id).await?;
            }
            Command::DeleteMany(ids) => {
                let selection = PostSelection::Include(ids.into_iter().collect::<HashSet<_>>());
                self.dashboard.delete_selected(&selection).await?;
            }
            Command::Profile | Command::Todos => {
                self.dashboard.open_profile().await?;
            }
            Command::Toggle(todo_id) => {
                self.dashboard.toggle_todo(todo_id).await?;
            }
            Command::Albums => {
                self.open_gallery().await?;
            }
            Command::Album(album_id) => {
                self.open_gallery().await?;
                let album = self
                    .dashboard
                    .store()
                    .select(|state| state.albums.albums.iter().find(|a| a.id == album_id).cloned())
                    .ok_or_else(|| anyhow!("Album {} does not belong to this user", album_id))?;
                self.dashboard.dispatcher().open_album(album).await?;
            }
            Command::Back => {
                self.dashboard.back();
            }
            Command::Theme => {
                dispatcher.toggle_theme();
            }
            Command::Dismiss(Some(id)) => {
                self.dashboard.notifications().dismiss(&id);
            }
            Command::Dismiss(None) => {
                self.dashboard.notifications().dismiss_first();
            }
            Command::Notifications => {
                return Ok(Outcome::Print(render_notifications(&self.dashboard.snapshot())));
            }
            Command::Help => return Ok(Outcome::Print(HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Render)
    }

    /// The gallery hangs off the profile, so open that first when needed
    async fn open_gallery(&self) -> Result<()> {
        match self.view() {
            View::Gallery => {}
            View::Profile => {
                self.dashboard.open_gallery();
            }
            _ => {
                self.dashboard.open_profile().await?;
                self.dashboard.open_gallery();
            }
        }
        Ok(())
    }
}

pub async fn run_app(dashboard: Dashboard) -> Result<()> {
    let mut session = Session::new(dashboard);
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("[Console] Started");
    stdout.write_all(session.screen().as_bytes()).await?;

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                stdout.write_all(format!("{}\n", err).as_bytes()).await?;
                continue;
            }
        };

        let output = match session.execute(command).await {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Print(text)) => text,
            Ok(Outcome::Render) => session.screen(),
            // remote failures are already on screen as notifications
            Err(err) => format!("{}\n{}", session.screen(), err),
        };
        stdout.write_all(output.as_bytes()).await?;
    }

    info!("[Console] Bye");
    Ok(())
}
