mod commands;
mod terminal;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use caltodo_chat::ChatPanel;
use caltodo_core::Config;
use caltodo_planner::{PlannerController, SqliteStorage, SystemClock};
use caltodo_services::{ChatClient, SummaryClient, TodoClient};

use commands::Command;
use terminal::TerminalFrontend;

type Planner = PlannerController<TerminalFrontend>;

fn main() -> Result<()> {
    caltodo_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    let origin = config.api_origin();
    let storage_path = config.storage_path();
    tracing::info!("API origin: {}", origin);
    tracing::info!("Local storage: {}", storage_path.display());

    let storage = SqliteStorage::open(&storage_path)
        .with_context(|| format!("Failed to open {}", storage_path.display()))?;
    let todos = TodoClient::new(&origin)?;
    let summaries = SummaryClient::new(&origin)?;
    let chat = ChatClient::new(&origin)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let mut planner = PlannerController::new(
        todos,
        summaries,
        Box::new(storage),
        TerminalFrontend,
        SystemClock,
    );
    let mut panel = ChatPanel::new();

    runtime.block_on(async {
        match chat.status().await {
            Ok(true) => tracing::info!("Chat service is available"),
            Ok(false) => tracing::warn!("Chat service reported unavailable"),
            Err(e) => tracing::warn!("Chat service unreachable: {}", e),
        }
        if let Err(e) = planner.start().await {
            tracing::warn!("Initial month load failed: {}", e);
        }
    });

    println!("CalTodo ({} theme). Type 'help' for commands.", planner.theme());

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        runtime.block_on(dispatch(&mut planner, &mut panel, &chat, command));
    }

    tracing::info!("CalTodo exiting");
    Ok(())
}

async fn dispatch(
    planner: &mut Planner,
    panel: &mut ChatPanel,
    chat: &ChatClient,
    command: Command,
) {
    // Failures have already been shown to the user as notices.
    let result = match command {
        Command::Help => {
            println!("{}", commands::HELP);
            Ok(())
        }
        Command::Quit => Ok(()),
        Command::Add(text) => planner.add_todo(&text).await.map(|_| ()),
        Command::Toggle(id) => planner.toggle_done(id).await.map(|_| ()),
        Command::Delete(id) => planner.delete_todo(id).await.map(|_| ()),
        Command::Edit(id) => {
            if !planner.begin_edit(id) {
                println!("No item #{} on the selected day", id);
            }
            Ok(())
        }
        Command::SetBuffer(id, text) => {
            if !planner.update_edit_buffer(id, &text) {
                println!("Item #{} is not being edited", id);
            }
            Ok(())
        }
        Command::Save(id) => planner.save_edit(id).await.map(|_| ()),
        Command::Cancel(id) => {
            planner.cancel_edit(id);
            Ok(())
        }
        Command::Select(date) => {
            planner.select_date(date).await;
            Ok(())
        }
        Command::Previous => planner.show_previous_month().await,
        Command::Next => planner.show_next_month().await,
        Command::Today => planner.show_today().await,
        Command::ClearDone => planner.clear_done().await.map(|_| ()),
        Command::ClearAll => planner.clear_all().await.map(|_| ()),
        Command::Summary => planner
            .summarize_month()
            .await
            .map(|summary| terminal::print_summary(&summary)),
        Command::Theme => {
            println!("Theme: {}", planner.toggle_theme());
            Ok(())
        }
        Command::Chat(message) => {
            panel.open();
            if panel.send(chat, &message).await.is_some() {
                terminal::print_chat(panel);
            }
            Ok(())
        }
        Command::ToggleChat => {
            if panel.toggle() {
                terminal::print_chat(panel);
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {}", e);
    }
}
