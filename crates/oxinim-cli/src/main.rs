mod command;
mod game;
mod logging;
mod record;
mod schema;
mod tui;
mod ui;

fn main() -> anyhow::Result<()> {
    command::run()
}
